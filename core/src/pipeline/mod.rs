// rill/src/pipeline/mod.rs

//! Defines the `Pipeline<T>` struct, its construction and configuration, and
//! its intermediate and terminal operations.

pub mod builder;
pub mod definition;
pub mod intermediate;
pub mod terminal;

// Re-export the main Pipeline struct
pub use builder::{PipelineBuilder, PipelineConfig};
pub use definition::Pipeline;

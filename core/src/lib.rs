// src/lib.rs

//! Rill: lazy, single-pass, composable sequence pipelines for Rust.
//!
//! A `Pipeline<T>` wraps a source sequence and lets you chain lazy stages
//! over it, terminated by exactly one evaluating operation:
//!  - Intermediate stages: `map`, `try_map`, `filter`, `flat_map`, `sorted`, `skip`, `limit`, `peek`.
//!  - Terminal operations: `count`, `to_vec`, `collect`, `reduce`, `fold`, `sum`,
//!    `find_first`, `any_match`, `min`, `max`, `for_each`, ...
//!  - One-shot consumption: a second terminal operation on the same pipeline (or
//!    a clone, or anything derived from it) fails with `RillError::AlreadyConsumed`.
//!  - Fallible stages whose errors abort the running terminal operation.
//!
//! The crate also ships the `Capability` trait, an interface whose newer method
//! carries a default body.

pub mod capability;
pub mod core;
pub mod error;
pub mod pipeline;

// --- Re-exports for the Public API ---

pub use crate::core::stage::{StageDef, StageKind};
pub use crate::core::state::PipelineState;

pub use crate::pipeline::builder::{PipelineBuilder, PipelineConfig};
pub use crate::pipeline::definition::Pipeline;

pub use crate::capability::{default_try_me_again, Capability, FunctionalCapability, EMPTY_MESSAGE_RESPONSE};

pub use crate::error::{RillError, RillResult, ALREADY_CONSUMED_MESSAGE};

/*
    Core Workflow:
    1. Create a pipeline over any `IntoIterator`: `Pipeline::source(values)`,
       or `Pipeline::builder().label("numbers").source(values)`.
    2. Chain stages. Each one takes the pipeline by value and returns a new lazy
       pipeline; nothing is pulled from the source yet.
    3. Call one terminal operation. It marks the pipeline consumed, runs the single
       traversal and returns `RillResult<_>`.
    4. Need the data again? Build a new pipeline from the backing collection.
*/

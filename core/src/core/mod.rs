pub mod stage;
pub mod state;
pub mod traversal;

// Re-export key types for easier access from other rill modules (and lib.rs)
pub use stage::{StageDef, StageKind};
pub use state::PipelineState;
pub use traversal::Traversal;

// rill/src/core/state.rs

//! The one-shot consumption state shared by a pipeline and everything derived from it.

use crate::error::{RillError, RillResult};
use parking_lot::Mutex;
use std::sync::Arc;

/// Whether a pipeline's traversal has been started.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PipelineState {
  /// No terminal operation has run yet.
  Unconsumed,
  /// A terminal operation has started (or finished) the traversal.
  /// Every further terminal call fails with `RillError::AlreadyConsumed`.
  Consumed,
}

/// Shared, interior-mutable `PipelineState`.
///
/// Cloning shares the same state: a pipeline, its clones and every pipeline
/// derived from it through chaining all observe a single flag.
#[derive(Debug)]
pub(crate) struct ConsumptionState(Arc<Mutex<PipelineState>>);

impl ConsumptionState {
  pub(crate) fn new() -> Self {
    ConsumptionState(Arc::new(Mutex::new(PipelineState::Unconsumed)))
  }

  pub(crate) fn get(&self) -> PipelineState {
    *self.0.lock()
  }

  pub(crate) fn is_consumed(&self) -> bool {
    self.get() == PipelineState::Consumed
  }

  /// Moves the state from `Unconsumed` to `Consumed`.
  ///
  /// The check and the transition happen under one lock, so only the first
  /// caller ever gets `Ok`.
  pub(crate) fn begin(&self, operation: &'static str) -> RillResult<()> {
    let mut guard = self.0.lock();
    match *guard {
      PipelineState::Unconsumed => {
        *guard = PipelineState::Consumed;
        Ok(())
      }
      PipelineState::Consumed => Err(RillError::AlreadyConsumed { operation }),
    }
  }
}

impl Clone for ConsumptionState {
  fn clone(&self) -> Self {
    ConsumptionState(Arc::clone(&self.0))
  }
}

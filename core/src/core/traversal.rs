// rill/src/core/traversal.rs

//! Plumbing for a single pass over a pipeline.

use crate::error::{RillError, RillResult};
use std::sync::Arc;

/// A running pass over a pipeline's elements.
///
/// Every item is a `RillResult` so that a failing stage can report its error in
/// place of the element. Consumers stop at the first `Err`.
pub type Traversal<T> = Box<dyn Iterator<Item = RillResult<T>> + Send>;

/// Opens a new traversal over a pipeline's stages.
///
/// Each stage wraps the opener of the stage before it, so calling the outermost
/// opener builds the whole iterator chain at once. Building the chain does not
/// pull any element yet.
pub(crate) type Opener<T> = Arc<dyn Fn() -> RillResult<Traversal<T>> + Send + Sync>;

/// A traversal that yields exactly one error.
pub(crate) fn failed<T: Send + 'static>(err: RillError) -> Traversal<T> {
  Box::new(std::iter::once(Err(err)))
}

/// Builds its inner traversal on the first call to `next`.
///
/// Used by stages that have to look at all upstream elements before yielding
/// (sorting), so that the work still happens during the terminal operation's
/// pass and not when the stage is attached or opened.
pub(crate) struct Deferred<T> {
  init: Option<Box<dyn FnOnce() -> Traversal<T> + Send>>,
  inner: Option<Traversal<T>>,
}

impl<T> Deferred<T> {
  pub(crate) fn new(init: impl FnOnce() -> Traversal<T> + Send + 'static) -> Self {
    Self {
      init: Some(Box::new(init)),
      inner: None,
    }
  }
}

impl<T> Iterator for Deferred<T> {
  type Item = RillResult<T>;

  fn next(&mut self) -> Option<Self::Item> {
    if self.inner.is_none() {
      let init = self.init.take()?;
      self.inner = Some(init());
    }
    self.inner.as_mut()?.next()
  }
}

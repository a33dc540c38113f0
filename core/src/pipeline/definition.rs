// rill/src/pipeline/definition.rs

//! Contains the `Pipeline<T>` struct definition, its sources, and the
//! machinery shared by intermediate and terminal operations.

use crate::core::stage::{StageDef, StageKind};
use crate::core::state::{ConsumptionState, PipelineState};
use crate::core::traversal::{Opener, Traversal};
use crate::error::{RillError, RillResult};
use crate::pipeline::builder::{PipelineBuilder, PipelineConfig};
use parking_lot::Mutex;
use std::fmt;
use std::sync::Arc;
use tracing::{event, Level};

/// A lazy, ordered, single-pass sequence of `T`.
///
/// A pipeline holds no materialized data. It is a source plus an ordered list
/// of stages, and nothing is pulled from the source until a terminal operation
/// (`count`, `to_vec`, `reduce`, ...) runs. That terminal operation consumes the
/// pipeline: the consumption state is shared with every clone of the pipeline
/// and every pipeline derived from it, and any later terminal call on any of
/// them fails with `RillError::AlreadyConsumed`.
///
/// `T` must be `Send + 'static`; stage closures must be `Send + Sync + 'static`.
pub struct Pipeline<T>
where
  T: Send + 'static,
{
  pub(crate) config: Arc<PipelineConfig>,
  pub(crate) state: ConsumptionState,
  /// Ordered descriptors of the attached stages.
  pub(crate) stages: Vec<StageDef>,
  /// Builds the iterator chain for the one traversal this pipeline allows.
  pub(crate) opener: Opener<T>,
}

impl<T> Pipeline<T>
where
  T: Send + 'static,
{
  /// Creates an unconsumed pipeline over `items` with the default configuration.
  ///
  /// O(1): the iterator is stored, not traversed.
  pub fn source<I>(items: I) -> Self
  where
    I: IntoIterator<Item = T>,
    I::IntoIter: Send + 'static,
  {
    Self::with_config(Arc::new(PipelineConfig::default()), items)
  }

  /// Creates an unconsumed pipeline with no elements.
  pub fn empty() -> Self {
    Self::source(std::iter::empty())
  }

  /// Creates an unbounded pipeline `seed, f(&seed), f(&f(&seed)), ...`.
  ///
  /// `f` runs when the next element is pulled, never ahead of demand, so a
  /// bounded prefix never computes an element nobody asked for.
  /// Pair it with `limit` or a short-circuiting terminal operation.
  pub fn iterate<F>(seed: T, f: F) -> Self
  where
    T: Clone,
    F: Fn(&T) -> T + Send + 'static,
  {
    let mut seed = Some(seed);
    let mut last: Option<T> = None;
    Self::source(std::iter::from_fn(move || -> Option<T> {
      let value = match last.take() {
        Some(prev) => f(&prev),
        None => seed.take()?,
      };
      last = Some(value.clone());
      Some(value)
    }))
  }

  /// Creates a pipeline yielding every element of `first`, then every element of `second`.
  ///
  /// The result has its own consumption state. Traversing it consumes both inputs,
  /// so it fails with `AlreadyConsumed` if either input was consumed before.
  /// The configuration of `first` is kept.
  pub fn concat(first: Pipeline<T>, second: Pipeline<T>) -> Self {
    let config = Arc::clone(&first.config);
    let opener: Opener<T> = Arc::new(move || -> RillResult<Traversal<T>> {
      let head = first.traverse("concat")?;
      let tail = second.traverse("concat")?;
      let traversal: Traversal<T> = Box::new(head.chain(tail));
      Ok(traversal)
    });

    Self {
      config,
      state: ConsumptionState::new(),
      stages: Vec::new(),
      opener,
    }
  }

  pub(crate) fn with_config<I>(config: Arc<PipelineConfig>, items: I) -> Self
  where
    I: IntoIterator<Item = T>,
    I::IntoIter: Send + 'static,
  {
    // The source iterator is taken out exactly once, by the traversal that wins
    // the consumption state.
    let cell = Arc::new(Mutex::new(Some(items.into_iter())));
    let opener: Opener<T> = Arc::new(move || -> RillResult<Traversal<T>> {
      match cell.lock().take() {
        Some(iter) => {
          let traversal: Traversal<T> = Box::new(iter.map(Ok::<T, RillError>));
          Ok(traversal)
        }
        None => Err(RillError::Internal(
          "pipeline source was drained without consuming the pipeline".to_string(),
        )),
      }
    });

    Self {
      config,
      state: ConsumptionState::new(),
      stages: Vec::new(),
      opener,
    }
  }

  // --- Inspection ---

  /// The current consumption state, shared with every clone and derived pipeline.
  pub fn state(&self) -> PipelineState {
    self.state.get()
  }

  pub fn is_consumed(&self) -> bool {
    self.state.is_consumed()
  }

  /// The attached stages, in the order they run.
  pub fn stages(&self) -> &[StageDef] {
    &self.stages
  }

  pub fn config(&self) -> &PipelineConfig {
    &self.config
  }

  pub fn label(&self) -> &str {
    &self.config.label
  }

  // --- Shared machinery ---

  /// Attaches one stage. `build` receives the upstream opener and the new
  /// stage's descriptor and returns the opener of the extended pipeline.
  ///
  /// The extended pipeline keeps the configuration and the consumption state.
  /// Attaching to a consumed pipeline does not fail here: it logs a warning, and
  /// the extended pipeline's first terminal operation fails with `AlreadyConsumed`.
  pub(crate) fn attach<U, B>(self, kind: StageKind, build: B) -> Pipeline<U>
  where
    U: Send + 'static,
    B: FnOnce(Opener<T>, &StageDef) -> Opener<U>,
  {
    let stage = StageDef {
      index: self.stages.len(),
      kind,
    };

    if self.state.is_consumed() {
      // The derived pipeline shares the consumed state, so its first terminal
      // operation reports AlreadyConsumed.
      event!(
        Level::WARN,
        label = %self.config.label,
        stage = %kind,
        "Stage attached to an already consumed pipeline."
      );
    } else {
      event!(Level::TRACE, label = %self.config.label, stage = %kind, stage_index = stage.index, "Stage attached.");
    }

    let opener = build(self.opener, &stage);
    let mut stages = self.stages;
    stages.push(stage);

    Pipeline {
      config: self.config,
      state: self.state,
      stages,
      opener,
    }
  }

  /// Marks the pipeline consumed and opens its single traversal.
  pub(crate) fn traverse(&self, operation: &'static str) -> RillResult<Traversal<T>> {
    if let Err(err) = self.state.begin(operation) {
      event!(
        Level::WARN,
        label = %self.config.label,
        operation,
        "Rejected operation on an already consumed pipeline."
      );
      return Err(err);
    }
    (self.opener)()
  }
}

impl Pipeline<()> {
  /// Returns a builder for a pipeline with a non-default configuration.
  ///
  /// The element type is chosen later, by `PipelineBuilder::source`.
  pub fn builder() -> PipelineBuilder {
    PipelineBuilder::new()
  }
}

impl<T> Clone for Pipeline<T>
where
  T: Send + 'static,
{
  /// The clone shares the source, the stages and the consumption state:
  /// it is another handle on the same single traversal, not a copy of the data.
  fn clone(&self) -> Self {
    Self {
      config: Arc::clone(&self.config),
      state: self.state.clone(),
      stages: self.stages.clone(),
      opener: Arc::clone(&self.opener),
    }
  }
}

// The opener is a closure, so Debug is implemented by hand.
impl<T> fmt::Debug for Pipeline<T>
where
  T: Send + 'static,
{
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.debug_struct("Pipeline")
      .field("label", &self.config.label)
      .field("element_type", &std::any::type_name::<T>())
      .field("state", &self.state.get())
      .field("stages", &self.stages)
      .finish()
  }
}

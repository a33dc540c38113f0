// rill/src/pipeline/terminal.rs

//! Terminal operations: each one consumes the pipeline and runs its single
//! traversal, stopping at the first error a stage reports.

use crate::core::traversal::Traversal;
use crate::error::{RillError, RillResult};
use crate::pipeline::definition::Pipeline;
use std::cmp::Ordering;
use std::iter::Sum;
use tracing::{event, instrument, Level};

impl<T> Pipeline<T>
where
  T: Send + 'static,
{
  /// Opens the traversal for a terminal operation, adding per-element trace
  /// events when the configuration asks for them.
  fn open(&self, operation: &'static str) -> RillResult<Traversal<T>> {
    let traversal = self.traverse(operation)?;
    event!(Level::DEBUG, operation, "Traversal starting.");
    if !self.config.trace_elements {
      return Ok(traversal);
    }

    let label = self.config.label.clone();
    let mut position = 0usize;
    let traced: Traversal<T> = Box::new(traversal.inspect(move |item| {
      if item.is_ok() {
        event!(Level::TRACE, label = %label, operation, position, "Element reached terminal operation.");
        position += 1;
      }
    }));
    Ok(traced)
  }

  /// Number of elements that survive every stage.
  #[instrument(
    name = "Pipeline::count",
    skip_all,
    fields(label = %self.config.label, stages = self.stages.len()),
    err(Display)
  )]
  pub fn count(&self) -> RillResult<usize> {
    let mut count = 0;
    for item in self.open("count")? {
      item?;
      count += 1;
    }
    event!(Level::DEBUG, count, "Traversal completed.");
    Ok(count)
  }

  /// Materializes the elements in traversal order (the pipeline's "toArray").
  #[instrument(
    name = "Pipeline::to_vec",
    skip_all,
    fields(label = %self.config.label, stages = self.stages.len()),
    err(Display)
  )]
  pub fn to_vec(&self) -> RillResult<Vec<T>> {
    self.open("to_vec")?.collect()
  }

  /// Collects the elements into any `FromIterator` container.
  #[instrument(
    name = "Pipeline::collect",
    skip_all,
    fields(label = %self.config.label, stages = self.stages.len()),
    err(Display)
  )]
  pub fn collect<C>(&self) -> RillResult<C>
  where
    C: FromIterator<T>,
  {
    self.open("collect")?.collect()
  }

  /// Left fold combining elements pairwise in traversal order.
  ///
  /// `Ok(None)` on an empty pipeline; a single element is returned as is,
  /// without calling `op`.
  #[instrument(
    name = "Pipeline::reduce",
    skip_all,
    fields(label = %self.config.label, stages = self.stages.len()),
    err(Display)
  )]
  pub fn reduce<F>(&self, mut op: F) -> RillResult<Option<T>>
  where
    F: FnMut(T, T) -> T,
  {
    let mut acc: Option<T> = None;
    for item in self.open("reduce")? {
      let value = item?;
      acc = Some(match acc.take() {
        Some(prev) => op(prev, value),
        None => value,
      });
    }
    Ok(acc)
  }

  /// Left fold starting from `init`. Returns `init` on an empty pipeline.
  #[instrument(
    name = "Pipeline::fold",
    skip_all,
    fields(label = %self.config.label, stages = self.stages.len()),
    err(Display)
  )]
  pub fn fold<A, F>(&self, init: A, mut op: F) -> RillResult<A>
  where
    F: FnMut(A, T) -> A,
  {
    self
      .open("fold")?
      .try_fold(init, |acc, item| item.map(|value| op(acc, value)))
  }

  /// Sum of the elements, zero on an empty pipeline.
  ///
  /// Unlike `reduce`, an empty input is not a special case.
  #[instrument(
    name = "Pipeline::sum",
    skip_all,
    fields(label = %self.config.label, stages = self.stages.len()),
    err(Display)
  )]
  pub fn sum(&self) -> RillResult<T>
  where
    T: Sum<T>,
  {
    self.open("sum")?.sum()
  }

  /// The first element in traversal order. Stops pulling after it.
  #[instrument(
    name = "Pipeline::find_first",
    skip_all,
    fields(label = %self.config.label, stages = self.stages.len()),
    err(Display)
  )]
  pub fn find_first(&self) -> RillResult<Option<T>> {
    self.open("find_first")?.next().transpose()
  }

  /// `true` as soon as one element satisfies `predicate`.
  #[instrument(
    name = "Pipeline::any_match",
    skip_all,
    fields(label = %self.config.label, stages = self.stages.len()),
    err(Display)
  )]
  pub fn any_match<P>(&self, mut predicate: P) -> RillResult<bool>
  where
    P: FnMut(&T) -> bool,
  {
    for item in self.open("any_match")? {
      if predicate(&item?) {
        return Ok(true);
      }
    }
    Ok(false)
  }

  /// `false` as soon as one element fails `predicate`. `true` on an empty pipeline.
  #[instrument(
    name = "Pipeline::all_match",
    skip_all,
    fields(label = %self.config.label, stages = self.stages.len()),
    err(Display)
  )]
  pub fn all_match<P>(&self, mut predicate: P) -> RillResult<bool>
  where
    P: FnMut(&T) -> bool,
  {
    for item in self.open("all_match")? {
      if !predicate(&item?) {
        return Ok(false);
      }
    }
    Ok(true)
  }

  #[instrument(
    name = "Pipeline::none_match",
    skip_all,
    fields(label = %self.config.label, stages = self.stages.len()),
    err(Display)
  )]
  pub fn none_match<P>(&self, mut predicate: P) -> RillResult<bool>
  where
    P: FnMut(&T) -> bool,
  {
    for item in self.open("none_match")? {
      if predicate(&item?) {
        return Ok(false);
      }
    }
    Ok(true)
  }

  pub fn min(&self) -> RillResult<Option<T>>
  where
    T: Ord,
  {
    self.min_by(|a, b| a.cmp(b))
  }

  pub fn max(&self) -> RillResult<Option<T>>
  where
    T: Ord,
  {
    self.max_by(|a, b| a.cmp(b))
  }

  /// Smallest element according to `compare`; the first one on ties.
  #[instrument(
    name = "Pipeline::min_by",
    skip_all,
    fields(label = %self.config.label, stages = self.stages.len()),
    err(Display)
  )]
  pub fn min_by<C>(&self, mut compare: C) -> RillResult<Option<T>>
  where
    C: FnMut(&T, &T) -> Ordering,
  {
    let mut best: Option<T> = None;
    for item in self.open("min_by")? {
      let value = item?;
      best = match best {
        Some(current) if compare(&value, &current) != Ordering::Less => Some(current),
        _ => Some(value),
      };
    }
    Ok(best)
  }

  /// Largest element according to `compare`; the last one on ties.
  #[instrument(
    name = "Pipeline::max_by",
    skip_all,
    fields(label = %self.config.label, stages = self.stages.len()),
    err(Display)
  )]
  pub fn max_by<C>(&self, mut compare: C) -> RillResult<Option<T>>
  where
    C: FnMut(&T, &T) -> Ordering,
  {
    let mut best: Option<T> = None;
    for item in self.open("max_by")? {
      let value = item?;
      best = match best {
        Some(current) if compare(&value, &current) == Ordering::Less => Some(current),
        _ => Some(value),
      };
    }
    Ok(best)
  }

  #[instrument(
    name = "Pipeline::for_each",
    skip_all,
    fields(label = %self.config.label, stages = self.stages.len()),
    err(Display)
  )]
  pub fn for_each<F>(&self, mut f: F) -> RillResult<()>
  where
    F: FnMut(T),
  {
    for item in self.open("for_each")? {
      f(item?);
    }
    Ok(())
  }

  /// Like `for_each`, but `f` may fail. Its error stops the traversal and is
  /// returned as `RillError::External` (or as the `RillError` it wraps).
  #[instrument(
    name = "Pipeline::try_for_each",
    skip_all,
    fields(label = %self.config.label, stages = self.stages.len()),
    err(Display)
  )]
  pub fn try_for_each<E, F>(&self, mut f: F) -> RillResult<()>
  where
    E: Into<anyhow::Error>,
    F: FnMut(T) -> Result<(), E>,
  {
    for item in self.open("try_for_each")? {
      f(item?).map_err(|err| RillError::from(err.into()))?;
    }
    Ok(())
  }
}

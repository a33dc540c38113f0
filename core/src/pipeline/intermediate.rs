// rill/src/pipeline/intermediate.rs

//! Intermediate operations. Each one takes the pipeline by value, attaches a
//! stage, and returns the extended pipeline. Nothing is traversed here: the
//! closures only run during the terminal operation's single pass.

use crate::core::stage::StageKind;
use crate::core::traversal::{failed, Deferred, Opener, Traversal};
use crate::error::{RillError, RillResult};
use crate::pipeline::definition::Pipeline;
use std::cmp::Ordering;
use std::sync::Arc;
use tracing::{event, Level};

impl<T> Pipeline<T>
where
  T: Send + 'static,
{
  /// Applies `f` to every element.
  pub fn map<U, F>(self, f: F) -> Pipeline<U>
  where
    U: Send + 'static,
    F: Fn(T) -> U + Send + Sync + 'static,
  {
    let f = Arc::new(f);
    self.attach(StageKind::Map, move |upstream, _stage| {
      let opener: Opener<U> = Arc::new(move || -> RillResult<Traversal<U>> {
        let f = Arc::clone(&f);
        let traversal: Traversal<U> = Box::new(upstream()?.map(move |item| item.map(|value| f(value))));
        Ok(traversal)
      });
      opener
    })
  }

  /// Applies a fallible `f` to every element.
  ///
  /// The first failure is yielded as `RillError::Transformation` in place of the
  /// element, which aborts whichever terminal operation is running.
  pub fn try_map<U, E, F>(self, f: F) -> Pipeline<U>
  where
    U: Send + 'static,
    E: Into<anyhow::Error> + 'static,
    F: Fn(T) -> Result<U, E> + Send + Sync + 'static,
  {
    let f = Arc::new(f);
    let config = Arc::clone(&self.config);
    self.attach(StageKind::TryMap, move |upstream, stage| {
      let (stage_index, stage_kind) = (stage.index, stage.kind);
      let opener: Opener<U> = Arc::new(move || -> RillResult<Traversal<U>> {
        let f = Arc::clone(&f);
        let config = Arc::clone(&config);
        let traversal: Traversal<U> = Box::new(upstream()?.map(move |item| {
          item.and_then(|value| {
            f(value).map_err(|err| {
              let source: anyhow::Error = err.into();
              event!(
                Level::ERROR,
                label = %config.label,
                stage_index,
                error = %source,
                "Stage transformation failed."
              );
              RillError::Transformation {
                stage_index,
                stage: stage_kind,
                source,
              }
            })
          })
        }));
        Ok(traversal)
      });
      opener
    })
  }

  /// Keeps the elements for which `predicate` holds, in their original order.
  pub fn filter<P>(self, predicate: P) -> Pipeline<T>
  where
    P: Fn(&T) -> bool + Send + Sync + 'static,
  {
    let predicate = Arc::new(predicate);
    self.attach(StageKind::Filter, move |upstream, _stage| {
      let opener: Opener<T> = Arc::new(move || -> RillResult<Traversal<T>> {
        let predicate = Arc::clone(&predicate);
        let traversal: Traversal<T> = Box::new(upstream()?.filter(move |item| match item {
          Ok(value) => predicate(value),
          // Errors always reach the terminal operation.
          Err(_) => true,
        }));
        Ok(traversal)
      });
      opener
    })
  }

  /// Replaces every element with the elements of the pipeline `f` returns for it.
  ///
  /// All elements of the first element's sub-pipeline come before all elements
  /// of the second's, and so on. Each sub-pipeline is consumed when it is reached.
  pub fn flat_map<U, F>(self, f: F) -> Pipeline<U>
  where
    U: Send + 'static,
    F: Fn(T) -> Pipeline<U> + Send + Sync + 'static,
  {
    let f = Arc::new(f);
    self.attach(StageKind::FlatMap, move |upstream, _stage| {
      let opener: Opener<U> = Arc::new(move || -> RillResult<Traversal<U>> {
        let f = Arc::clone(&f);
        let traversal: Traversal<U> = Box::new(upstream()?.flat_map(move |item| -> Traversal<U> {
          match item.and_then(|value| f(value).traverse("flat_map")) {
            Ok(inner) => inner,
            Err(err) => failed(err),
          }
        }));
        Ok(traversal)
      });
      opener
    })
  }

  /// Sorts by the natural order of `T`.
  pub fn sorted(self) -> Pipeline<T>
  where
    T: Ord,
  {
    self.sorted_by(|a: &T, b: &T| a.cmp(b))
  }

  /// Sorts with `compare`. The sort is stable: equal elements keep their
  /// relative order.
  ///
  /// On the first pull every upstream element is materialized, so an upstream
  /// failure surfaces before any element is yielded.
  pub fn sorted_by<C>(self, compare: C) -> Pipeline<T>
  where
    C: Fn(&T, &T) -> Ordering + Send + Sync + 'static,
  {
    let compare = Arc::new(compare);
    self.attach(StageKind::Sorted, move |upstream, _stage| {
      let opener: Opener<T> = Arc::new(move || -> RillResult<Traversal<T>> {
        let compare = Arc::clone(&compare);
        let pending = upstream()?;
        let traversal: Traversal<T> = Box::new(Deferred::new(move || -> Traversal<T> {
          match pending.collect::<RillResult<Vec<T>>>() {
            Ok(mut values) => {
              values.sort_by(|a, b| compare(a, b));
              Box::new(values.into_iter().map(Ok::<T, RillError>))
            }
            Err(err) => failed(err),
          }
        }));
        Ok(traversal)
      });
      opener
    })
  }

  /// Sorts by the natural order of the key `key` extracts. Stable.
  pub fn sorted_by_key<K, F>(self, key: F) -> Pipeline<T>
  where
    K: Ord + 'static,
    F: Fn(&T) -> K + Send + Sync + 'static,
  {
    self.sorted_by(move |a, b| key(a).cmp(&key(b)))
  }

  /// Drops the first `n` elements.
  pub fn skip(self, n: usize) -> Pipeline<T> {
    self.attach(StageKind::Skip(n), move |upstream, _stage| {
      let opener: Opener<T> = Arc::new(move || -> RillResult<Traversal<T>> {
        let mut remaining = n;
        let traversal: Traversal<T> = Box::new(upstream()?.filter(move |item| {
          if item.is_err() || remaining == 0 {
            return true;
          }
          remaining -= 1;
          false
        }));
        Ok(traversal)
      });
      opener
    })
  }

  /// Yields at most `n` elements. Never pulls more than `n` elements from upstream,
  /// so it bounds an unbounded source.
  pub fn limit(self, n: usize) -> Pipeline<T> {
    self.attach(StageKind::Limit(n), move |upstream, _stage| {
      let opener: Opener<T> = Arc::new(move || -> RillResult<Traversal<T>> {
        let mut pending = upstream()?;
        let mut remaining = n;
        let traversal: Traversal<T> = Box::new(std::iter::from_fn(move || {
          if remaining == 0 {
            return None;
          }
          let item = pending.next()?;
          if item.is_ok() {
            remaining -= 1;
          }
          Some(item)
        }));
        Ok(traversal)
      });
      opener
    })
  }

  /// Calls `f` on every element as it flows past, without changing it.
  pub fn peek<F>(self, f: F) -> Pipeline<T>
  where
    F: Fn(&T) + Send + Sync + 'static,
  {
    let f = Arc::new(f);
    self.attach(StageKind::Peek, move |upstream, _stage| {
      let opener: Opener<T> = Arc::new(move || -> RillResult<Traversal<T>> {
        let f = Arc::clone(&f);
        let traversal: Traversal<T> = Box::new(upstream()?.inspect(move |item| {
          if let Ok(value) = item {
            f(value);
          }
        }));
        Ok(traversal)
      });
      opener
    })
  }
}

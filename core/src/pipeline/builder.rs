// rill/src/pipeline/builder.rs

//! Configuration for a pipeline and the fluent builder that applies it.

use crate::pipeline::definition::Pipeline;
use std::sync::Arc;

pub const DEFAULT_LABEL: &str = "pipeline";

/// Settings carried by a pipeline and inherited by everything derived from it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PipelineConfig {
  /// Name recorded on tracing spans and events.
  pub label: String,
  /// When set, terminal operations emit a TRACE event for every element they receive.
  pub trace_elements: bool,
}

impl Default for PipelineConfig {
  fn default() -> Self {
    Self {
      label: DEFAULT_LABEL.to_string(),
      trace_elements: false,
    }
  }
}

/// Fluent construction of a configured pipeline.
///
/// ```
/// use rill::Pipeline;
///
/// let numbers = Pipeline::builder().label("numbers").source(vec![3, 1, 2]);
/// assert_eq!(numbers.label(), "numbers");
/// assert_eq!(numbers.sorted().to_vec().unwrap(), vec![1, 2, 3]);
/// ```
#[derive(Debug, Clone, Default)]
pub struct PipelineBuilder {
  config: PipelineConfig,
}

impl PipelineBuilder {
  pub fn new() -> Self {
    Self::default()
  }

  pub fn label(mut self, label: impl Into<String>) -> Self {
    self.config.label = label.into();
    self
  }

  pub fn trace_elements(mut self, enabled: bool) -> Self {
    self.config.trace_elements = enabled;
    self
  }

  /// Replaces the whole configuration.
  pub fn config(mut self, config: PipelineConfig) -> Self {
    self.config = config;
    self
  }

  /// Finishes the builder with a source sequence.
  pub fn source<T, I>(self, items: I) -> Pipeline<T>
  where
    T: Send + 'static,
    I: IntoIterator<Item = T>,
    I::IntoIter: Send + 'static,
  {
    Pipeline::with_config(Arc::new(self.config), items)
  }

  pub fn empty<T>(self) -> Pipeline<T>
  where
    T: Send + 'static,
  {
    self.source(std::iter::empty())
  }
}

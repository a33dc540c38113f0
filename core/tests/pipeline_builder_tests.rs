// tests/pipeline_builder_tests.rs
mod common;

use common::*;
use rill::pipeline::builder::DEFAULT_LABEL;
use rill::{Pipeline, PipelineConfig};

#[test]
fn test_default_configuration() {
  setup_tracing();
  let pipeline = Pipeline::source(vec![1, 2, 3]);
  assert_eq!(pipeline.label(), DEFAULT_LABEL);
  assert_eq!(pipeline.config(), &PipelineConfig::default());
  assert!(!pipeline.config().trace_elements);
}

#[test]
fn test_builder_applies_configuration() {
  setup_tracing();
  let pipeline = Pipeline::builder()
    .label("canonical")
    .trace_elements(true)
    .source(canonical_values());
  assert_eq!(pipeline.label(), "canonical");
  assert!(pipeline.config().trace_elements);

  // Element tracing does not change the result.
  let sum = pipeline.map(strip_label).try_map(parse_value).sum().unwrap();
  assert_eq!(sum, 95);
}

#[test]
fn test_derived_pipelines_inherit_configuration() {
  setup_tracing();
  let config = PipelineConfig {
    label: "numbers".to_string(),
    trace_elements: false,
  };
  let derived = Pipeline::builder()
    .config(config.clone())
    .source(vec![3, 1, 2])
    .filter(|v| *v > 1)
    .sorted();
  assert_eq!(derived.config(), &config);
  assert_eq!(derived.to_vec().unwrap(), vec![2, 3]);
}

#[test]
fn test_builder_empty_source() {
  setup_tracing();
  let empty = Pipeline::builder().label("nothing").empty::<i32>();
  assert_eq!(empty.label(), "nothing");
  assert_eq!(empty.count().unwrap(), 0);
}

#[test]
fn test_concat_keeps_first_configuration() {
  setup_tracing();
  let first = Pipeline::builder().label("head").source(vec![1]);
  let second = Pipeline::builder().label("tail").source(vec![2]);
  let joined = Pipeline::concat(first, second);
  assert_eq!(joined.label(), "head");
  assert!(joined.stages().is_empty());
}

#[test]
fn test_debug_output_names_label_and_state() {
  setup_tracing();
  let pipeline = Pipeline::builder().label("debugged").source(vec![1, 2]).limit(1);
  let rendered = format!("{:?}", pipeline);
  assert!(rendered.contains("debugged"));
  assert!(rendered.contains("state: Unconsumed"));
  assert!(rendered.contains("Limit(1)"));

  pipeline.count().unwrap();
  assert!(format!("{:?}", pipeline).contains("state: Consumed"));
}

// tests/error_handling_tests.rs
mod common;

use common::*;
use rill::{Pipeline, RillError, StageKind};

#[test]
fn test_malformed_numeric_text_aborts_terminal_operation() {
  setup_tracing();
  let mut values = canonical_values();
  values.insert(3, "valor x".to_string());

  let result = Pipeline::source(values).map(strip_label).try_map(parse_value).sum();
  match result {
    Err(RillError::Transformation {
      stage_index,
      stage,
      source,
    }) => {
      assert_eq!(stage_index, 1);
      assert_eq!(stage, StageKind::TryMap);
      assert!(source.downcast_ref::<std::num::ParseIntError>().is_some());
    }
    other => panic!("Expected RillError::Transformation, got {:?}", other),
  }
}

#[test]
fn test_transformation_error_returns_no_partial_result() {
  setup_tracing();
  let seen = new_counter();
  let result = Pipeline::source(vec!["1", "2", "oops", "4"])
    .try_map(|text| text.parse::<i32>())
    .peek(counting::<i32>(&seen))
    .to_vec();

  assert!(result.is_err());
  // The two good elements flowed through before the failure stopped the pass.
  assert_eq!(count_of(&seen), 2);
}

#[test]
fn test_transformation_error_message() {
  setup_tracing();
  let err = Pipeline::source(vec!["7", "seven"])
    .try_map(|text| text.parse::<u8>())
    .count()
    .unwrap_err();
  let message = err.to_string();
  assert!(message.contains("stage #0"));
  assert!(message.contains("try_map"));
  assert!(message.contains("invalid digit found in string"));
}

#[test]
fn test_transformation_error_passes_through_later_stages() {
  setup_tracing();
  // The failing element is neither filtered, skipped nor sorted away.
  let err = Pipeline::source(vec!["3", "x", "1"])
    .try_map(|text| text.parse::<i32>())
    .filter(|v| *v > 100)
    .skip(5)
    .sorted()
    .find_first()
    .unwrap_err();
  assert!(err.is_transformation());
}

#[test]
fn test_transformation_error_inside_flat_map_sub_pipeline() {
  setup_tracing();
  let err = Pipeline::source(vec![vec!["1", "2"], vec!["3", "four"]])
    .flat_map(|texts| Pipeline::source(texts).try_map(|text| text.parse::<i32>()))
    .sum()
    .unwrap_err();
  assert!(err.is_transformation());
}

#[test]
fn test_fallible_stage_accepts_anyhow_errors() {
  setup_tracing();
  let err = Pipeline::source(vec![1, 2, 3])
    .try_map(|v| {
      if v == 2 {
        anyhow::bail!("two is not allowed");
      }
      Ok(v)
    })
    .count()
    .unwrap_err();
  match err {
    RillError::Transformation { source, .. } => assert_eq!(source.to_string(), "two is not allowed"),
    other => panic!("Expected RillError::Transformation, got {:?}", other),
  }
}

#[test]
fn test_try_for_each_reports_consumer_error() {
  setup_tracing();
  let mut accepted = Vec::new();
  let err = numbers_pipeline()
    .try_for_each(|v| {
      if v < 10 {
        return Err(TestError::Rejected(v));
      }
      accepted.push(v);
      Ok(())
    })
    .unwrap_err();

  assert_eq!(accepted, vec![10, 11, 12, 13, 14]);
  match err {
    RillError::External { source } => {
      assert_eq!(source.downcast_ref::<TestError>(), Some(&TestError::Rejected(5)));
    }
    other => panic!("Expected RillError::External, got {:?}", other),
  }
}

#[test]
fn test_rill_error_round_trips_through_anyhow() {
  setup_tracing();
  let consumed = Pipeline::source(vec![1]);
  consumed.count().unwrap();
  let inner_err = consumed.count().unwrap_err();

  // A consumer that bubbles a RillError up through anyhow gets the original back.
  let err = Pipeline::source(vec![1])
    .try_for_each(|_| -> anyhow::Result<()> { Err(anyhow::Error::new(RillError::Internal("nested".to_string()))) })
    .unwrap_err();
  assert!(matches!(err, RillError::Internal(ref message) if message == "nested"));

  let converted = RillError::from(anyhow::Error::new(inner_err));
  assert!(converted.is_already_consumed());
}

#[test]
fn test_transformation_failure_event_carries_label() {
  setup_tracing();
  let (result, logs) = capture_errors(|| {
    Pipeline::builder()
      .label("audited")
      .source(vec!["1", "one"])
      .try_map(|text| text.parse::<i32>())
      .to_vec()
  });
  assert!(result.unwrap_err().is_transformation());

  let output = logs.contents();
  let event = output
    .lines()
    .find(|line| line.contains("Stage transformation failed."))
    .unwrap_or_else(|| panic!("Expected a transformation failure event, got {:?}", output));
  assert!(event.contains("label=audited"));
  assert!(event.contains("stage_index=0"));
}

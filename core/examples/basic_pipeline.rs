// rill/examples/basic_pipeline.rs

use rill::{Pipeline, RillError, RillResult};
use tracing::info;

fn labelled_values() -> Vec<String> {
  let mut values: Vec<String> = (10..15).map(|i| format!("valor {}", i)).collect();
  values.extend((5..10).map(|i| format!("valor {}", i)));
  values
}

fn main() -> RillResult<()> {
  // Initialize tracing (optional, for demonstration)
  tracing_subscriber::fmt().with_max_level(tracing::Level::INFO).init();

  info!("--- Basic Pipeline Example ---");

  // 1. Build a lazy pipeline: nothing is parsed yet.
  let numbers = Pipeline::builder()
    .label("numbers")
    .source(labelled_values())
    .map(|value| value.replace("valor", "").replace(' ', ""))
    .try_map(|text| text.parse::<i32>());
  info!("Stages attached: {:?}", numbers.stages());

  // 2. Run it. The terminal operation consumes the pipeline.
  let sorted = numbers.sorted().to_vec()?;
  info!("Sorted values: {:?}", sorted);
  assert_eq!(sorted, vec![5, 6, 7, 8, 9, 10, 11, 12, 13, 14]);

  // 3. Processing the data again needs a fresh pipeline.
  let even = Pipeline::source(sorted.clone()).filter(|v| v % 2 == 0).to_vec()?;
  let total = Pipeline::source(sorted).sum()?;
  info!("Even values: {:?}, total: {}", even, total);
  assert_eq!(total, 95);

  // 4. A second terminal operation on the same pipeline is refused.
  let words = Pipeline::source(vec!["alpha", "beta"]);
  info!("Word count: {}", words.count()?);
  match words.count() {
    Err(err @ RillError::AlreadyConsumed { .. }) => info!("Second count refused: {}", err),
    other => panic!("Expected AlreadyConsumed, got {:?}", other),
  }

  Ok(())
}

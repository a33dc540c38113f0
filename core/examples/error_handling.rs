// rill/examples/error_handling.rs

use rill::{Pipeline, RillError};
use tracing::{error, info};

// A custom application error type wrapping rill's.
#[derive(Debug, thiserror::Error)]
enum ExampleAppError {
  #[error("Value {0} is out of range")]
  OutOfRange(i32),

  #[error("Pipeline error: {0}")]
  Rill(#[from] RillError),
}

fn main() {
  tracing_subscriber::fmt().with_max_level(tracing::Level::INFO).init();
  info!("--- Error Handling Example ---");

  // Scenario 1: a stage fails on malformed input
  info!("\nScenario 1: malformed numeric text inside try_map");
  match parse_all(vec!["1", "2", "three", "4"]) {
    Ok(values) => info!("Parsed: {:?}", values),
    Err(e) => error!("Parsing aborted: {}", e),
  }

  // Scenario 2: the consumer rejects a value
  info!("\nScenario 2: consumer failure inside try_for_each");
  match check_range(vec![3, 8, 42, 5]) {
    Ok(()) => info!("All values in range"),
    Err(e) => error!("Range check failed: {}", e),
  }
}

fn parse_all(texts: Vec<&'static str>) -> Result<Vec<i32>, ExampleAppError> {
  let values = Pipeline::source(texts).try_map(|text| text.parse::<i32>()).to_vec()?;
  Ok(values)
}

fn check_range(values: Vec<i32>) -> Result<(), ExampleAppError> {
  Pipeline::source(values).try_for_each(|v| {
    if v > 10 {
      return Err(ExampleAppError::OutOfRange(v));
    }
    info!("{} is in range", v);
    Ok(())
  })?;
  Ok(())
}

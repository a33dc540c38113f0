// tests/common/mod.rs
#![allow(dead_code)] // Allow unused code in this common test module

use rill::Pipeline;
use std::num::ParseIntError;
use std::sync::{
  atomic::{AtomicUsize, Ordering},
  Arc,
};
use tracing::Level;

// --- Canonical Fixture ---

/// Ten labelled values whose numeric suffixes are 10..=14 followed by 5..=9.
pub fn canonical_values() -> Vec<String> {
  let mut values = Vec::new();
  for i in 0..5 {
    values.push(format!("valor 1{}", i));
  }
  for i in 5..10 {
    values.push(format!("valor {}", i));
  }
  values
}

/// Removes the "valor" label and the blank, leaving the numeric text.
pub fn strip_label(value: String) -> String {
  value.replace("valor", "").replace(' ', "")
}

pub fn parse_value(text: String) -> Result<i32, ParseIntError> {
  text.parse::<i32>()
}

pub fn values_pipeline() -> Pipeline<String> {
  Pipeline::source(canonical_values())
}

/// The canonical fixture, stripped and parsed: 10, 11, 12, 13, 14, 5, 6, 7, 8, 9.
pub fn numbers_pipeline() -> Pipeline<i32> {
  values_pipeline().map(strip_label).try_map(parse_value)
}

// --- Common Error Type for Tests ---
#[derive(Debug, thiserror::Error, Clone, PartialEq, Eq)]
pub enum TestError {
  #[error("Test consumer rejected value: {0}")]
  Rejected(i32),
}

// --- Counters for checking how often a stage ran ---
pub fn new_counter() -> Arc<AtomicUsize> {
  Arc::new(AtomicUsize::new(0))
}

pub fn counting<T: 'static>(counter: &Arc<AtomicUsize>) -> impl Fn(&T) + Send + Sync + 'static {
  let counter = Arc::clone(counter);
  move |_value: &T| {
    counter.fetch_add(1, Ordering::SeqCst);
  }
}

pub fn count_of(counter: &Arc<AtomicUsize>) -> usize {
  counter.load(Ordering::SeqCst)
}

// --- Helper for Tracing Setup (call once per test run if needed) ---
use once_cell::sync::Lazy;
static TRACING_INIT: Lazy<()> = Lazy::new(|| {
  tracing_subscriber::fmt()
    .with_max_level(Level::TRACE)
    .with_test_writer() // Important for tests to capture output
    .try_init()
    .ok(); // Allow multiple initializations in tests (ok if fails)
});

pub fn setup_tracing() {
  Lazy::force(&TRACING_INIT);
}

// --- Captured log output for asserting on event fields ---
#[derive(Clone, Default)]
pub struct CapturedLogs(Arc<parking_lot::Mutex<Vec<u8>>>);

impl CapturedLogs {
  pub fn contents(&self) -> String {
    String::from_utf8_lossy(&self.0.lock()).into_owned()
  }
}

impl std::io::Write for CapturedLogs {
  fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
    self.0.lock().extend_from_slice(buf);
    Ok(buf.len())
  }

  fn flush(&mut self) -> std::io::Result<()> {
    Ok(())
  }
}

/// Runs `f` with ERROR-level events on this thread written to the returned buffer.
pub fn capture_errors<R>(f: impl FnOnce() -> R) -> (R, CapturedLogs) {
  let logs = CapturedLogs::default();
  let writer = logs.clone();
  let subscriber = tracing_subscriber::fmt()
    .with_max_level(Level::ERROR)
    .with_ansi(false)
    .with_writer(move || writer.clone())
    .finish();
  let result = tracing::subscriber::with_default(subscriber, f);
  (result, logs)
}

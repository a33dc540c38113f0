// rill/src/error.rs
use crate::core::stage::StageKind;
use anyhow::Error as AnyhowError;
use thiserror::Error;

/// Diagnostic text carried by every [`RillError::AlreadyConsumed`].
///
/// Callers may compare against it, so it never changes.
pub const ALREADY_CONSUMED_MESSAGE: &str = "stream has already been operated upon or closed";

#[derive(Debug, Error)]
pub enum RillError {
  /// A terminal operation targeted a pipeline whose traversal was already started.
  /// `operation` names the call that was rejected; it is not part of the message.
  #[error("{}", ALREADY_CONSUMED_MESSAGE)]
  AlreadyConsumed { operation: &'static str },

  #[error("Transformation failed in stage #{stage_index} ({stage}). Source: {source}")]
  Transformation {
    stage_index: usize,
    stage: StageKind,
    #[source]
    source: AnyhowError,
  },

  #[error("Error in user-provided consumer. Source: {source}")]
  External {
    #[source]
    source: AnyhowError,
  },

  #[error("Internal rill error: {0}")]
  Internal(String),
}

impl RillError {
  pub fn is_already_consumed(&self) -> bool {
    matches!(self, RillError::AlreadyConsumed { .. })
  }

  pub fn is_transformation(&self) -> bool {
    matches!(self, RillError::Transformation { .. })
  }
}

impl From<AnyhowError> for RillError {
  fn from(err: AnyhowError) -> Self {
    // An anyhow error may already be wrapping a RillError (e.g. a consumer that
    // re-ran a nested pipeline and bubbled its failure up with `?`).
    match err.downcast::<RillError>() {
      Ok(rill_err) => rill_err,
      Err(err) => RillError::External { source: err },
    }
  }
}

pub type RillResult<T, E = RillError> = std::result::Result<T, E>;

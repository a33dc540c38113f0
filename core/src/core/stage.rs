// rill/src/core/stage.rs

//! Descriptors for the intermediate stages attached to a pipeline.

use std::fmt;

/// The kind of an intermediate stage. Sequence matters: stages run in the
/// order they were attached.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StageKind {
  Map,
  TryMap,
  Filter,
  FlatMap,
  Sorted,
  Skip(usize),
  Limit(usize),
  Peek,
}

impl fmt::Display for StageKind {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match self {
      StageKind::Map => f.write_str("map"),
      StageKind::TryMap => f.write_str("try_map"),
      StageKind::Filter => f.write_str("filter"),
      StageKind::FlatMap => f.write_str("flat_map"),
      StageKind::Sorted => f.write_str("sorted"),
      StageKind::Skip(n) => write!(f, "skip({})", n),
      StageKind::Limit(n) => write!(f, "limit({})", n),
      StageKind::Peek => f.write_str("peek"),
    }
  }
}

/// Definition of one stage as recorded on the pipeline.
///
/// Only the descriptor lives here; the closure itself is folded into the
/// pipeline's traversal opener when the stage is attached. Stages are
/// immutable once attached.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StageDef {
  /// Position of the stage in its pipeline, starting at 0.
  pub index: usize,
  pub kind: StageKind,
}

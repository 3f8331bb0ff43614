// catalogo/src/pipeline/control.rs

/// Returned by a step handler: keep going or halt the whole pipeline.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PipelineControl {
  Continue,
  Stop,
}

/// Outcome of a full pipeline run that did not fail.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PipelineResult {
  Completed,
  /// A handler returned `PipelineControl::Stop`.
  Stopped,
}

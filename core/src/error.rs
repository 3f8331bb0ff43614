// catalogo/src/error.rs
use anyhow::Error as AnyhowError;
use serde::Serialize;
use std::fmt;
use thiserror::Error;

/// A single field-level validation failure, e.g. `nombre` / `no puede estar vacío`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FieldError {
  pub field: String,
  pub message: String,
}

impl FieldError {
  pub fn new(field: impl Into<String>, message: impl Into<String>) -> Self {
    Self {
      field: field.into(),
      message: message.into(),
    }
  }
}

impl fmt::Display for FieldError {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    write!(f, "El campo {} {}", self.field, self.message)
  }
}

#[derive(Debug, Error)]
pub enum CatalogoError {
  #[error("Validation failed: {}", join_field_errors(.0))]
  Validation(Vec<FieldError>),

  #[error("{kind} not found: {id}")]
  NotFound { kind: &'static str, id: String },

  #[error("Document store failure. Source: {source}")]
  Store {
    #[source]
    source: AnyhowError,
  },

  #[error("Document (de)serialization failed for collection '{collection}': {source}")]
  Serialization {
    collection: &'static str,
    #[source]
    source: serde_json::Error,
  },

  #[error("I/O error: {0}")]
  Io(#[from] std::io::Error),
}

impl CatalogoError {
  pub fn field(field: impl Into<String>, message: impl Into<String>) -> Self {
    CatalogoError::Validation(vec![FieldError::new(field, message)])
  }

  pub fn not_found(kind: &'static str, id: impl Into<String>) -> Self {
    CatalogoError::NotFound { kind, id: id.into() }
  }
}

// Backends (sqlx, ...) live outside this crate; they hand their errors over through anyhow.
impl From<AnyhowError> for CatalogoError {
  fn from(err: AnyhowError) -> Self {
    CatalogoError::Store { source: err }
  }
}

fn join_field_errors(errors: &[FieldError]) -> String {
  errors.iter().map(ToString::to_string).collect::<Vec<_>>().join("; ")
}

/// Misconfiguration of a [`crate::Pipeline`], detected while it runs.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum PipelineError {
  #[error("Handler missing for non-optional step: {step_name}")]
  HandlerMissing { step_name: String },

  #[error("Step not found: {step_name}")]
  StepNotFound { step_name: String },
}

pub type CatalogoResult<T, E = CatalogoError> = std::result::Result<T, E>;

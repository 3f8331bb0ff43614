// catalog_app/src/errors.rs

use actix_multipart::MultipartError;
use actix_web::{HttpResponse, ResponseError};
use catalogo::{CatalogoError, FieldError, PipelineError};
use chrono::Utc;
use serde_json::json;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum AppError {
  #[error("Validation Error: {}", .0.iter().map(ToString::to_string).collect::<Vec<_>>().join("; "))]
  Validation(Vec<FieldError>),

  #[error("Resource Not Found: {0}")]
  NotFound(String),

  /// Body could not be parsed at all (malformed JSON, broken multipart stream).
  #[error("Bad Request: {0}")]
  BadRequest(String),

  #[error("Payload Too Large: {0}")]
  PayloadTooLarge(String),

  #[error("Configuration Error: {0}")]
  Config(String),

  #[error("Database Error: {0}")]
  Sqlx(#[from] sqlx::Error),

  #[error("Catalogue Error: {0}")]
  Catalog(CatalogoError),

  #[error("Template Error: {0}")]
  Template(#[from] tera::Error),

  #[error("Pipeline Error: {source}")]
  Pipeline {
    #[from]
    source: PipelineError,
  },

  #[error("Internal Server Error: {0}")]
  Internal(String),
}

impl AppError {
  /// Field messages in the `"El campo <field> <message>"` form, if this is a validation error.
  pub fn field_messages(&self) -> Option<Vec<String>> {
    match self {
      AppError::Validation(errors) => Some(errors.iter().map(ToString::to_string).collect()),
      _ => None,
    }
  }
}

// Validation and not-found outcomes keep their meaning across the crate boundary.
impl From<CatalogoError> for AppError {
  fn from(err: CatalogoError) -> Self {
    match err {
      CatalogoError::Validation(errors) => AppError::Validation(errors),
      CatalogoError::NotFound { kind, id } => AppError::NotFound(format!("{} with ID {} not found.", kind, id)),
      other => AppError::Catalog(other),
    }
  }
}

impl From<MultipartError> for AppError {
  fn from(err: MultipartError) -> Self {
    AppError::BadRequest(format!("Invalid multipart payload: {}", err))
  }
}

impl From<anyhow::Error> for AppError {
  fn from(err: anyhow::Error) -> Self {
    match err.downcast::<CatalogoError>() {
      Ok(catalog_err) => AppError::from(catalog_err),
      Err(err) => AppError::Internal(err.to_string()),
    }
  }
}

impl ResponseError for AppError {
  fn error_response(&self) -> HttpResponse {
    match self {
      AppError::Validation(_) => {
        tracing::warn!(application_error = %self, "Responding with validation errors");
        HttpResponse::BadRequest().json(json!({
          "errors": self.field_messages().unwrap_or_default(),
          "status": 400,
          "timestamp": Utc::now(),
        }))
      }
      AppError::NotFound(m) => {
        tracing::warn!(application_error = %self, "Responding with not found");
        HttpResponse::NotFound().json(json!({"error": m}))
      }
      AppError::BadRequest(m) => HttpResponse::BadRequest().json(json!({"error": m, "status": 400})),
      AppError::PayloadTooLarge(m) => {
        tracing::warn!(application_error = %self, "Rejecting oversized payload");
        HttpResponse::PayloadTooLarge().json(json!({"error": m, "status": 413}))
      }
      other => {
        tracing::error!(application_error = %other, "Responding with error");
        let body = match other {
          AppError::Config(m) => json!({"error": "Configuration issue", "detail": m}),
          AppError::Sqlx(_) => json!({"error": "Database operation failed"}),
          AppError::Catalog(e) => json!({"error": "Catalogue operation failed", "detail": e.to_string()}),
          AppError::Template(_) => json!({"error": "Page rendering failed"}),
          AppError::Pipeline { source } => json!({"error": "Request flow misconfigured", "detail": source.to_string()}),
          _ => json!({"error": "An internal error occurred", "detail": other.to_string()}),
        };
        HttpResponse::InternalServerError().json(body)
      }
    }
  }
}

pub type Result<T, E = AppError> = std::result::Result<T, E>;

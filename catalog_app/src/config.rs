// catalog_app/src/config.rs

use crate::errors::{AppError, Result};
use dotenvy::dotenv;
use std::env;
use std::path::PathBuf;
use std::time::Duration;

const DEFAULT_MAX_UPLOAD_BYTES: usize = 10 * 1024 * 1024;

#[derive(Debug, Clone)]
pub struct AppConfig {
  pub server_host: String,
  pub server_port: u16,
  /// Postgres document store. Without it the catalogue lives in memory.
  pub database_url: Option<String>,
  /// Directory uploaded product photos are written to and served from.
  pub uploads_path: PathBuf,
  /// Drop and reseed both collections on startup.
  pub seed_db: bool,
  /// Pause before each element of the delayed listing page.
  pub delay_interval: Duration,
  /// Extra passes for the repeated listing pages.
  pub repeat_count: usize,
  /// Largest accepted multipart part, in bytes.
  pub max_upload_bytes: usize,
}

impl AppConfig {
  pub fn from_env() -> Result<Self> {
    dotenv().ok(); // Load .env file if present

    let get_env = |var_name: &str| {
      env::var(var_name).map_err(|e| AppError::Config(format!("Missing environment variable '{}': {}", var_name, e)))
    };

    let server_host = get_env("SERVER_HOST").unwrap_or_else(|_| "127.0.0.1".to_string());
    let server_port = get_env("SERVER_PORT")
      .unwrap_or_else(|_| "8080".to_string())
      .parse::<u16>()
      .map_err(|e| AppError::Config(format!("Invalid SERVER_PORT: {}", e)))?;
    let database_url = get_env("DATABASE_URL").ok().filter(|url| !url.trim().is_empty());
    let uploads_path = PathBuf::from(get_env("UPLOADS_PATH")?);

    let seed_db = get_env("SEED_DB")
      .unwrap_or_else(|_| "true".to_string())
      .parse::<bool>()
      .map_err(|e| AppError::Config(format!("Invalid SEED_DB value: {}", e)))?;
    let delay_interval = get_env("DELAY_INTERVAL_MS")
      .unwrap_or_else(|_| "1000".to_string())
      .parse::<u64>()
      .map(Duration::from_millis)
      .map_err(|e| AppError::Config(format!("Invalid DELAY_INTERVAL_MS: {}", e)))?;
    let repeat_count = get_env("REPEAT_COUNT")
      .unwrap_or_else(|_| "5000".to_string())
      .parse::<usize>()
      .map_err(|e| AppError::Config(format!("Invalid REPEAT_COUNT: {}", e)))?;
    let max_upload_bytes = get_env("MAX_UPLOAD_BYTES")
      .unwrap_or_else(|_| DEFAULT_MAX_UPLOAD_BYTES.to_string())
      .parse::<usize>()
      .map_err(|e| AppError::Config(format!("Invalid MAX_UPLOAD_BYTES: {}", e)))?;

    tracing::info!(
      uploads_path = %uploads_path.display(),
      store = if database_url.is_some() { "postgres" } else { "memory" },
      seed_db,
      "Application configuration loaded successfully."
    );

    Ok(Self {
      server_host,
      server_port,
      database_url,
      uploads_path,
      seed_db,
      delay_interval,
      repeat_count,
      max_upload_bytes,
    })
  }

  pub fn server_address(&self) -> String {
    format!("{}:{}", self.server_host, self.server_port)
  }
}

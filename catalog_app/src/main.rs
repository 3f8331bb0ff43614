// catalog_app/src/main.rs

use catalog_app::config::AppConfig;
use catalog_app::web::configure_app_routes;
use catalog_app::{build_state, connect_store};

use actix_web::{web as actix_data, App, HttpServer};
use std::io;
use std::sync::Arc;
use tracing::Level;
use tracing_subscriber::fmt::format::FmtSpan;

#[actix_web::main]
async fn main() -> io::Result<()> {
  tracing_subscriber::fmt()
    .with_max_level(Level::INFO)
    .with_env_filter(tracing_subscriber::EnvFilter::from_default_env()) // Allow RUST_LOG override
    .with_span_events(FmtSpan::CLOSE)
    .init();

  tracing::info!("Starting catalogue server...");

  let app_config = match AppConfig::from_env() {
    Ok(cfg) => Arc::new(cfg),
    Err(e) => {
      tracing::error!(error = %e, "Failed to load application configuration.");
      return Err(io::Error::other(e.to_string()));
    }
  };

  let store = connect_store(&app_config).await.map_err(|e| {
    tracing::error!(error = %e, "Failed to connect the document store.");
    io::Error::other(e.to_string())
  })?;

  let app_state = build_state(store, app_config.clone()).await.map_err(|e| {
    tracing::error!(error = %e, "Failed to prepare application state.");
    io::Error::other(e.to_string())
  })?;

  let server_address = app_config.server_address();
  tracing::info!(store = app_state.catalog.backend(), "Attempting to bind server to {}...", server_address);

  HttpServer::new(move || {
    App::new()
      .app_data(actix_data::Data::new(app_state.clone()))
      .wrap(tracing_actix_web::TracingLogger::default())
      .configure(configure_app_routes)
  })
  .bind(&server_address)?
  .run()
  .await
}

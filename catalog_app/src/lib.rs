// catalog_app/src/lib.rs

//! Actix-web front-end for the `catalogo` crate: pages, a REST controller and
//! a functional router over one shared catalogue.

pub mod config;
pub mod db;
pub mod errors;
pub mod pipelines;
pub mod seed;
pub mod state;
pub mod web;

use crate::config::AppConfig;
use crate::db::PgDocumentStore;
use crate::errors::Result;
use catalogo::{CatalogService, DocumentStore, MemoryDocumentStore};
use std::sync::Arc;

/// Connects the configured document store: Postgres when `DATABASE_URL` is set, memory otherwise.
pub async fn connect_store(config: &AppConfig) -> Result<Arc<dyn DocumentStore>> {
  match &config.database_url {
    Some(url) => Ok(Arc::new(PgDocumentStore::connect(url).await?)),
    None => {
      tracing::warn!("DATABASE_URL not set, catalogue is kept in memory.");
      Ok(Arc::new(MemoryDocumentStore::new()))
    }
  }
}

/// Builds the shared state, seeding the catalogue first when configured.
pub async fn build_state(store: Arc<dyn DocumentStore>, config: Arc<AppConfig>) -> Result<state::AppState> {
  let catalog = CatalogService::new(store);
  if config.seed_db {
    seed::reseed(&catalog).await?;
  }
  state::AppState::new(catalog, config)
}

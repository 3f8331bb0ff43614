// catalog_app/src/db.rs

//! Postgres-backed `DocumentStore`: one `documents` table, JSONB bodies.

use async_trait::async_trait;
use catalogo::{CatalogoError, CatalogoResult, DocumentStore};
use serde_json::Value;
use sqlx::postgres::PgPoolOptions;
use sqlx::types::Json;
use sqlx::PgPool;
use tracing::{info, instrument};

const CREATE_DOCUMENTS_TABLE: &str = r#"
CREATE TABLE IF NOT EXISTS documents (
  collection  TEXT        NOT NULL,
  id          TEXT        NOT NULL,
  body        JSONB       NOT NULL,
  inserted_at TIMESTAMPTZ NOT NULL DEFAULT now(),
  PRIMARY KEY (collection, id)
)"#;

#[derive(Debug, Clone)]
pub struct PgDocumentStore {
  pool: PgPool,
}

fn store_err(e: sqlx::Error) -> CatalogoError {
  CatalogoError::Store { source: e.into() }
}

impl PgDocumentStore {
  pub fn new(pool: PgPool) -> Self {
    Self { pool }
  }

  /// Connects and makes sure the `documents` table exists.
  pub async fn connect(database_url: &str) -> Result<Self, sqlx::Error> {
    let pool = PgPoolOptions::new().max_connections(5).connect(database_url).await?;
    info!("Successfully connected to the database.");
    let store = Self::new(pool);
    store.ensure_schema().await?;
    Ok(store)
  }

  pub async fn ensure_schema(&self) -> Result<(), sqlx::Error> {
    sqlx::query(CREATE_DOCUMENTS_TABLE).execute(&self.pool).await?;
    Ok(())
  }
}

#[async_trait]
impl DocumentStore for PgDocumentStore {
  #[instrument(name = "pg::get", skip(self), level = "debug")]
  async fn get(&self, collection: &str, id: &str) -> CatalogoResult<Option<Value>> {
    let row: Option<(Json<Value>,)> = sqlx::query_as("SELECT body FROM documents WHERE collection = $1 AND id = $2")
      .bind(collection)
      .bind(id)
      .fetch_optional(&self.pool)
      .await
      .map_err(store_err)?;
    Ok(row.map(|(Json(body),)| body))
  }

  // Replacing a document keeps its original insertion position.
  #[instrument(name = "pg::put", skip(self, body), level = "debug")]
  async fn put(&self, collection: &str, id: &str, body: Value) -> CatalogoResult<()> {
    sqlx::query(
      "INSERT INTO documents (collection, id, body) VALUES ($1, $2, $3) \
       ON CONFLICT (collection, id) DO UPDATE SET body = EXCLUDED.body",
    )
    .bind(collection)
    .bind(id)
    .bind(Json(body))
    .execute(&self.pool)
    .await
    .map_err(store_err)?;
    Ok(())
  }

  #[instrument(name = "pg::delete", skip(self), level = "debug")]
  async fn delete(&self, collection: &str, id: &str) -> CatalogoResult<bool> {
    let result = sqlx::query("DELETE FROM documents WHERE collection = $1 AND id = $2")
      .bind(collection)
      .bind(id)
      .execute(&self.pool)
      .await
      .map_err(store_err)?;
    Ok(result.rows_affected() > 0)
  }

  #[instrument(name = "pg::scan_all", skip(self), level = "debug")]
  async fn scan_all(&self, collection: &str) -> CatalogoResult<Vec<Value>> {
    let rows: Vec<(Json<Value>,)> =
      sqlx::query_as("SELECT body FROM documents WHERE collection = $1 ORDER BY inserted_at ASC, id ASC")
        .bind(collection)
        .fetch_all(&self.pool)
        .await
        .map_err(store_err)?;
    Ok(rows.into_iter().map(|(Json(body),)| body).collect())
  }

  async fn drop_collection(&self, collection: &str) -> CatalogoResult<()> {
    sqlx::query("DELETE FROM documents WHERE collection = $1")
      .bind(collection)
      .execute(&self.pool)
      .await
      .map_err(store_err)?;
    Ok(())
  }

  fn backend_name(&self) -> &'static str {
    "postgres"
  }
}

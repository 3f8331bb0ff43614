// tests/common/mod.rs
#![allow(dead_code, unused_macros)] // Not every test file uses every helper

use catalog_app::config::AppConfig;
use catalog_app::state::AppState;
use async_trait::async_trait;
use catalogo::{CatalogService, CatalogoResult, Categoria, DocumentStore, MemoryDocumentStore, Producto};
use once_cell::sync::Lazy;
use serde_json::Value;
use std::path::Path;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;
use tempfile::TempDir;
use tracing::Level;

// --- Tracing ---
static TRACING_INIT: Lazy<()> = Lazy::new(|| {
  tracing_subscriber::fmt()
    .with_max_level(Level::DEBUG)
    .with_test_writer()
    .try_init()
    .ok();
});

pub fn setup_tracing() {
  Lazy::force(&TRACING_INIT);
}

// --- State fixtures ---

pub fn test_config(uploads: &Path) -> AppConfig {
  AppConfig {
    server_host: "127.0.0.1".to_string(),
    server_port: 0,
    database_url: None,
    uploads_path: uploads.to_path_buf(),
    seed_db: false,
    delay_interval: Duration::from_millis(1),
    repeat_count: 2,
    max_upload_bytes: 1024 * 1024,
  }
}

/// Fresh in-memory catalogue plus a throwaway uploads directory. Keep the `TempDir` alive for the test.
pub fn test_state() -> (AppState, TempDir) {
  test_state_with(Arc::new(MemoryDocumentStore::new()), |_| {})
}

/// Like `test_state`, over `store` and with `tweak` applied to the config.
pub fn test_state_with(store: Arc<dyn DocumentStore>, tweak: impl FnOnce(&mut AppConfig)) -> (AppState, TempDir) {
  setup_tracing();
  let uploads = tempfile::tempdir().unwrap();
  let mut config = test_config(uploads.path());
  tweak(&mut config);
  let state = AppState::new(CatalogService::new(store), Arc::new(config)).unwrap();
  (state, uploads)
}

// --- Counting store ---

/// Memory store that counts `get` calls per collection.
#[derive(Default)]
pub struct CountingStore {
  inner: MemoryDocumentStore,
  categoria_reads: AtomicUsize,
  producto_reads: AtomicUsize,
}

impl CountingStore {
  pub fn categoria_reads(&self) -> usize {
    self.categoria_reads.load(Ordering::SeqCst)
  }

  pub fn producto_reads(&self) -> usize {
    self.producto_reads.load(Ordering::SeqCst)
  }

  pub fn reset(&self) {
    self.categoria_reads.store(0, Ordering::SeqCst);
    self.producto_reads.store(0, Ordering::SeqCst);
  }
}

#[async_trait]
impl DocumentStore for CountingStore {
  async fn get(&self, collection: &str, id: &str) -> CatalogoResult<Option<Value>> {
    match collection {
      "categorias" => self.categoria_reads.fetch_add(1, Ordering::SeqCst),
      "productos" => self.producto_reads.fetch_add(1, Ordering::SeqCst),
      _ => 0,
    };
    self.inner.get(collection, id).await
  }

  async fn put(&self, collection: &str, id: &str, body: Value) -> CatalogoResult<()> {
    self.inner.put(collection, id, body).await
  }

  async fn delete(&self, collection: &str, id: &str) -> CatalogoResult<bool> {
    self.inner.delete(collection, id).await
  }

  async fn scan_all(&self, collection: &str) -> CatalogoResult<Vec<Value>> {
    self.inner.scan_all(collection).await
  }

  async fn drop_collection(&self, collection: &str) -> CatalogoResult<()> {
    self.inner.drop_collection(collection).await
  }

  fn backend_name(&self) -> &'static str {
    "counting"
  }
}

pub async fn saved_categoria(state: &AppState, nombre: &str) -> Categoria {
  state.catalog.save_category(Categoria::new(nombre)).await.unwrap()
}

pub async fn saved_producto(state: &AppState, nombre: &str, precio: f64, categoria: &Categoria) -> Producto {
  state
    .catalog
    .save(Producto::new(nombre, precio, categoria.clone()))
    .await
    .unwrap()
}

/// Builds the app service around `state` with the real route table.
macro_rules! init_app {
  ($state:expr) => {
    actix_web::test::init_service(
      actix_web::App::new()
        .app_data(actix_web::web::Data::new($state.clone()))
        .configure(catalog_app::web::configure_app_routes),
    )
    .await
  };
}

// --- Multipart bodies ---

pub const BOUNDARY: &str = "----catalogtestboundary";

pub fn multipart_content_type() -> String {
  format!("multipart/form-data; boundary={}", BOUNDARY)
}

/// Text fields followed by an optional `file` part `(filename, bytes)`.
pub fn multipart_body(fields: &[(&str, &str)], file: Option<(&str, &[u8])>) -> Vec<u8> {
  let mut body = Vec::new();
  for (name, value) in fields {
    body.extend_from_slice(
      format!(
        "--{}\r\nContent-Disposition: form-data; name=\"{}\"\r\n\r\n{}\r\n",
        BOUNDARY, name, value
      )
      .as_bytes(),
    );
  }
  if let Some((filename, bytes)) = file {
    body.extend_from_slice(
      format!(
        "--{}\r\nContent-Disposition: form-data; name=\"file\"; filename=\"{}\"\r\nContent-Type: application/octet-stream\r\n\r\n",
        BOUNDARY, filename
      )
      .as_bytes(),
    );
    body.extend_from_slice(bytes);
    body.extend_from_slice(b"\r\n");
  }
  body.extend_from_slice(format!("--{}--\r\n", BOUNDARY).as_bytes());
  body
}

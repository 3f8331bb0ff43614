// tests/common/mod.rs
#![allow(dead_code)] // Not every test file uses every helper

use catalogo::{
  CatalogService, Categoria, CategoriaPayload, ContextData, MemoryDocumentStore, PipelineControl, PipelineError,
  Producto, ProductoPayload,
};
use once_cell::sync::Lazy;
use std::sync::Arc;
use tracing::Level;

// --- Store / service fixtures ---

pub fn memory_service() -> (Arc<MemoryDocumentStore>, CatalogService) {
  let store = Arc::new(MemoryDocumentStore::new());
  let service = CatalogService::new(store.clone());
  (store, service)
}

pub async fn saved_categoria(service: &CatalogService, nombre: &str) -> Categoria {
  service.save_category(Categoria::new(nombre)).await.unwrap()
}

pub async fn saved_producto(service: &CatalogService, nombre: &str, precio: f64, categoria: &Categoria) -> Producto {
  service
    .save(Producto::new(nombre, precio, categoria.clone()))
    .await
    .unwrap()
}

pub fn payload(nombre: &str, precio: f64, categoria_id: &str) -> ProductoPayload {
  ProductoPayload {
    nombre: Some(nombre.to_string()),
    precio: Some(precio),
    categoria: Some(CategoriaPayload {
      id: Some(categoria_id.to_string()),
      nombre: None,
    }),
    ..Default::default()
  }
}

// --- Pipeline fixtures ---

#[derive(Clone, Debug, Default)]
pub struct TestContext {
  pub counter: i32,
  pub steps_executed: Vec<String>,
  pub should_stop_at: Option<String>,
}

#[derive(Debug, thiserror::Error, Clone, PartialEq, Eq)]
pub enum TestError {
  #[error("Pipeline error: {0}")]
  Pipeline(#[from] PipelineError),

  #[error("Test handler failed: {0}")]
  Handler(String),
}

pub fn recording_handler(
  step_name: &'static str,
) -> impl Fn(ContextData<TestContext>) -> std::future::Ready<Result<PipelineControl, TestError>> + Send + Sync + 'static
{
  move |ctx: ContextData<TestContext>| {
    let mut guard = ctx.write();
    guard.counter += 1;
    guard.steps_executed.push(step_name.to_string());
    let control = match &guard.should_stop_at {
      Some(stop_at) if stop_at == step_name => PipelineControl::Stop,
      _ => PipelineControl::Continue,
    };
    std::future::ready(Ok(control))
  }
}

pub fn failing_handler(
  step_name: &'static str,
  message: &'static str,
) -> impl Fn(ContextData<TestContext>) -> std::future::Ready<Result<PipelineControl, TestError>> + Send + Sync + 'static
{
  move |ctx: ContextData<TestContext>| {
    ctx.write().steps_executed.push(step_name.to_string());
    std::future::ready(Err(TestError::Handler(message.to_string())))
  }
}

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

// catalog_app/src/pipelines/contexts.rs

//! Data structs the request pipelines run against.
//! Handlers receive these wrapped in `catalogo::ContextData`.

use crate::state::AppState;
use catalogo::{Categoria, Producto, ProductoPayload, ValidProducto};

/// Whether a save creates a new product or overwrites an existing one.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SaveTarget {
  Create,
  Update(String),
}

/// A file part taken from a multipart body.
#[derive(Debug, Clone)]
pub struct UploadedFile {
  /// Client-side filename; empty when the file input was left untouched.
  pub filename: String,
  pub bytes: Vec<u8>,
}

impl UploadedFile {
  pub fn is_empty(&self) -> bool {
    self.filename.is_empty()
  }
}

#[derive(Clone)]
pub struct SaveProductoCtxData {
  pub app_state: AppState,
  pub target: SaveTarget,
  pub payload: ProductoPayload,
  pub foto: Option<UploadedFile>,
  pub existing: Option<Producto>,
  pub valid: Option<ValidProducto>,
  pub categoria: Option<Categoria>,
  pub producto: Option<Producto>,
  pub saved: Option<Producto>,
}

impl SaveProductoCtxData {
  pub fn new(app_state: AppState, target: SaveTarget, payload: ProductoPayload, foto: Option<UploadedFile>) -> Self {
    Self {
      app_state,
      target,
      payload,
      foto,
      existing: None,
      valid: None,
      categoria: None,
      producto: None,
      saved: None,
    }
  }
}

#[derive(Clone)]
pub struct UploadFotoCtxData {
  pub app_state: AppState,
  pub producto_id: String,
  pub foto: UploadedFile,
  pub producto: Option<Producto>,
  pub stored_as: Option<String>,
  pub saved: Option<Producto>,
}

impl UploadFotoCtxData {
  pub fn new(app_state: AppState, producto_id: String, foto: UploadedFile) -> Self {
    Self {
      app_state,
      producto_id,
      foto,
      producto: None,
      stored_as: None,
      saved: None,
    }
  }
}

// catalog_app/src/web/views.rs

//! What the page templates see: display-ready strings instead of raw documents.

use catalogo::{Producto, ProductoPayload};
use serde::Serialize;

#[derive(Debug, Clone, Serialize)]
pub struct ProductoView {
  pub id: String,
  pub nombre: String,
  pub precio: String,
  /// `dd/MM/yyyy`
  pub fecha: String,
  pub foto: Option<String>,
  pub categoria: String,
}

impl From<&Producto> for ProductoView {
  fn from(p: &Producto) -> Self {
    Self {
      id: p.id.clone().unwrap_or_default(),
      nombre: p.nombre.clone(),
      precio: format!("{:.2}", p.precio),
      fecha: p.created_at.format("%d/%m/%Y").to_string(),
      foto: p.foto.clone(),
      categoria: p.categoria.nombre.clone(),
    }
  }
}

/// Values pre-filled into the product form.
#[derive(Debug, Clone, Default, Serialize)]
pub struct ProductoFormView {
  pub id: String,
  pub nombre: String,
  pub precio: String,
  /// `yyyy-MM-dd`, the format of a date input.
  pub created_at: String,
  pub categoria_id: String,
  pub foto: Option<String>,
}

impl From<&Producto> for ProductoFormView {
  fn from(p: &Producto) -> Self {
    Self {
      id: p.id.clone().unwrap_or_default(),
      nombre: p.nombre.clone(),
      precio: p.precio.to_string(),
      created_at: p.created_at.format("%Y-%m-%d").to_string(),
      categoria_id: p.categoria.id.clone().unwrap_or_default(),
      foto: p.foto.clone(),
    }
  }
}

// Re-rendering a rejected submission keeps what the user typed.
impl From<&ProductoPayload> for ProductoFormView {
  fn from(p: &ProductoPayload) -> Self {
    Self {
      id: p.id.clone().unwrap_or_default(),
      nombre: p.nombre.clone().unwrap_or_default(),
      precio: p.precio.map(|v| v.to_string()).unwrap_or_default(),
      created_at: p.created_at.map(|d| d.format("%Y-%m-%d").to_string()).unwrap_or_default(),
      categoria_id: p.categoria.as_ref().and_then(|c| c.id.clone()).unwrap_or_default(),
      foto: None,
    }
  }
}

// catalogo/src/documents/categoria.rs

use crate::store::Document;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Categoria {
  /// Assigned by the store on first save.
  pub id: Option<String>,
  pub nombre: String,
}

impl Categoria {
  pub fn new(nombre: impl Into<String>) -> Self {
    Self {
      id: None,
      nombre: nombre.into(),
    }
  }
}

impl Document for Categoria {
  const COLLECTION: &'static str = "categorias";
  const KIND: &'static str = "Categoria";

  fn id(&self) -> Option<&str> {
    self.id.as_deref()
  }

  fn set_id(&mut self, id: String) {
    self.id = Some(id);
  }
}

/// Category as it arrives from a client: either a reference (`id`) inside a
/// product payload, or a new category (`nombre`) on the category API.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct CategoriaPayload {
  #[serde(default)]
  pub id: Option<String>,
  #[serde(default)]
  pub nombre: Option<String>,
}

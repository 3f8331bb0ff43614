// catalogo/src/validation.rs

//! Field-level checks applied to incoming payloads before any store call.

use crate::documents::{CategoriaPayload, ProductoPayload};
use crate::error::{CatalogoError, CatalogoResult, FieldError};
use chrono::{DateTime, Utc};

const MSG_EMPTY: &str = "no puede estar vacío";
const MSG_NULL: &str = "no puede ser nulo";

/// A product payload that passed validation. The category is still only a
/// reference; it is resolved against the store by the caller.
#[derive(Debug, Clone, PartialEq)]
pub struct ValidProducto {
  pub nombre: String,
  pub precio: f64,
  pub created_at: Option<DateTime<Utc>>,
  pub categoria_id: String,
}

fn is_blank(value: Option<&str>) -> bool {
  value.map_or(true, |v| v.trim().is_empty())
}

impl ProductoPayload {
  /// Collects every failing field instead of stopping at the first one.
  pub fn validate(&self) -> CatalogoResult<ValidProducto> {
    let mut errors = Vec::new();

    if is_blank(self.nombre.as_deref()) {
      errors.push(FieldError::new("nombre", MSG_EMPTY));
    }

    match self.precio {
      None => errors.push(FieldError::new("precio", MSG_NULL)),
      Some(p) if !p.is_finite() => errors.push(FieldError::new("precio", "debe ser un número válido")),
      Some(_) => {}
    }

    let categoria_id = match &self.categoria {
      None => {
        errors.push(FieldError::new("categoria", MSG_NULL));
        None
      }
      Some(CategoriaPayload { id, .. }) if is_blank(id.as_deref()) => {
        errors.push(FieldError::new("categoria.id", MSG_EMPTY));
        None
      }
      Some(CategoriaPayload { id, .. }) => id.as_deref().map(|s| s.trim().to_string()),
    };

    if !errors.is_empty() {
      return Err(CatalogoError::Validation(errors));
    }

    // Every None case above pushed an error, so these are all present.
    match (self.nombre.as_deref(), self.precio, categoria_id) {
      (Some(nombre), Some(precio), Some(categoria_id)) => Ok(ValidProducto {
        nombre: nombre.trim().to_string(),
        precio,
        created_at: self.created_at,
        categoria_id,
      }),
      _ => Err(CatalogoError::field("producto", "incompleto")),
    }
  }
}

impl CategoriaPayload {
  pub fn validate_new(&self) -> CatalogoResult<String> {
    match self.nombre.as_deref() {
      Some(nombre) if !nombre.trim().is_empty() => Ok(nombre.trim().to_string()),
      _ => Err(CatalogoError::field("nombre", MSG_EMPTY)),
    }
  }
}

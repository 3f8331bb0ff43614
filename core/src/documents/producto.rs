// catalogo/src/documents/producto.rs

use super::categoria::{Categoria, CategoriaPayload};
use crate::store::Document;
use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Deserializer, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Producto {
  pub id: Option<String>,
  pub nombre: String,
  pub precio: f64,
  pub created_at: DateTime<Utc>,
  /// Stored upload filename, see `UploadDir`.
  pub foto: Option<String>,
  pub categoria: Categoria,
}

impl Producto {
  pub fn new(nombre: impl Into<String>, precio: f64, categoria: Categoria) -> Self {
    Self {
      id: None,
      nombre: nombre.into(),
      precio,
      created_at: Utc::now(),
      foto: None,
      categoria,
    }
  }

  /// Display copy with the name upper-cased; nothing is written back.
  pub fn with_uppercased_nombre(mut self) -> Self {
    self.nombre = self.nombre.to_uppercase();
    self
  }
}

impl Document for Producto {
  const COLLECTION: &'static str = "productos";
  const KIND: &'static str = "Producto";

  fn id(&self) -> Option<&str> {
    self.id.as_deref()
  }

  fn set_id(&mut self, id: String) {
    self.id = Some(id);
  }
}

/// Product fields as submitted by a client. Every field is optional here;
/// `ProductoPayload::validate` decides what is actually required.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductoPayload {
  #[serde(default)]
  pub id: Option<String>,
  #[serde(default)]
  pub nombre: Option<String>,
  #[serde(default)]
  pub precio: Option<f64>,
  #[serde(default, deserialize_with = "deserialize_created_at")]
  pub created_at: Option<DateTime<Utc>>,
  #[serde(default)]
  pub categoria: Option<CategoriaPayload>,
}

/// Accepts RFC 3339 timestamps and plain `yyyy-MM-dd` dates (midnight UTC).
pub fn parse_created_at(raw: &str) -> Option<DateTime<Utc>> {
  let raw = raw.trim();
  if let Ok(ts) = DateTime::parse_from_rfc3339(raw) {
    return Some(ts.with_timezone(&Utc));
  }
  NaiveDate::parse_from_str(raw, "%Y-%m-%d")
    .ok()
    .and_then(|d| d.and_hms_opt(0, 0, 0))
    .map(|naive| naive.and_utc())
}

fn deserialize_created_at<'de, D>(deserializer: D) -> Result<Option<DateTime<Utc>>, D::Error>
where
  D: Deserializer<'de>,
{
  let raw: Option<String> = Option::deserialize(deserializer)?;
  match raw.as_deref().map(str::trim) {
    None | Some("") => Ok(None),
    Some(s) => parse_created_at(s)
      .map(Some)
      .ok_or_else(|| serde::de::Error::custom(format!("invalid createdAt '{}', expected yyyy-MM-dd", s))),
  }
}

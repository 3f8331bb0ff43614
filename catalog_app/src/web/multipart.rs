// catalog_app/src/web/multipart.rs

//! Multipart bodies of the product forms (`id`, `nombre`, `precio`, `createdAt`,
//! `categoria.id`, `categoria.nombre`, `file`).

use crate::errors::{AppError, Result};
use crate::pipelines::UploadedFile;
use actix_multipart::Multipart;
use catalogo::documents::parse_created_at;
use catalogo::{CategoriaPayload, FieldError, ProductoPayload};
use futures_util::TryStreamExt;
use std::collections::HashMap;
use tracing::{debug, warn};

/// Name of the file part in every product form.
pub const FILE_FIELD: &str = "file";

#[derive(Debug, Default)]
pub struct ProductoForm {
  pub payload: ProductoPayload,
  pub file: Option<UploadedFile>,
  /// Values that were sent but could not be read (a non-numeric `precio`, say).
  pub parse_errors: Vec<FieldError>,
}

impl ProductoForm {
  /// Id of the product being edited, if the form carried one.
  pub fn editing_id(&self) -> Option<&str> {
    self.payload.id.as_deref().map(str::trim).filter(|id| !id.is_empty())
  }

  /// Fails with the unreadable fields, if any.
  pub fn ensure_parsed(&self) -> Result<()> {
    if self.parse_errors.is_empty() {
      Ok(())
    } else {
      Err(AppError::Validation(self.parse_errors.clone()))
    }
  }
}

/// Reads every part; text parts are kept by name, the `file` part as raw bytes.
/// A part growing past `max_part_bytes` aborts the read.
async fn read_parts(
  mut multipart: Multipart,
  max_part_bytes: usize,
) -> Result<(HashMap<String, String>, Option<UploadedFile>)> {
  let mut text = HashMap::new();
  let mut file = None;

  while let Some(mut field) = multipart.try_next().await? {
    let disposition = field.content_disposition();
    let name = disposition.get_name().unwrap_or_default().to_string();
    let filename = disposition.get_filename().map(str::to_string);

    let mut bytes = Vec::new();
    while let Some(chunk) = field.try_next().await? {
      if bytes.len() + chunk.len() > max_part_bytes {
        warn!(part = %name, max_part_bytes, "Multipart part over the size limit.");
        return Err(AppError::PayloadTooLarge(format!(
          "Part '{}' is larger than {} bytes.",
          name, max_part_bytes
        )));
      }
      bytes.extend_from_slice(&chunk);
    }

    if name == FILE_FIELD {
      debug!(filename = ?filename, size = bytes.len(), "Multipart file part read.");
      file = Some(UploadedFile {
        filename: filename.unwrap_or_default(),
        bytes,
      });
    } else {
      text.insert(name, String::from_utf8_lossy(&bytes).into_owned());
    }
  }
  Ok((text, file))
}

fn non_empty(text: &mut HashMap<String, String>, key: &str) -> Option<String> {
  text.remove(key).filter(|v| !v.trim().is_empty())
}

pub async fn read_producto_form(multipart: Multipart, max_part_bytes: usize) -> Result<ProductoForm> {
  let (mut text, file) = read_parts(multipart, max_part_bytes).await?;
  let mut parse_errors = Vec::new();

  let precio = match non_empty(&mut text, "precio") {
    Some(raw) => match raw.trim().parse::<f64>() {
      Ok(p) => Some(p),
      Err(_) => {
        parse_errors.push(FieldError::new("precio", "debe ser un número válido"));
        None
      }
    },
    None => None,
  };

  let created_at = match non_empty(&mut text, "createdAt") {
    Some(raw) => {
      let parsed = parse_created_at(raw.trim());
      if parsed.is_none() {
        parse_errors.push(FieldError::new("createdAt", "debe ser una fecha yyyy-MM-dd"));
      }
      parsed
    }
    None => None,
  };

  let categoria_id = non_empty(&mut text, "categoria.id");
  let categoria_nombre = non_empty(&mut text, "categoria.nombre");
  let categoria = (categoria_id.is_some() || categoria_nombre.is_some()).then(|| CategoriaPayload {
    id: categoria_id,
    nombre: categoria_nombre,
  });

  let payload = ProductoPayload {
    id: non_empty(&mut text, "id"),
    nombre: text.remove("nombre"),
    precio,
    created_at,
    categoria,
  };

  Ok(ProductoForm {
    payload,
    file,
    parse_errors,
  })
}

/// Only the `file` part matters for the upload endpoints. A missing part reads as an empty filename.
pub async fn read_upload(multipart: Multipart, max_part_bytes: usize) -> Result<UploadedFile> {
  let (_, file) = read_parts(multipart, max_part_bytes).await?;
  Ok(file.unwrap_or(UploadedFile {
    filename: String::new(),
    bytes: Vec::new(),
  }))
}

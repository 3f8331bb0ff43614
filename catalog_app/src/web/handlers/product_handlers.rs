// catalog_app/src/web/handlers/product_handlers.rs

//! REST controller under `/api/productos`.

use actix_multipart::Multipart;
use actix_web::http::header;
use actix_web::{web, HttpResponse};
use catalogo::{Producto, ProductoPayload};
use chrono::Utc;
use serde_json::json;
use tracing::{info, instrument, warn};

use crate::errors::{AppError, Result};
use crate::pipelines::{self, SaveTarget};
use crate::state::AppState;
use crate::web::multipart::{read_producto_form, read_upload};

pub const BASE_PATH: &str = "/api/productos";

fn location(producto: &Producto) -> String {
  format!("{}/{}", BASE_PATH, producto.id.as_deref().unwrap_or_default())
}

async fn find_or_404(app_state: &AppState, id: &str) -> Result<Producto> {
  app_state.catalog.get_by_id(id).await?.ok_or_else(|| {
    warn!(producto_id = %id, "Producto not found.");
    AppError::NotFound(format!("Producto with ID {} not found.", id))
  })
}

#[instrument(name = "handler::list_productos", skip(app_state))]
pub async fn list_productos_handler(app_state: web::Data<AppState>) -> Result<HttpResponse> {
  let productos = app_state.catalog.list_all().await?;
  info!("Successfully fetched {} productos.", productos.len());
  Ok(HttpResponse::Ok().json(productos))
}

#[instrument(name = "handler::get_producto", skip(app_state, path), fields(producto_id = %path.as_ref()))]
pub async fn get_producto_handler(app_state: web::Data<AppState>, path: web::Path<String>) -> Result<HttpResponse> {
  let producto = find_or_404(&app_state, &path.into_inner()).await?;
  Ok(HttpResponse::Ok().json(producto))
}

/// JSON create. Answers with the stored product, a message and the time of creation.
#[instrument(name = "handler::create_producto", skip(app_state, payload))]
pub async fn create_producto_handler(
  app_state: web::Data<AppState>,
  payload: web::Json<ProductoPayload>,
) -> Result<HttpResponse> {
  let saved = pipelines::save_producto(&app_state, SaveTarget::Create, payload.into_inner(), None).await?;

  Ok(
    HttpResponse::Created()
      .insert_header((header::LOCATION, location(&saved)))
      .json(json!({
        "producto": saved,
        "mensaje": "Producto creado con exito",
        "timestamp": Utc::now(),
      })),
  )
}

/// Multipart create with an optional `file` part.
#[instrument(name = "handler::create_producto_with_foto", skip(app_state, payload))]
pub async fn create_producto_with_foto_handler(
  app_state: web::Data<AppState>,
  payload: Multipart,
) -> Result<HttpResponse> {
  let form = read_producto_form(payload, app_state.config.max_upload_bytes).await?;
  form.ensure_parsed()?;
  let saved = pipelines::save_producto(&app_state, SaveTarget::Create, form.payload, form.file).await?;

  Ok(
    HttpResponse::Created()
      .insert_header((header::LOCATION, location(&saved)))
      .json(saved),
  )
}

#[instrument(name = "handler::update_producto", skip(app_state, path, payload), fields(producto_id = %path.as_ref()))]
pub async fn update_producto_handler(
  app_state: web::Data<AppState>,
  path: web::Path<String>,
  payload: web::Json<ProductoPayload>,
) -> Result<HttpResponse> {
  let target = SaveTarget::Update(path.into_inner());
  let saved = pipelines::save_producto(&app_state, target, payload.into_inner(), None).await?;

  Ok(
    HttpResponse::Created()
      .insert_header((header::LOCATION, location(&saved)))
      .json(saved),
  )
}

#[instrument(name = "handler::delete_producto", skip(app_state, path), fields(producto_id = %path.as_ref()))]
pub async fn delete_producto_handler(app_state: web::Data<AppState>, path: web::Path<String>) -> Result<HttpResponse> {
  let producto = find_or_404(&app_state, &path.into_inner()).await?;
  if !app_state.catalog.delete(&producto).await? {
    return Err(AppError::NotFound(format!(
      "Producto with ID {} not found.",
      producto.id.unwrap_or_default()
    )));
  }
  Ok(HttpResponse::NoContent().finish())
}

#[instrument(name = "handler::upload_foto", skip(app_state, path, payload), fields(producto_id = %path.as_ref()))]
pub async fn upload_foto_handler(
  app_state: web::Data<AppState>,
  path: web::Path<String>,
  payload: Multipart,
) -> Result<HttpResponse> {
  let file = read_upload(payload, app_state.config.max_upload_bytes).await?;
  let producto = pipelines::upload_foto(&app_state, path.into_inner(), file).await?;
  Ok(HttpResponse::Ok().json(producto))
}

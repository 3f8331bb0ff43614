// catalog_app/src/web/handlers/functional_handlers.rs

//! Router-style handlers under `/api/v2/productos`.
//!
//! Same operations as the REST controller with a leaner error surface:
//! rejected input answers with the bare list of field messages, a missing
//! product with an empty 404.

use actix_multipart::Multipart;
use actix_web::http::header;
use actix_web::{web, HttpResponse};
use catalogo::{Producto, ProductoPayload};
use tracing::{debug, instrument};

use crate::errors::{AppError, Result};
use crate::pipelines::{self, SaveTarget};
use crate::state::AppState;
use crate::web::multipart::{read_producto_form, read_upload};

pub const BASE_PATH: &str = "/api/v2/productos";

fn created(producto: &Producto) -> HttpResponse {
  HttpResponse::Created()
    .insert_header((
      header::LOCATION,
      format!("{}/{}", BASE_PATH, producto.id.as_deref().unwrap_or_default()),
    ))
    .json(producto)
}

/// Turns the outcomes this router answers itself into responses; anything else stays an error.
fn respond(result: Result<HttpResponse>) -> Result<HttpResponse> {
  match result {
    Err(AppError::NotFound(m)) => {
      debug!(reason = %m, "Answering with empty 404.");
      Ok(HttpResponse::NotFound().finish())
    }
    Err(e @ AppError::Validation(_)) => Ok(HttpResponse::BadRequest().json(e.field_messages().unwrap_or_default())),
    other => other,
  }
}

#[instrument(name = "functional::list", skip(app_state))]
pub async fn list_handler(app_state: web::Data<AppState>) -> Result<HttpResponse> {
  Ok(HttpResponse::Ok().json(app_state.catalog.list_all().await?))
}

#[instrument(name = "functional::get", skip(app_state, path), fields(producto_id = %path.as_ref()))]
pub async fn get_handler(app_state: web::Data<AppState>, path: web::Path<String>) -> Result<HttpResponse> {
  match app_state.catalog.get_by_id(&path.into_inner()).await? {
    Some(producto) => Ok(HttpResponse::Ok().json(producto)),
    None => Ok(HttpResponse::NotFound().finish()),
  }
}

#[instrument(name = "functional::create", skip(app_state, payload))]
pub async fn create_handler(app_state: web::Data<AppState>, payload: web::Json<ProductoPayload>) -> Result<HttpResponse> {
  respond(
    pipelines::save_producto(&app_state, SaveTarget::Create, payload.into_inner(), None)
      .await
      .map(|saved| created(&saved)),
  )
}

#[instrument(name = "functional::update", skip(app_state, path, payload), fields(producto_id = %path.as_ref()))]
pub async fn update_handler(
  app_state: web::Data<AppState>,
  path: web::Path<String>,
  payload: web::Json<ProductoPayload>,
) -> Result<HttpResponse> {
  let target = SaveTarget::Update(path.into_inner());
  respond(
    pipelines::save_producto(&app_state, target, payload.into_inner(), None)
      .await
      .map(|saved| created(&saved)),
  )
}

#[instrument(name = "functional::delete", skip(app_state, path), fields(producto_id = %path.as_ref()))]
pub async fn delete_handler(app_state: web::Data<AppState>, path: web::Path<String>) -> Result<HttpResponse> {
  let Some(producto) = app_state.catalog.get_by_id(&path.into_inner()).await? else {
    return Ok(HttpResponse::NotFound().finish());
  };
  if app_state.catalog.delete(&producto).await? {
    Ok(HttpResponse::NoContent().finish())
  } else {
    Ok(HttpResponse::NotFound().finish())
  }
}

#[instrument(name = "functional::upload", skip(app_state, path, payload), fields(producto_id = %path.as_ref()))]
pub async fn upload_handler(
  app_state: web::Data<AppState>,
  path: web::Path<String>,
  payload: Multipart,
) -> Result<HttpResponse> {
  let file = read_upload(payload, app_state.config.max_upload_bytes).await?;
  respond(
    pipelines::upload_foto(&app_state, path.into_inner(), file)
      .await
      .map(|producto| created(&producto)),
  )
}

/// Multipart create with the photo in the same request.
#[instrument(name = "functional::save_with_image", skip(app_state, payload))]
pub async fn save_with_image_handler(app_state: web::Data<AppState>, payload: Multipart) -> Result<HttpResponse> {
  let form = read_producto_form(payload, app_state.config.max_upload_bytes).await?;
  if let Err(e) = form.ensure_parsed() {
    return respond(Err(e));
  }
  respond(
    pipelines::save_producto(&app_state, SaveTarget::Create, form.payload, form.file)
      .await
      .map(|saved| created(&saved)),
  )
}

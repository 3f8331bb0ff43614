// catalog_app/src/web/handlers/categoria_handlers.rs

use actix_web::http::header;
use actix_web::{web, HttpResponse};
use catalogo::{Categoria, CategoriaPayload};
use tracing::{info, instrument};

use crate::errors::{AppError, Result};
use crate::state::AppState;

#[instrument(name = "handler::list_categorias", skip(app_state))]
pub async fn list_categorias_handler(app_state: web::Data<AppState>) -> Result<HttpResponse> {
  Ok(HttpResponse::Ok().json(app_state.catalog.list_categories().await?))
}

#[instrument(name = "handler::get_categoria", skip(app_state, path), fields(categoria_id = %path.as_ref()))]
pub async fn get_categoria_handler(app_state: web::Data<AppState>, path: web::Path<String>) -> Result<HttpResponse> {
  let id = path.into_inner();
  let categoria = app_state
    .catalog
    .get_category_by_id(&id)
    .await?
    .ok_or_else(|| AppError::NotFound(format!("Categoria with ID {} not found.", id)))?;
  Ok(HttpResponse::Ok().json(categoria))
}

#[instrument(name = "handler::create_categoria", skip(app_state, payload))]
pub async fn create_categoria_handler(
  app_state: web::Data<AppState>,
  payload: web::Json<CategoriaPayload>,
) -> Result<HttpResponse> {
  let nombre = payload.validate_new()?;
  let saved = app_state.catalog.save_category(Categoria::new(nombre)).await?;
  info!(categoria_id = saved.id.as_deref().unwrap_or_default(), "Categoria created.");

  Ok(
    HttpResponse::Created()
      .insert_header((
        header::LOCATION,
        format!("/api/categorias/{}", saved.id.as_deref().unwrap_or_default()),
      ))
      .json(saved),
  )
}

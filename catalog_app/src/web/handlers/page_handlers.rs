// catalog_app/src/web/handlers/page_handlers.rs

//! Server-rendered pages under `/productos`.

use actix_web::http::header::{self, ContentType};
use actix_web::web::{self, Bytes};
use actix_web::HttpResponse;
use actix_multipart::Multipart;
use catalogo::Producto;
use futures_util::future;
use futures_util::stream::{self, BoxStream, StreamExt};
use serde::Deserialize;
use std::sync::Arc;
use tera::{Context, Tera};
use tracing::{info, instrument, warn};

use crate::errors::{AppError, Result};
use crate::pipelines::{self, SaveTarget};
use crate::state::AppState;
use crate::web::multipart::read_producto_form;
use crate::web::templates::{self, render};
use crate::web::views::{ProductoFormView, ProductoView};

const LISTADO: &str = "/productos";

#[derive(Deserialize, Debug, Default)]
pub struct FlashQuery {
  pub status: Option<String>,
  pub error: Option<String>,
}

fn redirect(location: &str) -> HttpResponse {
  HttpResponse::Found()
    .insert_header((header::LOCATION, location))
    .finish()
}

fn html(body: String) -> HttpResponse {
  HttpResponse::Ok().content_type(ContentType::html()).body(body)
}

fn listado_context(titulo: &str, flash: &FlashQuery) -> Context {
  let mut ctx = Context::new();
  ctx.insert("titulo", titulo);
  ctx.insert("status", &flash.status);
  ctx.insert("error", &flash.error);
  ctx
}

/// Head, one rendered row per product as it arrives, tail.
fn stream_listado(
  tera: Arc<Tera>,
  titulo: &str,
  productos: BoxStream<'static, Producto>,
) -> Result<HttpResponse> {
  let ctx = listado_context(titulo, &FlashQuery::default());
  let head = Bytes::from(render(&tera, templates::LISTAR_HEAD, &ctx)?);
  let tail = Bytes::from(render(&tera, templates::LISTAR_TAIL, &ctx)?);

  let rows = productos.map(move |producto| {
    let mut row_ctx = Context::new();
    row_ctx.insert("producto", &ProductoView::from(&producto));
    render(&tera, templates::PRODUCTO_ROW, &row_ctx).map(Bytes::from)
  });
  let body = stream::once(future::ready(Ok::<_, AppError>(head)))
    .chain(rows)
    .chain(stream::once(future::ready(Ok(tail))));

  Ok(HttpResponse::Ok().content_type(ContentType::html()).streaming(body))
}

#[instrument(name = "page::listar", skip(app_state, flash))]
pub async fn listar_handler(app_state: web::Data<AppState>, flash: web::Query<FlashQuery>) -> Result<HttpResponse> {
  let productos = app_state.catalog.list_all_uppercased().await?;
  info!(count = productos.len(), "Listing productos page.");

  let views: Vec<ProductoView> = productos.iter().map(ProductoView::from).collect();
  let mut ctx = listado_context("Listado de productos", &flash);
  ctx.insert("productos", &views);
  Ok(html(render(&app_state.templates, templates::LISTAR, &ctx)?))
}

#[instrument(name = "page::listar_delay", skip(app_state))]
pub async fn listar_delay_handler(app_state: web::Data<AppState>) -> Result<HttpResponse> {
  let productos = app_state
    .catalog
    .list_all_uppercased_delayed(app_state.config.delay_interval)
    .await?;
  stream_listado(app_state.templates.clone(), "Listado de productos", productos)
}

/// The repeated listing rendered into a single buffered page.
#[instrument(name = "page::listar_full", skip(app_state))]
pub async fn listar_full_handler(app_state: web::Data<AppState>) -> Result<HttpResponse> {
  let productos: Vec<Producto> = app_state
    .catalog
    .list_all_uppercased_repeated(app_state.config.repeat_count)
    .await?
    .collect()
    .await;

  let views: Vec<ProductoView> = productos.iter().map(ProductoView::from).collect();
  let mut ctx = listado_context("Listado de productos", &FlashQuery::default());
  ctx.insert("productos", &views);
  Ok(html(render(&app_state.templates, templates::LISTAR, &ctx)?))
}

#[instrument(name = "page::listar_chunked", skip(app_state))]
pub async fn listar_chunked_handler(app_state: web::Data<AppState>) -> Result<HttpResponse> {
  let productos = app_state
    .catalog
    .list_all_uppercased_repeated(app_state.config.repeat_count)
    .await?;
  stream_listado(app_state.templates.clone(), "Listado de productos", productos)
}

#[instrument(name = "page::ver", skip(app_state, path), fields(producto_id = %path.as_ref()))]
pub async fn ver_handler(app_state: web::Data<AppState>, path: web::Path<String>) -> Result<HttpResponse> {
  let id = path.into_inner();
  let Some(producto) = app_state.catalog.get_by_id(&id).await? else {
    warn!(producto_id = %id, "Producto to show not found.");
    return Ok(redirect("/productos?error=No+existe+el+producto"));
  };

  let mut ctx = listado_context("Detalle Producto", &FlashQuery::default());
  ctx.insert("producto", &ProductoView::from(&producto));
  Ok(html(render(&app_state.templates, templates::VER, &ctx)?))
}

async fn render_form(
  app_state: &AppState,
  producto: ProductoFormView,
  titulo: &str,
  boton: &str,
  errors: &[String],
) -> Result<String> {
  let categorias = app_state.catalog.list_categories().await?;
  let mut ctx = listado_context(titulo, &FlashQuery::default());
  ctx.insert("producto", &producto);
  ctx.insert("categorias", &categorias);
  ctx.insert("boton", boton);
  ctx.insert("errors", errors);
  render(&app_state.templates, templates::FORM, &ctx)
}

#[instrument(name = "page::crear", skip(app_state))]
pub async fn crear_form_handler(app_state: web::Data<AppState>) -> Result<HttpResponse> {
  let body = render_form(&app_state, ProductoFormView::default(), "Formulario de producto", "Crear", &[]).await?;
  Ok(html(body))
}

#[instrument(name = "page::editar", skip(app_state, path), fields(producto_id = %path.as_ref()))]
pub async fn editar_form_handler(app_state: web::Data<AppState>, path: web::Path<String>) -> Result<HttpResponse> {
  let id = path.into_inner();
  let Some(producto) = app_state.catalog.get_by_id(&id).await? else {
    return Ok(redirect("/productos?error=No+existe+el+producto"));
  };
  let body = render_form(&app_state, ProductoFormView::from(&producto), "Editando Producto", "Editar", &[]).await?;
  Ok(html(body))
}

/// Creates, or updates when the form carries an id. Rejected input re-renders the form.
#[instrument(name = "page::guardar", skip(app_state, payload))]
pub async fn guardar_handler(app_state: web::Data<AppState>, payload: Multipart) -> Result<HttpResponse> {
  let form = read_producto_form(payload, app_state.config.max_upload_bytes).await?;
  let target = match form.editing_id() {
    Some(id) => SaveTarget::Update(id.to_string()),
    None => SaveTarget::Create,
  };
  let editing = target != SaveTarget::Create;

  let result = match form.ensure_parsed() {
    Ok(()) => pipelines::save_producto(&app_state, target, form.payload.clone(), form.file).await,
    Err(e) => Err(e),
  };

  match result {
    Ok(saved) => {
      info!(producto_id = saved.id.as_deref().unwrap_or_default(), "Producto saved from form.");
      Ok(redirect("/productos?status=producto+guardado+con+exito"))
    }
    Err(AppError::NotFound(_)) => Ok(redirect("/productos?error=No+existe+el+producto")),
    Err(e @ AppError::Validation(_)) => {
      let errors = e.field_messages().unwrap_or_default();
      warn!(?errors, "Producto form rejected.");
      let (titulo, boton) = if editing {
        ("Editando Producto", "Editar")
      } else {
        ("Formulario de producto", "Crear")
      };
      let body = render_form(&app_state, ProductoFormView::from(&form.payload), titulo, boton, &errors).await?;
      Ok(html(body))
    }
    Err(e) => Err(e),
  }
}

#[instrument(name = "page::eliminar", skip(app_state, path), fields(producto_id = %path.as_ref()))]
pub async fn eliminar_handler(app_state: web::Data<AppState>, path: web::Path<String>) -> Result<HttpResponse> {
  let id = path.into_inner();
  let Some(producto) = app_state.catalog.get_by_id(&id).await? else {
    return Ok(redirect("/productos?error=No+existe+el+producto+a+eliminar"));
  };

  if app_state.catalog.delete(&producto).await? {
    Ok(redirect("/productos?status=producto+eliminado+con+exito"))
  } else {
    Ok(redirect("/productos?error=No+existe+el+producto+a+eliminar"))
  }
}

fn content_type_for(nombre: &str) -> &'static str {
  let ext = nombre.rsplit('.').next().unwrap_or_default().to_ascii_lowercase();
  match ext.as_str() {
    "png" => "image/png",
    "jpg" | "jpeg" => "image/jpeg",
    "gif" => "image/gif",
    "webp" => "image/webp",
    _ => "application/octet-stream",
  }
}

/// Stored photo as a download.
#[instrument(name = "page::ver_foto", skip(app_state, path))]
pub async fn ver_foto_handler(app_state: web::Data<AppState>, path: web::Path<String>) -> Result<HttpResponse> {
  let nombre = path.into_inner();
  let bytes = app_state
    .uploads
    .read(&nombre)
    .await?
    .ok_or_else(|| AppError::NotFound(format!("Foto {} not found.", nombre)))?;

  Ok(
    HttpResponse::Ok()
      .content_type(content_type_for(&nombre))
      .insert_header((header::CONTENT_DISPOSITION, format!("attachment; filename=\"{}\"", nombre)))
      .body(bytes),
  )
}

pub async fn index_redirect() -> HttpResponse {
  redirect(LISTADO)
}

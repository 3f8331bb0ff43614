// catalog_app/src/pipelines/save_producto_pipeline.rs

//! Create or update a product: every adapter's POST/PUT ends up here.

use crate::errors::AppError;
use crate::pipelines::contexts::{SaveProductoCtxData, SaveTarget};
use catalogo::{CatalogoError, ContextData, Pipeline, PipelineControl, PipelineError, Producto, SkipCondition};
use chrono::Utc;
use std::sync::Arc;
use tracing::{info, warn};

pub type SaveProductoPipeline = Pipeline<SaveProductoCtxData, AppError>;

pub fn build_save_producto_pipeline() -> Result<SaveProductoPipeline, PipelineError> {
  let creating: SkipCondition<SaveProductoCtxData> =
    Arc::new(|ctx: &ContextData<SaveProductoCtxData>| ctx.read().target == SaveTarget::Create);
  let no_file: SkipCondition<SaveProductoCtxData> =
    Arc::new(|ctx: &ContextData<SaveProductoCtxData>| ctx.read().foto.as_ref().map_or(true, |f| f.is_empty()));

  let mut p = SaveProductoPipeline::new(
    "save_producto",
    &[
      ("load_existing", false, Some(creating)),
      ("validate_payload", false, None),
      ("resolve_categoria", false, None),
      ("merge_fields", false, None),
      ("store_foto", false, Some(no_file)),
      ("persist_producto", false, None),
    ],
  );

  p.on_step("load_existing", load_existing)?
    .on_step("validate_payload", validate_payload)?
    .on_step("resolve_categoria", resolve_categoria)?
    .on_step("merge_fields", merge_fields)?
    .on_step("store_foto", store_foto)?
    .on_step("persist_producto", persist_producto)?;

  Ok(p)
}

// Step 1: an update needs something to update.
async fn load_existing(ctx_data: ContextData<SaveProductoCtxData>) -> Result<PipelineControl, AppError> {
  let (catalog, target) = {
    let guard = ctx_data.read();
    (guard.app_state.catalog.clone(), guard.target.clone())
  };
  let SaveTarget::Update(id) = target else {
    return Ok(PipelineControl::Continue);
  };

  match catalog.get_by_id(&id).await? {
    Some(existing) => {
      ctx_data.write().existing = Some(existing);
      Ok(PipelineControl::Continue)
    }
    None => {
      warn!(producto_id = %id, "Save Producto Pipeline: nothing to update.");
      Err(CatalogoError::not_found("Producto", id).into())
    }
  }
}

// Step 2
async fn validate_payload(ctx_data: ContextData<SaveProductoCtxData>) -> Result<PipelineControl, AppError> {
  let valid = { ctx_data.read().payload.validate() }?;
  ctx_data.write().valid = Some(valid);
  Ok(PipelineControl::Continue)
}

// Step 3: the stored category wins over whatever the client sent along with the id.
async fn resolve_categoria(ctx_data: ContextData<SaveProductoCtxData>) -> Result<PipelineControl, AppError> {
  let (catalog, categoria_id) = {
    let guard = ctx_data.read();
    (
      guard.app_state.catalog.clone(),
      guard.valid.as_ref().map(|v| v.categoria_id.clone()),
    )
  };
  let categoria_id = categoria_id.ok_or_else(|| AppError::Internal("payload was not validated".to_string()))?;

  match catalog.get_category_by_id(&categoria_id).await? {
    Some(categoria) => {
      ctx_data.write().categoria = Some(categoria);
      Ok(PipelineControl::Continue)
    }
    None => {
      warn!(categoria_id = %categoria_id, "Save Producto Pipeline: unknown category.");
      Err(CatalogoError::field("categoria", "no existe").into())
    }
  }
}

// Step 4: updates only touch nombre, precio and categoria (createdAt when re-supplied).
async fn merge_fields(ctx_data: ContextData<SaveProductoCtxData>) -> Result<PipelineControl, AppError> {
  let mut guard = ctx_data.write();
  let (Some(valid), Some(categoria)) = (guard.valid.clone(), guard.categoria.clone()) else {
    return Err(AppError::Internal("merge_fields ran before validation".to_string()));
  };

  let producto = match guard.existing.take() {
    Some(mut existing) => {
      existing.nombre = valid.nombre;
      existing.precio = valid.precio;
      existing.categoria = categoria;
      if let Some(created_at) = valid.created_at {
        existing.created_at = created_at;
      }
      existing
    }
    None => {
      let mut producto = Producto::new(valid.nombre, valid.precio, categoria);
      producto.created_at = valid.created_at.unwrap_or_else(Utc::now);
      producto
    }
  };
  guard.producto = Some(producto);
  Ok(PipelineControl::Continue)
}

// Step 5: the file goes to disk before the document references it.
async fn store_foto(ctx_data: ContextData<SaveProductoCtxData>) -> Result<PipelineControl, AppError> {
  let (uploads, foto) = {
    let guard = ctx_data.read();
    (guard.app_state.uploads.clone(), guard.foto.clone())
  };
  let Some(foto) = foto else {
    return Ok(PipelineControl::Continue);
  };

  if let Some(stored_as) = uploads.store(&foto.filename, &foto.bytes).await? {
    if let Some(producto) = ctx_data.write().producto.as_mut() {
      producto.foto = Some(stored_as);
    }
  }
  Ok(PipelineControl::Continue)
}

// Step 6
async fn persist_producto(ctx_data: ContextData<SaveProductoCtxData>) -> Result<PipelineControl, AppError> {
  let (catalog, producto) = {
    let mut guard = ctx_data.write();
    (guard.app_state.catalog.clone(), guard.producto.take())
  };
  let producto = producto.ok_or_else(|| AppError::Internal("no producto to persist".to_string()))?;

  // The category was resolved in `resolve_categoria`.
  let saved = catalog.save_resolved(producto).await?;
  info!(
    producto_id = saved.id.as_deref().unwrap_or_default(),
    "Save Producto Pipeline: producto persisted."
  );
  ctx_data.write().saved = Some(saved);
  Ok(PipelineControl::Continue)
}

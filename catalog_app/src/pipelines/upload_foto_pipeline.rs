// catalog_app/src/pipelines/upload_foto_pipeline.rs

//! Attach a photo to an existing product.

use crate::errors::AppError;
use crate::pipelines::contexts::UploadFotoCtxData;
use catalogo::{CatalogoError, ContextData, Pipeline, PipelineControl, PipelineError, SkipCondition};
use std::sync::Arc;
use tracing::{info, warn};

pub type UploadFotoPipeline = Pipeline<UploadFotoCtxData, AppError>;

pub fn build_upload_foto_pipeline() -> Result<UploadFotoPipeline, PipelineError> {
  let no_file: SkipCondition<UploadFotoCtxData> =
    Arc::new(|ctx: &ContextData<UploadFotoCtxData>| ctx.read().foto.is_empty());
  let nothing_stored: SkipCondition<UploadFotoCtxData> =
    Arc::new(|ctx: &ContextData<UploadFotoCtxData>| ctx.read().stored_as.is_none());

  let mut p = UploadFotoPipeline::new(
    "upload_foto",
    &[
      ("load_producto", false, None),
      ("store_foto", false, Some(no_file)),
      ("persist_foto", false, Some(nothing_stored)),
    ],
  );

  p.on_step("load_producto", |ctx_data: ContextData<UploadFotoCtxData>| async move {
    let (catalog, id) = {
      let guard = ctx_data.read();
      (guard.app_state.catalog.clone(), guard.producto_id.clone())
    };
    match catalog.get_by_id(&id).await? {
      Some(producto) => {
        ctx_data.write().producto = Some(producto);
        Ok::<_, AppError>(PipelineControl::Continue)
      }
      None => {
        warn!(producto_id = %id, "Upload Foto Pipeline: producto not found.");
        Err(CatalogoError::not_found("Producto", id).into())
      }
    }
  })?;

  p.on_step("store_foto", |ctx_data: ContextData<UploadFotoCtxData>| async move {
    let (uploads, foto) = {
      let guard = ctx_data.read();
      (guard.app_state.uploads.clone(), guard.foto.clone())
    };
    let stored_as = uploads.store(&foto.filename, &foto.bytes).await?;
    ctx_data.write().stored_as = stored_as;
    Ok::<_, AppError>(PipelineControl::Continue)
  })?;

  p.on_step("persist_foto", |ctx_data: ContextData<UploadFotoCtxData>| async move {
    let (catalog, producto) = {
      let guard = ctx_data.read();
      let producto = guard.producto.clone().map(|mut p| {
        p.foto = guard.stored_as.clone();
        p
      });
      (guard.app_state.catalog.clone(), producto)
    };
    let producto = producto.ok_or_else(|| AppError::Internal("no producto loaded".to_string()))?;

    // Only the photo changes; the embedded category stays, even if it was deleted since.
    let saved = catalog.save_resolved(producto).await?;
    info!(
      producto_id = saved.id.as_deref().unwrap_or_default(),
      foto = saved.foto.as_deref().unwrap_or_default(),
      "Upload Foto Pipeline: foto attached."
    );
    ctx_data.write().saved = Some(saved);
    Ok::<_, AppError>(PipelineControl::Continue)
  })?;

  Ok(p)
}

// catalog_app/src/pipelines/mod.rs

//! Request flows shared by the page, REST and functional adapters.

use crate::errors::{AppError, Result};
use crate::state::AppState;
use catalogo::{ContextData, PipelineError, PipelineResult, Producto, ProductoPayload};
use tracing::instrument;

pub mod contexts;
pub mod save_producto_pipeline;
pub mod upload_foto_pipeline;

pub use contexts::{SaveTarget, UploadedFile};
use contexts::{SaveProductoCtxData, UploadFotoCtxData};
use save_producto_pipeline::{build_save_producto_pipeline, SaveProductoPipeline};
use upload_foto_pipeline::{build_upload_foto_pipeline, UploadFotoPipeline};

/// Every pipeline the application runs, built once at startup.
pub struct Pipelines {
  pub save_producto: SaveProductoPipeline,
  pub upload_foto: UploadFotoPipeline,
}

impl Pipelines {
  pub fn new() -> std::result::Result<Self, PipelineError> {
    Ok(Self {
      save_producto: build_save_producto_pipeline()?,
      upload_foto: build_upload_foto_pipeline()?,
    })
  }
}

/// Validates, resolves the category, stores the optional photo and persists.
#[instrument(name = "pipelines::save_producto", skip(app_state, payload, foto))]
pub async fn save_producto(
  app_state: &AppState,
  target: SaveTarget,
  payload: ProductoPayload,
  foto: Option<UploadedFile>,
) -> Result<Producto> {
  let ctx_data = ContextData::new(SaveProductoCtxData::new(app_state.clone(), target, payload, foto));

  match app_state.pipelines.save_producto.run(ctx_data.clone()).await? {
    PipelineResult::Completed => {}
    PipelineResult::Stopped => return Err(AppError::Internal("save_producto stopped early".to_string())),
  }
  let saved = ctx_data.write().saved.take();
  saved.ok_or_else(|| AppError::Internal("save_producto completed without a saved producto".to_string()))
}

/// Stores `foto` and points the product at it. An empty filename leaves the product as it was.
#[instrument(name = "pipelines::upload_foto", skip(app_state, foto))]
pub async fn upload_foto(app_state: &AppState, producto_id: String, foto: UploadedFile) -> Result<Producto> {
  let ctx_data = ContextData::new(UploadFotoCtxData::new(app_state.clone(), producto_id, foto));

  match app_state.pipelines.upload_foto.run(ctx_data.clone()).await? {
    PipelineResult::Completed => {}
    PipelineResult::Stopped => return Err(AppError::Internal("upload_foto stopped early".to_string())),
  }
  let (saved, loaded) = {
    let mut guard = ctx_data.write();
    (guard.saved.take(), guard.producto.take())
  };
  saved
    .or(loaded)
    .ok_or_else(|| AppError::Internal("upload_foto completed without a producto".to_string()))
}

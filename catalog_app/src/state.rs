// catalog_app/src/state.rs
use crate::config::AppConfig;
use crate::errors::Result;
use crate::pipelines::Pipelines;
use crate::web::templates;
use catalogo::{CatalogService, UploadDir};
use std::sync::Arc;
use tera::Tera;

#[derive(Clone)]
pub struct AppState {
  pub catalog: CatalogService,
  pub uploads: UploadDir,
  pub pipelines: Arc<Pipelines>,
  pub templates: Arc<Tera>,
  pub config: Arc<AppConfig>, // Share loaded config
}

impl AppState {
  /// Wires the request pipelines and page templates around an already chosen store.
  pub fn new(catalog: CatalogService, config: Arc<AppConfig>) -> Result<Self> {
    let pipelines = Pipelines::new()?;
    tracing::info!(
      save_producto_steps = ?pipelines.save_producto.step_names(),
      upload_foto_steps = ?pipelines.upload_foto.step_names(),
      "Request pipelines built."
    );

    Ok(Self {
      uploads: UploadDir::new(config.uploads_path.clone()),
      catalog,
      pipelines: Arc::new(pipelines),
      templates: Arc::new(templates::load()?),
      config,
    })
  }
}

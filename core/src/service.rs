// catalogo/src/service.rs

//! The catalogue façade every transport adapter talks to.

use crate::documents::{Categoria, Producto};
use crate::error::{CatalogoError, CatalogoResult};
use crate::store::{Collection, DocumentStore};
use futures::stream::{self, BoxStream, StreamExt};
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, info, instrument, warn};

#[derive(Clone)]
pub struct CatalogService {
  productos: Collection<Producto>,
  categorias: Collection<Categoria>,
  backend: &'static str,
}

impl CatalogService {
  pub fn new(store: Arc<dyn DocumentStore>) -> Self {
    Self {
      backend: store.backend_name(),
      productos: Collection::new(Arc::clone(&store)),
      categorias: Collection::new(store),
    }
  }

  pub fn backend(&self) -> &'static str {
    self.backend
  }

  // --- Productos ---

  pub async fn list_all(&self) -> CatalogoResult<Vec<Producto>> {
    self.productos.find_all().await
  }

  pub async fn list_all_uppercased(&self) -> CatalogoResult<Vec<Producto>> {
    Ok(
      self
        .list_all()
        .await?
        .into_iter()
        .map(Producto::with_uppercased_nombre)
        .collect(),
    )
  }

  /// Uppercased listing that waits `interval` before emitting each element.
  ///
  /// The scan itself happens up front, so store errors surface here and not mid-stream.
  pub async fn list_all_uppercased_delayed(&self, interval: Duration) -> CatalogoResult<BoxStream<'static, Producto>> {
    let productos = self.list_all_uppercased().await?;
    debug!(count = productos.len(), ?interval, "Emitting delayed product listing.");
    Ok(
      stream::iter(productos)
        .then(move |producto| async move {
          tokio::time::sleep(interval).await;
          producto
        })
        .boxed(),
    )
  }

  /// Uppercased listing emitted once and then `repeat` more times, lazily.
  pub async fn list_all_uppercased_repeated(&self, repeat: usize) -> CatalogoResult<BoxStream<'static, Producto>> {
    let productos = self.list_all_uppercased().await?;
    debug!(count = productos.len(), repeat, "Emitting repeated product listing.");
    let passes = std::iter::repeat(productos).take(repeat.saturating_add(1)).flatten();
    Ok(stream::iter(passes).boxed())
  }

  pub async fn get_by_id(&self, id: &str) -> CatalogoResult<Option<Producto>> {
    self.productos.find_by_id(id).await
  }

  /// Persists `producto` after replacing its category with the stored one.
  ///
  /// Fails with a `categoria` validation error when the referenced category does not exist.
  #[instrument(name = "service::save_producto", skip(self, producto), fields(producto_id = ?producto.id))]
  pub async fn save(&self, mut producto: Producto) -> CatalogoResult<Producto> {
    let categoria = match producto.categoria.id.as_deref() {
      Some(id) => self.categorias.find_by_id(id).await?,
      None => None,
    };
    let Some(categoria) = categoria else {
      warn!(categoria_id = ?producto.categoria.id, "Refusing to save product with unresolvable category.");
      return Err(CatalogoError::field("categoria", "no existe"));
    };
    producto.categoria = categoria;
    self.save_resolved(producto).await
  }

  /// Persists `producto` with its embedded category as is.
  ///
  /// For callers that already hold the stored category, or that leave the
  /// category untouched (a photo change keeps even a dangling one).
  pub async fn save_resolved(&self, producto: Producto) -> CatalogoResult<Producto> {
    let saved = self.productos.save(producto).await?;
    info!(
      producto_id = saved.id.as_deref().unwrap_or_default(),
      categoria = %saved.categoria.nombre,
      "Producto saved."
    );
    Ok(saved)
  }

  /// `true` when the product existed and is gone now.
  pub async fn delete(&self, producto: &Producto) -> CatalogoResult<bool> {
    let deleted = self.productos.delete(producto).await?;
    if deleted {
      info!(producto_id = producto.id.as_deref().unwrap_or_default(), "Producto deleted.");
    }
    Ok(deleted)
  }

  // --- Categorias ---

  pub async fn list_categories(&self) -> CatalogoResult<Vec<Categoria>> {
    self.categorias.find_all().await
  }

  pub async fn get_category_by_id(&self, id: &str) -> CatalogoResult<Option<Categoria>> {
    self.categorias.find_by_id(id).await
  }

  pub async fn save_category(&self, categoria: Categoria) -> CatalogoResult<Categoria> {
    if categoria.nombre.trim().is_empty() {
      return Err(CatalogoError::field("nombre", "no puede estar vacío"));
    }
    let saved = self.categorias.save(categoria).await?;
    info!(categoria_id = saved.id.as_deref().unwrap_or_default(), nombre = %saved.nombre, "Categoria saved.");
    Ok(saved)
  }

  /// Products still pointing at the category keep their embedded copy.
  pub async fn delete_category(&self, categoria: &Categoria) -> CatalogoResult<bool> {
    self.categorias.delete(categoria).await
  }

  /// Drops both collections. Only the startup seeding calls this.
  pub async fn clear_all(&self) -> CatalogoResult<()> {
    self.productos.drop_all().await?;
    self.categorias.drop_all().await?;
    warn!(backend = self.backend, "Dropped productos and categorias collections.");
    Ok(())
  }
}

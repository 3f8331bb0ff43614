// catalogo/src/store/mod.rs

//! The storage port: JSON documents keyed by `(collection, id)`.
//!
//! `DocumentStore` is what a backend implements (in-memory here, Postgres in
//! the server crate). `Collection<D>` is the typed view the service uses.

pub mod memory;

use crate::error::{CatalogoError, CatalogoResult};
use async_trait::async_trait;
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;
use std::marker::PhantomData;
use std::sync::Arc;
use uuid::Uuid;

pub use memory::MemoryDocumentStore;

#[async_trait]
pub trait DocumentStore: Send + Sync {
  async fn get(&self, collection: &str, id: &str) -> CatalogoResult<Option<Value>>;

  /// Inserts or replaces the document stored under `id`.
  async fn put(&self, collection: &str, id: &str, body: Value) -> CatalogoResult<()>;

  /// Returns `false` when nothing was stored under `id`.
  async fn delete(&self, collection: &str, id: &str) -> CatalogoResult<bool>;

  /// Every document of the collection, in the backend's own order.
  async fn scan_all(&self, collection: &str) -> CatalogoResult<Vec<Value>>;

  async fn drop_collection(&self, collection: &str) -> CatalogoResult<()>;

  /// Short backend name for logs.
  fn backend_name(&self) -> &'static str;
}

/// A type that lives in one collection and carries its own optional id.
pub trait Document: Serialize + DeserializeOwned + Clone + Send + Sync + 'static {
  const COLLECTION: &'static str;
  /// Human name used in not-found messages.
  const KIND: &'static str;

  fn id(&self) -> Option<&str>;
  fn set_id(&mut self, id: String);
}

/// Typed repository over one collection of a shared store.
pub struct Collection<D: Document> {
  store: Arc<dyn DocumentStore>,
  _doc: PhantomData<fn() -> D>,
}

impl<D: Document> Clone for Collection<D> {
  fn clone(&self) -> Self {
    Self {
      store: Arc::clone(&self.store),
      _doc: PhantomData,
    }
  }
}

impl<D: Document> Collection<D> {
  pub fn new(store: Arc<dyn DocumentStore>) -> Self {
    Self {
      store,
      _doc: PhantomData,
    }
  }

  fn decode(body: Value) -> CatalogoResult<D> {
    serde_json::from_value(body).map_err(|source| CatalogoError::Serialization {
      collection: D::COLLECTION,
      source,
    })
  }

  pub async fn find_all(&self) -> CatalogoResult<Vec<D>> {
    self
      .store
      .scan_all(D::COLLECTION)
      .await?
      .into_iter()
      .map(Self::decode)
      .collect()
  }

  pub async fn find_by_id(&self, id: &str) -> CatalogoResult<Option<D>> {
    self.store.get(D::COLLECTION, id).await?.map(Self::decode).transpose()
  }

  /// Persists `doc`, assigning a fresh opaque id when it has none yet.
  pub async fn save(&self, mut doc: D) -> CatalogoResult<D> {
    let id = match doc.id() {
      Some(id) if !id.is_empty() => id.to_string(),
      _ => {
        let id = Uuid::new_v4().simple().to_string();
        doc.set_id(id.clone());
        id
      }
    };
    let body = serde_json::to_value(&doc).map_err(|source| CatalogoError::Serialization {
      collection: D::COLLECTION,
      source,
    })?;
    self.store.put(D::COLLECTION, &id, body).await?;
    Ok(doc)
  }

  pub async fn delete(&self, doc: &D) -> CatalogoResult<bool> {
    match doc.id() {
      Some(id) => self.store.delete(D::COLLECTION, id).await,
      None => Ok(false),
    }
  }

  pub async fn drop_all(&self) -> CatalogoResult<()> {
    self.store.drop_collection(D::COLLECTION).await
  }
}

// catalogo/src/store/memory.rs

use super::DocumentStore;
use crate::error::CatalogoResult;
use async_trait::async_trait;
use parking_lot::RwLock;
use serde_json::Value;
use std::collections::HashMap;

#[derive(Debug)]
struct StoredDoc {
  seq: u64,
  body: Value,
}

#[derive(Debug, Default)]
struct Inner {
  collections: HashMap<String, HashMap<String, StoredDoc>>,
  next_seq: u64,
}

/// Process-local document store. Scans return documents in first-insertion order.
#[derive(Debug, Default)]
pub struct MemoryDocumentStore {
  inner: RwLock<Inner>,
}

impl MemoryDocumentStore {
  pub fn new() -> Self {
    Self::default()
  }

  pub fn len(&self, collection: &str) -> usize {
    self.inner.read().collections.get(collection).map_or(0, HashMap::len)
  }

  pub fn is_empty(&self, collection: &str) -> bool {
    self.len(collection) == 0
  }
}

// Every method finishes its work under the lock without awaiting.
#[async_trait]
impl DocumentStore for MemoryDocumentStore {
  async fn get(&self, collection: &str, id: &str) -> CatalogoResult<Option<Value>> {
    let inner = self.inner.read();
    Ok(
      inner
        .collections
        .get(collection)
        .and_then(|docs| docs.get(id))
        .map(|doc| doc.body.clone()),
    )
  }

  async fn put(&self, collection: &str, id: &str, body: Value) -> CatalogoResult<()> {
    let mut guard = self.inner.write();
    let Inner { collections, next_seq } = &mut *guard;
    let docs = collections.entry(collection.to_string()).or_default();
    if let Some(existing) = docs.get_mut(id) {
      existing.body = body;
    } else {
      docs.insert(id.to_string(), StoredDoc { seq: *next_seq, body });
      *next_seq += 1;
    }
    Ok(())
  }

  async fn delete(&self, collection: &str, id: &str) -> CatalogoResult<bool> {
    let mut inner = self.inner.write();
    Ok(
      inner
        .collections
        .get_mut(collection)
        .map_or(false, |docs| docs.remove(id).is_some()),
    )
  }

  async fn scan_all(&self, collection: &str) -> CatalogoResult<Vec<Value>> {
    let inner = self.inner.read();
    let Some(docs) = inner.collections.get(collection) else {
      return Ok(Vec::new());
    };
    let mut ordered: Vec<&StoredDoc> = docs.values().collect();
    ordered.sort_by_key(|doc| doc.seq);
    Ok(ordered.into_iter().map(|doc| doc.body.clone()).collect())
  }

  async fn drop_collection(&self, collection: &str) -> CatalogoResult<()> {
    self.inner.write().collections.remove(collection);
    Ok(())
  }

  fn backend_name(&self) -> &'static str {
    "memory"
  }
}

// catalogo/src/pipeline/context_data.rs
use parking_lot::{RwLock, RwLockReadGuard, RwLockWriteGuard};
use std::sync::Arc;

/// Shared, lockable request state handed to every step handler.
///
/// Guards are blocking and MUST be dropped before any `.await` point:
/// copy what the step needs out of the guard, await, then write back.
#[derive(Debug)]
pub struct ContextData<T: Send + Sync + 'static>(Arc<RwLock<T>>);

impl<T: Send + Sync + 'static> ContextData<T> {
  pub fn new(data: T) -> Self {
    ContextData(Arc::new(RwLock::new(data)))
  }

  pub fn read(&self) -> RwLockReadGuard<'_, T> {
    self.0.read()
  }

  pub fn write(&self) -> RwLockWriteGuard<'_, T> {
    self.0.write()
  }

  /// Takes the data back out once the pipeline is done with it.
  /// Falls back to a clone while other handles are still alive.
  pub fn into_inner(self) -> T
  where
    T: Clone,
  {
    match Arc::try_unwrap(self.0) {
      Ok(lock) => lock.into_inner(),
      Err(shared) => shared.read().clone(),
    }
  }
}

impl<T: Send + Sync + 'static> Clone for ContextData<T> {
  fn clone(&self) -> Self {
    ContextData(Arc::clone(&self.0))
  }
}

impl<T: Send + Sync + 'static + Default> Default for ContextData<T> {
  fn default() -> Self {
    Self::new(Default::default())
  }
}

// catalogo/src/pipeline/step.rs
use super::context_data::ContextData;
use super::control::PipelineControl;
use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;

/// Evaluated before a step runs; `true` skips the step.
pub type SkipCondition<TData> = Arc<dyn Fn(&ContextData<TData>) -> bool + Send + Sync + 'static>;

/// A boxed async step handler. It receives its own clone of the context handle.
pub type Handler<TData, Err> = Box<
  dyn Fn(ContextData<TData>) -> Pin<Box<dyn Future<Output = Result<PipelineControl, Err>> + Send>> + Send + Sync,
>;

#[derive(Clone)]
pub struct StepDef<TData: 'static + Send + Sync> {
  pub name: String,
  /// An optional step without handlers is skipped instead of failing the run.
  pub optional: bool,
  pub skip_if: Option<SkipCondition<TData>>,
}

impl<TData: 'static + Send + Sync> std::fmt::Debug for StepDef<TData> {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    f.debug_struct("StepDef")
      .field("name", &self.name)
      .field("optional", &self.optional)
      .field("skip_if_present", &self.skip_if.is_some())
      .finish()
  }
}

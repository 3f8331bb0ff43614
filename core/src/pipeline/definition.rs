// catalogo/src/pipeline/definition.rs

//! `Pipeline<TData, Err>`: construction and handler registration.

use super::context_data::ContextData;
use super::control::PipelineControl;
use super::step::{Handler, SkipCondition, StepDef};
use crate::error::PipelineError;
use std::collections::HashMap;
use std::future::Future;

/// An ordered list of named steps, each with zero or more async handlers.
///
/// `Err` is what handlers fail with; it must absorb `PipelineError` so a
/// misconfigured run surfaces through the same channel.
pub struct Pipeline<TData, Err>
where
  TData: 'static + Send + Sync,
  Err: std::error::Error + From<PipelineError> + Send + Sync + 'static,
{
  pub(crate) name: String,
  pub(crate) steps: Vec<StepDef<TData>>,
  pub(crate) on: HashMap<String, Vec<Handler<TData, Err>>>,
}

impl<TData, Err> Pipeline<TData, Err>
where
  TData: 'static + Send + Sync,
  Err: std::error::Error + From<PipelineError> + Send + Sync + 'static,
{
  /// `step_defs` is `(name, optional, skip_if)` in execution order.
  pub fn new(name: impl Into<String>, step_defs: &[(&str, bool, Option<SkipCondition<TData>>)]) -> Self {
    let steps = step_defs
      .iter()
      .map(|(step_name, optional, skip_if)| StepDef {
        name: (*step_name).to_string(),
        optional: *optional,
        skip_if: skip_if.clone(),
      })
      .collect();

    Self {
      name: name.into(),
      steps,
      on: HashMap::new(),
    }
  }

  pub fn name(&self) -> &str {
    &self.name
  }

  pub fn step_names(&self) -> Vec<&str> {
    self.steps.iter().map(|s| s.name.as_str()).collect()
  }

  fn ensure_step(&self, step_name: &str) -> Result<(), PipelineError> {
    if self.steps.iter().any(|s| s.name == step_name) {
      Ok(())
    } else {
      Err(PipelineError::StepNotFound {
        step_name: step_name.to_string(),
      })
    }
  }

  /// Registers a handler for `step_name`. Handlers of one step run in registration order.
  ///
  /// The handler may fail with any error convertible into the pipeline's `Err`.
  pub fn on_step<F, UserErr>(
    &mut self,
    step_name: &str,
    handler_fn: impl Fn(ContextData<TData>) -> F + Send + Sync + 'static,
  ) -> Result<&mut Self, PipelineError>
  where
    F: Future<Output = Result<PipelineControl, UserErr>> + Send + 'static,
    UserErr: Into<Err> + Send + Sync + 'static,
  {
    self.ensure_step(step_name)?;
    let handler: Handler<TData, Err> = Box::new(move |ctx_data| {
      let user_fut = handler_fn(ctx_data);
      Box::pin(async move { user_fut.await.map_err(Into::into) })
    });
    self.on.entry(step_name.to_string()).or_default().push(handler);
    Ok(self)
  }
}

// catalogo/src/pipeline/execution.rs

//! `Pipeline::run()`: walks the steps in order against one shared context.

use super::context_data::ContextData;
use super::control::{PipelineControl, PipelineResult};
use super::definition::Pipeline;
use crate::error::PipelineError;
use tracing::{event, instrument, span, Instrument, Level};

impl<TData, Err> Pipeline<TData, Err>
where
  TData: 'static + Send + Sync,
  Err: std::error::Error + From<PipelineError> + Send + Sync + 'static,
{
  /// Runs every step against `ctx_data`.
  ///
  /// A step is skipped when its `skip_if` holds, or when it is optional and has
  /// no handlers. A non-optional step without handlers fails the run with
  /// `PipelineError::HandlerMissing`. The first handler error aborts the run.
  #[instrument(
    name = "Pipeline::run",
    skip_all,
    fields(pipeline = %self.name, num_steps = self.steps.len()),
    err(Display)
  )]
  pub async fn run(&self, ctx_data: ContextData<TData>) -> Result<PipelineResult, Err> {
    event!(Level::DEBUG, "Pipeline execution starting.");

    for (step_idx, step_def) in self.steps.iter().enumerate() {
      let step_name = step_def.name.as_str();

      if let Some(skip_cond) = &step_def.skip_if {
        if skip_cond(&ctx_data) {
          event!(Level::DEBUG, step = step_name, "Step skipped by its skip_if condition.");
          continue;
        }
      }

      let handlers = match self.on.get(step_name) {
        Some(handlers) if !handlers.is_empty() => handlers,
        _ if step_def.optional => {
          event!(Level::DEBUG, step = step_name, "Optional step has no handlers, skipping.");
          continue;
        }
        _ => {
          event!(Level::ERROR, step = step_name, "Non-optional step has no handlers.");
          return Err(Err::from(PipelineError::HandlerMissing {
            step_name: step_def.name.clone(),
          }));
        }
      };

      let step_span = span!(Level::INFO, "pipeline_step", step_name, step_index = step_idx);
      for handler_fn in handlers {
        match handler_fn(ctx_data.clone()).instrument(step_span.clone()).await {
          Ok(PipelineControl::Continue) => {}
          Ok(PipelineControl::Stop) => {
            event!(Level::INFO, step = step_name, "Pipeline stopped by a handler.");
            return Ok(PipelineResult::Stopped);
          }
          Err(e) => {
            event!(Level::WARN, step = step_name, error = %e, "Step handler failed.");
            return Err(e);
          }
        }
      }
    }

    event!(Level::DEBUG, "Pipeline execution completed.");
    Ok(PipelineResult::Completed)
  }
}

// tests/pipeline_tests.rs
mod common;

use catalogo::{ContextData, Pipeline, PipelineControl, PipelineError, PipelineResult, SkipCondition};
use common::*;
use serial_test::serial;
use std::sync::Arc;

#[tokio::test]
#[serial]
async fn test_pipeline_runs_steps_in_order() {
  setup_tracing();
  let mut pipeline = Pipeline::<TestContext, TestError>::new(
    "ordered",
    &[("step1", false, None), ("step2", false, None), ("step3", false, None)],
  );
  pipeline
    .on_step("step1", recording_handler("step1"))
    .unwrap()
    .on_step("step2", recording_handler("step2"))
    .unwrap()
    .on_step("step3", recording_handler("step3"))
    .unwrap();

  let ctx = ContextData::new(TestContext::default());
  assert_eq!(pipeline.run(ctx.clone()).await.unwrap(), PipelineResult::Completed);

  let guard = ctx.read();
  assert_eq!(guard.counter, 3);
  assert_eq!(guard.steps_executed, vec!["step1", "step2", "step3"]);
}

#[tokio::test]
#[serial]
async fn test_pipeline_stop_halts_remaining_steps() {
  setup_tracing();
  let mut pipeline = Pipeline::<TestContext, TestError>::new(
    "stopping",
    &[("a", false, None), ("b", false, None), ("c", false, None)],
  );
  for step in ["a", "b", "c"] {
    pipeline.on_step(step, recording_handler(step)).unwrap();
  }

  let ctx = ContextData::new(TestContext {
    should_stop_at: Some("b".into()),
    ..Default::default()
  });
  assert_eq!(pipeline.run(ctx.clone()).await.unwrap(), PipelineResult::Stopped);
  assert_eq!(ctx.read().steps_executed, vec!["a", "b"]);
}

#[tokio::test]
#[serial]
async fn test_pipeline_propagates_handler_error() {
  setup_tracing();
  let mut pipeline = Pipeline::<TestContext, TestError>::new(
    "failing",
    &[("good", false, None), ("bad", false, None), ("never", false, None)],
  );
  pipeline.on_step("good", recording_handler("good")).unwrap();
  pipeline.on_step("bad", failing_handler("bad", "boom")).unwrap();
  pipeline.on_step("never", recording_handler("never")).unwrap();

  let ctx = ContextData::new(TestContext::default());
  let err = pipeline.run(ctx.clone()).await.unwrap_err();
  assert_eq!(err, TestError::Handler("boom".into()));
  assert_eq!(ctx.read().steps_executed, vec!["good", "bad"]);
}

#[tokio::test]
async fn test_skip_condition_and_optional_steps() {
  let skip_always: SkipCondition<TestContext> = Arc::new(|_ctx| true);
  let mut pipeline = Pipeline::<TestContext, TestError>::new(
    "skipping",
    &[("skipped", false, Some(skip_always)), ("optional_empty", true, None), ("runs", false, None)],
  );
  pipeline.on_step("skipped", recording_handler("skipped")).unwrap();
  pipeline.on_step("runs", recording_handler("runs")).unwrap();

  let ctx = ContextData::new(TestContext::default());
  assert_eq!(pipeline.run(ctx.clone()).await.unwrap(), PipelineResult::Completed);
  assert_eq!(ctx.read().steps_executed, vec!["runs"]);
}

#[tokio::test]
async fn test_missing_handler_on_required_step_fails() {
  let pipeline = Pipeline::<TestContext, TestError>::new("incomplete", &[("required", false, None)]);
  let err = pipeline.run(ContextData::default()).await.unwrap_err();
  assert_eq!(
    err,
    TestError::Pipeline(PipelineError::HandlerMissing {
      step_name: "required".into()
    })
  );
}

#[tokio::test]
async fn test_registering_on_unknown_step_is_rejected() {
  let mut pipeline = Pipeline::<TestContext, TestError>::new("p", &[("only", false, None)]);
  let err = pipeline.on_step("typo", recording_handler("typo")).err();
  assert_eq!(
    err,
    Some(PipelineError::StepNotFound {
      step_name: "typo".into()
    })
  );
  assert_eq!(pipeline.step_names(), vec!["only"]);
}

#[tokio::test]
async fn test_context_into_inner_returns_final_state() {
  let mut pipeline = Pipeline::<TestContext, TestError>::new("p", &[("one", false, None)]);
  pipeline.on_step("one", recording_handler("one")).unwrap();

  let ctx = ContextData::new(TestContext::default());
  pipeline.run(ctx.clone()).await.unwrap();
  let data = ctx.into_inner();
  assert_eq!(data.counter, 1);
}

#[tokio::test]
#[serial]
async fn test_context_clones_share_state_across_awaits() {
  setup_tracing();
  let mut pipeline = Pipeline::<TestContext, TestError>::new(
    "shared_context",
    &[("write_then_sleep", false, None), ("read_back", false, None)],
  );
  pipeline
    .on_step("write_then_sleep", |ctx: ContextData<TestContext>| async move {
      {
        ctx.write().counter = 10;
      }
      tokio::time::sleep(std::time::Duration::from_millis(1)).await;
      ctx.write().steps_executed.push("write_then_sleep".to_string());
      Ok::<_, TestError>(PipelineControl::Continue)
    })
    .unwrap();
  pipeline
    .on_step("read_back", |ctx: ContextData<TestContext>| async move {
      let mut guard = ctx.write();
      assert_eq!(guard.counter, 10);
      guard.counter += 5;
      Ok::<_, TestError>(PipelineControl::Continue)
    })
    .unwrap();

  let ctx = ContextData::new(TestContext::default());
  let observer = ctx.clone();
  pipeline.run(ctx).await.unwrap();

  let guard = observer.read();
  assert_eq!(guard.counter, 15);
  assert_eq!(guard.steps_executed, vec!["write_then_sleep".to_string()]);
}

//! Orchestrator transitions, history, and the image stale-response guard.

mod common;

use std::sync::Arc;
use std::time::Duration;

use civic_core::enums::AppState;
use civic_core::request::AnalysisRequest;
use civic_gemini::AnalysisError;
use civic_session::{AnalysisOrchestrator, InputForm, SessionError};
use pretty_assertions::assert_eq;
use rstest::rstest;

use common::{ScriptedService, analysis, image, settle};

fn setup() -> (Arc<ScriptedService>, AnalysisOrchestrator<ScriptedService>) {
    let service = Arc::new(ScriptedService::new());
    let orchestrator = AnalysisOrchestrator::new(Arc::clone(&service));
    (service, orchestrator)
}

fn request(text: &str) -> AnalysisRequest {
    AnalysisRequest::new(text, None, None).unwrap()
}

// ---------------------------------------------------------------------------
// Submission
// ---------------------------------------------------------------------------

#[rstest]
#[case("")]
#[case("   ")]
#[tokio::test]
async fn blank_policy_never_reaches_capability(#[case] text: &str) {
    let (service, mut orchestrator) = setup();
    let err = orchestrator
        .submit_form(&InputForm::new(text))
        .await
        .unwrap_err();

    assert!(err.is_rejected());
    assert_eq!(service.analyze_calls(), 0);
    assert_eq!(orchestrator.phase(), AppState::Idle);
}

#[tokio::test]
async fn portland_scenario_runs_idle_analyzing_results() {
    let (service, mut orchestrator) = setup();
    service.push(Ok(analysis("Portland Plastic Bag Ban")));
    let gate = service.gate_analysis();
    let mut rx = orchestrator.subscribe();
    assert_eq!(rx.borrow().phase, AppState::Idle);

    let mut form = InputForm::new("Ban plastic bags citywide");
    form.geography = "Portland".into();

    let (result, ()) = tokio::join!(orchestrator.submit_form(&form), async move {
        rx.wait_for(|view| view.phase == AppState::Analyzing)
            .await
            .unwrap();
        gate.send(()).unwrap();
    });

    let result = result.unwrap();
    let view = orchestrator.snapshot();
    assert_eq!(view.phase, AppState::Results);
    assert_eq!(view.error, None);
    assert_eq!(
        view.store.current().map(|c| c.title.as_str()),
        Some("Portland Plastic Bag Ban")
    );
    assert_eq!(view.store.history().len(), 1);
    assert_eq!(view.store.history()[0].id, result.id);
}

#[tokio::test]
async fn each_success_is_prepended_with_a_distinct_id() {
    let (service, mut orchestrator) = setup();
    let mut seen = Vec::new();

    for title in ["First", "Second", "Third"] {
        service.push(Ok(analysis(title)));
        let before = orchestrator.snapshot().store.history().len();

        let result = orchestrator.submit(request(title)).await.unwrap();
        let view = orchestrator.snapshot();
        assert_eq!(view.store.history().len(), before + 1);
        assert_eq!(view.store.history()[0].id, result.id);
        assert!(!seen.contains(&result.id));
        seen.push(result.id.clone());

        orchestrator.reset().unwrap();
    }

    let titles: Vec<String> = orchestrator
        .snapshot()
        .store
        .history()
        .iter()
        .map(|h| h.title.clone())
        .collect();
    assert_eq!(titles, vec!["Third", "Second", "First"]);
}

#[tokio::test]
async fn failure_moves_to_error_without_storing() {
    let (service, mut orchestrator) = setup();
    service.push(Ok(analysis("Kept")));
    orchestrator.submit(request("first")).await.unwrap();
    orchestrator.reset().unwrap();

    service.push(Err(AnalysisError::Upstream("model returned no text".into())));
    let err = orchestrator.submit(request("second")).await.unwrap_err();
    assert!(matches!(err, SessionError::Analysis(AnalysisError::Upstream(_))));

    let view = orchestrator.snapshot();
    assert_eq!(view.phase, AppState::Error);
    assert!(view.error.as_deref().unwrap().contains("model returned no text"));
    assert_eq!(view.store.current(), None);
    assert_eq!(view.store.history().len(), 1);

    orchestrator.reset().unwrap();
    let view = orchestrator.snapshot();
    assert_eq!(view.phase, AppState::Idle);
    assert_eq!(view.error, None);
    assert_eq!(view.store.history().len(), 1);
}

#[tokio::test]
async fn configuration_error_is_reported_as_such() {
    let (service, mut orchestrator) = setup();
    service.push(Err(AnalysisError::Configuration("no API key".into())));
    let err = orchestrator.submit(request("x")).await.unwrap_err();
    assert!(matches!(err, SessionError::Analysis(ref e) if e.is_configuration()));
    assert_eq!(orchestrator.phase(), AppState::Error);
}

#[tokio::test]
async fn submit_outside_idle_is_rejected() {
    let (service, mut orchestrator) = setup();
    service.push(Ok(analysis("Only")));
    orchestrator.submit(request("x")).await.unwrap();

    let err = orchestrator.submit(request("y")).await.unwrap_err();
    assert!(err.is_rejected());
    assert_eq!(service.analyze_calls(), 1);
    assert_eq!(orchestrator.phase(), AppState::Results);
}

#[tokio::test]
async fn abandoned_submission_returns_to_idle() {
    let (service, mut orchestrator) = setup();
    let _held = service.gate_analysis();
    service.push(Ok(analysis("Slow")));

    let outcome =
        tokio::time::timeout(Duration::from_millis(10), orchestrator.submit(request("slow"))).await;
    assert!(outcome.is_err());
    assert_eq!(orchestrator.phase(), AppState::Idle);
    assert_eq!(orchestrator.snapshot().store.current(), None);

    orchestrator.show_about().unwrap();
    assert_eq!(orchestrator.close_about().unwrap(), AppState::Idle);

    let retried = orchestrator.submit(request("again")).await.unwrap();
    assert_eq!(retried.title, "Slow");
    assert_eq!(orchestrator.phase(), AppState::Results);
}

// ---------------------------------------------------------------------------
// History and navigation
// ---------------------------------------------------------------------------

#[tokio::test]
async fn select_unknown_history_changes_nothing() {
    let (service, mut orchestrator) = setup();
    service.push(Ok(analysis("A")));
    orchestrator.submit(request("a")).await.unwrap();
    let before = orchestrator.snapshot();

    let err = orchestrator.select_history("missing").unwrap_err();
    assert!(err.is_rejected());
    assert_eq!(orchestrator.snapshot(), before);
}

#[tokio::test]
async fn select_history_clears_image() {
    let (service, mut orchestrator) = setup();
    let a = analysis("A");
    let a_id = a.id.clone();
    service.push(Ok(a));
    let release = service.gate_image("prompt for A");

    orchestrator.submit(request("a")).await.unwrap();
    release.send(Some(image("a-image"))).unwrap();
    assert_eq!(orchestrator.wait_for_image().await, Some(image("a-image")));

    let selected = orchestrator.select_history(&a_id).unwrap();
    let view = orchestrator.snapshot();
    assert_eq!(selected.id, a_id);
    assert_eq!(view.store.current_id(), Some(a_id.as_str()));
    assert_eq!(view.store.generated_image(), None);
    assert_eq!(view.store.history().len(), 1);
}

#[tokio::test]
async fn select_history_from_idle_and_error() {
    let (service, mut orchestrator) = setup();
    let a = analysis("A");
    let a_id = a.id.clone();
    service.push(Ok(a));
    orchestrator.submit(request("a")).await.unwrap();
    orchestrator.reset().unwrap();

    orchestrator.select_history(&a_id).unwrap();
    assert_eq!(orchestrator.phase(), AppState::Results);

    orchestrator.reset().unwrap();
    service.push(Err(AnalysisError::Upstream("boom".into())));
    let _ = orchestrator.submit(request("b")).await;
    assert_eq!(orchestrator.phase(), AppState::Error);

    orchestrator.select_history(&a_id).unwrap();
    let view = orchestrator.snapshot();
    assert_eq!(view.phase, AppState::Results);
    assert_eq!(view.error, None);
}

#[tokio::test]
async fn about_leaves_the_store_alone() {
    let (service, mut orchestrator) = setup();
    orchestrator.show_about().unwrap();
    assert_eq!(orchestrator.phase(), AppState::About);
    assert_eq!(orchestrator.close_about().unwrap(), AppState::Idle);

    service.push(Ok(analysis("A")));
    orchestrator.submit(request("a")).await.unwrap();
    let store = orchestrator.snapshot().store;

    orchestrator.show_about().unwrap();
    assert!(orchestrator.show_about().is_err());
    assert_eq!(orchestrator.snapshot().store, store);
    assert_eq!(orchestrator.close_about().unwrap(), AppState::Results);
    assert_eq!(orchestrator.snapshot().store, store);
}

#[tokio::test]
async fn reset_from_idle_is_rejected() {
    let (_service, mut orchestrator) = setup();
    assert!(orchestrator.reset().unwrap_err().is_rejected());
}

// ---------------------------------------------------------------------------
// Background image
// ---------------------------------------------------------------------------

#[tokio::test]
async fn results_are_published_before_the_image_arrives() {
    let (service, mut orchestrator) = setup();
    service.push(Ok(analysis("A")));
    let release = service.gate_image("prompt for A");

    orchestrator.submit(request("a")).await.unwrap();
    assert_eq!(orchestrator.phase(), AppState::Results);
    assert_eq!(orchestrator.snapshot().store.generated_image(), None);
    assert!(orchestrator.image_pending());

    release.send(Some(image("late"))).unwrap();
    assert_eq!(orchestrator.wait_for_image().await, Some(image("late")));
}

#[tokio::test]
async fn stale_image_never_reaches_newer_run() {
    let (service, mut orchestrator) = setup();
    service.push(Ok(analysis("A")));
    service.push(Ok(analysis("B")));
    let release_a = service.gate_image("prompt for A");
    let release_b = service.gate_image("prompt for B");

    orchestrator.submit(request("a")).await.unwrap();
    orchestrator.reset().unwrap();
    let b = orchestrator.submit(request("b")).await.unwrap();

    release_a.send(Some(image("a-image"))).unwrap();
    settle().await;
    let view = orchestrator.snapshot();
    assert_eq!(view.store.current_id(), Some(b.id.as_str()));
    assert_eq!(view.store.generated_image(), None);

    release_b.send(Some(image("b-image"))).unwrap();
    assert_eq!(orchestrator.wait_for_image().await, Some(image("b-image")));
}

#[tokio::test]
async fn image_in_flight_is_dropped_after_selecting_another_entry() {
    let (service, mut orchestrator) = setup();
    service.push(Ok(analysis("B")));
    service.push(Ok(analysis("A")));
    service.gate_image("prompt for B").send(None).unwrap();
    let release_a = service.gate_image("prompt for A");

    let b = orchestrator.submit(request("b")).await.unwrap();
    assert_eq!(orchestrator.wait_for_image().await, None);
    orchestrator.reset().unwrap();
    let a = orchestrator.submit(request("a")).await.unwrap();
    assert!(orchestrator.image_pending());

    orchestrator.select_history(&b.id).unwrap();
    release_a.send(Some(image("a-image"))).unwrap();

    assert_eq!(orchestrator.wait_for_image().await, None);
    let view = orchestrator.snapshot();
    assert_eq!(view.store.current_id(), Some(b.id.as_str()));
    assert_eq!(view.store.generated_image(), None);

    orchestrator.select_history(&a.id).unwrap();
    assert_eq!(orchestrator.snapshot().store.generated_image(), None);
}

#[tokio::test]
async fn image_after_reset_is_discarded() {
    let (service, mut orchestrator) = setup();
    service.push(Ok(analysis("A")));
    let release = service.gate_image("prompt for A");

    orchestrator.submit(request("a")).await.unwrap();
    orchestrator.reset().unwrap();
    release.send(Some(image("a-image"))).unwrap();

    assert_eq!(orchestrator.wait_for_image().await, None);
    assert_eq!(orchestrator.snapshot().store.generated_image(), None);
}

#[tokio::test]
async fn failed_image_leaves_results_usable() {
    let (service, mut orchestrator) = setup();
    service.push(Ok(analysis("A")));
    let release = service.gate_image("prompt for A");

    orchestrator.submit(request("a")).await.unwrap();
    release.send(None).unwrap();

    assert_eq!(orchestrator.wait_for_image().await, None);
    let view = orchestrator.snapshot();
    assert_eq!(view.phase, AppState::Results);
    assert_eq!(view.error, None);
}

#[tokio::test]
async fn blank_prompt_or_disabled_images_skip_the_request() {
    let (service, orchestrator) = setup();
    let mut orchestrator = orchestrator.without_images();
    service.push(Ok(analysis("A")));
    orchestrator.submit(request("a")).await.unwrap();
    assert_eq!(service.image_calls(), 0);

    let (service, mut orchestrator) = setup();
    let mut blank = analysis("B");
    blank.visualization_prompt = "   ".into();
    service.push(Ok(blank));
    orchestrator.submit(request("b")).await.unwrap();
    assert!(!orchestrator.image_pending());
    assert_eq!(service.image_calls(), 0);
}

//! The analysis state machine.
//!
//! The orchestrator is the only writer of the session's [`ResultStore`]. Its
//! state is published through a `tokio::sync::watch` channel so views can
//! observe `Analyzing` while a submission is in flight and pick up a late
//! image without polling.
//!
//! The image request is spawned after a successful commit and never awaited
//! by the transition. Its completion is applied through
//! [`ResultStore::set_image`], which drops the image unless the result that
//! asked for it is still current.

use std::sync::Arc;

use civic_core::entities::PolicyAnalysis;
use civic_core::enums::AppState;
use civic_core::errors::CoreError;
use civic_core::media::GeneratedImage;
use civic_core::request::AnalysisRequest;
use civic_gemini::AnalysisService;
use tokio::sync::watch;
use tokio::task::JoinHandle;

use crate::error::SessionError;
use crate::form::InputForm;
use crate::store::ResultStore;

/// Everything a view renders: the phase, the failure message, and the store.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionView {
    pub phase: AppState,
    /// Set only in [`AppState::Error`].
    pub error: Option<String>,
    pub store: ResultStore,
}

impl Default for SessionView {
    fn default() -> Self {
        Self {
            phase: AppState::Idle,
            error: None,
            store: ResultStore::default(),
        }
    }
}

/// Drives one analysis session over an [`AnalysisService`].
pub struct AnalysisOrchestrator<S: AnalysisService + ?Sized> {
    service: Arc<S>,
    view: Arc<watch::Sender<SessionView>>,
    image_task: Option<JoinHandle<()>>,
    generate_images: bool,
}

impl<S: AnalysisService + ?Sized + 'static> AnalysisOrchestrator<S> {
    #[must_use]
    pub fn new(service: Arc<S>) -> Self {
        let (view, _) = watch::channel(SessionView::default());
        Self {
            service,
            view: Arc::new(view),
            image_task: None,
            generate_images: true,
        }
    }

    /// Disable the background image request.
    #[must_use]
    pub fn without_images(mut self) -> Self {
        self.generate_images = false;
        self
    }

    #[must_use]
    pub fn service(&self) -> &Arc<S> {
        &self.service
    }

    /// Receive every published change of the session view.
    #[must_use]
    pub fn subscribe(&self) -> watch::Receiver<SessionView> {
        self.view.subscribe()
    }

    /// A copy of the current view.
    #[must_use]
    pub fn snapshot(&self) -> SessionView {
        self.view.borrow().clone()
    }

    #[must_use]
    pub fn phase(&self) -> AppState {
        self.view.borrow().phase
    }

    #[must_use]
    pub fn current(&self) -> Option<Arc<PolicyAnalysis>> {
        self.view.borrow().store.current().cloned()
    }

    fn guard(&self, next: AppState) -> Result<AppState, CoreError> {
        let from = self.phase();
        if from.can_transition_to(next) {
            Ok(from)
        } else {
            Err(CoreError::InvalidTransition {
                from: from.to_string(),
                to: next.to_string(),
            })
        }
    }

    // ── Transitions ────────────────────────────────────────────────

    /// Validate the form and submit it.
    ///
    /// # Errors
    ///
    /// A blank policy text is rejected with [`SessionError::Core`] before any
    /// state change or request. Otherwise see [`Self::submit`].
    pub async fn submit_form(
        &mut self,
        form: &InputForm,
    ) -> Result<Arc<PolicyAnalysis>, SessionError> {
        let request = form.to_request()?;
        self.submit(request).await
    }

    /// `Idle → Analyzing → Results | Error`.
    ///
    /// On success the result is committed and the image request is launched
    /// in the background. On failure the session moves to `Error` with a
    /// readable message and nothing is stored. Dropping the future before
    /// the analysis answers puts the session back in `Idle`.
    ///
    /// # Errors
    ///
    /// Returns [`SessionError::Core`] if the session is not `Idle` (nothing
    /// changes), or [`SessionError::Analysis`] if the analysis failed.
    pub async fn submit(
        &mut self,
        request: AnalysisRequest,
    ) -> Result<Arc<PolicyAnalysis>, SessionError> {
        self.guard(AppState::Analyzing)?;
        self.view.send_modify(|view| {
            view.phase = AppState::Analyzing;
            view.error = None;
            view.store.reset();
        });
        tracing::debug!(geography = ?request.geography(), "idle -> analyzing");

        let mut abandoned = AbandonGuard {
            view: Arc::clone(&self.view),
            armed: true,
        };
        let outcome = self.service.analyze(&request).await;
        abandoned.armed = false;

        match outcome {
            Ok(result) => {
                let result = Arc::new(result);
                self.view.send_modify(|view| {
                    view.store.commit(Arc::clone(&result));
                    view.phase = AppState::Results;
                });
                tracing::debug!(id = %result.id, "analyzing -> results");
                self.spawn_image(&result);
                Ok(result)
            }
            Err(error) => {
                tracing::error!(%error, "analysis failed");
                let message = error.to_string();
                self.view.send_modify(|view| {
                    view.phase = AppState::Error;
                    view.error = Some(message);
                });
                Err(error.into())
            }
        }
    }

    fn spawn_image(&mut self, result: &PolicyAnalysis) {
        if !self.generate_images {
            return;
        }
        let Some(prompt) = result.visualization_prompt() else {
            tracing::debug!(id = %result.id, "no visualization prompt, skipping image");
            return;
        };

        let prompt = prompt.to_string();
        let for_id = result.id.clone();
        let service = Arc::clone(&self.service);
        let view = Arc::clone(&self.view);

        // A previous task keeps running; its result is stale and will be dropped.
        self.image_task = Some(tokio::spawn(async move {
            let Some(image) = service.generate_image(&prompt).await else {
                return;
            };
            let applied = view.send_if_modified(|view| view.store.set_image(image, &for_id));
            if applied {
                tracing::debug!(id = %for_id, "image attached");
            } else {
                tracing::debug!(id = %for_id, "discarding image for a result that is no longer current");
            }
        }));
    }

    /// `Results | Error | About → Idle`. Clears the current result and
    /// image; history is kept.
    ///
    /// # Errors
    ///
    /// Returns [`SessionError::Core`] from `Idle` or `Analyzing`.
    pub fn reset(&mut self) -> Result<(), SessionError> {
        let from = self.guard(AppState::Idle)?;
        self.view.send_modify(|view| {
            view.store.reset();
            view.error = None;
            view.phase = AppState::Idle;
        });
        tracing::debug!(%from, "-> idle");
        Ok(())
    }

    /// Make a history entry current (`→ Results`). The image is cleared.
    ///
    /// # Errors
    ///
    /// Returns [`SessionError::Core`] if `id` is not in the history or the
    /// session is analyzing. The session is unchanged in both cases.
    pub fn select_history(&mut self, id: &str) -> Result<Arc<PolicyAnalysis>, SessionError> {
        self.guard(AppState::Results)?;
        let mut outcome = None;
        self.view.send_if_modified(|view| match view.store.select_history(id) {
            Ok(item) => {
                view.phase = AppState::Results;
                view.error = None;
                outcome = Some(Ok(item));
                true
            }
            Err(e) => {
                outcome = Some(Err(e));
                false
            }
        });
        let item = outcome.unwrap_or_else(|| {
            Err(CoreError::NotFound {
                entity_type: "analysis".to_string(),
                id: id.to_string(),
            })
        })?;
        tracing::debug!(id, "-> results (history)");
        Ok(item)
    }

    /// `Idle | Results | Error → About`. The store is untouched.
    ///
    /// # Errors
    ///
    /// Returns [`SessionError::Core`] while analyzing or already in `About`.
    pub fn show_about(&mut self) -> Result<(), SessionError> {
        self.guard(AppState::About)?;
        self.view.send_modify(|view| view.phase = AppState::About);
        Ok(())
    }

    /// Leave `About` for `Results` if a result is current, otherwise `Idle`.
    ///
    /// # Errors
    ///
    /// Returns [`SessionError::Core`] if the session is not in `About`.
    pub fn close_about(&mut self) -> Result<AppState, SessionError> {
        if self.phase() != AppState::About {
            return Err(CoreError::InvalidTransition {
                from: self.phase().to_string(),
                to: "previous view".to_string(),
            }
            .into());
        }
        let mut next = AppState::Idle;
        self.view.send_modify(|view| {
            next = if view.store.current().is_some() {
                AppState::Results
            } else {
                AppState::Idle
            };
            view.phase = next;
        });
        Ok(next)
    }

    // ── Background image ───────────────────────────────────────────

    /// Whether an image request launched by this session is still running.
    #[must_use]
    pub fn image_pending(&self) -> bool {
        self.image_task
            .as_ref()
            .is_some_and(|task| !task.is_finished())
    }

    /// Wait for the most recent image request to finish and return the
    /// image now attached to the current result, if any.
    pub async fn wait_for_image(&mut self) -> Option<GeneratedImage> {
        if let Some(task) = self.image_task.take() {
            if let Err(e) = task.await {
                tracing::warn!(%e, "image task did not complete");
            }
        }
        self.view.borrow().store.generated_image().cloned()
    }
}

/// Returns the session to `Idle` when a submission future is dropped
/// before the analysis answers, e.g. under `tokio::time::timeout`.
struct AbandonGuard {
    view: Arc<watch::Sender<SessionView>>,
    armed: bool,
}

impl Drop for AbandonGuard {
    fn drop(&mut self) {
        if !self.armed {
            return;
        }
        let restored = self.view.send_if_modified(|view| {
            if view.phase == AppState::Analyzing {
                view.phase = AppState::Idle;
                true
            } else {
                false
            }
        });
        if restored {
            tracing::debug!("submission abandoned, analyzing -> idle");
        }
    }
}

impl<S: AnalysisService + ?Sized> Drop for AnalysisOrchestrator<S> {
    fn drop(&mut self) {
        if let Some(task) = self.image_task.take() {
            task.abort();
        }
    }
}

//! The session's result store.
//!
//! Mutations are `pub(crate)`: only the orchestrator writes. Views get the
//! store through a [`crate::SessionView`] snapshot and can only read it.

use std::sync::Arc;

use civic_core::entities::PolicyAnalysis;
use civic_core::errors::CoreError;
use civic_core::media::GeneratedImage;

/// Analysis history, the current selection, and the current image.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ResultStore {
    /// Most recent first.
    history: Vec<Arc<PolicyAnalysis>>,
    current: Option<Arc<PolicyAnalysis>>,
    image: Option<GeneratedImage>,
}

impl ResultStore {
    // ── Writes (orchestrator only) ─────────────────────────────────

    /// Prepend `result` to the history and make it current.
    pub(crate) fn commit(&mut self, result: Arc<PolicyAnalysis>) {
        self.history.insert(0, Arc::clone(&result));
        self.current = Some(result);
        self.image = None;
    }

    /// Attach an image to the current result.
    ///
    /// Applied only if `for_id` is still the current result's id. Returns
    /// whether the image was applied; a stale image is dropped.
    pub(crate) fn set_image(&mut self, image: GeneratedImage, for_id: &str) -> bool {
        if self.current_id() != Some(for_id) {
            return false;
        }
        self.image = Some(image);
        true
    }

    /// Make a history entry current. The image is cleared, not restored.
    ///
    /// An unknown id is rejected and leaves the store unchanged.
    pub(crate) fn select_history(&mut self, id: &str) -> Result<Arc<PolicyAnalysis>, CoreError> {
        let item = self.get(id).cloned().ok_or_else(|| CoreError::NotFound {
            entity_type: "analysis".to_string(),
            id: id.to_string(),
        })?;
        self.current = Some(Arc::clone(&item));
        self.image = None;
        Ok(item)
    }

    /// Clear the current result and image. History is kept.
    pub(crate) fn reset(&mut self) {
        self.current = None;
        self.image = None;
    }

    // ── Reads ──────────────────────────────────────────────────────

    #[must_use]
    pub fn history(&self) -> &[Arc<PolicyAnalysis>] {
        &self.history
    }

    #[must_use]
    pub const fn current(&self) -> Option<&Arc<PolicyAnalysis>> {
        self.current.as_ref()
    }

    #[must_use]
    pub fn current_id(&self) -> Option<&str> {
        self.current.as_ref().map(|c| c.id.as_str())
    }

    #[must_use]
    pub const fn generated_image(&self) -> Option<&GeneratedImage> {
        self.image.as_ref()
    }

    /// Look up a history entry by id.
    #[must_use]
    pub fn get(&self, id: &str) -> Option<&Arc<PolicyAnalysis>> {
        self.history.iter().find(|item| item.id == id)
    }
}

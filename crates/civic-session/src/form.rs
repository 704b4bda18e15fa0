//! The editable input of the `Idle` state.

use std::path::Path;

use civic_core::encoder::EvidenceDraft;
use civic_core::errors::CoreError;
use civic_core::request::AnalysisRequest;

/// Policy text, geography, and an optional evidence draft, as typed so far.
///
/// Nothing here is validated until [`InputForm::to_request`], which is the
/// submission guard.
#[derive(Debug, Clone, Default)]
pub struct InputForm {
    pub policy_text: String,
    pub geography: String,
    evidence: Option<EvidenceDraft>,
}

impl InputForm {
    #[must_use]
    pub fn new(policy_text: impl Into<String>) -> Self {
        Self {
            policy_text: policy_text.into(),
            ..Self::default()
        }
    }

    /// Whether the submit affordance should be enabled.
    #[must_use]
    pub fn can_submit(&self) -> bool {
        !self.policy_text.trim().is_empty()
    }

    /// Encode and attach a file, replacing any previous attachment.
    ///
    /// # Errors
    ///
    /// Returns [`CoreError`] if the file cannot be read or is not an accepted
    /// evidence type. The previous attachment is kept in that case.
    pub fn attach(&mut self, path: &Path) -> Result<&EvidenceDraft, CoreError> {
        let draft = EvidenceDraft::from_file(path)?;
        Ok(&*self.evidence.insert(draft))
    }

    pub fn attach_draft(&mut self, draft: EvidenceDraft) {
        self.evidence = Some(draft);
    }

    pub fn detach(&mut self) -> Option<EvidenceDraft> {
        self.evidence.take()
    }

    #[must_use]
    pub const fn evidence(&self) -> Option<&EvidenceDraft> {
        self.evidence.as_ref()
    }

    /// Edit the caption of the attached evidence. Returns `false` when
    /// nothing is attached.
    pub fn set_caption(&mut self, caption: impl Into<String>) -> bool {
        match &mut self.evidence {
            Some(draft) => {
                draft.set_caption(caption);
                true
            }
            None => false,
        }
    }

    /// Build the validated request.
    ///
    /// # Errors
    ///
    /// Returns [`CoreError::Validation`] if the policy text is blank.
    pub fn to_request(&self) -> Result<AnalysisRequest, CoreError> {
        AnalysisRequest::new(
            self.policy_text.clone(),
            Some(self.geography.clone()),
            self.evidence.clone().map(EvidenceDraft::finish),
        )
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use rstest::rstest;

    use super::*;

    #[rstest]
    #[case("")]
    #[case("   ")]
    #[case("\n\t")]
    fn blank_text_cannot_submit(#[case] text: &str) {
        let form = InputForm::new(text);
        assert!(!form.can_submit());
        assert!(matches!(form.to_request(), Err(CoreError::Validation(_))));
    }

    #[test]
    fn caption_follows_the_attachment() {
        let mut form = InputForm::new("Add protected bike lanes");
        assert!(!form.set_caption("ignored"));

        form.attach_draft(EvidenceDraft::from_bytes("corner.jpg", b"\xff\xd8").unwrap());
        assert!(form.set_caption("Intersection at 5th"));
        form.geography = "Lagos".into();

        let request = form.to_request().unwrap();
        assert_eq!(request.geography(), Some("Lagos"));
        assert_eq!(
            request.evidence().and_then(|e| e.caption.as_deref()),
            Some("Intersection at 5th")
        );

        form.detach();
        assert_eq!(form.to_request().unwrap().evidence(), None);
    }

    #[test]
    fn empty_geography_is_omitted() {
        let request = InputForm::new("Congestion pricing").to_request().unwrap();
        assert_eq!(request.geography(), None);
    }
}

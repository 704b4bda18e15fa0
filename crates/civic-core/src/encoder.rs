//! Evidence encoding: turn a user-selected file into a transportable payload.
//!
//! The input form owns a mutable [`EvidenceDraft`] (the caption stays editable
//! until submission); [`EvidenceDraft::finish`] freezes it into an [`Evidence`]
//! value that a request then owns exclusively.

use std::path::Path;

use anyhow::Context;
use base64::Engine;
use base64::engine::general_purpose::STANDARD;

use crate::entities::Evidence;
use crate::errors::CoreError;

/// Extensions accepted as evidence, with their MIME types.
///
/// Accepts the same families as an `image/*,application/pdf,video/*` upload filter.
const MIME_TYPES: &[(&str, &str)] = &[
    ("jpg", "image/jpeg"),
    ("jpeg", "image/jpeg"),
    ("png", "image/png"),
    ("gif", "image/gif"),
    ("webp", "image/webp"),
    ("heic", "image/heic"),
    ("heif", "image/heif"),
    ("pdf", "application/pdf"),
    ("mp4", "video/mp4"),
    ("mpeg", "video/mpeg"),
    ("mpg", "video/mpeg"),
    ("mov", "video/quicktime"),
    ("webm", "video/webm"),
    ("avi", "video/x-msvideo"),
    ("3gp", "video/3gpp"),
];

/// Resolve the MIME type for an evidence filename by extension (case-insensitive).
#[must_use]
pub fn mime_type_for(filename: &str) -> Option<&'static str> {
    let extension = Path::new(filename)
        .extension()?
        .to_str()?
        .to_ascii_lowercase();
    MIME_TYPES
        .iter()
        .find(|(ext, _)| *ext == extension)
        .map(|(_, mime)| *mime)
}

/// Evidence under construction in the input form.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EvidenceDraft {
    filename: String,
    mime_type: String,
    data: String,
    caption: String,
}

impl EvidenceDraft {
    /// Read and encode a file from disk.
    ///
    /// # Errors
    ///
    /// Returns [`CoreError::Other`] if the file cannot be read, and
    /// [`CoreError::Validation`] if its type is not accepted or it is empty.
    pub fn from_file(path: &Path) -> Result<Self, CoreError> {
        let filename = path
            .file_name()
            .and_then(|name| name.to_str())
            .map(ToString::to_string)
            .ok_or_else(|| {
                CoreError::validation(format!("'{}' has no usable file name", path.display()))
            })?;
        let bytes = std::fs::read(path)
            .with_context(|| format!("failed to read evidence file {}", path.display()))?;
        Self::from_bytes(filename, &bytes)
    }

    /// Encode in-memory file contents.
    ///
    /// # Errors
    ///
    /// Returns [`CoreError::Validation`] if the extension is not an accepted
    /// image, video, or PDF type, or if `bytes` is empty.
    pub fn from_bytes(filename: impl Into<String>, bytes: &[u8]) -> Result<Self, CoreError> {
        let filename = filename.into();
        let mime_type = mime_type_for(&filename).ok_or_else(|| {
            CoreError::validation(format!(
                "'{filename}' is not a supported evidence type (image, video, or PDF)"
            ))
        })?;
        if bytes.is_empty() {
            return Err(CoreError::validation(format!("'{filename}' is empty")));
        }

        Ok(Self {
            filename,
            mime_type: mime_type.to_string(),
            data: STANDARD.encode(bytes),
            caption: String::new(),
        })
    }

    #[must_use]
    pub fn filename(&self) -> &str {
        &self.filename
    }

    #[must_use]
    pub fn mime_type(&self) -> &str {
        &self.mime_type
    }

    #[must_use]
    pub fn caption(&self) -> &str {
        &self.caption
    }

    pub fn set_caption(&mut self, caption: impl Into<String>) {
        self.caption = caption.into();
    }

    /// Freeze the draft. A blank caption becomes `None`.
    #[must_use]
    pub fn finish(self) -> Evidence {
        let caption = self.caption.trim();
        Evidence {
            filename: self.filename,
            mime_type: self.mime_type,
            data: self.data,
            caption: (!caption.is_empty()).then(|| caption.to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn mime_lookup_is_case_insensitive() {
        assert_eq!(mime_type_for("Site.JPG"), Some("image/jpeg"));
        assert_eq!(mime_type_for("walkthrough.mov"), Some("video/quicktime"));
        assert_eq!(mime_type_for("brief.pdf"), Some("application/pdf"));
        assert_eq!(mime_type_for("notes.txt"), None);
        assert_eq!(mime_type_for("no_extension"), None);
    }

    #[test]
    fn bytes_are_base64_encoded() {
        let draft = EvidenceDraft::from_bytes("pixel.png", b"hello").unwrap();
        assert_eq!(draft.mime_type(), "image/png");
        let evidence = draft.finish();
        assert_eq!(evidence.data, "aGVsbG8=");
        assert_eq!(evidence.caption, None);
    }

    #[test]
    fn caption_is_editable_until_finish() {
        let mut draft = EvidenceDraft::from_bytes("corner.jpg", b"\xff\xd8\xff").unwrap();
        draft.set_caption("Site photo facing North");
        draft.set_caption("  Site photo facing South ");
        let evidence = draft.finish();
        assert_eq!(evidence.caption.as_deref(), Some("Site photo facing South"));
    }

    #[test]
    fn rejects_unsupported_and_empty_files() {
        assert!(matches!(
            EvidenceDraft::from_bytes("notes.txt", b"abc"),
            Err(CoreError::Validation(_))
        ));
        assert!(matches!(
            EvidenceDraft::from_bytes("empty.png", b""),
            Err(CoreError::Validation(_))
        ));
    }

    #[test]
    fn reads_file_from_disk() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("crossing.webp");
        std::fs::write(&path, [1_u8, 2, 3]).unwrap();

        let draft = EvidenceDraft::from_file(&path).unwrap();
        assert_eq!(draft.filename(), "crossing.webp");
        assert_eq!(draft.mime_type(), "image/webp");
        assert_eq!(draft.finish().data, "AQID");
    }

    #[test]
    fn missing_file_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let result = EvidenceDraft::from_file(&dir.path().join("missing.png"));
        assert!(matches!(result, Err(CoreError::Other(_))));
    }
}

//! Generated media payloads: the "future state" image and synthesized speech.

use std::time::Duration;

use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use serde::{Deserialize, Serialize};

use crate::errors::CoreError;

/// Sample rate of synthesized speech.
pub const SPEECH_SAMPLE_RATE: u32 = 24_000;

/// Channel count of synthesized speech.
pub const SPEECH_CHANNELS: u16 = 1;

// ── Images ─────────────────────────────────────────────────────────

/// An inline image returned by the image-generation capability.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GeneratedImage {
    pub mime_type: String,
    /// Base64-encoded image bytes.
    pub data: String,
}

impl GeneratedImage {
    /// Renderable `data:` URI.
    #[must_use]
    pub fn data_uri(&self) -> String {
        format!("data:{};base64,{}", self.mime_type, self.data)
    }

    /// File extension matching the MIME type (`png` when unknown).
    #[must_use]
    pub fn extension(&self) -> &'static str {
        match self.mime_type.as_str() {
            "image/jpeg" => "jpg",
            "image/webp" => "webp",
            "image/gif" => "gif",
            _ => "png",
        }
    }

    /// Decode the image bytes.
    ///
    /// # Errors
    ///
    /// Returns [`CoreError::Validation`] if `data` is not valid base64.
    pub fn to_bytes(&self) -> Result<Vec<u8>, CoreError> {
        STANDARD
            .decode(&self.data)
            .map_err(|e| CoreError::validation(format!("image data is not valid base64: {e}")))
    }
}

// ── Audio ──────────────────────────────────────────────────────────

/// Decoded PCM speech ready for playback.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AudioBuffer {
    pub sample_rate: u32,
    pub channels: u16,
    /// Interleaved signed 16-bit samples.
    pub samples: Vec<i16>,
}

impl AudioBuffer {
    /// Decode base64 raw PCM (signed 16-bit little-endian) as returned by the
    /// speech capability.
    ///
    /// # Errors
    ///
    /// Returns [`CoreError::Validation`] if the payload is not base64, is empty,
    /// or has an odd byte count.
    pub fn from_base64_pcm(data: &str, sample_rate: u32, channels: u16) -> Result<Self, CoreError> {
        let bytes = STANDARD
            .decode(data)
            .map_err(|e| CoreError::validation(format!("audio data is not valid base64: {e}")))?;
        if bytes.is_empty() {
            return Err(CoreError::validation("audio payload is empty"));
        }
        if bytes.len() % 2 != 0 {
            return Err(CoreError::validation(format!(
                "audio payload has {} bytes, expected whole 16-bit samples",
                bytes.len()
            )));
        }

        let samples = bytes
            .chunks_exact(2)
            .map(|pair| i16::from_le_bytes([pair[0], pair[1]]))
            .collect();

        Ok(Self {
            sample_rate,
            channels,
            samples,
        })
    }

    /// Decode speech using the capability's fixed format (24 kHz mono).
    ///
    /// # Errors
    ///
    /// See [`AudioBuffer::from_base64_pcm`].
    pub fn from_speech_payload(data: &str) -> Result<Self, CoreError> {
        Self::from_base64_pcm(data, SPEECH_SAMPLE_RATE, SPEECH_CHANNELS)
    }

    #[must_use]
    pub fn duration(&self) -> Duration {
        let frames = self.samples.len() as u64 / u64::from(self.channels.max(1));
        Duration::from_millis(frames * 1000 / u64::from(self.sample_rate.max(1)))
    }

    /// Encode as a RIFF/WAVE (PCM 16-bit) container.
    #[must_use]
    #[allow(clippy::cast_possible_truncation)]
    pub fn to_wav(&self) -> Vec<u8> {
        let data_len = (self.samples.len() * 2) as u32;
        let block_align = self.channels * 2;
        let byte_rate = self.sample_rate * u32::from(block_align);

        let mut out = Vec::with_capacity(44 + data_len as usize);
        out.extend_from_slice(b"RIFF");
        out.extend_from_slice(&(36 + data_len).to_le_bytes());
        out.extend_from_slice(b"WAVE");
        out.extend_from_slice(b"fmt ");
        out.extend_from_slice(&16_u32.to_le_bytes());
        out.extend_from_slice(&1_u16.to_le_bytes());
        out.extend_from_slice(&self.channels.to_le_bytes());
        out.extend_from_slice(&self.sample_rate.to_le_bytes());
        out.extend_from_slice(&byte_rate.to_le_bytes());
        out.extend_from_slice(&block_align.to_le_bytes());
        out.extend_from_slice(&16_u16.to_le_bytes());
        out.extend_from_slice(b"data");
        out.extend_from_slice(&data_len.to_le_bytes());
        for sample in &self.samples {
            out.extend_from_slice(&sample.to_le_bytes());
        }
        out
    }
}

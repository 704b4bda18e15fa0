//! Best-effort image and speech generation.
//!
//! Nothing here returns an error: a missing credential, a failed call, or a
//! response without an inline payload is logged and reported as `None`.

use civic_core::entities::Stakeholder;
use civic_core::media::{AudioBuffer, GeneratedImage};

use crate::wire::{
    Content, GenerateContentRequest, GenerateContentResponse, GenerationConfig, ImageConfig, Part,
    SpeechConfig,
};
use crate::{AnalysisError, GeminiClient, prompt};

/// FNV-1a, 32-bit. Stable across runs and platforms.
fn fnv1a(text: &str) -> u32 {
    text.bytes().fold(0x811c_9dc5_u32, |hash, byte| {
        (hash ^ u32::from(byte)).wrapping_mul(0x0100_0193)
    })
}

/// Pick the role-play voice for a stakeholder group.
///
/// The same group always gets the same voice for a given pool. Returns `None`
/// only when the pool is empty.
#[must_use]
pub fn voice_for_group<'a>(group: &str, voices: &'a [String]) -> Option<&'a str> {
    if voices.is_empty() {
        return None;
    }
    let index = fnv1a(group) as usize % voices.len();
    Some(voices[index].as_str())
}

#[must_use]
pub fn build_image_request(prompt: &str, aspect_ratio: &str) -> GenerateContentRequest {
    GenerateContentRequest {
        contents: vec![Content {
            parts: vec![Part::text(prompt)],
        }],
        tools: Vec::new(),
        generation_config: Some(GenerationConfig {
            image_config: Some(ImageConfig {
                aspect_ratio: aspect_ratio.to_string(),
            }),
            ..GenerationConfig::default()
        }),
    }
}

#[must_use]
pub fn build_speech_request(text: &str, voice: &str) -> GenerateContentRequest {
    GenerateContentRequest {
        contents: vec![Content {
            parts: vec![Part::text(text)],
        }],
        tools: Vec::new(),
        generation_config: Some(GenerationConfig {
            response_modalities: Some(vec!["AUDIO".into()]),
            speech_config: Some(SpeechConfig::prebuilt(voice)),
            ..GenerationConfig::default()
        }),
    }
}

/// First inline image of a response.
#[must_use]
pub fn image_from_response(response: &GenerateContentResponse) -> Option<GeneratedImage> {
    let inline = response.first_inline_data()?;
    if inline.data.is_empty() {
        return None;
    }
    Some(GeneratedImage {
        mime_type: inline.mime_type.clone(),
        data: inline.data.clone(),
    })
}

/// First inline audio of a response, decoded as 24 kHz mono PCM.
#[must_use]
pub fn audio_from_response(response: &GenerateContentResponse) -> Option<AudioBuffer> {
    let inline = response.first_inline_data()?;
    match AudioBuffer::from_speech_payload(&inline.data) {
        Ok(audio) => Some(audio),
        Err(e) => {
            tracing::warn!(mime = %inline.mime_type, %e, "speech payload could not be decoded");
            None
        }
    }
}

impl GeminiClient {
    async fn generate_best_effort(
        &self,
        capability: &'static str,
        model: &str,
        body: &GenerateContentRequest,
    ) -> Option<GenerateContentResponse> {
        if !self.is_configured() {
            tracing::debug!(capability, "skipped: no API key configured");
            return None;
        }
        match self.generate(model, body).await {
            Ok(response) => Some(response),
            Err(e) => {
                log_failure(capability, &e);
                None
            }
        }
    }

    /// Render the "future state" image for a visualization prompt.
    pub async fn generate_image(&self, prompt: &str) -> Option<GeneratedImage> {
        let prompt = prompt.trim();
        if prompt.is_empty() {
            return None;
        }
        let body = build_image_request(prompt, &self.config.image_aspect_ratio);
        let response = self
            .generate_best_effort("image", &self.config.image_model, &body)
            .await?;
        let image = image_from_response(&response);
        if image.is_none() {
            tracing::warn!("image response carried no inline image");
        }
        image
    }

    /// Read `text` aloud in the narration voice.
    pub async fn generate_speech(&self, text: &str) -> Option<AudioBuffer> {
        self.speak(text, &self.config.narration_voice).await
    }

    /// Role-play a stakeholder reading their concern, in the voice assigned to
    /// their group.
    pub async fn generate_stakeholder_speech(&self, stakeholder: &Stakeholder) -> Option<AudioBuffer> {
        let voice = voice_for_group(&stakeholder.group, &self.config.stakeholder_voices)
            .unwrap_or(&self.config.narration_voice);
        tracing::debug!(group = %stakeholder.group, voice, "stakeholder voice");
        self.speak(&prompt::stakeholder_speech_prompt(stakeholder), voice)
            .await
    }

    async fn speak(&self, text: &str, voice: &str) -> Option<AudioBuffer> {
        if text.trim().is_empty() {
            return None;
        }
        let body = build_speech_request(text, voice);
        let response = self
            .generate_best_effort("speech", &self.config.speech_model, &body)
            .await?;
        audio_from_response(&response)
    }
}

fn log_failure(capability: &str, error: &AnalysisError) {
    match error {
        AnalysisError::RateLimited { retry_after_secs } => {
            tracing::warn!(capability, retry_after_secs, "rate limited");
        }
        other => tracing::warn!(capability, %other, "generation failed"),
    }
}

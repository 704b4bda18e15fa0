//! Hosted model (Gemini API) configuration.

use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::ConfigError;

fn default_base_url() -> String {
    String::from("https://generativelanguage.googleapis.com/v1beta")
}

fn default_analysis_model() -> String {
    String::from("gemini-3-pro-preview")
}

fn default_image_model() -> String {
    String::from("gemini-2.5-flash-image")
}

fn default_speech_model() -> String {
    String::from("gemini-2.5-flash-preview-tts")
}

const fn default_thinking_budget() -> u32 {
    16_000
}

fn default_image_aspect_ratio() -> String {
    String::from("16:9")
}

fn default_narration_voice() -> String {
    String::from("Aoede")
}

fn default_stakeholder_voices() -> Vec<String> {
    ["Puck", "Kore", "Fenrir", "Aoede", "Charon"]
        .into_iter()
        .map(String::from)
        .collect()
}

const fn default_request_timeout_secs() -> u64 {
    300
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct GeminiConfig {
    /// API credential. Gates all three capabilities.
    #[serde(default)]
    pub api_key: String,

    /// REST endpoint root, without a trailing slash.
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// Model used for the grounded structured analysis.
    #[serde(default = "default_analysis_model")]
    pub analysis_model: String,

    /// Model used for the "future state" visualization.
    #[serde(default = "default_image_model")]
    pub image_model: String,

    /// Text-to-speech model.
    #[serde(default = "default_speech_model")]
    pub speech_model: String,

    /// Reasoning budget (tokens) for the analysis call.
    #[serde(default = "default_thinking_budget")]
    pub thinking_budget: u32,

    /// Aspect ratio hint for image generation.
    #[serde(default = "default_image_aspect_ratio")]
    pub image_aspect_ratio: String,

    /// Voice for reading report text aloud.
    #[serde(default = "default_narration_voice")]
    pub narration_voice: String,

    /// Voice pool for stakeholder role-play; picked deterministically per group.
    #[serde(default = "default_stakeholder_voices")]
    pub stakeholder_voices: Vec<String>,

    /// Per-request timeout in seconds. `0` disables the timeout.
    #[serde(default = "default_request_timeout_secs")]
    pub request_timeout_secs: u64,
}

impl Default for GeminiConfig {
    fn default() -> Self {
        Self {
            api_key: String::new(),
            base_url: default_base_url(),
            analysis_model: default_analysis_model(),
            image_model: default_image_model(),
            speech_model: default_speech_model(),
            thinking_budget: default_thinking_budget(),
            image_aspect_ratio: default_image_aspect_ratio(),
            narration_voice: default_narration_voice(),
            stakeholder_voices: default_stakeholder_voices(),
            request_timeout_secs: default_request_timeout_secs(),
        }
    }
}

impl GeminiConfig {
    /// Check if the credential is present.
    #[must_use]
    pub fn is_configured(&self) -> bool {
        !self.api_key.trim().is_empty()
    }

    /// Fail with [`ConfigError::NotConfigured`] unless an API key is set.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::NotConfigured`] for a missing or blank key.
    pub fn require(&self) -> Result<&Self, ConfigError> {
        if self.is_configured() {
            Ok(self)
        } else {
            Err(ConfigError::NotConfigured {
                section: "gemini".to_string(),
            })
        }
    }

    #[must_use]
    pub const fn request_timeout(&self) -> Option<Duration> {
        if self.request_timeout_secs == 0 {
            None
        } else {
            Some(Duration::from_secs(self.request_timeout_secs))
        }
    }

    /// Check values that would make every request fail.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidValue`] for an empty base URL, model name,
    /// or voice pool.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let required = [
            ("gemini.base_url", &self.base_url),
            ("gemini.analysis_model", &self.analysis_model),
            ("gemini.image_model", &self.image_model),
            ("gemini.speech_model", &self.speech_model),
            ("gemini.narration_voice", &self.narration_voice),
        ];
        for (field, value) in required {
            if value.trim().is_empty() {
                return Err(ConfigError::InvalidValue {
                    field: field.to_string(),
                    reason: "must not be empty".to_string(),
                });
            }
        }
        if self.stakeholder_voices.iter().all(|v| v.trim().is_empty()) {
            return Err(ConfigError::InvalidValue {
                field: "gemini.stakeholder_voices".to_string(),
                reason: "at least one voice is required".to_string(),
            });
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_is_not_configured() {
        let config = GeminiConfig::default();
        assert!(!config.is_configured());
        assert_eq!(config.analysis_model, "gemini-3-pro-preview");
        assert_eq!(config.thinking_budget, 16_000);
        assert_eq!(config.stakeholder_voices.len(), 5);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn whitespace_key_is_not_configured() {
        let config = GeminiConfig {
            api_key: "   ".into(),
            ..Default::default()
        };
        assert!(!config.is_configured());
        assert!(matches!(
            config.require(),
            Err(ConfigError::NotConfigured { section }) if section == "gemini"
        ));
    }

    #[test]
    fn zero_timeout_disables_it() {
        let config = GeminiConfig {
            request_timeout_secs: 0,
            ..Default::default()
        };
        assert_eq!(config.request_timeout(), None);
        assert_eq!(
            GeminiConfig::default().request_timeout(),
            Some(Duration::from_secs(300))
        );
    }

    #[test]
    fn empty_voice_pool_is_invalid() {
        let config = GeminiConfig {
            stakeholder_voices: vec![String::new()],
            ..Default::default()
        };
        assert!(matches!(
            config.validate(),
            Err(ConfigError::InvalidValue { field, .. }) if field == "gemini.stakeholder_voices"
        ));
    }
}

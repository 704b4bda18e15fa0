//! # civic-config
//!
//! Layered configuration loading for Civic Architect using figment.
//!
//! Configuration sources (in priority order, highest wins):
//! 1. Environment variables (`CIVIC_*` prefix, `__` as separator)
//! 2. Bare credential variables `GEMINI_API_KEY`, then `API_KEY`
//! 3. Project-level `.civic/config.toml`
//! 4. User-level `~/.config/civic/config.toml`
//! 5. Built-in defaults
//!
//! # Environment Variable Mapping
//!
//! Figment maps `CIVIC_GEMINI__API_KEY` -> `gemini.api_key`,
//! `CIVIC_GENERAL__EXPORT_DIR` -> `general.export_dir`, etc.
//! The `__` (double underscore) separates nested config sections.
//!
//! # Usage
//!
//! ```no_run
//! use civic_config::CivicConfig;
//!
//! let config = CivicConfig::load_with_dotenv().expect("config");
//! if !config.gemini.is_configured() {
//!     eprintln!("set GEMINI_API_KEY to run simulations");
//! }
//! ```

mod error;
mod gemini;
mod general;

pub use error::ConfigError;
pub use gemini::GeminiConfig;
pub use general::GeneralConfig;

use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct CivicConfig {
    #[serde(default)]
    pub gemini: GeminiConfig,
    #[serde(default)]
    pub general: GeneralConfig,
}

/// Bare variables that also supply `gemini.api_key`, lowest priority first.
const CREDENTIAL_VARS: [&str; 2] = ["API_KEY", "GEMINI_API_KEY"];

impl CivicConfig {
    /// Extract and validate the layered configuration. The process
    /// environment is read as-is; see [`load_with_dotenv`](Self::load_with_dotenv)
    /// to pull in a `.env` file first.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] if a source fails to parse or a value is invalid.
    pub fn load() -> Result<Self, ConfigError> {
        let config: Self = Self::figment().extract()?;
        config.gemini.validate()?;
        Ok(config)
    }

    /// [`load`](Self::load) after reading the nearest `.env` file.
    ///
    /// # Errors
    ///
    /// See [`load`](Self::load).
    pub fn load_with_dotenv() -> Result<Self, ConfigError> {
        Self::load_nearest_dotenv();
        Self::load()
    }

    /// The provider chain, exposed so tests can extract from it directly.
    #[must_use]
    pub fn figment() -> Figment {
        let files = Self::config_files()
            .into_iter()
            .filter(|path| path.exists())
            .fold(
                Figment::from(Serialized::defaults(Self::default())),
                |figment, path| figment.merge(Toml::file(path)),
            );

        let credentials = CREDENTIAL_VARS.iter().fold(files, |figment, var| {
            figment.merge(Env::raw().only(&[*var]).map(|_| "gemini.api_key".into()))
        });

        credentials.merge(Env::prefixed("CIVIC_").split("__"))
    }

    /// TOML files in merge order: user-global, then project-local.
    fn config_files() -> Vec<PathBuf> {
        let mut files = Vec::with_capacity(2);
        if let Some(dir) = dirs::config_dir() {
            files.push(dir.join("civic").join("config.toml"));
        }
        files.push(PathBuf::from(".civic").join("config.toml"));
        files
    }

    /// Read `.env` from the crate directory or up to two parents when run
    /// under cargo, otherwise from the current directory. Missing files are
    /// ignored.
    fn load_nearest_dotenv() {
        let found = std::env::var_os("CARGO_MANIFEST_DIR").and_then(|manifest_dir| {
            PathBuf::from(manifest_dir)
                .ancestors()
                .take(3)
                .map(|dir| dir.join(".env"))
                .find(|path| path.exists())
        });

        match found {
            Some(path) => {
                let _ = dotenvy::from_path(&path);
            }
            None => {
                let _ = dotenvy::dotenv();
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_loads() {
        let config = CivicConfig::default();
        assert!(!config.gemini.is_configured());
        assert!(config.general.wait_for_image);
    }

    #[test]
    fn figment_builds_without_files() {
        figment::Jail::expect_with(|_jail| {
            let config: CivicConfig = CivicConfig::figment().extract()?;
            assert_eq!(config.gemini.image_aspect_ratio, "16:9");
            assert_eq!(config.general.export_dir, ".");
            Ok(())
        });
    }
}

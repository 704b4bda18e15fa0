//! General application configuration.

use serde::{Deserialize, Serialize};

fn default_export_dir() -> String {
    String::from(".")
}

const fn default_wait_for_image() -> bool {
    true
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct GeneralConfig {
    /// Directory where reports, images, and speech files are written.
    #[serde(default = "default_export_dir")]
    pub export_dir: String,

    /// Whether one-shot `analyze` waits for the background visualization.
    #[serde(default = "default_wait_for_image")]
    pub wait_for_image: bool,
}

impl Default for GeneralConfig {
    fn default() -> Self {
        Self {
            export_dir: default_export_dir(),
            wait_for_image: default_wait_for_image(),
        }
    }
}

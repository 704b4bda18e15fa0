use std::path::PathBuf;
use std::sync::Arc;

use civic_config::CivicConfig;
use civic_gemini::GeminiClient;
use civic_session::AnalysisOrchestrator;

/// Shared application resources initialized once at startup.
pub struct AppContext {
    pub config: CivicConfig,
    pub client: Arc<GeminiClient>,
}

impl AppContext {
    /// Build the capability client from the loaded configuration.
    ///
    /// No network I/O happens here. A missing credential surfaces on the
    /// first analysis.
    pub fn init(config: CivicConfig) -> Self {
        let client = Arc::new(GeminiClient::new(config.gemini.clone()));
        Self { config, client }
    }

    /// A fresh session over the shared client.
    pub fn orchestrator(&self, generate_images: bool) -> AnalysisOrchestrator<GeminiClient> {
        let orchestrator = AnalysisOrchestrator::new(Arc::clone(&self.client));
        if generate_images {
            orchestrator
        } else {
            orchestrator.without_images()
        }
    }

    /// Default directory for reports and speech files.
    pub fn export_dir(&self) -> PathBuf {
        PathBuf::from(&self.config.general.export_dir)
    }
}

use anyhow::Context;
use civic_config::CivicConfig;

/// Load `.env` (if any) and the layered configuration.
pub fn load_config() -> anyhow::Result<CivicConfig> {
    CivicConfig::load_with_dotenv().context("failed to load civic configuration")
}

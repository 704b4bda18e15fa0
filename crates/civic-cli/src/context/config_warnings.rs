use civic_config::CivicConfig;

/// Emit warnings for likely mistyped env var keys that silently fell back to defaults.
pub fn warn_unconfigured(config: &CivicConfig) {
    for warning in collect_unconfigured_warnings(config, std::env::vars()) {
        tracing::warn!("{warning}");
    }
}

fn collect_unconfigured_warnings<I>(config: &CivicConfig, env: I) -> Vec<String>
where
    I: IntoIterator<Item = (String, String)>,
{
    let env_keys = env.into_iter().map(|(key, _)| key).collect::<Vec<_>>();

    let mut warnings = Vec::new();

    if !config.gemini.is_configured() {
        if has_env_prefix(&env_keys, "CIVIC_GEMINI") {
            warnings.push(
                "Gemini config has no API key while CIVIC_GEMINI* env vars exist. Use double underscores (example: CIVIC_GEMINI__API_KEY)."
                    .to_string(),
            );
        } else {
            warnings.push(
                "No Gemini API key configured; simulations will fail. Set GEMINI_API_KEY or CIVIC_GEMINI__API_KEY."
                    .to_string(),
            );
        }
    }

    if env_keys
        .iter()
        .any(|key| key.starts_with("CIVIC_GENERAL_") && !key.starts_with("CIVIC_GENERAL__"))
    {
        warnings.push(
            "CIVIC_GENERAL* env vars use a single underscore and are ignored. Use double underscores (example: CIVIC_GENERAL__EXPORT_DIR)."
                .to_string(),
        );
    }

    warnings
}

fn has_env_prefix(keys: &[String], prefix: &str) -> bool {
    keys.iter().any(|key| key.starts_with(prefix))
}

#[cfg(test)]
mod tests {
    use civic_config::{CivicConfig, GeminiConfig};

    use super::collect_unconfigured_warnings;

    fn env(pairs: &[(&str, &str)]) -> Vec<(String, String)> {
        pairs
            .iter()
            .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
            .collect()
    }

    #[test]
    fn warns_about_single_underscore_gemini_keys() {
        let config = CivicConfig::default();
        let warnings =
            collect_unconfigured_warnings(&config, env(&[("CIVIC_GEMINI_API_KEY", "k")]));

        assert_eq!(warnings.len(), 1);
        assert!(warnings[0].contains("CIVIC_GEMINI__API_KEY"));
    }

    #[test]
    fn warns_when_no_key_is_set_at_all() {
        let config = CivicConfig::default();
        let warnings = collect_unconfigured_warnings(&config, env(&[]));

        assert_eq!(warnings.len(), 1);
        assert!(warnings[0].contains("GEMINI_API_KEY"));
    }

    #[test]
    fn warns_about_single_underscore_general_keys() {
        let config = CivicConfig {
            gemini: GeminiConfig {
                api_key: "key".to_string(),
                ..Default::default()
            },
            ..Default::default()
        };
        let warnings =
            collect_unconfigured_warnings(&config, env(&[("CIVIC_GENERAL_EXPORT_DIR", "/tmp")]));

        assert_eq!(warnings.len(), 1);
        assert!(warnings[0].contains("CIVIC_GENERAL__EXPORT_DIR"));
    }

    #[test]
    fn does_not_warn_when_configured() {
        let config = CivicConfig {
            gemini: GeminiConfig {
                api_key: "key".to_string(),
                ..Default::default()
            },
            ..Default::default()
        };

        let warnings = collect_unconfigured_warnings(
            &config,
            env(&[
                ("CIVIC_GEMINI__API_KEY", "key"),
                ("CIVIC_GENERAL__EXPORT_DIR", "/tmp"),
            ]),
        );

        assert!(warnings.is_empty());
    }
}

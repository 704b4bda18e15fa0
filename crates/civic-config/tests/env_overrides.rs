use civic_config::CivicConfig;
use figment::Jail;

#[test]
fn prefixed_env_sets_nested_values() {
    Jail::expect_with(|jail| {
        jail.set_env("CIVIC_GEMINI__API_KEY", "key-from-env");
        jail.set_env("CIVIC_GEMINI__THINKING_BUDGET", "2048");
        jail.set_env("CIVIC_GENERAL__WAIT_FOR_IMAGE", "false");

        let config = CivicConfig::load().expect("config loads");
        assert_eq!(config.gemini.api_key, "key-from-env");
        assert_eq!(config.gemini.thinking_budget, 2048);
        assert!(!config.general.wait_for_image);
        Ok(())
    });
}

#[test]
fn bare_api_key_fills_credential() {
    Jail::expect_with(|jail| {
        jail.set_env("API_KEY", "legacy-key");

        let config = CivicConfig::load().expect("config loads");
        assert_eq!(config.gemini.api_key, "legacy-key");
        Ok(())
    });
}

#[test]
fn gemini_api_key_beats_bare_api_key() {
    Jail::expect_with(|jail| {
        jail.set_env("API_KEY", "legacy-key");
        jail.set_env("GEMINI_API_KEY", "gemini-key");

        let config = CivicConfig::load().expect("config loads");
        assert_eq!(config.gemini.api_key, "gemini-key");
        Ok(())
    });
}

#[test]
fn prefixed_env_beats_conventional_names() {
    Jail::expect_with(|jail| {
        jail.set_env("GEMINI_API_KEY", "gemini-key");
        jail.set_env("CIVIC_GEMINI__API_KEY", "civic-key");

        let config = CivicConfig::load().expect("config loads");
        assert_eq!(config.gemini.api_key, "civic-key");
        Ok(())
    });
}

#[test]
fn env_beats_project_toml() {
    Jail::expect_with(|jail| {
        jail.create_dir(".civic")?;
        jail.create_file(
            ".civic/config.toml",
            r#"
[gemini]
api_key = "toml-key"
"#,
        )?;
        jail.set_env("CIVIC_GEMINI__API_KEY", "env-key");

        let config = CivicConfig::load().expect("config loads");
        assert_eq!(config.gemini.api_key, "env-key");
        Ok(())
    });
}

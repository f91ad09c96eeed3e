use std::collections::HashMap;

use secrecy::{ExposeSecret, SecretString};
use serde::{Deserialize, Serialize};

use super::ConfigError;
use super::core_config::*;
use crate::config::ConfigParsingError::GeneralParsingError;

#[derive(Debug, Default, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct CliConfig {
    pub trace_level: Option<String>,
}

#[test]
#[cfg(feature = "config_yaml")]
fn test_parse_config_merges_layers() {
    let config1 = indoc::indoc! {"
        app:
            traceLevel: 'info'
        api:
            timeout: 10
        credentials:
            issuerId: 'issuer-from-file'
            keyId: 'KEY1'
    "};

    let config2 = indoc::indoc! {"
        app:
            traceLevel: 'trace'
        certificate:
            defaultRecreateThreshold: 0
        credentials:
            keyId: 'KEY2'
    "};

    let config = AppConfig::<CliConfig>::from_yaml(vec![config1, config2]).unwrap();

    assert_eq!(config.app.trace_level.as_deref(), Some("trace"));
    assert_eq!(config.core.api.base_url, DEFAULT_BASE_URL);
    assert_eq!(config.core.api.timeout, time::Duration::seconds(10));
    assert_eq!(config.core.certificate.default_recreate_threshold, 0);
    assert_eq!(
        config.core.credentials.issuer_id.as_deref(),
        Some("issuer-from-file")
    );
    assert_eq!(config.core.credentials.key_id.as_deref(), Some("KEY2"));
    assert!(config.core.credentials.private_key.is_none());
}

#[test]
#[cfg(feature = "config_yaml")]
fn test_parse_config_defaults() {
    let config = AppConfig::<NoCustomConfig>::from_yaml(Vec::<&str>::new()).unwrap();

    assert_eq!(config.core.api, ApiConfig::default());
    assert_eq!(config.core.api.timeout, time::Duration::seconds(30));
    assert_eq!(
        config.core.certificate.default_recreate_threshold,
        2_592_000
    );
}

#[test]
#[cfg(feature = "config_yaml")]
fn test_parse_config_invalid_type() {
    let config = indoc::indoc! {"
        api:
            timeout: 'soon'
    "};

    let result = AppConfig::<NoCustomConfig>::from_yaml(vec![config]);
    assert!(matches!(result, Err(GeneralParsingError(_))));
}

#[test]
fn test_from_files_rejects_unknown_extension() {
    let result = AppConfig::<NoCustomConfig>::from_files(&["config.toml"]);
    assert!(matches!(result, Err(GeneralParsingError(_))));
}

fn env_of(values: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
    let values: HashMap<String, String> = values
        .iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect();
    move |name| values.get(name).cloned()
}

#[test]
fn test_credentials_explicit_values_win() {
    let config = CredentialsConfig {
        issuer_id: Some("explicit-issuer".to_string()),
        key_id: Some("EXPLICIT".to_string()),
        private_key: Some(SecretString::from("explicit-key")),
    };

    let credentials = config
        .resolve_with(env_of(&[
            (ISSUER_ID_ENV, "env-issuer"),
            (KEY_ID_ENV, "ENV"),
            (PRIVATE_KEY_ENV, "env-key"),
        ]))
        .unwrap();

    assert_eq!(credentials.issuer_id, "explicit-issuer");
    assert_eq!(credentials.key_id, "EXPLICIT");
    assert_eq!(credentials.private_key.expose_secret(), "explicit-key");
}

#[test]
fn test_credentials_fall_back_to_environment() {
    let config = CredentialsConfig {
        issuer_id: None,
        key_id: Some("".to_string()),
        private_key: Some(SecretString::from("explicit-key")),
    };

    let credentials = config
        .resolve_with(env_of(&[(ISSUER_ID_ENV, "env-issuer"), (KEY_ID_ENV, "ENV")]))
        .unwrap();

    assert_eq!(credentials.issuer_id, "env-issuer");
    assert_eq!(credentials.key_id, "ENV");
    assert_eq!(credentials.private_key.expose_secret(), "explicit-key");
}

#[test]
fn test_credentials_missing_value_is_configuration_error() {
    let config = CredentialsConfig {
        issuer_id: Some("issuer".to_string()),
        key_id: Some("KEY".to_string()),
        private_key: None,
    };

    let result = config.resolve_with(env_of(&[(PRIVATE_KEY_ENV, "   ")]));

    assert!(matches!(
        result,
        Err(ConfigError::MissingCredential {
            field: "private_key",
            env: PRIVATE_KEY_ENV
        })
    ));
}

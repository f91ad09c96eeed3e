use std::path::Path;

use figment::Figment;
#[cfg(feature = "config_env")]
use figment::providers::Env;
#[cfg(feature = "config_json")]
use figment::providers::Json;
#[cfg(feature = "config_yaml")]
use figment::providers::Yaml;
use figment::providers::{Data, Format};
use secrecy::{ExposeSecret, SecretString};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_with::{DurationSeconds, serde_as};

use super::{ConfigError, ConfigParsingError};
use crate::mapper::opt_secret_string;

pub const DEFAULT_BASE_URL: &str = "https://api.appstoreconnect.apple.com/v1";
pub const DEFAULT_TIMEOUT: time::Duration = time::Duration::seconds(30);
/// 30 days
pub const DEFAULT_RECREATE_THRESHOLD: u64 = 2_592_000;

pub const ISSUER_ID_ENV: &str = "APP_STORE_CONNECT_ISSUER_ID";
pub const KEY_ID_ENV: &str = "APP_STORE_CONNECT_KEY_ID";
pub const PRIVATE_KEY_ENV: &str = "APP_STORE_CONNECT_PRIVATE_KEY";

#[derive(Debug, Default, Clone, PartialEq, Serialize, Deserialize)]
pub struct NoCustomConfig;

#[derive(Debug, Default, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct AppCustomConfigSerdeDTO<Custom> {
    #[serde(default)]
    pub(super) app: Custom,
}

#[derive(Debug, Default, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AppConfig<Custom> {
    pub core: CoreConfig,
    #[serde(default)]
    pub app: Custom,
}

#[derive(Debug, Default, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CoreConfig {
    #[serde(default)]
    pub api: ApiConfig,
    #[serde(default)]
    pub credentials: CredentialsConfig,
    #[serde(default)]
    pub certificate: CertificateConfig,
}

#[serde_as]
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ApiConfig {
    pub base_url: String,
    #[serde_as(as = "DurationSeconds<i64>")]
    pub timeout: time::Duration,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout: DEFAULT_TIMEOUT,
        }
    }
}

#[derive(Debug, Default, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct CredentialsConfig {
    pub issuer_id: Option<String>,
    pub key_id: Option<String>,
    #[serde(with = "opt_secret_string", skip_serializing)]
    pub private_key: Option<SecretString>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct CertificateConfig {
    pub default_recreate_threshold: u64,
}

impl Default for CertificateConfig {
    fn default() -> Self {
        Self {
            default_recreate_threshold: DEFAULT_RECREATE_THRESHOLD,
        }
    }
}

/// Fully resolved App Store Connect API key
#[derive(Debug, Clone)]
pub struct Credentials {
    pub issuer_id: String,
    pub key_id: String,
    pub private_key: SecretString,
}

impl CredentialsConfig {
    /// Explicit values win; missing or empty ones fall back to the `APP_STORE_CONNECT_*` environment variables
    pub fn resolve(&self) -> Result<Credentials, ConfigError> {
        self.resolve_with(|name| std::env::var(name).ok())
    }

    pub(crate) fn resolve_with(
        &self,
        env: impl Fn(&str) -> Option<String>,
    ) -> Result<Credentials, ConfigError> {
        let issuer_id = resolve_value(self.issuer_id.clone(), "issuer_id", ISSUER_ID_ENV, &env)?;
        let key_id = resolve_value(self.key_id.clone(), "key_id", KEY_ID_ENV, &env)?;
        let private_key = resolve_value(
            self.private_key
                .as_ref()
                .map(|key| key.expose_secret().to_owned()),
            "private_key",
            PRIVATE_KEY_ENV,
            &env,
        )?;

        Ok(Credentials {
            issuer_id,
            key_id,
            private_key: SecretString::from(private_key),
        })
    }
}

fn resolve_value(
    explicit: Option<String>,
    field: &'static str,
    env_name: &'static str,
    env: &impl Fn(&str) -> Option<String>,
) -> Result<String, ConfigError> {
    explicit
        .filter(|value| !value.trim().is_empty())
        .or_else(|| env(env_name).filter(|value| !value.trim().is_empty()))
        .ok_or(ConfigError::MissingCredential {
            field,
            env: env_name,
        })
}

pub enum InputFormat {
    #[cfg(feature = "config_yaml")]
    Yaml(Data<Yaml>),
    #[cfg(feature = "config_json")]
    Json(Data<Json>),
}

impl InputFormat {
    #[cfg(feature = "config_yaml")]
    pub fn yaml_file(p: impl AsRef<Path>) -> InputFormat {
        InputFormat::Yaml(Yaml::file(p))
    }

    #[cfg(feature = "config_yaml")]
    pub fn yaml_str(s: impl AsRef<str>) -> InputFormat {
        InputFormat::Yaml(Yaml::string(s.as_ref()))
    }

    #[cfg(feature = "config_json")]
    pub fn json_file(p: impl AsRef<Path>) -> InputFormat {
        InputFormat::Json(Json::file(p))
    }

    #[cfg(feature = "config_json")]
    pub fn json_str(s: impl AsRef<str>) -> InputFormat {
        InputFormat::Json(Json::string(s.as_ref()))
    }
}

impl<Custom> AppConfig<Custom>
where
    Custom: Serialize + DeserializeOwned + Default,
{
    pub fn from_files(files: &[impl AsRef<Path>]) -> Result<Self, ConfigParsingError> {
        let mut inputs: Vec<InputFormat> = Vec::with_capacity(files.len());

        for path in files {
            #[cfg(feature = "config_yaml")]
            if path
                .as_ref()
                .extension()
                .is_some_and(|ext| ext == "yml" || ext == "yaml")
            {
                inputs.push(InputFormat::yaml_file(path));
                continue;
            }

            #[cfg(feature = "config_json")]
            if path.as_ref().extension() == Some("json".as_ref()) {
                inputs.push(InputFormat::json_file(path));
                continue;
            }

            return Err(ConfigParsingError::GeneralParsingError(format!(
                "Unsupported file or missing file extension: {:?}",
                path.as_ref().to_str()
            )));
        }

        AppConfig::parse(inputs)
    }

    #[cfg(feature = "config_yaml")]
    pub fn from_yaml(
        configs: impl IntoIterator<Item = impl AsRef<str>>,
    ) -> Result<Self, ConfigParsingError> {
        let inputs = configs.into_iter().map(InputFormat::yaml_str);

        AppConfig::parse(inputs)
    }

    pub fn parse(
        inputs: impl IntoIterator<Item = InputFormat>,
    ) -> Result<Self, ConfigParsingError> {
        let mut figment = Figment::new();

        for data in inputs {
            figment = match data {
                #[cfg(feature = "config_yaml")]
                InputFormat::Yaml(content) => figment.merge(content),
                #[cfg(feature = "config_json")]
                InputFormat::Json(content) => figment.merge(content),
            };
        }

        #[cfg(feature = "config_env")]
        {
            figment = figment.merge(Env::prefixed("ASC_").split("__").lowercase(false));
        }

        let core = figment
            .extract::<CoreConfig>()
            .map_err(|e| ConfigParsingError::GeneralParsingError(e.to_string()))?;
        let custom = figment
            .extract::<AppCustomConfigSerdeDTO<Custom>>()
            .map_err(|e| ConfigParsingError::GeneralParsingError(e.to_string()))?;
        Ok(Self {
            core,
            app: custom.app,
        })
    }
}

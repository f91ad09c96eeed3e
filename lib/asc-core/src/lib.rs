//! Certificate management against the App Store Connect API.
//!
//! [`AscCore`] wires the transport stack together from a [`config::core_config::CoreConfig`];
//! the PKCS12 and DER helpers re-exported here need neither credentials nor network.

use std::sync::Arc;

use config::ConfigError;
use config::core_config::CoreConfig;
use proto::api_client::{ApiClient, AppStoreConnectClient};
use proto::bearer_token::{BearerTokenProvider, TokenError};
use proto::clock::{Clock, DefaultClock};
use proto::http_client::reqwest_client::ReqwestClient;
use service::certificate::CertificateService;
use service::pass_type_id::PassTypeIdService;

pub mod config;
pub mod mapper;
pub mod model;
pub mod proto;
pub mod service;

pub(crate) mod util;

pub use proto::certificate_material::{
    DecodedPkcs12, MaterialError, decode_pkcs12, der_to_pem, encode_pkcs12, extract_ca_issuers,
    extract_extensions,
};

#[derive(Clone)]
pub struct AscCore {
    pub certificate_service: CertificateService,
    pub pass_type_id_service: PassTypeIdService,
}

impl AscCore {
    /// Resolves credentials (falling back to the environment) and builds the authenticated client
    pub fn new(config: CoreConfig) -> Result<Self, ConfigError> {
        let clock: Arc<dyn Clock> = Arc::new(DefaultClock);

        let credentials = config.credentials.resolve()?;
        let token_provider =
            BearerTokenProvider::new(&credentials, clock.clone()).map_err(|e| match e {
                TokenError::InvalidKey(e) => ConfigError::InvalidPrivateKey(e.to_string()),
                e => ConfigError::InvalidPrivateKey(e.to_string()),
            })?;

        url::Url::parse(&config.api.base_url)
            .map_err(|_| ConfigError::InvalidBaseUrl(config.api.base_url.to_owned()))?;

        let http_client = ReqwestClient::with_timeout(config.api.timeout.unsigned_abs())
            .map_err(|e| ConfigError::HttpClient(e.to_string()))?;

        let api_client = AppStoreConnectClient::new(
            config.api.base_url.to_owned(),
            Arc::new(http_client),
            Arc::new(token_provider),
        );

        Ok(Self::with_api_client(config, Arc::new(api_client), clock))
    }

    pub fn with_api_client(
        config: CoreConfig,
        api_client: Arc<dyn ApiClient>,
        clock: Arc<dyn Clock>,
    ) -> Self {
        let config = Arc::new(config);

        Self {
            certificate_service: CertificateService::new(api_client.clone(), clock, config),
            pass_type_id_service: PassTypeIdService::new(api_client),
        }
    }
}

#[cfg(test)]
mod test;

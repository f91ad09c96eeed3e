use std::sync::Arc;

use crate::config::core_config;
use crate::proto::api_client::ApiClient;
use crate::proto::clock::Clock;

pub mod dto;
pub mod replacement;
pub mod service;

pub(crate) mod mapper;
pub(crate) mod validator;

pub use replacement::needs_replacement;

pub(crate) const CERTIFICATES_PATH: &str = "/certificates";
/// Page cap enforced by App Store Connect
pub(crate) const CERTIFICATE_LIST_LIMIT: u32 = 200;

#[derive(Clone)]
pub struct CertificateService {
    api_client: Arc<dyn ApiClient>,
    clock: Arc<dyn Clock>,
    config: Arc<core_config::CoreConfig>,
}

impl CertificateService {
    pub fn new(
        api_client: Arc<dyn ApiClient>,
        clock: Arc<dyn Clock>,
        config: Arc<core_config::CoreConfig>,
    ) -> Self {
        Self {
            api_client,
            clock,
            config,
        }
    }
}

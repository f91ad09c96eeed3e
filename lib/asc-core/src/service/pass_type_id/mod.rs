use std::sync::Arc;

use crate::proto::api_client::ApiClient;

pub mod dto;
pub mod service;

pub(crate) mod mapper;
pub(crate) mod validator;

pub(crate) const PASS_TYPE_IDS_PATH: &str = "/passTypeIds";

#[derive(Clone)]
pub struct PassTypeIdService {
    api_client: Arc<dyn ApiClient>,
}

impl PassTypeIdService {
    pub fn new(api_client: Arc<dyn ApiClient>) -> Self {
        Self { api_client }
    }
}

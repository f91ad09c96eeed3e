//! Authenticated calls against the App Store Connect JSON:API style envelope.

use std::sync::Arc;

use itertools::Itertools;
use serde::de::DeserializeOwned;
use serde_json::Value;
use thiserror::Error;
use url::Url;

use super::bearer_token::{TokenError, TokenProvider};
use super::http_client::{self, HttpClient, Method, Request, StatusCode};

pub mod dto;

use dto::{ErrorObjectDTO, LinksDTO, RequestEnvelopeDTO, ResponseEnvelopeDTO, ResponseMetaDTO};

#[cfg(test)]
mod test;

#[derive(Debug, Error)]
pub enum ApiClientError {
    #[error("Failed to get authentication token: {0}")]
    Token(#[from] TokenError),
    #[error("Failed to perform request: {0}")]
    Http(#[from] http_client::Error),
    #[error("Invalid request URL: {0}")]
    Url(#[from] url::ParseError),
    #[error("API error (status {status}): empty response")]
    EmptyErrorResponse { status: StatusCode },
    #[error("API error (status {status}): {body}")]
    UnparsableErrorResponse { status: StatusCode, body: String },
    #[error("API error: {message}")]
    Api { status: StatusCode, message: String },
    #[error("API error: HTTP {status}")]
    Status { status: StatusCode },
    #[error("Failed to parse response: {0}")]
    MalformedEnvelope(String),
}

#[derive(Debug, Clone, PartialEq)]
pub struct ApiRequest {
    pub method: Method,
    /// Relative to the base URL, starting with `/`
    pub path: String,
    pub query: Vec<(String, String)>,
    /// Contents of the `data` member of the request envelope
    pub body: Option<Value>,
}

impl ApiRequest {
    pub fn get(path: impl Into<String>) -> Self {
        Self {
            method: Method::Get,
            path: path.into(),
            query: vec![],
            body: None,
        }
    }

    pub fn post(path: impl Into<String>, data: Value) -> Self {
        Self {
            method: Method::Post,
            path: path.into(),
            query: vec![],
            body: Some(data),
        }
    }

    pub fn delete(path: impl Into<String>) -> Self {
        Self {
            method: Method::Delete,
            path: path.into(),
            query: vec![],
            body: None,
        }
    }

    pub fn query(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.query.push((key.into(), value.into()));
        self
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct ApiResponse {
    /// `None` for empty 2xx bodies
    pub data: Option<Value>,
    pub included: Vec<Value>,
    pub links: Option<LinksDTO>,
    pub meta: Option<ResponseMetaDTO>,
}

impl ApiResponse {
    /// Deserializes `data`, failing if it is absent
    pub fn into_data<T: DeserializeOwned>(self) -> Result<T, ApiClientError> {
        let data = self.data.ok_or_else(|| {
            ApiClientError::MalformedEnvelope("response carries no data".to_string())
        })?;

        serde_json::from_value(data).map_err(|e| ApiClientError::MalformedEnvelope(e.to_string()))
    }
}

#[cfg_attr(any(test, feature = "mock"), mockall::automock)]
#[async_trait::async_trait]
pub trait ApiClient: Send + Sync {
    async fn execute(&self, request: ApiRequest) -> Result<ApiResponse, ApiClientError>;
}

pub struct AppStoreConnectClient {
    base_url: String,
    http_client: Arc<dyn HttpClient>,
    token_provider: Arc<dyn TokenProvider>,
}

impl AppStoreConnectClient {
    pub fn new(
        base_url: impl Into<String>,
        http_client: Arc<dyn HttpClient>,
        token_provider: Arc<dyn TokenProvider>,
    ) -> Self {
        Self {
            base_url: base_url.into().trim_end_matches('/').to_string(),
            http_client,
            token_provider,
        }
    }

    fn url(&self, request: &ApiRequest) -> Result<Url, ApiClientError> {
        let mut url = Url::parse(&format!("{}{}", self.base_url, request.path))?;
        if !request.query.is_empty() {
            url.query_pairs_mut().extend_pairs(request.query.iter());
        }
        Ok(url)
    }
}

#[async_trait::async_trait]
impl ApiClient for AppStoreConnectClient {
    async fn execute(&self, request: ApiRequest) -> Result<ApiResponse, ApiClientError> {
        let url = self.url(&request)?;
        let token = self.token_provider.get_token().await?;

        tracing::debug!(method = %request.method, path = %request.path, "Making API request");

        let mut http_request = Request::new(request.method, url)
            .bearer_auth(&token)
            .header("Content-Type", "application/json")
            .header("Accept", "application/json");
        if let Some(data) = &request.body {
            http_request = http_request.json(&RequestEnvelopeDTO { data })?;
        }

        let response = http_request.send(&*self.http_client).await?;
        parse_envelope(response.status, &response.body)
    }
}

fn parse_envelope(status: StatusCode, body: &[u8]) -> Result<ApiResponse, ApiClientError> {
    if body.is_empty() {
        return if status.is_success() {
            Ok(ApiResponse::default())
        } else {
            Err(ApiClientError::EmptyErrorResponse { status })
        };
    }

    let envelope: ResponseEnvelopeDTO = match serde_json::from_slice(body) {
        Ok(envelope) => envelope,
        Err(_) if status.0 >= 400 => {
            return Err(ApiClientError::UnparsableErrorResponse {
                status,
                body: String::from_utf8_lossy(body).into_owned(),
            });
        }
        Err(error) => return Err(ApiClientError::MalformedEnvelope(error.to_string())),
    };

    if !envelope.errors.is_empty() {
        return Err(ApiClientError::Api {
            status,
            message: aggregate_errors(&envelope.errors),
        });
    }

    if status.0 >= 400 {
        return Err(ApiClientError::Status { status });
    }

    Ok(ApiResponse {
        data: envelope.data.filter(|data| !data.is_null()),
        included: envelope.included,
        links: envelope.links,
        meta: envelope.meta,
    })
}

fn aggregate_errors(errors: &[ErrorObjectDTO]) -> String {
    errors
        .iter()
        .map(|error| format!("{}: {}", error.title, error.detail))
        .join("; ")
}

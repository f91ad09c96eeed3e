//! Minimal HTTP abstraction so the API transport can be exercised without a network.

pub mod reqwest_client;

use std::collections::HashMap;
use std::fmt::Display;

use itertools::Itertools;
use serde::Serialize;
use strum::Display;
use thiserror::Error;


#[cfg_attr(any(test, feature = "mock"), mockall::automock)]
#[async_trait::async_trait]
pub trait HttpClient: Send + Sync {
    async fn send(&self, request: Request) -> Result<Response, Error>;
}

pub type Headers = HashMap<String, String>;

#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub struct StatusCode(pub u16);

impl StatusCode {
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.0)
    }

    pub fn is_client_error(&self) -> bool {
        (400..500).contains(&self.0)
    }

    pub fn is_server_error(&self) -> bool {
        (500..600).contains(&self.0)
    }
}

impl Display for StatusCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[derive(Copy, Clone, Debug, Eq, PartialEq, Display)]
pub enum Method {
    #[strum(serialize = "GET")]
    Get,
    #[strum(serialize = "POST")]
    Post,
    #[strum(serialize = "PATCH")]
    Patch,
    #[strum(serialize = "DELETE")]
    Delete,
}

#[derive(Debug, Error)]
pub enum Error {
    #[error("HTTP error: {0}")]
    Transport(String),
    #[error("Invalid header `{name}`: {reason}")]
    InvalidHeader { name: String, reason: String },
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

#[derive(Clone, Debug, PartialEq)]
pub struct Request {
    pub method: Method,
    pub url: String,
    pub headers: Headers,
    pub body: Option<Vec<u8>>,
}

#[derive(Clone, Debug, PartialEq)]
pub struct Response {
    pub status: StatusCode,
    pub headers: Headers,
    pub body: Vec<u8>,
}

impl Request {
    pub fn new(method: Method, url: impl Into<String>) -> Self {
        Self {
            method,
            url: url.into(),
            headers: Headers::default(),
            body: None,
        }
    }

    pub fn header(mut self, name: &str, value: &str) -> Self {
        self.headers.insert(name.to_string(), value.to_string());
        self
    }

    pub fn bearer_auth(self, token: &str) -> Self {
        self.header("Authorization", &format!("Bearer {token}"))
    }

    pub fn json<T: Serialize>(mut self, value: &T) -> Result<Self, Error> {
        self.body = Some(serde_json::to_vec(value)?);
        Ok(self.header("Content-Type", "application/json"))
    }

    /// Sends through `client`, logging the exchange with credentials redacted
    pub async fn send(self, client: &dyn HttpClient) -> Result<Response, Error> {
        let target = format!("{} {}", self.method, self.url);
        tracing::trace!(
            "Request {target}\nHeaders:\n{}\nBody:\n{}",
            format_headers(&self.headers),
            format_body(self.body.as_deref())
        );

        match client.send(self).await {
            Ok(response) => {
                tracing::debug!("{target} - HTTP {}", response.status);
                tracing::trace!(
                    "Response {target}\nHeaders:\n{}\nBody:\n{}",
                    format_headers(&response.headers),
                    format_body(Some(&response.body))
                );
                Ok(response)
            }
            Err(error) => {
                tracing::error!(%error, "{target} failed");
                Err(error)
            }
        }
    }
}

fn format_headers(headers: &Headers) -> String {
    if headers.is_empty() {
        return "<None>".to_string();
    }

    headers
        .iter()
        .sorted_by(|(a, _), (b, _)| a.cmp(b))
        .map(|(name, value)| {
            if name.eq_ignore_ascii_case("authorization") {
                format!("{name}: <redacted>")
            } else {
                format!("{name}: {value}")
            }
        })
        .join("\n")
}

fn format_body(body: Option<&[u8]>) -> String {
    match body {
        None => "<None>".to_string(),
        Some(bytes) => String::from_utf8_lossy(bytes).into_owned(),
    }
}

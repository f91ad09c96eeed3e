//! Self-signed App Store Connect API tokens.
//!
//! One [`BearerTokenProvider`] per API key. Tokens are minted on demand, shared by all callers while
//! fresh and regenerated once they get within [`TOKEN_REFRESH_BUFFER`] of expiry.

use std::sync::Arc;

use asc_crypto::signer::es256::ES256Signer;
use asc_crypto::{Signer, SignerError};
use async_trait::async_trait;
use secrecy::SecretSlice;
use thiserror::Error;
use time::{Duration, OffsetDateTime};
use tokio::sync::RwLock;

use super::clock::Clock;
use super::jwt::model::{APP_STORE_CONNECT_AUDIENCE, JWTPayload};
use super::jwt::{Jwt, JwtError};
use crate::config::core_config::Credentials;


/// Upper bound enforced by App Store Connect
pub const TOKEN_LIFETIME: Duration = Duration::minutes(20);
pub const TOKEN_REFRESH_BUFFER: Duration = Duration::minutes(5);

#[derive(Debug, Error)]
pub enum TokenError {
    #[error("Invalid private key: {0}")]
    InvalidKey(#[source] SignerError),
    #[error("Failed to sign token: {0}")]
    Signing(#[from] JwtError),
}

#[cfg_attr(any(test, feature = "mock"), mockall::automock)]
#[async_trait]
pub trait TokenProvider: Send + Sync {
    async fn get_token(&self) -> Result<String, TokenError>;
}

struct CachedToken {
    token: String,
    expires_at: OffsetDateTime,
}

impl CachedToken {
    fn is_fresh(&self, now: OffsetDateTime) -> bool {
        now < self.expires_at - TOKEN_REFRESH_BUFFER
    }
}

pub struct BearerTokenProvider {
    issuer_id: String,
    key_id: String,
    private_key: SecretSlice<u8>,
    signer: Arc<dyn Signer>,
    clock: Arc<dyn Clock>,
    cache: RwLock<Option<CachedToken>>,
}

impl BearerTokenProvider {
    /// Fails if the private key is not an unencrypted PKCS8 P-256 key
    pub fn new(credentials: &Credentials, clock: Arc<dyn Clock>) -> Result<Self, TokenError> {
        let key_pair =
            ES256Signer::parse_pkcs8_pem(&credentials.private_key).map_err(TokenError::InvalidKey)?;

        Ok(Self::with_signer(
            credentials.issuer_id.to_owned(),
            credentials.key_id.to_owned(),
            key_pair.private,
            Arc::new(ES256Signer {}),
            clock,
        ))
    }

    pub fn with_signer(
        issuer_id: String,
        key_id: String,
        private_key: SecretSlice<u8>,
        signer: Arc<dyn Signer>,
        clock: Arc<dyn Clock>,
    ) -> Self {
        Self {
            issuer_id,
            key_id,
            private_key,
            signer,
            clock,
            cache: RwLock::new(None),
        }
    }

    fn generate(&self, now: OffsetDateTime) -> Result<CachedToken, TokenError> {
        let expires_at = now + TOKEN_LIFETIME;
        let payload = JWTPayload {
            issuer: self.issuer_id.to_owned(),
            issued_at: now.unix_timestamp(),
            expires_at: expires_at.unix_timestamp(),
            audience: APP_STORE_CONNECT_AUDIENCE.to_string(),
        };

        let token =
            Jwt::new_es256(&self.key_id, payload).tokenize(&*self.signer, &self.private_key)?;

        tracing::debug!(key_id = %self.key_id, %expires_at, "Generated App Store Connect token");

        Ok(CachedToken { token, expires_at })
    }
}

#[async_trait]
impl TokenProvider for BearerTokenProvider {
    async fn get_token(&self) -> Result<String, TokenError> {
        {
            let cache = self.cache.read().await;
            if let Some(cached) = cache.as_ref()
                && cached.is_fresh(self.clock.now_utc())
            {
                return Ok(cached.token.to_owned());
            }
        }

        let mut cache = self.cache.write().await;
        // another caller may have refreshed while we waited for the write lock
        let now = self.clock.now_utc();
        if let Some(cached) = cache.as_ref()
            && cached.is_fresh(now)
        {
            return Ok(cached.token.to_owned());
        }

        let generated = self.generate(now)?;
        let token = generated.token.to_owned();
        *cache = Some(generated);

        Ok(token)
    }
}

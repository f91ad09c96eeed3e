use asc_crypto::utilities::{decode_b64url, encode_b64url};
use asc_crypto::{Signer, SignerError};
use secrecy::SecretSlice;
use serde::de::DeserializeOwned;
use thiserror::Error;

pub mod model;

use model::{DecomposedJwt, ES256_ALGORITHM, JWT_TYPE, JWTHeader, JWTPayload};


#[derive(Debug, Error)]
pub enum JwtError {
    #[error("JWT serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
    #[error("JWT encoding error: {0}")]
    Encoding(String),
    #[error("JWT signing error: {0}")]
    Signing(#[from] SignerError),
    #[error("Malformed JWT: {0}")]
    Malformed(String),
}

#[derive(Debug, Clone)]
pub struct Jwt {
    pub header: JWTHeader,
    pub payload: JWTPayload,
}

impl Jwt {
    pub fn new_es256(key_id: impl Into<String>, payload: JWTPayload) -> Self {
        Self {
            header: JWTHeader {
                algorithm: ES256_ALGORITHM.to_string(),
                key_id: Some(key_id.into()),
                r#type: Some(JWT_TYPE.to_string()),
            },
            payload,
        }
    }

    /// `base64url(header).base64url(payload).base64url(signature)`
    pub fn tokenize(
        &self,
        signer: &dyn Signer,
        private_key: &SecretSlice<u8>,
    ) -> Result<String, JwtError> {
        let header = encode_segment(&serde_json::to_vec(&self.header)?)?;
        let payload = encode_segment(&serde_json::to_vec(&self.payload)?)?;

        let unsigned_input = format!("{header}.{payload}");
        let signature = signer.sign(unsigned_input.as_bytes(), private_key)?;

        Ok(format!("{unsigned_input}.{}", encode_segment(&signature)?))
    }

    /// Splits a compact token without verifying it
    pub fn decompose(token: &str) -> Result<DecomposedJwt, JwtError> {
        let mut parts = token.split('.');
        let (Some(header), Some(payload), Some(signature), None) =
            (parts.next(), parts.next(), parts.next(), parts.next())
        else {
            return Err(JwtError::Malformed(
                "expected three dot-separated segments".to_string(),
            ));
        };

        Ok(DecomposedJwt {
            header: decode_segment(header)?,
            payload: decode_segment(payload)?,
            unsigned_input: format!("{header}.{payload}"),
            signature: decode_b64url(signature).map_err(|e| JwtError::Malformed(e.to_string()))?,
        })
    }
}

fn encode_segment(input: &[u8]) -> Result<String, JwtError> {
    encode_b64url(input).map_err(|e| JwtError::Encoding(e.to_string()))
}

fn decode_segment<T: DeserializeOwned>(segment: &str) -> Result<T, JwtError> {
    let bytes = decode_b64url(segment).map_err(|e| JwtError::Malformed(e.to_string()))?;
    Ok(serde_json::from_slice(&bytes)?)
}

use serde::{Deserialize, Serialize};
use serde_with::skip_serializing_none;

pub const ES256_ALGORITHM: &str = "ES256";
pub const JWT_TYPE: &str = "JWT";
pub const APP_STORE_CONNECT_AUDIENCE: &str = "appstoreconnect-v1";

#[skip_serializing_none]
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct JWTHeader {
    #[serde(rename = "alg")]
    pub algorithm: String,

    #[serde(rename = "kid")]
    pub key_id: Option<String>,

    #[serde(rename = "typ")]
    pub r#type: Option<String>,
}

/// Claims accepted by the App Store Connect API, timestamps in Unix seconds
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct JWTPayload {
    #[serde(rename = "iss")]
    pub issuer: String,

    #[serde(rename = "iat")]
    pub issued_at: i64,

    #[serde(rename = "exp")]
    pub expires_at: i64,

    #[serde(rename = "aud")]
    pub audience: String,
}

#[derive(Debug, Clone)]
pub struct DecomposedJwt {
    pub header: JWTHeader,
    pub payload: JWTPayload,
    pub unsigned_input: String,
    pub signature: Vec<u8>,
}

//! Stateless transforms over certificate bytes as delivered by App Store Connect (base64 DER).

use std::collections::BTreeMap;

use ct_codecs::{Base64, Decoder, Encoder};
use thiserror::Error;
use x509_parser::certificate::X509Certificate;
use x509_parser::prelude::FromDer;

pub mod pkcs12;
mod x509_extension;

pub use pkcs12::{DecodedPkcs12, decode_pkcs12, encode_pkcs12};


pub const CERTIFICATE_PEM_LABEL: &str = "CERTIFICATE";

#[derive(Debug, Error)]
pub enum MaterialError {
    #[error("failed to decode base64 {input}: {reason}")]
    Base64 { input: &'static str, reason: String },
    #[error("failed to parse certificate: {0}")]
    CertificateParsing(String),
    #[error("failed to parse private key: {0}")]
    PrivateKeyParsing(String),
    #[error("unsupported private key type: {0}")]
    UnsupportedKeyType(String),
    #[error("failed to encode PKCS12: {0}")]
    Pkcs12Encoding(String),
    #[error("failed to decode PKCS12: {0}")]
    Pkcs12Decoding(String),
}

/// Wraps base64 DER into a `CERTIFICATE` PEM block and returns that PEM text base64 encoded.
///
/// Empty input yields an empty PEM block rather than an error.
pub fn der_to_pem(base64_der: &str) -> Result<String, MaterialError> {
    let der = decode_base64(base64_der, "certificate")?;
    let pem = pem_encode(der);

    encode_base64(pem.as_bytes())
}

/// Every X.509v3 extension as hex keyed by its well-known name (or dotted OID), plus
/// human-readable companions for key usage, extended key usage, SAN and AIA.
pub fn extract_extensions(base64_der: &str) -> Result<BTreeMap<String, String>, MaterialError> {
    let der = decode_base64(base64_der, "certificate")?;
    let certificate = parse_certificate(&der)?;

    Ok(x509_extension::extract(&certificate))
}

/// Authority Information Access `caIssuers` URIs in certificate order
pub fn extract_ca_issuers(base64_der: &str) -> Result<Vec<String>, MaterialError> {
    let der = decode_base64(base64_der, "certificate")?;
    let certificate = parse_certificate(&der)?;

    Ok(x509_extension::ca_issuers(&certificate))
}

pub(crate) fn decode_base64(input: &str, name: &'static str) -> Result<Vec<u8>, MaterialError> {
    Base64::decode_to_vec(input.trim(), None).map_err(|e| MaterialError::Base64 {
        input: name,
        reason: e.to_string(),
    })
}

pub(crate) fn encode_base64(input: &[u8]) -> Result<String, MaterialError> {
    // only fails on output buffer overflow
    Base64::encode_to_string(input).map_err(|e| MaterialError::Base64 {
        input: "output",
        reason: e.to_string(),
    })
}

pub(crate) fn pem_encode(der: Vec<u8>) -> String {
    pem::encode_config(
        &pem::Pem::new(CERTIFICATE_PEM_LABEL, der),
        pem::EncodeConfig::new().set_line_ending(pem::LineEnding::LF),
    )
}

fn parse_certificate(der: &[u8]) -> Result<X509Certificate<'_>, MaterialError> {
    let (_, certificate) = X509Certificate::from_der(der)
        .map_err(|e| MaterialError::CertificateParsing(e.to_string()))?;

    Ok(certificate)
}

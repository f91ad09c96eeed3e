use openssl::ec::EcKey;
use openssl::hash::MessageDigest;
use openssl::nid::Nid;
use openssl::pkcs12::Pkcs12;
use openssl::pkey::{PKey, Private};
use openssl::rsa::Rsa;
use openssl::x509::X509;
use secrecy::{ExposeSecret, SecretString};

use super::{MaterialError, decode_base64, encode_base64};

const PKCS12_ITERATIONS: u32 = 2048;

#[derive(Debug, Clone)]
pub struct DecodedPkcs12 {
    pub certificate_pem: String,
    /// Always PKCS8 (`PRIVATE KEY`) regardless of how it was bundled
    pub private_key_pem: SecretString,
}

/// Bundles a PEM certificate and its PEM private key (PKCS1 RSA, SEC1 EC or PKCS8) into a
/// base64 PKCS12 protected with AES-256-CBC and a SHA-256 MAC.
pub fn encode_pkcs12(
    certificate_pem: &str,
    private_key_pem: &SecretString,
    password: &SecretString,
) -> Result<String, MaterialError> {
    let certificate = pem::parse(certificate_pem)
        .map_err(|e| MaterialError::CertificateParsing(format!("failed to decode PEM: {e}")))?;

    encode_pkcs12_der(certificate.contents(), private_key_pem, password)
}

pub(crate) fn encode_pkcs12_der(
    certificate_der: &[u8],
    private_key_pem: &SecretString,
    password: &SecretString,
) -> Result<String, MaterialError> {
    let certificate = X509::from_der(certificate_der)
        .map_err(|e| MaterialError::CertificateParsing(e.to_string()))?;
    let private_key = parse_private_key(private_key_pem)?;

    let bundle = Pkcs12::builder()
        .pkey(&private_key)
        .cert(&certificate)
        .key_algorithm(Nid::AES_256_CBC)
        .cert_algorithm(Nid::AES_256_CBC)
        .key_iter(PKCS12_ITERATIONS)
        .mac_iter(PKCS12_ITERATIONS)
        .mac_md(MessageDigest::sha256())
        .build2(password.expose_secret())
        .map_err(|e| MaterialError::Pkcs12Encoding(e.to_string()))?;

    let der = bundle
        .to_der()
        .map_err(|e| MaterialError::Pkcs12Encoding(e.to_string()))?;

    encode_base64(&der)
}

/// Wrong password and corrupt input both fail
pub fn decode_pkcs12(
    base64_pkcs12: &str,
    password: &SecretString,
) -> Result<DecodedPkcs12, MaterialError> {
    let der = decode_base64(base64_pkcs12, "PKCS12")?;

    let parsed = Pkcs12::from_der(&der)
        .and_then(|bundle| bundle.parse2(password.expose_secret()))
        .map_err(|e| MaterialError::Pkcs12Decoding(e.to_string()))?;

    let certificate = parsed.cert.ok_or_else(|| {
        MaterialError::Pkcs12Decoding("bundle contains no certificate".to_string())
    })?;
    let private_key = parsed.pkey.ok_or_else(|| {
        MaterialError::Pkcs12Decoding("bundle contains no private key".to_string())
    })?;

    let certificate_pem = certificate
        .to_pem()
        .map_err(|e| MaterialError::Pkcs12Decoding(e.to_string()))
        .and_then(into_utf8)?;
    let private_key_pem = private_key
        .private_key_to_pem_pkcs8()
        .map_err(|e| MaterialError::PrivateKeyParsing(e.to_string()))
        .and_then(into_utf8)?;

    Ok(DecodedPkcs12 {
        certificate_pem,
        private_key_pem: SecretString::from(private_key_pem),
    })
}

fn parse_private_key(private_key_pem: &SecretString) -> Result<PKey<Private>, MaterialError> {
    let block = pem::parse(private_key_pem.expose_secret())
        .map_err(|e| MaterialError::PrivateKeyParsing(format!("failed to decode PEM: {e}")))?;

    let private_key = match block.tag() {
        "RSA PRIVATE KEY" => Rsa::private_key_from_der(block.contents()).and_then(PKey::from_rsa),
        "EC PRIVATE KEY" => {
            EcKey::private_key_from_der(block.contents()).and_then(PKey::from_ec_key)
        }
        "PRIVATE KEY" => PKey::private_key_from_pkcs8(block.contents()),
        other => return Err(MaterialError::UnsupportedKeyType(other.to_string())),
    };

    private_key.map_err(|e| MaterialError::PrivateKeyParsing(e.to_string()))
}

fn into_utf8(bytes: Vec<u8>) -> Result<String, MaterialError> {
    String::from_utf8(bytes).map_err(|e| MaterialError::Pkcs12Decoding(e.to_string()))
}

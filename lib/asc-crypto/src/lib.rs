use secrecy::SecretSlice;
use thiserror::Error;

pub mod signer;
pub mod utilities;

#[derive(Debug, Error)]
pub enum SignerError {
    #[error("Could not sign: `{0}`")]
    CouldNotSign(String),
    #[error("Could not extract keypair")]
    CouldNotExtractKeyPair,
    #[error("Could not extract public key: `{0}`")]
    CouldNotExtractPublicKey(String),
    #[error("Could not verify: `{0}`")]
    CouldNotVerify(String),
    #[error("Invalid signature")]
    InvalidSignature,
    #[error("Unsupported key: `{0}`")]
    UnsupportedKey(String),
}

#[cfg_attr(any(test, feature = "mock"), mockall::automock)]
pub trait Signer: Send + Sync {
    fn sign(&self, input: &[u8], private_key: &SecretSlice<u8>) -> Result<Vec<u8>, SignerError>;

    fn verify(&self, input: &[u8], signature: &[u8], public_key: &[u8])
    -> Result<(), SignerError>;
}

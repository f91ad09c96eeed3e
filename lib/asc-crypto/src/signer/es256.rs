use p256::ecdsa::signature::{Signer as _, Verifier as _};
use p256::ecdsa::{Signature, SigningKey, VerifyingKey};
use p256::pkcs8::DecodePrivateKey;
use secrecy::{ExposeSecret, SecretSlice, SecretString};

use crate::{Signer, SignerError};

/// ECDSA over P-256 with SHA-256, producing raw `r || s` signatures as required by JWS `ES256`
pub struct ES256Signer {}

pub struct KeyPair {
    /// SEC1 uncompressed point
    pub public: Vec<u8>,
    /// Raw 32-byte scalar
    pub private: SecretSlice<u8>,
}

impl ES256Signer {
    /// Loads an unencrypted PKCS8 (`PRIVATE KEY`) PEM holding a P-256 key
    pub fn parse_pkcs8_pem(private_key_pem: &SecretString) -> Result<KeyPair, SignerError> {
        let secret_key = p256::SecretKey::from_pkcs8_pem(private_key_pem.expose_secret().trim())
            .map_err(|e| SignerError::UnsupportedKey(e.to_string()))?;

        Ok(KeyPair {
            public: secret_key
                .public_key()
                .to_sec1_bytes()
                .into_vec(),
            private: secret_key.to_bytes().to_vec().into(),
        })
    }

    pub fn parse_public_key(public_key: &[u8]) -> Result<VerifyingKey, SignerError> {
        VerifyingKey::from_sec1_bytes(public_key)
            .map_err(|e| SignerError::CouldNotExtractPublicKey(e.to_string()))
    }
}

impl Signer for ES256Signer {
    fn sign(&self, input: &[u8], private_key: &SecretSlice<u8>) -> Result<Vec<u8>, SignerError> {
        let signing_key = SigningKey::from_slice(private_key.expose_secret())
            .map_err(|_| SignerError::CouldNotExtractKeyPair)?;

        let signature: Signature = signing_key
            .try_sign(input)
            .map_err(|e| SignerError::CouldNotSign(e.to_string()))?;

        Ok(signature.to_bytes().to_vec())
    }

    fn verify(
        &self,
        input: &[u8],
        signature: &[u8],
        public_key: &[u8],
    ) -> Result<(), SignerError> {
        let verifying_key = Self::parse_public_key(public_key)?;
        let signature =
            Signature::from_slice(signature).map_err(|e| SignerError::CouldNotVerify(e.to_string()))?;

        verifying_key
            .verify(input, &signature)
            .map_err(|_| SignerError::InvalidSignature)
    }
}

use std::collections::BTreeMap;

use secrecy::SecretString;
use serde::{Deserialize, Serialize};
use shared_types::{CertificateId, PassTypeId};
use strum::{Display, EnumString};
use time::OffsetDateTime;

use crate::mapper::{opt_secret_string, timestamp};
use crate::proto::certificate_material::{
    MaterialError, der_to_pem, extract_ca_issuers, extract_extensions,
};

#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash, Serialize, Deserialize, Display, EnumString)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
#[strum(serialize_all = "SCREAMING_SNAKE_CASE")]
pub enum CertificateType {
    IosDevelopment,
    IosDistribution,
    MacAppDevelopment,
    MacAppDistribution,
    MacInstallerDistribution,
    PassTypeId,
    PassTypeIdWithNfc,
    DeveloperIdKext,
    DeveloperIdApplication,
    DevelopmentPushSsl,
    ProductionPushSsl,
    PushSsl,
}

impl CertificateType {
    pub fn requires_pass_type_id(&self) -> bool {
        matches!(self, Self::PassTypeId | Self::PassTypeIdWithNfc)
    }
}

/// Certificate as known to App Store Connect
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct Certificate {
    pub id: CertificateId,
    pub certificate_type: CertificateType,
    pub serial_number: Option<String>,
    pub display_name: Option<String>,
    pub name: Option<String>,
    pub platform: Option<String>,
    #[serde(with = "timestamp::option", default)]
    pub expiration_date: Option<OffsetDateTime>,
    pub requester_email: Option<String>,
    pub requester_first_name: Option<String>,
    pub requester_last_name: Option<String>,
    pub pass_type_id: Option<PassTypeId>,

    /// `None` until the issuer has delivered content
    pub material: Option<CertificateMaterial>,
}

/// Base64 DER content together with everything derived from it.
///
/// Only constructible from the DER, and deserialization recomputes the derived fields, so they can
/// never drift from the content they were computed from.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "StoredMaterialDTO")]
pub struct CertificateMaterial {
    certificate_content: String,
    certificate_content_pem: String,
    certificate_ca_issuers: Vec<String>,
    certificate_extensions: BTreeMap<String, String>,
}

impl CertificateMaterial {
    pub fn from_base64_der(content: impl Into<String>) -> Result<Self, MaterialError> {
        let certificate_content = content.into();

        Ok(Self {
            certificate_content_pem: der_to_pem(&certificate_content)?,
            certificate_ca_issuers: extract_ca_issuers(&certificate_content)?,
            certificate_extensions: extract_extensions(&certificate_content)?,
            certificate_content,
        })
    }

    /// Base64 DER as returned by the API
    pub fn content(&self) -> &str {
        &self.certificate_content
    }

    /// Base64 of the PEM text
    pub fn content_pem(&self) -> &str {
        &self.certificate_content_pem
    }

    pub fn ca_issuers(&self) -> &[String] {
        &self.certificate_ca_issuers
    }

    pub fn extensions(&self) -> &BTreeMap<String, String> {
        &self.certificate_extensions
    }
}

#[derive(Deserialize)]
struct StoredMaterialDTO {
    certificate_content: String,
}

impl TryFrom<StoredMaterialDTO> for CertificateMaterial {
    type Error = MaterialError;

    fn try_from(value: StoredMaterialDTO) -> Result<Self, Self::Error> {
        Self::from_base64_der(value.certificate_content)
    }
}

/// Tracked certificate record: the remote view plus inputs that only exist locally
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct CertificateState {
    pub certificate: Certificate,
    pub csr_content: Option<String>,
    pub recreate_threshold: u64,
    #[serde(with = "opt_secret_string", default)]
    pub private_key_pem: Option<SecretString>,
    #[serde(with = "opt_secret_string", default)]
    pub pkcs12_bundle_password: Option<SecretString>,
    pub pkcs12_bundle_content: Option<String>,
}

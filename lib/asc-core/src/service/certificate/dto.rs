use secrecy::SecretString;
use serde::{Deserialize, Serialize};
use shared_types::PassTypeId;
use time::OffsetDateTime;

use crate::mapper::timestamp;
use crate::model::certificate::CertificateType;

pub(crate) const CERTIFICATES_RESOURCE_TYPE: &str = "certificates";
pub(crate) const PASS_TYPE_IDS_RESOURCE_TYPE: &str = "passTypeIds";

/// Desired state of a certificate as requested by the caller
#[derive(Clone, Debug)]
pub struct CertificateSpecDTO {
    pub certificate_type: CertificateType,
    /// PEM encoded CSR
    pub csr_content: String,
    pub pass_type_id: Option<PassTypeId>,
    /// Seconds before expiration at which replacement is forced, `0` disables
    pub recreate_threshold: Option<u64>,
    pub private_key_pem: Option<SecretString>,
    pub pkcs12_bundle_password: Option<SecretString>,
}

pub type CreateCertificateRequestDTO = CertificateSpecDTO;
pub type UpdateCertificateRequestDTO = CertificateSpecDTO;

#[derive(Clone, Debug, Default)]
pub struct CertificateFilterDTO {
    pub certificate_type: Option<CertificateType>,
    pub serial_number: Option<String>,
}

#[derive(Clone, Debug, Default)]
pub struct CertificateListFilterDTO {
    pub certificate_type: Option<CertificateType>,
    /// Substring match, empty matches everything
    pub display_name: Option<String>,
}

#[derive(Clone, Debug, Eq, PartialEq, Serialize)]
#[serde(tag = "action", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum CertificatePlanDTO {
    NoChange,
    UpdateInPlace,
    Replace { reason: ReplacementReason },
}

#[derive(Clone, Debug, Eq, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ReplacementReason {
    ImmutableFieldChanged {
        field: &'static str,
    },
    WithinRecreateThreshold {
        #[serde(with = "timestamp::option")]
        expiration_date: Option<OffsetDateTime>,
        threshold: u64,
    },
}

#[derive(Clone, Debug, Deserialize)]
pub(crate) struct CertificateResourceDTO {
    pub id: String,
    #[serde(default)]
    pub attributes: CertificateAttributesDTO,
    #[serde(default)]
    pub relationships: Option<CertificateRelationshipsDTO>,
}

#[derive(Clone, Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub(crate) struct CertificateAttributesDTO {
    pub serial_number: Option<String>,
    pub certificate_content: Option<String>,
    pub display_name: Option<String>,
    pub name: Option<String>,
    pub certificate_type: Option<String>,
    pub platform: Option<String>,
    #[serde(deserialize_with = "timestamp::remote_option::deserialize")]
    pub expiration_date: Option<OffsetDateTime>,
    pub requester_email: Option<String>,
    pub requester_first_name: Option<String>,
    pub requester_last_name: Option<String>,
}

#[derive(Clone, Debug, Default, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct CertificateRelationshipsDTO {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pass_type_id: Option<RelationshipDTO>,
}

#[derive(Clone, Debug, Default, Deserialize, Serialize)]
pub(crate) struct RelationshipDTO {
    #[serde(default)]
    pub data: Option<ResourceIdentifierDTO>,
}

#[derive(Clone, Debug, Deserialize, Serialize)]
pub(crate) struct ResourceIdentifierDTO {
    #[serde(rename = "type")]
    pub r#type: String,
    pub id: String,
}

#[derive(Debug, Serialize)]
pub(crate) struct CreateCertificateResourceDTO {
    #[serde(rename = "type")]
    pub r#type: &'static str,
    pub attributes: CreateCertificateAttributesDTO,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub relationships: Option<CertificateRelationshipsDTO>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct CreateCertificateAttributesDTO {
    pub certificate_type: CertificateType,
    pub csr_content: String,
}

use std::str::FromStr;

use secrecy::SecretString;
use serde_json::Value;

use super::dto::{
    CERTIFICATES_RESOURCE_TYPE, CertificateRelationshipsDTO, CertificateResourceDTO,
    CertificateSpecDTO, CreateCertificateAttributesDTO, CreateCertificateResourceDTO,
    PASS_TYPE_IDS_RESOURCE_TYPE, RelationshipDTO, ResourceIdentifierDTO,
};
use crate::model::certificate::{Certificate, CertificateMaterial, CertificateType};
use crate::proto::certificate_material::MaterialError;
use crate::proto::certificate_material::pkcs12::encode_pkcs12_der;
use crate::proto::certificate_material::decode_base64;
use crate::service::error::ServiceError;

pub(super) fn certificate_from_resource(
    resource: CertificateResourceDTO,
) -> Result<Certificate, ServiceError> {
    let attributes = resource.attributes;

    let certificate_type = attributes
        .certificate_type
        .as_deref()
        .ok_or_else(|| ServiceError::MappingError("certificate without certificateType".into()))
        .and_then(|value| {
            CertificateType::from_str(value).map_err(|_| {
                ServiceError::MappingError(format!("unknown certificate type `{value}`"))
            })
        })?;

    let material = attributes
        .certificate_content
        .filter(|content| !content.is_empty())
        .map(CertificateMaterial::from_base64_der)
        .transpose()?;

    let pass_type_id = resource
        .relationships
        .and_then(|relationships| relationships.pass_type_id)
        .and_then(|relationship| relationship.data)
        .map(|data| data.id.into());

    Ok(Certificate {
        id: resource.id.into(),
        certificate_type,
        serial_number: attributes.serial_number,
        display_name: attributes.display_name,
        name: attributes.name,
        platform: attributes.platform,
        expiration_date: attributes.expiration_date,
        requester_email: attributes.requester_email,
        requester_first_name: attributes.requester_first_name,
        requester_last_name: attributes.requester_last_name,
        pass_type_id,
        material,
    })
}

pub(super) fn create_request_body(spec: &CertificateSpecDTO) -> Result<Value, ServiceError> {
    let relationships = spec
        .pass_type_id
        .as_ref()
        .map(|pass_type_id| CertificateRelationshipsDTO {
            pass_type_id: Some(RelationshipDTO {
                data: Some(ResourceIdentifierDTO {
                    r#type: PASS_TYPE_IDS_RESOURCE_TYPE.to_string(),
                    id: pass_type_id.to_string(),
                }),
            }),
        });

    serde_json::to_value(CreateCertificateResourceDTO {
        r#type: CERTIFICATES_RESOURCE_TYPE,
        attributes: CreateCertificateAttributesDTO {
            certificate_type: spec.certificate_type,
            csr_content: spec.csr_content.clone(),
        },
        relationships,
    })
    .map_err(|e| ServiceError::MappingError(e.to_string()))
}

/// PKCS12 bundle of the issued certificate, if every local input is available
pub(super) fn pkcs12_bundle(
    material: Option<&CertificateMaterial>,
    private_key_pem: Option<&SecretString>,
    password: Option<&SecretString>,
) -> Result<Option<String>, MaterialError> {
    let (Some(material), Some(private_key_pem), Some(password)) =
        (material, private_key_pem, password)
    else {
        return Ok(None);
    };

    let der = decode_base64(material.content(), "certificate")?;
    encode_pkcs12_der(&der, private_key_pem, password).map(Some)
}

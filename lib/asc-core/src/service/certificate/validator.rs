use secrecy::{ExposeSecret, SecretString};

use super::dto::CertificateSpecDTO;
use crate::model::certificate::CertificateState;
use crate::service::common_validator::validate_remote_id;
use crate::service::error::ValidationError;

pub(crate) fn validate_certificate_spec(spec: &CertificateSpecDTO) -> Result<(), ValidationError> {
    if spec.certificate_type.requires_pass_type_id() && spec.pass_type_id.is_none() {
        return Err(ValidationError::MissingPassTypeId);
    }

    if spec.csr_content.trim().is_empty() {
        return Err(ValidationError::EmptyField("csr_content"));
    }

    if let Some(pass_type_id) = &spec.pass_type_id {
        validate_remote_id(pass_type_id.as_str(), "pass_type_id")?;
    }

    Ok(())
}

/// First field that cannot change without replacing the certificate.
///
/// A tracked record without CSR (imported) adopts whatever CSR is supplied.
pub(crate) fn changed_immutable_field(
    state: &CertificateState,
    spec: &CertificateSpecDTO,
) -> Option<&'static str> {
    if state.certificate.certificate_type != spec.certificate_type {
        return Some("certificate_type");
    }

    if state
        .csr_content
        .as_ref()
        .is_some_and(|csr| csr.trim() != spec.csr_content.trim())
    {
        return Some("csr_content");
    }

    if state.certificate.pass_type_id != spec.pass_type_id {
        return Some("pass_type_id");
    }

    None
}

pub(crate) fn secret_eq(a: Option<&SecretString>, b: Option<&SecretString>) -> bool {
    match (a, b) {
        (None, None) => true,
        (Some(a), Some(b)) => a.expose_secret() == b.expose_secret(),
        _ => false,
    }
}

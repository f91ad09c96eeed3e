use shared_types::CertificateId;

use super::dto::{
    CertificateFilterDTO, CertificateListFilterDTO, CertificatePlanDTO, CertificateResourceDTO,
    CertificateSpecDTO, CreateCertificateRequestDTO, ReplacementReason,
    UpdateCertificateRequestDTO,
};
use super::mapper::{certificate_from_resource, create_request_body, pkcs12_bundle};
use super::validator::{changed_immutable_field, secret_eq, validate_certificate_spec};
use super::{CERTIFICATE_LIST_LIMIT, CERTIFICATES_PATH, CertificateService, needs_replacement};
use crate::model::certificate::{Certificate, CertificateState, CertificateType};
use crate::proto::api_client::ApiRequest;
use crate::service::common_dto::{OperationWarning, Outcome};
use crate::service::common_validator::validate_remote_id;
use crate::service::error::{BusinessLogicError, EntityNotFoundError, ServiceError};

pub(crate) const NOT_REVOKED_SUMMARY: &str = "Certificate Not Revoked";
pub(crate) const NOT_REVOKED_DETAIL: &str = "The certificate has been removed from tracking, but it cannot be revoked programmatically through the App Store Connect API. If you need to revoke this certificate, you must contact Apple Developer Program Support at https://developer.apple.com/support";

impl CertificateService {
    /// Submits the CSR and tracks the issued certificate
    pub async fn create_certificate(
        &self,
        request: CreateCertificateRequestDTO,
    ) -> Result<Outcome<CertificateState>, ServiceError> {
        validate_certificate_spec(&request)?;

        let body = create_request_body(&request)?;
        let resource: CertificateResourceDTO = self
            .api_client
            .execute(ApiRequest::post(CERTIFICATES_PATH, body))
            .await
            .and_then(|response| response.into_data())
            .map_err(ServiceError::remote("create certificate"))?;

        let mut certificate = certificate_from_resource(resource)?;
        certificate.pass_type_id = request.pass_type_id;

        let pkcs12_bundle_content = pkcs12_bundle(
            certificate.material.as_ref(),
            request.private_key_pem.as_ref(),
            request.pkcs12_bundle_password.as_ref(),
        )?;

        tracing::info!(
            certificate_id = %certificate.id,
            certificate_type = %certificate.certificate_type,
            serial_number = ?certificate.serial_number,
            "Created certificate"
        );

        Ok(Outcome::new(CertificateState {
            certificate,
            csr_content: Some(request.csr_content),
            recreate_threshold: request
                .recreate_threshold
                .unwrap_or(self.config.certificate.default_recreate_threshold),
            private_key_pem: request.private_key_pem,
            pkcs12_bundle_password: request.pkcs12_bundle_password,
            pkcs12_bundle_content,
        }))
    }

    /// Refreshes a tracked certificate from the remote view, keeping local inputs
    pub async fn read_certificate(
        &self,
        state: &CertificateState,
    ) -> Result<Outcome<CertificateState>, ServiceError> {
        let mut certificate = self.get_certificate(&state.certificate.id).await?;
        if certificate.pass_type_id.is_none() {
            certificate.pass_type_id = state.certificate.pass_type_id.clone();
        }

        let content_unchanged = certificate.material.as_ref().map(|m| m.content())
            == state.certificate.material.as_ref().map(|m| m.content());

        let pkcs12_bundle_content = if content_unchanged {
            state.pkcs12_bundle_content.clone()
        } else {
            tracing::debug!(certificate_id = %certificate.id, "Certificate content changed remotely");
            pkcs12_bundle(
                certificate.material.as_ref(),
                state.private_key_pem.as_ref(),
                state.pkcs12_bundle_password.as_ref(),
            )?
        };

        Ok(Outcome::new(CertificateState {
            certificate,
            csr_content: state.csr_content.clone(),
            recreate_threshold: state.recreate_threshold,
            private_key_pem: state.private_key_pem.clone(),
            pkcs12_bundle_password: state.pkcs12_bundle_password.clone(),
            pkcs12_bundle_content,
        }))
    }

    pub async fn get_certificate(&self, id: &CertificateId) -> Result<Certificate, ServiceError> {
        validate_remote_id(id.as_str(), "certificate id")?;

        let resource: CertificateResourceDTO = self
            .api_client
            .execute(
                ApiRequest::get(format!("{CERTIFICATES_PATH}/{id}")).query("include", "passTypeId"),
            )
            .await
            .and_then(|response| response.into_data())
            .map_err(ServiceError::remote("read certificate"))?;

        certificate_from_resource(resource)
    }

    /// Exactly one certificate matching the filter
    pub async fn find_certificate(
        &self,
        filter: CertificateFilterDTO,
    ) -> Result<Certificate, ServiceError> {
        let mut matches: Vec<Certificate> = self
            .fetch_certificates(filter.certificate_type)
            .await?
            .into_iter()
            .filter(|certificate| {
                filter.serial_number.as_ref().is_none_or(|serial_number| {
                    certificate.serial_number.as_ref() == Some(serial_number)
                })
            })
            .collect();

        match matches.len() {
            0 => Err(EntityNotFoundError::Certificate.into()),
            1 => Ok(matches.remove(0)),
            count => Err(BusinessLogicError::AmbiguousCertificateFilter { count }.into()),
        }
    }

    pub async fn list_certificates(
        &self,
        filter: CertificateListFilterDTO,
    ) -> Result<Vec<Certificate>, ServiceError> {
        let display_name = filter.display_name.unwrap_or_default();

        Ok(self
            .fetch_certificates(filter.certificate_type)
            .await?
            .into_iter()
            .filter(|certificate| {
                display_name.is_empty()
                    || certificate
                        .display_name
                        .as_ref()
                        .is_some_and(|name| name.contains(&display_name))
            })
            .collect())
    }

    /// Applies changes to local inputs; the certificate itself never changes
    pub async fn update_certificate(
        &self,
        state: &CertificateState,
        request: UpdateCertificateRequestDTO,
    ) -> Result<Outcome<CertificateState>, ServiceError> {
        validate_certificate_spec(&request)?;

        if let Some(field) = changed_immutable_field(state, &request) {
            return Err(BusinessLogicError::CertificateImmutable { field }.into());
        }

        let pkcs12_bundle_content = pkcs12_bundle(
            state.certificate.material.as_ref(),
            request.private_key_pem.as_ref(),
            request.pkcs12_bundle_password.as_ref(),
        )?;

        Ok(Outcome::new(CertificateState {
            certificate: state.certificate.clone(),
            csr_content: Some(request.csr_content),
            recreate_threshold: request
                .recreate_threshold
                .unwrap_or(self.config.certificate.default_recreate_threshold),
            private_key_pem: request.private_key_pem,
            pkcs12_bundle_password: request.pkcs12_bundle_password,
            pkcs12_bundle_content,
        }))
    }

    /// Stops tracking; App Store Connect offers no revocation
    pub async fn delete_certificate(
        &self,
        state: &CertificateState,
    ) -> Result<Outcome<()>, ServiceError> {
        tracing::warn!(
            certificate_id = %state.certificate.id,
            "{NOT_REVOKED_SUMMARY}: {NOT_REVOKED_DETAIL}"
        );

        Ok(Outcome::new(()).with_warning(OperationWarning {
            summary: NOT_REVOKED_SUMMARY.to_string(),
            detail: NOT_REVOKED_DETAIL.to_string(),
        }))
    }

    /// Starts tracking an existing certificate; CSR and local key material stay unset
    pub async fn import_certificate(
        &self,
        id: &CertificateId,
    ) -> Result<Outcome<CertificateState>, ServiceError> {
        let certificate = self.get_certificate(id).await?;

        Ok(Outcome::new(CertificateState {
            certificate,
            csr_content: None,
            recreate_threshold: self.config.certificate.default_recreate_threshold,
            private_key_pem: None,
            pkcs12_bundle_password: None,
            pkcs12_bundle_content: None,
        }))
    }

    /// Decides how to reach `spec` from the tracked `state`, without contacting the API
    pub fn plan_certificate(
        &self,
        state: &CertificateState,
        spec: &CertificateSpecDTO,
    ) -> CertificatePlanDTO {
        if let Some(field) = changed_immutable_field(state, spec) {
            return CertificatePlanDTO::Replace {
                reason: ReplacementReason::ImmutableFieldChanged { field },
            };
        }

        let threshold = spec
            .recreate_threshold
            .unwrap_or(self.config.certificate.default_recreate_threshold);
        let expiration_date = state.certificate.expiration_date;

        if needs_replacement(expiration_date, threshold, self.clock.now_utc()) {
            return CertificatePlanDTO::Replace {
                reason: ReplacementReason::WithinRecreateThreshold {
                    expiration_date,
                    threshold,
                },
            };
        }

        let local_inputs_changed = threshold != state.recreate_threshold
            || !secret_eq(spec.private_key_pem.as_ref(), state.private_key_pem.as_ref())
            || !secret_eq(
                spec.pkcs12_bundle_password.as_ref(),
                state.pkcs12_bundle_password.as_ref(),
            )
            || state.csr_content.is_none();

        if local_inputs_changed {
            CertificatePlanDTO::UpdateInPlace
        } else {
            CertificatePlanDTO::NoChange
        }
    }

    async fn fetch_certificates(
        &self,
        certificate_type: Option<CertificateType>,
    ) -> Result<Vec<Certificate>, ServiceError> {
        let mut request = ApiRequest::get(CERTIFICATES_PATH)
            .query("limit", CERTIFICATE_LIST_LIMIT.to_string());
        if let Some(certificate_type) = certificate_type {
            request = request.query("filter[certificateType]", certificate_type.to_string());
        }

        let resources: Vec<CertificateResourceDTO> = self
            .api_client
            .execute(request)
            .await
            .and_then(|response| response.into_data())
            .map_err(ServiceError::remote("list certificates"))?;

        resources
            .into_iter()
            .map(certificate_from_resource)
            .collect()
    }
}

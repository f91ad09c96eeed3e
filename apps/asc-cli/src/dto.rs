use std::collections::BTreeMap;

use asc_core::model::certificate::{Certificate, CertificateState};
use asc_core::service::common_dto::OperationWarning;
use serde::Serialize;

/// Tracked certificate without local secrets; readable back as state
#[derive(Debug, Serialize)]
pub struct CertificateStateView<'a> {
    pub certificate: &'a Certificate,
    pub csr_content: Option<&'a str>,
    pub recreate_threshold: u64,
    pub pkcs12_bundle_content: Option<&'a str>,
}

impl<'a> From<&'a CertificateState> for CertificateStateView<'a> {
    fn from(state: &'a CertificateState) -> Self {
        Self {
            certificate: &state.certificate,
            csr_content: state.csr_content.as_deref(),
            recreate_threshold: state.recreate_threshold,
            pkcs12_bundle_content: state.pkcs12_bundle_content.as_deref(),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct WithWarnings<T> {
    #[serde(flatten)]
    pub value: T,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub warnings: Vec<OperationWarning>,
}

#[derive(Debug, Serialize)]
pub struct PemView {
    pub certificate_content_pem: String,
}

#[derive(Debug, Serialize)]
pub struct ExtensionsView {
    pub certificate_extensions: BTreeMap<String, String>,
    pub certificate_ca_issuers: Vec<String>,
}

#[derive(Debug, Serialize)]
pub struct Pkcs12View {
    pub pkcs12_bundle_content: String,
}

#[derive(Debug, Serialize)]
pub struct DecodedPkcs12View<'a> {
    pub certificate_pem: &'a str,
    pub private_key_pem: &'a str,
}

#[derive(Debug, Serialize)]
pub struct DeletedView {
    pub deleted: String,
}

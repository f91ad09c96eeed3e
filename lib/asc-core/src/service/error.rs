use shared_types::PassTypeIdentifier;
use thiserror::Error;

use crate::config::ConfigError;
use crate::proto::api_client::ApiClientError;
use crate::proto::certificate_material::MaterialError;

#[derive(Debug, Error)]
pub enum ServiceError {
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error(transparent)]
    Validation(#[from] ValidationError),
    #[error("Unable to {operation}, got error: {source}")]
    Remote {
        operation: &'static str,
        #[source]
        source: ApiClientError,
    },
    #[error(transparent)]
    Material(#[from] MaterialError),
    #[error(transparent)]
    EntityNotFound(#[from] EntityNotFoundError),
    #[error(transparent)]
    BusinessLogic(#[from] BusinessLogicError),
    #[error("The API response did not contain a valid ID for the {0}")]
    MissingResponseId(&'static str),
    #[error("Mapping error: `{0}`")]
    MappingError(String),
}

impl ServiceError {
    pub(crate) fn remote(operation: &'static str) -> impl FnOnce(ApiClientError) -> Self {
        move |source| Self::Remote { operation, source }
    }
}

#[derive(Debug, Error)]
pub enum EntityNotFoundError {
    #[error("No Certificate found matching the filter criteria")]
    Certificate,
    #[error("No Pass Type ID found with identifier '{0}'")]
    PassType(PassTypeIdentifier),
}

#[derive(Debug, Error)]
pub enum BusinessLogicError {
    #[error(
        "Found {count} Certificates matching the filter criteria. Please refine your filter."
    )]
    AmbiguousCertificateFilter { count: usize },
    #[error("Multiple Pass Type IDs found with identifier '{0}'")]
    AmbiguousPassTypeFilter(PassTypeIdentifier),
    #[error(
        "The certificate itself cannot be updated. Only pkcs12_bundle_password and private_key_pem can be modified without replacement. To change the certificate, you must delete and recreate the resource."
    )]
    CertificateImmutable { field: &'static str },
}

#[derive(Debug, Error)]
pub enum ValidationError {
    #[error("Pass Type ID is required for PASS_TYPE_ID and PASS_TYPE_ID_WITH_NFC certificate types.")]
    MissingPassTypeId,
    #[error(
        "Invalid identifier '{0}': The identifier must follow reverse-DNS format (e.g., 'pass.com.example.membership')."
    )]
    InvalidPassTypeIdentifier(String),
    #[error("Invalid {field}: {reason}")]
    InvalidRemoteId { field: &'static str, reason: String },
    #[error("`{0}` must not be empty")]
    EmptyField(&'static str),
    #[error(
        "Pass Type IDs cannot be updated. To change the identifier, you must delete and recreate the resource."
    )]
    PassTypeIdUpdateNotSupported,
}

/// Stable classification of failures
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum ErrorCode {
    Configuration,
    Validation,
    Transport,
    RemoteApi,
    Material,
    NotFound,
    AmbiguousFilter,
    ImmutableResource,
    ResponseMapping,
}

impl ErrorCode {
    pub const fn msg(&self) -> &'static str {
        match self {
            ErrorCode::Configuration => "Configuration error",
            ErrorCode::Validation => "Validation error",
            ErrorCode::Transport => "Transport error",
            ErrorCode::RemoteApi => "App Store Connect API error",
            ErrorCode::Material => "Certificate material error",
            ErrorCode::NotFound => "Entity not found",
            ErrorCode::AmbiguousFilter => "Filter matches multiple entities",
            ErrorCode::ImmutableResource => "Resource cannot be updated",
            ErrorCode::ResponseMapping => "Response mapping error",
        }
    }
}

impl ServiceError {
    pub fn error_code(&self) -> ErrorCode {
        match self {
            ServiceError::Config(_) => ErrorCode::Configuration,
            ServiceError::Validation(_) => ErrorCode::Validation,
            ServiceError::Remote { source, .. } => match source {
                ApiClientError::Token(_) => ErrorCode::Configuration,
                ApiClientError::Api { .. } => ErrorCode::RemoteApi,
                ApiClientError::MalformedEnvelope(_) => ErrorCode::ResponseMapping,
                ApiClientError::Http(_)
                | ApiClientError::Url(_)
                | ApiClientError::EmptyErrorResponse { .. }
                | ApiClientError::UnparsableErrorResponse { .. }
                | ApiClientError::Status { .. } => ErrorCode::Transport,
            },
            ServiceError::Material(_) => ErrorCode::Material,
            ServiceError::EntityNotFound(_) => ErrorCode::NotFound,
            ServiceError::BusinessLogic(error) => error.error_code(),
            ServiceError::MissingResponseId(_) | ServiceError::MappingError(_) => {
                ErrorCode::ResponseMapping
            }
        }
    }
}

impl BusinessLogicError {
    pub fn error_code(&self) -> ErrorCode {
        match self {
            BusinessLogicError::AmbiguousCertificateFilter { .. }
            | BusinessLogicError::AmbiguousPassTypeFilter(_) => ErrorCode::AmbiguousFilter,
            BusinessLogicError::CertificateImmutable { .. } => ErrorCode::ImmutableResource,
        }
    }
}

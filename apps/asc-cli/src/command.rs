use std::path::Path;

use asc_core::config::core_config::CoreConfig;
use asc_core::model::certificate::CertificateState;
use asc_core::service::certificate::dto::{
    CertificateFilterDTO, CertificateListFilterDTO, CreateCertificateRequestDTO,
};
use asc_core::service::common_dto::Outcome;
use asc_core::service::pass_type_id::dto::CreatePassTypeIdRequestDTO;
use asc_core::{AscCore, decode_pkcs12, der_to_pem, encode_pkcs12, extract_ca_issuers, extract_extensions};
use secrecy::{ExposeSecret, SecretString};
use serde::Serialize;

use crate::cli::{CertificateCommand, Command, CreateCertificateArgs, PassTypeIdCommand, Pkcs12Command};
use crate::dto::{
    CertificateStateView, DecodedPkcs12View, DeletedView, ExtensionsView, PemView, Pkcs12View,
    WithWarnings,
};
use crate::error::CliError;

/// Runs `command` and returns its JSON output
pub async fn run(command: Command, config: CoreConfig) -> Result<String, CliError> {
    match command {
        Command::Certificate(command) => certificate(command, AscCore::new(config)?).await,
        Command::PassTypeId(command) => pass_type_id(command, AscCore::new(config)?).await,
        Command::Pkcs12(command) => pkcs12(command),
        Command::DerToPem { input } => {
            let content = read_file(&input)?;
            to_json(&PemView {
                certificate_content_pem: der_to_pem(content.trim())?,
            })
        }
        Command::Extensions { input } => {
            let content = read_file(&input)?;
            to_json(&ExtensionsView {
                certificate_extensions: extract_extensions(content.trim())?,
                certificate_ca_issuers: extract_ca_issuers(content.trim())?,
            })
        }
    }
}

async fn certificate(command: CertificateCommand, core: AscCore) -> Result<String, CliError> {
    let service = core.certificate_service;

    match command {
        CertificateCommand::Create(args) => {
            let request = create_certificate_request(args)?;
            state_output(service.create_certificate(request).await?)
        }
        CertificateCommand::Get { id } => to_json(&service.get_certificate(&id.into()).await?),
        CertificateCommand::Find {
            certificate_type,
            serial_number,
        } => to_json(
            &service
                .find_certificate(CertificateFilterDTO {
                    certificate_type,
                    serial_number,
                })
                .await?,
        ),
        CertificateCommand::List {
            certificate_type,
            display_name,
        } => to_json(
            &service
                .list_certificates(CertificateListFilterDTO {
                    certificate_type,
                    display_name,
                })
                .await?,
        ),
        CertificateCommand::Import { id } => {
            state_output(service.import_certificate(&id.into()).await?)
        }
        CertificateCommand::Delete { state } => {
            let state: CertificateState =
                serde_json::from_str(&read_file(&state)?).map_err(CliError::State)?;
            let outcome = service.delete_certificate(&state).await?;

            to_json(&WithWarnings {
                value: DeletedView {
                    deleted: state.certificate.id.to_string(),
                },
                warnings: outcome.warnings,
            })
        }
    }
}

async fn pass_type_id(command: PassTypeIdCommand, core: AscCore) -> Result<String, CliError> {
    let service = core.pass_type_id_service;

    match command {
        PassTypeIdCommand::Create {
            identifier,
            description,
        } => to_json(
            &service
                .create_pass_type_id(CreatePassTypeIdRequestDTO {
                    identifier: identifier.into(),
                    description,
                })
                .await?,
        ),
        PassTypeIdCommand::Get { id } => to_json(&service.get_pass_type_id(&id.into()).await?),
        PassTypeIdCommand::Find { identifier } => {
            to_json(&service.find_pass_type_id(&identifier.into()).await?)
        }
        PassTypeIdCommand::Delete { id } => {
            service.delete_pass_type_id(&id.clone().into()).await?;
            to_json(&DeletedView { deleted: id })
        }
    }
}

fn pkcs12(command: Pkcs12Command) -> Result<String, CliError> {
    match command {
        Pkcs12Command::Encode {
            certificate_file,
            private_key_file,
            password,
        } => {
            let certificate_pem = read_file(&certificate_file)?;
            let private_key_pem = SecretString::from(read_file(&private_key_file)?);

            to_json(&Pkcs12View {
                pkcs12_bundle_content: encode_pkcs12(&certificate_pem, &private_key_pem, &password)?,
            })
        }
        Pkcs12Command::Decode {
            bundle_file,
            password,
        } => {
            let bundle = read_file(&bundle_file)?;
            let decoded = decode_pkcs12(bundle.trim(), &password)?;

            to_json(&DecodedPkcs12View {
                certificate_pem: &decoded.certificate_pem,
                private_key_pem: decoded.private_key_pem.expose_secret(),
            })
        }
    }
}

fn create_certificate_request(
    args: CreateCertificateArgs,
) -> Result<CreateCertificateRequestDTO, CliError> {
    let private_key_pem = args
        .private_key_file
        .as_deref()
        .map(read_file)
        .transpose()?
        .map(SecretString::from);

    Ok(CreateCertificateRequestDTO {
        certificate_type: args.certificate_type,
        csr_content: read_file(&args.csr_file)?,
        pass_type_id: args.pass_type_id.map(Into::into),
        recreate_threshold: args.recreate_threshold,
        private_key_pem,
        pkcs12_bundle_password: args.bundle_password,
    })
}

fn state_output(outcome: Outcome<CertificateState>) -> Result<String, CliError> {
    log_warnings(&outcome);

    to_json(&WithWarnings {
        value: CertificateStateView::from(&outcome.value),
        warnings: outcome.warnings,
    })
}

fn log_warnings<T>(outcome: &Outcome<T>) {
    for warning in &outcome.warnings {
        tracing::warn!(summary = %warning.summary, "{}", warning.detail);
    }
}

fn read_file(path: &Path) -> Result<String, CliError> {
    std::fs::read_to_string(path).map_err(|source| CliError::ReadFile {
        path: path.to_path_buf(),
        source,
    })
}

fn to_json(value: &impl Serialize) -> Result<String, CliError> {
    serde_json::to_string_pretty(value).map_err(CliError::Output)
}

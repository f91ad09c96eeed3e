use std::path::PathBuf;

use asc_core::model::certificate::CertificateType;
use clap::{Args, Parser, Subcommand};
use secrecy::SecretString;

#[derive(Parser, Debug)]
#[command(author, version, about = "App Store Connect certificate management", long_about = None)]
pub struct Cli {
    /// YAML or JSON configuration, later files override earlier ones
    #[arg(short, long, value_name = "FILE", global = true)]
    pub config: Vec<PathBuf>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    #[command(subcommand)]
    Certificate(CertificateCommand),
    #[command(subcommand)]
    PassTypeId(PassTypeIdCommand),
    #[command(subcommand)]
    Pkcs12(Pkcs12Command),
    /// Converts base64 DER to base64 PEM
    DerToPem {
        /// File holding base64 DER
        #[arg(long, value_name = "FILE")]
        input: PathBuf,
    },
    /// Lists X.509v3 extensions and CA issuers of a base64 DER certificate
    Extensions {
        #[arg(long, value_name = "FILE")]
        input: PathBuf,
    },
}

#[derive(Subcommand, Debug)]
pub enum CertificateCommand {
    /// Submits a CSR and prints the tracked certificate
    Create(CreateCertificateArgs),
    Get {
        id: String,
    },
    /// Exactly one certificate matching the filter
    Find {
        #[arg(long = "type", value_parser = parse_certificate_type)]
        certificate_type: Option<CertificateType>,
        #[arg(long)]
        serial_number: Option<String>,
    },
    List {
        #[arg(long = "type", value_parser = parse_certificate_type)]
        certificate_type: Option<CertificateType>,
        /// Substring of the display name
        #[arg(long)]
        display_name: Option<String>,
    },
    /// Starts tracking an existing certificate
    Import {
        id: String,
    },
    /// Stops tracking a certificate; it is not revoked
    Delete {
        /// Tracked state as printed by `create` or `import`
        #[arg(long, value_name = "FILE")]
        state: PathBuf,
    },
}

#[derive(Args, Debug)]
pub struct CreateCertificateArgs {
    #[arg(long = "type", value_parser = parse_certificate_type)]
    pub certificate_type: CertificateType,
    #[arg(long, value_name = "FILE")]
    pub csr_file: PathBuf,
    #[arg(long)]
    pub pass_type_id: Option<String>,
    /// Seconds before expiration at which replacement is forced, 0 disables
    #[arg(long)]
    pub recreate_threshold: Option<u64>,
    /// Private key matching the CSR, used to build a PKCS12 bundle
    #[arg(long, value_name = "FILE", requires = "bundle_password")]
    pub private_key_file: Option<PathBuf>,
    #[arg(long, env = "ASC_BUNDLE_PASSWORD", hide_env_values = true)]
    pub bundle_password: Option<SecretString>,
}

#[derive(Subcommand, Debug)]
pub enum PassTypeIdCommand {
    Create {
        /// Reverse-DNS identifier, e.g. `pass.com.example.membership`
        #[arg(long)]
        identifier: String,
        #[arg(long)]
        description: String,
    },
    Get {
        id: String,
    },
    Find {
        identifier: String,
    },
    Delete {
        id: String,
    },
}

#[derive(Subcommand, Debug)]
pub enum Pkcs12Command {
    /// Bundles a PEM certificate and private key, prints base64 PKCS12
    Encode {
        #[arg(long, value_name = "FILE")]
        certificate_file: PathBuf,
        #[arg(long, value_name = "FILE")]
        private_key_file: PathBuf,
        #[arg(long, env = "ASC_BUNDLE_PASSWORD", hide_env_values = true)]
        password: SecretString,
    },
    /// Extracts certificate and PKCS8 private key from a base64 PKCS12
    Decode {
        #[arg(long, value_name = "FILE")]
        bundle_file: PathBuf,
        #[arg(long, env = "ASC_BUNDLE_PASSWORD", hide_env_values = true)]
        password: SecretString,
    },
}

fn parse_certificate_type(value: &str) -> Result<CertificateType, String> {
    value
        .parse()
        .map_err(|_| format!("unknown certificate type `{value}`"))
}

use std::process::ExitCode;

use asc_core::config::core_config::AppConfig;
use clap::Parser;
use tracing_subscriber::prelude::*;

use crate::cli::Cli;
use crate::config::CliConfig;
use crate::error::CliError;

mod cli;
mod command;
mod config;
mod dto;
mod error;

fn main() -> ExitCode {
    let cli = Cli::parse();

    let app_config = match AppConfig::<CliConfig>::from_files(&cli.config) {
        Ok(config) => config,
        Err(error) => {
            initialize_tracing(&CliConfig::default());
            tracing::error!(%error, "Failed to load configuration");
            return ExitCode::FAILURE;
        }
    };

    initialize_tracing(&app_config.app);

    let result = tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()
        .map_err(CliError::Runtime)
        .and_then(|runtime| runtime.block_on(command::run(cli.command, app_config.core)));

    match result {
        Ok(output) => {
            println!("{output}");
            ExitCode::SUCCESS
        }
        Err(error) => {
            match &error {
                CliError::Service(service_error) => {
                    let code = service_error.error_code();
                    tracing::error!(code = ?code, kind = code.msg(), "{error}");
                }
                _ => tracing::error!("{error}"),
            }
            ExitCode::FAILURE
        }
    }
}

fn initialize_tracing(config: &CliConfig) {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .or_else(|_| {
            tracing_subscriber::EnvFilter::try_new(config.trace_level.as_deref().unwrap_or("info"))
        })
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info"));

    let tracing_layer = tracing_subscriber::registry().with(filter);

    // stdout carries the JSON result
    if config.trace_json.unwrap_or_default() {
        tracing_layer
            .with(
                tracing_subscriber::fmt::layer()
                    .json()
                    .flatten_event(true)
                    .with_writer(std::io::stderr),
            )
            .init();
    } else {
        tracing_layer
            .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
            .init();
    };
}

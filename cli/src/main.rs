//! Catalog CLI - push, pull and manage catalog applications

#![cfg_attr(test, allow(clippy::expect_used))]

use std::process::ExitCode;

use catalog_cli::app::OutputFormat;
use catalog_cli::cli::Cli;
use catalog_cli::domain::CatalogError;
use catalog_cli::infra::logging;
use catalog_cli::output::json;
use clap::Parser;

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();
    logging::init(cli.debug, cli.console_logging);
    let format = cli.output;

    let Err(e) = cli.run().await else {
        return ExitCode::SUCCESS;
    };
    tracing::debug!(error = ?e, "command failed");
    if format == OutputFormat::Json {
        let code = e
            .downcast_ref::<CatalogError>()
            .map_or("ERROR", CatalogError::code);
        match json::format_error(&format!("{e:#}"), code) {
            Ok(text) => println!("{text}"),
            Err(_) => eprintln!("Error: {e:#}"),
        }
    } else {
        eprintln!("Error: {e:#}");
    }
    ExitCode::FAILURE
}

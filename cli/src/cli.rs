//! CLI argument parsing with clap derive

use std::path::PathBuf;

use anyhow::Result;
use clap::{Args, Parser, Subcommand};

use crate::app::{AppContext, AppFlags, OutputFlags, OutputFormat};
use crate::commands;
use crate::domain::config::ConnectionOverrides;
use crate::infra::config::{YamlPlaygroundStore, YamlTokenStore};

/// Push, pull and manage applications in a catalog-manager
#[derive(Parser)]
#[command(
    name = "catalog",
    version,
    propagate_version = true,
    subcommand_required = true,
    arg_required_else_help = true
)]
pub struct Cli {
    /// Output format
    #[arg(long, global = true, value_enum, default_value_t = OutputFormat::Table)]
    pub output: OutputFormat,

    /// Suppress progress output
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Disable colored output
    #[arg(long, global = true, env = "NO_COLOR")]
    pub no_color: bool,

    /// Log at debug level
    #[arg(long, global = true)]
    pub debug: bool,

    /// Human-readable logs instead of JSON lines
    #[arg(long, global = true)]
    pub console_logging: bool,

    #[command(flatten)]
    pub connection: ConnectionArgs,

    #[command(subcommand)]
    pub command: Command,
}

/// Connection flags. Unset values fall back to the selected installation,
/// then to the built-in defaults.
#[derive(Args)]
pub struct ConnectionArgs {
    /// Host of the catalog-manager
    #[arg(long, global = true)]
    pub catalog_address: Option<String>,

    /// Port of the catalog-manager
    #[arg(long, global = true)]
    pub catalog_port: Option<u16>,

    /// Send the login token with each call
    #[arg(long, global = true, num_args = 0..=1, require_equals = true, default_missing_value = "true")]
    pub auth_enable: Option<bool>,

    /// Connect over TLS
    #[arg(long, global = true, num_args = 0..=1, require_equals = true, default_missing_value = "true")]
    pub use_tls: Option<bool>,

    /// Do not verify the server certificate
    #[arg(long, global = true, num_args = 0..=1, require_equals = true, default_missing_value = "true")]
    pub skip_cert_validation: Option<bool>,

    /// PEM file with the CA that signed the server certificate
    #[arg(long, global = true)]
    pub client_ca: Option<PathBuf>,
}

impl From<ConnectionArgs> for ConnectionOverrides {
    fn from(args: ConnectionArgs) -> Self {
        Self {
            catalog_address: args.catalog_address,
            catalog_port: args.catalog_port,
            auth_enable: args.auth_enable,
            use_tls: args.use_tls,
            skip_cert_validation: args.skip_cert_validation,
            client_ca: args.client_ca,
        }
    }
}

#[derive(Subcommand)]
pub enum Command {
    /// Push an application to the catalog
    Push(commands::push::PushArgs),

    /// Pull an application from the catalog
    Pull(commands::pull::PullArgs),

    /// Remove an application from the catalog
    Remove(commands::remove::RemoveArgs),

    /// Show the details of an application
    Info(commands::info::InfoArgs),

    /// List applications
    List(commands::list::ListArgs),

    /// Search applications by name
    Search(commands::list::SearchArgs),

    /// Show catalog counters
    #[command(alias = "sum")]
    Summary,

    /// Make an application private or public
    ChangeVisibility(commands::visibility::ChangeVisibilityArgs),

    /// Deploy an application into an environment
    Deploy(commands::deploy::DeployArgs),

    /// Show version
    Version,
}

impl Cli {
    /// Execute the CLI command.
    ///
    /// # Errors
    ///
    /// Returns an error if configuration cannot be loaded or the command fails.
    pub async fn run(self) -> Result<()> {
        let Cli {
            output,
            quiet,
            no_color,
            connection,
            command,
            ..
        } = self;
        if matches!(command, Command::Version) {
            commands::version::run(output);
            return Ok(());
        }

        let flags = AppFlags {
            output: OutputFlags {
                no_color,
                quiet,
                format: output,
            },
            connection: connection.into(),
            version: env!("CARGO_PKG_VERSION").to_string(),
        };
        let app = AppContext::new(&flags, &YamlTokenStore::new()?, &YamlPlaygroundStore::new()?)?;

        match command {
            Command::Push(args) => commands::push::run(&app, args).await,
            Command::Pull(args) => commands::pull::run(&app, args).await,
            Command::Remove(args) => commands::remove::run(&app, args).await,
            Command::Info(args) => commands::info::run(&app, args).await,
            Command::List(args) => commands::list::run(&app, args).await,
            Command::Search(args) => commands::list::search(&app, args).await,
            Command::Summary => commands::summary::run(&app).await,
            Command::ChangeVisibility(args) => commands::visibility::run(&app, args).await,
            Command::Deploy(args) => commands::deploy::run(&app, args).await,
            Command::Version => Ok(()),
        }
    }
}

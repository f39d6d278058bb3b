//! Application context: unified state passed to every command handler.
//!
//! `AppContext` is built once per invocation from the global flags and the
//! persisted configuration, then passed as `&AppContext` to the command
//! handlers. Nothing in it is process-global.

use anyhow::Result;
use clap::ValueEnum;
use tracing::debug;

use crate::application::OperationContext;
use crate::application::ports::{InstallationStore, TokenStore};
use crate::application::services::config_service;
use crate::domain::config::{AuthToken, ConnectionOverrides};
use crate::infra::grpc::GrpcConnector;
use crate::output::{OutputContext, Renderer, TableRenderer, TerminalReporter};

/// Output rendering mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum OutputFormat {
    /// Aligned text tables (default).
    #[default]
    Table,
    /// Machine-readable JSON.
    Json,
    /// Print nothing on success.
    None,
}

/// Output rendering flags.
pub struct OutputFlags {
    /// Disable ANSI color output.
    pub no_color: bool,
    /// Suppress non-error output.
    pub quiet: bool,
    pub format: OutputFormat,
}

/// Flags passed from the top-level CLI to `AppContext::new`.
pub struct AppFlags {
    /// Output rendering options.
    pub output: OutputFlags,
    /// Connection values given on the command line.
    pub connection: ConnectionOverrides,
    /// Client version sent with every call.
    pub version: String,
}

/// Unified application context passed to every command handler.
pub struct AppContext {
    /// Terminal output context (colors, quiet mode).
    pub output: OutputContext,
    pub format: OutputFormat,
    /// Resolved connection settings and deadline.
    pub operation: OperationContext,
    /// Metadata attached to every call.
    pub auth: AuthToken,
}

impl AppContext {
    /// Construct an `AppContext` from top-level CLI flags and stored config.
    ///
    /// # Errors
    ///
    /// Returns an error if a configuration file exists but cannot be read,
    /// or if the resolved connection settings are invalid.
    pub fn new(
        flags: &AppFlags,
        tokens: &impl TokenStore,
        installations: &impl InstallationStore,
    ) -> Result<Self> {
        let connection = config_service::load_connection(&flags.connection, installations)?;
        let auth = config_service::load_credentials(connection.auth_enable, tokens, &flags.version)?;
        debug!(
            catalog_address = %connection.catalog_address,
            catalog_port = connection.catalog_port,
            auth_enable = connection.auth_enable,
            use_tls = connection.use_tls,
            skip_cert_validation = connection.skip_cert_validation,
            client_ca = ?connection.client_ca,
            "connection options"
        );

        // Progress lines would corrupt machine-readable output.
        let quiet = flags.output.quiet || flags.output.format != OutputFormat::Table;
        Ok(Self {
            output: OutputContext::new(flags.output.no_color, quiet),
            format: flags.output.format,
            operation: OperationContext::new(connection),
            auth,
        })
    }

    /// Returns the appropriate `Renderer` variant for the current output mode.
    #[must_use]
    pub fn renderer(&self) -> Renderer<'_> {
        match self.format {
            OutputFormat::Table => Renderer::Table(TableRenderer::new(&self.output)),
            OutputFormat::Json => Renderer::Json,
            OutputFormat::None => Renderer::Silent,
        }
    }

    /// Progress reporter bound to this invocation's output settings.
    #[must_use]
    pub fn reporter(&self) -> TerminalReporter<'_> {
        TerminalReporter::new(&self.output)
    }

    /// gRPC connector carrying this invocation's credentials.
    ///
    /// # Errors
    ///
    /// Returns an error if the credentials cannot be sent as metadata.
    pub fn connector(&self) -> Result<GrpcConnector> {
        Ok(GrpcConnector::new(&self.auth)?)
    }
}

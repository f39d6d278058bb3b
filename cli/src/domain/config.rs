//! Domain types for persisted CLI configuration and call credentials.
//!
//! Pure functions only. No I/O or async.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use catalog_common::metadata::{AGENT_HEADER, AGENT_VALUE, AUTHORIZATION_HEADER, VERSION_HEADER};

use crate::domain::connection::ConnectionConfig;

// ── Token file ───────────────────────────────────────────────────────────────

/// Contents of the `.token` YAML file written by a login.
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq, Eq)]
#[serde(default)]
pub struct TokenConfig {
    /// JWT presented to the catalog-manager.
    pub token: String,
    /// JWT that can renew `token`.
    pub refresh: String,
}

// ── Installation selection file ──────────────────────────────────────────────

/// Contents of the `.playground.yaml` installation-selection file.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct PlaygroundConfig {
    pub current_installation: Option<String>,
    pub installations: Vec<Installation>,
}

/// A target environment the user can interact with.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Installation {
    pub name: String,
    #[serde(default)]
    pub connection_config: InstallationConnection,
}

/// Connection settings stored per installation. Missing fields fall back.
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq, Eq)]
#[serde(default)]
pub struct InstallationConnection {
    pub catalog_address: Option<String>,
    pub catalog_port: Option<u16>,
    pub use_tls: Option<bool>,
    pub skip_cert_validation: Option<bool>,
    pub client_ca: Option<PathBuf>,
}

impl PlaygroundConfig {
    /// The installation named by `current_installation`, if any.
    #[must_use]
    pub fn selected(&self) -> Option<&InstallationConnection> {
        let current = self.current_installation.as_deref()?;
        self.installations
            .iter()
            .find(|inst| inst.name == current)
            .map(|inst| &inst.connection_config)
    }
}

// ── Flag overrides ───────────────────────────────────────────────────────────

/// Connection values given explicitly on the command line.
#[derive(Debug, Clone, Default)]
pub struct ConnectionOverrides {
    pub catalog_address: Option<String>,
    pub catalog_port: Option<u16>,
    pub auth_enable: Option<bool>,
    pub use_tls: Option<bool>,
    pub skip_cert_validation: Option<bool>,
    pub client_ca: Option<PathBuf>,
}

/// Merge connection settings: flag, then selected installation, then default.
#[must_use]
pub fn merge_connection(
    flags: &ConnectionOverrides,
    installation: Option<&InstallationConnection>,
) -> ConnectionConfig {
    let base = ConnectionConfig::default();
    let inst = installation.cloned().unwrap_or_default();
    ConnectionConfig {
        catalog_address: flags
            .catalog_address
            .clone()
            .or(inst.catalog_address)
            .unwrap_or(base.catalog_address),
        catalog_port: flags
            .catalog_port
            .or(inst.catalog_port)
            .unwrap_or(base.catalog_port),
        auth_enable: flags.auth_enable.unwrap_or(base.auth_enable),
        use_tls: flags.use_tls.or(inst.use_tls).unwrap_or(base.use_tls),
        skip_cert_validation: flags
            .skip_cert_validation
            .or(inst.skip_cert_validation)
            .unwrap_or(base.skip_cert_validation),
        client_ca: flags.client_ca.clone().or(inst.client_ca),
    }
}

// ── Call credentials ─────────────────────────────────────────────────────────

/// Credentials and identification sent as metadata on every call.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AuthToken {
    pub auth_enable: bool,
    pub token: String,
    pub version: String,
}

impl AuthToken {
    #[must_use]
    pub fn new(auth_enable: bool, token: &TokenConfig, version: &str) -> Self {
        Self {
            auth_enable,
            token: token.token.clone(),
            version: version.to_string(),
        }
    }

    /// Metadata pairs for an outgoing call.
    ///
    /// `authorization` is only present when authentication is enabled and a
    /// token was loaded.
    #[must_use]
    pub fn headers(&self) -> Vec<(&'static str, String)> {
        let mut headers = vec![
            (AGENT_HEADER, AGENT_VALUE.to_string()),
            (VERSION_HEADER, self.version.clone()),
        ];
        if self.auth_enable && !self.token.is_empty() {
            headers.push((AUTHORIZATION_HEADER, self.token.clone()));
        }
        headers
    }
}

// ── Unit tests ───────────────────────────────────────────────────────────────

//! Application service: configuration use-cases.

use anyhow::Result;
use tracing::debug;

use crate::application::ports::{InstallationStore, TokenStore};
use crate::domain::ConnectionConfig;
use crate::domain::config::{AuthToken, ConnectionOverrides, PlaygroundConfig, merge_connection};

/// Resolve the connection settings: flag, then selected installation, then default.
///
/// # Errors
///
/// Returns an error if the installation file exists but cannot be read, or
/// if the merged settings are invalid.
pub fn load_connection(
    flags: &ConnectionOverrides,
    installations: &impl InstallationStore,
) -> Result<ConnectionConfig> {
    let playground = installations.load()?;
    let selected = playground.as_ref().and_then(PlaygroundConfig::selected);
    if let Some(name) = playground
        .as_ref()
        .and_then(|p| p.current_installation.as_deref())
    {
        debug!(installation = name, found = selected.is_some(), "installation selected");
    }
    let config = merge_connection(flags, selected);
    config.validate()?;
    Ok(config)
}

/// Build the call credentials. The token file is only read when
/// authentication is enabled.
///
/// # Errors
///
/// Returns an error if the token file exists but cannot be parsed.
pub fn load_credentials(
    auth_enable: bool,
    tokens: &impl TokenStore,
    version: &str,
) -> Result<AuthToken> {
    if !auth_enable {
        return Ok(AuthToken::new(false, &Default::default(), version));
    }
    let token = tokens.load()?.unwrap_or_default();
    if token.token.is_empty() {
        debug!("no login token found, calls will be unauthenticated");
    }
    Ok(AuthToken::new(true, &token, version))
}

//! Connection settings and dial-address resolution.
//!
//! Pure functions only. No I/O or async.

use std::path::PathBuf;

use crate::domain::error::CatalogError;
use crate::domain::identifier::ApplicationId;

pub const DEFAULT_CATALOG_ADDRESS: &str = "catalog-manager";
pub const DEFAULT_CATALOG_PORT: u16 = 7060;

/// How to reach the catalog-manager when an identifier names no host.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConnectionConfig {
    /// DNS name or IP of the catalog-manager gRPC server.
    pub catalog_address: String,
    /// Port of the catalog-manager gRPC server.
    pub catalog_port: u16,
    /// Attach the user token to outgoing calls.
    pub auth_enable: bool,
    /// Expect a TLS connection.
    pub use_tls: bool,
    /// Ignore the server certificate validation step.
    pub skip_cert_validation: bool,
    /// Extra trusted CA (PEM) for the server certificate.
    pub client_ca: Option<PathBuf>,
}

impl Default for ConnectionConfig {
    fn default() -> Self {
        Self {
            catalog_address: DEFAULT_CATALOG_ADDRESS.to_string(),
            catalog_port: DEFAULT_CATALOG_PORT,
            auth_enable: true,
            use_tls: false,
            skip_cert_validation: false,
            client_ca: None,
        }
    }
}

impl ConnectionConfig {
    /// Checks the options required to dial the default catalog.
    ///
    /// # Errors
    ///
    /// Returns `CatalogError::InvalidArgument` when the address is empty or
    /// the port is zero.
    pub fn validate(&self) -> Result<(), CatalogError> {
        check_not_empty(&self.catalog_address, "catalog_address")?;
        check_positive(self.catalog_port, "catalog_port")
    }

    /// `host:port` of the configured catalog.
    #[must_use]
    pub fn default_address(&self) -> String {
        format!("{}:{}", self.catalog_address, self.catalog_port)
    }

    /// Target for calls that always go to the configured catalog.
    #[must_use]
    pub fn default_target(&self) -> ConnectionTarget {
        self.target_for(self.default_address())
    }

    /// Target for calls scoped to an application identifier.
    #[must_use]
    pub fn target_for_application(&self, id: &ApplicationId) -> ConnectionTarget {
        self.target_for(resolve_address(self, id.host.as_deref()))
    }

    fn target_for(&self, address: String) -> ConnectionTarget {
        ConnectionTarget {
            address,
            use_tls: self.use_tls,
            skip_cert_validation: self.skip_cert_validation,
            client_ca: self.client_ca.clone(),
        }
    }
}

/// Fully resolved dial target for a single operation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConnectionTarget {
    /// `host:port` to dial.
    pub address: String,
    pub use_tls: bool,
    pub skip_cert_validation: bool,
    pub client_ca: Option<PathBuf>,
}

impl ConnectionTarget {
    /// Host part of the address, used as TLS server name.
    #[must_use]
    pub fn host(&self) -> &str {
        self.address
            .rsplit_once(':')
            .map_or(self.address.as_str(), |(host, _)| host)
    }
}

/// Resolve the address to dial.
///
/// An override without a `:` gets the default port appended; an override
/// that already carries one is used verbatim. Without an override the
/// configured catalog is used.
#[must_use]
pub fn resolve_address(defaults: &ConnectionConfig, host_override: Option<&str>) -> String {
    match host_override {
        Some(host) if host.contains(':') => host.to_string(),
        Some(host) => format!("{host}:{}", defaults.catalog_port),
        None => defaults.default_address(),
    }
}

/// Fails when `value` is empty.
///
/// # Errors
///
/// Returns `CatalogError::InvalidArgument` naming the attribute.
pub fn check_not_empty(value: &str, name: &str) -> Result<(), CatalogError> {
    if value.is_empty() {
        return Err(CatalogError::InvalidArgument(format!(
            "{name} cannot be empty"
        )));
    }
    Ok(())
}

/// Fails when `value` is zero.
///
/// # Errors
///
/// Returns `CatalogError::InvalidArgument` naming the attribute.
pub fn check_positive(value: u16, name: &str) -> Result<(), CatalogError> {
    if value == 0 {
        return Err(CatalogError::InvalidArgument(format!(
            "{name} must be a positive number"
        )));
    }
    Ok(())
}

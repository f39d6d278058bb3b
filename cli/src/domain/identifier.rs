//! Application identifiers: `[catalogURL/]namespace/appName[:tag]`.
//!
//! Pure parsing only, no I/O.

use std::fmt;
use std::str::FromStr;

use crate::domain::error::CatalogError;

/// Tag used when the identifier does not carry one.
pub const DEFAULT_TAG: &str = "latest";

/// Decomposed application identifier.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApplicationId {
    /// Catalog host, optionally with `:port`. `None` means the configured catalog.
    pub host: Option<String>,
    pub namespace: String,
    /// Empty when only a namespace was given (`namespace/`).
    pub app_name: String,
    pub tag: String,
}

impl ApplicationId {
    /// Parse `[host/]namespace/appName[:tag]`.
    ///
    /// # Errors
    ///
    /// Returns `CatalogError::InvalidArgument` when the string does not have
    /// two or three `/`-separated segments, or when the last segment holds
    /// more than one `:`.
    pub fn parse(id: &str) -> Result<Self, CatalogError> {
        let segments: Vec<&str> = id.split('/').collect();
        let (host, namespace, rest) = match segments.as_slice() {
            [namespace, rest] => (None, *namespace, *rest),
            [host, namespace, rest] => (Some((*host).to_string()), *namespace, *rest),
            _ => return Err(CatalogError::invalid_identifier()),
        };

        let parts: Vec<&str> = rest.split(':').collect();
        let (app_name, tag) = match parts.as_slice() {
            [name] => (*name, DEFAULT_TAG),
            [name, tag] => (*name, *tag),
            _ => return Err(CatalogError::invalid_identifier()),
        };

        Ok(Self {
            host,
            namespace: namespace.to_string(),
            app_name: app_name.to_string(),
            tag: tag.to_string(),
        })
    }

    /// `namespace/appName:tag`, without the host.
    #[must_use]
    pub fn qualified_name(&self) -> String {
        format!("{}/{}:{}", self.namespace, self.app_name, self.tag)
    }
}

impl FromStr for ApplicationId {
    type Err = CatalogError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl fmt::Display for ApplicationId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let Some(host) = &self.host {
            write!(f, "{host}/")?;
        }
        write!(f, "{}", self.qualified_name())
    }
}

/// Base name for files saved on pull, falling back to `application`.
#[must_use]
pub fn output_base_name(id: &str) -> String {
    match ApplicationId::parse(id) {
        Ok(app) if !app.app_name.is_empty() => app.app_name,
        _ => "application".to_string(),
    }
}

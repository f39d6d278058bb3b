//! Infrastructure implementations of the `TokenStore` and `InstallationStore` ports.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::de::DeserializeOwned;
use tracing::debug;

use crate::application::ports::{InstallationStore, TokenStore};
use crate::domain::config::{PlaygroundConfig, TokenConfig};

/// Token file name, looked up in the working directory and then the CLI home.
pub const TOKEN_FILE: &str = ".token";
/// Installation-selection file name inside the CLI home.
pub const PLAYGROUND_FILE: &str = ".playground.yaml";

/// Directory holding the CLI's persisted files.
///
/// `CATALOG_HOME` overrides the default `~/.napptive`.
///
/// # Errors
///
/// Returns an error if the home directory cannot be determined.
pub fn catalog_home() -> Result<PathBuf> {
    if let Ok(val) = std::env::var("CATALOG_HOME") {
        return Ok(PathBuf::from(val));
    }
    let home =
        dirs::home_dir().ok_or_else(|| anyhow::anyhow!("cannot determine home directory"))?;
    Ok(home.join(".napptive"))
}

fn read_yaml<T: DeserializeOwned>(path: &Path) -> Result<Option<T>> {
    if !path.exists() {
        return Ok(None);
    }
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("cannot read {}", path.display()))?;
    let value = serde_yaml::from_str(&content)
        .with_context(|| format!("cannot parse {}", path.display()))?;
    Ok(Some(value))
}

/// Reads the login token from the first directory that holds one.
pub struct YamlTokenStore {
    search_dirs: Vec<PathBuf>,
}

impl YamlTokenStore {
    /// Search `./` first, then the CLI home.
    ///
    /// # Errors
    ///
    /// Returns an error if the CLI home cannot be determined.
    pub fn new() -> Result<Self> {
        Ok(Self::with_dirs(vec![PathBuf::from("."), catalog_home()?]))
    }

    #[must_use]
    pub fn with_dirs(search_dirs: Vec<PathBuf>) -> Self {
        Self { search_dirs }
    }
}

impl TokenStore for YamlTokenStore {
    fn load(&self) -> Result<Option<TokenConfig>> {
        for dir in &self.search_dirs {
            let path = dir.join(TOKEN_FILE);
            if let Some(token) = read_yaml(&path)? {
                debug!(path = %path.display(), "token loaded");
                return Ok(Some(token));
            }
        }
        Ok(None)
    }
}

/// Reads the installation-selection file from the CLI home.
pub struct YamlPlaygroundStore {
    path: PathBuf,
}

impl YamlPlaygroundStore {
    /// # Errors
    ///
    /// Returns an error if the CLI home cannot be determined.
    pub fn new() -> Result<Self> {
        Ok(Self::at(catalog_home()?.join(PLAYGROUND_FILE)))
    }

    #[must_use]
    pub fn at(path: PathBuf) -> Self {
        Self { path }
    }
}

impl InstallationStore for YamlPlaygroundStore {
    fn load(&self) -> Result<Option<PlaygroundConfig>> {
        read_yaml(&self.path)
    }
}

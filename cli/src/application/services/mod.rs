//! Application services: use-case orchestration.
//!
//! Each service module implements a single use-case by composing domain logic
//! with port trait calls. Services import only from `crate::domain` and
//! `crate::application::ports`, never from `crate::infra`, `crate::commands`,
//! or `crate::output`.

pub mod catalog_ops;
pub mod config_service;
pub mod deploy;
pub mod download;
pub mod upload;

use std::future::Future;
use std::time::Duration;

use catalog_common::OpResponse;

use crate::domain::{CatalogError, ConnectionConfig};

/// Deadline applied to every remote operation, streaming included.
pub const OPERATION_TIMEOUT: Duration = Duration::from_secs(5 * 60);

/// Per-invocation settings shared by every catalog use-case.
#[derive(Debug, Clone)]
pub struct OperationContext {
    pub connection: ConnectionConfig,
    pub timeout: Duration,
}

impl OperationContext {
    #[must_use]
    pub fn new(connection: ConnectionConfig) -> Self {
        Self {
            connection,
            timeout: OPERATION_TIMEOUT,
        }
    }
}

/// Run `operation` under `timeout`, reporting expiry as `DeadlineExceeded`.
///
/// # Errors
///
/// Returns the operation's own error, or `CatalogError::DeadlineExceeded`.
pub async fn with_deadline<T>(
    timeout: Duration,
    operation: impl Future<Output = Result<T, CatalogError>>,
) -> Result<T, CatalogError> {
    tokio::time::timeout(timeout, operation)
        .await
        .map_err(|_| CatalogError::DeadlineExceeded(timeout))?
}

/// Turn a non-success acknowledgement into a `RemoteError`.
///
/// # Errors
///
/// Returns `CatalogError::Remote` when `response` is not `SUCCESS`.
pub fn ensure_success(response: OpResponse) -> Result<OpResponse, CatalogError> {
    if response.is_success() {
        return Ok(response);
    }
    let message = if response.user_info.is_empty() {
        format!("operation finished with status {}", response.status_name)
    } else {
        response.user_info
    };
    Err(CatalogError::Remote {
        code: response.status_name,
        message,
    })
}

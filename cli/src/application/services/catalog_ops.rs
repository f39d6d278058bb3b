//! Application service: unary catalog operations.
//!
//! `remove` and `info` follow the host embedded in the identifier; the
//! listing operations always talk to the configured catalog.

use catalog_common::{
    ApplicationList, InfoApplicationRequest, InfoApplicationResponse, ListApplicationsRequest,
    OpResponse, RemoveApplicationRequest, SummaryResponse, UpdateRequest,
};
use tracing::debug;

use crate::application::ports::{CatalogConnector, CatalogSession};
use crate::application::services::{OperationContext, ensure_success, with_deadline};
use crate::domain::connection::check_not_empty;
use crate::domain::{ApplicationId, CatalogError};

/// Remove an application from the catalog.
///
/// # Errors
///
/// `InvalidArgument`, `ConnectionError`, `RemoteError` or `DeadlineExceeded`.
pub async fn remove(
    connector: &impl CatalogConnector,
    ctx: &OperationContext,
    application_id: &str,
) -> Result<OpResponse, CatalogError> {
    with_deadline(ctx.timeout, async {
        let id = ApplicationId::parse(application_id)?;
        let session = connector.connect(&ctx.connection.target_for_application(&id))?;
        let response = session
            .remove(RemoveApplicationRequest {
                application_id: application_id.to_string(),
            })
            .await?;
        ensure_success(response)
    })
    .await
}

/// Fetch the stored metadata of an application.
///
/// # Errors
///
/// `InvalidArgument`, `ConnectionError`, `RemoteError` or `DeadlineExceeded`.
pub async fn info(
    connector: &impl CatalogConnector,
    ctx: &OperationContext,
    application_id: &str,
) -> Result<InfoApplicationResponse, CatalogError> {
    with_deadline(ctx.timeout, async {
        let id = ApplicationId::parse(application_id)?;
        let session = connector.connect(&ctx.connection.target_for_application(&id))?;
        session
            .info(InfoApplicationRequest {
                application_id: application_id.to_string(),
            })
            .await
    })
    .await
}

/// List applications, optionally restricted to one namespace.
///
/// # Errors
///
/// `ConnectionError`, `RemoteError` or `DeadlineExceeded`.
pub async fn list(
    connector: &impl CatalogConnector,
    ctx: &OperationContext,
    namespace: Option<&str>,
) -> Result<ApplicationList, CatalogError> {
    query(
        connector,
        ctx,
        ListApplicationsRequest {
            namespace: namespace.unwrap_or_default().to_string(),
            application_name: String::new(),
        },
    )
    .await
}

/// List the applications whose name matches `application_name`.
///
/// # Errors
///
/// `InvalidArgument` for an empty name, otherwise as [`list`].
pub async fn search(
    connector: &impl CatalogConnector,
    ctx: &OperationContext,
    application_name: &str,
    namespace: Option<&str>,
) -> Result<ApplicationList, CatalogError> {
    check_not_empty(application_name, "application name")?;
    query(
        connector,
        ctx,
        ListApplicationsRequest {
            namespace: namespace.unwrap_or_default().to_string(),
            application_name: application_name.to_string(),
        },
    )
    .await
}

async fn query(
    connector: &impl CatalogConnector,
    ctx: &OperationContext,
    request: ListApplicationsRequest,
) -> Result<ApplicationList, CatalogError> {
    with_deadline(ctx.timeout, async {
        let session = connector.connect(&ctx.connection.default_target())?;
        let list = session.list(request).await?;
        debug!(count = list.applications.len(), "applications listed");
        Ok(list)
    })
    .await
}

/// Catalog-wide counters.
///
/// # Errors
///
/// `ConnectionError`, `RemoteError` or `DeadlineExceeded`.
pub async fn summary(
    connector: &impl CatalogConnector,
    ctx: &OperationContext,
) -> Result<SummaryResponse, CatalogError> {
    with_deadline(ctx.timeout, async {
        let session = connector.connect(&ctx.connection.default_target())?;
        session.summary().await
    })
    .await
}

/// Decide the requested visibility from the `--private`/`--public` flags.
///
/// Neither flag means public.
///
/// # Errors
///
/// `InvalidArgument` when both flags are set.
pub fn requested_privacy(private: bool, public: bool) -> Result<bool, CatalogError> {
    if private && public {
        return Err(CatalogError::InvalidArgument(
            "only one of --private or --public can be set".to_string(),
        ));
    }
    Ok(private)
}

/// Make an application private or public.
///
/// # Errors
///
/// `InvalidArgument` for a malformed identifier or an empty application
/// name, otherwise `ConnectionError`, `RemoteError` or `DeadlineExceeded`.
pub async fn change_visibility(
    connector: &impl CatalogConnector,
    ctx: &OperationContext,
    application: &str,
    private: bool,
) -> Result<OpResponse, CatalogError> {
    with_deadline(ctx.timeout, async {
        let id = ApplicationId::parse(application)?;
        check_not_empty(&id.app_name, "application name")?;
        let session = connector.connect(&ctx.connection.target_for_application(&id))?;
        let response = session
            .update(UpdateRequest {
                namespace: id.namespace,
                application_name: id.app_name,
                private,
            })
            .await?;
        ensure_success(response)
    })
    .await
}

//! Application service: deploy a catalog application to an environment.

use catalog_common::{DeployApplicationRequest, OpResponse};

use crate::application::ports::{CatalogConnector, CatalogSession};
use crate::application::services::{OperationContext, ensure_success, with_deadline};
use crate::domain::{ApplicationId, CatalogError};

/// Where an application should be deployed.
pub struct DeployTarget<'a> {
    /// Qualified name of the environment, usually `<account>/<environment>`.
    /// Sent verbatim; the catalog validates it.
    pub environment: &'a str,
    /// Base URL of the playground API serving that environment. Empty lets
    /// the catalog pick its own default.
    pub playground_api_url: &'a str,
}

/// Ask the catalog to deploy `application_id` into `target`.
///
/// # Errors
///
/// `InvalidArgument` for a malformed identifier, otherwise `ConnectionError`, `RemoteError` or `DeadlineExceeded`.
pub async fn deploy(
    connector: &impl CatalogConnector,
    ctx: &OperationContext,
    application_id: &str,
    target: DeployTarget<'_>,
) -> Result<OpResponse, CatalogError> {
    ApplicationId::parse(application_id)?;

    with_deadline(ctx.timeout, async {
        let session = connector.connect(&ctx.connection.default_target())?;
        let response = session
            .deploy(DeployApplicationRequest {
                application_id: application_id.to_string(),
                target_environment_qualified_name: target.environment.to_string(),
                target_playground_api_url: target.playground_api_url.to_string(),
            })
            .await?;
        ensure_success(response)
    })
    .await
}

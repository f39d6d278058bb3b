//! Deploy command

use anyhow::Result;
use clap::Args;

use crate::app::AppContext;
use crate::application::services::deploy::{self, DeployTarget};
use crate::output::CatalogResult;

/// Arguments for the deploy command.
#[derive(Args)]
pub struct DeployArgs {
    /// Application identifier: [catalogURL/]namespace/appName[:tag]
    pub application: String,

    /// Target environment: <account>/<environment>
    pub environment: String,

    /// Playground API URL of the target environment
    pub playground_api_url: Option<String>,
}

/// Run the deploy command.
///
/// # Errors
///
/// Returns an error if the arguments are malformed or the deploy is rejected.
pub async fn run(app: &AppContext, args: DeployArgs) -> Result<()> {
    let connector = app.connector()?;
    let response = deploy::deploy(
        &connector,
        &app.operation,
        &args.application,
        DeployTarget {
            environment: &args.environment,
            playground_api_url: args.playground_api_url.as_deref().unwrap_or_default(),
        },
    )
    .await?;
    app.renderer().render(&CatalogResult::Op(response))
}

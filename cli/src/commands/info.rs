//! Info command

use anyhow::Result;
use clap::Args;

use crate::app::AppContext;
use crate::application::services::catalog_ops;
use crate::output::CatalogResult;

/// Arguments for the info command.
#[derive(Args)]
pub struct InfoArgs {
    /// Application identifier: [catalogURL/]namespace/appName[:tag]
    pub application: String,
}

/// Run the info command.
///
/// # Errors
///
/// Returns an error if the application cannot be fetched.
pub async fn run(app: &AppContext, args: InfoArgs) -> Result<()> {
    let connector = app.connector()?;
    let info = catalog_ops::info(&connector, &app.operation, &args.application).await?;
    app.renderer().render(&CatalogResult::Info(info))
}

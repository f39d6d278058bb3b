//! Remove command

use anyhow::Result;
use clap::Args;

use crate::app::AppContext;
use crate::application::services::catalog_ops;
use crate::output::CatalogResult;

/// Arguments for the remove command.
#[derive(Args)]
pub struct RemoveArgs {
    /// Application identifier: [catalogURL/]namespace/appName[:tag]
    pub application: String,
}

/// Run the remove command.
///
/// # Errors
///
/// Returns an error if the catalog cannot remove the application.
pub async fn run(app: &AppContext, args: RemoveArgs) -> Result<()> {
    let connector = app.connector()?;
    let response = catalog_ops::remove(&connector, &app.operation, &args.application).await?;
    app.renderer().render(&CatalogResult::Op(response))
}

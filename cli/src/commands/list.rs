//! List and search commands

use anyhow::Result;
use clap::Args;

use crate::app::AppContext;
use crate::application::services::catalog_ops;
use crate::output::CatalogResult;

/// Arguments for the list command.
#[derive(Args)]
pub struct ListArgs {
    /// Only list applications of this namespace
    pub namespace: Option<String>,
}

/// Arguments for the search command.
#[derive(Args)]
pub struct SearchArgs {
    /// Application name to look for
    pub application_name: String,

    /// Restrict the search to a namespace
    #[arg(short, long)]
    pub namespace: Option<String>,
}

/// Run the list command.
///
/// # Errors
///
/// Returns an error if the catalog cannot be queried.
pub async fn run(app: &AppContext, args: ListArgs) -> Result<()> {
    let connector = app.connector()?;
    let list = catalog_ops::list(&connector, &app.operation, args.namespace.as_deref()).await?;
    app.renderer().render(&CatalogResult::List(list))
}

/// Run the search command.
///
/// # Errors
///
/// Returns an error if the name is empty or the catalog cannot be queried.
pub async fn search(app: &AppContext, args: SearchArgs) -> Result<()> {
    let connector = app.connector()?;
    let list = catalog_ops::search(
        &connector,
        &app.operation,
        &args.application_name,
        args.namespace.as_deref(),
    )
    .await?;
    app.renderer().render(&CatalogResult::List(list))
}

//! Summary command

use anyhow::Result;

use crate::app::AppContext;
use crate::application::services::catalog_ops;
use crate::output::CatalogResult;

/// Run the summary command.
///
/// # Errors
///
/// Returns an error if the catalog cannot be queried.
pub async fn run(app: &AppContext) -> Result<()> {
    let connector = app.connector()?;
    let summary = catalog_ops::summary(&connector, &app.operation).await?;
    app.renderer().render(&CatalogResult::Summary(summary))
}

//! Change-visibility command

use anyhow::Result;
use clap::Args;

use crate::app::AppContext;
use crate::application::services::catalog_ops;
use crate::output::CatalogResult;

/// Arguments for the change-visibility command.
#[derive(Args)]
pub struct ChangeVisibilityArgs {
    /// Application: [catalogURL/]namespace/appName
    pub application: String,

    /// Make the application private
    #[arg(long)]
    pub private: bool,

    /// Make the application public (the default)
    #[arg(long)]
    pub public: bool,
}

/// Run the change-visibility command.
///
/// # Errors
///
/// Returns an error if both flags are set or the update is rejected.
pub async fn run(app: &AppContext, args: ChangeVisibilityArgs) -> Result<()> {
    let private = catalog_ops::requested_privacy(args.private, args.public)?;
    let connector = app.connector()?;
    let response =
        catalog_ops::change_visibility(&connector, &app.operation, &args.application, private)
            .await?;
    app.renderer().render(&CatalogResult::Op(response))
}

//! Push command: uploads a local application tree to the catalog.

use std::path::PathBuf;

use anyhow::Result;
use clap::Args;

use crate::app::AppContext;
use crate::application::ProgressReporter as _;
use crate::application::services::upload::{self, PushRequest};
use crate::infra::fs::LocalApplicationDir;
use crate::output::CatalogResult;

/// Arguments for the push command.
#[derive(Args)]
pub struct PushArgs {
    /// Application identifier: [catalogURL/]namespace/appName[:tag]
    pub application: String,

    /// Directory holding the application files
    pub path: PathBuf,

    /// Store the application as private
    #[arg(long)]
    pub private: bool,
}

/// Run the push command.
///
/// # Errors
///
/// Returns an error if the tree cannot be read or the catalog rejects it.
pub async fn run(app: &AppContext, args: PushArgs) -> Result<()> {
    let connector = app.connector()?;
    let source = LocalApplicationDir::new(&args.path);
    let reporter = app.reporter();
    let outcome = upload::push(
        &connector,
        &source,
        &app.operation,
        PushRequest {
            application_id: &args.application,
            private: args.private,
        },
        &reporter,
    )
    .await?;
    reporter.success("application pushed");
    app.renderer().render(&CatalogResult::Transfer(outcome))
}

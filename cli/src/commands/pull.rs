//! Pull command: downloads an application from the catalog.

use std::path::PathBuf;

use anyhow::Result;
use clap::Args;

use crate::app::AppContext;
use crate::application::ProgressReporter as _;
use crate::application::services::download;
use crate::domain::PullMode;
use crate::infra::fs::LocalArtifactDir;
use crate::output::CatalogResult;

/// Arguments for the pull command.
#[derive(Args)]
pub struct PullArgs {
    /// Application identifier: [catalogURL/]namespace/appName[:tag]
    pub application: String,

    /// Directory where the application is saved
    #[arg(long, default_value = ".")]
    pub output_dir: PathBuf,

    /// Receive raw files and build `<appName>.tgz` locally
    #[arg(long)]
    pub local_archive: bool,
}

/// Run the pull command.
///
/// # Errors
///
/// Returns an error if the download fails or the result cannot be written.
pub async fn run(app: &AppContext, args: PullArgs) -> Result<()> {
    let connector = app.connector()?;
    let sink = LocalArtifactDir::new(&args.output_dir);
    let mode = if args.local_archive {
        PullMode::LocalArchive
    } else {
        PullMode::ServerArchive
    };
    let reporter = app.reporter();
    let outcome = download::pull(
        &connector,
        &sink,
        &app.operation,
        &args.application,
        mode,
        &reporter,
    )
    .await?;
    reporter.success("application pulled");
    app.renderer().render(&CatalogResult::Transfer(outcome))
}

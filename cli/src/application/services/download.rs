//! Application service: pull use-case.
//!
//! Imports only from `crate::domain` and `crate::application::ports`.
//! All I/O is routed through injected port traits.

use catalog_common::DownloadApplicationRequest;
use tracing::debug;

use crate::application::ports::{
    ArtifactSink, CatalogConnector, CatalogSession, DownloadStream, ProgressReporter,
};
use crate::application::services::upload::settle;
use crate::application::services::{OperationContext, with_deadline};
use crate::domain::identifier::output_base_name;
use crate::domain::transfer::local_file_name;
use crate::domain::{
    ApplicationId, CatalogError, FileEntry, PullMode, Transfer, TransferOutcome, TransferPhase,
};

/// Download an application and persist it through `sink`.
///
/// Every file is collected before anything is written, so a stream that
/// breaks half-way leaves nothing behind.
///
/// # Errors
///
/// `InvalidArgument` for a malformed identifier, `ConnectionError` when the
/// catalog is unreachable, `RemoteError` when the stream fails or carries an
/// unexpected number of files, `IOError` when the result cannot be written,
/// and `DeadlineExceeded` when the pull outlives the operation timeout.
pub async fn pull(
    connector: &impl CatalogConnector,
    sink: &impl ArtifactSink,
    ctx: &OperationContext,
    application_id: &str,
    mode: PullMode,
    reporter: &impl ProgressReporter,
) -> Result<TransferOutcome, CatalogError> {
    let mut transfer = Transfer::new();
    let result = with_deadline(
        ctx.timeout,
        collect_files(connector, ctx, application_id, mode, reporter, &mut transfer),
    )
    .await
    .and_then(|files| persist(sink, application_id, mode, files));
    settle(&mut transfer, application_id, result)
}

async fn collect_files(
    connector: &impl CatalogConnector,
    ctx: &OperationContext,
    application_id: &str,
    mode: PullMode,
    reporter: &impl ProgressReporter,
    transfer: &mut Transfer,
) -> Result<Vec<FileEntry>, CatalogError> {
    transfer.advance(TransferPhase::Resolving);
    let id = ApplicationId::parse(application_id)?;
    let target = ctx.connection.target_for_application(&id);
    let session = connector.connect(&target)?;

    transfer.advance(TransferPhase::Streaming);
    reporter.step(&format!("pulling {} from {}", id, target.address));
    let mut stream = session
        .open_download(DownloadApplicationRequest {
            application_id: application_id.to_string(),
            compressed: mode.request_compressed(),
        })
        .await?;

    let mut files = Vec::new();
    while let Some(file) = stream.recv().await? {
        debug!(path = %file.path, bytes = file.data.len(), "file received");
        files.push(FileEntry {
            relative_path: file.path,
            contents: file.data,
        });
    }
    Ok(files)
}

/// Write the collected files according to `mode`.
///
/// # Errors
///
/// `RemoteError` when no file arrived, or when a server-built archive was
/// expected but several files arrived. `IOError` when writing fails.
pub fn persist(
    sink: &impl ArtifactSink,
    application_id: &str,
    mode: PullMode,
    files: Vec<FileEntry>,
) -> Result<TransferOutcome, CatalogError> {
    if files.is_empty() {
        return Err(CatalogError::remote(format!(
            "no files received for {application_id}"
        )));
    }
    let base_name = output_base_name(application_id);
    let path = match mode {
        PullMode::ServerArchive => {
            let [archive] = files.as_slice() else {
                return Err(CatalogError::remote(format!(
                    "expected a single archive for {application_id}, received {} files",
                    files.len()
                )));
            };
            sink.write_file(
                &local_file_name(&archive.relative_path, &base_name),
                &archive.contents,
            )?
        }
        PullMode::LocalArchive => sink.write_archive(&base_name, &files)?,
    };
    Ok(TransferOutcome::saved(path))
}

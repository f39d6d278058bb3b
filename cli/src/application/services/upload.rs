//! Application service: push use-case.
//!
//! Imports only from `crate::domain` and `crate::application::ports`.
//! All I/O is routed through injected port traits.

use catalog_common::{AddApplicationRequest, FileInfo};
use tracing::debug;

use crate::application::ports::{
    ApplicationSource, CatalogConnector, CatalogSession, ProgressReporter, UploadStream,
};
use crate::application::services::{OperationContext, ensure_success, with_deadline};
use crate::domain::{ApplicationId, CatalogError, Transfer, TransferOutcome, TransferPhase};

/// Inputs of a single push.
pub struct PushRequest<'a> {
    /// Identifier exactly as typed; sent verbatim on every message.
    pub application_id: &'a str,
    pub private: bool,
}

/// Upload the application tree behind `source` to the catalog.
///
/// The tree is enumerated before any stream is opened, then each file is sent
/// as one message. Only one file's contents are held in memory at a time.
///
/// # Errors
///
/// `InvalidArgument` for a malformed identifier, `IOError` when the tree
/// cannot be walked or read, `ConnectionError` when the catalog is
/// unreachable, `RemoteError` when the catalog rejects the upload, and
/// `DeadlineExceeded` when the whole push outlives the operation timeout.
pub async fn push(
    connector: &impl CatalogConnector,
    source: &impl ApplicationSource,
    ctx: &OperationContext,
    request: PushRequest<'_>,
    reporter: &impl ProgressReporter,
) -> Result<TransferOutcome, CatalogError> {
    let mut transfer = Transfer::new();
    let result = with_deadline(
        ctx.timeout,
        stream_files(connector, source, ctx, &request, reporter, &mut transfer),
    )
    .await;
    settle(&mut transfer, request.application_id, result)
}

async fn stream_files(
    connector: &impl CatalogConnector,
    source: &impl ApplicationSource,
    ctx: &OperationContext,
    request: &PushRequest<'_>,
    reporter: &impl ProgressReporter,
    transfer: &mut Transfer,
) -> Result<TransferOutcome, CatalogError> {
    transfer.advance(TransferPhase::Resolving);
    let id = ApplicationId::parse(request.application_id)?;
    let target = ctx.connection.target_for_application(&id);
    let session = connector.connect(&target)?;

    let files = source.list_files()?;
    debug!(count = files.len(), "application files found");
    if files.is_empty() {
        reporter.warn("no files found, pushing an empty application");
    }

    transfer.advance(TransferPhase::Streaming);
    reporter.step(&format!("pushing {} to {}", id, target.address));
    let mut upload = session.open_upload().await?;
    for path in files {
        let data = source.read_file(&path)?;
        debug!(%path, bytes = data.len(), "sending file");
        upload
            .send(AddApplicationRequest {
                application_id: request.application_id.to_string(),
                file: Some(FileInfo { path, data }),
                private: request.private,
            })
            .await?;
    }

    let response = ensure_success(upload.close_and_recv().await?)?;
    Ok(TransferOutcome::success(response.user_info))
}

/// Record the terminal phase of a transfer and pass the result through.
pub(crate) fn settle<T>(
    transfer: &mut Transfer,
    application_id: &str,
    result: Result<T, CatalogError>,
) -> Result<T, CatalogError> {
    let next = if result.is_ok() {
        TransferPhase::Completed
    } else {
        TransferPhase::Failed
    };
    transfer.advance(next);
    debug!(application = application_id, phase = %transfer.phase(), "transfer finished");
    result
}

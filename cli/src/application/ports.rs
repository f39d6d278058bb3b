//! Port trait definitions for the Application layer.
//!
//! Ports are the interfaces (contracts) that infrastructure must fulfill.
//! This file imports only from `crate::domain` and the shared wire types,
//! never from `crate::infra`, `crate::commands`, or `crate::output`.

use std::path::PathBuf;

use anyhow::Result;
use catalog_common::{
    AddApplicationRequest, ApplicationList, DeployApplicationRequest, DownloadApplicationRequest,
    FileInfo, InfoApplicationRequest, InfoApplicationResponse, ListApplicationsRequest,
    OpResponse, RemoveApplicationRequest, SummaryResponse, UpdateRequest,
};

use crate::domain::config::{PlaygroundConfig, TokenConfig};
use crate::domain::{CatalogError, ConnectionTarget, FileEntry};

// ── Catalog transport ports ───────────────────────────────────────────────────

/// Opens sessions against a catalog-manager.
pub trait CatalogConnector {
    type Session: CatalogSession;

    /// Prepare a session for `target`.
    ///
    /// Dialing is lazy: an unreachable server is reported by the first call
    /// made on the session, not here.
    fn connect(&self, target: &ConnectionTarget) -> Result<Self::Session, CatalogError>;
}

/// Calls available on an open catalog session.
#[allow(async_fn_in_trait)]
pub trait CatalogSession {
    type Upload: UploadStream;
    type Download: DownloadStream;

    /// Open the client-streaming Add call.
    async fn open_upload(&self) -> Result<Self::Upload, CatalogError>;
    /// Open the server-streaming Download call.
    async fn open_download(
        &self,
        request: DownloadApplicationRequest,
    ) -> Result<Self::Download, CatalogError>;
    async fn remove(&self, request: RemoveApplicationRequest) -> Result<OpResponse, CatalogError>;
    async fn info(
        &self,
        request: InfoApplicationRequest,
    ) -> Result<InfoApplicationResponse, CatalogError>;
    async fn list(&self, request: ListApplicationsRequest) -> Result<ApplicationList, CatalogError>;
    async fn update(&self, request: UpdateRequest) -> Result<OpResponse, CatalogError>;
    async fn summary(&self) -> Result<SummaryResponse, CatalogError>;
    async fn deploy(&self, request: DeployApplicationRequest) -> Result<OpResponse, CatalogError>;
}

/// Sending half of an Add call.
#[allow(async_fn_in_trait)]
pub trait UploadStream {
    /// Send one message. Fails if the call has already ended.
    async fn send(&mut self, message: AddApplicationRequest) -> Result<(), CatalogError>;
    /// Close the send side and wait for the aggregate acknowledgement.
    async fn close_and_recv(self) -> Result<OpResponse, CatalogError>;
}

/// Receiving half of a Download call.
#[allow(async_fn_in_trait)]
pub trait DownloadStream {
    /// Next file, or `None` on clean end-of-stream.
    async fn recv(&mut self) -> Result<Option<FileInfo>, CatalogError>;
}

// ── Local filesystem ports ────────────────────────────────────────────────────

/// A local application tree to be pushed.
pub trait ApplicationSource {
    /// Every regular file beneath the root, as `./`-prefixed relative paths.
    fn list_files(&self) -> Result<Vec<String>, CatalogError>;
    /// Contents of one file returned by `list_files`.
    fn read_file(&self, relative_path: &str) -> Result<Vec<u8>, CatalogError>;
}

/// Destination for pulled applications.
pub trait ArtifactSink {
    /// Write `contents` verbatim as `file_name`; returns the written path.
    fn write_file(&self, file_name: &str, contents: &[u8]) -> Result<PathBuf, CatalogError>;
    /// Write all files into `<base_name>.tgz`; returns the written path.
    fn write_archive(&self, base_name: &str, files: &[FileEntry]) -> Result<PathBuf, CatalogError>;
}

// ── Configuration ports ───────────────────────────────────────────────────────

/// Loads the login token, if the user has one.
pub trait TokenStore {
    fn load(&self) -> Result<Option<TokenConfig>>;
}

/// Loads the installation-selection file, if present.
pub trait InstallationStore {
    fn load(&self) -> Result<Option<PlaygroundConfig>>;
}

// ── Progress Reporting Port ───────────────────────────────────────────────────

/// Abstracts progress reporting so services can emit events without
/// depending on the Presentation layer.
pub trait ProgressReporter {
    /// Emit an in-progress step message.
    fn step(&self, message: &str);
    /// Emit a success message.
    fn success(&self, message: &str);
    /// Emit a warning message.
    fn warn(&self, message: &str);
}

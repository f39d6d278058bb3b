//! File transfer types shared by push and pull.

use std::fmt;
use std::path::{Path, PathBuf};

use serde::Serialize;

/// One application file: path relative to the application root plus contents.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileEntry {
    pub relative_path: String,
    pub contents: Vec<u8>,
}

/// How a pulled application is persisted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PullMode {
    /// The server sends one pre-compressed archive which is written verbatim.
    #[default]
    ServerArchive,
    /// The server sends raw files and the client builds `<app>.tgz`.
    LocalArchive,
}

impl PullMode {
    /// Value of the `compressed` flag on the download request.
    #[must_use]
    pub fn request_compressed(self) -> bool {
        self == PullMode::ServerArchive
    }
}

/// Local file name for a server-built archive.
///
/// Only the final component of `declared_path` is kept so a pull never writes
/// outside the output directory. An empty or directory-like path falls back
/// to `<base_name>.tgz`.
#[must_use]
pub fn local_file_name(declared_path: &str, base_name: &str) -> String {
    Path::new(declared_path)
        .file_name()
        .and_then(|name| name.to_str())
        .filter(|name| !name.is_empty())
        .map_or_else(|| format!("{base_name}.tgz"), str::to_string)
}

/// Phase of a push or pull.
///
/// `Idle → Resolving → Streaming → Completed | Failed`. Any non-terminal phase
/// may fail; terminal phases never change again.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TransferPhase {
    Idle,
    Resolving,
    Streaming,
    Completed,
    Failed,
}

impl TransferPhase {
    #[must_use]
    pub fn is_terminal(self) -> bool {
        matches!(self, TransferPhase::Completed | TransferPhase::Failed)
    }

    /// Whether moving from `self` to `next` is allowed.
    #[must_use]
    pub fn can_advance_to(self, next: TransferPhase) -> bool {
        use TransferPhase::{Completed, Failed, Idle, Resolving, Streaming};
        match (self, next) {
            (Completed | Failed, _) => false,
            (_, Failed) => true,
            (Idle, Resolving) | (Resolving, Streaming) | (Streaming, Completed) => true,
            _ => false,
        }
    }
}

impl fmt::Display for TransferPhase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            TransferPhase::Idle => "idle",
            TransferPhase::Resolving => "resolving",
            TransferPhase::Streaming => "streaming",
            TransferPhase::Completed => "completed",
            TransferPhase::Failed => "failed",
        };
        f.write_str(name)
    }
}

/// Tracks the phase of a single transfer.
#[derive(Debug)]
pub struct Transfer {
    phase: TransferPhase,
}

impl Default for Transfer {
    fn default() -> Self {
        Self::new()
    }
}

impl Transfer {
    #[must_use]
    pub fn new() -> Self {
        Self {
            phase: TransferPhase::Idle,
        }
    }

    #[must_use]
    pub fn phase(&self) -> TransferPhase {
        self.phase
    }

    /// Move to `next`. Returns `false` and stays put if the move is not allowed.
    pub fn advance(&mut self, next: TransferPhase) -> bool {
        if !self.phase.can_advance_to(next) {
            return false;
        }
        self.phase = next;
        true
    }
}

/// Result of a push or pull that completed. Failures are `CatalogError`s.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TransferOutcome {
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub saved_path: Option<PathBuf>,
}

impl TransferOutcome {
    #[must_use]
    pub fn success(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            saved_path: None,
        }
    }

    #[must_use]
    pub fn saved(path: PathBuf) -> Self {
        Self {
            message: format!("application saved on {}", path.display()),
            saved_path: Some(path),
        }
    }
}

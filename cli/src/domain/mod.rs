//! Domain layer: pure catalog types and validation.
//!
//! This module has zero imports from `crate::infra`, `crate::commands`,
//! `crate::application`, `tokio`, `std::fs`, `std::process`, or `std::net`.
//! All functions are synchronous and take data in, returning data out.

pub mod config;
pub mod connection;
pub mod error;
pub mod identifier;
pub mod transfer;

pub use connection::{ConnectionConfig, ConnectionTarget, resolve_address};
pub use error::CatalogError;
pub use identifier::ApplicationId;
pub use transfer::{FileEntry, PullMode, Transfer, TransferOutcome, TransferPhase};

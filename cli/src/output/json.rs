//! JSON output helpers.
//!
//! Provides the result renderer behind `--output json` and the error-object
//! formatter used when a command fails in that mode.

use anyhow::{Context, Result};

use crate::output::CatalogResult;

/// Format a JSON error object.
///
/// Output (pretty-printed):
/// ```json
/// {
///   "error": true,
///   "message": "...",
///   "code": "..."
/// }
/// ```
///
/// # Errors
///
/// Returns an error if JSON serialization fails.
pub fn format_error(message: &str, code: &str) -> Result<String> {
    let obj = serde_json::json!({
        "error": true,
        "message": message,
        "code": code,
    });
    serde_json::to_string_pretty(&obj).context("JSON serialization failed")
}

/// Pretty-printed JSON of a command result.
///
/// # Errors
///
/// Returns an error if JSON serialization fails.
pub fn format_result(result: &CatalogResult) -> Result<String> {
    serde_json::to_string_pretty(result).context("JSON serialization failed")
}

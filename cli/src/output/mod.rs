//! Output formatting module

pub mod json;
pub mod progress;
pub mod reporter;
pub mod styles;
pub mod table;

use anyhow::Result;
use catalog_common::{ApplicationList, InfoApplicationResponse, OpResponse, SummaryResponse};
use console::Term;
use serde::Serialize;

pub use reporter::TerminalReporter;
pub use styles::Styles;
pub use table::TableRenderer;

use crate::domain::TransferOutcome;

/// Output context carrying styling and terminal state.
pub struct OutputContext {
    /// Stylesheet for colored output.
    pub styles: Styles,
    /// Whether stdout is a TTY.
    pub is_tty: bool,
    /// Whether to suppress non-error output.
    pub quiet: bool,
}

impl OutputContext {
    /// Create output context based on CLI flags and environment.
    #[must_use]
    pub fn new(no_color: bool, quiet: bool) -> Self {
        let is_tty = Term::stdout().is_term();
        let use_colors = !no_color && is_tty && std::env::var("NO_COLOR").is_err();

        let mut styles = Styles::default();
        if use_colors {
            styles.colorize();
        }

        Self {
            styles,
            is_tty,
            quiet,
        }
    }

    /// Check if progress indicators should be shown.
    #[must_use]
    pub fn show_progress(&self) -> bool {
        self.is_tty && !self.quiet
    }
}

/// Every kind of result a command can print.
#[derive(Debug, Serialize)]
#[serde(untagged)]
pub enum CatalogResult {
    Op(OpResponse),
    Transfer(TransferOutcome),
    Info(InfoApplicationResponse),
    List(ApplicationList),
    Summary(SummaryResponse),
}

/// Format selected with `--output`.
pub enum Renderer<'a> {
    Table(TableRenderer<'a>),
    Json,
    Silent,
}

impl Renderer<'_> {
    /// Print `result` to stdout.
    ///
    /// # Errors
    ///
    /// Returns an error if JSON serialization fails.
    pub fn render(&self, result: &CatalogResult) -> Result<()> {
        match self {
            Renderer::Table(table) => print!("{}", table.render(result)),
            Renderer::Json => println!("{}", json::format_result(result)?),
            Renderer::Silent => {}
        }
        Ok(())
    }
}

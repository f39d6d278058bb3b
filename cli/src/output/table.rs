//! Human-readable table renderer.

use std::fmt::Write as _;

use catalog_common::{ApplicationSummary, InfoApplicationResponse};
use owo_colors::OwoColorize as _;

use crate::output::{CatalogResult, OutputContext};

/// Renders command results as aligned text tables using `OutputContext` styles.
pub struct TableRenderer<'a> {
    ctx: &'a OutputContext,
}

impl<'a> TableRenderer<'a> {
    /// Create a new `TableRenderer` wrapping the given output context.
    #[must_use]
    pub fn new(ctx: &'a OutputContext) -> Self {
        Self { ctx }
    }

    #[must_use]
    pub fn render(&self, result: &CatalogResult) -> String {
        match result {
            CatalogResult::Op(op) => self.table(
                &["STATUS", "INFO"],
                &[vec![op.status_name.clone(), op.user_info.clone()]],
            ),
            CatalogResult::Transfer(outcome) => self.table(
                &["STATUS", "INFO"],
                &[vec!["SUCCESS".to_string(), outcome.message.clone()]],
            ),
            CatalogResult::Info(info) => self.info(info),
            CatalogResult::List(list) => self.table(
                &["APPLICATION", "NAME", "VISIBILITY"],
                &list.applications.iter().map(list_row).collect::<Vec<_>>(),
            ),
            CatalogResult::Summary(summary) => self.table(
                &["NAMESPACES", "APPLICATIONS", "TAGS"],
                &[vec![
                    summary.num_namespaces.to_string(),
                    summary.num_applications.to_string(),
                    summary.num_tags.to_string(),
                ]],
            ),
        }
    }

    fn info(&self, info: &InfoApplicationResponse) -> String {
        let metadata = info.metadata.clone().unwrap_or_default();
        let requires = metadata.requires.clone().unwrap_or_default();
        let app_id = format!(
            "{}/{}:{}",
            info.namespace, info.application_name, info.tag
        );

        let mut out = self.table(
            &["APP_ID", "NAME", "VISIBILITY"],
            &[vec![app_id, metadata.name, visibility(info.private).to_string()]],
        );
        self.section(&mut out, "DESCRIPTION", &metadata.description);
        self.section(&mut out, "TRAITS", &requires.traits.join("\n"));
        self.section(&mut out, "SCOPES", &requires.scopes.join("\n"));
        out.push('\n');
        if requires.k8s.is_empty() {
            self.section(&mut out, "K8S_ENTITIES", "");
        } else {
            let rows: Vec<Vec<String>> = requires
                .k8s
                .iter()
                .map(|e| vec![e.api_version.clone(), e.kind.clone(), e.name.clone()])
                .collect();
            out.push_str(&self.table(&["API_VERSION", "KIND", "NAME"], &rows));
        }
        self.section(
            &mut out,
            "README",
            String::from_utf8_lossy(&info.readme_file).trim_end(),
        );
        out
    }

    fn section(&self, out: &mut String, title: &str, body: &str) {
        let _ = writeln!(out, "\n{}", title.style(self.ctx.styles.header));
        if body.is_empty() {
            let _ = writeln!(out, "{}", "-".style(self.ctx.styles.dim));
        } else {
            let _ = writeln!(out, "{body}");
        }
    }

    fn table(&self, header: &[&str], rows: &[Vec<String>]) -> String {
        let mut widths: Vec<usize> = header.iter().map(|h| h.chars().count()).collect();
        for row in rows {
            for (width, cell) in widths.iter_mut().zip(row) {
                *width = (*width).max(cell.chars().count());
            }
        }

        let mut out = String::new();
        let heading = pad_row(header, &widths);
        let _ = writeln!(out, "{}", heading.style(self.ctx.styles.header));
        for row in rows {
            let _ = writeln!(out, "{}", pad_row(row.as_slice(), &widths));
        }
        out
    }
}

fn list_row(app: &ApplicationSummary) -> Vec<String> {
    vec![
        format!("{}/{}:{}", app.namespace, app.application_name, app.tag),
        app.metadata_name.clone(),
        visibility(app.private).to_string(),
    ]
}

fn visibility(private: bool) -> &'static str {
    if private { "private" } else { "public" }
}

fn pad_row(cells: &[impl AsRef<str>], widths: &[usize]) -> String {
    let padded: Vec<String> = cells
        .iter()
        .zip(widths)
        .map(|(cell, width)| format!("{:<width$}", cell.as_ref()))
        .collect();
    padded.join("   ").trim_end().to_string()
}

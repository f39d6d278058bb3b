//! Version command

use crate::app::OutputFormat;

/// Commit the binary was built from, when the build provides one.
const COMMIT: Option<&str> = option_env!("CATALOG_COMMIT");

/// Run the version command.
pub fn run(format: OutputFormat) {
    let version = env!("CARGO_PKG_VERSION");
    let commit = COMMIT.unwrap_or("unknown");

    match format {
        OutputFormat::Json => {
            println!(r#"{{"version":"{version}","commit":"{commit}"}}"#);
        }
        OutputFormat::Table => println!("catalog {version} ({commit})"),
        OutputFormat::None => {}
    }
}

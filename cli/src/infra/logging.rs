//! Process-wide tracing subscriber, installed once from `main`.

use tracing_subscriber::EnvFilter;

/// Install the subscriber.
///
/// `--debug` forces the `debug` level; otherwise `RUST_LOG` wins over the
/// `info` default. Events go to stderr so stdout only carries results.
pub fn init(debug: bool, console: bool) {
    let filter = if debug {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"))
    };
    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr);
    let installed = if console {
        builder.pretty().try_init()
    } else {
        builder.json().try_init()
    };
    if let Err(e) = installed {
        eprintln!("warning: logging disabled: {e}");
    }
}

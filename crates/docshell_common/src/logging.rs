//! Logging utilities for the Docshell application.
//!
//! All crates log through `tracing`; the binary calls [`init`] or
//! [`init_with_level`] once at startup to install the subscriber.

use tracing::{info, Level};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

/// Initialize the tracing subscriber at INFO level.
///
/// # Examples
///
/// ```
/// use docshell_common::logging;
///
/// logging::init();
/// ```
pub fn init() {
    init_with_level(Level::INFO);
}

/// Initialize the tracing subscriber with a specific log level.
///
/// `RUST_LOG` takes precedence when set; otherwise Docshell crates log at
/// `level` and request tracing at INFO. Calling this more than once is
/// harmless: later calls leave the installed subscriber in place.
pub fn init_with_level(level: Level) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_directives(level)));

    let result = tracing_subscriber::registry()
        .with(
            fmt::layer()
                .with_target(true)
                .with_file(true)
                .with_line_number(true)
                .with_thread_ids(true)
                .with_thread_names(true),
        )
        .with(filter)
        .try_init();

    if result.is_ok() {
        info!("Logging initialized at level: {}", level);
    }
}

/// Filter directives used when `RUST_LOG` is not set.
pub fn default_directives(level: Level) -> String {
    format!("docshell={},tower_http=info", level.as_str().to_lowercase())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_directives_name_the_workspace_crates() {
        assert_eq!(default_directives(Level::DEBUG), "docshell=debug,tower_http=info");
    }

    #[test]
    fn init_is_idempotent() {
        init_with_level(Level::DEBUG);
        init();
    }
}

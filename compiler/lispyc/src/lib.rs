//! Lispy driver: command-line configuration, the line-oriented session, and
//! tracing setup for the `lispy` binary.

mod config;
mod session;

use std::sync::Once;

pub use config::{parse_args, Command, ConfigError, ReplConfig, USAGE};
pub use session::{is_exit_command, render_parse_error, render_parse_report, Session};

static TRACING_INIT: Once = Once::new();

/// Install the global tracing subscriber.
///
/// Does nothing unless `RUST_LOG` is set. With `LISPY_LOG_TREE` also set,
/// spans are drawn as an indented call tree instead of flat lines. Output
/// goes to stderr so it never mixes with session output.
pub fn init_tracing() {
    TRACING_INIT.call_once(|| {
        use tracing_subscriber::{fmt, prelude::*, EnvFilter};

        if std::env::var("RUST_LOG").is_err() {
            return;
        }
        let filter = EnvFilter::from_default_env();
        if std::env::var_os("LISPY_LOG_TREE").is_some() {
            tracing_subscriber::registry()
                .with(
                    tracing_tree::HierarchicalLayer::new(2)
                        .with_targets(true)
                        .with_bracketed_fields(true),
                )
                .with(filter)
                .init();
        } else {
            tracing_subscriber::registry()
                .with(
                    fmt::layer()
                        .with_target(true)
                        .with_level(true)
                        .with_writer(std::io::stderr),
                )
                .with(filter)
                .init();
        }
    });
}

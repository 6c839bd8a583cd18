//! Browser console logging.

use tracing_subscriber::{EnvFilter, prelude::*};
use tracing_web::MakeWebConsoleWriter;

/// Directives used unless `UI_LOG` was set at build time.
const DEFAULT_DIRECTIVES: &str = "error,ui=debug,resources=debug,payloads=debug";

pub fn init_logging() {
    let directives = option_env!("UI_LOG").unwrap_or(DEFAULT_DIRECTIVES);
    let filter = EnvFilter::try_new(directives)
        .unwrap_or_else(|_| EnvFilter::new(DEFAULT_DIRECTIVES));

    // No clock in the browser, and consoles render their own levels.
    let console = tracing_subscriber::fmt::layer()
        .with_ansi(false)
        .without_time()
        .with_level(false)
        .with_line_number(true)
        .with_writer(MakeWebConsoleWriter::new().with_pretty_level());

    match tracing_subscriber::registry().with(filter).with(console).try_init() {
        Ok(()) => tracing::info!(directives, "console logging ready"),
        Err(_) => tracing::debug!("console logging was already set up"),
    }
}

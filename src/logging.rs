//! Structured logging setup.
//!
//! Simplified from the teacher's rolling-file `tracing_appender` layering to
//! stdout-only: this core has no rolling-file requirement, but keeps the
//! same `EnvFilter` + JSON-or-text switch idiom.

use crate::config::Settings;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

pub fn init_tracing(settings: &Settings) {
    let default_level = if settings.debug { "debug" } else { "info" };
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("dark_grid_core={default_level}")));

    let registry = tracing_subscriber::registry().with(filter);

    if settings.env == "dev" {
        let layer = fmt::layer().with_target(false).with_ansi(true);
        registry.with(layer).init();
    } else {
        let layer = fmt::layer().json().with_target(true).with_ansi(false);
        registry.with(layer).init();
    }
}

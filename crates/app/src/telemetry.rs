//! Tracing setup for the desktop binary.
//!
//! - `NURSE_LOG` holds the filter directives (default `info`).
//! - `NURSE_LOG_FORMAT` selects `pretty` (default) or `json` output.

use tracing_subscriber::EnvFilter;

pub fn init_tracing() {
    let filter = EnvFilter::try_from_env("NURSE_LOG").unwrap_or_else(|_| EnvFilter::new("info"));

    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_line_number(true);

    match std::env::var("NURSE_LOG_FORMAT").as_deref() {
        Ok("json") => builder.json().init(),
        _ => builder.init(),
    }
}

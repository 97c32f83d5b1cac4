//! Command-line interface layer.

pub mod commands;
pub mod output;
pub mod types;

pub use types::{Cli, Commands};

/// Report a fatal error and exit non-zero.
///
/// Per-item reconciliation failures never reach this path; only invalid
/// configuration and collection-stage failures abort a run.
pub fn handle_error(err: anyhow::Error, json_mode: bool) -> ! {
    if json_mode {
        let payload = serde_json::json!({ "error": format!("{err:#}") });
        eprintln!("{}", serde_json::to_string_pretty(&payload).unwrap_or_default());
    } else {
        eprintln!("Error: {err:#}");
    }
    std::process::exit(1);
}

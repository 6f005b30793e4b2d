//! Tracing setup and log hygiene helpers

use tracing_subscriber::EnvFilter;

/// Longest provider/error body written to the logs
pub const MAX_LOGGED_BODY_CHARS: usize = 500;

/// Install the global subscriber. A subscriber installed by the host wins.
pub fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let _ = tracing_subscriber::fmt().with_env_filter(filter).try_init();
}

/// Cut `body` down to [`MAX_LOGGED_BODY_CHARS`] characters.
pub fn truncate_for_log(body: &str) -> String {
    let mut chars = body.chars();
    let head: String = chars.by_ref().take(MAX_LOGGED_BODY_CHARS).collect();
    if chars.next().is_some() {
        format!("{}… ({} bytes total)", head, body.len())
    } else {
        head
    }
}

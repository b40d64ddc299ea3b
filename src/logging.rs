use std::str::FromStr;
use tracing::Level;

/// Installs the global fmt subscriber. `filter` is a level name such as
/// `"debug"`; anything unrecognized means `info`. Safe to call more than once.
pub fn init(filter: &str) {
    let level = Level::from_str(filter.trim()).unwrap_or(Level::INFO);
    let result = tracing_subscriber::fmt()
        .with_max_level(level)
        .with_target(true)
        .try_init();
    if result.is_ok() {
        tracing::debug!(%level, "logging initialized");
    }
}

use std::time::Duration;

pub(crate) const DEFAULT_SERVER: &str = "114.114.114.114";
pub(crate) const DEFAULT_PORT: u16 = 53;
/// Tick period used when `--time` is zero or cannot be parsed.
pub(crate) const DEFAULT_INTERVAL: Duration = Duration::from_millis(100);
pub(crate) const DEFAULT_INTERVAL_TEXT: &str = "100ms";
pub(crate) const DEFAULT_TIMEOUT_TEXT: &str = "5s";

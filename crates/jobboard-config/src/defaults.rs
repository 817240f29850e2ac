//! Built-in defaults applied before files, environment, and flags.

use crate::logging::LogFormat;

/// Default interface the server listens on.
pub const DEFAULT_LISTEN_HOST: &str = "0.0.0.0";

/// Default TCP port the server listens on.
pub const DEFAULT_LISTEN_PORT: u16 = 8080;

/// Default upper bound on one request line, in bytes. Large enough for
/// base64-encoded resumes of several megabytes.
pub const DEFAULT_MAX_LINE_BYTES: usize = 64 * 1024 * 1024;

/// Default log filter expression used by the server.
pub const DEFAULT_LOG_FILTER: &str = "info";

/// Owned listen host used where allocation is required (e.g. serde).
#[must_use]
pub fn default_listen_host() -> String {
    DEFAULT_LISTEN_HOST.to_owned()
}

/// Default TCP port used when none is configured.
#[must_use]
pub const fn default_listen_port() -> u16 {
    DEFAULT_LISTEN_PORT
}

/// Default request line bound used when none is configured.
#[must_use]
pub const fn default_max_line_bytes() -> usize {
    DEFAULT_MAX_LINE_BYTES
}

/// Default log filter expression used by the server.
#[must_use]
pub const fn default_log_filter() -> &'static str {
    DEFAULT_LOG_FILTER
}

/// Owned log filter value used where allocation is required (e.g. serde).
#[must_use]
pub fn default_log_filter_string() -> String {
    DEFAULT_LOG_FILTER.to_owned()
}

/// Default logging format for the server.
#[must_use]
pub const fn default_log_format() -> LogFormat {
    LogFormat::Json
}

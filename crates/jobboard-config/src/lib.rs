//! Layered configuration for the job board server.
//!
//! Values are merged from built-in defaults, an optional TOML file,
//! `JOBBOARD_*` environment variables, and command-line flags, in increasing
//! order of precedence. Loading is delegated to [`ortho_config`], which
//! aggregates every malformed source into a single error.

mod defaults;
mod listen;
mod logging;

use std::ffi::OsString;
use std::sync::Arc;

use ortho_config::{OrthoConfig, OrthoError};
use serde::{Deserialize, Serialize};

pub use defaults::{
    DEFAULT_LISTEN_HOST, DEFAULT_LISTEN_PORT, DEFAULT_LOG_FILTER, DEFAULT_MAX_LINE_BYTES,
    default_listen_host, default_listen_port, default_log_filter, default_log_filter_string,
    default_log_format, default_max_line_bytes,
};
pub use listen::{ListenEndpoint, ResolveError};
pub use logging::{LogFormat, LogFormatParseError};

/// Resolved server configuration.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize, OrthoConfig)]
#[ortho_config(prefix = "JOBBOARD")]
pub struct Config {
    /// Interface the listener binds to.
    #[ortho_config(default = defaults::default_listen_host())]
    pub listen_host: String,
    /// TCP port the listener binds to.
    #[ortho_config(default = defaults::DEFAULT_LISTEN_PORT)]
    pub listen_port: u16,
    /// Longest request line accepted, in bytes. Longer lines are discarded
    /// and answered with an error.
    #[ortho_config(default = defaults::DEFAULT_MAX_LINE_BYTES)]
    pub max_line_bytes: usize,
    /// `tracing` filter directive.
    #[ortho_config(default = defaults::default_log_filter_string())]
    pub log_filter: String,
    /// Output format for structured logs.
    #[ortho_config(default = defaults::default_log_format())]
    pub log_format: LogFormat,
}

impl Config {
    /// Loads configuration from the process arguments and environment.
    ///
    /// # Errors
    ///
    /// Returns the aggregated loader error when any source is malformed.
    pub fn load_from_process() -> Result<Self, Arc<OrthoError>> {
        Self::load()
    }

    /// Loads configuration from an explicit argument list and the environment.
    ///
    /// The first item is treated as the program name, as with `std::env::args_os`.
    ///
    /// # Errors
    ///
    /// Returns the aggregated loader error when any source is malformed.
    pub fn load_from_args<I>(args: I) -> Result<Self, Arc<OrthoError>>
    where
        I: IntoIterator<Item = OsString>,
    {
        Self::load_from_iter(args)
    }

    /// Endpoint the listener should bind to.
    #[must_use]
    pub fn listen_endpoint(&self) -> ListenEndpoint {
        ListenEndpoint::new(self.listen_host.clone(), self.listen_port)
    }

    /// Longest request line a session accepts, in bytes.
    #[must_use]
    pub const fn max_line_bytes(&self) -> usize {
        self.max_line_bytes
    }

    /// Filter directive handed to the telemetry subscriber.
    #[must_use]
    pub fn log_filter(&self) -> &str {
        &self.log_filter
    }

    /// Output format handed to the telemetry subscriber.
    #[must_use]
    pub const fn log_format(&self) -> LogFormat {
        self.log_format
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            listen_host: default_listen_host(),
            listen_port: default_listen_port(),
            max_line_bytes: default_max_line_bytes(),
            log_filter: default_log_filter_string(),
            log_format: default_log_format(),
        }
    }
}

//! Job board server.
//!
//! `jobboardd` keeps an in-memory board of job postings and applications and
//! serves it over a line-oriented TCP protocol. Job seekers list postings and
//! apply; hiring managers post jobs and accept or reject applications. The
//! command codes, payload encoding and response framing live in
//! [`jobboard_protocol`]; configuration lives in [`jobboard_config`].
//!
//! Every accepted connection gets its own thread running a request loop over
//! the single shared [`store::JobBoardStore`]. The store serialises all access
//! behind one lock, so concurrent clients never observe a half-written entry
//! or collide on an identifier.
//!
//! Start-up is split into [`bootstrap_with`], which loads configuration,
//! installs telemetry and binds the socket, and [`Server::start`], which
//! spawns the accept loop. [`run_server`] ties both to process signals.

mod bootstrap;
pub mod dispatch;
mod health;
mod process;
pub mod store;
mod telemetry;
mod transport;

pub use bootstrap::{
    BootstrapError, ConfigLoader, RunningServer, Server, StaticConfigLoader, SystemConfigLoader,
    bootstrap_with,
};
pub use health::{HealthReporter, StructuredHealthReporter};
pub use process::{LaunchError, ShutdownError, ShutdownSignal, SystemShutdownSignal, run_server};
pub use telemetry::{TelemetryError, TelemetryHandle};
pub use transport::{ListenerError, ListenerHandle};

#[cfg(test)]
mod tests;

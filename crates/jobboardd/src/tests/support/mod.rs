//! Test harness utilities shared by the server suites.

mod client;
mod config_loader;
mod reporter;

pub use client::TestClient;
pub use config_loader::{FailingConfigLoader, ReservedPortLoader, TestConfigLoader};
pub use reporter::{HealthEvent, RecordingHealthReporter};

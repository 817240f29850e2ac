//! Supervises server start-up and shutdown.

use std::sync::Arc;

use tracing::info;

use crate::bootstrap::{ConfigLoader, SystemConfigLoader, bootstrap_with};
use crate::health::{HealthReporter, StructuredHealthReporter};

use super::PROCESS_TARGET;
use super::errors::LaunchError;
use super::shutdown::{ShutdownSignal, SystemShutdownSignal};

/// Runs the server using the production collaborators.
///
/// Blocks until SIGTERM, SIGINT, SIGQUIT or SIGHUP arrives, then stops
/// accepting and closes the listening socket.
pub fn run_server() -> Result<(), LaunchError> {
    run_server_with(
        &SystemConfigLoader,
        Arc::new(StructuredHealthReporter::new()),
        &SystemShutdownSignal,
    )
}

/// Runs the server with injected collaborators.
pub(crate) fn run_server_with(
    loader: &dyn ConfigLoader,
    reporter: Arc<dyn HealthReporter>,
    shutdown: &dyn ShutdownSignal,
) -> Result<(), LaunchError> {
    let server = bootstrap_with(loader, reporter)?;
    let running = server.start()?;
    info!(
        target: PROCESS_TARGET,
        addr = %running.local_addr(),
        "server running"
    );
    shutdown.wait()?;
    running.stop()?;
    info!(target: PROCESS_TARGET, "shutdown sequence completed");
    Ok(())
}

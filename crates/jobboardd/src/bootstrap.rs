//! Server bootstrap orchestration.

use std::net::SocketAddr;
use std::sync::Arc;

use ortho_config::OrthoError;
use thiserror::Error;

use jobboard_config::Config;

use crate::dispatch::{CommandProcessor, DispatchConnectionHandler};
use crate::health::HealthReporter;
use crate::store::JobBoardStore;
use crate::telemetry::{self, TelemetryError, TelemetryHandle};
use crate::transport::{ListenerError, ListenerHandle, SocketListener};

/// Trait abstracting configuration loading for testability.
pub trait ConfigLoader: Send + Sync {
    /// Loads the server configuration.
    fn load(&self) -> Result<Config, Arc<OrthoError>>;
}

/// Loader that reads defaults, the configuration file, the environment and
/// the command line.
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemConfigLoader;

impl ConfigLoader for SystemConfigLoader {
    fn load(&self) -> Result<Config, Arc<OrthoError>> {
        Config::load_from_process()
    }
}

/// Loader that always returns the same configuration.
#[derive(Debug, Clone)]
pub struct StaticConfigLoader {
    config: Config,
}

impl StaticConfigLoader {
    /// Wraps an already resolved configuration.
    #[must_use]
    pub fn new(config: Config) -> Self {
        Self { config }
    }
}

impl ConfigLoader for StaticConfigLoader {
    fn load(&self) -> Result<Config, Arc<OrthoError>> {
        Ok(self.config.clone())
    }
}

/// Errors surfaced during bootstrap.
#[derive(Debug, Error)]
pub enum BootstrapError {
    /// Configuration failed to load.
    #[error("failed to load configuration: {source}")]
    Configuration {
        /// Underlying loader error.
        #[source]
        source: Arc<OrthoError>,
    },
    /// Telemetry initialisation failed.
    #[error("failed to initialise telemetry: {source}")]
    Telemetry {
        /// Underlying telemetry error.
        #[source]
        source: TelemetryError,
    },
    /// The listening socket could not be bound.
    #[error("failed to bind listener: {source}")]
    Bind {
        /// Underlying listener error.
        #[source]
        source: ListenerError,
    },
}

/// Bound but not yet accepting server.
pub struct Server {
    config: Config,
    listener: SocketListener,
    processor: Arc<CommandProcessor>,
    telemetry: TelemetryHandle,
    reporter: Arc<dyn HealthReporter>,
}

impl Server {
    /// Accessor for the resolved configuration.
    #[must_use]
    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Address the listening socket is bound to.
    #[must_use]
    pub fn local_addr(&self) -> SocketAddr {
        self.listener.local_addr()
    }

    /// Store shared by every connection.
    #[must_use]
    pub fn store(&self) -> &JobBoardStore {
        self.processor.store()
    }

    /// Accessor for the telemetry handle, primarily useful for testing.
    #[must_use]
    pub fn telemetry(&self) -> TelemetryHandle {
        self.telemetry
    }

    /// Starts accepting connections on a background thread.
    ///
    /// # Errors
    ///
    /// Returns a [`ListenerError`] if the accept loop cannot be started.
    pub fn start(self) -> Result<RunningServer, ListenerError> {
        let local_addr = self.listener.local_addr();
        let handler = Arc::new(DispatchConnectionHandler::new(
            self.processor,
            self.config.max_line_bytes(),
        ));
        let handle = self.listener.start(handler)?;
        self.reporter.listener_started(local_addr);
        Ok(RunningServer {
            local_addr,
            handle,
            reporter: self.reporter,
        })
    }
}

/// Server whose accept loop is running.
pub struct RunningServer {
    local_addr: SocketAddr,
    handle: ListenerHandle,
    reporter: Arc<dyn HealthReporter>,
}

impl RunningServer {
    /// Address clients connect to.
    #[must_use]
    pub fn local_addr(&self) -> SocketAddr {
        self.local_addr
    }

    /// Stops accepting, closes the listening socket and waits for the
    /// accept loop to exit. Established sessions run until their clients
    /// disconnect.
    ///
    /// # Errors
    ///
    /// Returns [`ListenerError::ThreadPanic`] if the accept loop panicked.
    pub fn stop(self) -> Result<(), ListenerError> {
        self.reporter.shutdown_requested();
        self.handle.shutdown();
        self.handle.join()?;
        self.reporter.stopped();
        Ok(())
    }
}

/// Bootstraps the server using the supplied collaborators.
///
/// Loads configuration, installs telemetry and binds the listening socket.
/// The returned [`Server`] owns an empty store.
pub fn bootstrap_with(
    loader: &dyn ConfigLoader,
    reporter: Arc<dyn HealthReporter>,
) -> Result<Server, BootstrapError> {
    reporter.bootstrap_starting();

    let config = match loader.load() {
        Ok(config) => config,
        Err(source) => return Err(fail(&*reporter, BootstrapError::Configuration { source })),
    };

    let telemetry = match telemetry::initialise(&config) {
        Ok(handle) => handle,
        Err(source) => return Err(fail(&*reporter, BootstrapError::Telemetry { source })),
    };

    let listener = match SocketListener::bind(&config.listen_endpoint()) {
        Ok(listener) => listener,
        Err(source) => return Err(fail(&*reporter, BootstrapError::Bind { source })),
    };

    let processor = Arc::new(CommandProcessor::new(Arc::new(JobBoardStore::new())));
    reporter.bootstrap_succeeded(&config);

    Ok(Server {
        config,
        listener,
        processor,
        telemetry,
        reporter,
    })
}

fn fail(reporter: &dyn HealthReporter, error: BootstrapError) -> BootstrapError {
    reporter.bootstrap_failed(&error);
    error
}

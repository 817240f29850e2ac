//! Test configuration loaders for scenarios covering success and failure paths.

use std::ffi::OsString;
use std::net::TcpListener;
use std::sync::Arc;

use ortho_config::OrthoError;

use jobboard_config::Config;

use crate::bootstrap::ConfigLoader;

/// Loader binding the loopback interface on an ephemeral port.
#[derive(Debug, Default)]
pub struct TestConfigLoader;

impl TestConfigLoader {
    #[must_use]
    pub fn new() -> Self {
        Self
    }
}

impl ConfigLoader for TestConfigLoader {
    fn load(&self) -> Result<Config, Arc<OrthoError>> {
        Ok(Config {
            listen_host: String::from("127.0.0.1"),
            listen_port: 0,
            ..Config::default()
        })
    }
}

/// Loader that intentionally fails by passing invalid CLI arguments.
pub struct FailingConfigLoader;

impl ConfigLoader for FailingConfigLoader {
    fn load(&self) -> Result<Config, Arc<OrthoError>> {
        Config::load_from_args([
            OsString::from("jobboardd"),
            OsString::from("--listen-port"),
            OsString::from("not-a-port"),
        ])
    }
}

/// Loader pointing at a port that is already held by another socket.
pub struct ReservedPortLoader {
    reserved: TcpListener,
}

impl ReservedPortLoader {
    #[must_use]
    pub fn new() -> Self {
        let reserved = TcpListener::bind(("127.0.0.1", 0)).expect("reserve port");
        Self { reserved }
    }
}

impl ConfigLoader for ReservedPortLoader {
    fn load(&self) -> Result<Config, Arc<OrthoError>> {
        let port = self
            .reserved
            .local_addr()
            .expect("reserved address")
            .port();
        Ok(Config {
            listen_host: String::from("127.0.0.1"),
            listen_port: port,
            ..Config::default()
        })
    }
}

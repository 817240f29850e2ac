use std::fmt;
use std::io;
use std::net::{SocketAddr, ToSocketAddrs};

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// TCP endpoint the job board server accepts connections on.
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq, Eq)]
pub struct ListenEndpoint {
    /// Host name or interface address.
    pub host: String,
    /// TCP port; `0` requests an ephemeral port from the OS.
    pub port: u16,
}

impl ListenEndpoint {
    /// Builds a TCP endpoint.
    #[must_use]
    pub fn new(host: impl Into<String>, port: u16) -> Self {
        Self {
            host: host.into(),
            port,
        }
    }

    /// Resolves the endpoint to the first IPv4 or IPv6 socket address.
    ///
    /// # Errors
    ///
    /// Returns [`ResolveError::Lookup`] when name resolution fails and
    /// [`ResolveError::Empty`] when it yields no usable address.
    pub fn resolve(&self) -> Result<SocketAddr, ResolveError> {
        let mut addrs = (self.host.as_str(), self.port)
            .to_socket_addrs()
            .map_err(|source| ResolveError::Lookup {
                endpoint: self.to_string(),
                source,
            })?;
        addrs
            .find(|addr| matches!(addr, SocketAddr::V4(_) | SocketAddr::V6(_)))
            .ok_or_else(|| ResolveError::Empty {
                endpoint: self.to_string(),
            })
    }
}

impl fmt::Display for ListenEndpoint {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(formatter, "tcp://{}:{}", self.host, self.port)
    }
}

/// Errors raised while resolving a [`ListenEndpoint`].
#[derive(Debug, Error)]
pub enum ResolveError {
    /// Name resolution failed.
    #[error("failed to resolve {endpoint}: {source}")]
    Lookup {
        /// Endpoint being resolved.
        endpoint: String,
        /// Underlying resolver error.
        #[source]
        source: io::Error,
    },
    /// Resolution succeeded but produced no addresses.
    #[error("no addresses resolved for {endpoint}")]
    Empty {
        /// Endpoint being resolved.
        endpoint: String,
    },
}

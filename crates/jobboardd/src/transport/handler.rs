//! Connection handling abstractions for the listener.

use std::io::{self, Read, Write};
use std::net::TcpStream;

/// Accepted client connection.
#[derive(Debug)]
pub(crate) struct ConnectionStream {
    stream: TcpStream,
}

impl ConnectionStream {
    pub(crate) fn new(stream: TcpStream) -> Self {
        Self { stream }
    }

    /// Opens a second handle onto the same socket, typically for reading
    /// while the original is used for writing.
    pub(crate) fn try_clone(&self) -> io::Result<Self> {
        self.stream.try_clone().map(Self::new)
    }

    /// Peer address for diagnostics.
    pub(crate) fn peer_label(&self) -> String {
        self.stream
            .peer_addr()
            .map_or_else(|_| String::from("unknown"), |addr| addr.to_string())
    }
}

impl Read for ConnectionStream {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        self.stream.read(buf)
    }
}

impl Write for ConnectionStream {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.stream.write(buf)
    }

    fn flush(&mut self) -> io::Result<()> {
        self.stream.flush()
    }
}

/// Handles accepted socket connections.
pub(crate) trait ConnectionHandler: Send + Sync + 'static {
    /// Handles a single connection until the peer goes away. Implementations
    /// should avoid panicking.
    fn handle(&self, stream: ConnectionStream);
}

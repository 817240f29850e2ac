//! Connection handler that runs a command session per socket.

use std::io::{BufReader, BufWriter};
use std::sync::Arc;

use tracing::{debug, warn};

use crate::transport::{ConnectionHandler, ConnectionStream};

use super::DISPATCH_TARGET;
use super::processor::CommandProcessor;
use super::session::Session;

/// Connection handler that serves line-protocol sessions.
///
/// Every connection shares the same processor and therefore the same store.
/// Connections hold no other state in common.
#[derive(Debug, Clone)]
pub struct DispatchConnectionHandler {
    processor: Arc<CommandProcessor>,
    max_line_bytes: usize,
}

impl DispatchConnectionHandler {
    /// Creates a handler bound to the shared processor. Request lines longer
    /// than `max_line_bytes` are discarded and answered with an error.
    pub fn new(processor: Arc<CommandProcessor>, max_line_bytes: usize) -> Self {
        Self {
            processor,
            max_line_bytes,
        }
    }

    fn dispatch(&self, stream: ConnectionStream) {
        let peer = stream.peer_label();
        let reader = match stream.try_clone() {
            Ok(reader) => reader,
            Err(error) => {
                warn!(target: DISPATCH_TARGET, %peer, %error, "failed to split connection");
                return;
            }
        };

        let session = Session::new(
            BufReader::new(reader),
            BufWriter::new(stream),
            &self.processor,
            self.max_line_bytes,
        );
        match session.run() {
            Ok(frames) => {
                debug!(target: DISPATCH_TARGET, %peer, frames, "client disconnected");
            }
            Err(error) => {
                warn!(target: DISPATCH_TARGET, %peer, %error, "session terminated");
            }
        }
    }
}

impl ConnectionHandler for DispatchConnectionHandler {
    fn handle(&self, stream: ConnectionStream) {
        self.dispatch(stream);
    }
}

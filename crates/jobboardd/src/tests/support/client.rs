//! Blocking line-protocol client used to drive a running server.

use std::io::{BufReader, Write};
use std::net::{SocketAddr, TcpStream};
use std::time::Duration;

use jobboard_protocol::{read_response, write_request};

const READ_TIMEOUT: Duration = Duration::from_secs(5);

/// Client connection that speaks one request and one response at a time.
pub struct TestClient {
    reader: BufReader<TcpStream>,
    writer: TcpStream,
}

impl TestClient {
    pub fn connect(addr: SocketAddr) -> Self {
        let writer = TcpStream::connect(addr).expect("connect to server");
        writer
            .set_read_timeout(Some(READ_TIMEOUT))
            .expect("set read timeout");
        let reader = BufReader::new(writer.try_clone().expect("clone client stream"));
        Self { reader, writer }
    }

    /// Sends a command frame and returns the response body.
    pub fn request(&mut self, code: i32, payload: Option<&str>) -> String {
        write_request(&mut self.writer, code, payload).expect("write request");
        self.read_frame()
    }

    /// Sends an arbitrary line and returns the response body.
    pub fn send_line(&mut self, line: &str) -> String {
        writeln!(self.writer, "{line}").expect("write line");
        self.writer.flush().expect("flush line");
        self.read_frame()
    }

    fn read_frame(&mut self) -> String {
        read_response(&mut self.reader)
            .expect("read response")
            .expect("server closed connection before responding")
    }
}

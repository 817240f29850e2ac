//! Line framing for requests and responses.

use std::io::{self, BufRead, Write};

/// Line marking the end of one response frame.
pub const RESPONSE_SENTINEL: &str = "END_RESPONSE";

/// Writes a response body followed by the sentinel line, then flushes.
///
/// Each body line becomes its own wire line. An empty body is written as a
/// single empty line so every frame carries at least one body line.
///
/// # Errors
///
/// Returns [`io::ErrorKind::InvalidData`] without writing anything when a
/// body line equals [`RESPONSE_SENTINEL`], since the peer would end the frame
/// there. Otherwise returns any error raised by the underlying writer.
pub fn write_response<W: Write>(writer: &mut W, body: &str) -> io::Result<()> {
    if body
        .lines()
        .any(|line| line.trim_end_matches('\r') == RESPONSE_SENTINEL)
    {
        return Err(io::Error::new(
            io::ErrorKind::InvalidData,
            "response body contains the sentinel line",
        ));
    }
    let mut wrote_body = false;
    for line in body.lines() {
        writer.write_all(line.as_bytes())?;
        writer.write_all(b"\n")?;
        wrote_body = true;
    }
    if !wrote_body {
        writer.write_all(b"\n")?;
    }
    writer.write_all(RESPONSE_SENTINEL.as_bytes())?;
    writer.write_all(b"\n")?;
    writer.flush()
}

/// Reads one response frame and returns its body without the sentinel.
///
/// Returns `Ok(None)` when the stream ends before any line of a new frame.
///
/// # Errors
///
/// Returns [`io::ErrorKind::UnexpectedEof`] when the stream ends inside a
/// frame, or any error raised by the underlying reader.
pub fn read_response<R: BufRead>(reader: &mut R) -> io::Result<Option<String>> {
    let mut lines: Vec<String> = Vec::new();
    let mut line = String::new();
    loop {
        line.clear();
        if reader.read_line(&mut line)? == 0 {
            if lines.is_empty() {
                return Ok(None);
            }
            return Err(io::Error::new(
                io::ErrorKind::UnexpectedEof,
                "response ended before the sentinel line",
            ));
        }
        let content = line.trim_end_matches(['\n', '\r']);
        if content == RESPONSE_SENTINEL {
            return Ok(Some(lines.join("\n")));
        }
        lines.push(content.to_owned());
    }
}

/// Writes a command line and, when present, its payload line, then flushes.
///
/// # Errors
///
/// Returns any error raised by the underlying writer.
pub fn write_request<W: Write>(writer: &mut W, code: i32, payload: Option<&str>) -> io::Result<()> {
    writeln!(writer, "{code}")?;
    if let Some(line) = payload {
        writer.write_all(line.as_bytes())?;
        writer.write_all(b"\n")?;
    }
    writer.flush()
}

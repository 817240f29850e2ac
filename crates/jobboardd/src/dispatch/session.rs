//! Per-connection request loop.
//!
//! A session alternates between awaiting a command line and, for payload
//! commands, awaiting the data line. Every request is answered with exactly
//! one response frame. Malformed input is answered in place and the loop
//! continues; end of stream ends the session quietly.

use std::io::{self, BufRead, Write};

use tracing::debug;

use jobboard_protocol::write_response;

use super::DISPATCH_TARGET;
use super::errors::DispatchError;
use super::processor::CommandProcessor;

/// Reads bounded, newline-terminated UTF-8 lines.
pub(crate) struct LineReader<R> {
    inner: R,
    max_bytes: usize,
}

impl<R: BufRead> LineReader<R> {
    pub(crate) fn new(inner: R, max_bytes: usize) -> Self {
        Self { inner, max_bytes }
    }

    /// Reads the next line without its terminator.
    ///
    /// Returns `Ok(None)` at end of stream. A final line without a newline is
    /// still returned. A line that is not valid UTF-8, or longer than the
    /// limit, is consumed in full before the error is reported, so the caller
    /// may keep reading.
    pub(crate) fn read_line(&mut self) -> Result<Option<String>, DispatchError> {
        let mut buffer = Vec::new();
        let mut size = 0_usize;
        loop {
            let available = match self.inner.fill_buf() {
                Ok(bytes) => bytes,
                Err(error) if error.kind() == io::ErrorKind::Interrupted => continue,
                Err(error) => return Err(error.into()),
            };

            if available.is_empty() {
                if size == 0 {
                    return Ok(None);
                }
                break;
            }

            let newline = available.iter().position(|byte| *byte == b'\n');
            let content = newline.unwrap_or(available.len());
            size = size.saturating_add(content);
            if size <= self.max_bytes {
                buffer.extend_from_slice(&available[..content]);
            } else {
                buffer.clear();
            }
            let consumed = newline.map_or(content, |pos| pos + 1);
            self.inner.consume(consumed);

            if newline.is_some() {
                break;
            }
        }

        if size > self.max_bytes {
            return Err(DispatchError::request_too_large(size, self.max_bytes));
        }
        if buffer.last() == Some(&b'\r') {
            buffer.pop();
        }
        String::from_utf8(buffer)
            .map(Some)
            .map_err(|_| DispatchError::InvalidEncoding)
    }
}

/// Parses a command line as a decimal command code.
pub(crate) fn parse_command(line: &str) -> Result<i32, DispatchError> {
    line.trim()
        .parse()
        .map_err(|_| DispatchError::malformed_command(line))
}

/// Drives one client connection until end of stream or a fatal fault.
pub(crate) struct Session<'a, R, W> {
    reader: LineReader<R>,
    writer: W,
    processor: &'a CommandProcessor,
}

impl<'a, R: BufRead, W: Write> Session<'a, R, W> {
    pub(crate) fn new(
        reader: R,
        writer: W,
        processor: &'a CommandProcessor,
        max_line_bytes: usize,
    ) -> Self {
        Self {
            reader: LineReader::new(reader, max_line_bytes),
            writer,
            processor,
        }
    }

    /// Serves requests until the peer closes the stream.
    ///
    /// Returns the number of frames written. Only transport faults end the
    /// session with an error.
    pub(crate) fn run(mut self) -> Result<usize, DispatchError> {
        let mut frames = 0;
        loop {
            let body = match self.next_response() {
                Ok(Some(body)) => body,
                Ok(None) => return Ok(frames),
                Err(error) if error.is_recoverable() => {
                    debug!(target: DISPATCH_TARGET, %error, "rejected request");
                    error.response_text()
                }
                Err(error) => return Err(error),
            };
            write_response(&mut self.writer, &body)?;
            frames += 1;
        }
    }

    fn next_response(&mut self) -> Result<Option<String>, DispatchError> {
        let Some(line) = self.reader.read_line()? else {
            return Ok(None);
        };
        let code = parse_command(&line)?;

        if !self.processor.requires_payload(code) {
            return Ok(Some(self.processor.process_command(code)));
        }

        match self.reader.read_line()? {
            Some(data) => Ok(Some(self.processor.process_command_with_data(code, &data))),
            None => Err(DispatchError::missing_payload(code)),
        }
    }
}

#[cfg(test)]
mod tests {
    use std::io::{BufReader, Cursor};
    use std::sync::Arc;

    use rstest::{fixture, rstest};

    use jobboard_protocol::read_response;

    use crate::store::JobBoardStore;

    use super::*;

    #[fixture]
    fn processor() -> CommandProcessor {
        CommandProcessor::new(Arc::new(JobBoardStore::new()))
    }

    const TEST_LINE_LIMIT: usize = 64;

    fn run_session(processor: &CommandProcessor, input: &[u8]) -> (Vec<String>, Result<usize, DispatchError>) {
        let mut output = Vec::new();
        let result = Session::new(Cursor::new(input), &mut output, processor, TEST_LINE_LIMIT).run();
        let mut reader = Cursor::new(output);
        let mut frames = Vec::new();
        while let Some(frame) = read_response(&mut reader).expect("well-formed frames") {
            frames.push(frame);
        }
        (frames, result)
    }

    #[rstest]
    fn malformed_command_keeps_session_open(processor: CommandProcessor) {
        let (frames, result) = run_session(&processor, b"abc\n100\n");
        assert_eq!(frames, vec![
            String::from("Error: invalid command 'abc'"),
            String::from("No job postings available"),
        ]);
        assert_eq!(result.expect("clean close"), 2);
    }

    #[rstest]
    fn payload_line_follows_payload_commands(processor: CommandProcessor) {
        let (frames, _) = run_session(
            &processor,
            b"200\nEngineer|Acme|Remote|Build|Go,SQL|100k-120k\n100\n",
        );
        assert_eq!(frames[0], "Job posted successfully with ID: JOB1");
        assert!(frames[1].starts_with("Available Jobs:\nID: JOB1\nTitle: Engineer"));
    }

    #[rstest]
    fn missing_payload_at_end_of_stream(processor: CommandProcessor) {
        let (frames, result) = run_session(&processor, b"200\n");
        assert_eq!(frames, vec![String::from("Error: missing data for command 200")]);
        assert_eq!(result.expect("clean close"), 1);
    }

    #[rstest]
    fn crlf_terminators_are_accepted(processor: CommandProcessor) {
        let (frames, _) = run_session(&processor, b"201\r\n");
        assert_eq!(frames, vec![String::from("No applications available")]);
    }

    #[rstest]
    fn unterminated_final_line_is_served(processor: CommandProcessor) {
        let (frames, _) = run_session(&processor, b"1");
        assert_eq!(frames.len(), 1);
        assert!(frames[0].starts_with("Please select a role"));
    }

    #[rstest]
    fn invalid_utf8_is_reported_and_skipped(processor: CommandProcessor) {
        let (frames, result) = run_session(&processor, b"\xff\xfe\n100\n");
        assert_eq!(frames, vec![
            String::from("Error: request line is not valid UTF-8"),
            String::from("No job postings available"),
        ]);
        assert!(result.is_ok());
    }

    #[rstest]
    fn oversized_line_is_drained_and_session_continues(processor: CommandProcessor) {
        let mut input = vec![b'7'; TEST_LINE_LIMIT * 4 + 1];
        input.extend_from_slice(b"\n100\n");
        let (frames, result) = run_session(&processor, &input);
        assert_eq!(frames.len(), 2);
        assert!(frames[0].starts_with("Error: request too large"));
        assert_eq!(frames[1], "No job postings available");
        assert_eq!(result.expect("clean close"), 2);
    }

    #[rstest]
    fn oversized_payload_line_is_answered_once(processor: CommandProcessor) {
        let mut input = b"200\n".to_vec();
        input.extend(vec![b'x'; TEST_LINE_LIMIT + 1]);
        input.extend_from_slice(b"\n100\n");
        let (frames, _) = run_session(&processor, &input);
        assert_eq!(frames.len(), 2);
        assert!(frames[0].starts_with("Error: request too large"));
        assert_eq!(frames[1], "No job postings available");
    }

    #[rstest]
    fn line_breaks_in_postings_keep_frames_aligned(processor: CommandProcessor) {
        let (frames, result) = run_session(
            &processor,
            b"200\nEng|Acme|Remote|line\\nEND_RESPONSE\\nevil|Go|1k\n100\n201\n",
        );
        assert_eq!(frames.len(), 3);
        assert!(frames[0].starts_with("Error: Invalid job data format"));
        assert_eq!(frames[1], "No job postings available");
        assert_eq!(frames[2], "No applications available");
        assert_eq!(result.expect("clean close"), 3);
    }

    #[rstest]
    fn empty_stream_writes_nothing(processor: CommandProcessor) {
        let (frames, result) = run_session(&processor, b"");
        assert!(frames.is_empty());
        assert_eq!(result.expect("clean close"), 0);
    }

    #[rstest]
    #[case::plain("100", Some(100))]
    #[case::padded("  202 ", Some(202))]
    #[case::negative("-1", Some(-1))]
    #[case::word("abc", None)]
    #[case::empty("", None)]
    #[case::decimal("1.5", None)]
    fn parses_command_codes(#[case] line: &str, #[case] expected: Option<i32>) {
        assert_eq!(parse_command(line).ok(), expected);
    }

    #[test]
    fn line_reader_handles_small_buffers() {
        let input: &[u8] = b"first line\nsecond\n";
        let mut reader = LineReader::new(BufReader::with_capacity(3, input), 16);
        assert_eq!(reader.read_line().expect("read").as_deref(), Some("first line"));
        assert_eq!(reader.read_line().expect("read").as_deref(), Some("second"));
        assert_eq!(reader.read_line().expect("read"), None);
    }

    #[test]
    fn line_reader_reports_full_size_of_drained_line() {
        let input: &[u8] = b"0123456789abcdef!\nnext\n";
        let mut reader = LineReader::new(BufReader::with_capacity(4, input), 16);
        let error = reader.read_line().expect_err("line over the limit");
        assert!(matches!(
            error,
            DispatchError::RequestTooLarge { size: 17, max_size: 16 }
        ));
        assert_eq!(reader.read_line().expect("read").as_deref(), Some("next"));
    }

    #[test]
    fn unterminated_oversized_line_is_still_reported() {
        let input: &[u8] = b"0123456789abcdef!";
        let mut reader = LineReader::new(BufReader::with_capacity(4, input), 16);
        assert!(matches!(
            reader.read_line(),
            Err(DispatchError::RequestTooLarge { size: 17, .. })
        ));
        assert_eq!(reader.read_line().expect("read"), None);
    }
}

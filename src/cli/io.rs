//! Line-oriented JSON I/O
//!
//! - Input: one JSON request object per line
//! - Output: one response envelope per line
//! - UTF-8 only; a line that is not UTF-8 is rejected on its own and
//!   does not end the stream

use std::io::{BufRead, Write};

use super::errors::{CliError, CliResult};
use crate::contract::{ContractError, Response};

/// Text of one request line, or why it could not be read as text
pub type RequestLine = Result<String, ContractError>;

/// Write one response envelope followed by a newline
pub fn write_response<W: Write>(writer: &mut W, response: &Response) -> CliResult<()> {
    writeln!(writer, "{}", response.to_json())?;
    writer.flush()?;
    Ok(())
}

/// Non-blank request lines from `reader`.
///
/// The outer `Err` is a stream failure and ends iteration; the inner one
/// only rejects that line.
pub fn request_lines<R: BufRead>(reader: R) -> RequestLines<R> {
    RequestLines {
        reader,
        buf: Vec::new(),
    }
}

/// Iterator returned by [`request_lines`]
#[derive(Debug)]
pub struct RequestLines<R> {
    reader: R,
    buf: Vec<u8>,
}

impl<R: BufRead> Iterator for RequestLines<R> {
    type Item = CliResult<RequestLine>;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            self.buf.clear();
            match self.reader.read_until(b'\n', &mut self.buf) {
                Ok(0) => return None,
                Ok(_) => {}
                Err(e) => return Some(Err(CliError::from(e))),
            }

            if self.buf.ends_with(b"\n") {
                self.buf.pop();
                if self.buf.ends_with(b"\r") {
                    self.buf.pop();
                }
            }
            if self.buf.iter().all(u8::is_ascii_whitespace) {
                continue;
            }

            let line = String::from_utf8(self.buf.clone()).map_err(|e| {
                ContractError::decode(format!("request line is not valid UTF-8: {}", e.utf8_error()))
            });
            return Some(Ok(line));
        }
    }
}

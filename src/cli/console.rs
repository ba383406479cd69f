//! Line-oriented console
//!
//! Wraps an input/output pair so the session can be driven by a terminal or,
//! in tests, by an in-memory script.

use std::fmt::Display;
use std::io::{self, BufRead, Write};

/// Prompt/response console over any `BufRead` + `Write`
#[derive(Debug)]
pub struct Console<R, W> {
    input: R,
    output: W,
}

impl<R: BufRead, W: Write> Console<R, W> {
    pub fn new(input: R, output: W) -> Self {
        Console { input, output }
    }

    /// Print one line
    pub fn say(&mut self, message: impl Display) -> io::Result<()> {
        writeln!(self.output, "{}", message)
    }

    /// Print `message` without a newline and read one trimmed line
    ///
    /// Returns `Ok(None)` once the input is exhausted. Bytes that are not
    /// valid UTF-8 are replaced with U+FFFD, so such a line reaches the
    /// caller as ordinary (and usually rejected) input.
    pub fn prompt(&mut self, message: &str) -> io::Result<Option<String>> {
        write!(self.output, "{}", message)?;
        self.output.flush()?;

        let mut line = Vec::new();
        if self.input.read_until(b'\n', &mut line)? == 0 {
            return Ok(None);
        }
        Ok(Some(String::from_utf8_lossy(&line).trim().to_string()))
    }

    /// Give back the output sink
    pub fn into_output(self) -> W {
        self.output
    }
}

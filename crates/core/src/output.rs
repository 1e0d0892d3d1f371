//! Destinations for the chosen command.

use std::io::{self, Stdout, Write};

use crate::error::{Error, Result};

/// Receives the text the session settles on.
pub trait OutputSink {
    /// Emits one command.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Output`] if the text cannot be delivered.
    fn emit(&mut self, text: &str) -> Result<()>;

    /// Emits the command used when nothing was chosen.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Output`] if the text cannot be delivered.
    fn emit_fallback(&mut self, text: &str) -> Result<()> {
        self.emit(text)
    }
}

/// Writes each emitted command on its own line.
pub struct WriteSink<W: Write> {
    writer: W,
}

impl<W: Write> WriteSink<W> {
    pub fn new(writer: W) -> Self {
        Self { writer }
    }

    pub fn into_inner(self) -> W {
        self.writer
    }
}

impl WriteSink<Stdout> {
    #[must_use]
    pub fn stdout() -> Self {
        Self::new(io::stdout())
    }
}

impl<W: Write> OutputSink for WriteSink<W> {
    fn emit(&mut self, text: &str) -> Result<()> {
        writeln!(self.writer, "{text}")
            .and_then(|()| self.writer.flush())
            .map_err(|e| Error::Output(e.to_string()))
    }
}

/// Collects emitted commands in memory.
impl OutputSink for Vec<String> {
    fn emit(&mut self, text: &str) -> Result<()> {
        self.push(text.to_string());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_write_sink_writes_lines() {
        let mut sink = WriteSink::new(Vec::new());
        sink.emit("ls -la").unwrap();
        sink.emit("pwd").unwrap();

        assert_eq!(String::from_utf8(sink.into_inner()).unwrap(), "ls -la\npwd\n");
    }

    #[test]
    fn test_vec_sink_collects() {
        let mut sink: Vec<String> = Vec::new();
        sink.emit("echo hi").unwrap();
        assert_eq!(sink, vec!["echo hi"]);
    }
}

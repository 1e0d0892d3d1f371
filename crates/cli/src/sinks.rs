//! Output sinks: print the command, or copy it to the clipboard.

use std::io::{self, Stdout, Write};

use arboard::Clipboard;
use log::debug;
use treecuts_core::error::{Error, Result};
use treecuts_core::output::{OutputSink, WriteSink};

/// Printed instead of the command when it went to the clipboard, so a shell
/// wrapper evaluating the output does nothing harmful.
pub const COPIED_NOTICE: &str = "echo ** command copied to clipboard **";

/// Copies each emitted command to the clipboard and prints
/// [`COPIED_NOTICE`] to `notice`.
///
/// The clipboard is opened on first use.
pub struct ClipboardSink<W: Write> {
    clipboard: Option<Clipboard>,
    notice: WriteSink<W>,
}

impl ClipboardSink<Stdout> {
    #[must_use]
    pub fn stdout() -> Self {
        Self::new(io::stdout())
    }
}

impl<W: Write> ClipboardSink<W> {
    pub fn new(notice: W) -> Self {
        Self {
            clipboard: None,
            notice: WriteSink::new(notice),
        }
    }

    fn ensure(&mut self) -> Result<&mut Clipboard> {
        if self.clipboard.is_none() {
            self.clipboard = Some(Clipboard::new().map_err(|e| Error::Output(e.to_string()))?);
        }

        self.clipboard
            .as_mut()
            .ok_or_else(|| Error::Output("clipboard unavailable".to_string()))
    }
}

impl<W: Write> OutputSink for ClipboardSink<W> {
    fn emit(&mut self, text: &str) -> Result<()> {
        self.ensure()?
            .set_text(text.to_string())
            .map_err(|e| Error::Output(e.to_string()))?;
        debug!("Copied `{text}` to the clipboard");

        self.notice.emit(COPIED_NOTICE)
    }

    /// The fallback is printed, leaving the clipboard alone.
    fn emit_fallback(&mut self, text: &str) -> Result<()> {
        self.notice.emit(text)
    }
}

/// The sink chosen on the command line.
#[must_use]
pub fn sink_for(copy: bool) -> Box<dyn OutputSink> {
    if copy {
        Box::new(ClipboardSink::stdout())
    } else {
        Box::new(WriteSink::stdout())
    }
}

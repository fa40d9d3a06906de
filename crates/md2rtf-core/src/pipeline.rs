//! Read, convert, write.
//!
//! The pipeline either completes or stops at the first failing step. A failed read leaves the
//! clipboard untouched; after a failed write its contents depend on the platform clipboard.

use std::io::{self, Write};

use md2rtf_clipboard::{ClipboardBackend, ClipboardError};
use thiserror::Error;
use tracing::{debug, info};

use crate::{
    config::RtfConfig,
    document::{convert, Conversion},
};

#[derive(Debug, Error)]
pub enum PipelineError {
    #[error("failed to read Markdown from the clipboard")]
    Read(#[source] ClipboardError),
    #[error("failed to write RTF to the clipboard")]
    Write(#[source] ClipboardError),
}

/// Where the Markdown comes from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Input {
    Clipboard,
    /// Text already read by the caller, e.g. from a file or stdin.
    Text(String),
}

/// Where the RTF goes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Output {
    Clipboard,
    /// Only return the conversion; the caller decides what to do with it.
    Return,
}

pub struct Pipeline<'a> {
    config: &'a RtfConfig,
    echo: Box<dyn Write + 'a>,
}

impl<'a> Pipeline<'a> {
    pub fn new(config: &'a RtfConfig) -> Self {
        Self {
            config,
            echo: Box::new(io::stdout()),
        }
    }

    /// Redirects the debug echo of input and output, which goes to stdout by default.
    #[must_use]
    pub fn with_echo(mut self, echo: impl Write + 'a) -> Self {
        self.echo = Box::new(echo);
        self
    }

    pub fn run(
        &mut self,
        clipboard: &mut dyn ClipboardBackend,
        input: Input,
        output: Output,
    ) -> Result<Conversion, PipelineError> {
        let markdown = match input {
            Input::Clipboard => clipboard.read_text().map_err(PipelineError::Read)?,
            Input::Text(text) => text,
        };
        debug!(target: "md2rtf_core", bytes = markdown.len(), "markdown input loaded");
        self.echo_debug("Original Clipboard Content", &markdown);

        let conversion = convert(&markdown, self.config);
        self.echo_debug("Transformed Content", &conversion.rtf);

        if output == Output::Clipboard {
            clipboard
                .write_text(&conversion.rtf)
                .map_err(PipelineError::Write)?;
            info!(
                target: "md2rtf_core",
                paragraphs = conversion.stats.paragraphs,
                bytes = conversion.rtf.len(),
                "rtf written to clipboard"
            );
        }

        Ok(conversion)
    }

    fn echo_debug(&mut self, label: &str, text: &str) {
        if !self.config.debug {
            return;
        }
        if let Err(error) = writeln!(self.echo, "{label}:\n{text}") {
            debug!(target: "md2rtf_core", error = %error, label, "debug echo failed");
        }
    }
}

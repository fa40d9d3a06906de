//! Clipboard boundary for the converter.
//!
//! The converter treats the clipboard as an opaque text store: one read before the
//! transform, one write after it. [`SystemClipboard`] talks to the desktop clipboard
//! through `arboard`; [`MemoryClipboard`] keeps the contents in process and is used by
//! tests and dry runs.

mod memory;
mod system;

pub use memory::MemoryClipboard;
pub use system::SystemClipboard;

use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ClipboardError {
    #[error("clipboard unavailable: {0}")]
    Unavailable(String),
    #[error("clipboard holds no text")]
    Empty,
    #[error("failed to read clipboard: {0}")]
    Read(String),
    #[error("failed to write clipboard: {0}")]
    Write(String),
}

/// A text clipboard that can be read once and written once per conversion.
pub trait ClipboardBackend {
    /// Returns the current clipboard contents as text.
    fn read_text(&mut self) -> Result<String, ClipboardError>;

    /// Replaces the clipboard contents with `text`.
    fn write_text(&mut self, text: &str) -> Result<(), ClipboardError>;

    /// Keeps the last written text available after this process exits.
    ///
    /// Backends whose contents outlive the writer need nothing here. X11 and Wayland serve the
    /// selection from the owning process, so the system clipboard blocks until another client
    /// takes ownership.
    fn persist(&mut self) -> Result<(), ClipboardError> {
        Ok(())
    }
}

impl<T: ClipboardBackend + ?Sized> ClipboardBackend for &mut T {
    fn read_text(&mut self) -> Result<String, ClipboardError> {
        (**self).read_text()
    }

    fn write_text(&mut self, text: &str) -> Result<(), ClipboardError> {
        (**self).write_text(text)
    }

    fn persist(&mut self) -> Result<(), ClipboardError> {
        (**self).persist()
    }
}

impl<T: ClipboardBackend + ?Sized> ClipboardBackend for Box<T> {
    fn read_text(&mut self) -> Result<String, ClipboardError> {
        (**self).read_text()
    }

    fn write_text(&mut self, text: &str) -> Result<(), ClipboardError> {
        (**self).write_text(text)
    }

    fn persist(&mut self) -> Result<(), ClipboardError> {
        (**self).persist()
    }
}

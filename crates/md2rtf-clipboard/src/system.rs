use std::fmt;

use arboard::Clipboard;
use tracing::debug;

use crate::{ClipboardBackend, ClipboardError};

/// The desktop clipboard.
///
/// On Linux the written contents are served by this process. [`ClipboardBackend::persist`]
/// hands them over: it blocks until a clipboard manager or another application takes
/// ownership of the selection.
pub struct SystemClipboard {
    inner: Clipboard,
    last_written: Option<String>,
}

impl fmt::Debug for SystemClipboard {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SystemClipboard").finish_non_exhaustive()
    }
}

impl SystemClipboard {
    pub fn open() -> Result<Self, ClipboardError> {
        let inner = Clipboard::new().map_err(|error| ClipboardError::Unavailable(error.to_string()))?;
        debug!(target: "md2rtf_clipboard", "system clipboard opened");
        Ok(Self {
            inner,
            last_written: None,
        })
    }

    #[cfg(target_os = "linux")]
    fn hand_off(&mut self, text: String) -> Result<(), ClipboardError> {
        use arboard::SetExtLinux;

        debug!(target: "md2rtf_clipboard", "waiting for another client to own the clipboard");
        self.inner
            .set()
            .wait()
            .text(text)
            .map_err(|error| ClipboardError::Write(error.to_string()))?;
        debug!(target: "md2rtf_clipboard", "clipboard ownership handed off");
        Ok(())
    }

    #[cfg(not(target_os = "linux"))]
    fn hand_off(&mut self, _text: String) -> Result<(), ClipboardError> {
        Ok(())
    }
}

impl ClipboardBackend for SystemClipboard {
    fn read_text(&mut self) -> Result<String, ClipboardError> {
        match self.inner.get_text() {
            Ok(text) => {
                debug!(target: "md2rtf_clipboard", bytes = text.len(), "read clipboard text");
                Ok(text)
            }
            Err(arboard::Error::ContentNotAvailable) => Err(ClipboardError::Empty),
            Err(error) => Err(ClipboardError::Read(error.to_string())),
        }
    }

    fn write_text(&mut self, text: &str) -> Result<(), ClipboardError> {
        self.inner
            .set_text(text)
            .map_err(|error| ClipboardError::Write(error.to_string()))?;
        self.last_written = Some(text.to_string());
        debug!(target: "md2rtf_clipboard", bytes = text.len(), "wrote clipboard text");
        Ok(())
    }

    fn persist(&mut self) -> Result<(), ClipboardError> {
        match self.last_written.take() {
            Some(text) => self.hand_off(text),
            None => Ok(()),
        }
    }
}

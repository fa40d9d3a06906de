use crate::{ClipboardBackend, ClipboardError};

/// Clipboard kept in process memory.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MemoryClipboard {
    contents: Option<String>,
    writes: usize,
    persists: usize,
    fail_writes: bool,
}

impl MemoryClipboard {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_text(text: impl Into<String>) -> Self {
        Self {
            contents: Some(text.into()),
            ..Self::default()
        }
    }

    /// Makes every subsequent write fail, leaving the contents untouched.
    #[must_use]
    pub fn failing_writes(mut self) -> Self {
        self.fail_writes = true;
        self
    }

    pub fn contents(&self) -> Option<&str> {
        self.contents.as_deref()
    }

    pub fn write_count(&self) -> usize {
        self.writes
    }

    pub fn persist_count(&self) -> usize {
        self.persists
    }
}

impl ClipboardBackend for MemoryClipboard {
    fn read_text(&mut self) -> Result<String, ClipboardError> {
        self.contents.clone().ok_or(ClipboardError::Empty)
    }

    fn write_text(&mut self, text: &str) -> Result<(), ClipboardError> {
        if self.fail_writes {
            return Err(ClipboardError::Write("writes disabled".to_string()));
        }
        self.contents = Some(text.to_string());
        self.writes += 1;
        Ok(())
    }

    fn persist(&mut self) -> Result<(), ClipboardError> {
        self.persists += 1;
        Ok(())
    }
}

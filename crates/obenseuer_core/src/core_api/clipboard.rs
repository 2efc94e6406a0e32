//! Copy-to-clipboard capability. Front-ends supply the platform clipboard and
//! a manual fallback; the core only decides what happens when both fail.

use tracing::{debug, warn};

use super::error::{CoreError, CoreErrorCode};

pub trait Clipboard {
    /// Returns `false` when the text could not be copied.
    fn copy_text(&mut self, text: &str) -> bool;
}

/// Keeps every copied string in memory. Can be switched off to act like an
/// unavailable clipboard.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecordingClipboard {
    available: bool,
    copied: Vec<String>,
}

impl RecordingClipboard {
    pub fn new() -> Self {
        Self {
            available: true,
            copied: Vec::new(),
        }
    }

    pub fn unavailable() -> Self {
        Self {
            available: false,
            copied: Vec::new(),
        }
    }

    pub fn copied(&self) -> &[String] {
        &self.copied
    }

    pub fn last(&self) -> Option<&str> {
        self.copied.last().map(String::as_str)
    }
}

impl Default for RecordingClipboard {
    fn default() -> Self {
        Self::new()
    }
}

impl Clipboard for RecordingClipboard {
    fn copy_text(&mut self, text: &str) -> bool {
        if !self.available {
            return false;
        }
        self.copied.push(text.to_string());
        true
    }
}

pub fn copy_with_fallback<P, F>(primary: &mut P, fallback: &mut F, text: &str) -> Result<(), CoreError>
where
    P: Clipboard + ?Sized,
    F: Clipboard + ?Sized,
{
    if primary.copy_text(text) {
        debug!(text, "copied to clipboard");
        return Ok(());
    }
    warn!("clipboard unavailable; trying fallback copy");
    if fallback.copy_text(text) {
        return Ok(());
    }
    Err(CoreError::new(
        CoreErrorCode::ClipboardWrite,
        format!("unable to copy '{text}'; select and copy the text manually"),
    ))
}

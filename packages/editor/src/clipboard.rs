//! # Clipboard
//!
//! Export writes its report through a [`Clipboard`]. Hosts supply the real
//! backends (browser clipboard API, system clipboard commands); a
//! [`FallbackClipboard`] chains a preferred backend with a legacy one.

use crate::errors::ClipboardError;
use std::cell::RefCell;
use std::rc::Rc;
use tracing::{debug, warn};

/// Destination for exported page copy
pub trait Clipboard {
    /// Short backend name for logs and error messages
    fn name(&self) -> &str;

    /// Replace the clipboard contents with `text`
    fn write_text(&mut self, text: &str) -> Result<(), ClipboardError>;
}

/// Tries `primary`, then `fallback` if the primary is unavailable or rejects
pub struct FallbackClipboard {
    primary: Box<dyn Clipboard>,
    fallback: Box<dyn Clipboard>,
}

impl FallbackClipboard {
    pub fn new(primary: Box<dyn Clipboard>, fallback: Box<dyn Clipboard>) -> Self {
        Self { primary, fallback }
    }
}

impl Clipboard for FallbackClipboard {
    fn name(&self) -> &str {
        self.primary.name()
    }

    fn write_text(&mut self, text: &str) -> Result<(), ClipboardError> {
        let primary_error = match self.primary.write_text(text) {
            Ok(()) => return Ok(()),
            Err(e) => e,
        };

        warn!(
            backend = %self.primary.name(),
            fallback = %self.fallback.name(),
            error = %primary_error,
            "Clipboard write failed, trying fallback"
        );

        self.fallback.write_text(text).map_err(|fallback_error| ClipboardError::AllFailed {
            primary: Box::new(primary_error),
            fallback: Box::new(fallback_error),
        })
    }
}

/// In-process clipboard. Clones share the same contents.
#[derive(Debug, Clone)]
pub struct MemoryClipboard {
    contents: Rc<RefCell<Option<String>>>,
    available: bool,
}

impl MemoryClipboard {
    pub fn new() -> Self {
        Self {
            contents: Rc::new(RefCell::new(None)),
            available: true,
        }
    }

    /// A clipboard whose writes always fail with `Unavailable`
    pub fn unavailable() -> Self {
        Self {
            available: false,
            ..Self::new()
        }
    }

    /// Last text written, if any
    pub fn contents(&self) -> Option<String> {
        self.contents.borrow().clone()
    }
}

impl Default for MemoryClipboard {
    fn default() -> Self {
        Self::new()
    }
}

impl Clipboard for MemoryClipboard {
    fn name(&self) -> &str {
        "memory"
    }

    fn write_text(&mut self, text: &str) -> Result<(), ClipboardError> {
        if !self.available {
            return Err(ClipboardError::Unavailable(self.name().to_string()));
        }

        debug!(bytes = text.len(), "Writing to memory clipboard");
        *self.contents.borrow_mut() = Some(text.to_string());
        Ok(())
    }
}

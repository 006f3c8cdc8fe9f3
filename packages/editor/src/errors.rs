//! Error types for the editor

use crate::key::{ContentKey, MountId};
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum EditorError {
    #[error("Content key already mounted: {0}")]
    DuplicateKey(ContentKey),

    #[error("Unknown mount: {0}")]
    UnknownMount(MountId),
}

#[derive(Error, Debug, Clone, PartialEq)]
pub enum ClipboardError {
    #[error("{0} clipboard is unavailable")]
    Unavailable(String),

    #[error("{backend} clipboard rejected the write: {reason}")]
    Rejected { backend: String, reason: String },

    #[error("primary copy failed ({primary}); fallback copy failed ({fallback})")]
    AllFailed {
        primary: Box<ClipboardError>,
        fallback: Box<ClipboardError>,
    },
}

#[derive(Error, Debug, Clone, PartialEq)]
pub enum ExportError {
    #[error("Clipboard error: {0}")]
    Clipboard(#[from] ClipboardError),
}

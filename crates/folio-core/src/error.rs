//! Error types for document mutation and external payloads.

use crate::elements::ElementId;
use thiserror::Error;

/// Errors surfaced by the document store and the transfer boundaries.
#[derive(Debug, Error)]
pub enum DocumentError {
    /// An element with this id already exists somewhere in the document.
    #[error("element {0} already exists in the document")]
    InvalidElement(ElementId),

    /// Documents always keep at least one page.
    #[error("cannot delete the last remaining page")]
    CannotDeleteLastPage,

    /// Page index outside `0..pages.len()`.
    #[error("page index {0} is out of range")]
    PageOutOfRange(usize),

    /// Malformed or unknown drop payload from a drag source.
    #[error("invalid drop payload: {0}")]
    InvalidDropPayload(String),

    /// Upload with a MIME type that is not an image.
    #[error("unsupported file type: {0}")]
    UnsupportedFileType(String),

    /// Document JSON could not be read or written.
    #[error("serialization failed: {0}")]
    Serialization(#[from] serde_json::Error),
}

//! Error types for PDF export.

use thiserror::Error;

/// Errors surfaced by the PDF serializer.
///
/// A returned error means the export was aborted and no partial artifact
/// was produced. Per-element image failures are handled inside the walk
/// (logged and skipped) and never reach this type.
#[derive(Debug, Error)]
pub enum ExportError {
    /// The PDF backend failed to build or serialize the document.
    #[error("PDF generation failed: {0}")]
    Pdf(String),

    /// An embedded font could not be loaded.
    #[error("font error: {0}")]
    Font(String),

    /// The output file could not be written.
    #[error("failed to write output file: {0}")]
    Io(#[from] std::io::Error),
}

pub type ExportResult<T> = Result<T, ExportError>;

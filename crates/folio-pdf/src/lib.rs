//! Folio PDF Serializer
//!
//! Turns a `folio_core::Document` into a paginated PDF using printpdf's
//! builtin fonts. Pages map one-to-one, elements render in paint order.

pub mod error;
pub mod exporter;
pub mod metrics;

pub use error::{ExportError, ExportResult};
pub use exporter::{output_file_name, PdfExporter};

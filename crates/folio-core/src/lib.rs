//! Folio Core Library
//!
//! Platform-agnostic document model and canvas interaction logic for the
//! Folio document composer.

pub mod document;
pub mod elements;
pub mod engine;
pub mod error;
pub mod input;
pub mod page;
pub mod tools;
pub mod transfer;

pub use document::{Document, ZDirection, DUPLICATE_OFFSET};
pub use elements::{CellAddr, Color, Element, ElementId, ElementMeta};
pub use engine::{DragCommit, Effect, Engine, EngineConfig, EngineState};
pub use error::DocumentError;
pub use input::{Key, Modifiers, MouseButton};
pub use page::{resolve_page_size, Orientation, Page, PageId, PageSize, MM_TO_PT};
pub use tools::Tool;

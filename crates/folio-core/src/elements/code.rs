//! Code block element.

use super::{ElementId, ElementMeta};
use kurbo::Point;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A monospaced code block with a language tag.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Code {
    pub(crate) id: ElementId,
    /// Top-left corner position.
    pub position: Point,
    pub width: f64,
    pub height: f64,
    pub language: String,
    pub content: String,
    pub font_size: f64,
    #[serde(default)]
    pub meta: ElementMeta,
}

impl Code {
    pub fn new(position: Point) -> Self {
        Self {
            id: Uuid::new_v4(),
            position,
            width: 280.0,
            height: 120.0,
            language: "text".into(),
            content: String::new(),
            font_size: 12.0,
            meta: ElementMeta::default(),
        }
    }
}

//! Signature element.

use super::{ElementId, ElementMeta};
use kurbo::Point;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A signature field, optionally holding a captured signature image.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Signature {
    pub(crate) id: ElementId,
    /// Top-left corner position.
    pub position: Point,
    pub width: f64,
    pub height: f64,
    /// Captured signature as a `data:` URI, if one has been drawn.
    #[serde(default)]
    pub image: Option<String>,
    #[serde(default)]
    pub meta: ElementMeta,
}

impl Signature {
    pub fn new(position: Point) -> Self {
        Self {
            id: Uuid::new_v4(),
            position,
            width: 200.0,
            height: 80.0,
            image: None,
            meta: ElementMeta::default(),
        }
    }

    pub fn is_signed(&self) -> bool {
        self.image.is_some()
    }
}

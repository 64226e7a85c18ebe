//! Image element.

use super::{ElementId, ElementMeta};
use kurbo::Point;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// How the image is scaled into its box.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FitMode {
    /// Stretch to fill the box exactly.
    #[default]
    Fill,
    /// Scale preserving aspect ratio so the whole image fits.
    Contain,
    /// Scale preserving aspect ratio so the box is covered.
    Cover,
}

/// A raster or vector image placed on the page.
///
/// `src` is a source reference: typically a `data:` URI produced by the
/// upload path, but plain URLs survive round-trips untouched.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Image {
    pub(crate) id: ElementId,
    /// Top-left corner position.
    pub position: Point,
    pub width: f64,
    pub height: f64,
    pub src: String,
    #[serde(default)]
    pub fit: FitMode,
    #[serde(default)]
    pub meta: ElementMeta,
}

impl Image {
    pub fn new(position: Point, src: String) -> Self {
        Self {
            id: Uuid::new_v4(),
            position,
            width: 200.0,
            height: 150.0,
            src,
            fit: FitMode::default(),
            meta: ElementMeta::default(),
        }
    }
}

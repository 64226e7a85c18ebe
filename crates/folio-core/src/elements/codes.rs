//! QR code and barcode elements.

use super::{Color, ElementId, ElementMeta};
use kurbo::Point;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A QR code carrying arbitrary text data.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QrCode {
    pub(crate) id: ElementId,
    /// Top-left corner position.
    pub position: Point,
    pub width: f64,
    pub height: f64,
    pub data: String,
    pub foreground: Color,
    pub background: Color,
    #[serde(default)]
    pub meta: ElementMeta,
}

impl QrCode {
    pub fn new(position: Point) -> Self {
        Self {
            id: Uuid::new_v4(),
            position,
            width: 120.0,
            height: 120.0,
            data: String::new(),
            foreground: Color::black(),
            background: Color::white(),
            meta: ElementMeta::default(),
        }
    }
}

/// Symbology of a barcode.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BarcodeFormat {
    #[default]
    Code128,
    Ean13,
}

/// A linear barcode.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Barcode {
    pub(crate) id: ElementId,
    /// Top-left corner position.
    pub position: Point,
    pub width: f64,
    pub height: f64,
    pub data: String,
    pub format: BarcodeFormat,
    /// Print the encoded value under the bars.
    #[serde(default = "default_show_text")]
    pub show_text: bool,
    #[serde(default)]
    pub meta: ElementMeta,
}

fn default_show_text() -> bool {
    true
}

impl Barcode {
    pub fn new(position: Point) -> Self {
        Self {
            id: Uuid::new_v4(),
            position,
            width: 180.0,
            height: 60.0,
            data: String::new(),
            format: BarcodeFormat::default(),
            show_text: true,
            meta: ElementMeta::default(),
        }
    }
}

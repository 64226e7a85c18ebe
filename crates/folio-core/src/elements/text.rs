//! Text element.

use super::{Color, ElementId, ElementMeta};
use kurbo::Point;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Font family for text content. All three resolve to builtin output faces.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FontFamily {
    #[default]
    Helvetica,
    Times,
    Courier,
}

/// Font weight.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FontWeight {
    #[default]
    Normal,
    Bold,
}

/// Font slant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FontStyle {
    #[default]
    Normal,
    Italic,
}

/// Combined weight/slant token used to pick a concrete output face.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FontFace {
    Normal,
    Bold,
    Italic,
    BoldItalic,
}

/// Horizontal text alignment within the element box.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TextAlign {
    #[default]
    Left,
    Center,
    Right,
}

/// A block of text placed on the page.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Text {
    pub(crate) id: ElementId,
    /// Top-left corner position.
    pub position: Point,
    /// Wrap width of the text box.
    pub width: f64,
    /// Height of the text box.
    pub height: f64,
    /// Text content (may contain explicit newlines).
    pub content: String,
    /// Font size in points.
    pub font_size: f64,
    pub font_family: FontFamily,
    #[serde(default)]
    pub font_weight: FontWeight,
    #[serde(default)]
    pub font_style: FontStyle,
    #[serde(default)]
    pub align: TextAlign,
    pub color: Color,
    #[serde(default)]
    pub meta: ElementMeta,
}

impl Text {
    pub const DEFAULT_WIDTH: f64 = 200.0;
    pub const DEFAULT_HEIGHT: f64 = 40.0;

    /// Create a new text element at the given position.
    pub fn new(position: Point, content: String) -> Self {
        Self {
            id: Uuid::new_v4(),
            position,
            width: Self::DEFAULT_WIDTH,
            height: Self::DEFAULT_HEIGHT,
            content,
            font_size: 16.0,
            font_family: FontFamily::default(),
            font_weight: FontWeight::default(),
            font_style: FontStyle::default(),
            align: TextAlign::default(),
            color: Color::black(),
            meta: ElementMeta::default(),
        }
    }

    /// Resolve the combined `(weight, style)` pair to a face token.
    pub fn face(&self) -> FontFace {
        match (self.font_weight, self.font_style) {
            (FontWeight::Normal, FontStyle::Normal) => FontFace::Normal,
            (FontWeight::Bold, FontStyle::Normal) => FontFace::Bold,
            (FontWeight::Normal, FontStyle::Italic) => FontFace::Italic,
            (FontWeight::Bold, FontStyle::Italic) => FontFace::BoldItalic,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_face_resolution() {
        let mut text = Text::new(Point::ZERO, "x".into());
        assert_eq!(text.face(), FontFace::Normal);
        text.font_weight = FontWeight::Bold;
        assert_eq!(text.face(), FontFace::Bold);
        text.font_style = FontStyle::Italic;
        assert_eq!(text.face(), FontFace::BoldItalic);
        text.font_weight = FontWeight::Normal;
        assert_eq!(text.face(), FontFace::Italic);
    }
}

//! Tool system: the active tool gates how pointer events are interpreted.

use crate::document::Document;
use crate::elements::{
    Barcode, Chart, ChartKind, Code, Divider, Element, Form, FormControl, QrCode, Shape,
    ShapeKind, Signature, Table, Text,
};
use kurbo::Point;
use serde::{Deserialize, Serialize};

/// Available tools.
///
/// `Select` and `Pencil` are interaction tools; every other variant is a
/// creation tool that synthesizes a defaulted element at the click point.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Tool {
    #[default]
    Select,
    Pencil,
    Text,
    Shape(ShapeKind),
    Table,
    Chart(ChartKind),
    Form(FormControl),
    Code,
    Divider,
    QrCode,
    Barcode,
    Signature,
}

impl Tool {
    /// Whether a pointer-down on empty canvas creates a new element.
    pub fn is_creation(&self) -> bool {
        !matches!(self, Tool::Select | Tool::Pencil)
    }

    /// Synthesize a new element at `at` with tool-specific defaults.
    /// Text elements pick up the document's default color, family and size.
    /// Returns `None` for non-creation tools.
    pub fn create_element(&self, at: Point, doc: &Document) -> Option<Element> {
        match self {
            Tool::Select | Tool::Pencil => None,
            Tool::Text => {
                let mut text = Text::new(at, String::new());
                text.color = doc.default_text_color;
                text.font_family = doc.default_font_family;
                text.font_size = doc.default_font_size;
                Some(Element::Text(text))
            }
            Tool::Shape(kind) => Some(Element::Shape(Shape::new(*kind, at))),
            Tool::Table => Some(Element::Table(Table::new(at, 3, 3))),
            Tool::Chart(kind) => Some(Element::Chart(Chart::new(*kind, at))),
            Tool::Form(control) => Some(Element::Form(Form::new(*control, at))),
            Tool::Code => Some(Element::Code(Code::new(at))),
            Tool::Divider => Some(Element::Divider(Divider::new(at))),
            Tool::QrCode => Some(Element::QrCode(QrCode::new(at))),
            Tool::Barcode => Some(Element::Barcode(Barcode::new(at))),
            Tool::Signature => Some(Element::Signature(Signature::new(at))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_creation_tools() {
        assert!(!Tool::Select.is_creation());
        assert!(!Tool::Pencil.is_creation());
        assert!(Tool::Text.is_creation());
        assert!(Tool::Shape(ShapeKind::Circle).is_creation());
    }

    #[test]
    fn test_text_tool_uses_document_defaults() {
        let mut doc = Document::new();
        doc.default_font_size = 24.0;
        let el = Tool::Text
            .create_element(Point::new(50.0, 60.0), &doc)
            .unwrap();
        let Element::Text(text) = el else {
            panic!("expected text element");
        };
        assert_eq!(text.position, Point::new(50.0, 60.0));
        assert!((text.font_size - 24.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_select_tool_creates_nothing() {
        let doc = Document::new();
        assert!(Tool::Select.create_element(Point::ZERO, &doc).is_none());
    }
}

//! Element definitions for the composer.

mod chart;
mod code;
mod codes;
mod divider;
mod drawing;
mod form;
mod image;
mod shape;
mod signature;
mod table;
mod text;

pub use chart::{Chart, ChartData, ChartKind, Dataset};
pub use code::Code;
pub use codes::{Barcode, BarcodeFormat, QrCode};
pub use divider::{Divider, DividerStyle};
pub use drawing::Drawing;
pub use form::{Form, FormControl};
pub use image::{FitMode, Image};
pub use shape::{Shape, ShapeKind};
pub use signature::Signature;
pub use table::{CellAddr, HeaderMode, Table, TableData, TableStyle, HEADER_ROW};
pub use text::{FontFace, FontFamily, FontStyle, FontWeight, Text, TextAlign};

use kurbo::{Point, Rect, Vec2};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Unique identifier for elements.
pub type ElementId = Uuid;

/// Serializable color representation (RGBA8).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Color {
    pub fn new(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    pub fn black() -> Self {
        Self::new(0, 0, 0, 255)
    }

    pub fn white() -> Self {
        Self::new(255, 255, 255, 255)
    }

    pub fn transparent() -> Self {
        Self::new(0, 0, 0, 0)
    }

    /// Fully transparent colors are skipped when painting fills and strokes.
    pub fn is_transparent(&self) -> bool {
        self.a == 0
    }

    /// Parse a CSS-style color string (`transparent`, `#rgb`, `#rrggbb`, `#rrggbbaa`).
    /// Unrecognized input falls back to black.
    pub fn from_hex(color: &str) -> Self {
        if color.trim() == "transparent" {
            return Self::transparent();
        }

        if let Some(hex) = color.trim().strip_prefix('#') {
            match hex.len() {
                3 => {
                    let r = u8::from_str_radix(&hex[0..1], 16).unwrap_or(0) * 17;
                    let g = u8::from_str_radix(&hex[1..2], 16).unwrap_or(0) * 17;
                    let b = u8::from_str_radix(&hex[2..3], 16).unwrap_or(0) * 17;
                    return Self::new(r, g, b, 255);
                }
                6 => {
                    let r = u8::from_str_radix(&hex[0..2], 16).unwrap_or(0);
                    let g = u8::from_str_radix(&hex[2..4], 16).unwrap_or(0);
                    let b = u8::from_str_radix(&hex[4..6], 16).unwrap_or(0);
                    return Self::new(r, g, b, 255);
                }
                8 => {
                    let r = u8::from_str_radix(&hex[0..2], 16).unwrap_or(0);
                    let g = u8::from_str_radix(&hex[2..4], 16).unwrap_or(0);
                    let b = u8::from_str_radix(&hex[4..6], 16).unwrap_or(0);
                    let a = u8::from_str_radix(&hex[6..8], 16).unwrap_or(255);
                    return Self::new(r, g, b, a);
                }
                _ => {}
            }
        }

        Self::black()
    }

    /// Format as `#rrggbb` (or `#rrggbbaa` when not fully opaque).
    pub fn to_hex(&self) -> String {
        if self.a == 255 {
            format!("#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
        } else {
            format!("#{:02x}{:02x}{:02x}{:02x}", self.r, self.g, self.b, self.a)
        }
    }
}

impl Default for Color {
    fn default() -> Self {
        Self::black()
    }
}

/// Properties shared by every element regardless of type.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct ElementMeta {
    /// Rotation angle in degrees (around the element origin).
    #[serde(default)]
    pub rotation: f64,
    /// Overall opacity (0.0 = fully transparent, 1.0 = fully opaque).
    #[serde(default = "default_opacity")]
    pub opacity: f64,
    /// Locked elements ignore pointer interaction.
    #[serde(default)]
    pub locked: bool,
    /// Hidden elements are neither painted nor hit-tested.
    #[serde(default = "default_visible")]
    pub visible: bool,
}

fn default_opacity() -> f64 {
    1.0
}

fn default_visible() -> bool {
    true
}

impl Default for ElementMeta {
    fn default() -> Self {
        Self {
            rotation: 0.0,
            opacity: 1.0,
            locked: false,
            visible: true,
        }
    }
}

/// Distance from a point to a line segment (a→b).
pub fn point_to_segment_dist(point: Point, a: Point, b: Point) -> f64 {
    let seg = Vec2::new(b.x - a.x, b.y - a.y);
    let pv = Vec2::new(point.x - a.x, point.y - a.y);
    let len_sq = seg.hypot2();
    if len_sq < f64::EPSILON {
        return pv.hypot();
    }
    let t = (pv.dot(seg) / len_sq).clamp(0.0, 1.0);
    let proj = Point::new(a.x + t * seg.x, a.y + t * seg.y);
    ((point.x - proj.x).powi(2) + (point.y - proj.y).powi(2)).sqrt()
}

/// Minimum distance from a point to a polyline (sequence of connected segments).
pub fn point_to_polyline_dist(point: Point, points: &[Point]) -> f64 {
    points
        .windows(2)
        .map(|w| point_to_segment_dist(point, w[0], w[1]))
        .fold(f64::INFINITY, f64::min)
}

/// Enum wrapper for all element types.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum Element {
    Text(Text),
    Shape(Shape),
    Table(Table),
    Chart(Chart),
    Image(Image),
    Drawing(Drawing),
    Form(Form),
    Code(Code),
    Divider(Divider),
    QrCode(QrCode),
    Barcode(Barcode),
    Signature(Signature),
}

impl Element {
    pub fn id(&self) -> ElementId {
        match self {
            Element::Text(e) => e.id,
            Element::Shape(e) => e.id,
            Element::Table(e) => e.id,
            Element::Chart(e) => e.id,
            Element::Image(e) => e.id,
            Element::Drawing(e) => e.id,
            Element::Form(e) => e.id,
            Element::Code(e) => e.id,
            Element::Divider(e) => e.id,
            Element::QrCode(e) => e.id,
            Element::Barcode(e) => e.id,
            Element::Signature(e) => e.id,
        }
    }

    /// Stable lowercase name of the variant, used for logging and labels.
    pub fn kind_name(&self) -> &'static str {
        match self {
            Element::Text(_) => "text",
            Element::Shape(_) => "shape",
            Element::Table(_) => "table",
            Element::Chart(_) => "chart",
            Element::Image(_) => "image",
            Element::Drawing(_) => "drawing",
            Element::Form(_) => "form",
            Element::Code(_) => "code",
            Element::Divider(_) => "divider",
            Element::QrCode(_) => "qrcode",
            Element::Barcode(_) => "barcode",
            Element::Signature(_) => "signature",
        }
    }

    /// Top-left corner in page-local units.
    ///
    /// Drawings derive their position from the accumulated points, which are
    /// stored in page-absolute coordinates.
    pub fn position(&self) -> Point {
        match self {
            Element::Text(e) => e.position,
            Element::Shape(e) => e.position,
            Element::Table(e) => e.position,
            Element::Chart(e) => e.position,
            Element::Image(e) => e.position,
            Element::Drawing(e) => e.bounds().origin(),
            Element::Form(e) => e.position,
            Element::Code(e) => e.position,
            Element::Divider(e) => e.position,
            Element::QrCode(e) => e.position,
            Element::Barcode(e) => e.position,
            Element::Signature(e) => e.position,
        }
    }

    /// Move the element so its top-left corner lands at `position`.
    /// For drawings this translates every point of the path.
    pub fn set_position(&mut self, position: Point) {
        match self {
            Element::Text(e) => e.position = position,
            Element::Shape(e) => e.position = position,
            Element::Table(e) => e.position = position,
            Element::Chart(e) => e.position = position,
            Element::Image(e) => e.position = position,
            Element::Drawing(e) => e.translate_to(position),
            Element::Form(e) => e.position = position,
            Element::Code(e) => e.position = position,
            Element::Divider(e) => e.position = position,
            Element::QrCode(e) => e.position = position,
            Element::Barcode(e) => e.position = position,
            Element::Signature(e) => e.position = position,
        }
    }

    /// Bounding box in page-local units.
    pub fn bounds(&self) -> Rect {
        match self {
            Element::Drawing(e) => e.bounds(),
            _ => {
                let origin = self.position();
                let (w, h) = self.size();
                Rect::new(origin.x, origin.y, origin.x + w, origin.y + h)
            }
        }
    }

    pub fn size(&self) -> (f64, f64) {
        match self {
            Element::Text(e) => (e.width, e.height),
            Element::Shape(e) => (e.width, e.height),
            Element::Table(e) => (e.width, e.height),
            Element::Chart(e) => (e.width, e.height),
            Element::Image(e) => (e.width, e.height),
            Element::Drawing(e) => {
                let b = e.bounds();
                (b.width(), b.height())
            }
            Element::Form(e) => (e.width, e.height),
            Element::Code(e) => (e.width, e.height),
            Element::Divider(e) => (e.width, e.height),
            Element::QrCode(e) => (e.width, e.height),
            Element::Barcode(e) => (e.width, e.height),
            Element::Signature(e) => (e.width, e.height),
        }
    }

    pub fn meta(&self) -> &ElementMeta {
        match self {
            Element::Text(e) => &e.meta,
            Element::Shape(e) => &e.meta,
            Element::Table(e) => &e.meta,
            Element::Chart(e) => &e.meta,
            Element::Image(e) => &e.meta,
            Element::Drawing(e) => &e.meta,
            Element::Form(e) => &e.meta,
            Element::Code(e) => &e.meta,
            Element::Divider(e) => &e.meta,
            Element::QrCode(e) => &e.meta,
            Element::Barcode(e) => &e.meta,
            Element::Signature(e) => &e.meta,
        }
    }

    /// Hit-test a point (page-local units) against this element.
    ///
    /// Drawings and line shapes hit on the stroke itself rather than on the
    /// bounding box, so overlapping elements underneath stay reachable.
    pub fn contains_point(&self, point: Point) -> bool {
        if !self.meta().visible {
            return false;
        }
        match self {
            Element::Drawing(e) => {
                let tol = e.stroke_width / 2.0 + 4.0;
                if e.points.len() < 2 {
                    return e
                        .points
                        .first()
                        .is_some_and(|p| (point - *p).hypot() <= tol);
                }
                point_to_polyline_dist(point, &e.points) <= tol
            }
            Element::Shape(e) if e.kind == ShapeKind::Line => {
                let a = e.position;
                let b = Point::new(e.position.x + e.width, e.position.y);
                point_to_segment_dist(point, a, b) <= e.stroke_width / 2.0 + 4.0
            }
            _ => self.bounds().contains(point),
        }
    }

    /// Regenerate the element's ID with a new unique identifier.
    /// Used when duplicating so the clone gets its own identity.
    pub fn regenerate_id(&mut self) {
        let new_id = Uuid::new_v4();
        match self {
            Element::Text(e) => e.id = new_id,
            Element::Shape(e) => e.id = new_id,
            Element::Table(e) => e.id = new_id,
            Element::Chart(e) => e.id = new_id,
            Element::Image(e) => e.id = new_id,
            Element::Drawing(e) => e.id = new_id,
            Element::Form(e) => e.id = new_id,
            Element::Code(e) => e.id = new_id,
            Element::Divider(e) => e.id = new_id,
            Element::QrCode(e) => e.id = new_id,
            Element::Barcode(e) => e.id = new_id,
            Element::Signature(e) => e.id = new_id,
        }
    }

    /// Check if this element is a freehand drawing.
    pub fn is_drawing(&self) -> bool {
        matches!(self, Element::Drawing(_))
    }

    pub fn as_table(&self) -> Option<&Table> {
        match self {
            Element::Table(t) => Some(t),
            _ => None,
        }
    }

    pub fn as_table_mut(&mut self) -> Option<&mut Table> {
        match self {
            Element::Table(t) => Some(t),
            _ => None,
        }
    }

    pub fn as_text(&self) -> Option<&Text> {
        match self {
            Element::Text(t) => Some(t),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_color_hex_parsing() {
        assert_eq!(Color::from_hex("#ff0000"), Color::new(255, 0, 0, 255));
        assert_eq!(Color::from_hex("#fff"), Color::new(255, 255, 255, 255));
        assert_eq!(Color::from_hex("#00000080"), Color::new(0, 0, 0, 128));
        assert_eq!(Color::from_hex("transparent"), Color::transparent());
        assert_eq!(Color::from_hex("bogus"), Color::black());
    }

    #[test]
    fn test_color_round_trip() {
        let c = Color::new(18, 52, 86, 255);
        assert_eq!(Color::from_hex(&c.to_hex()), c);
        assert_eq!(c.to_hex(), "#123456");
    }

    #[test]
    fn test_regenerate_id() {
        let mut el = Element::Text(Text::new(Point::new(0.0, 0.0), "hi".into()));
        let old = el.id();
        el.regenerate_id();
        assert_ne!(el.id(), old);
    }

    #[test]
    fn test_bounds_and_hit() {
        let mut text = Text::new(Point::new(10.0, 20.0), "hi".into());
        text.width = 100.0;
        text.height = 40.0;
        let el = Element::Text(text);
        assert!(el.contains_point(Point::new(50.0, 30.0)));
        assert!(!el.contains_point(Point::new(150.0, 30.0)));
        assert_eq!(el.bounds(), Rect::new(10.0, 20.0, 110.0, 60.0));
    }

    #[test]
    fn test_hidden_elements_are_not_hit() {
        let mut text = Text::new(Point::new(0.0, 0.0), "hi".into());
        text.width = 100.0;
        text.height = 40.0;
        text.meta.visible = false;
        let el = Element::Text(text);
        assert!(!el.contains_point(Point::new(10.0, 10.0)));
    }

    #[test]
    fn test_header_row_addressable_through_module_exports() {
        let mut table = Table::new(Point::new(0.0, 0.0), 1, 2);
        table.set_cell(CellAddr::new(HEADER_ROW, 0), "Name".into());
        let el = Element::Table(table);
        assert_eq!(
            el.as_table().unwrap().cell(CellAddr::new(HEADER_ROW, 0)),
            Some("Name")
        );
    }

    #[test]
    fn test_line_shape_hits_on_stroke() {
        let mut line = Shape::new(ShapeKind::Line, Point::new(0.0, 50.0));
        line.width = 100.0;
        let el = Element::Shape(line);
        assert!(el.contains_point(Point::new(50.0, 51.0)));
        assert!(!el.contains_point(Point::new(50.0, 80.0)));
    }
}

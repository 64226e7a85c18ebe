//! Geometric shape element.

use super::{Color, ElementId, ElementMeta};
use kurbo::Point;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Kind of geometric shape.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ShapeKind {
    #[default]
    Rectangle,
    Circle,
    /// A horizontal segment from `(x, y)` to `(x + width, y)`; height is unused.
    Line,
}

/// A filled/stroked geometric shape.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Shape {
    pub(crate) id: ElementId,
    pub kind: ShapeKind,
    /// Top-left corner position.
    pub position: Point,
    pub width: f64,
    pub height: f64,
    /// Fill color; transparent fills are not painted.
    pub fill: Color,
    /// Stroke color; transparent strokes are not painted.
    pub stroke: Color,
    pub stroke_width: f64,
    #[serde(default)]
    pub meta: ElementMeta,
}

impl Shape {
    /// Create a shape with kind-specific default dimensions.
    pub fn new(kind: ShapeKind, position: Point) -> Self {
        let (width, height) = match kind {
            ShapeKind::Rectangle => (120.0, 80.0),
            ShapeKind::Circle => (100.0, 100.0),
            ShapeKind::Line => (150.0, 0.0),
        };
        Self {
            id: Uuid::new_v4(),
            kind,
            position,
            width,
            height,
            fill: Color::transparent(),
            stroke: Color::black(),
            stroke_width: 2.0,
            meta: ElementMeta::default(),
        }
    }

    /// Circle radius, derived from the width.
    pub fn radius(&self) -> f64 {
        self.width / 2.0
    }

    /// Circle center: `(x + r, y + r)`.
    pub fn center(&self) -> Point {
        let r = self.radius();
        Point::new(self.position.x + r, self.position.y + r)
    }
}

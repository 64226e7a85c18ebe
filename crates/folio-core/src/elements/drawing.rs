//! Freehand drawing element.

use super::{Color, ElementId, ElementMeta};
use kurbo::{Point, Rect, Vec2};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A freehand pencil stroke.
///
/// Points are stored in page-absolute coordinates, not relative to an
/// element origin; the bounding box is derived from the points.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Drawing {
    pub(crate) id: ElementId,
    pub points: Vec<Point>,
    pub color: Color,
    pub stroke_width: f64,
    #[serde(default)]
    pub meta: ElementMeta,
}

impl Drawing {
    /// Start a new stroke from a single point.
    pub fn new(start: Point) -> Self {
        Self {
            id: Uuid::new_v4(),
            points: vec![start],
            color: Color::black(),
            stroke_width: 2.0,
            meta: ElementMeta::default(),
        }
    }

    /// Append a point to the path. Points are only ever appended, never
    /// replaced, while a stroke is in progress.
    pub fn add_point(&mut self, point: Point) {
        self.points.push(point);
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Bounding box of the path; degenerates to a zero-size rect for a
    /// single point and to the origin when empty.
    pub fn bounds(&self) -> Rect {
        let Some(first) = self.points.first() else {
            return Rect::ZERO;
        };
        let mut rect = Rect::new(first.x, first.y, first.x, first.y);
        for p in &self.points[1..] {
            rect.x0 = rect.x0.min(p.x);
            rect.y0 = rect.y0.min(p.y);
            rect.x1 = rect.x1.max(p.x);
            rect.y1 = rect.y1.max(p.y);
        }
        rect
    }

    /// Translate the whole path so its bounding-box origin lands at `origin`.
    pub fn translate_to(&mut self, origin: Point) {
        let delta = origin - self.bounds().origin();
        self.translate(delta);
    }

    pub fn translate(&mut self, delta: Vec2) {
        for p in &mut self.points {
            *p += delta;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bounds_from_points() {
        let mut drawing = Drawing::new(Point::new(10.0, 10.0));
        drawing.add_point(Point::new(30.0, 5.0));
        drawing.add_point(Point::new(20.0, 40.0));
        assert_eq!(drawing.bounds(), Rect::new(10.0, 5.0, 30.0, 40.0));
    }

    #[test]
    fn test_translate_to() {
        let mut drawing = Drawing::new(Point::new(10.0, 10.0));
        drawing.add_point(Point::new(20.0, 30.0));
        drawing.translate_to(Point::new(0.0, 0.0));
        assert_eq!(drawing.points[0], Point::new(0.0, 0.0));
        assert_eq!(drawing.points[1], Point::new(10.0, 20.0));
    }
}

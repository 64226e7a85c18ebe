//! Pages and page geometry.

use crate::elements::{Element, ElementId};
use kurbo::{Point, Size};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Unique identifier for pages.
pub type PageId = Uuid;

/// Millimeters to PDF points.
pub const MM_TO_PT: f64 = 2.83465;

/// Standard page formats.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PageSize {
    #[default]
    A4,
    A3,
    A5,
    Letter,
    Legal,
    /// Dimensions come from the document's custom width/height in mm.
    Custom,
}

/// Page orientation. Landscape swaps the resolved width and height.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Orientation {
    #[default]
    Portrait,
    Landscape,
}

/// Resolve a page format to `{width, height}` in points.
///
/// Pure: the same inputs always produce the same dimensions, whether used
/// for on-screen canvas sizing or export. `custom_mm` only matters for
/// [`PageSize::Custom`], where each side is `round(mm × 2.83465)`.
pub fn resolve_page_size(size: PageSize, orientation: Orientation, custom_mm: Size) -> Size {
    let portrait = match size {
        PageSize::A4 => Size::new(595.0, 842.0),
        PageSize::A3 => Size::new(842.0, 1191.0),
        PageSize::A5 => Size::new(420.0, 595.0),
        PageSize::Letter => Size::new(612.0, 792.0),
        PageSize::Legal => Size::new(612.0, 1008.0),
        PageSize::Custom => Size::new(
            (custom_mm.width * MM_TO_PT).round(),
            (custom_mm.height * MM_TO_PT).round(),
        ),
    };
    match orientation {
        Orientation::Portrait => portrait,
        Orientation::Landscape => Size::new(portrait.height, portrait.width),
    }
}

/// One page: identity plus a z-ordered element list.
///
/// Array order is z-order: later entries paint on top and win pointer
/// priority on overlap.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Page {
    pub id: PageId,
    pub elements: Vec<Element>,
}

impl Page {
    pub fn new() -> Self {
        Self {
            id: Uuid::new_v4(),
            elements: Vec::new(),
        }
    }

    pub fn contains(&self, id: ElementId) -> bool {
        self.elements.iter().any(|e| e.id() == id)
    }

    pub fn index_of(&self, id: ElementId) -> Option<usize> {
        self.elements.iter().position(|e| e.id() == id)
    }

    pub fn get(&self, id: ElementId) -> Option<&Element> {
        self.elements.iter().find(|e| e.id() == id)
    }

    /// Topmost element under `point`, honoring z-order (front to back).
    /// Locked elements are skipped, they ignore pointer interaction.
    pub fn element_at(&self, point: Point) -> Option<ElementId> {
        self.elements
            .iter()
            .rev()
            .find(|e| !e.meta().locked && e.contains_point(point))
            .map(|e| e.id())
    }

    pub fn is_empty(&self) -> bool {
        self.elements.is_empty()
    }

    pub fn len(&self) -> usize {
        self.elements.len()
    }
}

impl Default for Page {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::elements::{Shape, ShapeKind, Text};

    #[test]
    fn test_resolve_standard_sizes() {
        let custom = Size::new(210.0, 297.0);
        assert_eq!(
            resolve_page_size(PageSize::A4, Orientation::Portrait, custom),
            Size::new(595.0, 842.0)
        );
        assert_eq!(
            resolve_page_size(PageSize::A4, Orientation::Landscape, custom),
            Size::new(842.0, 595.0)
        );
        assert_eq!(
            resolve_page_size(PageSize::Letter, Orientation::Portrait, custom),
            Size::new(612.0, 792.0)
        );
    }

    #[test]
    fn test_resolve_custom_size() {
        let size = resolve_page_size(
            PageSize::Custom,
            Orientation::Portrait,
            Size::new(100.0, 50.0),
        );
        assert_eq!(size, Size::new(283.0, 142.0));
    }

    #[test]
    fn test_element_at_prefers_topmost() {
        let mut page = Page::new();
        let mut a = Shape::new(ShapeKind::Rectangle, Point::new(0.0, 0.0));
        a.width = 100.0;
        a.height = 100.0;
        a.fill = crate::elements::Color::white();
        let mut b = Shape::new(ShapeKind::Rectangle, Point::new(50.0, 50.0));
        b.width = 100.0;
        b.height = 100.0;
        b.fill = crate::elements::Color::white();
        let (id_a, id_b) = (a.id, b.id);
        page.elements.push(Element::Shape(a));
        page.elements.push(Element::Shape(b));

        // Overlap region: the later entry wins.
        assert_eq!(page.element_at(Point::new(75.0, 75.0)), Some(id_b));
        // Only the first covers this point.
        assert_eq!(page.element_at(Point::new(25.0, 25.0)), Some(id_a));
        assert_eq!(page.element_at(Point::new(300.0, 300.0)), None);
    }

    #[test]
    fn test_locked_elements_skip_hit_test() {
        let mut page = Page::new();
        let mut text = Text::new(Point::new(0.0, 0.0), "x".into());
        text.meta.locked = true;
        let id = text.id;
        page.elements.push(Element::Text(text));
        assert!(page.contains(id));
        assert_eq!(page.element_at(Point::new(10.0, 10.0)), None);
    }
}

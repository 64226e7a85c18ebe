//! Document model and transactional store operations.

use crate::elements::{Color, Element, ElementId, FontFamily};
use crate::error::DocumentError;
use crate::page::{resolve_page_size, Orientation, Page, PageSize};
use kurbo::{Size, Vec2};
use serde::{Deserialize, Serialize};

/// Offset applied to duplicated elements so the clone is visibly distinct.
pub const DUPLICATE_OFFSET: Vec2 = Vec2::new(20.0, 20.0);

/// Direction for adjacent z-order swaps.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ZDirection {
    /// Towards the front (later in paint order).
    Up,
    /// Towards the back (earlier in paint order).
    Down,
}

/// A composed document: settings plus an ordered list of pages.
///
/// Every mutation validates its inputs before touching any state, so a
/// failed operation leaves the document unchanged. Elements are replaced
/// whole by id rather than patched in place, which keeps updates atomic and
/// preserves z-order under update.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Document {
    pub title: String,
    pub page_size: PageSize,
    pub orientation: Orientation,
    /// Custom page width in millimeters, used when `page_size` is `Custom`.
    pub custom_width: f64,
    /// Custom page height in millimeters.
    pub custom_height: f64,
    pub default_text_color: Color,
    pub default_font_family: FontFamily,
    pub default_font_size: f64,
    pub pages: Vec<Page>,
    /// Index of the active page. Always valid: `0..pages.len()`.
    pub current_page: usize,
}

impl Document {
    /// Create a document with a single empty page.
    pub fn new() -> Self {
        Self {
            title: "Untitled".to_string(),
            page_size: PageSize::default(),
            orientation: Orientation::default(),
            custom_width: 210.0,
            custom_height: 297.0,
            default_text_color: Color::black(),
            default_font_family: FontFamily::default(),
            default_font_size: 16.0,
            pages: vec![Page::new()],
            current_page: 0,
        }
    }

    /// Resolved page dimensions in points.
    pub fn page_dimensions(&self) -> Size {
        resolve_page_size(
            self.page_size,
            self.orientation,
            Size::new(self.custom_width, self.custom_height),
        )
    }

    /// The active page.
    pub fn active_page(&self) -> &Page {
        &self.pages[self.current_page]
    }

    fn active_page_mut(&mut self) -> &mut Page {
        &mut self.pages[self.current_page]
    }

    /// Look up an element by id on the active page.
    pub fn element(&self, id: ElementId) -> Option<&Element> {
        self.active_page().get(id)
    }

    fn id_exists_anywhere(&self, id: ElementId) -> bool {
        self.pages.iter().any(|p| p.contains(id))
    }

    /// Append an element to the active page (topmost z-order).
    ///
    /// Fails with [`DocumentError::InvalidElement`] if the id already exists
    /// anywhere in the document.
    pub fn add_element(&mut self, element: Element) -> Result<(), DocumentError> {
        let id = element.id();
        if self.id_exists_anywhere(id) {
            return Err(DocumentError::InvalidElement(id));
        }
        self.active_page_mut().elements.push(element);
        Ok(())
    }

    /// Replace the element sharing `element.id()` on the active page.
    ///
    /// Silently ignored when the id is absent; callers are expected to hold
    /// a live id. The element keeps its array position, so z-order is stable
    /// under update.
    pub fn update_element(&mut self, element: Element) {
        let page = self.active_page_mut();
        if let Some(idx) = page.index_of(element.id()) {
            page.elements[idx] = element;
        }
    }

    /// Remove an element from the active page.
    /// Returns the removed element, or `None` if the id was absent.
    pub fn delete_element(&mut self, id: ElementId) -> Option<Element> {
        let page = self.active_page_mut();
        let idx = page.index_of(id)?;
        Some(page.elements.remove(idx))
    }

    /// Clone an element with a fresh id, offset by `DUPLICATE_OFFSET`, and
    /// append it to the end of the page (top z-order).
    /// Returns the new element's id.
    pub fn duplicate_element(&mut self, id: ElementId) -> Option<ElementId> {
        let source = self.active_page().get(id)?.clone();
        let mut clone = source;
        clone.regenerate_id();
        clone.set_position(clone.position() + DUPLICATE_OFFSET);
        let new_id = clone.id();
        self.active_page_mut().elements.push(clone);
        Some(new_id)
    }

    /// Swap an element with its neighbor in paint order. This is an adjacent
    /// swap, not an insertion: no-op at either boundary.
    /// Returns true if a swap happened.
    pub fn move_element(&mut self, id: ElementId, direction: ZDirection) -> bool {
        let page = self.active_page_mut();
        let Some(idx) = page.index_of(id) else {
            return false;
        };
        match direction {
            ZDirection::Up if idx + 1 < page.elements.len() => {
                page.elements.swap(idx, idx + 1);
                true
            }
            ZDirection::Down if idx > 0 => {
                page.elements.swap(idx, idx - 1);
                true
            }
            _ => false,
        }
    }

    /// Move an element to the end of the paint order (topmost).
    pub fn bring_to_front(&mut self, id: ElementId) -> bool {
        let page = self.active_page_mut();
        let Some(idx) = page.index_of(id) else {
            return false;
        };
        let element = page.elements.remove(idx);
        page.elements.push(element);
        true
    }

    /// Move an element to the start of the paint order (bottommost).
    pub fn send_to_back(&mut self, id: ElementId) -> bool {
        let page = self.active_page_mut();
        let Some(idx) = page.index_of(id) else {
            return false;
        };
        let element = page.elements.remove(idx);
        page.elements.insert(0, element);
        true
    }

    /// Append a new empty page and make it active.
    pub fn add_page(&mut self) {
        self.pages.push(Page::new());
        self.current_page = self.pages.len() - 1;
    }

    /// Delete the page at `index`.
    ///
    /// Fails with [`DocumentError::CannotDeleteLastPage`] on the only
    /// remaining page. When the active page goes away the active index
    /// re-targets to `min(index, pages.len() - 1)`.
    pub fn delete_page(&mut self, index: usize) -> Result<(), DocumentError> {
        if index >= self.pages.len() {
            return Err(DocumentError::PageOutOfRange(index));
        }
        if self.pages.len() == 1 {
            return Err(DocumentError::CannotDeleteLastPage);
        }
        self.pages.remove(index);
        if index < self.current_page {
            self.current_page -= 1;
        } else if index == self.current_page {
            self.current_page = index.min(self.pages.len() - 1);
        }
        Ok(())
    }

    /// Switch the active page.
    pub fn change_page(&mut self, index: usize) -> Result<(), DocumentError> {
        if index >= self.pages.len() {
            return Err(DocumentError::PageOutOfRange(index));
        }
        self.current_page = index;
        Ok(())
    }

    /// Empty the active page's element list, preserving the page identity.
    pub fn clear_page(&mut self) {
        self.active_page_mut().elements.clear();
    }

    /// Serialize the document to JSON.
    pub fn to_json(&self) -> Result<String, DocumentError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Deserialize a document from JSON.
    pub fn from_json(json: &str) -> Result<Self, DocumentError> {
        Ok(serde_json::from_str(json)?)
    }
}

impl Default for Document {
    fn default() -> Self {
        Self::new()
    }
}

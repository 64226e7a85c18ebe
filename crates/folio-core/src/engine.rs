//! Canvas interaction engine.
//!
//! Turns pointer and keyboard input into document mutations and transient
//! UI state. All cross-cutting interaction state (selection, the in-progress
//! drawing, open edit sessions, the context menu) lives in one explicit
//! state machine here; nothing is duplicated into the UI layer.

use crate::document::{Document, ZDirection};
use crate::elements::{CellAddr, Drawing, Element, ElementId};
use crate::input::{Key, Modifiers, MouseButton};
use crate::tools::Tool;
use crate::transfer;
use kurbo::{Point, Vec2};
use serde::{Deserialize, Serialize};

/// When drag moves are written back to the document store.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DragCommit {
    /// Commit position on every pointer-move so the rendered state is live.
    #[default]
    Live,
    /// Stage moves internally and commit once on release/leave.
    OnRelease,
}

/// Engine configuration.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct EngineConfig {
    pub drag_commit: DragCommit,
}

/// What the pointer is currently doing.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum EngineState {
    Idle,
    Selected(ElementId),
    Dragging {
        id: ElementId,
        /// Pointer offset within the element, recorded at pointer-down.
        grab: Vec2,
        /// Whether any pointer-move happened since the down event.
        moved: bool,
    },
    Drawing(ElementId),
    EditingText(ElementId),
    EditingTableCell {
        id: ElementId,
        cell: CellAddr,
    },
    ContextMenu {
        id: ElementId,
        at: Point,
    },
}

/// Side effects the engine cannot perform itself; the embedding UI reacts.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Effect {
    OpenProperties(ElementId),
}

/// The canvas interaction engine: owns the document, the active tool and
/// the interaction state machine.
#[derive(Debug, Clone)]
pub struct Engine {
    pub document: Document,
    tool: Tool,
    state: EngineState,
    /// The single in-progress freehand element, if any.
    current_drawing: Option<ElementId>,
    /// Uncommitted content of an open text/cell edit session.
    pending_edit: Option<String>,
    /// Staged drag position for [`DragCommit::OnRelease`].
    pending_drag: Option<Point>,
    config: EngineConfig,
}

impl Engine {
    pub fn new(document: Document) -> Self {
        Self::with_config(document, EngineConfig::default())
    }

    pub fn with_config(document: Document, config: EngineConfig) -> Self {
        Self {
            document,
            tool: Tool::default(),
            state: EngineState::Idle,
            current_drawing: None,
            pending_edit: None,
            pending_drag: None,
            config,
        }
    }

    pub fn state(&self) -> EngineState {
        self.state
    }

    pub fn tool(&self) -> Tool {
        self.tool
    }

    /// Switch the active tool. Any open edit session is committed first so
    /// the tool change never drops pending input.
    pub fn set_tool(&mut self, tool: Tool) {
        match self.state {
            EngineState::EditingText(id) | EngineState::EditingTableCell { id, .. } => {
                self.commit_edit();
                self.state = EngineState::Selected(id);
            }
            EngineState::ContextMenu { id, .. } => self.state = EngineState::Selected(id),
            _ => {}
        }
        self.tool = tool;
    }

    /// The selected element, if any. At most one element is selected, and
    /// the id always refers to a live element on the active page.
    pub fn selection(&self) -> Option<ElementId> {
        match self.state {
            EngineState::Selected(id)
            | EngineState::Dragging { id, .. }
            | EngineState::EditingText(id)
            | EngineState::EditingTableCell { id, .. }
            | EngineState::ContextMenu { id, .. } => Some(id),
            EngineState::Idle | EngineState::Drawing(_) => None,
        }
    }

    /// The in-progress freehand element, if a drawing session is open.
    pub fn current_drawing(&self) -> Option<ElementId> {
        self.current_drawing
    }

    // ---- pointer events ----

    pub fn pointer_down(&mut self, at: Point, button: MouseButton) {
        // An open context menu absorbs no clicks itself (the menu widget
        // does); any click reaching the canvas closes it first.
        if let EngineState::ContextMenu { id, .. } = self.state {
            self.state = EngineState::Selected(id);
        }

        // Edit sessions take priority over selection: clicks outside the
        // edited control close the session and go no further.
        match self.state {
            EngineState::EditingText(id) => {
                let inside = self
                    .document
                    .element(id)
                    .is_some_and(|e| e.bounds().contains(at));
                if inside {
                    return;
                }
                self.commit_edit();
                self.state = EngineState::Selected(id);
                return;
            }
            EngineState::EditingTableCell { id, cell } => {
                let target = self
                    .document
                    .element(id)
                    .and_then(|e| e.as_table())
                    .and_then(|t| t.cell_at(at));
                match target {
                    Some(next) if next == cell => return,
                    Some(next) => {
                        // Click on a sibling cell: commit, then edit that one.
                        self.commit_edit();
                        self.open_cell(id, next);
                        return;
                    }
                    None => {
                        self.commit_edit();
                        self.state = EngineState::Selected(id);
                        return;
                    }
                }
            }
            _ => {}
        }

        // Pencil always wins: a pointer-down begins a new freehand path even
        // on top of an existing element.
        if self.tool == Tool::Pencil && button == MouseButton::Left {
            self.begin_drawing(at);
            return;
        }

        if let Some(id) = self.document.active_page().element_at(at) {
            self.select(id);
            if button == MouseButton::Right {
                self.state = EngineState::ContextMenu { id, at };
                return;
            }
            // Freehand geometry is immutable through dragging; the element
            // only gets selected.
            let draggable = self.document.element(id).is_some_and(|e| !e.is_drawing());
            if draggable {
                let origin = self.document.element(id).map(|e| e.position());
                if let Some(origin) = origin {
                    self.pending_drag = None;
                    self.state = EngineState::Dragging {
                        id,
                        grab: at - origin,
                        moved: false,
                    };
                }
            }
            return;
        }

        // Empty canvas.
        if button == MouseButton::Left && self.tool.is_creation() {
            if let Some(element) = self.tool.create_element(at, &self.document) {
                let id = element.id();
                match self.document.add_element(element) {
                    Ok(()) => self.select(id),
                    Err(err) => log::warn!("failed to create element: {err}"),
                }
            }
            return;
        }

        self.current_drawing = None;
        self.state = EngineState::Idle;
    }

    pub fn pointer_move(&mut self, at: Point) {
        match self.state {
            EngineState::Dragging { id, grab, .. } => {
                self.state = EngineState::Dragging {
                    id,
                    grab,
                    moved: true,
                };
                let position = at - grab;
                match self.config.drag_commit {
                    DragCommit::Live => self.commit_position(id, position),
                    DragCommit::OnRelease => self.pending_drag = Some(position),
                }
            }
            EngineState::Drawing(id) => {
                if let Some(element) = self.document.element(id) {
                    let mut updated = element.clone();
                    if let Element::Drawing(d) = &mut updated {
                        d.add_point(at);
                    }
                    self.document.update_element(updated);
                }
            }
            _ => {}
        }
    }

    pub fn pointer_up(&mut self, at: Point) {
        match self.state {
            EngineState::Dragging { id, grab, moved } => {
                if moved {
                    self.commit_position(id, at - grab);
                    self.pending_drag = None;
                    self.state = EngineState::Selected(id);
                } else {
                    // A click without movement on a table opens the cell
                    // under the pointer for editing.
                    let cell = self
                        .document
                        .element(id)
                        .and_then(|e| e.as_table())
                        .and_then(|t| t.cell_at(at));
                    match cell {
                        Some(cell) => self.open_cell(id, cell),
                        None => self.state = EngineState::Selected(id),
                    }
                }
            }
            EngineState::Drawing(_) => self.end_drawing(),
            _ => {}
        }
    }

    /// Pointer left the canvas: open drags commit their last position, an
    /// open drawing session ends.
    pub fn pointer_leave(&mut self) {
        match self.state {
            EngineState::Dragging { id, .. } => {
                if let Some(position) = self.pending_drag.take() {
                    self.commit_position(id, position);
                }
                self.state = EngineState::Selected(id);
            }
            EngineState::Drawing(_) => self.end_drawing(),
            _ => {}
        }
    }

    /// Double-click on a text element opens in-place editing.
    pub fn double_click(&mut self, at: Point) {
        if matches!(
            self.state,
            EngineState::EditingText(_) | EngineState::EditingTableCell { .. }
        ) {
            return;
        }
        if let Some(id) = self.document.active_page().element_at(at) {
            let content = self
                .document
                .element(id)
                .and_then(|e| e.as_text())
                .map(|t| t.content.clone());
            if let Some(content) = content {
                self.select(id);
                self.pending_edit = Some(content);
                self.state = EngineState::EditingText(id);
            }
        }
    }

    // ---- keyboard ----

    /// Handle a key press. Global shortcuts only apply when no edit session
    /// is open; edit sessions consume their own navigation keys.
    pub fn key_down(&mut self, key: Key, mods: Modifiers) -> Option<Effect> {
        match self.state {
            EngineState::EditingText(id) => {
                match key {
                    Key::Enter if !mods.shift => {
                        self.commit_edit();
                        self.state = EngineState::Selected(id);
                    }
                    Key::Escape => {
                        self.pending_edit = None;
                        self.state = EngineState::Selected(id);
                    }
                    _ => {}
                }
                None
            }
            EngineState::EditingTableCell { id, cell } => {
                match key {
                    Key::Tab => {
                        self.commit_edit();
                        let next = self.with_table(id, |t| {
                            if mods.shift {
                                t.prev_cell(cell)
                            } else {
                                t.next_cell(cell)
                            }
                        });
                        if let Some(next) = next {
                            self.open_cell(id, next);
                        }
                    }
                    Key::Enter if !mods.shift => {
                        self.commit_edit();
                        let below = self.with_table(id, |t| t.cell_below(cell));
                        if let Some(below) = below {
                            self.open_cell(id, below);
                        }
                    }
                    Key::Escape => {
                        self.pending_edit = None;
                        self.state = EngineState::Selected(id);
                    }
                    _ => {}
                }
                None
            }
            EngineState::ContextMenu { id, .. } => {
                if key == Key::Escape {
                    self.state = EngineState::Selected(id);
                }
                None
            }
            _ => self.global_key(key, mods),
        }
    }

    fn global_key(&mut self, key: Key, mods: Modifiers) -> Option<Effect> {
        match key {
            Key::Delete | Key::Backspace => {
                if let Some(id) = self.selection() {
                    self.delete_element(id);
                }
                None
            }
            Key::Escape => {
                self.current_drawing = None;
                self.state = EngineState::Idle;
                None
            }
            Key::Char('d') if mods.command() => {
                if let Some(id) = self.selection() {
                    if let Some(new_id) = self.document.duplicate_element(id) {
                        self.select(new_id);
                    }
                }
                None
            }
            Key::Char('e') if mods.command() => self.selection().map(Effect::OpenProperties),
            Key::Char('t') if mods.command() => {
                self.set_tool(Tool::Text);
                None
            }
            Key::Char('i') if mods.command() => {
                self.set_tool(Tool::Pencil);
                None
            }
            _ => None,
        }
    }

    // ---- edit sessions ----

    /// Replace the pending content of the open edit session.
    pub fn edit_input(&mut self, text: String) {
        if matches!(
            self.state,
            EngineState::EditingText(_) | EngineState::EditingTableCell { .. }
        ) {
            self.pending_edit = Some(text);
        }
    }

    /// Commit the open edit session (blur). No-op outside an edit session.
    pub fn blur(&mut self) {
        match self.state {
            EngineState::EditingText(id) | EngineState::EditingTableCell { id, .. } => {
                self.commit_edit();
                self.state = EngineState::Selected(id);
            }
            _ => {}
        }
    }

    fn commit_edit(&mut self) {
        let Some(value) = self.pending_edit.take() else {
            return;
        };
        match self.state {
            EngineState::EditingText(id) => {
                if let Some(element) = self.document.element(id) {
                    let mut updated = element.clone();
                    if let Element::Text(text) = &mut updated {
                        text.content = value;
                    }
                    self.document.update_element(updated);
                }
            }
            EngineState::EditingTableCell { id, cell } => {
                if let Some(element) = self.document.element(id) {
                    let mut updated = element.clone();
                    if let Element::Table(table) = &mut updated {
                        table.set_cell(cell, value);
                    }
                    self.document.update_element(updated);
                }
            }
            _ => {}
        }
    }

    fn open_cell(&mut self, id: ElementId, cell: CellAddr) {
        let content = self
            .with_table(id, |t| t.cell(cell).unwrap_or_default().to_string())
            .unwrap_or_default();
        self.pending_edit = Some(content);
        self.state = EngineState::EditingTableCell { id, cell };
    }

    fn with_table<R>(&self, id: ElementId, f: impl FnOnce(&crate::elements::Table) -> R) -> Option<R> {
        self.document.element(id).and_then(|e| e.as_table()).map(f)
    }

    // ---- context menu ----

    /// "Delete" chosen from the context menu: removes the element and
    /// closes the menu.
    pub fn context_menu_delete(&mut self) {
        if let EngineState::ContextMenu { id, .. } = self.state {
            self.delete_element(id);
        }
    }

    // ---- store wrappers that keep interaction state consistent ----

    /// Delete an element, clearing the selection and the current-drawing
    /// reference when they pointed at it.
    pub fn delete_element(&mut self, id: ElementId) {
        self.document.delete_element(id);
        if self.current_drawing == Some(id) {
            self.current_drawing = None;
        }
        if self.selection() == Some(id) {
            self.state = EngineState::Idle;
        }
    }

    /// Move the selected element one step in paint order.
    pub fn move_selected(&mut self, direction: ZDirection) -> bool {
        match self.selection() {
            Some(id) => self.document.move_element(id, direction),
            None => false,
        }
    }

    // ---- external payloads ----

    /// Handle a drop from an external palette. Malformed or unknown
    /// payloads are logged and ignored, never surfaced to the user.
    pub fn drop_payload(&mut self, json: &str, at: Point) {
        match transfer::parse_drop_payload(json, at, &self.document) {
            Ok(element) => {
                let id = element.id();
                match self.document.add_element(element) {
                    Ok(()) => self.select(id),
                    Err(err) => log::warn!("dropped element rejected: {err}"),
                }
            }
            Err(err) => log::warn!("ignoring drop payload: {err}"),
        }
    }

    /// Place an uploaded image (already validated into a data URI).
    pub fn insert_image(&mut self, data_uri: String, at: Point) {
        let element = Element::Image(crate::elements::Image::new(at, data_uri));
        let id = element.id();
        match self.document.add_element(element) {
            Ok(()) => self.select(id),
            Err(err) => log::warn!("uploaded image rejected: {err}"),
        }
    }

    // ---- internals ----

    /// Select an element. Selecting any id implicitly ends an in-progress
    /// drawing session unless the id *is* the drawing.
    fn select(&mut self, id: ElementId) {
        if self.current_drawing != Some(id) {
            self.current_drawing = None;
        }
        self.state = EngineState::Selected(id);
    }

    fn begin_drawing(&mut self, at: Point) {
        let mut drawing = Drawing::new(at);
        drawing.color = self.document.default_text_color;
        let element = Element::Drawing(drawing);
        let id = element.id();
        match self.document.add_element(element) {
            Ok(()) => {
                self.current_drawing = Some(id);
                self.state = EngineState::Drawing(id);
            }
            Err(err) => log::warn!("failed to start drawing: {err}"),
        }
    }

    fn end_drawing(&mut self) {
        self.current_drawing = None;
        self.state = EngineState::Idle;
    }

    fn commit_position(&mut self, id: ElementId, position: Point) {
        if let Some(element) = self.document.element(id) {
            let mut updated = element.clone();
            updated.set_position(position);
            self.document.update_element(updated);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::elements::{HeaderMode, Shape, ShapeKind, Table, Text, HEADER_ROW};
    use crate::page::PageSize;

    fn engine() -> Engine {
        Engine::new(Document::new())
    }

    fn add_rect(engine: &mut Engine, x: f64, y: f64, w: f64, h: f64) -> ElementId {
        let mut shape = Shape::new(ShapeKind::Rectangle, Point::new(x, y));
        shape.width = w;
        shape.height = h;
        shape.fill = crate::elements::Color::white();
        let el = Element::Shape(shape);
        let id = el.id();
        engine.document.add_element(el).unwrap();
        id
    }

    #[test]
    fn test_text_tool_creates_and_selects() {
        let mut engine = engine();
        engine.set_tool(Tool::Text);
        engine.pointer_down(Point::new(50.0, 60.0), MouseButton::Left);

        assert_eq!(engine.document.active_page().len(), 1);
        let el = &engine.document.active_page().elements[0];
        assert_eq!(el.kind_name(), "text");
        assert_eq!(el.position(), Point::new(50.0, 60.0));
        assert_eq!(engine.selection(), Some(el.id()));
    }

    #[test]
    fn test_select_tool_on_empty_canvas_clears_selection() {
        let mut engine = engine();
        let id = add_rect(&mut engine, 0.0, 0.0, 50.0, 50.0);
        engine.pointer_down(Point::new(10.0, 10.0), MouseButton::Left);
        engine.pointer_up(Point::new(10.0, 10.0));
        assert_eq!(engine.selection(), Some(id));

        engine.pointer_down(Point::new(400.0, 400.0), MouseButton::Left);
        assert_eq!(engine.selection(), None);
        assert_eq!(engine.state(), EngineState::Idle);
    }

    #[test]
    fn test_click_selects_regardless_of_tool() {
        let mut engine = engine();
        let id = add_rect(&mut engine, 0.0, 0.0, 50.0, 50.0);
        engine.set_tool(Tool::Text);
        engine.pointer_down(Point::new(10.0, 10.0), MouseButton::Left);
        assert_eq!(engine.selection(), Some(id));
        // No new element was created on top of the existing one.
        assert_eq!(engine.document.active_page().len(), 1);
    }

    #[test]
    fn test_drag_commits_live() {
        let mut engine = engine();
        let id = add_rect(&mut engine, 100.0, 100.0, 50.0, 50.0);

        engine.pointer_down(Point::new(110.0, 120.0), MouseButton::Left);
        assert!(matches!(engine.state(), EngineState::Dragging { .. }));

        engine.pointer_move(Point::new(160.0, 170.0));
        // Live mode: the store already holds the moved position.
        assert_eq!(
            engine.document.element(id).unwrap().position(),
            Point::new(150.0, 150.0)
        );

        engine.pointer_up(Point::new(210.0, 220.0));
        assert_eq!(
            engine.document.element(id).unwrap().position(),
            Point::new(200.0, 200.0)
        );
        assert_eq!(engine.state(), EngineState::Selected(id));
    }

    #[test]
    fn test_drag_commits_on_release_only() {
        let mut engine = Engine::with_config(
            Document::new(),
            EngineConfig {
                drag_commit: DragCommit::OnRelease,
            },
        );
        let id = add_rect(&mut engine, 100.0, 100.0, 50.0, 50.0);

        engine.pointer_down(Point::new(110.0, 120.0), MouseButton::Left);
        engine.pointer_move(Point::new(160.0, 170.0));
        // Not committed yet.
        assert_eq!(
            engine.document.element(id).unwrap().position(),
            Point::new(100.0, 100.0)
        );

        engine.pointer_up(Point::new(160.0, 170.0));
        assert_eq!(
            engine.document.element(id).unwrap().position(),
            Point::new(150.0, 150.0)
        );
    }

    #[test]
    fn test_pointer_leave_ends_drag() {
        let mut engine = engine();
        let id = add_rect(&mut engine, 0.0, 0.0, 50.0, 50.0);
        engine.pointer_down(Point::new(10.0, 10.0), MouseButton::Left);
        engine.pointer_move(Point::new(30.0, 30.0));
        engine.pointer_leave();
        assert_eq!(engine.state(), EngineState::Selected(id));
    }

    #[test]
    fn test_pencil_tool_wins_over_element_grab() {
        let mut engine = engine();
        let rect_id = add_rect(&mut engine, 0.0, 0.0, 100.0, 100.0);
        engine.set_tool(Tool::Pencil);

        engine.pointer_down(Point::new(50.0, 50.0), MouseButton::Left);
        // A new drawing started instead of a drag on the rectangle.
        assert!(matches!(engine.state(), EngineState::Drawing(_)));
        let drawing_id = engine.current_drawing().unwrap();
        assert_ne!(drawing_id, rect_id);
        assert_eq!(engine.document.active_page().len(), 2);
    }

    #[test]
    fn test_drawing_accumulates_points_and_ends() {
        let mut engine = engine();
        engine.set_tool(Tool::Pencil);
        engine.pointer_down(Point::new(10.0, 10.0), MouseButton::Left);
        let id = engine.current_drawing().unwrap();

        engine.pointer_move(Point::new(20.0, 20.0));
        engine.pointer_move(Point::new(30.0, 25.0));

        let Element::Drawing(d) = engine.document.element(id).unwrap() else {
            panic!("expected drawing");
        };
        assert_eq!(d.len(), 3);
        assert_eq!(d.points[0], Point::new(10.0, 10.0));

        engine.pointer_up(Point::new(30.0, 25.0));
        assert_eq!(engine.current_drawing(), None);
        assert_eq!(engine.state(), EngineState::Idle);
    }

    #[test]
    fn test_drawings_are_not_draggable() {
        let mut engine = engine();
        engine.set_tool(Tool::Pencil);
        engine.pointer_down(Point::new(10.0, 10.0), MouseButton::Left);
        engine.pointer_move(Point::new(50.0, 10.0));
        engine.pointer_up(Point::new(50.0, 10.0));
        let id = engine.current_drawing.take();
        assert!(id.is_none());

        engine.set_tool(Tool::Select);
        engine.pointer_down(Point::new(30.0, 10.0), MouseButton::Left);
        // Selected, but no drag state for pencil geometry.
        assert!(matches!(engine.state(), EngineState::Selected(_)));
    }

    #[test]
    fn test_selecting_other_element_clears_drawing_reference() {
        let mut engine = engine();
        let rect_id = add_rect(&mut engine, 200.0, 200.0, 50.0, 50.0);
        engine.set_tool(Tool::Pencil);
        engine.pointer_down(Point::new(10.0, 10.0), MouseButton::Left);
        assert!(engine.current_drawing().is_some());

        // Ending via selection of another element (not pointer-up).
        engine.set_tool(Tool::Select);
        engine.pointer_down(Point::new(210.0, 210.0), MouseButton::Left);
        assert_eq!(engine.selection(), Some(rect_id));
        assert_eq!(engine.current_drawing(), None);
    }

    #[test]
    fn test_delete_key_removes_selection() {
        let mut engine = engine();
        let id = add_rect(&mut engine, 0.0, 0.0, 50.0, 50.0);
        engine.pointer_down(Point::new(10.0, 10.0), MouseButton::Left);
        engine.pointer_up(Point::new(10.0, 10.0));
        assert_eq!(engine.selection(), Some(id));

        engine.key_down(Key::Delete, Modifiers::NONE);
        assert!(engine.document.active_page().is_empty());
        assert_eq!(engine.state(), EngineState::Idle);
    }

    #[test]
    fn test_duplicate_shortcut() {
        let mut engine = engine();
        let id = add_rect(&mut engine, 10.0, 10.0, 50.0, 50.0);
        engine.pointer_down(Point::new(20.0, 20.0), MouseButton::Left);
        engine.pointer_up(Point::new(20.0, 20.0));

        engine.key_down(Key::Char('d'), Modifiers::command_only());
        assert_eq!(engine.document.active_page().len(), 2);
        let new_id = engine.selection().unwrap();
        assert_ne!(new_id, id);
        assert_eq!(
            engine.document.element(new_id).unwrap().position(),
            Point::new(30.0, 30.0)
        );
    }

    #[test]
    fn test_properties_shortcut_emits_effect() {
        let mut engine = engine();
        let id = add_rect(&mut engine, 0.0, 0.0, 50.0, 50.0);
        engine.pointer_down(Point::new(10.0, 10.0), MouseButton::Left);
        engine.pointer_up(Point::new(10.0, 10.0));

        let effect = engine.key_down(Key::Char('e'), Modifiers::command_only());
        assert_eq!(effect, Some(Effect::OpenProperties(id)));
    }

    #[test]
    fn test_tool_shortcuts() {
        let mut engine = engine();
        engine.key_down(Key::Char('t'), Modifiers::command_only());
        assert_eq!(engine.tool(), Tool::Text);
        engine.key_down(Key::Char('i'), Modifiers::command_only());
        assert_eq!(engine.tool(), Tool::Pencil);
    }

    #[test]
    fn test_double_click_opens_text_editing() {
        let mut engine = engine();
        let mut text = Text::new(Point::new(0.0, 0.0), "hello".into());
        text.width = 100.0;
        text.height = 40.0;
        let id = text.id;
        engine.document.add_element(Element::Text(text)).unwrap();

        engine.double_click(Point::new(10.0, 10.0));
        assert_eq!(engine.state(), EngineState::EditingText(id));

        engine.edit_input("edited".into());
        engine.key_down(Key::Enter, Modifiers::NONE);
        assert_eq!(engine.state(), EngineState::Selected(id));
        assert_eq!(
            engine.document.element(id).unwrap().as_text().unwrap().content,
            "edited"
        );
    }

    #[test]
    fn test_escape_discards_text_edit() {
        let mut engine = engine();
        let mut text = Text::new(Point::new(0.0, 0.0), "hello".into());
        text.width = 100.0;
        text.height = 40.0;
        let id = text.id;
        engine.document.add_element(Element::Text(text)).unwrap();

        engine.double_click(Point::new(10.0, 10.0));
        engine.edit_input("changed".into());
        engine.key_down(Key::Escape, Modifiers::NONE);
        assert_eq!(
            engine.document.element(id).unwrap().as_text().unwrap().content,
            "hello"
        );
        assert_eq!(engine.state(), EngineState::Selected(id));
    }

    #[test]
    fn test_delete_is_inert_during_text_edit() {
        let mut engine = engine();
        let mut text = Text::new(Point::new(0.0, 0.0), "hello".into());
        text.width = 100.0;
        text.height = 40.0;
        engine.document.add_element(Element::Text(text)).unwrap();

        engine.double_click(Point::new(10.0, 10.0));
        engine.key_down(Key::Delete, Modifiers::NONE);
        assert_eq!(engine.document.active_page().len(), 1);
    }

    fn table_engine() -> (Engine, ElementId) {
        let mut engine = engine();
        let mut table = Table::new(Point::new(0.0, 0.0), 3, 3);
        table.width = 300.0;
        table.height = 120.0;
        table.header_mode = HeaderMode::Row;
        let id = table.id;
        engine.document.add_element(Element::Table(table)).unwrap();
        (engine, id)
    }

    #[test]
    fn test_table_click_opens_cell() {
        let (mut engine, id) = table_engine();
        // 4 visual rows of 30pt; y=40 is body row 0, x=150 is column 1.
        engine.pointer_down(Point::new(150.0, 40.0), MouseButton::Left);
        engine.pointer_up(Point::new(150.0, 40.0));
        assert_eq!(
            engine.state(),
            EngineState::EditingTableCell {
                id,
                cell: CellAddr::new(0, 1)
            }
        );
    }

    #[test]
    fn test_tab_navigation_wraps_and_commits() {
        let (mut engine, id) = table_engine();
        engine.pointer_down(Point::new(290.0, 40.0), MouseButton::Left);
        engine.pointer_up(Point::new(290.0, 40.0));
        assert_eq!(
            engine.state(),
            EngineState::EditingTableCell {
                id,
                cell: CellAddr::new(0, 2)
            }
        );

        engine.edit_input("last".into());
        engine.key_down(Key::Tab, Modifiers::NONE);
        assert_eq!(
            engine.state(),
            EngineState::EditingTableCell {
                id,
                cell: CellAddr::new(1, 0)
            }
        );
        let table = engine.document.element(id).unwrap().as_table().unwrap();
        assert_eq!(table.cell(CellAddr::new(0, 2)), Some("last"));
    }

    #[test]
    fn test_shift_tab_reaches_header() {
        let (mut engine, id) = table_engine();
        engine.pointer_down(Point::new(10.0, 40.0), MouseButton::Left);
        engine.pointer_up(Point::new(10.0, 40.0));

        engine.key_down(Key::Tab, Modifiers::SHIFT);
        assert_eq!(
            engine.state(),
            EngineState::EditingTableCell {
                id,
                cell: CellAddr::new(HEADER_ROW, 2)
            }
        );
    }

    #[test]
    fn test_enter_moves_down_a_row() {
        let (mut engine, id) = table_engine();
        engine.pointer_down(Point::new(150.0, 40.0), MouseButton::Left);
        engine.pointer_up(Point::new(150.0, 40.0));

        engine.edit_input("v".into());
        engine.key_down(Key::Enter, Modifiers::NONE);
        assert_eq!(
            engine.state(),
            EngineState::EditingTableCell {
                id,
                cell: CellAddr::new(1, 1)
            }
        );
    }

    #[test]
    fn test_click_outside_closes_cell_edit_first() {
        let (mut engine, id) = table_engine();
        engine.pointer_down(Point::new(150.0, 40.0), MouseButton::Left);
        engine.pointer_up(Point::new(150.0, 40.0));
        engine.edit_input("kept".into());

        // The click is captured by the closing edit session; it does not
        // select anything else.
        engine.pointer_down(Point::new(500.0, 500.0), MouseButton::Left);
        assert_eq!(engine.state(), EngineState::Selected(id));
        let table = engine.document.element(id).unwrap().as_table().unwrap();
        assert_eq!(table.cell(CellAddr::new(0, 1)), Some("kept"));
    }

    #[test]
    fn test_context_menu_lifecycle() {
        let mut engine = engine();
        let id = add_rect(&mut engine, 0.0, 0.0, 50.0, 50.0);

        engine.pointer_down(Point::new(10.0, 10.0), MouseButton::Right);
        assert!(matches!(engine.state(), EngineState::ContextMenu { .. }));
        assert_eq!(engine.selection(), Some(id));

        // Escape closes only the menu, selection survives.
        engine.key_down(Key::Escape, Modifiers::NONE);
        assert_eq!(engine.state(), EngineState::Selected(id));

        // Escape again clears the selection.
        engine.key_down(Key::Escape, Modifiers::NONE);
        assert_eq!(engine.state(), EngineState::Idle);
    }

    #[test]
    fn test_context_menu_delete() {
        let mut engine = engine();
        add_rect(&mut engine, 0.0, 0.0, 50.0, 50.0);
        engine.pointer_down(Point::new(10.0, 10.0), MouseButton::Right);
        engine.context_menu_delete();
        assert!(engine.document.active_page().is_empty());
        assert_eq!(engine.state(), EngineState::Idle);
    }

    #[test]
    fn test_drop_payload_shape() {
        let mut engine = engine();
        engine.drop_payload(
            r#"{"type":"shape","shapeType":"circle"}"#,
            Point::new(10.0, 10.0),
        );
        assert_eq!(engine.document.active_page().len(), 1);
        let el = &engine.document.active_page().elements[0];
        let Element::Shape(shape) = el else {
            panic!("expected shape");
        };
        assert_eq!(shape.kind, ShapeKind::Circle);
        assert_eq!(shape.position, Point::new(10.0, 10.0));
        assert_eq!(engine.selection(), Some(el.id()));
    }

    #[test]
    fn test_drop_payload_garbage_is_ignored() {
        let _ = env_logger::builder().is_test(true).try_init();
        let mut engine = engine();
        engine.drop_payload("not json at all", Point::new(10.0, 10.0));
        engine.drop_payload(r#"{"type":"rocket"}"#, Point::new(10.0, 10.0));
        assert!(engine.document.active_page().is_empty());
    }

    #[test]
    fn test_insert_image_selects() {
        let mut engine = engine();
        engine.insert_image("data:image/png;base64,AAAA".into(), Point::new(5.0, 5.0));
        assert_eq!(engine.document.active_page().len(), 1);
        assert!(engine.selection().is_some());
    }

    #[test]
    fn test_page_dimensions_follow_settings() {
        let mut engine = engine();
        engine.document.page_size = PageSize::A4;
        let dims = engine.document.page_dimensions();
        assert_eq!((dims.width, dims.height), (595.0, 842.0));
    }
}

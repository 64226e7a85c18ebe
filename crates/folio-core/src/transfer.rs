//! External payload boundaries: palette drops and image uploads.
//!
//! Drag sources describe the element to create as a small JSON object; a
//! tolerant parser maps it onto a defaulted element at the drop point.
//! Uploaded images are validated by MIME type and inlined as data URIs so
//! documents stay self-contained.

use crate::document::Document;
use crate::elements::{
    CellAddr, Element, HeaderMode, Shape, ShapeKind, Table, TableStyle, Text,
};
use crate::error::DocumentError;
use base64::Engine as _;
use kurbo::Point;
use serde_json::Value;

/// Parse a palette drop payload into a new element at `at`.
///
/// Recognized payloads: `{"type":"text"}`, `{"type":"shape","shapeType":...}`
/// and `{"type":"table","rows":...,"columns":...}`. Missing optional fields
/// fall back to the same defaults the toolbar uses.
pub fn parse_drop_payload(
    json: &str,
    at: Point,
    doc: &Document,
) -> Result<Element, DocumentError> {
    let value: Value = serde_json::from_str(json)
        .map_err(|e| DocumentError::InvalidDropPayload(e.to_string()))?;
    let kind = value
        .get("type")
        .and_then(Value::as_str)
        .ok_or_else(|| DocumentError::InvalidDropPayload("missing \"type\" field".into()))?;

    match kind {
        "text" => {
            let mut text = Text::new(at, String::new());
            text.color = doc.default_text_color;
            text.font_family = doc.default_font_family;
            text.font_size = doc.default_font_size;
            if let Some(content) = value.get("content").and_then(Value::as_str) {
                text.content = content.to_string();
            }
            Ok(Element::Text(text))
        }
        "shape" => {
            let shape_kind = match value.get("shapeType").and_then(Value::as_str) {
                Some("circle") => ShapeKind::Circle,
                Some("line") => ShapeKind::Line,
                Some("rectangle") | None => ShapeKind::Rectangle,
                Some(other) => {
                    return Err(DocumentError::InvalidDropPayload(format!(
                        "unknown shape type {other:?}"
                    )));
                }
            };
            Ok(Element::Shape(Shape::new(shape_kind, at)))
        }
        "table" => {
            let rows = value
                .get("rows")
                .and_then(Value::as_u64)
                .map_or(3, |n| n.max(1) as usize);
            let columns = value
                .get("columns")
                .and_then(Value::as_u64)
                .map_or(3, |n| n.max(1) as usize);
            let mut table = Table::new(at, rows, columns);
            // Optional presentation fields; unrecognized values keep defaults.
            match value.get("headerType").and_then(Value::as_str) {
                Some("none") => table.header_mode = HeaderMode::None,
                Some("row") => table.header_mode = HeaderMode::Row,
                _ => {}
            }
            match value.get("tableStyle").and_then(Value::as_str) {
                Some("default") => table.style = TableStyle::Default,
                Some("striped") => table.style = TableStyle::Striped,
                Some("minimal") => table.style = TableStyle::Minimal,
                _ => {}
            }
            if let Some(data) = value.get("data") {
                seed_table_data(&mut table, data);
            }
            Ok(Element::Table(table))
        }
        other => Err(DocumentError::InvalidDropPayload(format!(
            "unknown element type {other:?}"
        ))),
    }
}

/// Fill a table's grid from a payload `data` object (`headers` + `rows`
/// string arrays), clamped to the table's declared dimensions.
fn seed_table_data(table: &mut Table, data: &Value) {
    if let Some(headers) = data.get("headers").and_then(Value::as_array) {
        for (col, header) in headers.iter().enumerate().take(table.columns) {
            if let Some(text) = header.as_str() {
                table.data.headers[col] = text.to_string();
            }
        }
    }
    if let Some(rows) = data.get("rows").and_then(Value::as_array) {
        for (row, cells) in rows.iter().enumerate().take(table.rows) {
            let Some(cells) = cells.as_array() else {
                continue;
            };
            for (col, cell) in cells.iter().enumerate().take(table.columns) {
                if let Some(text) = cell.as_str() {
                    table.set_cell(CellAddr::new(row as i32, col), text.to_string());
                }
            }
        }
    }
}

/// Validate an uploaded file and inline it as a base64 data URI.
///
/// Accepts anything with an `image/*` MIME type; SVG sneaks through some
/// browsers as `text/svg+xml`, so any type mentioning svg is accepted too.
pub fn validate_image_upload(mime: &str, bytes: &[u8]) -> Result<String, DocumentError> {
    if !(mime.starts_with("image/") || mime.contains("svg")) {
        return Err(DocumentError::UnsupportedFileType(mime.to_string()));
    }
    let encoded = base64::engine::general_purpose::STANDARD.encode(bytes);
    Ok(format!("data:{mime};base64,{encoded}"))
}

//! Divider element.

use super::{Color, ElementId, ElementMeta};
use kurbo::Point;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Line style of a divider.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DividerStyle {
    #[default]
    Solid,
    Dashed,
    Dotted,
}

/// A horizontal rule separating content.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Divider {
    pub(crate) id: ElementId,
    /// Left end of the rule.
    pub position: Point,
    pub width: f64,
    /// Vertical extent of the hit area; the rule itself uses `thickness`.
    pub height: f64,
    pub style: DividerStyle,
    pub thickness: f64,
    pub color: Color,
    #[serde(default)]
    pub meta: ElementMeta,
}

impl Divider {
    pub fn new(position: Point) -> Self {
        Self {
            id: Uuid::new_v4(),
            position,
            width: 300.0,
            height: 8.0,
            style: DividerStyle::default(),
            thickness: 1.0,
            color: Color::new(120, 120, 120, 255),
            meta: ElementMeta::default(),
        }
    }
}

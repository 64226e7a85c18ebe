//! Form control element.

use super::{ElementId, ElementMeta};
use kurbo::Point;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Kind of input-like control.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FormControl {
    #[default]
    TextInput,
    TextArea,
    Checkbox,
    Select,
}

/// An input-like control placed on the page.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Form {
    pub(crate) id: ElementId,
    /// Top-left corner position.
    pub position: Point,
    pub width: f64,
    pub height: f64,
    pub control: FormControl,
    pub label: String,
    #[serde(default)]
    pub placeholder: String,
    /// Options for `Select` controls; unused otherwise.
    #[serde(default)]
    pub options: Vec<String>,
    #[serde(default)]
    pub meta: ElementMeta,
}

impl Form {
    pub fn new(control: FormControl, position: Point) -> Self {
        let height = match control {
            FormControl::TextArea => 80.0,
            FormControl::Checkbox => 24.0,
            _ => 36.0,
        };
        Self {
            id: Uuid::new_v4(),
            position,
            width: 220.0,
            height,
            control,
            label: String::new(),
            placeholder: String::new(),
            options: Vec::new(),
            meta: ElementMeta::default(),
        }
    }
}

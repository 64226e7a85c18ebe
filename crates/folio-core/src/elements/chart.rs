//! Chart element.

use super::{Color, ElementId, ElementMeta};
use kurbo::Point;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Kind of chart.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChartKind {
    #[default]
    Bar,
    Line,
    Pie,
    Doughnut,
    Area,
}

impl ChartKind {
    /// Human-readable lowercase name, matching the wire form.
    pub fn label(&self) -> &'static str {
        match self {
            ChartKind::Bar => "bar",
            ChartKind::Line => "line",
            ChartKind::Pie => "pie",
            ChartKind::Doughnut => "doughnut",
            ChartKind::Area => "area",
        }
    }
}

/// One labeled series of numeric values.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Dataset {
    pub label: String,
    pub values: Vec<f64>,
    /// Series color; falls back to the chart palette when absent.
    #[serde(default)]
    pub color: Option<Color>,
}

/// Labels plus one or more datasets.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ChartData {
    pub labels: Vec<String>,
    pub datasets: Vec<Dataset>,
}

/// A chart placed on the page.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Chart {
    pub(crate) id: ElementId,
    /// Top-left corner position.
    pub position: Point,
    pub width: f64,
    pub height: f64,
    pub kind: ChartKind,
    pub data: ChartData,
    #[serde(default = "default_true")]
    pub show_axes: bool,
    #[serde(default = "default_true")]
    pub show_grid: bool,
    /// Fallback color palette cycled across datasets.
    pub palette: Vec<Color>,
    #[serde(default)]
    pub meta: ElementMeta,
}

fn default_true() -> bool {
    true
}

impl Chart {
    /// Create a chart with a small sample dataset.
    pub fn new(kind: ChartKind, position: Point) -> Self {
        Self {
            id: Uuid::new_v4(),
            position,
            width: 320.0,
            height: 200.0,
            kind,
            data: ChartData {
                labels: vec!["A".into(), "B".into(), "C".into()],
                datasets: vec![Dataset {
                    label: "Series 1".into(),
                    values: vec![3.0, 5.0, 2.0],
                    color: None,
                }],
            },
            show_axes: true,
            show_grid: true,
            palette: vec![
                Color::new(54, 162, 235, 255),
                Color::new(255, 99, 132, 255),
                Color::new(255, 206, 86, 255),
                Color::new(75, 192, 192, 255),
            ],
            meta: ElementMeta::default(),
        }
    }

    /// Color for the dataset at `index`: its own color, else the palette.
    pub fn series_color(&self, index: usize) -> Color {
        self.data
            .datasets
            .get(index)
            .and_then(|d| d.color)
            .unwrap_or_else(|| {
                if self.palette.is_empty() {
                    Color::black()
                } else {
                    self.palette[index % self.palette.len()]
                }
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_series_color_falls_back_to_palette() {
        let chart = Chart::new(ChartKind::Bar, Point::ZERO);
        assert_eq!(chart.series_color(0), chart.palette[0]);
        // Palette wraps for out-of-range series.
        assert_eq!(chart.series_color(5), chart.palette[5 % chart.palette.len()]);
    }
}

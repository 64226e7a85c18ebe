//! Table element with editable cell grid.

use super::{Color, ElementId, ElementMeta};
use kurbo::Point;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Row index sentinel for the header row.
pub const HEADER_ROW: i32 = -1;

/// Whether the table renders a header row.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum HeaderMode {
    None,
    #[default]
    Row,
}

/// Visual preset for the table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TableStyle {
    #[default]
    Default,
    Striped,
    Minimal,
}

/// Address of a single cell. `row == HEADER_ROW` targets the header.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CellAddr {
    pub row: i32,
    pub col: usize,
}

impl CellAddr {
    pub fn new(row: i32, col: usize) -> Self {
        Self { row, col }
    }
}

/// The cell grid backing a table.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TableData {
    pub headers: Vec<String>,
    pub rows: Vec<Vec<String>>,
}

/// A table placed on the page.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Table {
    pub(crate) id: ElementId,
    /// Top-left corner position.
    pub position: Point,
    pub width: f64,
    pub height: f64,
    /// Number of body rows (the header row is not counted).
    pub rows: usize,
    pub columns: usize,
    pub header_mode: HeaderMode,
    #[serde(default)]
    pub style: TableStyle,
    pub data: TableData,
    pub border_color: Color,
    pub header_color: Color,
    pub row_color: Color,
    #[serde(default)]
    pub meta: ElementMeta,
}

impl Table {
    /// Create a table with the given grid dimensions, padded with empty cells.
    pub fn new(position: Point, rows: usize, columns: usize) -> Self {
        let mut table = Self {
            id: Uuid::new_v4(),
            position,
            width: 300.0,
            height: 120.0,
            rows,
            columns,
            header_mode: HeaderMode::default(),
            style: TableStyle::default(),
            data: TableData::default(),
            border_color: Color::new(160, 160, 160, 255),
            header_color: Color::new(235, 235, 235, 255),
            row_color: Color::white(),
            meta: ElementMeta::default(),
        };
        table.set_dimensions(rows, columns);
        table
    }

    /// Resize the grid. Shrinking truncates, growing pads with empty strings;
    /// `rows`/`columns` always match the data dimensions afterwards.
    pub fn set_dimensions(&mut self, rows: usize, columns: usize) {
        self.rows = rows;
        self.columns = columns;
        self.data.headers.resize(columns, String::new());
        self.data.rows.resize(rows, Vec::new());
        for row in &mut self.data.rows {
            row.resize(columns, String::new());
        }
    }

    /// Smallest reachable row index (`HEADER_ROW` when a header is shown).
    pub fn min_row(&self) -> i32 {
        match self.header_mode {
            HeaderMode::None => 0,
            HeaderMode::Row => HEADER_ROW,
        }
    }

    /// Check that an address lies within the grid.
    pub fn cell_in_range(&self, addr: CellAddr) -> bool {
        addr.col < self.columns && addr.row >= self.min_row() && addr.row < self.rows as i32
    }

    pub fn cell(&self, addr: CellAddr) -> Option<&str> {
        if !self.cell_in_range(addr) {
            return None;
        }
        if addr.row == HEADER_ROW {
            self.data.headers.get(addr.col).map(String::as_str)
        } else {
            self.data
                .rows
                .get(addr.row as usize)
                .and_then(|r| r.get(addr.col))
                .map(String::as_str)
        }
    }

    /// Write a cell value. Out-of-range addresses are ignored.
    pub fn set_cell(&mut self, addr: CellAddr, value: String) {
        if !self.cell_in_range(addr) {
            return;
        }
        if addr.row == HEADER_ROW {
            if let Some(cell) = self.data.headers.get_mut(addr.col) {
                *cell = value;
            }
        } else if let Some(cell) = self
            .data
            .rows
            .get_mut(addr.row as usize)
            .and_then(|r| r.get_mut(addr.col))
        {
            *cell = value;
        }
    }

    /// Next cell for Tab navigation: advance one column, wrapping to the next
    /// row's first column. Clamped at the last reachable cell.
    pub fn next_cell(&self, addr: CellAddr) -> CellAddr {
        if addr.col + 1 < self.columns {
            return CellAddr::new(addr.row, addr.col + 1);
        }
        if addr.row + 1 < self.rows as i32 {
            return CellAddr::new(addr.row + 1, 0);
        }
        addr
    }

    /// Previous cell for Shift+Tab: back one column, wrapping to the previous
    /// row's last column. The header row is reachable only when shown.
    pub fn prev_cell(&self, addr: CellAddr) -> CellAddr {
        if addr.col > 0 {
            return CellAddr::new(addr.row, addr.col - 1);
        }
        if addr.row - 1 >= self.min_row() {
            return CellAddr::new(addr.row - 1, self.columns.saturating_sub(1));
        }
        addr
    }

    /// Cell one row down in the same column (Enter navigation), clamped.
    pub fn cell_below(&self, addr: CellAddr) -> CellAddr {
        if addr.row + 1 < self.rows as i32 {
            CellAddr::new(addr.row + 1, addr.col)
        } else {
            addr
        }
    }

    /// Map a point (page-local units) inside the table bounds to a cell
    /// address. Rows share the height evenly, header included.
    pub fn cell_at(&self, point: Point) -> Option<CellAddr> {
        if self.columns == 0 {
            return None;
        }
        let dx = point.x - self.position.x;
        let dy = point.y - self.position.y;
        if dx < 0.0 || dy < 0.0 || dx > self.width || dy > self.height {
            return None;
        }
        let header_rows = match self.header_mode {
            HeaderMode::None => 0,
            HeaderMode::Row => 1,
        };
        let total_rows = self.rows + header_rows;
        if total_rows == 0 {
            return None;
        }
        let row_h = self.height / total_rows as f64;
        let col_w = self.width / self.columns as f64;
        let visual_row = ((dy / row_h) as usize).min(total_rows - 1);
        let col = ((dx / col_w) as usize).min(self.columns - 1);
        let row = visual_row as i32 - header_rows as i32;
        Some(CellAddr::new(row, col))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_dimensions_pad_and_truncate() {
        let mut table = Table::new(Point::ZERO, 2, 2);
        table.set_cell(CellAddr::new(0, 0), "a".into());
        table.set_cell(CellAddr::new(1, 1), "b".into());

        table.set_dimensions(3, 3);
        assert_eq!(table.data.rows.len(), 3);
        assert_eq!(table.data.rows[0].len(), 3);
        assert_eq!(table.cell(CellAddr::new(0, 0)), Some("a"));
        assert_eq!(table.cell(CellAddr::new(2, 2)), Some(""));

        table.set_dimensions(1, 1);
        assert_eq!(table.data.rows.len(), 1);
        assert_eq!(table.data.headers.len(), 1);
        assert_eq!(table.cell(CellAddr::new(0, 0)), Some("a"));
        assert_eq!(table.cell(CellAddr::new(1, 1)), None);
    }

    #[test]
    fn test_tab_wraps_columns() {
        let table = Table::new(Point::ZERO, 3, 3);
        let next = table.next_cell(CellAddr::new(0, 2));
        assert_eq!(next, CellAddr::new(1, 0));
    }

    #[test]
    fn test_tab_clamps_at_last_cell() {
        let table = Table::new(Point::ZERO, 2, 2);
        let last = CellAddr::new(1, 1);
        assert_eq!(table.next_cell(last), last);
    }

    #[test]
    fn test_shift_tab_reaches_header_only_with_header_mode() {
        let mut table = Table::new(Point::ZERO, 3, 3);
        table.header_mode = HeaderMode::Row;
        assert_eq!(
            table.prev_cell(CellAddr::new(0, 0)),
            CellAddr::new(HEADER_ROW, 2)
        );

        table.header_mode = HeaderMode::None;
        assert_eq!(table.prev_cell(CellAddr::new(0, 0)), CellAddr::new(0, 0));
    }

    #[test]
    fn test_enter_moves_down_clamped() {
        let table = Table::new(Point::ZERO, 2, 2);
        assert_eq!(table.cell_below(CellAddr::new(0, 1)), CellAddr::new(1, 1));
        assert_eq!(table.cell_below(CellAddr::new(1, 1)), CellAddr::new(1, 1));
    }

    #[test]
    fn test_header_cell_read_write() {
        let mut table = Table::new(Point::ZERO, 2, 2);
        table.set_cell(CellAddr::new(HEADER_ROW, 1), "col".into());
        assert_eq!(table.cell(CellAddr::new(HEADER_ROW, 1)), Some("col"));
    }

    #[test]
    fn test_cell_at_maps_rows_and_header() {
        let mut table = Table::new(Point::new(0.0, 0.0), 2, 2);
        table.width = 200.0;
        table.height = 90.0; // 3 visual rows of 30 with header
        table.header_mode = HeaderMode::Row;

        assert_eq!(
            table.cell_at(Point::new(10.0, 10.0)),
            Some(CellAddr::new(HEADER_ROW, 0))
        );
        assert_eq!(
            table.cell_at(Point::new(150.0, 40.0)),
            Some(CellAddr::new(0, 1))
        );
        assert_eq!(
            table.cell_at(Point::new(150.0, 80.0)),
            Some(CellAddr::new(1, 1))
        );
        assert_eq!(table.cell_at(Point::new(300.0, 10.0)), None);
    }
}

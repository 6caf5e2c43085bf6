//! Uniform cell grid with merged ranges resolved

use std::borrow::Cow;

static EMPTY: CellValue = CellValue::Empty;

/// A single spreadsheet cell value
#[derive(Debug, Clone, PartialEq, Default)]
pub enum CellValue {
    #[default]
    Empty,
    Text(String),
    Number(f64),
    Bool(bool),
}

impl CellValue {
    pub fn is_empty(&self) -> bool {
        match self {
            CellValue::Empty => true,
            CellValue::Text(s) => s.trim().is_empty(),
            _ => false,
        }
    }

    /// Text as a user reads it in the sheet; integral numbers drop the `.0`
    pub fn as_text(&self) -> Option<Cow<'_, str>> {
        match self {
            CellValue::Empty => None,
            CellValue::Text(s) => Some(Cow::Borrowed(s.trim())),
            CellValue::Number(n) if n.fract() == 0.0 && n.abs() < 1e15 => {
                Some(Cow::Owned(format!("{}", *n as i64)))
            }
            CellValue::Number(n) => Some(Cow::Owned(n.to_string())),
            CellValue::Bool(b) => Some(Cow::Owned(b.to_string())),
        }
    }

    /// Numeric value, accepting decimal comma in text cells; NaN when missing
    pub fn as_number(&self) -> f64 {
        match self {
            CellValue::Number(n) => *n,
            CellValue::Text(s) => s.trim().replace(',', ".").parse().unwrap_or(f64::NAN),
            CellValue::Empty | CellValue::Bool(_) => f64::NAN,
        }
    }
}

impl From<&str> for CellValue {
    fn from(s: &str) -> Self {
        CellValue::Text(s.to_string())
    }
}

impl From<f64> for CellValue {
    fn from(n: f64) -> Self {
        CellValue::Number(n)
    }
}

/// Inclusive merged cell region, 0-based
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MergedRange {
    pub start: (usize, usize),
    pub end: (usize, usize),
}

impl MergedRange {
    pub fn new(start: (usize, usize), end: (usize, usize)) -> Self {
        Self { start, end }
    }
}

/// Rectangular (row, column) grid of cell values
#[derive(Debug, Clone, PartialEq)]
pub struct Grid {
    rows: usize,
    cols: usize,
    cells: Vec<CellValue>,
}

impl Grid {
    /// Empty grid of the given size
    pub fn new(rows: usize, cols: usize) -> Self {
        Self {
            rows,
            cols,
            cells: vec![CellValue::Empty; rows * cols],
        }
    }

    /// Build from row vectors; short rows are padded with empty cells
    pub fn from_rows(rows: Vec<Vec<CellValue>>) -> Self {
        let cols = rows.iter().map(Vec::len).max().unwrap_or(0);
        let mut grid = Self::new(rows.len(), cols);
        for (r, row) in rows.into_iter().enumerate() {
            for (c, value) in row.into_iter().enumerate() {
                grid.set(r, c, value);
            }
        }
        grid
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn cols(&self) -> usize {
        self.cols
    }

    /// Cell at (row, col); out-of-range positions read as empty
    pub fn get(&self, row: usize, col: usize) -> &CellValue {
        if row < self.rows && col < self.cols {
            &self.cells[row * self.cols + col]
        } else {
            &EMPTY
        }
    }

    /// Set a cell; writes outside the grid are ignored
    pub fn set(&mut self, row: usize, col: usize, value: CellValue) {
        if row < self.rows && col < self.cols {
            self.cells[row * self.cols + col] = value;
        }
    }

    /// Copy each range's top-left value into every cell it covers
    pub fn resolve_merges(&mut self, merges: &[MergedRange]) {
        for merge in merges {
            let value = self.get(merge.start.0, merge.start.1).clone();
            for r in merge.start.0..=merge.end.0 {
                for c in merge.start.1..=merge.end.1 {
                    self.set(r, c, value.clone());
                }
            }
        }
    }
}

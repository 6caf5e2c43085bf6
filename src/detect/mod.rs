//! Profile table detection inside a loosely structured sheet grid
//!
//! Each supported layout is an independent function `&Grid -> Option<ProfileTable>`.
//! [`detect`] tries them in order and keeps the first non-empty result:
//!
//! 1. [`Layout::VerticalBlocks`] - month label, day-type label, 24 values stacked in a column
//! 2. [`Layout::WideMatrix`] - month header row, day-type header row, hour-index column
//! 3. [`Layout::RowTable`] - `Monat | Typ | 0 ... 23` with one profile per row

mod fill;
pub mod labels;
mod row_table;
mod vertical;
mod wide;

pub use fill::{build_profile, fill_gaps};

use crate::error::{SlpError, SlpResult};
use crate::excel::Grid;
use crate::types::ProfileTable;
use std::fmt;
use tracing::{debug, info};

/// Minimum finite values (of 24) for a block or row to be accepted
pub(crate) const MIN_FINITE_VALUES: usize = 20;

/// Table shape a profile table was read from
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Layout {
    VerticalBlocks,
    WideMatrix,
    RowTable,
}

impl fmt::Display for Layout {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Layout::VerticalBlocks => "vertical blocks",
            Layout::WideMatrix => "wide matrix",
            Layout::RowTable => "row table",
        })
    }
}

type Strategy = fn(&Grid) -> Option<ProfileTable>;

const STRATEGIES: [(Layout, Strategy); 3] = [
    (Layout::VerticalBlocks, vertical::detect),
    (Layout::WideMatrix, wide::detect),
    (Layout::RowTable, row_table::detect),
];

/// Result of a successful detection
#[derive(Debug, Clone, PartialEq)]
pub struct Detection {
    pub layout: Layout,
    pub table: ProfileTable,
}

/// First layout that yields a non-empty table
pub fn detect(grid: &Grid) -> Option<Detection> {
    STRATEGIES.iter().find_map(|&(layout, strategy)| {
        let found = strategy(grid);
        if found.is_none() {
            debug!(%layout, "layout not recognized");
        }
        found.map(|table| Detection { layout, table })
    })
}

/// [`detect`], failing with [`SlpError::LayoutNotDetected`] for `sheet`
pub fn detect_sheet(grid: &Grid, sheet: &str) -> SlpResult<Detection> {
    let detection = detect(grid).ok_or_else(|| SlpError::LayoutNotDetected {
        sheet: sheet.to_string(),
    })?;
    info!(
        sheet,
        layout = %detection.layout,
        profiles = detection.table.len(),
        "profile table detected"
    );
    Ok(detection)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::excel::CellValue;

    #[test]
    fn test_detect_reports_layout() {
        let mut rows: Vec<Vec<CellValue>> = Vec::new();
        rows.push(vec!["Januar".into()]);
        rows.push(vec!["WT".into()]);
        rows.extend((0..24).map(|_| vec![CellValue::Number(1.0)]));
        let grid = Grid::from_rows(rows);

        let detection = detect(&grid).unwrap();
        assert_eq!(detection.layout, Layout::VerticalBlocks);
    }

    #[test]
    fn test_unrecognized_sheet_fails() {
        let grid = Grid::from_rows(vec![vec!["Hallo".into(), 1.0.into()]]);
        let err = detect_sheet(&grid, "Deckblatt").unwrap_err();
        assert!(matches!(err, SlpError::LayoutNotDetected { ref sheet } if sheet == "Deckblatt"));
        assert!(err.to_string().contains("Deckblatt"));
    }

    #[test]
    fn test_empty_grid_fails() {
        assert!(detect(&Grid::new(0, 0)).is_none());
    }
}

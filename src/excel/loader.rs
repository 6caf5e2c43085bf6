//! Workbook → Grid loading via calamine

use crate::error::{SlpError, SlpResult};
use crate::excel::grid::{CellValue, Grid, MergedRange};
use calamine::{open_workbook, Data, Reader, Xlsx};
use std::fs::File;
use std::io::BufReader;
use std::path::{Path, PathBuf};
use tracing::debug;

/// Reads one worksheet of an .xlsx workbook into a [`Grid`]
pub struct GridLoader {
    path: PathBuf,
}

impl GridLoader {
    pub fn new<P: AsRef<Path>>(path: P) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
        }
    }

    fn open(&self) -> SlpResult<Xlsx<BufReader<File>>> {
        open_workbook(&self.path).map_err(|e| {
            SlpError::Workbook(format!(
                "Failed to open Excel file {}: {}",
                self.path.display(),
                e
            ))
        })
    }

    /// Sheet names in workbook order
    pub fn sheet_names(&self) -> SlpResult<Vec<String>> {
        Ok(self.open()?.sheet_names().to_vec())
    }

    /// Load `sheet` with merged ranges resolved
    pub fn load(&self, sheet: &str) -> SlpResult<Grid> {
        let mut workbook = self.open()?;

        let available = workbook.sheet_names().to_vec();
        if !available.iter().any(|name| name == sheet) {
            return Err(SlpError::SheetNotFound {
                sheet: sheet.to_string(),
                available,
            });
        }

        let range = workbook
            .worksheet_range(sheet)
            .map_err(|e| SlpError::Workbook(format!("Failed to read sheet '{}': {}", sheet, e)))?;

        let merges: Vec<MergedRange> = match workbook.worksheet_merge_cells(sheet) {
            Some(Ok(regions)) => regions
                .iter()
                .map(|d| {
                    MergedRange::new(
                        (d.start.0 as usize, d.start.1 as usize),
                        (d.end.0 as usize, d.end.1 as usize),
                    )
                })
                .collect(),
            Some(Err(e)) => {
                return Err(SlpError::Workbook(format!(
                    "Failed to read merged regions of '{}': {}",
                    sheet, e
                )))
            }
            None => Vec::new(),
        };

        // Sized to the full sheet extent, not just the used range
        let (mut rows, mut cols) = range
            .end()
            .map(|(r, c)| (r as usize + 1, c as usize + 1))
            .unwrap_or((0, 0));
        for merge in &merges {
            rows = rows.max(merge.end.0 + 1);
            cols = cols.max(merge.end.1 + 1);
        }

        let mut grid = Grid::new(rows, cols);
        if let Some((row0, col0)) = range.start() {
            for (r, c, cell) in range.cells() {
                grid.set(row0 as usize + r, col0 as usize + c, convert_cell(cell));
            }
        }
        grid.resolve_merges(&merges);

        debug!(
            sheet,
            rows,
            cols,
            merged = merges.len(),
            "loaded worksheet grid"
        );
        Ok(grid)
    }
}

/// Map a calamine cell to a [`CellValue`]
///
/// Time-of-day cells become `"HH:MM"` text so hour labels read the same
/// whether typed as text or formatted as time. Serial 1.0 is `24:00`.
fn convert_cell(cell: &Data) -> CellValue {
    match cell {
        Data::Empty | Data::Error(_) => CellValue::Empty,
        Data::String(s) => CellValue::Text(s.clone()),
        Data::Float(f) => CellValue::Number(*f),
        Data::Int(i) => CellValue::Number(*i as f64),
        Data::Bool(b) => CellValue::Bool(*b),
        Data::DateTime(dt) => {
            let serial = dt.as_f64();
            if (0.0..=1.0).contains(&serial) {
                let minutes = (serial * 1440.0).round() as i64;
                CellValue::Text(format!("{:02}:{:02}", minutes / 60, minutes % 60))
            } else {
                CellValue::Number(serial)
            }
        }
        Data::DateTimeIso(s) | Data::DurationIso(s) => CellValue::Text(s.clone()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_convert_cell_basic() {
        assert_eq!(convert_cell(&Data::Empty), CellValue::Empty);
        assert_eq!(convert_cell(&Data::Int(3)), CellValue::Number(3.0));
        assert_eq!(
            convert_cell(&Data::String("WT".to_string())),
            CellValue::Text("WT".to_string())
        );
    }

    #[test]
    fn test_missing_workbook_is_workbook_error() {
        let loader = GridLoader::new("does-not-exist.xlsx");
        let err = loader.load("H25").unwrap_err();
        assert!(matches!(err, SlpError::Workbook(_)));
    }
}

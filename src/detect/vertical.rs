//! Vertical blocks: month label, day-type label, then 24 hourly values below

use super::{fill, labels, MIN_FINITE_VALUES};
use crate::excel::Grid;
use crate::types::{ProfileTable, HOURS_PER_DAY};
use tracing::debug;

/// Month row + day-type row + 24 value rows
const BLOCK_ROWS: usize = 2 + HOURS_PER_DAY;

/// Scan every cell for a stacked month/day-type block
///
/// Blocks later in scan order (row-major) replace earlier ones with the same
/// (month, day-type) key.
pub fn detect(grid: &Grid) -> Option<ProfileTable> {
    if grid.rows() < BLOCK_ROWS {
        return None;
    }

    let mut table = ProfileTable::new();
    for r in 0..=grid.rows() - BLOCK_ROWS {
        for c in 0..grid.cols() {
            let Some(month) = labels::month(grid.get(r, c)) else {
                continue;
            };
            let Some(day_type) = labels::day_type(grid.get(r + 1, c)) else {
                continue;
            };

            let raw = (0..HOURS_PER_DAY).map(|i| grid.get(r + 2 + i, c).as_number());
            let (profile, finite) = fill::build_profile(raw);
            if finite < MIN_FINITE_VALUES {
                debug!(row = r, col = c, finite, "vertical block rejected: too few numbers");
                continue;
            }
            debug!(row = r, col = c, %month, %day_type, "vertical block accepted");
            table.insert(month, day_type, profile);
        }
    }

    (!table.is_empty()).then_some(table)
}

//! Wide matrix: a month header row, a day-type header row below it, an
//! hour-index column on the side and one data column per (month, day-type)
//!
//! ```text
//!          |  Januar          |  Februar         | ...
//!          |  WT  | SA  | SO  |  WT  | SA  | SO  |
//!   00:00  | 0.12 | ... | ... | ...              |
//!   01:00  | ...                                 |
//! ```

use super::{fill, labels};
use crate::excel::Grid;
use crate::types::{DayType, MonthKey, ProfileTable, HOURS_PER_DAY};
use std::collections::BTreeSet;
use std::ops::Range;
use tracing::debug;

const HEADER_SEARCH_ROWS: usize = 60;
const MIN_DISTINCT_MONTHS: usize = 6;
const MAX_DAY_TYPE_ROW_OFFSET: usize = 3;
const MIN_DAY_TYPE_LABELS: usize = 2;
const HOUR_SCAN_ROWS: usize = 40;
const MIN_HOUR_LABELS: usize = 10;
const START_SCAN_ROWS: usize = 60;
/// Month column itself plus five to its right
const RIGHT_WINDOW: usize = 6;
const LEFT_WINDOW: usize = 3;

/// Run of consecutive header columns carrying the same month (merged headers)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct MonthGroup {
    month: MonthKey,
    start: usize,
    end: usize,
}

pub fn detect(grid: &Grid) -> Option<ProfileTable> {
    let (header_row, groups) = find_month_header(grid)?;
    let type_row = find_day_type_row(grid, header_row)?;
    let hour_col = find_hour_column(grid, type_row)?;
    let start_row = find_start_row(grid, type_row, hour_col)?;
    debug!(
        header_row,
        type_row, hour_col, start_row, "wide matrix header located"
    );

    let mut table = ProfileTable::new();
    for (i, group) in groups.iter().enumerate() {
        let next_start = groups.get(i + 1).map_or(grid.cols(), |g| g.start);
        let right_end = next_start.min(group.start + RIGHT_WINDOW);
        let mut chosen = day_types_in(grid, type_row, group.start..right_end);

        if chosen.is_empty() {
            let prev_end = if i == 0 { 0 } else { groups[i - 1].end + 1 };
            let left_start = group.start.saturating_sub(LEFT_WINDOW).max(prev_end);
            chosen = day_types_in(grid, type_row, left_start..group.start);
        }
        if chosen.is_empty() {
            debug!(month = %group.month, col = group.start, "no day-type columns for month");
            continue;
        }

        for (col, day_type) in chosen {
            let raw = (0..HOURS_PER_DAY).map(|k| grid.get(start_row + k, col).as_number());
            let (profile, _) = fill::build_profile(raw);
            table.insert(group.month, day_type, profile);
        }
    }

    (!table.is_empty()).then_some(table)
}

/// First row (of the first 60) with at least six distinct month labels
fn find_month_header(grid: &Grid) -> Option<(usize, Vec<MonthGroup>)> {
    for r in 0..grid.rows().min(HEADER_SEARCH_ROWS) {
        let found: Vec<(usize, MonthKey)> = (0..grid.cols())
            .filter_map(|c| labels::month(grid.get(r, c)).map(|m| (c, m)))
            .collect();
        let distinct: BTreeSet<MonthKey> = found.iter().map(|&(_, m)| m).collect();
        if distinct.len() >= MIN_DISTINCT_MONTHS {
            return Some((r, group_month_columns(&found)));
        }
    }
    None
}

fn group_month_columns(found: &[(usize, MonthKey)]) -> Vec<MonthGroup> {
    let mut groups: Vec<MonthGroup> = Vec::new();
    for &(col, month) in found {
        match groups.last_mut() {
            Some(last) if last.month == month && last.end + 1 == col => last.end = col,
            _ => groups.push(MonthGroup {
                month,
                start: col,
                end: col,
            }),
        }
    }
    groups
}

/// First of the three rows below the month header with two or more day-type labels
fn find_day_type_row(grid: &Grid, header_row: usize) -> Option<usize> {
    let last = (header_row + MAX_DAY_TYPE_ROW_OFFSET).min(grid.rows().saturating_sub(1));
    (header_row + 1..=last).find(|&r| {
        (0..grid.cols())
            .filter(|&c| labels::day_type(grid.get(r, c)).is_some())
            .count()
            >= MIN_DAY_TYPE_LABELS
    })
}

/// Column with the most hour labels below the day-type row; first wins ties
fn find_hour_column(grid: &Grid, type_row: usize) -> Option<usize> {
    let rows = type_row + 1..(type_row + 1 + HOUR_SCAN_ROWS).min(grid.rows());
    let mut best: Option<(usize, usize)> = None;
    for c in 0..grid.cols() {
        let hits = rows
            .clone()
            .filter(|&r| labels::is_hour_label(grid.get(r, c)))
            .count();
        if best.map_or(true, |(_, best_hits)| hits > best_hits) {
            best = Some((c, hits));
        }
    }
    best.filter(|&(_, hits)| hits >= MIN_HOUR_LABELS)
        .map(|(c, _)| c)
}

/// First data row: hour 0 or 1 preferred, else any hour label
fn find_start_row(grid: &Grid, type_row: usize, hour_col: usize) -> Option<usize> {
    let rows = type_row + 1..(type_row + START_SCAN_ROWS).min(grid.rows());
    rows.clone()
        .find(|&r| matches!(labels::hour_value(grid.get(r, hour_col)), Some(0 | 1)))
        .or_else(|| {
            rows.clone()
                .find(|&r| labels::is_hour_label(grid.get(r, hour_col)))
        })
}

fn day_types_in(grid: &Grid, row: usize, cols: Range<usize>) -> Vec<(usize, DayType)> {
    cols.filter_map(|c| labels::day_type(grid.get(row, c)).map(|d| (c, d)))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::excel::{CellValue, MergedRange};

    const MONTHS: [&str; 12] = [
        "Januar",
        "Februar",
        "März",
        "April",
        "Mai",
        "Juni",
        "Juli",
        "August",
        "September",
        "Oktober",
        "November",
        "Dezember",
    ];

    /// Hour column at 0; each month block is `width` columns wide with the
    /// month label at the block start and WT/SA/SO starting at `offset`.
    /// Values encode month * 100 + day-type index * 10.
    fn build_matrix(width: usize, offset: usize) -> Grid {
        let cols = 1 + 12 * width;
        let mut rows = vec![vec![CellValue::Empty; cols]; 2 + 24];
        for (m, name) in MONTHS.iter().enumerate() {
            let base = 1 + m * width;
            rows[0][base] = CellValue::from(*name);
            for (d, label) in ["WT", "SA", "SO"].iter().enumerate() {
                rows[1][base + offset + d] = CellValue::from(*label);
                for h in 0..24 {
                    rows[2 + h][base + offset + d] =
                        CellValue::Number(((m + 1) * 100 + d * 10) as f64);
                }
            }
        }
        for h in 0..24 {
            rows[2 + h][0] = CellValue::from(format!("{:02}:00", h).as_str());
        }
        Grid::from_rows(rows)
    }

    fn value(table: &ProfileTable, month: u32, day_type: DayType) -> f64 {
        table
            .get(MonthKey::new(month).unwrap(), day_type)
            .unwrap()
            .hour(5)
    }

    #[test]
    fn test_aligned_matrix() {
        let table = detect(&build_matrix(3, 0)).unwrap();
        assert_eq!(table.len(), 36);
        assert_eq!(value(&table, 1, DayType::Weekday), 100.0);
        assert_eq!(value(&table, 2, DayType::Weekday), 200.0);
        assert_eq!(value(&table, 12, DayType::SundayOrHoliday), 1220.0);
    }

    #[test]
    fn test_day_types_offset_two_columns_right() {
        let table = detect(&build_matrix(5, 2)).unwrap();
        assert_eq!(table.len(), 36);
        assert_eq!(value(&table, 1, DayType::Weekday), 100.0);
        assert_eq!(value(&table, 1, DayType::SundayOrHoliday), 120.0);
        assert_eq!(value(&table, 7, DayType::Saturday), 710.0);
    }

    #[test]
    fn test_merged_month_headers_stay_with_their_month() {
        let mut grid = build_matrix(3, 0);
        let merges: Vec<MergedRange> = (0..12)
            .map(|m| MergedRange::new((0, 1 + m * 3), (0, 3 + m * 3)))
            .collect();
        grid.resolve_merges(&merges);

        let table = detect(&grid).unwrap();
        assert_eq!(value(&table, 1, DayType::Weekday), 100.0);
        assert_eq!(value(&table, 1, DayType::SundayOrHoliday), 120.0);
        assert_eq!(value(&table, 2, DayType::Weekday), 200.0);
    }

    #[test]
    fn test_left_offset_fallback() {
        // Month label right of its WT/SA columns, spacer columns after it
        let width = 8;
        let cols = 1 + 12 * width;
        let mut rows = vec![vec![CellValue::Empty; cols]; 26];
        for (m, name) in MONTHS.iter().enumerate() {
            let base = 1 + m * width;
            rows[0][base + 2] = CellValue::from(*name);
            rows[1][base] = CellValue::from("WT");
            rows[1][base + 1] = CellValue::from("SA");
            for h in 0..24 {
                rows[2 + h][base] = CellValue::Number((m + 1) as f64);
                rows[2 + h][base + 1] = CellValue::Number((m + 1) as f64 * 2.0);
            }
        }
        for h in 0..24 {
            rows[2 + h][0] = CellValue::Number(h as f64);
        }

        let table = detect(&Grid::from_rows(rows)).unwrap();
        assert_eq!(value(&table, 3, DayType::Weekday), 3.0);
        assert_eq!(value(&table, 3, DayType::Saturday), 6.0);
    }

    #[test]
    fn test_hour_labels_starting_at_one() {
        let mut grid = build_matrix(3, 0);
        for h in 0..24 {
            grid.set(2 + h, 0, CellValue::Number((h + 1) as f64));
        }
        let table = detect(&grid).unwrap();
        assert_eq!(value(&table, 4, DayType::Saturday), 410.0);
    }

    /// Copy of `grid` with `extra` blank rows inserted below the month header
    fn push_down_below_header(grid: &Grid, extra: usize) -> Grid {
        let mut shifted = Grid::new(grid.rows() + extra, grid.cols());
        for r in 0..grid.rows() {
            let target = if r == 0 { 0 } else { r + extra };
            for c in 0..grid.cols() {
                shifted.set(target, c, grid.get(r, c).clone());
            }
        }
        shifted
    }

    #[test]
    fn test_day_type_row_below_a_gap() {
        let grid = build_matrix(3, 0);
        for extra in [1, 2] {
            let table = detect(&push_down_below_header(&grid, extra)).unwrap();
            assert_eq!(table.len(), 36, "day-type row {} rows down", extra + 1);
            assert_eq!(value(&table, 6, DayType::Saturday), 610.0);
        }
        assert!(detect(&push_down_below_header(&grid, 3)).is_none());
    }

    #[test]
    fn test_short_matrix_without_hour_zero() {
        // Six months, one WT column each, hour labels 3..22 on 20 data rows
        let mut rows = vec![vec![CellValue::Empty; 7]; 2 + 20];
        for (m, name) in MONTHS.iter().take(6).enumerate() {
            rows[0][1 + m] = CellValue::from(*name);
            rows[1][1 + m] = CellValue::from("WT");
            for k in 0..20 {
                rows[2 + k][1 + m] = CellValue::Number(k as f64 + 0.5);
            }
        }
        for k in 0..20 {
            rows[2 + k][0] = CellValue::Number((k + 3) as f64);
        }
        let table = detect(&Grid::from_rows(rows)).unwrap();

        let profile = table
            .get(MonthKey::new(4).unwrap(), DayType::Weekday)
            .unwrap();
        // Starts at the first hour label; rows past the grid end carry forward
        for k in 0..20 {
            assert_eq!(profile.hour(k), k as f64 + 0.5);
        }
        for k in 20..24 {
            assert_eq!(profile.hour(k), 19.5);
        }
    }

    #[test]
    fn test_too_few_months_is_not_a_matrix() {
        let mut grid = build_matrix(3, 0);
        for c in 16..grid.cols() {
            grid.set(0, c, CellValue::Empty);
        }
        assert!(detect(&grid).is_none());
    }

    #[test]
    fn test_missing_hour_column_is_not_a_matrix() {
        let mut grid = build_matrix(3, 0);
        for h in 0..24 {
            grid.set(2 + h, 0, CellValue::Empty);
        }
        assert!(detect(&grid).is_none());
    }
}

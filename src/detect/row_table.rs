//! Row table: one profile per row, `Monat | Typ | 0 | 1 | ... | 23`

use super::{fill, labels, MIN_FINITE_VALUES};
use crate::excel::Grid;
use crate::types::{ProfileTable, HOURS_PER_DAY};
use tracing::debug;

const HEADER_SEARCH_ROWS: usize = 60;
const MONTH_HEADERS: &[&str] = &["monat", "month"];
const TYPE_HEADERS: &[&str] = &["typ", "tagtyp", "tagart", "type", "daytype"];

#[derive(Debug, PartialEq, Eq)]
struct Header {
    row: usize,
    month_col: usize,
    type_col: usize,
    hour_cols: [usize; HOURS_PER_DAY],
}

pub fn detect(grid: &Grid) -> Option<ProfileTable> {
    let header = find_header(grid)?;
    debug!(row = header.row, "row table header located");

    let mut table = ProfileTable::new();
    for r in header.row + 1..grid.rows() {
        let Some(month) = labels::month_or_number(grid.get(r, header.month_col)) else {
            continue;
        };
        let Some(day_type) = labels::day_type(grid.get(r, header.type_col)) else {
            continue;
        };
        let raw = header.hour_cols.iter().map(|&c| grid.get(r, c).as_number());
        let (profile, finite) = fill::build_profile(raw);
        if finite < MIN_FINITE_VALUES {
            debug!(row = r, finite, "row table row rejected: too few numbers");
            continue;
        }
        table.insert(month, day_type, profile);
    }

    (!table.is_empty()).then_some(table)
}

fn header_starts_with(text: &str, prefixes: &[&str]) -> bool {
    let folded = labels::fold(text);
    prefixes.iter().any(|p| folded.starts_with(p))
}

fn find_header(grid: &Grid) -> Option<Header> {
    for r in 0..grid.rows().min(HEADER_SEARCH_ROWS) {
        let text_at = |c: usize| grid.get(r, c).as_text().map(|t| t.into_owned());

        let month_col = (0..grid.cols())
            .find(|&c| text_at(c).is_some_and(|t| header_starts_with(&t, MONTH_HEADERS)));
        let type_col = (0..grid.cols())
            .find(|&c| text_at(c).is_some_and(|t| header_starts_with(&t, TYPE_HEADERS)));
        let (Some(month_col), Some(type_col)) = (month_col, type_col) else {
            continue;
        };

        let mut hour_cols = [None; HOURS_PER_DAY];
        for c in 0..grid.cols() {
            if let Some(hour) = labels::hour_header(grid.get(r, c)) {
                hour_cols[hour].get_or_insert(c);
            }
        }
        if let Some(hour_cols) = complete(hour_cols) {
            return Some(Header {
                row: r,
                month_col,
                type_col,
                hour_cols,
            });
        }
    }
    None
}

fn complete(cols: [Option<usize>; HOURS_PER_DAY]) -> Option<[usize; HOURS_PER_DAY]> {
    let mut out = [0; HOURS_PER_DAY];
    for (slot, col) in out.iter_mut().zip(cols) {
        *slot = col?;
    }
    Some(out)
}

//! Label vocabularies for month names, day types and hour indices
//!
//! All lookups fold the cell text first: lowercase, keep only alphanumeric
//! characters. `"Sept."`, `"SEPT"` and `"sept"` therefore hit the same entry,
//! as do `"So/Feiertag"` and `"sofeiertag"`.

use crate::excel::CellValue;
use crate::types::{DayType, MonthKey};
use regex::Regex;
use std::sync::OnceLock;

const MONTH_LABELS: &[(&str, u32)] = &[
    ("januar", 1),
    ("jänner", 1),
    ("january", 1),
    ("jan", 1),
    ("februar", 2),
    ("feber", 2),
    ("february", 2),
    ("feb", 2),
    ("märz", 3),
    ("maerz", 3),
    ("march", 3),
    ("mär", 3),
    ("mrz", 3),
    ("mar", 3),
    ("april", 4),
    ("apr", 4),
    ("mai", 5),
    ("may", 5),
    ("juni", 6),
    ("june", 6),
    ("jun", 6),
    ("juli", 7),
    ("july", 7),
    ("jul", 7),
    ("august", 8),
    ("aug", 8),
    ("september", 9),
    ("sept", 9),
    ("sep", 9),
    ("oktober", 10),
    ("october", 10),
    ("okt", 10),
    ("oct", 10),
    ("november", 11),
    ("nov", 11),
    ("dezember", 12),
    ("december", 12),
    ("dez", 12),
    ("dec", 12),
];

const DAY_TYPE_LABELS: &[(&str, DayType)] = &[
    ("wt", DayType::Weekday),
    ("wkt", DayType::Weekday),
    ("werktag", DayType::Weekday),
    ("werktage", DayType::Weekday),
    ("weekday", DayType::Weekday),
    ("workday", DayType::Weekday),
    ("sa", DayType::Saturday),
    ("sat", DayType::Saturday),
    ("samstag", DayType::Saturday),
    ("sonnabend", DayType::Saturday),
    ("saturday", DayType::Saturday),
    ("so", DayType::SundayOrHoliday),
    ("sun", DayType::SundayOrHoliday),
    ("sonntag", DayType::SundayOrHoliday),
    ("sunday", DayType::SundayOrHoliday),
    ("ft", DayType::SundayOrHoliday),
    ("feiertag", DayType::SundayOrHoliday),
    ("holiday", DayType::SundayOrHoliday),
    ("sofeiertag", DayType::SundayOrHoliday),
    ("sonntagfeiertag", DayType::SundayOrHoliday),
    ("sonnundfeiertag", DayType::SundayOrHoliday),
];

/// `7`, `07`, `07:00`, `07:00:00`, optionally prefixed with `h` (headers only)
fn hour_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| {
        Regex::new(r"^(h\s*)?(\d{1,2})(?::00(?::00)?)?$").expect("hour label pattern is valid")
    })
}

/// Lowercase and strip everything that is not a letter or digit
pub fn fold(text: &str) -> String {
    text.chars()
        .filter(|c| c.is_alphanumeric())
        .flat_map(char::to_lowercase)
        .collect()
}

/// Month from a German or English month label
pub fn month(cell: &CellValue) -> Option<MonthKey> {
    let CellValue::Text(text) = cell else {
        return None;
    };
    let folded = fold(text);
    MONTH_LABELS
        .iter()
        .find(|(label, _)| *label == folded)
        .and_then(|&(_, number)| MonthKey::new(number))
}

/// Month from a label or a plain month number 1-12
pub fn month_or_number(cell: &CellValue) -> Option<MonthKey> {
    if let Some(month) = month(cell) {
        return Some(month);
    }
    let number = cell.as_number();
    if number.fract() == 0.0 && (1.0..=12.0).contains(&number) {
        MonthKey::new(number as u32)
    } else {
        None
    }
}

/// Day type from a German or English abbreviation or full word
pub fn day_type(cell: &CellValue) -> Option<DayType> {
    let CellValue::Text(text) = cell else {
        return None;
    };
    let folded = fold(text);
    DAY_TYPE_LABELS
        .iter()
        .find(|(label, _)| *label == folded)
        .map(|&(_, day_type)| day_type)
}

/// Raw hour number 0-24 of an hour label, `None` for anything else
fn hour_number(cell: &CellValue, allow_prefix: bool) -> Option<u32> {
    let text = cell.as_text()?;
    let lowered = text.to_lowercase();
    let captures = hour_pattern().captures(&lowered)?;
    if captures.get(1).is_some() && !allow_prefix {
        return None;
    }
    let hour: u32 = captures.get(2)?.as_str().parse().ok()?;
    (hour <= 24).then_some(hour)
}

/// Row label in an hour-index column (`0`-`24`, `00:00`-`24:00`)
pub fn is_hour_label(cell: &CellValue) -> bool {
    hour_number(cell, false).is_some()
}

/// Hour of day for an hour-index label; `24` wraps to hour 0
pub fn hour_value(cell: &CellValue) -> Option<usize> {
    hour_number(cell, false).map(|h| (h % 24) as usize)
}

/// Hour of day 0-23 for a column header (`0`, `h0`, `00:00`)
pub fn hour_header(cell: &CellValue) -> Option<usize> {
    hour_number(cell, true)
        .filter(|&h| h < 24)
        .map(|h| h as usize)
}

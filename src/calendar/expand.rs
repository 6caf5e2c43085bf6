//! (month, day-type) table → hourly series for a whole year

use super::HolidayCalendar;
use crate::error::{SlpError, SlpResult};
use crate::types::{AnnualSeries, DayProfile, DayType, MonthKey, ProfileTable, HOURS_PER_DAY};
use chrono::{Datelike, NaiveDate, Weekday};
use clap::ValueEnum;
use serde::Deserialize;
use std::collections::BTreeSet;
use tracing::{debug, info, warn};

/// What to do when the table has no profile for a (month, day-type)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MissingProfilePolicy {
    /// Use the month's weekday profile, else 24 zeros
    #[default]
    Lenient,
    /// Use the month's weekday profile, else fail
    Weekday,
    /// Fail on any missing (month, day-type)
    Exact,
}

/// Day type of a calendar date: Sundays and holidays share one profile
pub fn classify(date: NaiveDate, holidays: &HolidayCalendar) -> DayType {
    match date.weekday() {
        Weekday::Sun => DayType::SundayOrHoliday,
        _ if holidays.contains(date) => DayType::SundayOrHoliday,
        Weekday::Sat => DayType::Saturday,
        _ => DayType::Weekday,
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Fallback {
    Weekday,
    Zeros,
}

fn lookup(
    table: &ProfileTable,
    month: MonthKey,
    day_type: DayType,
    policy: MissingProfilePolicy,
) -> SlpResult<(DayProfile, Option<Fallback>)> {
    if let Some(profile) = table.get(month, day_type) {
        return Ok((*profile, None));
    }
    let missing = SlpError::MissingProfile { month, day_type };
    if policy == MissingProfilePolicy::Exact {
        return Err(missing);
    }
    if let Some(profile) = table.get(month, DayType::Weekday) {
        return Ok((*profile, Some(Fallback::Weekday)));
    }
    match policy {
        MissingProfilePolicy::Lenient => Ok((DayProfile::zeros(), Some(Fallback::Zeros))),
        _ => Err(missing),
    }
}

/// Expand `table` to one value per hour of the calendar's year
///
/// Days run Jan 1 to Dec 31 in local civil time without DST shifts, so the
/// result has 8760 values, or 8784 in a leap year.
pub fn expand_year(
    table: &ProfileTable,
    holidays: &HolidayCalendar,
    policy: MissingProfilePolicy,
) -> SlpResult<AnnualSeries> {
    let year = holidays.year();
    let first = NaiveDate::from_ymd_opt(year, 1, 1).ok_or(SlpError::InvalidYear(year))?;

    let mut values = Vec::with_capacity(366 * HOURS_PER_DAY);
    let mut reported = BTreeSet::new();
    for date in first.iter_days().take_while(|d| d.year() == year) {
        let month = MonthKey::new(date.month()).ok_or(SlpError::InvalidYear(year))?;
        let day_type = classify(date, holidays);
        let (profile, fallback) = lookup(table, month, day_type, policy)?;

        if let Some(fallback) = fallback {
            if reported.insert((month, day_type)) {
                match fallback {
                    Fallback::Weekday => {
                        debug!(%month, %day_type, "no profile, using weekday profile")
                    }
                    Fallback::Zeros => {
                        warn!(%month, %day_type, "no profile and no weekday profile, filling zeros")
                    }
                }
            }
        }
        values.extend_from_slice(profile.values());
    }

    info!(year, region = %holidays.region(), hours = values.len(), "annual series expanded");
    Ok(AnnualSeries { year, values })
}

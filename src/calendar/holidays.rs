//! Public holidays per German federal state

use super::Region;
use super::Region::*;
use crate::error::{SlpError, SlpResult};
use chrono::{Datelike, Duration, NaiveDate};
use std::collections::BTreeMap;

/// Gregorian computus is only meaningful from 1583 on
const YEARS: std::ops::RangeInclusive<i32> = 1583..=9999;

#[derive(Debug, Clone, Copy)]
enum DateRule {
    /// Fixed (month, day)
    Fixed(u32, u32),
    /// Days relative to Easter Sunday
    Easter(i64),
    /// Buß- und Bettag: Wednesday before 23 November
    RepentanceDay,
}

#[derive(Debug, Clone, Copy)]
enum Scope {
    Nationwide,
    States(&'static [Region]),
}

#[derive(Debug, Clone, Copy)]
enum Years {
    Any,
    From(i32),
    Only(&'static [i32]),
}

struct HolidayRule {
    name: &'static str,
    date: DateRule,
    scope: Scope,
    years: Years,
}

#[rustfmt::skip]
const RULES: &[HolidayRule] = &[
    HolidayRule { name: "Neujahr", date: DateRule::Fixed(1, 1), scope: Scope::Nationwide, years: Years::Any },
    HolidayRule { name: "Heilige Drei Könige", date: DateRule::Fixed(1, 6), scope: Scope::States(&[BadenWuerttemberg, Bayern, SachsenAnhalt]), years: Years::Any },
    HolidayRule { name: "Internationaler Frauentag", date: DateRule::Fixed(3, 8), scope: Scope::States(&[Berlin]), years: Years::From(2019) },
    HolidayRule { name: "Internationaler Frauentag", date: DateRule::Fixed(3, 8), scope: Scope::States(&[MecklenburgVorpommern]), years: Years::From(2023) },
    HolidayRule { name: "Karfreitag", date: DateRule::Easter(-2), scope: Scope::Nationwide, years: Years::Any },
    HolidayRule { name: "Ostersonntag", date: DateRule::Easter(0), scope: Scope::States(&[Brandenburg]), years: Years::Any },
    HolidayRule { name: "Ostermontag", date: DateRule::Easter(1), scope: Scope::Nationwide, years: Years::Any },
    HolidayRule { name: "Tag der Arbeit", date: DateRule::Fixed(5, 1), scope: Scope::Nationwide, years: Years::Any },
    HolidayRule { name: "Tag der Befreiung", date: DateRule::Fixed(5, 8), scope: Scope::States(&[Berlin]), years: Years::Only(&[2020, 2025]) },
    HolidayRule { name: "Christi Himmelfahrt", date: DateRule::Easter(39), scope: Scope::Nationwide, years: Years::Any },
    HolidayRule { name: "Pfingstsonntag", date: DateRule::Easter(49), scope: Scope::States(&[Brandenburg]), years: Years::Any },
    HolidayRule { name: "Pfingstmontag", date: DateRule::Easter(50), scope: Scope::Nationwide, years: Years::Any },
    HolidayRule { name: "Fronleichnam", date: DateRule::Easter(60), scope: Scope::States(&[BadenWuerttemberg, Bayern, Hessen, NordrheinWestfalen, RheinlandPfalz, Saarland]), years: Years::Any },
    HolidayRule { name: "Mariä Himmelfahrt", date: DateRule::Fixed(8, 15), scope: Scope::States(&[Saarland]), years: Years::Any },
    HolidayRule { name: "Weltkindertag", date: DateRule::Fixed(9, 20), scope: Scope::States(&[Thueringen]), years: Years::From(2019) },
    HolidayRule { name: "Tag der Deutschen Einheit", date: DateRule::Fixed(10, 3), scope: Scope::Nationwide, years: Years::Any },
    HolidayRule { name: "Reformationstag", date: DateRule::Fixed(10, 31), scope: Scope::States(&[Brandenburg, MecklenburgVorpommern, Sachsen, SachsenAnhalt, Thueringen]), years: Years::Any },
    HolidayRule { name: "Reformationstag", date: DateRule::Fixed(10, 31), scope: Scope::States(&[Bremen, Hamburg, Niedersachsen, SchleswigHolstein]), years: Years::From(2018) },
    HolidayRule { name: "Reformationstag", date: DateRule::Fixed(10, 31), scope: Scope::Nationwide, years: Years::Only(&[2017]) },
    HolidayRule { name: "Allerheiligen", date: DateRule::Fixed(11, 1), scope: Scope::States(&[BadenWuerttemberg, Bayern, NordrheinWestfalen, RheinlandPfalz, Saarland]), years: Years::Any },
    HolidayRule { name: "Buß- und Bettag", date: DateRule::RepentanceDay, scope: Scope::States(&[Sachsen]), years: Years::Any },
    HolidayRule { name: "1. Weihnachtstag", date: DateRule::Fixed(12, 25), scope: Scope::Nationwide, years: Years::Any },
    HolidayRule { name: "2. Weihnachtstag", date: DateRule::Fixed(12, 26), scope: Scope::Nationwide, years: Years::Any },
];

impl Scope {
    fn includes(self, region: Region) -> bool {
        match self {
            Scope::Nationwide => true,
            Scope::States(states) => states.contains(&region),
        }
    }
}

impl Years {
    fn includes(self, year: i32) -> bool {
        match self {
            Years::Any => true,
            Years::From(first) => year >= first,
            Years::Only(years) => years.contains(&year),
        }
    }
}

/// Easter Sunday (anonymous Gregorian algorithm)
pub fn easter_sunday(year: i32) -> Option<NaiveDate> {
    let a = year % 19;
    let b = year / 100;
    let c = year % 100;
    let d = b / 4;
    let e = b % 4;
    let f = (b + 8) / 25;
    let g = (b - f + 1) / 3;
    let h = (19 * a + b - d - g + 15) % 30;
    let i = c / 4;
    let k = c % 4;
    let l = (32 + 2 * e + 2 * i - h - k) % 7;
    let m = (a + 11 * h + 22 * l) / 451;
    let month = (h + l - 7 * m + 114) / 31;
    let day = (h + l - 7 * m + 114) % 31 + 1;
    NaiveDate::from_ymd_opt(year, month as u32, day as u32)
}

fn resolve(rule: DateRule, year: i32, easter: NaiveDate) -> Option<NaiveDate> {
    match rule {
        DateRule::Fixed(month, day) => NaiveDate::from_ymd_opt(year, month, day),
        DateRule::Easter(offset) => Some(easter + Duration::days(offset)),
        DateRule::RepentanceDay => {
            let nov22 = NaiveDate::from_ymd_opt(year, 11, 22)?;
            let back = (nov22.weekday().num_days_from_monday() + 5) % 7;
            Some(nov22 - Duration::days(i64::from(back)))
        }
    }
}

/// Public holidays of one year in one federal state
#[derive(Debug, Clone, PartialEq)]
pub struct HolidayCalendar {
    year: i32,
    region: Region,
    days: BTreeMap<NaiveDate, &'static str>,
}

impl HolidayCalendar {
    pub fn new(year: i32, region: Region) -> SlpResult<Self> {
        if !YEARS.contains(&year) {
            return Err(SlpError::InvalidYear(year));
        }
        let easter = easter_sunday(year).ok_or(SlpError::InvalidYear(year))?;

        let days = RULES
            .iter()
            .filter(|rule| rule.scope.includes(region) && rule.years.includes(year))
            .filter_map(|rule| resolve(rule.date, year, easter).map(|date| (date, rule.name)))
            .collect();

        Ok(Self { year, region, days })
    }

    pub fn year(&self) -> i32 {
        self.year
    }

    pub fn region(&self) -> Region {
        self.region
    }

    pub fn contains(&self, date: NaiveDate) -> bool {
        self.days.contains_key(&date)
    }

    pub fn name(&self, date: NaiveDate) -> Option<&'static str> {
        self.days.get(&date).copied()
    }

    /// Holidays in date order
    pub fn iter(&self) -> impl Iterator<Item = (NaiveDate, &'static str)> + '_ {
        self.days.iter().map(|(&d, &n)| (d, n))
    }

    pub fn len(&self) -> usize {
        self.days.len()
    }

    pub fn is_empty(&self) -> bool {
        self.days.is_empty()
    }
}

use std::collections::BTreeMap;
use std::fmt;

/// Hours in one profile day
pub const HOURS_PER_DAY: usize = 24;

//==============================================================================
// Day Types
//==============================================================================

/// Day-type used to select a 24h profile
///
/// Holidays share the Sunday profile, so `FT`/`Feiertag` labels and regional
/// holidays both map to [`DayType::SundayOrHoliday`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum DayType {
    /// Werktag (Monday to Friday, not a holiday)
    Weekday,
    /// Samstag
    Saturday,
    /// Sonntag or Feiertag
    SundayOrHoliday,
}

impl DayType {
    pub const ALL: [DayType; 3] = [
        DayType::Weekday,
        DayType::Saturday,
        DayType::SundayOrHoliday,
    ];

    /// BDEW short code
    pub fn code(self) -> &'static str {
        match self {
            DayType::Weekday => "WT",
            DayType::Saturday => "SA",
            DayType::SundayOrHoliday => "SO",
        }
    }
}

impl fmt::Display for DayType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

//==============================================================================
// Months
//==============================================================================

/// Calendar month 1-12
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct MonthKey(u8);

impl MonthKey {
    const GERMAN_NAMES: [&'static str; 12] = [
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

    /// Returns `None` outside 1-12
    pub fn new(month: u32) -> Option<Self> {
        if (1..=12).contains(&month) {
            Some(Self(month as u8))
        } else {
            None
        }
    }

    pub fn number(self) -> u32 {
        u32::from(self.0)
    }

    pub fn german_name(self) -> &'static str {
        Self::GERMAN_NAMES[usize::from(self.0) - 1]
    }

    /// All twelve months in calendar order
    pub fn all() -> impl Iterator<Item = MonthKey> {
        (1..=12u8).map(MonthKey)
    }
}

impl fmt::Display for MonthKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

//==============================================================================
// Profile Table
//==============================================================================

/// One 24h load shape, every value finite
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DayProfile([f64; HOURS_PER_DAY]);

impl DayProfile {
    pub fn new(values: [f64; HOURS_PER_DAY]) -> Self {
        Self(values)
    }

    pub fn zeros() -> Self {
        Self([0.0; HOURS_PER_DAY])
    }

    pub fn values(&self) -> &[f64; HOURS_PER_DAY] {
        &self.0
    }

    pub fn hour(&self, hour: usize) -> f64 {
        self.0[hour]
    }

    pub fn sum(&self) -> f64 {
        self.0.iter().sum()
    }
}

/// Lookup table (month, day-type) → 24h profile
///
/// Built once by layout detection and read-only afterwards.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ProfileTable {
    entries: BTreeMap<(MonthKey, DayType), DayProfile>,
}

impl ProfileTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a profile, replacing any earlier one with the same key
    pub fn insert(&mut self, month: MonthKey, day_type: DayType, profile: DayProfile) {
        self.entries.insert((month, day_type), profile);
    }

    pub fn get(&self, month: MonthKey, day_type: DayType) -> Option<&DayProfile> {
        self.entries.get(&(month, day_type))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (MonthKey, DayType, &DayProfile)> {
        self.entries.iter().map(|(&(m, d), p)| (m, d, p))
    }
}

//==============================================================================
// Annual Series
//==============================================================================

/// Hourly values for one calendar year in chronological order
#[derive(Debug, Clone, PartialEq)]
pub struct AnnualSeries {
    pub year: i32,
    pub values: Vec<f64>,
}

impl AnnualSeries {
    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn sum(&self) -> f64 {
        self.values.iter().sum()
    }
}

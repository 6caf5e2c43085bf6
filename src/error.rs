use thiserror::Error;

use crate::types::{DayType, MonthKey};

pub type SlpResult<T> = Result<T, SlpError>;

#[derive(Error, Debug)]
pub enum SlpError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("YAML parsing error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("Workbook error: {0}")]
    Workbook(String),

    #[error("Sheet '{sheet}' not found. Available: {available:?}")]
    SheetNotFound {
        sheet: String,
        available: Vec<String>,
    },

    #[error("Layout detection failed for sheet '{sheet}': no month/day-type blocks recognized (vertical blocks, wide matrix, row table)")]
    LayoutNotDetected { sheet: String },

    #[error("Lookup error: no 24h profile for month {month}, day type {day_type}")]
    MissingProfile { month: MonthKey, day_type: DayType },

    #[error("Normalization error: sum of hourly values is {total} (must be positive)")]
    NonPositiveTotal { total: f64 },

    #[error("Unknown region '{code}'. Valid: {valid}")]
    UnknownRegion { code: String, valid: String },

    #[error("Invalid year {0}")]
    InvalidYear(i32),

    #[error("Configuration error: {0}")]
    Config(String),
}

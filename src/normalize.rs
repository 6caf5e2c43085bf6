//! Output scaling of the hourly series

use crate::error::{SlpError, SlpResult};
use crate::types::AnnualSeries;
use clap::ValueEnum;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Annual total used by [`NormalizeMode::Annual1e6`]
pub const ANNUAL_TOTAL: f64 = 1_000_000.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum, Deserialize)]
pub enum NormalizeMode {
    /// Fraction of the annual total (sums to 1)
    #[default]
    #[serde(rename = "share")]
    Share,
    /// Scaled to 1,000,000 per year
    #[value(name = "annual_1e6", alias = "annual-scaled")]
    #[serde(rename = "annual_1e6", alias = "annual-scaled")]
    Annual1e6,
    /// Values as read from the sheet
    #[value(name = "none", alias = "raw")]
    #[serde(rename = "none", alias = "raw")]
    Raw,
}

/// Unit tag written next to the values
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Unit {
    #[serde(rename = "share_of_year")]
    ShareOfYear,
    #[serde(rename = "kWh_per_1e6")]
    KwhPer1e6,
    #[serde(rename = "raw")]
    Raw,
}

impl fmt::Display for Unit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Unit::ShareOfYear => "share_of_year",
            Unit::KwhPer1e6 => "kWh_per_1e6",
            Unit::Raw => "raw",
        })
    }
}

/// Rescaled hourly values with their unit
#[derive(Debug, Clone, PartialEq)]
pub struct NormalizedSeries {
    pub values: Vec<f64>,
    pub unit: Unit,
}

impl NormalizedSeries {
    pub fn sum(&self) -> f64 {
        self.values.iter().sum()
    }
}

fn positive_total(series: &AnnualSeries) -> SlpResult<f64> {
    let total = series.sum();
    if total.is_finite() && total > 0.0 {
        Ok(total)
    } else {
        Err(SlpError::NonPositiveTotal { total })
    }
}

pub fn normalize(series: &AnnualSeries, mode: NormalizeMode) -> SlpResult<NormalizedSeries> {
    match mode {
        NormalizeMode::Share => {
            let total = positive_total(series)?;
            Ok(NormalizedSeries {
                values: series.values.iter().map(|v| v / total).collect(),
                unit: Unit::ShareOfYear,
            })
        }
        NormalizeMode::Annual1e6 => {
            let factor = ANNUAL_TOTAL / positive_total(series)?;
            Ok(NormalizedSeries {
                values: series.values.iter().map(|v| v * factor).collect(),
                unit: Unit::KwhPer1e6,
            })
        }
        NormalizeMode::Raw => Ok(NormalizedSeries {
            values: series.values.clone(),
            unit: Unit::Raw,
        }),
    }
}

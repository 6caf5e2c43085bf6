//! bdew-slp - BDEW standard load profiles as hourly annual series
//!
//! This library reads a load profile sheet from the BDEW Excel workbook,
//! recognizes how the sheet lays out its (month, day-type) 24-hour profiles,
//! and expands them over a calendar year into one value per hour.
//!
//! # Features
//!
//! - Three sheet layouts: vertical blocks, wide month matrix, row table
//! - Merged-cell expansion and decimal-comma values
//! - Day classification (Werktag / Samstag / Sonn- und Feiertag) with the
//!   holidays of all 16 Bundesländer
//! - Share-of-year, per-million or raw normalization
//! - JSON output and YAML batch jobs
//!
//! # Example
//!
//! ```no_run
//! use bdew_slp::calendar::Region;
//! use bdew_slp::config::ConvertConfig;
//! use bdew_slp::pipeline;
//!
//! let config = ConvertConfig::new("SLP.xlsx", "H25", 2025, Region::RheinlandPfalz, "h25.json");
//! let report = pipeline::convert(&config)?;
//!
//! println!("Layout: {}", report.layout);
//! println!("Hours:  {}", report.hours);
//! # Ok::<(), bdew_slp::error::SlpError>(())
//! ```

pub mod calendar;
pub mod cli;
pub mod config;
pub mod detect;
pub mod error;
pub mod excel;
pub mod normalize;
pub mod pipeline;
pub mod types;
pub mod writer;

// Re-export commonly used types
pub use error::{SlpError, SlpResult};
pub use types::{AnnualSeries, DayProfile, DayType, MonthKey, ProfileTable};

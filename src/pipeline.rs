//! Workbook → JSON conversion, one job at a time
//!
//! Stages run strictly in order and the first failure aborts the job before
//! anything is written:
//!
//! ```text
//! GridLoader → detect → HolidayCalendar + expand_year → normalize → write_json
//! ```

use crate::calendar::{expand_year, HolidayCalendar};
use crate::config::ConvertConfig;
use crate::detect::{detect_sheet, Layout};
use crate::error::SlpResult;
use crate::excel::GridLoader;
use crate::normalize::{normalize, Unit};
use crate::writer::{write_json, ProfileDocument};
use std::path::PathBuf;
use tracing::info;

/// Document plus what was detected on the way
#[derive(Debug, Clone, PartialEq)]
pub struct Prepared {
    pub document: ProfileDocument,
    pub layout: Layout,
    pub profiles: usize,
}

/// Summary of a finished conversion
#[derive(Debug, Clone, PartialEq)]
pub struct ConvertReport {
    pub output: PathBuf,
    pub layout: Layout,
    pub profiles: usize,
    pub hours: usize,
    pub sum: f64,
    pub unit: Unit,
}

/// Run every stage except writing
pub fn prepare(config: &ConvertConfig) -> SlpResult<Prepared> {
    let holidays = HolidayCalendar::new(config.year, config.region)?;

    let grid = GridLoader::new(&config.xlsx).load(&config.sheet)?;
    let detection = detect_sheet(&grid, &config.sheet)?;
    let series = expand_year(&detection.table, &holidays, config.missing_profile)?;
    let normalized = normalize(&series, config.normalize)?;

    Ok(Prepared {
        document: ProfileDocument {
            source: config.source.clone(),
            profile: config.sheet.clone(),
            bundesland: config.region,
            year: config.year,
            unit: normalized.unit,
            hours: normalized.values,
        },
        layout: detection.layout,
        profiles: detection.table.len(),
    })
}

/// Convert one sheet and write the JSON document
pub fn convert(config: &ConvertConfig) -> SlpResult<ConvertReport> {
    let prepared = prepare(config)?;
    write_json(&config.out, &prepared.document, config.pretty)?;

    let report = ConvertReport {
        output: config.out.clone(),
        layout: prepared.layout,
        profiles: prepared.profiles,
        hours: prepared.document.hours.len(),
        sum: prepared.document.hours.iter().sum(),
        unit: prepared.document.unit,
    };
    info!(
        output = %report.output.display(),
        hours = report.hours,
        unit = %report.unit,
        "profile written"
    );
    Ok(report)
}

//! JSON output of the hourly series

use crate::calendar::Region;
use crate::error::SlpResult;
use crate::normalize::Unit;
use serde::Serialize;
use std::fs;
use std::path::Path;

/// Default `source` field
pub const DEFAULT_SOURCE: &str = "BDEW-2025";

/// JSON document written for one converted profile
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ProfileDocument {
    pub source: String,
    pub profile: String,
    pub bundesland: Region,
    pub year: i32,
    pub unit: Unit,
    pub hours: Vec<f64>,
}

/// Write `document` to `path`, creating missing parent directories
pub fn write_json(path: &Path, document: &ProfileDocument, pretty: bool) -> SlpResult<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)?;
    }
    let json = if pretty {
        serde_json::to_string_pretty(document)?
    } else {
        serde_json::to_string(document)?
    };
    fs::write(path, json)?;
    Ok(())
}

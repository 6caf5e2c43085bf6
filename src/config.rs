//! Run configuration and YAML job files

use crate::calendar::{MissingProfilePolicy, Region};
use crate::error::{SlpError, SlpResult};
use crate::normalize::NormalizeMode;
use crate::writer::DEFAULT_SOURCE;
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};

/// Everything one conversion needs; passed explicitly into [`crate::pipeline::convert`]
#[derive(Debug, Clone, PartialEq)]
pub struct ConvertConfig {
    pub xlsx: PathBuf,
    pub sheet: String,
    pub year: i32,
    pub region: Region,
    pub out: PathBuf,
    pub normalize: NormalizeMode,
    pub missing_profile: MissingProfilePolicy,
    pub source: String,
    pub pretty: bool,
}

impl ConvertConfig {
    /// Config with default normalization, policy and source
    pub fn new(
        xlsx: impl Into<PathBuf>,
        sheet: impl Into<String>,
        year: i32,
        region: Region,
        out: impl Into<PathBuf>,
    ) -> Self {
        Self {
            xlsx: xlsx.into(),
            sheet: sheet.into(),
            year,
            region,
            out: out.into(),
            normalize: NormalizeMode::default(),
            missing_profile: MissingProfilePolicy::default(),
            source: DEFAULT_SOURCE.to_string(),
            pretty: false,
        }
    }
}

/// One job entry; unset fields come from the file's `defaults`
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct JobSpec {
    pub xlsx: Option<PathBuf>,
    pub sheet: Option<String>,
    pub year: Option<i32>,
    #[serde(alias = "region")]
    pub bundesland: Option<Region>,
    pub out: Option<PathBuf>,
    pub normalize: Option<NormalizeMode>,
    pub missing_profile: Option<MissingProfilePolicy>,
    pub source: Option<String>,
    pub pretty: Option<bool>,
}

/// Batch job file
///
/// ```yaml
/// defaults:
///   xlsx: SLP.xlsx
///   year: 2025
///   bundesland: RP
/// jobs:
///   - sheet: H25
///     out: out/h25.json
///   - sheet: G25
///     out: out/g25.json
///     normalize: annual_1e6
/// ```
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct JobFile {
    #[serde(default)]
    pub defaults: JobSpec,
    pub jobs: Vec<JobSpec>,
}

impl JobFile {
    pub fn load(path: &Path) -> SlpResult<Self> {
        let content = fs::read_to_string(path)?;
        Ok(serde_yaml::from_str(&content)?)
    }

    /// Merge every job with the defaults; relative paths resolve against `base_dir`
    pub fn resolve(&self, base_dir: &Path) -> SlpResult<Vec<ConvertConfig>> {
        if self.jobs.is_empty() {
            return Err(SlpError::Config("job file has no jobs".to_string()));
        }
        self.jobs
            .iter()
            .enumerate()
            .map(|(i, job)| job.resolve(&self.defaults, base_dir, i + 1))
            .collect()
    }
}

impl JobSpec {
    fn resolve(&self, defaults: &JobSpec, base_dir: &Path, index: usize) -> SlpResult<ConvertConfig> {
        let missing =
            |field: &str| SlpError::Config(format!("job {}: missing '{}'", index, field));
        let anchored = |p: &PathBuf| {
            if p.is_absolute() {
                p.clone()
            } else {
                base_dir.join(p)
            }
        };

        let xlsx = self.xlsx.as_ref().or(defaults.xlsx.as_ref()).ok_or_else(|| missing("xlsx"))?;
        let out = self.out.as_ref().or(defaults.out.as_ref()).ok_or_else(|| missing("out"))?;

        Ok(ConvertConfig {
            xlsx: anchored(xlsx),
            sheet: self
                .sheet
                .clone()
                .or_else(|| defaults.sheet.clone())
                .ok_or_else(|| missing("sheet"))?,
            year: self.year.or(defaults.year).ok_or_else(|| missing("year"))?,
            region: self
                .bundesland
                .or(defaults.bundesland)
                .ok_or_else(|| missing("bundesland"))?,
            out: anchored(out),
            normalize: self.normalize.or(defaults.normalize).unwrap_or_default(),
            missing_profile: self
                .missing_profile
                .or(defaults.missing_profile)
                .unwrap_or_default(),
            source: self
                .source
                .clone()
                .or_else(|| defaults.source.clone())
                .unwrap_or_else(|| DEFAULT_SOURCE.to_string()),
            pretty: self.pretty.or(defaults.pretty).unwrap_or(false),
        })
    }
}

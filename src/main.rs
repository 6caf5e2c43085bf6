use bdew_slp::calendar::{MissingProfilePolicy, Region};
use bdew_slp::cli;
use bdew_slp::config::ConvertConfig;
use bdew_slp::normalize::NormalizeMode;
use bdew_slp::writer::DEFAULT_SOURCE;
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "bdew-slp")]
#[command(about = "BDEW standard load profile workbooks → hourly annual JSON curves")]
#[command(long_about = "bdew-slp - BDEW standard load profiles (SLP) as 8760-hour series

Reads a load profile sheet (H25, G25, L25, ...) from the BDEW Excel workbook,
recognizes its table layout, classifies every day of the target year as
Werktag / Samstag / Sonn- und Feiertag using the holiday calendar of the
given Bundesland, and writes one value per hour as JSON.

COMMANDS:
  convert   - Convert one sheet to an hourly JSON series
  inspect   - Show sheets and detected table layouts
  holidays  - List the holiday calendar used for a year and Bundesland
  batch     - Run several conversions from a YAML job file

EXAMPLES:
  bdew-slp convert --xlsx SLP.xlsx --sheet H25 --year 2025 --bundesland RP --out h25.json
  bdew-slp inspect --xlsx SLP.xlsx
  bdew-slp holidays --year 2025 --bundesland BY

Logging: set RUST_LOG (e.g. RUST_LOG=bdew_slp=debug) or pass --verbose.")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    #[command(long_about = "Convert one load profile sheet to an hourly JSON series.

LAYOUTS (tried in this order):
  vertical blocks  - month label, day-type label, 24 values below
  wide matrix      - month header row, WT/SA/SO row, hour column on the side
  row table        - Monat | Typ | 0 | 1 | ... | 23

Merged cells are expanded before detection. Hour values may use decimal
point or decimal comma; up to 4 missing values per block are interpolated.

NORMALIZATION:
  share       - fraction of the annual total (sum = 1)        unit share_of_year
  annual_1e6  - scaled to 1,000,000 per year                  unit kWh_per_1e6
  none        - values as read from the sheet                 unit raw

MISSING PROFILES:
  lenient  - fall back to the month's WT profile, else zeros (default)
  weekday  - fall back to the month's WT profile, else fail
  exact    - fail on any missing month/day-type pair

EXAMPLE:
  bdew-slp convert --xlsx SLP.xlsx --sheet H25 --year 2025 \\
      --bundesland RP --out public/data/bdew_h25_8760.json")]
    /// Convert one sheet to an hourly JSON series
    Convert {
        /// Path to the BDEW workbook (.xlsx)
        #[arg(long)]
        xlsx: PathBuf,

        /// Sheet (profile) name, e.g. H25
        #[arg(long)]
        sheet: String,

        /// Target year for calendar and holidays
        #[arg(long, env = "BDEW_SLP_YEAR")]
        year: i32,

        /// Bundesland code for regional holidays (RP, BY, NW, ...)
        #[arg(long, visible_alias = "region", env = "BDEW_SLP_BUNDESLAND")]
        bundesland: Region,

        /// Output JSON path (parent directories are created)
        #[arg(long)]
        out: PathBuf,

        /// Output normalization
        #[arg(long, value_enum, default_value_t = NormalizeMode::Share)]
        normalize: NormalizeMode,

        /// Handling of month/day-type pairs missing from the sheet
        #[arg(long, value_enum, default_value_t = MissingProfilePolicy::Lenient)]
        missing_profile: MissingProfilePolicy,

        /// Value of the "source" field
        #[arg(long, default_value = DEFAULT_SOURCE)]
        source: String,

        /// Pretty-print the JSON output
        #[arg(long)]
        pretty: bool,

        /// Show verbose output
        #[arg(short, long)]
        verbose: bool,
    },

    /// Show sheets and detected table layouts
    Inspect {
        /// Path to the BDEW workbook (.xlsx)
        #[arg(long)]
        xlsx: PathBuf,

        /// Sheet to show in detail (lists all sheets when omitted)
        #[arg(long)]
        sheet: Option<String>,
    },

    /// List the holiday calendar for a year and Bundesland
    Holidays {
        /// Calendar year
        #[arg(long, env = "BDEW_SLP_YEAR")]
        year: i32,

        /// Bundesland code (RP, BY, NW, ...)
        #[arg(long, visible_alias = "region", env = "BDEW_SLP_BUNDESLAND")]
        bundesland: Region,
    },

    #[command(long_about = "Run several conversions from a YAML job file.

JOB FILE:
  defaults:
    xlsx: SLP.xlsx
    year: 2025
    bundesland: RP
  jobs:
    - sheet: H25
      out: out/h25.json
    - sheet: G25
      out: out/g25.json
      normalize: annual_1e6

Relative paths resolve against the job file's directory. Jobs run in
order; the first failing job stops the batch.")]
    /// Run conversions from a YAML job file
    Batch {
        /// Path to the YAML job file
        file: PathBuf,

        /// Show verbose output
        #[arg(short, long)]
        verbose: bool,
    },
}

fn init_tracing(verbose: bool) {
    let default = if verbose {
        "bdew_slp=debug"
    } else {
        "bdew_slp=warn"
    };
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| default.into()))
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Convert {
            xlsx,
            sheet,
            year,
            bundesland,
            out,
            normalize,
            missing_profile,
            source,
            pretty,
            verbose,
        } => {
            init_tracing(verbose);
            let config = ConvertConfig {
                normalize,
                missing_profile,
                source,
                pretty,
                ..ConvertConfig::new(xlsx, sheet, year, bundesland, out)
            };
            cli::convert(config, verbose)
        }

        Commands::Inspect { xlsx, sheet } => {
            init_tracing(false);
            cli::inspect(xlsx, sheet)
        }

        Commands::Holidays { year, bundesland } => {
            init_tracing(false);
            cli::holidays(year, bundesland)
        }

        Commands::Batch { file, verbose } => {
            init_tracing(verbose);
            cli::batch(file, verbose)
        }
    }
}

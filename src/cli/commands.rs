use crate::calendar::{HolidayCalendar, Region};
use crate::config::{ConvertConfig, JobFile};
use crate::detect::{detect, detect_sheet};
use crate::error::SlpResult;
use crate::excel::GridLoader;
use crate::pipeline::{self, ConvertReport};
use crate::types::{DayType, MonthKey};
use anyhow::Context;
use colored::Colorize;
use std::path::{Path, PathBuf};

/// Format a number for display, removing unnecessary decimal places
fn format_number(n: f64) -> String {
    let rounded = (n * 1e6).round() / 1e6;
    format!("{:.6}", rounded)
        .trim_end_matches('0')
        .trim_end_matches('.')
        .to_string()
}

fn print_report(report: &ConvertReport) {
    println!(
        "{} → {} (len={}, sum={:.6}, unit={})",
        "OK".bold().green(),
        report.output.display(),
        report.hours,
        report.sum,
        report.unit
    );
}

/// Execute the convert command
pub fn convert(config: ConvertConfig, verbose: bool) -> anyhow::Result<()> {
    if verbose {
        println!("{}", "⚡ BDEW SLP → hourly JSON".bold().green());
        println!("   Workbook: {}", config.xlsx.display());
        println!("   Sheet:    {}", config.sheet.bright_blue().bold());
        println!(
            "   Year:     {} ({}, {})",
            config.year,
            config.region.code(),
            config.region.name()
        );
        println!();
    }

    let report = pipeline::convert(&config)?;

    if verbose {
        println!(
            "   Layout: {} ({} profiles)",
            report.layout.to_string().cyan(),
            report.profiles
        );
    }
    print_report(&report);
    Ok(())
}

/// Detected layout of one sheet; `None` when no layout matches
fn describe_sheet(loader: &GridLoader, name: &str) -> SlpResult<Option<String>> {
    let grid = loader.load(name)?;
    Ok(detect(&grid).map(|d| format!("{} ({} profiles)", d.layout, d.table.len())))
}

/// Execute the inspect command
///
/// Without a sheet: lists every sheet with its detected layout. With a sheet:
/// prints the daily sum of each (month, day-type) profile.
pub fn inspect(xlsx: PathBuf, sheet: Option<String>) -> anyhow::Result<()> {
    let loader = GridLoader::new(&xlsx);
    println!("{}", "🔍 BDEW SLP - Inspect".bold().green());
    println!("   Workbook: {}\n", xlsx.display());

    let Some(sheet) = sheet else {
        for name in loader.sheet_names()? {
            match describe_sheet(&loader, &name) {
                Ok(Some(layout)) => println!("   {:<20} {}", name.bright_blue(), layout),
                Ok(None) => println!("   {:<20} {}", name.bright_blue(), "-".dimmed()),
                Err(e) => println!("   {:<20} {}", name.bright_blue(), e.to_string().red()),
            }
        }
        return Ok(());
    };

    let grid = loader.load(&sheet)?;
    let detection = detect_sheet(&grid, &sheet)?;
    println!(
        "   Sheet: {} | Layout: {} | Profiles: {}\n",
        sheet.bright_blue().bold(),
        detection.layout.to_string().cyan(),
        detection.table.len()
    );

    print!("   {:<12}", "Monat");
    for day_type in DayType::ALL {
        print!("{:>14}", day_type.code().bold());
    }
    println!();
    for month in MonthKey::all() {
        print!("   {:<12}", month.german_name());
        for day_type in DayType::ALL {
            let cell = detection
                .table
                .get(month, day_type)
                .map(|p| format_number(p.sum()))
                .unwrap_or_else(|| "-".to_string());
            print!("{:>14}", cell);
        }
        println!();
    }
    Ok(())
}

/// Execute the holidays command
pub fn holidays(year: i32, region: Region) -> anyhow::Result<()> {
    let calendar = HolidayCalendar::new(year, region)?;
    println!(
        "{}",
        format!("📅 Feiertage {} - {} ({})", year, region.name(), region.code())
            .bold()
            .green()
    );
    for (date, name) in calendar.iter() {
        println!("   {}  {}", date.format("%Y-%m-%d %a"), name);
    }
    println!("\n   {} holidays", calendar.len());
    Ok(())
}

/// Execute the batch command
pub fn batch(file: PathBuf, verbose: bool) -> anyhow::Result<()> {
    let jobs = JobFile::load(&file)
        .with_context(|| format!("Failed to read job file {}", file.display()))?;
    let base_dir = file.parent().unwrap_or_else(|| Path::new("."));
    let configs = jobs.resolve(base_dir)?;

    println!(
        "{}",
        format!("⚡ BDEW SLP - Batch ({} jobs)", configs.len())
            .bold()
            .green()
    );
    for (i, config) in configs.into_iter().enumerate() {
        if verbose {
            println!(
                "   [{}] {} → {}",
                i + 1,
                config.sheet.bright_blue(),
                config.out.display()
            );
        }
        let report = pipeline::convert(&config)
            .with_context(|| format!("job {} (sheet '{}') failed", i + 1, config.sheet))?;
        print_report(&report);
    }
    Ok(())
}

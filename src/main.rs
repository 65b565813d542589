//! CLI entry point for the school report tool.
//!
//! Loads the school and student tables, builds every summary table, and
//! prints them to stdout.

use anyhow::Result;
use clap::Parser;
use school_report::analyzers::types::DistrictOverallFormula;
use school_report::join::UnmatchedPolicy;
use school_report::output::{OutputFormat, write_report};
use school_report::{Report, ReportConfig};
use std::ffi::OsStr;
use std::io::Write;
use std::path::{Path, PathBuf};
use tracing::{error, info};
use tracing_subscriber::{
    EnvFilter, Layer,
    fmt::{self, format::FmtSpan},
    layer::SubscriberExt,
    util::SubscriberInitExt,
};

#[derive(Parser)]
#[command(name = "school_report")]
#[command(about = "District, school, grade, and bucketed summaries of school test results", long_about = None)]
struct Cli {
    /// School metadata CSV
    #[arg(long, default_value = "Resources/schools_complete.csv")]
    schools: PathBuf,

    /// Student records CSV
    #[arg(long, default_value = "Resources/students_complete.csv")]
    students: PathBuf,

    /// How to render the tables
    #[arg(short, long, value_enum, default_value_t = OutputFormat::Table)]
    format: OutputFormat,

    /// What to do with students whose school is not in the school table
    #[arg(long, value_enum, default_value_t = UnmatchedPolicy::Exclude)]
    unmatched: UnmatchedPolicy,

    /// Formula for the district overall passing rate
    #[arg(long, value_enum, default_value_t = DistrictOverallFormula::RawCount)]
    district_overall: DistrictOverallFormula,

    /// Number of schools in the top and bottom views
    #[arg(long, default_value_t = 10)]
    top: usize,
}

fn main() -> Result<()> {
    dotenvy::dotenv().ok(); // Load .env file

    // Logging setup: colored stderr + JSON rolling log file
    let log_file_path =
        std::env::var("LOG_FILE_PATH").unwrap_or_else(|_| "logs/school_report.log".to_string());
    let log_dir = Path::new(&log_file_path)
        .parent()
        .unwrap_or(Path::new("logs"));
    let log_file_name = Path::new(&log_file_path)
        .file_name()
        .unwrap_or(OsStr::new("school_report.log"));

    let file_appender = tracing_appender::rolling::daily(log_dir, log_file_name);
    let (non_blocking_file, _file_guard) = tracing_appender::non_blocking(file_appender);

    let stderr_layer = fmt::layer()
        .with_target(true)
        .with_span_events(FmtSpan::CLOSE)
        .with_ansi(true)
        .with_writer(std::io::stderr)
        .with_filter(EnvFilter::from_env("RUST_LOG").add_directive("info".parse()?));

    let json_layer = fmt::layer()
        .json()
        .with_current_span(true)
        .with_span_list(true)
        .with_writer(non_blocking_file)
        .with_filter(EnvFilter::from_env("RUST_LOG_JSON").add_directive("debug".parse()?));

    tracing_subscriber::registry()
        .with(stderr_layer)
        .with(json_layer)
        .init();

    let cli = Cli::parse();

    let config = ReportConfig {
        unmatched: cli.unmatched,
        district_overall: cli.district_overall,
        top_n: cli.top,
    };
    info!(?config, format = ?cli.format, "Starting report");

    let report = match Report::from_files(&cli.schools, &cli.students, &config) {
        Ok(report) => report,
        Err(e) => {
            error!(error = %e, "Report failed");
            return Err(e.into());
        }
    };

    let stdout = std::io::stdout();
    let mut out = stdout.lock();
    write_report(&mut out, &report, cli.format)?;
    out.flush()?;

    info!(schools = report.schools.len(), "Report complete");
    Ok(())
}

//! Rendering of report tables.
//!
//! Supports aligned text tables, pretty JSON, and CSV, all written to any
//! [`Write`] sink (stdout in the CLI).

use serde::Serialize;
use std::io::Write;
use tracing::debug;

use crate::analyzers::types::{BucketSummary, DistrictSummary, GradeRow, SchoolSummary};
use crate::error::Result;
use crate::model::Grade;
use crate::report::Report;

/// Output format for the rendered report.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    #[default]
    Table,
    Json,
    Csv,
}

const SCORE_COLUMNS: [&str; 5] = [
    "Average Math Score",
    "Average Reading Score",
    "% Passing Math",
    "% Passing Reading",
    "% Overall Passing Rate",
];

/// A titled table of already-formatted cells.
#[derive(Debug, Clone, PartialEq)]
pub struct Table {
    pub title: String,
    pub headers: Vec<String>,
    pub rows: Vec<Vec<String>>,
}

impl Table {
    fn new(title: &str, headers: &[&str]) -> Self {
        Self {
            title: title.to_string(),
            headers: headers.iter().map(|h| h.to_string()).collect(),
            rows: Vec::new(),
        }
    }

    /// Writes the table with each column padded to its widest cell.
    pub fn write_text<W: Write>(&self, w: &mut W) -> Result<()> {
        let mut widths: Vec<usize> = self.headers.iter().map(|h| h.chars().count()).collect();
        for row in &self.rows {
            for (i, cell) in row.iter().enumerate() {
                widths[i] = widths[i].max(cell.chars().count());
            }
        }

        writeln!(w, "{}", self.title)?;
        write_text_row(w, &self.headers, &widths)?;
        let rule: Vec<String> = widths.iter().map(|n| "-".repeat(*n)).collect();
        write_text_row(w, &rule, &widths)?;
        for row in &self.rows {
            write_text_row(w, row, &widths)?;
        }
        writeln!(w)?;
        Ok(())
    }

    /// Writes a title record, the header record, then the rows.
    pub fn write_csv<W: Write>(&self, writer: &mut csv::Writer<W>) -> Result<()> {
        writer.write_record([self.title.as_str()])?;
        writer.write_record(&self.headers)?;
        for row in &self.rows {
            writer.write_record(row)?;
        }
        Ok(())
    }
}

fn write_text_row<W: Write>(w: &mut W, cells: &[String], widths: &[usize]) -> Result<()> {
    let padded: Vec<String> = cells
        .iter()
        .zip(widths)
        .map(|(cell, width)| format!("{:<width$}", cell, width = *width))
        .collect();
    writeln!(w, "{}", padded.join("  ").trim_end())?;
    Ok(())
}

/// Formats an amount as dollars with thousands separators, e.g. `$1,910,635.00`.
pub fn format_currency(value: f64) -> String {
    let cents = (value.abs() * 100.0).round() as u64;
    let digits = (cents / 100).to_string();

    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }

    let sign = if value < 0.0 { "-" } else { "" };
    format!("{}${}.{:02}", sign, grouped, cents % 100)
}

/// Six decimal places; missing values print as `NaN`.
pub fn format_metric(value: Option<f64>) -> String {
    match value {
        Some(v) => format!("{:.6}", v),
        None => "NaN".to_string(),
    }
}

fn district_table(d: &DistrictSummary) -> Table {
    let mut headers = vec!["Total Schools", "Total Students", "Total Budget"];
    headers.extend(SCORE_COLUMNS.iter().copied());
    let mut table = Table::new("District Summary", &headers);
    table.rows.push(vec![
        d.total_schools.to_string(),
        d.total_students.to_string(),
        format_currency(d.total_budget as f64),
        format_metric(d.average_math_score),
        format_metric(d.average_reading_score),
        format_metric(d.pct_passing_math),
        format_metric(d.pct_passing_reading),
        format_metric(d.overall_passing_rate),
    ]);
    table
}

fn school_table(title: &str, rows: &[SchoolSummary]) -> Table {
    let mut headers = vec![
        "School Name",
        "School Type",
        "Total Students",
        "Total School Budget",
        "Per Student Budget",
    ];
    headers.extend(SCORE_COLUMNS.iter().copied());
    let mut table = Table::new(title, &headers);
    for s in rows {
        table.rows.push(vec![
            s.school_name.clone(),
            s.school_type.clone(),
            s.total_students.to_string(),
            format_currency(s.total_budget as f64),
            format_currency(s.per_student_budget),
            format_metric(s.average_math_score),
            format_metric(s.average_reading_score),
            format_metric(s.pct_passing_math),
            format_metric(s.pct_passing_reading),
            format_metric(s.overall_passing_rate),
        ]);
    }
    table
}

fn grade_table(title: &str, rows: &[GradeRow]) -> Table {
    let mut headers = vec!["School Name"];
    headers.extend(Grade::ALL.iter().map(|g| g.label()));
    let mut table = Table::new(title, &headers);
    for r in rows {
        let mut cells = vec![r.school_name.clone()];
        cells.extend(r.scores.iter().map(|v| format_metric(*v)));
        table.rows.push(cells);
    }
    table
}

fn bucket_table(title: &str, label_header: &str, rows: &[BucketSummary]) -> Table {
    let mut headers = vec![label_header, "Schools"];
    headers.extend(SCORE_COLUMNS.iter().copied());
    let mut table = Table::new(title, &headers);
    for b in rows {
        table.rows.push(vec![
            b.label.clone(),
            b.school_count.to_string(),
            format_metric(b.average_math_score),
            format_metric(b.average_reading_score),
            format_metric(b.pct_passing_math),
            format_metric(b.pct_passing_reading),
            format_metric(b.overall_passing_rate),
        ]);
    }
    table
}

/// All report sections in print order.
pub fn report_tables(report: &Report) -> Vec<Table> {
    vec![
        district_table(&report.district),
        school_table("School Summary", &report.schools),
        school_table("Top Performing Schools (By Passing Rate)", &report.top_schools),
        school_table(
            "Bottom Performing Schools (By Passing Rate)",
            &report.bottom_schools,
        ),
        grade_table("Math Scores by Grade", &report.scores_by_grade.math),
        grade_table("Reading Scores by Grade", &report.scores_by_grade.reading),
        bucket_table(
            "Scores by School Spending",
            "Spending Ranges (Per Student)",
            &report.by_spending,
        ),
        bucket_table("Scores by School Size", "School Size", &report.by_size),
        bucket_table("Scores by School Type", "School Type", &report.by_type),
    ]
}

/// Renders the whole report in `format`.
pub fn write_report<W: Write>(w: &mut W, report: &Report, format: OutputFormat) -> Result<()> {
    debug!(?format, "Rendering report");
    match format {
        OutputFormat::Table => {
            for table in report_tables(report) {
                table.write_text(w)?;
            }
        }
        OutputFormat::Json => {
            serde_json::to_writer_pretty(&mut *w, report)?;
            writeln!(w)?;
        }
        OutputFormat::Csv => {
            let mut writer = csv::WriterBuilder::new()
                .flexible(true)
                .from_writer(&mut *w);
            for table in report_tables(report) {
                table.write_csv(&mut writer)?;
            }
            writer.flush()?;
        }
    }
    Ok(())
}

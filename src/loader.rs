//! CSV loading for the school and student tables.

use serde::de::DeserializeOwned;
use std::collections::HashSet;
use std::fs::File;
use std::path::Path;
use tracing::{debug, info};

use crate::error::{ReportError, Result};
use crate::model::{School, StudentRecord};

pub const SCHOOL_COLUMNS: &[&str] = &["School ID", "school_name", "type", "size", "budget"];

pub const STUDENT_COLUMNS: &[&str] = &[
    "Student ID",
    "student_name",
    "school_name",
    "grade",
    "math_score",
    "reading_score",
];

/// Reads the school table and checks that names are unique and sizes non-zero.
#[tracing::instrument(fields(path = %path.display()))]
pub fn load_schools(path: &Path) -> Result<Vec<School>> {
    let schools: Vec<School> = read_table(path, SCHOOL_COLUMNS)?;

    let mut seen = HashSet::new();
    for school in &schools {
        if !seen.insert(school.school_name.as_str()) {
            return Err(ReportError::Load(format!(
                "{}: duplicate school_name '{}'",
                path.display(),
                school.school_name
            )));
        }
        if school.size == 0 {
            return Err(ReportError::Load(format!(
                "{}: school '{}' has size 0",
                path.display(),
                school.school_name
            )));
        }
    }

    info!(schools = schools.len(), "School table loaded");
    Ok(schools)
}

#[tracing::instrument(fields(path = %path.display()))]
pub fn load_students(path: &Path) -> Result<Vec<StudentRecord>> {
    let students: Vec<StudentRecord> = read_table(path, STUDENT_COLUMNS)?;
    info!(students = students.len(), "Student table loaded");
    Ok(students)
}

/// Loads both tables, schools first.
pub fn load_tables(
    schools_path: &Path,
    students_path: &Path,
) -> Result<(Vec<School>, Vec<StudentRecord>)> {
    let schools = load_schools(schools_path)?;
    let students = load_students(students_path)?;
    Ok((schools, students))
}

fn read_table<T: DeserializeOwned>(path: &Path, required: &[&str]) -> Result<Vec<T>> {
    let file = File::open(path)
        .map_err(|e| ReportError::Load(format!("{}: {}", path.display(), e)))?;
    let mut rdr = csv::Reader::from_reader(file);

    let headers = rdr
        .headers()
        .map_err(|e| ReportError::Load(format!("{}: {}", path.display(), e)))?
        .clone();
    let missing: Vec<&str> = required
        .iter()
        .copied()
        .filter(|col| !headers.iter().any(|h| h == *col))
        .collect();
    if !missing.is_empty() {
        return Err(ReportError::Load(format!(
            "{}: missing required columns: {}",
            path.display(),
            missing.join(", ")
        )));
    }
    debug!(columns = headers.len(), "Header check passed");

    let mut rows = Vec::new();
    for (i, result) in rdr.deserialize().enumerate() {
        // Line 1 is the header.
        let row: T = result.map_err(|e| {
            ReportError::Load(format!("{}: line {}: {}", path.display(), i + 2, e))
        })?;
        rows.push(row);
    }

    Ok(rows)
}

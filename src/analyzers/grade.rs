use std::collections::BTreeMap;

use crate::analyzers::types::{GradeRow, GradeTables};
use crate::analyzers::utility::MeanAcc;
use crate::model::{Grade, StudentRecord};

/// Mean math and reading score per school and grade.
///
/// Runs over the raw student table, so students without a matching school
/// still appear under their school name. Rows are ordered by school name.
pub fn scores_by_grade(students: &[StudentRecord]) -> GradeTables {
    let mut groups: BTreeMap<&str, [(MeanAcc, MeanAcc); 4]> = BTreeMap::new();

    for s in students {
        let cells = groups.entry(s.school_name.as_str()).or_default();
        let (math, reading) = &mut cells[s.grade.index()];
        math.push(f64::from(s.math_score));
        reading.push(f64::from(s.reading_score));
    }

    let mut math = Vec::with_capacity(groups.len());
    let mut reading = Vec::with_capacity(groups.len());

    for (school_name, cells) in groups {
        math.push(GradeRow {
            school_name: school_name.to_string(),
            scores: Grade::ALL.map(|g| cells[g.index()].0.mean()),
        });
        reading.push(GradeRow {
            school_name: school_name.to_string(),
            scores: Grade::ALL.map(|g| cells[g.index()].1.mean()),
        });
    }

    GradeTables { math, reading }
}

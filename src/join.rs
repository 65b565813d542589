//! Left join of students onto schools by exact school name.

use std::collections::HashMap;
use tracing::{info, warn};

use crate::error::{ReportError, Result};
use crate::model::{CombinedRecord, School, StudentRecord};

/// What to do with a student whose school is not in the school table.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, clap::ValueEnum)]
pub enum UnmatchedPolicy {
    /// Fail the run with a join error.
    Reject,
    /// Keep the student with no school attributes.
    #[default]
    Exclude,
}

/// Joins every student to its school, preserving student order.
pub fn join(
    schools: &[School],
    students: &[StudentRecord],
    policy: UnmatchedPolicy,
) -> Result<Vec<CombinedRecord>> {
    let by_name: HashMap<&str, &School> = schools
        .iter()
        .map(|s| (s.school_name.as_str(), s))
        .collect();

    let mut combined = Vec::with_capacity(students.len());
    let mut unmatched = 0usize;

    for student in students {
        let school = by_name.get(student.school_name.as_str()).copied();
        if school.is_none() {
            if policy == UnmatchedPolicy::Reject {
                return Err(ReportError::Join {
                    student: student.student_name.clone(),
                    school: student.school_name.clone(),
                });
            }
            warn!(
                student = %student.student_name,
                school = %student.school_name,
                "Student has no matching school"
            );
            unmatched += 1;
        }

        combined.push(CombinedRecord {
            student: student.clone(),
            school: school.cloned(),
        });
    }

    info!(rows = combined.len(), unmatched, "Join complete");
    Ok(combined)
}

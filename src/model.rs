//! Row types for the two input tables and their join.

use serde::Deserialize;
use std::fmt;

/// Score at or above which a student passes a subject.
pub const PASSING_SCORE: u32 = 70;

/// A row of the school table. `school_name` is the key.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct School {
    #[serde(rename = "School ID")]
    pub school_id: u32,
    pub school_name: String,
    #[serde(rename = "type")]
    pub school_type: String,
    pub size: u32,
    pub budget: u64,
}

impl School {
    pub fn per_student_budget(&self) -> f64 {
        self.budget as f64 / self.size as f64
    }
}

/// Grade level of a student.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Deserialize)]
pub enum Grade {
    #[serde(rename = "9th")]
    Ninth,
    #[serde(rename = "10th")]
    Tenth,
    #[serde(rename = "11th")]
    Eleventh,
    #[serde(rename = "12th")]
    Twelfth,
}

impl Grade {
    pub const ALL: [Grade; 4] = [Grade::Ninth, Grade::Tenth, Grade::Eleventh, Grade::Twelfth];

    pub fn label(self) -> &'static str {
        match self {
            Grade::Ninth => "9th",
            Grade::Tenth => "10th",
            Grade::Eleventh => "11th",
            Grade::Twelfth => "12th",
        }
    }

    /// Position of the grade in [`Grade::ALL`].
    pub fn index(self) -> usize {
        self as usize
    }
}

impl fmt::Display for Grade {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// A row of the student table.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct StudentRecord {
    #[serde(rename = "Student ID")]
    pub student_id: u32,
    pub student_name: String,
    pub school_name: String,
    pub grade: Grade,
    pub math_score: u32,
    pub reading_score: u32,
}

impl StudentRecord {
    pub fn passes_math(&self) -> bool {
        self.math_score >= PASSING_SCORE
    }

    pub fn passes_reading(&self) -> bool {
        self.reading_score >= PASSING_SCORE
    }
}

/// A student enriched with its school's attributes.
///
/// `school` is `None` only when the join ran with unmatched students excluded
/// from school-level metrics.
#[derive(Debug, Clone, PartialEq)]
pub struct CombinedRecord {
    pub student: StudentRecord,
    pub school: Option<School>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_per_student_budget() {
        let school = School {
            school_id: 0,
            school_name: "Huang High School".to_string(),
            school_type: "District".to_string(),
            size: 2917,
            budget: 1_910_635,
        };
        assert!((school.per_student_budget() - 655.0).abs() < 1e-9);
    }

    #[test]
    fn test_passing_threshold_is_inclusive() {
        let mut student = StudentRecord {
            student_id: 1,
            student_name: "Paul Bradley".to_string(),
            school_name: "Huang High School".to_string(),
            grade: Grade::Ninth,
            math_score: 70,
            reading_score: 69,
        };
        assert!(student.passes_math());
        assert!(!student.passes_reading());

        student.reading_score = 70;
        assert!(student.passes_reading());
    }

    #[test]
    fn test_grade_order_and_labels() {
        let labels: Vec<_> = Grade::ALL.iter().map(|g| g.label()).collect();
        assert_eq!(labels, vec!["9th", "10th", "11th", "12th"]);
        assert_eq!(Grade::Twelfth.index(), 3);
    }
}

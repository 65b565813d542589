//! End-to-end report pipeline: load, join, aggregate.

use chrono::{DateTime, Utc};
use serde::Serialize;
use std::path::Path;
use tracing::info;

use crate::analyzers::buckets::{scores_by_size, scores_by_spending, scores_by_type};
use crate::analyzers::district::district_summary;
use crate::analyzers::grade::scores_by_grade;
use crate::analyzers::school::{bottom_by_passing_rate, school_summaries, top_by_passing_rate};
use crate::analyzers::types::{
    BucketSummary, DistrictOverallFormula, DistrictSummary, GradeTables, SchoolSummary,
};
use crate::error::Result;
use crate::join::{UnmatchedPolicy, join};
use crate::loader::load_tables;
use crate::model::{School, StudentRecord};

/// Options that change what the pipeline computes.
#[derive(Debug, Clone, Copy)]
pub struct ReportConfig {
    pub unmatched: UnmatchedPolicy,
    pub district_overall: DistrictOverallFormula,
    pub top_n: usize,
}

impl Default for ReportConfig {
    fn default() -> Self {
        Self {
            unmatched: UnmatchedPolicy::default(),
            district_overall: DistrictOverallFormula::default(),
            top_n: 10,
        }
    }
}

/// Every table the report prints.
#[derive(Debug, Clone, Serialize)]
pub struct Report {
    pub generated_at: DateTime<Utc>,
    pub district: DistrictSummary,
    pub schools: Vec<SchoolSummary>,
    pub top_schools: Vec<SchoolSummary>,
    pub bottom_schools: Vec<SchoolSummary>,
    pub scores_by_grade: GradeTables,
    pub by_spending: Vec<BucketSummary>,
    pub by_size: Vec<BucketSummary>,
    pub by_type: Vec<BucketSummary>,
}

impl Report {
    /// Runs the pipeline over already-loaded tables. Inputs are not modified.
    pub fn build(
        schools: &[School],
        students: &[StudentRecord],
        config: &ReportConfig,
    ) -> Result<Self> {
        let combined = join(schools, students, config.unmatched)?;

        let district = district_summary(schools, &combined, config.district_overall);
        let summaries = school_summaries(schools, &combined);
        let top_schools = top_by_passing_rate(&summaries, config.top_n);
        let bottom_schools = bottom_by_passing_rate(&summaries, config.top_n);
        let by_grade = scores_by_grade(students);
        let by_spending = scores_by_spending(&summaries)?;
        let by_size = scores_by_size(&summaries)?;
        let by_type = scores_by_type(&summaries);

        info!(
            schools = summaries.len(),
            students = district.total_students,
            "Report built"
        );

        Ok(Report {
            generated_at: Utc::now(),
            district,
            schools: summaries,
            top_schools,
            bottom_schools,
            scores_by_grade: by_grade,
            by_spending,
            by_size,
            by_type,
        })
    }

    /// Loads both CSV files and builds the report.
    #[tracing::instrument(
        skip(config),
        fields(schools = %schools_path.display(), students = %students_path.display())
    )]
    pub fn from_files(
        schools_path: &Path,
        students_path: &Path,
        config: &ReportConfig,
    ) -> Result<Self> {
        let (schools, students) = load_tables(schools_path, students_path)?;
        Self::build(&schools, &students, config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ReportError;
    use crate::model::Grade;

    #[test]
    fn test_build_report() {
        let schools = vec![school("A", "Charter", 2, 1000), school("B", "District", 2, 1300)];
        let students = vec![
            student("A", Grade::Ninth, 90, 80),
            student("A", Grade::Tenth, 70, 60),
            student("B", Grade::Ninth, 50, 90),
            student("B", Grade::Ninth, 40, 95),
        ];

        let report = Report::build(&schools, &students, &ReportConfig::default()).unwrap();

        assert_eq!(report.district.total_schools, 2);
        assert_eq!(report.district.total_students, 4);
        assert_eq!(report.schools.len(), 2);
        assert_eq!(report.top_schools[0].school_name, "A");
        assert_eq!(report.bottom_schools[0].school_name, "B");
        assert_eq!(report.scores_by_grade.math.len(), 2);
        assert_eq!(report.by_type.len(), 2);

        let per_school: u32 = report.schools.iter().map(|s| s.total_students).sum();
        assert_eq!(per_school as usize, report.district.total_students);
    }

    #[test]
    fn test_bucket_error_fails_report() {
        let schools = vec![school("A", "Charter", 1, 10_000)];
        let students = vec![student("A", Grade::Ninth, 90, 80)];

        let result = Report::build(&schools, &students, &ReportConfig::default());
        assert!(matches!(result, Err(ReportError::Bucket { .. })));
    }

    #[test]
    fn test_unmatched_rejected_by_config() {
        let schools = vec![school("A", "Charter", 1, 600)];
        let students = vec![student("Z", Grade::Ninth, 90, 80)];
        let config = ReportConfig {
            unmatched: UnmatchedPolicy::Reject,
            ..ReportConfig::default()
        };

        let result = Report::build(&schools, &students, &config);
        assert!(matches!(result, Err(ReportError::Join { .. })));
    }

    fn school(name: &str, school_type: &str, size: u32, budget: u64) -> School {
        School {
            school_id: 0,
            school_name: name.to_string(),
            school_type: school_type.to_string(),
            size,
            budget,
        }
    }

    fn student(school: &str, grade: Grade, math: u32, reading: u32) -> StudentRecord {
        StudentRecord {
            student_id: 0,
            student_name: "student".to_string(),
            school_name: school.to_string(),
            grade,
            math_score: math,
            reading_score: reading,
        }
    }
}

//! Data types produced by the aggregation pipeline.

use serde::ser::{SerializeMap, Serializer};
use serde::Serialize;

use crate::model::Grade;

/// How the district-level overall passing rate is computed.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, clap::ValueEnum)]
#[serde(rename_all = "kebab-case")]
pub enum DistrictOverallFormula {
    /// `(passing math count + passing reading count) / 2`, a raw student count.
    #[default]
    RawCount,
    /// Mean of the math and reading passing percentages.
    Percent,
}

/// District-wide metrics, one row.
///
/// Score and rate fields are `None` when there are no students.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DistrictSummary {
    pub total_schools: usize,
    pub total_students: usize,
    pub total_budget: u64,
    pub average_math_score: Option<f64>,
    pub average_reading_score: Option<f64>,
    pub pct_passing_math: Option<f64>,
    pub pct_passing_reading: Option<f64>,
    pub overall_passing_rate: Option<f64>,
    pub overall_formula: DistrictOverallFormula,
}

/// Metrics for one school.
///
/// Score and percentage fields are `None` for a school with no joined students.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SchoolSummary {
    pub school_name: String,
    pub school_type: String,
    pub total_students: u32,
    pub total_budget: u64,
    pub per_student_budget: f64,
    pub average_math_score: Option<f64>,
    pub average_reading_score: Option<f64>,
    pub pct_passing_math: Option<f64>,
    pub pct_passing_reading: Option<f64>,
    pub overall_passing_rate: Option<f64>,
}

/// Mean score per grade for one school, indexed like `Grade::ALL`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GradeRow {
    pub school_name: String,
    #[serde(serialize_with = "serialize_grade_scores")]
    pub scores: [Option<f64>; 4],
}

/// Writes grade scores as a map keyed by grade label, e.g. `{"9th": 76.5, ...}`.
fn serialize_grade_scores<S>(scores: &[Option<f64>; 4], serializer: S) -> Result<S::Ok, S::Error>
where
    S: Serializer,
{
    let mut map = serializer.serialize_map(Some(scores.len()))?;
    for grade in Grade::ALL {
        map.serialize_entry(grade.label(), &scores[grade.index()])?;
    }
    map.end()
}

/// Per-school, per-grade means for both subjects.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GradeTables {
    pub math: Vec<GradeRow>,
    pub reading: Vec<GradeRow>,
}

/// Unweighted means of school metrics within one bucket.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BucketSummary {
    pub label: String,
    pub school_count: usize,
    pub average_math_score: Option<f64>,
    pub average_reading_score: Option<f64>,
    pub pct_passing_math: Option<f64>,
    pub pct_passing_reading: Option<f64>,
    pub overall_passing_rate: Option<f64>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_grade_row_json_keyed_by_label() {
        let row = GradeRow {
            school_name: "Huang High School".to_string(),
            scores: [Some(76.5), None, Some(80.0), Some(71.25)],
        };

        let value = serde_json::to_value(&row).unwrap();

        assert_eq!(value["school_name"], "Huang High School");
        assert_eq!(value["scores"]["9th"], 76.5);
        assert!(value["scores"]["10th"].is_null());
        assert_eq!(value["scores"]["11th"], 80.0);
        assert_eq!(value["scores"]["12th"], 71.25);
        assert_eq!(value["scores"].as_object().unwrap().len(), 4);
    }
}

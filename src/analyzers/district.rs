use crate::analyzers::types::{DistrictOverallFormula, DistrictSummary};
use crate::analyzers::utility::{MeanAcc, pct};
use crate::model::{CombinedRecord, School};

/// Computes district-wide totals, means, and passing rates.
///
/// Student metrics run over every joined row, including students without a
/// matching school. School totals run over the school table. With no
/// students, every score and rate is `None`.
pub fn district_summary(
    schools: &[School],
    combined: &[CombinedRecord],
    formula: DistrictOverallFormula,
) -> DistrictSummary {
    let total_students = combined.len();
    let total_budget: u64 = schools.iter().map(|s| s.budget).sum();

    let mut math = MeanAcc::default();
    let mut reading = MeanAcc::default();
    let mut passing_math = 0usize;
    let mut passing_reading = 0usize;

    for row in combined {
        math.push(f64::from(row.student.math_score));
        reading.push(f64::from(row.student.reading_score));
        if row.student.passes_math() {
            passing_math += 1;
        }
        if row.student.passes_reading() {
            passing_reading += 1;
        }
    }

    let has_students = total_students > 0;
    let pct_passing_math = has_students.then(|| pct(passing_math, total_students));
    let pct_passing_reading = has_students.then(|| pct(passing_reading, total_students));

    let overall_passing_rate = match (formula, pct_passing_math, pct_passing_reading) {
        (_, None, _) | (_, _, None) => None,
        (DistrictOverallFormula::RawCount, _, _) => {
            Some((passing_math + passing_reading) as f64 / 2.0)
        }
        (DistrictOverallFormula::Percent, Some(m), Some(r)) => Some((m + r) / 2.0),
    };

    DistrictSummary {
        total_schools: schools.len(),
        total_students,
        total_budget,
        average_math_score: math.mean(),
        average_reading_score: reading.mean(),
        pct_passing_math,
        pct_passing_reading,
        overall_passing_rate,
        overall_formula: formula,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Grade, StudentRecord};

    #[test]
    fn test_district_totals() {
        let schools = vec![school("A", 2, 1000), school("B", 2, 3000)];
        let combined = vec![
            row("A", 90, 50),
            row("A", 70, 70),
            row("B", 60, 80),
            row("B", 40, 100),
        ];

        let d = district_summary(&schools, &combined, DistrictOverallFormula::RawCount);

        assert_eq!(d.total_schools, 2);
        assert_eq!(d.total_students, 4);
        assert_eq!(d.total_budget, 4000);
        assert_eq!(d.average_math_score, Some(65.0));
        assert_eq!(d.average_reading_score, Some(75.0));
        assert_eq!(d.pct_passing_math, Some(50.0));
        assert_eq!(d.pct_passing_reading, Some(75.0));
        // (2 + 3) / 2 students, not a percentage
        assert_eq!(d.overall_passing_rate, Some(2.5));
    }

    #[test]
    fn test_percent_formula() {
        let schools = vec![school("A", 2, 1000)];
        let combined = vec![row("A", 90, 50), row("A", 70, 70)];

        let d = district_summary(&schools, &combined, DistrictOverallFormula::Percent);

        assert_eq!(d.pct_passing_math, Some(100.0));
        assert_eq!(d.pct_passing_reading, Some(50.0));
        assert_eq!(d.overall_passing_rate, Some(75.0));
    }

    #[test]
    fn test_unmatched_students_count_toward_district() {
        let schools = vec![school("A", 1, 1000)];
        let mut orphan = row("Z", 100, 100);
        orphan.school = None;
        let combined = vec![row("A", 50, 50), orphan];

        let d = district_summary(&schools, &combined, DistrictOverallFormula::Percent);

        assert_eq!(d.total_students, 2);
        assert_eq!(d.pct_passing_math, Some(50.0));
    }

    #[test]
    fn test_no_students_has_no_rates() {
        let schools = vec![school("A", 2, 1000)];

        for formula in [DistrictOverallFormula::RawCount, DistrictOverallFormula::Percent] {
            let d = district_summary(&schools, &[], formula);
            assert_eq!(d.total_schools, 1);
            assert_eq!(d.total_students, 0);
            assert_eq!(d.total_budget, 1000);
            assert_eq!(d.average_math_score, None);
            assert_eq!(d.average_reading_score, None);
            assert_eq!(d.pct_passing_math, None);
            assert_eq!(d.pct_passing_reading, None);
            assert_eq!(d.overall_passing_rate, None);
        }
    }

    fn school(name: &str, size: u32, budget: u64) -> School {
        School {
            school_id: 0,
            school_name: name.to_string(),
            school_type: "District".to_string(),
            size,
            budget,
        }
    }

    fn row(school_name: &str, math: u32, reading: u32) -> CombinedRecord {
        CombinedRecord {
            student: StudentRecord {
                student_id: 0,
                student_name: "student".to_string(),
                school_name: school_name.to_string(),
                grade: Grade::Tenth,
                math_score: math,
                reading_score: reading,
            },
            school: Some(school(school_name, 2, 1000)),
        }
    }
}

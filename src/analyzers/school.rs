use std::cmp::Ordering;
use std::collections::HashMap;
use tracing::{debug, warn};

use crate::analyzers::types::SchoolSummary;
use crate::analyzers::utility::{MeanAcc, pct};
use crate::model::{CombinedRecord, School};

#[derive(Default)]
struct SchoolAcc {
    math: MeanAcc,
    reading: MeanAcc,
    passing_math: usize,
    passing_reading: usize,
}

/// Builds one [`SchoolSummary`] per school, in school table order.
///
/// Passing percentages are taken over the school's listed size. Rows without
/// a school are skipped.
pub fn school_summaries(schools: &[School], combined: &[CombinedRecord]) -> Vec<SchoolSummary> {
    let mut groups: HashMap<&str, SchoolAcc> = HashMap::new();

    for row in combined.iter().filter(|r| r.school.is_some()) {
        let acc = groups.entry(row.student.school_name.as_str()).or_default();
        acc.math.push(f64::from(row.student.math_score));
        acc.reading.push(f64::from(row.student.reading_score));
        if row.student.passes_math() {
            acc.passing_math += 1;
        }
        if row.student.passes_reading() {
            acc.passing_reading += 1;
        }
    }

    schools
        .iter()
        .map(|school| {
            let size = school.size as usize;
            let acc = groups.get(school.school_name.as_str());

            let enrolled = acc.map_or(0, |a| a.math.count);
            if enrolled != size {
                warn!(
                    school = %school.school_name,
                    size,
                    enrolled,
                    "Listed size differs from joined student count"
                );
            }

            let (pct_passing_math, pct_passing_reading) = match acc {
                Some(a) => (
                    Some(pct(a.passing_math, size)),
                    Some(pct(a.passing_reading, size)),
                ),
                None => (None, None),
            };
            let overall_passing_rate = match (pct_passing_math, pct_passing_reading) {
                (Some(m), Some(r)) => Some((m + r) / 2.0),
                _ => None,
            };

            debug!(school = %school.school_name, enrolled, "School summarized");

            SchoolSummary {
                school_name: school.school_name.clone(),
                school_type: school.school_type.clone(),
                total_students: school.size,
                total_budget: school.budget,
                per_student_budget: school.per_student_budget(),
                average_math_score: acc.and_then(|a| a.math.mean()),
                average_reading_score: acc.and_then(|a| a.reading.mean()),
                pct_passing_math,
                pct_passing_reading,
                overall_passing_rate,
            }
        })
        .collect()
}

/// The `n` schools with the highest overall passing rate, descending.
///
/// Ties keep input order; schools without a rate sort last.
pub fn top_by_passing_rate(summaries: &[SchoolSummary], n: usize) -> Vec<SchoolSummary> {
    sorted_by_rate(summaries, n, true)
}

/// The `n` schools with the lowest overall passing rate, ascending.
pub fn bottom_by_passing_rate(summaries: &[SchoolSummary], n: usize) -> Vec<SchoolSummary> {
    sorted_by_rate(summaries, n, false)
}

fn sorted_by_rate(summaries: &[SchoolSummary], n: usize, descending: bool) -> Vec<SchoolSummary> {
    let mut sorted = summaries.to_vec();
    sorted.sort_by(|a, b| match (a.overall_passing_rate, b.overall_passing_rate) {
        (Some(x), Some(y)) if descending => y.total_cmp(&x),
        (Some(x), Some(y)) => x.total_cmp(&y),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    });
    sorted.truncate(n);
    sorted
}

//! Groups school summaries into spending, size, and type buckets.

use std::collections::BTreeMap;
use tracing::debug;

use crate::analyzers::types::{BucketSummary, SchoolSummary};
use crate::analyzers::utility::mean_present;
use crate::error::{ReportError, Result};

/// Ordered half-open `(edge[i], edge[i + 1]]` intervals with one label each.
#[derive(Debug, Clone, Copy)]
pub struct Bins {
    pub dimension: &'static str,
    pub edges: &'static [f64],
    pub labels: &'static [&'static str],
}

pub const SPENDING_BINS: Bins = Bins {
    dimension: "per student budget",
    edges: &[0.0, 585.0, 615.0, 645.0, 675.0],
    labels: &["<$585", "$585-615", "$615-645", "$645-675"],
};

pub const SIZE_BINS: Bins = Bins {
    dimension: "school size",
    edges: &[0.0, 1000.0, 2000.0, 5000.0],
    labels: &["Small (<1000)", "Medium (1000-2000)", "Large (2000-5000)"],
};

impl Bins {
    /// Index of the bin holding `value`. A value equal to an edge falls in
    /// the lower bin; values outside every bin are an error.
    pub fn assign(&self, value: f64) -> Result<usize> {
        self.edges
            .windows(2)
            .position(|w| value > w[0] && value <= w[1])
            .ok_or(ReportError::Bucket {
                dimension: self.dimension,
                value,
                lower: self.edges[0],
                upper: self.edges[self.edges.len() - 1],
            })
    }

    /// Buckets `summaries` by `key`, one row per label in edge order.
    pub fn summarize<F>(&self, summaries: &[SchoolSummary], key: F) -> Result<Vec<BucketSummary>>
    where
        F: Fn(&SchoolSummary) -> f64,
    {
        let mut groups: Vec<Vec<&SchoolSummary>> = vec![Vec::new(); self.labels.len()];
        for s in summaries {
            let idx = self.assign(key(s))?;
            groups[idx].push(s);
        }

        Ok(self
            .labels
            .iter()
            .zip(groups)
            .map(|(label, members)| bucket_row(label, &members))
            .collect())
    }
}

/// Buckets schools by per-student budget.
pub fn scores_by_spending(summaries: &[SchoolSummary]) -> Result<Vec<BucketSummary>> {
    let rows = SPENDING_BINS.summarize(summaries, |s| s.per_student_budget)?;
    debug!(buckets = rows.len(), "Spending buckets built");
    Ok(rows)
}

/// Buckets schools by total student count.
pub fn scores_by_size(summaries: &[SchoolSummary]) -> Result<Vec<BucketSummary>> {
    let rows = SIZE_BINS.summarize(summaries, |s| f64::from(s.total_students))?;
    debug!(buckets = rows.len(), "Size buckets built");
    Ok(rows)
}

/// Groups schools by school type, ordered by type name.
pub fn scores_by_type(summaries: &[SchoolSummary]) -> Vec<BucketSummary> {
    let mut groups: BTreeMap<&str, Vec<&SchoolSummary>> = BTreeMap::new();
    for s in summaries {
        groups.entry(s.school_type.as_str()).or_default().push(s);
    }

    groups
        .into_iter()
        .map(|(label, members)| bucket_row(label, &members))
        .collect()
}

fn bucket_row(label: &str, members: &[&SchoolSummary]) -> BucketSummary {
    BucketSummary {
        label: label.to_string(),
        school_count: members.len(),
        average_math_score: mean_present(members.iter().map(|s| s.average_math_score)),
        average_reading_score: mean_present(members.iter().map(|s| s.average_reading_score)),
        pct_passing_math: mean_present(members.iter().map(|s| s.pct_passing_math)),
        pct_passing_reading: mean_present(members.iter().map(|s| s.pct_passing_reading)),
        overall_passing_rate: mean_present(members.iter().map(|s| s.overall_passing_rate)),
    }
}

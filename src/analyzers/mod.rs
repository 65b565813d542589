//! School performance aggregation.
//!
//! District totals, per-school summaries, per-grade means, and bucketed
//! averages over the per-school summaries.

pub mod buckets;
pub mod district;
pub mod grade;
pub mod school;
pub mod types;
pub mod utility;

//! # Data Model
//!
//! Row, query and result types shared by the loader, the aggregator and the
//! rollup. Everything here is a plain value: results are recomputed per
//! query from an immutable snapshot and never mutated in place.

mod error;
mod query;
mod result;
mod row;

pub use error::QueryError;
pub use query::{CategoryFilter, ComparisonQuery, MetricKind, PeriodRange, DEFAULT_TOP_N};
pub use result::{CategoryComparison, ComparisonOutcome, ComparisonResult, Counts};
pub use row::MetricRow;
pub(crate) use row::safe_ratio;

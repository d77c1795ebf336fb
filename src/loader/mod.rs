//! # Dataset Loader/Normalizer
//!
//! Reads the CSV snapshots into [`MetricTable`]s:
//!
//! - full state names map to postal codes through [`crate::states`]; an
//!   explicit `state_abbrev` column wins when present
//! - count columns are coerced to numbers, anything non-numeric becomes 0
//! - a missing required column aborts the load with
//!   [`LoadError::MissingColumn`]
//!
//! Nothing else is transformed and no row is dropped here; sentinel
//! categories are filtered later by the aggregator.

mod error;
mod tables;


pub use error::LoadError;
pub use tables::{
    load_career_intensity_table, load_career_share_table, load_density_table, load_skills_table,
    load_table, read_table, MetricTable,
};

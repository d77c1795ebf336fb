//! # jobatlas - Comparative Metrics for AI Job Postings
//!
//! `jobatlas` turns pre-aggregated job-posting snapshots (AI jobs per state
//! and year, per career area, per skill) into the numbers a comparison
//! dashboard shows: ranked head-to-head category comparisons between two
//! states, a significance annotation per category, per-state map rollups
//! and the year animation that steps through them.
//!
//! ## Key Features
//!
//! - **Top-N comparison**: rank a reference state's categories, align a
//!   comparison state to that ranking, zero-fill what it lacks.
//!
//! - **Significance**: two-proportion z-test per category, with an explicit
//!   "not computable" outcome instead of a misleading p-value.
//!
//! - **Rollups**: share-of-state and share-of-nation values per state over
//!   any year range, and per-year frames for animation.
//!
//! - **Pure queries**: tables are loaded once into an immutable
//!   [`dataset::Snapshot`]; every query is a function of (snapshot, query).
//!
//! ## Quick Start
//!
//! ```rust
//! use jobatlas::prelude::*;
//!
//! let rows = vec![
//!     MetricRow::new("CA", 30.0, 100.0).with_category("Software"),
//!     MetricRow::new("CA", 5.0, 100.0).with_category("Nursing"),
//!     MetricRow::new("TN", 40.0, 100.0).with_category("Software"),
//! ];
//!
//! let outcome = compare(&rows, &ComparisonQuery::new("California", "TN"));
//! let result = outcome.result().expect("CA has rows");
//!
//! assert_eq!(result.categories(), ["Software", "Nursing"]);
//! assert_eq!(result.items[1].comparison_value, 0.0);
//! assert!(result.items[1].p_value.is_none());
//! ```
//!
//! ## Architecture
//!
//! - [`loader`]: CSV snapshot readers, one per table kind
//! - [`schema`]: column names and header resolution
//! - [`model`]: rows, queries and results
//! - [`aggregate`]: the Top-N comparative aggregator
//! - [`significance`]: two-proportion z-test
//! - [`rollup`]: per-state geographic and temporal rollups
//! - [`animation`]: year playback state machine
//! - [`dataset`]: the loaded snapshot and its query surface
//! - [`validator`]: integrity checks over loaded tables
//! - [`report`]: terminal and JSON rendering
//! - [`states`]: state name / postal code lookup

#![deny(missing_docs)]
#![deny(rustdoc::missing_crate_level_docs)]

pub mod aggregate;
pub mod animation;
pub mod dataset;
pub mod loader;
pub mod model;
pub mod report;
pub mod rollup;
pub mod schema;
pub mod significance;
pub mod states;
pub mod validator;

/// Re-export commonly used types for convenience
pub mod prelude {
    pub use crate::aggregate::{compare, is_sentinel};
    pub use crate::animation::{Playback, PlaybackState, DEFAULT_TICK_INTERVAL_MS};
    pub use crate::dataset::{DataPaths, DatasetError, Snapshot};
    pub use crate::loader::{load_table, read_table, LoadError, MetricTable};
    pub use crate::model::{
        CategoryComparison, CategoryFilter, ComparisonOutcome, ComparisonQuery, ComparisonResult,
        Counts, MetricKind, MetricRow, PeriodRange,
    };
    pub use crate::rollup::{rollup, rollup_frames, GeoRollup, Rollup, RollupFrame};
    pub use crate::schema::TableKind;
    pub use crate::significance::{two_proportion_ztest, Significance};
    pub use crate::validator::{validate_snapshot, ValidationReport};
}

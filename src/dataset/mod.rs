//! # Snapshot
//!
//! The immutable bundle of loaded tables every dashboard view reads from.
//! It is loaded once at startup and passed explicitly into each computation,
//! so a query is a pure function of (snapshot, query).
//!
//! ## Default File Layout
//!
//! ```text
//! data/
//! ├── DensityMapDataV3.csv                  # density
//! ├── TopAICareerDataV2_with_other.csv      # career share
//! ├── CareerAreaIntensity.csv               # career intensity
//! └── TopAISkillsChartData_CareerArea.csv   # skills
//! ```
//!
//! ## Usage
//!
//! ```rust,no_run
//! use jobatlas::dataset::{DataPaths, Snapshot};
//! use jobatlas::model::ComparisonQuery;
//! use jobatlas::schema::TableKind;
//!
//! let snapshot = Snapshot::load(&DataPaths::in_dir("data"))?;
//! let outcome = snapshot.compare(TableKind::CareerShare, &ComparisonQuery::new("CA", "TN"))?;
//! # Ok::<(), jobatlas::dataset::DatasetError>(())
//! ```

use std::path::{Path, PathBuf};

use log::info;
use serde::{Deserialize, Serialize};

use crate::aggregate;
use crate::loader::{load_table, LoadError, MetricTable};
use crate::model::{ComparisonOutcome, ComparisonQuery, MetricKind, PeriodRange};
use crate::rollup::{self, Rollup, RollupFrame};
use crate::schema::TableKind;


/// Default file name of the density snapshot
pub const DEFAULT_DENSITY_FILE: &str = "DensityMapDataV3.csv";
/// Default file name of the career share snapshot
pub const DEFAULT_CAREER_SHARE_FILE: &str = "TopAICareerDataV2_with_other.csv";
/// Default file name of the career intensity snapshot
pub const DEFAULT_CAREER_INTENSITY_FILE: &str = "CareerAreaIntensity.csv";
/// Default file name of the skills snapshot
pub const DEFAULT_SKILLS_FILE: &str = "TopAISkillsChartData_CareerArea.csv";

/// Errors from snapshot loading and queries
#[derive(Debug, thiserror::Error)]
pub enum DatasetError {
    /// A table failed to load
    #[error("Failed to load table: {0}")]
    Load(#[from] LoadError),

    /// A query needed a table that was not configured
    #[error("The {0} table is not loaded")]
    TableNotLoaded(TableKind),
}

/// Where each snapshot lives. Unset tables are skipped at load time.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DataPaths {
    /// Density snapshot
    pub density: Option<PathBuf>,
    /// Career share snapshot
    pub career_share: Option<PathBuf>,
    /// Career intensity snapshot
    pub career_intensity: Option<PathBuf>,
    /// Skills snapshot
    pub skills: Option<PathBuf>,
}

impl DataPaths {
    /// All four tables under their default names inside `dir`
    pub fn in_dir<P: AsRef<Path>>(dir: P) -> Self {
        let dir = dir.as_ref();
        Self {
            density: Some(dir.join(DEFAULT_DENSITY_FILE)),
            career_share: Some(dir.join(DEFAULT_CAREER_SHARE_FILE)),
            career_intensity: Some(dir.join(DEFAULT_CAREER_INTENSITY_FILE)),
            skills: Some(dir.join(DEFAULT_SKILLS_FILE)),
        }
    }

    /// Keep only the listed tables configured
    pub fn only(&self, kinds: &[TableKind]) -> Self {
        let keep = |kind: TableKind| {
            if kinds.contains(&kind) {
                self.path(kind).map(Path::to_path_buf)
            } else {
                None
            }
        };
        Self {
            density: keep(TableKind::Density),
            career_share: keep(TableKind::CareerShare),
            career_intensity: keep(TableKind::CareerIntensity),
            skills: keep(TableKind::Skills),
        }
    }

    /// Path configured for a table kind
    pub fn path(&self, kind: TableKind) -> Option<&Path> {
        match kind {
            TableKind::Density => self.density.as_deref(),
            TableKind::CareerShare => self.career_share.as_deref(),
            TableKind::CareerIntensity => self.career_intensity.as_deref(),
            TableKind::Skills => self.skills.as_deref(),
        }
    }
}

/// Loaded tables, read-only after construction
#[derive(Debug, Clone, Default)]
pub struct Snapshot {
    density: Option<MetricTable>,
    career_share: Option<MetricTable>,
    career_intensity: Option<MetricTable>,
    skills: Option<MetricTable>,
}

impl Snapshot {
    /// Load every configured table. Any failure aborts the whole load.
    pub fn load(paths: &DataPaths) -> Result<Self, DatasetError> {
        let mut snapshot = Snapshot::default();
        for kind in TableKind::ALL {
            if let Some(path) = paths.path(kind) {
                snapshot = snapshot.with_table(load_table(kind, path)?);
            }
        }
        info!("Snapshot ready: {} tables loaded", snapshot.loaded().len());
        Ok(snapshot)
    }

    /// Add (or replace) a table
    pub fn with_table(mut self, table: MetricTable) -> Self {
        let slot = match table.kind {
            TableKind::Density => &mut self.density,
            TableKind::CareerShare => &mut self.career_share,
            TableKind::CareerIntensity => &mut self.career_intensity,
            TableKind::Skills => &mut self.skills,
        };
        *slot = Some(table);
        self
    }

    /// Table of a given kind, if loaded
    pub fn table(&self, kind: TableKind) -> Option<&MetricTable> {
        match kind {
            TableKind::Density => self.density.as_ref(),
            TableKind::CareerShare => self.career_share.as_ref(),
            TableKind::CareerIntensity => self.career_intensity.as_ref(),
            TableKind::Skills => self.skills.as_ref(),
        }
    }

    /// Kinds of every loaded table
    pub fn loaded(&self) -> Vec<TableKind> {
        TableKind::ALL
            .into_iter()
            .filter(|kind| self.table(*kind).is_some())
            .collect()
    }

    fn require(&self, kind: TableKind) -> Result<&MetricTable, DatasetError> {
        self.table(kind).ok_or(DatasetError::TableNotLoaded(kind))
    }

    /// Run a comparison query against one table
    pub fn compare(
        &self,
        kind: TableKind,
        query: &ComparisonQuery,
    ) -> Result<ComparisonOutcome, DatasetError> {
        Ok(aggregate::compare(self.require(kind)?.rows(), query))
    }

    /// Roll the density table up per state
    pub fn rollup(
        &self,
        range: Option<PeriodRange>,
        metric: MetricKind,
    ) -> Result<Rollup, DatasetError> {
        Ok(rollup::rollup(self.require(TableKind::Density)?.rows(), range, metric))
    }

    /// Per-year density rollups for animation
    pub fn rollup_frames(
        &self,
        range: Option<PeriodRange>,
        metric: MetricKind,
    ) -> Result<Vec<RollupFrame>, DatasetError> {
        Ok(rollup::rollup_frames(
            self.require(TableKind::Density)?.rows(),
            range,
            metric,
        ))
    }

    /// Years present in the density table
    pub fn available_years(&self) -> Result<Vec<i32>, DatasetError> {
        Ok(rollup::available_periods(
            self.require(TableKind::Density)?.rows(),
        ))
    }
}

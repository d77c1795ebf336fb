//! # Snapshot Table Schemas
//!
//! Column contracts for the four CSV snapshots the dashboards are built from.
//! Column names are a contract with the export pipeline, not with end users;
//! headers are matched after trimming and lowercasing.
//!
//! | Table | Required | Optional |
//! |-------|----------|----------|
//! | density | state_name, year, ai_jobs_count, all_jobs_state_year | state_abbrev |
//! | career share | state_name, lot_career_area_name, entry_count, total_jobs | proportion, year, state_abbrev |
//! | career intensity | state_name, lot_career_area_name, intensity | ai_jobs_count, total_jobs, year, state_abbrev |
//! | skills | state_name, lot_career_area_name, skills_name, skill_count (or count), total_ai_listings | proportion, year, state_abbrev |

/// Table column name constants.
pub mod columns;
mod validation;

#[cfg(test)]
mod tests;

pub use columns::*;
pub use validation::{HeaderIndex, SchemaValidationError};

use serde::{Deserialize, Serialize};
use std::fmt;

/// The snapshot tables the engine knows how to load
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TableKind {
    /// Per-state, per-year AI and total job counts (choropleth)
    Density,
    /// Career areas as a share of a state's AI jobs
    CareerShare,
    /// AI intensity within each career area
    CareerIntensity,
    /// Skill mentions per state and career area
    Skills,
}

impl TableKind {
    /// Every table kind, in load order
    pub const ALL: [TableKind; 4] = [
        TableKind::Density,
        TableKind::CareerShare,
        TableKind::CareerIntensity,
        TableKind::Skills,
    ];

    /// Short identifier
    pub fn name(&self) -> &'static str {
        match self {
            TableKind::Density => "density",
            TableKind::CareerShare => "career",
            TableKind::CareerIntensity => "intensity",
            TableKind::Skills => "skills",
        }
    }

    /// Look a table kind up by its short identifier
    pub fn from_name(name: &str) -> Option<TableKind> {
        let name = name.trim().to_lowercase();
        TableKind::ALL.into_iter().find(|kind| kind.name() == name)
    }

    /// Columns that must be present. Each entry lists acceptable aliases; the
    /// first alias is the canonical name.
    pub fn required_columns(&self) -> &'static [&'static [&'static str]] {
        match self {
            TableKind::Density => &[
                &[STATE_NAME],
                &[YEAR],
                &[AI_JOBS_COUNT],
                &[ALL_JOBS_STATE_YEAR],
            ],
            TableKind::CareerShare => &[&[STATE_NAME], &[CAREER_AREA], &[ENTRY_COUNT], &[TOTAL_JOBS]],
            TableKind::CareerIntensity => &[&[STATE_NAME], &[CAREER_AREA], &[INTENSITY]],
            TableKind::Skills => &[
                &[STATE_NAME],
                &[CAREER_AREA],
                &[SKILLS_NAME],
                &[SKILL_COUNT, COUNT],
                &[TOTAL_AI_LISTINGS],
            ],
        }
    }
}

impl fmt::Display for TableKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

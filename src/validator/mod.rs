//! # Snapshot Validation
//!
//! Integrity checks over loaded tables. The loader is deliberately lenient
//! (non-numeric counts become 0, unknown states are kept), so this module is
//! where bad exports become visible.
//!
//! ## Checklist
//!
//! 1. **Load**: every configured table parses and has its required columns
//! 2. **Rows**: the table is not empty
//! 3. **Counts**: `denominator >= numerator >= 0`
//! 4. **Values**: a precomputed proportion matches `numerator / denominator`
//! 5. **Entities**: every state name resolves to a postal code
//! 6. **Periods**: density rows carry a year
//!
//! ## Usage
//!
//! ```rust,no_run
//! use jobatlas::dataset::DataPaths;
//! use jobatlas::validator::validate_paths;
//!
//! let report = validate_paths(&DataPaths::in_dir("data"), "data");
//! println!("{}", report);
//! if report.has_failures() {
//!     std::process::exit(1);
//! }
//! ```

use log::{debug, warn};

use crate::dataset::{DataPaths, Snapshot};
use crate::loader::{load_table, MetricTable};
use crate::schema::TableKind;

pub use report::{CheckStatus, ValidationCheck, ValidationReport};

mod checks;
mod report;

/// Absolute tolerance between a precomputed value and its recomputed ratio
pub const VALUE_TOLERANCE: f64 = 1e-6;

/// Validate the tables of an already-loaded snapshot
pub fn validate_snapshot(snapshot: &Snapshot, source: impl Into<String>) -> ValidationReport {
    let mut report = ValidationReport::new(source);
    for kind in snapshot.loaded() {
        if let Some(table) = snapshot.table(kind) {
            validate_table(table, &mut report);
        }
    }
    report
}

/// Load and validate every configured table.
///
/// Unlike [`Snapshot::load`], a table that fails to load is recorded as a
/// failed check and the remaining tables are still validated.
pub fn validate_paths(paths: &DataPaths, source: impl Into<String>) -> ValidationReport {
    let mut report = ValidationReport::new(source);

    for kind in TableKind::ALL {
        let Some(path) = paths.path(kind) else {
            debug!("{} table not configured, skipping", kind);
            continue;
        };

        match load_table(kind, path) {
            Ok(table) => {
                report.add_check(ValidationCheck::ok(
                    kind,
                    format!("Loaded {}", path.display()),
                ));
                validate_table(&table, &mut report);
            }
            Err(e) => {
                warn!("{} table failed to load: {}", kind, e);
                report.add_check(ValidationCheck::failed(
                    kind,
                    format!("Load {}", path.display()),
                    e.to_string(),
                ));
            }
        }
    }

    report
}

/// Run every row-level check against one table
pub fn validate_table(table: &MetricTable, report: &mut ValidationReport) {
    if table.is_empty() {
        report.add_check(ValidationCheck::warning(
            table.kind,
            "Rows present",
            "Table has no rows",
        ));
        return;
    }
    report.add_check(ValidationCheck::ok(
        table.kind,
        format!("Rows present ({})", table.len()),
    ));

    checks::check_counts(table, report);
    checks::check_values(table, report);
    checks::check_entities(table, report);
    checks::check_periods(table, report);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::MetricRow;

    #[test]
    fn test_validation_report_display() {
        let mut report = ValidationReport::new("data/");
        report.add_check(ValidationCheck::ok(TableKind::Density, "Test check 1"));
        report.add_check(ValidationCheck::warning(
            TableKind::Skills,
            "Test check 2",
            "This is a warning",
        ));
        report.add_check(ValidationCheck::failed(
            TableKind::Density,
            "Test check 3",
            "This failed",
        ));

        let output = format!("{}", report);
        assert!(output.contains("✓"));
        assert!(output.contains("⚠"));
        assert!(output.contains("✗"));
        assert!(output.contains("1 passed, 1 warnings, 1 failed"));
        assert!(output.contains("Validation FAILED"));

        // Checks are grouped by table in first-seen order
        assert_eq!(report.tables(), vec![TableKind::Density, TableKind::Skills]);
        let density = output.find("[density]").unwrap();
        let skills = output.find("[skills]").unwrap();
        assert!(density < skills);
        assert!(output[density..skills].contains("Test check 3"));
    }

    #[test]
    fn test_clean_table_passes() {
        let table = MetricTable::new(
            TableKind::Density,
            vec![
                MetricRow::new("CA", 10.0, 100.0).with_period(2021),
                MetricRow::new("TN", 0.0, 50.0).with_period(2021),
            ],
        );
        let mut report = ValidationReport::new("memory");
        validate_table(&table, &mut report);
        assert!(!report.has_failures(), "{}", report);
        assert!(!report.has_warnings(), "{}", report);
    }

    #[test]
    fn test_empty_table_warns() {
        let table = MetricTable::new(TableKind::Skills, Vec::new());
        let mut report = ValidationReport::new("memory");
        validate_table(&table, &mut report);
        assert_eq!(report.warning_count(), 1);
        assert_eq!(report.checks.len(), 1);
    }

    #[test]
    fn test_validate_snapshot_covers_loaded_tables() {
        let snapshot = Snapshot::default()
            .with_table(MetricTable::new(
                TableKind::Density,
                vec![MetricRow::new("CA", 200.0, 100.0).with_period(2020)],
            ))
            .with_table(MetricTable::new(
                TableKind::CareerShare,
                vec![MetricRow::new("CA", 1.0, 4.0)
                    .with_category("Nursing")
                    .with_value(0.25)],
            ));

        let report = validate_snapshot(&snapshot, "memory");
        assert_eq!(report.tables(), vec![TableKind::Density, TableKind::CareerShare]);
        assert_eq!(report.failure_count(), 1);
        assert!(report
            .checks_for(TableKind::CareerShare)
            .all(|c| c.status == CheckStatus::Ok));
    }
}

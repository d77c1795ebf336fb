use std::collections::BTreeSet;

use crate::loader::MetricTable;
use crate::model::MetricRow;
use crate::schema::TableKind;
use crate::states;

use super::{ValidationCheck, ValidationReport, VALUE_TOLERANCE};

/// Row labels quoted in a failure message before eliding the rest
const MAX_EXAMPLES: usize = 3;

fn describe(row: &MetricRow) -> String {
    let mut label = row.entity.clone();
    if let Some(period) = row.period {
        label.push_str(&format!(" {}", period));
    }
    if let Some(category) = &row.category {
        label.push_str(&format!(" / {}", category));
    }
    label
}

fn summarize<'a>(offenders: impl Iterator<Item = &'a MetricRow>) -> (usize, String) {
    let mut count = 0;
    let mut examples = Vec::new();
    for row in offenders {
        if examples.len() < MAX_EXAMPLES {
            examples.push(describe(row));
        }
        count += 1;
    }
    let mut text = examples.join(", ");
    if count > MAX_EXAMPLES {
        text.push_str(", ...");
    }
    (count, text)
}

/// `denominator >= numerator >= 0`
pub(crate) fn check_counts(table: &MetricTable, report: &mut ValidationReport) {
    let rows = table.rows();

    let (negative, examples) =
        summarize(rows.iter().filter(|r| r.numerator < 0.0 || r.denominator < 0.0));
    if negative > 0 {
        report.add_check(ValidationCheck::failed(
            table.kind,
            "Non-negative counts",
            format!("{} rows with negative counts ({})", negative, examples),
        ));
    } else {
        report.add_check(ValidationCheck::ok(table.kind, "Non-negative counts"));
    }

    let (exceeding, examples) = summarize(
        rows.iter()
            .filter(|r| r.denominator > 0.0 && r.numerator > r.denominator),
    );
    if exceeding > 0 {
        report.add_check(ValidationCheck::failed(
            table.kind,
            "Numerator within denominator",
            format!("{} rows with numerator > denominator ({})", exceeding, examples),
        ));
    } else {
        report.add_check(ValidationCheck::ok(table.kind, "Numerator within denominator"));
    }

    // Counts against an empty total read as a zero share downstream
    let (orphaned, examples) =
        summarize(rows.iter().filter(|r| r.numerator > 0.0 && r.denominator == 0.0));
    if orphaned > 0 {
        report.add_check(ValidationCheck::warning(
            table.kind,
            "Denominator present",
            format!("{} rows with counts but a zero total ({})", orphaned, examples),
        ));
    }
}

/// Precomputed proportions agree with the counts they came from
pub(crate) fn check_values(table: &MetricTable, report: &mut ValidationReport) {
    let mut compared = 0;
    let (mismatched, examples) = summarize(table.rows().iter().filter(|r| {
        let Some(value) = r.value else {
            return false;
        };
        if r.denominator <= 0.0 {
            return false;
        }
        compared += 1;
        (value - r.numerator / r.denominator).abs() > VALUE_TOLERANCE
    }));

    if compared == 0 {
        return;
    }

    if mismatched > 0 {
        report.add_check(ValidationCheck::warning(
            table.kind,
            "Proportions match counts",
            format!(
                "{} of {} rows differ from numerator/denominator by more than {:e} ({})",
                mismatched, compared, VALUE_TOLERANCE, examples
            ),
        ));
    } else {
        report.add_check(ValidationCheck::ok(
            table.kind,
            format!("Proportions match counts ({} rows)", compared),
        ));
    }
}

/// Every entity should be a postal code
pub(crate) fn check_entities(table: &MetricTable, report: &mut ValidationReport) {
    let unresolved: BTreeSet<&str> = table
        .rows()
        .iter()
        .filter(|r| states::by_code(&r.entity).is_none())
        .map(|r| r.entity_name.as_str())
        .collect();

    if unresolved.is_empty() {
        report.add_check(ValidationCheck::ok(table.kind, "State names resolve"));
    } else {
        let names: Vec<&str> = unresolved.into_iter().collect();
        report.add_check(ValidationCheck::warning(
            table.kind,
            "State names resolve",
            format!("No state code for: {}", names.join(", ")),
        ));
    }
}

/// The density table is keyed by year
pub(crate) fn check_periods(table: &MetricTable, report: &mut ValidationReport) {
    if table.kind != TableKind::Density {
        return;
    }

    let (missing, examples) = summarize(table.rows().iter().filter(|r| r.period.is_none()));
    if missing > 0 {
        report.add_check(ValidationCheck::failed(
            table.kind,
            "Years present",
            format!("{} rows without a year ({})", missing, examples),
        ));
    } else {
        report.add_check(ValidationCheck::ok(table.kind, "Years present"));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::validator::CheckStatus;

    fn run(table: &MetricTable, check: fn(&MetricTable, &mut ValidationReport)) -> ValidationReport {
        let mut report = ValidationReport::new("memory");
        check(table, &mut report);
        report
    }

    #[test]
    fn test_negative_counts_fail() {
        let table = MetricTable::new(
            TableKind::CareerShare,
            vec![
                MetricRow::new("CA", -1.0, 10.0).with_category("Sales"),
                MetricRow::new("TN", 1.0, 10.0).with_category("Sales"),
            ],
        );
        let report = run(&table, check_counts);
        let failed: Vec<_> = report
            .checks
            .iter()
            .filter(|c| matches!(c.status, CheckStatus::Failed(_)))
            .collect();
        assert_eq!(failed.len(), 1);
        assert_eq!(failed[0].name, "Non-negative counts");
        assert!(matches!(&failed[0].status, CheckStatus::Failed(msg) if msg.contains("CA / Sales")));
    }

    #[test]
    fn test_zero_total_warns() {
        let table = MetricTable::new(
            TableKind::Density,
            vec![MetricRow::new("DC", 15.0, 0.0).with_period(2024)],
        );
        let report = run(&table, check_counts);
        assert!(!report.has_failures());
        assert_eq!(report.warning_count(), 1);
    }

    #[test]
    fn test_example_list_is_elided() {
        let rows = (0..5)
            .map(|i| MetricRow::new("OH", 5.0, 1.0).with_period(2020 + i))
            .collect();
        let table = MetricTable::new(TableKind::Density, rows);
        let report = run(&table, check_counts);
        let check = report
            .checks
            .iter()
            .find(|c| c.name == "Numerator within denominator")
            .unwrap();
        match &check.status {
            CheckStatus::Failed(msg) => {
                assert!(msg.starts_with("5 rows"));
                assert!(msg.contains("OH 2022"));
                assert!(!msg.contains("OH 2023"));
                assert!(msg.ends_with(", ...)"));
            }
            other => panic!("unexpected status: {:?}", other),
        }
    }

    #[test]
    fn test_value_mismatch_warns() {
        let table = MetricTable::new(
            TableKind::CareerShare,
            vec![
                MetricRow::new("CA", 1.0, 3.0).with_category("A").with_value(1.0 / 3.0),
                MetricRow::new("CA", 1.0, 3.0).with_category("B").with_value(0.333),
                MetricRow::new("CA", 0.0, 0.0).with_category("C").with_value(0.9),
            ],
        );
        let report = run(&table, check_values);
        assert_eq!(report.checks.len(), 1);
        match &report.checks[0].status {
            CheckStatus::Warning(msg) => assert!(msg.starts_with("1 of 2 rows")),
            other => panic!("unexpected status: {:?}", other),
        }
    }

    #[test]
    fn test_values_skipped_without_counts() {
        // Intensity rows carry only the precomputed value
        let table = MetricTable::new(
            TableKind::CareerIntensity,
            vec![MetricRow::new("CA", 0.0, 0.0).with_category("A").with_value(0.02)],
        );
        assert!(run(&table, check_values).checks.is_empty());
    }

    #[test]
    fn test_unresolved_entities_warn() {
        let table = MetricTable::new(
            TableKind::Density,
            vec![
                MetricRow::new("Puerto Rico", 1.0, 2.0)
                    .with_entity_name("Puerto Rico")
                    .with_period(2020),
                MetricRow::new("CA", 1.0, 2.0).with_period(2020),
            ],
        );
        let report = run(&table, check_entities);
        match &report.checks[0].status {
            CheckStatus::Warning(msg) => assert_eq!(msg, "No state code for: Puerto Rico"),
            other => panic!("unexpected status: {:?}", other),
        }
    }

    #[test]
    fn test_missing_year_only_matters_for_density() {
        let rows = vec![MetricRow::new("CA", 1.0, 2.0).with_category("A")];
        let career = MetricTable::new(TableKind::CareerShare, rows.clone());
        assert!(run(&career, check_periods).checks.is_empty());

        let density = MetricTable::new(TableKind::Density, rows);
        assert!(run(&density, check_periods).has_failures());
    }
}

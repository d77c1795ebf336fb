//! Integration tests for jobatlas
//!
//! These tests write snapshot CSVs to a temporary directory and run the full
//! pipeline from loading to rendered output.

use jobatlas::animation::Playback;
use jobatlas::dataset::{
    DataPaths, DatasetError, Snapshot, DEFAULT_CAREER_INTENSITY_FILE, DEFAULT_CAREER_SHARE_FILE,
    DEFAULT_DENSITY_FILE, DEFAULT_SKILLS_FILE,
};
use jobatlas::loader::LoadError;
use jobatlas::model::{CategoryFilter, ComparisonOutcome, ComparisonQuery, MetricKind, PeriodRange};
use jobatlas::report;
use jobatlas::schema::TableKind;
use jobatlas::significance::Significance;
use jobatlas::validator::{validate_paths, validate_snapshot, CheckStatus};
use std::fs;
use std::path::Path;
use tempfile::{tempdir, TempDir};

const DENSITY_CSV: &str = "\
state_name,year,ai_jobs_count,all_jobs_state_year
California,2021,300,10000
California,2022,500,10000
Tennessee,2021,50,5000
Tennessee,2022,100,5000
";

const CAREER_CSV: &str = "\
state_name,lot_career_area_name,entry_count,total_jobs,proportion
California,Information Technology,300,800,0.375
California,Engineering,200,800,0.25
California,Other / Unknown,250,800,0.3125
California,Healthcare,50,800,0.0625
Tennessee,Information Technology,40,150,0.26666667
Tennessee,Healthcare,60,150,0.4
";

const INTENSITY_CSV: &str = "\
state_name,lot_career_area_name,intensity
California,Information Technology,0.12
California,Healthcare,0.01
Tennessee,Healthcare,0.02
";

const SKILLS_CSV: &str = "\
state_name,lot_career_area_name,skills_name,count,total_ai_listings,proportion
California,Engineering,Python,40,100,0.4
California,Engineering,Machine Learning,30,100,0.3
California,Finance,Python,5,50,0.1
California,Finance,Other,20,50,0.4
Tennessee,Engineering,Python,10,40,0.25
";

fn write_snapshot(dir: &Path) {
    fs::write(dir.join(DEFAULT_DENSITY_FILE), DENSITY_CSV).unwrap();
    fs::write(dir.join(DEFAULT_CAREER_SHARE_FILE), CAREER_CSV).unwrap();
    fs::write(dir.join(DEFAULT_CAREER_INTENSITY_FILE), INTENSITY_CSV).unwrap();
    fs::write(dir.join(DEFAULT_SKILLS_FILE), SKILLS_CSV).unwrap();
}

fn snapshot() -> (TempDir, Snapshot) {
    let dir = tempdir().unwrap();
    write_snapshot(dir.path());
    let snapshot = Snapshot::load(&DataPaths::in_dir(dir.path())).unwrap();
    (dir, snapshot)
}

/// Career share comparison: ranking, alignment, zero-fill and p-values
#[test]
fn test_career_share_comparison() {
    let (_dir, snapshot) = snapshot();
    assert_eq!(snapshot.loaded(), TableKind::ALL.to_vec());

    let outcome = snapshot
        .compare(TableKind::CareerShare, &ComparisonQuery::new("California", "Tennessee"))
        .unwrap();
    let result = outcome.result().unwrap();

    // "Other / Unknown" outranks everything but is a sentinel
    assert_eq!(
        result.categories(),
        ["Information Technology", "Engineering", "Healthcare"]
    );
    assert_eq!(result.reference_entity, "CA");
    assert_eq!(result.comparison_entity, "TN");

    let it = &result.items[0];
    assert_eq!(it.reference_value, 0.375);
    assert!((it.comparison_value - 40.0 / 150.0).abs() < 1e-6);
    assert!(it.p_value.is_some());

    let engineering = &result.items[1];
    assert_eq!(engineering.comparison_value, 0.0);
    assert_eq!(engineering.p_value, None);
    assert_eq!(engineering.significance(), Significance::Undefined);

    // 6.25% vs 40% on these sample sizes is far beyond chance
    let healthcare = &result.items[2];
    assert_eq!(healthcare.significance(), Significance::Significant);
}

/// Skills comparison across and within career areas
#[test]
fn test_skills_comparison() {
    let (_dir, snapshot) = snapshot();

    let all_areas = snapshot
        .compare(TableKind::Skills, &ComparisonQuery::new("CA", "TN"))
        .unwrap();
    let result = all_areas.result().unwrap();
    assert_eq!(result.categories(), ["Python", "Machine Learning"]);
    // Counts summed across areas over the deduplicated listing total
    assert!((result.items[0].reference_value - 45.0 / 150.0).abs() < 1e-12);
    assert!((result.items[0].comparison_value - 10.0 / 40.0).abs() < 1e-12);
    assert!((result.items[1].reference_value - 30.0 / 150.0).abs() < 1e-12);
    assert_eq!(result.items[1].comparison_value, 0.0);

    let finance = ComparisonQuery::new("CA", "TN")
        .secondary(CategoryFilter::from_selection(["Finance"]));
    let outcome = snapshot.compare(TableKind::Skills, &finance).unwrap();
    let result = outcome.result().unwrap();
    assert_eq!(result.categories(), ["Python"]);
    assert!((result.items[0].reference_value - 0.1).abs() < 1e-12);
    assert_eq!(result.items[0].comparison_value, 0.0);
}

/// Intensity tables carry no counts, so no statistic is defined
#[test]
fn test_intensity_comparison() {
    let (_dir, snapshot) = snapshot();
    let outcome = snapshot
        .compare(
            TableKind::CareerIntensity,
            &ComparisonQuery::new("CA", "TN").metric(MetricKind::Intensity),
        )
        .unwrap();
    let result = outcome.result().unwrap();
    assert_eq!(result.categories(), ["Information Technology", "Healthcare"]);
    assert_eq!(result.items[1].comparison_value, 0.02);
    assert!(result.iter().all(|item| item.p_value.is_none()));

    let text = report::render_comparison(&outcome);
    assert!(text.contains("12.00%"));
    assert_eq!(text.matches("n/a").count(), 2);
}

#[test]
fn test_missing_reference_entity() {
    let (_dir, snapshot) = snapshot();
    let outcome = snapshot
        .compare(TableKind::CareerShare, &ComparisonQuery::new("Ohio", "CA"))
        .unwrap();
    assert_eq!(
        outcome,
        ComparisonOutcome::Empty {
            entity: "OH".to_string()
        }
    );
    assert_eq!(report::render_comparison(&outcome), "No data for Ohio (OH)\n");
}

/// Density rollups, per-year frames and the playback cycle
#[test]
fn test_rollup_and_animation() {
    let (_dir, snapshot) = snapshot();

    let share = snapshot.rollup(None, MetricKind::ShareOfSelf).unwrap();
    assert_eq!(share.get("CA"), Some(0.04));
    assert_eq!(share.get("TN"), Some(0.015));

    let national = snapshot
        .rollup(Some(PeriodRange::single(2022)), MetricKind::NationalShare)
        .unwrap();
    assert!((national.get("CA").unwrap() - 500.0 / 600.0).abs() < 1e-12);
    assert_eq!(national.total_numerator, 600.0);

    let years = snapshot.available_years().unwrap();
    assert_eq!(years, vec![2021, 2022]);

    let frames = snapshot.rollup_frames(None, MetricKind::NationalShare).unwrap();
    let mut playback = Playback::new(years, PeriodRange::new(2021, 2022).unwrap());
    playback.toggle();

    let visited: Vec<i32> = (0..3).filter_map(|_| playback.tick()).collect();
    assert_eq!(visited, vec![2022, 2021, 2022]);

    // Each tick's rollup equals the precomputed frame for that year
    for year in visited {
        let live = snapshot
            .rollup(Some(PeriodRange::single(year)), MetricKind::NationalShare)
            .unwrap();
        let frame = frames.iter().find(|f| f.period == year).unwrap();
        assert_eq!(live, frame.rollup);
    }
}

#[test]
fn test_clean_snapshot_validates() {
    let (dir, snapshot) = snapshot();
    let report = validate_snapshot(&snapshot, dir.path().display().to_string());
    assert!(!report.has_failures(), "{}", report);
    assert!(!report.has_warnings(), "{}", report);
    assert_eq!(report.tables(), TableKind::ALL.to_vec());
}

#[test]
fn test_validate_paths_reports_each_table() {
    let dir = tempdir().unwrap();
    write_snapshot(dir.path());
    // Break one table, corrupt another
    fs::remove_file(dir.path().join(DEFAULT_SKILLS_FILE)).unwrap();
    fs::write(
        dir.path().join(DEFAULT_DENSITY_FILE),
        "state_name,year,ai_jobs_count,all_jobs_state_year\nCalifornia,2021,900,100\nAtlantis,,1,2\n",
    )
    .unwrap();

    let report = validate_paths(&DataPaths::in_dir(dir.path()), "fixture");
    assert!(report.has_failures());

    let density: Vec<_> = report.checks_for(TableKind::Density).collect();
    let failed: Vec<&str> = density
        .iter()
        .filter(|c| matches!(c.status, CheckStatus::Failed(_)))
        .map(|c| c.name.as_str())
        .collect();
    assert_eq!(failed, ["Numerator within denominator", "Years present"]);
    assert!(density
        .iter()
        .any(|c| c.name == "State names resolve" && matches!(c.status, CheckStatus::Warning(_))));

    let skills: Vec<_> = report.checks_for(TableKind::Skills).collect();
    assert_eq!(skills.len(), 1);
    assert!(matches!(skills[0].status, CheckStatus::Failed(_)));

    // Untouched tables still pass
    assert!(report
        .checks_for(TableKind::CareerShare)
        .all(|c| c.status == CheckStatus::Ok));
}

#[test]
fn test_missing_column_aborts_load() {
    let dir = tempdir().unwrap();
    write_snapshot(dir.path());
    fs::write(
        dir.path().join(DEFAULT_CAREER_SHARE_FILE),
        "state_name,lot_career_area_name,entry_count\nCalifornia,Engineering,3\n",
    )
    .unwrap();

    let err = Snapshot::load(&DataPaths::in_dir(dir.path())).unwrap_err();
    match err {
        DatasetError::Load(LoadError::MissingColumn { table, column }) => {
            assert_eq!(table, TableKind::CareerShare);
            assert_eq!(column, "total_jobs");
        }
        other => panic!("unexpected error: {other}"),
    }
}

#[test]
fn test_outcome_json_reloads() {
    let (_dir, snapshot) = snapshot();
    let outcome = snapshot
        .compare(TableKind::CareerShare, &ComparisonQuery::new("CA", "TN").top_n(2))
        .unwrap();
    let json = report::to_json(&outcome).unwrap();
    let parsed: ComparisonOutcome = serde_json::from_str(&json).unwrap();
    let parsed = parsed.into_result().unwrap();
    let original = outcome.result().unwrap();
    assert_eq!(parsed.categories(), original.categories());
    assert_eq!(parsed.len(), 2);
    for (a, b) in parsed.iter().zip(original.iter()) {
        assert_eq!(a.reference_counts, b.reference_counts);
        assert!((a.reference_value - b.reference_value).abs() < 1e-12);
        assert_eq!(a.p_value.is_some(), b.p_value.is_some());
    }
}

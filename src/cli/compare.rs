use anyhow::{Context, Result};
use log::info;

use jobatlas::dataset::{DataPaths, Snapshot};
use jobatlas::model::{CategoryFilter, ComparisonQuery, MetricKind, PeriodRange};
use jobatlas::report;
use jobatlas::schema::TableKind;

/// Resolved flags for the compare command
pub struct CompareArgs {
    pub paths: DataPaths,
    pub table: TableKind,
    pub reference: Option<String>,
    pub comparison: Option<String>,
    pub top_n: Option<usize>,
    pub metric: MetricKind,
    pub categories: Vec<String>,
    pub career_areas: Vec<String>,
    pub range: Option<PeriodRange>,
    pub json: bool,
}

/// Run a Top-N comparison between two states
pub fn run(args: CompareArgs) -> Result<()> {
    let reference = args
        .reference
        .context("No reference state given (pass REFERENCE or set [defaults] reference)")?;
    let comparison = args
        .comparison
        .context("No comparison state given (pass COMPARISON or set [defaults] comparison)")?;

    let snapshot = Snapshot::load(&args.paths.only(&[args.table]))
        .with_context(|| format!("Failed to load the {} table", args.table))?;

    let mut query = ComparisonQuery::new(&reference, &comparison)
        .metric(args.metric)
        .categories(CategoryFilter::from_selection(&args.categories))
        .secondary(CategoryFilter::from_selection(&args.career_areas));
    if let Some(top_n) = args.top_n {
        query = query.top_n(top_n);
    }
    if let Some(range) = args.range {
        query = query.period_range(range);
    }

    info!(
        "Comparing {} against {} on the {} table ({})",
        query.comparison_entity, query.reference_entity, args.table, query.metric_kind
    );

    let outcome = snapshot.compare(args.table, &query)?;

    if args.json {
        println!("{}", report::to_json(&outcome)?);
    } else {
        print!("{}", report::format_comparison_colored(&outcome));
    }

    Ok(())
}

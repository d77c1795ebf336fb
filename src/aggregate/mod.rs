//! # Top-N Comparative Aggregator
//!
//! Turns per-state, per-category counts into the ranked and aligned
//! two-state series behind the career-area and skills comparison charts.
//!
//! ## Pipeline
//!
//! 1. Keep rows inside the query's period range (rows without a period pass)
//! 2. Apply the category and secondary-category filters
//! 3. Drop sentinel categories ("Other", "Unknown", "Misc", ...)
//! 4. Collapse rows to one total per (entity, category) and compute the metric
//! 5. Rank the reference entity's categories by value, descending and stable
//! 6. Align the comparison entity onto those categories, zero-filling gaps
//! 7. Attach a two-proportion z-test p-value to every category
//!
//! ## Example
//!
//! ```rust
//! use jobatlas::aggregate::compare;
//! use jobatlas::model::{ComparisonQuery, MetricRow};
//!
//! let rows = vec![
//!     MetricRow::new("CA", 50.0, 100.0).with_category("Software").with_period(2024),
//!     MetricRow::new("TN", 10.0, 50.0).with_category("Software").with_period(2024),
//!     MetricRow::new("CA", 5.0, 100.0).with_category("Nursing").with_period(2024),
//! ];
//!
//! let outcome = compare(&rows, &ComparisonQuery::new("CA", "TN").top_n(2));
//! let result = outcome.result().unwrap();
//! assert_eq!(result.categories(), ["Software", "Nursing"]);
//! assert_eq!(result.items[1].comparison_value, 0.0);
//! ```

use std::collections::HashMap;

use log::debug;

use crate::model::{
    CategoryComparison, ComparisonOutcome, ComparisonQuery, ComparisonResult, Counts, MetricRow,
};
use crate::significance::two_proportion_ztest;

mod consolidate;
mod sentinel;


pub(crate) use consolidate::{consolidate, CategoryTotal};
pub use sentinel::{is_sentinel, SENTINEL_CATEGORIES};

/// Rows that survive the query's period, category and sentinel filters
fn filtered_rows<'a>(rows: &'a [MetricRow], query: &ComparisonQuery) -> Vec<&'a MetricRow> {
    rows.iter()
        .filter(|row| query.period_range.map_or(true, |range| range.admits(row.period)))
        .filter(|row| query.category_filter.matches(row.category.as_deref()))
        .filter(|row| query.secondary_filter.matches(row.secondary.as_deref()))
        .filter(|row| !is_sentinel(row.category.as_deref()))
        .collect()
}

/// Rank the reference entity's top categories and align the comparison
/// entity onto them.
///
/// Returns [`ComparisonOutcome::Empty`] when the reference entity has no rows
/// left after filtering.
pub fn compare(rows: &[MetricRow], query: &ComparisonQuery) -> ComparisonOutcome {
    let filtered = filtered_rows(rows, query);
    let totals = consolidate(&filtered, query.metric_kind);

    let mut ranked: Vec<&CategoryTotal> = totals
        .iter()
        .filter(|t| t.entity == query.reference_entity)
        .collect();

    if ranked.is_empty() {
        debug!(
            "No rows for reference entity {} ({} rows after filtering)",
            query.reference_entity,
            filtered.len()
        );
        return ComparisonOutcome::Empty {
            entity: query.reference_entity.clone(),
        };
    }

    // sort_by is stable: ties keep first-appearance order
    ranked.sort_by(|a, b| b.value.total_cmp(&a.value));
    ranked.truncate(query.top_n);

    let mut aligned: HashMap<&str, &CategoryTotal> = HashMap::new();
    for total in totals
        .iter()
        .filter(|t| t.entity == query.comparison_entity)
    {
        aligned.entry(total.category.as_str()).or_insert(total);
    }

    let items: Vec<CategoryComparison> = ranked
        .into_iter()
        .map(|reference| {
            let (comparison_value, comparison_counts) =
                match aligned.get(reference.category.as_str()) {
                    Some(other) => (other.value, other.counts),
                    None => (0.0, Counts::default()),
                };

            CategoryComparison {
                category: reference.category.clone(),
                reference_value: reference.value,
                comparison_value,
                reference_counts: reference.counts,
                comparison_counts,
                p_value: two_proportion_ztest(reference.counts, comparison_counts),
            }
        })
        .collect();

    debug!(
        "Ranked {} categories for {} vs {} ({})",
        items.len(),
        query.reference_entity,
        query.comparison_entity,
        query.metric_kind
    );

    ComparisonOutcome::Ranked(ComparisonResult {
        reference_entity: query.reference_entity.clone(),
        comparison_entity: query.comparison_entity.clone(),
        metric_kind: query.metric_kind,
        items,
    })
}

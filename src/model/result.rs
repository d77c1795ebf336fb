use serde::{Deserialize, Serialize};

use super::MetricKind;
use crate::significance::Significance;

/// Raw (successes, trials) pair behind a proportion
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Counts {
    /// Number of successes (e.g. postings mentioning a skill)
    pub count: f64,
    /// Number of trials (e.g. all AI postings)
    pub total: f64,
}

impl Counts {
    /// Create a counts pair
    pub fn new(count: f64, total: f64) -> Self {
        Self { count, total }
    }
}

/// One category of a two-entity comparison
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CategoryComparison {
    /// Category label
    pub category: String,
    /// Metric value for the reference entity (fraction, not percent)
    pub reference_value: f64,
    /// Metric value for the comparison entity, 0 when it has no row
    pub comparison_value: f64,
    /// Counts behind the reference value
    pub reference_counts: Counts,
    /// Counts behind the comparison value
    pub comparison_counts: Counts,
    /// Two-proportion z-test p-value, `None` when not computable
    pub p_value: Option<f64>,
}

impl CategoryComparison {
    /// Classification of the p-value at the 0.05 threshold
    pub fn significance(&self) -> Significance {
        Significance::classify(self.p_value)
    }
}

/// Ranked, aligned comparison between two entities
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ComparisonResult {
    /// Entity that defined the ranking
    pub reference_entity: String,
    /// Entity aligned onto the ranking
    pub comparison_entity: String,
    /// Metric the values were computed with
    pub metric_kind: MetricKind,
    /// Categories in rank order
    pub items: Vec<CategoryComparison>,
}

impl ComparisonResult {
    /// Number of ranked categories
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Whether no categories were ranked
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Iterate categories in rank order
    pub fn iter(&self) -> std::slice::Iter<'_, CategoryComparison> {
        self.items.iter()
    }

    /// Category labels in rank order
    pub fn categories(&self) -> Vec<&str> {
        self.items.iter().map(|c| c.category.as_str()).collect()
    }
}

/// Outcome of a comparison query.
///
/// `Empty` is the explicit "no data" signal for a reference entity without
/// rows; it is not an error and callers render a placeholder for it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum ComparisonOutcome {
    /// Reference entity had data
    Ranked(ComparisonResult),
    /// Reference entity had no rows after filtering
    Empty {
        /// Entity that had no data
        entity: String,
    },
}

impl ComparisonOutcome {
    /// Whether this is the empty-result signal
    pub fn is_empty(&self) -> bool {
        matches!(self, ComparisonOutcome::Empty { .. })
    }

    /// The ranked result, if any
    pub fn result(&self) -> Option<&ComparisonResult> {
        match self {
            ComparisonOutcome::Ranked(result) => Some(result),
            ComparisonOutcome::Empty { .. } => None,
        }
    }

    /// Consume into the ranked result, if any
    pub fn into_result(self) -> Option<ComparisonResult> {
        match self {
            ComparisonOutcome::Ranked(result) => Some(result),
            ComparisonOutcome::Empty { .. } => None,
        }
    }
}

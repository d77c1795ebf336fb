use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::fmt;
use std::str::FromStr;

use super::QueryError;
use crate::states;

/// Number of categories ranked when a query does not say otherwise
pub const DEFAULT_TOP_N: usize = 10;

/// How a row's counts turn into the value that gets ranked and displayed.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MetricKind {
    /// numerator / denominator within the same entity
    #[default]
    ShareOfSelf,
    /// Share-of-self against a different population (all jobs in a career area)
    Intensity,
    /// Entity numerator over the numerator summed across all entities
    NationalShare,
}

impl MetricKind {
    /// Identifier used on the command line and in config files
    pub fn as_str(&self) -> &'static str {
        match self {
            MetricKind::ShareOfSelf => "state_share",
            MetricKind::Intensity => "intensity",
            MetricKind::NationalShare => "national_share",
        }
    }

    /// Human-readable axis title
    pub fn title(&self) -> &'static str {
        match self {
            MetricKind::ShareOfSelf => "Share of state's jobs",
            MetricKind::Intensity => "AI intensity",
            MetricKind::NationalShare => "Share of U.S. AI jobs",
        }
    }
}

impl fmt::Display for MetricKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for MetricKind {
    type Err = QueryError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().replace('-', "_").as_str() {
            "share" | "state_share" | "share_of_self" => Ok(MetricKind::ShareOfSelf),
            "intensity" => Ok(MetricKind::Intensity),
            "national_share" | "us_share" | "national" => Ok(MetricKind::NationalShare),
            _ => Err(QueryError::UnknownMetric(s.to_string())),
        }
    }
}

/// Inclusive year range
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PeriodRange {
    /// First year (inclusive)
    pub start: i32,
    /// Last year (inclusive)
    pub end: i32,
}

impl PeriodRange {
    /// Create a range, rejecting `start > end`
    pub fn new(start: i32, end: i32) -> Result<Self, QueryError> {
        if start > end {
            return Err(QueryError::InvalidPeriodRange { start, end });
        }
        Ok(Self { start, end })
    }

    /// Range covering a single year
    pub fn single(year: i32) -> Self {
        Self {
            start: year,
            end: year,
        }
    }

    /// Whether `year` lies inside the range
    pub fn contains(&self, year: i32) -> bool {
        self.start <= year && year <= self.end
    }

    /// Whether a row period passes this range. Rows without a period always pass.
    pub fn admits(&self, period: Option<i32>) -> bool {
        period.map_or(true, |p| self.contains(p))
    }
}

impl fmt::Display for PeriodRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.start == self.end {
            write!(f, "{}", self.start)
        } else {
            write!(f, "{}–{}", self.start, self.end)
        }
    }
}

/// Category selection. The literal "ALL" anywhere in the selection, or an
/// empty selection, means no filtering.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum CategoryFilter {
    /// Keep every category
    #[default]
    All,
    /// Keep only the listed labels
    Only(BTreeSet<String>),
}

impl CategoryFilter {
    /// Marker value that selects everything
    pub const ALL_MARKER: &'static str = "ALL";

    /// Build a filter from a dropdown-style selection
    pub fn from_selection<I, S>(selection: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut labels = BTreeSet::new();
        for item in selection {
            let item = item.into();
            if item == Self::ALL_MARKER {
                return CategoryFilter::All;
            }
            labels.insert(item);
        }
        if labels.is_empty() {
            CategoryFilter::All
        } else {
            CategoryFilter::Only(labels)
        }
    }

    /// Whether the filter keeps everything
    pub fn is_all(&self) -> bool {
        match self {
            CategoryFilter::All => true,
            CategoryFilter::Only(set) => set.is_empty(),
        }
    }

    /// Whether a row with this label passes the filter
    pub fn matches(&self, label: Option<&str>) -> bool {
        match self {
            CategoryFilter::All => true,
            CategoryFilter::Only(set) if set.is_empty() => true,
            CategoryFilter::Only(set) => label.map_or(false, |l| set.contains(l)),
        }
    }
}

/// A two-entity comparison request
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ComparisonQuery {
    /// Entity whose ranking defines the category order
    pub reference_entity: String,
    /// Entity aligned onto the reference categories
    pub comparison_entity: String,
    /// Filter on the row category
    pub category_filter: CategoryFilter,
    /// Filter on the secondary category (career area of skill rows)
    pub secondary_filter: CategoryFilter,
    /// Number of categories to rank
    pub top_n: usize,
    /// Metric used for ranking
    pub metric_kind: MetricKind,
    /// Optional inclusive year range
    pub period_range: Option<PeriodRange>,
}

impl ComparisonQuery {
    /// Create a query with default settings. Full state names are resolved to
    /// postal codes.
    pub fn new(reference: &str, comparison: &str) -> Self {
        Self {
            reference_entity: states::resolve(reference),
            comparison_entity: states::resolve(comparison),
            category_filter: CategoryFilter::All,
            secondary_filter: CategoryFilter::All,
            top_n: DEFAULT_TOP_N,
            metric_kind: MetricKind::default(),
            period_range: None,
        }
    }

    /// Set the number of ranked categories
    pub fn top_n(mut self, top_n: usize) -> Self {
        self.top_n = top_n;
        self
    }

    /// Set the metric kind
    pub fn metric(mut self, metric_kind: MetricKind) -> Self {
        self.metric_kind = metric_kind;
        self
    }

    /// Set the category filter
    pub fn categories(mut self, filter: CategoryFilter) -> Self {
        self.category_filter = filter;
        self
    }

    /// Set the secondary category filter
    pub fn secondary(mut self, filter: CategoryFilter) -> Self {
        self.secondary_filter = filter;
        self
    }

    /// Restrict rows to a year range
    pub fn period_range(mut self, range: PeriodRange) -> Self {
        self.period_range = Some(range);
        self
    }
}

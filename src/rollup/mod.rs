//! # Geographic/Temporal Rollup
//!
//! Sums counts per state across a year range and expresses each state either
//! as a share of its own jobs (`state_share`) or as a share of the national
//! total (`national_share`, also accepted as `us_share`).
//!
//! Values are fractions. Display layers multiply by 100 via
//! [`GeoRollup::percent`].
//!
//! The per-year variant, [`rollup_frames`], is a plain replay of [`rollup`]
//! over singleton ranges and shares no state between frames.

use std::collections::{BTreeMap, HashMap};

use log::debug;
use serde::{Deserialize, Serialize};

use crate::model::{safe_ratio, MetricKind, MetricRow, PeriodRange};


/// Summed counts and metric value for one entity
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GeoRollup {
    /// Entity key (state code)
    pub entity: String,
    /// Entity name as read from the source table
    pub entity_name: String,
    /// Year, when the rollup covers a single year
    pub period: Option<i32>,
    /// Summed numerator
    pub numerator: f64,
    /// Summed denominator
    pub denominator: f64,
    /// Metric value as a fraction
    pub value: f64,
}

impl GeoRollup {
    /// Metric value as a percentage
    pub fn percent(&self) -> f64 {
        self.value * 100.0
    }
}

/// Rollup of every entity over one period range
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Rollup {
    /// Range the rollup covers (`None` = all rows)
    pub range: Option<PeriodRange>,
    /// Metric used for the values
    pub metric: MetricKind,
    /// Numerator summed across all entities
    pub total_numerator: f64,
    /// One record per entity, in first-appearance order
    pub entities: Vec<GeoRollup>,
}

impl Rollup {
    /// Whether no rows fell inside the range
    pub fn is_empty(&self) -> bool {
        self.entities.is_empty()
    }

    /// Number of entities
    pub fn len(&self) -> usize {
        self.entities.len()
    }

    /// Iterate entity records
    pub fn iter(&self) -> std::slice::Iter<'_, GeoRollup> {
        self.entities.iter()
    }

    /// Value for one entity
    pub fn get(&self, entity: &str) -> Option<f64> {
        self.entities
            .iter()
            .find(|e| e.entity == entity)
            .map(|e| e.value)
    }

    /// Mapping from entity to value
    pub fn as_map(&self) -> BTreeMap<String, f64> {
        self.entities
            .iter()
            .map(|e| (e.entity.clone(), e.value))
            .collect()
    }
}

/// One animation frame: the rollup of a single year
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RollupFrame {
    /// Year of the frame
    pub period: i32,
    /// Rollup over that year alone
    pub rollup: Rollup,
}

/// Sorted distinct periods present in the rows
pub fn available_periods(rows: &[MetricRow]) -> Vec<i32> {
    let mut periods: Vec<i32> = rows.iter().filter_map(|r| r.period).collect();
    periods.sort_unstable();
    periods.dedup();
    periods
}

/// Sum counts per entity inside `range` and compute `metric` for each.
///
/// `Intensity` is computed like `ShareOfSelf`. Zero denominators and a zero
/// national total yield 0.
pub fn rollup(rows: &[MetricRow], range: Option<PeriodRange>, metric: MetricKind) -> Rollup {
    let mut order: Vec<&str> = Vec::new();
    let mut sums: HashMap<&str, (&str, f64, f64)> = HashMap::new();

    for row in rows
        .iter()
        .filter(|r| range.map_or(true, |range| range.admits(r.period)))
    {
        let entry = sums.entry(row.entity.as_str()).or_insert_with(|| {
            order.push(row.entity.as_str());
            (row.entity_name.as_str(), 0.0, 0.0)
        });
        entry.1 += row.numerator;
        entry.2 += row.denominator;
    }

    let total_numerator: f64 = order.iter().filter_map(|e| sums.get(e)).map(|s| s.1).sum();
    let period = range.filter(|r| r.start == r.end).map(|r| r.start);

    let entities: Vec<GeoRollup> = order
        .iter()
        .filter_map(|entity| {
            let &(name, numerator, denominator) = sums.get(entity)?;
            let value = match metric {
                MetricKind::NationalShare => safe_ratio(numerator, total_numerator),
                MetricKind::ShareOfSelf | MetricKind::Intensity => safe_ratio(numerator, denominator),
            };
            Some(GeoRollup {
                entity: entity.to_string(),
                entity_name: name.to_string(),
                period,
                numerator,
                denominator,
                value,
            })
        })
        .collect();

    match range {
        Some(range) => debug!("Rolled up {} entities for {} ({})", entities.len(), range, metric),
        None => debug!("Rolled up {} entities for all periods ({})", entities.len(), metric),
    }

    Rollup {
        range,
        metric,
        total_numerator,
        entities,
    }
}

/// Per-year rollups for every available period inside `range`, ascending.
pub fn rollup_frames(
    rows: &[MetricRow],
    range: Option<PeriodRange>,
    metric: MetricKind,
) -> Vec<RollupFrame> {
    available_periods(rows)
        .into_iter()
        .filter(|p| range.map_or(true, |r| r.contains(*p)))
        .map(|period| RollupFrame {
            period,
            rollup: rollup(rows, Some(PeriodRange::single(period)), metric),
        })
        .collect()
}

use std::collections::{HashMap, HashSet};

use crate::model::{safe_ratio, Counts, MetricKind, MetricRow};

/// One (entity, category) after collapsing duplicate rows
#[derive(Debug, Clone, PartialEq)]
pub(crate) struct CategoryTotal {
    pub entity: String,
    pub category: String,
    pub counts: Counts,
    pub value: f64,
}

#[derive(Default)]
struct Accumulator {
    numerator: f64,
    denominator: f64,
    rows: usize,
    value: Option<f64>,
    value_sum: f64,
    valued_rows: usize,
    has_secondary: bool,
}

impl Accumulator {
    /// Mean of the precomputed values, for groups with no counts behind them
    fn mean_value(&self) -> Option<f64> {
        (self.valued_rows > 0).then(|| self.value_sum / self.valued_rows as f64)
    }
}

/// Per-entity denominator shared by all skill rows of that entity.
///
/// Every (entity, secondary) pair repeats its denominator on each skill row,
/// so only distinct (secondary, denominator) pairs are summed.
fn common_denominators<'a>(rows: &[&'a MetricRow]) -> HashMap<&'a str, f64> {
    let mut seen: HashSet<(&str, &str, u64)> = HashSet::new();
    let mut totals: HashMap<&str, f64> = HashMap::new();

    for row in rows {
        let Some(secondary) = row.secondary.as_deref() else {
            continue;
        };
        if seen.insert((row.entity.as_str(), secondary, row.denominator.to_bits())) {
            *totals.entry(row.entity.as_str()).or_insert(0.0) += row.denominator;
        }
    }

    totals
}

/// Collapse filtered rows into one total per (entity, category), in
/// first-appearance order, and compute the metric value for each.
///
/// Rows must already be free of sentinel (and therefore missing) categories.
pub(crate) fn consolidate(rows: &[&MetricRow], metric: MetricKind) -> Vec<CategoryTotal> {
    let mut order: Vec<(&str, &str)> = Vec::new();
    let mut groups: HashMap<(&str, &str), Accumulator> = HashMap::new();

    for row in rows {
        let Some(category) = row.category.as_deref() else {
            continue;
        };
        let key = (row.entity.as_str(), category);
        let acc = groups.entry(key).or_insert_with(|| {
            order.push(key);
            Accumulator::default()
        });
        acc.numerator += row.numerator;
        acc.denominator += row.denominator;
        acc.rows += 1;
        acc.value = row.value;
        if let Some(v) = row.value {
            acc.value_sum += v;
            acc.valued_rows += 1;
        }
        acc.has_secondary |= row.secondary.is_some();
    }

    let shared = common_denominators(rows);

    let mut national: HashMap<&str, f64> = HashMap::new();
    if metric == MetricKind::NationalShare {
        for ((_, category), acc) in &groups {
            *national.entry(*category).or_insert(0.0) += acc.numerator;
        }
    }

    order
        .into_iter()
        .filter_map(|key| {
            let acc = groups.get(&key)?;
            let (entity, category) = key;

            let denominator = if acc.has_secondary {
                shared.get(entity).copied().unwrap_or(0.0)
            } else {
                acc.denominator
            };

            let value = match metric {
                MetricKind::NationalShare => {
                    safe_ratio(acc.numerator, national.get(category).copied().unwrap_or(0.0))
                }
                MetricKind::ShareOfSelf | MetricKind::Intensity => match acc.value {
                    Some(v) if acc.rows == 1 && !acc.has_secondary => v,
                    _ if denominator <= 0.0 && !acc.has_secondary => acc
                        .mean_value()
                        .unwrap_or_else(|| safe_ratio(acc.numerator, denominator)),
                    _ => safe_ratio(acc.numerator, denominator),
                },
            };

            Some(CategoryTotal {
                entity: entity.to_string(),
                category: category.to_string(),
                counts: Counts::new(acc.numerator, denominator),
                value,
            })
        })
        .collect()
}

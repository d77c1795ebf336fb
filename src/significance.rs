//! # Significance Annotator
//!
//! Pooled two-proportion z-test used to flag whether two states differ on a
//! category. Mirrors the defaults of the usual statistics-package
//! `proportions_ztest` (two-sided, pooled variance, null difference 0).
//!
//! The test is "undefined" rather than failing whenever it cannot be
//! computed: zero trials, counts outside `[0, trials]`, or a degenerate pooled
//! proportion of exactly 0 or 1. Callers render that as "n/a".

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::model::Counts;

/// Threshold below which a p-value is reported as significant
pub const SIGNIFICANCE_LEVEL: f64 = 0.05;

/// Standard normal survival function, via `erfc` for accuracy in the tails
fn normal_sf(z: f64) -> f64 {
    0.5 * statrs::function::erf::erfc(z / std::f64::consts::SQRT_2)
}

/// Two-sided pooled two-proportion z-test.
///
/// Returns `None` when the test is not computable.
pub fn two_proportion_ztest(a: Counts, b: Counts) -> Option<f64> {
    let Counts { count: c1, total: n1 } = a;
    let Counts { count: c2, total: n2 } = b;

    if ![c1, n1, c2, n2].iter().all(|v| v.is_finite()) {
        return None;
    }
    if n1 <= 0.0 || n2 <= 0.0 {
        return None;
    }
    if c1 < 0.0 || c2 < 0.0 || c1 > n1 || c2 > n2 {
        return None;
    }

    let pooled = (c1 + c2) / (n1 + n2);
    let variance = pooled * (1.0 - pooled) * (1.0 / n1 + 1.0 / n2);
    if variance.is_nan() || variance <= 0.0 {
        return None;
    }

    let z = (c1 / n1 - c2 / n2) / variance.sqrt();
    let p = 2.0 * normal_sf(z.abs());
    if p.is_finite() {
        Some(p.clamp(0.0, 1.0))
    } else {
        None
    }
}

/// Three-way classification of a p-value
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Significance {
    /// p < 0.05
    Significant,
    /// p >= 0.05
    NotSignificant,
    /// Test not computable
    Undefined,
}

impl Significance {
    /// Classify an optional p-value
    pub fn classify(p_value: Option<f64>) -> Self {
        match p_value {
            Some(p) if p < SIGNIFICANCE_LEVEL => Significance::Significant,
            Some(_) => Significance::NotSignificant,
            None => Significance::Undefined,
        }
    }

    /// Display label
    pub fn label(&self) -> &'static str {
        match self {
            Significance::Significant => "significant",
            Significance::NotSignificant => "not significant",
            Significance::Undefined => "n/a",
        }
    }
}

impl fmt::Display for Significance {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Annotation text for a p-value: `p=0.138`, or `n/a`
pub fn format_p_value(p_value: Option<f64>) -> String {
    match p_value {
        Some(p) => format!("p={:.3}", p),
        None => "n/a".to_string(),
    }
}

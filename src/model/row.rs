use serde::{Deserialize, Serialize};

/// One observation from a metric table.
///
/// `numerator` is the count being measured (AI jobs, skill mentions) and
/// `denominator` the population it is measured against (all jobs, all AI
/// listings) for the same entity and category. `value` carries a precomputed
/// proportion when the source table ships one.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MetricRow {
    /// Canonical entity key (state postal code)
    pub entity: String,
    /// Entity name as read from the source table
    pub entity_name: String,
    /// Category label (career area or skill), if the table has one
    pub category: Option<String>,
    /// Secondary category (career area of a skill row)
    pub secondary: Option<String>,
    /// Count being measured
    pub numerator: f64,
    /// Population the count is measured against
    pub denominator: f64,
    /// Year of the observation
    pub period: Option<i32>,
    /// Precomputed proportion
    pub value: Option<f64>,
}

impl MetricRow {
    /// Create a row for an entity with the given counts
    pub fn new(entity: impl Into<String>, numerator: f64, denominator: f64) -> Self {
        let entity = entity.into();
        Self {
            entity_name: entity.clone(),
            entity,
            category: None,
            secondary: None,
            numerator,
            denominator,
            period: None,
            value: None,
        }
    }

    /// Set the full entity name
    pub fn with_entity_name(mut self, name: impl Into<String>) -> Self {
        self.entity_name = name.into();
        self
    }

    /// Set the category label
    pub fn with_category(mut self, category: impl Into<String>) -> Self {
        self.category = Some(category.into());
        self
    }

    /// Set the secondary category label
    pub fn with_secondary(mut self, secondary: impl Into<String>) -> Self {
        self.secondary = Some(secondary.into());
        self
    }

    /// Set the period (year)
    pub fn with_period(mut self, period: i32) -> Self {
        self.period = Some(period);
        self
    }

    /// Set the precomputed proportion
    pub fn with_value(mut self, value: f64) -> Self {
        self.value = Some(value);
        self
    }

    /// numerator / denominator, 0 when the denominator is not positive
    pub fn ratio(&self) -> f64 {
        safe_ratio(self.numerator, self.denominator)
    }
}

/// Division that maps a non-positive denominator to 0
pub(crate) fn safe_ratio(numerator: f64, denominator: f64) -> f64 {
    if denominator > 0.0 {
        numerator / denominator
    } else {
        0.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ratio_zero_denominator() {
        assert_eq!(MetricRow::new("CA", 5.0, 0.0).ratio(), 0.0);
        assert_eq!(MetricRow::new("CA", 5.0, 20.0).ratio(), 0.25);
    }

    #[test]
    fn test_builder() {
        let row = MetricRow::new("TN", 1.0, 2.0)
            .with_entity_name("Tennessee")
            .with_category("Nursing")
            .with_period(2024);
        assert_eq!(row.entity, "TN");
        assert_eq!(row.entity_name, "Tennessee");
        assert_eq!(row.category.as_deref(), Some("Nursing"));
        assert_eq!(row.period, Some(2024));
        assert!(row.value.is_none());
    }
}

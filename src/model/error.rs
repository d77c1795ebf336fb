/// Errors raised while building a query from user input
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum QueryError {
    /// Period range with start after end
    #[error("Invalid period range: {start} > {end}")]
    InvalidPeriodRange {
        /// First year of the range
        start: i32,
        /// Last year of the range
        end: i32,
    },

    /// Metric name not recognised
    #[error("Unknown metric: {0} (expected share, intensity, state_share, national_share or us_share)")]
    UnknownMetric(String),
}

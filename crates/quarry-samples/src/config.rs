//! Tunable thresholds for the exercises.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Parameters shared by the exercises.
///
/// Every field has a default, so a host can deserialize a partial document:
///
/// ```
/// use quarry_samples::ExerciseConfig;
///
/// let config: ExerciseConfig = serde_json::from_str(r#"{"city": "Berlin"}"#).unwrap();
/// assert_eq!(config.city, "Berlin");
/// assert_eq!(config.turnover_threshold, ExerciseConfig::default().turnover_threshold);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExerciseConfig {
    /// City used by the city-scoped exercises.
    pub city: String,
    /// Customers whose order totals sum above this are high-turnover.
    pub turnover_threshold: Decimal,
    /// An order whose total exceeds this is large.
    pub large_order_threshold: Decimal,
    /// Unit prices below this are cheap.
    pub cheap_below: Decimal,
    /// Unit prices at or above this are expensive.
    pub expensive_from: Decimal,
}

impl Default for ExerciseConfig {
    fn default() -> Self {
        ExerciseConfig {
            city: "London".to_string(),
            turnover_threshold: Decimal::from(1000),
            large_order_threshold: Decimal::from(100),
            cheap_below: Decimal::from(20),
            expensive_from: Decimal::from(50),
        }
    }
}

impl ExerciseConfig {
    pub fn new() -> Self {
        ExerciseConfig::default()
    }

    pub fn city(mut self, city: impl Into<String>) -> Self {
        self.city = city.into();
        self
    }

    pub fn turnover_threshold(mut self, threshold: impl Into<Decimal>) -> Self {
        self.turnover_threshold = threshold.into();
        self
    }

    pub fn large_order_threshold(mut self, threshold: impl Into<Decimal>) -> Self {
        self.large_order_threshold = threshold.into();
        self
    }

    /// Sets both price band bounds.
    pub fn price_bands(
        mut self,
        cheap_below: impl Into<Decimal>,
        expensive_from: impl Into<Decimal>,
    ) -> Self {
        self.cheap_below = cheap_below.into();
        self.expensive_from = expensive_from.into();
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn defaults() {
        let config = ExerciseConfig::default();
        assert_eq!(config.city, "London");
        assert_eq!(config.turnover_threshold, dec!(1000));
        assert_eq!(config.large_order_threshold, dec!(100));
    }

    #[test]
    fn builder_setters() {
        let config = ExerciseConfig::new()
            .city("Paris")
            .turnover_threshold(500)
            .price_bands(dec!(10.5), 30);
        assert_eq!(config.city, "Paris");
        assert_eq!(config.turnover_threshold, dec!(500));
        assert_eq!(config.cheap_below, dec!(10.5));
        assert_eq!(config.expensive_from, dec!(30));
    }

    #[test]
    fn partial_json_uses_defaults() {
        let config: ExerciseConfig =
            serde_json::from_str(r#"{"large_order_threshold": "250"}"#).unwrap();
        assert_eq!(config.large_order_threshold, dec!(250));
        assert_eq!(config.city, "London");
    }
}

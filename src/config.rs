//! Construction settings.

use serde::{Deserialize, Serialize};

use crate::constructive::{Strategy, DEFAULT_DETOUR_FACTOR};
use crate::error::{CarpError, Result};
use crate::models::VertexId;

/// Settings for solving an instance.
///
/// `capacity` and `depot` override the values carried by the instance.
/// Every field may be omitted when deserializing.
///
/// # Examples
///
/// ```
/// use carp_routing::config::ConstructionConfig;
/// use carp_routing::constructive::Strategy;
///
/// let config = ConstructionConfig::from_json_str(r#"{"strategy": "ratio-greedy", "capacity": 50}"#)
///     .unwrap();
/// assert_eq!(config.strategy, Strategy::RatioGreedy);
/// assert_eq!(config.capacity, Some(50));
/// assert_eq!(config.detour_factor, 2.0);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ConstructionConfig {
    /// Constructive heuristic to run.
    pub strategy: Strategy,
    /// Vehicle capacity override.
    pub capacity: Option<i32>,
    /// Depot override.
    pub depot: Option<VertexId>,
    /// Detour bound multiple for nearest insertion.
    pub detour_factor: f64,
}

impl Default for ConstructionConfig {
    fn default() -> Self {
        Self {
            strategy: Strategy::default(),
            capacity: None,
            depot: None,
            detour_factor: DEFAULT_DETOUR_FACTOR,
        }
    }
}

impl ConstructionConfig {
    /// Sets the strategy.
    pub fn with_strategy(mut self, strategy: Strategy) -> Self {
        self.strategy = strategy;
        self
    }

    /// Overrides the instance capacity.
    pub fn with_capacity(mut self, capacity: i32) -> Self {
        self.capacity = Some(capacity);
        self
    }

    /// Overrides the instance depot.
    pub fn with_depot(mut self, depot: impl Into<VertexId>) -> Self {
        self.depot = Some(depot.into());
        self
    }

    /// Sets the nearest-insertion detour factor.
    pub fn with_detour_factor(mut self, factor: f64) -> Self {
        self.detour_factor = factor;
        self
    }

    /// Parses and validates a JSON configuration.
    pub fn from_json_str(s: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(s)?;
        config.validate()?;
        Ok(config)
    }

    /// Rejects non-positive capacities and negative or non-finite detour
    /// factors.
    pub fn validate(&self) -> Result<()> {
        if let Some(capacity) = self.capacity {
            if capacity <= 0 {
                return Err(CarpError::Config(format!(
                    "capacity must be positive, got {capacity}"
                )));
            }
        }
        if !self.detour_factor.is_finite() || self.detour_factor < 0.0 {
            return Err(CarpError::Config(format!(
                "detour factor must be finite and non-negative, got {}",
                self.detour_factor
            )));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = ConstructionConfig::default();
        assert_eq!(config.strategy, Strategy::PathScanning);
        assert!(config.capacity.is_none());
        assert!(config.depot.is_none());
        assert!((config.detour_factor - 2.0).abs() < 1e-10);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_builder_chain() {
        let config = ConstructionConfig::default()
            .with_strategy(Strategy::NearestInsertion)
            .with_capacity(30)
            .with_depot("7")
            .with_detour_factor(1.5);
        assert_eq!(config.strategy, Strategy::NearestInsertion);
        assert_eq!(config.capacity, Some(30));
        assert_eq!(config.depot, Some(VertexId::from("7")));
        assert!((config.detour_factor - 1.5).abs() < 1e-10);
    }

    #[test]
    fn test_from_json_empty_object_uses_defaults() {
        let config = ConstructionConfig::from_json_str("{}").expect("valid");
        assert_eq!(config, ConstructionConfig::default());
    }

    #[test]
    fn test_from_json_full() {
        let config = ConstructionConfig::from_json_str(
            r#"{"strategy": "nearest-insertion", "capacity": 10, "depot": "4", "detour_factor": 3.0}"#,
        )
        .expect("valid");
        assert_eq!(config.strategy, Strategy::NearestInsertion);
        assert_eq!(config.depot, Some(VertexId::from("4")));
        assert!((config.detour_factor - 3.0).abs() < 1e-10);
    }

    #[test]
    fn test_from_json_rejects_unknown_strategy() {
        let err = ConstructionConfig::from_json_str(r#"{"strategy": "savings"}"#).unwrap_err();
        assert!(matches!(err, CarpError::Json(_)));
    }

    #[test]
    fn test_validate_rejects_bad_values() {
        let zero = ConstructionConfig::default().with_capacity(0);
        assert!(matches!(zero.validate(), Err(CarpError::Config(_))));

        let negative = ConstructionConfig::default().with_detour_factor(-1.0);
        assert!(negative.validate().is_err());

        let nan = ConstructionConfig::default().with_detour_factor(f64::NAN);
        assert!(nan.validate().is_err());

        let err = ConstructionConfig::from_json_str(r#"{"capacity": -5}"#).unwrap_err();
        assert_eq!(
            err.to_string(),
            "invalid configuration: capacity must be positive, got -5"
        );
    }
}

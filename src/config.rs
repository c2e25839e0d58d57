//! Stat construction options.
//!
//! `StatConfig` carries the knobs a host sets when building stats: how many
//! decimal digits the computed value keeps, and how much room each modifier
//! group reserves up front. It is plain data, so hosts can load it from the
//! same JSON files as the rest of their game configuration.

use crate::error::StatError;
use crate::modifier_type::ModifierType;
use crate::numeric::MAX_ROUND_DIGITS;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Default number of decimal digits kept by a stat.
pub const DEFAULT_DIGIT_ACCURACY: u8 = 2;

/// Default number of modifiers each group has room for.
pub const DEFAULT_CAPACITY: usize = 4;

/// Options used when building a stat.
///
/// # Examples
///
/// ```rust
/// use modstat::{ModifierType, StatConfig};
///
/// let config = StatConfig::default()
///     .with_digit_accuracy(3)
///     .with_capacity_for(ModifierType::FLAT, 16);
///
/// assert_eq!(config.digit_accuracy(), 3);
/// assert_eq!(config.capacity_for(ModifierType::FLAT), 16);
/// assert_eq!(config.capacity_for(ModifierType::ADDITIVE), 4);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct StatConfig {
    /// Decimal digits the computed value is rounded to.
    ///
    /// Values above [`MAX_ROUND_DIGITS`] are clamped when read.
    pub digit_accuracy: u8,

    /// Capacity hint for every group without its own entry.
    pub capacity: usize,

    /// Per-type capacity hints.
    pub capacities: BTreeMap<ModifierType, usize>,
}

impl Default for StatConfig {
    fn default() -> Self {
        Self {
            digit_accuracy: DEFAULT_DIGIT_ACCURACY,
            capacity: DEFAULT_CAPACITY,
            capacities: BTreeMap::new(),
        }
    }
}

impl StatConfig {
    /// Create the default configuration.
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse a configuration from JSON.
    ///
    /// Missing fields take their default values; per-type capacities are
    /// keyed by the type's order key.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use modstat::{ModifierType, StatConfig};
    ///
    /// let config = StatConfig::from_json(r#"{
    ///     "digit_accuracy": 4,
    ///     "capacities": { "300": 8 }
    /// }"#).unwrap();
    ///
    /// assert_eq!(config.digit_accuracy(), 4);
    /// assert_eq!(config.capacity_for(ModifierType::MULTIPLICATIVE), 8);
    /// assert_eq!(config.capacity_for(ModifierType::FLAT), 4);
    /// ```
    pub fn from_json(json: &str) -> Result<Self, StatError> {
        serde_json::from_str(json).map_err(|e| StatError::InvalidConfig(e.to_string()))
    }

    /// Set the rounding precision.
    pub fn with_digit_accuracy(mut self, digits: u8) -> Self {
        self.digit_accuracy = digits;
        self
    }

    /// Set the capacity hint used by every group without its own entry.
    pub fn with_capacity(mut self, capacity: usize) -> Self {
        self.capacity = capacity;
        self
    }

    /// Set the capacity hint for one modifier type.
    pub fn with_capacity_for(mut self, modifier_type: ModifierType, capacity: usize) -> Self {
        self.capacities.insert(modifier_type, capacity);
        self
    }

    /// The rounding precision, clamped to [`MAX_ROUND_DIGITS`].
    pub fn digit_accuracy(&self) -> u8 {
        self.digit_accuracy.min(MAX_ROUND_DIGITS)
    }

    /// The capacity hint for `modifier_type`.
    pub fn capacity_for(&self, modifier_type: ModifierType) -> usize {
        self.capacities
            .get(&modifier_type)
            .copied()
            .unwrap_or(self.capacity)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = StatConfig::new();
        assert_eq!(config.digit_accuracy(), DEFAULT_DIGIT_ACCURACY);
        assert_eq!(config.capacity_for(ModifierType::FLAT), DEFAULT_CAPACITY);
        assert!(config.capacities.is_empty());
    }

    #[test]
    fn test_digit_accuracy_clamped() {
        let config = StatConfig::new().with_digit_accuracy(42);
        assert_eq!(config.digit_accuracy(), MAX_ROUND_DIGITS);
    }

    #[test]
    fn test_capacity_overrides() {
        let custom = ModifierType::new(1000);
        let config = StatConfig::new()
            .with_capacity(2)
            .with_capacity_for(custom, 32);
        assert_eq!(config.capacity_for(ModifierType::FLAT), 2);
        assert_eq!(config.capacity_for(custom), 32);
    }

    #[test]
    fn test_from_json_empty_object() {
        let config = StatConfig::from_json("{}").unwrap();
        assert_eq!(config, StatConfig::default());
    }

    #[test]
    fn test_from_json_invalid() {
        let err = StatConfig::from_json(r#"{ "digit_accuracy": "two" }"#).unwrap_err();
        assert!(matches!(err, StatError::InvalidConfig(_)));
    }

    #[test]
    fn test_json_round_trip_keeps_capacities() {
        let config = StatConfig::new().with_capacity_for(ModifierType::new(1000), 12);
        let json = serde_json::to_string(&config).unwrap();
        assert!(json.contains("\"1000\":12"));
        assert_eq!(StatConfig::from_json(&json).unwrap(), config);
    }
}

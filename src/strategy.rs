//! Calculation strategies module.
//!
//! A strategy combines every modifier of one type into a single
//! contribution. The stat folds contributions in ascending type order,
//! threading a running value that starts at the base value:
//!
//! ```text
//! current = base
//! for group in groups (by type order):
//!     current += group.strategy.contribution(group.modifiers, base, current)
//! ```
//!
//! The three built-in strategies back the built-in modifier types. Custom
//! modifier types supply their own strategy through the
//! [`ModifierTypeRegistry`](crate::ModifierTypeRegistry).

use crate::modifier::Modifier;
use crate::numeric::StatValue;
use std::sync::Arc;

/// Trait for strategies that combine modifiers of one type.
///
/// # Examples
///
/// ```rust
/// use modstat::strategy::{ModifierStrategy, MultiplicativeStrategy};
/// use modstat::Modifier;
///
/// let modifiers = [Modifier::multiplicative(0.1), Modifier::multiplicative(0.1)];
/// let delta = MultiplicativeStrategy.contribution(&modifiers, 20.0, 20.0);
///
/// // 20 * 1.1 * 1.1 = 24.2
/// assert!((20.0 + delta - 24.2).abs() < 1e-9);
/// ```
pub trait ModifierStrategy: Send + Sync {
    /// Calculate the contribution of `modifiers` to the running value.
    ///
    /// # Arguments
    ///
    /// * `modifiers` - Every modifier of this type, in insertion order
    /// * `base_value` - The stat's base value, before any modifier
    /// * `current_value` - The running value after all lower-ordered groups
    ///
    /// # Returns
    ///
    /// The delta to add to `current_value`.
    fn contribution(
        &self,
        modifiers: &[Modifier],
        base_value: StatValue,
        current_value: StatValue,
    ) -> StatValue;

    /// Get a human-readable description of this strategy.
    ///
    /// Used for breakdown information in `StatBreakdown`.
    fn description(&self) -> String;
}

/// Factory producing a fresh strategy for each stat's group.
pub type StrategyFactory = Arc<dyn Fn() -> Box<dyn ModifierStrategy> + Send + Sync>;

/// Sums modifier values.
///
/// # Examples
///
/// ```rust
/// use modstat::strategy::{FlatStrategy, ModifierStrategy};
/// use modstat::Modifier;
///
/// let modifiers = [Modifier::flat(20.0), Modifier::flat(-5.0)];
/// assert_eq!(FlatStrategy.contribution(&modifiers, 100.0, 100.0), 15.0);
/// ```
#[derive(Debug, Clone, Copy, Default)]
pub struct FlatStrategy;

impl ModifierStrategy for FlatStrategy {
    fn contribution(
        &self,
        modifiers: &[Modifier],
        _base_value: StatValue,
        _current_value: StatValue,
    ) -> StatValue {
        sum(modifiers)
    }

    fn description(&self) -> String {
        "flat sum".to_string()
    }
}

/// Adds the summed fractions of the base value.
///
/// Each unit is a fraction of the original base, not of the running value:
/// with a base of 100 and a running value of 140, `+10%` contributes 10.
///
/// # Examples
///
/// ```rust
/// use modstat::strategy::{AdditiveStrategy, ModifierStrategy};
/// use modstat::Modifier;
///
/// let modifiers = [Modifier::additive(0.1), Modifier::additive(0.1)];
/// assert_eq!(AdditiveStrategy.contribution(&modifiers, 100.0, 140.0), 20.0);
/// ```
#[derive(Debug, Clone, Copy, Default)]
pub struct AdditiveStrategy;

impl ModifierStrategy for AdditiveStrategy {
    fn contribution(
        &self,
        modifiers: &[Modifier],
        base_value: StatValue,
        _current_value: StatValue,
    ) -> StatValue {
        base_value * sum(modifiers)
    }

    fn description(&self) -> String {
        "additive % of base".to_string()
    }
}

/// Scales the running value by each modifier in turn.
///
/// Accumulates `acc += acc * m` for every modifier in insertion order and
/// returns `acc - current_value`. The repeated multiply is kept instead of a
/// single product so results round the same way every time.
#[derive(Debug, Clone, Copy, Default)]
pub struct MultiplicativeStrategy;

impl ModifierStrategy for MultiplicativeStrategy {
    fn contribution(
        &self,
        modifiers: &[Modifier],
        _base_value: StatValue,
        current_value: StatValue,
    ) -> StatValue {
        let mut calculated = current_value;
        for modifier in modifiers {
            calculated += calculated * modifier.value();
        }
        calculated - current_value
    }

    fn description(&self) -> String {
        "multiplicative % of current".to_string()
    }
}

/// Applies only the strongest reduction, measured against the base value.
///
/// Reductions do not stack: the largest positive modifier `r` pulls the
/// running value to `base × (1 - r)`, whatever lower-ordered groups did.
/// With no positive modifier the group contributes nothing. Useful for
/// curses and debuffs that suppress rather than accumulate.
///
/// # Examples
///
/// ```rust
/// use modstat::strategy::{BestOfReduction, ModifierStrategy};
/// use modstat::{Modifier, ModifierType};
///
/// let curse = ModifierType::new(1000);
/// let modifiers = [Modifier::new(0.3, curse), Modifier::new(0.5, curse)];
///
/// // Running value 180 is pulled down to 100 * (1 - 0.5) = 50
/// assert_eq!(BestOfReduction.contribution(&modifiers, 100.0, 180.0), -130.0);
/// ```
#[derive(Debug, Clone, Copy, Default)]
pub struct BestOfReduction;

impl ModifierStrategy for BestOfReduction {
    fn contribution(
        &self,
        modifiers: &[Modifier],
        base_value: StatValue,
        current_value: StatValue,
    ) -> StatValue {
        let strongest = modifiers
            .iter()
            .map(Modifier::value)
            .fold(0.0, StatValue::max);

        if strongest == 0.0 {
            return 0.0;
        }

        base_value * (1.0 - strongest) - current_value
    }

    fn description(&self) -> String {
        "strongest reduction of base".to_string()
    }
}

/// Applies only the largest modifier, as a flat delta.
///
/// For bonuses of the same kind that should not stack (two auras of the
/// same family, say). An empty group contributes nothing.
///
/// # Examples
///
/// ```rust
/// use modstat::strategy::{HighestBonus, ModifierStrategy};
/// use modstat::{Modifier, ModifierType};
///
/// let aura = ModifierType::new(150);
/// let modifiers = [Modifier::new(5.0, aura), Modifier::new(12.0, aura)];
/// assert_eq!(HighestBonus.contribution(&modifiers, 100.0, 100.0), 12.0);
/// ```
#[derive(Debug, Clone, Copy, Default)]
pub struct HighestBonus;

impl ModifierStrategy for HighestBonus {
    fn contribution(
        &self,
        modifiers: &[Modifier],
        _base_value: StatValue,
        _current_value: StatValue,
    ) -> StatValue {
        modifiers
            .iter()
            .map(Modifier::value)
            .reduce(StatValue::max)
            .unwrap_or(0.0)
    }

    fn description(&self) -> String {
        "highest only".to_string()
    }
}

fn sum(modifiers: &[Modifier]) -> StatValue {
    let mut total = 0.0;
    for modifier in modifiers {
        total += modifier.value();
    }
    total
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::modifier_type::ModifierType;

    #[test]
    fn test_flat_strategy() {
        let modifiers = [Modifier::flat(10.0), Modifier::flat(20.0)];
        assert_eq!(FlatStrategy.contribution(&modifiers, 100.0, 100.0), 30.0);
    }

    #[test]
    fn test_flat_strategy_ignores_running_value() {
        let modifiers = [Modifier::flat(10.0)];
        assert_eq!(FlatStrategy.contribution(&modifiers, 1.0, 500.0), 10.0);
    }

    #[test]
    fn test_additive_strategy_uses_base() {
        let modifiers = [Modifier::additive(0.1)];
        // Running value 300 is ignored; 10% of base 20
        assert_eq!(AdditiveStrategy.contribution(&modifiers, 20.0, 300.0), 2.0);
    }

    #[test]
    fn test_additive_strategy_negative() {
        let modifiers = [Modifier::additive(-0.2), Modifier::additive(-0.2)];
        assert!((AdditiveStrategy.contribution(&modifiers, 100.0, 80.0) + 40.0).abs() < 1e-9);
    }

    #[test]
    fn test_multiplicative_strategy_compounds() {
        let modifiers = [Modifier::multiplicative(0.1), Modifier::multiplicative(0.3)];
        let delta = MultiplicativeStrategy.contribution(&modifiers, 20.0, 20.0);
        assert!((20.0 + delta - 20.0 * 1.1 * 1.3).abs() < 1e-9);
    }

    #[test]
    fn test_multiplicative_strategy_uses_running_value() {
        let modifiers = [Modifier::multiplicative(0.5)];
        assert_eq!(MultiplicativeStrategy.contribution(&modifiers, 10.0, 40.0), 20.0);
    }

    #[test]
    fn test_empty_groups_contribute_nothing() {
        let strategies: [&dyn ModifierStrategy; 5] = [
            &FlatStrategy,
            &AdditiveStrategy,
            &MultiplicativeStrategy,
            &BestOfReduction,
            &HighestBonus,
        ];
        for strategy in strategies {
            assert_eq!(strategy.contribution(&[], 100.0, 150.0), 0.0);
        }
    }

    #[test]
    fn test_best_of_reduction_picks_strongest() {
        let curse = ModifierType::new(1000);
        let modifiers = [
            Modifier::new(0.2, curse),
            Modifier::new(0.6, curse),
            Modifier::new(0.4, curse),
        ];
        let delta = BestOfReduction.contribution(&modifiers, 100.0, 100.0);
        assert!((100.0 + delta - 40.0).abs() < 1e-9);
    }

    #[test]
    fn test_best_of_reduction_ignores_negative_values() {
        let curse = ModifierType::new(1000);
        let modifiers = [Modifier::new(-0.5, curse)];
        assert_eq!(BestOfReduction.contribution(&modifiers, 100.0, 120.0), 0.0);
    }

    #[test]
    fn test_highest_bonus_with_negatives() {
        let aura = ModifierType::new(150);
        let modifiers = [Modifier::new(-5.0, aura), Modifier::new(-2.0, aura)];
        assert_eq!(HighestBonus.contribution(&modifiers, 100.0, 100.0), -2.0);
    }

    #[test]
    fn test_strategy_descriptions() {
        assert!(FlatStrategy.description().contains("flat"));
        assert!(AdditiveStrategy.description().contains("additive"));
        assert!(MultiplicativeStrategy.description().contains("multiplicative"));
        assert!(BestOfReduction.description().contains("reduction"));
        assert!(HighestBonus.description().contains("highest"));
    }
}

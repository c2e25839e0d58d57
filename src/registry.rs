//! Modifier type registry module.
//!
//! The registry maps each modifier type to the factory producing its
//! strategy. It is an explicit object: hosts create one at startup, register
//! their custom types, then build stats from it. Building the first stat
//! seals the registry, which fixes the set of types every later stat gets.

use crate::config::StatConfig;
use crate::error::StatError;
use crate::group::ModifierGroup;
use crate::modifier_type::ModifierType;
use crate::strategy::{
    AdditiveStrategy, FlatStrategy, ModifierStrategy, MultiplicativeStrategy, StrategyFactory,
};
use std::collections::BTreeMap;
use std::fmt;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

/// Table of modifier types and the strategies that calculate them.
///
/// The registry starts open. Registration requires `&mut self`, while
/// [`resolve_all`](Self::resolve_all) only needs `&self` and seals the
/// registry, so a sealed registry can be shared freely between the code
/// that builds stats.
///
/// # Examples
///
/// ```rust
/// use modstat::strategy::BestOfReduction;
/// use modstat::{Modifier, ModifierTypeRegistry, Stat, StatError};
///
/// let mut registry = ModifierTypeRegistry::new();
/// let curse = registry.register(1000, || Box::new(BestOfReduction)).unwrap();
///
/// let mut strength = Stat::with_registry(100.0, &registry);
/// strength.add_modifier(Modifier::new(0.25, curse)).unwrap();
/// assert_eq!(strength.value(), 75.0);
///
/// // Sealed by the first stat
/// assert!(!registry.can_register());
/// assert!(matches!(
///     registry.register(2000, || Box::new(BestOfReduction)),
///     Err(StatError::RegistrationClosed(_))
/// ));
/// ```
#[derive(Default)]
pub struct ModifierTypeRegistry {
    /// Custom factories by type. Entries for built-in types are kept but
    /// never used.
    factories: BTreeMap<ModifierType, StrategyFactory>,

    /// Set once the first stat has been built from this registry.
    sealed: AtomicBool,
}

impl ModifierTypeRegistry {
    /// Create an open registry holding only the built-in types.
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a modifier type with the given order key.
    ///
    /// Re-registering a custom order replaces its factory. Registering one
    /// of the built-in orders is accepted but has no effect on calculation:
    /// a warning is logged and the built-in strategy stays in place.
    ///
    /// # Arguments
    ///
    /// * `order` - Order key of the type; lower keys are evaluated first
    /// * `factory` - Produces a fresh strategy for each stat
    ///
    /// # Returns
    ///
    /// * `Ok(ModifierType)` - The type to tag modifiers with
    /// * `Err(StatError::RegistrationClosed)` - If a stat was already built
    ///   from this registry
    pub fn register<F>(&mut self, order: i32, factory: F) -> Result<ModifierType, StatError>
    where
        F: Fn() -> Box<dyn ModifierStrategy> + Send + Sync + 'static,
    {
        let modifier_type = ModifierType::new(order);

        if self.is_sealed() {
            return Err(StatError::RegistrationClosed(modifier_type));
        }

        let replaced = self
            .factories
            .insert(modifier_type, Arc::new(factory))
            .is_some();

        if modifier_type.is_builtin() {
            tracing::warn!(
                "Strategies for the {} modifier type cannot be replaced; the built-in strategy will be used",
                modifier_type
            );
        } else if replaced {
            tracing::debug!("Replaced strategy factory for {}", modifier_type);
        } else {
            tracing::debug!("Registered modifier type {}", modifier_type);
        }

        Ok(modifier_type)
    }

    /// Whether new types can still be registered.
    pub fn can_register(&self) -> bool {
        !self.is_sealed()
    }

    /// Whether a stat has been built from this registry.
    pub fn is_sealed(&self) -> bool {
        self.sealed.load(Ordering::Acquire)
    }

    /// Every known type, built-ins included, in calculation order.
    pub fn modifier_types(&self) -> Vec<ModifierType> {
        let mut types: Vec<ModifierType> = self.factories.keys().copied().collect();
        types.extend(BUILTIN_TYPES);
        types.sort_unstable();
        types.dedup();
        types
    }

    /// Build one empty group per known type, in ascending type order.
    ///
    /// Built-in types always get the built-in strategies. Each group
    /// reserves the capacity `config` hints for its type. Seals the
    /// registry.
    pub fn resolve_all(&self, config: &StatConfig) -> BTreeMap<ModifierType, ModifierGroup> {
        if !self.sealed.swap(true, Ordering::AcqRel) {
            tracing::debug!(
                "Modifier type registry sealed with {} types",
                self.modifier_types().len()
            );
        }

        let mut groups = BTreeMap::new();
        for modifier_type in BUILTIN_TYPES {
            groups.insert(
                modifier_type,
                ModifierGroup::new(
                    modifier_type,
                    builtin_strategy(modifier_type),
                    config.capacity_for(modifier_type),
                ),
            );
        }

        for (&modifier_type, factory) in &self.factories {
            if modifier_type.is_builtin() {
                continue;
            }
            groups.insert(
                modifier_type,
                ModifierGroup::new(modifier_type, factory(), config.capacity_for(modifier_type)),
            );
        }

        groups
    }

    /// Reopen the registry and drop every custom registration.
    ///
    /// Meant for test isolation and host reloads. Stats already built keep
    /// the groups they snapshotted.
    pub fn reset(&mut self) {
        self.factories.clear();
        self.sealed.store(false, Ordering::Release);
        tracing::debug!("Modifier type registry reset");
    }
}

impl fmt::Debug for ModifierTypeRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ModifierTypeRegistry")
            .field("modifier_types", &self.modifier_types())
            .field("sealed", &self.is_sealed())
            .finish()
    }
}

const BUILTIN_TYPES: [ModifierType; 3] = [
    ModifierType::FLAT,
    ModifierType::ADDITIVE,
    ModifierType::MULTIPLICATIVE,
];

fn builtin_strategy(modifier_type: ModifierType) -> Box<dyn ModifierStrategy> {
    match modifier_type {
        ModifierType::ADDITIVE => Box::new(AdditiveStrategy),
        ModifierType::MULTIPLICATIVE => Box::new(MultiplicativeStrategy),
        _ => Box::new(FlatStrategy),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::modifier::Modifier;
    use crate::strategy::{BestOfReduction, HighestBonus};

    #[test]
    fn test_new_registry_is_open() {
        let registry = ModifierTypeRegistry::new();
        assert!(registry.can_register());
        assert!(!registry.is_sealed());
        assert_eq!(registry.modifier_types(), BUILTIN_TYPES.to_vec());
    }

    #[test]
    fn test_register_custom_type() {
        let mut registry = ModifierTypeRegistry::new();
        let curse = registry.register(1000, || Box::new(BestOfReduction)).unwrap();
        let aura = registry.register(150, || Box::new(HighestBonus)).unwrap();

        assert_eq!(curse.order(), 1000);
        assert_eq!(
            registry.modifier_types(),
            vec![
                ModifierType::FLAT,
                aura,
                ModifierType::ADDITIVE,
                ModifierType::MULTIPLICATIVE,
                curse,
            ]
        );
    }

    #[test]
    fn test_resolve_all_is_ordered_and_seals() {
        let mut registry = ModifierTypeRegistry::new();
        registry.register(50, || Box::new(HighestBonus)).unwrap();

        let groups = registry.resolve_all(&StatConfig::default());
        let types: Vec<ModifierType> = groups.keys().copied().collect();
        assert_eq!(
            types,
            vec![
                ModifierType::new(50),
                ModifierType::FLAT,
                ModifierType::ADDITIVE,
                ModifierType::MULTIPLICATIVE,
            ]
        );
        assert!(registry.is_sealed());

        // Idempotent once sealed
        let again = registry.resolve_all(&StatConfig::default());
        assert_eq!(again.len(), 4);
    }

    #[test]
    fn test_register_after_seal_fails() {
        let mut registry = ModifierTypeRegistry::new();
        let _ = registry.resolve_all(&StatConfig::default());

        let result = registry.register(400, || Box::new(HighestBonus));
        assert_eq!(
            result.unwrap_err(),
            StatError::RegistrationClosed(ModifierType::new(400))
        );
    }

    #[test]
    fn test_builtin_override_is_ignored() {
        let mut registry = ModifierTypeRegistry::new();
        let flat = registry.register(100, || Box::new(HighestBonus)).unwrap();
        assert_eq!(flat, ModifierType::FLAT);

        let mut groups = registry.resolve_all(&StatConfig::default());
        let group = groups.get_mut(&ModifierType::FLAT).unwrap();
        group.add(Modifier::flat(5.0));
        group.add(Modifier::flat(7.0));

        // Still summed, not "highest only"
        assert_eq!(group.contribution(0.0, 0.0), 12.0);
    }

    #[test]
    fn test_reset_reopens_and_clears_custom_types() {
        let mut registry = ModifierTypeRegistry::new();
        registry.register(1000, || Box::new(BestOfReduction)).unwrap();
        let _ = registry.resolve_all(&StatConfig::default());

        registry.reset();
        assert!(registry.can_register());
        assert_eq!(registry.modifier_types(), BUILTIN_TYPES.to_vec());
        assert!(registry.register(2000, || Box::new(BestOfReduction)).is_ok());
    }

    #[test]
    fn test_resolve_all_uses_capacity_hints() {
        let registry = ModifierTypeRegistry::new();
        let config = StatConfig::default().with_capacity_for(ModifierType::FLAT, 64);
        let groups = registry.resolve_all(&config);
        assert!(groups[&ModifierType::FLAT].modifiers().is_empty());
        assert_eq!(groups.len(), 3);
    }

    #[test]
    fn test_each_stat_gets_a_fresh_strategy() {
        use std::sync::atomic::AtomicUsize;

        let built = Arc::new(AtomicUsize::new(0));
        let counter = Arc::clone(&built);
        let mut registry = ModifierTypeRegistry::new();
        registry
            .register(1000, move || {
                counter.fetch_add(1, Ordering::SeqCst);
                Box::new(BestOfReduction)
            })
            .unwrap();

        let _ = registry.resolve_all(&StatConfig::default());
        let _ = registry.resolve_all(&StatConfig::default());
        assert_eq!(built.load(Ordering::SeqCst), 2);
    }
}

//! Stat module.
//!
//! Provides the `Stat` type, which owns a base value and one modifier group
//! per modifier type, and caches the value computed from them until a
//! modifier is added or removed.

use crate::breakdown::{GroupContribution, StatBreakdown};
use crate::config::StatConfig;
use crate::error::StatError;
use crate::events::{ModifiersChanged, Signal, SubscriptionId};
use crate::group::ModifierGroup;
use crate::modifier::Modifier;
use crate::modifier_type::ModifierType;
use crate::numeric::{round_to_digits, StatValue};
use crate::registry::ModifierTypeRegistry;
use crate::source::SourceId;
use std::collections::BTreeMap;
use std::fmt;

/// A base value adjusted by grouped modifiers, with a cached result.
///
/// The stat is either clean (the cached value is current) or dirty (a
/// modifier was added or removed since the last calculation). Reading
/// [`value`](Self::value) while dirty recalculates:
///
/// 1. Start from the base value
/// 2. Fold each group's contribution in ascending type order
/// 3. Round to the stat's digit accuracy and cache
///
/// Reading while clean returns the cache without side effects.
///
/// # Examples
///
/// ```rust
/// use modstat::{Modifier, SourceId, Stat};
///
/// let sword = SourceId::new();
/// let mut strength = Stat::new(100.0);
///
/// strength.add_modifier(Modifier::flat(20.0).with_source(sword)).unwrap();
/// strength.add_modifier(Modifier::additive(0.1).with_source(sword)).unwrap();
/// strength.add_modifier(Modifier::multiplicative(0.2)).unwrap();
///
/// // (100 + 20 + 100 * 0.1) * 1.2
/// assert_eq!(strength.value(), 156.0);
///
/// // Unequip the sword
/// assert!(strength.try_remove_all_modifiers_of(sword));
/// assert_eq!(strength.value(), 120.0);
/// ```
pub struct Stat {
    base_value: StatValue,
    cached_value: StatValue,
    dirty: bool,
    digit_accuracy: u8,

    /// One group per modifier type, in calculation order.
    groups: BTreeMap<ModifierType, ModifierGroup>,

    value_changed: Signal<StatValue>,
    modifiers_changed: Signal<ModifiersChanged>,
}

impl Stat {
    /// Create a stat that accepts the built-in modifier types only.
    ///
    /// Uses the default [`StatConfig`].
    pub fn new(base_value: StatValue) -> Self {
        Self::with_registry(base_value, &ModifierTypeRegistry::new())
    }

    /// Create a stat with every type known to `registry`.
    ///
    /// Seals the registry.
    pub fn with_registry(base_value: StatValue, registry: &ModifierTypeRegistry) -> Self {
        Self::with_config(base_value, registry, &StatConfig::default())
    }

    /// Create a stat with every type known to `registry`, using `config`
    /// for rounding and group capacity hints.
    ///
    /// Seals the registry.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use modstat::{Modifier, ModifierTypeRegistry, Stat, StatConfig};
    ///
    /// let registry = ModifierTypeRegistry::new();
    /// let config = StatConfig::default().with_digit_accuracy(0);
    ///
    /// let mut dexterity = Stat::with_config(50.0, &registry, &config);
    /// dexterity.add_modifier(Modifier::multiplicative(0.333)).unwrap();
    /// assert_eq!(dexterity.value(), 67.0);
    /// ```
    pub fn with_config(
        base_value: StatValue,
        registry: &ModifierTypeRegistry,
        config: &StatConfig,
    ) -> Self {
        let digit_accuracy = config.digit_accuracy();
        Self {
            base_value,
            cached_value: round_to_digits(base_value, digit_accuracy),
            dirty: false,
            digit_accuracy,
            groups: registry.resolve_all(config),
            value_changed: Signal::new(),
            modifiers_changed: Signal::new(),
        }
    }

    /// The value before any modifier is applied.
    pub fn base_value(&self) -> StatValue {
        self.base_value
    }

    /// Replace the base value.
    ///
    /// Always recalculates immediately and notifies value-changed
    /// subscribers.
    pub fn set_base_value(&mut self, base_value: StatValue) {
        self.base_value = base_value;
        self.recalculate();
    }

    /// The modified value.
    ///
    /// Recalculates (and notifies value-changed subscribers) only if a
    /// modifier changed since the last read.
    pub fn value(&mut self) -> StatValue {
        if self.dirty {
            self.recalculate();
        }
        self.cached_value
    }

    /// The cached value, if it is current.
    ///
    /// Returns `None` while the stat is dirty. Unlike [`value`](Self::value)
    /// this never recalculates, so it works through a shared reference.
    pub fn cached_value(&self) -> Option<StatValue> {
        (!self.dirty).then_some(self.cached_value)
    }

    /// Whether the next [`value`](Self::value) read will recalculate.
    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    /// Decimal digits the value is rounded to.
    pub fn digit_accuracy(&self) -> u8 {
        self.digit_accuracy
    }

    /// Add a modifier.
    ///
    /// Identical modifiers may coexist; each one applies.
    ///
    /// # Errors
    ///
    /// * `StatError::UnknownModifierType` - The stat has no group for the
    ///   modifier's type
    /// * `StatError::InvalidArgument` - The modifier's value is NaN or infinite
    pub fn add_modifier(&mut self, modifier: Modifier) -> Result<(), StatError> {
        check_value(&modifier)?;
        self.group_mut(modifier.modifier_type())?.add(modifier);
        self.modifiers_changed();
        Ok(())
    }

    /// Add several modifiers at once.
    ///
    /// Every modifier is checked before any is added, so on error the stat
    /// is unchanged. Subscribers are notified once for the whole batch.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use modstat::{Modifier, ModifierType, Stat, StatError};
    ///
    /// let mut hp = Stat::new(100.0);
    /// let result = hp.add_modifiers([
    ///     Modifier::flat(10.0),
    ///     Modifier::new(1.0, ModifierType::new(999)),
    /// ]);
    ///
    /// assert!(matches!(result, Err(StatError::UnknownModifierType(_))));
    /// assert_eq!(hp.modifier_count(), 0);
    /// ```
    pub fn add_modifiers<I>(&mut self, modifiers: I) -> Result<(), StatError>
    where
        I: IntoIterator<Item = Modifier>,
    {
        let modifiers: Vec<Modifier> = modifiers.into_iter().collect();
        for modifier in &modifiers {
            check_value(modifier)?;
            self.group(modifier.modifier_type())?;
        }

        if modifiers.is_empty() {
            return Ok(());
        }

        for modifier in modifiers {
            self.group_mut(modifier.modifier_type())?.add(modifier);
        }
        self.modifiers_changed();
        Ok(())
    }

    /// Remove the first modifier equal to `modifier`.
    ///
    /// Returns `false`, leaving the stat untouched, if there was none.
    pub fn try_remove_modifier(&mut self, modifier: &Modifier) -> bool {
        let removed = self
            .groups
            .get_mut(&modifier.modifier_type())
            .is_some_and(|group| group.remove(modifier));

        if removed {
            self.modifiers_changed();
        }
        removed
    }

    /// Remove every modifier contributed by `source`, in every group.
    ///
    /// Returns `true` if at least one modifier was removed.
    pub fn try_remove_all_modifiers_of(&mut self, source: SourceId) -> bool {
        let removed: usize = self
            .groups
            .values_mut()
            .map(|group| group.remove_all_of(source))
            .sum();

        if removed > 0 {
            tracing::trace!("Removed {} modifiers of {}", removed, source);
            self.modifiers_changed();
        }
        removed > 0
    }

    /// Remove every modifier.
    pub fn clear(&mut self) {
        let removed: usize = self.groups.values_mut().map(ModifierGroup::clear).sum();
        if removed > 0 {
            self.modifiers_changed();
        }
    }

    /// Every modifier, grouped in type order and in insertion order within
    /// a type.
    pub fn modifiers(&self) -> Vec<Modifier> {
        self.groups
            .values()
            .flat_map(|group| group.modifiers().iter().copied())
            .collect()
    }

    /// The modifiers of one type, in insertion order.
    ///
    /// # Errors
    ///
    /// `StatError::UnknownModifierType` if the stat has no such group.
    pub fn modifiers_of_type(&self, modifier_type: ModifierType) -> Result<&[Modifier], StatError> {
        Ok(self.group(modifier_type)?.modifiers())
    }

    /// Whether an entry equal to `modifier` is present.
    pub fn contains_modifier(&self, modifier: &Modifier) -> bool {
        self.groups
            .get(&modifier.modifier_type())
            .is_some_and(|group| group.contains(modifier))
    }

    /// Total number of modifiers across all groups.
    pub fn modifier_count(&self) -> usize {
        self.groups.values().map(ModifierGroup::len).sum()
    }

    /// The types this stat accepts, in calculation order.
    pub fn modifier_types(&self) -> Vec<ModifierType> {
        self.groups.keys().copied().collect()
    }

    /// Report how the value is reached, group by group.
    ///
    /// Calculates from scratch and leaves the cache, dirty flag and
    /// subscribers untouched.
    pub fn breakdown(&self) -> StatBreakdown {
        let mut breakdown = StatBreakdown::new(self.base_value);
        let mut current = self.base_value;

        for (&modifier_type, group) in &self.groups {
            let contribution = group.contribution(self.base_value, current);
            current += contribution;
            breakdown.add_group(GroupContribution {
                modifier_type,
                strategy: group.strategy().description(),
                modifier_count: group.len(),
                contribution,
                running_value: current,
            });
        }

        breakdown.value = round_to_digits(current, self.digit_accuracy);
        breakdown
    }

    /// Call `callback` with the new value every time the value is
    /// recalculated.
    pub fn on_value_changed<F>(&mut self, callback: F) -> SubscriptionId
    where
        F: FnMut(&StatValue) + Send + Sync + 'static,
    {
        self.value_changed.subscribe(callback)
    }

    /// Call `callback` every time a modifier is added or removed.
    pub fn on_modifiers_changed<F>(&mut self, callback: F) -> SubscriptionId
    where
        F: FnMut(&ModifiersChanged) + Send + Sync + 'static,
    {
        self.modifiers_changed.subscribe(callback)
    }

    /// Remove a subscription made on this stat.
    ///
    /// Returns `false` if `id` is not subscribed here.
    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        self.value_changed.unsubscribe(id) || self.modifiers_changed.unsubscribe(id)
    }

    fn group(&self, modifier_type: ModifierType) -> Result<&ModifierGroup, StatError> {
        self.groups
            .get(&modifier_type)
            .ok_or(StatError::UnknownModifierType(modifier_type))
    }

    fn group_mut(&mut self, modifier_type: ModifierType) -> Result<&mut ModifierGroup, StatError> {
        self.groups
            .get_mut(&modifier_type)
            .ok_or(StatError::UnknownModifierType(modifier_type))
    }

    fn modifiers_changed(&mut self) {
        self.dirty = true;
        let change = ModifiersChanged {
            modifier_count: self.modifier_count(),
        };
        self.modifiers_changed.emit(&change);
    }

    fn recalculate(&mut self) {
        let mut current = self.base_value;
        for group in self.groups.values() {
            current += group.contribution(self.base_value, current);
        }

        self.cached_value = round_to_digits(current, self.digit_accuracy);
        self.dirty = false;
        tracing::trace!("Recalculated stat value: {}", self.cached_value);
        self.value_changed.emit(&self.cached_value);
    }
}

fn check_value(modifier: &Modifier) -> Result<(), StatError> {
    if modifier.value().is_finite() {
        Ok(())
    } else {
        Err(StatError::InvalidArgument(format!(
            "modifier value must be finite, got {}",
            modifier.value()
        )))
    }
}

impl fmt::Debug for Stat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Stat")
            .field("base_value", &self.base_value)
            .field("cached_value", &self.cached_value)
            .field("dirty", &self.dirty)
            .field("digit_accuracy", &self.digit_accuracy)
            .field("groups", &self.groups)
            .finish()
    }
}

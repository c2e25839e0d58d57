//! Modifier groups.
//!
//! A stat owns one `ModifierGroup` per modifier type. The group keeps its
//! modifiers in insertion order and pairs them with the strategy that turns
//! them into a contribution.

use crate::modifier::Modifier;
use crate::modifier_type::ModifierType;
use crate::numeric::StatValue;
use crate::source::SourceId;
use crate::strategy::ModifierStrategy;
use std::fmt;

/// Ordered container of modifiers of a single type plus its strategy.
pub struct ModifierGroup {
    modifier_type: ModifierType,
    modifiers: Vec<Modifier>,
    strategy: Box<dyn ModifierStrategy>,
}

impl ModifierGroup {
    /// Create an empty group with room for `capacity` modifiers.
    pub fn new(
        modifier_type: ModifierType,
        strategy: Box<dyn ModifierStrategy>,
        capacity: usize,
    ) -> Self {
        Self {
            modifier_type,
            modifiers: Vec::with_capacity(capacity),
            strategy,
        }
    }

    /// The type every modifier in this group shares.
    pub fn modifier_type(&self) -> ModifierType {
        self.modifier_type
    }

    /// The strategy combining this group's modifiers.
    pub fn strategy(&self) -> &dyn ModifierStrategy {
        self.strategy.as_ref()
    }

    /// Append a modifier.
    pub fn add(&mut self, modifier: Modifier) {
        debug_assert_eq!(modifier.modifier_type(), self.modifier_type);

        if self.modifiers.len() == self.modifiers.capacity() {
            tracing::debug!(
                "Resizing {} modifier group past {} entries; consider a larger capacity hint",
                self.modifier_type,
                self.modifiers.capacity()
            );
        }
        self.modifiers.push(modifier);
    }

    /// Remove the first modifier equal to `modifier`.
    ///
    /// Returns `false` if no entry matched.
    pub fn remove(&mut self, modifier: &Modifier) -> bool {
        match self.modifiers.iter().position(|m| m == modifier) {
            Some(index) => {
                self.modifiers.remove(index);
                true
            }
            None => false,
        }
    }

    /// Remove every modifier contributed by `source`.
    ///
    /// Returns how many were removed.
    pub fn remove_all_of(&mut self, source: SourceId) -> usize {
        let before = self.modifiers.len();
        self.modifiers.retain(|m| !m.is_from(source));
        before - self.modifiers.len()
    }

    /// Whether an entry equal to `modifier` is present.
    pub fn contains(&self, modifier: &Modifier) -> bool {
        self.modifiers.contains(modifier)
    }

    /// The modifiers, in insertion order.
    pub fn modifiers(&self) -> &[Modifier] {
        &self.modifiers
    }

    pub fn len(&self) -> usize {
        self.modifiers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.modifiers.is_empty()
    }

    /// Remove every modifier. Returns how many were removed.
    pub fn clear(&mut self) -> usize {
        let removed = self.modifiers.len();
        self.modifiers.clear();
        removed
    }

    /// Contribution of this group to the running value.
    pub fn contribution(&self, base_value: StatValue, current_value: StatValue) -> StatValue {
        self.strategy
            .contribution(&self.modifiers, base_value, current_value)
    }
}

impl fmt::Debug for ModifierGroup {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ModifierGroup")
            .field("modifier_type", &self.modifier_type)
            .field("modifiers", &self.modifiers)
            .field("strategy", &format!("<{}>", self.strategy.description()))
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::strategy::{FlatStrategy, MultiplicativeStrategy};

    fn flat_group() -> ModifierGroup {
        ModifierGroup::new(ModifierType::FLAT, Box::new(FlatStrategy), 4)
    }

    #[test]
    fn test_add_preserves_order() {
        let mut group = flat_group();
        group.add(Modifier::flat(3.0));
        group.add(Modifier::flat(1.0));
        group.add(Modifier::flat(2.0));

        let values: Vec<f64> = group.modifiers().iter().map(Modifier::value).collect();
        assert_eq!(values, vec![3.0, 1.0, 2.0]);
    }

    #[test]
    fn test_remove_first_match_only() {
        let mut group = flat_group();
        group.add(Modifier::flat(10.0));
        group.add(Modifier::flat(10.0));

        assert!(group.remove(&Modifier::flat(10.0)));
        assert_eq!(group.len(), 1);
        assert!(group.remove(&Modifier::flat(10.0)));
        assert!(!group.remove(&Modifier::flat(10.0)));
        assert!(group.is_empty());
    }

    #[test]
    fn test_remove_all_of_source() {
        let owner = SourceId::new();
        let other = SourceId::new();
        let mut group = flat_group();
        group.add(Modifier::flat(1.0).with_source(owner));
        group.add(Modifier::flat(2.0).with_source(other));
        group.add(Modifier::flat(3.0));
        group.add(Modifier::flat(4.0).with_source(owner));

        assert_eq!(group.remove_all_of(owner), 2);
        let values: Vec<f64> = group.modifiers().iter().map(Modifier::value).collect();
        assert_eq!(values, vec![2.0, 3.0]);
        assert_eq!(group.remove_all_of(owner), 0);
    }

    #[test]
    fn test_contains_and_clear() {
        let mut group = flat_group();
        group.add(Modifier::flat(5.0));
        assert!(group.contains(&Modifier::flat(5.0)));
        assert!(!group.contains(&Modifier::flat(6.0)));

        assert_eq!(group.clear(), 1);
        assert!(!group.contains(&Modifier::flat(5.0)));
        assert_eq!(group.clear(), 0);
    }

    #[test]
    fn test_grows_past_capacity() {
        let mut group = ModifierGroup::new(ModifierType::FLAT, Box::new(FlatStrategy), 1);
        for i in 0..10 {
            group.add(Modifier::flat(i as f64));
        }
        assert_eq!(group.len(), 10);
        assert_eq!(group.contribution(0.0, 0.0), 45.0);
    }

    #[test]
    fn test_contribution_delegates_to_strategy() {
        let mut group = ModifierGroup::new(
            ModifierType::MULTIPLICATIVE,
            Box::new(MultiplicativeStrategy),
            4,
        );
        group.add(Modifier::multiplicative(1.0));
        assert_eq!(group.contribution(10.0, 30.0), 30.0);
    }

    #[test]
    fn test_debug_shows_strategy() {
        let group = flat_group();
        assert!(format!("{:?}", group).contains("flat sum"));
    }
}

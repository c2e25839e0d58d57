use modstat::*;
use proptest::prelude::*;

fn modifier_strategy() -> impl Strategy<Value = Modifier> {
    prop_oneof![
        (-100.0..100.0f64).prop_map(Modifier::flat),
        (-1.0..1.0f64).prop_map(Modifier::additive),
        (-1.0..1.0f64).prop_map(Modifier::multiplicative),
    ]
}

fn stat_with(base: StatValue, modifiers: &[Modifier]) -> Stat {
    let mut stat = Stat::new(base);
    stat.add_modifiers(modifiers.iter().copied()).unwrap();
    stat
}

proptest! {
    /// Adding a modifier and removing it again restores the value.
    #[test]
    fn add_then_remove_restores_value(
        base in -1000.0..1000.0f64,
        existing in prop::collection::vec(modifier_strategy(), 0..8),
        added in modifier_strategy(),
    ) {
        let mut stat = stat_with(base, &existing);
        let before = stat.value();

        let added = added.with_source(SourceId::new());
        stat.add_modifier(added).unwrap();
        prop_assert!(stat.is_dirty());
        prop_assert!(stat.try_remove_modifier(&added));

        prop_assert_eq!(stat.value(), before);
        prop_assert_eq!(stat.modifier_count(), existing.len());
    }

    /// The cached value always matches a fresh breakdown.
    #[test]
    fn value_matches_breakdown(
        base in -1000.0..1000.0f64,
        modifiers in prop::collection::vec(modifier_strategy(), 0..12),
    ) {
        let mut stat = stat_with(base, &modifiers);
        let breakdown = stat.breakdown();
        prop_assert_eq!(stat.value(), breakdown.value);
        prop_assert_eq!(stat.cached_value(), Some(breakdown.value));
    }

    /// Removing a source leaves exactly the modifiers it did not tag.
    #[test]
    fn remove_all_of_source(
        tagged in prop::collection::vec(modifier_strategy(), 0..6),
        untagged in prop::collection::vec(modifier_strategy(), 0..6),
    ) {
        let owner = SourceId::new();
        let mut stat = stat_with(10.0, &untagged);
        stat.add_modifiers(tagged.iter().map(|m| m.with_source(owner))).unwrap();

        let removed = stat.try_remove_all_modifiers_of(owner);
        prop_assert_eq!(removed, !tagged.is_empty());
        prop_assert_eq!(stat.modifier_count(), untagged.len());
        prop_assert_eq!(stat.value(), stat_with(10.0, &untagged).value());
    }
}

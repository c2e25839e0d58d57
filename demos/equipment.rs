//! Equipment example: a character equips armor, is cursed, then unequips
//!
//! This example demonstrates:
//! - Stacking flat, additive and multiplicative modifiers
//! - Removing everything one source applied
//! - Registering a custom modifier type
//! - Subscribing to value changes and printing a breakdown
//!
//! Run with `RUST_LOG=modstat=trace` to see recalculations logged.

use modstat::strategy::BestOfReduction;
use modstat::*;

fn print_breakdown(name: &str, stat: &Stat) {
    let breakdown = stat.breakdown();
    println!("\n=== {} ===", name);
    println!("Base Value: {:.2}", breakdown.base_value);
    for group in breakdown.groups.iter().filter(|g| g.modifier_count > 0) {
        println!(
            "  {} ({}, {} modifiers): {:+.2} -> {:.2}",
            group.modifier_type,
            group.strategy,
            group.modifier_count,
            group.contribution,
            group.running_value
        );
    }
    println!("Final Value: {:.2}", breakdown.value);
}

fn main() -> Result<(), StatError> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::INFO.into()),
        )
        .with_writer(std::io::stderr)
        .init();

    // Custom types must be registered before the first stat is built
    let mut registry = ModifierTypeRegistry::new();
    let curse = registry.register(1000, || Box::new(BestOfReduction))?;

    let mut strength = Stat::with_registry(100.0, &registry);
    let mut dexterity = Stat::with_registry(50.0, &registry);

    strength.on_value_changed(|value| println!("  strength is now {:.2}", value));

    let armor = SourceId::new();
    let plate_bonus = Modifier::flat(20.0).with_source(armor);
    let plate_training = Modifier::additive(0.1).with_source(armor);
    let potion = Modifier::multiplicative(0.2);

    println!("Equipping armor and drinking two potions:");
    strength.add_modifiers([plate_training, plate_bonus, plate_bonus, potion, potion])?;
    strength.value(); // 216

    println!("\nAdding another armor piece:");
    strength.add_modifier(plate_bonus)?;
    strength.value(); // 244.8
    print_breakdown("Strength", &strength);

    println!("\nCursed:");
    strength.add_modifier(Modifier::new(0.25, curse))?;
    strength.value(); // 75
    strength.try_remove_modifier(&Modifier::new(0.25, curse));

    println!("\nUnequipping armor:");
    strength.try_remove_all_modifiers_of(armor);
    strength.value(); // 144

    dexterity.add_modifiers([plate_bonus, potion, plate_training, plate_bonus])?;
    print_breakdown("Dexterity", &dexterity);
    println!("\nCalculation: (50 + 20 + 20 + 50 * 0.1) * 1.2 = {:.2}", dexterity.value());

    Ok(())
}

//! # modstat - Ordered, Cached Stat Modifiers for Games
//!
//! A small engine for character attributes (strength, dexterity, max health)
//! whose value is a base number adjusted by any number of modifiers:
//! - **Ordered** calculation (modifier types are evaluated by an order key)
//! - **Extensible** strategies (register custom modifier types at startup)
//! - **Cached** values (recomputed only after a modifier changes)
//! - **Observable** changes (value-changed and modifiers-changed callbacks)
//!
//! ## Core Concepts
//!
//! ### Calculation
//!
//! A stat folds its modifier groups over the base value:
//!
//! ```text
//! base → [Flat] → [Additive] → [Multiplicative] → [custom...] → round
//! ```
//!
//! 1. **Flat** modifiers add their values
//! 2. **Additive** modifiers add a fraction of the base value
//! 3. **Multiplicative** modifiers scale the running value, one after another
//!
//! Each group sees the base value and the running value produced by the
//! groups before it. The result is rounded to the stat's digit accuracy.
//!
//! ### Sources
//!
//! Modifiers can be tagged with a [`SourceId`] naming the item, buff or
//! effect that applied them, so everything from one source can be removed
//! at once.
//!
//! ## Example
//!
//! ```rust
//! use modstat::*;
//!
//! let sword = SourceId::new();
//! let mut strength = Stat::new(100.0);
//!
//! strength.add_modifiers([
//!     Modifier::flat(20.0).with_source(sword),
//!     Modifier::flat(20.0).with_source(sword),
//!     Modifier::additive(0.1),
//!     Modifier::multiplicative(0.2).with_source(sword),
//!     Modifier::multiplicative(0.2).with_source(sword),
//! ]).unwrap();
//!
//! // (100 + 20 + 20 + 10) * 1.2 * 1.2
//! assert_eq!(strength.value(), 216.0);
//!
//! strength.try_remove_all_modifiers_of(sword);
//! assert_eq!(strength.value(), 110.0);
//! ```
//!
//! ## Modules
//!
//! - [`modifier_type`] - Ordered modifier type keys
//! - [`modifier`] - Modifiers and their equality rules
//! - [`source`] - Identity tokens for modifier sources
//! - [`strategy`] - How a group turns modifiers into a contribution
//! - [`group`] - Per-type modifier containers
//! - [`registry`] - Modifier type registration and sealing
//! - [`stat`] - The stat itself
//! - [`breakdown`] - Calculation reports
//! - [`events`] - Change notifications
//! - [`config`] - Construction options
//! - [`numeric`] - Rounding and tolerance helpers
//! - [`error`] - Error types

pub mod breakdown;
pub mod config;
pub mod error;
pub mod events;
pub mod group;
pub mod modifier;
pub mod modifier_type;
pub mod numeric;
pub mod registry;
pub mod source;
pub mod stat;
pub mod strategy;

// Re-export main types for convenience
pub use breakdown::{GroupContribution, StatBreakdown};
pub use config::StatConfig;
pub use error::StatError;
pub use events::{ModifiersChanged, Signal, SubscriptionId};
pub use group::ModifierGroup;
pub use modifier::Modifier;
pub use modifier_type::ModifierType;
pub use numeric::{StatValue, MAX_ROUND_DIGITS};
pub use registry::ModifierTypeRegistry;
pub use source::SourceId;
pub use stat::Stat;
pub use strategy::{
    AdditiveStrategy, BestOfReduction, FlatStrategy, HighestBonus, ModifierStrategy,
    MultiplicativeStrategy, StrategyFactory,
};

//! Stat breakdown module.
//!
//! Contains the `StatBreakdown` type, a read-only report of how a stat's
//! value was reached: the base value, each group's contribution in
//! calculation order, and the rounded result.

use crate::modifier_type::ModifierType;
use crate::numeric::StatValue;
use serde::{Deserialize, Serialize};

/// One group's share of a stat's value.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct GroupContribution {
    /// The group's modifier type.
    pub modifier_type: ModifierType,

    /// Description of the strategy that produced the contribution.
    pub strategy: String,

    /// Number of modifiers in the group.
    pub modifier_count: usize,

    /// Delta added to the running value.
    pub contribution: StatValue,

    /// Running value after this group, before rounding.
    pub running_value: StatValue,
}

/// How a stat's value was calculated.
///
/// Groups are listed in calculation order, empty groups included.
///
/// # Examples
///
/// ```rust
/// use modstat::{Modifier, ModifierType, Stat};
///
/// let mut hp = Stat::new(100.0);
/// hp.add_modifier(Modifier::flat(20.0)).unwrap();
/// hp.add_modifier(Modifier::multiplicative(0.5)).unwrap();
///
/// let breakdown = hp.breakdown();
/// assert_eq!(breakdown.base_value, 100.0);
/// assert_eq!(breakdown.value, 180.0);
///
/// let flat = breakdown.contribution_of(ModifierType::FLAT).unwrap();
/// assert_eq!(flat.contribution, 20.0);
/// assert_eq!(flat.running_value, 120.0);
/// ```
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct StatBreakdown {
    /// The stat's base value.
    pub base_value: StatValue,

    /// Per-group contributions, in calculation order.
    pub groups: Vec<GroupContribution>,

    /// The final value, rounded to the stat's digit accuracy.
    pub value: StatValue,
}

impl StatBreakdown {
    /// Create a breakdown with no groups.
    ///
    /// Groups are appended with [`add_group`](Self::add_group) while the stat
    /// folds its modifiers.
    pub fn new(base_value: StatValue) -> Self {
        Self {
            base_value,
            groups: Vec::new(),
            value: base_value,
        }
    }

    /// Record one group's contribution.
    pub fn add_group(&mut self, group: GroupContribution) {
        self.groups.push(group);
    }

    /// Find the contribution recorded for `modifier_type`.
    pub fn contribution_of(&self, modifier_type: ModifierType) -> Option<&GroupContribution> {
        self.groups
            .iter()
            .find(|group| group.modifier_type == modifier_type)
    }

    /// The unrounded value reached after the last group.
    pub fn unrounded_value(&self) -> StatValue {
        self.groups
            .last()
            .map(|group| group.running_value)
            .unwrap_or(self.base_value)
    }
}

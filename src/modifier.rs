//! Modifier module.
//!
//! A `Modifier` is a single adjustment to a stat: a raw value, the type that
//! decides how the value is combined, and an optional source used for bulk
//! removal. What the value means (a flat delta, a fraction of the base, a
//! percentage of the running total) is defined by the strategy of the group
//! the modifier is filed under, not by the modifier itself.

use crate::error::StatError;
use crate::modifier_type::ModifierType;
use crate::numeric::{approx_eq, StatValue};
use crate::source::SourceId;
use crate::stat::Stat;
use std::fmt;

/// An immutable (value, type, source) adjustment.
///
/// Two modifiers are equal when their types match, their sources are the
/// same identity (or both absent) and their values differ by less than
/// [`MODIFIER_EPSILON`](crate::numeric::MODIFIER_EPSILON).
///
/// # Examples
///
/// ```rust
/// use modstat::{Modifier, ModifierType, SourceId};
///
/// let ring = SourceId::new();
/// let bonus = Modifier::flat(20.0).with_source(ring);
///
/// assert_eq!(bonus.value(), 20.0);
/// assert_eq!(bonus.modifier_type(), ModifierType::FLAT);
/// assert_eq!(bonus.source(), Some(ring));
///
/// // The default modifier is a source-less flat zero
/// assert_eq!(Modifier::default(), Modifier::flat(0.0));
/// ```
#[derive(Debug, Clone, Copy, Default)]
pub struct Modifier {
    value: StatValue,
    modifier_type: ModifierType,
    source: Option<SourceId>,
}

impl Modifier {
    /// Create a source-less modifier of any type.
    pub fn new(value: StatValue, modifier_type: ModifierType) -> Self {
        Self {
            value,
            modifier_type,
            source: None,
        }
    }

    /// Create a flat modifier (`+value`).
    pub fn flat(value: StatValue) -> Self {
        Self::new(value, ModifierType::FLAT)
    }

    /// Create an additive modifier (`+value × base`).
    ///
    /// `0.1` adds 10% of the stat's base value.
    pub fn additive(value: StatValue) -> Self {
        Self::new(value, ModifierType::ADDITIVE)
    }

    /// Create a multiplicative modifier (`×(1 + value)` on the running value).
    ///
    /// `0.2` scales the running value by 1.2.
    pub fn multiplicative(value: StatValue) -> Self {
        Self::new(value, ModifierType::MULTIPLICATIVE)
    }

    /// Return a copy of this modifier tagged with `source`.
    pub fn with_source(self, source: SourceId) -> Self {
        Self {
            source: Some(source),
            ..self
        }
    }

    /// The raw value.
    pub fn value(&self) -> StatValue {
        self.value
    }

    /// The type that selects this modifier's group.
    pub fn modifier_type(&self) -> ModifierType {
        self.modifier_type
    }

    /// The source this modifier was tagged with, if any.
    pub fn source(&self) -> Option<SourceId> {
        self.source
    }

    /// Whether this modifier was contributed by `source`.
    pub fn is_from(&self, source: SourceId) -> bool {
        self.source == Some(source)
    }

    /// Add this modifier to `stat`.
    ///
    /// Shorthand for [`Stat::add_modifier`].
    ///
    /// # Examples
    ///
    /// ```rust
    /// use modstat::{Modifier, Stat};
    ///
    /// let mut strength = Stat::new(100.0);
    /// Modifier::flat(5.0).apply_to(&mut strength).unwrap();
    /// assert_eq!(strength.value(), 105.0);
    /// ```
    pub fn apply_to(self, stat: &mut Stat) -> Result<(), StatError> {
        stat.add_modifier(self)
    }
}

impl PartialEq for Modifier {
    fn eq(&self, other: &Self) -> bool {
        self.modifier_type == other.modifier_type
            && self.source == other.source
            && approx_eq(self.value, other.value)
    }
}

impl fmt::Display for Modifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Value:{} Type:{}", self.value, self.modifier_type)
    }
}

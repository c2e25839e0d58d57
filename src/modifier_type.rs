//! Modifier type module.
//!
//! Provides the `ModifierType` type, an ordered key that selects which
//! group a modifier is filed under and when that group is evaluated.

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;

/// Ordered identifier for a kind of modifier.
///
/// The wrapped order key is the sole determinant of calculation order:
/// groups are always evaluated from the lowest key to the highest. The three
/// built-in types sit at 100, 200 and 300, leaving room for custom types
/// before, between and after them.
///
/// # Examples
///
/// ```rust
/// use modstat::ModifierType;
///
/// assert!(ModifierType::FLAT < ModifierType::ADDITIVE);
/// assert!(ModifierType::ADDITIVE < ModifierType::MULTIPLICATIVE);
///
/// // A custom type evaluated after every built-in
/// let curse = ModifierType::new(1000);
/// assert!(curse > ModifierType::MULTIPLICATIVE);
/// assert!(!curse.is_builtin());
/// ```
#[derive(Debug, Clone, Copy, Hash, PartialEq, Eq, PartialOrd, Ord)]
pub struct ModifierType(i32);

impl ModifierType {
    /// Adds a fixed amount to the running value.
    pub const FLAT: ModifierType = ModifierType(100);

    /// Adds a fraction of the base value to the running value.
    pub const ADDITIVE: ModifierType = ModifierType(200);

    /// Scales the running value by each modifier in turn.
    pub const MULTIPLICATIVE: ModifierType = ModifierType(300);

    /// Create a modifier type from its order key.
    ///
    /// Creating a type does not register it. Stats only accept types that
    /// were registered before they were built; see
    /// [`ModifierTypeRegistry::register`](crate::ModifierTypeRegistry::register).
    pub const fn new(order: i32) -> Self {
        Self(order)
    }

    /// Get the order key of this type.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use modstat::ModifierType;
    ///
    /// assert_eq!(ModifierType::ADDITIVE.order(), 200);
    /// ```
    pub const fn order(self) -> i32 {
        self.0
    }

    /// Whether this is one of the three built-in types.
    pub const fn is_builtin(self) -> bool {
        matches!(self.0, 100 | 200 | 300)
    }
}

impl Default for ModifierType {
    fn default() -> Self {
        Self::FLAT
    }
}

impl From<i32> for ModifierType {
    fn from(order: i32) -> Self {
        Self::new(order)
    }
}

impl Serialize for ModifierType {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        self.0.serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for ModifierType {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let order = i32::deserialize(deserializer)?;
        Ok(ModifierType::new(order))
    }
}

impl fmt::Display for ModifierType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match *self {
            Self::FLAT => write!(f, "Flat"),
            Self::ADDITIVE => write!(f, "Additive"),
            Self::MULTIPLICATIVE => write!(f, "Multiplicative"),
            Self(order) => write!(f, "Custom({})", order),
        }
    }
}

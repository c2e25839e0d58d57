//! Error types for stat modification.
//!
//! All errors signal misuse of the API (adding a modifier of a type the stat
//! does not know, registering a type too late, passing a non-finite value)
//! and are represented by the `StatError` enum. Operations that fail leave
//! the stat or registry untouched.

use crate::modifier_type::ModifierType;
use thiserror::Error;

/// Errors that can occur when building or modifying stats.
///
/// # Examples
///
/// ```rust
/// use modstat::{ModifierType, StatError};
///
/// let err = StatError::UnknownModifierType(ModifierType::new(-666));
/// println!("{}", err); // "Unknown modifier type: Custom(-666)"
/// ```
#[derive(Debug, Error, Clone, PartialEq)]
pub enum StatError {
    /// The stat has no group for this modifier type.
    ///
    /// Either the type was never registered, or it was registered after
    /// the stat snapshotted the registry.
    #[error("Unknown modifier type: {0}")]
    UnknownModifierType(ModifierType),

    /// A modifier type was registered after the registry was sealed.
    ///
    /// The registry seals the first time a stat is built from it; register
    /// every custom type before constructing stats.
    #[error("Cannot register modifier type {0}: registry is sealed")]
    RegistrationClosed(ModifierType),

    /// An argument was rejected (for example a NaN modifier value).
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    /// A stat configuration could not be parsed.
    #[error("Invalid stat config: {0}")]
    InvalidConfig(String),
}

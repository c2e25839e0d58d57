//! Modifier sources.
//!
//! A source identifies whoever contributed a modifier (a piece of equipment,
//! a buff, an aura) so that everything it contributed can be removed in one
//! call. Sources compare by identity: two ids are equal only if one is a copy
//! of the other.

use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};

static NEXT_SOURCE_ID: AtomicU64 = AtomicU64::new(1);

/// Opaque identity token for the origin of a modifier.
///
/// Every call to [`SourceId::new`] returns a token that is different from
/// every other token minted in this process. Hosts keep the token next to
/// the object it stands for and tag modifiers with it.
///
/// # Examples
///
/// ```rust
/// use modstat::SourceId;
///
/// let sword = SourceId::new();
/// let shield = SourceId::new();
///
/// let tagged = sword;
///
/// assert_eq!(sword, tagged);
/// assert_ne!(sword, shield);
/// ```
#[derive(Debug, Clone, Copy, Hash, PartialEq, Eq)]
pub struct SourceId(u64);

impl SourceId {
    /// Mint a new, process-unique source id.
    #[allow(clippy::new_without_default)]
    pub fn new() -> Self {
        Self(NEXT_SOURCE_ID.fetch_add(1, Ordering::Relaxed))
    }

    /// Get the raw token value, for logging.
    pub fn as_u64(self) -> u64 {
        self.0
    }
}

impl fmt::Display for SourceId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "source#{}", self.0)
    }
}

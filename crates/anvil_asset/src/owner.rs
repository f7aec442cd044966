//! Owner tokens
//!
//! An owner is the second half of every cache key. Two subsystems that present
//! the same owner share an asset; different owners each get their own copy.

use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};

static NEXT_OWNER: AtomicU64 = AtomicU64::new(1);

/// Opaque owner identity.
///
/// Tokens are only ever compared. `Owner::NONE` is the shared bucket used when
/// a caller doesn't care about isolation. Tokens from [`Owner::unique`] are
/// never handed out twice, so a scene created after another one was dropped
/// can't accidentally pick up the old scene's assets.
#[derive(Debug, Copy, Clone, Default, PartialEq, Eq, Hash)]
pub struct Owner(u64);

impl Owner {
    /// No specific owner.
    pub const NONE: Owner = Owner(0);

    /// Issue a fresh, process-unique owner token.
    pub fn unique() -> Self {
        Owner(NEXT_OWNER.fetch_add(1, Ordering::Relaxed))
    }

    pub fn is_none(&self) -> bool {
        *self == Self::NONE
    }
}

impl fmt::Display for Owner {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_none() {
            write!(f, "shared")
        } else {
            write!(f, "owner#{}", self.0)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unique_owners_differ() {
        let a = Owner::unique();
        let b = Owner::unique();

        assert_ne!(a, b);
        assert!(!a.is_none());
        assert_eq!(Owner::default(), Owner::NONE);
    }
}

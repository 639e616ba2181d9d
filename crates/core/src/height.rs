//! Height - Logical clock value
//!
//! The host supplies a monotonically non-decreasing height with every
//! invocation. All expiry comparisons use it; nothing here advances it.

use serde::{Deserialize, Serialize};
use std::fmt;

/// A point on the host's logical clock.
///
/// Window arithmetic saturates so that an expiry near `u64::MAX` can never
/// wrap into the past.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct Height(u64);

impl Height {
    /// The origin of the logical clock
    pub const ZERO: Self = Self(0);

    /// Create a height from a raw clock value
    #[inline]
    pub const fn new(value: u64) -> Self {
        Self(value)
    }

    /// Get the raw clock value
    #[inline]
    pub const fn value(&self) -> u64 {
        self.0
    }

    /// The height `window` ticks after this one, saturating at the maximum.
    #[inline]
    pub const fn saturating_add(&self, window: u64) -> Self {
        Self(self.0.saturating_add(window))
    }
}

impl From<u64> for Height {
    fn from(value: u64) -> Self {
        Self(value)
    }
}

impl fmt::Display for Height {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ordering() {
        assert!(Height::new(10) < Height::new(11));
        assert!(Height::new(10) >= Height::new(10));
    }

    #[test]
    fn test_saturating_add() {
        assert_eq!(Height::new(5).saturating_add(10), Height::new(15));
        assert_eq!(
            Height::new(u64::MAX).saturating_add(1),
            Height::new(u64::MAX)
        );
    }

    #[test]
    fn test_serde_transparent() {
        let h = Height::new(42);
        let json = serde_json::to_string(&h).unwrap();
        assert_eq!(json, "42");
        let parsed: Height = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, h);
    }
}

//! Per-identity compliance standing

use serde::{Deserialize, Serialize};

use gatekeeper_core::{ComplianceLevel, Height};

/// The compliance standing of one identity.
///
/// Created once at registration; never deleted. The blacklist flag is only
/// read here - it is owned by an external sanctions process and survives
/// every update untouched.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ComplianceRecord {
    /// Verified trust tier
    pub level: ComplianceLevel,
    /// Reputation score, independent of the tier
    pub reputation: u32,
    /// Number of recorded infractions
    pub violation_count: u32,
    /// Height of the most recent verification
    pub last_verified: Height,
    /// Height after which the verification no longer counts
    pub verification_expiry: Height,
    /// Whether the identity is barred outright
    pub blacklisted: bool,
}

impl ComplianceRecord {
    /// Whether the verification window still covers `now`
    #[inline]
    pub fn is_verification_current(&self, now: Height) -> bool {
        self.verification_expiry >= now
    }
}

//! Policy records and the general-requirements predicate

use serde::{Deserialize, Serialize};

use gatekeeper_core::{ComplianceLevel, Height, Identity, PolicyId};
use gatekeeper_identity::ComplianceRecord;

/// A named bundle of compliance requirements with a validity window.
///
/// Immutable once created. A policy becomes functionally inert when the
/// clock passes `expiration_height` or `active` is false - no record
/// mutation marks expiry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Policy {
    pub id: PolicyId,
    pub name: String,
    pub required_level: ComplianceLevel,
    pub expiration_height: Height,
    pub active: bool,
    pub min_reputation: u32,
    pub max_violations: u32,
    pub created_by: Identity,
    pub created_at: Height,
}

impl Policy {
    /// Whether the validity window still covers `now`
    #[inline]
    pub fn is_active(&self, now: Height) -> bool {
        self.active && self.expiration_height >= now
    }

    /// Whether `record` satisfies this policy's general requirements.
    ///
    /// A short-circuiting conjunction in fixed order: tier, reputation,
    /// violation ceiling, blacklist, verification window. Both the approval
    /// registry and the evaluation engine gate on this exact predicate.
    pub fn is_satisfied_by(&self, record: &ComplianceRecord, now: Height) -> bool {
        record.level >= self.required_level
            && record.reputation >= self.min_reputation
            && record.violation_count <= self.max_violations
            && !record.blacklisted
            && record.is_verification_current(now)
    }
}

/// Parameters for creating a policy
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PolicyDraft {
    /// Display name, bounded by `Limits::max_policy_name_len`
    pub name: String,
    /// Required tier as a raw value, validated on creation
    pub required_level: u8,
    /// Validity window in ticks from the creation height
    pub duration: u64,
    /// Minimum reputation score
    pub min_reputation: u32,
    /// Violation ceiling
    pub max_violations: u32,
}

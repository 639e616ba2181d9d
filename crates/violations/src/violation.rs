//! Infraction records

use serde::{Deserialize, Serialize};

use gatekeeper_core::{Height, PolicyId, ViolationId};

/// Lowest accepted severity
pub const SEVERITY_MIN: u8 = 1;
/// Highest accepted severity
pub const SEVERITY_MAX: u8 = 10;

/// One recorded infraction.
///
/// Never mutated or removed after creation. The resolved flag is written
/// once, as false, at recording time.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Violation {
    pub id: ViolationId,
    /// The policy that was infringed
    pub policy_id: PolicyId,
    /// Free-form classification of the infraction
    pub kind: String,
    /// Severity within [`SEVERITY_MIN`]..=[`SEVERITY_MAX`]
    pub severity: u8,
    pub recorded_at: Height,
    pub resolved: bool,
}

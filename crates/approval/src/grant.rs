//! Approval records

use serde::{Deserialize, Serialize};

use gatekeeper_core::{Height, Identity};

/// A discretionary grant for one (identity, policy) pair.
///
/// Expiry is data, not scheduling: nothing is cancelled when the clock
/// passes `expires_at`, the grant simply stops counting.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Approval {
    /// Whether the grant is in force
    pub approved: bool,
    /// Height at which the grant was written
    pub approved_at: Height,
    /// The officer or administrator who granted it
    pub approved_by: Identity,
    /// Height after which the grant no longer counts
    pub expires_at: Height,
}

impl Approval {
    /// Whether the grant counts at `now`
    #[inline]
    pub fn is_live(&self, now: Height) -> bool {
        self.approved && self.expires_at >= now
    }
}

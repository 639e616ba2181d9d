//! ComplianceLevel - Verified trust tiers
//!
//! Five tiers, 0 through 4. Tier comparisons are ordered from lowest to
//! highest so policy gating is a plain `>=` check.

use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use strum_macros::{Display, EnumString};

use crate::error::ComplianceError;

/// Verified trust grade of an identity - ordered from lowest to highest
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display, EnumString,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
#[repr(u8)]
pub enum ComplianceLevel {
    /// No verification on record
    Unverified = 0,
    /// Entry tier assigned at registration
    Basic = 1,
    /// Standard verification
    Standard = 2,
    /// Enhanced due diligence completed
    Enhanced = 3,
    /// Highest tier
    Full = 4,
}

impl ComplianceLevel {
    /// The highest valid tier
    pub const MAX: Self = ComplianceLevel::Full;

    /// Get the numeric tier value
    #[inline]
    pub const fn as_u8(&self) -> u8 {
        *self as u8
    }
}

impl PartialOrd for ComplianceLevel {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for ComplianceLevel {
    fn cmp(&self, other: &Self) -> Ordering {
        (*self as u8).cmp(&(*other as u8))
    }
}

impl TryFrom<u8> for ComplianceLevel {
    type Error = ComplianceError;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        match value {
            0 => Ok(ComplianceLevel::Unverified),
            1 => Ok(ComplianceLevel::Basic),
            2 => Ok(ComplianceLevel::Standard),
            3 => Ok(ComplianceLevel::Enhanced),
            4 => Ok(ComplianceLevel::Full),
            other => Err(ComplianceError::InvalidComplianceLevel(other)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_level_ordering() {
        assert!(ComplianceLevel::Unverified < ComplianceLevel::Basic);
        assert!(ComplianceLevel::Basic < ComplianceLevel::Standard);
        assert!(ComplianceLevel::Standard < ComplianceLevel::Enhanced);
        assert!(ComplianceLevel::Enhanced < ComplianceLevel::Full);
    }

    #[test]
    fn test_every_tier_in_range_is_valid() {
        for raw in 0..=4u8 {
            let level = ComplianceLevel::try_from(raw).unwrap();
            assert_eq!(level.as_u8(), raw);
        }
    }

    #[test]
    fn test_out_of_range_rejected() {
        for raw in [5u8, 10, 255] {
            assert!(matches!(
                ComplianceLevel::try_from(raw),
                Err(ComplianceError::InvalidComplianceLevel(v)) if v == raw
            ));
        }
    }

    #[test]
    fn test_string_forms() {
        assert_eq!(ComplianceLevel::Enhanced.to_string(), "enhanced");
        let parsed: ComplianceLevel = "basic".parse().unwrap();
        assert_eq!(parsed, ComplianceLevel::Basic);
    }

    #[test]
    fn test_serde_roundtrip() {
        let json = serde_json::to_string(&ComplianceLevel::Full).unwrap();
        assert_eq!(json, "\"full\"");
        let parsed: ComplianceLevel = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, ComplianceLevel::Full);
    }
}

//! System-wide bounds with configurable values
//!
//! All bounds can be overridden via config file, not hardcoded at call
//! sites. Defaults are conservative.

use serde::{Deserialize, Serialize};

/// Bounds applied across the stores.
///
/// Windows are measured in logical-clock ticks. The default window of
/// 52,560 ticks corresponds to roughly one year on a host that advances
/// the clock every ten minutes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Limits {
    /// Longest allowed policy, verification, or approval window
    #[serde(default = "default_max_window")]
    pub max_window: u64,

    /// Verification window granted to newly registered identities
    #[serde(default = "default_verification_window")]
    pub default_verification_window: u64,

    /// Largest violation ceiling a policy may specify
    #[serde(default = "default_max_violation_count")]
    pub max_violation_count: u32,

    /// Longest accepted policy name
    #[serde(default = "default_max_policy_name_len")]
    pub max_policy_name_len: usize,
}

// Default value functions for serde
fn default_max_window() -> u64 {
    52_560
}

fn default_verification_window() -> u64 {
    52_560
}

fn default_max_violation_count() -> u32 {
    10
}

fn default_max_policy_name_len() -> usize {
    64
}

impl Default for Limits {
    fn default() -> Self {
        Self {
            max_window: default_max_window(),
            default_verification_window: default_verification_window(),
            max_violation_count: default_max_violation_count(),
            max_policy_name_len: default_max_policy_name_len(),
        }
    }
}

impl Limits {
    /// Load limits from a JSON file
    pub fn from_file(path: &std::path::Path) -> Result<Self, std::io::Error> {
        let content = std::fs::read_to_string(path)?;
        serde_json::from_str(&content)
            .map_err(|e| std::io::Error::new(std::io::ErrorKind::InvalidData, e))
    }
}

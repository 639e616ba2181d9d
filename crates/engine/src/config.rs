//! Deployment configuration

use serde::{Deserialize, Serialize};

use gatekeeper_core::{Identity, Limits};

/// Configuration fixed at deployment.
///
/// The administrator is the one identity `is_administrator` recognizes;
/// everything else is bounds, all overridable via config file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GateConfig {
    /// The deployment administrator
    pub administrator: Identity,

    /// System-wide bounds
    #[serde(default)]
    pub limits: Limits,
}

impl GateConfig {
    /// Create a configuration with default limits
    pub fn new(administrator: Identity) -> Self {
        Self {
            administrator,
            limits: Limits::default(),
        }
    }

    /// Load configuration from a JSON file
    pub fn from_file(path: &std::path::Path) -> Result<Self, std::io::Error> {
        let content = std::fs::read_to_string(path)?;
        serde_json::from_str(&content)
            .map_err(|e| std::io::Error::new(std::io::ErrorKind::InvalidData, e))
    }
}

//! Application context - the gate plus its on-disk snapshot

use std::path::{Path, PathBuf};

use gatekeeper_engine::{ComplianceGate, GateConfig};

/// Wires the compliance gate to a JSON snapshot on disk.
///
/// The snapshot is the whole serialized gate. An existing snapshot wins
/// over the passed configuration; a missing one seeds a fresh gate from it.
pub struct GateContext {
    gate: ComplianceGate,
    state_path: PathBuf,
}

impl GateContext {
    /// Open the context at `data_dir`, loading the snapshot if present
    pub fn open(data_dir: impl AsRef<Path>, config: GateConfig) -> Result<Self, anyhow::Error> {
        let data_dir = data_dir.as_ref();
        std::fs::create_dir_all(data_dir)?;
        let state_path = data_dir.join("gate.json");

        let gate = if state_path.exists() {
            let content = std::fs::read_to_string(&state_path)?;
            serde_json::from_str(&content)?
        } else {
            ComplianceGate::new(config)
        };

        Ok(Self { gate, state_path })
    }

    /// The wired gate
    pub fn gate(&self) -> &ComplianceGate {
        &self.gate
    }

    /// The wired gate, mutably
    pub fn gate_mut(&mut self) -> &mut ComplianceGate {
        &mut self.gate
    }

    /// Where the snapshot lives
    pub fn state_path(&self) -> &Path {
        &self.state_path
    }

    /// Write the snapshot
    pub fn save(&self) -> Result<(), anyhow::Error> {
        let json = serde_json::to_string_pretty(&self.gate)?;
        std::fs::write(&self.state_path, json)?;
        Ok(())
    }
}

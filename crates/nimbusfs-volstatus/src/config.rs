use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

/// Cache-manager settings for the volume-status subsystem.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct VolStatusConfig {
    /// Path of the external volume-status handler module. Absent or empty
    /// means the client runs without one — the common case.
    #[serde(default)]
    pub handler_path: Option<PathBuf>,
}

pub fn read_config(path: &Path) -> Result<VolStatusConfig> {
    let text = std::fs::read_to_string(path).with_context(|| format!("read {}", path.display()))?;
    serde_json::from_str::<VolStatusConfig>(&text)
        .with_context(|| format!("parse {}", path.display()))
}

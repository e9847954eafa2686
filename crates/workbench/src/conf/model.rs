//! Model — WorkbenchConfig and related structs.

use engine::{CodegenConfig, ScanConfig};
use serde::{Deserialize, Serialize};

/// Default input cap: 10 MiB.
pub const DEFAULT_MAX_INPUT_BYTES: usize = 10 * 1024 * 1024;

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct WorkbenchConfig {
    pub scan: ScanConfig,
    pub codegen: CodegenConfig,
    pub history: HistoryConfig,
    /// Inputs larger than this are rejected before scanning
    pub max_input_bytes: usize,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct HistoryConfig {
    pub path: String,
    /// Most-recent-N retention
    pub max_entries: usize,
    /// Upper bound on the serialized history document
    pub max_bytes: usize,
}

impl Default for WorkbenchConfig {
    fn default() -> Self {
        Self {
            scan: ScanConfig::default(),
            codegen: CodegenConfig::default(),
            history: HistoryConfig::default(),
            max_input_bytes: DEFAULT_MAX_INPUT_BYTES,
        }
    }
}

impl Default for HistoryConfig {
    fn default() -> Self {
        Self {
            path: "workbench-history.json".to_string(),
            max_entries: 50,
            max_bytes: 5 * 1024 * 1024,
        }
    }
}

impl HistoryConfig {
    pub fn validate(&self) -> Result<(), String> {
        if self.path.is_empty() {
            return Err("history.path must not be empty".to_string());
        }
        if self.max_entries == 0 {
            return Err("history.max_entries must be > 0".to_string());
        }
        if self.max_bytes == 0 {
            return Err("history.max_bytes must be > 0".to_string());
        }
        Ok(())
    }
}

impl WorkbenchConfig {
    pub fn validate(&self) -> Result<(), String> {
        if self.max_input_bytes == 0 {
            return Err("max_input_bytes must be > 0".to_string());
        }
        self.scan.validate()?;
        self.codegen.validate()?;
        self.history.validate()?;
        Ok(())
    }
}

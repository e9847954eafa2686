//! Load — config loading from file and environment variables.

use std::fs;
use std::path::Path;

use super::model::WorkbenchConfig;

pub type LoadError = Box<dyn std::error::Error + Send + Sync>;

pub const CONFIG_FILE_VAR: &str = "WORKBENCH_CONFIG_FILE";
pub const DEFAULT_CONFIG_FILE: &str = "workbench.toml";

impl WorkbenchConfig {
    /// Load configuration from file, then apply environment overrides.
    /// Priority: Environment Variables > Config File > Defaults
    pub fn load() -> Result<Self, LoadError> {
        let config_path =
            std::env::var(CONFIG_FILE_VAR).unwrap_or_else(|_| DEFAULT_CONFIG_FILE.to_string());
        Self::load_from(&config_path)
    }

    pub fn load_from(config_path: &str) -> Result<Self, LoadError> {
        let mut config = if Path::new(config_path).exists() {
            tracing::info!("Loading configuration from: {}", config_path);
            Self::from_file(config_path)?
        } else {
            tracing::debug!("Config file not found at {}, using defaults", config_path);
            Self::default()
        };

        config.apply_env_overrides()?;
        Ok(config)
    }

    /// Load configuration from a TOML file
    pub fn from_file(path: &str) -> Result<Self, LoadError> {
        let contents = fs::read_to_string(path)?;
        let config: WorkbenchConfig = toml::from_str(&contents)?;
        Ok(config)
    }

    fn apply_env_overrides(&mut self) -> Result<(), LoadError> {
        if let Ok(path) = std::env::var("WORKBENCH_HISTORY_PATH") {
            self.history.path = path;
        }
        if let Ok(raw) = std::env::var("WORKBENCH_MAX_INPUT_BYTES") {
            self.max_input_bytes = raw
                .parse()
                .map_err(|e| format!("WORKBENCH_MAX_INPUT_BYTES={:?}: {}", raw, e))?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_from_file_reads_toml() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(
            file,
            r#"
            max_input_bytes = 2048

            [codegen]
            client_ident = "http"

            [history]
            path = "/tmp/h.json"
            "#
        )
        .unwrap();

        let cfg = WorkbenchConfig::from_file(file.path().to_str().unwrap()).unwrap();
        assert_eq!(cfg.max_input_bytes, 2048);
        assert_eq!(cfg.codegen.client_ident, "http");
        assert_eq!(cfg.codegen.request_method, "request");
        assert_eq!(cfg.history.path, "/tmp/h.json");
        assert_eq!(cfg.history.max_entries, 50);
    }

    #[test]
    fn test_from_file_rejects_bad_toml() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "max_input_bytes = \"lots\"").unwrap();
        assert!(WorkbenchConfig::from_file(file.path().to_str().unwrap()).is_err());
    }

    #[test]
    fn test_missing_file_is_an_error_for_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("absent.toml");
        assert!(WorkbenchConfig::from_file(path.to_str().unwrap()).is_err());
    }
}

//! Model — ScanConfig and CodegenConfig.

use serde::{Deserialize, Serialize};

use crate::filter::{FilterError, JunkClassifier, Patterns};

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ScanConfig {
    /// Start from the stock noise table.
    pub use_default_patterns: bool,
    /// Appended after the stock table, in order.
    pub extra_patterns: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct CodegenConfig {
    /// Client object the generated functions call through
    pub client_ident: String,
    /// Module the client object is imported from
    pub client_import: String,
    /// Method invoked on the client object
    pub request_method: String,
}

impl Default for ScanConfig {
    fn default() -> Self {
        Self {
            use_default_patterns: true,
            extra_patterns: Vec::new(),
        }
    }
}

impl Default for CodegenConfig {
    fn default() -> Self {
        Self {
            client_ident: "apiClient".to_string(),
            client_import: "@/api/client".to_string(),
            request_method: "request".to_string(),
        }
    }
}

impl ScanConfig {
    pub fn build_classifier(&self) -> Result<JunkClassifier, FilterError> {
        let mut classifier = if self.use_default_patterns {
            JunkClassifier::from_patterns(&Patterns::all())?
        } else {
            JunkClassifier::empty()
        };
        classifier.extend(&self.extra_patterns)?;
        Ok(classifier)
    }

    /// Compile every pattern once so a bad entry is reported at startup.
    pub fn validate(&self) -> Result<(), String> {
        self.build_classifier().map(|_| ()).map_err(|e| format!("scan.extra_patterns: {}", e))
    }
}

impl CodegenConfig {
    pub fn validate(&self) -> Result<(), String> {
        for (key, value) in [
            ("codegen.client_ident", &self.client_ident),
            ("codegen.request_method", &self.request_method),
        ] {
            if !crate::codegen::typescript::is_identifier(value) {
                return Err(format!("{} must be a valid identifier, got {:?}", key, value));
            }
        }
        if self.client_import.is_empty() {
            return Err("codegen.client_import must not be empty".to_string());
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // ── Defaults ─────────────────────────────────────────────────

    #[test]
    fn test_scan_config_defaults() {
        let cfg = ScanConfig::default();
        assert!(cfg.use_default_patterns);
        assert!(cfg.extra_patterns.is_empty());
        assert!(cfg.validate().is_ok());
    }

    #[test]
    fn test_codegen_config_defaults() {
        let cfg = CodegenConfig::default();
        assert_eq!(cfg.client_ident, "apiClient");
        assert_eq!(cfg.client_import, "@/api/client");
        assert_eq!(cfg.request_method, "request");
        assert!(cfg.validate().is_ok());
    }

    // ── Classifier assembly ──────────────────────────────────────

    #[test]
    fn test_extra_patterns_appended_after_defaults() {
        let cfg = ScanConfig {
            use_default_patterns: true,
            extra_patterns: vec![r"^heartbeat".to_string()],
        };
        let classifier = cfg.build_classifier().unwrap();
        assert_eq!(classifier.patterns().len(), Patterns::all().len() + 1);
        assert!(classifier.is_junk("heartbeat ok"));
        assert!(classifier.is_junk("viewDidLoad"));
    }

    #[test]
    fn test_defaults_can_be_disabled() {
        let cfg = ScanConfig {
            use_default_patterns: false,
            extra_patterns: vec![r"^heartbeat".to_string()],
        };
        let classifier = cfg.build_classifier().unwrap();
        assert_eq!(classifier.patterns().len(), 1);
        assert!(!classifier.is_junk("viewDidLoad"));
    }

    // ── Validation ───────────────────────────────────────────────

    #[test]
    fn test_invalid_extra_pattern_rejected() {
        let cfg = ScanConfig {
            extra_patterns: vec!["(unclosed".to_string()],
            ..Default::default()
        };
        let err = cfg.validate().unwrap_err();
        assert!(err.contains("scan.extra_patterns"), "Error should name the key: {}", err);
    }

    #[test]
    fn test_codegen_rejects_bad_identifier() {
        let cfg = CodegenConfig {
            client_ident: "api-client".to_string(),
            ..Default::default()
        };
        let err = cfg.validate().unwrap_err();
        assert!(err.contains("client_ident"), "Error should name the key: {}", err);
    }

    // ── Serialization ────────────────────────────────────────────

    #[test]
    fn test_partial_toml() {
        let cfg: ScanConfig = toml::from_str(r#"extra_patterns = ["^ping"]"#).expect("Should accept partial TOML");
        assert!(cfg.use_default_patterns);
        assert_eq!(cfg.extra_patterns, vec!["^ping"]);

        let cg: CodegenConfig = toml::from_str(r#"client_ident = "http""#).unwrap();
        assert_eq!(cg.client_ident, "http");
        assert_eq!(cg.request_method, "request");
    }
}

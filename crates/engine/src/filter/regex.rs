//! Regex — the stock noise table for console logs of mobile/desktop clients.
//!
//! Grouped by the kind of noise it removes. Every group is plain data; the
//! classifier in [`super::engine`] is built from whatever list the caller
//! assembles, so these can be replaced or extended from configuration.

use crate::filter::engine::{FilterError, JunkClassifier};

/// Well-known noise pattern groups.
pub struct Patterns;

impl Patterns {
    /// UI framework lifecycle and data-source callbacks.
    pub const LIFECYCLE: &'static [&'static str] = &[
        r"viewDidLoad",
        r"viewWillAppear",
        r"viewDidAppear",
        r"viewWillDisappear",
        r"viewDidDisappear",
        r"deinit",
        r"collectionView\(_:",
        r"didSelectItemAt",
        r"numberOfItemsInSection",
        r"cellForItemAt",
        r"sizeForItemAt",
        r"BaseViewController",
    ];

    /// Networking stack and build/tooling diagnostics.
    pub const DIAGNOSTICS: &'static [&'static str] = &[
        r"nw_socket_set_connection_idle",
        r"^nw_protocol_get_quic_image",
        r"^Connection \d+:",
        r"^TIC ",
        r"^Task <[^>]+>",
        r"^\[BoringSSL\]",
        r"^Metal API Validation",
        r"^GPU Frame Capture",
    ];

    /// Bare values and keyboard-mash test tokens printed on their own.
    pub const PLACEHOLDERS: &'static [&'static str] = &[
        r"^\s*Optional\(",
        r"^\s*nil$",
        r"^\s*\d+(\.\d+)?$",
        r"(?i)^\s*true$",
        r"(?i)^\s*false$",
        r"(?i)^qwerty",
        r"(?i)^zzzz",
        r"(?i)^asdf",
        r"^1234567890$",
        r"(?i)^test\d*$",
        r"^\s*\[\s*\]$",
        r"^\s*\{\s*\}$",
    ];

    /// Leftover debug printing.
    pub const DEBUG_PRINTS: &'static [&'static str] = &[
        r"^\s*print\(",
        r"^\s*debugPrint\(",
        r"NSLog",
    ];

    /// Decorative separator lines.
    pub const SEPARATORS: &'static [&'static str] = &[r"^\s*-+\s*$", r"^\s*=+\s*$"];

    /// Timestamped framework banners and routine app-state chatter.
    pub const BANNERS: &'static [&'static str] = &[
        r"^MAPS\[\d+:\d+\]",
        r"^\d{4}-\d{2}-\d{2}\s+\d{2}:\d{2}:\d{2}\.\d+[+-]\d+\s+MAPS\[",
        r"FirestoreManager",
        r"Badge\s*>\s*setBadgeInAppIcon",
        r#"^"Access token::"#,
        r"(?i)^user logged in",
        r"(?i)^user logged out",
        r"(?i)refreshData",
        r"(?i)^token refreshed",
        r"(?i)^auth state changed",
        r"(?i)^navigation to",
    ];

    /// All groups, in table order.
    pub fn all() -> Vec<&'static str> {
        [
            Self::LIFECYCLE,
            Self::DIAGNOSTICS,
            Self::PLACEHOLDERS,
            Self::DEBUG_PRINTS,
            Self::SEPARATORS,
            Self::BANNERS,
        ]
        .concat()
    }
}

impl JunkClassifier {
    /// Classifier loaded with the full stock table.
    pub fn with_defaults() -> Result<Self, FilterError> {
        Self::from_patterns(&Patterns::all())
    }
}

// ── Tests ───────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    fn defaults() -> JunkClassifier {
        JunkClassifier::with_defaults().expect("stock table must compile")
    }

    #[test]
    fn test_all_groups_compile() {
        let c = defaults();
        assert_eq!(c.patterns().len(), Patterns::all().len());
    }

    #[test]
    fn test_lifecycle_noise() {
        let c = defaults();
        assert!(c.is_junk("HomeViewController viewDidLoad"));
        assert!(c.is_junk("collectionView(_:cellForItemAt:) called"));
    }

    #[test]
    fn test_diagnostic_noise() {
        let c = defaults();
        assert!(c.is_junk("Connection 12: received failure notification"));
        assert!(c.is_junk("Task <AB-12>.<1> finished with error"));
        assert!(c.is_junk("[BoringSSL] nw_protocol_boringssl_get_output_frames"));
    }

    #[test]
    fn test_placeholder_noise() {
        let c = defaults();
        assert!(c.is_junk("Optional(\"abc\")"));
        assert!(c.is_junk("3.1415"));
        assert!(c.is_junk("TRUE"));
        assert!(c.is_junk("test42"));
        assert!(c.is_junk("[ ]"));
        assert!(!c.is_junk("testing the checkout flow"));
    }

    #[test]
    fn test_separator_and_banner_noise() {
        let c = defaults();
        assert!(c.is_junk("----------"));
        assert!(c.is_junk("=========="));
        assert!(c.is_junk("2026-02-05 10:00:00.123456+0000 MAPS[123:4567] launched"));
        assert!(c.is_junk("Navigation to settings"));
    }

    #[test]
    fn test_signal_survives() {
        let c = defaults();
        assert!(!c.is_junk("Checkout failed: card declined"));
        assert!(!c.is_junk("{\"id\": 1}"));
    }
}

use grep_matcher::Matcher;
use grep_regex::{RegexMatcher, RegexMatcherBuilder};
use thiserror::Error;

/// Lines shorter than this (after trimming) are always noise.
///
/// Measured in `char`s on purpose, so `"🔥🔥"` (two chars, four UTF-16
/// units) is noise.
pub const MIN_SIGNAL_LEN: usize = 3;

#[derive(Error, Debug)]
pub enum FilterError {
    #[error("Invalid regex pattern `{pattern}`: {reason}")]
    InvalidRegex { pattern: String, reason: String },
}

/// One compiled entry of the noise table.
pub struct NoisePattern {
    source: String,
    matcher: RegexMatcher,
}

impl NoisePattern {
    pub fn new(pattern: &str) -> Result<Self, FilterError> {
        let matcher = RegexMatcherBuilder::new()
            .multi_line(false)
            .build(pattern)
            .map_err(|e| FilterError::InvalidRegex {
                pattern: pattern.to_string(),
                reason: e.to_string(),
            })?;

        Ok(Self {
            source: pattern.to_string(),
            matcher,
        })
    }

    pub fn as_str(&self) -> &str {
        &self.source
    }

    #[inline]
    fn is_match(&self, text: &[u8]) -> bool {
        self.matcher.is_match(text).unwrap_or(false)
    }
}

impl std::fmt::Debug for NoisePattern {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_tuple("NoisePattern").field(&self.source).finish()
    }
}

/// Decides whether a log line is noise.
///
/// The classifier owns no policy of its own beyond the length rule: the
/// noise table is an ordered list supplied by the caller (see
/// [`super::regex`] for the stock table).
#[derive(Debug, Default)]
pub struct JunkClassifier {
    patterns: Vec<NoisePattern>,
}

impl JunkClassifier {
    /// Classifier with no noise table: only blank and very short lines are junk.
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn from_patterns<S: AsRef<str>>(patterns: &[S]) -> Result<Self, FilterError> {
        let mut classifier = Self::empty();
        classifier.extend(patterns)?;
        Ok(classifier)
    }

    /// Append patterns after the existing ones.
    pub fn extend<S: AsRef<str>>(&mut self, patterns: &[S]) -> Result<(), FilterError> {
        for p in patterns {
            self.patterns.push(NoisePattern::new(p.as_ref())?);
        }
        Ok(())
    }

    pub fn patterns(&self) -> &[NoisePattern] {
        &self.patterns
    }

    #[inline]
    pub fn is_junk(&self, line: &str) -> bool {
        let trimmed = line.trim();
        if trimmed.chars().count() < MIN_SIGNAL_LEN {
            return true;
        }
        self.matched_pattern(trimmed).is_some()
    }

    /// Index of the first noise pattern matching the trimmed line.
    pub fn matched_pattern(&self, line: &str) -> Option<usize> {
        let trimmed = line.trim().as_bytes();
        self.patterns.iter().position(|p| p.is_match(trimmed))
    }
}

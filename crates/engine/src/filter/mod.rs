//! Filter module — noise classification for console log lines.

pub mod engine;
pub mod regex;

pub use engine::{FilterError, JunkClassifier, NoisePattern};
pub use regex::Patterns;

//! Logs module — scanning, capture capabilities, and endpoint grouping.

pub mod capture;
pub mod group;
pub mod scan;

pub use capture::{Clock, FixedClock, IdSource, SequentialIds, SystemClock, UuidIds};
pub use group::aggregate;
pub use scan::{LogParsingEngine, ScanOutput};

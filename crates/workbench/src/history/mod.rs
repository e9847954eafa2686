//! History module — saved analyses.

pub mod error;
pub mod memory;
pub mod model;
pub mod store;

pub use error::{StoreError, StoreResult};
pub use memory::MemoryStore;
pub use model::{AnalysisSnapshot, AnalysisSummary, HistoryDocument};
pub use store::{AnalysisStore, FileStore};

pub mod load;
pub mod model;

pub use model::{HistoryConfig, WorkbenchConfig};

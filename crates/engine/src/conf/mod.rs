//! Conf module — scan and code generation settings.

pub mod model;

pub use model::{CodegenConfig, ScanConfig};

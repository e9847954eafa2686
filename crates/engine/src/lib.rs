// Module structure for the log analysis engine.
//
// raw text → logs::scan (parser + filter) → logs::group → codegen

// Core infrastructure
pub mod conf;
pub mod filter;
pub mod parser;

// Pipeline stages
pub mod codegen;
pub mod logs;

pub use conf::{CodegenConfig, ScanConfig};
pub use filter::{FilterError, JunkClassifier};
pub use logs::{aggregate, Clock, FixedClock, IdSource, LogParsingEngine, ScanOutput, SequentialIds, SystemClock, UuidIds};
pub use parser::{Analysis, AnalysisResult, AnalysisStats, ApiCall, EndpointGroup, HttpMethod};

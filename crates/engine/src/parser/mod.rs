/// Line-level parsing for captured API traffic.
///
/// - `model.rs`: records produced by the pipeline (calls, groups, stats)
/// - `marker.rs`: request/response/body marker recognition and URL → endpoint

pub mod marker;
pub mod model;

pub use marker::{extract_endpoint, BodyLine, Direction, RequestLine, ResponseLine};
pub use model::{Analysis, AnalysisResult, AnalysisStats, ApiCall, EndpointGroup, HttpMethod};

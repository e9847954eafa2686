use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum HttpMethod {
    Get,
    Post,
    Put,
    Delete,
    Patch,
}

impl HttpMethod {
    /// Every verb the request marker accepts, in marker-grammar order.
    pub const ALL: [HttpMethod; 5] = [
        HttpMethod::Get,
        HttpMethod::Post,
        HttpMethod::Put,
        HttpMethod::Delete,
        HttpMethod::Patch,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            HttpMethod::Get => "GET",
            HttpMethod::Post => "POST",
            HttpMethod::Put => "PUT",
            HttpMethod::Delete => "DELETE",
            HttpMethod::Patch => "PATCH",
        }
    }

    /// Methods whose shell command carries a request body.
    pub fn is_mutating(&self) -> bool {
        matches!(self, HttpMethod::Post | HttpMethod::Put | HttpMethod::Patch)
    }
}

impl fmt::Display for HttpMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for HttpMethod {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        HttpMethod::ALL
            .iter()
            .copied()
            .find(|m| m.as_str() == s)
            .ok_or_else(|| format!("unsupported HTTP method: {}", s))
    }
}

/// One recognized request, with whatever body/response lines were
/// associated with it before the next request started.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiCall {
    pub id: String,
    pub method: HttpMethod,
    /// Full request URL as captured from the log line
    pub url: String,
    /// Path component of `url`, the grouping key together with `method`
    pub endpoint: String,
    pub request_body: Option<Value>,
    pub response_body: Option<Value>,
    pub status_code: Option<u16>,
    /// Capture time (when the line was scanned), not a time read from the log
    pub timestamp: DateTime<Utc>,
}

/// All calls sharing one `(method, endpoint)` key.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EndpointGroup {
    pub endpoint: String,
    pub method: HttpMethod,
    pub calls: Vec<ApiCall>,
    /// First request body seen among `calls`, in arrival order
    pub sample_request: Option<Value>,
    /// First response body seen among `calls`, in arrival order
    pub sample_response: Option<Value>,
}

impl EndpointGroup {
    pub fn call_count(&self) -> usize {
        self.calls.len()
    }

    /// URL of the first call, used when rendering a replayable command.
    pub fn first_url(&self) -> Option<&str> {
        self.calls.first().map(|c| c.url.as_str())
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalysisStats {
    pub total_lines: usize,
    pub api_requests: usize,
    pub unique_endpoints: usize,
    pub junk_filtered: usize,
}

/// Output of one full scan + aggregation pass.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Analysis {
    pub stats: AnalysisStats,
    pub endpoints: Vec<EndpointGroup>,
    pub timeline: Vec<ApiCall>,
}

/// A named analysis, ready to hand to a UI or a store.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalysisResult {
    pub id: String,
    pub name: String,
    pub created_at: DateTime<Utc>,
    pub stats: AnalysisStats,
    pub endpoints: Vec<EndpointGroup>,
    pub timeline: Vec<ApiCall>,
    /// Original input. Never persisted.
    #[serde(skip)]
    pub raw_logs: Option<String>,
}

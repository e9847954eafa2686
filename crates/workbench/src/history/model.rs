//! Persisted shapes for saved analyses.

use chrono::{DateTime, Utc};
use engine::{AnalysisResult, AnalysisStats, ApiCall, EndpointGroup};
use serde::{Deserialize, Serialize};

pub const DOCUMENT_VERSION: u32 = 1;

/// A saved analysis. Raw log text is never part of it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalysisSnapshot {
    pub id: String,
    pub name: String,
    pub created_at: DateTime<Utc>,
    pub stats: AnalysisStats,
    pub endpoints: Vec<EndpointGroup>,
    pub timeline: Vec<ApiCall>,
}

/// Listing row.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalysisSummary {
    pub id: String,
    pub name: String,
    pub created_at: DateTime<Utc>,
    pub stats: AnalysisStats,
}

/// On-disk layout: every saved analysis, newest first.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HistoryDocument {
    pub version: u32,
    pub analyses: Vec<AnalysisSnapshot>,
}

impl Default for HistoryDocument {
    fn default() -> Self {
        Self {
            version: DOCUMENT_VERSION,
            analyses: Vec::new(),
        }
    }
}

impl From<&AnalysisResult> for AnalysisSnapshot {
    fn from(result: &AnalysisResult) -> Self {
        Self {
            id: result.id.clone(),
            name: result.name.clone(),
            created_at: result.created_at,
            stats: result.stats,
            endpoints: result.endpoints.clone(),
            timeline: result.timeline.clone(),
        }
    }
}

impl From<AnalysisSnapshot> for AnalysisResult {
    fn from(snapshot: AnalysisSnapshot) -> Self {
        Self {
            id: snapshot.id,
            name: snapshot.name,
            created_at: snapshot.created_at,
            stats: snapshot.stats,
            endpoints: snapshot.endpoints,
            timeline: snapshot.timeline,
            raw_logs: None,
        }
    }
}

impl AnalysisSnapshot {
    pub fn summary(&self) -> AnalysisSummary {
        AnalysisSummary {
            id: self.id.clone(),
            name: self.name.clone(),
            created_at: self.created_at,
            stats: self.stats,
        }
    }
}

//! Plain-text rendering for terminal output.

use std::fmt::Write;

use engine::{AnalysisResult, AnalysisStats, EndpointGroup};

use crate::history::AnalysisSummary;

pub fn render_stats(stats: &AnalysisStats) -> String {
    format!(
        "Lines scanned:     {}\n\
         API requests:      {}\n\
         Unique endpoints:  {}\n\
         Junk filtered:     {}\n",
        stats.total_lines, stats.api_requests, stats.unique_endpoints, stats.junk_filtered
    )
}

/// One row per group, in group order.
pub fn render_endpoints(groups: &[EndpointGroup]) -> String {
    let mut out = String::new();
    for group in groups {
        let _ = writeln!(
            out,
            "  {:<7}{}  ({} {})",
            group.method.as_str(),
            group.endpoint,
            group.call_count(),
            if group.call_count() == 1 { "call" } else { "calls" },
        );
    }
    out
}

pub fn render_analysis(result: &AnalysisResult) -> String {
    let mut out = format!(
        "Analysis {} ({})\nCreated: {}\n\n",
        result.name,
        result.id,
        result.created_at.to_rfc3339()
    );
    out.push_str(&render_stats(&result.stats));
    if !result.endpoints.is_empty() {
        out.push_str("\nEndpoints:\n");
        out.push_str(&render_endpoints(&result.endpoints));
    }
    out
}

pub fn render_history(rows: &[AnalysisSummary]) -> String {
    if rows.is_empty() {
        return "No saved analyses.\n".to_string();
    }
    let mut out = String::new();
    for row in rows {
        let _ = writeln!(
            out,
            "{}  {}  {}  ({} requests, {} endpoints)",
            row.id,
            row.created_at.format("%Y-%m-%d %H:%M:%S"),
            row.name,
            row.stats.api_requests,
            row.stats.unique_endpoints,
        );
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use engine::{ApiCall, HttpMethod};

    fn group(method: HttpMethod, endpoint: &str, calls: usize) -> EndpointGroup {
        let call = ApiCall {
            id: "1".into(),
            method,
            url: format!("https://x.test{endpoint}"),
            endpoint: endpoint.into(),
            request_body: None,
            response_body: None,
            status_code: None,
            timestamp: "2026-02-05T10:00:00Z".parse().unwrap(),
        };
        EndpointGroup {
            endpoint: endpoint.into(),
            method,
            calls: vec![call; calls],
            sample_request: None,
            sample_response: None,
        }
    }

    #[test]
    fn test_render_endpoints_rows() {
        let out = render_endpoints(&[group(HttpMethod::Get, "/users", 3), group(HttpMethod::Delete, "/users/1", 1)]);
        assert_eq!(out, "  GET    /users  (3 calls)\n  DELETE /users/1  (1 call)\n");
    }

    #[test]
    fn test_render_stats_lists_every_counter() {
        let out = render_stats(&AnalysisStats {
            total_lines: 12,
            api_requests: 4,
            unique_endpoints: 2,
            junk_filtered: 5,
        });
        assert!(out.contains("Lines scanned:     12"));
        assert!(out.contains("Junk filtered:     5"));
    }

    #[test]
    fn test_render_empty_history() {
        assert_eq!(render_history(&[]), "No saved analyses.\n");
    }

    #[test]
    fn test_render_history_row() {
        let row = AnalysisSummary {
            id: "t-1".into(),
            name: "login flow".into(),
            created_at: "2026-02-05T10:00:00Z".parse().unwrap(),
            stats: AnalysisStats {
                api_requests: 2,
                unique_endpoints: 1,
                ..Default::default()
            },
        };
        assert_eq!(
            render_history(&[row]),
            "t-1  2026-02-05 10:00:00  login flow  (2 requests, 1 endpoints)\n"
        );
    }
}

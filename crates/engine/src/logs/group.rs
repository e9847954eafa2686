//! Endpoint grouper.
//!
//! Folds the flat call timeline into one [`EndpointGroup`] per
//! `(method, endpoint)` key:
//! - groups are created in first-encounter order
//! - calls keep their timeline order inside a group
//! - the first request/response body seen becomes the group's sample
//! - output is ordered by call count, busiest first, ties kept in encounter order

use std::collections::HashMap;

use crate::parser::model::{ApiCall, EndpointGroup, HttpMethod};

pub fn aggregate(calls: &[ApiCall]) -> Vec<EndpointGroup> {
    let mut index: HashMap<(HttpMethod, &str), usize> = HashMap::new();
    let mut groups: Vec<EndpointGroup> = Vec::new();

    for call in calls {
        let slot = *index
            .entry((call.method, call.endpoint.as_str()))
            .or_insert_with(|| {
                groups.push(EndpointGroup {
                    endpoint: call.endpoint.clone(),
                    method: call.method,
                    calls: Vec::new(),
                    sample_request: None,
                    sample_response: None,
                });
                groups.len() - 1
            });

        let group = &mut groups[slot];
        if group.sample_request.is_none() {
            group.sample_request = call.request_body.clone();
        }
        if group.sample_response.is_none() {
            group.sample_response = call.response_body.clone();
        }
        group.calls.push(call.clone());
    }

    // `sort_by` is stable: equal counts keep encounter order.
    groups.sort_by(|a, b| b.calls.len().cmp(&a.calls.len()));

    tracing::trace!(calls = calls.len(), groups = groups.len(), "group: aggregated endpoints");
    groups
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn call(id: &str, method: HttpMethod, endpoint: &str) -> ApiCall {
        ApiCall {
            id: id.to_string(),
            method,
            url: format!("https://x.test{endpoint}"),
            endpoint: endpoint.to_string(),
            request_body: None,
            response_body: None,
            status_code: None,
            timestamp: "2026-02-05T10:00:00Z".parse().unwrap(),
        }
    }

    #[test]
    fn test_groups_by_method_and_endpoint_sorted_by_count() {
        let calls = vec![
            call("1", HttpMethod::Get, "/a"),
            call("2", HttpMethod::Get, "/a"),
            call("3", HttpMethod::Post, "/b"),
        ];
        let groups = aggregate(&calls);
        assert_eq!(groups.len(), 2);
        assert_eq!((groups[0].method, groups[0].endpoint.as_str()), (HttpMethod::Get, "/a"));
        assert_eq!(groups[0].call_count(), 2);
        assert_eq!((groups[1].method, groups[1].endpoint.as_str()), (HttpMethod::Post, "/b"));
        assert_eq!(groups[1].call_count(), 1);
    }

    #[test]
    fn test_same_path_different_method_are_distinct() {
        let calls = vec![call("1", HttpMethod::Get, "/a"), call("2", HttpMethod::Delete, "/a")];
        assert_eq!(aggregate(&calls).len(), 2);
    }

    #[test]
    fn test_ties_keep_encounter_order() {
        let calls = vec![
            call("1", HttpMethod::Get, "/c"),
            call("2", HttpMethod::Get, "/b"),
            call("3", HttpMethod::Get, "/a"),
            call("4", HttpMethod::Get, "/a"),
        ];
        let order: Vec<_> = aggregate(&calls).into_iter().map(|g| g.endpoint).collect();
        assert_eq!(order, vec!["/a", "/c", "/b"]);
    }

    #[test]
    fn test_calls_keep_timeline_order() {
        let calls = vec![
            call("1", HttpMethod::Get, "/a"),
            call("2", HttpMethod::Get, "/b"),
            call("3", HttpMethod::Get, "/a"),
        ];
        let groups = aggregate(&calls);
        let ids: Vec<_> = groups[0].calls.iter().map(|c| c.id.as_str()).collect();
        assert_eq!(ids, vec!["1", "3"]);
    }

    #[test]
    fn test_samples_are_first_present_bodies() {
        let mut first = call("1", HttpMethod::Post, "/a");
        first.response_body = Some(json!({"id": 1}));
        let mut second = call("2", HttpMethod::Post, "/a");
        second.request_body = Some(json!({"name": "first"}));
        second.response_body = Some(json!({"id": 2}));
        let mut third = call("3", HttpMethod::Post, "/a");
        third.request_body = Some(json!({"name": "second"}));

        let groups = aggregate(&[first, second, third]);
        assert_eq!(groups[0].sample_request, Some(json!({"name": "first"})));
        assert_eq!(groups[0].sample_response, Some(json!({"id": 1})));
    }

    #[test]
    fn test_no_bodies_no_samples() {
        let groups = aggregate(&[call("1", HttpMethod::Get, "/a")]);
        assert!(groups[0].sample_request.is_none());
        assert!(groups[0].sample_response.is_none());
    }

    #[test]
    fn test_empty_input() {
        assert!(aggregate(&[]).is_empty());
    }
}

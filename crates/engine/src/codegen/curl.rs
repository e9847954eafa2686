//! Replayable `curl` invocations for captured calls.

use serde_json::Value;

use crate::parser::model::{ApiCall, EndpointGroup, HttpMethod};

const LINE_JOIN: &str = " \\\n  ";

/// Make `s` safe inside a single-quoted shell word: each `'` becomes
/// `'\''` (close quote, escaped quote, reopen quote).
pub fn escape_single_quoted(s: &str) -> String {
    s.replace('\'', "'\\''")
}

/// Build the command. `GET` omits `-X`; a body is only sent for
/// `POST`/`PUT`/`PATCH`.
pub fn curl_command(method: HttpMethod, url: &str, request_body: Option<&Value>) -> String {
    let mut parts: Vec<String> = vec!["curl".to_string()];

    if method != HttpMethod::Get {
        parts.push(format!("-X {}", method));
    }

    parts.push("-H 'Content-Type: application/json'".to_string());
    parts.push("-H 'Accept: application/json'".to_string());

    if let Some(body) = request_body.filter(|b| !b.is_null() && method.is_mutating()) {
        // Serializing a `Value` cannot fail.
        let json = serde_json::to_string(body).unwrap_or_default();
        parts.push(format!("-d '{}'", escape_single_quoted(&json)));
    }

    parts.push(format!("'{}'", escape_single_quoted(url)));
    parts.join(LINE_JOIN)
}

pub fn curl_for_call(call: &ApiCall) -> String {
    curl_command(call.method, &call.url, call.request_body.as_ref())
}

/// Command for a group: first captured URL, group's sample request.
pub fn curl_for_group(group: &EndpointGroup) -> String {
    let url = group.first_url().unwrap_or(&group.endpoint);
    curl_command(group.method, url, group.sample_request.as_ref())
}

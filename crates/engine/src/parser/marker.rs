//! Marker-line recognition for captured API traffic.
//!
//! The logging layer being scanned writes three kinds of lines:
//!
//! ```text
//! 📤 [REQUEST] POST https://api.example.com/v1/users
//! 📤 [REQUEST] Body: {"name":"ada"}
//! 📥 [RESPONSE] 201 https://api.example.com/v1/users
//! 📥 [RESPONSE] Body: {"id":7}
//! ```
//!
//! Markers may appear anywhere in the line (framework prefixes are common),
//! with any amount of whitespace between glyph, tag and payload. None of the
//! functions here parse JSON; they only isolate candidate payload text.

use url::Url;

use super::model::HttpMethod;

pub const OUTGOING_GLYPH: &str = "\u{1F4E4}"; // 📤
pub const INCOMING_GLYPH: &str = "\u{1F4E5}"; // 📥
pub const REQUEST_TAG: &str = "[REQUEST]";
pub const RESPONSE_TAG: &str = "[RESPONSE]";
pub const BODY_TAG: &str = "Body:";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RequestLine<'a> {
    pub method: HttpMethod,
    pub url: &'a str,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ResponseLine<'a> {
    pub status_code: u16,
    pub url: &'a str,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Outgoing,
    Incoming,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BodyLine<'a> {
    pub direction: Direction,
    pub payload: &'a str,
}

/// Yield `(offset, tail)` for every place `glyph <ws>* tag` occurs in `line`,
/// where `tail` is the text after the tag with leading whitespace removed.
fn after_marker<'a>(
    line: &'a str,
    glyph: &'a str,
    tag: &'a str,
) -> impl Iterator<Item = (usize, &'a str)> + 'a {
    line.match_indices(glyph).filter_map(move |(pos, _)| {
        let rest = line[pos + glyph.len()..].trim_start();
        rest.strip_prefix(tag).map(|tail| (pos, tail.trim_start()))
    })
}

fn starts_with_whitespace(s: &str) -> bool {
    s.chars().next().is_some_and(char::is_whitespace)
}

/// `📤 [REQUEST] <VERB> <url>`
pub fn parse_request_line(line: &str) -> Option<RequestLine<'_>> {
    for (_, tail) in after_marker(line, OUTGOING_GLYPH, REQUEST_TAG) {
        for method in HttpMethod::ALL {
            let Some(rest) = tail.strip_prefix(method.as_str()) else {
                continue;
            };
            if !starts_with_whitespace(rest) {
                continue;
            }
            let url = rest.trim();
            if !url.is_empty() {
                return Some(RequestLine { method, url });
            }
        }
    }
    None
}

/// `📥 [RESPONSE] <status> <url>`
pub fn parse_response_line(line: &str) -> Option<ResponseLine<'_>> {
    for (_, tail) in after_marker(line, INCOMING_GLYPH, RESPONSE_TAG) {
        let digits = tail.bytes().take_while(u8::is_ascii_digit).count();
        if digits == 0 {
            continue;
        }
        let rest = &tail[digits..];
        if !starts_with_whitespace(rest) {
            continue;
        }
        let Ok(status_code) = tail[..digits].parse::<u16>() else {
            continue;
        };
        let url = rest.trim();
        if !url.is_empty() {
            return Some(ResponseLine { status_code, url });
        }
    }
    None
}

/// `📤 [REQUEST] Body: <payload>` or `📥 [RESPONSE] Body: <payload>`.
///
/// When both forms occur on one line the leftmost wins.
pub fn parse_body_line(line: &str) -> Option<BodyLine<'_>> {
    let find = |glyph, tag, direction| {
        after_marker(line, glyph, tag).find_map(move |(pos, tail)| {
            let payload = tail.strip_prefix(BODY_TAG)?.trim();
            (!payload.is_empty()).then_some((pos, BodyLine { direction, payload }))
        })
    };

    let outgoing = find(OUTGOING_GLYPH, REQUEST_TAG, Direction::Outgoing);
    let incoming = find(INCOMING_GLYPH, RESPONSE_TAG, Direction::Incoming);

    match (outgoing, incoming) {
        (Some(a), Some(b)) => Some(if a.0 <= b.0 { a.1 } else { b.1 }),
        (a, b) => a.or(b).map(|(_, body)| body),
    }
}

/// Loose check used to route a line to request-body handling: all three
/// tokens present, in any position.
pub fn is_request_body_line(line: &str) -> bool {
    line.contains(OUTGOING_GLYPH) && line.contains(REQUEST_TAG) && line.contains(BODY_TAG)
}

pub fn is_response_body_line(line: &str) -> bool {
    line.contains(INCOMING_GLYPH) && line.contains(RESPONSE_TAG) && line.contains(BODY_TAG)
}

/// Lines carrying either glyph are API-related and never count as noise.
pub fn has_marker_glyph(line: &str) -> bool {
    line.contains(OUTGOING_GLYPH) || line.contains(INCOMING_GLYPH)
}

/// Path component of a captured URL.
///
/// Well-formed absolute URLs go through [`Url`]. Anything else falls back to
/// a scan for `http(s)://host/path`, and failing that the input is returned
/// unchanged so the endpoint is never empty for a non-empty URL.
pub fn extract_endpoint(url: &str) -> String {
    if let Ok(parsed) = Url::parse(url) {
        if !parsed.path().is_empty() {
            return parsed.path().to_string();
        }
    }
    scan_http_path(url).unwrap_or(url).to_string()
}

/// Equivalent of `https?://[^/]+(/[^\s?]*)`, leftmost match.
fn scan_http_path(url: &str) -> Option<&str> {
    url.match_indices("http").find_map(|(pos, _)| {
        let rest = &url[pos + 4..];
        let rest = rest.strip_prefix('s').unwrap_or(rest);
        let rest = rest.strip_prefix("://")?;
        let slash = rest.find('/')?;
        if slash == 0 {
            return None;
        }
        let path = &rest[slash..];
        let end = path
            .char_indices()
            .find(|(_, c)| c.is_whitespace() || *c == '?')
            .map(|(i, _)| i)
            .unwrap_or(path.len());
        Some(&path[..end])
    })
}

//! Scan — the line-driven state machine that turns a console log into an
//! ordered list of API calls.
//!
//! Bodies are often wrapped over several lines with no terminator, so a
//! pending body is re-parsed after every appended line and dropped as soon
//! as a line stops looking like JSON. Only one body is buffered at a time.

use std::mem;

use serde_json::Value;
use tracing::{debug, trace};

use crate::filter::{FilterError, JunkClassifier};
use crate::parser::marker::{
    self, has_marker_glyph, is_request_body_line, is_response_body_line, parse_body_line,
    parse_request_line, parse_response_line,
};
use crate::parser::model::{Analysis, AnalysisResult, AnalysisStats, ApiCall, HttpMethod};

use super::capture::{Clock, IdSource, SystemClock, UuidIds};
use super::group::aggregate;

/// Which field a pending body belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum BodyTarget {
    Request,
    Response,
}

#[derive(Debug, Default, PartialEq, Eq)]
enum ParseState {
    #[default]
    Idle,
    AwaitingRequestBody(String),
    AwaitingResponseBody(String),
}

impl ParseState {
    fn awaiting(target: BodyTarget, buffer: String) -> Self {
        match target {
            BodyTarget::Request => ParseState::AwaitingRequestBody(buffer),
            BodyTarget::Response => ParseState::AwaitingResponseBody(buffer),
        }
    }

    /// Leave the state `Idle`, returning whatever body was pending.
    fn take_pending(&mut self) -> Option<(BodyTarget, String)> {
        match mem::take(self) {
            ParseState::Idle => None,
            ParseState::AwaitingRequestBody(buf) => Some((BodyTarget::Request, buf)),
            ParseState::AwaitingResponseBody(buf) => Some((BodyTarget::Response, buf)),
        }
    }
}

/// A call still being filled in by later lines.
#[derive(Debug)]
struct PartialCall {
    id: String,
    method: HttpMethod,
    url: String,
    endpoint: String,
    timestamp: chrono::DateTime<chrono::Utc>,
    request_body: Option<Value>,
    response_body: Option<Value>,
    status_code: Option<u16>,
}

impl PartialCall {
    /// Identity fields must be present before a call is emitted.
    fn is_complete(&self) -> bool {
        !self.id.is_empty() && !self.url.is_empty() && !self.endpoint.is_empty()
    }

    fn set_body(&mut self, target: BodyTarget, value: Value) {
        // A literal `null` body carries nothing worth sampling.
        if value.is_null() {
            return;
        }
        match target {
            BodyTarget::Request => self.request_body = Some(value),
            BodyTarget::Response => self.response_body = Some(value),
        }
    }

    fn into_call(self) -> ApiCall {
        ApiCall {
            id: self.id,
            method: self.method,
            url: self.url,
            endpoint: self.endpoint,
            request_body: self.request_body,
            response_body: self.response_body,
            status_code: self.status_code,
            timestamp: self.timestamp,
        }
    }
}

#[derive(Debug, Default)]
enum CallSlot {
    #[default]
    NoActiveCall,
    Partial(PartialCall),
}

impl CallSlot {
    fn active_mut(&mut self) -> Option<&mut PartialCall> {
        match self {
            CallSlot::NoActiveCall => None,
            CallSlot::Partial(call) => Some(call),
        }
    }

    fn take(&mut self) -> Option<PartialCall> {
        match mem::take(self) {
            CallSlot::NoActiveCall => None,
            CallSlot::Partial(call) => Some(call),
        }
    }
}

fn try_parse_json(text: &str) -> Option<Value> {
    serde_json::from_str(text).ok()
}

/// Wrapped JSON continues with an opening/closing bracket, a string, or
/// a separator.
fn looks_like_json_continuation(line: &str) -> bool {
    line.starts_with(['{', '[', '"', '}', ']', ',', ':'])
}

/// Flat result of one scan, before grouping.
#[derive(Debug, Clone, PartialEq)]
pub struct ScanOutput {
    pub calls: Vec<ApiCall>,
    pub total_lines: usize,
    pub junk_filtered: usize,
}

/// Per-invocation scanner state. Never shared between scans.
struct Scan<'e> {
    engine: &'e LogParsingEngine,
    state: ParseState,
    slot: CallSlot,
    calls: Vec<ApiCall>,
    junk: usize,
}

impl<'e> Scan<'e> {
    fn new(engine: &'e LogParsingEngine) -> Self {
        Self {
            engine,
            state: ParseState::Idle,
            slot: CallSlot::NoActiveCall,
            calls: Vec::new(),
            junk: 0,
        }
    }

    fn emit_current(&mut self) {
        let Some(call) = self.slot.take() else {
            return;
        };
        if call.is_complete() {
            debug!(method = %call.method, endpoint = %call.endpoint, status = ?call.status_code, "scan: emitting call");
            self.calls.push(call.into_call());
        } else {
            debug!(url = %call.url, "scan: dropping incomplete call");
        }
    }

    fn feed(&mut self, line_no: usize, raw: &str) {
        let line = raw.trim();

        if let Some(request) = parse_request_line(line) {
            trace!(line = line_no, method = %request.method, "scan: request start");
            self.emit_current();
            self.slot = CallSlot::Partial(PartialCall {
                id: self.engine.ids.next_id(),
                method: request.method,
                url: request.url.to_string(),
                endpoint: marker::extract_endpoint(request.url),
                timestamp: self.engine.clock.now(),
                request_body: None,
                response_body: None,
                status_code: None,
            });
            self.state = ParseState::Idle;
            return;
        }

        if is_request_body_line(line) {
            self.start_body(line_no, line, BodyTarget::Request);
            return;
        }

        if let Some(response) = parse_response_line(line) {
            trace!(line = line_no, status = response.status_code, "scan: response start");
            if let Some(call) = self.slot.active_mut() {
                call.status_code = Some(response.status_code);
                if let Some((target, buffer)) = self.state.take_pending() {
                    if let Some(value) = try_parse_json(&buffer) {
                        call.set_body(target, value);
                    }
                }
            }
            return;
        }

        if is_response_body_line(line) {
            self.start_body(line_no, line, BodyTarget::Response);
            return;
        }

        if self.state != ParseState::Idle && !line.is_empty() {
            if self.continue_body(line_no, line) {
                return;
            }
        }

        if !has_marker_glyph(line) && self.engine.classifier.is_junk(line) {
            self.junk += 1;
        }
    }

    fn start_body(&mut self, line_no: usize, line: &str, target: BodyTarget) {
        let Some(body) = parse_body_line(line) else {
            return;
        };
        let Some(call) = self.slot.active_mut() else {
            trace!(line = line_no, "scan: body line without an active call");
            return;
        };
        match try_parse_json(body.payload) {
            Some(value) => call.set_body(target, value),
            None => {
                trace!(line = line_no, ?target, "scan: body incomplete, buffering");
                self.state = ParseState::awaiting(target, body.payload.to_string());
            }
        }
    }

    /// Returns `false` when the line ended buffering without being consumed.
    fn continue_body(&mut self, line_no: usize, line: &str) -> bool {
        let Some((target, mut buffer)) = self.state.take_pending() else {
            return false;
        };

        if !looks_like_json_continuation(line) {
            debug!(line = line_no, ?target, buffered = buffer.len(), "scan: abandoning partial body");
            return false;
        }

        buffer.push_str(line);
        match try_parse_json(&buffer) {
            Some(value) => {
                trace!(line = line_no, ?target, "scan: multi-line body complete");
                if let Some(call) = self.slot.active_mut() {
                    call.set_body(target, value);
                }
            }
            None => self.state = ParseState::awaiting(target, buffer),
        }
        true
    }

    fn finish(mut self, total_lines: usize) -> ScanOutput {
        self.emit_current();
        ScanOutput {
            calls: self.calls,
            total_lines,
            junk_filtered: self.junk,
        }
    }
}

/// Turns raw console text into API calls.
///
/// The engine itself is immutable; every `scan` starts from fresh state, so
/// one engine can be reused for any number of inputs.
pub struct LogParsingEngine {
    classifier: JunkClassifier,
    ids: Box<dyn IdSource>,
    clock: Box<dyn Clock>,
}

impl LogParsingEngine {
    pub fn new(classifier: JunkClassifier, ids: Box<dyn IdSource>, clock: Box<dyn Clock>) -> Self {
        Self {
            classifier,
            ids,
            clock,
        }
    }

    /// Stock noise table, random ids, wall-clock timestamps.
    pub fn with_defaults() -> Result<Self, FilterError> {
        Ok(Self::new(
            JunkClassifier::with_defaults()?,
            Box::new(UuidIds),
            Box::new(SystemClock),
        ))
    }

    pub fn classifier(&self) -> &JunkClassifier {
        &self.classifier
    }

    pub fn scan(&self, content: &str) -> ScanOutput {
        let mut scan = Scan::new(self);
        let mut total_lines = 0;
        for (idx, line) in content.split('\n').enumerate() {
            scan.feed(idx + 1, line);
            total_lines += 1;
        }
        scan.finish(total_lines)
    }

    /// Scan and group in one pass.
    pub fn analyze(&self, content: &str) -> Analysis {
        let output = self.scan(content);
        let endpoints = aggregate(&output.calls);
        let stats = AnalysisStats {
            total_lines: output.total_lines,
            api_requests: output.calls.len(),
            unique_endpoints: endpoints.len(),
            junk_filtered: output.junk_filtered,
        };
        debug!(
            lines = stats.total_lines,
            calls = stats.api_requests,
            endpoints = stats.unique_endpoints,
            junk = stats.junk_filtered,
            "scan: analysis complete"
        );
        Analysis {
            stats,
            endpoints,
            timeline: output.calls,
        }
    }

    /// Named analysis with its own identity and creation time.
    pub fn create_analysis(&self, name: &str, content: &str) -> AnalysisResult {
        let analysis = self.analyze(content);
        AnalysisResult {
            id: self.ids.next_id(),
            name: name.to_string(),
            created_at: self.clock.now(),
            stats: analysis.stats,
            endpoints: analysis.endpoints,
            timeline: analysis.timeline,
            raw_logs: Some(content.to_string()),
        }
    }
}

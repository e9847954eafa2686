//! Structural type inference over sampled JSON.
//!
//! Inference looks at one sample only: arrays are typed from their first
//! element, objects from their own keys in document order. Nested objects
//! past [`OBJECT_DEPTH_CUTOFF`] collapse to [`InferredType::UnknownRecord`]
//! to keep generated declarations small.

use serde_json::Value;

/// Objects at this depth or deeper are not expanded.
pub const OBJECT_DEPTH_CUTOFF: usize = 3;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InferredType {
    Null,
    /// No value at all (a missing sample).
    Undefined,
    String,
    Number,
    Boolean,
    Array(Box<InferredType>),
    /// Named fields in document order.
    Object(Vec<(String, InferredType)>),
    /// An object we chose not to expand.
    UnknownRecord,
    Unknown,
}

impl InferredType {
    pub fn of_optional(value: Option<&Value>) -> Self {
        match value {
            Some(v) => infer(v, 0),
            None => InferredType::Undefined,
        }
    }

    pub fn is_object(&self) -> bool {
        matches!(self, InferredType::Object(_))
    }
}

pub fn infer(value: &Value, depth: usize) -> InferredType {
    match value {
        Value::Null => InferredType::Null,
        Value::Array(items) => match items.first() {
            Some(first) => InferredType::Array(Box::new(infer(first, depth + 1))),
            None => InferredType::Array(Box::new(InferredType::Unknown)),
        },
        Value::Object(_) if depth >= OBJECT_DEPTH_CUTOFF => InferredType::UnknownRecord,
        Value::Object(map) if map.is_empty() => InferredType::UnknownRecord,
        Value::Object(map) => InferredType::Object(
            map.iter()
                .map(|(k, v)| (k.clone(), infer(v, depth + 1)))
                .collect(),
        ),
        Value::String(_) => InferredType::String,
        Value::Number(_) => InferredType::Number,
        Value::Bool(_) => InferredType::Boolean,
    }
}

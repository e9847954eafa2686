//! Identifier derivation for generated client code.

use std::collections::{HashMap, HashSet};

use crate::parser::model::HttpMethod;

/// Used when a path yields no usable segment (e.g. `/`, `/api/42`).
pub const FALLBACK_TYPE_NAME: &str = "Unknown";

/// `/api/users/123/profile` → `UsersProfile`.
///
/// Empty, purely numeric and `api` segments are skipped; the rest lose any
/// non-alphanumeric characters and get an upper-cased first letter. A name
/// that would start with a digit (`/2fa`) gets a leading `_`.
pub fn type_name(endpoint: &str) -> String {
    let name = path_words(endpoint);
    if name.is_empty() {
        FALLBACK_TYPE_NAME.to_string()
    } else if name.starts_with(|c: char| c.is_ascii_digit()) {
        format!("_{}", name)
    } else {
        name
    }
}

fn path_words(endpoint: &str) -> String {
    endpoint
        .split('/')
        .filter(|seg| !seg.is_empty())
        .filter(|seg| !seg.bytes().all(|b| b.is_ascii_digit()))
        .filter(|seg| *seg != "api")
        .map(|seg| {
            let cleaned: String = seg.chars().filter(char::is_ascii_alphanumeric).collect();
            capitalize_first(&cleaned)
        })
        .collect()
}

fn capitalize_first(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

pub fn verb_prefix(method: HttpMethod) -> &'static str {
    match method {
        HttpMethod::Get => "fetch",
        HttpMethod::Post => "create",
        HttpMethod::Put => "update",
        HttpMethod::Patch => "patch",
        HttpMethod::Delete => "delete",
    }
}

/// `GET /users` → `fetchUsers`, `GET /2fa` → `fetch2fa`.
pub fn function_name(method: HttpMethod, endpoint: &str) -> String {
    let words = path_words(endpoint);
    let words = if words.is_empty() { FALLBACK_TYPE_NAME } else { words.as_str() };
    format!("{}{}", verb_prefix(method), words)
}

/// Hands out unique names within one generated file.
///
/// The first request for a base name gets it unchanged; later requests get
/// `<base>2`, `<base>3`, ... skipping any candidate already handed out.
#[derive(Debug, Default)]
pub struct NameRegistry {
    seen: HashMap<String, usize>,
    taken: HashSet<String>,
}

impl NameRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn unique(&mut self, base: &str) -> String {
        let count = self.seen.entry(base.to_string()).or_insert(0);
        *count += 1;

        let mut suffix = *count;
        let mut candidate = if suffix == 1 {
            base.to_string()
        } else {
            format!("{}{}", base, suffix)
        };
        while self.taken.contains(&candidate) {
            suffix += 1;
            candidate = format!("{}{}", base, suffix);
        }

        if let Some(count) = self.seen.get_mut(base) {
            *count = suffix;
        }
        self.taken.insert(candidate.clone());
        candidate
    }
}

//! Locates and decodes the JSON payload embedded in a generation reply.
//!
//! Models often wrap their JSON in prose or code fences, so rather than
//! stripping known wrappers we scan for the first balanced `{...}` or `[...]`
//! and decode only that substring.

use serde_json::Value;
use thiserror::Error;

/// A decoded JSON value taken from a generation reply.
pub type ParsedPayload = Value;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseError {
    #[error("reply contained no JSON payload")]
    NoJsonFound,

    #[error("reply contained a malformed JSON payload: {0}")]
    Malformed(String),
}

impl ParseError {
    pub fn code(&self) -> &'static str {
        match self {
            ParseError::NoJsonFound => "no_json_found",
            ParseError::Malformed(_) => "malformed",
        }
    }
}

pub fn parse(raw: &str) -> Result<ParsedPayload, ParseError> {
    let candidate = find_json_candidate(raw).ok_or(ParseError::NoJsonFound)?;
    serde_json::from_str(candidate).map_err(|e| ParseError::Malformed(e.to_string()))
}

/// Returns the first balanced bracketed substring of `raw`, if any.
///
/// Openers that never balance (or hit a mismatched closer) are skipped and
/// the scan resumes at the next `{` or `[`.
pub fn find_json_candidate(raw: &str) -> Option<&str> {
    let mut start = 0;
    while let Some(offset) = raw[start..].find(|c| c == '{' || c == '[') {
        let open = start + offset;
        if let Some(len) = balanced_len(&raw[open..]) {
            return Some(&raw[open..open + len]);
        }
        start = open + 1;
    }
    None
}

/// Length of the balanced value at the start of `s`. `s` must begin with an
/// opening bracket. Brackets inside JSON strings are ignored.
fn balanced_len(s: &str) -> Option<usize> {
    let mut expected_closers: Vec<u8> = Vec::new();
    let mut in_string = false;
    let mut escaped = false;

    for (i, b) in s.bytes().enumerate() {
        if in_string {
            if escaped {
                escaped = false;
            } else if b == b'\\' {
                escaped = true;
            } else if b == b'"' {
                in_string = false;
            }
            continue;
        }

        match b {
            b'"' => in_string = true,
            b'{' => expected_closers.push(b'}'),
            b'[' => expected_closers.push(b']'),
            b'}' | b']' => {
                if expected_closers.pop() != Some(b) {
                    return None;
                }
                if expected_closers.is_empty() {
                    return Some(i + 1);
                }
            }
            _ => {}
        }
    }
    None
}

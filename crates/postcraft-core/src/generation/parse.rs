//! Pulling JSON out of free-form model replies.
//!
//! Models wrap JSON in prose or code fences often enough that every stage
//! scans for the first balanced array/object and decodes just that. When a
//! stage cannot use the reply it substitutes a deterministic value, and the
//! substitution stays visible through [`ParseOutcome::FellBack`].

use std::fmt;

use serde::de::DeserializeOwned;

/// Why a stage used its fallback value instead of model output.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FallbackReason {
    /// The reply contained no `[` or `{`.
    NoJson,
    /// JSON was found but did not decode into the expected shape.
    InvalidJson(String),
    /// Decoded fine, but with the wrong number of entries.
    CountMismatch { expected: usize, actual: usize },
    /// The provider call exceeded the stage timeout.
    Timeout,
}

impl fmt::Display for FallbackReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FallbackReason::NoJson => write!(f, "no JSON in response"),
            FallbackReason::InvalidJson(msg) => write!(f, "invalid JSON: {}", msg),
            FallbackReason::CountMismatch { expected, actual } => {
                write!(f, "expected {} entries, got {}", expected, actual)
            }
            FallbackReason::Timeout => write!(f, "provider timed out"),
        }
    }
}

/// Model output tagged with whether it is genuine or substituted.
#[derive(Debug, Clone, PartialEq)]
pub enum ParseOutcome<T> {
    Parsed(T),
    FellBack { value: T, reason: FallbackReason },
}

impl<T> ParseOutcome<T> {
    pub fn fallback(value: T, reason: FallbackReason) -> Self {
        ParseOutcome::FellBack { value, reason }
    }

    pub fn value(&self) -> &T {
        match self {
            ParseOutcome::Parsed(value) | ParseOutcome::FellBack { value, .. } => value,
        }
    }

    pub fn into_value(self) -> T {
        match self {
            ParseOutcome::Parsed(value) | ParseOutcome::FellBack { value, .. } => value,
        }
    }

    pub fn is_fallback(&self) -> bool {
        matches!(self, ParseOutcome::FellBack { .. })
    }

    pub fn reason(&self) -> Option<&FallbackReason> {
        match self {
            ParseOutcome::Parsed(_) => None,
            ParseOutcome::FellBack { reason, .. } => Some(reason),
        }
    }
}

impl<T> ParseOutcome<Vec<T>> {
    /// Force exactly `expected` entries: extras are dropped, gaps are filled
    /// from `fill(index)`. Any adjustment marks the outcome as fallen back.
    pub fn fit_to(self, expected: usize, mut fill: impl FnMut(usize) -> T) -> Self {
        match self {
            ParseOutcome::Parsed(mut items) if items.len() != expected => {
                let actual = items.len();
                items.truncate(expected);
                while items.len() < expected {
                    items.push(fill(items.len()));
                }
                ParseOutcome::fallback(items, FallbackReason::CountMismatch { expected, actual })
            }
            other => other,
        }
    }
}

/// Run `parser` over `raw`; on failure substitute `fallback()` and keep the reason.
pub fn parse_or_fallback<T, P, F>(raw: &str, parser: P, fallback: F) -> ParseOutcome<T>
where
    P: FnOnce(&str) -> Result<T, FallbackReason>,
    F: FnOnce() -> T,
{
    match parser(raw) {
        Ok(value) => ParseOutcome::Parsed(value),
        Err(reason) => ParseOutcome::fallback(fallback(), reason),
    }
}

/// Locate the first balanced JSON array or object in `raw`.
///
/// Brackets inside string literals are ignored.
pub fn extract_json(raw: &str) -> Result<&str, FallbackReason> {
    let start = raw.find(['[', '{']).ok_or(FallbackReason::NoJson)?;

    let mut depth = 0usize;
    let mut in_string = false;
    let mut escaped = false;

    for (offset, ch) in raw[start..].char_indices() {
        if escaped {
            escaped = false;
            continue;
        }

        match ch {
            '\\' if in_string => escaped = true,
            '"' => in_string = !in_string,
            '[' | '{' if !in_string => depth += 1,
            ']' | '}' if !in_string => {
                depth -= 1;
                if depth == 0 {
                    let end = start + offset + ch.len_utf8();
                    return Ok(&raw[start..end]);
                }
            }
            _ => {}
        }
    }

    Err(FallbackReason::InvalidJson(
        "unbalanced brackets in response".to_string(),
    ))
}

/// Extract the first JSON value from `raw` and decode it as `T`.
pub fn decode_json<T: DeserializeOwned>(raw: &str) -> Result<T, FallbackReason> {
    let json = extract_json(raw)?;
    serde_json::from_str(json).map_err(|e| FallbackReason::InvalidJson(e.to_string()))
}

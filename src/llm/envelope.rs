// ABOUTME: Layered parser for generateContent response envelopes
// ABOUTME: Extracts candidate text without ever failing on unexpected shapes
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! Response envelope unwrapping
//!
//! Layers, first match wins:
//! 1. the envelope must be an object whose `candidates` is absent, null, or an array
//! 2. text parts of the first candidate, trimmed, joined with newlines
//! 3. a direct `content.text` (or `text`) string on the first candidate
//! 4. a best-effort rendering of the first candidate
//!
//! Zero candidates is reported separately so the caller can substitute a
//! placeholder.

use serde_json::Value;

/// What could be recovered from an envelope
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Unwrapped {
    /// Recognized candidate text, non-empty
    Text(String),
    /// The first candidate had no recognizable text; this is a rendering of it
    BestEffort(String),
    /// The envelope held no candidates
    NoCandidates,
}

/// Envelope shape violations
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum EnvelopeError {
    /// Top level was not a JSON object
    #[error("response envelope is not an object")]
    NotAnObject,
    /// `candidates` was present but not an array
    #[error("response candidates field is not an array")]
    CandidatesNotArray,
}

/// Unwrap a response envelope
///
/// # Errors
///
/// Returns an `EnvelopeError` only for envelopes whose top-level shape is
/// wrong; anything inside a candidate is handled by the fallback layers.
pub fn unwrap_envelope(envelope: &Value) -> Result<Unwrapped, EnvelopeError> {
    let object = envelope.as_object().ok_or(EnvelopeError::NotAnObject)?;
    let candidates = match object.get("candidates") {
        None | Some(Value::Null) => return Ok(Unwrapped::NoCandidates),
        Some(Value::Array(candidates)) => candidates,
        Some(_) => return Err(EnvelopeError::CandidatesNotArray),
    };
    let Some(first) = candidates.first() else {
        return Ok(Unwrapped::NoCandidates);
    };

    if let Some(text) = parts_text(first).or_else(|| direct_text(first)) {
        return Ok(Unwrapped::Text(text));
    }
    Ok(Unwrapped::BestEffort(render_candidate(first)))
}

fn parts_text(candidate: &Value) -> Option<String> {
    let parts = candidate.pointer("/content/parts")?.as_array()?;
    let texts: Vec<&str> = parts
        .iter()
        .filter_map(|part| part.get("text").and_then(Value::as_str))
        .map(str::trim)
        .filter(|text| !text.is_empty())
        .collect();
    (!texts.is_empty()).then(|| texts.join("\n"))
}

fn direct_text(candidate: &Value) -> Option<String> {
    candidate
        .pointer("/content/text")
        .or_else(|| candidate.get("text"))
        .and_then(Value::as_str)
        .map(str::trim)
        .filter(|text| !text.is_empty())
        .map(str::to_owned)
}

fn render_candidate(candidate: &Value) -> String {
    match candidate {
        Value::String(text) if !text.trim().is_empty() => text.trim().to_owned(),
        Value::Null => "(empty candidate)".to_owned(),
        other => other.to_string(),
    }
}

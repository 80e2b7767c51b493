//! Text and JSON renderings of a trace
//!
//! Both renderings are pure projections: they never mutate the trace, work on
//! open and completed traces alike, and repeated calls on an unchanged trace
//! return identical output.
//!
//! ## Text form
//!
//! ```text
//! Trace: addition (ID: addition-fcadb8f3b40ef8da)
//! Inputs:
//!   a: 10
//!   b: 20
//! Steps:
//!   1. add: 30 (Add a and b)
//! Result: 30
//! ```
//!
//! Inputs are listed in key order, steps in append order. The `Steps:`
//! section is only present when at least one step exists, and `Result:` only
//! once the result is set.
//!
//! ## JSON form
//!
//! The serde representation of [`Trace`]: every map emits its keys sorted,
//! absent optionals are omitted, timestamps are RFC 3339 UTC.

use crate::trace::Trace;
use reckon_core::Result;
use std::fmt;

/// Render the multi-line text form
pub fn text(trace: &Trace) -> String {
    trace.to_string()
}

/// Render the JSON document, pretty-printed with two-space indentation
pub fn json(trace: &Trace) -> Result<String> {
    Ok(serde_json::to_string_pretty(trace)?)
}

/// Render the JSON document on a single line
pub fn json_compact(trace: &Trace) -> Result<String> {
    Ok(serde_json::to_string(trace)?)
}

/// Render the JSON document as a tree of `serde_json::Value`
pub fn document(trace: &Trace) -> Result<serde_json::Value> {
    Ok(serde_json::to_value(trace)?)
}

/// Read a trace back from its JSON document
///
/// A document carrying a `result` is restored as completed.
///
/// ## Errors
/// - `Serialization` if the text is not a valid trace document, including one
///   where `result` and `end_time` are not both present or both absent
pub fn parse(json: &str) -> Result<Trace> {
    Ok(serde_json::from_str(json)?)
}

impl fmt::Display for Trace {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Trace: {} (ID: {})", self.name(), self.id())?;

        writeln!(f, "Inputs:")?;
        for (key, value) in self.inputs() {
            writeln!(f, "  {}: {}", key, value)?;
        }

        if !self.steps().is_empty() {
            writeln!(f, "Steps:")?;
            for (i, step) in self.steps().iter().enumerate() {
                writeln!(f, "  {}. {}", i + 1, step)?;
            }
        }

        if let Some(result) = self.result() {
            writeln!(f, "Result: {}", result)?;
        }
        Ok(())
    }
}

impl Trace {
    /// Pretty-printed JSON document; see [`json`]
    pub fn to_json(&self) -> Result<String> {
        json(self)
    }

    /// Parse a JSON document; see [`parse`]
    pub fn from_json(json: &str) -> Result<Trace> {
        parse(json)
    }
}

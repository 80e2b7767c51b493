//! Step: one recorded operation inside a trace

use chrono::{DateTime, Utc};
use reckon_core::Value;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

/// A single recorded operation
///
/// Holds the operation name, its named inputs, its output, the UTC time it
/// was recorded, and optional description and metadata.
///
/// Steps are values. [`Step::with_description`] and [`Step::with_metadata`]
/// consume the step and return a new one; there is no in-place mutation, and
/// a step appended to a trace is never touched again.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Step {
    operation: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    description: Option<String>,
    #[serde(default)]
    inputs: BTreeMap<String, Value>,
    output: Value,
    timestamp: DateTime<Utc>,
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    metadata: BTreeMap<String, String>,
}

impl Step {
    /// Record an operation with its inputs and output
    ///
    /// Inputs are collected into the step's own map (a repeated key keeps the
    /// last value). An empty operation name is accepted.
    pub fn new<I, K, V>(operation: impl Into<String>, inputs: I, output: impl Into<Value>) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<Value>,
    {
        Step {
            operation: operation.into(),
            description: None,
            inputs: inputs
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
            output: output.into(),
            timestamp: Utc::now(),
            metadata: BTreeMap::new(),
        }
    }

    /// Return this step with a human-readable description
    ///
    /// An empty description is the same as none.
    #[must_use]
    pub fn with_description(self, description: impl Into<String>) -> Self {
        let description = description.into();
        Step {
            description: (!description.is_empty()).then_some(description),
            ..self
        }
    }

    /// Return this step with one metadata entry added or overwritten
    #[must_use]
    pub fn with_metadata(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.metadata.insert(key.into(), value.into());
        self
    }

    /// Operation name
    pub fn operation(&self) -> &str {
        &self.operation
    }

    /// Description, if any
    pub fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }

    /// Named inputs in key order
    pub fn inputs(&self) -> &BTreeMap<String, Value> {
        &self.inputs
    }

    /// Output value
    pub fn output(&self) -> &Value {
        &self.output
    }

    /// Time the step was recorded
    pub fn timestamp(&self) -> DateTime<Utc> {
        self.timestamp
    }

    /// Metadata entries in key order
    pub fn metadata(&self) -> &BTreeMap<String, String> {
        &self.metadata
    }
}

/// `<operation>: <output>` with ` (<description>)` appended when present.
impl fmt::Display for Step {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.operation, self.output)?;
        if let Some(description) = &self.description {
            write!(f, " ({})", description)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_step() {
        let step = Step::new("add", [("a", 10), ("b", 20)], 30);

        assert_eq!(step.operation(), "add");
        assert_eq!(step.inputs().len(), 2);
        assert_eq!(step.inputs()["a"], Value::wrap(10));
        assert_eq!(step.output(), &Value::wrap(30));
        assert!(step.description().is_none());
        assert!(step.metadata().is_empty());
        assert!(step.timestamp() <= Utc::now());
    }

    #[test]
    fn test_with_description() {
        let step = Step::new("add", [("a", 1)], 1).with_description("Addition operation");
        assert_eq!(step.description(), Some("Addition operation"));
    }

    #[test]
    fn test_with_description_leaves_original() {
        let original = Step::new("add", [("a", 1)], 1);
        let described = original.clone().with_description("described");
        assert!(original.description().is_none());
        assert_eq!(described.description(), Some("described"));
    }

    #[test]
    fn test_empty_description_is_absent() {
        let step = Step::new("noop", [("a", 0)], 0).with_description("");
        assert!(step.description().is_none());
        assert_eq!(step.to_string(), "noop: 0");
    }

    #[test]
    fn test_with_metadata_overwrites() {
        let step = Step::new("add", [("a", 0)], 0)
            .with_metadata("author", "first")
            .with_metadata("author", "test")
            .with_metadata("unit", "m");
        assert_eq!(step.metadata().get("author").map(String::as_str), Some("test"));
        assert_eq!(step.metadata().len(), 2);
    }

    #[test]
    fn test_display() {
        let step = Step::new("add", [("a", 10), ("b", 20)], 30);
        assert_eq!(step.to_string(), "add: 30");

        let step = step.with_description("Add a and b");
        assert_eq!(step.to_string(), "add: 30 (Add a and b)");
    }

    #[test]
    fn test_empty_operation_accepted() {
        let step = Step::new("", [("x", true)], false);
        assert_eq!(step.to_string(), ": false");
    }

    #[test]
    fn test_serialized_omits_absent_fields() {
        let step = Step::new("add", [("a", 1)], 1);
        let json = serde_json::to_value(&step).unwrap();
        let obj = json.as_object().unwrap();
        assert!(obj.contains_key("operation"));
        assert!(obj.contains_key("inputs"));
        assert!(obj.contains_key("output"));
        assert!(obj.contains_key("timestamp"));
        assert!(!obj.contains_key("description"));
        assert!(!obj.contains_key("metadata"));

        let described = step.with_description("d").with_metadata("k", "v");
        let json = serde_json::to_value(described).unwrap();
        assert_eq!(json["description"], "d");
        assert_eq!(json["metadata"]["k"], "v");
    }
}

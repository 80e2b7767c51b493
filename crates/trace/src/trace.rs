//! Trace: the aggregate record of one computation
//!
//! ## Lifecycle
//!
//! ```text
//! Open --add_step/with_metadata--> Open --set_result--> Completed (terminal)
//! ```
//!
//! - Inputs are snapshotted at construction and the identifier is derived
//!   from them once.
//! - Steps append in call order; display and serialization keep that order.
//! - `set_result` is the only transition. It stores the result, stamps the
//!   end time and completes the trace in one operation.
//! - Every mutation on a completed trace fails with `Error::InvalidState`
//!   and leaves the trace untouched.
//!
//! ## Concurrency
//!
//! Mutations take `&mut self` and renderers take `&self`, so a single writer
//! and any number of readers between writes is enforced by the borrow
//! checker. Share across threads behind a lock if needed.

use crate::id::derive_id;
use crate::step::Step;
use chrono::{DateTime, Duration, Utc};
use reckon_core::{Error, Mutation, Result, Value};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use tracing::{debug, warn};

/// Named initial inputs of a trace, in key order
pub type Inputs = BTreeMap<String, Value>;

/// Lifecycle state of a trace
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum TraceState {
    /// Accepting steps, metadata and a result
    #[default]
    Open,
    /// Result set; no further mutation
    Completed,
}

/// A complete computation trace
///
/// Serialized field order and names (`id`, `name`, `inputs`, `steps`,
/// `result`, `start_time`, `end_time`, `metadata`) are the document format
/// read by external viewers. `result`, `end_time` and `metadata` are omitted
/// when absent or empty.
///
/// Deserialization restores the lifecycle state: a document carrying a
/// `result` comes back completed. A document with only one of `result` and
/// `end_time` is rejected.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "TraceDocument")]
pub struct Trace {
    id: String,
    name: String,
    inputs: Inputs,
    steps: Vec<Step>,
    #[serde(skip_serializing_if = "Option::is_none")]
    result: Option<Value>,
    start_time: DateTime<Utc>,
    #[serde(skip_serializing_if = "Option::is_none")]
    end_time: Option<DateTime<Utc>>,
    #[serde(skip_serializing_if = "BTreeMap::is_empty")]
    metadata: BTreeMap<String, String>,
    #[serde(skip)]
    state: TraceState,
}

/// Wire form of a trace as read from a document
#[derive(Deserialize)]
struct TraceDocument {
    id: String,
    name: String,
    #[serde(default)]
    inputs: Inputs,
    #[serde(default)]
    steps: Vec<Step>,
    #[serde(default)]
    result: Option<Value>,
    start_time: DateTime<Utc>,
    #[serde(default)]
    end_time: Option<DateTime<Utc>>,
    #[serde(default)]
    metadata: BTreeMap<String, String>,
}

impl TryFrom<TraceDocument> for Trace {
    type Error = Error;

    fn try_from(doc: TraceDocument) -> Result<Self> {
        let state = match (&doc.result, &doc.end_time) {
            (Some(_), Some(_)) => TraceState::Completed,
            (None, None) => TraceState::Open,
            (Some(_), None) => {
                return Err(Error::invalid_input(format!(
                    "trace '{}' has a result but no end_time",
                    doc.id
                )))
            }
            (None, Some(_)) => {
                return Err(Error::invalid_input(format!(
                    "trace '{}' has an end_time but no result",
                    doc.id
                )))
            }
        };
        Ok(Trace {
            id: doc.id,
            name: doc.name,
            inputs: doc.inputs,
            steps: doc.steps,
            result: doc.result,
            start_time: doc.start_time,
            end_time: doc.end_time,
            metadata: doc.metadata,
            state,
        })
    }
}

impl Trace {
    /// Start a trace for a named computation
    ///
    /// Inputs are copied into the trace's own map, so later changes to the
    /// caller's collection are never observed. A repeated key keeps the last
    /// value. The identifier is derived here and never recomputed.
    pub fn new<I, K, V>(name: impl Into<String>, inputs: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<Value>,
    {
        let name = name.into();
        let inputs: Inputs = inputs
            .into_iter()
            .map(|(k, v)| (k.into(), v.into()))
            .collect();
        let id = derive_id(&name, &inputs);

        debug!(trace_id = %id, inputs = inputs.len(), "trace started");

        Trace {
            id,
            name,
            inputs,
            steps: Vec::new(),
            result: None,
            start_time: Utc::now(),
            end_time: None,
            metadata: BTreeMap::new(),
            state: TraceState::Open,
        }
    }

    /// Append a step
    ///
    /// ## Errors
    /// - `InvalidState` if the trace is completed
    pub fn add_step(&mut self, step: Step) -> Result<()> {
        self.ensure_open(Mutation::AddStep)?;
        debug!(
            trace_id = %self.id,
            index = self.steps.len() + 1,
            operation = step.operation(),
            "step recorded"
        );
        self.steps.push(step);
        Ok(())
    }

    /// Set the final result and complete the trace
    ///
    /// Only the first call succeeds.
    ///
    /// ## Errors
    /// - `InvalidState` if the trace is completed; the stored result is kept
    pub fn set_result(&mut self, result: impl Into<Value>) -> Result<()> {
        self.ensure_open(Mutation::SetResult)?;
        self.result = Some(result.into());
        self.end_time = Some(Utc::now());
        self.state = TraceState::Completed;
        debug!(trace_id = %self.id, steps = self.steps.len(), "trace completed");
        Ok(())
    }

    /// Add or overwrite one trace-level metadata entry
    ///
    /// ## Errors
    /// - `InvalidState` if the trace is completed
    pub fn with_metadata(
        &mut self,
        key: impl Into<String>,
        value: impl Into<String>,
    ) -> Result<()> {
        self.ensure_open(Mutation::AddMetadata)?;
        self.metadata.insert(key.into(), value.into());
        Ok(())
    }

    /// Check whether the result has been set
    pub fn is_completed(&self) -> bool {
        self.state == TraceState::Completed
    }

    /// Current lifecycle state
    pub fn state(&self) -> TraceState {
        self.state
    }

    fn ensure_open(&self, operation: Mutation) -> Result<()> {
        if self.is_completed() {
            warn!(trace_id = %self.id, %operation, "mutation rejected on completed trace");
            return Err(Error::InvalidState {
                operation,
                trace_id: self.id.clone(),
            });
        }
        Ok(())
    }

    // ========== Accessors ==========

    /// Deterministic identifier (`<name>-<16 hex chars>`)
    pub fn id(&self) -> &str {
        &self.id
    }

    /// Computation name
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Initial inputs in key order
    pub fn inputs(&self) -> &Inputs {
        &self.inputs
    }

    /// Steps in append order
    pub fn steps(&self) -> &[Step] {
        &self.steps
    }

    /// Final result, if set
    pub fn result(&self) -> Option<&Value> {
        self.result.as_ref()
    }

    /// Time the trace was started
    pub fn start_time(&self) -> DateTime<Utc> {
        self.start_time
    }

    /// Time the trace was completed, if it has been
    pub fn end_time(&self) -> Option<DateTime<Utc>> {
        self.end_time
    }

    /// Trace-level metadata in key order
    pub fn metadata(&self) -> &BTreeMap<String, String> {
        &self.metadata
    }

    /// Wall-clock time between start and completion
    pub fn duration(&self) -> Option<Duration> {
        self.end_time.map(|end| end - self.start_time)
    }

    /// Recompute the identifier from the recorded name and inputs and compare
    ///
    /// Always true for traces built in-process; useful for documents read back
    /// from elsewhere.
    pub fn verify_id(&self) -> bool {
        derive_id(&self.name, &self.inputs) == self.id
    }
}

//! Deterministic computation traces
//!
//! This crate records what a computation did, step by step:
//! - [`Trace`]: inputs, ordered steps, final result, open/completed lifecycle
//! - [`Step`]: one operation with its inputs and output
//! - [`derive_id`]: SHA-256 based identifier, stable under input reordering
//! - [`render`]: text and JSON projections, and JSON parsing
//!
//! ## Example
//!
//! ```
//! use reckon_trace::{Step, Trace};
//!
//! let mut trace = Trace::new("complex-computation", [("a", 5), ("b", 3), ("c", 4), ("d", 2)]);
//! trace.add_step(Step::new("add", [("a", 5), ("b", 3)], 8).with_description("Add a and b"))?;
//! trace.add_step(Step::new("multiply", [("sum", 8), ("c", 4)], 32))?;
//! trace.add_step(Step::new("subtract", [("product", 32), ("d", 2)], 30))?;
//! trace.set_result(30)?;
//!
//! assert!(trace.to_string().ends_with("Result: 30\n"));
//! # Ok::<(), reckon_core::Error>(())
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod id;
pub mod render;
pub mod step;
pub mod trace;

pub use id::{derive_id, ID_DIGEST_PREFIX_LEN};
pub use reckon_core::{Datum, Error, Mutation, Result, Value};
pub use step::Step;
pub use trace::{Inputs, Trace, TraceState};

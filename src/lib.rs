//! Reckon - deterministic, explainable computation traces
//!
//! Reckon records every input, every intermediate step and the final result of
//! a computation so that a human can audit it afterwards. Identical inputs
//! always produce identical trace content and an identical trace identifier.
//!
//! # Quick Start
//!
//! ```
//! use reckon::{Step, Trace, Value};
//!
//! let mut trace = Trace::new("addition", [("a", 10), ("b", 20)]);
//! trace.add_step(Step::new("add", [("a", 10), ("b", 20)], 30))?;
//! trace.set_result(Value::wrap(30))?;
//!
//! assert!(trace.is_completed());
//! println!("{}", trace);
//! # Ok::<(), reckon::Error>(())
//! ```
//!
//! # Architecture
//!
//! The value model and error types live in `reckon-core`; the step/trace
//! lifecycle, identifier derivation and renderers live in `reckon-trace`.
//! This crate only re-exports their public API.

pub use reckon_core::{Datum, Error, Result, Value};
pub use reckon_trace::*;

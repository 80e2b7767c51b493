//! Core types for Reckon
//!
//! This crate defines the foundational types used throughout the system:
//! - Datum: closed set of recordable payloads
//! - Value: immutable, kind-tagged wrapper around a Datum
//! - Error: Error type hierarchy (lifecycle and edge errors)

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod error;
pub mod value;

pub use error::{Error, Mutation, Result};
pub use value::{Datum, Value};

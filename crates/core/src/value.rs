//! Value types for Reckon
//!
//! This module defines:
//! - Datum: closed set of payload types a trace can record
//! - Value: immutable, kind-tagged wrapper around a Datum
//!
//! ## Datum Model
//!
//! The Datum enum has exactly 7 variants:
//! - Null, Bool, Int, Float, String, Array, Object
//!
//! Objects use ordered maps so that display text and serialized form never
//! depend on insertion order.
//!
//! ## Display Rules
//!
//! Display text is the identity of a datum for trace identifiers, so it is
//! fixed:
//! - integers in decimal, floats in shortest round-trip form (`30.0` -> `30`)
//! - strings raw (no quotes), booleans `true`/`false`, null `null`
//! - arrays as `[a b c]`, objects as `map[k1:v1 k2:v2]` in key order

use serde::{Deserialize, Serialize, Serializer};
use std::collections::{BTreeMap, HashMap};
use std::fmt;

/// Payload recorded inside a [`Value`]
///
/// Serialized untagged, so a datum appears in JSON as the plain JSON value
/// (`42`, `"text"`, `[1, 2]`, ...). JSON has no NaN or infinity, so
/// non-finite floats are written as their display text (`"NaN"`, `"inf"`,
/// `"-inf"`); a `float` [`Value`] reads them back as floats.
///
/// Float equality follows IEEE-754 semantics: `NaN != NaN`, `-0.0 == 0.0`.
/// Different variants are never equal: `Int(1) != Float(1.0)`.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum Datum {
    /// Null value
    Null,
    /// Boolean value
    Bool(bool),
    /// 64-bit signed integer
    Int(i64),
    /// 64-bit floating point (IEEE-754)
    Float(f64),
    /// UTF-8 string
    String(String),
    /// Array of data
    Array(Vec<Datum>),
    /// Object with string keys, kept in key order
    Object(BTreeMap<String, Datum>),
}

impl Datum {
    /// Get the kind tag for this datum
    pub fn kind(&self) -> &'static str {
        match self {
            Datum::Null => "null",
            Datum::Bool(_) => "bool",
            Datum::Int(_) => "int",
            Datum::Float(_) => "float",
            Datum::String(_) => "string",
            Datum::Array(_) => "array",
            Datum::Object(_) => "object",
        }
    }

    /// Check if this is a null datum
    pub fn is_null(&self) -> bool {
        matches!(self, Datum::Null)
    }

    /// Get as bool if this is a Bool datum
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Datum::Bool(b) => Some(*b),
            _ => None,
        }
    }

    /// Get as i64 if this is an Int datum
    pub fn as_int(&self) -> Option<i64> {
        match self {
            Datum::Int(i) => Some(*i),
            _ => None,
        }
    }

    /// Get as f64 if this is a Float datum
    pub fn as_float(&self) -> Option<f64> {
        match self {
            Datum::Float(f) => Some(*f),
            _ => None,
        }
    }

    /// Get as &str if this is a String datum
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Datum::String(s) => Some(s),
            _ => None,
        }
    }

    /// Get as &[Datum] if this is an Array datum
    pub fn as_array(&self) -> Option<&[Datum]> {
        match self {
            Datum::Array(a) => Some(a),
            _ => None,
        }
    }

    /// Get as &BTreeMap if this is an Object datum
    pub fn as_object(&self) -> Option<&BTreeMap<String, Datum>> {
        match self {
            Datum::Object(o) => Some(o),
            _ => None,
        }
    }
}

impl Serialize for Datum {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        match self {
            Datum::Null => serializer.serialize_unit(),
            Datum::Bool(b) => serializer.serialize_bool(*b),
            Datum::Int(i) => serializer.serialize_i64(*i),
            Datum::Float(x) if x.is_finite() => serializer.serialize_f64(*x),
            Datum::Float(x) => serializer.collect_str(x),
            Datum::String(s) => serializer.serialize_str(s),
            Datum::Array(items) => serializer.collect_seq(items),
            Datum::Object(entries) => serializer.collect_map(entries),
        }
    }
}

impl fmt::Display for Datum {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Datum::Null => f.write_str("null"),
            Datum::Bool(b) => write!(f, "{}", b),
            Datum::Int(i) => write!(f, "{}", i),
            Datum::Float(x) => write!(f, "{}", x),
            Datum::String(s) => f.write_str(s),
            Datum::Array(items) => {
                f.write_str("[")?;
                for (i, item) in items.iter().enumerate() {
                    if i > 0 {
                        f.write_str(" ")?;
                    }
                    write!(f, "{}", item)?;
                }
                f.write_str("]")
            }
            Datum::Object(entries) => {
                f.write_str("map[")?;
                for (i, (key, item)) in entries.iter().enumerate() {
                    if i > 0 {
                        f.write_str(" ")?;
                    }
                    write!(f, "{}:{}", key, item)?;
                }
                f.write_str("]")
            }
        }
    }
}

// ============================================================================
// From implementations for ergonomic API usage
// ============================================================================

impl From<&str> for Datum {
    fn from(s: &str) -> Self {
        Datum::String(s.to_string())
    }
}

impl From<String> for Datum {
    fn from(s: String) -> Self {
        Datum::String(s)
    }
}

impl From<bool> for Datum {
    fn from(b: bool) -> Self {
        Datum::Bool(b)
    }
}

impl From<i64> for Datum {
    fn from(i: i64) -> Self {
        Datum::Int(i)
    }
}

impl From<i32> for Datum {
    fn from(i: i32) -> Self {
        Datum::Int(i as i64)
    }
}

impl From<u32> for Datum {
    fn from(i: u32) -> Self {
        Datum::Int(i as i64)
    }
}

impl From<f64> for Datum {
    fn from(f: f64) -> Self {
        Datum::Float(f)
    }
}

impl From<f32> for Datum {
    fn from(f: f32) -> Self {
        Datum::Float(f as f64)
    }
}

impl From<Vec<Datum>> for Datum {
    fn from(a: Vec<Datum>) -> Self {
        Datum::Array(a)
    }
}

impl From<BTreeMap<String, Datum>> for Datum {
    fn from(o: BTreeMap<String, Datum>) -> Self {
        Datum::Object(o)
    }
}

impl From<HashMap<String, Datum>> for Datum {
    fn from(o: HashMap<String, Datum>) -> Self {
        Datum::Object(o.into_iter().collect())
    }
}

impl From<()> for Datum {
    fn from(_: ()) -> Self {
        Datum::Null
    }
}

// ============================================================================
// serde_json interop for ergonomic JSON construction
// ============================================================================

impl From<serde_json::Value> for Datum {
    fn from(v: serde_json::Value) -> Self {
        match v {
            serde_json::Value::Null => Datum::Null,
            serde_json::Value::Bool(b) => Datum::Bool(b),
            serde_json::Value::Number(n) => {
                if let Some(i) = n.as_i64() {
                    Datum::Int(i)
                } else {
                    // u64 beyond i64 range and real floats both land here
                    Datum::Float(n.as_f64().unwrap_or(0.0))
                }
            }
            serde_json::Value::String(s) => Datum::String(s),
            serde_json::Value::Array(arr) => {
                Datum::Array(arr.into_iter().map(Datum::from).collect())
            }
            serde_json::Value::Object(obj) => {
                Datum::Object(obj.into_iter().map(|(k, v)| (k, Datum::from(v))).collect())
            }
        }
    }
}

impl From<Datum> for serde_json::Value {
    fn from(d: Datum) -> Self {
        match d {
            Datum::Null => serde_json::Value::Null,
            Datum::Bool(b) => serde_json::Value::Bool(b),
            Datum::Int(i) => serde_json::Value::Number(i.into()),
            Datum::Float(f) => serde_json::Number::from_f64(f)
                .map(serde_json::Value::Number)
                .unwrap_or_else(|| serde_json::Value::String(f.to_string())),
            Datum::String(s) => serde_json::Value::String(s),
            Datum::Array(arr) => {
                serde_json::Value::Array(arr.into_iter().map(serde_json::Value::from).collect())
            }
            Datum::Object(obj) => serde_json::Value::Object(
                obj.into_iter()
                    .map(|(k, v)| (k, serde_json::Value::from(v)))
                    .collect(),
            ),
        }
    }
}

// ============================================================================
// Value
// ============================================================================

/// Immutable, kind-tagged wrapper around a recorded datum
///
/// `kind` is derived from the datum when wrapping. Documents written by other
/// tools may carry their own kind tags (`"float64"`, `"int"`, ...); those are
/// kept verbatim through [`Value::with_kind`] and deserialization.
///
/// There are no mutators: once built, `kind` and `data` never change.
///
/// Serialized as `{"kind": ..., "data": ...}`. The field names `type` and
/// `value` are accepted as aliases when reading.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(from = "ValueDocument")]
pub struct Value {
    kind: String,
    data: Datum,
}

/// Wire form of a value as read from a document
#[derive(Deserialize)]
struct ValueDocument {
    #[serde(alias = "type")]
    kind: String,
    #[serde(alias = "value")]
    data: Datum,
}

impl From<ValueDocument> for Value {
    fn from(doc: ValueDocument) -> Self {
        let data = match doc.data {
            Datum::String(text) if is_float_kind(&doc.kind) => match text.parse::<f64>() {
                Ok(x) if !x.is_finite() => Datum::Float(x),
                _ => Datum::String(text),
            },
            other => other,
        };
        Value {
            kind: doc.kind,
            data,
        }
    }
}

fn is_float_kind(kind: &str) -> bool {
    matches!(kind, "float" | "float32" | "float64")
}

impl Value {
    /// Wrap a datum, deriving its kind tag
    pub fn wrap(datum: impl Into<Datum>) -> Self {
        let data = datum.into();
        Value {
            kind: data.kind().to_string(),
            data,
        }
    }

    /// Wrap a datum under an explicit kind tag
    pub fn with_kind(kind: impl Into<String>, datum: impl Into<Datum>) -> Self {
        Value {
            kind: kind.into(),
            data: datum.into(),
        }
    }

    /// Get the kind tag
    pub fn kind(&self) -> &str {
        &self.kind
    }

    /// Get the wrapped datum
    pub fn data(&self) -> &Datum {
        &self.data
    }

    /// Consume the value, returning the wrapped datum
    pub fn into_data(self) -> Datum {
        self.data
    }
}

/// Display is the display of the wrapped datum; the kind tag is not shown.
impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.data, f)
    }
}

impl From<&Value> for Value {
    fn from(v: &Value) -> Self {
        v.clone()
    }
}

macro_rules! value_from {
    ($($t:ty),* $(,)?) => {
        $(
            impl From<$t> for Value {
                fn from(v: $t) -> Self {
                    Value::wrap(v)
                }
            }
        )*
    };
}

value_from!(
    Datum,
    (),
    &str,
    String,
    bool,
    i64,
    i32,
    u32,
    f64,
    f32,
    Vec<Datum>,
    BTreeMap<String, Datum>,
    serde_json::Value,
);

//! String → Datum parsing rules.
//!
//! Command-line input values are parsed into `Datum` using auto-detect logic:
//! 1. JSON structures (`{`, `[`, `"`) → parse as JSON
//! 2. `null` → Datum::Null
//! 3. `true` / `false` → Datum::Bool
//! 4. Integer pattern → Datum::Int
//! 5. Float pattern → Datum::Float
//! 6. Everything else → Datum::String

use reckon_core::Datum;

/// Auto-detect the datum type of a user-supplied string.
pub fn parse_datum(s: &str) -> Datum {
    // Rule 1: JSON structures
    if s.starts_with('{') || s.starts_with('[') || s.starts_with('"') {
        if let Ok(json) = serde_json::from_str::<serde_json::Value>(s) {
            return Datum::from(json);
        }
        // If JSON parse fails, fall through to string
    }

    match s {
        "null" => return Datum::Null,
        "true" => return Datum::Bool(true),
        "false" => return Datum::Bool(false),
        _ => {}
    }

    if is_integer(s) {
        if let Ok(i) = s.parse::<i64>() {
            return Datum::Int(i);
        }
    }

    if is_float(s) {
        if let Ok(f) = s.parse::<f64>() {
            return Datum::Float(f);
        }
    }

    Datum::String(s.to_string())
}

fn is_integer(s: &str) -> bool {
    let s = s.strip_prefix('-').unwrap_or(s);
    !s.is_empty() && s.bytes().all(|b| b.is_ascii_digit())
}

fn is_float(s: &str) -> bool {
    let s = s.strip_prefix('-').unwrap_or(s);
    if s.is_empty() {
        return false;
    }
    // Must contain a dot or exponent
    if !s.contains('.') && !s.contains('e') && !s.contains('E') {
        return false;
    }
    s.bytes().all(|b| {
        b.is_ascii_digit() || b == b'.' || b == b'e' || b == b'E' || b == b'+' || b == b'-'
    })
}

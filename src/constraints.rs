//! # Built-in Constraint Library
//!
//! The standard constraints of the engine, each a pure predicate over the
//! value under check and its resolved options.
//!
//! ## Constraint Contracts
//!
//! - **Absence**: every constraint except `required` treats `Value::Nil` as
//!   automatically satisfied. Absence is `required`'s exclusive concern; this
//!   prevents a missing field from failing every constraint in a chain.
//! - **Pure Predicates**: no side effects, no retained match state,
//!   deterministic for identical arguments.
//! - **Malformed Options Fail the Step**: a non-numeric bound or missing
//!   option makes the predicate return false; option problems surface as a
//!   violation of the step, never as a fault.

use crate::registry::{Constraint, ConstraintFn, ConstraintRegistry};
use crate::value::Value;
use once_cell::sync::Lazy;
use regex::Regex;

// Fixed patterns, compiled once. All are fully anchored.
static EMAIL_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[^@\s]+@[^@\s]+\.[^@\s]+$").unwrap());
static NUMERIC_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"^[0-9]+$").unwrap());
static ALPHANUM_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"^[a-zA-Z0-9]+$").unwrap());
static NUMERIC_SPACE_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"^[0-9 ]+$").unwrap());
static ALPHANUM_SPACE_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[a-zA-Z0-9 ]+$").unwrap());

// ============================================================================
// HELPERS
// ============================================================================

/// Numeric view of a value: numbers directly, strings by parsing.
fn numeric(value: &Value) -> Option<f64> {
    match value {
        Value::Number(n) => Some(*n),
        Value::String(s) => s.trim().parse().ok(),
        _ => None,
    }
}

/// Textual view of a value for pattern matching: strings directly, numbers
/// rendered. Other types have no text form and fail pattern constraints.
fn text(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.clone()),
        Value::Number(_) => Some(value.to_string()),
        _ => None,
    }
}

/// Size of a sized value: character count for text, element count for lists.
fn size(value: &Value) -> Option<usize> {
    match value {
        Value::String(s) => Some(s.chars().count()),
        Value::List(items) => Some(items.len()),
        _ => None,
    }
}

/// First option interpreted as a non-negative whole-number bound.
fn count_bound(options: &[Value]) -> Option<usize> {
    let n = options.first().and_then(numeric)?;
    if n >= 0.0 && n.fract() == 0.0 {
        Some(n as usize)
    } else {
        None
    }
}

pub(crate) fn matches_pattern(value: &Value, pattern: &Regex) -> bool {
    if value.is_nil() {
        return true;
    }
    match text(value) {
        Some(s) => pattern.is_match(&s),
        None => false,
    }
}

// ============================================================================
// PRESENCE
// ============================================================================

/// `required`: the value is neither absent nor the empty string.
///
/// The only constraint for which absence is a failure.
pub const REQUIRED: ConstraintFn = |value, _options| match value {
    Value::Nil => false,
    Value::String(s) => !s.is_empty(),
    _ => true,
};

// ============================================================================
// NUMERIC BOUNDS
// ============================================================================

/// `min(n)`: absent, or numerically >= n.
pub const MIN: ConstraintFn = |value, options| {
    if value.is_nil() {
        return true;
    }
    match (numeric(value), options.first().and_then(numeric)) {
        (Some(v), Some(bound)) => v >= bound,
        _ => false,
    }
};

/// `max(n)`: absent, or numerically <= n.
pub const MAX: ConstraintFn = |value, options| {
    if value.is_nil() {
        return true;
    }
    match (numeric(value), options.first().and_then(numeric)) {
        (Some(v), Some(bound)) => v <= bound,
        _ => false,
    }
};

/// `positive`: absent, or >= 0.
pub const POSITIVE: ConstraintFn = |value, _options| {
    if value.is_nil() {
        return true;
    }
    matches!(numeric(value), Some(v) if v >= 0.0)
};

/// `negative`: absent, or <= 0.
pub const NEGATIVE: ConstraintFn = |value, _options| {
    if value.is_nil() {
        return true;
    }
    matches!(numeric(value), Some(v) if v <= 0.0)
};

// ============================================================================
// SIZE BOUNDS
// ============================================================================

/// `minLength(n)`: absent, or size >= n. Size is the character count for
/// text and the element count for lists; other present types fail.
pub const MIN_LENGTH: ConstraintFn = |value, options| {
    if value.is_nil() {
        return true;
    }
    match (size(value), count_bound(options)) {
        (Some(len), Some(bound)) => len >= bound,
        _ => false,
    }
};

/// `maxLength(n)`: absent, or size <= n.
pub const MAX_LENGTH: ConstraintFn = |value, options| {
    if value.is_nil() {
        return true;
    }
    match (size(value), count_bound(options)) {
        (Some(len), Some(bound)) => len <= bound,
        _ => false,
    }
};

/// `length(n)`: absent, or size exactly n.
pub const LENGTH: ConstraintFn = |value, options| {
    if value.is_nil() {
        return true;
    }
    match (size(value), count_bound(options)) {
        (Some(len), Some(bound)) => len == bound,
        _ => false,
    }
};

// ============================================================================
// PATTERNS
// ============================================================================

/// `match(pattern)`: absent, or the value's text matches the regex pattern.
///
/// This registry form compiles the pattern on every call so it stays a plain
/// function pointer; the fluent [`crate::Rule::matches`] wrapper precompiles
/// and should be preferred in chains. An invalid pattern fails the step.
pub const MATCH: ConstraintFn = |value, options| {
    if value.is_nil() {
        return true;
    }
    let Some(Value::String(pattern)) = options.first() else {
        return false;
    };
    let Ok(re) = Regex::new(pattern) else {
        return false;
    };
    match text(value) {
        Some(s) => re.is_match(&s),
        None => false,
    }
};

/// `email`: absent, or matches the fixed email pattern.
pub const EMAIL: ConstraintFn = |value, _options| matches_pattern(value, &EMAIL_RE);

/// `numeric`: absent, or digits only.
pub const NUMERIC: ConstraintFn = |value, _options| matches_pattern(value, &NUMERIC_RE);

/// `alphanum`: absent, or letters and digits only.
pub const ALPHANUM: ConstraintFn = |value, _options| matches_pattern(value, &ALPHANUM_RE);

/// `numericSpace`: absent, or digits and spaces only.
pub const NUMERIC_SPACE: ConstraintFn =
    |value, _options| matches_pattern(value, &NUMERIC_SPACE_RE);

/// `alphanumSpace`: absent, or letters, digits and spaces only.
pub const ALPHANUM_SPACE: ConstraintFn =
    |value, _options| matches_pattern(value, &ALPHANUM_SPACE_RE);

// ============================================================================
// MEMBERSHIP
// ============================================================================

/// `oneOf(...candidates)`: absent, or strictly equal to one of the options.
pub const ONE_OF: ConstraintFn = |value, options| {
    if value.is_nil() {
        return true;
    }
    options.iter().any(|candidate| candidate == value)
};

// ============================================================================
// REGISTRATION
// ============================================================================

/// The canonical (name, predicate) table. Names are the wire-level constraint
/// names reported in violations.
pub const BUILTIN_CONSTRAINTS: &[(&str, ConstraintFn)] = &[
    ("required", REQUIRED),
    ("min", MIN),
    ("max", MAX),
    ("positive", POSITIVE),
    ("negative", NEGATIVE),
    ("minLength", MIN_LENGTH),
    ("maxLength", MAX_LENGTH),
    ("length", LENGTH),
    ("match", MATCH),
    ("email", EMAIL),
    ("numeric", NUMERIC),
    ("alphanum", ALPHANUM),
    ("numericSpace", NUMERIC_SPACE),
    ("alphanumSpace", ALPHANUM_SPACE),
    ("oneOf", ONE_OF),
];

/// Registers every built-in constraint into the given registry.
pub fn register_builtin_constraints(registry: &mut ConstraintRegistry) {
    for (name, predicate) in BUILTIN_CONSTRAINTS {
        registry.register_override(name, Constraint::Builtin(*predicate));
    }
}

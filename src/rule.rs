//! # Rule Chains
//!
//! A [`Rule`] is an ordered chain of constraint steps sharing one failure
//! message, built fluently from the entry point:
//!
//! ```rust
//! use proviso::{Validator, Value};
//! let validator = Validator::new();
//! let age = validator.rule("bad age").required().min(18.0);
//! assert!(age.check(&Value::Number(20.0)).is_none());
//! ```
//!
//! Evaluation is order-sensitive with first-failure-wins semantics: steps run
//! in declaration order and the first failing step produces the chain's
//! single [`Violation`]; later steps are never evaluated.
//!
//! There is one typed wrapper per built-in constraint, bound at compile time;
//! [`Rule::apply`] is the dynamic entry that consults the registry and fails
//! fast on unknown names.

use crate::constraints;
use crate::error::Error;
use crate::registry::{Constraint, ConstraintRegistry};
use crate::value::Value;
use regex::Regex;
use serde::Serialize;
use std::fmt;
use std::sync::Arc;
use tracing::trace;

/// A constraint option: either a fixed value or a function of the value under
/// check, resolved at evaluation time (dynamic bounds).
#[derive(Clone)]
pub enum Arg {
    Value(Value),
    Computed(Arc<dyn Fn(&Value) -> Value + Send + Sync>),
}

impl Arg {
    /// A dynamic option: invoked with the value being checked, its result is
    /// substituted before the predicate runs.
    pub fn computed<F>(f: F) -> Self
    where
        F: Fn(&Value) -> Value + Send + Sync + 'static,
    {
        Arg::Computed(Arc::new(f))
    }

    /// Resolves the option against the value under check.
    pub fn resolve(&self, subject: &Value) -> Value {
        match self {
            Arg::Value(v) => v.clone(),
            Arg::Computed(f) => f(subject),
        }
    }
}

impl fmt::Debug for Arg {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Arg::Value(v) => write!(f, "Arg::Value({:?})", v),
            Arg::Computed(_) => write!(f, "Arg::Computed"),
        }
    }
}

impl From<Value> for Arg {
    fn from(v: Value) -> Self {
        Arg::Value(v)
    }
}

impl From<f64> for Arg {
    fn from(n: f64) -> Self {
        Arg::Value(Value::Number(n))
    }
}

impl From<i64> for Arg {
    fn from(n: i64) -> Self {
        Arg::Value(Value::Number(n as f64))
    }
}

impl From<i32> for Arg {
    fn from(n: i32) -> Self {
        Arg::Value(Value::Number(n as f64))
    }
}

impl From<usize> for Arg {
    fn from(n: usize) -> Self {
        Arg::Value(Value::Number(n as f64))
    }
}

impl From<bool> for Arg {
    fn from(b: bool) -> Self {
        Arg::Value(Value::Bool(b))
    }
}

impl From<&str> for Arg {
    fn from(s: &str) -> Self {
        Arg::Value(Value::String(s.to_string()))
    }
}

impl From<String> for Arg {
    fn from(s: String) -> Self {
        Arg::Value(Value::String(s))
    }
}

/// The descriptor of a chain's first failing step.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Violation {
    /// Name of the violated constraint.
    pub check: String,
    /// The chain's failure message.
    pub message: String,
    /// The offending value.
    pub value: Value,
    /// The resolved options the constraint was checked against.
    pub options: Vec<Value>,
}

impl fmt::Display for Violation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.message, self.check)
    }
}

impl std::error::Error for Violation {}

/// One constraint invocation within a chain.
#[derive(Debug, Clone)]
struct Step {
    name: String,
    constraint: Constraint,
    args: Vec<Arg>,
}

/// An ordered, named sequence of constraint invocations attached to one
/// failure message. Immutable once built, apart from the chain-construction
/// append; safe to share and to check concurrently.
#[derive(Debug, Clone)]
pub struct Rule {
    message: String,
    steps: Vec<Step>,
    registry: Arc<ConstraintRegistry>,
}

impl Rule {
    pub(crate) fn new(message: impl Into<String>, registry: Arc<ConstraintRegistry>) -> Self {
        Self {
            message: message.into(),
            steps: Vec::new(),
            registry,
        }
    }

    /// The message reported for any failing step in this chain.
    pub fn message(&self) -> &str {
        &self.message
    }

    fn step(mut self, name: &str, constraint: Constraint, args: Vec<Arg>) -> Self {
        self.steps.push(Step {
            name: name.to_string(),
            constraint,
            args,
        });
        self
    }

    // ------------------------------------------------------------------------
    // Typed wrappers, one per built-in constraint
    // ------------------------------------------------------------------------

    /// The value must be neither absent nor the empty string.
    pub fn required(self) -> Self {
        self.step("required", Constraint::Builtin(constraints::REQUIRED), vec![])
    }

    /// The value must be numerically >= `n`.
    pub fn min(self, n: impl Into<Arg>) -> Self {
        self.step("min", Constraint::Builtin(constraints::MIN), vec![n.into()])
    }

    /// The value must be numerically <= `n`.
    pub fn max(self, n: impl Into<Arg>) -> Self {
        self.step("max", Constraint::Builtin(constraints::MAX), vec![n.into()])
    }

    /// The value must be >= 0.
    pub fn positive(self) -> Self {
        self.step("positive", Constraint::Builtin(constraints::POSITIVE), vec![])
    }

    /// The value must be <= 0.
    pub fn negative(self) -> Self {
        self.step("negative", Constraint::Builtin(constraints::NEGATIVE), vec![])
    }

    /// The value's size must be >= `n`.
    pub fn min_length(self, n: impl Into<Arg>) -> Self {
        self.step(
            "minLength",
            Constraint::Builtin(constraints::MIN_LENGTH),
            vec![n.into()],
        )
    }

    /// The value's size must be <= `n`.
    pub fn max_length(self, n: impl Into<Arg>) -> Self {
        self.step(
            "maxLength",
            Constraint::Builtin(constraints::MAX_LENGTH),
            vec![n.into()],
        )
    }

    /// The value's size must be exactly `n`.
    pub fn length(self, n: impl Into<Arg>) -> Self {
        self.step("length", Constraint::Builtin(constraints::LENGTH), vec![n.into()])
    }

    /// The value must match a precompiled pattern. Compiling the `Regex` at
    /// the call site keeps bad patterns a construction-time failure.
    pub fn matches(self, pattern: Regex) -> Self {
        let shown = Value::String(pattern.as_str().to_string());
        let constraint = Constraint::custom(move |value, _options| {
            constraints::matches_pattern(value, &pattern)
        });
        self.step("match", constraint, vec![Arg::Value(shown)])
    }

    /// The value must match the fixed email pattern.
    pub fn email(self) -> Self {
        self.step("email", Constraint::Builtin(constraints::EMAIL), vec![])
    }

    /// The value must contain digits only.
    pub fn numeric(self) -> Self {
        self.step("numeric", Constraint::Builtin(constraints::NUMERIC), vec![])
    }

    /// The value must contain letters and digits only.
    pub fn alphanum(self) -> Self {
        self.step("alphanum", Constraint::Builtin(constraints::ALPHANUM), vec![])
    }

    /// The value must contain digits and spaces only.
    pub fn numeric_space(self) -> Self {
        self.step(
            "numericSpace",
            Constraint::Builtin(constraints::NUMERIC_SPACE),
            vec![],
        )
    }

    /// The value must contain letters, digits and spaces only.
    pub fn alphanum_space(self) -> Self {
        self.step(
            "alphanumSpace",
            Constraint::Builtin(constraints::ALPHANUM_SPACE),
            vec![],
        )
    }

    /// The value must be strictly equal to one of the candidates.
    pub fn one_of<I, T>(self, candidates: I) -> Self
    where
        I: IntoIterator<Item = T>,
        T: Into<Value>,
    {
        let args = candidates
            .into_iter()
            .map(|c| Arg::Value(c.into()))
            .collect();
        self.step("oneOf", Constraint::Builtin(constraints::ONE_OF), args)
    }

    // ------------------------------------------------------------------------
    // Dynamic entry and evaluation
    // ------------------------------------------------------------------------

    /// Appends a step by registry name. Fails fast with
    /// [`Error::UnknownConstraint`] before any data flows through the chain.
    pub fn apply(self, name: &str, args: Vec<Arg>) -> Result<Self, Error> {
        let constraint = self.registry.lookup(name)?.clone();
        Ok(self.step(name, constraint, args))
    }

    /// Evaluates the chain against a value. Pure and synchronous.
    ///
    /// Steps run in declaration order; computed options are resolved against
    /// the value first, then the predicate is invoked. Returns the first
    /// failing step's descriptor, or `None` when every step passes; at most
    /// one violation per call.
    pub fn check(&self, value: &Value) -> Option<Violation> {
        for step in &self.steps {
            let options: Vec<Value> = step.args.iter().map(|arg| arg.resolve(value)).collect();
            trace!(check = %step.name, "evaluating constraint");
            if !step.constraint.test(value, &options) {
                return Some(Violation {
                    check: step.name.clone(),
                    message: self.message.clone(),
                    value: value.clone(),
                    options,
                });
            }
        }
        None
    }

    /// Asynchronous completion over [`Rule::check`].
    ///
    /// The future is lazy, so the result is never delivered inside the
    /// caller's own call frame; no concurrency is introduced and the work
    /// remains the synchronous check.
    pub async fn validate(&self, value: &Value) -> Result<(), Violation> {
        match self.check(value) {
            Some(violation) => Err(violation),
            None => Ok(()),
        }
    }
}

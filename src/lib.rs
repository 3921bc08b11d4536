//! # Proviso: a declarative validation engine
//!
//! Named constraints composed into ordered rule chains, optionally mapped
//! from object-field paths, evaluated with first-failure-wins semantics per
//! field. Failure is reported as a structured [`ErrorTree`] mirroring the
//! shape of the validated object.
//!
//! ```rust
//! use proviso::{Validator, Value};
//!
//! let validator = Validator::new();
//! let rules = validator
//!     .rule_set()
//!     .field("email", validator.rule("invalid email").required().email())
//!     .field("age", validator.rule("bad age").required().min(18.0));
//!
//! let subject: Value = serde_json::json!({"email": "kim@example.com", "age": 27}).into();
//! assert!(rules.check(&subject).is_none());
//!
//! let subject: Value = serde_json::json!({"email": "not-an-email", "age": 27}).into();
//! let tree = rules.check(&subject).unwrap();
//! assert_eq!(tree.fields()[0].check, "email");
//! ```
//!
//! The asynchronous surface (`Rule::validate`, `RuleSet::validate`) wraps the
//! same synchronous evaluation in a lazy future: completion is never
//! delivered inside the caller's own call frame, and no concurrency is
//! introduced.

pub mod constraints;
pub mod error;
pub mod path;
pub mod registry;
pub mod rule;
pub mod ruleset;
pub mod tree;
pub mod value;

pub use crate::error::Error;
pub use crate::path::{Path, Segment};
pub use crate::registry::{Constraint, ConstraintFn, ConstraintRegistry};
pub use crate::rule::{Arg, Rule, Violation};
pub use crate::ruleset::RuleSet;
pub use crate::tree::{ErrorNode, ErrorTree, FieldError};
pub use crate::value::Value;

use std::sync::Arc;

/// The validation entry point: owns the constraint registry and is the sole
/// public construction surface for [`Rule`]s and [`RuleSet`]s.
///
/// The registry is built once (here, or by the application via
/// [`Validator::with_registry`]) and shared by reference with every chain
/// constructed from it; nothing is mutated after construction, so a
/// `Validator` and everything it builds are safe to use across overlapping
/// validation calls.
#[derive(Debug, Clone)]
pub struct Validator {
    registry: Arc<ConstraintRegistry>,
}

impl Validator {
    /// A validator over the canonical registry with all built-in constraints.
    pub fn new() -> Self {
        Self {
            registry: Arc::new(ConstraintRegistry::with_builtins()),
        }
    }

    /// A validator over an application-provided registry (built-ins plus any
    /// registered extensions).
    pub fn with_registry(registry: ConstraintRegistry) -> Self {
        Self {
            registry: Arc::new(registry),
        }
    }

    /// The registry backing this validator.
    pub fn registry(&self) -> &ConstraintRegistry {
        &self.registry
    }

    /// Starts a rule chain seeded with its failure message.
    pub fn rule(&self, message: impl Into<String>) -> Rule {
        Rule::new(message, Arc::clone(&self.registry))
    }

    /// Starts an empty rule set; declare fields fluently with
    /// [`RuleSet::field`] and [`RuleSet::fields`].
    pub fn rule_set(&self) -> RuleSet {
        RuleSet::new()
    }
}

impl Default for Validator {
    fn default() -> Self {
        Self::new()
    }
}

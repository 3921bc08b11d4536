//! # Configuration Faults
//!
//! Faults raised while *building* rules, never while running them. A failed
//! constraint during validation is a reported outcome ([`crate::Violation`],
//! [`crate::ErrorTree`]), not an error of this kind; it travels through the
//! same completion channel as success. The variants here abort construction
//! immediately so a misconfigured rule is caught before any data flows
//! through it.

use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum Error {
    /// A chain referenced a constraint name absent from the registry.
    #[error("unknown constraint `{name}`")]
    UnknownConstraint { name: String },

    /// `register` would overwrite an existing constraint; overriding requires
    /// the explicit `register_override` opt-in.
    #[error("constraint `{name}` is already registered")]
    DuplicateConstraint { name: String },

    /// A path expression could not be parsed into key/index segments.
    /// Inside a rule set this is absorbed by the flat-key fallback and never
    /// aborts validation.
    #[error("unresolvable path `{expr}`: {reason}")]
    UnresolvablePath { expr: String, reason: String },
}

//! # Constraint Registry
//!
//! A fixed mapping from constraint name to predicate, populated once at
//! construction and inspectable at runtime.
//!
//! Registry Invariant: the registry is a single source of truth. It is
//! constructed once at the application entry point (usually via
//! [`ConstraintRegistry::with_builtins`]), handed to the [`crate::Validator`],
//! and shared by reference with every chain and rule set built from it. It is
//! never mutated during validation; extension happens up front through
//! [`ConstraintRegistry::register`].

use crate::constraints;
use crate::error::Error;
use crate::value::Value;
use std::collections::HashMap;
use std::sync::Arc;

/// Built-in constraint function type: a pure predicate over the value under
/// check and its resolved options. Returns true when the constraint holds.
pub type ConstraintFn = fn(&Value, &[Value]) -> bool;

/// A registered constraint, supporting both calling conventions.
///
/// Built-ins are plain function pointers; custom constraints (and the
/// precompiled-pattern form of `matches`) are closures that may capture
/// configuration. Both must be pure: deterministic, side-effect free, and no
/// retained state between calls.
#[derive(Clone)]
pub enum Constraint {
    Builtin(ConstraintFn),
    Custom(Arc<dyn Fn(&Value, &[Value]) -> bool + Send + Sync>),
}

impl Constraint {
    /// Wraps a capturing predicate as a custom constraint.
    pub fn custom<F>(predicate: F) -> Self
    where
        F: Fn(&Value, &[Value]) -> bool + Send + Sync + 'static,
    {
        Constraint::Custom(Arc::new(predicate))
    }

    /// Runs the predicate.
    pub fn test(&self, value: &Value, options: &[Value]) -> bool {
        match self {
            Constraint::Builtin(f) => f(value, options),
            Constraint::Custom(f) => f(value, options),
        }
    }
}

impl std::fmt::Debug for Constraint {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Constraint::Builtin(_) => write!(f, "Constraint::Builtin"),
            Constraint::Custom(_) => write!(f, "Constraint::Custom"),
        }
    }
}

/// Registry for all constraints, inspectable at runtime.
#[derive(Debug, Default, Clone)]
pub struct ConstraintRegistry {
    constraints: HashMap<String, Constraint>,
}

impl ConstraintRegistry {
    /// An empty registry. Most callers want [`ConstraintRegistry::with_builtins`].
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds the canonical, fully populated registry with every built-in
    /// constraint registered.
    ///
    /// # Example
    /// ```
    /// use proviso::ConstraintRegistry;
    /// let registry = ConstraintRegistry::with_builtins();
    /// assert!(registry.contains("required"));
    /// ```
    pub fn with_builtins() -> Self {
        let mut registry = Self::new();
        constraints::register_builtin_constraints(&mut registry);
        registry
    }

    pub fn get(&self, name: &str) -> Option<&Constraint> {
        self.constraints.get(name)
    }

    /// Like [`ConstraintRegistry::get`], but fails fast with
    /// [`Error::UnknownConstraint`] so misconfigured chains are caught at
    /// construction time.
    pub fn lookup(&self, name: &str) -> Result<&Constraint, Error> {
        self.constraints
            .get(name)
            .ok_or_else(|| Error::UnknownConstraint {
                name: name.to_string(),
            })
    }

    pub fn contains(&self, name: &str) -> bool {
        self.constraints.contains_key(name)
    }

    pub fn list(&self) -> Vec<String> {
        let mut names: Vec<String> = self.constraints.keys().cloned().collect();
        names.sort();
        names
    }

    /// API for extensibility. Rejects overwriting any registered name,
    /// built-in or custom; use [`ConstraintRegistry::register_override`] to
    /// replace explicitly.
    pub fn register(&mut self, name: &str, constraint: Constraint) -> Result<(), Error> {
        if self.constraints.contains_key(name) {
            return Err(Error::DuplicateConstraint {
                name: name.to_string(),
            });
        }
        self.constraints.insert(name.to_string(), constraint);
        Ok(())
    }

    /// Explicit opt-in replacement of an existing constraint.
    pub fn register_override(&mut self, name: &str, constraint: Constraint) {
        self.constraints.insert(name.to_string(), constraint);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builtins_are_all_registered() {
        let registry = ConstraintRegistry::with_builtins();
        for name in [
            "required",
            "min",
            "max",
            "positive",
            "negative",
            "minLength",
            "maxLength",
            "length",
            "match",
            "email",
            "numeric",
            "alphanum",
            "numericSpace",
            "alphanumSpace",
            "oneOf",
        ] {
            assert!(registry.contains(name), "missing builtin `{}`", name);
        }
    }

    #[test]
    fn lookup_fails_for_unknown_names() {
        let registry = ConstraintRegistry::with_builtins();
        assert_eq!(
            registry.lookup("telepathic").unwrap_err(),
            Error::UnknownConstraint {
                name: "telepathic".to_string()
            }
        );
    }

    #[test]
    fn register_rejects_duplicates() {
        let mut registry = ConstraintRegistry::with_builtins();
        let err = registry
            .register("required", Constraint::custom(|_, _| true))
            .unwrap_err();
        assert_eq!(
            err,
            Error::DuplicateConstraint {
                name: "required".to_string()
            }
        );
    }

    #[test]
    fn register_override_replaces() {
        let mut registry = ConstraintRegistry::with_builtins();
        registry.register_override("required", Constraint::custom(|_, _| true));
        let constraint = registry.get("required").unwrap();
        assert!(constraint.test(&Value::Nil, &[]));
    }
}

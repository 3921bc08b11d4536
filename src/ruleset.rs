//! # Rule Sets
//!
//! A [`RuleSet`] maps field-path expressions to one or more rule chains and
//! validates a whole object: each field's value is read through its path,
//! its chains run in order, and the first failing chain records a
//! [`FieldError`] at the field's position in the [`ErrorTree`].
//!
//! Short-circuiting is strictly per field: a failing field stops its own
//! remaining chains but never the evaluation of other fields, so the error
//! tree always describes every failing field.

use crate::path::Path;
use crate::rule::Rule;
use crate::tree::{ErrorTree, FieldError};
use crate::value::Value;
use tracing::debug;

#[derive(Debug, Clone)]
struct FieldRules {
    expr: String,
    // None when the expression did not parse; such fields read as absent and
    // write through the flat-key fallback.
    path: Option<Path>,
    chains: Vec<Rule>,
}

/// A mapping from field-path expression to rule chains, evaluated in
/// declaration order. Constructed once via [`crate::Validator::rule_set`] and
/// reused across many `validate` calls; rules are stateless relative to the
/// data they validate.
#[derive(Debug, Clone, Default)]
pub struct RuleSet {
    fields: Vec<FieldRules>,
}

impl RuleSet {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    /// Declares a field validated by a single chain.
    pub fn field(self, expr: impl Into<String>, rule: Rule) -> Self {
        self.fields(expr, vec![rule])
    }

    /// Declares a field validated by several chains, evaluated in order and
    /// stopped at the first chain that fails.
    pub fn fields(mut self, expr: impl Into<String>, chains: Vec<Rule>) -> Self {
        let expr = expr.into();
        let path = Path::parse(&expr).ok();
        self.fields.push(FieldRules { expr, path, chains });
        self
    }

    /// Number of declared fields.
    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// Evaluates every field against the target object. Pure and synchronous;
    /// the input is never mutated, the only write target is the returned
    /// tree. `None` means the object is valid.
    pub fn check(&self, target: &Value) -> Option<ErrorTree> {
        let mut tree = ErrorTree::new();
        for field in &self.fields {
            let value = field
                .path
                .as_ref()
                .and_then(|path| target.get(path))
                .cloned()
                .unwrap_or(Value::Nil);

            for chain in &field.chains {
                let Some(violation) = chain.check(&value) else {
                    continue;
                };
                debug!(field = %field.expr, check = %violation.check, "field failed validation");
                let error = FieldError {
                    check: violation.check,
                    field: field.expr.clone(),
                    value: violation.value,
                    message: violation.message,
                    options: violation.options,
                };
                match &field.path {
                    Some(path) => tree.insert(path, error),
                    None => tree.insert_flat(field.expr.clone(), error),
                }
                // First failing chain wins; remaining chains for this field
                // are skipped, other fields still run.
                break;
            }
        }

        if tree.is_empty() {
            None
        } else {
            Some(tree)
        }
    }

    /// Asynchronous completion over [`RuleSet::check`], matching
    /// [`Rule::validate`]'s contract.
    pub async fn validate(&self, target: &Value) -> Result<(), ErrorTree> {
        match self.check(target) {
            Some(tree) => Err(tree),
            None => Ok(()),
        }
    }
}

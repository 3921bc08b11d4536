//! # Error Tree
//!
//! The failure payload of object validation: a container mirroring the rule
//! set's field paths, holding one [`FieldError`] per failing field. Nested
//! paths create nested containers, so serializing the tree yields an object
//! shaped like the validated input with field-error leaves at the failing
//! positions.
//!
//! Writes create intermediate containers as needed (maps for key segments,
//! padded lists for index segments), in the same recursive immutable style as
//! reads over [`crate::Value`]. A path that cannot be written structurally,
//! because the expression did not parse or because another failing field
//! already occupies a position on the way, is stored under its raw expression
//! string instead; that fallback never aborts validation and never evicts a
//! recorded error.

use crate::path::{Path, Segment};
use crate::value::Value;
use im::HashMap;
use serde::Serialize;
use std::fmt;

/// The error recorded for one failing field.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FieldError {
    /// Name of the violated constraint.
    pub check: String,
    /// The field's path expression.
    pub field: String,
    /// The offending value, as read from the input.
    pub value: Value,
    /// The failing chain's message.
    pub message: String,
    /// The resolved options the constraint was checked against.
    pub options: Vec<Value>,
}

impl FieldError {
    pub fn new(
        check: impl Into<String>,
        field: impl Into<String>,
        value: Value,
        message: impl Into<String>,
        options: Vec<Value>,
    ) -> Self {
        Self {
            check: check.into(),
            field: field.into(),
            value,
            message: message.into(),
            options,
        }
    }
}

impl fmt::Display for FieldError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {} ({})", self.field, self.message, self.check)
    }
}

/// One node of the error tree.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum ErrorNode {
    Field(FieldError),
    Map(HashMap<String, ErrorNode>),
    /// Indexed container; unoccupied slots serialize as null so positions
    /// line up with the validated list.
    List(Vec<Option<ErrorNode>>),
}

/// A structured description of every field that failed validation.
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
#[serde(transparent)]
pub struct ErrorTree {
    root: HashMap<String, ErrorNode>,
}

impl ErrorTree {
    pub fn new() -> Self {
        Self::default()
    }

    /// Writes a field error at the position its path designates, creating
    /// intermediate containers along the way.
    ///
    /// Paths always begin with a key segment when produced by
    /// [`Path::parse`]; a hand-built path starting with an index cannot be
    /// placed in the root map and falls back to flat storage under the
    /// path's expression form.
    ///
    /// Overlapping paths never evict one another: when a write would have to
    /// pass through or land on an already-recorded error (one failing field
    /// is a path prefix of another), the new error is stored through the flat
    /// fallback instead, so every failing field stays in the tree.
    pub fn insert(&mut self, path: &Path, error: FieldError) {
        let Some(Segment::Key(first)) = path.0.first() else {
            self.insert_flat(path.to_string(), error);
            return;
        };
        let child = self.root.get(first.as_str());
        match set_recursive(child, &path.0[1..], error) {
            Ok(node) => {
                self.root.insert(first.clone(), node);
            }
            Err(error) => {
                let expr = path.to_string();
                // A single-segment path can collide with a container already
                // rooted at the same key. Its leaves keep their own
                // expressions, so they move to flat storage first.
                let displaced: Vec<FieldError> = match self.root.get(expr.as_str()) {
                    Some(node @ (ErrorNode::Map(_) | ErrorNode::List(_))) => {
                        let mut leaves = Vec::new();
                        collect_fields(node, &mut leaves);
                        leaves.into_iter().cloned().collect()
                    }
                    _ => Vec::new(),
                };
                for leaf in displaced {
                    let key = leaf.field.clone();
                    self.root.insert(key, ErrorNode::Field(leaf));
                }
                self.insert_flat(expr, error);
            }
        }
    }

    /// The documented fallback: stores the error under the raw expression
    /// string at the top level, with no structural nesting.
    pub fn insert_flat(&mut self, expr: impl Into<String>, error: FieldError) {
        self.root.insert(expr.into(), ErrorNode::Field(error));
    }

    /// Reads back the field error at a path, symmetric to [`ErrorTree::insert`].
    pub fn get(&self, path: &Path) -> Option<&FieldError> {
        let mut segments = path.0.iter();
        let Some(Segment::Key(first)) = segments.next() else {
            return None;
        };
        let mut current = self.root.get(first.as_str())?;
        for segment in segments {
            current = match (current, segment) {
                (ErrorNode::Map(map), Segment::Key(key)) => map.get(key.as_str())?,
                (ErrorNode::List(slots), Segment::Index(i)) => slots.get(*i)?.as_ref()?,
                _ => return None,
            };
        }
        match current {
            ErrorNode::Field(error) => Some(error),
            _ => None,
        }
    }

    /// Reads back an error stored through the flat-key fallback.
    pub fn get_flat(&self, expr: &str) -> Option<&FieldError> {
        match self.root.get(expr) {
            Some(ErrorNode::Field(error)) => Some(error),
            _ => None,
        }
    }

    /// All recorded field errors, in no particular order.
    pub fn fields(&self) -> Vec<&FieldError> {
        let mut out = Vec::new();
        for node in self.root.values() {
            collect_fields(node, &mut out);
        }
        out
    }

    /// Number of recorded field errors.
    pub fn len(&self) -> usize {
        self.fields().len()
    }

    pub fn is_empty(&self) -> bool {
        self.root.is_empty()
    }
}

impl fmt::Display for ErrorTree {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut errors = self.fields();
        errors.sort_by(|a, b| a.field.cmp(&b.field));
        for (i, error) in errors.iter().enumerate() {
            if i > 0 {
                writeln!(f)?;
            }
            write!(f, "{}", error)?;
        }
        Ok(())
    }
}

impl std::error::Error for ErrorTree {}

// Recursive helper for the immutable structural write. `current` is the
// existing node at this position, if any. A write that would discard an
// already-recorded error (descending through a field leaf, or landing on a
// container holding deeper errors) hands the error back instead of
// overwriting; the caller stores it through the flat fallback.
fn set_recursive(
    current: Option<&ErrorNode>,
    segments: &[Segment],
    error: FieldError,
) -> Result<ErrorNode, FieldError> {
    let Some(segment) = segments.first() else {
        return match current {
            Some(ErrorNode::Map(_)) | Some(ErrorNode::List(_)) => Err(error),
            _ => Ok(ErrorNode::Field(error)),
        };
    };
    match segment {
        Segment::Key(key) => {
            let mut map = match current {
                Some(ErrorNode::Map(m)) => m.clone(),
                None => HashMap::new(),
                Some(_) => return Err(error),
            };
            let child = map.get(key.as_str());
            let new_child = set_recursive(child, &segments[1..], error)?;
            map.insert(key.clone(), new_child);
            Ok(ErrorNode::Map(map))
        }
        Segment::Index(i) => {
            let mut slots = match current {
                Some(ErrorNode::List(s)) => s.clone(),
                None => Vec::new(),
                Some(_) => return Err(error),
            };
            if slots.len() <= *i {
                slots.resize(*i + 1, None);
            }
            let new_child = set_recursive(slots[*i].as_ref(), &segments[1..], error)?;
            slots[*i] = Some(new_child);
            Ok(ErrorNode::List(slots))
        }
    }
}

fn collect_fields<'a>(node: &'a ErrorNode, out: &mut Vec<&'a FieldError>) {
    match node {
        ErrorNode::Field(error) => out.push(error),
        ErrorNode::Map(map) => {
            for child in map.values() {
                collect_fields(child, out);
            }
        }
        ErrorNode::List(slots) => {
            for child in slots.iter().flatten() {
                collect_fields(child, out);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample(field: &str) -> FieldError {
        FieldError::new("required", field, Value::Nil, "missing", vec![])
    }

    #[test]
    fn write_then_read_round_trips() {
        let path = Path::parse("a.b.c").unwrap();
        let mut tree = ErrorTree::new();
        tree.insert(&path, sample("a.b.c"));
        assert_eq!(tree.get(&path), Some(&sample("a.b.c")));
    }

    #[test]
    fn index_writes_pad_with_empty_slots() {
        let path = Path::parse("items[2].name").unwrap();
        let mut tree = ErrorTree::new();
        tree.insert(&path, sample("items[2].name"));
        assert_eq!(tree.get(&path), Some(&sample("items[2].name")));
        // Slots 0 and 1 exist but are unoccupied.
        assert!(tree.get(&Path::parse("items[0].name").unwrap()).is_none());
        assert_eq!(tree.len(), 1);
    }

    #[test]
    fn sibling_writes_share_containers() {
        let mut tree = ErrorTree::new();
        tree.insert(&Path::parse("user.name").unwrap(), sample("user.name"));
        tree.insert(&Path::parse("user.age").unwrap(), sample("user.age"));
        assert_eq!(tree.len(), 2);
        assert!(tree.get(&Path::parse("user.name").unwrap()).is_some());
        assert!(tree.get(&Path::parse("user.age").unwrap()).is_some());
    }

    #[test]
    fn deeper_write_through_a_recorded_error_keeps_both() {
        let mut tree = ErrorTree::new();
        tree.insert(&Path::parse("a").unwrap(), sample("a"));
        tree.insert(&Path::parse("a.b").unwrap(), sample("a.b"));
        assert_eq!(tree.len(), 2);
        assert_eq!(tree.get(&Path::parse("a").unwrap()), Some(&sample("a")));
        // The deeper write could not nest under the leaf and took the
        // flat fallback.
        assert_eq!(tree.get_flat("a.b"), Some(&sample("a.b")));
    }

    #[test]
    fn shallower_write_onto_a_container_keeps_both() {
        let mut tree = ErrorTree::new();
        tree.insert(&Path::parse("a.b").unwrap(), sample("a.b"));
        tree.insert(&Path::parse("a").unwrap(), sample("a"));
        assert_eq!(tree.len(), 2);
        // The field took the structural slot; the displaced deeper error
        // moved to flat storage under its own expression.
        assert_eq!(tree.get_flat("a"), Some(&sample("a")));
        assert_eq!(tree.get_flat("a.b"), Some(&sample("a.b")));
    }

    #[test]
    fn flat_fallback_stores_under_raw_expression() {
        let mut tree = ErrorTree::new();
        tree.insert_flat("items[*].name", sample("items[*].name"));
        assert_eq!(tree.get_flat("items[*].name"), Some(&sample("items[*].name")));
    }

    #[test]
    fn serializes_to_mirrored_shape() {
        let mut tree = ErrorTree::new();
        tree.insert(&Path::parse("address.city").unwrap(), sample("address.city"));
        let json = serde_json::to_value(&tree).unwrap();
        assert_eq!(json["address"]["city"]["check"], "required");
        assert_eq!(json["address"]["city"]["field"], "address.city");
    }
}

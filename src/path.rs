//! # Field Paths
//!
//! A canonical, type-safe representation of a location inside a validated
//! object. Path expressions use dotted keys and bracketed indices
//! (`"address.city"`, `"items[0].name"`) and are parsed once, at rule-set
//! construction, into an explicit segment sequence. Reads and writes are then
//! plain interpretation over the segments; no runtime expression evaluation
//! is involved.

use crate::error::Error;
use serde::{Deserialize, Serialize};
use std::fmt;

/// One step of a path: a map key or a list index.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Segment {
    Key(String),
    Index(usize),
}

/// A parsed path expression.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Path(pub Vec<Segment>);

impl Path {
    /// Parses a dotted/bracketed path expression.
    ///
    /// Fails with [`Error::UnresolvablePath`] for empty expressions, empty
    /// segments (`"a..b"`), unclosed or empty brackets, and non-numeric
    /// indices. Parsing is the only fallible path operation; reads over an
    /// object never fail.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use proviso::{Path, Segment};
    /// let path = Path::parse("items[0].name").unwrap();
    /// assert_eq!(
    ///     path.0,
    ///     vec![
    ///         Segment::Key("items".into()),
    ///         Segment::Index(0),
    ///         Segment::Key("name".into()),
    ///     ]
    /// );
    /// assert!(Path::parse("items[x]").is_err());
    /// ```
    pub fn parse(expr: &str) -> Result<Self, Error> {
        let fail = |reason: &str| Error::UnresolvablePath {
            expr: expr.to_string(),
            reason: reason.to_string(),
        };

        if expr.is_empty() {
            return Err(fail("empty path expression"));
        }

        let mut segments = Vec::new();
        let mut chars = expr.chars().peekable();
        // Each iteration consumes one key, then any number of [index] suffixes,
        // then either '.' or end of input.
        loop {
            let mut key = String::new();
            while let Some(&c) = chars.peek() {
                if c == '.' || c == '[' {
                    break;
                }
                key.push(c);
                chars.next();
            }
            if key.is_empty() {
                return Err(fail("empty key segment"));
            }
            segments.push(Segment::Key(key));

            while chars.peek() == Some(&'[') {
                chars.next();
                let mut digits = String::new();
                loop {
                    match chars.next() {
                        Some(']') => break,
                        Some(c) => digits.push(c),
                        None => return Err(fail("unclosed index bracket")),
                    }
                }
                let index: usize = digits
                    .parse()
                    .map_err(|_| fail("index segment is not a non-negative integer"))?;
                segments.push(Segment::Index(index));
            }

            match chars.next() {
                None => break,
                Some('.') => {
                    if chars.peek().is_none() {
                        return Err(fail("trailing separator"));
                    }
                }
                Some(c) => {
                    return Err(fail(&format!("unexpected character `{}` after index", c)));
                }
            }
        }

        Ok(Path(segments))
    }

    /// Number of segments in the path.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl fmt::Display for Path {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, segment) in self.0.iter().enumerate() {
            match segment {
                Segment::Key(key) => {
                    if i > 0 {
                        write!(f, ".")?;
                    }
                    write!(f, "{}", key)?;
                }
                Segment::Index(index) => write!(f, "[{}]", index)?,
            }
        }
        Ok(())
    }
}

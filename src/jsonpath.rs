//! Path expressions over untyped JSON.
//!
//! A path is a `/`-separated list of segments. Each segment is an optional
//! field token followed by an optional `[N]` index:
//!
//! ```text
//! /query/pages[0]/revisions[0]/*
//! ```
//!
//! A field token selects an object member. An index selects an array
//! element, or, when applied to an object, an *arbitrary* member value. The
//! member is picked at random on every lookup and `N` plays no part in the
//! choice, so only apply an index to objects whose members are
//! interchangeable (such as the single page in a MediaWiki `pages` map).

use std::fmt;
use std::sync::LazyLock;

use rand::seq::IteratorRandom;
use regex::Regex;
use serde_json::Value;

use crate::error::PathError;

/// Grammar of one segment: `field?` then `[digits]?`.
///
/// Only ASCII whitespace (`\t \n \f \r` and space) is excluded from field
/// tokens; keys containing U+3000 or U+00A0 are addressable.
static SEGMENT: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^([^0-9\t\n\f\r \[][^\t\n\f\r \[]*)?(?:\[([0-9]+)\])?$").unwrap()
});

/// The kind of leaf a caller wants out of a lookup.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LeafKind {
    String,
    Number,
}

impl fmt::Display for LeafKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LeafKind::String => f.write_str("string"),
            LeafKind::Number => f.write_str("number"),
        }
    }
}

/// A typed value taken from the end of a path.
#[derive(Debug, Clone, PartialEq)]
pub enum Leaf {
    String(String),
    Number(f64),
}

impl Leaf {
    fn from_value(value: &Value, want: LeafKind) -> Result<Self, PathError> {
        match (want, value) {
            (LeafKind::String, Value::String(s)) => Ok(Leaf::String(s.clone())),
            (LeafKind::Number, Value::Number(n)) => n
                .as_f64()
                .map(Leaf::Number)
                .ok_or_else(|| PathError::TypeMismatch {
                    expected: want,
                    found: "number",
                }),
            _ => Err(PathError::TypeMismatch {
                expected: want,
                found: kind_name(value),
            }),
        }
    }

    pub fn into_string(self) -> Option<String> {
        match self {
            Leaf::String(s) => Some(s),
            Leaf::Number(_) => None,
        }
    }

    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Leaf::Number(n) => Some(*n),
            Leaf::String(_) => None,
        }
    }
}

fn kind_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

/// One step of a path.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Segment {
    pub field: Option<String>,
    pub index: Option<usize>,
}

impl Segment {
    fn parse(raw: &str) -> Result<Self, PathError> {
        let caps = SEGMENT
            .captures(raw)
            .ok_or_else(|| PathError::InvalidPath(raw.to_string()))?;

        let field = caps.get(1).map(|m| m.as_str().to_string());
        let index = match caps.get(2) {
            Some(m) => Some(
                m.as_str()
                    .parse::<usize>()
                    .map_err(|_| PathError::InvalidPath(format!("[{}]", m.as_str())))?,
            ),
            None => None,
        };

        Ok(Self { field, index })
    }

    fn is_empty(&self) -> bool {
        self.field.is_none() && self.index.is_none()
    }
}

impl fmt::Display for Segment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let Some(field) = &self.field {
            f.write_str(field)?;
        }
        if let Some(index) = self.index {
            write!(f, "[{index}]")?;
        }
        Ok(())
    }
}

/// A parsed path expression.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PathExpr {
    segments: Vec<Segment>,
}

impl PathExpr {
    /// Parse a path expression.
    ///
    /// A single leading `/` is allowed and navigates nowhere; every other
    /// segment must carry a field token, an index, or both.
    pub fn parse(path: &str) -> Result<Self, PathError> {
        if path.is_empty() {
            return Err(PathError::InvalidPath("empty path".to_string()));
        }

        let mut segments = Vec::new();
        for (i, raw) in path.split('/').enumerate() {
            let segment = Segment::parse(raw)?;
            if segment.is_empty() {
                if i == 0 {
                    continue;
                }
                return Err(PathError::InvalidPath(format!("empty segment in {path:?}")));
            }
            segments.push(segment);
        }

        Ok(Self { segments })
    }

    pub fn segments(&self) -> &[Segment] {
        &self.segments
    }

    /// Walk `root` and return the value the path lands on.
    pub fn lookup<'a>(&self, root: &'a Value) -> Result<&'a Value, PathError> {
        let mut current = root;

        for segment in &self.segments {
            if let Some(field) = &segment.field {
                current = current
                    .as_object()
                    .and_then(|map| map.get(field))
                    .ok_or_else(|| PathError::InvalidPath(field.clone()))?;
            }

            if let Some(index) = segment.index {
                current = match current {
                    Value::Array(items) => items
                        .get(index)
                        .ok_or_else(|| PathError::InvalidPath(format!("[{index}]")))?,
                    Value::Object(map) => map
                        .values()
                        .choose(&mut rand::thread_rng())
                        .ok_or_else(|| PathError::InvalidPath(format!("[{index}] on empty object")))?,
                    _ => return Err(PathError::InvalidPath(format!("[{index}]"))),
                };
            }
        }

        Ok(current)
    }

    /// Walk `root` and convert the landing value to `want`.
    pub fn resolve(&self, root: &Value, want: LeafKind) -> Result<Leaf, PathError> {
        Leaf::from_value(self.lookup(root)?, want)
    }
}

impl fmt::Display for PathExpr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for segment in &self.segments {
            write!(f, "/{segment}")?;
        }
        Ok(())
    }
}

/// Parse `path` and return the value it lands on in `value`.
pub fn lookup<'a>(value: &'a Value, path: &str) -> Result<&'a Value, PathError> {
    PathExpr::parse(path)?.lookup(value)
}

/// Parse `path` and resolve it against `value` in one go.
pub fn resolve(value: &Value, path: &str, want: LeafKind) -> Result<Leaf, PathError> {
    PathExpr::parse(path)?.resolve(value, want)
}

/// Resolve a string leaf.
pub fn resolve_str(value: &Value, path: &str) -> Result<String, PathError> {
    resolve(value, path, LeafKind::String)?
        .into_string()
        .ok_or(PathError::TypeMismatch {
            expected: LeafKind::String,
            found: "number",
        })
}

/// Resolve a numeric leaf.
pub fn resolve_f64(value: &Value, path: &str) -> Result<f64, PathError> {
    resolve(value, path, LeafKind::Number)?
        .as_f64()
        .ok_or(PathError::TypeMismatch {
            expected: LeafKind::Number,
            found: "string",
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn article() -> Value {
        json!({
            "query": {
                "pages": {
                    "3324": {
                        "pageid": 3324,
                        "title": "東京都",
                        "revisions": [{ "*": "'''東京都'''（とうきょうと）は..." }]
                    }
                }
            }
        })
    }

    fn assert_invalid(value: &Value, path: &str) {
        let result = resolve(value, path, LeafKind::String);
        assert!(
            matches!(result, Err(PathError::InvalidPath(_))),
            "{path:?} should be invalid, got {result:?}"
        );
    }

    #[test]
    fn resolves_article_title_and_content() {
        let v = article();
        assert_eq!(resolve_str(&v, "/query/pages[0]/title").unwrap(), "東京都");
        assert_eq!(
            resolve_str(&v, "/query/pages[0]/revisions[0]/*").unwrap(),
            "'''東京都'''（とうきょうと）は..."
        );
    }

    #[test]
    fn leading_slash_is_optional() {
        let v = article();
        assert_eq!(
            resolve_str(&v, "query/pages[0]/title").unwrap(),
            resolve_str(&v, "/query/pages[0]/title").unwrap()
        );
    }

    #[test]
    fn resolves_numbers() {
        let v = article();
        assert_eq!(resolve_f64(&v, "/query/pages[0]/pageid").unwrap(), 3324.0);
        assert_eq!(resolve_f64(&json!({"x": [1.5, -2]}), "x[1]").unwrap(), -2.0);
    }

    #[test]
    fn index_only_segment_applies_to_current_value() {
        let v = json!([10, 20, 30]);
        assert_eq!(resolve_f64(&v, "[1]").unwrap(), 20.0);
        assert_eq!(resolve_f64(&json!({"a": [[1, 2], [3, 4]]}), "a[1]/[0]").unwrap(), 3.0);
    }

    #[test]
    fn empty_path_is_invalid() {
        assert_invalid(&article(), "");
    }

    #[test]
    fn malformed_segments_are_invalid() {
        let v = json!({"a": {"b": [1]}});
        for path in ["a/1b", "a/[x]", "a/b c", "a/b[1]c", "a/[1][2]", "a//b", "/", "a/b[-1]"] {
            assert_invalid(&v, path);
        }
    }

    #[test]
    fn array_index_bounds() {
        let v = json!({"a": [1, 2, 3]});
        assert_eq!(resolve_f64(&v, "/a[0]").unwrap(), 1.0);
        assert_eq!(resolve_f64(&v, "/a[2]").unwrap(), 3.0);
        assert!(matches!(
            resolve(&v, "/a[3]", LeafKind::Number),
            Err(PathError::InvalidPath(_))
        ));
        assert!(matches!(
            resolve(&v, "/a[99999999999999999999999]", LeafKind::Number),
            Err(PathError::InvalidPath(_))
        ));
    }

    #[test]
    fn field_cannot_descend_into_array() {
        assert_invalid(&json!({"a": [1, 2, 3]}), "/a/b[1]");
    }

    #[test]
    fn missing_key_is_invalid() {
        assert_invalid(&article(), "/query/missing");
        assert_invalid(&json!("scalar"), "/field");
    }

    #[test]
    fn index_on_object_picks_some_member() {
        let v = json!({"m": {"x": 1, "y": 2}});
        for _ in 0..16 {
            let n = resolve_f64(&v, "/m[7]").unwrap();
            assert!(n == 1.0 || n == 2.0);
        }
        assert_invalid(&json!({"m": {}}), "/m[0]");
    }

    #[test]
    fn index_on_scalar_is_invalid() {
        assert_invalid(&json!({"a": true}), "/a[0]");
    }

    #[test]
    fn wrong_leaf_kind_is_type_mismatch() {
        let v = json!({"flag": true, "n": 3, "s": "x"});
        assert_eq!(
            resolve(&v, "/flag", LeafKind::String),
            Err(PathError::TypeMismatch {
                expected: LeafKind::String,
                found: "boolean"
            })
        );
        assert_eq!(
            resolve(&v, "/n", LeafKind::String),
            Err(PathError::TypeMismatch {
                expected: LeafKind::String,
                found: "number"
            })
        );
        assert!(matches!(
            resolve(&v, "/s", LeafKind::Number),
            Err(PathError::TypeMismatch { .. })
        ));
    }

    #[test]
    fn only_ascii_whitespace_ends_a_field() {
        let v = json!({"a\u{3000}b": "x", "c\u{00a0}d": "y", "e\u{000b}f": "z"});
        assert_eq!(resolve_str(&v, "/a\u{3000}b").unwrap(), "x");
        assert_eq!(resolve_str(&v, "/c\u{00a0}d").unwrap(), "y");
        assert_eq!(resolve_str(&v, "e\u{000b}f").unwrap(), "z");
        for path in ["/a b", "/a\tb", "/a\rb", "/a\u{000c}b"] {
            assert_invalid(&v, path);
        }
    }

    #[test]
    fn lookup_returns_intermediate_value() {
        let v = article();
        let page = lookup(&v, "/query/pages[0]").unwrap();
        assert_eq!(resolve_str(page, "title").unwrap(), "東京都");
        assert_eq!(resolve_f64(page, "pageid").unwrap(), 3324.0);
    }

    #[test]
    fn parsed_path_displays_canonically() {
        let expr = PathExpr::parse("query/pages[0]/revisions[0]/*").unwrap();
        assert_eq!(expr.segments().len(), 4);
        assert_eq!(expr.to_string(), "/query/pages[0]/revisions[0]/*");
    }
}

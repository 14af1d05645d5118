//! Path patterns and the segment matcher.
//!
//! A pattern is a `/`-delimited list of segments. A segment starting with `:`
//! is a placeholder that captures the corresponding path segment; every other
//! segment must equal the path segment exactly (case-sensitive). Paths and
//! patterns with a different number of segments never match, so optional and
//! variadic segments are not expressible.

use crate::{error::RouteError, params::Params, query::decode_component};
use std::{fmt, str::FromStr};

/// One segment of a [`Pattern`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Segment {
    /// Must equal the path segment.
    Literal(String),
    /// Captures the path segment under this name.
    Param(String),
}

impl Segment {
    fn parse(raw: &str) -> Self {
        match raw.strip_prefix(':') {
            Some(name) => Segment::Param(name.to_string()),
            None => Segment::Literal(raw.to_string()),
        }
    }
}

/// A parsed route pattern such as `/items/:id`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Pattern {
    source: String,
    segments: Vec<Segment>,
}

impl Pattern {
    /// Parses a pattern. The only rejected input is the empty string.
    pub fn parse(source: &str) -> Result<Self, RouteError> {
        if source.is_empty() {
            return Err(RouteError::EmptyPattern);
        }
        Ok(Self {
            source: source.to_string(),
            segments: source.split('/').map(Segment::parse).collect(),
        })
    }

    /// The pattern as registered.
    pub fn as_str(&self) -> &str {
        &self.source
    }

    /// The parsed segments.
    pub fn segments(&self) -> &[Segment] {
        &self.segments
    }

    /// Names of the placeholders, in order.
    pub fn param_names(&self) -> impl Iterator<Item = &str> {
        self.segments.iter().filter_map(|segment| match segment {
            Segment::Param(name) => Some(name.as_str()),
            Segment::Literal(_) => None,
        })
    }

    /// Matches a concrete path (no query component) against this pattern.
    ///
    /// Returns `None` on a segment count or literal mismatch. Placeholder
    /// values are percent-decoded; a malformed escape keeps the raw segment.
    pub fn matches(&self, path: &str) -> Option<Params> {
        let parts: Vec<&str> = path.split('/').collect();
        if parts.len() != self.segments.len() {
            return None;
        }

        let mut params = Params::new();
        for (segment, part) in self.segments.iter().zip(parts) {
            match segment {
                Segment::Param(name) => params.bind(name, decode_segment(part)),
                Segment::Literal(literal) if literal != part => return None,
                Segment::Literal(_) => {}
            }
        }
        Some(params)
    }

    /// Returns true if every path matched by `self` is also matched by
    /// `earlier`, i.e. `self` can never win when registered after it.
    pub fn is_shadowed_by(&self, earlier: &Pattern) -> bool {
        self.segments.len() == earlier.segments.len()
            && self
                .segments
                .iter()
                .zip(&earlier.segments)
                .all(|pair| match pair {
                    (_, Segment::Param(_)) => true,
                    (Segment::Literal(a), Segment::Literal(b)) => a == b,
                    (Segment::Param(_), Segment::Literal(_)) => false,
                })
    }
}

fn decode_segment(raw: &str) -> String {
    match decode_component(raw) {
        Ok(decoded) => decoded.into_owned(),
        Err(error) => {
            tracing::debug!(segment = raw, %error, "path segment kept raw");
            raw.to_string()
        }
    }
}

impl FromStr for Pattern {
    type Err = RouteError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Pattern::parse(s)
    }
}

impl fmt::Display for Pattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.source)
    }
}

/// Matches `path` against the pattern string `pattern`.
///
/// Equivalent to parsing the pattern and calling [`Pattern::matches`]; an
/// empty pattern matches nothing.
pub fn match_path(path: &str, pattern: &str) -> Option<Params> {
    Pattern::parse(pattern).ok()?.matches(path)
}

//! Splitting a raw address fragment into path and query.

/// A raw fragment split at its first `?`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Fragment<'a> {
    /// Everything before the first `?`, without the leading `#`.
    pub path: &'a str,
    /// Everything after the first `?`, if present.
    pub query: Option<&'a str>,
}

impl<'a> Fragment<'a> {
    /// Parses `#/items/7?tab=reviews` style input. The `#` is optional.
    pub fn parse(raw: &'a str) -> Self {
        let raw = raw.strip_prefix('#').unwrap_or(raw);
        match raw.split_once('?') {
            Some((path, query)) => Self {
                path,
                query: Some(query),
            },
            None => Self { path: raw, query: None },
        }
    }

    /// Returns the path, or `default` when the path is empty.
    pub fn path_or(&self, default: &'a str) -> &'a str {
        if self.path.is_empty() {
            default
        } else {
            self.path
        }
    }
}

/// Joins a path and an optional query string into a fragment (without `#`).
pub fn join_fragment(path: &str, query: &str) -> String {
    if query.is_empty() {
        path.to_string()
    } else {
        format!("{path}?{query}")
    }
}

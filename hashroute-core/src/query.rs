//! Query-string parsing and percent-encoding helpers.
//!
//! Parsing is lossy by contract: a component that cannot be decoded keeps its
//! raw text and the rest of the query is still parsed.

use crate::error::DecodeError;
use std::{borrow::Cow, fmt};

/// Percent-decodes a single component.
///
/// Every `%` must be followed by two hexadecimal digits and the decoded bytes
/// must form valid UTF-8. `+` is left untouched; see [`decode_form_component`].
pub fn decode_component(raw: &str) -> Result<Cow<'_, str>, DecodeError> {
    let bytes = raw.as_bytes();
    let mut cursor = 0;
    while let Some(pos) = bytes[cursor..].iter().position(|&b| b == b'%') {
        let offset = cursor + pos;
        let valid = bytes
            .get(offset + 1..offset + 3)
            .is_some_and(|hex| hex.iter().all(u8::is_ascii_hexdigit));
        if !valid {
            return Err(DecodeError::InvalidEscape { offset });
        }
        cursor = offset + 3;
    }
    urlencoding::decode(raw).map_err(|_| DecodeError::InvalidUtf8)
}

/// Decodes a query component, treating `+` as a space.
pub fn decode_form_component(raw: &str) -> Result<String, DecodeError> {
    if raw.contains('+') {
        let spaced = raw.replace('+', " ");
        decode_component(&spaced).map(Cow::into_owned)
    } else {
        decode_component(raw).map(Cow::into_owned)
    }
}

/// Percent-encodes a component for use in a fragment path or query.
pub fn encode_component(raw: &str) -> Cow<'_, str> {
    urlencoding::encode(raw)
}

/// Parses a query string into a [`Query`].
///
/// Shorthand for [`Query::parse`].
pub fn parse_query(raw: &str) -> Query {
    Query::parse(raw)
}

/// Decoded query parameters.
///
/// Keys are unique. Inserting an existing key replaces its value but keeps
/// the position of the first occurrence, so serialisation order is stable.
/// Equality compares the mappings and ignores order.
#[derive(Debug, Clone, Default)]
pub struct Query {
    pairs: Vec<(String, String)>,
}

impl Query {
    /// Creates an empty query.
    pub fn new() -> Self {
        Self::default()
    }

    /// Parses `a=1&b=2` style input. A leading `?` is ignored.
    ///
    /// Empty pieces are skipped, a piece without `=` maps to an empty value and
    /// the last occurrence of a repeated key wins. Keys and values that fail to
    /// decode are kept verbatim and logged.
    pub fn parse(raw: &str) -> Self {
        let raw = raw.strip_prefix('?').unwrap_or(raw);
        let mut query = Self::new();
        for piece in raw.split('&').filter(|piece| !piece.is_empty()) {
            let (key, value) = piece.split_once('=').unwrap_or((piece, ""));
            query.insert(decode_lossy(key), decode_lossy(value));
        }
        query
    }

    /// Returns the value for `key`.
    pub fn get(&self, key: &str) -> Option<&str> {
        self.pairs
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }

    /// Returns true if `key` is present.
    pub fn contains_key(&self, key: &str) -> bool {
        self.get(key).is_some()
    }

    /// Inserts a pair, replacing the value of an existing key in place.
    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<String>) {
        let key = key.into();
        let value = value.into();
        match self.pairs.iter_mut().find(|(k, _)| *k == key) {
            Some(slot) => slot.1 = value,
            None => self.pairs.push((key, value)),
        }
    }

    /// Removes `key`, returning its value.
    pub fn remove(&mut self, key: &str) -> Option<String> {
        let index = self.pairs.iter().position(|(k, _)| k == key)?;
        Some(self.pairs.remove(index).1)
    }

    /// Drops every pair whose value is empty.
    pub fn retain_non_empty(&mut self) {
        self.pairs.retain(|(_, v)| !v.is_empty());
    }

    /// Number of keys.
    pub fn len(&self) -> usize {
        self.pairs.len()
    }

    /// Returns true if there are no keys.
    pub fn is_empty(&self) -> bool {
        self.pairs.is_empty()
    }

    /// Iterates over the pairs in first-seen order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.pairs.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    /// Serialises the pairs as `k=v&k=v` with encoded components.
    pub fn to_query_string(&self) -> String {
        self.pairs
            .iter()
            .map(|(k, v)| format!("{}={}", encode_component(k), encode_component(v)))
            .collect::<Vec<_>>()
            .join("&")
    }
}

fn decode_lossy(raw: &str) -> String {
    match decode_form_component(raw) {
        Ok(decoded) => decoded,
        Err(error) => {
            tracing::warn!(component = raw, %error, "malformed query component kept raw");
            raw.to_string()
        }
    }
}

impl PartialEq for Query {
    fn eq(&self, other: &Self) -> bool {
        self.len() == other.len() && self.iter().all(|(k, v)| other.get(k) == Some(v))
    }
}

impl Eq for Query {}

impl fmt::Display for Query {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_query_string())
    }
}

impl<K, V> FromIterator<(K, V)> for Query
where
    K: Into<String>,
    V: Into<String>,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut query = Self::new();
        for (k, v) in iter {
            query.insert(k, v);
        }
        query
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_basic_pairs() {
        let query = Query::parse("a=1&b=2");
        assert_eq!(query.get("a"), Some("1"));
        assert_eq!(query.get("b"), Some("2"));
        assert_eq!(query.len(), 2);
    }

    #[test]
    fn test_last_occurrence_wins() {
        let query = Query::parse("tab=info&tab=reviews");
        assert_eq!(query.get("tab"), Some("reviews"));
        assert_eq!(query.len(), 1);
    }

    #[test]
    fn test_decodes_keys_and_values() {
        let query = Query::parse("q=red%20shoes&sort%5Bby%5D=price&name=a+b");
        assert_eq!(query.get("q"), Some("red shoes"));
        assert_eq!(query.get("sort[by]"), Some("price"));
        assert_eq!(query.get("name"), Some("a b"));
    }

    #[test]
    fn test_missing_value_and_empty_pieces() {
        let query = Query::parse("&flag&&x=");
        assert_eq!(query.get("flag"), Some(""));
        assert_eq!(query.get("x"), Some(""));
        assert_eq!(query.len(), 2);
    }

    #[test]
    fn test_value_keeps_extra_equals() {
        let query = Query::parse("expr=a=b");
        assert_eq!(query.get("expr"), Some("a=b"));
    }

    #[test]
    fn test_malformed_component_kept_raw() {
        let query = Query::parse("bad=%zz&ok=%41&trunc=50%");
        assert_eq!(query.get("bad"), Some("%zz"));
        assert_eq!(query.get("ok"), Some("A"));
        assert_eq!(query.get("trunc"), Some("50%"));
    }

    #[test]
    fn test_invalid_utf8_kept_raw() {
        let query = Query::parse("v=%FF%FE");
        assert_eq!(query.get("v"), Some("%FF%FE"));
    }

    #[test]
    fn test_decode_component_errors() {
        assert_eq!(
            decode_component("ab%2"),
            Err(DecodeError::InvalidEscape { offset: 2 })
        );
        assert_eq!(decode_component("%C3%28"), Err(DecodeError::InvalidUtf8));
        assert_eq!(decode_component("caf%C3%A9").unwrap(), "café");
        assert_eq!(decode_component("a+b").unwrap(), "a+b");
    }

    #[test]
    fn test_reparse_is_stable() {
        let first = Query::parse("a=1&b=hello%20world&c=x%26y");
        let second = Query::parse(&first.to_query_string());
        assert_eq!(first, second);
        assert_eq!(second.get("c"), Some("x&y"));
    }

    #[test]
    fn test_leading_question_mark_ignored() {
        assert_eq!(Query::parse("?a=1").get("a"), Some("1"));
    }

    #[test]
    fn test_equality_ignores_order() {
        let a: Query = [("x", "1"), ("y", "2")].into_iter().collect();
        let b: Query = [("y", "2"), ("x", "1")].into_iter().collect();
        assert_eq!(a, b);
    }

    #[test]
    fn test_insert_keeps_position() {
        let mut query: Query = [("a", "1"), ("b", "2")].into_iter().collect();
        query.insert("a", "3");
        assert_eq!(query.to_query_string(), "a=3&b=2");
        assert_eq!(query.remove("a"), Some("3".to_string()));
        assert_eq!(query.to_string(), "b=2");
    }
}

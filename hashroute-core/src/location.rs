//! # Location & Navigation
//!
//! [`Location`] abstracts the host's address fragment (a browser's
//! `location.hash`, a terminal history stack, a test double). Writing to it is
//! how navigation happens: the host turns the change into a
//! [`NavigationEvent`](crate::NavigationEvent) that the router consumes on a
//! later turn.
//!
//! [`Navigator`] is the handle handlers receive for programmatic navigation.

use crate::{
    fragment::{Fragment, join_fragment},
    query::Query,
};
use std::sync::Arc;

/// The host's address fragment.
#[diagnostic::on_unimplemented(
    message = "`{Self}` is not a `Location`",
    label = "missing `Location` implementation",
    note = "Implement `fragment`, `assign`, `replace` and `back` for the host."
)]
pub trait Location: Send + Sync + 'static {
    /// The current fragment, with or without the leading `#`.
    fn fragment(&self) -> String;

    /// Navigates to `fragment`, adding a history entry.
    fn assign(&self, fragment: &str);

    /// Navigates to `fragment`, replacing the current history entry.
    fn replace(&self, fragment: &str);

    /// Steps back in history. Returns false if there is nothing to go back to.
    fn back(&self) -> bool;
}

impl<T: Location + ?Sized> Location for Arc<T> {
    fn fragment(&self) -> String {
        (**self).fragment()
    }

    fn assign(&self, fragment: &str) {
        (**self).assign(fragment)
    }

    fn replace(&self, fragment: &str) {
        (**self).replace(fragment)
    }

    fn back(&self) -> bool {
        (**self).back()
    }
}

/// Programmatic navigation over a shared [`Location`].
#[derive(Clone)]
pub struct Navigator {
    location: Arc<dyn Location>,
}

impl Navigator {
    /// Creates a navigator writing to `location`.
    pub fn new(location: Arc<dyn Location>) -> Self {
        Self { location }
    }

    /// The underlying location.
    pub fn location(&self) -> &Arc<dyn Location> {
        &self.location
    }

    /// Navigates to `path` with the given query pairs.
    ///
    /// Pairs with an empty value are dropped; keys and values are encoded.
    pub fn navigate<K, V>(&self, path: &str, query: impl IntoIterator<Item = (K, V)>)
    where
        K: Into<String>,
        V: Into<String>,
    {
        self.location.assign(&build_fragment(path, query));
    }

    /// Navigates to `path`, adding a history entry.
    pub fn push(&self, path: &str) {
        self.location.assign(path);
    }

    /// Replaces the current entry with `path`.
    pub fn redirect(&self, path: &str) {
        self.location.replace(path);
    }

    /// Rewrites the query of the current fragment, keeping its path.
    ///
    /// With `merge` the pairs are applied over the current query, otherwise
    /// they replace it. Pairs left with an empty value are removed, which is
    /// how a key is cleared. The current history entry is replaced.
    pub fn update_query<K, V>(&self, pairs: impl IntoIterator<Item = (K, V)>, merge: bool)
    where
        K: Into<String>,
        V: Into<String>,
    {
        let current = self.location.fragment();
        let fragment = Fragment::parse(&current);
        let mut query = match (merge, fragment.query) {
            (true, Some(raw)) => Query::parse(raw),
            _ => Query::new(),
        };
        for (k, v) in pairs {
            query.insert(k, v);
        }
        query.retain_non_empty();
        self.location
            .replace(&join_fragment(fragment.path, &query.to_query_string()));
    }

    /// Steps back in history.
    pub fn back(&self) -> bool {
        self.location.back()
    }

    /// The path part of the current fragment.
    pub fn current_path(&self) -> String {
        let current = self.location.fragment();
        Fragment::parse(&current).path.to_string()
    }
}

impl std::fmt::Debug for Navigator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Navigator")
            .field("fragment", &self.location.fragment())
            .finish()
    }
}

/// Builds `path?k=v&...` from query pairs, skipping empty values.
pub fn build_fragment<K, V>(path: &str, query: impl IntoIterator<Item = (K, V)>) -> String
where
    K: Into<String>,
    V: Into<String>,
{
    let mut pairs: Query = query.into_iter().collect();
    pairs.retain_non_empty();
    join_fragment(path, &pairs.to_query_string())
}

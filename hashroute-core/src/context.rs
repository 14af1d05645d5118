//! # Route Context
//!
//! Everything a handler receives for one navigation: the captured path
//! parameters, the decoded query, the render target, a navigator and the
//! navigation's [`Generation`]. Collaborators are passed in explicitly; a
//! handler never looks up a global mount point or location.

use crate::{
    location::Navigator,
    params::Params,
    query::Query,
    render::{SharedTarget, View},
};
use std::sync::{
    Arc,
    atomic::{AtomicU64, Ordering},
};

/// Identifies one navigation among all navigations of a router.
///
/// Handlers that start deferred work can keep the generation and check
/// [`is_current`](Generation::is_current) before rendering, so that a slow
/// response for an earlier navigation does not overwrite a newer view.
#[derive(Debug, Clone)]
pub struct Generation {
    counter: Arc<AtomicU64>,
    value: u64,
}

impl Generation {
    /// The numeric value of this generation.
    pub fn value(&self) -> u64 {
        self.value
    }

    /// Returns false once a later navigation has started.
    pub fn is_current(&self) -> bool {
        self.counter.load(Ordering::Acquire) == self.value
    }
}

/// Monotonic source of [`Generation`]s, owned by a dispatcher.
#[derive(Debug, Default)]
pub struct GenerationCounter {
    counter: Arc<AtomicU64>,
}

impl GenerationCounter {
    /// Creates a counter starting at zero.
    pub fn new() -> Self {
        Self::default()
    }

    /// Starts a new generation, invalidating every earlier one.
    pub fn advance(&self) -> Generation {
        let value = self.counter.fetch_add(1, Ordering::AcqRel) + 1;
        Generation {
            counter: self.counter.clone(),
            value,
        }
    }

    /// The most recent generation value.
    pub fn current(&self) -> u64 {
        self.counter.load(Ordering::Acquire)
    }
}

/// The input of a route handler.
#[derive(Clone)]
pub struct RouteContext {
    path: String,
    params: Params,
    query: Query,
    target: SharedTarget,
    navigator: Navigator,
    generation: Generation,
}

impl RouteContext {
    /// Assembles a context. Called by the dispatcher.
    pub fn new(
        path: impl Into<String>,
        params: Params,
        query: Query,
        target: SharedTarget,
        navigator: Navigator,
        generation: Generation,
    ) -> Self {
        Self {
            path: path.into(),
            params,
            query,
            target,
            navigator,
            generation,
        }
    }

    /// The resolved path, without query.
    pub fn path(&self) -> &str {
        &self.path
    }

    /// Captured path parameters.
    pub fn params(&self) -> &Params {
        &self.params
    }

    /// Shorthand for `params().get(name)`.
    pub fn param(&self, name: &str) -> Option<&str> {
        self.params.get(name)
    }

    /// Decoded query parameters.
    pub fn query(&self) -> &Query {
        &self.query
    }

    /// The mount point.
    pub fn target(&self) -> &SharedTarget {
        &self.target
    }

    /// Renders `view` into the mount point.
    pub fn render(&self, view: View) {
        self.target.render(view);
    }

    /// Programmatic navigation.
    pub fn navigator(&self) -> &Navigator {
        &self.navigator
    }

    /// This navigation's generation.
    pub fn generation(&self) -> &Generation {
        &self.generation
    }
}

impl std::fmt::Debug for RouteContext {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RouteContext")
            .field("path", &self.path)
            .field("params", &self.params)
            .field("query", &self.query)
            .field("target", &self.target.id())
            .field("generation", &self.generation.value)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_generation_invalidated_by_advance() {
        let counter = GenerationCounter::new();
        let first = counter.advance();
        assert!(first.is_current());
        assert_eq!(first.value(), 1);

        let second = counter.advance();
        assert!(!first.is_current());
        assert!(second.is_current());
        assert_eq!(counter.current(), 2);
    }
}

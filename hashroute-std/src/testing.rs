//! Testing utilities for hashroute.
//!
//! This module provides handlers that make routing behaviour observable in
//! tests.
//!
//! # Features
//!
//! - [`RecordingHandler`]: records the params and query of every invocation
//! - [`CountingHandler`]: counts invocations
//! - [`FailingHandler`]: always returns an error

use hashroute_core::{BoxError, Handler, Params, Query, RouteContext, View};
use std::sync::{
    Arc, Mutex,
    atomic::{AtomicUsize, Ordering},
};

// ============================================================================
// Recording Handler
// ============================================================================

/// One recorded handler invocation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Invocation {
    /// The resolved path.
    pub path: String,
    /// Captured path parameters.
    pub params: Params,
    /// Decoded query.
    pub query: Query,
}

/// A handler that records every context it receives.
///
/// Clones share the same record, so one clone can be registered while the
/// test inspects another.
///
/// # Example
///
/// ```rust,ignore
/// let detail = RecordingHandler::named("detail");
/// let table = RouteTable::new().route("/items/:id", detail.clone())?;
///
/// // dispatch...
///
/// assert_eq!(detail.last().unwrap().params.get("id"), Some("7"));
/// ```
#[derive(Clone, Default)]
pub struct RecordingHandler {
    name: Option<&'static str>,
    invocations: Arc<Mutex<Vec<Invocation>>>,
}

impl RecordingHandler {
    /// Creates a recording handler that renders nothing.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a recording handler that renders `name` as text when invoked.
    pub fn named(name: &'static str) -> Self {
        Self {
            name: Some(name),
            invocations: Arc::default(),
        }
    }

    /// All recorded invocations.
    pub fn invocations(&self) -> Vec<Invocation> {
        self.invocations.lock().unwrap().clone()
    }

    /// The most recent invocation.
    pub fn last(&self) -> Option<Invocation> {
        self.invocations.lock().unwrap().last().cloned()
    }

    /// Number of invocations.
    pub fn count(&self) -> usize {
        self.invocations.lock().unwrap().len()
    }

    /// Clears the record.
    pub fn clear(&self) {
        self.invocations.lock().unwrap().clear();
    }
}

impl Handler for RecordingHandler {
    type Output = ();

    fn call(&self, ctx: RouteContext) {
        self.invocations.lock().unwrap().push(Invocation {
            path: ctx.path().to_string(),
            params: ctx.params().clone(),
            query: ctx.query().clone(),
        });
        if let Some(name) = self.name {
            ctx.render(View::text(name));
        }
    }
}

// ============================================================================
// Counting Handler
// ============================================================================

/// A handler that counts invocations.
#[derive(Clone, Default)]
pub struct CountingHandler {
    count: Arc<AtomicUsize>,
}

impl CountingHandler {
    /// Create a new counting handler.
    pub fn new() -> Self {
        Self::default()
    }

    /// Get the current count.
    pub fn count(&self) -> usize {
        self.count.load(Ordering::SeqCst)
    }

    /// Reset the counter.
    pub fn reset(&self) {
        self.count.store(0, Ordering::SeqCst);
    }
}

impl Handler for CountingHandler {
    type Output = ();

    fn call(&self, _ctx: RouteContext) {
        self.count.fetch_add(1, Ordering::SeqCst);
    }
}

// ============================================================================
// Failing Handler
// ============================================================================

/// A handler that always fails with the given message.
#[derive(Clone)]
pub struct FailingHandler {
    message: &'static str,
}

impl FailingHandler {
    /// Create a handler failing with `message`.
    pub fn new(message: &'static str) -> Self {
        Self { message }
    }
}

impl Handler for FailingHandler {
    type Output = Result<(), BoxError>;

    fn call(&self, _ctx: RouteContext) -> Self::Output {
        Err(self.message.into())
    }
}

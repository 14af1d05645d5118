//! # Dispatcher
//!
//! Resolves navigation events against a [`RouteTable`] and invokes the
//! matching handler. This is the only stateful component: it moves from
//! [`DispatchState::Idle`] to [`DispatchState::Resolving`] for the duration of
//! one event and back.
//!
//! # Resolution
//!
//! 1. An empty fragment path resolves as the configured default path.
//! 2. The fragment is split into path and query at the first `?`.
//! 3. Routes are tried in registration order; the first match wins.
//! 4. The query is decoded (malformed components are kept raw).
//! 5. The handler runs with a [`RouteContext`]. Without a match the
//!    [`NotFoundPolicy`] applies.
//!
//! Neither a miss nor a failing handler is surfaced as an error: a miss is a
//! [`Resolution`], and a handler that returns `Err` or panics is caught here,
//! logged and rendered as [`View::Error`]. A panic from the render target or
//! the location is caught and logged as well; the dispatcher is idle again
//! afterwards.
//!
//! # Re-entrancy
//!
//! A handler that calls [`Dispatcher::dispatch`] synchronously does not
//! resolve recursively; the event is queued and resolved once the current one
//! completes.

use crate::config::{NotFoundPolicy, RouterConfig};
use hashroute_core::{
    Fragment, Generation, GenerationCounter, Handler, HandlerError, Location, NavigationEvent,
    NavigationKind, Navigator, Params, Query, RouteContext, RouteTable, SharedHandler,
    SharedTarget, View,
};
use std::{
    any::Any,
    collections::VecDeque,
    panic::{self, AssertUnwindSafe},
    sync::{
        Arc, Mutex, MutexGuard,
        atomic::{AtomicBool, Ordering},
    },
};

/// Observable dispatcher state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DispatchState {
    /// Waiting for a navigation.
    Idle,
    /// Processing one navigation.
    Resolving,
}

/// The outcome of one navigation.
#[derive(Debug)]
pub enum Resolution {
    /// A route matched and its handler completed.
    Matched {
        /// The pattern of the matched route.
        pattern: String,
        /// The resolved path.
        path: String,
    },
    /// No route matched and the fragment was replaced with the default path.
    Redirected {
        /// The unmatched path.
        from: String,
        /// The redirect target.
        to: String,
    },
    /// No route matched and the not-found state was rendered.
    NotFound {
        /// The unmatched path.
        path: String,
    },
    /// A handler failed, or the render target or location panicked.
    Failed {
        /// The resolved path.
        path: String,
        /// What went wrong.
        error: HandlerError,
    },
    /// The dispatcher was already resolving; the event was queued.
    Deferred,
}

impl Resolution {
    /// Returns true if a route matched and its handler succeeded.
    pub fn is_matched(&self) -> bool {
        matches!(self, Resolution::Matched { .. })
    }

    /// The pattern of the matched route, if any.
    pub fn pattern(&self) -> Option<&str> {
        match self {
            Resolution::Matched { pattern, .. } => Some(pattern),
            _ => None,
        }
    }
}

/// The most recently matched route.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CurrentRoute {
    /// Pattern of the matched route.
    pub pattern: String,
    /// Title of the matched route, if it has one.
    pub title: Option<String>,
    /// The resolved path.
    pub path: String,
    /// Captured parameters.
    pub params: Params,
    /// Decoded query.
    pub query: Query,
}

/// Resolves navigation events to route handlers.
pub struct Dispatcher {
    table: RouteTable,
    config: RouterConfig,
    target: SharedTarget,
    navigator: Navigator,
    not_found: Option<SharedHandler>,
    generations: GenerationCounter,
    resolving: AtomicBool,
    pending: Mutex<VecDeque<NavigationEvent>>,
    current: Mutex<Option<CurrentRoute>>,
}

impl Dispatcher {
    /// Creates a dispatcher over `table` with the default configuration.
    pub fn new(table: RouteTable, location: Arc<dyn Location>, target: SharedTarget) -> Self {
        Self {
            table,
            config: RouterConfig::default(),
            target,
            navigator: Navigator::new(location),
            not_found: None,
            generations: GenerationCounter::new(),
            resolving: AtomicBool::new(false),
            pending: Mutex::new(VecDeque::new()),
            current: Mutex::new(None),
        }
    }

    /// Replaces the configuration.
    pub fn with_config(mut self, config: RouterConfig) -> Self {
        self.config = config;
        self
    }

    /// Sets the handler used by [`NotFoundPolicy::Render`].
    ///
    /// Without one, [`View::NotFound`] is rendered on the target.
    pub fn with_not_found<H: Handler>(mut self, handler: H) -> Self {
        self.not_found = Some(Arc::new(handler));
        self
    }

    /// The configuration.
    pub fn config(&self) -> &RouterConfig {
        &self.config
    }

    /// The route table.
    pub fn table(&self) -> &RouteTable {
        &self.table
    }

    /// The navigator handlers receive.
    pub fn navigator(&self) -> &Navigator {
        &self.navigator
    }

    /// The current state.
    pub fn state(&self) -> DispatchState {
        if self.resolving.load(Ordering::Acquire) {
            DispatchState::Resolving
        } else {
            DispatchState::Idle
        }
    }

    /// The most recently matched route, cleared by a miss.
    pub fn current_route(&self) -> Option<CurrentRoute> {
        lock(&self.current).clone()
    }

    /// Value of the latest navigation generation.
    pub fn generation(&self) -> u64 {
        self.generations.current()
    }

    /// Resolves the location's current fragment as a page load.
    pub fn load(&self) -> Resolution {
        let fragment = self.navigator.location().fragment();
        self.dispatch(NavigationEvent::load(fragment))
    }

    /// Resolves whatever fragment the location currently holds.
    pub fn resolve_current(&self) -> Resolution {
        let fragment = self.navigator.location().fragment();
        self.dispatch(NavigationEvent::hash_change(fragment))
    }

    /// Re-resolves the location's current fragment.
    pub fn refresh(&self) -> Resolution {
        let fragment = self.navigator.location().fragment();
        self.dispatch(NavigationEvent::new(fragment, NavigationKind::Refresh))
    }

    /// Resolves one navigation event.
    ///
    /// Events dispatched while another is resolving return
    /// [`Resolution::Deferred`] and are resolved, in order, by whichever caller
    /// holds the dispatcher.
    pub fn dispatch(&self, event: NavigationEvent) -> Resolution {
        if !self.acquire() {
            tracing::debug!(fragment = %event.fragment, "navigation queued behind current resolution");
            lock(&self.pending).push_back(event);
            // the owner may have released after our failed acquire
            self.run_pending();
            return Resolution::Deferred;
        }

        let resolution = {
            let _release = Release(&self.resolving);
            let resolution = self.resolve(&event);
            self.drain();
            resolution
        };
        self.run_pending();
        resolution
    }

    fn acquire(&self) -> bool {
        self.resolving
            .compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .is_ok()
    }

    /// Resolves events queued after the last drain, unless another caller
    /// holds the dispatcher.
    fn run_pending(&self) {
        while !lock(&self.pending).is_empty() && self.acquire() {
            let _release = Release(&self.resolving);
            self.drain();
        }
    }

    fn drain(&self) {
        loop {
            let next = lock(&self.pending).pop_front();
            let Some(next) = next else { break };
            self.resolve(&next);
        }
    }

    fn resolve(&self, event: &NavigationEvent) -> Resolution {
        let generation = self.generations.advance();
        let fragment = Fragment::parse(&event.fragment);
        let path = fragment.path_or(&self.config.default_path);

        let span = tracing::info_span!(
            "navigation",
            kind = ?event.kind,
            path,
            generation = generation.value()
        );
        let _enter = span.enter();

        // Handler panics are caught in `invoke`; this catches the render
        // target and the location.
        let outcome = panic::catch_unwind(AssertUnwindSafe(|| {
            self.route(path, fragment.query, generation)
        }));
        outcome.unwrap_or_else(|payload| {
            let error = HandlerError::Panicked(panic_message(payload.as_ref()));
            tracing::error!(%error, "navigation aborted");
            Resolution::Failed {
                path: path.to_string(),
                error,
            }
        })
    }

    fn route(&self, path: &str, query: Option<&str>, generation: Generation) -> Resolution {
        let query = query.map(Query::parse).unwrap_or_default();

        let Some((route, params)) = self.table.find(path) else {
            *lock(&self.current) = None;
            return self.not_found(path, generation);
        };

        let pattern = route.pattern().as_str().to_string();
        tracing::debug!(%pattern, "route matched");
        *lock(&self.current) = Some(CurrentRoute {
            pattern: pattern.clone(),
            title: route.title().map(str::to_string),
            path: path.to_string(),
            params: params.clone(),
            query: query.clone(),
        });

        let ctx = self.context(path, params, query, generation);
        match invoke(route.handler(), ctx) {
            Ok(()) => Resolution::Matched {
                pattern,
                path: path.to_string(),
            },
            Err(error) => self.fail(path, error),
        }
    }

    fn not_found(&self, path: &str, generation: Generation) -> Resolution {
        let default_path = self.config.default_path.as_str();
        if self.config.not_found_policy == NotFoundPolicy::Redirect {
            if path != default_path {
                tracing::debug!(to = default_path, "no route matched, redirecting");
                self.navigator.redirect(default_path);
                return Resolution::Redirected {
                    from: path.to_string(),
                    to: default_path.to_string(),
                };
            }
            tracing::warn!("default path matches no route, rendering not found instead");
        }

        tracing::debug!("no route matched, rendering not found");
        let Some(handler) = &self.not_found else {
            self.target.render(View::NotFound {
                path: path.to_string(),
            });
            return Resolution::NotFound {
                path: path.to_string(),
            };
        };

        let ctx = self.context(path, Params::new(), Query::new(), generation);
        match invoke(handler, ctx) {
            Ok(()) => Resolution::NotFound {
                path: path.to_string(),
            },
            Err(error) => self.fail(path, error),
        }
    }

    fn context(
        &self,
        path: &str,
        params: Params,
        query: Query,
        generation: Generation,
    ) -> RouteContext {
        RouteContext::new(
            path,
            params,
            query,
            self.target.clone(),
            self.navigator.clone(),
            generation,
        )
    }

    fn fail(&self, path: &str, error: HandlerError) -> Resolution {
        tracing::error!(%error, "route handler failed");
        self.target.render(View::Error {
            message: error.to_string(),
        });
        Resolution::Failed {
            path: path.to_string(),
            error,
        }
    }
}

impl std::fmt::Debug for Dispatcher {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Dispatcher")
            .field("table", &self.table)
            .field("config", &self.config)
            .field("target", &self.target.id())
            .field("state", &self.state())
            .finish_non_exhaustive()
    }
}

/// Runs a handler, turning both `Err` and panics into [`HandlerError`].
fn invoke(handler: &SharedHandler, ctx: RouteContext) -> Result<(), HandlerError> {
    match panic::catch_unwind(AssertUnwindSafe(|| handler.call_dyn(ctx))) {
        Ok(outcome) => outcome.map_err(HandlerError::Failed),
        Err(payload) => Err(HandlerError::Panicked(panic_message(payload.as_ref()))),
    }
}

fn panic_message(payload: &(dyn Any + Send)) -> String {
    if let Some(message) = payload.downcast_ref::<&str>() {
        message.to_string()
    } else if let Some(message) = payload.downcast_ref::<String>() {
        message.clone()
    } else {
        "handler panicked".to_string()
    }
}

/// Clears the resolving flag when dropped, including during unwinding.
struct Release<'a>(&'a AtomicBool);

impl Drop for Release<'_> {
    fn drop(&mut self) {
        self.0.store(false, Ordering::Release);
    }
}

// A handler panic never happens while one of these locks is held.
fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
}

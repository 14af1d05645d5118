//! # Route Table
//!
//! An ordered registry of patterns bound to handlers. Precedence is
//! registration order: the first registered pattern that matches a path wins,
//! regardless of how specific later patterns are. Register specific routes
//! (`/items/new`) before general ones (`/items/:id`).
//!
//! Patterns are never de-duplicated or overwritten. Registering a pattern that
//! an earlier one already covers is allowed but logged as a warning, since the
//! new route can never be selected.

use crate::{
    error::RouteError,
    handler::{Handler, SharedHandler},
    params::Params,
    pattern::Pattern,
};
use std::{fmt, sync::Arc};

/// A pattern bound to a handler. Immutable once registered.
#[derive(Clone)]
pub struct Route {
    pattern: Pattern,
    handler: SharedHandler,
    title: Option<String>,
}

impl Route {
    /// Parses `pattern` and binds it to `handler`.
    pub fn new<H: Handler>(pattern: &str, handler: H) -> Result<Self, RouteError> {
        Ok(Self {
            pattern: Pattern::parse(pattern)?,
            handler: Arc::new(handler),
            title: None,
        })
    }

    /// Attaches a display title, e.g. for the document title.
    pub fn titled(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    /// The parsed pattern.
    pub fn pattern(&self) -> &Pattern {
        &self.pattern
    }

    /// The bound handler.
    pub fn handler(&self) -> &SharedHandler {
        &self.handler
    }

    /// The display title, if one was attached.
    pub fn title(&self) -> Option<&str> {
        self.title.as_deref()
    }
}

impl fmt::Debug for Route {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Route")
            .field("pattern", &self.pattern.as_str())
            .field("title", &self.title)
            .finish_non_exhaustive()
    }
}

/// Ordered collection of [`Route`]s.
#[derive(Clone, Debug, Default)]
pub struct RouteTable {
    routes: Vec<Route>,
}

impl RouteTable {
    /// Creates an empty table.
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a route. Fails only on an empty pattern.
    pub fn register<H: Handler>(&mut self, pattern: &str, handler: H) -> Result<(), RouteError> {
        self.push(Route::new(pattern, handler)?);
        Ok(())
    }

    /// Builder-style [`register`](Self::register).
    pub fn route<H: Handler>(mut self, pattern: &str, handler: H) -> Result<Self, RouteError> {
        self.register(pattern, handler)?;
        Ok(self)
    }

    /// Appends an already constructed route.
    pub fn push(&mut self, route: Route) {
        if let Some(earlier) = self
            .routes
            .iter()
            .find(|earlier| route.pattern.is_shadowed_by(&earlier.pattern))
        {
            tracing::warn!(
                pattern = %route.pattern,
                shadowed_by = %earlier.pattern,
                "route can never match; an earlier route covers every path it accepts"
            );
        }
        self.routes.push(route);
    }

    /// Iterates over the routes in registration order.
    pub fn all(&self) -> impl Iterator<Item = &Route> + '_ {
        self.routes.iter()
    }

    /// Finds the first route matching `path` and its parameters.
    pub fn find(&self, path: &str) -> Option<(&Route, Params)> {
        self.routes
            .iter()
            .find_map(|route| route.pattern.matches(path).map(|params| (route, params)))
    }

    /// Number of registered routes.
    pub fn len(&self) -> usize {
        self.routes.len()
    }

    /// Returns true if no route is registered.
    pub fn is_empty(&self) -> bool {
        self.routes.is_empty()
    }
}

/// Builds a [`RouteTable`] from `pattern => handler` pairs, in order.
///
/// Evaluates to `Result<RouteTable, RouteError>`.
///
/// # Example
///
/// ```rust,ignore
/// let table = route_table! {
///     "/items" => list_items,
///     "/items/:id" => item_detail,
/// }?;
/// ```
#[macro_export]
macro_rules! route_table {
    ($($pattern:expr => $handler:expr),* $(,)?) => {
        (|| -> ::core::result::Result<$crate::RouteTable, $crate::RouteError> {
            let mut table = $crate::RouteTable::new();
            $( table.register($pattern, $handler)?; )*
            ::core::result::Result::Ok(table)
        })()
    };
}

//! # hashroute - Fragment Router
//!
//! `hashroute` resolves address fragments such as `#/items/7?tab=reviews` to
//! handlers. Routes are tried in registration order and the first match
//! wins; `:name` segments capture path parameters and the query is decoded into
//! a key/value map.
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use hashroute::prelude::*;
//!
//! let table = route_table! {
//!     "/items" => |ctx: RouteContext| ctx.render(View::text("all items")),
//!     "/items/:id" => |ctx: RouteContext| {
//!         let id = ctx.param("id").unwrap_or_default();
//!         ctx.render(View::text(format!("item {id}")));
//!     },
//! }?;
//!
//! let (location, events) = MemoryLocation::new("");
//! let mount = Arc::new(MemoryMount::new("app"));
//! let dispatcher = Dispatcher::new(table, location.clone(), mount)
//!     .with_config(RouterConfig::new().default_path("/items"));
//!
//! let mut router = HashRouter::new(dispatcher, events);
//! location.load();
//! router.run_until_stalled();
//! ```
//!
//! Register specific routes before general ones: with `/items/:id` registered
//! first, `/items/new` resolves to it with `id = "new"`.

#![deny(clippy::wildcard_imports)]
#![warn(missing_docs)]

pub use hashroute_core::{
    // Errors
    BoxError,
    DecodeError,
    // Handler boundary
    DynHandler,
    // Fragment & query
    Fragment,
    Generation,
    GenerationCounter,
    Handler,
    HandlerError,
    IntoOutcome,
    Location,
    // Navigation
    NavigationEvent,
    NavigationKind,
    Navigator,
    // Matching
    Params,
    Pattern,
    Query,
    RenderTarget,
    // Route table
    Route,
    RouteContext,
    RouteError,
    RouteTable,
    Segment,
    SharedHandler,
    SharedTarget,
    View,
    build_fragment,
    decode_component,
    decode_form_component,
    encode_component,
    join_fragment,
    match_path,
    parse_query,
    route_table,
};

pub use hashroute_std::{
    config::{NotFoundPolicy, RouterConfig},
    dispatcher::{CurrentRoute, DispatchState, Dispatcher, Resolution},
    event_loop::{HashRouter, NavigationEvents, NavigationSender, navigation_channel},
};

/// In-memory host implementations.
pub mod memory {
    pub use hashroute_std::memory::{MemoryLocation, MemoryMount};
}

/// Testing utilities.
pub mod testing {
    #![allow(clippy::wildcard_imports)]
    pub use hashroute_std::testing::*;
}

/// Prelude module - common imports for hashroute.
///
/// # Usage
///
/// ```rust,ignore
/// use hashroute::prelude::*;
/// ```
pub mod prelude {
    pub use crate::{
        Dispatcher, Handler, HashRouter, Location, NavigationEvent, NotFoundPolicy, Params,
        Query, RenderTarget, Resolution, RouteContext, RouteTable, RouterConfig, View,
        memory::{MemoryLocation, MemoryMount},
        route_table,
    };
    pub use std::sync::Arc;
}

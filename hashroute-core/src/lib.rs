//! # hashroute-core
//!
//! Core types and traits for the hashroute fragment router.
//!
//! This crate has no runtime and no host bindings. It is what a host
//! integration or a handler library depends on; the dispatcher and event loop
//! live in `hashroute-std`.
//!
//! # Components
//!
//! ## Route Table ([`RouteTable`])
//!
//! An ordered list of [`Route`]s. Precedence is registration order:
//! first match wins, not best match.
//!
//! ## Matcher ([`Pattern`], [`match_path`])
//!
//! Splits a path and a pattern on `/`, binds `:name` placeholders and rejects
//! on literal mismatch or differing segment counts. A miss is `None`, never an
//! error.
//!
//! ## Fragment & Query ([`Fragment`], [`Query`])
//!
//! Pure parsing of `#/path?query` into its parts. Malformed percent-escapes in
//! a query component keep the raw text instead of failing the navigation.
//!
//! ## Handler Boundary ([`Handler`], [`RouteContext`], [`RenderTarget`], [`Location`])
//!
//! Handlers receive params, query, the render target and a [`Navigator`]
//! explicitly through the context.
//!
//! # Error Types
//!
//! - [`RouteError`] - Registration errors
//! - [`DecodeError`] - Percent-decoding errors
//! - [`HandlerError`] - Handler failures

#![deny(clippy::wildcard_imports)]
#![warn(missing_docs)]

mod context;
mod error;
mod fragment;
mod handler;
mod location;
mod navigation;
mod params;
mod pattern;
mod query;
mod render;
mod route;

// Re-exports
pub use context::{Generation, GenerationCounter, RouteContext};
pub use error::{BoxError, DecodeError, HandlerError, RouteError};
pub use fragment::{Fragment, join_fragment};
pub use handler::{DynHandler, Handler, IntoOutcome, SharedHandler};
pub use location::{Location, Navigator, build_fragment};
pub use navigation::{NavigationEvent, NavigationKind};
pub use params::Params;
pub use pattern::{Pattern, Segment, match_path};
pub use query::{Query, decode_component, decode_form_component, encode_component, parse_query};
pub use render::{RenderTarget, SharedTarget, View};
pub use route::{Route, RouteTable};

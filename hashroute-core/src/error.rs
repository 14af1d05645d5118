//! Error types for hashroute.
//!
//! This module provides a structured error hierarchy using `thiserror`:
//!
//! - [`RouteError`] - Errors while registering routes
//! - [`DecodeError`] - Percent-decoding failures
//! - [`HandlerError`] - Failures raised by route handlers
//!
//! A path that matches no route is not an error; the dispatcher reports it as
//! a normal resolution.

use thiserror::Error;

/// A boxed error type for dynamic error handling.
pub type BoxError = Box<dyn std::error::Error + Send + Sync + 'static>;

/// Errors that can occur while registering a route.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RouteError {
    /// The pattern string was empty.
    #[error("route pattern must not be empty")]
    EmptyPattern,
}

/// Errors that can occur while percent-decoding a component.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DecodeError {
    /// A `%` was not followed by two hexadecimal digits.
    #[error("invalid percent escape at byte {offset}")]
    InvalidEscape {
        /// Byte offset of the offending `%`.
        offset: usize,
    },

    /// The decoded bytes are not valid UTF-8.
    #[error("decoded bytes are not valid UTF-8")]
    InvalidUtf8,
}

/// Errors raised by route handlers.
#[derive(Error, Debug)]
pub enum HandlerError {
    /// The handler returned an error.
    #[error("handler failed: {0}")]
    Failed(#[source] BoxError),

    /// The handler panicked.
    #[error("handler panicked: {0}")]
    Panicked(String),
}

impl From<BoxError> for HandlerError {
    fn from(err: BoxError) -> Self {
        HandlerError::Failed(err)
    }
}

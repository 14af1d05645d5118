//! # Route Handlers
//!
//! The terminal point of a navigation. A handler receives a
//! [`RouteContext`] and renders into the target it carries. Handlers run
//! synchronously; any asynchronous work they start (a fetch, a timer) is
//! theirs to drive and is not awaited by the dispatcher.
//!
//! # Usage Patterns
//!
//! 1. **Direct closure**: `|ctx: RouteContext| ctx.render(View::text("hi"))`
//! 2. **Fallible closure**: `|ctx: RouteContext| -> Result<(), MyError> { ... }`
//! 3. **Struct implementation**: `impl Handler for ItemDetail`

use crate::{context::RouteContext, error::BoxError};
use std::sync::Arc;

/// Conversion of a handler's return value into success or failure.
///
/// # Default Implementations
///
/// - `()` → success
/// - `Result<T, E>` → delegates to `T`, or fails with `E`
#[diagnostic::on_unimplemented(
    message = "`{Self}` is not an `IntoOutcome`",
    label = "handlers must return `()` or `Result<(), E>`",
    note = "Implement `IntoOutcome` to return custom types from handlers."
)]
pub trait IntoOutcome {
    /// Converts the value into the handler outcome.
    fn into_outcome(self) -> Result<(), BoxError>;
}

impl IntoOutcome for () {
    fn into_outcome(self) -> Result<(), BoxError> {
        Ok(())
    }
}

impl<T, E> IntoOutcome for Result<T, E>
where
    T: IntoOutcome,
    E: Into<BoxError>,
{
    fn into_outcome(self) -> Result<(), BoxError> {
        match self {
            Ok(t) => t.into_outcome(),
            Err(e) => Err(e.into()),
        }
    }
}

/// A function bound to a route.
#[diagnostic::on_unimplemented(
    message = "`{Self}` cannot handle a route",
    label = "missing `Handler` implementation",
    note = "Handlers are `Fn(RouteContext)` closures or types implementing `Handler`."
)]
pub trait Handler: Send + Sync + 'static {
    /// The return type, usually `()` or `Result<(), E>`.
    type Output: IntoOutcome;

    /// Handles one navigation.
    fn call(&self, ctx: RouteContext) -> Self::Output;
}

// Blanket impl for closures
impl<F, Out> Handler for F
where
    F: Fn(RouteContext) -> Out + Send + Sync + 'static,
    Out: IntoOutcome,
{
    type Output = Out;

    fn call(&self, ctx: RouteContext) -> Self::Output {
        (self)(ctx)
    }
}

/// Object-safe version of [`Handler`] for storage in a route table.
pub trait DynHandler: Send + Sync + 'static {
    /// Handles one navigation and reports its outcome.
    fn call_dyn(&self, ctx: RouteContext) -> Result<(), BoxError>;
}

impl<H: Handler> DynHandler for H {
    fn call_dyn(&self, ctx: RouteContext) -> Result<(), BoxError> {
        self.call(ctx).into_outcome()
    }
}

/// Shared, type-erased handler.
pub type SharedHandler = Arc<dyn DynHandler>;

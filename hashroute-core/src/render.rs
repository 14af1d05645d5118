//! # Render Target
//!
//! The mount point handlers write into. The router never inspects what is
//! rendered; it only passes the target along and, for not-found and failure
//! states, hands it a [`View`] describing that state.
//!
//! Targets are shared as `Arc<dyn RenderTarget>` and take `&self`, so a
//! handler can keep a clone for work that completes later. Nothing serialises
//! such late renders against newer navigations; see
//! [`Generation`](crate::Generation).

use std::{fmt, sync::Arc};

/// Content written to a [`RenderTarget`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum View {
    /// Markup produced by a handler.
    Markup(String),
    /// Plain text produced by a handler.
    Text(String),
    /// No route matched `path`.
    NotFound {
        /// The unmatched path.
        path: String,
    },
    /// A handler failed while resolving a navigation.
    Error {
        /// Human-readable description of the failure.
        message: String,
    },
}

impl View {
    /// Creates a markup view.
    pub fn markup(markup: impl Into<String>) -> Self {
        View::Markup(markup.into())
    }

    /// Creates a text view.
    pub fn text(text: impl Into<String>) -> Self {
        View::Text(text.into())
    }
}

impl fmt::Display for View {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            View::Markup(markup) => f.write_str(markup),
            View::Text(text) => f.write_str(text),
            View::NotFound { path } => write!(f, "Not found: {path}"),
            View::Error { message } => write!(f, "Something went wrong: {message}"),
        }
    }
}

/// A single mount point identified by a stable id.
#[diagnostic::on_unimplemented(
    message = "`{Self}` is not a `RenderTarget`",
    label = "missing `RenderTarget` implementation",
    note = "Render targets must implement `id` and `render`."
)]
pub trait RenderTarget: Send + Sync + 'static {
    /// Stable identifier of the mount point.
    fn id(&self) -> &str;

    /// Replaces the content of the mount point.
    fn render(&self, view: View);
}

impl<T: RenderTarget + ?Sized> RenderTarget for Arc<T> {
    fn id(&self) -> &str {
        (**self).id()
    }

    fn render(&self, view: View) {
        (**self).render(view)
    }
}

/// Shared handle to a render target.
pub type SharedTarget = Arc<dyn RenderTarget>;

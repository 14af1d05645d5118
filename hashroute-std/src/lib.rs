//! # hashroute-std
//!
//! Standard implementations for the hashroute fragment router.
//!
//! This crate provides:
//! - **Dispatching**: [`Dispatcher`], [`Resolution`], [`DispatchState`]
//! - **Configuration**: [`RouterConfig`], [`NotFoundPolicy`]
//! - **Event loop**: [`HashRouter`], [`navigation_channel`]
//! - **In-memory host**: [`MemoryLocation`], [`MemoryMount`]
//! - **Testing**: recording and counting handlers
//!
//! [`Dispatcher`]: dispatcher::Dispatcher
//! [`Resolution`]: dispatcher::Resolution
//! [`DispatchState`]: dispatcher::DispatchState
//! [`RouterConfig`]: config::RouterConfig
//! [`NotFoundPolicy`]: config::NotFoundPolicy
//! [`HashRouter`]: event_loop::HashRouter
//! [`navigation_channel`]: event_loop::navigation_channel
//! [`MemoryLocation`]: memory::MemoryLocation
//! [`MemoryMount`]: memory::MemoryMount

#![deny(clippy::wildcard_imports)]
#![warn(missing_docs)]

// Re-export core traits
pub use hashroute_core;

// Modules
pub mod config;
pub mod dispatcher;
pub mod event_loop;
pub mod memory;
pub mod testing;

#![allow(dead_code)]

use hashroute::{
    Dispatcher, NavigationEvents, NotFoundPolicy, RouteTable, RouterConfig,
    memory::{MemoryLocation, MemoryMount},
    testing::RecordingHandler,
};
use std::sync::Arc;

// ============================================================================
// Catalogue Fixture
// ============================================================================

/// The catalogue app used across the scenario tests: a list page and a detail
/// page, with `/items` as the default path.
pub struct Catalogue {
    pub location: Arc<MemoryLocation>,
    pub events: NavigationEvents,
    pub mount: Arc<MemoryMount>,
    pub list: RecordingHandler,
    pub detail: RecordingHandler,
}

impl Catalogue {
    pub fn new(initial: &str) -> Self {
        let (location, events) = MemoryLocation::new(initial);
        Self {
            location,
            events,
            mount: Arc::new(MemoryMount::new("app")),
            list: RecordingHandler::named("list"),
            detail: RecordingHandler::named("detail"),
        }
    }

    pub fn table(&self) -> RouteTable {
        RouteTable::new()
            .route("/items", self.list.clone())
            .unwrap()
            .route("/items/:id", self.detail.clone())
            .unwrap()
    }

    pub fn config(policy: NotFoundPolicy) -> RouterConfig {
        RouterConfig::new()
            .default_path("/items")
            .not_found_policy(policy)
    }

    pub fn dispatcher(&self, policy: NotFoundPolicy) -> Dispatcher {
        Dispatcher::new(self.table(), self.location.clone(), self.mount.clone())
            .with_config(Self::config(policy))
    }
}

//! In-memory host: a [`Location`] with history and a recording [`RenderTarget`].
//!
//! Mirrors browser behaviour closely enough for tests and headless hosts:
//! writing the fragment it already holds emits nothing, and every real change
//! emits one event on the navigation channel.

use crate::event_loop::{NavigationEvents, NavigationSender, navigation_channel};
use hashroute_core::{Location, NavigationEvent, NavigationKind, RenderTarget, View};
use std::sync::{Arc, Mutex, MutexGuard};

#[derive(Debug)]
struct History {
    entries: Vec<String>,
    index: usize,
}

impl History {
    fn current(&self) -> &str {
        &self.entries[self.index]
    }
}

/// A [`Location`] backed by an in-memory history stack.
#[derive(Debug)]
pub struct MemoryLocation {
    history: Mutex<History>,
    sender: NavigationSender,
}

impl MemoryLocation {
    /// Creates a location at `initial` and the event stream it feeds.
    pub fn new(initial: &str) -> (Arc<Self>, NavigationEvents) {
        let (sender, events) = navigation_channel();
        (Arc::new(Self::with_sender(initial, sender)), events)
    }

    /// Creates a location feeding an existing channel.
    pub fn with_sender(initial: &str, sender: NavigationSender) -> Self {
        Self {
            history: Mutex::new(History {
                entries: vec![normalize(initial).to_string()],
                index: 0,
            }),
            sender,
        }
    }

    /// Emits a [`NavigationKind::Load`] event for the current fragment.
    pub fn load(&self) {
        let fragment = self.fragment();
        self.emit(NavigationEvent::load(fragment));
    }

    /// Steps forward in history. Returns false at the newest entry.
    pub fn forward(&self) -> bool {
        let fragment = {
            let mut history = self.lock();
            if history.index + 1 >= history.entries.len() {
                return false;
            }
            history.index += 1;
            history.current().to_string()
        };
        self.emit(NavigationEvent::new(fragment, NavigationKind::PopState));
        true
    }

    /// All history entries, oldest first.
    pub fn history(&self) -> Vec<String> {
        self.lock().entries.clone()
    }

    /// Closes the navigation channel so a running loop can finish.
    pub fn close(&self) {
        self.sender.close();
    }

    fn lock(&self) -> MutexGuard<'_, History> {
        self.history
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    fn emit(&self, event: NavigationEvent) {
        if !self.sender.send(event) {
            tracing::debug!("navigation channel closed, event dropped");
        }
    }
}

impl Location for MemoryLocation {
    fn fragment(&self) -> String {
        let history = self.lock();
        match history.current() {
            "" => String::new(),
            current => format!("#{current}"),
        }
    }

    fn assign(&self, fragment: &str) {
        let fragment = normalize(fragment);
        {
            let mut history = self.lock();
            if history.current() == fragment {
                return;
            }
            let next = history.index + 1;
            history.entries.truncate(next);
            history.entries.push(fragment.to_string());
            history.index = next;
        }
        self.emit(NavigationEvent::hash_change(fragment));
    }

    fn replace(&self, fragment: &str) {
        let fragment = normalize(fragment);
        {
            let mut history = self.lock();
            if history.current() == fragment {
                return;
            }
            let index = history.index;
            history.entries[index] = fragment.to_string();
        }
        self.emit(NavigationEvent::hash_change(fragment));
    }

    fn back(&self) -> bool {
        let fragment = {
            let mut history = self.lock();
            if history.index == 0 {
                return false;
            }
            history.index -= 1;
            history.current().to_string()
        };
        self.emit(NavigationEvent::new(fragment, NavigationKind::PopState));
        true
    }
}

fn normalize(fragment: &str) -> &str {
    fragment.strip_prefix('#').unwrap_or(fragment)
}

/// A [`RenderTarget`] that records every view it is given.
#[derive(Debug)]
pub struct MemoryMount {
    id: String,
    views: Mutex<Vec<View>>,
}

impl MemoryMount {
    /// Creates an empty mount point.
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            views: Mutex::new(Vec::new()),
        }
    }

    /// The view currently shown.
    pub fn last(&self) -> Option<View> {
        self.lock().last().cloned()
    }

    /// Every view rendered so far, oldest first.
    pub fn views(&self) -> Vec<View> {
        self.lock().clone()
    }

    /// Number of renders.
    pub fn render_count(&self) -> usize {
        self.lock().len()
    }

    /// Forgets recorded views.
    pub fn clear(&self) {
        self.lock().clear();
    }

    fn lock(&self) -> MutexGuard<'_, Vec<View>> {
        self.views
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

impl RenderTarget for MemoryMount {
    fn id(&self) -> &str {
        &self.id
    }

    fn render(&self, view: View) {
        self.lock().push(view);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_assign_emits_only_on_change() {
        let (location, mut events) = MemoryLocation::new("#/items");
        assert_eq!(location.fragment(), "#/items");

        location.assign("/items");
        assert!(events.next_ready().is_none());

        location.assign("#/items/1");
        assert_eq!(
            events.next_ready(),
            Some(NavigationEvent::hash_change("/items/1"))
        );
        assert_eq!(location.history(), ["/items", "/items/1"]);
    }

    #[test]
    fn test_replace_keeps_history_length() {
        let (location, mut events) = MemoryLocation::new("/unknown");
        location.replace("/items");
        assert_eq!(location.history(), ["/items"]);
        assert_eq!(
            events.next_ready(),
            Some(NavigationEvent::hash_change("/items"))
        );
    }

    #[test]
    fn test_back_and_forward() {
        let (location, mut events) = MemoryLocation::new("/a");
        location.assign("/b");
        location.assign("/c");
        while events.next_ready().is_some() {}

        assert!(location.back());
        assert_eq!(location.fragment(), "#/b");
        assert_eq!(
            events.next_ready(),
            Some(NavigationEvent::new("/b", NavigationKind::PopState))
        );

        // assigning after going back drops the forward entries
        location.assign("/d");
        assert_eq!(location.history(), ["/a", "/b", "/d"]);
        assert!(!location.forward());

        assert!(location.back());
        assert!(location.back());
        assert!(!location.back());
        assert!(location.forward());
        assert_eq!(location.fragment(), "#/b");
    }

    #[test]
    fn test_empty_fragment() {
        let (location, mut events) = MemoryLocation::new("");
        assert_eq!(location.fragment(), "");
        location.load();
        assert_eq!(events.next_ready(), Some(NavigationEvent::load("")));
    }

    #[test]
    fn test_mount_records_views() {
        let mount = MemoryMount::new("app");
        assert_eq!(mount.id(), "app");
        mount.render(View::text("one"));
        mount.render(View::markup("<b>two</b>"));
        assert_eq!(mount.render_count(), 2);
        assert_eq!(mount.last(), Some(View::markup("<b>two</b>")));
        mount.clear();
        assert!(mount.last().is_none());
    }
}

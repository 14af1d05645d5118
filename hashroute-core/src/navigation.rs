//! Navigation events.

/// What caused a navigation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NavigationKind {
    /// Initial page load.
    Load,
    /// The fragment changed.
    HashChange,
    /// A history step (back/forward).
    PopState,
    /// The current fragment was re-resolved on request.
    Refresh,
}

/// A change of the address fragment, consumed once by the dispatcher.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NavigationEvent {
    /// The raw fragment, with or without the leading `#`.
    pub fragment: String,
    /// What caused the navigation.
    pub kind: NavigationKind,
}

impl NavigationEvent {
    /// Creates an event.
    pub fn new(fragment: impl Into<String>, kind: NavigationKind) -> Self {
        Self {
            fragment: fragment.into(),
            kind,
        }
    }

    /// A [`NavigationKind::Load`] event.
    pub fn load(fragment: impl Into<String>) -> Self {
        Self::new(fragment, NavigationKind::Load)
    }

    /// A [`NavigationKind::HashChange`] event.
    pub fn hash_change(fragment: impl Into<String>) -> Self {
        Self::new(fragment, NavigationKind::HashChange)
    }
}

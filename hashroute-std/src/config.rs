//! Router configuration.

/// What the dispatcher does when no route matches.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum NotFoundPolicy {
    /// Replace the fragment with the default path (default).
    #[default]
    Redirect,
    /// Invoke the not-found handler, or render [`View::NotFound`].
    ///
    /// [`View::NotFound`]: hashroute_core::View::NotFound
    Render,
}

/// Dispatcher settings.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "camelCase", default))]
pub struct RouterConfig {
    /// Path resolved when the fragment is empty, and the redirect target of
    /// [`NotFoundPolicy::Redirect`].
    pub default_path: String,
    /// Behaviour for unmatched paths.
    pub not_found_policy: NotFoundPolicy,
}

impl Default for RouterConfig {
    fn default() -> Self {
        Self {
            default_path: "/".to_string(),
            not_found_policy: NotFoundPolicy::Redirect,
        }
    }
}

impl RouterConfig {
    /// Creates the default configuration.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the default path.
    pub fn default_path(mut self, path: impl Into<String>) -> Self {
        self.default_path = path.into();
        self
    }

    /// Sets the not-found policy.
    pub fn not_found_policy(mut self, policy: NotFoundPolicy) -> Self {
        self.not_found_policy = policy;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = RouterConfig::default();
        assert_eq!(config.default_path, "/");
        assert_eq!(config.not_found_policy, NotFoundPolicy::Redirect);
    }

    #[test]
    fn test_builder() {
        let config = RouterConfig::new()
            .default_path("/items")
            .not_found_policy(NotFoundPolicy::Render);
        assert_eq!(config.default_path, "/items");
        assert_eq!(config.not_found_policy, NotFoundPolicy::Render);
    }

    #[cfg(feature = "serde")]
    #[test]
    fn test_deserialize_recognised_options() {
        let config: RouterConfig =
            serde_json::from_str(r#"{"defaultPath": "/books", "notFoundPolicy": "render"}"#)
                .unwrap();
        assert_eq!(config.default_path, "/books");
        assert_eq!(config.not_found_policy, NotFoundPolicy::Render);

        let partial: RouterConfig = serde_json::from_str(r#"{"defaultPath": "/x"}"#).unwrap();
        assert_eq!(partial.not_found_policy, NotFoundPolicy::Redirect);
    }
}

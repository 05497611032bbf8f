//! Routing policy
//!
//! Holds the injectable inputs of the decision engine: the static asset table
//! and the optional list of registered applications.

use crate::http::assets::StaticAssetClassifier;
use std::collections::HashSet;

#[derive(Debug, Clone, Default)]
pub struct RoutingPolicy {
    assets: StaticAssetClassifier,
    /// `None` means every first segment is an application
    applications: Option<HashSet<String>>,
}

impl RoutingPolicy {
    pub const fn new(assets: StaticAssetClassifier) -> Self {
        Self {
            assets,
            applications: None,
        }
    }

    /// Restrict application ownership to the given subdirectory names
    ///
    /// An empty list keeps universal mode.
    #[must_use]
    pub fn with_applications<I, S>(mut self, applications: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let set: HashSet<String> = applications.into_iter().map(Into::into).collect();
        self.applications = if set.is_empty() { None } else { Some(set) };
        self
    }

    pub const fn assets(&self) -> &StaticAssetClassifier {
        &self.assets
    }

    /// Whether a first path segment names an application subdirectory
    pub fn owns(&self, segment: &str) -> bool {
        self.applications
            .as_ref()
            .map_or(true, |apps| apps.contains(segment))
    }

    pub fn registered_applications(&self) -> Option<usize> {
        self.applications.as_ref().map(HashSet::len)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_universal_mode_owns_everything() {
        let policy = RoutingPolicy::default();
        assert!(policy.owns("blog"));
        assert!(policy.owns("产品"));
        assert_eq!(policy.registered_applications(), None);
    }

    #[test]
    fn test_registered_applications() {
        let policy = RoutingPolicy::default().with_applications(["blog", "产品"]);
        assert!(policy.owns("blog"));
        assert!(policy.owns("产品"));
        assert!(!policy.owns("missing"));
        assert!(!policy.owns("Blog"));
        assert_eq!(policy.registered_applications(), Some(2));
    }

    #[test]
    fn test_empty_application_list_is_universal() {
        let policy = RoutingPolicy::default().with_applications(Vec::<String>::new());
        assert!(policy.owns("anything"));
    }
}

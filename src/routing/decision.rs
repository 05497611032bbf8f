//! Redirect decision module
//!
//! Combines path analysis and static asset classification into a redirect
//! decision. Rules are evaluated in order and the first match wins:
//!
//! 1. No subdirectory: redirect to `/index.html` unless the path is `/` or a static asset
//! 2. Static asset under a subdirectory: pass through
//! 3. `/{sub}` or `/{sub}/`: redirect to `/{sub}/index.html`
//! 4. Anything else under `/{sub}/`: redirect to `/{sub}/index.html`
//! 5. Otherwise pass through

use super::policy::RoutingPolicy;
use super::subdirectory::extract_subdirectory;
use crate::error::Outcome;

pub const INDEX_DOCUMENT: &str = "index.html";

/// Why a request was left untouched
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PassReason {
    /// The request is exactly `/`
    SiteRoot,
    StaticAsset,
    /// Under a subdirectory but not shaped like `/{sub}/...` (e.g. `//sub`)
    NoMatch,
    MalformedPath,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RedirectKind {
    RootFallback,
    SubdirectoryRoot,
    DeepLink,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Decision {
    PassThrough(PassReason),
    Redirect {
        target: String,
        subdirectory: Option<String>,
        kind: RedirectKind,
    },
}

impl Decision {
    pub const fn should_redirect(&self) -> bool {
        matches!(self, Self::Redirect { .. })
    }

    pub fn target(&self) -> Option<&str> {
        match self {
            Self::Redirect { target, .. } => Some(target),
            Self::PassThrough(_) => None,
        }
    }

    pub fn subdirectory(&self) -> Option<&str> {
        match self {
            Self::Redirect { subdirectory, .. } => subdirectory.as_deref(),
            Self::PassThrough(_) => None,
        }
    }

    /// Short rule label used in logs
    pub const fn rule(&self) -> &'static str {
        match self {
            Self::PassThrough(PassReason::SiteRoot) => "site-root",
            Self::PassThrough(PassReason::StaticAsset) => "static-asset",
            Self::PassThrough(PassReason::NoMatch) => "no-match",
            Self::PassThrough(PassReason::MalformedPath) => "malformed-path",
            Self::Redirect { kind: RedirectKind::RootFallback, .. } => "root-fallback",
            Self::Redirect { kind: RedirectKind::SubdirectoryRoot, .. } => "subdirectory-root",
            Self::Redirect { kind: RedirectKind::DeepLink, .. } => "deep-link",
        }
    }
}

/// Index document path for an optional subdirectory
pub fn index_target(subdirectory: Option<&str>) -> String {
    match subdirectory {
        Some(sub) => format!("/{sub}/{INDEX_DOCUMENT}"),
        None => format!("/{INDEX_DOCUMENT}"),
    }
}

/// Decide whether a request path must be redirected to an index document
///
/// A fallback from path analysis becomes a pass-through fallback here: when the
/// input cannot be analyzed the request is never redirected.
///
/// # Examples
/// ```
/// use spa_edge_router::routing::{decide, RoutingPolicy};
/// let policy = RoutingPolicy::default();
/// assert_eq!(decide("/blog/2024/post", &policy).value().target(), Some("/blog/index.html"));
/// assert!(!decide("/blog/app.css", &policy).value().should_redirect());
/// ```
pub fn decide(path: &str, policy: &RoutingPolicy) -> Outcome<Decision> {
    let segment = match extract_subdirectory(path) {
        Outcome::Value(segment) => segment,
        Outcome::Fallback { reason, .. } => {
            return Outcome::fallback(Decision::PassThrough(PassReason::MalformedPath), reason);
        }
    };

    let subdirectory = segment.filter(|segment| policy.owns(segment));
    let is_asset = policy.assets().is_static_asset(path);

    let Some(sub) = subdirectory else {
        if path == "/" {
            return Outcome::Value(Decision::PassThrough(PassReason::SiteRoot));
        }
        if is_asset {
            return Outcome::Value(Decision::PassThrough(PassReason::StaticAsset));
        }
        return Outcome::Value(Decision::Redirect {
            target: index_target(None),
            subdirectory: None,
            kind: RedirectKind::RootFallback,
        });
    };

    if is_asset {
        return Outcome::Value(Decision::PassThrough(PassReason::StaticAsset));
    }

    let kind = match path.strip_prefix('/').and_then(|rest| rest.strip_prefix(sub)) {
        Some("" | "/") => RedirectKind::SubdirectoryRoot,
        Some(rest) if rest.starts_with('/') => RedirectKind::DeepLink,
        _ => return Outcome::Value(Decision::PassThrough(PassReason::NoMatch)),
    };

    Outcome::Value(Decision::Redirect {
        target: index_target(Some(sub)),
        subdirectory: Some(sub.to_string()),
        kind,
    })
}

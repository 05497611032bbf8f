//! Path analysis module
//!
//! Extracts the first path segment (the "subdirectory") from a request URI.

use crate::error::{Outcome, RoutingError};

/// Extract the first non-empty path segment
///
/// Empty segments are skipped, so leading, trailing and repeated slashes are
/// handled the same way. Segments are returned verbatim (no decoding, no case
/// folding). Malformed paths fall back to `None`.
///
/// # Examples
/// ```
/// use spa_edge_router::routing::extract_subdirectory;
/// assert_eq!(*extract_subdirectory("/blog/post").value(), Some("blog"));
/// assert_eq!(*extract_subdirectory("/").value(), None);
/// ```
pub fn extract_subdirectory(path: &str) -> Outcome<Option<&str>> {
    if path.is_empty() {
        return Outcome::fallback(None, RoutingError::EmptyPath);
    }

    if !path.starts_with('/') {
        return Outcome::fallback(
            None,
            RoutingError::MissingLeadingSlash {
                path: path.to_string(),
            },
        );
    }

    Outcome::Value(path.split('/').find(|segment| !segment.is_empty()))
}

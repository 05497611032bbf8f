//! Static asset classification module
//!
//! Decides whether a request path names a file that is served verbatim and must
//! never be redirected to an index document.

use std::collections::BTreeSet;

/// Default closed set of static file extensions
pub const DEFAULT_STATIC_EXTENSIONS: &[&str] = &[
    // Markup
    ".html", ".htm",
    // Stylesheets
    ".css", ".scss", ".sass", ".less",
    // Scripts
    ".js", ".mjs", ".jsx", ".ts", ".tsx",
    // Images
    ".png", ".jpg", ".jpeg", ".gif", ".svg", ".ico", ".webp", ".bmp",
    // Fonts
    ".woff", ".woff2", ".ttf", ".otf", ".eot",
    // Documents
    ".pdf", ".txt", ".doc", ".docx", ".xls", ".xlsx", ".ppt", ".pptx",
    // Structured data
    ".json", ".xml", ".csv", ".yaml", ".yml",
    // Media
    ".mp4", ".mp3", ".avi", ".mov", ".wmv", ".flv", ".webm", ".ogg",
    // Archives
    ".zip", ".tar", ".gz", ".rar", ".7z",
    // Build artifacts
    ".map", ".manifest", ".webmanifest",
];

/// Suffix-based static asset classifier
///
/// Extensions are stored normalized: ASCII-lowercased with a leading dot.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StaticAssetClassifier {
    extensions: BTreeSet<String>,
}

impl StaticAssetClassifier {
    /// Build a classifier from an explicit extension set
    ///
    /// Empty entries are ignored; use [`normalize_extension`] beforehand to
    /// reject them instead.
    pub fn new<I, S>(extensions: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        Self {
            extensions: extensions
                .into_iter()
                .filter_map(|ext| normalize_extension(ext.as_ref()))
                .collect(),
        }
    }

    /// Add more extensions on top of the current set
    #[must_use]
    pub fn extended_with<I, S>(mut self, extensions: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        self.extensions.extend(
            extensions
                .into_iter()
                .filter_map(|ext| normalize_extension(ext.as_ref())),
        );
        self
    }

    /// Case-insensitive suffix match against the extension set
    ///
    /// # Examples
    /// ```
    /// use spa_edge_router::http::assets::StaticAssetClassifier;
    /// let assets = StaticAssetClassifier::default();
    /// assert!(assets.is_static_asset("/blog/styles/APP.CSS"));
    /// assert!(!assets.is_static_asset("/blog/2024/post"));
    /// ```
    pub fn is_static_asset(&self, path: &str) -> bool {
        let bytes = path.as_bytes();
        self.extensions.iter().any(|ext| {
            let ext = ext.as_bytes();
            bytes.len() >= ext.len() && bytes[bytes.len() - ext.len()..].eq_ignore_ascii_case(ext)
        })
    }

    pub fn extensions(&self) -> impl Iterator<Item = &str> {
        self.extensions.iter().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.extensions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.extensions.is_empty()
    }
}

impl Default for StaticAssetClassifier {
    fn default() -> Self {
        Self::new(DEFAULT_STATIC_EXTENSIONS)
    }
}

/// Normalize a configured extension to `.ext` in ASCII lowercase
///
/// Returns `None` for entries that are empty or consist only of dots.
pub fn normalize_extension(raw: &str) -> Option<String> {
    let trimmed = raw.trim().trim_start_matches('.');
    if trimmed.is_empty() {
        return None;
    }
    Some(format!(".{}", trimmed.to_ascii_lowercase()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_common_assets() {
        let assets = StaticAssetClassifier::default();
        assert!(assets.is_static_asset("/about.html"));
        assert!(assets.is_static_asset("/blog/styles/app.css"));
        assert!(assets.is_static_asset("/app/static/js/main.8f3a.js"));
        assert!(assets.is_static_asset("/fonts/inter.woff2"));
        assert!(assets.is_static_asset("/site.webmanifest"));
        assert!(assets.is_static_asset("/bundle.js.map"));
        assert!(assets.is_static_asset("/downloads/release.7z"));
    }

    #[test]
    fn test_case_insensitive() {
        let assets = StaticAssetClassifier::default();
        assert!(assets.is_static_asset("/IMG/Photo.JPEG"));
        assert!(assets.is_static_asset("/产品/图片.PNG"));
    }

    #[test]
    fn test_client_routes_are_not_assets() {
        let assets = StaticAssetClassifier::default();
        assert!(!assets.is_static_asset("/"));
        assert!(!assets.is_static_asset("/blog/2024/post-not-found"));
        assert!(!assets.is_static_asset("/产品/详情"));
        assert!(!assets.is_static_asset("/docs/ts"));
        assert!(!assets.is_static_asset(""));
    }

    #[test]
    fn test_every_default_extension_matches() {
        let assets = StaticAssetClassifier::default();
        assert_eq!(assets.len(), DEFAULT_STATIC_EXTENSIONS.len());
        for ext in DEFAULT_STATIC_EXTENSIONS {
            assert!(assets.is_static_asset(&format!("/app/file{ext}")), "{ext}");
        }
    }

    #[test]
    fn test_injected_set() {
        let assets = StaticAssetClassifier::new(["WASM", ".glb", ""]);
        assert_eq!(assets.len(), 2);
        assert!(assets.is_static_asset("/game/module.wasm"));
        assert!(assets.is_static_asset("/game/scene.GLB"));
        assert!(!assets.is_static_asset("/game/index.html"));

        let extended = StaticAssetClassifier::default().extended_with(["wasm"]);
        assert!(extended.is_static_asset("/game/module.wasm"));
        assert!(extended.is_static_asset("/game/index.html"));
    }

    #[test]
    fn test_normalize_extension() {
        assert_eq!(normalize_extension("CSS").as_deref(), Some(".css"));
        assert_eq!(normalize_extension(" .Js ").as_deref(), Some(".js"));
        assert_eq!(normalize_extension("..."), None);
        assert_eq!(normalize_extension(""), None);
    }
}

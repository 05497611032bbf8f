//! HTTP protocol layer module
//!
//! Static asset classification, header-safe encoding and redirect response
//! construction, decoupled from the routing rules.

pub mod assets;
pub mod encoding;
pub mod response;

// Re-export commonly used types
pub use assets::StaticAssetClassifier;
pub use encoding::safe_header_value;
pub use response::{build_redirect, RedirectBuilder, RedirectResponse};

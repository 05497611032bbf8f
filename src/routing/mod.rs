//! Routing module
//!
//! Decides whether a viewer request belongs to a client-side routed application
//! and must be sent to that application's index document:
//! - Subdirectory extraction from the request path
//! - Injectable routing policy (asset table, registered applications)
//! - Ordered redirect rules

mod decision;
mod policy;
mod subdirectory;

pub use decision::{decide, index_target, Decision, PassReason, RedirectKind, INDEX_DOCUMENT};
pub use policy::RoutingPolicy;
pub use subdirectory::extract_subdirectory;

//! Request routing decisions for a multi-application static site at the edge
//!
//! Each first-level path segment hosts an independently built single-page
//! application. Requests for client-side routes are redirected to the owning
//! application's `index.html`; static assets and the site root pass through.
//!
//! ```
//! use spa_edge_router::handler::{EdgeOutcome, EdgeRequest, EdgeRouter};
//! use spa_edge_router::routing::RoutingPolicy;
//!
//! let router = EdgeRouter::new(RoutingPolicy::default());
//! assert!(router.handle(EdgeRequest::new("/blog/2024/post")).is_redirect());
//! assert!(matches!(router.handle(EdgeRequest::new("/blog/app.css")), EdgeOutcome::Continue(_)));
//! ```

pub mod config;
pub mod error;
pub mod handler;
pub mod http;
pub mod logger;
pub mod routing;

pub use crate::config::Config;
pub use crate::error::{Outcome, RoutingError};
pub use crate::handler::{EdgeOutcome, EdgeRequest, EdgeRouter};

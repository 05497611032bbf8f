//! Edge request handler module
//!
//! Boundary between the hosting platform and the routing core.

pub mod observer;
pub mod router;
pub mod types;

pub use observer::{DecisionObserver, LoggingObserver, NoopObserver};
pub use router::EdgeRouter;
pub use types::{ClientInfo, EdgeOutcome, EdgeRequest, EdgeResponse, HeaderEntry};

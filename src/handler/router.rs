//! Edge request dispatch module
//!
//! Entry point for viewer requests: runs the routing core and turns its result
//! into either a redirect response or the untouched request.

use super::observer::{DecisionObserver, LoggingObserver, NoopObserver};
use super::types::{EdgeOutcome, EdgeRequest, EdgeResponse};
use crate::config::{Config, ConfigError};
use crate::error::RoutingError;
use crate::http::response::RedirectBuilder;
use crate::logger;
use crate::routing::{decide, RoutingPolicy};
use serde::Deserialize;
use std::sync::Arc;
use std::time::Instant;

/// Stateless request router; cheap to clone and share between threads
#[derive(Clone)]
pub struct EdgeRouter {
    policy: Arc<RoutingPolicy>,
    builder: RedirectBuilder,
    observer: Arc<dyn DecisionObserver>,
}

impl EdgeRouter {
    pub fn new(policy: RoutingPolicy) -> Self {
        Self {
            policy: Arc::new(policy),
            builder: RedirectBuilder::default(),
            observer: Arc::new(NoopObserver),
        }
    }

    /// Router with policy, response settings and logging taken from config
    pub fn from_config(config: &Config) -> Result<Self, ConfigError> {
        let policy = config.routing_policy()?;
        Ok(Self::new(policy)
            .with_builder(RedirectBuilder {
                diagnostic_headers: config.response.diagnostic_headers,
                max_header_bytes: config.response.max_header_bytes,
            })
            .with_observer(LoggingObserver::new(&config.logging)))
    }

    #[must_use]
    pub const fn with_builder(mut self, builder: RedirectBuilder) -> Self {
        self.builder = builder;
        self
    }

    #[must_use]
    pub fn with_observer(mut self, observer: impl DecisionObserver + 'static) -> Self {
        self.observer = Arc::new(observer);
        self
    }

    pub fn policy(&self) -> &RoutingPolicy {
        &self.policy
    }

    /// Route a single viewer request
    ///
    /// Never fails: anything that cannot be decided is passed through.
    pub fn handle(&self, request: EdgeRequest) -> EdgeOutcome {
        let started = Instant::now();
        self.observer.on_request(&request);

        let decision = decide(&request.uri, &self.policy);
        let response = decision.value().target().map(|target| {
            self.builder
                .build(target, &request.uri, decision.value().subdirectory())
        });

        self.observer
            .on_decision(&request, &decision, response.as_ref(), started.elapsed());

        match response {
            Some(response) => EdgeOutcome::Respond(EdgeResponse::from(response.into_value())),
            None => EdgeOutcome::Continue(request),
        }
    }

    /// Route a JSON request descriptor, returning the JSON outcome
    ///
    /// Valid JSON that is not a usable descriptor is passed through unchanged.
    /// Only input that is not JSON at all is an error.
    pub fn handle_json(&self, raw: &str) -> serde_json::Result<String> {
        let value: serde_json::Value = serde_json::from_str(raw)?;
        match EdgeRequest::deserialize(&value) {
            Ok(request) => serde_json::to_string(&self.handle(request)),
            Err(source) => {
                logger::log_fallback("request", &RoutingError::MalformedRequest(source));
                serde_json::to_string(&value)
            }
        }
    }
}

impl std::fmt::Debug for EdgeRouter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EdgeRouter")
            .field("policy", &self.policy)
            .field("builder", &self.builder)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};

    fn router() -> EdgeRouter {
        EdgeRouter::new(RoutingPolicy::default().with_applications(["blog", "产品"]))
    }

    fn location(outcome: &EdgeOutcome) -> Option<&str> {
        match outcome {
            EdgeOutcome::Respond(response) => response
                .headers
                .get("location")
                .and_then(|v| v.first())
                .map(|e| e.value.as_str()),
            EdgeOutcome::Continue(_) => None,
        }
    }

    #[test]
    fn test_pass_through_returns_request_unmodified() {
        let request = EdgeRequest::new("/blog/styles/app.css").with_header("Host", "example.com");
        let outcome = router().handle(request.clone());
        assert_eq!(outcome, EdgeOutcome::Continue(request));
    }

    #[test]
    fn test_concrete_scenarios() {
        let router = router();
        let cases = [
            ("/", None),
            ("/about.html", None),
            ("/missing", Some("/index.html")),
            ("/blog", Some("/blog/index.html")),
            ("/blog/", Some("/blog/index.html")),
            ("/blog/2024/post-not-found", Some("/blog/index.html")),
            ("/blog/styles/app.css", None),
            ("/产品/详情", Some("/%E4%BA%A7%E5%93%81/index.html")),
        ];

        for (path, expected) in cases {
            let outcome = router.handle(EdgeRequest::new(path));
            assert_eq!(location(&outcome), expected, "{path}");
            assert_eq!(outcome.is_redirect(), expected.is_some(), "{path}");
        }
    }

    #[test]
    fn test_non_ascii_diagnostic_header() {
        let outcome = router().handle(EdgeRequest::new("/产品/详情"));
        let EdgeOutcome::Respond(response) = outcome else {
            panic!("expected redirect");
        };
        assert_eq!(response.status, "302");
        assert_eq!(
            response.headers["x-redirected-from"][0].value,
            "/%E4%BA%A7%E5%93%81/%E8%AF%A6%E6%83%85"
        );
        assert_eq!(response.headers["x-subdirectory-redirect"][0].value, "true");
    }

    #[test]
    fn test_malformed_request_passes_through() {
        let outcome = router().handle(EdgeRequest::new("no-leading-slash"));
        assert!(!outcome.is_redirect());
    }

    #[test]
    fn test_handle_json() {
        let out = router()
            .handle_json(r#"{"uri": "/blog/deep/link", "method": "GET", "headers": {}}"#)
            .unwrap();
        let json: serde_json::Value = serde_json::from_str(&out).unwrap();
        assert_eq!(json["status"], "302");
        assert_eq!(json["headers"]["location"][0]["value"], "/blog/index.html");

        assert!(router().handle_json("not json").is_err());
    }

    #[test]
    fn test_unusable_descriptor_is_echoed() {
        let router = router();
        for raw in [
            r#"{"uri": 5, "method": "GET", "headers": {}}"#,
            r#"{"method": "GET", "headers": {}}"#,
            r#"{"uri": "/blog/x", "headers": {"host": [{"key": "Host"}]}}"#,
            r#"[1, 2]"#,
        ] {
            let out = router.handle_json(raw).unwrap();
            let echoed: serde_json::Value = serde_json::from_str(&out).unwrap();
            let original: serde_json::Value = serde_json::from_str(raw).unwrap();
            assert_eq!(echoed, original, "{raw}");
        }
    }

    #[test]
    fn test_config_header_limit_reaches_builder() {
        let config = Config::from_toml_str("[response]\nmax_header_bytes = 32\n").unwrap();
        let router = EdgeRouter::from_config(&config)
            .unwrap()
            .with_observer(NoopObserver);
        let EdgeOutcome::Respond(response) =
            router.handle(EdgeRequest::new("/blog/a/very/long/client/side/route"))
        else {
            panic!("expected redirect");
        };
        assert_eq!(response.headers.len(), 1);
        assert_eq!(response.headers["location"][0].value, "/blog/index.html");
    }

    #[test]
    fn test_pass_through_json_adds_nothing() {
        let out = router().handle_json(r#"{"uri": "/a.css"}"#).unwrap();
        assert_eq!(out, r#"{"uri":"/a.css"}"#);
    }

    struct CountingObserver(Arc<AtomicUsize>);

    impl DecisionObserver for CountingObserver {
        fn on_decision(
            &self,
            _request: &EdgeRequest,
            _decision: &crate::error::Outcome<crate::routing::Decision>,
            _response: Option<&crate::error::Outcome<crate::http::response::RedirectResponse>>,
            _elapsed: std::time::Duration,
        ) {
            self.0.fetch_add(1, Ordering::Relaxed);
        }
    }

    #[test]
    fn test_observer_sees_every_request() {
        let count = Arc::new(AtomicUsize::new(0));
        let router = router().with_observer(CountingObserver(Arc::clone(&count)));
        router.handle(EdgeRequest::new("/"));
        router.handle(EdgeRequest::new("/blog/x"));
        assert_eq!(count.load(Ordering::Relaxed), 2);
    }

    #[test]
    fn test_router_is_shareable_across_threads() {
        let router = router();
        let handles: Vec<_> = (0..4)
            .map(|i| {
                let router = router.clone();
                std::thread::spawn(move || router.handle(EdgeRequest::new(format!("/blog/{i}"))))
            })
            .collect();
        for handle in handles {
            assert!(handle.join().unwrap().is_redirect());
        }
    }
}

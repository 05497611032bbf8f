//! Decision observers
//!
//! Hooks invoked around the routing core. The core itself never logs; anything
//! that wants to watch decisions implements [`DecisionObserver`].

use super::types::{ClientInfo, EdgeRequest};
use crate::config::LoggingConfig;
use crate::error::Outcome;
use crate::http::response::RedirectResponse;
use crate::logger::{self, DecisionLogEntry};
use crate::routing::Decision;
use std::time::Duration;

pub trait DecisionObserver: Send + Sync {
    fn on_request(&self, _request: &EdgeRequest) {}

    fn on_decision(
        &self,
        _request: &EdgeRequest,
        _decision: &Outcome<Decision>,
        _response: Option<&Outcome<RedirectResponse>>,
        _elapsed: Duration,
    ) {
    }
}

/// Observer that ignores everything
#[derive(Debug, Default, Clone, Copy)]
pub struct NoopObserver;

impl DecisionObserver for NoopObserver {}

/// Observer writing decision lines and fallbacks to the log
#[derive(Debug, Clone)]
pub struct LoggingObserver {
    access_log: bool,
    access_log_format: String,
    show_headers: bool,
}

impl LoggingObserver {
    pub fn new(config: &LoggingConfig) -> Self {
        Self {
            access_log: config.access_log,
            access_log_format: config.access_log_format.clone(),
            show_headers: config.show_headers,
        }
    }
}

impl DecisionObserver for LoggingObserver {
    fn on_request(&self, request: &EdgeRequest) {
        logger::log_request(request.method(), &request.uri);
        logger::log_headers_count(request.header_count(), self.show_headers);
    }

    fn on_decision(
        &self,
        request: &EdgeRequest,
        decision: &Outcome<Decision>,
        response: Option<&Outcome<RedirectResponse>>,
        elapsed: Duration,
    ) {
        if let Some(reason) = decision.reason() {
            logger::log_fallback("decision", reason);
        }
        if let Some(reason) = response.and_then(Outcome::reason) {
            logger::log_fallback("response", reason);
        }

        match decision.value().target() {
            Some(target) => logger::log_redirect(&request.uri, target, decision.value().rule()),
            None => logger::log_pass_through(&request.uri, decision.value().rule()),
        }

        if self.access_log {
            let entry = build_entry(request, decision, response, elapsed);
            logger::log_decision(&entry, &self.access_log_format);
        }
    }
}

fn build_entry(
    request: &EdgeRequest,
    decision: &Outcome<Decision>,
    response: Option<&Outcome<RedirectResponse>>,
    elapsed: Duration,
) -> DecisionLogEntry {
    let client = ClientInfo::from_request(request);
    let mut entry = DecisionLogEntry::new(
        client.client_ip,
        request.method().to_string(),
        request.uri.clone(),
    );
    entry.rule = decision.value().rule();
    entry.user_agent = Some(client.user_agent);
    entry.country = Some(client.country);
    entry.referer = request.header("referer").map(String::from);
    entry.fallback = decision
        .reason()
        .or_else(|| response.and_then(Outcome::reason))
        .map(ToString::to_string);
    if let Some(response) = response.map(Outcome::value) {
        entry.status = Some(response.status.as_u16());
        entry.location = response.location().map(String::from);
    }
    entry.request_time_us = u64::try_from(elapsed.as_micros()).unwrap_or(u64::MAX);
    entry
}

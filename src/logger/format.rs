//! Decision log format module
//!
//! Supports multiple log formats:
//! - `combined` (Apache/Nginx combined format plus the routing rule)
//! - `common` (Common Log Format - CLF)
//! - `json` (JSON structured logging)
//! - Custom patterns with variables

use chrono::Local;
use serde_json::json;

/// One routing decision with the request details needed to log it
#[derive(Debug, Clone)]
pub struct DecisionLogEntry {
    /// Viewer address as reported by the edge
    pub remote_addr: String,
    pub time: chrono::DateTime<Local>,
    pub method: String,
    /// Request URI path, unencoded
    pub path: String,
    /// Response status, `None` when the request was passed through
    pub status: Option<u16>,
    /// Redirect target as sent in `Location`
    pub location: Option<String>,
    /// Rule label that produced the decision
    pub rule: &'static str,
    pub referer: Option<String>,
    pub user_agent: Option<String>,
    /// Viewer country code
    pub country: Option<String>,
    /// Fallback reason, if any stage used its safe default
    pub fallback: Option<String>,
    /// Decision time in microseconds
    pub request_time_us: u64,
}

impl DecisionLogEntry {
    /// Create a new entry with current timestamp
    pub fn new(remote_addr: String, method: String, path: String) -> Self {
        Self {
            remote_addr,
            time: Local::now(),
            method,
            path,
            status: None,
            location: None,
            rule: "-",
            referer: None,
            user_agent: None,
            country: None,
            fallback: None,
            request_time_us: 0,
        }
    }

    /// Format the log entry according to the specified format
    pub fn format(&self, format: &str) -> String {
        match format {
            "combined" => self.format_combined(),
            "common" => self.format_common(),
            "json" => self.format_json(),
            custom => self.format_custom(custom),
        }
    }

    fn status_text(&self) -> String {
        self.status.map_or_else(|| "-".to_string(), |s| s.to_string())
    }

    /// `$remote_addr - - [$time_local] "$request" $status "$location" $rule "$http_referer" "$http_user_agent"`
    fn format_combined(&self) -> String {
        format!(
            "{} - - [{}] \"{} {}\" {} \"{}\" {} \"{}\" \"{}\"",
            self.remote_addr,
            self.time.format("%d/%b/%Y:%H:%M:%S %z"),
            self.method,
            self.path,
            self.status_text(),
            self.location.as_deref().unwrap_or("-"),
            self.rule,
            self.referer.as_deref().unwrap_or("-"),
            self.user_agent.as_deref().unwrap_or("-"),
        )
    }

    /// `$remote_addr - - [$time_local] "$request" $status`
    fn format_common(&self) -> String {
        format!(
            "{} - - [{}] \"{} {}\" {}",
            self.remote_addr,
            self.time.format("%d/%b/%Y:%H:%M:%S %z"),
            self.method,
            self.path,
            self.status_text(),
        )
    }

    fn format_json(&self) -> String {
        json!({
            "remote_addr": self.remote_addr,
            "time": self.time.to_rfc3339(),
            "method": self.method,
            "path": self.path,
            "status": self.status,
            "location": self.location,
            "rule": self.rule,
            "referer": self.referer,
            "user_agent": self.user_agent,
            "country": self.country,
            "fallback": self.fallback,
            "request_time_us": self.request_time_us,
        })
        .to_string()
    }

    /// Custom format with variable substitution
    ///
    /// Supported variables:
    /// - `$remote_addr`, `$time_local`, `$time_iso8601`
    /// - `$request` - "METHOD /path"
    /// - `$request_method`, `$request_uri`
    /// - `$status` (`-` for pass-through), `$location`, `$rule`
    /// - `$http_referer`, `$http_user_agent`, `$country`
    /// - `$request_time` - decision time in seconds (6 decimal places)
    fn format_custom(&self, pattern: &str) -> String {
        let mut result = pattern.to_string();
        let request_line = format!("{} {}", self.method, self.path);

        result = result.replace("$remote_addr", &self.remote_addr);
        result = result.replace(
            "$time_local",
            &self.time.format("%d/%b/%Y:%H:%M:%S %z").to_string(),
        );
        result = result.replace("$time_iso8601", &self.time.to_rfc3339());
        // Order matters: longer variables first to avoid partial replacement
        #[allow(clippy::cast_precision_loss)]
        let request_time = self.request_time_us as f64 / 1_000_000.0;
        result = result.replace("$request_time", &format!("{request_time:.6}"));
        result = result.replace("$request_method", &self.method);
        result = result.replace("$request_uri", &self.path);
        result = result.replace("$request", &request_line);
        result = result.replace("$status", &self.status_text());
        result = result.replace("$location", self.location.as_deref().unwrap_or("-"));
        result = result.replace("$rule", self.rule);
        result = result.replace("$http_referer", self.referer.as_deref().unwrap_or("-"));
        result = result.replace(
            "$http_user_agent",
            self.user_agent.as_deref().unwrap_or("-"),
        );
        result = result.replace("$country", self.country.as_deref().unwrap_or("-"));

        result
    }
}

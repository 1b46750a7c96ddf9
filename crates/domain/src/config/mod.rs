mod observability;
mod server;
mod store;

pub use observability::*;
pub use server::*;
pub use store::*;

use serde::{Deserialize, Serialize};
use std::fmt;

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
// Top-level config
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct Config {
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub store: StoreConfig,
    #[serde(default)]
    pub search: SearchConfig,
    #[serde(default)]
    pub stream: StreamConfig,
    #[serde(default)]
    pub observability: ObservabilityConfig,
}

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
// Cross-session search
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SearchConfig {
    /// Hits returned when the caller does not pass `limit`.
    #[serde(default = "d_default_limit")]
    pub default_limit: usize,
    /// Upper bound applied to caller-supplied limits.
    #[serde(default = "d_max_limit")]
    pub max_limit: usize,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            default_limit: d_default_limit(),
            max_limit: d_max_limit(),
        }
    }
}

impl SearchConfig {
    /// Resolve a caller-supplied limit against the configured default and cap.
    pub fn effective_limit(&self, requested: Option<usize>) -> usize {
        requested.unwrap_or(self.default_limit).min(self.max_limit)
    }
}

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
// Event stream (manifest advertisement + keepalive)
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StreamConfig {
    /// Seconds between `ping` events on the SSE stream.
    #[serde(default = "d_keepalive_secs")]
    pub keepalive_secs: u64,
}

impl Default for StreamConfig {
    fn default() -> Self {
        Self {
            keepalive_secs: d_keepalive_secs(),
        }
    }
}

// ── serde default helpers ───────────────────────────────────────────

fn d_default_limit() -> usize {
    8
}
fn d_max_limit() -> usize {
    100
}
fn d_keepalive_secs() -> u64 {
    15
}

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
// Config validation
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

/// Severity level for a configuration issue.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigSeverity {
    Error,
    Warning,
}

/// A single configuration validation issue.
#[derive(Debug, Clone)]
pub struct ConfigError {
    pub severity: ConfigSeverity,
    pub field: String,
    pub message: String,
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let tag = match self.severity {
            ConfigSeverity::Error => "ERROR",
            ConfigSeverity::Warning => "WARN",
        };
        write!(f, "[{tag}] {}: {}", self.field, self.message)
    }
}

impl Config {
    /// Validate the configuration and return a list of issues.
    ///
    /// Returns an empty vec when everything looks good.
    pub fn validate(&self) -> Vec<ConfigError> {
        let mut errors = Vec::new();

        if self.server.port == 0 {
            errors.push(ConfigError {
                severity: ConfigSeverity::Error,
                field: "server.port".into(),
                message: "port must be greater than 0".into(),
            });
        }

        if self.server.host.is_empty() {
            errors.push(ConfigError {
                severity: ConfigSeverity::Error,
                field: "server.host".into(),
                message: "host must not be empty".into(),
            });
        }

        if self.server.max_concurrent_requests == 0 {
            errors.push(ConfigError {
                severity: ConfigSeverity::Error,
                field: "server.max_concurrent_requests".into(),
                message: "must allow at least one in-flight request".into(),
            });
        }

        if let Some(rl) = &self.server.rate_limit {
            if rl.requests_per_second == 0 || rl.burst_size == 0 {
                errors.push(ConfigError {
                    severity: ConfigSeverity::Error,
                    field: "server.rate_limit".into(),
                    message: "requests_per_second and burst_size must be greater than 0".into(),
                });
            }
        }

        if self.store.backend == StoreBackend::File && self.store.path.as_os_str().is_empty() {
            errors.push(ConfigError {
                severity: ConfigSeverity::Error,
                field: "store.path".into(),
                message: "file backend requires a path".into(),
            });
        }

        if self.store.backend == StoreBackend::Memory {
            errors.push(ConfigError {
                severity: ConfigSeverity::Warning,
                field: "store.backend".into(),
                message: "memory backend loses all sessions on restart".into(),
            });
        }

        if self.search.default_limit == 0 || self.search.default_limit > self.search.max_limit {
            errors.push(ConfigError {
                severity: ConfigSeverity::Error,
                field: "search.default_limit".into(),
                message: format!(
                    "default_limit must be between 1 and max_limit ({})",
                    self.search.max_limit
                ),
            });
        }

        if self.stream.keepalive_secs == 0 {
            errors.push(ConfigError {
                severity: ConfigSeverity::Error,
                field: "stream.keepalive_secs".into(),
                message: "keepalive interval must be greater than 0".into(),
            });
        }

        if self.server.cors.allowed_origins.len() == 1
            && self.server.cors.allowed_origins[0] == "*"
        {
            errors.push(ConfigError {
                severity: ConfigSeverity::Warning,
                field: "server.cors.allowed_origins".into(),
                message: "wildcard \"*\" allows all origins (not recommended for production)".into(),
            });
        }

        errors
    }
}

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
// Tests
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

#[cfg(test)]
mod tests {
    use super::*;

    fn has_error(issues: &[ConfigError], field: &str) -> bool {
        issues
            .iter()
            .any(|i| i.severity == ConfigSeverity::Error && i.field == field)
    }

    #[test]
    fn default_config_is_valid() {
        let issues = Config::default().validate();
        assert!(
            issues.iter().all(|i| i.severity != ConfigSeverity::Error),
            "unexpected errors: {issues:?}"
        );
    }

    #[test]
    fn zero_port_is_an_error() {
        let mut cfg = Config::default();
        cfg.server.port = 0;
        assert!(has_error(&cfg.validate(), "server.port"));
    }

    #[test]
    fn default_limit_above_cap_is_an_error() {
        let mut cfg = Config::default();
        cfg.search.default_limit = 500;
        assert!(has_error(&cfg.validate(), "search.default_limit"));
    }

    #[test]
    fn zero_keepalive_is_an_error() {
        let mut cfg = Config::default();
        cfg.stream.keepalive_secs = 0;
        assert!(has_error(&cfg.validate(), "stream.keepalive_secs"));
    }

    #[test]
    fn zero_rate_limit_is_an_error() {
        let mut cfg = Config::default();
        cfg.server.rate_limit = Some(RateLimitConfig {
            requests_per_second: 0,
            burst_size: 10,
        });
        assert!(has_error(&cfg.validate(), "server.rate_limit"));
    }

    #[test]
    fn memory_backend_warns() {
        let mut cfg = Config::default();
        cfg.store.backend = StoreBackend::Memory;
        let issues = cfg.validate();
        assert!(issues
            .iter()
            .any(|i| i.severity == ConfigSeverity::Warning && i.field == "store.backend"));
    }

    #[test]
    fn effective_limit_defaults_and_clamps() {
        let search = SearchConfig::default();
        assert_eq!(search.effective_limit(None), 8);
        assert_eq!(search.effective_limit(Some(3)), 3);
        assert_eq!(search.effective_limit(Some(10_000)), 100);
    }

    #[test]
    fn config_error_display() {
        let err = ConfigError {
            severity: ConfigSeverity::Warning,
            field: "store.backend".into(),
            message: "volatile".into(),
        };
        assert_eq!(err.to_string(), "[WARN] store.backend: volatile");
    }
}

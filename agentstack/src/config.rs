//! Runtime settings for the agent stack.
//!
//! Settings load from a JSON file, from `AGENTSTACK_*` environment variables,
//! or both (file first, environment on top). Once handed to an
//! [`Orchestrator`](crate::orchestrator::Orchestrator) they are read-only.

use crate::errors::{AgentStackError, Result};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::Path;
use std::str::FromStr;
use std::time::Duration;

/// Prefix for environment variable overrides.
pub const ENV_PREFIX: &str = "AGENTSTACK_";

/// Output format of the tracing subscriber.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    /// One JSON object per line.
    #[default]
    Json,
    /// Human-readable multi-line output.
    Pretty,
}

impl fmt::Display for LogFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Json => write!(f, "json"),
            Self::Pretty => write!(f, "pretty"),
        }
    }
}

impl FromStr for LogFormat {
    type Err = AgentStackError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "json" => Ok(Self::Json),
            "pretty" => Ok(Self::Pretty),
            other => Err(AgentStackError::Config(format!(
                "unknown log format '{other}' (expected 'json' or 'pretty')"
            ))),
        }
    }
}

/// Application settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Settings {
    /// Application name.
    #[serde(default = "default_app_name")]
    pub app_name: String,
    /// Application version, reported by health snapshots.
    #[serde(default = "default_app_version")]
    pub app_version: String,
    /// Enables human-readable debug logging.
    #[serde(default)]
    pub debug: bool,
    /// Word threshold above which the summarizer condenses content; also the
    /// character cap applied to the condensed summary.
    #[serde(default = "default_max_summary_length")]
    pub max_summary_length: usize,
    /// Whether the optimizer rewrites content.
    #[serde(default = "default_true")]
    pub enable_optimization: bool,
    /// Default log filter directive when `RUST_LOG` is unset.
    #[serde(default = "default_log_level")]
    pub log_level: String,
    /// Log output format.
    #[serde(default)]
    pub log_format: LogFormat,
    /// Maximum number of runs executing at once inside one orchestrator.
    #[serde(default = "default_max_concurrent_agents")]
    pub max_concurrent_agents: usize,
    /// Per-run deadline in seconds; `0` disables it.
    #[serde(default = "default_request_timeout")]
    pub request_timeout_seconds: u64,
    /// Whether the orchestrator rejects blank content up front.
    #[serde(default = "default_true")]
    pub enable_input_validation: bool,
    /// Maximum accepted content length in characters.
    #[serde(default = "default_max_input_size")]
    pub max_input_size: usize,
    /// Whether stage calls are recorded into the metrics collector.
    #[serde(default = "default_true")]
    pub enable_metrics: bool,
    /// Port advertised to external metrics scrapers.
    #[serde(default = "default_metrics_port")]
    pub metrics_port: u16,
}

fn default_app_name() -> String {
    "MCP Agent Stack".to_string()
}

fn default_app_version() -> String {
    "1.0.0".to_string()
}

fn default_max_summary_length() -> usize {
    100
}

fn default_true() -> bool {
    true
}

fn default_log_level() -> String {
    "INFO".to_string()
}

fn default_max_concurrent_agents() -> usize {
    10
}

fn default_request_timeout() -> u64 {
    30
}

fn default_max_input_size() -> usize {
    10_000
}

fn default_metrics_port() -> u16 {
    8000
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            app_name: default_app_name(),
            app_version: default_app_version(),
            debug: false,
            max_summary_length: default_max_summary_length(),
            enable_optimization: true,
            log_level: default_log_level(),
            log_format: LogFormat::default(),
            max_concurrent_agents: default_max_concurrent_agents(),
            request_timeout_seconds: default_request_timeout(),
            enable_input_validation: true,
            max_input_size: default_max_input_size(),
            enable_metrics: true,
            metrics_port: default_metrics_port(),
        }
    }
}

impl Settings {
    /// Creates settings with defaults.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Loads settings from a JSON file. Missing fields take their defaults.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let raw = std::fs::read_to_string(path)?;
        let settings: Self = serde_json::from_str(&raw).map_err(|e| {
            AgentStackError::Config(format!("failed to parse {}: {e}", path.display()))
        })?;
        settings.validate()?;
        Ok(settings)
    }

    /// Loads defaults overridden by `AGENTSTACK_*` environment variables.
    pub fn from_env() -> Result<Self> {
        Self::default().apply_env()
    }

    /// Applies `AGENTSTACK_*` environment overrides on top of these settings.
    pub fn apply_env(self) -> Result<Self> {
        self.apply_overrides(|key| std::env::var(format!("{ENV_PREFIX}{key}")).ok())
    }

    /// Applies overrides from an arbitrary key lookup.
    ///
    /// Keys are upper-case field names without the prefix.
    pub fn apply_overrides<F>(mut self, lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(v) = lookup("APP_NAME") {
            self.app_name = v;
        }
        if let Some(v) = lookup("APP_VERSION") {
            self.app_version = v;
        }
        if let Some(v) = lookup("DEBUG") {
            self.debug = parse_bool("DEBUG", &v)?;
        }
        if let Some(v) = lookup("MAX_SUMMARY_LENGTH") {
            self.max_summary_length = parse_value("MAX_SUMMARY_LENGTH", &v)?;
        }
        if let Some(v) = lookup("ENABLE_OPTIMIZATION") {
            self.enable_optimization = parse_bool("ENABLE_OPTIMIZATION", &v)?;
        }
        if let Some(v) = lookup("LOG_LEVEL") {
            self.log_level = v;
        }
        if let Some(v) = lookup("LOG_FORMAT") {
            self.log_format = v.parse()?;
        }
        if let Some(v) = lookup("MAX_CONCURRENT_AGENTS") {
            self.max_concurrent_agents = parse_value("MAX_CONCURRENT_AGENTS", &v)?;
        }
        if let Some(v) = lookup("REQUEST_TIMEOUT") {
            self.request_timeout_seconds = parse_value("REQUEST_TIMEOUT", &v)?;
        }
        if let Some(v) = lookup("ENABLE_INPUT_VALIDATION") {
            self.enable_input_validation = parse_bool("ENABLE_INPUT_VALIDATION", &v)?;
        }
        if let Some(v) = lookup("MAX_INPUT_SIZE") {
            self.max_input_size = parse_value("MAX_INPUT_SIZE", &v)?;
        }
        if let Some(v) = lookup("ENABLE_METRICS") {
            self.enable_metrics = parse_bool("ENABLE_METRICS", &v)?;
        }
        if let Some(v) = lookup("METRICS_PORT") {
            self.metrics_port = parse_value("METRICS_PORT", &v)?;
        }

        self.validate()?;
        Ok(self)
    }

    /// Checks settings for values the pipeline cannot work with.
    pub fn validate(&self) -> Result<()> {
        if self.max_input_size == 0 {
            return Err(AgentStackError::Config(
                "max_input_size must be greater than zero".to_string(),
            ));
        }
        // Ellipsis truncation keeps max - 3 characters.
        if self.max_summary_length < 4 {
            return Err(AgentStackError::Config(
                "max_summary_length must be at least 4".to_string(),
            ));
        }
        if self.max_concurrent_agents == 0 {
            return Err(AgentStackError::Config(
                "max_concurrent_agents must be greater than zero".to_string(),
            ));
        }
        Ok(())
    }

    /// Returns the enforced request deadline, if any.
    #[must_use]
    pub fn request_timeout(&self) -> Option<Duration> {
        (self.request_timeout_seconds > 0).then(|| Duration::from_secs(self.request_timeout_seconds))
    }

    /// Returns the non-sensitive view exposed to operators.
    #[must_use]
    pub fn public_view(&self) -> serde_json::Value {
        serde_json::json!({
            "app_name": self.app_name,
            "app_version": self.app_version,
            "debug": self.debug,
            "max_summary_length": self.max_summary_length,
            "enable_optimization": self.enable_optimization,
            "max_input_size": self.max_input_size,
            "enable_metrics": self.enable_metrics,
        })
    }

    /// Sets the maximum summary length.
    #[must_use]
    pub fn with_max_summary_length(mut self, length: usize) -> Self {
        self.max_summary_length = length;
        self
    }

    /// Sets the maximum input size.
    #[must_use]
    pub fn with_max_input_size(mut self, size: usize) -> Self {
        self.max_input_size = size;
        self
    }

    /// Enables or disables optimization.
    #[must_use]
    pub fn with_optimization(mut self, enabled: bool) -> Self {
        self.enable_optimization = enabled;
        self
    }

    /// Enables or disables input validation.
    #[must_use]
    pub fn with_input_validation(mut self, enabled: bool) -> Self {
        self.enable_input_validation = enabled;
        self
    }

    /// Enables or disables metrics recording.
    #[must_use]
    pub fn with_metrics(mut self, enabled: bool) -> Self {
        self.enable_metrics = enabled;
        self
    }

    /// Sets the request timeout in seconds (`0` disables it).
    #[must_use]
    pub fn with_request_timeout(mut self, seconds: u64) -> Self {
        self.request_timeout_seconds = seconds;
        self
    }

    /// Sets the concurrency limit.
    #[must_use]
    pub fn with_max_concurrent_agents(mut self, limit: usize) -> Self {
        self.max_concurrent_agents = limit;
        self
    }
}

fn parse_value<T>(key: &str, raw: &str) -> Result<T>
where
    T: FromStr,
    T::Err: fmt::Display,
{
    raw.trim()
        .parse()
        .map_err(|e| AgentStackError::Config(format!("{ENV_PREFIX}{key}: {e}")))
}

fn parse_bool(key: &str, raw: &str) -> Result<bool> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "0" | "false" | "no" | "off" => Ok(false),
        other => Err(AgentStackError::Config(format!(
            "{ENV_PREFIX}{key}: expected a boolean, got '{other}'"
        ))),
    }
}

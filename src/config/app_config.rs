use std::time::Duration;

use serde::Deserialize;

use crate::domain::{RetryPolicy, SweepConfig};
use crate::infrastructure::graph::GraphEndpoints;

/// Application configuration
#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
pub struct AppConfig {
    pub endpoints: EndpointConfig,
    pub http: HttpConfig,
    pub retry: RetryConfig,
    pub sweep: SweepSettings,
    pub logging: LoggingConfig,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct EndpointConfig {
    pub login_base_url: String,
    pub graph_base_url: String,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct HttpConfig {
    pub timeout_secs: u64,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct RetryConfig {
    pub max_attempts: u32,
    pub base_delay_ms: u64,
    pub jitter: bool,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct SweepSettings {
    /// Minimum delay between removal requests, milliseconds
    pub pace_ms: u64,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    pub level: String,
    pub format: LogFormat,
}

#[derive(Debug, Clone, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    #[default]
    Pretty,
    Json,
}

impl Default for EndpointConfig {
    fn default() -> Self {
        let defaults = GraphEndpoints::default();
        Self {
            login_base_url: defaults.login_base_url,
            graph_base_url: defaults.graph_base_url,
        }
    }
}

impl Default for HttpConfig {
    fn default() -> Self {
        Self { timeout_secs: 30 }
    }
}

impl Default for RetryConfig {
    fn default() -> Self {
        Self {
            max_attempts: 3,
            base_delay_ms: 2_000,
            jitter: true,
        }
    }
}

impl Default for SweepSettings {
    fn default() -> Self {
        Self { pace_ms: 500 }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            format: LogFormat::default(),
        }
    }
}

impl AppConfig {
    pub fn load() -> Result<Self, config::ConfigError> {
        let config = config::Config::builder()
            .add_source(config::File::with_name("config/default").required(false))
            .add_source(config::File::with_name("config/local").required(false))
            .add_source(
                config::Environment::with_prefix("APP")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?;

        config.try_deserialize()
    }

    pub fn graph_endpoints(&self) -> GraphEndpoints {
        GraphEndpoints {
            login_base_url: self.endpoints.login_base_url.trim_end_matches('/').to_string(),
            graph_base_url: self.endpoints.graph_base_url.trim_end_matches('/').to_string(),
        }
    }

    pub fn http_timeout(&self) -> Duration {
        Duration::from_secs(self.http.timeout_secs)
    }

    pub fn retry_policy(&self) -> RetryPolicy {
        RetryPolicy::new(
            self.retry.max_attempts,
            Duration::from_millis(self.retry.base_delay_ms),
            self.retry.jitter,
        )
    }

    pub fn sweep_config(&self) -> SweepConfig {
        SweepConfig {
            retry: self.retry_policy(),
            pace: Duration::from_millis(self.sweep.pace_ms),
        }
    }
}

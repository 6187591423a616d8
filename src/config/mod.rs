mod app_config;

pub use app_config::{
    AppConfig, EndpointConfig, HttpConfig, LogFormat, LoggingConfig, RetryConfig, SweepSettings,
};

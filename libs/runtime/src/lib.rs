//! Shared runtime plumbing: layered configuration and logging setup.

pub mod config;
pub mod logging;

pub use config::{
    default_logging_config, AppConfig, CliArgs, LoggingConfig, OutputConfig, OutputFormat,
    Section,
};

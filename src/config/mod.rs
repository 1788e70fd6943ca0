//! Query compiler configuration

use std::env;

use anyhow::{Context, Result};

use crate::query::CompileOptions;

/// Configuration loaded from environment variables
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// Page size for list queries that give no limit
    pub default_limit: i64,

    /// Allow `_dregex` filters to reach the store as unescaped patterns.
    /// Leave disabled unless every caller able to send them is trusted.
    pub allow_raw_patterns: bool,

    /// Default tracing directive when RUST_LOG is not set
    pub log_filter: String,

    /// Emit JSON log lines instead of the human-readable format
    pub log_json: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            default_limit: 10,
            allow_raw_patterns: false,
            log_filter: "parley_query=info".to_string(),
            log_json: true,
        }
    }
}

impl Config {
    /// Load configuration from environment variables, reading `.env` first
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok();
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Build configuration from an arbitrary variable lookup
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();

        Ok(Self {
            default_limit: match lookup("QUERY_DEFAULT_LIMIT") {
                Some(v) => v.parse().context("Invalid QUERY_DEFAULT_LIMIT")?,
                None => defaults.default_limit,
            },

            allow_raw_patterns: lookup("QUERY_ALLOW_RAW_PATTERNS")
                .map(|v| v == "true" || v == "1")
                .unwrap_or(defaults.allow_raw_patterns),

            log_filter: lookup("LOG_FILTER").unwrap_or(defaults.log_filter),

            log_json: lookup("LOG_FORMAT")
                .map(|v| v != "pretty")
                .unwrap_or(defaults.log_json),
        })
    }

    /// Compiler options derived from this configuration
    pub fn compile_options(&self) -> CompileOptions {
        CompileOptions {
            allow_raw_patterns: self.allow_raw_patterns,
            default_limit: self.default_limit,
        }
    }
}

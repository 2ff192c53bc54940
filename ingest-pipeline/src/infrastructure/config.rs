// /////////////////////////////////////////////////////////////////////////////
// Ingest Pipeline
// Copyright (c) 2025 Michael Gardner, A Bit of Help, Inc.
// SPDX-License-Identifier: BSD-3-Clause
// See LICENSE file in the project root.
// /////////////////////////////////////////////////////////////////////////////

//! # Infrastructure Configuration
//!
//! Loads runtime settings for the control plane and state store from, in
//! ascending precedence:
//!
//! 1. built-in defaults
//! 2. an optional TOML file (`config/default.toml` unless overridden)
//! 3. environment variables prefixed `INGEST_`, with `__` as the nesting
//!    separator (e.g. `INGEST_DATABASE__URL`)
//!
//! Later sources win, so an operator can ship one file per environment and
//! still override a single field at deploy time without editing it.

use std::path::PathBuf;

use serde::Deserialize;

use crate::error::BootstrapError;

#[derive(Debug, Clone, Deserialize)]
pub struct DatabaseSettings {
    pub url: String,
}

fn default_database_url() -> String {
    "sqlite://ingest_state.db".to_string()
}

impl Default for DatabaseSettings {
    fn default() -> Self {
        Self {
            url: default_database_url(),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct ServerSettings {
    pub host: String,
    pub port: u16,
}

impl Default for ServerSettings {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 8080,
        }
    }
}

/// Tuning for [`crate::infrastructure::http::HttpChunkPusher`].
#[derive(Debug, Clone, Deserialize)]
pub struct PusherSettings {
    pub timeout_secs: u64,
    pub max_attempts: u32,
}

fn default_push_timeout_secs() -> u64 {
    60
}

fn default_push_max_attempts() -> u32 {
    3
}

impl Default for PusherSettings {
    fn default() -> Self {
        Self {
            timeout_secs: default_push_timeout_secs(),
            max_attempts: default_push_max_attempts(),
        }
    }
}

/// Top-level application configuration.
#[derive(Debug, Clone, Deserialize, Default)]
pub struct AppConfig {
    #[serde(default)]
    pub database: DatabaseSettings,
    #[serde(default)]
    pub server: ServerSettings,
    #[serde(default)]
    pub pusher: PusherSettings,
    /// `error`, `warn`, `info`, `debug`, or `trace`; also accepts a full
    /// `tracing_subscriber::EnvFilter` directive string.
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

fn default_log_level() -> String {
    "info".to_string()
}

impl AppConfig {
    /// Loads configuration from the optional file at `config_path` layered
    /// under defaults and over `INGEST_`-prefixed environment variables.
    pub fn load(config_path: Option<PathBuf>) -> Result<Self, BootstrapError> {
        let mut builder = config::Config::builder()
            .set_default("database.url", default_database_url())
            .map_err(|e| BootstrapError::config(e.to_string()))?
            .set_default("server.host", "0.0.0.0")
            .map_err(|e| BootstrapError::config(e.to_string()))?
            .set_default("server.port", 8080)
            .map_err(|e| BootstrapError::config(e.to_string()))?
            .set_default("pusher.timeout_secs", default_push_timeout_secs() as i64)
            .map_err(|e| BootstrapError::config(e.to_string()))?
            .set_default("pusher.max_attempts", default_push_max_attempts() as i64)
            .map_err(|e| BootstrapError::config(e.to_string()))?
            .set_default("log_level", default_log_level())
            .map_err(|e| BootstrapError::config(e.to_string()))?;

        if let Some(path) = config_path {
            builder = builder.add_source(config::File::from(path).required(true));
        } else {
            builder = builder.add_source(config::File::with_name("config/default").required(false));
        }

        builder = builder.add_source(
            config::Environment::with_prefix("INGEST")
                .separator("__")
                .try_parsing(true),
        );

        builder
            .build()
            .map_err(|e| BootstrapError::config(e.to_string()))?
            .try_deserialize()
            .map_err(|e| BootstrapError::config(e.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_apply_with_no_file_and_no_env() {
        let cfg = AppConfig::load(None).unwrap();
        assert_eq!(cfg.server.port, 8080);
        assert_eq!(cfg.log_level, "info");
    }

    #[test]
    fn env_override_takes_precedence() {
        std::env::set_var("INGEST_SERVER__PORT", "9090");
        let cfg = AppConfig::load(None).unwrap();
        std::env::remove_var("INGEST_SERVER__PORT");
        assert_eq!(cfg.server.port, 9090);
    }
}

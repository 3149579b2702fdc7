// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 TPDB Project

//! # Runtime Configuration
//!
//! The production configuration record. Built once at startup from the
//! process environment and never mutated afterwards; consumers receive it
//! through [`crate::state::AppState`] rather than ambient lookups.
//!
//! ## Environment Variables
//!
//! | Variable | Description | Default |
//! |----------|-------------|---------|
//! | `DB_NAME` | PostgreSQL database name | `tpdb_db` |
//! | `DB_USER` | PostgreSQL role | `tpdb_user` |
//! | `DB_PASSWORD` | PostgreSQL password | Required, no default |
//! | `DB_HOST` | PostgreSQL host | `localhost` |
//! | `DB_PORT` | PostgreSQL port | `5432` |
//! | `SECRET_KEY` | Signing secret | Required, no default |
//! | `HOST` | Server bind address (read in `main`) | `0.0.0.0` |
//! | `PORT` | Server bind port (read in `main`) | `8080` |
//! | `RUST_LOG` | Log level filter | `info` |
//! | `LOG_FORMAT` | Logging format (`json` or `pretty`) | `pretty` |
//!
//! The security toggles, allowed hosts, asset roots, and log sink are fixed
//! deployment literals and cannot be overridden from the environment.

use std::path::PathBuf;

use crate::error::ConfigError;

/// Environment variable name for the database name.
pub const DB_NAME_ENV: &str = "DB_NAME";
/// Environment variable name for the database role.
pub const DB_USER_ENV: &str = "DB_USER";
/// Environment variable name for the database password. Never defaulted.
pub const DB_PASSWORD_ENV: &str = "DB_PASSWORD";
/// Environment variable name for the database host.
pub const DB_HOST_ENV: &str = "DB_HOST";
/// Environment variable name for the database port.
pub const DB_PORT_ENV: &str = "DB_PORT";
/// Environment variable name for the signing secret. Never defaulted.
pub const SECRET_KEY_ENV: &str = "SECRET_KEY";

const DEFAULT_DB_NAME: &str = "tpdb_db";
const DEFAULT_DB_USER: &str = "tpdb_user";
const DEFAULT_DB_HOST: &str = "localhost";
const DEFAULT_DB_PORT: u16 = 5432;

/// Host names this deployment answers for, in order.
pub const ALLOWED_HOSTS: [&str; 3] = [
    "your-domain.com",
    "www.your-domain.com",
    "your-vps-ip-address",
];

/// Root directory for collected static assets.
pub const STATIC_ROOT: &str = "/var/www/tpdb/static/";
/// Root directory for uploaded media.
pub const MEDIA_ROOT: &str = "/var/www/tpdb/media/";
/// File the server log is appended to.
pub const LOG_FILE: &str = "/var/log/tpdb/server.log";

/// Immutable process configuration.
#[derive(Clone, Debug)]
pub struct Config {
    /// Always `false` in this deployment.
    pub debug: bool,
    pub allowed_hosts: Vec<String>,
    pub security: SecurityConfig,
    pub database: DatabaseConfig,
    pub static_root: PathBuf,
    pub media_root: PathBuf,
    pub logging: LoggingConfig,
    /// Sourced from `SECRET_KEY` only; `None` when unset.
    pub secret_key: Option<String>,
}

/// Transport security toggles. Fixed literals, not environment-overridable.
#[derive(Clone, Debug)]
pub struct SecurityConfig {
    pub ssl_redirect: bool,
    pub hsts_seconds: u64,
    pub hsts_include_subdomains: bool,
    pub hsts_preload: bool,
    pub content_type_nosniff: bool,
    pub browser_xss_filter: bool,
    pub x_frame_options: &'static str,
}

/// PostgreSQL connection parameters. Nothing in this crate opens a
/// connection; the record is handed to whatever does.
#[derive(Clone, Debug)]
pub struct DatabaseConfig {
    pub name: String,
    pub user: String,
    /// Sourced from `DB_PASSWORD` only; `None` when unset.
    pub password: Option<String>,
    pub host: String,
    pub port: u16,
}

/// Log sink descriptor: a single file handler at a fixed path.
#[derive(Clone, Debug)]
pub struct LoggingConfig {
    /// Level filter applied when `RUST_LOG` is unset.
    pub level: &'static str,
    pub file: PathBuf,
}

impl Default for SecurityConfig {
    fn default() -> Self {
        Self {
            ssl_redirect: true,
            hsts_seconds: 31_536_000,
            hsts_include_subdomains: true,
            hsts_preload: true,
            content_type_nosniff: true,
            browser_xss_filter: true,
            x_frame_options: "DENY",
        }
    }
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            name: DEFAULT_DB_NAME.to_owned(),
            user: DEFAULT_DB_USER.to_owned(),
            password: None,
            host: DEFAULT_DB_HOST.to_owned(),
            port: DEFAULT_DB_PORT,
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info",
            file: PathBuf::from(LOG_FILE),
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            debug: false,
            allowed_hosts: ALLOWED_HOSTS.iter().map(|h| (*h).to_owned()).collect(),
            security: SecurityConfig::default(),
            database: DatabaseConfig::default(),
            static_root: PathBuf::from(STATIC_ROOT),
            media_root: PathBuf::from(MEDIA_ROOT),
            logging: LoggingConfig::default(),
            secret_key: None,
        }
    }
}

impl SecurityConfig {
    /// `Strict-Transport-Security` value assembled from the HSTS fields.
    pub fn hsts_header_value(&self) -> String {
        let mut value = format!("max-age={}", self.hsts_seconds);
        if self.hsts_include_subdomains {
            value.push_str("; includeSubDomains");
        }
        if self.hsts_preload {
            value.push_str("; preload");
        }
        value
    }
}

impl DatabaseConfig {
    /// PostgreSQL connection string. Empty password when `DB_PASSWORD` is
    /// unset; `Config::validate` refuses to serve in that state.
    pub fn connection_string(&self) -> String {
        format!(
            "postgres://{}:{}@{}:{}/{}",
            self.user,
            self.password.as_deref().unwrap_or_default(),
            self.host,
            self.port,
            self.name
        )
    }
}

impl Config {
    /// Assemble the record from the process environment.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Assemble the record from an injected lookup. Unit tests pass a map
    /// here instead of mutating the process environment.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let port = match lookup(DB_PORT_ENV) {
            Some(raw) => raw.parse().map_err(|_| ConfigError::InvalidVar {
                name: DB_PORT_ENV,
                value: raw.clone(),
            })?,
            None => DEFAULT_DB_PORT,
        };

        Ok(Self {
            database: DatabaseConfig {
                name: resolve(&lookup, DB_NAME_ENV, DEFAULT_DB_NAME),
                user: resolve(&lookup, DB_USER_ENV, DEFAULT_DB_USER),
                password: lookup(DB_PASSWORD_ENV),
                host: resolve(&lookup, DB_HOST_ENV, DEFAULT_DB_HOST),
                port,
            },
            secret_key: lookup(SECRET_KEY_ENV),
            ..Self::default()
        })
    }

    /// Check the values that have no default. The record stays constructible
    /// without them so their absence is observable; serving without them is
    /// refused at startup.
    pub fn validate(&self) -> Result<(), ConfigError> {
        required(&self.secret_key, SECRET_KEY_ENV)?;
        required(&self.database.password, DB_PASSWORD_ENV)?;
        Ok(())
    }
}

/// Look up `name`, falling back to `default` when unset.
fn resolve<F>(lookup: &F, name: &str, default: &str) -> String
where
    F: Fn(&str) -> Option<String>,
{
    lookup(name).unwrap_or_else(|| default.to_owned())
}

fn required(value: &Option<String>, name: &'static str) -> Result<(), ConfigError> {
    match value.as_deref() {
        Some(v) if !v.is_empty() => Ok(()),
        _ => Err(ConfigError::MissingVar(name)),
    }
}

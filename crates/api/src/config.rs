use std::fmt;
use std::net::{IpAddr, Ipv4Addr};
use std::str::FromStr;
use std::time::Duration;

use greenlight_db::PoolConfig;

use crate::mailer::SmtpConfig;

/// Error raised when an environment variable is missing or unparseable.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("{0} must be set")]
    Missing(&'static str),

    #[error("{var} has invalid value {value:?}: {reason}")]
    Invalid {
        var: &'static str,
        value: String,
        reason: String,
    },
}

/// Deployment environment, reported by the healthcheck.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Environment {
    Development,
    Staging,
    Production,
}

impl Environment {
    pub fn as_str(self) -> &'static str {
        match self {
            Environment::Development => "development",
            Environment::Staging => "staging",
            Environment::Production => "production",
        }
    }
}

impl fmt::Display for Environment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Environment {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "development" => Ok(Environment::Development),
            "staging" => Ok(Environment::Staging),
            "production" => Ok(Environment::Production),
            other => Err(format!(
                "expected development|staging|production, got {other}"
            )),
        }
    }
}

/// Server configuration loaded from environment variables.
///
/// All fields except the database DSN have defaults suitable for local
/// development. In production, override via environment variables.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Bind address (default: `0.0.0.0`).
    pub host: IpAddr,
    /// Bind port (default: `4000`).
    pub port: u16,
    pub env: Environment,
    /// Allowed CORS origins, parsed from comma-separated `CORS_ORIGINS` env var.
    pub cors_origins: Vec<String>,
    /// HTTP request timeout in seconds (default: `30`).
    pub request_timeout_secs: u64,
    /// How long shutdown waits for background work, in seconds (default: `30`).
    pub shutdown_timeout_secs: u64,
    pub db: PoolConfig,
    /// `None` when `SMTP_HOST` is unset; emails are then skipped.
    pub smtp: Option<SmtpConfig>,
}

impl ServerConfig {
    /// Load configuration from the process environment.
    ///
    /// | Env Var                 | Default                    |
    /// |-------------------------|----------------------------|
    /// | `HOST`                  | `0.0.0.0`                  |
    /// | `PORT`                  | `4000`                     |
    /// | `GREENLIGHT_ENV`        | `development`              |
    /// | `CORS_ORIGINS`          | `http://localhost:3000`    |
    /// | `REQUEST_TIMEOUT_SECS`  | `30`                       |
    /// | `SHUTDOWN_TIMEOUT_SECS` | `30`                       |
    /// | `GREENLIGHT_DB_DSN`     | `DATABASE_URL`, required   |
    /// | `DB_MAX_OPEN_CONNS`     | `25`                       |
    /// | `DB_MAX_IDLE_CONNS`     | `25`                       |
    /// | `DB_MAX_IDLE_TIME_SECS` | `900`                      |
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Load configuration through an arbitrary key lookup.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let dsn = lookup("GREENLIGHT_DB_DSN")
            .or_else(|| lookup("DATABASE_URL"))
            .filter(|s| !s.is_empty())
            .ok_or(ConfigError::Missing("GREENLIGHT_DB_DSN"))?;

        let cors_origins = lookup("CORS_ORIGINS")
            .unwrap_or_else(|| "http://localhost:3000".into())
            .split(',')
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .collect();

        Ok(Self {
            host: parse_or(&lookup, "HOST", IpAddr::V4(Ipv4Addr::UNSPECIFIED))?,
            port: parse_or(&lookup, "PORT", 4000)?,
            env: parse_or(&lookup, "GREENLIGHT_ENV", Environment::Development)?,
            cors_origins,
            request_timeout_secs: parse_or(&lookup, "REQUEST_TIMEOUT_SECS", 30)?,
            shutdown_timeout_secs: parse_or(&lookup, "SHUTDOWN_TIMEOUT_SECS", 30)?,
            db: PoolConfig {
                dsn,
                max_open_conns: parse_or(&lookup, "DB_MAX_OPEN_CONNS", 25)?,
                max_idle_conns: parse_or(&lookup, "DB_MAX_IDLE_CONNS", 25)?,
                max_idle_time: Duration::from_secs(parse_or(
                    &lookup,
                    "DB_MAX_IDLE_TIME_SECS",
                    900,
                )?),
            },
            smtp: SmtpConfig::from_lookup(&lookup)?,
        })
    }
}

/// Parse `var` when present, otherwise return `default`.
pub(crate) fn parse_or<F, T>(lookup: &F, var: &'static str, default: T) -> Result<T, ConfigError>
where
    F: Fn(&str) -> Option<String>,
    T: FromStr,
    T::Err: fmt::Display,
{
    match lookup(var) {
        None => Ok(default),
        Some(value) => {
            let parsed = value.trim().parse::<T>();
            parsed.map_err(|e| ConfigError::Invalid {
                var,
                reason: e.to_string(),
                value,
            })
        }
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use assert_matches::assert_matches;

    use super::*;

    fn lookup(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn defaults_apply() {
        let config =
            ServerConfig::from_lookup(lookup(&[("DATABASE_URL", "postgres://localhost/g")]))
                .unwrap();
        assert_eq!(config.host, IpAddr::V4(Ipv4Addr::UNSPECIFIED));
        assert_eq!(config.port, 4000);
        assert_eq!(config.env, Environment::Development);
        assert_eq!(config.db.dsn, "postgres://localhost/g");
        assert_eq!(config.db.max_open_conns, 25);
        assert_eq!(config.db.max_idle_time, Duration::from_secs(900));
        assert_eq!(config.cors_origins, vec!["http://localhost:3000"]);
        assert!(config.smtp.is_none());
    }

    #[test]
    fn greenlight_dsn_takes_precedence() {
        let config = ServerConfig::from_lookup(lookup(&[
            ("DATABASE_URL", "postgres://fallback/g"),
            ("GREENLIGHT_DB_DSN", "postgres://primary/g"),
        ]))
        .unwrap();
        assert_eq!(config.db.dsn, "postgres://primary/g");
    }

    #[test]
    fn missing_dsn_is_an_error() {
        assert_matches!(
            ServerConfig::from_lookup(lookup(&[])),
            Err(ConfigError::Missing("GREENLIGHT_DB_DSN"))
        );
    }

    #[test]
    fn invalid_values_are_reported() {
        let result = ServerConfig::from_lookup(lookup(&[
            ("DATABASE_URL", "postgres://localhost/g"),
            ("PORT", "http"),
        ]));
        assert_matches!(result, Err(ConfigError::Invalid { var: "PORT", .. }));

        let result = ServerConfig::from_lookup(lookup(&[
            ("DATABASE_URL", "postgres://localhost/g"),
            ("GREENLIGHT_ENV", "qa"),
        ]));
        assert_matches!(result, Err(ConfigError::Invalid { var: "GREENLIGHT_ENV", .. }));

        let result = ServerConfig::from_lookup(lookup(&[
            ("DATABASE_URL", "postgres://localhost/g"),
            ("HOST", "localhost:4000"),
        ]));
        assert_matches!(result, Err(ConfigError::Invalid { var: "HOST", .. }));
    }

    #[test]
    fn host_accepts_ipv4_and_ipv6() {
        let config = ServerConfig::from_lookup(lookup(&[
            ("DATABASE_URL", "postgres://localhost/g"),
            ("HOST", "127.0.0.1"),
        ]))
        .unwrap();
        assert_eq!(config.host, IpAddr::V4(Ipv4Addr::LOCALHOST));

        let config = ServerConfig::from_lookup(lookup(&[
            ("DATABASE_URL", "postgres://localhost/g"),
            ("HOST", "::1"),
        ]))
        .unwrap();
        assert!(config.host.is_ipv6());
    }

    #[test]
    fn cors_origins_are_split_and_trimmed() {
        let config = ServerConfig::from_lookup(lookup(&[
            ("DATABASE_URL", "postgres://localhost/g"),
            ("CORS_ORIGINS", "http://a.test, http://b.test,,"),
        ]))
        .unwrap();
        assert_eq!(config.cors_origins, vec!["http://a.test", "http://b.test"]);
    }
}

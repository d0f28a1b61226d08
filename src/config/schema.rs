//! Configuration schema definitions.
//!
//! All types derive Serde traits for deserialization from TOML files. Every
//! field has a default, so an empty file is a valid configuration.

use std::io;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::config::loader::ConfigError;
use crate::logging::format::Flags;
use crate::logging::level::Level;
use crate::logging::logger::{sink, Logger};

/// Environment variable naming the deployment environment.
pub const ENV_VAR: &str = "APP_ENV";

/// Prefix used by RPC interceptor loggers unless configured otherwise.
pub const DEFAULT_RPC_PREFIX: &str = "gRPC: ";

/// Deployment environment. Selects the default threshold.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Environment {
    #[default]
    Development,
    Test,
    Production,
}

impl Environment {
    /// `development` → Debug, `test` → Quiet, `production` → Info.
    pub fn default_threshold(self) -> Level {
        match self {
            Environment::Development => Level::Debug,
            Environment::Test => Level::Quiet,
            Environment::Production => Level::Info,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Environment::Development => "development",
            Environment::Test => "test",
            Environment::Production => "production",
        }
    }

    /// Lenient reading of a raw environment value.
    ///
    /// Unset and empty values mean development. Unrecognized values also fall
    /// back to development, with a warning.
    pub fn from_value(value: Option<&str>) -> Self {
        match value.map(str::trim) {
            None | Some("") => Environment::Development,
            Some(raw) => raw.parse().unwrap_or_else(|_| {
                tracing::warn!(
                    variable = ENV_VAR,
                    value = %raw,
                    "Unrecognized environment, falling back to development"
                );
                Environment::Development
            }),
        }
    }

    /// Read [`ENV_VAR`] leniently.
    pub fn from_env() -> Self {
        Self::from_value(std::env::var(ENV_VAR).ok().as_deref())
    }

    /// Read [`ENV_VAR`] strictly: unset or empty is development, anything
    /// else must name a known environment.
    pub fn try_from_env() -> Result<Self, ConfigError> {
        match std::env::var(ENV_VAR) {
            Ok(raw) if !raw.trim().is_empty() => raw.parse(),
            _ => Ok(Environment::Development),
        }
    }
}

impl FromStr for Environment {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "development" => Ok(Environment::Development),
            "test" => Ok(Environment::Test),
            "production" => Ok(Environment::Production),
            other => Err(ConfigError::UnknownEnvironment(other.to_string())),
        }
    }
}

impl std::fmt::Display for Environment {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Root logging configuration.
#[derive(Debug, Clone, Deserialize, Serialize, Default)]
#[serde(default)]
pub struct LoggingConfig {
    /// Deployment environment. Read from [`ENV_VAR`] when absent.
    pub environment: Option<Environment>,

    /// Explicit threshold, overriding the environment default.
    pub level: Option<Level>,

    /// Prefix for lines written by [`LoggingConfig::build_logger`].
    pub prefix: String,

    /// Built-in line annotations.
    pub flags: FlagsConfig,

    /// Middleware logger settings.
    pub middleware: MiddlewareConfig,
}

impl LoggingConfig {
    pub fn environment(&self) -> Environment {
        self.environment.unwrap_or_else(Environment::from_env)
    }

    /// Effective threshold: explicit level, else the environment default.
    pub fn threshold(&self) -> Level {
        self.threshold_for(self.environment())
    }

    fn threshold_for(&self, environment: Environment) -> Level {
        self.level.unwrap_or_else(|| environment.default_threshold())
    }

    /// Stdout logger with the configured prefix.
    pub fn build_logger(&self) -> Logger {
        self.logger_with_prefix(&self.prefix)
    }

    /// Stdout logger for RPC interceptors.
    pub fn rpc_logger(&self) -> Logger {
        self.logger_with_prefix(&self.middleware.rpc_prefix)
    }

    /// Stdout logger for the HTTP middleware.
    pub fn http_logger(&self) -> Logger {
        self.logger_with_prefix(&self.middleware.http_prefix)
    }

    fn logger_with_prefix(&self, prefix: &str) -> Logger {
        let environment = self.environment();
        let threshold = self.threshold_for(environment);
        tracing::debug!(
            environment = %environment,
            threshold = %threshold,
            prefix = %prefix,
            "Building logger from configuration"
        );
        Logger::from_sink(sink(io::stdout()), prefix, Flags::from(&self.flags), threshold)
    }
}

/// Line annotation switches. See [`Flags`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default)]
pub struct FlagsConfig {
    pub date: bool,
    pub time: bool,
    pub microseconds: bool,
    pub utc: bool,
    pub msg_prefix: bool,
}

impl From<&FlagsConfig> for Flags {
    fn from(config: &FlagsConfig) -> Self {
        let mut flags = Flags::NONE;
        for (enabled, flag) in [
            (config.date, Flags::DATE),
            (config.time, Flags::TIME),
            (config.microseconds, Flags::MICROSECONDS),
            (config.utc, Flags::UTC),
            (config.msg_prefix, Flags::MSG_PREFIX),
        ] {
            if enabled {
                flags |= flag;
            }
        }
        flags
    }
}

/// Middleware logger settings.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default)]
pub struct MiddlewareConfig {
    /// Prefix for unary and streaming interceptor lines.
    pub rpc_prefix: String,

    /// Prefix for HTTP middleware lines.
    pub http_prefix: String,
}

impl Default for MiddlewareConfig {
    fn default() -> Self {
        Self {
            rpc_prefix: DEFAULT_RPC_PREFIX.to_string(),
            http_prefix: String::new(),
        }
    }
}

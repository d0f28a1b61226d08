//! Environment-driven logger construction.
//!
//! Loggers built here write to stdout with no annotation flags and take
//! their threshold from [`ENV_VAR`]: development → Debug, test → Quiet,
//! production → Info. Unset or empty means development.
//!
//! Unrecognized values fall back to development with a warning; use
//! [`try_new_with_prefix`] to reject them instead.

use std::io;

use crate::config::loader::ConfigError;
use crate::config::schema::{Environment, ENV_VAR};
use crate::logging::format::Flags;
use crate::logging::logger::{sink, Logger};

/// Stdout logger without a prefix.
pub fn new_default() -> Logger {
    new_with_prefix("")
}

/// Stdout logger whose lines start with `prefix`.
///
/// Unlike [`Logger::with_prefix`], the threshold comes from the environment.
pub fn new_with_prefix(prefix: &str) -> Logger {
    for_environment(Environment::from_env(), prefix)
}

/// Strict form of [`new_with_prefix`]: an unknown environment is an error.
pub fn try_new_with_prefix(prefix: &str) -> Result<Logger, ConfigError> {
    Ok(for_environment(Environment::try_from_env()?, prefix))
}

/// Apply the lenient environment rule to a raw variable value.
pub fn from_env_value(value: Option<&str>, prefix: &str) -> Logger {
    for_environment(Environment::from_value(value), prefix)
}

pub fn for_environment(environment: Environment, prefix: &str) -> Logger {
    let threshold = environment.default_threshold();
    tracing::debug!(
        variable = ENV_VAR,
        environment = %environment,
        threshold = %threshold,
        "Logger created"
    );
    Logger::from_sink(sink(io::stdout()), prefix, Flags::NONE, threshold)
}

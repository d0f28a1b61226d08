//! Configuration management subsystem.
//!
//! # Data Flow
//! ```text
//! config file (TOML)            APP_ENV
//!     → loader.rs (parse)          → schema.rs Environment (lenient or strict)
//!     → LoggingConfig ─────────────┘
//!     → build_logger / rpc_logger / http_logger
//! ```
//!
//! # Design Decisions
//! - Explicit `level` wins over the environment default
//! - An environment named in a file is parsed strictly; the variable is
//!   read leniently by the factory and strictly by `try_from_env`

pub mod loader;
pub mod schema;

pub use loader::{load_config, parse_config, ConfigError};
pub use schema::{Environment, FlagsConfig, LoggingConfig, MiddlewareConfig, ENV_VAR};

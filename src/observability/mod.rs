//! Observability subsystem.
//!
//! # Data Flow
//! ```text
//! crate diagnostics (factory fallback, config loading)
//!     → tracing macros
//!     → logging.rs LevelFormatter (same layout as Logger lines)
//!     → stdout
//! ```
//!
//! # Design Decisions
//! - Installing a global subscriber is left to the application
//! - `RUST_LOG` overrides the environment-derived threshold

pub mod logging;

pub use logging::{init_tracing, init_tracing_from_env, LevelFormatter};

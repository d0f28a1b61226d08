//! Leveled console logging.
//!
//! # Data Flow
//! ```text
//! APP_ENV / LoggingConfig
//!     → factory.rs (environment → threshold)
//!     → logger.rs Logger (threshold, prefix, flags, sink)
//!     → emit(level, entries)
//!         → gate: level >= threshold
//!         → format.rs (header, "<tag> | <timestamp> | ")
//!         → one locked write per line
//! ```
//!
//! # Design Decisions
//! - Loggers are immutable; `with_*` returns a new logger sharing the sink
//! - `Log` is the capability consumers depend on; `testing` has doubles

pub mod factory;
pub mod format;
pub mod level;
pub mod logger;
pub mod testing;

pub use format::Flags;
pub use level::{Level, ParseLevelError};
pub use logger::{sink, Log, Logger, Sink};

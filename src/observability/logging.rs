//! `tracing` integration.
//!
//! Renders tracing events in the same layout as [`Logger`] lines, so an
//! application mixing both gets uniform console output:
//!
//! ```text
//! [WARN] | Oct 16 09:12:44.120931 | disk almost full disk=91
//! ```
//!
//! [`Logger`]: crate::logging::Logger

use std::fmt;

use chrono::Local;
use tracing::{Event, Subscriber};
use tracing_subscriber::fmt::format::{FormatEvent, FormatFields, Writer};
use tracing_subscriber::fmt::FmtContext;
use tracing_subscriber::registry::LookupSpan;
use tracing_subscriber::util::{SubscriberInitExt, TryInitError};
use tracing_subscriber::{layer::SubscriberExt, EnvFilter};

use crate::config::schema::Environment;
use crate::logging::format::level_and_time;
use crate::logging::level::Level;

/// Event formatter producing `<prefix><tag> | <timestamp> | <fields>`.
#[derive(Debug, Clone, Default)]
pub struct LevelFormatter {
    prefix: String,
}

impl LevelFormatter {
    pub fn with_prefix(prefix: impl Into<String>) -> Self {
        Self {
            prefix: prefix.into(),
        }
    }
}

impl<S, N> FormatEvent<S, N> for LevelFormatter
where
    S: Subscriber + for<'a> LookupSpan<'a>,
    N: for<'a> FormatFields<'a> + 'static,
{
    fn format_event(
        &self,
        ctx: &FmtContext<'_, S, N>,
        mut writer: Writer<'_>,
        event: &Event<'_>,
    ) -> fmt::Result {
        let level = Level::from(*event.metadata().level());
        write!(writer, "{}{}", self.prefix, level_and_time(level, &Local::now()))?;
        ctx.format_fields(writer.by_ref(), event)?;
        writeln!(writer)
    }
}

/// Install a global subscriber using [`LevelFormatter`].
///
/// `RUST_LOG` takes precedence; otherwise events below `threshold` are
/// filtered out.
pub fn init_tracing(threshold: Level) -> Result<(), TryInitError> {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::default().add_directive(threshold.to_level_filter().into()));

    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer().event_format(LevelFormatter::default()))
        .try_init()
}

/// [`init_tracing`] at the threshold selected by `APP_ENV`.
pub fn init_tracing_from_env() -> Result<(), TryInitError> {
    init_tracing(Environment::from_env().default_threshold())
}

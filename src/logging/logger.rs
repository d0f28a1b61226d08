//! The logger and its capability trait.

use std::fmt::{self, Display, Write as _};
use std::io::{self, Write};
use std::sync::{Arc, Mutex};

use chrono::{Local, Utc};

use crate::logging::format::{self, Flags};
use crate::logging::level::Level;

/// Shared, serialized output destination.
///
/// Every line is written with a single `write_all` while the lock is held,
/// so concurrent emitters never interleave partial lines.
pub type Sink = Arc<Mutex<dyn Write + Send>>;

/// Wrap a writer as a [`Sink`].
pub fn sink<W: Write + Send + 'static>(writer: W) -> Sink {
    Arc::new(Mutex::new(writer))
}

/// Leveled logging capability.
///
/// Entries are rendered with `Display` and joined by single spaces. The
/// `*f` variants take pre-built [`fmt::Arguments`]; see the [`infof!`]
/// family of macros.
///
/// [`infof!`]: crate::infof
pub trait Log: Send + Sync {
    /// Current threshold. Lines below it are dropped.
    fn threshold(&self) -> Level;

    /// Emit `entries` at `level` if the threshold allows it.
    fn emit(&self, level: Level, entries: &[&dyn Display]);

    fn emitf(&self, level: Level, args: fmt::Arguments<'_>) {
        self.emit(level, &[&args]);
    }

    /// Whether a line at `level` would be written.
    fn enabled(&self, level: Level) -> bool {
        level != Level::Quiet && level >= self.threshold()
    }

    fn debug(&self, entries: &[&dyn Display]) {
        self.emit(Level::Debug, entries);
    }

    fn debugf(&self, args: fmt::Arguments<'_>) {
        self.emitf(Level::Debug, args);
    }

    fn info(&self, entries: &[&dyn Display]) {
        self.emit(Level::Info, entries);
    }

    fn infof(&self, args: fmt::Arguments<'_>) {
        self.emitf(Level::Info, args);
    }

    fn warn(&self, entries: &[&dyn Display]) {
        self.emit(Level::Warn, entries);
    }

    fn warnf(&self, args: fmt::Arguments<'_>) {
        self.emitf(Level::Warn, args);
    }

    fn error(&self, entries: &[&dyn Display]) {
        self.emit(Level::Error, entries);
    }

    fn errorf(&self, args: fmt::Arguments<'_>) {
        self.emitf(Level::Error, args);
    }
}

impl<L: Log + ?Sized> Log for Arc<L> {
    fn threshold(&self) -> Level {
        (**self).threshold()
    }

    fn emit(&self, level: Level, entries: &[&dyn Display]) {
        (**self).emit(level, entries);
    }

    fn emitf(&self, level: Level, args: fmt::Arguments<'_>) {
        (**self).emitf(level, args);
    }

    fn enabled(&self, level: Level) -> bool {
        (**self).enabled(level)
    }
}

/// Console logger: threshold, prefix, annotation flags and a shared sink.
///
/// A `Logger` is never changed after construction. The `with_*` methods
/// return independent loggers that share only the sink handle.
#[derive(Clone)]
pub struct Logger {
    sink: Sink,
    prefix: String,
    flags: Flags,
    threshold: Level,
}

impl Logger {
    /// Create a logger writing to `writer` with no prefix and no flags.
    pub fn new<W: Write + Send + 'static>(writer: W, threshold: Level) -> Self {
        Self::from_sink(sink(writer), String::new(), Flags::NONE, threshold)
    }

    /// Create a logger writing to standard output.
    pub fn stdout(threshold: Level) -> Self {
        Self::new(io::stdout(), threshold)
    }

    pub fn from_sink(sink: Sink, prefix: impl Into<String>, flags: Flags, threshold: Level) -> Self {
        Self {
            sink,
            prefix: prefix.into(),
            flags,
            threshold,
        }
    }

    pub fn prefix(&self) -> &str {
        &self.prefix
    }

    pub fn flags(&self) -> Flags {
        self.flags
    }

    /// Handle to the underlying sink.
    pub fn sink(&self) -> Sink {
        Arc::clone(&self.sink)
    }

    /// Same sink, prefix and flags with a different threshold.
    pub fn with_threshold(&self, threshold: Level) -> Self {
        Self {
            threshold,
            ..self.clone()
        }
    }

    /// Same sink and flags with a new prefix.
    ///
    /// The threshold is reset to [`Level::Debug`], whatever the source
    /// logger was gating at. Chain [`Logger::with_threshold`] to restore it.
    pub fn with_prefix(&self, prefix: impl Into<String>) -> Self {
        Self {
            sink: Arc::clone(&self.sink),
            prefix: prefix.into(),
            flags: self.flags,
            threshold: Level::Debug,
        }
    }

    /// Same prefix, flags and threshold writing to `writer`.
    pub fn with_sink<W: Write + Send + 'static>(&self, writer: W) -> Self {
        Self {
            sink: sink(writer),
            ..self.clone()
        }
    }

    /// Same sink, prefix and threshold with different annotation flags.
    pub fn with_flags(&self, flags: Flags) -> Self {
        Self {
            flags,
            ..self.clone()
        }
    }

    fn render(&self, level: Level, entries: &[&dyn Display]) -> String {
        let mut line = String::with_capacity(64 + self.prefix.len());
        if !self.flags.contains(Flags::MSG_PREFIX) {
            line.push_str(&self.prefix);
        }
        line.push_str(&format::header(self.flags, &Utc::now()));
        if self.flags.contains(Flags::MSG_PREFIX) {
            line.push_str(&self.prefix);
        }
        line.push_str(&format::level_and_time(level, &Local::now()));

        for (i, entry) in entries.iter().enumerate() {
            if i > 0 {
                line.push(' ');
            }
            // Writing into a String only fails if a Display impl reports an error.
            let _ = write!(line, "{}", entry);
        }
        line.push('\n');
        line
    }
}

impl Log for Logger {
    fn threshold(&self) -> Level {
        self.threshold
    }

    fn emit(&self, level: Level, entries: &[&dyn Display]) {
        if !self.enabled(level) {
            return;
        }

        let line = self.render(level, entries);
        let mut sink = self.sink.lock().unwrap_or_else(|poisoned| poisoned.into_inner());
        let _ = sink.write_all(line.as_bytes());
    }
}

impl fmt::Debug for Logger {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Logger")
            .field("prefix", &self.prefix)
            .field("flags", &self.flags)
            .field("threshold", &self.threshold)
            .finish_non_exhaustive()
    }
}

/// Emit a formatted line at debug level: `debugf!(logger, "x = {}", x)`.
#[macro_export]
macro_rules! debugf {
    ($logger:expr, $($arg:tt)+) => {{
        use $crate::logging::Log as _;
        $logger.debugf(::std::format_args!($($arg)+))
    }};
}

/// Emit a formatted line at info level.
#[macro_export]
macro_rules! infof {
    ($logger:expr, $($arg:tt)+) => {{
        use $crate::logging::Log as _;
        $logger.infof(::std::format_args!($($arg)+))
    }};
}

/// Emit a formatted line at warn level.
#[macro_export]
macro_rules! warnf {
    ($logger:expr, $($arg:tt)+) => {{
        use $crate::logging::Log as _;
        $logger.warnf(::std::format_args!($($arg)+))
    }};
}

/// Emit a formatted line at error level.
#[macro_export]
macro_rules! errorf {
    ($logger:expr, $($arg:tt)+) => {{
        use $crate::logging::Log as _;
        $logger.errorf(::std::format_args!($($arg)+))
    }};
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::logging::testing::SharedBuffer;

    fn buffered(threshold: Level) -> (Logger, SharedBuffer) {
        let buffer = SharedBuffer::new();
        (Logger::new(buffer.clone(), threshold), buffer)
    }

    fn message(line: &str) -> &str {
        line.splitn(3, " | ").nth(2).unwrap_or_default()
    }

    #[test]
    fn emits_only_at_or_above_threshold() {
        for threshold in [Level::Debug, Level::Info, Level::Warn, Level::Error, Level::Quiet] {
            let (logger, buffer) = buffered(threshold);
            for level in Level::EMITTABLE {
                logger.emit(level, &[&"x"]);
            }
            let expected = Level::EMITTABLE.iter().filter(|l| **l >= threshold).count();
            assert_eq!(buffer.plain_lines().len(), expected, "threshold {threshold}");
        }
    }

    #[test]
    fn quiet_is_never_emitted_as_a_level() {
        let (logger, buffer) = buffered(Level::Debug);
        logger.emit(Level::Quiet, &[&"nothing"]);
        assert!(buffer.contents().is_empty());
    }

    #[test]
    fn entries_are_space_joined_with_one_newline() {
        let (logger, buffer) = buffered(Level::Debug);
        logger.info(&[&"user", &42, &'x', &1.5]);

        let contents = buffer.plain_contents();
        assert!(contents.ends_with('\n'));
        assert_eq!(contents.matches('\n').count(), 1);

        let lines = buffer.plain_lines();
        assert!(lines[0].starts_with("[INFO] | "));
        assert_eq!(message(&lines[0]), "user 42 x 1.5");
    }

    #[test]
    fn formatted_variants_render_arguments() {
        let (logger, buffer) = buffered(Level::Debug);
        logger.errorf(format_args!("{} failed after {} tries", "sync", 3));
        crate::warnf!(logger, "disk at {}%", 91);

        let lines = buffer.plain_lines();
        assert!(lines[0].starts_with("[ERROR] | "));
        assert_eq!(message(&lines[0]), "sync failed after 3 tries");
        assert!(lines[1].starts_with("[WARN] | "));
        assert_eq!(message(&lines[1]), "disk at 91%");
    }

    #[test]
    fn with_threshold_leaves_original_untouched() {
        let (logger, buffer) = buffered(Level::Debug);
        let strict = logger.with_threshold(Level::Error);

        assert_eq!(logger.threshold(), Level::Debug);
        assert_eq!(strict.threshold(), Level::Error);

        strict.debug(&[&"dropped"]);
        logger.debug(&[&"kept"]);
        let lines = buffer.plain_lines();
        assert_eq!(lines.len(), 1);
        assert_eq!(message(&lines[0]), "kept");
    }

    #[test]
    fn with_prefix_resets_threshold_and_prefixes_lines() {
        let (logger, buffer) = buffered(Level::Error);
        let prefixed = logger.with_prefix("api: ");

        assert_eq!(prefixed.threshold(), Level::Debug);
        assert_eq!(prefixed.prefix(), "api: ");
        assert_eq!(logger.prefix(), "");

        prefixed.debug(&[&"hello"]);
        let lines = buffer.plain_lines();
        assert_eq!(lines.len(), 1);
        assert!(lines[0].starts_with("api: [DEBUG] | "));
    }

    #[test]
    fn with_sink_keeps_prefix_and_threshold() {
        let (logger, first) = buffered(Level::Warn);
        let logger = logger.with_prefix("svc: ").with_threshold(Level::Warn);
        let second = SharedBuffer::new();
        let moved = logger.with_sink(second.clone());

        assert_eq!(moved.prefix(), "svc: ");
        assert_eq!(moved.threshold(), Level::Warn);

        moved.warn(&[&"to second"]);
        moved.info(&[&"dropped"]);
        assert!(first.contents().is_empty());
        assert_eq!(second.plain_lines().len(), 1);
        assert!(second.plain_lines()[0].starts_with("svc: [WARN] | "));
    }

    #[test]
    fn msg_prefix_flag_moves_prefix_after_header() {
        let (logger, buffer) = buffered(Level::Debug);
        let logger = logger
            .with_prefix("job: ")
            .with_flags(Flags::DATE | Flags::MSG_PREFIX | Flags::UTC);
        logger.info(&[&"done"]);

        let line = &buffer.plain_lines()[0];
        // "YYYY/MM/DD " precedes the prefix.
        assert_eq!(&line[4..5], "/");
        assert_eq!(&line[11..16], "job: ");
        assert!(line[16..].starts_with("[INFO] | "));
    }

    #[test]
    fn derived_loggers_share_the_sink() {
        let (logger, buffer) = buffered(Level::Debug);
        let other = logger.with_threshold(Level::Info);
        logger.info(&[&"one"]);
        other.info(&[&"two"]);
        assert_eq!(buffer.plain_lines().len(), 2);
        assert!(Arc::ptr_eq(&logger.sink(), &other.sink()));
    }

    #[test]
    fn concurrent_writers_never_interleave_lines() {
        let (logger, buffer) = buffered(Level::Debug);
        let handles: Vec<_> = (0..8)
            .map(|worker| {
                let logger = logger.clone();
                std::thread::spawn(move || {
                    for i in 0..50 {
                        logger.info(&[&"worker", &worker, &"line", &i]);
                    }
                })
            })
            .collect();
        for handle in handles {
            handle.join().unwrap();
        }

        let lines = buffer.plain_lines();
        assert_eq!(lines.len(), 400);
        for line in lines {
            let msg = message(&line);
            assert!(msg.starts_with("worker "), "{line}");
            assert_eq!(msg.split(' ').count(), 4, "{line}");
        }
    }

    #[test]
    fn arc_dyn_log_forwards() {
        let buffer = SharedBuffer::new();
        let logger: Arc<dyn Log> = Arc::new(Logger::new(buffer.clone(), Level::Info));
        assert!(!logger.enabled(Level::Debug));
        crate::infof!(logger, "{}", "via arc");
        assert_eq!(message(&buffer.plain_lines()[0]), "via arc");
    }

    /// Formats `*f` calls itself and records which path was taken.
    struct FormattingLog {
        formatted: Mutex<Vec<String>>,
    }

    impl Log for FormattingLog {
        fn threshold(&self) -> Level {
            Level::Debug
        }

        fn emit(&self, _level: Level, _entries: &[&dyn Display]) {
            panic!("emitf should not route through emit");
        }

        fn emitf(&self, level: Level, args: fmt::Arguments<'_>) {
            self.formatted.lock().unwrap().push(format!("{level}: {args}"));
        }
    }

    #[test]
    fn arc_dyn_log_keeps_custom_emitf() {
        let inner = Arc::new(FormattingLog { formatted: Mutex::new(Vec::new()) });
        let logger: Arc<dyn Log> = inner.clone();

        crate::warnf!(logger, "disk at {}%", 91);
        logger.errorf(format_args!("gone"));

        assert_eq!(
            *inner.formatted.lock().unwrap(),
            vec!["warn: disk at 91%".to_string(), "error: gone".to_string()]
        );
    }
}

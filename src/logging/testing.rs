//! Test doubles for asserting on emitted lines without a real console.

use std::fmt::{Display, Write as _};
use std::io::{self, Write};
use std::sync::{Arc, Mutex, MutexGuard};

use crate::logging::level::Level;
use crate::logging::logger::Log;

/// In-memory writer that can be cloned into a [`Logger`] and read back.
///
/// [`Logger`]: crate::logging::Logger
#[derive(Debug, Clone, Default)]
pub struct SharedBuffer {
    bytes: Arc<Mutex<Vec<u8>>>,
}

impl SharedBuffer {
    pub fn new() -> Self {
        Self::default()
    }

    fn bytes(&self) -> MutexGuard<'_, Vec<u8>> {
        self.bytes.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    /// Everything written so far, lossily decoded.
    pub fn contents(&self) -> String {
        String::from_utf8_lossy(&self.bytes()).into_owned()
    }

    /// [`SharedBuffer::contents`] with terminal escapes removed.
    pub fn plain_contents(&self) -> String {
        strip_ansi(&self.contents())
    }

    /// Escape-free lines, without their terminators.
    pub fn plain_lines(&self) -> Vec<String> {
        self.plain_contents().lines().map(str::to_owned).collect()
    }

    pub fn clear(&self) {
        self.bytes().clear();
    }
}

impl Write for SharedBuffer {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.bytes().extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

/// Force ANSI styling on for the rest of the process.
///
/// The override is global and never reset; every other assertion in the
/// crate compares output through [`strip_ansi`], so it is unaffected.
pub fn force_colors() {
    colored::control::set_override(true);
}

/// Remove ANSI CSI sequences (`ESC [ ... final-byte`).
pub fn strip_ansi(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    let mut chars = input.chars().peekable();
    while let Some(c) = chars.next() {
        if c == '\u{1b}' && chars.peek() == Some(&'[') {
            chars.next();
            for c in chars.by_ref() {
                if ('@'..='~').contains(&c) {
                    break;
                }
            }
            continue;
        }
        out.push(c);
    }
    out
}

/// One captured emission.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Record {
    pub level: Level,
    pub message: String,
}

/// [`Log`] implementation that records messages instead of writing them.
///
/// Gating follows the same rule as [`Logger`](crate::logging::Logger);
/// messages are stored without tag, timestamp or escapes.
#[derive(Debug, Default)]
pub struct RecordingLog {
    threshold: Level,
    records: Mutex<Vec<Record>>,
}

impl RecordingLog {
    pub fn new(threshold: Level) -> Self {
        Self {
            threshold,
            records: Mutex::new(Vec::new()),
        }
    }

    pub fn records(&self) -> Vec<Record> {
        self.records
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .clone()
    }

    pub fn messages(&self) -> Vec<String> {
        self.records().into_iter().map(|r| r.message).collect()
    }
}

impl Log for RecordingLog {
    fn threshold(&self) -> Level {
        self.threshold
    }

    fn emit(&self, level: Level, entries: &[&dyn Display]) {
        if !self.enabled(level) {
            return;
        }
        let mut message = String::new();
        for (i, entry) in entries.iter().enumerate() {
            if i > 0 {
                message.push(' ');
            }
            let _ = write!(message, "{}", entry);
        }
        self.records
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .push(Record {
                level,
                message: strip_ansi(&message),
            });
    }
}

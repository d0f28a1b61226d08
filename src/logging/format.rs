//! Line prefix rendering.
//!
//! Two independent pieces make up the front of a line: the optional
//! date/time header controlled by [`Flags`], and the `<tag> | <timestamp> | `
//! prefix every emitted line carries.

use std::ops::{BitOr, BitOrAssign};

use chrono::{DateTime, Local, Utc};

use crate::logging::level::Level;

/// `Jan _2 15:04:05.000000` with the day padded by a space.
const STAMP_MICRO: &str = "%b %e %H:%M:%S%.6f";

/// Built-in line annotations.
///
/// Loggers built by the factory use [`Flags::NONE`]; the level prefix
/// already carries a timestamp.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Flags(u8);

impl Flags {
    pub const NONE: Flags = Flags(0);
    /// `2009/01/23 `
    pub const DATE: Flags = Flags(1);
    /// `01:23:23 `
    pub const TIME: Flags = Flags(1 << 1);
    /// `.123123` after the time. Implies [`Flags::TIME`].
    pub const MICROSECONDS: Flags = Flags(1 << 2);
    /// Render the header in UTC rather than local time.
    pub const UTC: Flags = Flags(1 << 3);
    /// Place the prefix just before the message instead of at line start.
    pub const MSG_PREFIX: Flags = Flags(1 << 4);

    pub const fn bits(self) -> u8 {
        self.0
    }

    pub const fn contains(self, other: Flags) -> bool {
        self.0 & other.0 == other.0
    }

    pub const fn is_empty(self) -> bool {
        self.0 == 0
    }
}

impl BitOr for Flags {
    type Output = Flags;

    fn bitor(self, rhs: Flags) -> Flags {
        Flags(self.0 | rhs.0)
    }
}

impl BitOrAssign for Flags {
    fn bitor_assign(&mut self, rhs: Flags) {
        self.0 |= rhs.0;
    }
}

/// Microsecond-precision local timestamp in stamp style.
pub fn timestamp(now: &DateTime<Local>) -> String {
    now.format(STAMP_MICRO).to_string()
}

/// `"<tag> | <timestamp> | "`
pub fn level_and_time(level: Level, now: &DateTime<Local>) -> String {
    format!("{} | {} | ", level.tag(), timestamp(now))
}

/// Date/time header selected by `flags`; empty when no time flag is set.
pub fn header(flags: Flags, now: &DateTime<Utc>) -> String {
    let wants_time = flags.contains(Flags::TIME) || flags.contains(Flags::MICROSECONDS);
    if !flags.contains(Flags::DATE) && !wants_time {
        return String::new();
    }

    let at = if flags.contains(Flags::UTC) {
        now.naive_utc()
    } else {
        now.with_timezone(&Local).naive_local()
    };

    let mut out = String::with_capacity(27);
    if flags.contains(Flags::DATE) {
        out.push_str(&at.format("%Y/%m/%d ").to_string());
    }
    if wants_time {
        out.push_str(&at.format("%H:%M:%S").to_string());
        if flags.contains(Flags::MICROSECONDS) {
            out.push_str(&at.format("%.6f").to_string());
        }
        out.push(' ');
    }
    out
}

//! Outcome badges for middleware lines.

use colored::Colorize;

/// Response status classification.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusBand {
    /// Below 400.
    Success,
    /// 400..500.
    ClientError,
    /// 500 and above.
    ServerError,
}

impl StatusBand {
    pub fn classify(status: u16) -> Self {
        match status {
            0..=399 => StatusBand::Success,
            400..=499 => StatusBand::ClientError,
            _ => StatusBand::ServerError,
        }
    }
}

/// Green ` OK ` badge.
pub fn ok_badge() -> String {
    " OK ".on_green().bold().to_string()
}

/// Red ` ERROR ` badge.
pub fn error_badge() -> String {
    " ERROR ".on_red().bold().to_string()
}

/// Badge for an RPC outcome.
pub fn rpc_badge(failed: bool) -> String {
    if failed {
        error_badge()
    } else {
        ok_badge()
    }
}

/// ` <status> ` on green, yellow or red depending on its band.
pub fn status_badge(status: u16) -> String {
    let text = format!(" {} ", status);
    let badge = match StatusBand::classify(status) {
        StatusBand::Success => text.on_green(),
        StatusBand::ClientError => text.on_yellow(),
        StatusBand::ServerError => text.on_red(),
    };
    badge.bold().to_string()
}

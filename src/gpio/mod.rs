use embedded_hal::digital::{Error, ErrorKind};
use thiserror::Error as ThisError;

pub mod driver;
pub mod lines;
pub mod mock;
pub mod pinmap;

/// Hardware revision of the board, as reported by the GPIO driver.
///
/// The revision decides which physical header positions carry a chip pin
/// and which chip pin that is; see [`pinmap`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BoardRevision {
    Rev1,
    Rev2,
    Rev3,
}

/// Pin numbering scheme.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NumberingMode {
    /// Physical header position, as printed on the board.
    Board,
    /// Chip-level (BCM) pin number, as the driver sees it.
    Bcm,
}

impl NumberingMode {
    /// Parses the persisted settings value. Unknown strings yield `None`,
    /// which blocks hardware setup until the setting is corrected.
    pub fn from_setting(raw: &str) -> Option<Self> {
        match raw {
            "BOARD" => Some(NumberingMode::Board),
            "BCM" => Some(NumberingMode::Bcm),
            _ => None,
        }
    }
}

/// Logic level on a line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Level {
    Low,
    High,
}

impl From<bool> for Level {
    fn from(value: bool) -> Self {
        if value {
            Level::High
        } else {
            Level::Low
        }
    }
}

impl From<Level> for bool {
    fn from(level: Level) -> Self {
        matches!(level, Level::High)
    }
}

/// Idle-state bias applied to an input line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PullMode {
    None,
    PullUp,
    PullDown,
}

impl PullMode {
    /// Parses the persisted settings value. The empty string and anything
    /// unrecognized mean "no pull", matching the settings defaults.
    pub fn from_setting(raw: &str) -> Self {
        match raw {
            "PULL_UP" => PullMode::PullUp,
            "PULL_DOWN" => PullMode::PullDown,
            _ => PullMode::None,
        }
    }
}

/// Errors arising from pin translation or driver interaction.
///
/// These stay inside the crate: the facade operations flatten them into a
/// logged warning plus a default value, so the host control loop never sees
/// a raw driver fault.
#[derive(Debug, Clone, PartialEq, Eq, ThisError)]
pub enum GpioError {
    #[error("pin {pin} is out of range or unmapped on this board revision")]
    InvalidPin { pin: i64 },
    #[error("failed to claim pin {pin}: {reason}")]
    Claim { pin: u8, reason: String },
    #[error("I/O failure on pin {pin}: {reason}")]
    Io { pin: u8, reason: String },
    #[error("GPIO numbering mode not established")]
    NoNumberingMode,
}

impl Error for GpioError {
    fn kind(&self) -> ErrorKind {
        ErrorKind::Other
    }
}

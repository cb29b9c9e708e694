//! The driver facade the platform GPIO library must provide.

use super::{BoardRevision, GpioError, Level, NumberingMode, PullMode};

/// Chip-level GPIO driver operations.
///
/// The driver owns the process-wide numbering mode: once established it is
/// read, never re-set, and any mismatch with the configured scheme is
/// resolved by translation in [`pinmap`](super::pinmap). Pin numbers passed
/// here are already in the driver's active scheme.
///
/// Implementations come from the platform; this crate only consumes the
/// trait and ships [`MockDriver`](super::mock::MockDriver) for tests and
/// host-side simulation.
pub trait BoardDriver {
    /// Board revision, detected once at startup.
    fn revision(&self) -> BoardRevision;

    /// The active numbering mode, `None` until first established.
    fn numbering_mode(&self) -> Option<NumberingMode>;

    /// Establishes the numbering mode. Only ever called when no mode is
    /// active yet.
    fn set_numbering_mode(&mut self, mode: NumberingMode);

    /// Silences driver-level warnings about reused lines.
    fn suppress_warnings(&mut self, suppress: bool);

    /// Claims a line as an input with the given pull bias.
    fn claim_input(&mut self, pin: u8, pull: PullMode) -> Result<(), GpioError>;

    /// Claims a line as an output, driving it to `initial` immediately.
    fn claim_output(&mut self, pin: u8, initial: Level) -> Result<(), GpioError>;

    /// Releases a previously claimed line.
    fn release(&mut self, pin: u8) -> Result<(), GpioError>;

    /// Drives a claimed output line.
    fn write(&mut self, pin: u8, level: Level) -> Result<(), GpioError>;

    /// Samples a claimed line.
    fn read(&mut self, pin: u8) -> Result<Level, GpioError>;

    /// Driver/library version string, for the startup log.
    fn version(&self) -> &str;
}

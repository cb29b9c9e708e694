//! In-memory driver for tests and host-side simulation.

use std::collections::HashMap;

use super::driver::BoardDriver;
use super::{BoardRevision, GpioError, Level, NumberingMode, PullMode};

/// One recorded driver invocation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DriverCall {
    SetNumberingMode(NumberingMode),
    SuppressWarnings(bool),
    ClaimInput { pin: u8, pull: PullMode },
    ClaimOutput { pin: u8, initial: Level },
    Release { pin: u8 },
    Write { pin: u8, level: Level },
    Read { pin: u8 },
}

/// Records every driver call and simulates per-pin faults.
///
/// A claim of an already-claimed pin is refused, as the real driver would.
/// Injected failures still leave the call in the log so tests can assert
/// that an attempt was made.
#[derive(Debug)]
pub struct MockDriver {
    revision: BoardRevision,
    mode: Option<NumberingMode>,
    calls: Vec<DriverCall>,
    claimed: Vec<u8>,
    levels: HashMap<u8, Level>,
    fail_claims: Vec<u8>,
    fail_releases: Vec<u8>,
    fail_io: Vec<u8>,
}

impl MockDriver {
    /// A driver with no numbering mode established yet.
    pub fn new(revision: BoardRevision) -> Self {
        Self {
            revision,
            mode: None,
            calls: Vec::new(),
            claimed: Vec::new(),
            levels: HashMap::new(),
            fail_claims: Vec::new(),
            fail_releases: Vec::new(),
            fail_io: Vec::new(),
        }
    }

    /// A driver whose numbering mode was already established elsewhere in
    /// the process.
    pub fn with_mode(revision: BoardRevision, mode: NumberingMode) -> Self {
        let mut driver = Self::new(revision);
        driver.mode = Some(mode);
        driver
    }

    /// Sets the level an input read will observe.
    pub fn set_input_level(&mut self, pin: u8, level: Level) {
        self.levels.insert(pin, level);
    }

    /// Makes every claim of `pin` fail.
    pub fn fail_claim(&mut self, pin: u8) {
        self.fail_claims.push(pin);
    }

    /// Makes every release of `pin` fail.
    pub fn fail_release(&mut self, pin: u8) {
        self.fail_releases.push(pin);
    }

    /// Makes every read/write of `pin` fail.
    pub fn fail_io(&mut self, pin: u8) {
        self.fail_io.push(pin);
    }

    /// Every call made so far, in order.
    pub fn calls(&self) -> &[DriverCall] {
        &self.calls
    }

    /// Pins the driver currently holds a claim on.
    pub fn claimed(&self) -> &[u8] {
        &self.claimed
    }

    /// Last known level of a pin, if any.
    pub fn level(&self, pin: u8) -> Option<Level> {
        self.levels.get(&pin).copied()
    }

    /// Write calls issued to `pin`, in order.
    pub fn writes_to(&self, pin: u8) -> Vec<Level> {
        self.calls
            .iter()
            .filter_map(|call| match call {
                DriverCall::Write { pin: p, level } if *p == pin => Some(*level),
                _ => None,
            })
            .collect()
    }
}

impl BoardDriver for MockDriver {
    fn revision(&self) -> BoardRevision {
        self.revision
    }

    fn numbering_mode(&self) -> Option<NumberingMode> {
        self.mode
    }

    fn set_numbering_mode(&mut self, mode: NumberingMode) {
        self.calls.push(DriverCall::SetNumberingMode(mode));
        self.mode = Some(mode);
    }

    fn suppress_warnings(&mut self, suppress: bool) {
        self.calls.push(DriverCall::SuppressWarnings(suppress));
    }

    fn claim_input(&mut self, pin: u8, pull: PullMode) -> Result<(), GpioError> {
        self.calls.push(DriverCall::ClaimInput { pin, pull });
        if self.fail_claims.contains(&pin) {
            return Err(GpioError::Claim {
                pin,
                reason: "injected claim failure".into(),
            });
        }
        if self.claimed.contains(&pin) {
            return Err(GpioError::Claim {
                pin,
                reason: "pin already in use".into(),
            });
        }
        self.claimed.push(pin);
        Ok(())
    }

    fn claim_output(&mut self, pin: u8, initial: Level) -> Result<(), GpioError> {
        self.calls.push(DriverCall::ClaimOutput { pin, initial });
        if self.fail_claims.contains(&pin) {
            return Err(GpioError::Claim {
                pin,
                reason: "injected claim failure".into(),
            });
        }
        if self.claimed.contains(&pin) {
            return Err(GpioError::Claim {
                pin,
                reason: "pin already in use".into(),
            });
        }
        self.claimed.push(pin);
        self.levels.insert(pin, initial);
        Ok(())
    }

    fn release(&mut self, pin: u8) -> Result<(), GpioError> {
        self.calls.push(DriverCall::Release { pin });
        if self.fail_releases.contains(&pin) {
            return Err(GpioError::Io {
                pin,
                reason: "injected release failure".into(),
            });
        }
        self.claimed.retain(|&claimed| claimed != pin);
        Ok(())
    }

    fn write(&mut self, pin: u8, level: Level) -> Result<(), GpioError> {
        self.calls.push(DriverCall::Write { pin, level });
        if self.fail_io.contains(&pin) {
            return Err(GpioError::Io {
                pin,
                reason: "injected write failure".into(),
            });
        }
        if !self.claimed.contains(&pin) {
            return Err(GpioError::Io {
                pin,
                reason: "pin not claimed".into(),
            });
        }
        self.levels.insert(pin, level);
        Ok(())
    }

    fn read(&mut self, pin: u8) -> Result<Level, GpioError> {
        self.calls.push(DriverCall::Read { pin });
        if self.fail_io.contains(&pin) {
            return Err(GpioError::Io {
                pin,
                reason: "injected read failure".into(),
            });
        }
        Ok(self.levels.get(&pin).copied().unwrap_or(Level::Low))
    }

    fn version(&self) -> &str {
        "mock-gpio 0.1"
    }
}

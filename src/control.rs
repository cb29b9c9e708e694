//! The power-control operations exposed to the supervisor.
//!
//! Every operation here is best-effort: driver faults are logged with the
//! pin involved and flattened into a default outcome, so a miswired pin or
//! a transient driver error never takes down the host's control loop.

use log::{debug, error, warn};

use crate::gpio::driver::BoardDriver;
use crate::gpio::lines::LineManager;
use crate::gpio::Level;
use crate::settings::PinConfig;

/// The operational surface a power-control provider offers the supervisor.
pub trait PowerControlProvider {
    /// Switches the PSU on.
    fn turn_psu_on(&mut self);

    /// Switches the PSU off.
    fn turn_psu_off(&mut self);

    /// Samples the PSU sense line.
    ///
    /// Returns `false` when the sense pin is disabled and also when the
    /// read itself fails; a caller cannot tell those apart from a
    /// legitimate "off" reading.
    fn get_psu_state(&mut self) -> bool;
}

pub(crate) fn turn_on<D: BoardDriver>(driver: &mut D, lines: &LineManager, config: &PinConfig) {
    set_switch(driver, lines, config, true);
}

pub(crate) fn turn_off<D: BoardDriver>(driver: &mut D, lines: &LineManager, config: &PinConfig) {
    set_switch(driver, lines, config, false);
}

fn set_switch<D: BoardDriver>(driver: &mut D, lines: &LineManager, config: &PinConfig, on: bool) {
    if config.switch_pin <= 0 {
        warn!("switch pin not configured; ignoring power request");
        return;
    }

    let level = Level::from(on != config.switch_inverted);

    debug!(
        "switching PSU {} via pin {}",
        if on { "on" } else { "off" },
        config.switch_pin
    );
    if let Err(e) = lines.write(driver, config, config.switch_pin, level) {
        error!("failed to drive switch pin {}: {e}", config.switch_pin);
    }
}

pub(crate) fn read_sense_state<D: BoardDriver>(
    driver: &mut D,
    lines: &LineManager,
    config: &PinConfig,
) -> bool {
    if config.sense_pin <= 0 {
        warn!("sense pin not configured; reporting PSU off");
        return false;
    }

    let raw = match lines.read(driver, config, config.sense_pin) {
        Ok(level) => bool::from(level),
        Err(e) => {
            error!("failed to read sense pin {}: {e}", config.sense_pin);
            return false;
        }
    };
    debug!("sense pin {} read {raw}", config.sense_pin);

    if config.sense_inverted {
        !raw
    } else {
        raw
    }
}

//! Ownership and lifecycle of the claimed GPIO lines.

use log::{debug, error, warn};

use super::driver::BoardDriver;
use super::{pinmap, GpioError, Level};
use crate::settings::PinConfig;

/// Tracks which pins this plugin has claimed from the driver.
///
/// Two states: unconfigured (nothing claimed) and configured. The claimed
/// list holds pin numbers in the configured scheme, exactly as they appear
/// in [`PinConfig`], so a later cleanup resolves them the same way the
/// claim did. The list is authoritative: cleanup drains it even when the
/// driver refuses a release.
#[derive(Debug, Default)]
pub struct LineManager {
    claimed: Vec<i64>,
}

impl LineManager {
    pub fn new() -> Self {
        Self::default()
    }

    /// Pins currently claimed, in the configured numbering scheme.
    pub fn claimed(&self) -> &[i64] {
        &self.claimed
    }

    /// Claims the configured switch and sense lines.
    ///
    /// Establishes the driver's numbering mode on the first call only; an
    /// already-established mode is left alone and any mismatch with the
    /// configured scheme is handled by translation. Each line is attempted
    /// independently: a claim failure is logged and the other line still
    /// gets its attempt, since a rig wired only for switching or only for
    /// sensing is a supported configuration. Pins already claimed are
    /// skipped, so a repeated configure without cleanup is a no-op.
    pub fn configure<D: BoardDriver>(&mut self, driver: &mut D, config: &PinConfig) {
        driver.suppress_warnings(true);

        if driver.numbering_mode().is_none() {
            match config.numbering_mode {
                Some(mode) => driver.set_numbering_mode(mode),
                None => {
                    warn!("no GPIO numbering mode configured; leaving lines unconfigured");
                    return;
                }
            }
        }

        if config.switch_pin > 0 {
            self.claim_switch(driver, config);
        }

        if config.sense_pin > 0 {
            self.claim_sense(driver, config);
        }
    }

    fn claim_switch<D: BoardDriver>(&mut self, driver: &mut D, config: &PinConfig) {
        let pin = config.switch_pin;
        if self.claimed.contains(&pin) {
            debug!("switch pin {pin} already claimed; skipping");
            return;
        }

        // Drive the polarity-correct OFF level from the moment of the claim.
        let initial = if config.switch_inverted {
            Level::High
        } else {
            Level::Low
        };

        debug!("configuring switch pin {pin}");
        match self
            .resolve(driver, config, pin)
            .and_then(|resolved| driver.claim_output(resolved, initial))
        {
            Ok(()) => self.claimed.push(pin),
            Err(e) => error!("failed to claim switch pin {pin}: {e}"),
        }
    }

    fn claim_sense<D: BoardDriver>(&mut self, driver: &mut D, config: &PinConfig) {
        let pin = config.sense_pin;
        if self.claimed.contains(&pin) {
            debug!("sense pin {pin} already claimed; skipping");
            return;
        }

        debug!("configuring sense pin {pin}");
        match self
            .resolve(driver, config, pin)
            .and_then(|resolved| driver.claim_input(resolved, config.sense_pull))
        {
            Ok(()) => self.claimed.push(pin),
            Err(e) => error!("failed to claim sense pin {pin}: {e}"),
        }
    }

    /// Releases every claimed line.
    ///
    /// Release failures are logged and the remaining pins are still
    /// attempted; the claimed list always ends empty.
    pub fn cleanup<D: BoardDriver>(&mut self, driver: &mut D, config: &PinConfig) {
        driver.suppress_warnings(true);

        for pin in std::mem::take(&mut self.claimed) {
            debug!("releasing pin {pin}");
            match self
                .resolve(driver, config, pin)
                .and_then(|resolved| driver.release(resolved))
            {
                Ok(()) => {}
                Err(e) => error!("failed to release pin {pin}: {e}"),
            }
        }
    }

    /// Drives a configured line, resolving its number first.
    pub fn write<D: BoardDriver>(
        &self,
        driver: &mut D,
        config: &PinConfig,
        pin: i64,
        level: Level,
    ) -> Result<(), GpioError> {
        let resolved = self.resolve(driver, config, pin)?;
        driver.write(resolved, level)
    }

    /// Samples a configured line, resolving its number first.
    pub fn read<D: BoardDriver>(
        &self,
        driver: &mut D,
        config: &PinConfig,
        pin: i64,
    ) -> Result<Level, GpioError> {
        let resolved = self.resolve(driver, config, pin)?;
        driver.read(resolved)
    }

    /// Resolves a configured pin into the driver's scheme, refusing to
    /// produce a driver-facing number before a numbering mode exists.
    fn resolve<D: BoardDriver>(
        &self,
        driver: &D,
        config: &PinConfig,
        pin: i64,
    ) -> Result<u8, GpioError> {
        let driver_mode = driver.numbering_mode().ok_or(GpioError::NoNumberingMode)?;
        let configured_mode = config.numbering_mode.ok_or(GpioError::NoNumberingMode)?;

        let resolved = pinmap::resolve_pin(
            driver.revision(),
            Some(driver_mode),
            Some(configured_mode),
            pin,
        )?;
        u8::try_from(resolved).map_err(|_| GpioError::InvalidPin { pin: resolved })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::gpio::mock::{DriverCall, MockDriver};
    use crate::gpio::{BoardRevision, NumberingMode, PullMode};

    fn board_config(switch_pin: i64, sense_pin: i64) -> PinConfig {
        PinConfig {
            numbering_mode: Some(NumberingMode::Board),
            switch_pin,
            switch_inverted: false,
            sense_pin,
            sense_inverted: false,
            sense_pull: PullMode::None,
        }
    }

    #[test]
    fn test_configure_with_no_pins_claims_nothing() {
        let mut driver = MockDriver::new(BoardRevision::Rev3);
        let mut lines = LineManager::new();

        lines.configure(&mut driver, &board_config(0, 0));

        assert!(lines.claimed().is_empty());
        assert!(!driver
            .calls()
            .iter()
            .any(|call| matches!(call, DriverCall::ClaimInput { .. } | DriverCall::ClaimOutput { .. })));
    }

    #[test]
    fn test_configure_establishes_mode_once() {
        let mut driver = MockDriver::new(BoardRevision::Rev3);
        let mut lines = LineManager::new();
        let config = board_config(12, 16);

        lines.configure(&mut driver, &config);
        lines.cleanup(&mut driver, &config);
        lines.configure(&mut driver, &config);

        let mode_sets = driver
            .calls()
            .iter()
            .filter(|call| matches!(call, DriverCall::SetNumberingMode(_)))
            .count();
        assert_eq!(mode_sets, 1);
    }

    #[test]
    fn test_configure_without_mode_setting_claims_nothing() {
        let mut driver = MockDriver::new(BoardRevision::Rev3);
        let mut lines = LineManager::new();
        let mut config = board_config(12, 16);
        config.numbering_mode = None;

        lines.configure(&mut driver, &config);

        assert!(lines.claimed().is_empty());
        assert!(driver.claimed().is_empty());
    }

    #[test]
    fn test_configure_claims_both_lines() {
        let mut driver = MockDriver::new(BoardRevision::Rev3);
        let mut lines = LineManager::new();

        lines.configure(&mut driver, &board_config(12, 16));

        assert_eq!(lines.claimed(), &[12, 16]);
        assert_eq!(driver.claimed(), &[12, 16]);
    }

    #[test]
    fn test_configure_translates_for_established_bcm_driver() {
        // Driver already in chip numbering, config in physical numbering:
        // physical 12 on a Rev3 board is BCM 18.
        let mut driver = MockDriver::with_mode(BoardRevision::Rev3, NumberingMode::Bcm);
        let mut lines = LineManager::new();

        lines.configure(&mut driver, &board_config(12, 0));

        assert_eq!(
            driver.calls().last(),
            Some(&DriverCall::ClaimOutput {
                pin: 18,
                initial: Level::Low
            })
        );
        assert_eq!(lines.claimed(), &[12]);
    }

    #[test]
    fn test_inverted_switch_claims_with_high_initial() {
        let mut driver = MockDriver::new(BoardRevision::Rev3);
        let mut lines = LineManager::new();
        let mut config = board_config(12, 0);
        config.switch_inverted = true;

        lines.configure(&mut driver, &config);

        assert!(driver.calls().contains(&DriverCall::ClaimOutput {
            pin: 12,
            initial: Level::High
        }));
    }

    #[test]
    fn test_sense_claim_carries_pull_mode() {
        let mut driver = MockDriver::new(BoardRevision::Rev3);
        let mut lines = LineManager::new();
        let mut config = board_config(0, 16);
        config.sense_pull = PullMode::PullUp;

        lines.configure(&mut driver, &config);

        assert!(driver.calls().contains(&DriverCall::ClaimInput {
            pin: 16,
            pull: PullMode::PullUp
        }));
    }

    #[test]
    fn test_switch_claim_failure_does_not_block_sense() {
        let mut driver = MockDriver::new(BoardRevision::Rev3);
        driver.fail_claim(12);
        let mut lines = LineManager::new();

        lines.configure(&mut driver, &board_config(12, 16));

        assert_eq!(lines.claimed(), &[16]);
        assert_eq!(driver.claimed(), &[16]);
    }

    #[test]
    fn test_sense_claim_failure_keeps_switch() {
        let mut driver = MockDriver::new(BoardRevision::Rev3);
        driver.fail_claim(16);
        let mut lines = LineManager::new();

        lines.configure(&mut driver, &board_config(12, 16));

        assert_eq!(lines.claimed(), &[12]);
    }

    #[test]
    fn test_repeat_configure_does_not_double_claim() {
        let mut driver = MockDriver::new(BoardRevision::Rev3);
        let mut lines = LineManager::new();
        let config = board_config(12, 16);

        lines.configure(&mut driver, &config);
        lines.configure(&mut driver, &config);

        let claims = driver
            .calls()
            .iter()
            .filter(|call| {
                matches!(
                    call,
                    DriverCall::ClaimInput { .. } | DriverCall::ClaimOutput { .. }
                )
            })
            .count();
        assert_eq!(claims, 2);
        assert_eq!(lines.claimed(), &[12, 16]);
    }

    #[test]
    fn test_cleanup_releases_every_claimed_pin() {
        let mut driver = MockDriver::new(BoardRevision::Rev3);
        let mut lines = LineManager::new();
        let config = board_config(12, 16);

        lines.configure(&mut driver, &config);
        lines.cleanup(&mut driver, &config);

        assert!(lines.claimed().is_empty());
        assert!(driver.calls().contains(&DriverCall::Release { pin: 12 }));
        assert!(driver.calls().contains(&DriverCall::Release { pin: 16 }));
        assert!(driver.claimed().is_empty());
    }

    #[test]
    fn test_cleanup_drains_bookkeeping_despite_release_failure() {
        let mut driver = MockDriver::new(BoardRevision::Rev3);
        driver.fail_release(12);
        let mut lines = LineManager::new();
        let config = board_config(12, 16);

        lines.configure(&mut driver, &config);
        lines.cleanup(&mut driver, &config);

        // Both releases attempted, bookkeeping empty either way.
        assert!(driver.calls().contains(&DriverCall::Release { pin: 12 }));
        assert!(driver.calls().contains(&DriverCall::Release { pin: 16 }));
        assert!(lines.claimed().is_empty());
    }

    #[test]
    fn test_cleanup_on_unconfigured_manager_is_harmless() {
        let mut driver = MockDriver::new(BoardRevision::Rev3);
        let mut lines = LineManager::new();

        lines.cleanup(&mut driver, &board_config(12, 16));

        assert!(!driver
            .calls()
            .iter()
            .any(|call| matches!(call, DriverCall::Release { .. })));
    }

    #[test]
    fn test_write_before_mode_established_is_refused() {
        let mut driver = MockDriver::new(BoardRevision::Rev3);
        let lines = LineManager::new();

        let result = lines.write(&mut driver, &board_config(12, 0), 12, Level::High);

        assert_eq!(result, Err(GpioError::NoNumberingMode));
        assert!(driver.calls().is_empty());
    }
}

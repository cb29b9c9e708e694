//! Plugin lifecycle: construction, host registration, and the
//! configure/cleanup hooks driven by settings changes.

use log::{debug, info};

use crate::control::{self, PowerControlProvider};
use crate::gpio::driver::BoardDriver;
use crate::gpio::lines::LineManager;
use crate::settings::{PinConfig, SettingsStore};

/// Name under which the plugin announces itself to the supervisor.
pub const PLUGIN_NAME: &str = "psu-gpio";

/// The host-side registration hook.
///
/// Invoked once at startup to announce the active power-control provider.
/// The provider's operational surface is handed over with the name, so the
/// host can drive [`turn_psu_on`](PowerControlProvider::turn_psu_on),
/// [`turn_psu_off`](PowerControlProvider::turn_psu_off), and
/// [`get_psu_state`](PowerControlProvider::get_psu_state) from that point
/// on.
pub trait PluginHost {
    fn register_power_control(&mut self, name: &str, provider: &mut dyn PowerControlProvider);
}

/// The GPIO-backed PSU control plugin.
///
/// Owns the driver handle, the settings handle, and the line bookkeeping.
/// Driver availability is established at construction, so startup always
/// registers; a misconfigured or faulty line surfaces later, at configure
/// time, as logged errors rather than a failed registration.
pub struct PsuGpioPlugin<D: BoardDriver, S: SettingsStore> {
    driver: D,
    settings: S,
    config: PinConfig,
    lines: LineManager,
}

impl<D: BoardDriver, S: SettingsStore> PsuGpioPlugin<D, S> {
    pub fn new(driver: D, settings: S) -> Self {
        let config = PinConfig::from_store(&settings);
        Self {
            driver,
            settings,
            config,
            lines: LineManager::new(),
        }
    }

    /// Announces the plugin to the supervisor, handing over its
    /// operational surface.
    pub fn on_startup(&mut self, host: &mut impl PluginHost) {
        info!(
            "GPIO driver {} on {:?} board",
            self.driver.version(),
            self.driver.revision()
        );
        debug!("registering as power-control provider");
        host.register_power_control(PLUGIN_NAME, self);
    }

    /// Rebuilds the pin configuration from the settings store.
    pub fn reload_settings(&mut self) {
        self.config = PinConfig::from_store(&self.settings);
    }

    /// Claims the configured lines. Invoked at startup and after every
    /// settings change.
    pub fn configure(&mut self) {
        self.lines.configure(&mut self.driver, &self.config);
    }

    /// Releases every claimed line. Safe to invoke in any state.
    pub fn cleanup(&mut self) {
        self.lines.cleanup(&mut self.driver, &self.config);
    }

    /// Settings-change hook: tear down under the old configuration, then
    /// reload and reconfigure. Never an in-place edit, so no stale claim
    /// survives a pin-number change.
    pub fn on_settings_save(&mut self) {
        self.cleanup();
        self.reload_settings();
        self.configure();
    }

    /// Migration hook. No migrations defined yet.
    pub fn on_settings_migrate(&mut self, _target: u32, _current: Option<u32>) {}

    pub fn config(&self) -> &PinConfig {
        &self.config
    }

    /// Pins currently claimed, in the configured numbering scheme.
    pub fn claimed_pins(&self) -> &[i64] {
        self.lines.claimed()
    }

    pub fn driver(&self) -> &D {
        &self.driver
    }

    pub fn driver_mut(&mut self) -> &mut D {
        &mut self.driver
    }

    pub fn settings_mut(&mut self) -> &mut S {
        &mut self.settings
    }
}

impl<D: BoardDriver, S: SettingsStore> PowerControlProvider for PsuGpioPlugin<D, S> {
    fn turn_psu_on(&mut self) {
        control::turn_on(&mut self.driver, &self.lines, &self.config);
    }

    fn turn_psu_off(&mut self) {
        control::turn_off(&mut self.driver, &self.lines, &self.config);
    }

    fn get_psu_state(&mut self) -> bool {
        control::read_sense_state(&mut self.driver, &self.lines, &self.config)
    }
}

//! Persisted plugin settings and the host settings store boundary.

use std::collections::HashMap;

use log::debug;

use crate::gpio::{NumberingMode, PullMode};

/// Settings schema version. No migrations defined yet.
pub const SETTINGS_VERSION: u32 = 1;

pub const KEY_NUMBERING_MODE: &str = "numberingMode";
pub const KEY_SWITCH_PIN: &str = "switchPin";
pub const KEY_SWITCH_INVERTED: &str = "switchInverted";
pub const KEY_SENSE_PIN: &str = "sensePin";
pub const KEY_SENSE_INVERTED: &str = "senseInverted";
pub const KEY_SENSE_PULL_MODE: &str = "sensePullMode";

pub const DEFAULT_NUMBERING_MODE: &str = "BOARD";

/// Typed read access to the host's settings store.
///
/// Provided by the host; `None` means the key has never been persisted and
/// the default applies.
pub trait SettingsStore {
    fn get_str(&self, key: &str) -> Option<String>;
    fn get_i64(&self, key: &str) -> Option<i64>;
    fn get_bool(&self, key: &str) -> Option<bool>;
}

/// The plugin's pin configuration, rebuilt wholesale from the store on
/// every (re)load.
///
/// A pin number of zero (or below) disables that function. `numbering_mode`
/// is `None` when the persisted value is unrecognized, which blocks
/// hardware setup until corrected.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PinConfig {
    pub numbering_mode: Option<NumberingMode>,
    pub switch_pin: i64,
    pub switch_inverted: bool,
    pub sense_pin: i64,
    pub sense_inverted: bool,
    pub sense_pull: PullMode,
}

impl Default for PinConfig {
    fn default() -> Self {
        Self {
            numbering_mode: NumberingMode::from_setting(DEFAULT_NUMBERING_MODE),
            switch_pin: 0,
            switch_inverted: false,
            sense_pin: 0,
            sense_inverted: false,
            sense_pull: PullMode::None,
        }
    }
}

impl PinConfig {
    /// Reads every key from the store, falling back to the defaults.
    pub fn from_store(store: &impl SettingsStore) -> Self {
        let mode_raw = store
            .get_str(KEY_NUMBERING_MODE)
            .unwrap_or_else(|| DEFAULT_NUMBERING_MODE.to_string());
        let pull_raw = store.get_str(KEY_SENSE_PULL_MODE).unwrap_or_default();

        let config = Self {
            numbering_mode: NumberingMode::from_setting(&mode_raw),
            switch_pin: store.get_i64(KEY_SWITCH_PIN).unwrap_or(0),
            switch_inverted: store.get_bool(KEY_SWITCH_INVERTED).unwrap_or(false),
            sense_pin: store.get_i64(KEY_SENSE_PIN).unwrap_or(0),
            sense_inverted: store.get_bool(KEY_SENSE_INVERTED).unwrap_or(false),
            sense_pull: PullMode::from_setting(&pull_raw),
        };

        debug!("{KEY_NUMBERING_MODE}: {mode_raw}");
        debug!("{KEY_SWITCH_PIN}: {}", config.switch_pin);
        debug!("{KEY_SWITCH_INVERTED}: {}", config.switch_inverted);
        debug!("{KEY_SENSE_PIN}: {}", config.sense_pin);
        debug!("{KEY_SENSE_INVERTED}: {}", config.sense_inverted);
        debug!("{KEY_SENSE_PULL_MODE}: {pull_raw}");

        config
    }
}

/// A plain in-memory store, for tests and host-side simulation.
#[derive(Debug, Default)]
pub struct MemorySettings {
    strings: HashMap<String, String>,
    ints: HashMap<String, i64>,
    bools: HashMap<String, bool>,
}

impl MemorySettings {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_str(&mut self, key: &str, value: &str) {
        self.strings.insert(key.to_string(), value.to_string());
    }

    pub fn set_i64(&mut self, key: &str, value: i64) {
        self.ints.insert(key.to_string(), value);
    }

    pub fn set_bool(&mut self, key: &str, value: bool) {
        self.bools.insert(key.to_string(), value);
    }
}

impl SettingsStore for MemorySettings {
    fn get_str(&self, key: &str) -> Option<String> {
        self.strings.get(key).cloned()
    }

    fn get_i64(&self, key: &str) -> Option<i64> {
        self.ints.get(key).copied()
    }

    fn get_bool(&self, key: &str) -> Option<bool> {
        self.bools.get(key).copied()
    }
}

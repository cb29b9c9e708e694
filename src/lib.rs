//! GPIO-backed PSU switch and sense control for Raspberry Pi class boards.
//!
//! Translates a logical "power switch + power sense" pair onto two GPIO
//! lines, handling the physical-header versus chip (BCM) numbering split
//! across the three known board revisions, line claim/release lifecycle,
//! and polarity inversion. The platform GPIO library is consumed through
//! the [`gpio::driver::BoardDriver`] trait; nothing here touches hardware
//! directly.

pub mod control;
pub mod gpio;
pub mod plugin;
pub mod settings;

pub use control::PowerControlProvider;
pub use gpio::driver::BoardDriver;
pub use gpio::lines::LineManager;
pub use gpio::{BoardRevision, GpioError, Level, NumberingMode, PullMode};
pub use plugin::{PluginHost, PsuGpioPlugin, PLUGIN_NAME};
pub use settings::{PinConfig, SettingsStore, SETTINGS_VERSION};

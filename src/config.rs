//! Driver configuration parameters.
//!
//! The watchdog half corresponds to the module parameters (`heartbeat`,
//! `nowayout`); the Nunchuck half to the fixed probe-time constants.
//! Values can be overridden by whatever host shim loads the drivers.

use serde::{Deserialize, Serialize};

/// Minimum watchdog timeout accepted by the hardware, in seconds.
pub const MIN_WDT_TIMEOUT: u32 = 5;
/// Maximum watchdog timeout accepted by the hardware, in seconds.
pub const MAX_WDT_TIMEOUT: u32 = 1000;
/// Default heartbeat. Twice the spinlock lockup threshold.
pub const DEFAULT_HEARTBEAT: u32 = 80;

/// Watchdog module parameters.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct WatchdogParams {
    /// Initial watchdog timeout in seconds.
    pub heartbeat: u32,
    /// Once armed, the watchdog cannot be stopped.
    pub nowayout: bool,
}

impl Default for WatchdogParams {
    fn default() -> Self {
        Self {
            heartbeat: DEFAULT_HEARTBEAT,
            nowayout: false,
        }
    }
}

impl WatchdogParams {
    /// Heartbeat to program at probe time.
    ///
    /// Out-of-range values fall back to [`DEFAULT_HEARTBEAT`] rather than
    /// failing the probe.
    pub fn effective_heartbeat(&self) -> u32 {
        if (MIN_WDT_TIMEOUT..=MAX_WDT_TIMEOUT).contains(&self.heartbeat) {
            self.heartbeat
        } else {
            log::warn!(
                "heartbeat {} out of range [{}, {}], using {}",
                self.heartbeat,
                MIN_WDT_TIMEOUT,
                MAX_WDT_TIMEOUT,
                DEFAULT_HEARTBEAT
            );
            DEFAULT_HEARTBEAT
        }
    }
}

/// Nunchuck probe-time settings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct NunchuckConfig {
    /// 7-bit I2C address.
    pub address: u8,
    /// Poll interval in milliseconds.
    pub poll_interval_ms: u32,
}

impl Default for NunchuckConfig {
    fn default() -> Self {
        Self {
            address: 0x52,
            poll_interval_ms: 50,
        }
    }
}

/// Combined configuration for both drivers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct DriverConfig {
    pub watchdog: WatchdogParams,
    pub nunchuck: NunchuckConfig,
}

impl DriverConfig {
    /// Reject values the drivers cannot operate with.
    ///
    /// A bad heartbeat is not rejected here; see
    /// [`WatchdogParams::effective_heartbeat`].
    pub fn validate(&self) -> Result<(), &'static str> {
        if self.nunchuck.address > 0x7f {
            return Err("nunchuck.address: not a 7-bit I2C address");
        }
        if self.nunchuck.poll_interval_ms == 0 {
            return Err("nunchuck.poll_interval_ms: must be non-zero");
        }
        Ok(())
    }
}

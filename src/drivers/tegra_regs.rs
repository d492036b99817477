//! Tegra watchdog and timer register map.
//!
//! Bit-packed configuration words are built from [`TimerConfig`] and
//! [`WdtConfig`] so the bit manipulation can be tested without hardware.

// ── Timer block ───────────────────────────────────────────────

/// Timer present-trigger value: period and enable bits.
pub const TIMER_PTV: usize = 0x0;
pub const TIMER_EN: u32 = 1 << 31;
pub const TIMER_PERIODIC: u32 = 1 << 30;
/// Period field width (29 bits).
pub const TIMER_PTV_MASK: u32 = (1 << 29) - 1;

/// Timer present-count value; writing INTR clears the pending interrupt.
pub const TIMER_PCR: usize = 0x4;
pub const TIMER_PCR_INTR: u32 = 1 << 30;

// ── Watchdog block ────────────────────────────────────────────

pub const WDT_CFG: usize = 0x0;
pub const WDT_CFG_SOURCE_MASK: u32 = 0xf;
pub const WDT_CFG_PERIOD: u32 = 1 << 4;
pub const WDT_CFG_INT_EN: u32 = 1 << 12;
pub const WDT_CFG_FIQ_INT_EN: u32 = 1 << 13;
pub const WDT_CFG_SYS_RST_EN: u32 = 1 << 14;
pub const WDT_CFG_PMC2CAR_RST_EN: u32 = 1 << 15;

pub const WDT_CMD: usize = 0x8;
pub const WDT_CMD_START_COUNTER: u32 = 1 << 0;
pub const WDT_CMD_DISABLE_COUNTER: u32 = 1 << 1;

/// Must be written before `WDT_CMD_DISABLE_COUNTER` takes effect.
pub const WDT_UNLOCK: usize = 0xc;
pub const WDT_UNLOCK_PATTERN: u32 = 0xc45a;

/// First upstream timer used as a watchdog source (timer 7 for WDT0).
pub const TMR_SRC_START: u32 = 7;

/// Timer ticks per second; the source runs at a quarter of 1 MHz.
const TICKS_DIVISOR: u32 = 4;

/// Timer-source selector for a watchdog with platform instance id `id`.
///
/// The unnumbered instance (id -1) is clocked by timer 6.
pub const fn timer_source(id: i32) -> u32 {
    (TMR_SRC_START as i32 + id).rem_euclid(10) as u32
}

/// Timer period for a timeout in seconds: `secs * 1_000_000 / 4`.
pub const fn timer_period(timeout_secs: u32) -> u32 {
    ((timeout_secs as u64 * 1_000_000) / TICKS_DIVISOR as u64) as u32 & TIMER_PTV_MASK
}

/// `TIMER_PTV` contents.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TimerConfig {
    pub period: u32,
    pub enabled: bool,
    pub periodic: bool,
}

impl TimerConfig {
    /// Periodic, enabled timer expiring after `timeout_secs`.
    pub const fn for_timeout(timeout_secs: u32) -> Self {
        Self {
            period: timer_period(timeout_secs),
            enabled: true,
            periodic: true,
        }
    }

    pub const fn encode(&self) -> u32 {
        let mut val = self.period & TIMER_PTV_MASK;
        if self.enabled {
            val |= TIMER_EN;
        }
        if self.periodic {
            val |= TIMER_PERIODIC;
        }
        val
    }

    pub const fn decode(raw: u32) -> Self {
        Self {
            period: raw & TIMER_PTV_MASK,
            enabled: raw & TIMER_EN != 0,
            periodic: raw & TIMER_PERIODIC != 0,
        }
    }
}

/// Action taken by the watchdog on expiry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ExpiryAction {
    /// Raise the watchdog interrupt.
    pub interrupt: bool,
    /// Raise a FIQ.
    pub fiq: bool,
    /// Assert the external system reset. Not wired on Tegra boards.
    pub system_reset: bool,
    /// Reset the SoC through the PMC clock-and-reset path.
    pub pmc2car_reset: bool,
}

/// `WDT_CFG` contents.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WdtConfig {
    pub timer_source: u32,
    pub periodic: bool,
    pub on_expiry: ExpiryAction,
}

impl WdtConfig {
    /// Configuration programmed by `start()`: periodic, PMC2CAR reset only.
    pub const fn reset_on_expiry(timer_source: u32) -> Self {
        Self {
            timer_source,
            periodic: true,
            on_expiry: ExpiryAction {
                interrupt: false,
                fiq: false,
                system_reset: false,
                pmc2car_reset: true,
            },
        }
    }

    pub const fn encode(&self) -> u32 {
        let mut val = self.timer_source & WDT_CFG_SOURCE_MASK;
        if self.periodic {
            val |= WDT_CFG_PERIOD;
        }
        if self.on_expiry.interrupt {
            val |= WDT_CFG_INT_EN;
        }
        if self.on_expiry.fiq {
            val |= WDT_CFG_FIQ_INT_EN;
        }
        if self.on_expiry.system_reset {
            val |= WDT_CFG_SYS_RST_EN;
        }
        if self.on_expiry.pmc2car_reset {
            val |= WDT_CFG_PMC2CAR_RST_EN;
        }
        val
    }
}

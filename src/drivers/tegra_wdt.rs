//! NVIDIA Tegra internal watchdog driver.
//!
//! ## Hardware
//!
//! Each watchdog is clocked by one of the SoC's free-running timers. The
//! driver owns two register windows:
//!
//! | Window | Registers                      | Role                       |
//! |--------|--------------------------------|----------------------------|
//! | timer  | `TIMER_PTV`, `TIMER_PCR`       | countdown period, irq ack  |
//! | wdt    | `WDT_CFG`, `WDT_CMD`, `UNLOCK` | source, expiry action, cmd |
//!
//! The watchdog with platform id `n` uses timer `(7 + n) mod 10`, so the
//! unnumbered instance (id -1) uses timer 6 while still occupying registry
//! slot 0.
//!
//! ## Arming
//!
//! The hardware is armed exactly when `TIMER_PTV` is non-zero: `start()`
//! programs a periodic, enabled period and `stop()` zeroes it. On expiry the
//! SoC is reset through the PMC clock-and-reset path; no interrupt is taken.

use log::{error, info};

use super::tegra_regs::*;
use super::watchdog::WatchdogDevice;
use crate::app::commands::{WDIOF_KEEPALIVEPING, WDIOF_MAGICCLOSE, WDIOF_SETTIMEOUT, WatchdogInfo};
use crate::app::ports::{IoMapper, PowerManaged, RegisterIo, WatchdogOps};
use crate::config::{MAX_WDT_TIMEOUT, MIN_WDT_TIMEOUT, WatchdogParams};
use crate::error::{Error, Result};
use crate::platform::PlatformDevice;
use crate::registry::{InstanceRegistry, MAX_INSTANCES};

/// Platform driver name.
pub const DRIVER_NAME: &str = "tegra_wdt";

/// Capabilities advertised to the watchdog framework.
pub const TEGRA_WDT_OPTIONS: u32 = WDIOF_SETTIMEOUT | WDIOF_MAGICCLOSE | WDIOF_KEEPALIVEPING;

pub fn tegra_wdt_info() -> WatchdogInfo {
    WatchdogInfo::new(TEGRA_WDT_OPTIONS, "Tegra Watchdog")
}

/// A Tegra watchdog as registered with the watchdog framework.
pub type TegraWatchdog<R> = WatchdogDevice<TegraWdt<R>>;

pub struct TegraWdt<R: RegisterIo> {
    tmr_regs: R,
    wdt_regs: R,
    ordinal: usize,
    tmrsrc: u32,
    timeout: u32,
    /// Armed state captured by `suspend()`.
    armed_before_suspend: bool,
}

impl<R: RegisterIo> TegraWdt<R> {
    /// Build a driver instance over already-mapped windows.
    ///
    /// `id` is the platform instance id: it selects the upstream timer, and
    /// `max(id, 0)` is the registry slot. At most [`MAX_INSTANCES`]
    /// instances exist.
    pub fn new(tmr_regs: R, wdt_regs: R, id: i32, timeout: u32) -> Result<Self> {
        if id < -1 || id >= MAX_INSTANCES as i32 {
            return Err(Error::InvalidArgument);
        }
        check_timeout(timeout)?;
        Ok(Self {
            tmr_regs,
            wdt_regs,
            ordinal: id.max(0) as usize,
            tmrsrc: timer_source(id),
            timeout,
            armed_before_suspend: false,
        })
    }

    pub fn ordinal(&self) -> usize {
        self.ordinal
    }

    /// Upstream timer feeding this watchdog.
    pub fn timer_source(&self) -> u32 {
        self.tmrsrc
    }

    /// Raw `TIMER_PTV` contents.
    pub fn timer_period_reg(&self) -> u32 {
        self.tmr_regs.read32(TIMER_PTV)
    }

    /// Acknowledge a pending timer interrupt.
    pub fn clear_timer_interrupt(&mut self) {
        self.tmr_regs.write32(TIMER_PCR, TIMER_PCR_INTR);
    }

    pub fn timer_regs(&self) -> &R {
        &self.tmr_regs
    }

    pub fn wdt_regs(&self) -> &R {
        &self.wdt_regs
    }

    /// Hand back the register windows.
    pub fn into_regs(self) -> (R, R) {
        (self.tmr_regs, self.wdt_regs)
    }
}

fn check_timeout(timeout: u32) -> Result<()> {
    if (MIN_WDT_TIMEOUT..=MAX_WDT_TIMEOUT).contains(&timeout) {
        Ok(())
    } else {
        Err(Error::InvalidArgument)
    }
}

impl<R: RegisterIo> WatchdogOps for TegraWdt<R> {
    fn start(&mut self) -> Result<()> {
        self.clear_timer_interrupt();
        self.tmr_regs
            .write32(TIMER_PTV, TimerConfig::for_timeout(self.timeout).encode());
        self.wdt_regs
            .write32(WDT_CFG, WdtConfig::reset_on_expiry(self.tmrsrc).encode());
        self.wdt_regs.write32(WDT_CMD, WDT_CMD_START_COUNTER);
        Ok(())
    }

    fn stop(&mut self) -> Result<()> {
        self.wdt_regs.write32(WDT_UNLOCK, WDT_UNLOCK_PATTERN);
        self.wdt_regs.write32(WDT_CMD, WDT_CMD_DISABLE_COUNTER);
        self.tmr_regs.write32(TIMER_PTV, 0);
        Ok(())
    }

    fn ping(&mut self) -> Result<()> {
        self.wdt_regs.write32(WDT_CMD, WDT_CMD_START_COUNTER);
        Ok(())
    }

    fn set_timeout(&mut self, timeout_secs: u32) -> Result<()> {
        check_timeout(timeout_secs)?;
        self.timeout = timeout_secs;
        if self.is_armed() {
            self.stop()?;
            self.start()?;
        }
        Ok(())
    }

    fn timeout(&self) -> u32 {
        self.timeout
    }

    fn is_armed(&self) -> bool {
        self.tmr_regs.read32(TIMER_PTV) != 0
    }
}

impl<R: RegisterIo> PowerManaged for TegraWdt<R> {
    fn suspend(&mut self) -> Result<()> {
        self.armed_before_suspend = self.is_armed();
        if self.armed_before_suspend {
            self.stop()?;
        }
        Ok(())
    }

    fn resume(&mut self) -> Result<()> {
        if self.armed_before_suspend {
            self.armed_before_suspend = false;
            self.start()?;
        }
        Ok(())
    }
}

// ───────────────────────────────────────────────────────────────
// Platform binding
// ───────────────────────────────────────────────────────────────

/// Bind a watchdog to a matched platform device.
///
/// Validates the instance id and resources, maps both register windows,
/// leaves the hardware disarmed and records the instance in `registry`.
/// On failure nothing stays mapped and the registry is untouched.
pub fn probe<M: IoMapper>(
    pdev: &PlatformDevice,
    params: &WatchdogParams,
    mapper: &mut M,
    registry: &mut InstanceRegistry<TegraWatchdog<M::Regs>>,
) -> Result<usize> {
    if pdev.id < -1 || pdev.id > 0 {
        error!("{}.{}: only support IDs -1 and 0", pdev.name, pdev.id);
        return Err(Error::NoDevice);
    }

    // MEM 0 is the watchdog control block, MEM 1 the timer block.
    let (Some(res_wdt), Some(res_tmr)) = (pdev.mem(0), pdev.mem(1)) else {
        error!("{}.{}: incorrect resources", pdev.name, pdev.id);
        return Err(Error::NoEntry);
    };
    if pdev.irq(0).is_none() {
        error!("{}.{}: incorrect irq", pdev.name, pdev.id);
        return Err(Error::NoEntry);
    }

    // Id -1 is the single unnumbered instance; it takes slot 0.
    let ordinal = pdev.id.max(0) as usize;
    if registry.get(ordinal).is_some() {
        error!("{}.{}: instance {} already bound", pdev.name, pdev.id, ordinal);
        return Err(Error::Busy);
    }

    let Some(wdt_regs) = mapper.map(&res_wdt) else {
        error!("{}.{}: unable to map registers", pdev.name, pdev.id);
        return Err(Error::NoMemory);
    };
    let Some(tmr_regs) = mapper.map(&res_tmr) else {
        error!("{}.{}: unable to map registers", pdev.name, pdev.id);
        mapper.unmap(wdt_regs);
        return Err(Error::NoMemory);
    };

    let timeout = params.effective_heartbeat();
    let mut wdt = TegraWdt::new(tmr_regs, wdt_regs, pdev.id, timeout)?;

    wdt.stop()?;
    wdt.clear_timer_interrupt();

    registry.insert(
        ordinal,
        WatchdogDevice::new(wdt, tegra_wdt_info(), params.nowayout),
    )?;

    info!(
        "{}.{}: initialized (heartbeat = {} sec, nowayout = {})",
        pdev.name, pdev.id, timeout, params.nowayout as u8
    );
    Ok(ordinal)
}

/// Unbind the watchdog at `ordinal`: disarm, clear the registry slot and
/// unmap both windows.
pub fn remove<M: IoMapper>(
    ordinal: usize,
    mapper: &mut M,
    registry: &mut InstanceRegistry<TegraWatchdog<M::Regs>>,
) -> Result<()> {
    let mut wdt = registry
        .remove(ordinal)
        .ok_or(Error::NoDevice)?
        .into_driver();
    wdt.stop()?;

    let (tmr_regs, wdt_regs) = wdt.into_regs();
    mapper.unmap(tmr_regs);
    mapper.unmap(wdt_regs);

    info!("{}: removed wdt {}", DRIVER_NAME, ordinal);
    Ok(())
}

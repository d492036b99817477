//! Device drivers and the register-level helpers they share.

pub mod mmio;
pub mod nunchuck;
pub mod tegra_regs;
pub mod tegra_wdt;
pub mod watchdog;

//! Generic watchdog device: the framework half of every watchdog.
//!
//! Wraps a hardware driver implementing [`WatchdogOps`] + [`PowerManaged`]
//! and implements the user-visible semantics on top of it:
//!
//! - the `active` status bit, independent of whether the hardware happens
//!   to be counting (it stays set across suspend);
//! - `nowayout`: once active, the watchdog refuses to stop;
//! - magic close: writing `'V'` before closing the device node disarms it,
//!   any other close leaves it running;
//! - ioctl dispatch.
//!
//! Every entry point takes `&mut self`; the host serialises calls per device.

use log::{info, warn};

use crate::app::commands::{
    WDIOF_KEEPALIVEPING, WDIOF_MAGICCLOSE, WDIOF_SETTIMEOUT, WDIOS_DISABLECARD, WDIOS_ENABLECARD,
    WatchdogCommand, WatchdogInfo, WatchdogReply,
};
use crate::app::ports::{PowerManaged, WatchdogOps};
use crate::error::{Error, Result};

/// Character that arms the magic close when written to the device node.
pub const MAGIC_CLOSE_CHAR: u8 = b'V';

pub struct WatchdogDevice<D> {
    driver: D,
    info: WatchdogInfo,
    nowayout: bool,
    active: bool,
    open: bool,
    expect_close: bool,
}

impl<D: WatchdogOps + PowerManaged> WatchdogDevice<D> {
    pub fn new(driver: D, info: WatchdogInfo, nowayout: bool) -> Self {
        Self {
            driver,
            info,
            nowayout,
            active: false,
            open: false,
            expect_close: false,
        }
    }

    pub fn driver(&self) -> &D {
        &self.driver
    }

    pub fn into_driver(self) -> D {
        self.driver
    }

    pub fn info(&self) -> &WatchdogInfo {
        &self.info
    }

    pub fn is_active(&self) -> bool {
        self.active
    }

    pub fn nowayout(&self) -> bool {
        self.nowayout
    }

    pub fn timeout(&self) -> u32 {
        self.driver.timeout()
    }

    // ── Core operations ───────────────────────────────────────

    pub fn start(&mut self) -> Result<()> {
        if self.active {
            return Ok(());
        }
        self.driver.start()?;
        self.active = true;
        Ok(())
    }

    pub fn stop(&mut self) -> Result<()> {
        if !self.active {
            return Ok(());
        }
        if self.nowayout {
            info!("watchdog: nowayout prevents watchdog being stopped");
            return Err(Error::Busy);
        }
        self.driver.stop()?;
        self.active = false;
        Ok(())
    }

    /// Keepalive. A no-op while the watchdog is not active.
    pub fn ping(&mut self) -> Result<()> {
        if !self.active {
            return Ok(());
        }
        self.driver.ping()
    }

    /// Change the timeout. Out-of-range values are rejected by the driver
    /// and leave the current timeout untouched.
    pub fn set_timeout(&mut self, timeout_secs: u32) -> Result<()> {
        if self.info.options & WDIOF_SETTIMEOUT == 0 {
            return Err(Error::InvalidArgument);
        }
        self.driver.set_timeout(timeout_secs)
    }

    // ── Device node ───────────────────────────────────────────

    /// Opening the device node arms the watchdog. Only one opener at a time.
    pub fn open(&mut self) -> Result<()> {
        if self.open {
            return Err(Error::Busy);
        }
        self.start()?;
        self.open = true;
        Ok(())
    }

    /// Any write is a keepalive. Returns the number of bytes consumed.
    pub fn write(&mut self, data: &[u8]) -> Result<usize> {
        if data.is_empty() {
            return Ok(0);
        }
        if !self.nowayout && self.info.options & WDIOF_MAGICCLOSE != 0 {
            self.expect_close = data.contains(&MAGIC_CLOSE_CHAR);
        }
        self.ping()?;
        Ok(data.len())
    }

    /// Closing the device node disarms the watchdog only after a magic close.
    pub fn release(&mut self) -> Result<()> {
        let result = if self.expect_close && !self.nowayout {
            self.stop()
        } else if self.active {
            warn!("watchdog: unexpected close, not stopping watchdog");
            self.ping()
        } else {
            Ok(())
        };
        self.open = false;
        self.expect_close = false;
        result
    }

    // ── ioctl ─────────────────────────────────────────────────

    pub fn ioctl(&mut self, cmd: WatchdogCommand) -> Result<WatchdogReply> {
        match cmd {
            WatchdogCommand::GetSupport => Ok(WatchdogReply::Info(self.info.clone())),
            WatchdogCommand::GetStatus | WatchdogCommand::GetBootStatus => {
                Ok(WatchdogReply::Status(0))
            }
            WatchdogCommand::SetOptions(opts) => {
                if opts & (WDIOS_DISABLECARD | WDIOS_ENABLECARD) == 0 {
                    return Err(Error::InvalidArgument);
                }
                if opts & WDIOS_DISABLECARD != 0 {
                    self.stop()?;
                }
                if opts & WDIOS_ENABLECARD != 0 {
                    self.start()?;
                }
                Ok(WatchdogReply::Done)
            }
            WatchdogCommand::KeepAlive => {
                if self.info.options & WDIOF_KEEPALIVEPING == 0 {
                    return Err(Error::InvalidArgument);
                }
                self.ping()?;
                Ok(WatchdogReply::Done)
            }
            WatchdogCommand::SetTimeout(t) => {
                self.set_timeout(t)?;
                self.ping()?;
                Ok(WatchdogReply::Timeout(self.driver.timeout()))
            }
            WatchdogCommand::GetTimeout => Ok(WatchdogReply::Timeout(self.driver.timeout())),
        }
    }

    // ── System sleep ──────────────────────────────────────────

    pub fn suspend(&mut self) -> Result<()> {
        self.driver.suspend()
    }

    pub fn resume(&mut self) -> Result<()> {
        self.driver.resume()
    }
}

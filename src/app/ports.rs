//! Port traits, the boundary between driver logic and the host runtime.
//!
//! ```text
//!   Host (timer, ioctl, PM) ──▶ callback traits ──▶ driver
//!   driver ──▶ InputSink / RegisterIo / IoMapper ──▶ host
//! ```
//!
//! Driving ports ([`PolledInput`], [`WatchdogOps`], [`PowerManaged`]) are
//! implemented by the drivers and invoked by the host. Driven ports
//! ([`InputSink`], [`RegisterIo`], [`IoMapper`]) are implemented by adapters
//! and consumed by the drivers through generics.
//!
//! Every method takes `&mut self`: the host serialises callbacks per device,
//! so the drivers carry no locks of their own.

use super::events::{AbsAxis, InputDeviceInfo, Key};
use crate::error::Result;
use crate::platform::MemResource;

// ───────────────────────────────────────────────────────────────
// Input event sink (driven adapter: driver → input subsystem)
// ───────────────────────────────────────────────────────────────

/// Receives input events from a driver.
///
/// Events reported between two [`sync`](InputSink::sync) calls form one
/// atomic batch.
pub trait InputSink {
    /// Register the device. Called once at probe time.
    fn register(&mut self, info: &InputDeviceInfo) -> Result<()>;

    fn report_abs(&mut self, axis: AbsAxis, value: i32);

    fn report_key(&mut self, key: Key, pressed: bool);

    /// Close the current batch.
    fn sync(&mut self);
}

// ───────────────────────────────────────────────────────────────
// Register I/O (driven adapter: driver → MMIO window)
// ───────────────────────────────────────────────────────────────

/// 32-bit register access to one mapped register window.
///
/// Offsets are byte offsets from the start of the window. Writes are
/// single uncached stores and cannot fail.
pub trait RegisterIo {
    fn read32(&self, offset: usize) -> u32;

    fn write32(&mut self, offset: usize, value: u32);
}

/// Maps a physical memory resource into a [`RegisterIo`] window.
pub trait IoMapper {
    type Regs: RegisterIo;

    /// Returns `None` when the region cannot be mapped.
    fn map(&mut self, res: &MemResource) -> Option<Self::Regs>;

    /// Release a window obtained from [`map`](IoMapper::map).
    fn unmap(&mut self, regs: Self::Regs);
}

// ───────────────────────────────────────────────────────────────
// Driving ports (host → driver)
// ───────────────────────────────────────────────────────────────

/// A polled input device: the host calls `open` when event delivery is
/// enabled and `poll` on every timer tick.
pub trait PolledInput {
    fn open(&mut self);

    fn poll(&mut self, sink: &mut impl InputSink);
}

/// Low-level watchdog operations, invoked by the watchdog framework.
pub trait WatchdogOps {
    /// Arm the hardware with the current timeout.
    fn start(&mut self) -> Result<()>;

    /// Disarm the hardware.
    fn stop(&mut self) -> Result<()>;

    /// Reload the countdown without touching the configuration.
    fn ping(&mut self) -> Result<()>;

    /// Store a new timeout in seconds; re-arm with it if currently armed.
    fn set_timeout(&mut self, timeout_secs: u32) -> Result<()>;

    /// Timeout currently configured, in seconds.
    fn timeout(&self) -> u32;

    /// Whether the hardware countdown is running.
    fn is_armed(&self) -> bool;
}

/// System sleep hooks.
pub trait PowerManaged {
    fn suspend(&mut self) -> Result<()>;

    fn resume(&mut self) -> Result<()>;
}

//! Driver-facing contracts: the boundary between driver logic and the host.
//!
//! The host (kernel shim, simulator, or test harness) invokes drivers only
//! through the callback traits in [`ports`], and receives input events and
//! ioctl replies as the plain data types in [`events`] and [`commands`].
//! Nothing in here touches hardware.

pub mod commands;
pub mod events;
pub mod ports;

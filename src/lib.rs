//! Nintendo Nunchuck and NVIDIA Tegra watchdog drivers.
//!
//! Both drivers are written against port traits ([`app::ports`]) so the
//! same logic runs under a kernel shim, on bare metal, or on the host
//! against the simulated hardware in [`adapters::sim`].
//!
//! | Driver                         | Bus / registers      | Host interface      |
//! |--------------------------------|----------------------|---------------------|
//! | [`drivers::nunchuck`]          | I2C (`embedded-hal`) | polled input device |
//! | [`drivers::tegra_wdt`]         | two MMIO windows     | watchdog framework  |

#![deny(unused_must_use)]

pub mod adapters;
pub mod app;
pub mod config;
pub mod drivers;
pub mod error;
pub mod platform;
pub mod registry;

pub use error::{Error, Result};

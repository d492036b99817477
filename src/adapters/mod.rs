//! Adapters: concrete implementations of the driven port traits.
//!
//! | Adapter    | Implements         | Connects to                  |
//! |------------|--------------------|------------------------------|
//! | `capture`  | InputSink          | in-memory batch capture      |
//! | `log_sink` | InputSink          | `log` output                 |
//! | `sim`      | RegisterIo         | simulated register windows   |
//! |            | IoMapper           | simulated `ioremap`          |
//! |            | embedded-hal I2c   | simulated Nunchuck           |
//!
//! The MMIO adapter for real hardware lives in
//! [`drivers::mmio`](crate::drivers::mmio).

pub mod capture;
pub mod log_sink;
pub mod sim;

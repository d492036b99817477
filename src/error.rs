//! Unified error type for both drivers.
//!
//! Mirrors the small set of errno values the host driver model understands.
//! All variants are `Copy` so they can be returned from probe paths and
//! framework callbacks without allocation.

use core::fmt;

/// Every fallible driver operation funnels into this type.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Error {
    /// Allocation or register-window mapping failed.
    NoMemory,
    /// The device instance is not supported by this driver.
    NoDevice,
    /// A required resource descriptor is missing.
    NoEntry,
    /// Argument outside the accepted range.
    InvalidArgument,
    /// The resource is already in use, or the operation is refused while active.
    Busy,
    /// A bus transfer failed.
    Bus,
}

impl Error {
    /// Negative Linux errno for this error, as returned to the driver-model binder.
    pub const fn errno(self) -> i32 {
        match self {
            Self::NoMemory => -12,
            Self::NoDevice => -19,
            Self::NoEntry => -2,
            Self::InvalidArgument => -22,
            Self::Busy => -16,
            Self::Bus => -5,
        }
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NoMemory => write!(f, "out of memory"),
            Self::NoDevice => write!(f, "no such device"),
            Self::NoEntry => write!(f, "missing resource"),
            Self::InvalidArgument => write!(f, "invalid argument"),
            Self::Busy => write!(f, "device or resource busy"),
            Self::Bus => write!(f, "bus transfer failed"),
        }
    }
}

impl core::error::Error for Error {}

/// Crate-wide `Result` alias.
pub type Result<T> = core::result::Result<T, Error>;

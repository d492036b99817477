//! Input-event vocabulary shared by input drivers and [`InputSink`] adapters.
//!
//! Event codes follow `include/uapi/linux/input-event-codes.h` so a kernel
//! shim can forward them unchanged.
//!
//! [`InputSink`]: super::ports::InputSink

use core::time::Duration;

/// Absolute axes an input device can expose.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u16)]
pub enum AbsAxis {
    X = 0x00,
    Y = 0x01,
    Rx = 0x03,
    Ry = 0x04,
    Rz = 0x05,
}

impl AbsAxis {
    /// Linux `ABS_*` code.
    pub const fn code(self) -> u16 {
        self as u16
    }
}

/// Keys/buttons an input device can expose.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u16)]
pub enum Key {
    BtnC = 0x132,
    BtnZ = 0x135,
}

impl Key {
    /// Linux `BTN_*` code.
    pub const fn code(self) -> u16 {
        self as u16
    }
}

/// Bus the input device hangs off (`BUS_*` codes).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u16)]
pub enum BusType {
    I2c = 0x18,
}

/// Calibration of one absolute axis.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AbsInfo {
    pub axis: AbsAxis,
    pub min: i32,
    pub max: i32,
    /// Noise filter width.
    pub fuzz: i32,
    /// Dead zone around the centre.
    pub flat: i32,
}

impl AbsInfo {
    pub const fn new(axis: AbsAxis, min: i32, max: i32, fuzz: i32, flat: i32) -> Self {
        Self {
            axis,
            min,
            max,
            fuzz,
            flat,
        }
    }
}

/// Everything the host needs to register an input device.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InputDeviceInfo {
    pub name: &'static str,
    pub bus: BusType,
    pub axes: &'static [AbsInfo],
    pub keys: &'static [Key],
    /// Interval at which the host must call `poll()`.
    pub poll_interval: Duration,
}

/// A single input event. A batch ends with [`InputEvent::Sync`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputEvent {
    Abs { axis: AbsAxis, value: i32 },
    Key { key: Key, pressed: bool },
    Sync,
}

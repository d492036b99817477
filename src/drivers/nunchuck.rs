//! Nintendo Nunchuck driver (I2C, polled).
//!
//! ## Protocol
//!
//! The Nunchuck does not push data. Every sample costs two bus
//! transactions, spread over two consecutive poll ticks so the controller
//! has time to latch the sample:
//!
//! | Tick | State             | Bus operation        | Next state        |
//! |------|-------------------|----------------------|-------------------|
//! | n    | `AwaitingRequest` | write `[0x00]`       | `AwaitingRead`    |
//! | n+1  | `AwaitingRead`    | read 6 bytes, report | `AwaitingRequest` |
//!
//! `open()` first writes `[0xF0, 0x55]` and `[0xFB, 0x00]`, which turns off
//! the controller's default byte obfuscation.
//!
//! ## Payload
//!
//! | Byte | Content                                          |
//! |------|--------------------------------------------------|
//! | 0    | joystick X                                       |
//! | 1    | joystick Y                                       |
//! | 2..4 | accelerometer X/Y/Z, bits 9:2                    |
//! | 5    | bits 3:2 accel low bits, bit 1 !C, bit 0 !Z      |
//!
//! Bus errors are not retried or surfaced: a lost sample is simply replaced
//! by the next one.

use core::time::Duration;

use embedded_hal::i2c::{Error as _, I2c};
use log::{debug, error, info};

use crate::app::events::{AbsAxis, AbsInfo, BusType, InputDeviceInfo, Key};
use crate::app::ports::{InputSink, PolledInput};
use crate::config::NunchuckConfig;
use crate::error::{Error, Result};

/// I2C device-table name this driver binds to.
pub const DEVICE_ID: &str = "wiichuck";

const MASK_BUTTON_Z: u8 = 0x01;
const MASK_BUTTON_C: u8 = 0x02;
const MASK_ACCEL_LOW: u8 = 0x0c;

/// Writes that disable the controller's default encryption.
const INIT_SEQUENCE: [[u8; 2]; 2] = [[0xf0, 0x55], [0xfb, 0x00]];
/// Asks the controller to latch a fresh sample.
const SAMPLE_REQUEST: [u8; 1] = [0x00];

const ABS_FUZZ: i32 = 4;
const ABS_FLAT: i32 = 8;

static AXES: [AbsInfo; 5] = [
    AbsInfo::new(AbsAxis::X, 30, 220, ABS_FUZZ, ABS_FLAT),
    AbsInfo::new(AbsAxis::Y, 40, 200, ABS_FUZZ, ABS_FLAT),
    AbsInfo::new(AbsAxis::Rx, 0, 0x3ff, ABS_FUZZ, ABS_FLAT),
    AbsInfo::new(AbsAxis::Ry, 0, 0x3ff, ABS_FUZZ, ABS_FLAT),
    AbsInfo::new(AbsAxis::Rz, 0, 0x3ff, ABS_FUZZ, ABS_FLAT),
];

static KEYS: [Key; 2] = [Key::BtnC, Key::BtnZ];

/// 10-bit accelerometer value from its high byte and the shared status byte.
pub const fn decode_accel(high: u8, low: u8) -> u16 {
    ((high as u16) << 2) | (((low & MASK_ACCEL_LOW) >> 2) as u16)
}

/// One decoded controller sample.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Sample {
    pub joy_x: u8,
    pub joy_y: u8,
    pub accel_x: u16,
    pub accel_y: u16,
    pub accel_z: u16,
    pub button_c: bool,
    pub button_z: bool,
}

impl Sample {
    pub const fn decode(b: &[u8; 6]) -> Self {
        Self {
            joy_x: b[0],
            joy_y: b[1],
            accel_x: decode_accel(b[2], b[5]),
            accel_y: decode_accel(b[3], b[5]),
            accel_z: decode_accel(b[4], b[5]),
            // Buttons are active-low.
            button_c: b[5] & MASK_BUTTON_C == 0,
            button_z: b[5] & MASK_BUTTON_Z == 0,
        }
    }

    /// Emit the sample as one batch.
    pub fn report(&self, sink: &mut impl InputSink) {
        sink.report_abs(AbsAxis::X, self.joy_x as i32);
        sink.report_abs(AbsAxis::Y, self.joy_y as i32);
        sink.report_abs(AbsAxis::Rx, self.accel_x as i32);
        sink.report_abs(AbsAxis::Ry, self.accel_y as i32);
        sink.report_abs(AbsAxis::Rz, self.accel_z as i32);
        sink.report_key(Key::BtnC, self.button_c);
        sink.report_key(Key::BtnZ, self.button_z);
        sink.sync();
    }
}

/// Position in the two-step request/read exchange.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PollState {
    AwaitingRequest,
    AwaitingRead,
    /// A raw value that names neither state; the next poll recovers.
    Unknown(u8),
}

impl PollState {
    pub const fn to_raw(self) -> u8 {
        match self {
            Self::AwaitingRequest => 0,
            Self::AwaitingRead => 1,
            Self::Unknown(raw) => raw,
        }
    }
}

impl From<u8> for PollState {
    fn from(raw: u8) -> Self {
        match raw {
            0 => Self::AwaitingRequest,
            1 => Self::AwaitingRead,
            other => Self::Unknown(other),
        }
    }
}

pub struct Nunchuck<I2C> {
    i2c: I2C,
    address: u8,
    poll_interval: Duration,
    state: PollState,
}

impl<I2C: I2c> Nunchuck<I2C> {
    pub fn new(i2c: I2C, config: &NunchuckConfig) -> Self {
        Self {
            i2c,
            address: config.address,
            poll_interval: Duration::from_millis(config.poll_interval_ms as u64),
            state: PollState::AwaitingRequest,
        }
    }

    /// Device-table match.
    pub fn matches(id: &str) -> bool {
        id == DEVICE_ID
    }

    /// Bind to a matched I2C client and register the input device.
    pub fn probe(
        id: &str,
        i2c: I2C,
        config: &NunchuckConfig,
        sink: &mut impl InputSink,
    ) -> Result<Self> {
        if !Self::matches(id) {
            return Err(Error::NoDevice);
        }
        let dev = Self::new(i2c, config);
        if let Err(e) = sink.register(&dev.device_info()) {
            error!("{}@{:#04x}: failed to register input device: {}", id, dev.address, e);
            return Err(e);
        }
        info!("{}@{:#04x}: Nintendo Nunchuck registered", id, dev.address);
        Ok(dev)
    }

    pub fn device_info(&self) -> InputDeviceInfo {
        InputDeviceInfo {
            name: "Nintendo Nunchuck",
            bus: BusType::I2c,
            axes: &AXES,
            keys: &KEYS,
            poll_interval: self.poll_interval,
        }
    }

    pub fn state(&self) -> PollState {
        self.state
    }

    /// Restore the exchange position from a saved raw byte.
    pub fn set_raw_state(&mut self, raw: u8) {
        self.state = PollState::from(raw);
    }

    pub fn bus_mut(&mut self) -> &mut I2C {
        &mut self.i2c
    }

    /// Release the bus.
    pub fn release(self) -> I2C {
        self.i2c
    }

    /// Read the 6-byte sample the controller latched on the last request.
    pub fn read_raw(&mut self) -> Result<[u8; 6]> {
        let mut buf = [0u8; 6];
        self.i2c.read(self.address, &mut buf).map_err(|e| {
            debug!("nunchuck: sample read failed: {:?}", e.kind());
            Error::Bus
        })?;
        Ok(buf)
    }

    fn write_ignoring_errors(&mut self, bytes: &[u8]) {
        if let Err(e) = self.i2c.write(self.address, bytes) {
            debug!("nunchuck: write {:02x?} failed: {:?}", bytes, e.kind());
        }
    }
}

impl<I2C: I2c> PolledInput for Nunchuck<I2C> {
    fn open(&mut self) {
        for msg in INIT_SEQUENCE {
            self.write_ignoring_errors(&msg);
        }
        self.state = PollState::AwaitingRequest;
    }

    fn poll(&mut self, sink: &mut impl InputSink) {
        match self.state {
            PollState::AwaitingRequest => {
                self.write_ignoring_errors(&SAMPLE_REQUEST);
                self.state = PollState::AwaitingRead;
            }
            PollState::AwaitingRead => {
                // A lost sample is reported as all zeroes.
                let buf = self.read_raw().unwrap_or([0; 6]);
                Sample::decode(&buf).report(sink);
                self.state = PollState::AwaitingRequest;
            }
            PollState::Unknown(raw) => {
                debug!("nunchuck: unknown poll state {}, resetting", raw);
                self.state = PollState::AwaitingRequest;
            }
        }
    }
}

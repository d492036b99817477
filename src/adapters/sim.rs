//! Simulated hardware for host runs and tests.
//!
//! | Type            | Implements            | Stands in for                |
//! |-----------------|-----------------------|------------------------------|
//! | `SimRegisters`  | `RegisterIo`          | one MMIO register window     |
//! | `SimMapper`     | `IoMapper`            | `ioremap` of platform memory |
//! | `SimNunchuck`   | `embedded_hal` `I2c`  | a Nunchuck on the I2C bus    |
//!
//! Registers read back the last value written; every store is logged so
//! tests can assert on the exact write sequence.

use std::collections::BTreeMap;

use embedded_hal::i2c::{self, ErrorKind, NoAcknowledgeSource, Operation};

use crate::app::ports::{IoMapper, RegisterIo};
use crate::platform::MemResource;

// ── Register window ───────────────────────────────────────────

#[derive(Debug, Default, Clone)]
pub struct SimRegisters {
    values: BTreeMap<usize, u32>,
    writes: Vec<(usize, u32)>,
    /// Physical base this window was mapped from, if any.
    base: Option<usize>,
}

impl SimRegisters {
    pub fn new() -> Self {
        Self::default()
    }

    fn mapped_at(base: usize) -> Self {
        Self {
            base: Some(base),
            ..Self::default()
        }
    }

    pub fn base(&self) -> Option<usize> {
        self.base
    }

    /// Every store, oldest first, as `(offset, value)`.
    pub fn writes(&self) -> &[(usize, u32)] {
        &self.writes
    }

    /// How many times `value` was stored at `offset`.
    pub fn count_writes(&self, offset: usize, value: u32) -> usize {
        self.writes
            .iter()
            .filter(|&&w| w == (offset, value))
            .count()
    }
}

impl RegisterIo for SimRegisters {
    fn read32(&self, offset: usize) -> u32 {
        self.values.get(&offset).copied().unwrap_or(0)
    }

    fn write32(&mut self, offset: usize, value: u32) {
        self.values.insert(offset, value);
        self.writes.push((offset, value));
    }
}

// ── Mapper ────────────────────────────────────────────────────

/// Hands out [`SimRegisters`] windows; can be told to fail the n-th map.
#[derive(Debug, Default)]
pub struct SimMapper {
    /// Zero-based index of the `map()` call that fails.
    pub fail_at: Option<usize>,
    map_calls: usize,
    live: Vec<usize>,
}

impl SimMapper {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn failing_at(n: usize) -> Self {
        Self {
            fail_at: Some(n),
            ..Self::default()
        }
    }

    /// Base addresses of windows mapped and not yet unmapped.
    pub fn live(&self) -> &[usize] {
        &self.live
    }
}

impl IoMapper for SimMapper {
    type Regs = SimRegisters;

    fn map(&mut self, res: &MemResource) -> Option<SimRegisters> {
        let call = self.map_calls;
        self.map_calls += 1;
        if self.fail_at == Some(call) {
            return None;
        }
        self.live.push(res.start);
        Some(SimRegisters::mapped_at(res.start))
    }

    fn unmap(&mut self, regs: SimRegisters) {
        if let Some(base) = regs.base {
            self.live.retain(|&b| b != base);
        }
    }
}

// ── Nunchuck ──────────────────────────────────────────────────

/// Simulated Nunchuck extension controller.
///
/// Until the two-message init sequence has been written the device answers
/// with its default obfuscated encoding, `(x ^ 0x17) + 0x17`.
#[derive(Debug, Clone)]
pub struct SimNunchuck {
    address: u8,
    /// Sample the controller will latch on the next request.
    pub sample: [u8; 6],
    latched: [u8; 6],
    init_step: u8,
    /// Fail this many upcoming transactions with a bus error.
    pub fail_next: usize,
    /// Every write payload seen, oldest first.
    pub writes: Vec<Vec<u8>>,
    pub reads: usize,
}

impl SimNunchuck {
    pub fn new(address: u8) -> Self {
        Self {
            address,
            // Centred stick, level accelerometer, buttons released.
            sample: [0x80, 0x80, 0x80, 0x80, 0xb3, 0xff],
            latched: [0; 6],
            init_step: 0,
            fail_next: 0,
            writes: Vec::new(),
            reads: 0,
        }
    }

    pub fn is_unencrypted(&self) -> bool {
        self.init_step == 2
    }

    fn on_write(&mut self, bytes: &[u8]) {
        self.writes.push(bytes.to_vec());
        match bytes {
            [0xf0, 0x55] => self.init_step = 1,
            [0xfb, 0x00] if self.init_step == 1 => self.init_step = 2,
            [0x00] => self.latched = self.sample,
            _ => {}
        }
    }

    fn on_read(&mut self, buf: &mut [u8]) {
        self.reads += 1;
        for (dst, &src) in buf.iter_mut().zip(self.latched.iter()) {
            *dst = if self.is_unencrypted() {
                src
            } else {
                (src ^ 0x17).wrapping_add(0x17)
            };
        }
    }
}

impl i2c::ErrorType for SimNunchuck {
    type Error = ErrorKind;
}

impl i2c::I2c for SimNunchuck {
    fn transaction(
        &mut self,
        address: u8,
        operations: &mut [Operation<'_>],
    ) -> Result<(), Self::Error> {
        if address != self.address {
            return Err(ErrorKind::NoAcknowledge(NoAcknowledgeSource::Address));
        }
        if self.fail_next > 0 {
            self.fail_next -= 1;
            return Err(ErrorKind::Bus);
        }
        for op in operations {
            match op {
                Operation::Write(bytes) => self.on_write(bytes),
                Operation::Read(buf) => self.on_read(buf),
            }
        }
        Ok(())
    }
}

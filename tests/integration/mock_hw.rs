//! Mock hardware for integration tests.
//!
//! `MockI2c` records every bus operation and serves a scripted payload so
//! tests can assert on the exact transfer sequence without a Nunchuck.

use embedded_hal::i2c::{self, ErrorKind, Operation};

use socdrv::adapters::sim::{SimMapper, SimRegisters};
use socdrv::drivers::tegra_wdt::{self, TegraWatchdog};
use socdrv::platform::{MemResource, PlatformDevice, Resource};
use socdrv::registry::InstanceRegistry;

// ── I2C call record ───────────────────────────────────────────

#[derive(Debug, Clone, PartialEq)]
pub enum BusOp {
    Write { addr: u8, bytes: Vec<u8> },
    Read { addr: u8, len: usize },
}

// ── MockI2c ───────────────────────────────────────────────────

pub struct MockI2c {
    pub ops: Vec<BusOp>,
    /// Bytes returned by every read.
    pub payload: [u8; 6],
    /// Fail every transaction while set.
    pub fail: bool,
}

impl MockI2c {
    pub fn new() -> Self {
        Self {
            ops: Vec::new(),
            payload: [0; 6],
            fail: false,
        }
    }

    pub fn with_payload(payload: [u8; 6]) -> Self {
        Self {
            payload,
            ..Self::new()
        }
    }

    pub fn writes(&self) -> Vec<Vec<u8>> {
        self.ops
            .iter()
            .filter_map(|op| match op {
                BusOp::Write { bytes, .. } => Some(bytes.clone()),
                BusOp::Read { .. } => None,
            })
            .collect()
    }

    pub fn read_count(&self) -> usize {
        self.ops
            .iter()
            .filter(|op| matches!(op, BusOp::Read { .. }))
            .count()
    }
}

impl Default for MockI2c {
    fn default() -> Self {
        Self::new()
    }
}

impl i2c::ErrorType for MockI2c {
    type Error = ErrorKind;
}

impl i2c::I2c for MockI2c {
    fn transaction(
        &mut self,
        address: u8,
        operations: &mut [Operation<'_>],
    ) -> Result<(), Self::Error> {
        for op in operations {
            match op {
                Operation::Write(bytes) => self.ops.push(BusOp::Write {
                    addr: address,
                    bytes: bytes.to_vec(),
                }),
                Operation::Read(buf) => {
                    self.ops.push(BusOp::Read {
                        addr: address,
                        len: buf.len(),
                    });
                    if !self.fail {
                        let n = buf.len().min(self.payload.len());
                        buf[..n].copy_from_slice(&self.payload[..n]);
                    }
                }
            }
        }
        if self.fail {
            return Err(ErrorKind::Bus);
        }
        Ok(())
    }
}

// ── Platform helpers ──────────────────────────────────────────

pub const TMR_BASE: usize = 0x6000_5088;
pub const WDT_BASE: usize = 0x6000_5100;

/// A fully-described `tegra_wdt` platform device.
pub fn tegra_pdev(id: i32) -> PlatformDevice {
    PlatformDevice::new(tegra_wdt::DRIVER_NAME, id)
        .with_resource(Resource::Mem(MemResource::new(WDT_BASE, 0x20)))
        .with_resource(Resource::Mem(MemResource::new(TMR_BASE, 0x8)))
        .with_resource(Resource::Irq(32))
}

pub type SimRegistry = InstanceRegistry<TegraWatchdog<SimRegisters>>;

/// Probe a default watchdog and return everything a test needs.
pub fn probed_watchdog(
    params: &socdrv::config::WatchdogParams,
) -> (SimMapper, SimRegistry, usize) {
    let mut mapper = SimMapper::new();
    let mut registry = SimRegistry::new();
    let ordinal = tegra_wdt::probe(&tegra_pdev(0), params, &mut mapper, &mut registry)
        .expect("probe of a valid device must succeed");
    (mapper, registry, ordinal)
}

//! Fuzz target: Nunchuck poll cycle
//!
//! Feeds arbitrary payloads and saved poll states through the driver and
//! checks that:
//! - Accelerometer values never leave the 10-bit range
//! - Every batch ends with a sync and carries 7 events before it
//! - The state machine never stays in an unknown state
//!
//! cargo fuzz run fuzz_sample_decode

#![no_main]

use embedded_hal::i2c::{self, ErrorKind, Operation};
use libfuzzer_sys::fuzz_target;
use socdrv::adapters::capture::CaptureSink;
use socdrv::app::events::{AbsAxis, InputEvent};
use socdrv::app::ports::PolledInput;
use socdrv::config::NunchuckConfig;
use socdrv::drivers::nunchuck::{Nunchuck, PollState};

/// Serves successive read-sized windows of the fuzz input; fails once the
/// input is exhausted.
struct FuzzBus<'a> {
    data: &'a [u8],
    pos: usize,
}

impl i2c::ErrorType for FuzzBus<'_> {
    type Error = ErrorKind;
}

impl i2c::I2c for FuzzBus<'_> {
    fn transaction(&mut self, _: u8, ops: &mut [Operation<'_>]) -> Result<(), ErrorKind> {
        for op in ops {
            if let Operation::Read(buf) = op {
                let Some(chunk) = self.data.get(self.pos..self.pos + buf.len()) else {
                    return Err(ErrorKind::Bus);
                };
                buf.copy_from_slice(chunk);
                self.pos += buf.len();
            }
        }
        Ok(())
    }
}

fuzz_target!(|data: &[u8]| {
    let Some((&raw_state, payload)) = data.split_first() else {
        return;
    };

    let bus = FuzzBus { data: payload, pos: 0 };
    let mut chuck = Nunchuck::new(bus, &NunchuckConfig::default());
    let mut sink = CaptureSink::new();
    chuck.set_raw_state(raw_state);

    for _ in 0..(payload.len() / 3 + 2) {
        chuck.poll(&mut sink);
        assert!(!matches!(chuck.state(), PollState::Unknown(_)));

        if let Some(batch) = sink.last_batch() {
            assert_eq!(batch.len(), 8);
            assert_eq!(batch.last(), Some(&InputEvent::Sync));
        }
        for axis in [AbsAxis::Rx, AbsAxis::Ry, AbsAxis::Rz] {
            if let Some(v) = sink.abs(axis) {
                assert!((0..=1023).contains(&v), "{axis:?} = {v}");
            }
        }
    }
    assert_eq!(sink.dropped, 0);

    chuck.open();
    assert_eq!(chuck.state(), PollState::AwaitingRequest);
});

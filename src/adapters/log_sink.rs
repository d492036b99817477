//! Log-based input sink adapter.
//!
//! Implements [`InputSink`] by collecting each batch and writing it as one
//! line to the logger when the batch is synced. A uinput or kernel
//! `input_dev` adapter would implement the same trait.

use log::info;

use crate::app::events::{AbsAxis, InputDeviceInfo, Key};
use crate::app::ports::InputSink;
use crate::error::Result;

/// Adapter that logs every input batch.
#[derive(Debug, Default)]
pub struct LogInputSink {
    name: &'static str,
    axes: [i32; 6],
    c: bool,
    z: bool,
}

impl LogInputSink {
    pub fn new() -> Self {
        Self::default()
    }
}

impl InputSink for LogInputSink {
    fn register(&mut self, info: &InputDeviceInfo) -> Result<()> {
        self.name = info.name;
        info!(
            "INPUT | registered \"{}\" bus={:?} axes={} keys={} poll={}ms",
            info.name,
            info.bus,
            info.axes.len(),
            info.keys.len(),
            info.poll_interval.as_millis()
        );
        Ok(())
    }

    fn report_abs(&mut self, axis: AbsAxis, value: i32) {
        if let Some(slot) = self.axes.get_mut(axis.code() as usize) {
            *slot = value;
        }
    }

    fn report_key(&mut self, key: Key, pressed: bool) {
        match key {
            Key::BtnC => self.c = pressed,
            Key::BtnZ => self.z = pressed,
        }
    }

    fn sync(&mut self) {
        info!(
            "INPUT | {} | stick=({:3},{:3}) accel=({:4},{:4},{:4}) | C={} Z={}",
            self.name,
            self.axes[AbsAxis::X.code() as usize],
            self.axes[AbsAxis::Y.code() as usize],
            self.axes[AbsAxis::Rx.code() as usize],
            self.axes[AbsAxis::Ry.code() as usize],
            self.axes[AbsAxis::Rz.code() as usize],
            if self.c { "down" } else { "up" },
            if self.z { "down" } else { "up" },
        );
    }
}

//! In-memory input sink that keeps the most recent complete batch.

use crate::app::events::{AbsAxis, InputDeviceInfo, InputEvent, Key};
use crate::app::ports::InputSink;
use crate::error::{Error, Result};

/// Largest batch an input driver in this crate emits (5 axes, 2 keys, sync).
pub const MAX_BATCH: usize = 8;

pub type Batch = heapless::Vec<InputEvent, MAX_BATCH>;

#[derive(Debug, Default)]
pub struct CaptureSink {
    registered: Option<InputDeviceInfo>,
    pending: Batch,
    last: Option<Batch>,
    batches: usize,
    overflowed: bool,
    /// Batches dropped because they outgrew [`MAX_BATCH`].
    pub dropped: usize,
    /// Make the next `register()` fail.
    pub reject_register: bool,
}

impl CaptureSink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn registered(&self) -> Option<&InputDeviceInfo> {
        self.registered.as_ref()
    }

    /// The last batch closed by `sync()`, including the trailing `Sync`.
    pub fn last_batch(&self) -> Option<&[InputEvent]> {
        self.last.as_deref()
    }

    /// Number of batches synced so far.
    pub fn batch_count(&self) -> usize {
        self.batches
    }

    /// Events reported since the last sync.
    pub fn pending(&self) -> &[InputEvent] {
        &self.pending
    }

    /// Latest value of `axis` in the last batch.
    pub fn abs(&self, axis: AbsAxis) -> Option<i32> {
        self.last_batch()?.iter().rev().find_map(|e| match *e {
            InputEvent::Abs { axis: a, value } if a == axis => Some(value),
            _ => None,
        })
    }

    /// Latest state of `key` in the last batch.
    pub fn key(&self, key: Key) -> Option<bool> {
        self.last_batch()?.iter().rev().find_map(|e| match *e {
            InputEvent::Key { key: k, pressed } if k == key => Some(pressed),
            _ => None,
        })
    }

    fn push(&mut self, event: InputEvent) {
        if self.pending.push(event).is_err() {
            self.overflowed = true;
        }
    }
}

impl InputSink for CaptureSink {
    fn register(&mut self, info: &InputDeviceInfo) -> Result<()> {
        if self.reject_register {
            return Err(Error::NoMemory);
        }
        self.registered = Some(info.clone());
        Ok(())
    }

    fn report_abs(&mut self, axis: AbsAxis, value: i32) {
        self.push(InputEvent::Abs { axis, value });
    }

    fn report_key(&mut self, key: Key, pressed: bool) {
        self.push(InputEvent::Key { key, pressed });
    }

    fn sync(&mut self) {
        self.push(InputEvent::Sync);
        let batch = core::mem::take(&mut self.pending);
        if core::mem::take(&mut self.overflowed) {
            self.dropped += 1;
        } else {
            self.last = Some(batch);
            self.batches += 1;
        }
    }
}

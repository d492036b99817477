//! Fixed-size table of live driver instances, indexed by instance ordinal.
//!
//! Owned by whoever manages the module lifecycle and passed to `probe` /
//! `remove` explicitly.

use crate::error::{Error, Result};

/// Maximum number of watchdog instances on one SoC.
pub const MAX_INSTANCES: usize = 4;

pub struct InstanceRegistry<T> {
    slots: [Option<T>; MAX_INSTANCES],
}

impl<T> Default for InstanceRegistry<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> InstanceRegistry<T> {
    pub fn new() -> Self {
        Self {
            slots: core::array::from_fn(|_| None),
        }
    }

    /// Store `item` at `ordinal`. An occupied slot is [`Error::Busy`].
    pub fn insert(&mut self, ordinal: usize, item: T) -> Result<()> {
        let slot = self.slots.get_mut(ordinal).ok_or(Error::InvalidArgument)?;
        if slot.is_some() {
            return Err(Error::Busy);
        }
        *slot = Some(item);
        Ok(())
    }

    pub fn get(&self, ordinal: usize) -> Option<&T> {
        self.slots.get(ordinal)?.as_ref()
    }

    pub fn get_mut(&mut self, ordinal: usize) -> Option<&mut T> {
        self.slots.get_mut(ordinal)?.as_mut()
    }

    /// Clear the slot and hand back its occupant.
    pub fn remove(&mut self, ordinal: usize) -> Option<T> {
        self.slots.get_mut(ordinal)?.take()
    }

    /// Number of live entries.
    pub fn len(&self) -> usize {
        self.slots.iter().filter(|s| s.is_some()).count()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

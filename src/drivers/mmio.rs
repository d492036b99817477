//! Volatile memory-mapped register window.
//!
//! Every access is a single uncached 32-bit load or store. The window is
//! bounds-checked against its length so an out-of-range offset panics in
//! debug builds instead of scribbling over a neighbouring block.

use core::ptr::NonNull;

use crate::app::ports::{IoMapper, RegisterIo};
use crate::platform::MemResource;

/// A mapped register window.
pub struct MmioRegisters {
    base: NonNull<u32>,
    len: usize,
}

impl MmioRegisters {
    /// Wrap an already-mapped window.
    ///
    /// # Safety
    ///
    /// `base` must point to `len` bytes of device memory that stay mapped for
    /// the lifetime of the returned value, and no other code may access the
    /// window concurrently.
    pub unsafe fn new(base: NonNull<u32>, len: usize) -> Self {
        Self { base, len }
    }

    fn reg(&self, offset: usize) -> *mut u32 {
        debug_assert!(offset % 4 == 0, "unaligned register offset {offset:#x}");
        debug_assert!(offset + 4 <= self.len, "register offset {offset:#x} outside window");
        // SAFETY: offset is within the window per the constructor contract.
        unsafe { self.base.as_ptr().byte_add(offset) }
    }
}

impl RegisterIo for MmioRegisters {
    fn read32(&self, offset: usize) -> u32 {
        // SAFETY: `reg` yields an aligned pointer inside the mapped window.
        unsafe { self.reg(offset).read_volatile() }
    }

    fn write32(&mut self, offset: usize, value: u32) {
        // SAFETY: as above; `&mut self` gives exclusive access.
        unsafe { self.reg(offset).write_volatile(value) }
    }
}

/// Mapper for targets where physical register addresses are directly
/// accessible (MMU off, or an identity-mapped peripheral aperture).
pub struct IdentityMapper {
    _private: (),
}

impl IdentityMapper {
    /// # Safety
    ///
    /// Every [`MemResource`] later passed to [`IoMapper::map`] must describe
    /// device memory reachable at its physical address and owned by the
    /// caller.
    pub unsafe fn new() -> Self {
        Self { _private: () }
    }
}

impl IoMapper for IdentityMapper {
    type Regs = MmioRegisters;

    fn map(&mut self, res: &MemResource) -> Option<MmioRegisters> {
        if res.len < 4 || res.start % 4 != 0 {
            return None;
        }
        let base = NonNull::new(res.start as *mut u32)?;
        // SAFETY: guaranteed by the contract of `IdentityMapper::new`.
        Some(unsafe { MmioRegisters::new(base, res.len) })
    }

    fn unmap(&mut self, _regs: MmioRegisters) {}
}

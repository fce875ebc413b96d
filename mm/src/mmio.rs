//! MMIO region abstraction - type-safe device register access.
//!
//! An `MmioRegion` is what the platform hands back after mapping one of the
//! pipeline's register windows (clock generator, timing controller, DMA
//! engine). It is the Rust counterpart of an `ioremap()`ed `__iomem` pointer:
//! it cannot be dereferenced, only read and written through volatile
//! accessors.
//!
//! # Usage
//!
//! ```ignore
//! use pynqfb_abi::{PhysAddr, VirtAddr};
//! use pynqfb_mm::mmio::MmioRegion;
//!
//! // SAFETY: the platform mapped 0x43C0_0000..+0x1_0000 at `virt`.
//! let dynclk = unsafe { MmioRegion::from_raw(virt, PhysAddr::new(0x43C0_0000), 0x1_0000) }?;
//! dynclk.write_u32(0x00, 0);
//! let status = dynclk.read_u32(0x04);
//! ```

use core::ptr::{read_volatile, write_volatile};

use pynqfb_abi::{PhysAddr, VirtAddr};

/// A mapped MMIO region providing volatile access to device registers.
///
/// This type guarantees:
/// - All accesses are volatile (not optimized away)
/// - Bounds checking (debug builds)
/// - Proper alignment verification (debug builds)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MmioRegion {
    virt_base: VirtAddr,
    phys_base: PhysAddr,
    size: usize,
}

impl MmioRegion {
    /// Create an empty (unmapped) MMIO region.
    #[inline]
    pub const fn empty() -> Self {
        Self {
            virt_base: VirtAddr::NULL,
            phys_base: PhysAddr::NULL,
            size: 0,
        }
    }

    /// Wrap a mapping produced by the platform.
    ///
    /// Returns `None` if the virtual address is null, the size is zero or the
    /// range would overflow.
    ///
    /// # Safety
    ///
    /// `virt` must be a device mapping of `phys` valid for `size` bytes for as
    /// long as the returned region (or any copy of it) is used.
    pub unsafe fn from_raw(virt: VirtAddr, phys: PhysAddr, size: usize) -> Option<Self> {
        if virt.is_null() || size == 0 {
            return None;
        }
        virt.as_u64().checked_add(size as u64)?;
        Some(Self {
            virt_base: virt,
            phys_base: phys,
            size,
        })
    }

    /// Read a value at byte offset from the MMIO region.
    ///
    /// # Panics
    ///
    /// - Debug-panics if `offset + sizeof(T)` exceeds region size.
    /// - Debug-panics if access is not naturally aligned.
    #[inline]
    pub fn read<T: Copy>(&self, offset: usize) -> T {
        let size = core::mem::size_of::<T>();
        debug_assert!(
            self.is_valid_offset(offset, size),
            "MMIO read out of bounds: offset={}, size={}, region_size={}",
            offset,
            size,
            self.size
        );
        debug_assert!(
            offset % size == 0,
            "MMIO read misaligned: offset={}, align={}",
            offset,
            size
        );

        let ptr = self.virt_base.offset(offset as u64).as_ptr::<T>();
        // SAFETY: from_raw's contract covers [virt_base, virt_base + size).
        unsafe { read_volatile(ptr) }
    }

    /// Write a value at byte offset to the MMIO region.
    ///
    /// # Panics
    ///
    /// - Debug-panics if `offset + sizeof(T)` exceeds region size.
    /// - Debug-panics if access is not naturally aligned.
    #[inline]
    pub fn write<T: Copy>(&self, offset: usize, value: T) {
        let size = core::mem::size_of::<T>();
        debug_assert!(
            self.is_valid_offset(offset, size),
            "MMIO write out of bounds: offset={}, size={}, region_size={}",
            offset,
            size,
            self.size
        );
        debug_assert!(
            offset % size == 0,
            "MMIO write misaligned: offset={}, align={}",
            offset,
            size
        );

        let ptr = self.virt_base.offset(offset as u64).as_mut_ptr::<T>();
        // SAFETY: from_raw's contract covers [virt_base, virt_base + size).
        unsafe { write_volatile(ptr, value) }
    }

    #[inline]
    pub fn read_u32(&self, offset: usize) -> u32 {
        self.read(offset)
    }

    #[inline]
    pub fn write_u32(&self, offset: usize, value: u32) {
        self.write(offset, value)
    }

    /// Get the virtual base address of this region.
    ///
    /// **Warning**: Do not dereference this directly. Use `read()`/`write()`.
    #[inline]
    pub fn virt_base(&self) -> VirtAddr {
        self.virt_base
    }

    #[inline]
    pub fn phys_base(&self) -> PhysAddr {
        self.phys_base
    }

    #[inline]
    pub fn size(&self) -> usize {
        self.size
    }

    /// Returns true if this region is mapped (non-zero size).
    #[inline]
    pub fn is_mapped(&self) -> bool {
        self.size != 0
    }

    /// Check if an offset is within bounds for a given access size.
    #[inline]
    pub fn is_valid_offset(&self, offset: usize, access_size: usize) -> bool {
        offset.checked_add(access_size).is_some_and(|end| end <= self.size)
    }
}

impl Default for MmioRegion {
    #[inline]
    fn default() -> Self {
        Self::empty()
    }
}

// SAFETY: the mapping is valid from any CPU. Concurrent access still needs
// external synchronization, which the exclusively-owned device provides.
unsafe impl Send for MmioRegion {}

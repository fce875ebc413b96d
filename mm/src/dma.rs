//! Cache-coherent, physically contiguous memory shared with the DMA engine.
//!
//! The platform owns the actual allocator (on Linux-like hosts this is
//! `dma_alloc_coherent`); the driver only sees the [`CoherentAllocator`] seam
//! and the [`DmaRegion`] ownership token it hands out.

use pynqfb_abi::{PhysAddr, VirtAddr};

/// One coherent allocation: bus address, CPU mapping and length.
///
/// Neither `Clone` nor `Copy`: the value is the ownership token
/// that must be given back to [`CoherentAllocator::free_coherent`] exactly once.
#[derive(Debug, PartialEq, Eq)]
pub struct DmaRegion {
    phys: PhysAddr,
    virt: VirtAddr,
    len: usize,
}

impl DmaRegion {
    /// # Safety
    ///
    /// `virt` must be a CPU mapping of `phys`, valid for reads and writes of
    /// `len` bytes until the region is returned to its allocator.
    pub const unsafe fn new(phys: PhysAddr, virt: VirtAddr, len: usize) -> Self {
        Self { phys, virt, len }
    }

    #[inline]
    pub fn phys(&self) -> PhysAddr {
        self.phys
    }

    #[inline]
    pub fn virt(&self) -> VirtAddr {
        self.virt
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.len
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Clear the whole region.
    pub fn zero(&mut self) {
        // SAFETY: DmaRegion::new guarantees virt is writable for len bytes.
        unsafe { core::ptr::write_bytes(self.virt.as_mut_ptr::<u8>(), 0, self.len) }
    }
}

/// Platform capability to allocate and free coherent DMA memory.
pub trait CoherentAllocator {
    /// Allocate `len` bytes of physically contiguous, cache-coherent memory.
    /// Returns `None` when the platform cannot satisfy the request.
    fn alloc_coherent(&mut self, len: usize) -> Option<DmaRegion>;

    /// Return a region obtained from `alloc_coherent`.
    fn free_coherent(&mut self, region: DmaRegion);
}

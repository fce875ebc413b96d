//! Frame memory manager.
//!
//! Owns the scan-out buffers of the display plane. The pipeline supports a
//! compile-time number of back buffers; this driver runs a single parked
//! frame, so [`FRAME_COUNT`] is one.

use pynqfb_abi::{FbError, FbResult, PhysAddr, VirtAddr};
use pynqfb_lib::{klog_debug, klog_error, page_align};

use crate::dma::{CoherentAllocator, DmaRegion};

/// Number of frame buffers allocated per display plane.
pub const FRAME_COUNT: usize = 1;

/// Page-aligned size of one frame.
#[inline]
pub const fn frame_size(width: u32, height: u32, bytes_per_pixel: u32) -> usize {
    page_align(width as usize * height as usize * bytes_per_pixel as usize)
}

/// One allocated frame buffer.
#[derive(Debug)]
pub struct FrameBuffer {
    region: DmaRegion,
}

impl FrameBuffer {
    #[inline]
    pub fn phys(&self) -> PhysAddr {
        self.region.phys()
    }

    #[inline]
    pub fn virt(&self) -> VirtAddr {
        self.region.virt()
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.region.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.region.is_empty()
    }
}

/// Owner of every frame buffer of the display plane.
#[derive(Debug)]
pub struct FrameMemory {
    frames: [Option<FrameBuffer>; FRAME_COUNT],
}

impl FrameMemory {
    pub const fn new() -> Self {
        Self {
            frames: [const { None }; FRAME_COUNT],
        }
    }

    /// Allocate and clear every frame, `len` bytes each.
    ///
    /// All-or-nothing: if any allocation fails, frames obtained by this call
    /// are returned to the allocator before `OutOfMemory` is reported.
    pub fn allocate<A: CoherentAllocator + ?Sized>(
        &mut self,
        alloc: &mut A,
        len: usize,
    ) -> FbResult<()> {
        debug_assert!(!self.is_allocated(), "frame memory allocated twice");

        for index in 0..FRAME_COUNT {
            let Some(mut region) = alloc.alloc_coherent(len) else {
                klog_error!("PYNQFB: Failed to allocate frame buffer {} ({} bytes)", index, len);
                self.release(alloc);
                return Err(FbError::OutOfMemory);
            };
            region.zero();
            klog_debug!(
                "PYNQFB: frame {} phys=0x{:08x} virt=0x{:x} len={}",
                index,
                region.phys(),
                region.virt(),
                region.len()
            );
            self.frames[index] = Some(FrameBuffer { region });
        }
        Ok(())
    }

    /// Free every allocated frame. Frames never allocated or already freed
    /// are skipped, so repeated calls are harmless.
    pub fn release<A: CoherentAllocator + ?Sized>(&mut self, alloc: &mut A) {
        for slot in self.frames.iter_mut() {
            if let Some(frame) = slot.take() {
                alloc.free_coherent(frame.region);
            }
        }
    }

    #[inline]
    pub fn frame(&self, index: usize) -> Option<&FrameBuffer> {
        self.frames.get(index).and_then(Option::as_ref)
    }

    /// Iterate over allocated frames in slot order.
    pub fn frames(&self) -> impl Iterator<Item = &FrameBuffer> {
        self.frames.iter().flatten()
    }

    #[inline]
    pub fn is_allocated(&self) -> bool {
        self.frames.iter().any(Option::is_some)
    }
}

impl Default for FrameMemory {
    fn default() -> Self {
        Self::new()
    }
}

//! Video DMA: scans the frame buffer out to the timing controller.
//!
//! Only the memory-to-stream (read) channel is used. It runs in park mode on
//! frame 0; the stream-to-memory channel is merely held in reset.

pub mod regs;

use crate::command::CommandList;
use crate::platform::RegisterBlock;

use regs::{
    FRMDLY_SHIFT, VDMA_MM2S_CR, VDMA_MM2S_FRMDLY_STRIDE, VDMA_MM2S_HSIZE, VDMA_MM2S_VSIZE,
    VDMA_PARK_PTR, VDMA_S2MM_CR, VdmaCtrl, VdmaParkPtr, mm2s_start_addr,
};

/// Scan-out geometry in DMA terms.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DmaGeometry {
    /// Bytes per line transferred.
    pub hsize: u32,
    /// Bytes between line starts.
    pub stride: u32,
    /// Lines per frame.
    pub vsize: u32,
    /// Genlock frame delay, unused in park mode.
    pub frame_delay: u32,
}

/// Reset both channels, program geometry and frame addresses, park on
/// frame 0 and run. The VSIZE write arms the channel, so it goes last.
pub fn configure_commands(geometry: &DmaGeometry, frames: &[u32]) -> CommandList {
    let mut list = reset_commands();
    list.write(VDMA_MM2S_CR, 0)
        .write(VDMA_MM2S_HSIZE, geometry.hsize)
        .write(VDMA_MM2S_FRMDLY_STRIDE, geometry.stride | (geometry.frame_delay << FRMDLY_SHIFT));
    for (index, &addr) in frames.iter().enumerate() {
        list.write(mm2s_start_addr(index), addr);
    }
    list.update(VDMA_PARK_PTR, VdmaParkPtr::READ_REF.bits(), 0)
        .update(VDMA_MM2S_CR, VdmaCtrl::CIRCULAR_PARK.bits(), 0)
        .update(VDMA_MM2S_CR, 0, VdmaCtrl::RUN_STOP.bits())
        .write(VDMA_MM2S_VSIZE, geometry.vsize);
    list
}

/// Receive channel first, then transmit.
pub fn reset_commands() -> CommandList {
    let mut list = CommandList::new(RegisterBlock::Vdma);
    list.write(VDMA_S2MM_CR, VdmaCtrl::RESET.bits())
        .write(VDMA_MM2S_CR, VdmaCtrl::RESET.bits());
    list
}

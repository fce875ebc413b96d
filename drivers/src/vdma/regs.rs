//! AXI video DMA registers.

use bitflags::bitflags;

use crate::port::register_map;

register_map!(VDMA {
    MM2S_CR = 0x00,
    MM2S_SR = 0x04,
    PARK_PTR = 0x28,
    S2MM_CR = 0x30,
    S2MM_SR = 0x34,
    MM2S_VSIZE = 0x50,
    MM2S_HSIZE = 0x54,
    MM2S_FRMDLY_STRIDE = 0x58,
    MM2S_START_ADDR0 = 0x5C,
});

/// Start address register of frame `index`.
pub const fn mm2s_start_addr(index: usize) -> usize {
    VDMA_MM2S_START_ADDR0 + 4 * index
}

pub const FRMDLY_SHIFT: u32 = 24;

bitflags! {
    /// Channel control, same layout for MM2S and S2MM.
    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    pub struct VdmaCtrl: u32 {
        const RUN_STOP = 1 << 0;
        const CIRCULAR_PARK = 1 << 1;
        const RESET = 1 << 2;
    }
}

bitflags! {
    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    pub struct VdmaParkPtr: u32 {
        /// MM2S parked frame index.
        const READ_REF = 0x1F;
    }
}

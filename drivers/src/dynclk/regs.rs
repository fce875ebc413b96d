//! Dynamic clock generator registers.

use bitflags::bitflags;

use crate::port::register_map;

register_map!(DYNCLK {
    CTRL = 0x00,
    STATUS = 0x04,
    CLK_L = 0x08,
    FB_L = 0x0C,
    FB_H_CLK_H = 0x10,
    DIV = 0x14,
    LOCK_L = 0x18,
    FLTR_LOCK_H = 0x1C,
});

bitflags! {
    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    pub struct DynClkCtrl: u32 {
        const START = 1 << 0;
    }
}

bitflags! {
    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    pub struct DynClkStatus: u32 {
        const RUNNING = 1 << 0;
    }
}

/// Divider word: odd divisor, the low phase gets the extra count.
pub const DIV_EDGE: u32 = 1 << 13;
/// Divider word: bypass the counter.
pub const DIV_NOCOUNT: u32 = 1 << 12;
pub const DIV_LOW_MASK: u32 = 0x3F;
pub const DIV_HIGH_SHIFT: u32 = 6;
pub const DIV_HIGH_MASK: u32 = 0x3F << DIV_HIGH_SHIFT;

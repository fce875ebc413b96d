//! Register access for the display pipeline's IP blocks.
//!
//! Every block (clock generator, timing controller, DMA engine) is reached
//! through a [`RegisterPort`], which pairs a [`RegisterBus`] with the block it
//! addresses so register writes can be traced by name.

use pynqfb_lib::klog_trace;
use pynqfb_mm::MmioRegion;

use crate::platform::RegisterBlock;

/// 32-bit register window.
pub trait RegisterBus {
    fn read32(&self, offset: usize) -> u32;
    fn write32(&self, offset: usize, value: u32);
}

impl RegisterBus for MmioRegion {
    #[inline]
    fn read32(&self, offset: usize) -> u32 {
        self.read_u32(offset)
    }

    #[inline]
    fn write32(&self, offset: usize, value: u32) {
        self.write_u32(offset, value)
    }
}

/// Declare a block's register offsets as `<BLOCK>_<NAME>` constants, plus a
/// `register_name` reverse lookup used by write tracing.
macro_rules! register_map {
    ($block:ident { $($name:ident = $offset:expr),* $(,)? }) => {
        ::paste::paste! {
            $(pub const [<$block _ $name>]: usize = $offset;)*

            /// Name of the register at `offset`, `"?"` if unknown.
            pub fn register_name(offset: usize) -> &'static str {
                $(
                    if offset == [<$block _ $name>] {
                        return stringify!($name);
                    }
                )*
                "?"
            }
        }
    };
}
pub(crate) use register_map;

/// A mapped register block.
#[derive(Debug)]
pub struct RegisterPort<B: RegisterBus> {
    block: RegisterBlock,
    bus: B,
}

impl<B: RegisterBus> RegisterPort<B> {
    pub const fn new(block: RegisterBlock, bus: B) -> Self {
        Self { block, bus }
    }

    #[inline]
    pub fn block(&self) -> RegisterBlock {
        self.block
    }

    #[inline]
    pub fn bus(&self) -> &B {
        &self.bus
    }

    /// Give the bus back so the platform can unmap it.
    pub fn into_bus(self) -> B {
        self.bus
    }

    #[inline]
    pub fn read(&self, offset: usize) -> u32 {
        self.bus.read32(offset)
    }

    pub fn write(&self, offset: usize, value: u32) {
        klog_trace!(
            "PYNQFB: {} {:<11} <= 0x{:08x}",
            self.block.name(),
            self.block.register_name(offset),
            value
        );
        self.bus.write32(offset, value);
    }

    /// Read-modify-write: clear `clear`, then set `set`. Returns the value
    /// written.
    pub fn update(&self, offset: usize, clear: u32, set: u32) -> u32 {
        let value = (self.read(offset) & !clear) | set;
        self.write(offset, value);
        value
    }
}

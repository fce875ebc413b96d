//! What the board has to provide: register windows, coherent memory, a
//! millisecond delay and a framebuffer consumer.

use pynqfb_abi::{FbInfo, FbResult, PhysAddr};
use pynqfb_lib::DelayMs;
use pynqfb_mm::CoherentAllocator;

use crate::port::RegisterBus;
use crate::{dynclk, vdma, vtc};

/// The pipeline's register blocks, in resource order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RegisterBlock {
    DynClk,
    Vtc,
    Vdma,
}

impl RegisterBlock {
    pub const ALL: [RegisterBlock; 3] = [Self::DynClk, Self::Vtc, Self::Vdma];

    /// Index of the block's memory resource on the platform device.
    pub const fn resource_index(self) -> usize {
        match self {
            Self::DynClk => 0,
            Self::Vtc => 1,
            Self::Vdma => 2,
        }
    }

    pub const fn name(self) -> &'static str {
        match self {
            Self::DynClk => "DYNCLK",
            Self::Vtc => "VTC",
            Self::Vdma => "VDMA",
        }
    }

    pub fn register_name(self, offset: usize) -> &'static str {
        match self {
            Self::DynClk => dynclk::regs::register_name(offset),
            Self::Vtc => vtc::regs::register_name(offset),
            Self::Vdma => vdma::regs::register_name(offset),
        }
    }
}

/// A physical register window described by the platform.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MemResource {
    pub start: PhysAddr,
    pub size: usize,
}

impl MemResource {
    pub const fn new(start: PhysAddr, size: usize) -> Self {
        Self { start, size }
    }
}

/// Board services used by the framebuffer device.
pub trait Platform: CoherentAllocator + DelayMs {
    type Bus: RegisterBus;

    /// Memory resource `index` of the device, if described.
    fn mem_resource(&self, index: usize) -> Option<MemResource>;

    /// Map a register window. Failures are reported as `MappingFailure`.
    fn map_resource(&mut self, resource: &MemResource) -> FbResult<Self::Bus>;

    fn unmap_resource(&mut self, bus: Self::Bus);

    /// Hand the finished framebuffer to the display consumer.
    fn register_framebuffer(&mut self, info: &FbInfo) -> FbResult<()>;

    fn unregister_framebuffer(&mut self);
}

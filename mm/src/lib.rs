#![cfg_attr(not(test), no_std)]

pub mod dma;
pub mod frame;
pub mod mmio;
#[cfg(test)]
mod tests;

pub use dma::{CoherentAllocator, DmaRegion};
pub use frame::{FRAME_COUNT, FrameBuffer, FrameMemory, frame_size};
pub use mmio::MmioRegion;

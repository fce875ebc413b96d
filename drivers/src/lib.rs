#![cfg_attr(not(test), no_std)]
#![forbid(unsafe_op_in_unsafe_fn)]

pub mod command;
pub mod config;
pub mod dynclk;
pub mod fbdev;
pub mod mode;
pub mod palette;
pub mod platform;
pub mod port;
pub mod surface;
pub mod vdma;
pub mod vtc;

#[cfg(test)]
mod testing;

pub use command::{CommandList, RegOp};
pub use config::FbConfig;
pub use dynclk::ClockConfig;
pub use fbdev::{BringUpStage, FbDevice, FbFlags};
pub use mode::{ClockRatio, MODE_TABLE, ModeRecord, ModeSelection, resolve_mode};
pub use palette::PseudoPalette;
pub use platform::{MemResource, Platform, RegisterBlock};
pub use port::{RegisterBus, RegisterPort};
pub use surface::FbSurface;

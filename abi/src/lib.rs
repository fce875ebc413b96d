//! Shared value types for the PYNQ-Z1 HDMI framebuffer pipeline.
//!
//! This crate holds the types every other crate in the workspace agrees on:
//! address newtypes, the error taxonomy and the screen information handed to
//! the display-surface consumer. It has no dependencies on the rest of the
//! workspace.

#![cfg_attr(not(test), no_std)]
#![forbid(unsafe_code)]

pub mod addr;
pub mod display;
pub mod error;

pub use addr::{PhysAddr, VirtAddr};
pub use display::*;
pub use error::*;

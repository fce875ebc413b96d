//! Display information handed to the display-surface consumer.
//!
//! The split between fixed and variable information follows the classic
//! framebuffer model: [`FixScreenInfo`] describes the memory the hardware
//! scans out and never changes after bring-up, [`VarScreenInfo`] describes the
//! visible mode and pixel layout.

use crate::addr::{PhysAddr, VirtAddr};

/// Identifier reported in the fixed screen information.
pub const FB_ID: &str = "PYNQ-Z1 FB";

/// Packed 24-bit RGB: red at bit 16, green at bit 8, blue at bit 0, no alpha.
#[repr(u8)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PixelFormat {
    #[default]
    Rgb888 = 0,
}

impl PixelFormat {
    #[inline]
    pub const fn bytes_per_pixel(self) -> u32 {
        match self {
            Self::Rgb888 => 3,
        }
    }

    #[inline]
    pub const fn bits_per_pixel(self) -> u32 {
        self.bytes_per_pixel() * 8
    }
}

/// Position and width of one color channel inside a pixel.
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Bitfield {
    pub offset: u32,
    pub length: u32,
    pub msb_right: u32,
}

impl Bitfield {
    pub const fn new(offset: u32, length: u32) -> Self {
        Self {
            offset,
            length,
            msb_right: 0,
        }
    }
}

/// Memory layout type of the framebuffer.
#[repr(u32)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FbType {
    #[default]
    PackedPixels = 0,
}

/// How pixel values are interpreted.
#[repr(u32)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FbVisual {
    #[default]
    TrueColor = 2,
}

/// Fixed (constant) framebuffer parameters.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FixScreenInfo {
    pub id: &'static str,
    /// Physical start of frame buffer memory
    pub smem_start: PhysAddr,
    /// Length of frame buffer memory in bytes
    pub smem_len: u32,
    pub fb_type: FbType,
    pub visual: FbVisual,
    /// Bytes per scan line
    pub line_length: u32,
    /// No acceleration engine is exposed
    pub accel: u32,
}

impl FixScreenInfo {
    pub const fn new() -> Self {
        Self {
            id: FB_ID,
            smem_start: PhysAddr::NULL,
            smem_len: 0,
            fb_type: FbType::PackedPixels,
            visual: FbVisual::TrueColor,
            line_length: 0,
            accel: 0,
        }
    }
}

impl Default for FixScreenInfo {
    fn default() -> Self {
        Self::new()
    }
}

/// Variable (mode dependent) framebuffer parameters.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct VarScreenInfo {
    pub xres: u32,
    pub yres: u32,
    pub xres_virtual: u32,
    pub yres_virtual: u32,
    pub bits_per_pixel: u32,
    pub red: Bitfield,
    pub green: Bitfield,
    pub blue: Bitfield,
    pub transp: Bitfield,
    /// Apply immediately
    pub activate_now: bool,
    /// Always false: the pipeline only produces progressive frames
    pub interlaced: bool,
    /// Physical screen width in millimeters
    pub width_mm: u32,
    /// Physical screen height in millimeters
    pub height_mm: u32,
}

impl VarScreenInfo {
    /// Variable info for a `xres`x`yres` packed RGB888 mode.
    pub const fn rgb888(xres: u32, yres: u32) -> Self {
        Self {
            xres,
            yres,
            xres_virtual: xres,
            yres_virtual: yres,
            bits_per_pixel: PixelFormat::Rgb888.bits_per_pixel(),
            red: Bitfield::new(16, 8),
            green: Bitfield::new(8, 8),
            blue: Bitfield::new(0, 8),
            transp: Bitfield::new(0, 0),
            activate_now: true,
            interlaced: false,
            width_mm: xres * 5 / 96 / 2,
            height_mm: yres * 5 / 96 / 2,
        }
    }
}

/// Everything the display-surface consumer needs to use the framebuffer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FbInfo {
    pub fix: FixScreenInfo,
    pub var: VarScreenInfo,
    /// CPU mapping of the scanned-out buffer
    pub screen_base: VirtAddr,
}

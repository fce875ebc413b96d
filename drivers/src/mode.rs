//! Supported display modes.
//!
//! Timings are for a 24-bit RGB HDMI link. Each mode carries the PLL ratio
//! the pixel clock generator needs to produce its serializer clock.

use pynqfb_lib::klog_info;

/// PLL ratio producing the mode's pixel clock.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ClockRatio {
    pub prescaler: u32,
    pub multiplier: u32,
    pub postscaler: u32,
}

impl ClockRatio {
    pub const fn new(prescaler: u32, multiplier: u32, postscaler: u32) -> Self {
        Self {
            prescaler,
            multiplier,
            postscaler,
        }
    }
}

/// One display mode: active area, horizontal and vertical timing, clock.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ModeRecord {
    pub width: u32,
    pub height: u32,
    pub h_frame_size: u32,
    pub h_sync_start: u32,
    pub h_sync_end: u32,
    pub v_frame_size: u32,
    pub v_sync_start: u32,
    pub v_sync_end: u32,
    pub clock: ClockRatio,
}

impl ModeRecord {
    #[allow(clippy::too_many_arguments)]
    const fn new(
        width: u32,
        height: u32,
        h_frame_size: u32,
        h_sync_start: u32,
        h_sync_end: u32,
        v_frame_size: u32,
        v_sync_start: u32,
        v_sync_end: u32,
        clock: ClockRatio,
    ) -> Self {
        Self {
            width,
            height,
            h_frame_size,
            h_sync_start,
            h_sync_end,
            v_frame_size,
            v_sync_start,
            v_sync_end,
            clock,
        }
    }
}

/// Modes in lookup order. The first entry doubles as the fallback.
pub static MODE_TABLE: [ModeRecord; 6] = [
    ModeRecord::new(640, 480, 800, 656, 752, 525, 489, 491, ClockRatio::new(1, 10, 8)),
    ModeRecord::new(800, 480, 1056, 840, 968, 525, 489, 491, ClockRatio::new(1, 10, 6)),
    ModeRecord::new(800, 600, 1056, 840, 968, 628, 600, 604, ClockRatio::new(1, 8, 4)),
    ModeRecord::new(1280, 720, 1650, 1390, 1430, 750, 724, 729, ClockRatio::new(4, 30, 1)),
    ModeRecord::new(1280, 1024, 1688, 1328, 1440, 1066, 1024, 1027, ClockRatio::new(8, 86, 2)),
    ModeRecord::new(1920, 1080, 2200, 2008, 2052, 1125, 1083, 1088, ClockRatio::new(12, 89, 1)),
];

/// Result of [`resolve_mode`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ModeSelection {
    pub mode: &'static ModeRecord,
    /// The requested resolution was not in the table.
    pub fallback: bool,
}

/// Exact lookup of `width` x `height`, falling back to the first table entry.
pub fn resolve_mode(width: u32, height: u32) -> ModeSelection {
    if let Some(mode) = MODE_TABLE
        .iter()
        .find(|mode| mode.width == width && mode.height == height)
    {
        klog_info!("PYNQFB: Select resolution is {}x{}.", mode.width, mode.height);
        return ModeSelection {
            mode,
            fallback: false,
        };
    }

    let mode = &MODE_TABLE[0];
    klog_info!("PYNQFB: Requested resolution {}x{} is not supported.", width, height);
    klog_info!("PYNQFB: Fall back to {}x{}.", mode.width, mode.height);
    ModeSelection {
        mode,
        fallback: true,
    }
}

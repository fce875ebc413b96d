//! Video timing controller registers (Xilinx VTC, generator side only).

use bitflags::bitflags;

use crate::port::register_map;

register_map!(VTC {
    CTL = 0x000,
    GASIZE = 0x060,
    GFENC = 0x068,
    GPOL = 0x06C,
    GHSIZE = 0x070,
    GVSIZE = 0x074,
    GHSYNC = 0x078,
    GVBHOFF = 0x07C,
    GVSYNC = 0x080,
    GVSHOFF = 0x084,
    GVBHOFF_F1 = 0x088,
    GVSYNC_F1 = 0x08C,
    GVSHOFF_F1 = 0x090,
});

/// Upper half of the two-field generator registers.
pub const FIELD_HIGH_SHIFT: u32 = 16;

bitflags! {
    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    pub struct VtcCtrl: u32 {
        const SW = 1 << 0;
        const RU = 1 << 1;
        const GE = 1 << 2;
        const DE = 1 << 3;
        const HTSS = 1 << 8;
        const HFSS = 1 << 9;
        const HSSS = 1 << 10;
        const HBSS = 1 << 11;
        const VTSS = 1 << 13;
        const VFSS = 1 << 14;
        const VSSS = 1 << 15;
        const VBSS = 1 << 16;
        const VASS = 1 << 17;
        const VCSS = 1 << 18;
        const VBPSS = 1 << 20;
        const HBPSS = 1 << 21;
        const VSPSS = 1 << 22;
        const HSPSS = 1 << 23;
        const AVPSS = 1 << 24;
        const ACPSS = 1 << 25;
        const FIPSS = 1 << 26;
        const RESET = 1 << 31;

        /// Every source-select bit.
        const ALL_SOURCES = Self::HTSS.bits() | Self::HFSS.bits() | Self::HSSS.bits()
            | Self::HBSS.bits() | Self::VTSS.bits() | Self::VFSS.bits() | Self::VSSS.bits()
            | Self::VBSS.bits() | Self::VASS.bits() | Self::VCSS.bits() | Self::VBPSS.bits()
            | Self::HBPSS.bits() | Self::VSPSS.bits() | Self::HSPSS.bits() | Self::AVPSS.bits()
            | Self::ACPSS.bits() | Self::FIPSS.bits();

        /// Sources taken from the generator registers. Field-id polarity
        /// stays with the detector.
        const GENERATOR_SOURCES = Self::ALL_SOURCES.bits() & !Self::FIPSS.bits();
    }
}

bitflags! {
    /// Output polarity, all active high.
    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    pub struct VtcPolarity: u32 {
        const FIELD_ID = 1 << 0;
        const VBLANK = 1 << 1;
        const HBLANK = 1 << 2;
        const VSYNC = 1 << 3;
        const HSYNC = 1 << 4;
        const ACTIVE_VIDEO = 1 << 5;
        const ACTIVE_CHROMA = 1 << 6;
    }
}

bitflags! {
    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    pub struct VtcEncoding: u32 {
        const FMT = 0xF;
        const FMT_RGB = 0x2;
        /// Interlaced; clear for progressive.
        const INTERLACED = 1 << 6;
        const CPARITY = 0x3 << 8;
    }
}

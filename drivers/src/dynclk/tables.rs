//! PLL calibration data for the clock generator's feedback multiplier.
//!
//! Both tables come from the Xilinx MMCM lookup and are indexed by
//! `multiplier - 1`.

/// Number of calibrated multipliers, 1 through 64.
pub const CALIBRATION_ENTRIES: usize = 64;

/// Lock calibration.
///
/// Low 32 bits go to LOCK_L; the upper bits go to the low half of
/// FLTR_LOCK_H.
#[rustfmt::skip]
pub static LOCK_LOOKUP: [u64; CALIBRATION_ENTRIES] = [
    0b00110001_10111110_10001111_10100100_00000001,
    0b00110001_10111110_10001111_10100100_00000001,
    0b01000010_00111110_10001111_10100100_00000001,
    0b01011010_11111110_10001111_10100100_00000001,
    0b01110011_10111110_10001111_10100100_00000001,
    0b10001100_01111110_10001111_10100100_00000001,
    0b10011100_11111110_10001111_10100100_00000001,
    0b10110101_10111110_10001111_10100100_00000001,
    0b11001110_01111110_10001111_10100100_00000001,
    0b11100111_00111110_10001111_10100100_00000001,
    0b11111111_11111000_01001111_10100100_00000001,
    0b11111111_11110011_10011111_10100100_00000001,
    0b11111111_11101110_11101111_10100100_00000001,
    0b11111111_11101011_11001111_10100100_00000001,
    0b11111111_11101000_10101111_10100100_00000001,
    0b11111111_11100111_00011111_10100100_00000001,
    0b11111111_11100011_11111111_10100100_00000001,
    0b11111111_11100010_01101111_10100100_00000001,
    0b11111111_11100000_11011111_10100100_00000001,
    0b11111111_11011111_01001111_10100100_00000001,
    0b11111111_11011101_10111111_10100100_00000001,
    0b11111111_11011100_00101111_10100100_00000001,
    0b11111111_11011010_10011111_10100100_00000001,
    0b11111111_11011001_00001111_10100100_00000001,
    0b11111111_11011001_00001111_10100100_00000001,
    0b11111111_11010111_01111111_10100100_00000001,
    0b11111111_11010101_11101111_10100100_00000001,
    0b11111111_11010101_11101111_10100100_00000001,
    0b11111111_11010100_01011111_10100100_00000001,
    0b11111111_11010100_01011111_10100100_00000001,
    0b11111111_11010010_11001111_10100100_00000001,
    0b11111111_11010010_11001111_10100100_00000001,
    0b11111111_11010010_11001111_10100100_00000001,
    0b11111111_11010001_00111111_10100100_00000001,
    0b11111111_11010001_00111111_10100100_00000001,
    0b11111111_11010001_00111111_10100100_00000001,
    0b11111111_11001111_10101111_10100100_00000001,
    0b11111111_11001111_10101111_10100100_00000001,
    0b11111111_11001111_10101111_10100100_00000001,
    0b11111111_11001111_10101111_10100100_00000001,
    0b11111111_11001111_10101111_10100100_00000001,
    0b11111111_11001111_10101111_10100100_00000001,
    0b11111111_11001111_10101111_10100100_00000001,
    0b11111111_11001111_10101111_10100100_00000001,
    0b11111111_11001111_10101111_10100100_00000001,
    0b11111111_11001111_10101111_10100100_00000001,
    0b11111111_11001111_10101111_10100100_00000001,
    0b11111111_11001111_10101111_10100100_00000001,
    0b11111111_11001111_10101111_10100100_00000001,
    0b11111111_11001111_10101111_10100100_00000001,
    0b11111111_11001111_10101111_10100100_00000001,
    0b11111111_11001111_10101111_10100100_00000001,
    0b11111111_11001111_10101111_10100100_00000001,
    0b11111111_11001111_10101111_10100100_00000001,
    0b11111111_11001111_10101111_10100100_00000001,
    0b11111111_11001111_10101111_10100100_00000001,
    0b11111111_11001111_10101111_10100100_00000001,
    0b11111111_11001111_10101111_10100100_00000001,
    0b11111111_11001111_10101111_10100100_00000001,
    0b11111111_11001111_10101111_10100100_00000001,
    0b11111111_11001111_10101111_10100100_00000001,
    0b11111111_11001111_10101111_10100100_00000001,
    0b11111111_11001111_10101111_10100100_00000001,
    0b11111111_11001111_10101111_10100100_00000001,
];

/// Loop filter calibration. Ten bits used.
#[rustfmt::skip]
pub static FILTER_LOOKUP: [u32; CALIBRATION_ENTRIES] = [
    0b00010_11111,
    0b00010_10111,
    0b00011_11011,
    0b00010_11011,
    0b00011_01011,
    0b00011_10011,
    0b00011_10011,
    0b00011_10011,
    0b00011_10011,
    0b00010_01011,
    0b00010_01011,
    0b00010_01011,
    0b00101_10011,
    0b00010_10011,
    0b00010_10011,
    0b00010_10011,
    0b00010_10011,
    0b00010_10011,
    0b00010_10011,
    0b00010_10011,
    0b00010_10011,
    0b00010_10011,
    0b00010_10011,
    0b00011_00011,
    0b00011_00011,
    0b00011_00011,
    0b00011_00011,
    0b00011_00011,
    0b00011_00011,
    0b00011_00011,
    0b00011_00011,
    0b00011_00011,
    0b00011_00011,
    0b00011_00011,
    0b00011_00011,
    0b00011_00011,
    0b00011_00011,
    0b00100_10011,
    0b00100_10011,
    0b00100_10011,
    0b00100_10011,
    0b00100_10011,
    0b00100_10011,
    0b00100_10011,
    0b00100_10011,
    0b00100_10011,
    0b00100_10011,
    0b00101_00011,
    0b00101_00011,
    0b00101_00011,
    0b00101_00011,
    0b00101_00011,
    0b00101_00011,
    0b00101_00011,
    0b00101_00011,
    0b00101_00011,
    0b00101_00011,
    0b00101_00011,
    0b00101_00011,
    0b00101_00011,
    0b00101_00011,
    0b00101_00011,
    0b00101_00011,
    0b00101_00011,
];

/// Register values derived from the calibration tables.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LockFilter {
    /// LOCK_L.
    pub lock: u32,
    /// FLTR_LOCK_H: lock bits above 32, filter in [16:26).
    pub filter_lock_high: u32,
}

/// Calibration for `multiplier`, or `None` outside 1..=64.
pub fn lock_filter(multiplier: u32) -> Option<LockFilter> {
    if multiplier == 0 || multiplier as usize > CALIBRATION_ENTRIES {
        return None;
    }
    Some(entry(multiplier as usize - 1))
}

/// Like [`lock_filter`] but clamps the multiplier into 1..=64.
pub fn lock_filter_saturating(multiplier: u32) -> LockFilter {
    let index = (multiplier.clamp(1, CALIBRATION_ENTRIES as u32) - 1) as usize;
    entry(index)
}

fn entry(index: usize) -> LockFilter {
    let lock = LOCK_LOOKUP[index];
    LockFilter {
        lock: (lock & 0xFFFF_FFFF) as u32,
        filter_lock_high: (lock >> 32) as u32 | ((FILTER_LOOKUP[index] & 0x3FF) << 16),
    }
}

use pynqfb_abi::{FbError, FbResult};

pub const PALETTE_ENTRIES: usize = 16;

/// Console pseudo palette in the framebuffer's pixel layout.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PseudoPalette {
    entries: [u32; PALETTE_ENTRIES],
}

impl PseudoPalette {
    pub const fn new() -> Self {
        Self {
            entries: [0; PALETTE_ENTRIES],
        }
    }

    pub fn set_color(&mut self, regno: u32, red: u8, green: u8, blue: u8) -> FbResult<()> {
        let slot = self
            .entries
            .get_mut(regno as usize)
            .ok_or(FbError::InvalidArgument)?;
        *slot = pack_rgb888(red, green, blue);
        Ok(())
    }

    pub fn get(&self, regno: u32) -> Option<u32> {
        self.entries.get(regno as usize).copied()
    }

    pub fn entries(&self) -> &[u32; PALETTE_ENTRIES] {
        &self.entries
    }
}

impl Default for PseudoPalette {
    fn default() -> Self {
        Self::new()
    }
}

#[inline]
pub const fn pack_rgb888(red: u8, green: u8, blue: u8) -> u32 {
    ((red as u32) << 16) | ((green as u32) << 8) | blue as u32
}

//! CPU view of the scan-out buffer for the display consumer.
//!
//! Pixels are 24-bit packed RGB, stored blue, green, red in memory (red at
//! bit 16 of the 0xRRGGBB value). Writes are visible on the next scan-out;
//! there is no vsync, so tearing is possible.

use core::marker::PhantomData;
use core::ptr;

use pynqfb_abi::{PixelFormat, VirtAddr};

#[derive(Debug)]
pub struct FbSurface<'a> {
    base: VirtAddr,
    width: u32,
    height: u32,
    stride: u32,
    len: usize,
    _buffer: PhantomData<&'a mut [u8]>,
}

impl<'a> FbSurface<'a> {
    /// # Safety
    ///
    /// `base` must be valid for reads and writes of `len` bytes for `'a`, and
    /// `stride * height` must not exceed `len`.
    pub(crate) unsafe fn new(base: VirtAddr, width: u32, height: u32, stride: u32, len: usize) -> Self {
        debug_assert!(stride as usize * height as usize <= len);
        Self {
            base,
            width,
            height,
            stride,
            len,
            _buffer: PhantomData,
        }
    }

    #[inline]
    pub fn base(&self) -> VirtAddr {
        self.base
    }

    #[inline]
    pub fn width(&self) -> u32 {
        self.width
    }

    #[inline]
    pub fn height(&self) -> u32 {
        self.height
    }

    /// Bytes per line.
    #[inline]
    pub fn stride(&self) -> u32 {
        self.stride
    }

    /// Total mapped bytes, page aligned.
    #[inline]
    pub fn len(&self) -> usize {
        self.len
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    #[inline]
    pub fn format(&self) -> PixelFormat {
        PixelFormat::Rgb888
    }

    fn pixel_offset(&self, x: u32, y: u32) -> Option<usize> {
        if x >= self.width || y >= self.height {
            return None;
        }
        let bpp = PixelFormat::Rgb888.bytes_per_pixel() as usize;
        Some(y as usize * self.stride as usize + x as usize * bpp)
    }

    /// Store `0xRRGGBB` at (x, y). Returns false when out of bounds.
    pub fn write_pixel(&mut self, x: u32, y: u32, rgb: u32) -> bool {
        let Some(offset) = self.pixel_offset(x, y) else {
            return false;
        };
        let bytes = [rgb as u8, (rgb >> 8) as u8, (rgb >> 16) as u8];
        // SAFETY: pixel_offset bounds the three bytes inside the buffer.
        unsafe {
            let dst = self.base.as_mut_ptr::<u8>().add(offset);
            for (i, byte) in bytes.into_iter().enumerate() {
                ptr::write_volatile(dst.add(i), byte);
            }
        }
        true
    }

    pub fn read_pixel(&self, x: u32, y: u32) -> Option<u32> {
        let offset = self.pixel_offset(x, y)?;
        // SAFETY: as in write_pixel.
        let [b, g, r] = unsafe {
            let src = self.base.as_ptr::<u8>().add(offset);
            [
                ptr::read_volatile(src),
                ptr::read_volatile(src.add(1)),
                ptr::read_volatile(src.add(2)),
            ]
        };
        Some(((r as u32) << 16) | ((g as u32) << 8) | b as u32)
    }

    /// Fill the visible area with one color.
    pub fn clear(&mut self, rgb: u32) {
        for y in 0..self.height {
            for x in 0..self.width {
                self.write_pixel(x, y, rgb);
            }
        }
    }
}

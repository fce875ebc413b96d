/// Size of a page as seen by the coherent allocator.
pub const PAGE_SIZE_4KB: usize = 4096;

/// Align `value` up to the nearest multiple of `alignment`.
/// If `alignment` is zero, the input is returned unchanged.
#[inline(always)]
pub const fn align_up(value: usize, alignment: usize) -> usize {
    if alignment == 0 {
        return value;
    }
    // Saturating add avoids wraparound at the top of the address space.
    let adjusted = value.saturating_add(alignment - 1);
    adjusted & !(alignment - 1)
}

/// Align `value` down to the nearest multiple of `alignment`.
/// If `alignment` is zero, the input is returned unchanged.
#[inline(always)]
pub const fn align_down(value: usize, alignment: usize) -> usize {
    if alignment == 0 {
        return value;
    }
    value & !(alignment - 1)
}

/// Round a byte count up to whole 4 KiB pages.
#[inline(always)]
pub const fn page_align(len: usize) -> usize {
    align_up(len, PAGE_SIZE_4KB)
}

use super::regs::{DIV_EDGE, DIV_HIGH_MASK, DIV_HIGH_SHIFT, DIV_LOW_MASK, DIV_NOCOUNT};

/// Divider word for a divide-by-one output: counter bypassed.
pub const DIVIDER_BYPASS: u32 = DIV_NOCOUNT | (1 << DIV_HIGH_SHIFT) | 1;

/// Encode divisor `n` as high/low phase counts.
///
/// Odd divisors set [`DIV_EDGE`] and give the low phase the extra count.
pub const fn divider(n: u32) -> u32 {
    if n == 1 {
        return DIVIDER_BYPASS;
    }

    let high = n / 2;
    let (low, edge) = if n & 1 != 0 { (high + 1, DIV_EDGE) } else { (high, 0) };
    edge | (low & DIV_LOW_MASK) | ((high << DIV_HIGH_SHIFT) & DIV_HIGH_MASK)
}

/// [`divider`] repacked for CLK_L / FB_L: the edge and no-count bits move
/// from [12:14) to [22:24).
pub const fn divider_config(n: u32) -> u32 {
    let d = divider(n);
    (d & 0xFFF) | ((d & 0x3000) << 10)
}

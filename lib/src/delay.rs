//! Millisecond busy-wait seam.
//!
//! The clock generator needs a short pause before each status poll. Boards
//! with a calibrated timer implement [`DelayMs`] themselves; [`SpinDelay`] is
//! the uncalibrated fallback.

/// Blocking millisecond delay.
pub trait DelayMs {
    fn delay_ms(&mut self, ms: u32);
}

/// Spin-loop delay with a fixed iteration count per millisecond.
#[derive(Debug, Clone, Copy)]
pub struct SpinDelay {
    loops_per_ms: u32,
}

impl SpinDelay {
    /// Roughly one millisecond on the 650 MHz Cortex-A9.
    pub const DEFAULT_LOOPS_PER_MS: u32 = 650_000;

    pub const fn new(loops_per_ms: u32) -> Self {
        Self { loops_per_ms }
    }

    pub const fn loops_per_ms(&self) -> u32 {
        self.loops_per_ms
    }
}

impl Default for SpinDelay {
    fn default() -> Self {
        Self::new(Self::DEFAULT_LOOPS_PER_MS)
    }
}

impl DelayMs for SpinDelay {
    fn delay_ms(&mut self, ms: u32) {
        if ms == 0 {
            return;
        }
        let total = ms as u64 * self.loops_per_ms as u64;
        for _ in 0..total {
            core::hint::spin_loop();
        }
    }
}

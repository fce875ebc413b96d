//! Pixel clock generator (Digilent dynamic clock IP).

mod divider;
pub mod regs;
mod tables;

pub use divider::{DIVIDER_BYPASS, divider, divider_config};
pub use tables::{CALIBRATION_ENTRIES, LockFilter, lock_filter, lock_filter_saturating};

use pynqfb_abi::FbError;
use pynqfb_lib::{klog_info, klog_warn};

use crate::command::CommandList;
use crate::mode::ClockRatio;
use crate::platform::RegisterBlock;

use regs::{
    DYNCLK_CLK_L, DYNCLK_CTRL, DYNCLK_DIV, DYNCLK_FB_H_CLK_H, DYNCLK_FB_L, DYNCLK_FLTR_LOCK_H,
    DYNCLK_LOCK_L, DYNCLK_STATUS, DynClkCtrl, DynClkStatus,
};

/// Settle time before each status poll.
pub const CLOCK_SETTLE_MS: u32 = 1;

/// Register values for one clock ratio.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ClockConfig {
    pub clk_l: u32,
    pub fb_l: u32,
    pub div: u32,
    pub lock_l: u32,
    pub filter_lock_h: u32,
}

impl ClockConfig {
    /// Multipliers above the calibrated range use the last table entry.
    pub fn from_ratio(ratio: &ClockRatio) -> Self {
        let calibration = match lock_filter(ratio.multiplier) {
            Some(calibration) => calibration,
            None => {
                klog_warn!(
                    "PYNQFB: multiplier {} outside calibrated range 1..={}, clamping",
                    ratio.multiplier,
                    CALIBRATION_ENTRIES
                );
                lock_filter_saturating(ratio.multiplier)
            }
        };

        Self {
            clk_l: divider_config(ratio.prescaler),
            fb_l: divider_config(ratio.multiplier),
            div: divider(ratio.postscaler),
            lock_l: calibration.lock,
            filter_lock_h: calibration.filter_lock_high,
        }
    }

    pub fn log(&self) {
        klog_info!("PYNQFB: DYNCLK CLK_L        : {:08x}", self.clk_l);
        klog_info!("PYNQFB: DYNCLK FB_L         : {:08x}", self.fb_l);
        klog_info!("PYNQFB: DYNCLK DIV          : {:08x}", self.div);
        klog_info!("PYNQFB: DYNCLK LOCK_L       : {:08x}", self.lock_l);
        klog_info!("PYNQFB: DYNCLK FILTER_LOCK_H: {:08x}", self.filter_lock_h);
    }
}

/// Stop, confirm stopped, program, start, confirm running.
pub fn configure_commands(config: &ClockConfig) -> CommandList {
    let mut list = CommandList::new(RegisterBlock::DynClk);
    list.write(DYNCLK_CTRL, 0)
        .delay_ms(CLOCK_SETTLE_MS)
        .expect_clear(DYNCLK_STATUS, DynClkStatus::RUNNING.bits(), FbError::ClockStopTimeout)
        .write(DYNCLK_CLK_L, config.clk_l)
        .write(DYNCLK_FB_L, config.fb_l)
        .write(DYNCLK_FB_H_CLK_H, 0)
        .write(DYNCLK_DIV, config.div)
        .write(DYNCLK_LOCK_L, config.lock_l)
        .write(DYNCLK_FLTR_LOCK_H, config.filter_lock_h)
        .write(DYNCLK_CTRL, DynClkCtrl::START.bits())
        .delay_ms(CLOCK_SETTLE_MS)
        .expect_set(DYNCLK_STATUS, DynClkStatus::RUNNING.bits(), FbError::ClockLockTimeout);
    list
}

pub fn stop_commands() -> CommandList {
    let mut list = CommandList::new(RegisterBlock::DynClk);
    list.write(DYNCLK_CTRL, 0);
    list
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::command::RegOp;

    #[test]
    fn vga_clock_values() {
        let config = ClockConfig::from_ratio(&ClockRatio::new(1, 10, 8));
        assert_eq!(config.clk_l, divider_config(1));
        assert_eq!(config.clk_l, 0x0040_0041);
        assert_eq!(config.fb_l, divider_config(10));
        assert_eq!(config.div, divider(8));
        let calibration = lock_filter(10).unwrap();
        assert_eq!(config.lock_l, calibration.lock);
        assert_eq!(config.filter_lock_h, calibration.filter_lock_high);
    }

    #[test]
    fn oversized_multiplier_is_clamped() {
        let config = ClockConfig::from_ratio(&ClockRatio::new(12, 89, 1));
        let top = lock_filter(64).unwrap();
        assert_eq!(config.lock_l, top.lock);
        assert_eq!(config.filter_lock_h, top.filter_lock_high);
        assert_eq!(config.fb_l, divider_config(89));
        assert_eq!(config.div, DIVIDER_BYPASS);
    }

    #[test]
    fn stop_is_confirmed_before_programming() {
        let config = ClockConfig::from_ratio(&ClockRatio::new(1, 10, 8));
        let list = configure_commands(&config);
        let ops = list.ops();

        assert_eq!(ops[0], RegOp::Write { offset: DYNCLK_CTRL, value: 0 });
        assert_eq!(ops[1], RegOp::DelayMs(1));
        assert!(matches!(
            ops[2],
            RegOp::ExpectClear { offset: DYNCLK_STATUS, mask: 1, error: FbError::ClockStopTimeout }
        ));
        assert_eq!(ops[3], RegOp::Write { offset: DYNCLK_CLK_L, value: config.clk_l });
        assert_eq!(ops[8], RegOp::Write { offset: DYNCLK_FLTR_LOCK_H, value: config.filter_lock_h });
        assert_eq!(ops[9], RegOp::Write { offset: DYNCLK_CTRL, value: 1 });
        assert_eq!(ops[10], RegOp::DelayMs(1));
        assert!(matches!(
            ops[11],
            RegOp::ExpectSet { offset: DYNCLK_STATUS, mask: 1, error: FbError::ClockLockTimeout }
        ));
        assert_eq!(list.len(), 12);
    }

    #[test]
    fn feedback_high_is_zeroed() {
        let config = ClockConfig::from_ratio(&ClockRatio::new(4, 30, 1));
        let list = configure_commands(&config);
        assert_eq!(list.last_write(DYNCLK_FB_H_CLK_H), Some(0));
        assert_eq!(list.last_write(DYNCLK_DIV), Some(0x1041));
    }

    #[test]
    fn stop_writes_control_zero() {
        let list = stop_commands();
        assert_eq!(list.ops(), &[RegOp::Write { offset: DYNCLK_CTRL, value: 0 }]);
    }
}

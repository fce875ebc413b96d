//! Video timing controller: sync and blanking generation.

pub mod regs;

use crate::command::CommandList;
use crate::mode::ModeRecord;
use crate::platform::RegisterBlock;

use regs::{
    FIELD_HIGH_SHIFT, VTC_CTL, VTC_GASIZE, VTC_GFENC, VTC_GHSIZE, VTC_GHSYNC, VTC_GPOL,
    VTC_GVBHOFF, VTC_GVBHOFF_F1, VTC_GVSHOFF, VTC_GVSHOFF_F1, VTC_GVSIZE, VTC_GVSYNC,
    VTC_GVSYNC_F1, VtcCtrl, VtcEncoding, VtcPolarity,
};

#[inline]
const fn pair(low: u32, high: u32) -> u32 {
    low | (high << FIELD_HIGH_SHIFT)
}

/// Reset, take every source from the generator registers, program `mode`.
pub fn configure_commands(mode: &ModeRecord) -> CommandList {
    let vblank_hoff = pair(mode.width, mode.width);
    let vsync = pair(mode.v_sync_start, mode.v_sync_end);
    let vsync_hoff = pair(mode.h_sync_start, mode.h_sync_start);

    let mut list = CommandList::new(RegisterBlock::Vtc);
    list.write(VTC_CTL, VtcCtrl::RESET.bits())
        .update(
            VTC_CTL,
            (VtcCtrl::SW | VtcCtrl::GE | VtcCtrl::DE | VtcCtrl::ALL_SOURCES).bits(),
            (VtcCtrl::GENERATOR_SOURCES | VtcCtrl::GE | VtcCtrl::RU).bits(),
        )
        .update(VTC_CTL, 0, VtcCtrl::RU.bits())
        .write(VTC_GPOL, VtcPolarity::all().bits())
        .write(VTC_GASIZE, pair(mode.width, mode.height))
        .write(VTC_GHSIZE, mode.h_frame_size)
        .write(VTC_GVSIZE, pair(mode.v_frame_size, mode.v_frame_size))
        .write(VTC_GHSYNC, pair(mode.h_sync_start, mode.h_sync_end))
        .write(VTC_GVBHOFF, vblank_hoff)
        .write(VTC_GVSYNC, vsync)
        .write(VTC_GVSHOFF, vsync_hoff)
        .write(VTC_GVBHOFF_F1, vblank_hoff)
        .write(VTC_GVSYNC_F1, vsync)
        .write(VTC_GVSHOFF_F1, vsync_hoff)
        .update(
            VTC_GFENC,
            (VtcEncoding::CPARITY | VtcEncoding::INTERLACED | VtcEncoding::FMT).bits(),
            VtcEncoding::FMT_RGB.bits(),
        );
    list
}

pub fn reset_commands() -> CommandList {
    let mut list = CommandList::new(RegisterBlock::Vtc);
    list.write(VTC_CTL, VtcCtrl::RESET.bits());
    list
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::command::RegOp;
    use crate::mode::resolve_mode;

    #[test]
    fn control_sequence() {
        let list = configure_commands(resolve_mode(640, 480).mode);
        let ops = list.ops();

        assert_eq!(ops[0], RegOp::Write { offset: VTC_CTL, value: 1 << 31 });
        let RegOp::Update { offset, clear, set } = ops[1] else {
            panic!("expected control update, got {:?}", ops[1]);
        };
        assert_eq!(offset, VTC_CTL);
        assert_eq!(clear & 0b1101, 0b1101);
        assert_eq!(clear & (1 << 26), 1 << 26);
        assert_eq!(set & (1 << 26), 0);
        assert_eq!(set & 0b0110, 0b0110);
        assert_eq!(set & 0x03FF_FF00, 0x03FF_FF00 & !(1 << 26) & !(1 << 12) & !(1 << 19));
        assert_eq!(ops[2], RegOp::Update { offset: VTC_CTL, clear: 0, set: 0b10 });
    }

    #[test]
    fn vga_timing_registers() {
        let list = configure_commands(resolve_mode(640, 480).mode);

        assert_eq!(list.last_write(VTC_GPOL), Some(0x7F));
        assert_eq!(list.last_write(VTC_GASIZE), Some(640 | (480 << 16)));
        assert_eq!(list.last_write(VTC_GHSIZE), Some(800));
        assert_eq!(list.last_write(VTC_GVSIZE), Some(525 | (525 << 16)));
        assert_eq!(list.last_write(VTC_GHSYNC), Some(656 | (752 << 16)));
        assert_eq!(list.last_write(VTC_GVBHOFF), Some(640 | (640 << 16)));
        assert_eq!(list.last_write(VTC_GVSYNC), Some(489 | (491 << 16)));
        assert_eq!(list.last_write(VTC_GVSHOFF), Some(656 | (656 << 16)));
    }

    #[test]
    fn both_fields_match() {
        let list = configure_commands(resolve_mode(1920, 1080).mode);
        assert_eq!(list.last_write(VTC_GVBHOFF), list.last_write(VTC_GVBHOFF_F1));
        assert_eq!(list.last_write(VTC_GVSYNC), list.last_write(VTC_GVSYNC_F1));
        assert_eq!(list.last_write(VTC_GVSHOFF), list.last_write(VTC_GVSHOFF_F1));
    }

    #[test]
    fn encoding_is_progressive_rgb() {
        let list = configure_commands(resolve_mode(800, 600).mode);
        assert_eq!(
            list.ops().last(),
            Some(&RegOp::Update { offset: VTC_GFENC, clear: 0x34F, set: 2 })
        );
    }

    #[test]
    fn reset_only_touches_control() {
        assert_eq!(
            reset_commands().ops(),
            &[RegOp::Write { offset: VTC_CTL, value: 0x8000_0000 }]
        );
    }
}

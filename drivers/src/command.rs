//! Ordered register command lists.
//!
//! Each configurator describes its hardware sequence as a [`CommandList`]
//! instead of poking registers directly. The list is plain data: tests inspect
//! it without a bus, and [`CommandList::execute`] replays it against a
//! [`RegisterPort`].

use pynqfb_abi::{FbError, FbResult};
use pynqfb_lib::{DelayMs, klog_error};

use crate::platform::RegisterBlock;
use crate::port::{RegisterBus, RegisterPort};

pub const COMMAND_LIST_CAPACITY: usize = 32;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RegOp {
    Write { offset: usize, value: u32 },
    Update { offset: usize, clear: u32, set: u32 },
    DelayMs(u32),
    /// Fail with `error` unless every bit of `mask` reads back clear.
    ExpectClear { offset: usize, mask: u32, error: FbError },
    /// Fail with `error` unless every bit of `mask` reads back set.
    ExpectSet { offset: usize, mask: u32, error: FbError },
}

#[derive(Debug, Clone)]
pub struct CommandList {
    block: RegisterBlock,
    ops: [RegOp; COMMAND_LIST_CAPACITY],
    len: usize,
}

impl CommandList {
    pub const fn new(block: RegisterBlock) -> Self {
        Self {
            block,
            ops: [RegOp::DelayMs(0); COMMAND_LIST_CAPACITY],
            len: 0,
        }
    }

    /// # Panics
    ///
    /// Panics if the list is full. Lists are built from fixed sequences, so
    /// overflow is a programming error.
    pub fn push(&mut self, op: RegOp) -> &mut Self {
        assert!(
            self.len < COMMAND_LIST_CAPACITY,
            "{} command list overflow",
            self.block.name()
        );
        self.ops[self.len] = op;
        self.len += 1;
        self
    }

    pub fn write(&mut self, offset: usize, value: u32) -> &mut Self {
        self.push(RegOp::Write { offset, value })
    }

    pub fn update(&mut self, offset: usize, clear: u32, set: u32) -> &mut Self {
        self.push(RegOp::Update { offset, clear, set })
    }

    pub fn delay_ms(&mut self, ms: u32) -> &mut Self {
        self.push(RegOp::DelayMs(ms))
    }

    pub fn expect_clear(&mut self, offset: usize, mask: u32, error: FbError) -> &mut Self {
        self.push(RegOp::ExpectClear { offset, mask, error })
    }

    pub fn expect_set(&mut self, offset: usize, mask: u32, error: FbError) -> &mut Self {
        self.push(RegOp::ExpectSet { offset, mask, error })
    }

    #[inline]
    pub fn block(&self) -> RegisterBlock {
        self.block
    }

    #[inline]
    pub fn ops(&self) -> &[RegOp] {
        &self.ops[..self.len]
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.len
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Value of the last plain write to `offset`, if any.
    pub fn last_write(&self, offset: usize) -> Option<u32> {
        self.ops().iter().rev().find_map(|op| match *op {
            RegOp::Write { offset: o, value } if o == offset => Some(value),
            _ => None,
        })
    }

    /// Run the list in order. Stops at the first failed expectation.
    pub fn execute<B, D>(&self, port: &RegisterPort<B>, delay: &mut D) -> FbResult<()>
    where
        B: RegisterBus,
        D: DelayMs + ?Sized,
    {
        debug_assert_eq!(port.block(), self.block, "command list run on the wrong block");

        for op in self.ops() {
            match *op {
                RegOp::Write { offset, value } => port.write(offset, value),
                RegOp::Update { offset, clear, set } => {
                    port.update(offset, clear, set);
                }
                RegOp::DelayMs(ms) => delay.delay_ms(ms),
                RegOp::ExpectClear { offset, mask, error } => {
                    let value = port.read(offset);
                    if value & mask != 0 {
                        klog_error!(
                            "PYNQFB: {} {} = 0x{:08x}, expected 0x{:x} clear",
                            self.block.name(),
                            self.block.register_name(offset),
                            value,
                            mask
                        );
                        return Err(error);
                    }
                }
                RegOp::ExpectSet { offset, mask, error } => {
                    let value = port.read(offset);
                    if value & mask != mask {
                        klog_error!(
                            "PYNQFB: {} {} = 0x{:08x}, expected 0x{:x} set",
                            self.block.name(),
                            self.block.register_name(offset),
                            value,
                            mask
                        );
                        return Err(error);
                    }
                }
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use std::cell::RefCell;
    use std::vec::Vec;

    use super::*;

    #[derive(Debug, PartialEq, Eq)]
    enum Event {
        Read(usize),
        Write(usize, u32),
        Delay(u32),
    }

    struct Recorder {
        status: u32,
        events: RefCell<Vec<Event>>,
    }

    impl RegisterBus for &Recorder {
        fn read32(&self, offset: usize) -> u32 {
            self.events.borrow_mut().push(Event::Read(offset));
            self.status
        }

        fn write32(&self, offset: usize, value: u32) {
            self.events.borrow_mut().push(Event::Write(offset, value));
        }
    }

    impl DelayMs for &Recorder {
        fn delay_ms(&mut self, ms: u32) {
            self.events.borrow_mut().push(Event::Delay(ms));
        }
    }

    fn recorder(status: u32) -> Recorder {
        Recorder {
            status,
            events: RefCell::new(Vec::new()),
        }
    }

    #[test]
    fn executes_in_order() {
        let rec = recorder(0x30);
        let port = RegisterPort::new(RegisterBlock::Vdma, &rec);
        let mut list = CommandList::new(RegisterBlock::Vdma);
        list.write(0x00, 4).delay_ms(1).update(0x28, 0x1F, 0).write(0x50, 480);

        let mut delay = &rec;
        list.execute(&port, &mut delay).unwrap();
        assert_eq!(
            rec.events.borrow().as_slice(),
            &[
                Event::Write(0x00, 4),
                Event::Delay(1),
                Event::Read(0x28),
                Event::Write(0x28, 0x20),
                Event::Write(0x50, 480),
            ]
        );
    }

    #[test]
    fn failed_expectation_stops_the_list() {
        let rec = recorder(0);
        let port = RegisterPort::new(RegisterBlock::DynClk, &rec);
        let mut list = CommandList::new(RegisterBlock::DynClk);
        list.expect_set(0x04, 1, FbError::ClockLockTimeout).write(0x00, 1);

        let mut delay = &rec;
        assert_eq!(list.execute(&port, &mut delay), Err(FbError::ClockLockTimeout));
        assert_eq!(rec.events.borrow().as_slice(), &[Event::Read(0x04)]);
    }

    #[test]
    fn expect_clear_checks_every_mask_bit() {
        let rec = recorder(0b10);
        let port = RegisterPort::new(RegisterBlock::DynClk, &rec);
        let mut delay = &rec;

        let mut ok = CommandList::new(RegisterBlock::DynClk);
        ok.expect_clear(0x04, 0b01, FbError::ClockStopTimeout);
        assert_eq!(ok.execute(&port, &mut delay), Ok(()));

        let mut bad = CommandList::new(RegisterBlock::DynClk);
        bad.expect_clear(0x04, 0b11, FbError::ClockStopTimeout);
        assert_eq!(bad.execute(&port, &mut delay), Err(FbError::ClockStopTimeout));
    }

    #[test]
    fn last_write_ignores_updates() {
        let mut list = CommandList::new(RegisterBlock::Vtc);
        list.write(0x60, 1).update(0x60, 0, 2).write(0x60, 3).write(0x70, 9);
        assert_eq!(list.last_write(0x60), Some(3));
        assert_eq!(list.last_write(0x74), None);
        assert_eq!(list.len(), 4);
    }

    #[test]
    #[should_panic(expected = "command list overflow")]
    fn overflow_panics() {
        let mut list = CommandList::new(RegisterBlock::Vtc);
        for _ in 0..=COMMAND_LIST_CAPACITY {
            list.delay_ms(0);
        }
    }
}

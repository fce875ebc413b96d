//! Fake board for host tests.
//!
//! One [`Board`] backs the register buses, the coherent allocator and the
//! framebuffer consumer, and journals everything they see in order. The
//! clock generator's status register follows its control writes, and each
//! resettable block clears its reset bit on write.

use std::boxed::Box;
use std::cell::RefCell;
use std::collections::BTreeMap;
use std::rc::Rc;
use std::vec::Vec;

use pynqfb_abi::{FbError, FbInfo, FbResult, PhysAddr, VirtAddr};
use pynqfb_lib::DelayMs;
use pynqfb_mm::{CoherentAllocator, DmaRegion};

use crate::dynclk::regs::{DYNCLK_CTRL, DYNCLK_STATUS, DynClkCtrl, DynClkStatus};
use crate::platform::{MemResource, Platform, RegisterBlock};
use crate::port::RegisterBus;
use crate::vdma::regs::{VDMA_MM2S_CR, VDMA_S2MM_CR, VdmaCtrl};
use crate::vtc::regs::{VTC_CTL, VtcCtrl};

pub const REGION_SIZE: usize = 0x1_0000;
pub const FRAME_PHYS_BASE: u64 = 0x1800_0000;

pub const fn block_base(block: RegisterBlock) -> u64 {
    match block {
        RegisterBlock::DynClk => 0x43C1_0000,
        RegisterBlock::Vtc => 0x43C0_0000,
        RegisterBlock::Vdma => 0x4300_0000,
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Event {
    Map(RegisterBlock),
    Unmap(RegisterBlock),
    Write(RegisterBlock, usize, u32),
    Delay(u32),
    Alloc(usize),
    Free(u64),
    Register,
    Unregister,
}

pub struct Board {
    regs: BTreeMap<(usize, usize), u32>,
    live: Vec<(u64, Box<[u8]>)>,
    next_phys: u64,
    pub events: Vec<Event>,
    /// Resource left out of the device description.
    pub missing: Option<RegisterBlock>,
    /// Resource whose mapping fails.
    pub unmappable: Option<RegisterBlock>,
    /// The clock generator drops RUNNING when stopped.
    pub clock_stops: bool,
    /// The clock generator raises RUNNING when started.
    pub clock_locks: bool,
    pub alloc_budget: usize,
    pub register_result: FbResult<()>,
    pub registered: Option<FbInfo>,
}

impl Board {
    pub fn shared() -> Rc<RefCell<Board>> {
        let mut regs = BTreeMap::new();
        // Left running by the boot loader.
        regs.insert(
            (RegisterBlock::DynClk.resource_index(), DYNCLK_STATUS),
            DynClkStatus::RUNNING.bits(),
        );
        Rc::new(RefCell::new(Board {
            regs,
            live: Vec::new(),
            next_phys: FRAME_PHYS_BASE,
            events: Vec::new(),
            missing: None,
            unmappable: None,
            clock_stops: true,
            clock_locks: true,
            alloc_budget: usize::MAX,
            register_result: Ok(()),
            registered: None,
        }))
    }

    pub fn reg(&self, block: RegisterBlock, offset: usize) -> u32 {
        self.regs
            .get(&(block.resource_index(), offset))
            .copied()
            .unwrap_or(0)
    }

    fn write(&mut self, block: RegisterBlock, offset: usize, value: u32) {
        self.events.push(Event::Write(block, offset, value));

        let stored = match (block, offset) {
            (RegisterBlock::DynClk, DYNCLK_CTRL) => {
                let running = if value & DynClkCtrl::START.bits() != 0 {
                    self.clock_locks
                } else {
                    !self.clock_stops
                };
                let status = if running { DynClkStatus::RUNNING.bits() } else { 0 };
                self.regs.insert((block.resource_index(), DYNCLK_STATUS), status);
                value
            }
            (RegisterBlock::Vtc, VTC_CTL) => value & !VtcCtrl::RESET.bits(),
            (RegisterBlock::Vdma, VDMA_MM2S_CR | VDMA_S2MM_CR) => value & !VdmaCtrl::RESET.bits(),
            _ => value,
        };
        self.regs.insert((block.resource_index(), offset), stored);
    }

    pub fn count(&self, event: Event) -> usize {
        self.events.iter().filter(|&&e| e == event).count()
    }

    pub fn count_where(&self, pred: impl Fn(&Event) -> bool) -> usize {
        self.events.iter().filter(|e| pred(e)).count()
    }

    pub fn position(&self, pred: impl Fn(&Event) -> bool) -> Option<usize> {
        self.events.iter().position(pred)
    }

    pub fn unmaps(&self) -> usize {
        self.count_where(|e| matches!(e, Event::Unmap(_)))
    }

    pub fn allocs(&self) -> usize {
        self.count_where(|e| matches!(e, Event::Alloc(_)))
    }

    pub fn frees(&self) -> usize {
        self.count_where(|e| matches!(e, Event::Free(_)))
    }

    pub fn live_allocations(&self) -> usize {
        self.live.len()
    }

    pub fn wrote(&self, block: RegisterBlock, offset: usize) -> bool {
        self.count_where(|e| matches!(*e, Event::Write(b, o, _) if b == block && o == offset)) > 0
    }
}

pub struct FakeBus {
    block: RegisterBlock,
    board: Rc<RefCell<Board>>,
}

impl RegisterBus for FakeBus {
    fn read32(&self, offset: usize) -> u32 {
        self.board.borrow().reg(self.block, offset)
    }

    fn write32(&self, offset: usize, value: u32) {
        self.board.borrow_mut().write(self.block, offset, value);
    }
}

pub struct FakePlatform {
    board: Rc<RefCell<Board>>,
}

impl FakePlatform {
    pub fn new(board: &Rc<RefCell<Board>>) -> Self {
        Self {
            board: Rc::clone(board),
        }
    }
}

impl DelayMs for FakePlatform {
    fn delay_ms(&mut self, ms: u32) {
        self.board.borrow_mut().events.push(Event::Delay(ms));
    }
}

impl CoherentAllocator for FakePlatform {
    fn alloc_coherent(&mut self, len: usize) -> Option<DmaRegion> {
        let mut board = self.board.borrow_mut();
        if board.alloc_budget == 0 {
            return None;
        }
        board.alloc_budget -= 1;
        board.events.push(Event::Alloc(len));

        let mut backing = vec![0xA5u8; len].into_boxed_slice();
        let virt = VirtAddr::from(backing.as_mut_ptr());
        let phys = board.next_phys;
        board.next_phys += len as u64;
        board.live.push((phys, backing));
        // SAFETY: the boxed slice lives in `live` until free_coherent.
        Some(unsafe { DmaRegion::new(PhysAddr::new(phys), virt, len) })
    }

    fn free_coherent(&mut self, region: DmaRegion) {
        let mut board = self.board.borrow_mut();
        let phys = region.phys().as_u64();
        board.events.push(Event::Free(phys));
        let before = board.live.len();
        board.live.retain(|(p, _)| *p != phys);
        assert_eq!(before - 1, board.live.len(), "freed a region that is not live");
    }
}

impl Platform for FakePlatform {
    type Bus = FakeBus;

    fn mem_resource(&self, index: usize) -> Option<MemResource> {
        let block = *RegisterBlock::ALL.get(index)?;
        if self.board.borrow().missing == Some(block) {
            return None;
        }
        Some(MemResource::new(PhysAddr::new(block_base(block)), REGION_SIZE))
    }

    fn map_resource(&mut self, resource: &MemResource) -> FbResult<FakeBus> {
        let block = RegisterBlock::ALL
            .into_iter()
            .find(|&b| block_base(b) == resource.start.as_u64())
            .ok_or(FbError::MappingFailure)?;
        let mut board = self.board.borrow_mut();
        if board.unmappable == Some(block) {
            return Err(FbError::MappingFailure);
        }
        board.events.push(Event::Map(block));
        Ok(FakeBus {
            block,
            board: Rc::clone(&self.board),
        })
    }

    fn unmap_resource(&mut self, bus: FakeBus) {
        self.board.borrow_mut().events.push(Event::Unmap(bus.block));
    }

    fn register_framebuffer(&mut self, info: &FbInfo) -> FbResult<()> {
        let mut board = self.board.borrow_mut();
        board.events.push(Event::Register);
        board.register_result?;
        board.registered = Some(*info);
        Ok(())
    }

    fn unregister_framebuffer(&mut self) {
        let mut board = self.board.borrow_mut();
        board.events.push(Event::Unregister);
        board.registered = None;
    }
}

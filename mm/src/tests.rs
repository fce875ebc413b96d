use std::boxed::Box;
use std::vec::Vec;

use pynqfb_abi::{FbError, PhysAddr, VirtAddr};

use crate::dma::{CoherentAllocator, DmaRegion};
use crate::frame::{FRAME_COUNT, FrameMemory, frame_size};

/// Heap-backed allocator. Fresh memory is filled with a poison pattern so
/// tests can see whether the frame manager cleared it.
struct HeapAllocator {
    live: Vec<(u64, Box<[u8]>)>,
    next_phys: u64,
    budget: usize,
    allocs: usize,
    frees: usize,
}

impl HeapAllocator {
    fn new(budget: usize) -> Self {
        Self {
            live: Vec::new(),
            next_phys: 0x1800_0000,
            budget,
            allocs: 0,
            frees: 0,
        }
    }
}

impl CoherentAllocator for HeapAllocator {
    fn alloc_coherent(&mut self, len: usize) -> Option<DmaRegion> {
        if self.budget == 0 {
            return None;
        }
        self.budget -= 1;
        self.allocs += 1;

        let mut backing = vec![0xA5u8; len].into_boxed_slice();
        let virt = VirtAddr::from(backing.as_mut_ptr());
        let phys = self.next_phys;
        self.next_phys += len as u64;
        self.live.push((phys, backing));
        Some(unsafe { DmaRegion::new(PhysAddr::new(phys), virt, len) })
    }

    fn free_coherent(&mut self, region: DmaRegion) {
        self.frees += 1;
        let before = self.live.len();
        self.live.retain(|(phys, _)| *phys != region.phys().as_u64());
        assert_eq!(before - 1, self.live.len(), "freed a region that is not live");
    }
}

#[test]
fn frame_size_is_page_aligned() {
    assert_eq!(frame_size(1280, 1024, 3), 3_932_160);
    assert_eq!(frame_size(640, 480, 3), 921_600);
    assert_eq!(frame_size(800, 480, 3), 1_155_072);
    assert_eq!(frame_size(1920, 1080, 3) % 4096, 0);
}

#[test]
fn allocate_clears_every_frame() {
    let mut alloc = HeapAllocator::new(FRAME_COUNT);
    let mut frames = FrameMemory::new();
    let len = frame_size(640, 480, 3);

    frames.allocate(&mut alloc, len).expect("allocation within budget");
    assert!(frames.is_allocated());
    assert_eq!(frames.frames().count(), FRAME_COUNT);

    let frame = frames.frame(0).expect("frame 0");
    assert_eq!(frame.len(), len);
    assert_eq!(frame.phys(), PhysAddr::new(0x1800_0000));
    let bytes = unsafe { core::slice::from_raw_parts(frame.virt().as_ptr::<u8>(), frame.len()) };
    assert!(bytes.iter().all(|&b| b == 0));

    frames.release(&mut alloc);
    assert!(alloc.live.is_empty());
}

#[test]
fn allocation_failure_keeps_nothing() {
    let mut alloc = HeapAllocator::new(0);
    let mut frames = FrameMemory::new();

    assert_eq!(frames.allocate(&mut alloc, 4096), Err(FbError::OutOfMemory));
    assert!(!frames.is_allocated());
    assert_eq!(alloc.frees, alloc.allocs);
    assert!(alloc.live.is_empty());
}

#[test]
fn release_is_idempotent() {
    let mut alloc = HeapAllocator::new(FRAME_COUNT);
    let mut frames = FrameMemory::new();

    frames.release(&mut alloc);
    assert_eq!(alloc.frees, 0);

    frames.allocate(&mut alloc, 8192).unwrap();
    frames.release(&mut alloc);
    frames.release(&mut alloc);
    assert_eq!(alloc.frees, FRAME_COUNT);
    assert!(frames.frame(0).is_none());
}

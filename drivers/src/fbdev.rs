//! PYNQ-Z1 HDMI framebuffer device.
//!
//! [`FbDevice::probe`] brings the pipeline up in a fixed order: map the three
//! register windows, allocate the frame buffer, start the pixel clock,
//! program the timing controller, start DMA scan-out and finally hand the
//! buffer to the display consumer. Any failure tears down whatever was set up,
//! in reverse, and returns the error that stopped it.
//!
//! Teardown checks every resource before touching it, so it can run any
//! number of times. It runs on failure, on [`FbDevice::remove`] and on drop.

use bitflags::bitflags;
use pynqfb_abi::{FbError, FbInfo, FbResult, FixScreenInfo, PixelFormat, VarScreenInfo};
use pynqfb_lib::{klog_debug, klog_error, klog_info, klog_set_level, klog_warn};
use pynqfb_mm::{FRAME_COUNT, FrameMemory, frame_size};

use crate::command::CommandList;
use crate::config::FbConfig;
use crate::dynclk::{self, ClockConfig};
use crate::mode::{ModeRecord, ModeSelection, resolve_mode};
use crate::palette::PseudoPalette;
use crate::platform::{Platform, RegisterBlock};
use crate::port::RegisterPort;
use crate::surface::FbSurface;
use crate::vdma::{self, DmaGeometry};
use crate::vtc;

bitflags! {
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
    pub struct FbFlags: u32 {
        /// The display consumer holds the framebuffer.
        const REGISTERED = 1 << 0;
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BringUpStage {
    Uninitialized,
    ResourcesMapped,
    BuffersAllocated,
    ClockConfigured,
    TimingConfigured,
    DmaConfigured,
    Registered,
    Failed,
}

impl BringUpStage {
    pub const fn name(self) -> &'static str {
        match self {
            Self::Uninitialized => "uninitialized",
            Self::ResourcesMapped => "resources mapped",
            Self::BuffersAllocated => "buffers allocated",
            Self::ClockConfigured => "clock configured",
            Self::TimingConfigured => "timing configured",
            Self::DmaConfigured => "dma configured",
            Self::Registered => "registered",
            Self::Failed => "failed",
        }
    }
}

pub struct FbDevice<P: Platform> {
    platform: P,
    dynclk: Option<RegisterPort<P::Bus>>,
    vtc: Option<RegisterPort<P::Bus>>,
    vdma: Option<RegisterPort<P::Bus>>,
    frames: FrameMemory,
    mode: &'static ModeRecord,
    fallback: bool,
    stride: u32,
    info: Option<FbInfo>,
    palette: PseudoPalette,
    flags: FbFlags,
    stage: BringUpStage,
}

impl<P: Platform> FbDevice<P> {
    fn new(platform: P, selection: ModeSelection) -> Self {
        let mode = selection.mode;
        Self {
            platform,
            dynclk: None,
            vtc: None,
            vdma: None,
            frames: FrameMemory::new(),
            mode,
            fallback: selection.fallback,
            stride: mode.width * PixelFormat::Rgb888.bytes_per_pixel(),
            info: None,
            palette: PseudoPalette::new(),
            flags: FbFlags::empty(),
            stage: BringUpStage::Uninitialized,
        }
    }

    /// Bring the pipeline up for `config`'s resolution.
    ///
    /// Unsupported resolutions fall back to the first mode. A missing width
    /// or height fails with `InvalidArgument` before the platform is touched.
    pub fn probe(platform: P, config: &FbConfig) -> FbResult<Self> {
        let (width, height) = config.resolution()?;
        if config.debug > 0 {
            klog_set_level(config.log_level());
        }
        klog_info!("PYNQFB: Probing PYNQ-Z1 Framebuffer...");

        let mut device = Self::new(platform, resolve_mode(width, height));
        if let Err(err) = device.bring_up() {
            klog_error!(
                "PYNQFB: bring-up failed after stage '{}': {}",
                device.stage.name(),
                err
            );
            device.advance(BringUpStage::Failed);
            device.remove();
            return Err(err);
        }

        klog_info!("PYNQFB: PYNQ-Z1 Framebuffer Probed.");
        Ok(device)
    }

    fn bring_up(&mut self) -> FbResult<()> {
        self.map_registers()?;
        self.advance(BringUpStage::ResourcesMapped);

        self.allocate_frames()?;
        self.advance(BringUpStage::BuffersAllocated);

        self.configure_clock()?;
        self.advance(BringUpStage::ClockConfigured);

        self.configure_timing()?;
        self.advance(BringUpStage::TimingConfigured);

        self.configure_dma()?;
        self.advance(BringUpStage::DmaConfigured);

        self.register()?;
        self.advance(BringUpStage::Registered);
        Ok(())
    }

    fn advance(&mut self, stage: BringUpStage) {
        klog_debug!("PYNQFB: stage {} -> {}", self.stage.name(), stage.name());
        self.stage = stage;
    }

    fn slot_mut(&mut self, block: RegisterBlock) -> &mut Option<RegisterPort<P::Bus>> {
        match block {
            RegisterBlock::DynClk => &mut self.dynclk,
            RegisterBlock::Vtc => &mut self.vtc,
            RegisterBlock::Vdma => &mut self.vdma,
        }
    }

    fn is_mapped(&self, block: RegisterBlock) -> bool {
        match block {
            RegisterBlock::DynClk => self.dynclk.is_some(),
            RegisterBlock::Vtc => self.vtc.is_some(),
            RegisterBlock::Vdma => self.vdma.is_some(),
        }
    }

    fn map_registers(&mut self) -> FbResult<()> {
        for block in RegisterBlock::ALL {
            let Some(resource) = self.platform.mem_resource(block.resource_index()) else {
                klog_error!("PYNQFB: No memory resource for {}", block.name());
                return Err(FbError::ResourceUnavailable);
            };
            let bus = self.platform.map_resource(&resource).inspect_err(|err| {
                klog_error!("PYNQFB: Failed to map {} registers: {}", block.name(), err)
            })?;
            klog_info!("PYNQFB: {:<6} : {:08x}", block.name(), resource.start);
            *self.slot_mut(block) = Some(RegisterPort::new(block, bus));
        }
        Ok(())
    }

    fn allocate_frames(&mut self) -> FbResult<()> {
        let bpp = PixelFormat::Rgb888.bytes_per_pixel();
        let len = frame_size(self.mode.width, self.mode.height, bpp);
        self.frames.allocate(&mut self.platform, len)?;

        let frame = self.frames.frame(0).ok_or(FbError::OutOfMemory)?;
        let mut fix = FixScreenInfo::new();
        fix.smem_start = frame.phys();
        fix.smem_len = frame.len() as u32;
        fix.line_length = self.stride;
        self.info = Some(FbInfo {
            fix,
            var: VarScreenInfo::rgb888(self.mode.width, self.mode.height),
            screen_base: frame.virt(),
        });
        Ok(())
    }

    /// Run `list` against its block. `ResourceUnavailable` if not mapped.
    fn run(&mut self, list: &CommandList) -> FbResult<()> {
        let port = match list.block() {
            RegisterBlock::DynClk => self.dynclk.as_ref(),
            RegisterBlock::Vtc => self.vtc.as_ref(),
            RegisterBlock::Vdma => self.vdma.as_ref(),
        }
        .ok_or(FbError::ResourceUnavailable)?;
        list.execute(port, &mut self.platform)
    }

    fn configure_clock(&mut self) -> FbResult<()> {
        let config = ClockConfig::from_ratio(&self.mode.clock);
        config.log();
        self.run(&dynclk::configure_commands(&config))?;
        klog_info!("PYNQFB: DYNCLK configured.");
        Ok(())
    }

    fn configure_timing(&mut self) -> FbResult<()> {
        self.run(&vtc::configure_commands(self.mode))?;
        klog_info!("PYNQFB: VTC configured.");
        Ok(())
    }

    fn configure_dma(&mut self) -> FbResult<()> {
        let mut addrs = [0u32; FRAME_COUNT];
        for (slot, frame) in addrs.iter_mut().zip(self.frames.frames()) {
            *slot = frame.phys().as_dma32().ok_or_else(|| {
                klog_error!("PYNQFB: frame at {:x} is beyond 32-bit DMA reach", frame.phys());
                FbError::MappingFailure
            })?;
        }

        let geometry = DmaGeometry {
            hsize: self.mode.width * PixelFormat::Rgb888.bytes_per_pixel(),
            stride: self.stride,
            vsize: self.mode.height,
            frame_delay: 0,
        };
        self.run(&vdma::configure_commands(&geometry, &addrs))?;
        klog_info!("PYNQFB: VDMA configured.");
        Ok(())
    }

    fn register(&mut self) -> FbResult<()> {
        let info = self.info.as_ref().ok_or(FbError::RegistrationFailure)?;
        self.platform
            .register_framebuffer(info)
            .inspect_err(|_| klog_error!("PYNQFB: Could not register frame buffer"))?;
        self.flags.insert(FbFlags::REGISTERED);
        Ok(())
    }

    fn quiesce(&mut self, list: &CommandList) {
        if !self.is_mapped(list.block()) {
            return;
        }
        if let Err(err) = self.run(list) {
            klog_warn!("PYNQFB: {} shutdown: {}", list.block().name(), err);
        }
    }

    /// Tear the pipeline down in reverse bring-up order. Safe to call again.
    pub fn remove(&mut self) {
        if self.flags.contains(FbFlags::REGISTERED) {
            self.platform.unregister_framebuffer();
            self.flags.remove(FbFlags::REGISTERED);
        }

        self.quiesce(&vdma::reset_commands());
        self.quiesce(&vtc::reset_commands());
        self.quiesce(&dynclk::stop_commands());

        for block in [RegisterBlock::Vdma, RegisterBlock::Vtc, RegisterBlock::DynClk] {
            if let Some(port) = self.slot_mut(block).take() {
                self.platform.unmap_resource(port.into_bus());
            }
        }

        self.frames.release(&mut self.platform);
        self.info = None;

        if self.stage != BringUpStage::Failed && self.stage != BringUpStage::Uninitialized {
            klog_info!("PYNQFB: PYNQ-Z1 Framebuffer removed.");
            self.advance(BringUpStage::Uninitialized);
        }
    }

    #[inline]
    pub fn stage(&self) -> BringUpStage {
        self.stage
    }

    #[inline]
    pub fn flags(&self) -> FbFlags {
        self.flags
    }

    #[inline]
    pub fn mode(&self) -> &'static ModeRecord {
        self.mode
    }

    /// The requested resolution was unsupported and the default mode is in use.
    #[inline]
    pub fn is_fallback(&self) -> bool {
        self.fallback
    }

    /// Bytes per scan line.
    #[inline]
    pub fn stride(&self) -> u32 {
        self.stride
    }

    /// Registration record, present while the frame buffer is allocated.
    pub fn info(&self) -> Option<&FbInfo> {
        self.info.as_ref()
    }

    pub fn platform(&self) -> &P {
        &self.platform
    }

    pub fn palette(&self) -> &PseudoPalette {
        &self.palette
    }

    pub fn set_color(&mut self, regno: u32, red: u8, green: u8, blue: u8) -> FbResult<()> {
        self.palette.set_color(regno, red, green, blue)
    }

    /// The hardware has no blanking control; every request succeeds.
    pub fn blank(&mut self, _blank_mode: u32) -> FbResult<()> {
        Ok(())
    }

    /// Pixel access to the scanned-out frame while registered.
    pub fn surface(&mut self) -> Option<FbSurface<'_>> {
        if self.stage != BringUpStage::Registered {
            return None;
        }
        let frame = self.frames.frame(0)?;
        // SAFETY: the frame stays allocated while the device is borrowed, and
        // stride * height never exceeds the page-aligned frame length.
        Some(unsafe {
            FbSurface::new(
                frame.virt(),
                self.mode.width,
                self.mode.height,
                self.stride,
                frame.len(),
            )
        })
    }
}

impl<P: Platform> Drop for FbDevice<P> {
    fn drop(&mut self) {
        self.remove();
    }
}

//! Scanline PPU.
//!
//! A four-mode state machine clocked by instruction costs. Each completed
//! pixel-transfer period renders one full scanline into a [`PixelSink`];
//! there is no pixel FIFO, so mid-scanline register writes only take
//! effect on the next line.
mod registers;
mod render;
mod sink;

pub use registers::{Lcdc, StatSources};
pub use sink::{FrameBuffer, PixelSink};

use crate::cpu::Interrupt;
use crate::SCREEN_WIDTH;

pub(crate) const VRAM_SIZE: usize = 0x2000;
pub(crate) const OAM_SIZE: usize = 0xA0;

const OAM_SEARCH_TICKS: u32 = 80;
const PIXEL_TRANSFER_TICKS: u32 = 172;
const HBLANK_TICKS: u32 = 204;
/// One V-Blank line; the 4560-tick interval is walked in ten such steps.
const VBLANK_LINE_TICKS: u32 = 456;

/// First line of the V-Blank period.
const VBLANK_START_LINE: u8 = 144;
/// Line at which V-Blank ends and the frame wraps to line 0.
const FRAME_WRAP_LINE: u8 = 153;

/// LCD mode as reported in STAT bits 1:0.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[repr(u8)]
pub enum Mode {
    HBlank = 0,
    VBlank = 1,
    OamSearch = 2,
    PixelTransfer = 3,
}

pub(crate) struct Ppu {
    pub(crate) vram: [u8; VRAM_SIZE],
    pub(crate) oam: [u8; OAM_SIZE],
    pub(super) mode: Mode,
    pub(super) ticks: u32,
    /// LY (FF44).
    pub(super) line: u8,
    pub(super) lcdc: Lcdc,
    pub(super) stat_sources: StatSources,
    /// STAT bit 2, refreshed whenever LY changes.
    pub(super) coincidence: bool,
    pub(super) scy: u8,
    pub(super) scx: u8,
    pub(super) lyc: u8,
    pub(super) bgp: u8,
    pub(super) obp0: u8,
    pub(super) obp1: u8,
    pub(super) wy: u8,
    pub(super) wx: u8,
    /// Background color ids of the current line, used for object priority.
    bg_ids: [u8; SCREEN_WIDTH],
}

impl Ppu {
    pub(crate) fn new() -> Self {
        Self {
            vram: [0; VRAM_SIZE],
            oam: [0; OAM_SIZE],
            mode: Mode::HBlank,
            ticks: 0,
            line: 0,
            lcdc: Lcdc::from_bits_retain(0x91),
            stat_sources: StatSources::empty(),
            coincidence: false,
            scy: 0,
            scx: 0,
            lyc: 0,
            bgp: 0,
            obp0: 0,
            obp1: 0,
            wy: 0,
            wx: 0,
            bg_ids: [0; SCREEN_WIDTH],
        }
    }

    #[inline]
    pub(crate) fn lcd_enabled(&self) -> bool {
        self.lcdc.contains(Lcdc::LCD_ENABLE)
    }

    pub(crate) fn mode(&self) -> Mode {
        self.mode
    }

    pub(crate) fn line(&self) -> u8 {
        self.line
    }

    /// Advance the state machine by `ticks`.
    ///
    /// At most one mode transition happens per call; leftover ticks are
    /// kept for the next call. Nothing advances while the LCD is off.
    pub(crate) fn run<S: PixelSink>(&mut self, ticks: u32, sink: &mut S, iflags: &mut Interrupt) {
        if !self.lcd_enabled() {
            return;
        }

        self.ticks += ticks;
        match self.mode {
            Mode::OamSearch => self.run_oam_search(),
            Mode::PixelTransfer => self.run_pixel_transfer(sink, iflags),
            Mode::HBlank => self.run_hblank(iflags),
            Mode::VBlank => self.run_vblank(sink, iflags),
        }
    }

    fn run_oam_search(&mut self) {
        if self.ticks < OAM_SEARCH_TICKS {
            return;
        }
        self.ticks -= OAM_SEARCH_TICKS;
        self.mode = Mode::PixelTransfer;
    }

    fn run_pixel_transfer<S: PixelSink>(&mut self, sink: &mut S, iflags: &mut Interrupt) {
        if self.ticks < PIXEL_TRANSFER_TICKS {
            return;
        }
        self.render_scanline(sink);
        self.ticks -= PIXEL_TRANSFER_TICKS;
        self.mode = Mode::HBlank;
        self.request_stat(StatSources::HBLANK, iflags);
    }

    fn run_hblank(&mut self, iflags: &mut Interrupt) {
        if self.ticks < HBLANK_TICKS {
            return;
        }
        self.ticks -= HBLANK_TICKS;
        self.line += 1;
        self.compare_lyc(iflags);

        if self.line == VBLANK_START_LINE {
            self.mode = Mode::VBlank;
            iflags.insert(Interrupt::VBLANK);
            self.request_stat(StatSources::VBLANK, iflags);
            return;
        }

        self.mode = Mode::OamSearch;
        self.request_stat(StatSources::OAM, iflags);
    }

    fn run_vblank<S: PixelSink>(&mut self, sink: &mut S, iflags: &mut Interrupt) {
        if self.ticks < VBLANK_LINE_TICKS {
            return;
        }
        self.ticks -= VBLANK_LINE_TICKS;
        self.line += 1;
        self.compare_lyc(iflags);
        if self.line < FRAME_WRAP_LINE {
            return;
        }

        self.mode = Mode::OamSearch;
        self.line = 0;
        sink.end_of_frame();
        self.request_stat(StatSources::VBLANK, iflags);
    }

    fn compare_lyc(&mut self, iflags: &mut Interrupt) {
        self.coincidence = self.line == self.lyc;
        if self.coincidence {
            self.request_stat(StatSources::LYC, iflags);
        }
    }

    #[inline]
    fn request_stat(&self, source: StatSources, iflags: &mut Interrupt) {
        if self.stat_sources.contains(source) {
            iflags.insert(Interrupt::LCD_STAT);
        }
    }
}

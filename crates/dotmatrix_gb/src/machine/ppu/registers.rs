use super::{Mode, PixelSink, Ppu};

bitflags::bitflags! {
    /// LCDC (FF40).
    #[derive(Clone, Copy, Debug, PartialEq, Eq)]
    pub struct Lcdc: u8 {
        const LCD_ENABLE    = 1 << 7;
        /// Window tile map at 0x9C00 instead of 0x9800.
        const WINDOW_MAP    = 1 << 6;
        const WINDOW_ENABLE = 1 << 5;
        /// Unsigned tile data at 0x8000 instead of signed at 0x8800.
        const BG_TILE_DATA  = 1 << 4;
        /// Background tile map at 0x9C00 instead of 0x9800.
        const BG_MAP        = 1 << 3;
        /// 8x16 objects.
        const OBJ_SIZE      = 1 << 2;
        const OBJ_ENABLE    = 1 << 1;
        const BG_ENABLE     = 1 << 0;
    }
}

bitflags::bitflags! {
    /// Writable STAT (FF41) interrupt-source enables.
    #[derive(Clone, Copy, Debug, PartialEq, Eq)]
    pub struct StatSources: u8 {
        const LYC    = 1 << 6;
        const OAM    = 1 << 5;
        const VBLANK = 1 << 4;
        const HBLANK = 1 << 3;
    }
}

impl Ppu {
    /// Read one of FF40..=FF4B. DMA (FF46) is write-only and reads 0xFF.
    pub(crate) fn read(&self, addr: u16) -> u8 {
        match addr {
            0xFF40 => self.lcdc.bits(),
            0xFF41 => self.read_stat(),
            0xFF42 => self.scy,
            0xFF43 => self.scx,
            0xFF44 => self.line,
            0xFF45 => self.lyc,
            0xFF47 => self.bgp,
            0xFF48 => self.obp0,
            0xFF49 => self.obp1,
            0xFF4A => self.wy,
            0xFF4B => self.wx,
            _ => 0xFF,
        }
    }

    /// Write one of FF40..=FF4B. LY is read-only.
    pub(crate) fn write<S: PixelSink>(&mut self, addr: u16, value: u8, sink: &mut S) {
        match addr {
            0xFF40 => self.write_lcdc(value, sink),
            0xFF41 => self.stat_sources = StatSources::from_bits_truncate(value),
            0xFF42 => self.scy = value,
            0xFF43 => self.scx = value,
            0xFF45 => self.lyc = value,
            0xFF47 => self.bgp = value,
            0xFF48 => self.obp0 = value,
            0xFF49 => self.obp1 = value,
            0xFF4A => self.wy = value,
            0xFF4B => self.wx = value,
            _ => {}
        }
    }

    fn read_stat(&self) -> u8 {
        self.stat_sources.bits() | ((self.coincidence as u8) << 2) | self.mode as u8
    }

    /// Writing LCDC with bit 7 clear stops the PPU: timing, LY and mode are
    /// reset and the sink is told to blank the screen.
    fn write_lcdc<S: PixelSink>(&mut self, value: u8, sink: &mut S) {
        let was_enabled = self.lcd_enabled();
        self.lcdc = Lcdc::from_bits_retain(value);

        if !self.lcd_enabled() {
            if was_enabled {
                log::debug!("GB PPU: LCD disabled at LY={}", self.line);
            }
            self.ticks = 0;
            self.line = 0;
            self.mode = Mode::HBlank;
            sink.clear();
        } else if !was_enabled {
            log::debug!("GB PPU: LCD enabled (LCDC=0x{value:02X})");
        }
    }
}

use super::{Lcdc, PixelSink, Ppu};
use crate::SCREEN_WIDTH;

bitflags::bitflags! {
    /// Byte 3 of an OAM entry.
    #[derive(Clone, Copy, Debug, PartialEq, Eq)]
    struct ObjAttributes: u8 {
        /// Draw only over background color id 0.
        const BEHIND_BG = 1 << 7;
        const Y_FLIP    = 1 << 6;
        const X_FLIP    = 1 << 5;
        /// Use OBP1 instead of OBP0.
        const PALETTE_1 = 1 << 4;
    }
}

/// Map a 2-bit color id through a DMG palette register.
#[inline]
fn shade(color_id: u8, palette: u8) -> u8 {
    (palette >> (color_id * 2)) & 0x03
}

/// Combine the two bit planes of a tile row at `bit` into a color id.
#[inline]
fn color_id(lo: u8, hi: u8, bit: u8) -> u8 {
    (((hi >> bit) & 1) << 1) | ((lo >> bit) & 1)
}

impl Ppu {
    /// Render the current line: background, then window, then objects.
    pub(super) fn render_scanline<S: PixelSink>(&mut self, sink: &mut S) {
        if self.lcdc.contains(Lcdc::BG_ENABLE) {
            self.render_background(sink);
        } else {
            self.bg_ids.fill(0);
        }
        if self.lcdc.contains(Lcdc::WINDOW_ENABLE) {
            self.render_window(sink);
        }
        if self.lcdc.contains(Lcdc::OBJ_ENABLE) {
            self.render_objects(sink);
        }
    }

    #[inline]
    fn vram_byte(&self, addr: u16) -> u8 {
        self.vram[(addr & 0x1FFF) as usize]
    }

    /// Low and high bit planes of one tile row.
    #[inline]
    fn tile_row(&self, addr: u16) -> (u8, u8) {
        (self.vram_byte(addr), self.vram_byte(addr.wrapping_add(1)))
    }

    /// Start of a background/window tile in the LCDC-selected data area.
    pub(super) fn tile_address(&self, tile_index: u8) -> u16 {
        if self.lcdc.contains(Lcdc::BG_TILE_DATA) {
            0x8000 + tile_index as u16 * 16
        } else {
            0x8800 + tile_index.wrapping_add(128) as u16 * 16
        }
    }

    fn render_background<S: PixelSink>(&mut self, sink: &mut S) {
        let map_base: u16 = if self.lcdc.contains(Lcdc::BG_MAP) { 0x9C00 } else { 0x9800 };
        let bg_y = self.line.wrapping_add(self.scy);
        let map_row = (bg_y >> 3) as u16;

        for x in 0..SCREEN_WIDTH {
            let bg_x = (x as u8).wrapping_add(self.scx);
            let map_col = (bg_x >> 3) as u16;
            let tile_index = self.vram_byte(map_base + map_row * 32 + map_col);
            let (lo, hi) = self.tile_row(self.tile_address(tile_index) + (bg_y % 8) as u16 * 2);
            let id = color_id(lo, hi, 7 - (bg_x % 8));

            sink.set_pixel(x, self.line as usize, shade(id, self.bgp));
            self.bg_ids[x] = id;
        }
    }

    /// The window is drawn from `WX - 7` to the right edge once LY has
    /// reached WY. A WX below 7 wraps and hides the window for the line.
    fn render_window<S: PixelSink>(&self, sink: &mut S) {
        if self.line < self.wy {
            return;
        }
        let map_base: u16 = if self.lcdc.contains(Lcdc::WINDOW_MAP) { 0x9C00 } else { 0x9800 };
        let left = self.wx.wrapping_sub(7) as usize;
        let win_y = self.line - self.wy;
        let map_row = (win_y >> 3) as u16;

        for i in 0..SCREEN_WIDTH.saturating_sub(left) {
            let map_col = (i >> 3) as u16;
            let tile_index = self.vram_byte(map_base + map_row * 32 + map_col);
            let (lo, hi) = self.tile_row(self.tile_address(tile_index) + (win_y % 8) as u16 * 2);
            let id = color_id(lo, hi, 7 - (i % 8) as u8);

            sink.set_pixel(left + i, self.line as usize, shade(id, self.bgp));
        }
    }

    /// All 40 OAM entries are considered; there is no per-line limit.
    fn render_objects<S: PixelSink>(&self, sink: &mut S) {
        let height: u16 = if self.lcdc.contains(Lcdc::OBJ_SIZE) { 16 } else { 8 };
        let line = self.line as u16 + 16;

        for entry in self.oam.chunks_exact(4) {
            let (obj_y, obj_x, tile, attrs) =
                (entry[0] as u16, entry[1], entry[2], ObjAttributes::from_bits_truncate(entry[3]));
            if line < obj_y || line >= obj_y + height {
                continue;
            }

            let mut row = line - obj_y;
            if attrs.contains(ObjAttributes::Y_FLIP) {
                row = height - row - 1;
            }
            let (lo, hi) = self.tile_row(0x8000 + tile as u16 * 16 + row * 2);
            let palette = if attrs.contains(ObjAttributes::PALETTE_1) { self.obp1 } else { self.obp0 };

            for px in 0..8u8 {
                let screen_x = obj_x.wrapping_add(px);
                if !(8..168).contains(&screen_x) {
                    continue;
                }
                let x = (screen_x - 8) as usize;
                let bit = if attrs.contains(ObjAttributes::X_FLIP) { px } else { 7 - px };
                let id = color_id(lo, hi, bit);
                if id == 0 {
                    continue;
                }
                if !attrs.contains(ObjAttributes::BEHIND_BG) || self.bg_ids[x] == 0 {
                    sink.set_pixel(x, self.line as usize, shade(id, palette));
                }
            }
        }
    }
}

use crate::cpu::Interrupt;

use super::GameBoyBus;

impl GameBoyBus {
    /// Decode a CPU read. Anything not listed below is open bus and reads
    /// back as 0xFF.
    pub(super) fn read8_mmio(&self, addr: u16) -> u8 {
        match addr {
            0x0000..=0x00FF if self.boot_mapped => self
                .boot_rom
                .as_ref()
                .map_or(0xFF, |boot| boot[addr as usize]),

            0x0000..=0x7FFF => self
                .cartridge
                .as_ref()
                .map_or(0xFF, |cart| cart.read_rom(addr)),

            0x8000..=0x9FFF => self.ppu.vram[(addr - 0x8000) as usize],

            0xA000..=0xBFFF => self
                .cartridge
                .as_ref()
                .map_or(0xFF, |cart| cart.read_ram(addr)),

            0xC000..=0xDFFF => self.wram[(addr - 0xC000) as usize],

            0xFE00..=0xFE9F => self.ppu.oam[(addr - 0xFE00) as usize],

            0xFF00 => self.joypad.read(),

            0xFF04..=0xFF07 => self.timer.read(addr),

            // Only the low five bits exist; the rest read as 1.
            0xFF0F => self.if_reg.bits() | 0xE0,

            // Sound is not emulated; the whole block reads as silence.
            0xFF10..=0xFF2F => 0x00,

            0xFF40..=0xFF4B => self.ppu.read(addr),

            0xFF80..=0xFFFE => self.hram[(addr - 0xFF80) as usize],

            0xFFFF => self.ie_reg,

            _ => 0xFF,
        }
    }

    /// Decode a CPU write. Writes to unmapped addresses are dropped.
    pub(super) fn write8_mmio(&mut self, addr: u16, value: u8) {
        match addr {
            // The ROM window is read-only; writes program the mapper.
            0x0000..=0x7FFF => {
                if let Some(cart) = self.cartridge.as_mut() {
                    cart.write_rom(addr, value);
                }
            }

            0x8000..=0x9FFF => self.ppu.vram[(addr - 0x8000) as usize] = value,

            0xA000..=0xBFFF => {
                if let Some(cart) = self.cartridge.as_mut() {
                    cart.write_ram(addr, value);
                }
            }

            0xC000..=0xDFFF => self.wram[(addr - 0xC000) as usize] = value,

            0xFE00..=0xFE9F => self.ppu.oam[(addr - 0xFE00) as usize] = value,

            0xFF00 => self.joypad.write(value),

            0xFF04..=0xFF07 => self.timer.write(addr, value),

            0xFF0F => self.if_reg = Interrupt::from_bits_truncate(value),

            0xFF46 => self.perform_dma(value),

            0xFF40..=0xFF4B => self.ppu.write(addr, value, &mut self.frame),

            0xFF50 => {
                if self.boot_mapped {
                    log::debug!("GB bus: boot ROM unmapped");
                }
                self.boot_mapped = false;
            }

            0xFF80..=0xFFFE => self.hram[(addr - 0xFF80) as usize] = value,

            0xFFFF => self.ie_reg = value,

            _ => {}
        }
    }
}

/// MBC1 bank registers.
///
/// `rom_bank` holds all seven bank bits: the low five come from writes to
/// 0x2000..0x3FFF and, in ROM-banking mode, bits 5-6 from 0x4000..0x5FFF.
/// In RAM-banking mode the 0x4000 register selects the RAM bank instead,
/// and on 64/128-bank carts it also drives the upper ROM bank bits.
pub(super) struct Mbc1 {
    pub(super) rom_bank: u8,
    pub(super) ram_bank: u8,
    pub(super) ram_enabled: bool,
    pub(super) rom_banking: bool,
}

impl Mbc1 {
    pub(super) fn new() -> Self {
        Self {
            rom_bank: 1,
            ram_bank: 0,
            ram_enabled: false,
            rom_banking: true,
        }
    }

    pub(super) fn write(&mut self, addr: u16, value: u8) {
        match addr {
            0x0000..=0x1FFF => self.ram_enabled = value & 0x0F == 0x0A,
            0x2000..=0x3FFF => {
                let low = match value & 0x1F {
                    0 => 1,
                    low => low,
                };
                self.rom_bank = (self.rom_bank & 0x60) | low;
            }
            0x4000..=0x5FFF => {
                if self.rom_banking {
                    self.rom_bank = ((value & 0x03) << 5) | (self.rom_bank & 0x1F);
                } else {
                    self.ram_bank = value & 0x03;
                }
            }
            0x6000..=0x7FFF => self.rom_banking = value & 0x01 == 0,
            _ => {}
        }
    }

    /// Fold the RAM-bank register into a ROM bank number.
    ///
    /// Only applies in RAM-banking mode on carts with 64 or 128 banks; this
    /// is what makes the 0x0000..0x3FFF window switchable on large carts.
    pub(super) fn adjust_rom_bank(&self, bank: usize, total_banks: usize) -> usize {
        if self.rom_banking || total_banks < 32 {
            return bank;
        }
        let mut bank = bank;
        if total_banks == 64 || total_banks == 128 {
            bank = (bank & !0x20) | ((self.ram_bank as usize & 0x01) << 5);
        }
        if total_banks == 128 {
            bank = (bank & !0x40) | ((self.ram_bank as usize & 0x02) << 5);
        }
        bank
    }

    /// Index into cartridge RAM, or `None` while RAM is disabled or absent.
    ///
    /// Carts with at most 8 KiB mirror their RAM across the window; larger
    /// ones are banked, with bank 0 forced in ROM-banking mode.
    pub(super) fn ram_index(&self, addr: u16, ram_size: usize) -> Option<usize> {
        if !self.ram_enabled || ram_size == 0 {
            return None;
        }
        let offset = (addr - 0xA000) as usize;
        if ram_size <= 0x2000 {
            return Some(offset % ram_size);
        }
        let bank = if self.rom_banking { 0 } else { self.ram_bank as usize };
        Some(0x2000 * bank + offset)
    }
}

/// Size of the MBC2's built-in 4-bit RAM.
pub(super) const MBC2_RAM_SIZE: usize = 512;

/// MBC2 registers. Both live below 0x4000 and are told apart by address
/// bit 8.
pub(super) struct Mbc2 {
    pub(super) rom_bank: u8,
    pub(super) ram_enabled: bool,
}

impl Mbc2 {
    pub(super) fn new() -> Self {
        Self {
            rom_bank: 1,
            ram_enabled: false,
        }
    }

    pub(super) fn write(&mut self, addr: u16, value: u8) {
        if addr >= 0x4000 {
            return;
        }
        if addr & 0x0100 != 0 {
            self.rom_bank = value & 0x0F;
        } else {
            self.ram_enabled = value & 0x0F == 0x0A;
        }
        if self.rom_bank == 0 {
            self.rom_bank = 1;
        }
    }

    /// Only the low 9 address bits reach the nibble RAM.
    pub(super) fn ram_index(&self, addr: u16) -> Option<usize> {
        self.ram_enabled.then_some((addr & 0x01FF) as usize)
    }
}

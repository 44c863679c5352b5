use super::{Cpu, Registers};

impl Default for Cpu {
    fn default() -> Self {
        Self::new()
    }
}

impl Cpu {
    pub fn new() -> Self {
        let mut cpu = Self {
            regs: Registers::default(),
            ime: false,
            halted: false,
            ime_enable_pending: false,
            locked: false,
        };
        cpu.reset(false);
        cpu
    }

    /// Reset the CPU to the DMG post-boot register state.
    ///
    /// With `boot_rom` set, execution starts at 0x0000 inside the boot
    /// overlay; otherwise it starts at the cartridge entry point 0x0100.
    pub fn reset(&mut self, boot_rom: bool) {
        self.regs.set_af(0x01B0);
        self.regs.set_bc(0x0013);
        self.regs.set_de(0x00D8);
        self.regs.set_hl(0x014D);
        self.regs.sp = 0xFFFE;
        self.regs.pc = if boot_rom { 0x0000 } else { 0x0100 };

        self.ime = false;
        self.halted = false;
        self.ime_enable_pending = false;
        self.locked = false;
    }
}

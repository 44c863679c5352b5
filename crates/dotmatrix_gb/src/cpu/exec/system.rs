use crate::cpu::{Bus, Cpu};

impl Cpu {
    /// STOP is a two-byte opcode; the padding byte is skipped and the
    /// low-power state itself is not modelled.
    pub(in crate::cpu) fn exec_stop<B: Bus>(&mut self, bus: &mut B) -> u32 {
        let _padding = self.fetch8(bus);
        4
    }

    pub(in crate::cpu) fn exec_halt(&mut self) -> u32 {
        self.halted = true;
        4
    }

    pub(in crate::cpu) fn exec_di(&mut self) -> u32 {
        self.ime = false;
        self.ime_enable_pending = false;
        4
    }

    pub(in crate::cpu) fn exec_ei(&mut self) -> u32 {
        // IME is raised when the *next* opcode starts executing.
        self.ime_enable_pending = true;
        4
    }

    pub(in crate::cpu) fn exec_invalid(&mut self, opcode: u8) -> u32 {
        if !self.locked {
            log::error!(
                "GB CPU locked: invalid opcode 0x{opcode:02X} at PC=0x{pc:04X} (SP=0x{sp:04X} AF=0x{af:04X} BC=0x{bc:04X} DE=0x{de:04X} HL=0x{hl:04X})",
                pc = self.regs.pc.wrapping_sub(1),
                sp = self.regs.sp,
                af = self.regs.af(),
                bc = self.regs.bc(),
                de = self.regs.de(),
                hl = self.regs.hl(),
            );
        }
        self.locked = true;
        0
    }
}

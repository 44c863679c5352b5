use crate::cpu::{Bus, Cpu, Flag};

impl Cpu {
    /// Branch condition encoded in bits 4:3: NZ, Z, NC, C.
    #[inline]
    fn cc_condition(&self, opcode: u8) -> bool {
        match (opcode >> 3) & 0x03 {
            0 => !self.get_flag(Flag::Z),
            1 => self.get_flag(Flag::Z),
            2 => !self.get_flag(Flag::C),
            _ => self.get_flag(Flag::C),
        }
    }

    pub(in crate::cpu) fn exec_jr<B: Bus>(&mut self, bus: &mut B) -> u32 {
        self.jr(bus, true)
    }

    pub(in crate::cpu) fn exec_jr_cc<B: Bus>(&mut self, bus: &mut B, opcode: u8) -> u32 {
        debug_assert!(matches!(opcode, 0x20 | 0x28 | 0x30 | 0x38));
        let cond = self.cc_condition(opcode);
        self.jr(bus, cond)
    }

    pub(in crate::cpu) fn exec_jp_cc<B: Bus>(&mut self, bus: &mut B, opcode: u8) -> u32 {
        debug_assert!(matches!(opcode, 0xC2 | 0xCA | 0xD2 | 0xDA));
        let cond = self.cc_condition(opcode);
        self.jp_cond(bus, cond)
    }

    pub(in crate::cpu) fn exec_jp_a16<B: Bus>(&mut self, bus: &mut B) -> u32 {
        self.jp_cond(bus, true)
    }

    pub(in crate::cpu) fn exec_jp_hl(&mut self) -> u32 {
        self.regs.pc = self.regs.hl();
        4
    }

    pub(in crate::cpu) fn exec_call_cc<B: Bus>(&mut self, bus: &mut B, opcode: u8) -> u32 {
        debug_assert!(matches!(opcode, 0xC4 | 0xCC | 0xD4 | 0xDC));
        let cond = self.cc_condition(opcode);
        self.call_cond(bus, cond)
    }

    pub(in crate::cpu) fn exec_ret_cc<B: Bus>(&mut self, bus: &mut B, opcode: u8) -> u32 {
        debug_assert!(matches!(opcode, 0xC0 | 0xC8 | 0xD0 | 0xD8));
        let cond = self.cc_condition(opcode);
        self.ret_cond(bus, cond)
    }
}

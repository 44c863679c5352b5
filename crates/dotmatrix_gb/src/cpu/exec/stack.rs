use crate::cpu::{Bus, Cpu, Reg16};

impl Cpu {
    pub(in crate::cpu) fn exec_push<B: Bus>(&mut self, bus: &mut B, opcode: u8) -> u32 {
        debug_assert!(matches!(opcode, 0xC5 | 0xD5 | 0xE5 | 0xF5));

        let value = self.regs.get16(Reg16::from_rp2(opcode >> 4));
        self.push_u16(bus, value);
        16
    }

    pub(in crate::cpu) fn exec_pop<B: Bus>(&mut self, bus: &mut B, opcode: u8) -> u32 {
        debug_assert!(matches!(opcode, 0xC1 | 0xD1 | 0xE1 | 0xF1));

        let value = self.pop_u16(bus);
        // POP AF goes through set_af, which keeps F's low nibble clear.
        self.regs.set16(Reg16::from_rp2(opcode >> 4), value);
        12
    }

    pub(in crate::cpu) fn exec_rst<B: Bus>(&mut self, bus: &mut B, opcode: u8) -> u32 {
        let ret = self.regs.pc;
        self.push_u16(bus, ret);
        self.regs.pc = (opcode & 0x38) as u16;
        16
    }

    pub(in crate::cpu) fn exec_call_a16<B: Bus>(&mut self, bus: &mut B) -> u32 {
        self.call_cond(bus, true)
    }

    pub(in crate::cpu) fn exec_ret<B: Bus>(&mut self, bus: &mut B) -> u32 {
        self.regs.pc = self.pop_u16(bus);
        16
    }

    pub(in crate::cpu) fn exec_reti<B: Bus>(&mut self, bus: &mut B) -> u32 {
        self.regs.pc = self.pop_u16(bus);
        self.ime = true;
        16
    }
}

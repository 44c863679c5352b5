use crate::cpu::{Bus, Cpu, Reg16, Reg8};

impl Cpu {
    pub(in crate::cpu) fn exec_inc8<B: Bus>(&mut self, bus: &mut B, opcode: u8) -> u32 {
        debug_assert!(opcode & 0xC7 == 0x04, "unexpected INC r opcode {opcode:#04x}");

        let reg = Reg8::from_bits(opcode >> 3);
        let value = self.read_reg8(bus, reg);
        let result = self.alu_inc8(value);
        self.write_reg8(bus, reg, result);

        if reg == Reg8::HlMem { 12 } else { 4 }
    }

    pub(in crate::cpu) fn exec_dec8<B: Bus>(&mut self, bus: &mut B, opcode: u8) -> u32 {
        debug_assert!(opcode & 0xC7 == 0x05, "unexpected DEC r opcode {opcode:#04x}");

        let reg = Reg8::from_bits(opcode >> 3);
        let value = self.read_reg8(bus, reg);
        let result = self.alu_dec8(value);
        self.write_reg8(bus, reg, result);

        if reg == Reg8::HlMem { 12 } else { 4 }
    }

    pub(in crate::cpu) fn exec_inc16(&mut self, opcode: u8) -> u32 {
        let reg = Reg16::from_rp(opcode >> 4);
        let value = self.regs.get16(reg).wrapping_add(1);
        self.regs.set16(reg, value);
        8
    }

    pub(in crate::cpu) fn exec_dec16(&mut self, opcode: u8) -> u32 {
        let reg = Reg16::from_rp(opcode >> 4);
        let value = self.regs.get16(reg).wrapping_sub(1);
        self.regs.set16(reg, value);
        8
    }
}

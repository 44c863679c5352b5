use crate::cpu::{Bus, Cpu, Reg16, Reg8};

impl Cpu {
    pub(in crate::cpu) fn exec_ld_rr_d16<B: Bus>(&mut self, bus: &mut B, opcode: u8) -> u32 {
        debug_assert!(matches!(opcode, 0x01 | 0x11 | 0x21 | 0x31));

        let value = self.fetch16(bus);
        self.regs.set16(Reg16::from_rp(opcode >> 4), value);
        12
    }

    pub(in crate::cpu) fn exec_ld_r_d8<B: Bus>(&mut self, bus: &mut B, opcode: u8) -> u32 {
        let reg = Reg8::from_bits(opcode >> 3);
        let value = self.fetch8(bus);
        self.write_reg8(bus, reg, value);

        if reg == Reg8::HlMem { 12 } else { 8 }
    }

    pub(in crate::cpu) fn exec_ld_a16_sp<B: Bus>(&mut self, bus: &mut B) -> u32 {
        let addr = self.fetch16(bus);
        bus.write16(addr, self.regs.sp);
        20
    }

    /// LDH (a8),A / LDH A,(a8)
    pub(in crate::cpu) fn exec_ldh_a8<B: Bus>(&mut self, bus: &mut B, opcode: u8) -> u32 {
        let addr = 0xFF00 | self.fetch8(bus) as u16;
        if opcode == 0xE0 {
            bus.write8(addr, self.regs.a);
        } else {
            self.regs.a = bus.read8(addr);
        }
        12
    }

    /// LD (C),A / LD A,(C)
    pub(in crate::cpu) fn exec_ldh_c<B: Bus>(&mut self, bus: &mut B, opcode: u8) -> u32 {
        let addr = 0xFF00 | self.regs.c as u16;
        if opcode == 0xE2 {
            bus.write8(addr, self.regs.a);
        } else {
            self.regs.a = bus.read8(addr);
        }
        8
    }

    pub(in crate::cpu) fn exec_ld_a16_a<B: Bus>(&mut self, bus: &mut B, opcode: u8) -> u32 {
        let addr = self.fetch16(bus);
        if opcode == 0xEA {
            bus.write8(addr, self.regs.a);
        } else {
            self.regs.a = bus.read8(addr);
        }
        16
    }

    /// Address for the (BC)/(DE)/(HL+)/(HL-) forms, applying the HL step.
    fn indirect_addr(&mut self, opcode: u8) -> u16 {
        match (opcode >> 4) & 0x03 {
            0 => self.regs.bc(),
            1 => self.regs.de(),
            2 => {
                let hl = self.regs.hl();
                self.regs.set_hl(hl.wrapping_add(1));
                hl
            }
            _ => {
                let hl = self.regs.hl();
                self.regs.set_hl(hl.wrapping_sub(1));
                hl
            }
        }
    }

    pub(in crate::cpu) fn exec_ld_indirect_a<B: Bus>(&mut self, bus: &mut B, opcode: u8) -> u32 {
        debug_assert!(matches!(opcode, 0x02 | 0x12 | 0x22 | 0x32));

        let addr = self.indirect_addr(opcode);
        bus.write8(addr, self.regs.a);
        8
    }

    pub(in crate::cpu) fn exec_ld_a_indirect<B: Bus>(&mut self, bus: &mut B, opcode: u8) -> u32 {
        debug_assert!(matches!(opcode, 0x0A | 0x1A | 0x2A | 0x3A));

        let addr = self.indirect_addr(opcode);
        self.regs.a = bus.read8(addr);
        8
    }

    /// LD r,r' for 0x40..=0x7F. 0x76 (HALT) is routed elsewhere.
    pub(in crate::cpu) fn exec_ld_r_r<B: Bus>(&mut self, bus: &mut B, opcode: u8) -> u32 {
        debug_assert!((0x40..=0x7F).contains(&opcode) && opcode != 0x76);

        let dst = Reg8::from_bits(opcode >> 3);
        let src = Reg8::from_bits(opcode);
        let value = self.read_reg8(bus, src);
        self.write_reg8(bus, dst, value);

        if dst == Reg8::HlMem || src == Reg8::HlMem { 8 } else { 4 }
    }

    pub(in crate::cpu) fn exec_ld_sp_hl(&mut self) -> u32 {
        self.regs.sp = self.regs.hl();
        8
    }

    pub(in crate::cpu) fn exec_ld_hl_sp_r8<B: Bus>(&mut self, bus: &mut B) -> u32 {
        let imm = self.fetch8(bus);
        let result = self.alu_add16_signed(self.regs.sp, imm);
        self.regs.set_hl(result);
        12
    }
}

use crate::cpu::{Bus, Cpu, Flag, Reg16, Reg8};

impl Cpu {
    /// Apply one of the eight A-register operations selected by bits 5:3.
    fn alu_dispatch(&mut self, operation: u8, value: u8) {
        match operation & 0x07 {
            0 => self.alu_add(value, false),
            1 => self.alu_add(value, true),
            2 => self.alu_sub(value, false),
            3 => self.alu_sub(value, true),
            4 => self.alu_and(value),
            5 => self.alu_xor(value),
            6 => self.alu_or(value),
            _ => self.alu_cp(value),
        }
    }

    /// ADD/ADC/SUB/SBC/AND/XOR/OR/CP A,r for 0x80..=0xBF.
    pub(in crate::cpu) fn exec_alu_reg<B: Bus>(&mut self, bus: &mut B, opcode: u8) -> u32 {
        debug_assert!((0x80..=0xBF).contains(&opcode));

        let src = Reg8::from_bits(opcode);
        let value = self.read_reg8(bus, src);
        self.alu_dispatch(opcode >> 3, value);

        if src == Reg8::HlMem { 8 } else { 4 }
    }

    /// Same operations with an immediate operand (0xC6, 0xCE, .., 0xFE).
    pub(in crate::cpu) fn exec_alu_imm<B: Bus>(&mut self, bus: &mut B, opcode: u8) -> u32 {
        let value = self.fetch8(bus);
        self.alu_dispatch(opcode >> 3, value);
        8
    }

    /// RLCA / RRCA / RLA / RRA. Unlike the CB forms, Z is always cleared.
    pub(in crate::cpu) fn exec_rotate_a(&mut self, opcode: u8) -> u32 {
        debug_assert!(matches!(opcode, 0x07 | 0x0F | 0x17 | 0x1F));

        let a = self.regs.a;
        let carry_in = self.get_flag(Flag::C) as u8;
        let (result, carry_out) = match opcode {
            0x07 => (a.rotate_left(1), a & 0x80 != 0),
            0x0F => (a.rotate_right(1), a & 0x01 != 0),
            0x17 => ((a << 1) | carry_in, a & 0x80 != 0),
            _ => ((a >> 1) | (carry_in << 7), a & 0x01 != 0),
        };

        self.regs.a = result;
        self.clear_flags();
        self.set_flag(Flag::C, carry_out);
        4
    }

    pub(in crate::cpu) fn exec_add_hl_rr(&mut self, opcode: u8) -> u32 {
        debug_assert!(matches!(opcode, 0x09 | 0x19 | 0x29 | 0x39));

        let value = self.regs.get16(Reg16::from_rp(opcode >> 4));
        self.alu_add16_hl(value);
        8
    }

    pub(in crate::cpu) fn exec_add_sp_r8<B: Bus>(&mut self, bus: &mut B) -> u32 {
        let imm = self.fetch8(bus);
        self.regs.sp = self.alu_add16_signed(self.regs.sp, imm);
        16
    }

    pub(in crate::cpu) fn exec_daa(&mut self) -> u32 {
        self.alu_daa();
        4
    }

    pub(in crate::cpu) fn exec_cpl(&mut self) -> u32 {
        self.regs.a = !self.regs.a;
        self.set_flag(Flag::H, true);
        self.set_flag(Flag::N, true);
        4
    }

    pub(in crate::cpu) fn exec_scf(&mut self) -> u32 {
        self.set_flag(Flag::C, true);
        self.set_flag(Flag::H, false);
        self.set_flag(Flag::N, false);
        4
    }

    pub(in crate::cpu) fn exec_ccf(&mut self) -> u32 {
        let carry = self.get_flag(Flag::C);
        self.set_flag(Flag::C, !carry);
        self.set_flag(Flag::H, false);
        self.set_flag(Flag::N, false);
        4
    }
}

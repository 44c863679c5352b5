use super::{Bus, Cpu, Flag, Reg8};

/// Handlers for the 0xCB-prefixed page.
///
/// Opcode layout is `xx yyy zzz`: `x` selects the group, `y` the shift kind
/// or bit number and `z` the operand.
impl Cpu {
    /// Fetch the second opcode byte and run it through the CB table.
    pub(super) fn exec_prefix_cb<B: Bus>(&mut self, bus: &mut B) -> u32 {
        let cb = self.fetch8(bus);
        super::OpTables::<B>::PREFIXED[cb as usize](self, bus, cb)
    }

    /// RLC/RRC/RL/RR/SLA/SRA/SWAP/SRL r for 0x00..=0x3F.
    pub(super) fn exec_cb_shift<B: Bus>(&mut self, bus: &mut B, cb: u8) -> u32 {
        let reg = Reg8::from_bits(cb);
        let value = self.read_reg8(bus, reg);
        let carry_in = self.get_flag(Flag::C) as u8;

        let (result, carry) = match (cb >> 3) & 0x07 {
            0 => (value.rotate_left(1), value & 0x80 != 0),
            1 => (value.rotate_right(1), value & 0x01 != 0),
            2 => ((value << 1) | carry_in, value & 0x80 != 0),
            3 => ((value >> 1) | (carry_in << 7), value & 0x01 != 0),
            4 => (value << 1, value & 0x80 != 0),
            5 => ((value >> 1) | (value & 0x80), value & 0x01 != 0),
            6 => (value.rotate_left(4), false),
            _ => (value >> 1, value & 0x01 != 0),
        };

        self.clear_flags();
        self.set_flag(Flag::Z, result == 0);
        self.set_flag(Flag::C, carry);
        self.write_reg8(bus, reg, result);

        if reg == Reg8::HlMem { 16 } else { 8 }
    }

    /// BIT b,r: Z reflects the tested bit, H is set, C is preserved.
    pub(super) fn exec_cb_bit<B: Bus>(&mut self, bus: &mut B, cb: u8) -> u32 {
        let reg = Reg8::from_bits(cb);
        let bit = (cb >> 3) & 0x07;
        let value = self.read_reg8(bus, reg);

        self.set_flag(Flag::Z, value & (1 << bit) == 0);
        self.set_flag(Flag::N, false);
        self.set_flag(Flag::H, true);

        if reg == Reg8::HlMem { 12 } else { 8 }
    }

    pub(super) fn exec_cb_res<B: Bus>(&mut self, bus: &mut B, cb: u8) -> u32 {
        let reg = Reg8::from_bits(cb);
        let bit = (cb >> 3) & 0x07;
        let value = self.read_reg8(bus, reg) & !(1 << bit);
        self.write_reg8(bus, reg, value);

        if reg == Reg8::HlMem { 16 } else { 8 }
    }

    pub(super) fn exec_cb_set<B: Bus>(&mut self, bus: &mut B, cb: u8) -> u32 {
        let reg = Reg8::from_bits(cb);
        let bit = (cb >> 3) & 0x07;
        let value = self.read_reg8(bus, reg) | (1 << bit);
        self.write_reg8(bus, reg, value);

        if reg == Reg8::HlMem { 16 } else { 8 }
    }
}

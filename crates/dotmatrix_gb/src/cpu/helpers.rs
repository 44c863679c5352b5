use super::{Bus, Cpu, Reg8};

impl Cpu {
    /// Read an 8-bit register, or the byte at (HL) for [`Reg8::HlMem`].
    #[inline]
    pub(super) fn read_reg8<B: Bus>(&mut self, bus: &mut B, reg: Reg8) -> u8 {
        match reg {
            Reg8::B => self.regs.b,
            Reg8::C => self.regs.c,
            Reg8::D => self.regs.d,
            Reg8::E => self.regs.e,
            Reg8::H => self.regs.h,
            Reg8::L => self.regs.l,
            Reg8::HlMem => bus.read8(self.regs.hl()),
            Reg8::A => self.regs.a,
        }
    }

    #[inline]
    pub(super) fn write_reg8<B: Bus>(&mut self, bus: &mut B, reg: Reg8, value: u8) {
        match reg {
            Reg8::B => self.regs.b = value,
            Reg8::C => self.regs.c = value,
            Reg8::D => self.regs.d = value,
            Reg8::E => self.regs.e = value,
            Reg8::H => self.regs.h = value,
            Reg8::L => self.regs.l = value,
            Reg8::HlMem => bus.write8(self.regs.hl(), value),
            Reg8::A => self.regs.a = value,
        }
    }

    #[inline]
    pub(super) fn fetch8<B: Bus>(&mut self, bus: &mut B) -> u8 {
        let value = bus.read8(self.regs.pc);
        self.regs.pc = self.regs.pc.wrapping_add(1);
        value
    }

    #[inline]
    pub(super) fn fetch16<B: Bus>(&mut self, bus: &mut B) -> u16 {
        let lo = self.fetch8(bus);
        let hi = self.fetch8(bus);
        u16::from_le_bytes([lo, hi])
    }

    /// SP -= 2, then store `value` little-endian at the new SP.
    #[inline]
    pub(super) fn push_u16<B: Bus>(&mut self, bus: &mut B, value: u16) {
        self.regs.sp = self.regs.sp.wrapping_sub(2);
        bus.write16(self.regs.sp, value);
    }

    #[inline]
    pub(super) fn pop_u16<B: Bus>(&mut self, bus: &mut B) -> u16 {
        let value = bus.read16(self.regs.sp);
        self.regs.sp = self.regs.sp.wrapping_add(2);
        value
    }

    /// JR / JR cc. The signed offset is taken from the PC after the operand.
    pub(super) fn jr<B: Bus>(&mut self, bus: &mut B, cond: bool) -> u32 {
        let offset = self.fetch8(bus) as i8;
        if cond {
            self.regs.pc = self.regs.pc.wrapping_add_signed(offset as i16);
            12
        } else {
            8
        }
    }

    /// JP a16 / JP cc,a16: 16 ticks taken, 12 not taken.
    pub(super) fn jp_cond<B: Bus>(&mut self, bus: &mut B, cond: bool) -> u32 {
        let addr = self.fetch16(bus);
        if cond {
            self.regs.pc = addr;
            16
        } else {
            12
        }
    }

    /// CALL a16 / CALL cc,a16: 24 ticks taken, 12 not taken.
    pub(super) fn call_cond<B: Bus>(&mut self, bus: &mut B, cond: bool) -> u32 {
        let addr = self.fetch16(bus);
        if cond {
            let ret = self.regs.pc;
            self.push_u16(bus, ret);
            self.regs.pc = addr;
            24
        } else {
            12
        }
    }

    pub(super) fn ret_cond<B: Bus>(&mut self, bus: &mut B, cond: bool) -> u32 {
        if cond {
            self.regs.pc = self.pop_u16(bus);
            20
        } else {
            8
        }
    }
}

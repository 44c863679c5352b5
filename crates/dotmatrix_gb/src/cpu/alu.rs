use super::{Cpu, Flag};

/// Carry out of the top bit of `mask` when adding `a + b`.
///
/// `mask` has the N+1 low bits set for a carry out of bit N, so
/// `0x0F` yields the half carry and `0xFF` the full carry of an 8-bit add.
#[inline]
pub(super) const fn carries(a: u16, b: u16, mask: u16) -> bool {
    (a & mask) + (b & mask) > mask
}

/// Borrow into the top bit of `mask` when computing `a - b`.
#[inline]
pub(super) const fn borrows(a: u8, b: u8, mask: u8) -> bool {
    (a & mask) < (b & mask)
}

impl Cpu {
    /// ADD/ADC on A.
    ///
    /// For ADC the incoming carry is first added to the operand; H and C
    /// are the union of the carries produced by both additions.
    pub(super) fn alu_add(&mut self, value: u8, use_carry: bool) {
        let carry_in = (use_carry && self.get_flag(Flag::C)) as u8;
        let a = self.regs.a;

        let operand = value.wrapping_add(carry_in);
        let mut half = carries(value as u16, carry_in as u16, 0x0F);
        let mut carry = carries(value as u16, carry_in as u16, 0xFF);
        half |= carries(a as u16, operand as u16, 0x0F);
        carry |= carries(a as u16, operand as u16, 0xFF);

        let result = a.wrapping_add(operand);
        self.regs.a = result;

        self.set_flag(Flag::Z, result == 0);
        self.set_flag(Flag::N, false);
        self.set_flag(Flag::H, half);
        self.set_flag(Flag::C, carry);
    }

    /// SUB/SBC on A, mirroring [`Cpu::alu_add`] for the borrow chain.
    pub(super) fn alu_sub(&mut self, value: u8, use_carry: bool) {
        let result = self.sub_flags(value, use_carry);
        self.regs.a = result;
    }

    /// Compare A with `value`, setting flags as if `A - value` was performed.
    /// A itself is not modified.
    #[inline]
    pub(super) fn alu_cp(&mut self, value: u8) {
        self.sub_flags(value, false);
    }

    fn sub_flags(&mut self, value: u8, use_carry: bool) -> u8 {
        let carry_in = (use_carry && self.get_flag(Flag::C)) as u8;
        let a = self.regs.a;

        let operand = value.wrapping_add(carry_in);
        let mut half = carries(value as u16, carry_in as u16, 0x0F);
        let mut borrow = carries(value as u16, carry_in as u16, 0xFF);
        half |= borrows(a, operand, 0x0F);
        borrow |= borrows(a, operand, 0xFF);

        let result = a.wrapping_sub(operand);
        self.set_flag(Flag::Z, result == 0);
        self.set_flag(Flag::N, true);
        self.set_flag(Flag::H, half);
        self.set_flag(Flag::C, borrow);
        result
    }

    #[inline]
    pub(super) fn alu_and(&mut self, value: u8) {
        self.regs.a &= value;
        self.clear_flags();
        self.set_flag(Flag::Z, self.regs.a == 0);
        self.set_flag(Flag::H, true);
    }

    #[inline]
    pub(super) fn alu_or(&mut self, value: u8) {
        self.regs.a |= value;
        self.clear_flags();
        self.set_flag(Flag::Z, self.regs.a == 0);
    }

    #[inline]
    pub(super) fn alu_xor(&mut self, value: u8) {
        self.regs.a ^= value;
        self.clear_flags();
        self.set_flag(Flag::Z, self.regs.a == 0);
    }

    /// Decimal adjust accumulator after a BCD addition or subtraction.
    ///
    /// After a subtraction only the corrections flagged by C and H are
    /// undone. After an addition a correction is also applied whenever a
    /// digit left the BCD range, and C is set if the high digit overflowed.
    /// N is preserved, H always ends up clear.
    pub(super) fn alu_daa(&mut self) {
        let mut a = self.regs.a;

        if self.get_flag(Flag::N) {
            if self.get_flag(Flag::C) {
                a = a.wrapping_sub(0x60);
            }
            if self.get_flag(Flag::H) {
                a = a.wrapping_sub(0x06);
            }
        } else {
            if self.get_flag(Flag::C) || a > 0x99 {
                a = a.wrapping_add(0x60);
                self.set_flag(Flag::C, true);
            }
            if self.get_flag(Flag::H) || (a & 0x0F) > 0x09 {
                a = a.wrapping_add(0x06);
            }
        }

        self.regs.a = a;
        self.set_flag(Flag::Z, a == 0);
        self.set_flag(Flag::H, false);
    }

    /// 8-bit increment helper used by INC r and INC (HL). C is untouched.
    #[inline]
    pub(super) fn alu_inc8(&mut self, value: u8) -> u8 {
        let result = value.wrapping_add(1);
        self.set_flag(Flag::Z, result == 0);
        self.set_flag(Flag::N, false);
        self.set_flag(Flag::H, carries(value as u16, 1, 0x0F));
        result
    }

    /// 8-bit decrement helper used by DEC r and DEC (HL). C is untouched.
    #[inline]
    pub(super) fn alu_dec8(&mut self, value: u8) -> u8 {
        let result = value.wrapping_sub(1);
        self.set_flag(Flag::Z, result == 0);
        self.set_flag(Flag::N, true);
        self.set_flag(Flag::H, borrows(value, 1, 0x0F));
        result
    }

    /// `ADD HL,rr`: Z is unaffected, H from bit 11 and C from bit 15.
    #[inline]
    pub(super) fn alu_add16_hl(&mut self, value: u16) {
        let hl = self.regs.hl();

        self.set_flag(Flag::N, false);
        self.set_flag(Flag::H, carries(hl, value, 0x0FFF));
        self.set_flag(Flag::C, (hl as u32) + (value as u32) > 0xFFFF);

        self.regs.set_hl(hl.wrapping_add(value));
    }

    /// Signed 8-bit offset added to a 16-bit base (ADD SP,e and LD HL,SP+e).
    ///
    /// The offset is sign-extended; H and C come from bits 3 and 7 of the
    /// low byte, Z and N are cleared.
    #[inline]
    pub(super) fn alu_add16_signed(&mut self, base: u16, imm8: u8) -> u16 {
        let offset = imm8 as i8 as i16 as u16;
        self.set_flag(Flag::Z, false);
        self.set_flag(Flag::N, false);
        self.set_flag(Flag::H, carries(base, offset, 0x000F));
        self.set_flag(Flag::C, carries(base, offset, 0x00FF));
        base.wrapping_add(offset)
    }
}

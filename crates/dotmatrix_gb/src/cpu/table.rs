//! Opcode dispatch tables.
//!
//! One 256-entry table for the unprefixed page and one for the CB page.
//! Every entry receives the opcode byte that selected it so grouped
//! handlers (LD r,r', ALU A,r, BIT b,r, ...) can decode their operands.

use std::marker::PhantomData;

use super::{Bus, Cpu};

pub(super) type OpHandler<B> = fn(&mut Cpu, &mut B, u8) -> u32;

pub(super) struct OpTables<B>(PhantomData<B>);

fn invalid<B: Bus>(cpu: &mut Cpu, _bus: &mut B, opcode: u8) -> u32 {
    cpu.exec_invalid(opcode)
}

impl<B: Bus> OpTables<B> {
    pub(super) const UNPREFIXED: [OpHandler<B>; 256] = {
        // Opcode holes D3 DB DD E3 E4 EB EC ED F4 FC FD stay `invalid`.
        let mut t = [invalid::<B> as OpHandler<B>; 256];

        t[0x00] = |_, _, _| 4;
        t[0x08] = |cpu, bus, _| cpu.exec_ld_a16_sp(bus);
        t[0x10] = |cpu, bus, _| cpu.exec_stop(bus);
        t[0x18] = |cpu, bus, _| cpu.exec_jr(bus);
        t[0x27] = |cpu, _, _| cpu.exec_daa();
        t[0x2F] = |cpu, _, _| cpu.exec_cpl();
        t[0x37] = |cpu, _, _| cpu.exec_scf();
        t[0x3F] = |cpu, _, _| cpu.exec_ccf();
        t[0x76] = |cpu, _, _| cpu.exec_halt();

        let mut i = 0;
        while i < 4 {
            let row = i << 4;
            t[row | 0x01] = Cpu::exec_ld_rr_d16::<B>;
            t[row | 0x02] = Cpu::exec_ld_indirect_a::<B>;
            t[row | 0x03] = |cpu, _, op| cpu.exec_inc16(op);
            t[row | 0x09] = |cpu, _, op| cpu.exec_add_hl_rr(op);
            t[row | 0x0A] = Cpu::exec_ld_a_indirect::<B>;
            t[row | 0x0B] = |cpu, _, op| cpu.exec_dec16(op);
            t[0xC1 | row] = Cpu::exec_pop::<B>;
            t[0xC5 | row] = Cpu::exec_push::<B>;
            // JR/JP/CALL/RET cc: NZ, Z, NC, C.
            t[0x20 | (i << 3)] = Cpu::exec_jr_cc::<B>;
            t[0xC0 | (i << 3)] = Cpu::exec_ret_cc::<B>;
            t[0xC2 | (i << 3)] = Cpu::exec_jp_cc::<B>;
            t[0xC4 | (i << 3)] = Cpu::exec_call_cc::<B>;
            i += 1;
        }

        t[0x07] = |cpu, _, op| cpu.exec_rotate_a(op);
        t[0x0F] = |cpu, _, op| cpu.exec_rotate_a(op);
        t[0x17] = |cpu, _, op| cpu.exec_rotate_a(op);
        t[0x1F] = |cpu, _, op| cpu.exec_rotate_a(op);

        let mut r = 0;
        while r < 8 {
            let y = r << 3;
            t[0x04 | y] = Cpu::exec_inc8::<B>;
            t[0x05 | y] = Cpu::exec_dec8::<B>;
            t[0x06 | y] = Cpu::exec_ld_r_d8::<B>;
            t[0xC6 | y] = Cpu::exec_alu_imm::<B>;
            t[0xC7 | y] = Cpu::exec_rst::<B>;
            r += 1;
        }

        let mut op = 0x40;
        while op < 0x80 {
            if op != 0x76 {
                t[op] = Cpu::exec_ld_r_r::<B>;
            }
            op += 1;
        }
        while op < 0xC0 {
            t[op] = Cpu::exec_alu_reg::<B>;
            op += 1;
        }

        t[0xC3] = |cpu, bus, _| cpu.exec_jp_a16(bus);
        t[0xC9] = |cpu, bus, _| cpu.exec_ret(bus);
        t[0xCB] = |cpu, bus, _| cpu.exec_prefix_cb(bus);
        t[0xCD] = |cpu, bus, _| cpu.exec_call_a16(bus);
        t[0xD9] = |cpu, bus, _| cpu.exec_reti(bus);
        t[0xE0] = Cpu::exec_ldh_a8::<B>;
        t[0xF0] = Cpu::exec_ldh_a8::<B>;
        t[0xE2] = Cpu::exec_ldh_c::<B>;
        t[0xF2] = Cpu::exec_ldh_c::<B>;
        t[0xE8] = |cpu, bus, _| cpu.exec_add_sp_r8(bus);
        t[0xE9] = |cpu, _, _| cpu.exec_jp_hl();
        t[0xEA] = Cpu::exec_ld_a16_a::<B>;
        t[0xFA] = Cpu::exec_ld_a16_a::<B>;
        t[0xF3] = |cpu, _, _| cpu.exec_di();
        t[0xF8] = |cpu, bus, _| cpu.exec_ld_hl_sp_r8(bus);
        t[0xF9] = |cpu, _, _| cpu.exec_ld_sp_hl();
        t[0xFB] = |cpu, _, _| cpu.exec_ei();

        t
    };

    pub(super) const PREFIXED: [OpHandler<B>; 256] = {
        let mut t = [Cpu::exec_cb_shift::<B> as OpHandler<B>; 256];

        let mut op = 0x40;
        while op < 0x80 {
            t[op] = Cpu::exec_cb_bit::<B>;
            t[op + 0x40] = Cpu::exec_cb_res::<B>;
            t[op + 0x80] = Cpu::exec_cb_set::<B>;
            op += 1;
        }

        t
    };
}

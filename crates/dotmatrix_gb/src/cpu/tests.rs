use super::*;

struct TestBus {
    memory: [u8; 0x10000],
}

impl Default for TestBus {
    fn default() -> Self {
        Self {
            memory: [0; 0x10000],
        }
    }
}

impl Bus for TestBus {
    fn read8(&mut self, addr: u16) -> u8 {
        self.memory[addr as usize]
    }

    fn write8(&mut self, addr: u16, value: u8) {
        self.memory[addr as usize] = value;
    }
}

impl TestBus {
    /// Place `program` at `origin`.
    fn load(&mut self, origin: u16, program: &[u8]) {
        let start = origin as usize;
        self.memory[start..start + program.len()].copy_from_slice(program);
    }
}

/// CPU with PC at 0x0000 and a program loaded there.
fn setup(program: &[u8]) -> (Cpu, TestBus) {
    let mut cpu = Cpu::new();
    cpu.regs.pc = 0x0000;
    let mut bus = TestBus::default();
    bus.load(0x0000, program);
    (cpu, bus)
}

#[test]
fn reset_matches_post_boot_state() {
    let cpu = Cpu::new();
    assert_eq!(cpu.regs.pc, 0x0100);
    assert_eq!(cpu.regs.af(), 0x01B0);
    assert_eq!(cpu.regs.bc(), 0x0013);
    assert_eq!(cpu.regs.de(), 0x00D8);
    assert_eq!(cpu.regs.hl(), 0x014D);
    assert_eq!(cpu.regs.sp, 0xFFFE);
    assert!(!cpu.ime);
    assert!(!cpu.halted);

    let mut booting = Cpu::new();
    booting.reset(true);
    assert_eq!(booting.regs.pc, 0x0000);
}

#[test]
fn af_low_nibble_always_reads_zero() {
    let mut regs = Registers::default();
    regs.set_af(0x12FF);
    assert_eq!(regs.af(), 0x12F0);
    assert_eq!(regs.f, 0xF0);
}

#[test]
fn nop_advances_pc() {
    let (mut cpu, mut bus) = setup(&[0x00]);
    let cycles = cpu.step(&mut bus);
    assert_eq!(cycles, 4);
    assert_eq!(cpu.regs.pc, 0x0001);
}

#[test]
fn jp_a16_sets_pc_and_costs_16() {
    let mut cpu = Cpu::new();
    let mut bus = TestBus::default();
    bus.load(0x0100, &[0xC3, 0x50, 0x01]);

    let cycles = cpu.step(&mut bus);
    assert_eq!(cycles, 16);
    assert_eq!(cpu.regs.pc, 0x0150);
}

#[test]
fn add_a_a_sets_half_carry_only() {
    // LD A,0x0F ; ADD A,A
    let (mut cpu, mut bus) = setup(&[0x3E, 0x0F, 0x87]);
    cpu.step(&mut bus);
    let cycles = cpu.step(&mut bus);

    assert_eq!(cycles, 4);
    assert_eq!(cpu.regs.a, 0x1E);
    assert!(cpu.get_flag(Flag::H));
    assert!(!cpu.get_flag(Flag::C));
    assert!(!cpu.get_flag(Flag::Z));
    assert!(!cpu.get_flag(Flag::N));
}

#[test]
fn daa_corrects_bcd_addition() {
    // LD A,0x45 ; ADD A,0x38 ; DAA
    let (mut cpu, mut bus) = setup(&[0x3E, 0x45, 0xC6, 0x38, 0x27]);
    cpu.step(&mut bus);
    cpu.step(&mut bus);
    assert_eq!(cpu.regs.a, 0x7D);
    assert!(!cpu.get_flag(Flag::N));

    cpu.step(&mut bus);
    assert_eq!(cpu.regs.a, 0x83);
    assert!(!cpu.get_flag(Flag::H));
    assert!(!cpu.get_flag(Flag::C));
    assert!(!cpu.get_flag(Flag::Z));
}

#[test]
fn daa_after_subtraction_and_carry_out() {
    // LD A,0x10 ; SUB 0x01 ; DAA  => 0x09 in BCD
    let (mut cpu, mut bus) = setup(&[0x3E, 0x10, 0xD6, 0x01, 0x27]);
    for _ in 0..3 {
        cpu.step(&mut bus);
    }
    assert_eq!(cpu.regs.a, 0x09);
    assert!(cpu.get_flag(Flag::N));

    // LD A,0x99 ; ADD A,0x01 ; DAA  => 0x00 with carry
    let (mut cpu, mut bus) = setup(&[0x3E, 0x99, 0xC6, 0x01, 0x27]);
    for _ in 0..3 {
        cpu.step(&mut bus);
    }
    assert_eq!(cpu.regs.a, 0x00);
    assert!(cpu.get_flag(Flag::C));
    assert!(cpu.get_flag(Flag::Z));
}

#[test]
fn adc_and_sbc_fold_carry_into_flags() {
    // SCF ; LD A,0x0F ; ADC A,0x00
    let (mut cpu, mut bus) = setup(&[0x37, 0x3E, 0x0F, 0xCE, 0x00]);
    for _ in 0..3 {
        cpu.step(&mut bus);
    }
    assert_eq!(cpu.regs.a, 0x10);
    assert!(cpu.get_flag(Flag::H));
    assert!(!cpu.get_flag(Flag::C));

    // SCF ; LD A,0x00 ; SBC A,0xFF  => 0x00 - 0xFF - 1 = 0x00 with borrow
    let (mut cpu, mut bus) = setup(&[0x37, 0x3E, 0x00, 0xDE, 0xFF]);
    for _ in 0..3 {
        cpu.step(&mut bus);
    }
    assert_eq!(cpu.regs.a, 0x00);
    assert!(cpu.get_flag(Flag::Z));
    assert!(cpu.get_flag(Flag::N));
    assert!(cpu.get_flag(Flag::H));
    assert!(cpu.get_flag(Flag::C));
}

#[test]
fn cp_leaves_a_untouched() {
    // LD A,0x3C ; CP 0x40
    let (mut cpu, mut bus) = setup(&[0x3E, 0x3C, 0xFE, 0x40]);
    cpu.step(&mut bus);
    cpu.step(&mut bus);
    assert_eq!(cpu.regs.a, 0x3C);
    assert!(cpu.get_flag(Flag::C));
    assert!(!cpu.get_flag(Flag::H));
    assert!(cpu.get_flag(Flag::N));
}

#[test]
fn ld_16bit_and_indirect_forms() {
    // LD BC,0x1234 ; LD A,0x56 ; LD (BC),A ; LD HL,0xC000 ; LD (HL+),A ; LD (HL-),A
    let (mut cpu, mut bus) = setup(&[
        0x01, 0x34, 0x12, 0x3E, 0x56, 0x02, 0x21, 0x00, 0xC0, 0x22, 0x32,
    ]);
    assert_eq!(cpu.step(&mut bus), 12);
    assert_eq!(cpu.regs.bc(), 0x1234);
    cpu.step(&mut bus);
    assert_eq!(cpu.step(&mut bus), 8);
    assert_eq!(bus.memory[0x1234], 0x56);

    cpu.step(&mut bus);
    cpu.step(&mut bus);
    assert_eq!(bus.memory[0xC000], 0x56);
    assert_eq!(cpu.regs.hl(), 0xC001);
    cpu.step(&mut bus);
    assert_eq!(bus.memory[0xC001], 0x56);
    assert_eq!(cpu.regs.hl(), 0xC000);
}

#[test]
fn ld_r_r_through_hl_costs_8() {
    // LD HL,0xC010 ; LD (HL),0x99 ; LD B,(HL) ; LD C,B
    let (mut cpu, mut bus) = setup(&[0x21, 0x10, 0xC0, 0x36, 0x99, 0x46, 0x48]);
    cpu.step(&mut bus);
    assert_eq!(cpu.step(&mut bus), 12);
    assert_eq!(cpu.step(&mut bus), 8);
    assert_eq!(cpu.regs.b, 0x99);
    assert_eq!(cpu.step(&mut bus), 4);
    assert_eq!(cpu.regs.c, 0x99);
}

#[test]
fn ld_a16_sp_stores_little_endian() {
    // LD SP,0xBEEF ; LD (0xC100),SP
    let (mut cpu, mut bus) = setup(&[0x31, 0xEF, 0xBE, 0x08, 0x00, 0xC1]);
    cpu.step(&mut bus);
    assert_eq!(cpu.step(&mut bus), 20);
    assert_eq!(bus.memory[0xC100], 0xEF);
    assert_eq!(bus.memory[0xC101], 0xBE);
}

#[test]
fn push_pop_round_trip_and_pop_af_masks_flags() {
    // LD BC,0x12FF ; PUSH BC ; POP AF
    let (mut cpu, mut bus) = setup(&[0x01, 0xFF, 0x12, 0xC5, 0xF1]);
    cpu.regs.sp = 0xD000;
    cpu.step(&mut bus);
    assert_eq!(cpu.step(&mut bus), 16);
    assert_eq!(cpu.regs.sp, 0xCFFE);
    assert_eq!(bus.memory[0xCFFE], 0xFF);
    assert_eq!(bus.memory[0xCFFF], 0x12);

    assert_eq!(cpu.step(&mut bus), 12);
    assert_eq!(cpu.regs.sp, 0xD000);
    assert_eq!(cpu.regs.af(), 0x12F0);
}

#[test]
fn call_and_ret_use_the_stack() {
    let (mut cpu, mut bus) = setup(&[0xCD, 0x00, 0x20]);
    bus.memory[0x2000] = 0xC9; // RET
    cpu.regs.sp = 0xFFFE;

    assert_eq!(cpu.step(&mut bus), 24);
    assert_eq!(cpu.regs.pc, 0x2000);
    assert_eq!(cpu.regs.sp, 0xFFFC);
    assert_eq!(bus.memory[0xFFFC], 0x03);
    assert_eq!(bus.memory[0xFFFD], 0x00);

    assert_eq!(cpu.step(&mut bus), 16);
    assert_eq!(cpu.regs.pc, 0x0003);
    assert_eq!(cpu.regs.sp, 0xFFFE);
}

#[test]
fn conditional_branches_cost_less_when_not_taken() {
    // XOR A (Z=1) ; JR NZ,+5 ; JR Z,+2
    let (mut cpu, mut bus) = setup(&[0xAF, 0x20, 0x05, 0x28, 0x02]);
    cpu.step(&mut bus);
    assert_eq!(cpu.step(&mut bus), 8);
    assert_eq!(cpu.regs.pc, 0x0003);
    assert_eq!(cpu.step(&mut bus), 12);
    assert_eq!(cpu.regs.pc, 0x0007);

    // JP NC taken / CALL C skipped / RET NC taken
    let (mut cpu, mut bus) = setup(&[0xD2, 0x00, 0x30]);
    bus.load(0x3000, &[0xDC, 0x00, 0x40, 0xD0]);
    bus.load(0xFFF0, &[0x34, 0x12]);
    cpu.regs.sp = 0xFFF0;
    cpu.regs.f = 0;
    assert_eq!(cpu.step(&mut bus), 16);
    assert_eq!(cpu.regs.pc, 0x3000);
    assert_eq!(cpu.step(&mut bus), 12);
    assert_eq!(cpu.regs.pc, 0x3003);
    assert_eq!(cpu.step(&mut bus), 20);
    assert_eq!(cpu.regs.pc, 0x1234);
}

#[test]
fn jr_backwards_wraps_through_signed_offset() {
    let mut cpu = Cpu::new();
    let mut bus = TestBus::default();
    cpu.regs.pc = 0x0200;
    bus.load(0x0200, &[0x18, 0xFE]); // JR -2: tight loop

    assert_eq!(cpu.step(&mut bus), 12);
    assert_eq!(cpu.regs.pc, 0x0200);
}

#[test]
fn rst_pushes_and_jumps_to_fixed_target() {
    let (mut cpu, mut bus) = setup(&[0xEF]); // RST 0x28
    cpu.regs.sp = 0xD000;
    assert_eq!(cpu.step(&mut bus), 16);
    assert_eq!(cpu.regs.pc, 0x0028);
    assert_eq!(bus.memory[0xCFFE], 0x01);
}

#[test]
fn inc_dec_preserve_carry() {
    // SCF ; LD B,0xFF ; INC B ; DEC B
    let (mut cpu, mut bus) = setup(&[0x37, 0x06, 0xFF, 0x04, 0x05]);
    cpu.step(&mut bus);
    cpu.step(&mut bus);
    cpu.step(&mut bus);
    assert_eq!(cpu.regs.b, 0x00);
    assert!(cpu.get_flag(Flag::Z));
    assert!(cpu.get_flag(Flag::H));
    assert!(cpu.get_flag(Flag::C));

    cpu.step(&mut bus);
    assert_eq!(cpu.regs.b, 0xFF);
    assert!(cpu.get_flag(Flag::N));
    assert!(cpu.get_flag(Flag::H));
    assert!(cpu.get_flag(Flag::C));
}

#[test]
fn inc_hl_memory_costs_12() {
    // LD HL,0xC000 ; INC (HL) ; INC HL
    let (mut cpu, mut bus) = setup(&[0x21, 0x00, 0xC0, 0x34, 0x23]);
    bus.memory[0xC000] = 0x0F;
    cpu.step(&mut bus);
    assert_eq!(cpu.step(&mut bus), 12);
    assert_eq!(bus.memory[0xC000], 0x10);
    assert_eq!(cpu.step(&mut bus), 8);
    assert_eq!(cpu.regs.hl(), 0xC001);
}

#[test]
fn add_hl_uses_bit_11_and_15_carries() {
    // LD HL,0x0FFF ; LD BC,0x0001 ; ADD HL,BC
    let (mut cpu, mut bus) = setup(&[0x21, 0xFF, 0x0F, 0x01, 0x01, 0x00, 0x09]);
    cpu.regs.f = 0x80; // Z must survive
    cpu.step(&mut bus);
    cpu.step(&mut bus);
    assert_eq!(cpu.step(&mut bus), 8);
    assert_eq!(cpu.regs.hl(), 0x1000);
    assert!(cpu.get_flag(Flag::H));
    assert!(!cpu.get_flag(Flag::C));
    assert!(cpu.get_flag(Flag::Z));
}

#[test]
fn add_sp_and_ld_hl_sp_use_low_byte_carries() {
    // LD SP,0x00FF ; ADD SP,+1 ; LD HL,SP-1
    let (mut cpu, mut bus) = setup(&[0x31, 0xFF, 0x00, 0xE8, 0x01, 0xF8, 0xFF]);
    cpu.step(&mut bus);
    assert_eq!(cpu.step(&mut bus), 16);
    assert_eq!(cpu.regs.sp, 0x0100);
    assert!(cpu.get_flag(Flag::H));
    assert!(cpu.get_flag(Flag::C));
    assert!(!cpu.get_flag(Flag::Z));

    assert_eq!(cpu.step(&mut bus), 12);
    assert_eq!(cpu.regs.hl(), 0x00FF);
    assert!(!cpu.get_flag(Flag::H));
    assert!(!cpu.get_flag(Flag::C));
}

#[test]
fn rotate_a_always_clears_zero() {
    // XOR A ; RLCA
    let (mut cpu, mut bus) = setup(&[0xAF, 0x07]);
    cpu.step(&mut bus);
    cpu.step(&mut bus);
    assert_eq!(cpu.regs.a, 0);
    assert!(!cpu.get_flag(Flag::Z));

    // LD A,0x80 ; RLA ; RRA
    let (mut cpu, mut bus) = setup(&[0x3E, 0x80, 0x17, 0x1F]);
    cpu.regs.f = 0;
    cpu.step(&mut bus);
    cpu.step(&mut bus);
    assert_eq!(cpu.regs.a, 0x00);
    assert!(cpu.get_flag(Flag::C));
    cpu.step(&mut bus);
    assert_eq!(cpu.regs.a, 0x80);
    assert!(!cpu.get_flag(Flag::C));
}

#[test]
fn cb_shifts_rotates_and_swap() {
    // LD B,0x81 ; RLC B ; SRA B ; SWAP B ; SRL B
    let (mut cpu, mut bus) = setup(&[0x06, 0x81, 0xCB, 0x00, 0xCB, 0x28, 0xCB, 0x30, 0xCB, 0x38]);
    cpu.step(&mut bus);
    assert_eq!(cpu.step(&mut bus), 8);
    assert_eq!(cpu.regs.b, 0x03);
    assert!(cpu.get_flag(Flag::C));

    cpu.step(&mut bus);
    assert_eq!(cpu.regs.b, 0x01);
    assert!(cpu.get_flag(Flag::C));

    cpu.step(&mut bus);
    assert_eq!(cpu.regs.b, 0x10);
    assert!(!cpu.get_flag(Flag::C));

    cpu.step(&mut bus);
    assert_eq!(cpu.regs.b, 0x08);
    assert!(!cpu.get_flag(Flag::Z));
}

#[test]
fn cb_bit_res_set_on_hl_memory() {
    // LD HL,0xC000 ; BIT 7,(HL) ; SET 7,(HL) ; BIT 7,(HL) ; RES 0,(HL)
    let (mut cpu, mut bus) = setup(&[
        0x21, 0x00, 0xC0, 0xCB, 0x7E, 0xCB, 0xFE, 0xCB, 0x7E, 0xCB, 0x86,
    ]);
    bus.memory[0xC000] = 0x01;
    cpu.regs.f = 0x10; // carry preserved by BIT
    cpu.step(&mut bus);

    assert_eq!(cpu.step(&mut bus), 12);
    assert!(cpu.get_flag(Flag::Z));
    assert!(cpu.get_flag(Flag::H));
    assert!(cpu.get_flag(Flag::C));

    assert_eq!(cpu.step(&mut bus), 16);
    assert_eq!(bus.memory[0xC000], 0x81);
    cpu.step(&mut bus);
    assert!(!cpu.get_flag(Flag::Z));

    assert_eq!(cpu.step(&mut bus), 16);
    assert_eq!(bus.memory[0xC000], 0x80);
}

#[test]
fn stop_skips_padding_byte() {
    let (mut cpu, mut bus) = setup(&[0x10, 0x00, 0x00]);
    assert_eq!(cpu.step(&mut bus), 4);
    assert_eq!(cpu.regs.pc, 0x0002);
}

#[test]
fn invalid_opcode_locks_the_cpu() {
    let (mut cpu, mut bus) = setup(&[0xD3, 0x00]);
    assert_eq!(cpu.step(&mut bus), 0);
    assert!(cpu.is_locked());
    assert_eq!(cpu.step(&mut bus), 0);
    assert_eq!(cpu.regs.pc, 0x0001);
}

#[test]
fn every_unprefixed_opcode_outside_the_holes_executes() {
    const HOLES: [u8; 11] = [
        0xD3, 0xDB, 0xDD, 0xE3, 0xE4, 0xEB, 0xEC, 0xED, 0xF4, 0xFC, 0xFD,
    ];
    for opcode in 0..=0xFFu8 {
        let (mut cpu, mut bus) = setup(&[opcode, 0x00, 0x00]);
        cpu.regs.sp = 0xD000;
        let cycles = cpu.step(&mut bus);
        if HOLES.contains(&opcode) {
            assert_eq!(cycles, 0, "opcode {opcode:#04x}");
        } else {
            assert!(
                matches!(cycles, 4 | 8 | 12 | 16 | 20 | 24),
                "opcode {opcode:#04x} took {cycles}"
            );
        }
    }
}

#[test]
fn ei_takes_effect_after_the_next_instruction() {
    // EI ; NOP
    let (mut cpu, mut bus) = setup(&[0xFB, 0x00]);
    cpu.step(&mut bus);
    assert!(!cpu.ime);
    cpu.step(&mut bus);
    assert!(cpu.ime);
}

#[test]
fn reti_enables_ime_immediately() {
    let (mut cpu, mut bus) = setup(&[0xD9]);
    bus.load(0xD000, &[0x00, 0x30]);
    cpu.regs.sp = 0xD000;
    assert_eq!(cpu.step(&mut bus), 16);
    assert!(cpu.ime);
    assert_eq!(cpu.regs.pc, 0x3000);
}

#[test]
fn interrupt_priority_prefers_vblank() {
    let mut cpu = Cpu::new();
    let mut bus = TestBus::default();
    cpu.ime = true;
    cpu.regs.pc = 0x1234;
    cpu.regs.sp = 0xD000;
    bus.memory[IE_ADDR as usize] = 0x1F;
    bus.memory[IF_ADDR as usize] = (Interrupt::VBLANK | Interrupt::TIMER).bits();

    assert_eq!(cpu.service_interrupts(&mut bus), Some(20));
    assert_eq!(cpu.regs.pc, 0x0040);
    assert!(!cpu.ime);
    assert_eq!(bus.memory[IF_ADDR as usize], Interrupt::TIMER.bits());
    assert_eq!(cpu.regs.sp, 0xCFFE);
    assert_eq!(bus.memory[0xCFFE], 0x34);
    assert_eq!(bus.memory[0xCFFF], 0x12);
}

#[test]
fn interrupt_vectors_follow_bit_index() {
    assert_eq!(Interrupt::VBLANK.vector(), 0x40);
    assert_eq!(Interrupt::LCD_STAT.vector(), 0x48);
    assert_eq!(Interrupt::TIMER.vector(), 0x50);
    assert_eq!(Interrupt::SERIAL.vector(), 0x58);
    assert_eq!(Interrupt::JOYPAD.vector(), 0x60);
    assert_eq!(
        (Interrupt::JOYPAD | Interrupt::LCD_STAT).highest_priority(),
        Some(Interrupt::LCD_STAT)
    );
    assert_eq!(Interrupt::empty().highest_priority(), None);
}

#[test]
fn masked_request_wakes_halt_without_dispatch() {
    // HALT
    let (mut cpu, mut bus) = setup(&[0x76, 0x00]);
    cpu.step(&mut bus);
    assert!(cpu.halted);
    assert_eq!(cpu.step(&mut bus), 4);
    assert_eq!(cpu.regs.pc, 0x0001);

    bus.memory[IE_ADDR as usize] = Interrupt::TIMER.bits();
    cpu.request_interrupt(&mut bus, Interrupt::TIMER);
    assert_eq!(cpu.service_interrupts(&mut bus), None);
    assert!(!cpu.halted);
    assert_eq!(cpu.regs.pc, 0x0001);
    assert_eq!(bus.memory[IF_ADDR as usize], Interrupt::TIMER.bits());
}

#[test]
fn serial_request_is_skipped_for_joypad() {
    let mut cpu = Cpu::new();
    let mut bus = TestBus::default();
    cpu.ime = true;
    cpu.halted = true;
    let both = Interrupt::SERIAL | Interrupt::JOYPAD;
    bus.memory[IF_ADDR as usize] = both.bits();
    bus.memory[IE_ADDR as usize] = both.bits();

    assert_eq!(cpu.service_interrupts(&mut bus), Some(20));
    assert_eq!(cpu.regs.pc, 0x0060);
    assert_eq!(bus.memory[IF_ADDR as usize], Interrupt::SERIAL.bits());

    // SERIAL alone wakes HALT but is left pending.
    cpu.ime = true;
    cpu.halted = true;
    assert_eq!(cpu.service_interrupts(&mut bus), None);
    assert!(!cpu.halted);
    assert!(cpu.ime);
    assert_eq!(cpu.regs.pc, 0x0060);
}

#[test]
fn disabled_sources_are_ignored() {
    let mut cpu = Cpu::new();
    let mut bus = TestBus::default();
    cpu.ime = true;
    bus.memory[IF_ADDR as usize] = Interrupt::JOYPAD.bits();
    bus.memory[IE_ADDR as usize] = Interrupt::VBLANK.bits();
    assert_eq!(cpu.service_interrupts(&mut bus), None);
    assert!(cpu.ime);
}

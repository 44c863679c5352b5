use super::{Bus, Cpu};

/// Address of the interrupt-flag (IF) register.
pub const IF_ADDR: u16 = 0xFF0F;
/// Address of the interrupt-enable (IE) register.
pub const IE_ADDR: u16 = 0xFFFF;

bitflags::bitflags! {
    /// Interrupt sources as laid out in IF/IE. Bit 0 has the highest priority.
    #[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
    pub struct Interrupt: u8 {
        const VBLANK   = 1 << 0;
        const LCD_STAT = 1 << 1;
        const TIMER    = 1 << 2;
        const SERIAL   = 1 << 3;
        const JOYPAD   = 1 << 4;
    }
}

impl Interrupt {
    /// Handler address for a single interrupt bit.
    pub fn vector(self) -> u16 {
        0x0040 + (self.bits().trailing_zeros() as u16) * 8
    }

    /// The highest-priority source contained in `self`, if any.
    pub fn highest_priority(self) -> Option<Interrupt> {
        let bits = self.bits() & Interrupt::all().bits();
        (bits != 0).then(|| Interrupt::from_bits_truncate(bits & bits.wrapping_neg()))
    }
}

impl Cpu {
    /// Raise an interrupt request by setting its bit in IF.
    pub fn request_interrupt<B: Bus>(&mut self, bus: &mut B, interrupt: Interrupt) {
        let iflags = bus.read8(IF_ADDR);
        bus.write8(IF_ADDR, iflags | interrupt.bits());
    }

    /// Dispatch the highest-priority pending interrupt.
    ///
    /// Any enabled request wakes a halted CPU, even with IME clear. With IME
    /// set, IME is cleared, PC is pushed, the IF bit is acknowledged and PC
    /// jumps to the vector. Returns the ticks spent on the dispatch.
    ///
    /// SERIAL has no source here and is never dispatched; a pending SERIAL
    /// bit only wakes HALT and otherwise stays set in IF.
    pub fn service_interrupts<B: Bus>(&mut self, bus: &mut B) -> Option<u32> {
        let ie = Interrupt::from_bits_truncate(bus.read8(IE_ADDR));
        let iflags = Interrupt::from_bits_truncate(bus.read8(IF_ADDR));
        let pending = ie & iflags;
        if pending.is_empty() {
            return None;
        }

        self.halted = false;
        if !self.ime {
            return None;
        }
        let interrupt = (pending - Interrupt::SERIAL).highest_priority()?;

        let pc = self.regs.pc;
        let vector = interrupt.vector();
        log::debug!(
            "GB CPU interrupt: {:?} vector=0x{:04X} pc=0x{:04X} sp=0x{:04X} IF=0x{:02X} IE=0x{:02X}",
            interrupt,
            vector,
            pc,
            self.regs.sp,
            iflags.bits(),
            ie.bits(),
        );

        self.ime = false;
        self.push_u16(bus, pc);
        bus.write8(IF_ADDR, (iflags - interrupt).bits());
        self.regs.pc = vector;

        Some(20)
    }
}

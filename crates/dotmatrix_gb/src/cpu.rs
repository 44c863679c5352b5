mod alu;
mod bus;
mod cb;
mod exec;
mod helpers;
mod init;
mod interrupts;
mod regs;
mod table;

pub use bus::Bus;
pub use interrupts::{Interrupt, IE_ADDR, IF_ADDR};
pub use regs::{Flag, Reg16, Reg8, Registers};

use table::OpTables;

/// Sharp LR35902 core.
///
/// The CPU owns only its register file and control latches. Memory, the
/// interrupt registers (IF/IE) and peripherals are reached through the
/// [`Bus`] passed into every call.
#[derive(Clone, Debug)]
pub struct Cpu {
    pub regs: Registers,
    pub ime: bool,
    pub halted: bool,
    /// EI latch: IME is raised at the start of the next executed opcode.
    ime_enable_pending: bool,
    /// Set after an illegal opcode; the CPU stops executing until reset.
    locked: bool,
}

impl Cpu {
    #[inline]
    pub fn get_flag(&self, flag: Flag) -> bool {
        let bit = flag as u8;
        (self.regs.f & (1 << bit)) != 0
    }

    #[inline]
    pub fn set_flag(&mut self, flag: Flag, value: bool) {
        let bit = flag as u8;
        if value {
            self.regs.f |= 1 << bit;
        } else {
            self.regs.f &= !(1 << bit);
        }
    }

    #[inline]
    pub fn clear_flags(&mut self) {
        self.regs.f = 0;
    }

    pub fn is_locked(&self) -> bool {
        self.locked
    }

    /// Execute exactly one instruction and return its cost in ticks.
    ///
    /// A halted CPU idles for 4 ticks. A locked CPU returns 0 so callers
    /// can detect the condition and stop driving the machine.
    pub fn step<B: Bus>(&mut self, bus: &mut B) -> u32 {
        if self.locked {
            return 0;
        }
        if self.halted {
            return 4;
        }

        let opcode = self.fetch8(bus);
        self.execute(bus, opcode)
    }

    /// Decode `opcode` through the dispatch table and run it.
    pub(crate) fn execute<B: Bus>(&mut self, bus: &mut B, opcode: u8) -> u32 {
        if self.ime_enable_pending {
            self.ime = true;
            self.ime_enable_pending = false;
        }

        OpTables::<B>::UNPREFIXED[opcode as usize](self, bus, opcode)
    }
}

#[cfg(test)]
mod tests;

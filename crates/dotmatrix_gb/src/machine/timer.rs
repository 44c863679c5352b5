//! Divider and counter unit (DIV/TIMA/TMA/TAC).
//!
//! Time is fed in whole instruction costs through [`Timer::run`]; the
//! register helpers in `io` only expose and mutate state.
mod io;

use crate::cpu::Interrupt;

/// Ticks per DIV increment.
const DIVIDER_PERIOD: u32 = 256;

pub(crate) struct Timer {
    /// DIV (FF04).
    pub(super) divider: u8,
    /// TIMA (FF05).
    pub(super) counter: u8,
    /// TMA (FF06).
    pub(super) modulo: u8,
    /// TAC bit 2.
    pub(super) enabled: bool,
    /// TAC bits 1:0.
    pub(super) clock_select: u8,
    /// Ticks per TIMA increment, derived from `clock_select`.
    counter_period: u32,
    divider_ticks: u32,
    counter_ticks: u32,
}

impl Timer {
    pub(crate) fn new() -> Self {
        Self {
            divider: 0,
            counter: 0,
            modulo: 0,
            enabled: false,
            clock_select: 0,
            counter_period: 16_384,
            divider_ticks: 0,
            counter_ticks: 0,
        }
    }

    /// Advance both counters by `ticks`.
    ///
    /// DIV moves at most one step per call. TIMA catches up fully, so one
    /// long instruction may produce several increments and several
    /// overflows, each of which reloads TIMA from TMA and requests TIMER.
    pub(crate) fn run(&mut self, ticks: u32, iflags: &mut Interrupt) {
        self.divider_ticks += ticks;
        if self.divider_ticks >= DIVIDER_PERIOD {
            self.divider_ticks -= DIVIDER_PERIOD;
            self.divider = self.divider.wrapping_add(1);
        }

        // TIMA time only passes while TAC bit 2 is set.
        if !self.enabled {
            return;
        }
        self.counter_ticks += ticks;

        while self.counter_ticks >= self.counter_period {
            self.counter_ticks -= self.counter_period;
            let (next, overflow) = self.counter.overflowing_add(1);
            self.counter = next;
            if overflow {
                self.counter = self.modulo;
                iflags.insert(Interrupt::TIMER);
            }
        }
    }

    /// TIMA period for a TAC clock-select value.
    #[inline]
    pub(super) fn period_for(clock_select: u8) -> u32 {
        match clock_select & 0x03 {
            0 => 1024,
            1 => 16,
            2 => 64,
            _ => 256,
        }
    }
}

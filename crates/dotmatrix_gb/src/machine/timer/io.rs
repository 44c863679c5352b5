use super::Timer;

impl Timer {
    /// Read one of FF04..=FF07.
    pub(crate) fn read(&self, addr: u16) -> u8 {
        match addr {
            0xFF04 => self.divider,
            0xFF05 => self.counter,
            0xFF06 => self.modulo,
            0xFF07 => ((self.enabled as u8) << 2) | self.clock_select,
            _ => 0xFF,
        }
    }

    /// Write one of FF04..=FF07.
    ///
    /// Any write to DIV clears DIV, TIMA and both tick accumulators.
    pub(crate) fn write(&mut self, addr: u16, value: u8) {
        match addr {
            0xFF04 => {
                self.divider = 0;
                self.counter = 0;
                self.divider_ticks = 0;
                self.counter_ticks = 0;
            }
            0xFF05 => self.counter = value,
            0xFF06 => self.modulo = value,
            0xFF07 => {
                self.enabled = value & 0x04 != 0;
                self.clock_select = value & 0x03;
                self.counter_period = Timer::period_for(self.clock_select);
            }
            _ => {}
        }
    }
}

/// DMG buttons, in the bit order used by the joypad state byte.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Button {
    A,
    B,
    Select,
    Start,
    Right,
    Left,
    Up,
    Down,
}

impl Button {
    #[inline]
    fn mask(self) -> u8 {
        1 << self as u8
    }
}

/// P1/JOYP (FF00) register holder.
///
/// `states` is active low: bits 0-3 are A/B/Select/Start, bits 4-7 are
/// Right/Left/Up/Down.
pub(crate) struct Joypad {
    register: u8,
    states: u8,
}

impl Joypad {
    pub(crate) fn new() -> Self {
        Self {
            register: 0x00,
            states: 0xFF,
        }
    }

    /// Bit 5 clear selects the action buttons, otherwise the d-pad.
    pub(crate) fn read(&self) -> u8 {
        if self.register & 0x20 == 0 {
            self.register | (self.states & 0x0F)
        } else {
            self.register | (self.states >> 4)
        }
    }

    /// Only the select bits are writable; the low nibble is input.
    pub(crate) fn write(&mut self, value: u8) {
        self.register = value & 0xF0;
    }

    pub(crate) fn press(&mut self, button: Button) {
        self.states &= !button.mask();
    }

    pub(crate) fn release(&mut self, button: Button) {
        self.states |= button.mask();
    }
}

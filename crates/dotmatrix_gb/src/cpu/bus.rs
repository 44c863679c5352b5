/// Abstraction over the Game Boy bus (memory and IO).
///
/// The CPU only ever talks to memory through this trait, which keeps the
/// core testable against a flat RAM and lets the machine bus own every
/// peripheral without back-references to the CPU.
pub trait Bus {
    fn read8(&mut self, addr: u16) -> u8;
    fn write8(&mut self, addr: u16, value: u8);

    /// Little-endian 16-bit read: low byte at `addr`, high byte at `addr+1`.
    fn read16(&mut self, addr: u16) -> u16 {
        let lo = self.read8(addr);
        let hi = self.read8(addr.wrapping_add(1));
        u16::from_le_bytes([lo, hi])
    }

    /// Little-endian 16-bit write. The high byte is stored first.
    fn write16(&mut self, addr: u16, value: u16) {
        let [lo, hi] = value.to_le_bytes();
        self.write8(addr.wrapping_add(1), hi);
        self.write8(addr, lo);
    }
}

use crate::cpu::{Bus, Interrupt};

use super::cartridge::Cartridge;
use super::ppu::{FrameBuffer, Ppu};
use super::timer::Timer;

mod dma;
mod joypad;
mod mmio;

pub use joypad::Button;
pub(crate) use joypad::Joypad;

pub(crate) const BOOT_ROM_SIZE: usize = 0x100;
const WRAM_SIZE: usize = 0x2000;
const HRAM_SIZE: usize = 0x7F;

/// Memory map and every peripheral behind it.
///
/// The bus owns the cartridge, PPU, timer, joypad and the IF/IE interrupt
/// registers, so the CPU reaches all of them through the [`Bus`] trait and
/// peripherals raise interrupts by writing into `if_reg` directly.
pub(crate) struct GameBoyBus {
    pub(crate) cartridge: Option<Cartridge>,
    pub(crate) ppu: Ppu,
    pub(crate) timer: Timer,
    pub(crate) joypad: Joypad,
    /// Output of the PPU; double-buffered.
    pub(crate) frame: FrameBuffer,
    pub(crate) if_reg: Interrupt,
    pub(crate) ie_reg: u8,
    wram: [u8; WRAM_SIZE],
    hram: [u8; HRAM_SIZE],
    boot_rom: Option<Box<[u8; BOOT_ROM_SIZE]>>,
    /// Boot ROM overlays 0x0000..0x00FF until 0xFF50 is written.
    boot_mapped: bool,
}

impl GameBoyBus {
    pub(crate) fn new(boot_rom: Option<Box<[u8; BOOT_ROM_SIZE]>>) -> Self {
        Self {
            cartridge: None,
            ppu: Ppu::new(),
            timer: Timer::new(),
            joypad: Joypad::new(),
            frame: FrameBuffer::new(),
            if_reg: Interrupt::empty(),
            ie_reg: 0,
            wram: [0; WRAM_SIZE],
            hram: [0; HRAM_SIZE],
            boot_mapped: boot_rom.is_some(),
            boot_rom,
        }
    }

    /// Power-cycle everything except the inserted cartridge's contents and
    /// the boot ROM image.
    pub(crate) fn reset(&mut self) {
        let mut cartridge = self.cartridge.take();
        if let Some(cart) = cartridge.as_mut() {
            cart.reset_banking();
        }
        *self = Self::new(self.boot_rom.take());
        self.cartridge = cartridge;
    }

    pub(crate) fn has_boot_rom(&self) -> bool {
        self.boot_rom.is_some()
    }

    /// Run the PPU and the timer for `ticks`, in that order.
    pub(crate) fn advance(&mut self, ticks: u32) {
        self.ppu.run(ticks, &mut self.frame, &mut self.if_reg);
        self.timer.run(ticks, &mut self.if_reg);
    }

    pub(crate) fn press(&mut self, button: Button) {
        self.joypad.press(button);
        self.if_reg.insert(Interrupt::JOYPAD);
    }

    pub(crate) fn release(&mut self, button: Button) {
        self.joypad.release(button);
    }
}

impl Bus for GameBoyBus {
    fn read8(&mut self, addr: u16) -> u8 {
        self.read8_mmio(addr)
    }

    fn write8(&mut self, addr: u16, value: u8) {
        self.write8_mmio(addr, value)
    }
}

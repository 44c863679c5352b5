use std::path::Path;

use crate::config::GameBoyConfig;
use crate::cpu::Cpu;
use crate::error::{GbError, Result};

use super::bus::{Button, BOOT_ROM_SIZE};
use super::cartridge::Cartridge;
use super::ppu::{FrameBuffer, Mode};
use super::GameBoyBus;

/// High-level Game Boy machine.
///
/// Owns the CPU core and the bus (which in turn owns every peripheral).
/// Front ends drive it with [`GameBoy::run_frame`] and read the picture
/// back through [`GameBoy::frame`].
pub struct GameBoy {
    pub cpu: Cpu,
    pub(crate) bus: GameBoyBus,
    config: GameBoyConfig,
    /// Ticks run past the end of the previous frame's budget.
    pub(super) frame_ticks: u32,
}

impl Default for GameBoy {
    fn default() -> Self {
        Self::new()
    }
}

impl GameBoy {
    /// Machine with the default configuration and no boot ROM.
    pub fn new() -> Self {
        Self::from_parts(GameBoyConfig::default(), None)
    }

    /// Machine for `config`, loading the boot ROM if one is configured.
    pub fn with_config(config: GameBoyConfig) -> Result<Self> {
        let boot_rom = match &config.boot_rom {
            Some(path) => Some(load_boot_rom(path)?),
            None => None,
        };
        Ok(Self::from_parts(config, boot_rom))
    }

    fn from_parts(config: GameBoyConfig, boot_rom: Option<Box<[u8; BOOT_ROM_SIZE]>>) -> Self {
        let mut gb = Self {
            cpu: Cpu::new(),
            bus: GameBoyBus::new(boot_rom),
            config,
            frame_ticks: 0,
        };
        gb.cpu.reset(gb.bus.has_boot_rom());
        gb
    }

    pub fn config(&self) -> &GameBoyConfig {
        &self.config
    }

    /// Power-cycle the machine, keeping the inserted cartridge.
    pub fn reset(&mut self) {
        self.bus.reset();
        self.cpu.reset(self.bus.has_boot_rom());
        self.frame_ticks = 0;
    }

    /// Insert the ROM file at `path` and reset.
    ///
    /// On error the machine is left exactly as it was.
    pub fn insert_rom(&mut self, path: impl AsRef<Path>) -> Result<()> {
        let cart = Cartridge::open(path.as_ref(), self.config.battery_saves)?;
        self.insert_cartridge(cart);
        Ok(())
    }

    /// Insert an in-memory ROM image (no save file) and reset.
    pub fn load_rom(&mut self, rom: Vec<u8>) -> Result<()> {
        let cart = Cartridge::from_bytes(rom, None)?;
        self.insert_cartridge(cart);
        Ok(())
    }

    /// Swap in `cart` and reset. The previous cartridge is dropped, which
    /// flushes its battery RAM.
    pub fn insert_cartridge(&mut self, cart: Cartridge) {
        self.bus.cartridge = Some(cart);
        self.reset();
    }

    pub fn cartridge(&self) -> Option<&Cartridge> {
        self.bus.cartridge.as_ref()
    }

    /// Execute one instruction, advance the PPU and timer by its cost and
    /// then service a pending interrupt (whose 20 ticks also reach the PPU
    /// and timer).
    ///
    /// Returns the ticks spent, or 0 once the CPU has locked up.
    pub fn step(&mut self) -> u32 {
        let ticks = self.cpu.step(&mut self.bus);
        if ticks == 0 {
            return 0;
        }
        self.bus.advance(ticks);

        match self.cpu.service_interrupts(&mut self.bus) {
            Some(dispatch) => {
                self.bus.advance(dispatch);
                ticks + dispatch
            }
            None => ticks,
        }
    }

    /// Run one output frame's worth of ticks.
    ///
    /// The budget comes from [`GameBoyConfig::ticks_per_frame`]; overshoot
    /// from the last instruction is carried into the next frame. Returns
    /// early if the CPU locks up.
    pub fn run_frame(&mut self) {
        let budget = self.config.ticks_per_frame();
        while self.frame_ticks < budget {
            let taken = self.step();
            if taken == 0 {
                return;
            }
            self.frame_ticks = self.frame_ticks.saturating_add(taken);
        }
        self.frame_ticks -= budget;
    }

    pub fn press(&mut self, button: Button) {
        self.bus.press(button);
    }

    pub fn release(&mut self, button: Button) {
        self.bus.release(button);
    }

    /// The last completed frame.
    pub fn frame(&self) -> &FrameBuffer {
        &self.bus.frame
    }

    /// Current PPU mode, as reported in STAT.
    pub fn lcd_mode(&self) -> Mode {
        self.bus.ppu.mode()
    }

    /// Current scanline (LY).
    pub fn scanline(&self) -> u8 {
        self.bus.ppu.line()
    }

    /// Flush battery RAM to the save file now instead of on drop.
    pub fn save_ram(&mut self) -> Result<()> {
        match self.bus.cartridge.as_mut() {
            Some(cart) => cart.save_ram(),
            None => Ok(()),
        }
    }
}

fn load_boot_rom(path: &Path) -> Result<Box<[u8; BOOT_ROM_SIZE]>> {
    let bytes = std::fs::read(path).map_err(|source| GbError::BootRom {
        path: path.to_path_buf(),
        source,
    })?;
    bytes
        .into_boxed_slice()
        .try_into()
        .map_err(|rejected: Box<[u8]>| GbError::BootRomSize(rejected.len()))
}

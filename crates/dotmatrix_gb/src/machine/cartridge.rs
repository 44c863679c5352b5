mod header;
mod mbc1;
mod mbc2;
mod save;

use std::path::{Path, PathBuf};

use crate::error::{GbError, Result};

pub use header::{CartridgeHeader, MbcKind};
pub(crate) use save::save_path_for;

use header::HEADER_END;
use mbc1::Mbc1;
use mbc2::{Mbc2, MBC2_RAM_SIZE};

const ROM_BANK_SIZE: usize = 0x4000;

/// Banking controller state, one variant per supported mapper.
enum Mbc {
    None,
    Mbc1(Mbc1),
    Mbc2(Mbc2),
}

impl Mbc {
    fn new(kind: MbcKind) -> Self {
        match kind {
            MbcKind::None => Mbc::None,
            MbcKind::Mbc1 => Mbc::Mbc1(Mbc1::new()),
            MbcKind::Mbc2 => Mbc::Mbc2(Mbc2::new()),
        }
    }

    fn rom_bank(&self) -> usize {
        match self {
            Mbc::None => 1,
            Mbc::Mbc1(m) => m.rom_bank as usize,
            Mbc::Mbc2(m) => m.rom_bank as usize,
        }
    }

    fn adjust_rom_bank(&self, bank: usize, total_banks: usize) -> usize {
        match self {
            Mbc::Mbc1(m) => m.adjust_rom_bank(bank, total_banks),
            Mbc::None | Mbc::Mbc2(_) => bank,
        }
    }
}

/// A cartridge: ROM image, external RAM and the mapper in front of them.
///
/// Battery-backed RAM is loaded when the cartridge is created and written
/// back through [`Cartridge::save_ram`] or when dropped. A save only hits
/// the disk if RAM changed since the last one.
pub struct Cartridge {
    header: CartridgeHeader,
    rom: Vec<u8>,
    ram: Vec<u8>,
    mbc: Mbc,
    save_path: Option<PathBuf>,
    /// Cleared by any RAM write that changes a byte.
    is_saved: bool,
}

impl Cartridge {
    /// Read a ROM file. With `battery_saves` set, battery RAM is persisted
    /// to the sibling `.sav` file.
    pub fn open(path: &Path, battery_saves: bool) -> Result<Self> {
        let rom = std::fs::read(path).map_err(|source| GbError::RomLoad {
            path: path.to_path_buf(),
            source,
        })?;
        let save_path = battery_saves.then(|| save_path_for(path));
        let cart = Self::from_bytes(rom, save_path)?;

        let name = path.file_name().map(|n| n.to_string_lossy()).unwrap_or_default();
        let header = &cart.header;
        log::info!(
            "GB cartridge: inserted '{name}' title={:?} mbc={} rom={} bytes ram={} bytes banks={} battery={}",
            header.title,
            header.kind,
            header.rom_size,
            header.ram_size,
            header.total_rom_banks,
            header.battery,
        );
        Ok(cart)
    }

    /// Build a cartridge from an in-memory image.
    ///
    /// The image must hold at least the header and the declared ROM size.
    pub fn from_bytes(rom: Vec<u8>, save_path: Option<PathBuf>) -> Result<Self> {
        let header = CartridgeHeader::parse(&rom)?;
        if rom.len() < header.rom_size {
            log::warn!(
                "GB cartridge: image is {} bytes but the header declares {}",
                rom.len(),
                header.rom_size
            );
            return Err(GbError::TruncatedRom {
                expected: header.rom_size.max(HEADER_END),
                actual: rom.len(),
            });
        }

        let ram_len = match header.kind {
            MbcKind::Mbc2 => MBC2_RAM_SIZE,
            MbcKind::None | MbcKind::Mbc1 => header.ram_size,
        };
        let mut ram = vec![0; ram_len];
        let save_path = save_path.filter(|_| header.battery);
        if let Some(path) = &save_path {
            save::load(path, &mut ram);
        }

        Ok(Self {
            mbc: Mbc::new(header.kind),
            header,
            rom,
            ram,
            save_path,
            is_saved: false,
        })
    }

    /// Return the mapper to its power-on register state.
    pub(crate) fn reset_banking(&mut self) {
        self.mbc = Mbc::new(self.header.kind);
    }

    pub fn header(&self) -> &CartridgeHeader {
        &self.header
    }

    /// Read from 0x0000..0x7FFF.
    pub(crate) fn read_rom(&self, addr: u16) -> u8 {
        let total = self.header.total_rom_banks;
        let (bank, offset) = if addr < 0x4000 {
            (self.mbc.adjust_rom_bank(0, total), addr as usize)
        } else {
            let bank = self.mbc.rom_bank() % total;
            (self.mbc.adjust_rom_bank(bank, total), addr as usize - ROM_BANK_SIZE)
        };
        self.rom
            .get(bank * ROM_BANK_SIZE + offset)
            .copied()
            .unwrap_or(0xFF)
    }

    /// Writes into the ROM window program the mapper registers.
    pub(crate) fn write_rom(&mut self, addr: u16, value: u8) {
        match &mut self.mbc {
            Mbc::None => {}
            Mbc::Mbc1(m) => m.write(addr, value),
            Mbc::Mbc2(m) => m.write(addr, value),
        }
    }

    /// Read from 0xA000..0xBFFF. Disabled or absent RAM reads 0xFF.
    pub(crate) fn read_ram(&self, addr: u16) -> u8 {
        match &self.mbc {
            Mbc::None => 0xFF,
            Mbc::Mbc1(m) => m
                .ram_index(addr, self.ram.len())
                .and_then(|i| self.ram.get(i).copied())
                .unwrap_or(0xFF),
            Mbc::Mbc2(m) => m
                .ram_index(addr)
                .and_then(|i| self.ram.get(i).copied())
                .map_or(0xFF, |v| v | 0xF0),
        }
    }

    pub(crate) fn write_ram(&mut self, addr: u16, value: u8) {
        let (index, value) = match &self.mbc {
            Mbc::None => return,
            Mbc::Mbc1(m) => (m.ram_index(addr, self.ram.len()), value),
            Mbc::Mbc2(m) => (m.ram_index(addr), value | 0xF0),
        };
        if let Some(slot) = index.and_then(|i| self.ram.get_mut(i)) {
            if *slot != value {
                *slot = value;
                self.is_saved = false;
            }
        }
    }

    /// Write battery RAM to the save file.
    ///
    /// Skipped without a save path, and while RAM is unchanged since the
    /// last successful save.
    pub fn save_ram(&mut self) -> Result<()> {
        if self.is_saved {
            return Ok(());
        }
        let Some(path) = &self.save_path else {
            return Ok(());
        };
        save::store(path, &self.ram)?;
        self.is_saved = true;
        Ok(())
    }
}

impl Drop for Cartridge {
    fn drop(&mut self) {
        if let Err(err) = self.save_ram() {
            log::warn!("GB cartridge: {err}");
        }
    }
}

use std::fmt;

use crate::error::{GbError, Result};

/// Offset of the cartridge-type byte.
const TYPE_ADDR: usize = 0x147;
const ROM_SIZE_ADDR: usize = 0x148;
const RAM_SIZE_ADDR: usize = 0x149;
const TITLE: std::ops::Range<usize> = 0x134..0x144;
/// Smallest image that still contains the whole header.
pub(crate) const HEADER_END: usize = 0x150;

/// Banking controller fitted to a cartridge.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum MbcKind {
    None,
    Mbc1,
    Mbc2,
}

impl fmt::Display for MbcKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MbcKind::None => f.write_str("ROM only"),
            MbcKind::Mbc1 => f.write_str("MBC1"),
            MbcKind::Mbc2 => f.write_str("MBC2"),
        }
    }
}

/// Fields decoded from the cartridge header at 0x0134..0x014F.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CartridgeHeader {
    pub title: String,
    pub kind: MbcKind,
    pub battery: bool,
    /// Declared ROM size in bytes.
    pub rom_size: usize,
    /// Declared external RAM size in bytes (0 for MBC2, whose RAM is
    /// built into the controller).
    pub ram_size: usize,
    pub total_rom_banks: usize,
}

impl CartridgeHeader {
    pub fn parse(rom: &[u8]) -> Result<Self> {
        if rom.len() < HEADER_END {
            return Err(GbError::TruncatedRom {
                expected: HEADER_END,
                actual: rom.len(),
            });
        }

        let (kind, battery) = match rom[TYPE_ADDR] {
            0x00 => (MbcKind::None, false),
            0x01 | 0x02 => (MbcKind::Mbc1, false),
            0x03 => (MbcKind::Mbc1, true),
            0x05 => (MbcKind::Mbc2, false),
            0x06 => (MbcKind::Mbc2, true),
            other => return Err(GbError::UnsupportedCartridgeType(other)),
        };

        let rom_code = rom[ROM_SIZE_ADDR];
        if rom_code > 8 {
            return Err(GbError::UnsupportedRomSize(rom_code));
        }

        let ram_size = match rom[RAM_SIZE_ADDR] {
            0x01 => 2 * 1024,
            0x02 => 8 * 1024,
            0x03 => 32 * 1024,
            0x04 => 128 * 1024,
            0x05 => 64 * 1024,
            _ => 0,
        };

        let title = rom[TITLE]
            .iter()
            .take_while(|&&b| b != 0)
            .map(|&b| if b.is_ascii_graphic() || b == b' ' { b as char } else { '?' })
            .collect::<String>()
            .trim_end()
            .to_string();

        Ok(Self {
            title,
            kind,
            battery,
            rom_size: 32 * 1024 << rom_code,
            ram_size,
            total_rom_banks: 1 << (rom_code + 1),
        })
    }
}

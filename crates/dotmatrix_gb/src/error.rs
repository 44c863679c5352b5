use std::io;
use std::path::PathBuf;

use thiserror::Error;

pub type Result<T> = std::result::Result<T, GbError>;

#[derive(Error, Debug)]
pub enum GbError {
    #[error("unsupported cartridge type 0x{0:02X}")]
    UnsupportedCartridgeType(u8),

    #[error("unsupported ROM size code 0x{0:02X}")]
    UnsupportedRomSize(u8),

    #[error("failed to read ROM '{}'", path.display())]
    RomLoad {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("ROM image is truncated: expected at least {expected} bytes, got {actual}")]
    TruncatedRom { expected: usize, actual: usize },

    #[error("failed to read boot ROM '{}'", path.display())]
    BootRom {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("boot ROM must be exactly 256 bytes, got {0}")]
    BootRomSize(usize),

    #[error("failed to write save file '{}'", path.display())]
    SaveWrite {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

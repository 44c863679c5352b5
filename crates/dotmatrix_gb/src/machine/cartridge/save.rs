//! Battery-backed RAM persistence.
//!
//! The save file is a raw dump of cartridge RAM stored next to the ROM
//! with the extension replaced by `.sav`.
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use crate::error::{GbError, Result};

pub(crate) fn save_path_for(rom_path: &Path) -> PathBuf {
    rom_path.with_extension("sav")
}

/// Fill `ram` from `path`. A missing file leaves `ram` untouched.
pub(super) fn load(path: &Path, ram: &mut [u8]) {
    let data = match fs::read(path) {
        Ok(data) => data,
        Err(err) if err.kind() == io::ErrorKind::NotFound => return,
        Err(err) => {
            log::warn!("GB save: failed to read '{}': {err}", path.display());
            return;
        }
    };

    if data.len() != ram.len() {
        log::warn!(
            "GB save: '{}' is {} bytes, expected {}",
            path.display(),
            data.len(),
            ram.len()
        );
    }
    let len = data.len().min(ram.len());
    ram[..len].copy_from_slice(&data[..len]);
    log::info!("GB save: loaded {len} bytes from '{}'", path.display());
}

pub(super) fn store(path: &Path, ram: &[u8]) -> Result<()> {
    fs::write(path, ram).map_err(|source| GbError::SaveWrite {
        path: path.to_path_buf(),
        source,
    })?;
    log::info!("GB save: wrote {} bytes to '{}'", ram.len(), path.display());
    Ok(())
}

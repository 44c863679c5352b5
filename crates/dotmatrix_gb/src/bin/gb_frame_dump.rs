use std::path::PathBuf;

use anyhow::{bail, Context, Result};
use dotmatrix_gb::{GameBoy, GameBoyConfig, SCREEN_HEIGHT, SCREEN_WIDTH};

const USAGE: &str = "Usage: gb_frame_dump <rom_path> <out_rgb24_path> [frames]";

/// DMG shade (0 = lightest) to grayscale.
const SHADES: [u8; 4] = [0xFF, 0xAA, 0x55, 0x00];

fn main() -> Result<()> {
    env_logger::init();

    let mut args = std::env::args().skip(1);
    let (Some(rom_path), Some(out_path)) = (args.next(), args.next()) else {
        bail!(USAGE);
    };
    let rom_path = PathBuf::from(rom_path);
    let out_path = PathBuf::from(out_path);
    let frames: u32 = match args.next() {
        Some(arg) => arg
            .parse()
            .with_context(|| format!("invalid frame count '{arg}'\n{USAGE}"))?,
        None => 120,
    };

    // Headless runs must not touch save files next to the ROM.
    let config = GameBoyConfig::builder().battery_saves(false).build();
    let mut gb = GameBoy::with_config(config)?;
    gb.insert_rom(&rom_path)
        .with_context(|| format!("failed to insert '{}'", rom_path.display()))?;

    for _ in 0..frames {
        gb.run_frame();
        if gb.cpu.is_locked() {
            log::warn!("GB frame dump: CPU locked, stopping early");
            break;
        }
    }

    let buffer: Vec<u8> = gb
        .frame()
        .front()
        .iter()
        .flat_map(|&shade| [SHADES[(shade & 0x03) as usize]; 3])
        .collect();
    std::fs::write(&out_path, &buffer)
        .with_context(|| format!("failed to write '{}'", out_path.display()))?;

    println!(
        "Wrote {} bytes ({}x{} rgb24) after {} frames to '{}'",
        buffer.len(),
        SCREEN_WIDTH,
        SCREEN_HEIGHT,
        gb.frame().frame_count(),
        out_path.display()
    );
    Ok(())
}

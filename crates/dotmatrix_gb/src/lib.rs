pub mod config;
pub mod cpu;
mod error;
pub mod machine;

pub use config::GameBoyConfig;
pub use error::{GbError, Result};
pub use machine::{Button, FrameBuffer, GameBoy, PixelSink};

/// Logical screen width in pixels for the Game Boy DMG.
pub const SCREEN_WIDTH: usize = 160;
/// Logical screen height in pixels.
pub const SCREEN_HEIGHT: usize = 144;
/// Master clock of the DMG in ticks per second.
pub const CLOCK_SPEED: u32 = 4_194_304;

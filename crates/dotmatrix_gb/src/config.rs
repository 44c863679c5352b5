use std::path::PathBuf;

use typed_builder::TypedBuilder;

use crate::CLOCK_SPEED;

/// Session-level settings for a [`GameBoy`](crate::GameBoy).
///
/// ```
/// use dotmatrix_gb::GameBoyConfig;
///
/// let config = GameBoyConfig::builder().emulation_speed(200).build();
/// assert_eq!(config.ticks_per_frame(), 4_194_304 * 2 / 60);
/// ```
#[derive(Clone, Debug, TypedBuilder)]
pub struct GameBoyConfig {
    /// Optional 256-byte boot ROM. When present the machine starts at
    /// PC=0x0000 with the overlay mapped; otherwise it starts at 0x0100.
    #[builder(default, setter(strip_option, into))]
    pub boot_rom: Option<PathBuf>,
    /// Load and store battery-backed cartridge RAM next to the ROM file.
    #[builder(default = true)]
    pub battery_saves: bool,
    /// Emulation speed in percent of the real clock.
    #[builder(default = 100)]
    pub emulation_speed: u32,
    #[builder(default = 60)]
    pub target_fps: u32,
}

impl Default for GameBoyConfig {
    fn default() -> Self {
        Self::builder().build()
    }
}

impl GameBoyConfig {
    /// Number of ticks the frame driver runs for each output frame.
    ///
    /// Saturates at `u32::MAX` for absurd speed settings.
    pub fn ticks_per_frame(&self) -> u32 {
        let ticks_per_second = (CLOCK_SPEED as u64 * self.emulation_speed as u64) / 100;
        u32::try_from(ticks_per_second / self.target_fps.max(1) as u64).unwrap_or(u32::MAX)
    }
}

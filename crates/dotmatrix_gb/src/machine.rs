mod bus;
mod cartridge;
mod gameboy;
mod ppu;
mod timer;

pub(crate) use bus::GameBoyBus;
pub use bus::Button;
pub use cartridge::{Cartridge, CartridgeHeader, MbcKind};
pub use gameboy::GameBoy;
pub use ppu::{FrameBuffer, Mode, PixelSink};

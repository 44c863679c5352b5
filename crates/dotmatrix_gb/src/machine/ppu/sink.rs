use crate::{SCREEN_HEIGHT, SCREEN_WIDTH};

/// Receiver for rendered pixels.
///
/// `color` is the palette-mapped DMG shade (0 = lightest, 3 = darkest).
pub trait PixelSink {
    fn set_pixel(&mut self, x: usize, y: usize, color: u8);
    /// Called once per frame when the PPU wraps from V-Blank to line 0.
    fn end_of_frame(&mut self);
    /// Called when the LCD is switched off.
    fn clear(&mut self);
}

/// Double-buffered 160x144 shade buffer.
///
/// The PPU draws into the back buffer; `end_of_frame` swaps, so the front
/// buffer always holds the last complete frame.
pub struct FrameBuffer {
    front: Box<[u8]>,
    back: Box<[u8]>,
    frames: u64,
}

impl Default for FrameBuffer {
    fn default() -> Self {
        Self::new()
    }
}

impl FrameBuffer {
    pub fn new() -> Self {
        Self {
            front: vec![0; SCREEN_WIDTH * SCREEN_HEIGHT].into_boxed_slice(),
            back: vec![0; SCREEN_WIDTH * SCREEN_HEIGHT].into_boxed_slice(),
            frames: 0,
        }
    }

    /// Last completed frame, row-major, one shade per pixel.
    pub fn front(&self) -> &[u8] {
        &self.front
    }

    pub fn pixel(&self, x: usize, y: usize) -> u8 {
        self.front.get(y * SCREEN_WIDTH + x).copied().unwrap_or(0)
    }

    /// Number of completed frames since power-on.
    pub fn frame_count(&self) -> u64 {
        self.frames
    }
}

impl PixelSink for FrameBuffer {
    fn set_pixel(&mut self, x: usize, y: usize, color: u8) {
        if x < SCREEN_WIDTH && y < SCREEN_HEIGHT {
            self.back[y * SCREEN_WIDTH + x] = color;
        }
    }

    fn end_of_frame(&mut self) {
        std::mem::swap(&mut self.front, &mut self.back);
        self.frames += 1;
    }

    fn clear(&mut self) {
        self.front.fill(0);
        self.back.fill(0);
    }
}

use crate::constants::{DISPLAY_HEIGHT, DISPLAY_WIDTH};

/// The FrameBuffer is indexed as [y][x]; each pixel is 1 (on) or 0 (off)
pub type FrameBuffer = [[u8; DISPLAY_WIDTH]; DISPLAY_HEIGHT];

/// # Screen
/// The Chip-8 display is composed of 64x32 black/white pixels.
///
/// Sprites are XORed onto the frame buffer one byte per row, most significant bit
/// leftmost, wrapping around the edges. Scaling to a window is left to whoever
/// renders the frame buffer.
pub struct Screen {
    frame_buffer: FrameBuffer,
    draw_flag: bool,
}

impl Screen {
    pub fn new() -> Self {
        Screen {
            frame_buffer: [[0; DISPLAY_WIDTH]; DISPLAY_HEIGHT],
            draw_flag: true,
        }
    }

    pub fn clear(&mut self) {
        self.frame_buffer = [[0; DISPLAY_WIDTH]; DISPLAY_HEIGHT];
        self.draw_flag = true;
    }

    /// XORs `sprite` onto the FrameBuffer at x, y with wrapping.
    /// Returns true if any pixels were erased. An empty sprite clears the screen.
    pub fn draw_sprite(&mut self, x: u8, y: u8, sprite: &[u8]) -> bool {
        if sprite.is_empty() {
            self.clear();
            return false;
        }

        let mut collision = false;
        for (row, byte) in sprite.iter().enumerate() {
            let y = (y as usize + row) % DISPLAY_HEIGHT;
            for bit in 0..8 {
                let pixel_value = (byte >> (7 - bit)) & 1;
                if pixel_value == 0 {
                    continue;
                }
                let x = (x as usize + bit) % DISPLAY_WIDTH;
                let pixel = &mut self.frame_buffer[y][x];
                collision |= *pixel == 1;
                *pixel ^= 1;
            }
        }
        self.draw_flag = true;
        collision
    }

    pub fn frame(&self) -> &FrameBuffer {
        &self.frame_buffer
    }

    /// Returns the FrameBuffer if it changed since it was last taken
    pub fn take_frame(&mut self) -> Option<&FrameBuffer> {
        if std::mem::replace(&mut self.draw_flag, false) {
            Some(&self.frame_buffer)
        } else {
            None
        }
    }
}

impl Default for Screen {
    fn default() -> Self {
        Self::new()
    }
}

//! Packed 4-bit greyscale framebuffer.

use super::Framebuffer;
use crate::layout::Grey;

/// A 4 bpp framebuffer: two pixels per byte, even x in the low nibble.
///
/// Holds `ceil(width / 2) * height` bytes, the layout e-paper panel drivers
/// consume directly. Writes outside the buffer are clipped.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GreyFramebuffer {
    width: u32,
    height: u32,
    data: Vec<u8>,
}

impl GreyFramebuffer {
    /// Create a framebuffer filled with white.
    pub fn new(width: u32, height: u32) -> Self {
        let stride = width.div_ceil(2) as usize;
        Self {
            width,
            height,
            data: vec![0xFF; stride * height as usize],
        }
    }

    /// Width in pixels.
    pub fn width(&self) -> u32 {
        self.width
    }

    /// Height in pixels.
    pub fn height(&self) -> u32 {
        self.height
    }

    /// Raw packed pixel data.
    pub fn as_bytes(&self) -> &[u8] {
        &self.data
    }

    fn stride(&self) -> usize {
        self.width.div_ceil(2) as usize
    }

    fn index(&self, x: i32, y: i32) -> Option<usize> {
        if x < 0 || y < 0 || x as u32 >= self.width || y as u32 >= self.height {
            return None;
        }
        Some(y as usize * self.stride() + x as usize / 2)
    }

    /// Read back one pixel.
    pub fn get_pixel(&self, x: i32, y: i32) -> Option<Grey> {
        let byte = self.data[self.index(x, y)?];
        Some(Grey::new(if x % 2 == 0 { byte & 0x0F } else { byte >> 4 }))
    }

    /// Set every pixel to `color`.
    pub fn fill(&mut self, color: Grey) {
        let level = color.level();
        self.data.fill(level | (level << 4));
    }

    /// Encode as a binary PGM (P5) image with 8-bit samples.
    pub fn to_pgm(&self) -> Vec<u8> {
        let mut out = format!("P5\n{} {}\n255\n", self.width, self.height).into_bytes();
        out.reserve(self.width as usize * self.height as usize);
        for y in 0..self.height as i32 {
            for x in 0..self.width as i32 {
                out.push(self.get_pixel(x, y).unwrap_or(Grey::WHITE).to_u8());
            }
        }
        out
    }

    /// Render as text, one character per pixel (darker pixels denser).
    pub fn to_ascii(&self) -> String {
        const RAMP: &[u8; 16] = b"@@%%##**++==--. ";
        let mut out = String::with_capacity((self.width as usize + 1) * self.height as usize);
        for y in 0..self.height as i32 {
            for x in 0..self.width as i32 {
                let level = self.get_pixel(x, y).unwrap_or(Grey::WHITE).level();
                out.push(RAMP[level as usize] as char);
            }
            out.push('\n');
        }
        out
    }
}

impl Framebuffer for GreyFramebuffer {
    fn draw_pixel(&mut self, x: i32, y: i32, color: Grey) {
        let Some(index) = self.index(x, y) else {
            return;
        };
        let byte = &mut self.data[index];
        if x % 2 == 0 {
            *byte = (*byte & 0xF0) | color.level();
        } else {
            *byte = (*byte & 0x0F) | (color.level() << 4);
        }
    }

    fn draw_hline(&mut self, x: i32, y: i32, length: i32, color: Grey) {
        if y < 0 || y as u32 >= self.height {
            return;
        }
        let start = x.max(0);
        let end = x.saturating_add(length).min(self.width as i32);
        for xx in start..end {
            self.draw_pixel(xx, y, color);
        }
    }
}

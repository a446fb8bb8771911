//! Shared fixtures for integration tests.

#![allow(dead_code)]

use ufont::layout::Grey;
use ufont::rendering::Framebuffer;
use ufont::writer::{FontBuilder, GlyphBitmap};

/// One recorded framebuffer call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Call {
    Pixel { x: i32, y: i32, color: u8 },
    HLine { x: i32, y: i32, len: i32, color: u8 },
}

impl Call {
    /// Columns covered by this call.
    pub fn span(&self) -> (i32, i32, i32) {
        match *self {
            Call::Pixel { x, y, .. } => (x, x + 1, y),
            Call::HLine { x, y, len, .. } => (x, x + len, y),
        }
    }
}

/// Framebuffer that records every primitive call.
#[derive(Debug, Default)]
pub struct RecordingFramebuffer {
    pub calls: Vec<Call>,
}

impl Framebuffer for RecordingFramebuffer {
    fn draw_pixel(&mut self, x: i32, y: i32, color: Grey) {
        self.calls.push(Call::Pixel {
            x,
            y,
            color: color.level(),
        });
    }

    fn draw_hline(&mut self, x: i32, y: i32, length: i32, color: Grey) {
        self.calls.push(Call::HLine {
            x,
            y,
            len: length,
            color: color.level(),
        });
    }
}

/// A solid `width x height` block.
pub fn solid(width: u16, height: u16) -> GlyphBitmap {
    GlyphBitmap::from_coverage(width, height, vec![15; width as usize * height as usize])
        .expect("coverage matches dimensions")
}

/// Font with 'A'..='Z', each a solid 8x16 block, advance 8, left 0, top 0.
pub fn block_font(bits_per_pixel: u8, compressed: bool) -> Vec<u8> {
    let mut builder = FontBuilder::new(bits_per_pixel, 16, 12, -4).compressed(compressed);
    for ch in 'A'..='Z' {
        builder.add_glyph(ch, solid(8, 16), 8, 0, 0);
    }
    builder.build().unwrap()
}

/// Font with baseline-relative glyphs: 'a' 4x6 above the baseline,
/// 'g' 4x8 with a 2 pixel descender, '?' 3x6, ' ' with no bitmap.
pub fn text_font(compressed: bool) -> Vec<u8> {
    let mut builder = FontBuilder::new(4, 12, 9, -3).compressed(compressed);
    builder
        .add_glyph(' ', GlyphBitmap::blank(0, 0), 3, 0, 0)
        .add_glyph('?', solid(3, 6), 5, 1, 6)
        .add_glyph(
            'a',
            GlyphBitmap::from_ascii(&[".##.", "...#", ".###", "#..#", "#..#", ".###"]),
            5,
            0,
            6,
        )
        .add_glyph(
            'g',
            GlyphBitmap::from_ascii(&[
                ".###", "#..#", "#..#", "#..#", ".###", "...#", "...#", "###.",
            ]),
            5,
            0,
            6,
        );
    builder.build().unwrap()
}

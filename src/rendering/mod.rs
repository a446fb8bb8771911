//! Rasterizing text into caller-owned framebuffers.
//!
//! The engine never allocates or owns a framebuffer. Callers implement
//! [`Framebuffer`] (a pixel write and a horizontal run) for whatever memory
//! their display uses; [`GreyFramebuffer`] is a ready-made 4 bpp buffer.
//!
//! ## Example
//!
//! ```
//! use ufont::fonts::UFont;
//! use ufont::rendering::{GreyFramebuffer, write_default};
//! use ufont::writer::{FontBuilder, GlyphBitmap};
//!
//! let mut builder = FontBuilder::new(1, 10, 8, -2);
//! builder.add_glyph('I', GlyphBitmap::from_ascii(&["#"; 8]), 2, 0, 8);
//! let bytes = builder.build().unwrap();
//! let font = UFont::parse(&bytes).unwrap();
//!
//! let mut fb = GreyFramebuffer::new(16, 10);
//! let (mut x, mut y) = (0, 8);
//! write_default(&font, "II", &mut x, &mut y, &mut fb).unwrap();
//! assert_eq!((x, y), (4, 8));
//! ```

mod framebuffer;
mod text_rasterizer;

pub use framebuffer::GreyFramebuffer;
pub use text_rasterizer::{
    draw_layout, write_bytes, write_default, write_string, write_string_in_box,
};

use crate::geometry::Rect;
use crate::layout::Grey;

/// Drawing primitives supplied by the display environment.
pub trait Framebuffer {
    /// Draw a single pixel.
    fn draw_pixel(&mut self, x: i32, y: i32, color: Grey);

    /// Draw a horizontal run of `length` pixels starting at `(x, y)`.
    fn draw_hline(&mut self, x: i32, y: i32, length: i32, color: Grey) {
        for i in 0..length.max(0) {
            self.draw_pixel(x.saturating_add(i), y, color);
        }
    }

    /// Fill a rectangle, one horizontal run per row.
    fn fill_rect(&mut self, rect: Rect, color: Grey) {
        if rect.is_empty() {
            return;
        }
        for y in rect.top()..rect.bottom() {
            self.draw_hline(rect.left(), y, rect.width, color);
        }
    }
}

impl<F: Framebuffer + ?Sized> Framebuffer for &mut F {
    fn draw_pixel(&mut self, x: i32, y: i32, color: Grey) {
        (**self).draw_pixel(x, y, color)
    }

    fn draw_hline(&mut self, x: i32, y: i32, length: i32, color: Grey) {
        (**self).draw_hline(x, y, length, color)
    }

    fn fill_rect(&mut self, rect: Rect, color: Grey) {
        (**self).fill_rect(rect, color)
    }
}

// Allow some clippy lints that are too pedantic for this project
#![allow(clippy::too_many_arguments)]
#![allow(clippy::needless_range_loop)]
#![allow(clippy::enum_variant_names)]
// Allow unused for tests
#![cfg_attr(test, allow(dead_code))]

//! # ufont
//!
//! Bitmap font engine for greyscale e-paper and other small displays.
//!
//! ## Core Features
//!
//! - **Zero-copy loading**: a parsed [`UFont`] borrows its buffer; glyph
//!   records, unicode intervals and bitmap data are read in place
//! - **Compact storage**: 1 or 4 bits per pixel, optionally zlib-compressed
//!   per glyph
//! - **Layout**: multi-line strings, left/right/center alignment, bounding
//!   boxes, fallback glyphs
//! - **Rendering**: 16-level grey text through a two-method
//!   [`Framebuffer`] trait, with optional background fill
//! - **Font registry**: named handles for loaded fonts
//!
//! ## Architecture
//!
//! ```text
//! bytes ──► fonts::UFont::parse ──► UFont (borrowed tables)
//!                                      │
//! text ──► layout::TextLayout ◄────────┤ interval lookup
//!              │                       │
//!              ▼                       ▼
//!        rendering::draw_layout ◄── decoders::decode_glyph
//!              │
//!              ▼
//!          Framebuffer
//! ```
//!
//! ## Quick Start
//!
//! ```
//! use ufont::{FontProperties, UFont};
//! use ufont::rendering::{GreyFramebuffer, write_string};
//! use ufont::writer::{FontBuilder, GlyphBitmap};
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let mut builder = FontBuilder::new(4, 12, 9, -3).compressed(true);
//! builder.add_glyph('o', GlyphBitmap::from_ascii(&[".##.", "#..#", "#..#", ".##."]), 5, 0, 4);
//! let bytes = builder.build()?;
//!
//! let font = UFont::parse(&bytes)?;
//! let mut fb = GreyFramebuffer::new(32, 12);
//! let (mut x, mut y) = (1, 9);
//! write_string(&font, "oo", &mut x, &mut y, &mut fb, &FontProperties::default())?;
//! assert_eq!(x, 11);
//! # Ok(())
//! # }
//! ```

#![warn(missing_docs)]

// Error handling
pub mod error;

// Container parsing
pub mod fonts;
pub mod parser_config;

// Glyph bitmap decoding
pub mod decoders;

// Geometry primitives
pub mod geometry;

// Text layout
pub mod layout;

// Rasterization
pub mod rendering;

// Font registry
pub mod font_manager;

// Container writer
pub mod writer;

// Re-exports
pub use error::{DecodeError, DrawError, Error, ParseError, Result};
pub use font_manager::FontManager;
pub use fonts::{Glyph, UFont, UnicodeInterval, find_glyph};
pub use geometry::Rect;
pub use layout::{
    Alignment, FontFlags, FontProperties, Grey, TextLayout, font_properties_default, string_rect,
    text_bounds,
};
pub use parser_config::ParserOptions;
pub use rendering::{Framebuffer, GreyFramebuffer};

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

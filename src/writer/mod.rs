//! Font container writer.
//!
//! Produces the chunked container read by [`crate::fonts::UFont`] from
//! coverage bitmaps. Used by font conversion tools and by tests that need
//! fonts with exact, known contents.
//!
//! ```text
//! GlyphBitmap (coverage 0..=15)
//!     ↓ pack_rows (1 or 4 bpp)
//!     ↓ zlib (optional, per glyph)
//! HEAD | GLYF | INTV | BMAP
//! ```

mod font_builder;

pub use crate::decoders::GlyphBitmap;
pub use font_builder::{FontBuilder, pack_rows};

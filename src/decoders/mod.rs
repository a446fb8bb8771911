//! Glyph bitmap decoders.
//!
//! Glyph bitmaps are stored either raw (row-major, packed at the font's bit
//! depth) or as individual zlib streams. [`decode_glyph`] hides that branch:
//! whatever the storage form, it yields one coverage byte per pixel.
//!
//! Decoding happens per glyph, on demand. There is no cache; callers that
//! redraw the same glyphs often can layer one on top.

mod bitmap;
mod flate;

pub use bitmap::{GlyphBitmap, MAX_COVERAGE, decode_glyph, glyph_data, unpack_rows};
pub use flate::FlateDecoder;

use crate::error::DecodeError;

/// Trait for glyph stream decoders.
pub trait StreamDecoder {
    /// Decode the input data.
    ///
    /// # Arguments
    ///
    /// * `input` - The compressed glyph data
    ///
    /// # Returns
    ///
    /// The decoded, still packed, bitmap rows.
    fn decode(&self, input: &[u8]) -> Result<Vec<u8>, DecodeError>;

    /// Get the name of this decoder (e.g., "FlateDecode").
    fn name(&self) -> &str;
}

/// Check the expansion ratio of a compressed glyph before inflating it.
///
/// A ratio of 0 disables the check.
pub(crate) fn check_ratio(
    compressed_size: usize,
    decoded_size: usize,
    max_ratio: u32,
) -> Result<(), DecodeError> {
    if max_ratio == 0 || compressed_size == 0 {
        return Ok(());
    }
    let ratio = decoded_size / compressed_size;
    if ratio > max_ratio as usize {
        return Err(DecodeError::RatioExceeded {
            ratio,
            limit: max_ratio,
        });
    }
    Ok(())
}

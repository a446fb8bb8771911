//! Glyph bitmap access and unpacking.

use std::borrow::Cow;

use super::{FlateDecoder, StreamDecoder, check_ratio};
use crate::error::DecodeError;
use crate::fonts::{Glyph, UFont};

/// Highest coverage level in a decoded bitmap.
pub const MAX_COVERAGE: u8 = 15;

/// A decoded glyph: one coverage byte (0..=15) per pixel, row-major.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct GlyphBitmap {
    width: u16,
    height: u16,
    coverage: Vec<u8>,
}

impl GlyphBitmap {
    /// An all-zero bitmap.
    pub fn blank(width: u16, height: u16) -> Self {
        Self {
            width,
            height,
            coverage: vec![0; width as usize * height as usize],
        }
    }

    /// Wrap a row-major coverage buffer.
    ///
    /// Returns `None` if the buffer length does not match the dimensions.
    /// Levels above [`MAX_COVERAGE`] are clamped.
    pub fn from_coverage(width: u16, height: u16, mut coverage: Vec<u8>) -> Option<Self> {
        if coverage.len() != width as usize * height as usize {
            return None;
        }
        for level in &mut coverage {
            *level = (*level).min(MAX_COVERAGE);
        }
        Some(Self {
            width,
            height,
            coverage,
        })
    }

    /// Build a bitmap from ASCII art.
    ///
    /// `.` or space is empty, `#` is full coverage and a hex digit is that
    /// level. Rows shorter than the widest row are padded with empty pixels.
    ///
    /// ```
    /// use ufont::decoders::GlyphBitmap;
    ///
    /// let bitmap = GlyphBitmap::from_ascii(&["#.", ".8"]);
    /// assert_eq!(bitmap.get(0, 0), 15);
    /// assert_eq!(bitmap.get(1, 1), 8);
    /// ```
    pub fn from_ascii(rows: &[&str]) -> Self {
        let width = rows.iter().map(|r| r.chars().count()).max().unwrap_or(0);
        let mut coverage = Vec::with_capacity(width * rows.len());
        for row in rows {
            let mut n = 0;
            for ch in row.chars() {
                coverage.push(match ch {
                    '#' => MAX_COVERAGE,
                    c => c.to_digit(16).map(|d| d as u8).unwrap_or(0),
                });
                n += 1;
            }
            coverage.extend(std::iter::repeat_n(0, width - n));
        }
        Self {
            width: width as u16,
            height: rows.len() as u16,
            coverage,
        }
    }

    /// Width in pixels.
    pub fn width(&self) -> u16 {
        self.width
    }

    /// Height in pixels.
    pub fn height(&self) -> u16 {
        self.height
    }

    /// Coverage at `(x, y)`, 0 outside the bitmap.
    pub fn get(&self, x: usize, y: usize) -> u8 {
        if x >= self.width as usize || y >= self.height as usize {
            return 0;
        }
        self.coverage[y * self.width as usize + x]
    }

    /// All coverage bytes, row-major.
    pub fn coverage(&self) -> &[u8] {
        &self.coverage
    }

    /// Iterate rows of coverage bytes.
    pub fn rows(&self) -> impl Iterator<Item = &[u8]> {
        // chunks_exact panics on 0; a zero-width bitmap has no pixels anyway
        self.coverage.chunks_exact(self.width.max(1) as usize)
    }

    /// True if no pixel has any coverage.
    pub fn is_blank(&self) -> bool {
        self.coverage.iter().all(|&c| c == 0)
    }
}

/// Stored bytes of a glyph's bitmap, still packed.
///
/// Raw glyphs are returned as a borrowed slice of the bitmap blob; only
/// glyphs stored compressed go through [`FlateDecoder`].
pub fn glyph_data<'f>(font: &'f UFont<'_>, glyph: &Glyph) -> Result<Cow<'f, [u8]>, DecodeError> {
    let bpp = font.bits_per_pixel();
    let blob = font.bitmap();
    let range = glyph
        .storage_range(font.compressed(), bpp)
        .filter(|r| r.end <= blob.len())
        .ok_or(DecodeError::OutOfBounds {
            offset: glyph.data_offset as usize,
            end: (glyph.data_offset as usize).saturating_add(glyph.compressed_size as usize),
            len: blob.len(),
        })?;
    let stored = &blob[range];

    if !glyph.is_stored_compressed(font.compressed()) {
        return Ok(Cow::Borrowed(stored));
    }

    let expected = glyph.raw_len(bpp);
    check_ratio(stored.len(), expected, font.max_decompression_ratio())?;
    log::trace!(
        "Inflating glyph: {} -> {} bytes ({}x{} @ {} bpp)",
        stored.len(),
        expected,
        glyph.width,
        glyph.height,
        bpp
    );
    FlateDecoder::new(expected).decode(stored).map(Cow::Owned)
}

/// Expand packed rows into one coverage byte per pixel.
///
/// At 1 bpp the most significant bit is the leftmost pixel and a set bit is
/// full coverage. At 4 bpp the low nibble is the even (left) pixel.
pub fn unpack_rows(
    packed: &[u8],
    width: u16,
    height: u16,
    bits_per_pixel: u8,
) -> Result<GlyphBitmap, DecodeError> {
    let (w, h) = (width as usize, height as usize);
    let stride = (w * bits_per_pixel as usize).div_ceil(8);
    if packed.len() != stride * h {
        return Err(DecodeError::SizeMismatch {
            expected: stride * h,
            actual: packed.len(),
        });
    }

    let total = w * h;
    let mut coverage = Vec::new();
    coverage
        .try_reserve_exact(total)
        .map_err(|_| DecodeError::Alloc(total))?;

    for row in packed.chunks_exact(stride.max(1)).take(h) {
        for x in 0..w {
            let level = match bits_per_pixel {
                1 => {
                    if row[x / 8] & (0x80 >> (x % 8)) != 0 {
                        MAX_COVERAGE
                    } else {
                        0
                    }
                },
                _ => {
                    let byte = row[x / 2];
                    if x % 2 == 0 { byte & 0x0F } else { byte >> 4 }
                },
            };
            coverage.push(level);
        }
    }

    Ok(GlyphBitmap {
        width,
        height,
        coverage,
    })
}

/// Decode a glyph into row-major coverage.
///
/// Always yields exactly `width * height` bytes regardless of storage form.
pub fn decode_glyph(font: &UFont<'_>, glyph: &Glyph) -> Result<GlyphBitmap, DecodeError> {
    let packed = glyph_data(font, glyph)?;
    unpack_rows(&packed, glyph.width, glyph.height, font.bits_per_pixel())
}

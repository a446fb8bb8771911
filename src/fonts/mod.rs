//! Font descriptor and glyph records.
//!
//! A [`UFont`] is an immutable view over font data. It holds the glyph table,
//! the interval table and the bitmap blob as separate regions (borrowed or
//! owned), validated once at load time. The regions either come out of a
//! parsed container or are supplied directly with [`UFont::from_parts`], for
//! fonts compiled into the binary as static arrays. Records are read out of
//! the regions on demand; nothing is copied when loading borrowed data.

use std::borrow::Cow;
use std::ops::Range;

use byteorder::{ByteOrder, LittleEndian};

use crate::error::ParseError;
use crate::parser_config::ParserOptions;

pub mod container;
pub mod glyphs;
pub mod intervals;

pub use glyphs::GlyphTable;
pub use intervals::IntervalTable;

/// Font-wide metrics and flags from the `HEAD` chunk.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FontHeader {
    /// Does this font use compressed glyph bitmaps?
    pub compressed: bool,
    /// Packing density of glyph bitmaps (1 or 4)
    pub bits_per_pixel: u8,
    /// Newline distance (y axis)
    pub advance_y: u16,
    /// Maximal height of a glyph above the baseline
    pub ascender: i16,
    /// Lowest extent of a glyph relative to the baseline (negative below)
    pub descender: i16,
    /// Number of records in the glyph table
    pub glyph_count: u32,
}

/// Per-glyph metrics and storage location.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Glyph {
    /// Bitmap width in pixels
    pub width: u16,
    /// Bitmap height in pixels
    pub height: u16,
    /// Distance to advance the cursor (x axis)
    pub advance_x: u16,
    /// X distance from the pen position to the bitmap's left edge
    pub left: i16,
    /// Y distance from the baseline up to the bitmap's top edge
    pub top: i16,
    /// Size of the zlib-compressed bitmap, 0 for raw storage
    pub compressed_size: u32,
    /// Byte offset into the bitmap blob
    pub data_offset: u32,
}

impl Glyph {
    /// Encoded size of one glyph record.
    pub const SIZE: usize = 18;

    /// Read a record from the first [`Glyph::SIZE`] bytes of `bytes`.
    pub(crate) fn read(bytes: &[u8]) -> Self {
        Self {
            width: LittleEndian::read_u16(&bytes[0..2]),
            height: LittleEndian::read_u16(&bytes[2..4]),
            advance_x: LittleEndian::read_u16(&bytes[4..6]),
            left: LittleEndian::read_i16(&bytes[6..8]),
            top: LittleEndian::read_i16(&bytes[8..10]),
            compressed_size: LittleEndian::read_u32(&bytes[10..14]),
            data_offset: LittleEndian::read_u32(&bytes[14..18]),
        }
    }

    /// Bytes per bitmap row at the given packing density.
    pub fn stride(&self, bits_per_pixel: u8) -> usize {
        (self.width as usize * bits_per_pixel as usize).div_ceil(8)
    }

    /// Size of the uncompressed bitmap in bytes.
    pub fn raw_len(&self, bits_per_pixel: u8) -> usize {
        self.stride(bits_per_pixel) * self.height as usize
    }

    /// Whether this glyph's bitmap goes through the decompressor.
    ///
    /// A compressed font may still store individual glyphs raw by leaving
    /// `compressed_size` at 0.
    pub fn is_stored_compressed(&self, font_compressed: bool) -> bool {
        font_compressed && self.compressed_size > 0
    }

    /// Byte range of this glyph's stored data inside the bitmap blob.
    ///
    /// Returns `None` if the range overflows `usize`.
    pub fn storage_range(&self, font_compressed: bool, bits_per_pixel: u8) -> Option<Range<usize>> {
        let start = self.data_offset as usize;
        let len = if self.is_stored_compressed(font_compressed) {
            self.compressed_size as usize
        } else {
            self.raw_len(bits_per_pixel)
        };
        Some(start..start.checked_add(len)?)
    }
}

/// A contiguous run of code points mapped onto consecutive glyphs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct UnicodeInterval {
    /// The first unicode code point of the interval
    pub first: u32,
    /// The last unicode code point of the interval (inclusive)
    pub last: u32,
    /// Index of the first code point into the glyph array
    pub offset: u32,
}

impl UnicodeInterval {
    /// Encoded size of one interval record.
    pub const SIZE: usize = 12;

    pub(crate) fn read(bytes: &[u8]) -> Self {
        Self {
            first: LittleEndian::read_u32(&bytes[0..4]),
            last: LittleEndian::read_u32(&bytes[4..8]),
            offset: LittleEndian::read_u32(&bytes[8..12]),
        }
    }

    /// Check whether `code_point` falls inside this interval.
    pub fn contains(&self, code_point: u32) -> bool {
        self.first <= code_point && code_point <= self.last
    }

    /// Glyph index for `code_point`, if it lies in this interval.
    pub fn glyph_index(&self, code_point: u32) -> Option<usize> {
        if !self.contains(code_point) {
            return None;
        }
        Some(self.offset as usize + (code_point - self.first) as usize)
    }
}

/// A loaded font.
///
/// The lifetime ties the descriptor to the input buffers. Use
/// [`UFont::into_owned`] to detach it.
#[derive(Debug, Clone)]
pub struct UFont<'a> {
    header: FontHeader,
    glyphs: Cow<'a, [u8]>,
    intervals: Cow<'a, [u8]>,
    bitmap: Cow<'a, [u8]>,
    max_decompression_ratio: u32,
}

impl<'a> UFont<'a> {
    /// Build a font from separately stored header, glyph, interval and
    /// bitmap regions, with default (lenient) options.
    ///
    /// The regions use the same record encodings as the container chunks
    /// and go through the same validation. The font borrows all three
    /// slices.
    ///
    /// # Examples
    ///
    /// ```
    /// use ufont::fonts::{FontHeader, UFont};
    ///
    /// // one raw 8x1 glyph for 'A'
    /// static GLYPHS: [u8; 18] = [8, 0, 1, 0, 8, 0, 0, 0, 1, 0, 0, 0, 0, 0, 0, 0, 0, 0];
    /// static INTERVALS: [u8; 12] = [65, 0, 0, 0, 65, 0, 0, 0, 0, 0, 0, 0];
    /// static BITMAP: [u8; 1] = [0xFF];
    ///
    /// let header = FontHeader {
    ///     compressed: false,
    ///     bits_per_pixel: 1,
    ///     advance_y: 2,
    ///     ascender: 1,
    ///     descender: 0,
    ///     glyph_count: 1,
    /// };
    /// let font = UFont::from_parts(header, &GLYPHS, &INTERVALS, &BITMAP).unwrap();
    /// assert_eq!(font.glyph('A' as u32).map(|g| g.width), Some(8));
    /// ```
    pub fn from_parts(
        header: FontHeader,
        glyphs: &'a [u8],
        intervals: &'a [u8],
        bitmap: &'a [u8],
    ) -> Result<Self, ParseError> {
        Self::from_parts_with_options(header, glyphs, intervals, bitmap, &ParserOptions::default())
    }

    /// Build a font from separate regions with explicit options.
    pub fn from_parts_with_options(
        header: FontHeader,
        glyphs: &'a [u8],
        intervals: &'a [u8],
        bitmap: &'a [u8],
        options: &ParserOptions,
    ) -> Result<Self, ParseError> {
        container::validate_regions(&header, glyphs, intervals, bitmap, options)?;
        log::debug!(
            "Loaded font from parts: {} glyphs, {} intervals, {} bitmap bytes",
            header.glyph_count,
            intervals.len() / UnicodeInterval::SIZE,
            bitmap.len()
        );
        Ok(Self {
            header,
            glyphs: Cow::Borrowed(glyphs),
            intervals: Cow::Borrowed(intervals),
            bitmap: Cow::Borrowed(bitmap),
            max_decompression_ratio: options.max_decompression_ratio,
        })
    }

    /// Font-wide header fields.
    pub fn header(&self) -> &FontHeader {
        &self.header
    }

    /// Does this font use compressed glyph bitmaps?
    pub fn compressed(&self) -> bool {
        self.header.compressed
    }

    /// Packing density of glyph bitmaps.
    pub fn bits_per_pixel(&self) -> u8 {
        self.header.bits_per_pixel
    }

    /// Distance between consecutive baselines.
    pub fn advance_y(&self) -> i32 {
        self.header.advance_y as i32
    }

    /// Maximal height of a glyph above the baseline.
    pub fn ascender(&self) -> i32 {
        self.header.ascender as i32
    }

    /// Lowest glyph extent relative to the baseline (negative below it).
    pub fn descender(&self) -> i32 {
        self.header.descender as i32
    }

    /// Number of glyph records.
    pub fn glyph_count(&self) -> usize {
        self.header.glyph_count as usize
    }

    /// Number of unicode intervals.
    pub fn interval_count(&self) -> usize {
        self.intervals.len() / UnicodeInterval::SIZE
    }

    /// The glyph record table.
    pub fn glyph_table(&self) -> GlyphTable<'_> {
        GlyphTable::new(&self.glyphs)
    }

    /// The unicode interval table.
    pub fn intervals(&self) -> IntervalTable<'_> {
        IntervalTable::new(&self.intervals)
    }

    /// Concatenated glyph bitmaps.
    pub fn bitmap(&self) -> &[u8] {
        &self.bitmap
    }

    /// Index into the glyph table for `code_point`.
    pub fn glyph_index(&self, code_point: u32) -> Option<usize> {
        self.intervals().resolve(code_point)
    }

    /// Get the font glyph for a unicode code point.
    pub fn glyph(&self, code_point: u32) -> Option<Glyph> {
        let index = self.glyph_index(code_point)?;
        self.glyph_table().get(index)
    }

    /// Check whether the font defines a glyph for `code_point`.
    pub fn has_glyph(&self, code_point: u32) -> bool {
        self.glyph_index(code_point).is_some()
    }

    /// Whether the font data is borrowed rather than owned.
    pub fn is_borrowed(&self) -> bool {
        matches!(self.bitmap, Cow::Borrowed(_))
    }

    /// Copy the font data so the font outlives its input.
    pub fn into_owned(self) -> UFont<'static> {
        UFont {
            header: self.header,
            glyphs: Cow::Owned(self.glyphs.into_owned()),
            intervals: Cow::Owned(self.intervals.into_owned()),
            bitmap: Cow::Owned(self.bitmap.into_owned()),
            max_decompression_ratio: self.max_decompression_ratio,
        }
    }

    pub(crate) fn max_decompression_ratio(&self) -> u32 {
        self.max_decompression_ratio
    }
}

/// Get the font glyph for a unicode code point.
///
/// Returns `None` when no interval covers `code_point`; fallback policy is
/// left to the caller.
pub fn find_glyph(font: &UFont<'_>, code_point: u32) -> Option<Glyph> {
    font.glyph(code_point)
}

//! Font container parser.
//!
//! The container is a chunked, IFF-style layout with a fixed little-endian
//! byte order:
//!
//! ```text
//! offset 0   magic    "UFNT"
//! offset 4   version  u16 (= 1)
//! offset 6   reserved u16
//! offset 8.. chunks:  tag [u8; 4], length u32, payload[length]
//! ```
//!
//! Required chunks, each exactly once and in any order:
//!
//! | tag    | payload                                                        |
//! |--------|----------------------------------------------------------------|
//! | `HEAD` | flags u16, bpp u8, reserved u8, advance_y u16, ascender i16,   |
//! |        | descender i16, reserved u16, glyph_count u32 (16 bytes)        |
//! | `GLYF` | `glyph_count` glyph records of 18 bytes                        |
//! | `INTV` | interval records of 12 bytes, sorted by `first`, disjoint      |
//! | `BMAP` | concatenated glyph bitmaps                                     |
//!
//! Every region is validated here, once. Later lookups and decodes index
//! into the ranges without re-checking container structure.

use std::borrow::Cow;
use std::ops::Range;

use byteorder::{ByteOrder, LittleEndian};

use super::{FontHeader, Glyph, GlyphTable, IntervalTable, UFont, UnicodeInterval};
use crate::error::ParseError;
use crate::parser_config::ParserOptions;

/// File magic.
pub const MAGIC: &[u8; 4] = b"UFNT";
/// Supported container version.
pub const VERSION: u16 = 1;
/// Size of the fixed file header.
pub const FILE_HEADER_LEN: usize = 8;
/// Size of a chunk header (tag + length).
pub const CHUNK_HEADER_LEN: usize = 8;
/// Size of the `HEAD` chunk payload.
pub const HEAD_LEN: usize = 16;

/// Font header chunk tag.
pub const TAG_HEAD: [u8; 4] = *b"HEAD";
/// Glyph table chunk tag.
pub const TAG_GLYF: [u8; 4] = *b"GLYF";
/// Interval table chunk tag.
pub const TAG_INTV: [u8; 4] = *b"INTV";
/// Bitmap blob chunk tag.
pub const TAG_BMAP: [u8; 4] = *b"BMAP";

/// `HEAD` flag: glyph bitmaps are zlib-compressed.
pub const FLAG_COMPRESSED: u16 = 0x1;

/// A chunk located inside the container.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Chunk {
    /// Four-byte chunk tag
    pub tag: [u8; 4],
    /// Payload range in the container
    pub range: Range<usize>,
}

/// Iterator over the chunks following the file header.
pub struct ChunkReader<'b> {
    data: &'b [u8],
    pos: usize,
}

impl<'b> ChunkReader<'b> {
    /// Start reading chunks at `pos`.
    pub fn new(data: &'b [u8], pos: usize) -> Self {
        Self { data, pos }
    }
}

impl Iterator for ChunkReader<'_> {
    type Item = Result<Chunk, ParseError>;

    fn next(&mut self) -> Option<Self::Item> {
        let remaining = self.data.len().saturating_sub(self.pos);
        if remaining == 0 {
            return None;
        }
        if remaining < CHUNK_HEADER_LEN {
            self.pos = self.data.len();
            return Some(Err(ParseError::Truncated {
                what: "chunk header",
                needed: CHUNK_HEADER_LEN,
                available: remaining,
            }));
        }

        let header = &self.data[self.pos..self.pos + CHUNK_HEADER_LEN];
        let mut tag = [0u8; 4];
        tag.copy_from_slice(&header[0..4]);
        let length = LittleEndian::read_u32(&header[4..8]) as usize;

        let start = self.pos + CHUNK_HEADER_LEN;
        let available = self.data.len() - start;
        if length > available {
            self.pos = self.data.len();
            return Some(Err(ParseError::Truncated {
                what: chunk_name(&tag),
                needed: length,
                available,
            }));
        }

        self.pos = start + length;
        Some(Ok(Chunk {
            tag,
            range: start..start + length,
        }))
    }
}

fn chunk_name(tag: &[u8; 4]) -> &'static str {
    match tag {
        &TAG_HEAD => "HEAD chunk",
        &TAG_GLYF => "GLYF chunk",
        &TAG_INTV => "INTV chunk",
        &TAG_BMAP => "BMAP chunk",
        _ => "chunk",
    }
}

fn tag_display(tag: &[u8; 4]) -> String {
    String::from_utf8_lossy(tag).into_owned()
}

fn store(slot: &mut Option<Range<usize>>, chunk: Chunk) -> Result<(), ParseError> {
    if slot.is_some() {
        return Err(ParseError::Malformed(format!(
            "duplicate {} chunk",
            tag_display(&chunk.tag)
        )));
    }
    *slot = Some(chunk.range);
    Ok(())
}

fn require(slot: Option<Range<usize>>, tag: &[u8; 4]) -> Result<Range<usize>, ParseError> {
    slot.ok_or_else(|| ParseError::Malformed(format!("missing {} chunk", tag_display(tag))))
}

fn parse_head(payload: &[u8], options: &ParserOptions) -> Result<FontHeader, ParseError> {
    if payload.len() < HEAD_LEN {
        return Err(ParseError::Truncated {
            what: "HEAD chunk",
            needed: HEAD_LEN,
            available: payload.len(),
        });
    }
    if options.strict && payload.len() != HEAD_LEN {
        return Err(ParseError::Malformed(format!(
            "HEAD chunk is {} bytes, expected {}",
            payload.len(),
            HEAD_LEN
        )));
    }

    let flags = LittleEndian::read_u16(&payload[0..2]);
    let bits_per_pixel = payload[2];
    let reserved_a = payload[3];
    let advance_y = LittleEndian::read_u16(&payload[4..6]);
    let ascender = LittleEndian::read_i16(&payload[6..8]);
    let descender = LittleEndian::read_i16(&payload[8..10]);
    let reserved_b = LittleEndian::read_u16(&payload[10..12]);
    let glyph_count = LittleEndian::read_u32(&payload[12..16]);

    if options.strict && (flags & !FLAG_COMPRESSED != 0 || reserved_a != 0 || reserved_b != 0) {
        return Err(ParseError::Malformed(format!(
            "reserved HEAD bits set (flags {:#06x})",
            flags
        )));
    }
    Ok(FontHeader {
        compressed: flags & FLAG_COMPRESSED != 0,
        bits_per_pixel,
        advance_y,
        ascender,
        descender,
        glyph_count,
    })
}

fn validate_glyphs(
    glyphs: GlyphTable<'_>,
    header: &FontHeader,
    bitmap_len: usize,
    options: &ParserOptions,
) -> Result<(), ParseError> {
    for (i, glyph) in glyphs.iter().enumerate() {
        if !options.glyph_dimension_ok(glyph.width) || !options.glyph_dimension_ok(glyph.height) {
            return Err(ParseError::Malformed(format!(
                "glyph {} is {}x{}, limit is {}",
                i, glyph.width, glyph.height, options.max_glyph_dimension
            )));
        }
        let range = glyph
            .storage_range(header.compressed, header.bits_per_pixel)
            .ok_or_else(|| ParseError::Malformed(format!("glyph {} data range overflows", i)))?;
        if range.end > bitmap_len {
            return Err(ParseError::Truncated {
                what: "glyph bitmap data",
                needed: range.end,
                available: bitmap_len,
            });
        }
    }
    Ok(())
}

/// Check the glyph, interval and bitmap regions against the header.
///
/// Shared by the container parser and [`UFont::from_parts`].
pub(crate) fn validate_regions(
    header: &FontHeader,
    glyphs: &[u8],
    intervals: &[u8],
    bitmap: &[u8],
    options: &ParserOptions,
) -> Result<(), ParseError> {
    if header.bits_per_pixel != 1 && header.bits_per_pixel != 4 {
        return Err(ParseError::Malformed(format!(
            "unsupported bits per pixel: {}",
            header.bits_per_pixel
        )));
    }
    if glyphs.len() % Glyph::SIZE != 0 {
        return Err(ParseError::Malformed(format!(
            "glyph table length {} is not a multiple of {}",
            glyphs.len(),
            Glyph::SIZE
        )));
    }
    if glyphs.len() / Glyph::SIZE != header.glyph_count as usize {
        return Err(ParseError::Malformed(format!(
            "header declares {} glyphs, glyph table holds {}",
            header.glyph_count,
            glyphs.len() / Glyph::SIZE
        )));
    }
    if intervals.len() % UnicodeInterval::SIZE != 0 {
        return Err(ParseError::Malformed(format!(
            "interval table length {} is not a multiple of {}",
            intervals.len(),
            UnicodeInterval::SIZE
        )));
    }

    IntervalTable::new(intervals).validate(header.glyph_count)?;
    validate_glyphs(GlyphTable::new(glyphs), header, bitmap.len(), options)
}

/// Slice a region out of the container, keeping borrowed input borrowed.
fn region<'a>(data: &Cow<'a, [u8]>, range: Range<usize>) -> Cow<'a, [u8]> {
    match *data {
        Cow::Borrowed(bytes) => Cow::Borrowed(&bytes[range]),
        Cow::Owned(ref bytes) => Cow::Owned(bytes[range].to_vec()),
    }
}

impl<'a> UFont<'a> {
    /// Parse a font container with default (lenient) options.
    ///
    /// The returned font borrows `data`; nothing is copied.
    ///
    /// # Examples
    ///
    /// ```
    /// use ufont::fonts::UFont;
    /// use ufont::writer::{FontBuilder, GlyphBitmap};
    ///
    /// let mut builder = FontBuilder::new(1, 16, 12, -4);
    /// builder.add_glyph('A', GlyphBitmap::blank(8, 12), 8, 0, 12);
    /// let bytes = builder.build().unwrap();
    ///
    /// let font = UFont::parse(&bytes).unwrap();
    /// assert!(font.has_glyph('A' as u32));
    /// assert!(!font.has_glyph('B' as u32));
    /// ```
    pub fn parse(data: &'a [u8]) -> Result<Self, ParseError> {
        Self::parse_with_options(data, &ParserOptions::default())
    }

    /// Parse a font container with explicit options.
    pub fn parse_with_options(data: &'a [u8], options: &ParserOptions) -> Result<Self, ParseError> {
        Self::parse_cow(Cow::Borrowed(data), options)
    }

    fn parse_cow(data: Cow<'a, [u8]>, options: &ParserOptions) -> Result<Self, ParseError> {
        let bytes: &[u8] = &data;
        if options.max_file_size > 0 && bytes.len() > options.max_file_size {
            return Err(ParseError::Malformed(format!(
                "container is {} bytes, limit is {}",
                bytes.len(),
                options.max_file_size
            )));
        }
        if bytes.len() < FILE_HEADER_LEN {
            return Err(ParseError::Truncated {
                what: "file header",
                needed: FILE_HEADER_LEN,
                available: bytes.len(),
            });
        }
        if &bytes[0..4] != MAGIC {
            return Err(ParseError::Malformed(format!(
                "bad magic {:02x?}",
                &bytes[0..4]
            )));
        }
        let version = LittleEndian::read_u16(&bytes[4..6]);
        if version != VERSION {
            return Err(ParseError::Malformed(format!(
                "unsupported container version {}",
                version
            )));
        }
        if options.strict && LittleEndian::read_u16(&bytes[6..8]) != 0 {
            return Err(ParseError::Malformed("reserved header field set".to_string()));
        }

        let mut head = None;
        let mut glyf = None;
        let mut intv = None;
        let mut bmap = None;
        for chunk in ChunkReader::new(bytes, FILE_HEADER_LEN) {
            let chunk = chunk?;
            match chunk.tag {
                TAG_HEAD => store(&mut head, chunk)?,
                TAG_GLYF => store(&mut glyf, chunk)?,
                TAG_INTV => store(&mut intv, chunk)?,
                TAG_BMAP => store(&mut bmap, chunk)?,
                tag if options.allows_unknown_chunks() => {
                    log::warn!(
                        "Skipping unknown chunk {:?} ({} bytes)",
                        tag_display(&tag),
                        chunk.range.len()
                    );
                },
                tag => {
                    return Err(ParseError::Malformed(format!(
                        "unknown chunk {:?}",
                        tag_display(&tag)
                    )));
                },
            }
        }

        let head = require(head, &TAG_HEAD)?;
        let glyphs = require(glyf, &TAG_GLYF)?;
        let intervals = require(intv, &TAG_INTV)?;
        let bitmap = require(bmap, &TAG_BMAP)?;

        let header = parse_head(&bytes[head], options)?;
        validate_regions(
            &header,
            &bytes[glyphs.clone()],
            &bytes[intervals.clone()],
            &bytes[bitmap.clone()],
            options,
        )?;

        let interval_table = IntervalTable::new(&bytes[intervals.clone()]);
        log::debug!(
            "Parsed font: {} glyphs, {} intervals ({} code points), {} bitmap bytes, {} bpp{}",
            header.glyph_count,
            interval_table.len(),
            interval_table.code_point_count(),
            bitmap.len(),
            header.bits_per_pixel,
            if header.compressed { ", compressed" } else { "" }
        );

        Ok(UFont {
            header,
            glyphs: region(&data, glyphs),
            intervals: region(&data, intervals),
            bitmap: region(&data, bitmap),
            max_decompression_ratio: options.max_decompression_ratio,
        })
    }
}

impl UFont<'static> {
    /// Parse a container that the font takes ownership of.
    pub fn from_vec(data: Vec<u8>, options: &ParserOptions) -> Result<Self, ParseError> {
        Self::parse_cow(Cow::Owned(data), options)
    }
}

/// Parse a font container with default options.
pub fn parse(data: &[u8]) -> Result<UFont<'_>, ParseError> {
    UFont::parse(data)
}

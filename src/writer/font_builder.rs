//! Builder for font containers.

use std::collections::BTreeMap;
use std::io::Write;

use byteorder::{LittleEndian, WriteBytesExt};

use crate::decoders::GlyphBitmap;
use crate::error::{Error, Result};
use crate::fonts::container::{
    FILE_HEADER_LEN, FLAG_COMPRESSED, HEAD_LEN, MAGIC, TAG_BMAP, TAG_GLYF, TAG_HEAD, TAG_INTV,
    VERSION,
};
use crate::fonts::{Glyph, UnicodeInterval};

/// A glyph waiting to be written.
#[derive(Debug, Clone)]
struct PendingGlyph {
    bitmap: GlyphBitmap,
    advance_x: u16,
    left: i16,
    top: i16,
}

/// Assembles a font container from coverage bitmaps.
///
/// Glyphs are stored in code point order; runs of consecutive code points
/// share one unicode interval.
///
/// # Examples
///
/// ```
/// use ufont::writer::{FontBuilder, GlyphBitmap};
///
/// let mut builder = FontBuilder::new(4, 16, 12, -4).compressed(true);
/// builder
///     .add_glyph('a', GlyphBitmap::from_ascii(&[".8#", "#8."]), 4, 0, 2)
///     .add_glyph('b', GlyphBitmap::blank(3, 2), 4, 0, 2);
/// let bytes = builder.build().unwrap();
/// assert_eq!(&bytes[..4], b"UFNT");
/// ```
#[derive(Debug, Clone)]
pub struct FontBuilder {
    bits_per_pixel: u8,
    advance_y: u16,
    ascender: i16,
    descender: i16,
    compress: bool,
    glyphs: BTreeMap<u32, PendingGlyph>,
    extra_chunks: Vec<([u8; 4], Vec<u8>)>,
}

impl FontBuilder {
    /// Start a font with the given packing density and vertical metrics.
    pub fn new(bits_per_pixel: u8, advance_y: u16, ascender: i16, descender: i16) -> Self {
        Self {
            bits_per_pixel,
            advance_y,
            ascender,
            descender,
            compress: false,
            glyphs: BTreeMap::new(),
            extra_chunks: Vec::new(),
        }
    }

    /// Store glyph bitmaps zlib-compressed.
    pub fn compressed(mut self, compress: bool) -> Self {
        self.compress = compress;
        self
    }

    /// Add (or replace) the glyph for `ch`.
    pub fn add_glyph(
        &mut self,
        ch: char,
        bitmap: GlyphBitmap,
        advance_x: u16,
        left: i16,
        top: i16,
    ) -> &mut Self {
        self.add_code_point(ch as u32, bitmap, advance_x, left, top)
    }

    /// Add (or replace) the glyph for a raw code point.
    pub fn add_code_point(
        &mut self,
        code_point: u32,
        bitmap: GlyphBitmap,
        advance_x: u16,
        left: i16,
        top: i16,
    ) -> &mut Self {
        self.glyphs.insert(
            code_point,
            PendingGlyph {
                bitmap,
                advance_x,
                left,
                top,
            },
        );
        self
    }

    /// Append an extra chunk after the required ones.
    ///
    /// Readers skip chunks they do not know, so this is how optional
    /// metadata travels with a font.
    pub fn add_chunk(&mut self, tag: [u8; 4], payload: Vec<u8>) -> &mut Self {
        self.extra_chunks.push((tag, payload));
        self
    }

    /// Number of glyphs added so far.
    pub fn glyph_count(&self) -> usize {
        self.glyphs.len()
    }

    /// Serialize the container into a new buffer.
    pub fn build(&self) -> Result<Vec<u8>> {
        let mut out = Vec::new();
        self.write_to(&mut out)?;
        Ok(out)
    }

    /// Serialize the container into `writer`.
    pub fn write_to<W: Write>(&self, mut writer: W) -> Result<()> {
        if self.bits_per_pixel != 1 && self.bits_per_pixel != 4 {
            return Err(Error::Build(format!(
                "unsupported bits per pixel: {}",
                self.bits_per_pixel
            )));
        }

        let mut records = Vec::with_capacity(self.glyphs.len());
        let mut blob = Vec::new();
        for (&code_point, pending) in &self.glyphs {
            let packed = pack_rows(&pending.bitmap, self.bits_per_pixel);
            let stored = if self.compress && !packed.is_empty() {
                compress_data(&packed)?
            } else {
                packed
            };

            records.push(Glyph {
                width: pending.bitmap.width(),
                height: pending.bitmap.height(),
                advance_x: pending.advance_x,
                left: pending.left,
                top: pending.top,
                compressed_size: if self.compress {
                    to_u32(stored.len(), "compressed glyph")?
                } else {
                    0
                },
                data_offset: to_u32(blob.len(), "bitmap blob")?,
            });
            log::trace!(
                "Packed U+{:04X}: {} bytes stored",
                code_point,
                stored.len()
            );
            blob.extend_from_slice(&stored);
        }
        let intervals = coalesce(self.glyphs.keys().copied());

        let mut head = Vec::with_capacity(HEAD_LEN);
        head.write_u16::<LittleEndian>(if self.compress { FLAG_COMPRESSED } else { 0 })?;
        head.write_u8(self.bits_per_pixel)?;
        head.write_u8(0)?;
        head.write_u16::<LittleEndian>(self.advance_y)?;
        head.write_i16::<LittleEndian>(self.ascender)?;
        head.write_i16::<LittleEndian>(self.descender)?;
        head.write_u16::<LittleEndian>(0)?;
        head.write_u32::<LittleEndian>(to_u32(records.len(), "glyph count")?)?;

        let mut glyf = Vec::with_capacity(records.len() * Glyph::SIZE);
        for g in &records {
            glyf.write_u16::<LittleEndian>(g.width)?;
            glyf.write_u16::<LittleEndian>(g.height)?;
            glyf.write_u16::<LittleEndian>(g.advance_x)?;
            glyf.write_i16::<LittleEndian>(g.left)?;
            glyf.write_i16::<LittleEndian>(g.top)?;
            glyf.write_u32::<LittleEndian>(g.compressed_size)?;
            glyf.write_u32::<LittleEndian>(g.data_offset)?;
        }

        let mut intv = Vec::with_capacity(intervals.len() * UnicodeInterval::SIZE);
        for iv in &intervals {
            intv.write_u32::<LittleEndian>(iv.first)?;
            intv.write_u32::<LittleEndian>(iv.last)?;
            intv.write_u32::<LittleEndian>(iv.offset)?;
        }

        let mut header = Vec::with_capacity(FILE_HEADER_LEN);
        header.extend_from_slice(MAGIC);
        header.write_u16::<LittleEndian>(VERSION)?;
        header.write_u16::<LittleEndian>(0)?;
        writer.write_all(&header)?;

        write_chunk(&mut writer, TAG_HEAD, &head)?;
        write_chunk(&mut writer, TAG_GLYF, &glyf)?;
        write_chunk(&mut writer, TAG_INTV, &intv)?;
        write_chunk(&mut writer, TAG_BMAP, &blob)?;
        for (tag, payload) in &self.extra_chunks {
            write_chunk(&mut writer, *tag, payload)?;
        }

        log::debug!(
            "Wrote font: {} glyphs, {} intervals, {} bitmap bytes",
            records.len(),
            intervals.len(),
            blob.len()
        );
        Ok(())
    }
}

/// Pack coverage into rows at the given density.
///
/// At 1 bpp a pixel is set when its coverage is at least half (8 of 15),
/// most significant bit first. At 4 bpp the even pixel goes in the low
/// nibble.
pub fn pack_rows(bitmap: &GlyphBitmap, bits_per_pixel: u8) -> Vec<u8> {
    let width = bitmap.width() as usize;
    let stride = (width * bits_per_pixel as usize).div_ceil(8);
    let mut out = vec![0u8; stride * bitmap.height() as usize];

    for (y, row) in bitmap.rows().enumerate() {
        let line = &mut out[y * stride..(y + 1) * stride];
        for (x, &level) in row.iter().enumerate() {
            if bits_per_pixel == 1 {
                if level >= 8 {
                    line[x / 8] |= 0x80 >> (x % 8);
                }
            } else if x % 2 == 0 {
                line[x / 2] |= level & 0x0F;
            } else {
                line[x / 2] |= (level & 0x0F) << 4;
            }
        }
    }
    out
}

fn coalesce(code_points: impl Iterator<Item = u32>) -> Vec<UnicodeInterval> {
    let mut intervals: Vec<UnicodeInterval> = Vec::new();
    for (index, cp) in code_points.enumerate() {
        match intervals.last_mut() {
            Some(last) if last.last.checked_add(1) == Some(cp) => last.last = cp,
            _ => intervals.push(UnicodeInterval {
                first: cp,
                last: cp,
                offset: index as u32,
            }),
        }
    }
    intervals
}

fn write_chunk<W: Write>(writer: &mut W, tag: [u8; 4], payload: &[u8]) -> Result<()> {
    writer.write_all(&tag)?;
    writer.write_u32::<LittleEndian>(to_u32(payload.len(), "chunk")?)?;
    writer.write_all(payload)?;
    Ok(())
}

fn compress_data(data: &[u8]) -> std::io::Result<Vec<u8>> {
    use flate2::Compression;
    use flate2::write::ZlibEncoder;
    let mut encoder = ZlibEncoder::new(Vec::new(), Compression::default());
    encoder.write_all(data)?;
    encoder.finish()
}

fn to_u32(value: usize, what: &str) -> Result<u32> {
    u32::try_from(value).map_err(|_| Error::Build(format!("{} too large: {} bytes", what, value)))
}

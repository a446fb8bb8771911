//! Zero-copy view over the glyph record table.

use super::Glyph;

/// The glyph array, indexed by interval-resolved position.
#[derive(Debug, Clone, Copy)]
pub struct GlyphTable<'a> {
    bytes: &'a [u8],
}

impl<'a> GlyphTable<'a> {
    /// `bytes` must hold a whole number of glyph records.
    pub(crate) fn new(bytes: &'a [u8]) -> Self {
        debug_assert_eq!(bytes.len() % Glyph::SIZE, 0);
        Self { bytes }
    }

    /// Number of glyph records.
    pub fn len(&self) -> usize {
        self.bytes.len() / Glyph::SIZE
    }

    /// True if the table holds no glyphs.
    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }

    /// Glyph record at `index`.
    pub fn get(&self, index: usize) -> Option<Glyph> {
        let start = index.checked_mul(Glyph::SIZE)?;
        let record = self.bytes.get(start..start.checked_add(Glyph::SIZE)?)?;
        Some(Glyph::read(record))
    }

    /// Iterate glyph records in table order.
    pub fn iter(&self) -> impl Iterator<Item = Glyph> + 'a {
        self.bytes.chunks_exact(Glyph::SIZE).map(Glyph::read)
    }
}

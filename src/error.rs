//! Error types for the font engine.
//!
//! Three families of errors exist, one per stage:
//! - [`ParseError`] when loading a container (always fatal for that load)
//! - [`DecodeError`] when materializing a glyph bitmap
//! - [`DrawError`] at the layout/draw call boundary (recoverable, no rollback)
//!
//! [`Error`] wraps all of them for callers that want a single type.

/// Result type alias for font engine operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors raised while parsing a font container.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ParseError {
    /// A declared region extends past the end of its enclosing buffer
    #[error("Truncated {what}: need {needed} bytes, only {available} available")]
    Truncated {
        /// Region that did not fit
        what: &'static str,
        /// Bytes the region requires
        needed: usize,
        /// Bytes actually present
        available: usize,
    },

    /// The container is structurally invalid
    #[error("Malformed font container: {0}")]
    Malformed(String),
}

/// Errors raised while decoding a glyph bitmap.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum DecodeError {
    /// The compressed stream could not be inflated
    #[error("Inflate failed: {0}")]
    Inflate(String),

    /// The inflated data does not match the glyph dimensions
    #[error("Decoded size mismatch: expected {expected} bytes, got {actual}")]
    SizeMismatch {
        /// Bytes implied by width, height and packing density
        expected: usize,
        /// Bytes the decompressor produced
        actual: usize,
    },

    /// The working buffer for the glyph could not be allocated
    #[error("Failed to allocate {0} bytes for glyph bitmap")]
    Alloc(usize),

    /// The glyph's data range lies outside the bitmap blob
    #[error("Glyph data {offset}..{end} outside bitmap blob of {len} bytes")]
    OutOfBounds {
        /// Start of the glyph data
        offset: usize,
        /// End of the glyph data
        end: usize,
        /// Length of the bitmap blob
        len: usize,
    },

    /// Compressed glyph expands beyond the configured ratio
    #[error("Decompression ratio {ratio}:1 exceeds limit {limit}:1")]
    RatioExceeded {
        /// Observed ratio
        ratio: usize,
        /// Configured limit
        limit: u32,
    },
}

/// Failures reported by layout and drawing calls.
///
/// The numeric values returned by [`DrawError::code`] match the wire codes
/// used by display dispatch layers (`0` is success).
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum DrawError {
    /// The string to draw is invalid
    #[error("String is not valid UTF-8")]
    StringInvalid,

    /// The string was not empty, but no characters were drawable
    #[error("No drawable characters in string")]
    NoDrawableCharacters,

    /// A working buffer could not be obtained
    #[error("Allocation failed")]
    FailedAlloc,

    /// A glyph was missing and the fallback code point is missing too
    #[error("Glyph fallback U+{0:04X} not present in font")]
    GlyphFallbackFailed(u32),

    /// More than one alignment flag was set
    #[error("Invalid combination of font flags: {0:#x}")]
    InvalidFontFlags(u32),

    /// A glyph bitmap could not be decoded
    #[error("Glyph decode failed: {0}")]
    Decode(DecodeError),
}

impl DrawError {
    /// Numeric error code for this failure.
    pub fn code(&self) -> u32 {
        match self {
            DrawError::StringInvalid => 0x4,
            DrawError::NoDrawableCharacters => 0x8,
            DrawError::FailedAlloc | DrawError::Decode(_) => 0x10,
            DrawError::GlyphFallbackFailed(_) => 0x20,
            DrawError::InvalidFontFlags(_) => 0x200,
        }
    }
}

impl From<DecodeError> for DrawError {
    fn from(err: DecodeError) -> Self {
        match err {
            DecodeError::Alloc(_) => DrawError::FailedAlloc,
            other => DrawError::Decode(other),
        }
    }
}

/// Any error produced by this crate.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Container parse failure
    #[error(transparent)]
    Parse(#[from] ParseError),

    /// Glyph decode failure
    #[error(transparent)]
    Decode(#[from] DecodeError),

    /// Layout or draw failure
    #[error(transparent)]
    Draw(#[from] DrawError),

    /// The font builder was given inconsistent input
    #[error("Font build error: {0}")]
    Build(String),

    /// IO error (container writer and CLI)
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

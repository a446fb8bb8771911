//! Parser configuration for controlling lenient/strict container loading.

/// Parser options for controlling validation strictness and resource limits.
///
/// Fonts are usually baked into firmware images, but they may also arrive
/// over the wire from a host, so the limits here bound the work a corrupt
/// or hostile container can cause.
///
/// # Example
///
/// ```
/// use ufont::parser_config::ParserOptions;
///
/// // Strict mode - reject anything not in the container layout
/// let strict = ParserOptions::strict();
///
/// // Lenient mode - skip unknown chunks (default)
/// let lenient = ParserOptions::lenient();
///
/// // Custom configuration
/// let custom = ParserOptions {
///     strict: false,
///     skip_unknown_chunks: true,
///     max_glyph_dimension: 256,
///     max_file_size: 4 * 1024 * 1024,
///     max_decompression_ratio: 1024,
/// };
/// # let _ = (strict, lenient, custom);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ParserOptions {
    /// Reject non-zero reserved fields and unknown chunks
    pub strict: bool,

    /// Skip chunks with unrecognized tags instead of failing
    ///
    /// Ignored in strict mode.
    pub skip_unknown_chunks: bool,

    /// Maximum glyph width or height in pixels
    ///
    /// Decode work per glyph is `width * height`, so this caps the cost of
    /// any single glyph. Set to 0 to disable the check.
    pub max_glyph_dimension: u16,

    /// Maximum container size in bytes
    ///
    /// Default: 16 MB. Set to 0 to disable check.
    pub max_file_size: usize,

    /// Maximum decompression ratio (decoded:compressed) for a single glyph
    ///
    /// Blank or solid glyphs compress very well, so the default is generous.
    /// Set to 0 to disable check.
    pub max_decompression_ratio: u32,
}

impl Default for ParserOptions {
    /// Default configuration: lenient mode
    fn default() -> Self {
        Self::lenient()
    }
}

impl ParserOptions {
    /// Strict mode: fail on anything outside the container layout
    ///
    /// Use this for validating fonts produced by a converter.
    pub fn strict() -> Self {
        Self {
            strict: true,
            skip_unknown_chunks: false,
            max_glyph_dimension: 1024,
            max_file_size: 16 * 1024 * 1024, // 16 MB
            max_decompression_ratio: 512,
        }
    }

    /// Lenient mode: tolerate extension chunks and reserved bits
    pub fn lenient() -> Self {
        Self {
            strict: false,
            skip_unknown_chunks: true,
            max_glyph_dimension: 1024,
            max_file_size: 16 * 1024 * 1024, // 16 MB
            max_decompression_ratio: 1024,
        }
    }

    /// Permissive mode: no resource limits
    ///
    /// Warning: only use with trusted, already-validated fonts.
    pub fn permissive() -> Self {
        Self {
            strict: false,
            skip_unknown_chunks: true,
            max_glyph_dimension: 0,
            max_file_size: 0,
            max_decompression_ratio: 0,
        }
    }

    /// Whether an unknown chunk should be skipped rather than rejected
    pub(crate) fn allows_unknown_chunks(&self) -> bool {
        !self.strict && self.skip_unknown_chunks
    }

    /// Check a glyph dimension against the configured limit
    pub(crate) fn glyph_dimension_ok(&self, value: u16) -> bool {
        self.max_glyph_dimension == 0 || value <= self.max_glyph_dimension
    }
}

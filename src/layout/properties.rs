//! Per-draw-call font properties.

use bitflags::bitflags;

use crate::error::DrawError;

/// A 4-bit grey level: 0 is black, 15 is white.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Grey(u8);

impl Grey {
    /// Darkest level
    pub const BLACK: Grey = Grey(0);
    /// Brightest level
    pub const WHITE: Grey = Grey(15);

    /// Create a grey level, keeping the low four bits.
    pub const fn new(level: u8) -> Self {
        Grey(level & 0x0F)
    }

    /// The 4-bit level.
    pub const fn level(self) -> u8 {
        self.0
    }

    /// The level scaled to 8 bits (0x00..=0xFF).
    pub const fn to_u8(self) -> u8 {
        self.0 * 17
    }

    /// Nearest 4-bit level for an 8-bit grey value.
    pub const fn from_u8(value: u8) -> Self {
        Grey(((value as u16 + 8) / 17) as u8)
    }
}

bitflags! {
    /// Font drawing flags.
    ///
    /// At most one of the alignment flags may be set; see
    /// [`FontFlags::alignment`].
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct FontFlags: u32 {
        /// Draw a background, and take it into account when measuring
        const BACKGROUND = 0x1;
        /// Left-align lines
        const ALIGN_LEFT = 0x2;
        /// Right-align lines
        const ALIGN_RIGHT = 0x4;
        /// Center-align lines
        const ALIGN_CENTER = 0x8;
    }
}

/// Horizontal line alignment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Alignment {
    /// Lines start at the layout origin
    #[default]
    Left,
    /// Lines end at the right edge of the layout box
    Right,
    /// Lines are centered in the layout box
    Center,
}

impl FontFlags {
    /// All alignment bits.
    pub const ALIGN_MASK: FontFlags = FontFlags::ALIGN_LEFT
        .union(FontFlags::ALIGN_RIGHT)
        .union(FontFlags::ALIGN_CENTER);

    /// The selected alignment.
    ///
    /// No alignment bit means left; more than one is rejected.
    pub fn alignment(self) -> Result<Alignment, DrawError> {
        let align = self.intersection(Self::ALIGN_MASK);
        if align.bits().count_ones() > 1 {
            return Err(DrawError::InvalidFontFlags(self.bits()));
        }
        Ok(if align == FontFlags::ALIGN_RIGHT {
            Alignment::Right
        } else if align == FontFlags::ALIGN_CENTER {
            Alignment::Center
        } else {
            Alignment::Left
        })
    }

    /// Whether the background flag is set.
    pub fn background(self) -> bool {
        self.contains(FontFlags::BACKGROUND)
    }
}

/// Font properties for one layout or draw call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FontProperties {
    /// Foreground color
    pub fg_color: Grey,
    /// Background color
    pub bg_color: Grey,
    /// Use the glyph for this code point for missing glyphs
    pub fallback: Option<u32>,
    /// Drawing flags
    pub flags: FontFlags,
}

impl Default for FontProperties {
    fn default() -> Self {
        font_properties_default()
    }
}

impl FontProperties {
    /// Replace the flags.
    pub fn with_flags(mut self, flags: FontFlags) -> Self {
        self.flags = flags;
        self
    }

    /// Set the fallback code point.
    pub fn with_fallback(mut self, code_point: char) -> Self {
        self.fallback = Some(code_point as u32);
        self
    }

    /// Set foreground and background colors.
    pub fn with_colors(mut self, fg: Grey, bg: Grey) -> Self {
        self.fg_color = fg;
        self.bg_color = bg;
        self
    }

    /// Check the flags before any drawing happens.
    pub fn validate(&self) -> Result<Alignment, DrawError> {
        self.flags.alignment()
    }

    /// Map coverage (0..=15) to a color between background and foreground.
    pub fn color_lut(&self) -> [Grey; 16] {
        let fg = self.fg_color.level() as i32;
        let bg = self.bg_color.level() as i32;
        let diff = fg - bg;
        let mut lut = [Grey::BLACK; 16];
        for (c, slot) in lut.iter_mut().enumerate() {
            *slot = Grey::new((bg + c as i32 * diff / 15).clamp(0, 15) as u8);
        }
        lut
    }
}

/// The default font properties: black on white, left-aligned, no fallback.
pub fn font_properties_default() -> FontProperties {
    FontProperties {
        fg_color: Grey::BLACK,
        bg_color: Grey::WHITE,
        fallback: None,
        flags: FontFlags::ALIGN_LEFT,
    }
}

//! Text layout: line breaking, alignment and bounds.
//!
//! Layout works on Unicode scalar values. Each line is laid out by
//! accumulating glyph advances; `'\n'` closes a line and moves the baseline
//! down by the font's line advance. Lines are then shifted horizontally
//! inside a layout box whose width is either supplied by the caller or the
//! width of the longest line.
//!
//! Coordinates are framebuffer pixels with y growing downward. The `y`
//! passed to [`TextLayout::new`] and [`text_bounds`] is the first baseline.
//! Positions saturate at the `i32` range rather than wrapping, so very long
//! texts or extreme font metrics end up clipped off-screen.

mod properties;

pub use properties::{Alignment, FontFlags, FontProperties, Grey, font_properties_default};

use crate::error::DrawError;
use crate::fonts::{Glyph, UFont};
use crate::geometry::{Rect, union_opt};

/// A glyph resolved and positioned on a line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PlacedGlyph {
    /// Code point from the input text
    pub code_point: u32,
    /// Glyph drawn for it (may be the fallback glyph)
    pub glyph: Glyph,
    /// Pen position before this glyph
    pub pen_x: i32,
    /// Baseline of the line
    pub baseline: i32,
}

impl PlacedGlyph {
    /// Area covered by the glyph bitmap.
    pub fn ink_rect(&self) -> Rect {
        Rect::new(
            self.pen_x.saturating_add(self.glyph.left as i32),
            self.baseline.saturating_sub(self.glyph.top as i32),
            self.glyph.width as i32,
            self.glyph.height as i32,
        )
    }

    /// Advance cell: the glyph's advance between ascender and descender.
    pub fn cell_rect(&self, font: &UFont<'_>) -> Rect {
        Rect::from_points(
            self.pen_x,
            self.baseline.saturating_sub(font.ascender()),
            self.pen_x.saturating_add(self.glyph.advance_x as i32),
            self.baseline.saturating_sub(font.descender()),
        )
    }
}

/// One laid-out line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LineLayout {
    /// Left edge after alignment
    pub origin_x: i32,
    /// Baseline y
    pub baseline: i32,
    /// Sum of glyph advances
    pub width: i32,
    /// Glyphs in drawing order
    pub glyphs: Vec<PlacedGlyph>,
}

impl LineLayout {
    /// Background area of the line.
    pub fn background_rect(&self, font: &UFont<'_>) -> Rect {
        Rect::from_points(
            self.origin_x,
            self.baseline.saturating_sub(font.ascender()),
            self.origin_x.saturating_add(self.width),
            self.baseline.saturating_sub(font.descender()),
        )
    }
}

/// A fully laid-out string.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TextLayout {
    lines: Vec<LineLayout>,
    alignment: Alignment,
    bounds: Rect,
    cursor: (i32, i32),
    failure: Option<DrawError>,
}

impl TextLayout {
    /// Lay out `text` with its first baseline at `(x, y)`.
    ///
    /// `box_width` is the width lines are aligned in; `None` uses the widest
    /// line.
    ///
    /// Fails up front with [`DrawError::InvalidFontFlags`] for conflicting
    /// alignment flags, and with [`DrawError::NoDrawableCharacters`] when the
    /// text has characters but none of them resolve to a glyph. A fallback
    /// code point that does not resolve stops layout at that character; the
    /// error is kept in [`TextLayout::failure`] and everything before it
    /// stays laid out.
    pub fn new(
        font: &UFont<'_>,
        text: &str,
        x: i32,
        y: i32,
        props: &FontProperties,
        box_width: Option<u32>,
    ) -> Result<Self, DrawError> {
        let alignment = props.validate()?;

        if text.is_empty() {
            return Ok(Self {
                lines: Vec::new(),
                alignment,
                bounds: Rect::new(x, y, 0, 0),
                cursor: (x, y),
                failure: None,
            });
        }

        let mut lines = Vec::new();
        let mut failure = None;
        let mut seen = 0usize;
        let mut drawable = 0usize;

        for (i, line) in text.split('\n').enumerate() {
            let line = line.strip_suffix('\r').unwrap_or(line);
            let baseline = line_offset(y, i, font.advance_y());
            let mut pen = 0i32;
            let mut glyphs = Vec::new();

            for ch in line.chars() {
                seen += 1;
                let code_point = ch as u32;
                let glyph = match resolve(font, code_point, props) {
                    Ok(Some(glyph)) => glyph,
                    Ok(None) => continue,
                    Err(err) => {
                        failure = Some(err);
                        break;
                    },
                };
                glyphs.push(PlacedGlyph {
                    code_point,
                    glyph,
                    pen_x: pen,
                    baseline,
                });
                pen = pen.saturating_add(glyph.advance_x as i32);
            }

            drawable += glyphs.len();
            lines.push(LineLayout {
                origin_x: 0,
                baseline,
                width: pen,
                glyphs,
            });
            if failure.is_some() {
                break;
            }
        }

        if seen > 0 && drawable == 0 && failure.is_none() {
            return Err(DrawError::NoDrawableCharacters);
        }

        let box_width = box_width
            .map(|w| i32::try_from(w).unwrap_or(i32::MAX))
            .unwrap_or_else(|| lines.iter().map(|l| l.width).max().unwrap_or(0));

        let mut ink: Option<Rect> = None;
        for line in &mut lines {
            let free = box_width as i64 - line.width as i64;
            let shift = match alignment {
                Alignment::Left => 0,
                Alignment::Right => free,
                Alignment::Center => free / 2,
            };
            line.origin_x = clamp_i32(x as i64 + shift);
            for placed in &mut line.glyphs {
                placed.pen_x = placed.pen_x.saturating_add(line.origin_x);
                let glyph_ink = placed.ink_rect();
                if !glyph_ink.is_empty() {
                    ink = union_opt(ink, glyph_ink);
                }
                if props.flags.background() {
                    let cell = placed.cell_rect(font);
                    if !cell.is_empty() {
                        ink = union_opt(ink, cell);
                    }
                }
            }
        }

        let cursor = lines
            .last()
            .map(|l| (l.origin_x.saturating_add(l.width), l.baseline))
            .unwrap_or((x, y));

        log::debug!(
            "Laid out {} chars in {} lines ({} drawable), box width {}, {:?}",
            seen,
            lines.len(),
            drawable,
            box_width,
            alignment
        );

        Ok(Self {
            lines,
            alignment,
            bounds: ink.unwrap_or(Rect::new(x, y, 0, 0)),
            cursor,
            failure,
        })
    }

    /// Laid-out lines, top to bottom.
    pub fn lines(&self) -> &[LineLayout] {
        &self.lines
    }

    /// Alignment used for the lines.
    pub fn alignment(&self) -> Alignment {
        self.alignment
    }

    /// Bounding box of everything laid out.
    pub fn bounds(&self) -> Rect {
        self.bounds
    }

    /// Cursor position after the last laid-out character.
    pub fn cursor(&self) -> (i32, i32) {
        self.cursor
    }

    /// Error that stopped layout early, if any.
    pub fn failure(&self) -> Option<&DrawError> {
        self.failure.as_ref()
    }

    /// Number of glyphs that will be drawn.
    pub fn glyph_count(&self) -> usize {
        self.lines.iter().map(|l| l.glyphs.len()).sum()
    }
}

fn clamp_i32(value: i64) -> i32 {
    value.clamp(i32::MIN as i64, i32::MAX as i64) as i32
}

/// Baseline of line `index`, saturating at the `i32` range.
fn line_offset(y: i32, index: usize, advance_y: i32) -> i32 {
    let steps = i64::try_from(index).unwrap_or(i64::MAX);
    clamp_i32((y as i64).saturating_add(steps.saturating_mul(advance_y as i64)))
}

/// Resolve a code point, applying the fallback policy.
///
/// `Ok(None)` means the character is skipped (no fallback configured).
fn resolve(
    font: &UFont<'_>,
    code_point: u32,
    props: &FontProperties,
) -> Result<Option<Glyph>, DrawError> {
    if let Some(glyph) = font.glyph(code_point) {
        return Ok(Some(glyph));
    }
    match props.fallback {
        Some(fallback) => match font.glyph(fallback) {
            Some(glyph) => {
                log::debug!("U+{:04X} missing, using fallback U+{:04X}", code_point, fallback);
                Ok(Some(glyph))
            },
            None => {
                log::warn!(
                    "U+{:04X} missing and fallback U+{:04X} not in font",
                    code_point,
                    fallback
                );
                Err(DrawError::GlyphFallbackFailed(fallback))
            },
        },
        None => {
            log::debug!("U+{:04X} missing, skipped", code_point);
            Ok(None)
        },
    }
}

/// Get the text bounds for `text` when drawn with its first baseline at `(x, y)`.
///
/// Without [`FontFlags::BACKGROUND`] the box wraps glyph ink tightly; with it,
/// each glyph's advance cell between ascender and descender is included.
/// Empty text yields a zero-sized rect at `(x, y)`.
pub fn text_bounds(
    font: &UFont<'_>,
    text: &str,
    x: i32,
    y: i32,
    props: &FontProperties,
) -> Result<Rect, DrawError> {
    let layout = TextLayout::new(font, text, x, y, props, None)?;
    if let Some(err) = layout.failure() {
        return Err(err.clone());
    }
    Ok(layout.bounds())
}

/// Rect anchored at `(x, y)` that fits `text` drawn with its top edge at `y`.
///
/// The first baseline sits at `y + ascender` and the background is always
/// taken into account. The origin stays at `(x, y)`; width and height reach
/// the far edges of the text and add `margin` twice, once per side.
pub fn string_rect(
    font: &UFont<'_>,
    text: &str,
    x: i32,
    y: i32,
    margin: i32,
    props: &FontProperties,
) -> Result<Rect, DrawError> {
    if text.is_empty() {
        props.validate()?;
        return Ok(Rect::new(x, y, 0, 0));
    }
    let props = FontProperties {
        flags: props.flags | FontFlags::BACKGROUND,
        ..*props
    };
    let bounds = text_bounds(font, text, x, y.saturating_add(font.ascender()), &props)?;
    let padding = margin.saturating_mul(2);
    Ok(Rect::new(
        x,
        y,
        bounds.right().saturating_sub(x).saturating_add(padding).max(0),
        bounds.bottom().saturating_sub(y).saturating_add(padding).max(0),
    ))
}

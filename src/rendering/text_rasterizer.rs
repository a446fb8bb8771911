//! Text rasterizer - blits decoded glyphs through [`Framebuffer`] primitives.
//!
//! Drawing is not transactional: when a glyph fails midway, everything
//! before it stays drawn and the cursor is left after the last glyph that
//! was fully drawn.

use super::Framebuffer;
use crate::decoders::{GlyphBitmap, decode_glyph};
use crate::error::DrawError;
use crate::fonts::UFont;
use crate::layout::{FontProperties, Grey, PlacedGlyph, TextLayout};

/// Write a (multi-line) string, starting at the cursor.
///
/// `cursor_y` is the first baseline. On return the cursor is just after the
/// last drawn character, so repeated calls continue a paragraph. A line
/// break resets `cursor_x` to its starting value and moves `cursor_y` down
/// by the font's line advance.
///
/// Invalid flags and strings with no drawable characters are rejected before
/// anything is drawn, leaving the cursor unchanged.
pub fn write_string<F: Framebuffer + ?Sized>(
    font: &UFont<'_>,
    text: &str,
    cursor_x: &mut i32,
    cursor_y: &mut i32,
    framebuffer: &mut F,
    props: &FontProperties,
) -> Result<(), DrawError> {
    let layout = TextLayout::new(font, text, *cursor_x, *cursor_y, props, None)?;
    draw_layout(font, &layout, cursor_x, cursor_y, framebuffer, props)
}

/// Write a string with lines aligned inside a box of `box_width` pixels
/// starting at `cursor_x`.
pub fn write_string_in_box<F: Framebuffer + ?Sized>(
    font: &UFont<'_>,
    text: &str,
    cursor_x: &mut i32,
    cursor_y: &mut i32,
    box_width: u32,
    framebuffer: &mut F,
    props: &FontProperties,
) -> Result<(), DrawError> {
    let layout = TextLayout::new(font, text, *cursor_x, *cursor_y, props, Some(box_width))?;
    draw_layout(font, &layout, cursor_x, cursor_y, framebuffer, props)
}

/// Write a (multi-line) string with the default font properties.
pub fn write_default<F: Framebuffer + ?Sized>(
    font: &UFont<'_>,
    text: &str,
    cursor_x: &mut i32,
    cursor_y: &mut i32,
    framebuffer: &mut F,
) -> Result<(), DrawError> {
    write_string(
        font,
        text,
        cursor_x,
        cursor_y,
        framebuffer,
        &FontProperties::default(),
    )
}

/// Write UTF-8 encoded bytes, rejecting invalid encodings.
pub fn write_bytes<F: Framebuffer + ?Sized>(
    font: &UFont<'_>,
    bytes: &[u8],
    cursor_x: &mut i32,
    cursor_y: &mut i32,
    framebuffer: &mut F,
    props: &FontProperties,
) -> Result<(), DrawError> {
    let text = std::str::from_utf8(bytes).map_err(|e| {
        log::warn!("Refusing to draw invalid UTF-8 at byte {}", e.valid_up_to());
        DrawError::StringInvalid
    })?;
    write_string(font, text, cursor_x, cursor_y, framebuffer, props)
}

/// Draw an already computed layout, moving the cursor as glyphs are drawn.
///
/// Returns the layout's stored failure, if any, after drawing everything
/// that precedes it.
pub fn draw_layout<F: Framebuffer + ?Sized>(
    font: &UFont<'_>,
    layout: &TextLayout,
    cursor_x: &mut i32,
    cursor_y: &mut i32,
    framebuffer: &mut F,
    props: &FontProperties,
) -> Result<(), DrawError> {
    let lut = props.color_lut();
    let background = props.flags.background();

    for line in layout.lines() {
        *cursor_x = line.origin_x;
        *cursor_y = line.baseline;

        if background {
            framebuffer.fill_rect(line.background_rect(font), props.bg_color);
        }

        for placed in &line.glyphs {
            let bitmap = decode_glyph(font, &placed.glyph)?;
            blit(framebuffer, placed, &bitmap, &lut, background);
            *cursor_x = placed.pen_x.saturating_add(placed.glyph.advance_x as i32);
        }
    }

    match layout.failure() {
        Some(err) => Err(err.clone()),
        None => Ok(()),
    }
}

/// Copy one glyph bitmap to the framebuffer as runs of equal color.
///
/// Zero coverage is transparent unless the background is drawn.
fn blit<F: Framebuffer + ?Sized>(
    framebuffer: &mut F,
    placed: &PlacedGlyph,
    bitmap: &GlyphBitmap,
    lut: &[Grey; 16],
    background: bool,
) {
    let origin = placed.ink_rect();
    for (row, coverage) in bitmap.rows().enumerate() {
        let y = origin.top().saturating_add(row as i32);
        let mut run: Option<(i32, Grey)> = None;
        let mut run_len = 0;

        for (col, &level) in coverage.iter().enumerate() {
            let color = (background || level > 0).then(|| lut[level as usize & 0x0F]);
            match (run, color) {
                (Some((_, current)), Some(c)) if current == c => run_len += 1,
                _ => {
                    if let Some((start, c)) = run {
                        emit(framebuffer, start, y, run_len, c);
                    }
                    run = color.map(|c| (origin.left().saturating_add(col as i32), c));
                    run_len = 1;
                },
            }
        }
        if let Some((start, c)) = run {
            emit(framebuffer, start, y, run_len, c);
        }
    }
}

fn emit<F: Framebuffer + ?Sized>(framebuffer: &mut F, x: i32, y: i32, len: i32, color: Grey) {
    if len == 1 {
        framebuffer.draw_pixel(x, y, color);
    } else {
        framebuffer.draw_hline(x, y, len, color);
    }
}

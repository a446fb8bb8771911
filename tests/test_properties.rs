//! Property tests for lookup, layout and decoding.

mod common;

use std::collections::BTreeSet;

use proptest::prelude::*;
use ufont::decoders::decode_glyph;
use ufont::layout::TextLayout;
use ufont::writer::{FontBuilder, GlyphBitmap};
use ufont::{FontFlags, FontProperties, UFont, text_bounds};

fn font_with_code_points(code_points: &BTreeSet<u32>) -> Vec<u8> {
    let mut builder = FontBuilder::new(1, 8, 6, -2);
    for &cp in code_points {
        builder.add_code_point(cp, GlyphBitmap::blank(1, 1), 2, 0, 1);
    }
    builder.build().unwrap()
}

fn coverage_grid() -> impl Strategy<Value = (u16, u16, Vec<u8>)> {
    (1u16..12, 1u16..12).prop_flat_map(|(w, h)| {
        (
            Just(w),
            Just(h),
            prop::collection::vec(0u8..16, w as usize * h as usize),
        )
    })
}

proptest! {
    /// A code point resolves to its rank among the font's code points.
    #[test]
    fn prop_lookup_index_law(
        code_points in prop::collection::btree_set(0u32..0x3000, 1..60),
        queries in prop::collection::vec(0u32..0x3100, 1..40),
    ) {
        let bytes = font_with_code_points(&code_points);
        let font = UFont::parse(&bytes).unwrap();
        let sorted: Vec<u32> = code_points.iter().copied().collect();

        for cp in queries.into_iter().chain(sorted.iter().copied()) {
            let expected = sorted.binary_search(&cp).ok();
            prop_assert_eq!(font.glyph_index(cp), expected);
        }
    }

    /// Measuring twice gives the same box, and the box holds every glyph.
    #[test]
    fn prop_bounds_idempotent(
        text in "[ag? Z\n]{0,24}",
        x in -50i32..50,
        y in -50i32..50,
        background in any::<bool>(),
    ) {
        let bytes = common::text_font(false);
        let font = UFont::parse(&bytes).unwrap();
        let flags = if background { FontFlags::BACKGROUND } else { FontFlags::empty() };
        let props = FontProperties::default().with_flags(flags);

        let first = text_bounds(&font, &text, x, y, &props);
        let second = text_bounds(&font, &text, x, y, &props);
        prop_assert_eq!(&first, &second);

        if let Ok(bounds) = first {
            let layout = TextLayout::new(&font, &text, x, y, &props, None).unwrap();
            for line in layout.lines() {
                for placed in &line.glyphs {
                    let ink = placed.ink_rect();
                    if !ink.is_empty() {
                        prop_assert_eq!(bounds.union(&ink), bounds);
                    }
                }
            }
        }
    }

    /// Lines are shifted by the free space in the box, or half of it.
    #[test]
    fn prop_alignment_law(
        line_lengths in prop::collection::vec(0usize..8, 1..5),
        extra in 0u32..40,
        x in -20i32..20,
    ) {
        let bytes = common::text_font(false);
        let font = UFont::parse(&bytes).unwrap();
        let text = line_lengths
            .iter()
            .map(|&n| "a".repeat(n))
            .collect::<Vec<_>>()
            .join("\n");
        prop_assume!(line_lengths.iter().any(|&n| n > 0));

        let widest = *line_lengths.iter().max().unwrap() as u32 * 5;
        let box_width = widest + extra;

        for (flag, shift) in [
            (FontFlags::ALIGN_LEFT, 0u32),
            (FontFlags::ALIGN_RIGHT, 2),
            (FontFlags::ALIGN_CENTER, 1),
        ] {
            let props = FontProperties::default().with_flags(flag);
            let layout = TextLayout::new(&font, &text, x, 0, &props, Some(box_width)).unwrap();
            for (line, &n) in layout.lines().iter().zip(&line_lengths) {
                let free = (box_width - n as u32 * 5) as i32;
                let expected = x + free * shift as i32 / 2;
                prop_assert_eq!(line.origin_x, expected);
                prop_assert_eq!(line.width, n as i32 * 5);
            }
        }
    }

    /// Decoding yields the same coverage for every storage form.
    #[test]
    fn prop_decode_deterministic(
        (width, height, coverage) in coverage_grid(),
        compressed in any::<bool>(),
    ) {
        let bitmap = GlyphBitmap::from_coverage(width, height, coverage.clone()).unwrap();

        let mut grey = FontBuilder::new(4, 16, 12, -4).compressed(compressed);
        grey.add_glyph('g', bitmap.clone(), width, 0, height as i16);
        let bytes = grey.build().unwrap();
        let font = UFont::parse(&bytes).unwrap();
        let glyph = font.glyph('g' as u32).unwrap();
        let first = decode_glyph(&font, &glyph).unwrap();
        let second = decode_glyph(&font, &glyph).unwrap();
        prop_assert_eq!(&first, &second);
        prop_assert_eq!(first.coverage(), &coverage[..]);

        let mut mono = FontBuilder::new(1, 16, 12, -4).compressed(compressed);
        mono.add_glyph('m', bitmap, width, 0, height as i16);
        let bytes = mono.build().unwrap();
        let font = UFont::parse(&bytes).unwrap();
        let decoded = decode_glyph(&font, &font.glyph('m' as u32).unwrap()).unwrap();
        let thresholded: Vec<u8> = coverage.iter().map(|&c| if c >= 8 { 15 } else { 0 }).collect();
        prop_assert_eq!(decoded.coverage(), &thresholded[..]);
    }
}

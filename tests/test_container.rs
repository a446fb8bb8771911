//! Integration tests for container parsing.
//!
//! Covers:
//! - Round trips through the font builder
//! - Zero-copy and owned descriptors
//! - Strict and lenient handling of unknown chunks
//! - Rejection of truncated and inconsistent containers

mod common;

use std::io::Write;
use std::sync::Arc;

use ufont::decoders::decode_glyph;
use ufont::fonts::FontHeader;
use ufont::fonts::container::{ChunkReader, FILE_HEADER_LEN, TAG_BMAP, TAG_GLYF, TAG_INTV};
use ufont::writer::{FontBuilder, GlyphBitmap};
use ufont::{ParseError, ParserOptions, UFont, find_glyph};

/// Glyph, interval and bitmap payloads of a container, in that order.
fn split_regions(bytes: &[u8]) -> (&[u8], &[u8], &[u8]) {
    let mut glyphs = &bytes[..0];
    let mut intervals = &bytes[..0];
    let mut bitmap = &bytes[..0];
    for chunk in ChunkReader::new(bytes, FILE_HEADER_LEN) {
        let chunk = chunk.unwrap();
        match chunk.tag {
            TAG_GLYF => glyphs = &bytes[chunk.range],
            TAG_INTV => intervals = &bytes[chunk.range],
            TAG_BMAP => bitmap = &bytes[chunk.range],
            _ => {},
        }
    }
    (glyphs, intervals, bitmap)
}

#[test]
fn test_parse_block_font() {
    let bytes = common::block_font(1, false);
    let font = UFont::parse(&bytes).unwrap();

    assert_eq!(font.bits_per_pixel(), 1);
    assert!(!font.compressed());
    assert_eq!(font.advance_y(), 16);
    assert_eq!(font.ascender(), 12);
    assert_eq!(font.descender(), -4);
    assert_eq!(font.glyph_count(), 26);
    assert_eq!(font.interval_count(), 1);
    assert!(font.is_borrowed());

    let glyph = find_glyph(&font, 'Q' as u32).unwrap();
    assert_eq!((glyph.width, glyph.height, glyph.advance_x), (8, 16, 8));
    assert_eq!(glyph.compressed_size, 0);
    // 26 glyphs of 16 rows, one byte per row
    assert_eq!(glyph.data_offset, ('Q' as u32 - 'A' as u32) * 16);
    assert_eq!(font.bitmap().len(), 26 * 16);
}

#[test]
fn test_sparse_code_points_split_intervals() {
    let mut builder = FontBuilder::new(4, 10, 8, -2);
    for ch in ['0', '1', '2', 'x', '\u{20AC}'] {
        builder.add_glyph(ch, GlyphBitmap::blank(2, 2), 3, 0, 2);
    }
    let bytes = builder.build().unwrap();
    let font = UFont::parse(&bytes).unwrap();

    let intervals: Vec<_> = font.intervals().iter().collect();
    assert_eq!(intervals.len(), 3);
    assert_eq!((intervals[0].first, intervals[0].last), ('0' as u32, '2' as u32));
    assert_eq!(intervals[2].offset, 4);

    assert_eq!(font.glyph_index('\u{20AC}' as u32), Some(4));
    assert_eq!(font.glyph_index('3' as u32), None);
    assert!(find_glyph(&font, 0x10FFFF).is_none());
}

#[test]
fn test_empty_font_has_no_glyphs() {
    let bytes = FontBuilder::new(1, 8, 6, -2).build().unwrap();
    let font = UFont::parse(&bytes).unwrap();
    assert_eq!(font.glyph_count(), 0);
    assert!(font.intervals().is_empty());
    assert!(find_glyph(&font, 'A' as u32).is_none());
}

#[test]
fn test_unknown_chunk_lenient_vs_strict() {
    let mut builder = FontBuilder::new(1, 16, 12, -4);
    builder
        .add_glyph('A', common::solid(8, 16), 8, 0, 0)
        .add_chunk(*b"NAME", b"Block Sans".to_vec());
    let bytes = builder.build().unwrap();

    let font = UFont::parse_with_options(&bytes, &ParserOptions::lenient()).unwrap();
    assert!(font.has_glyph('A' as u32));

    let err = UFont::parse_with_options(&bytes, &ParserOptions::strict()).unwrap_err();
    assert!(matches!(err, ParseError::Malformed(ref msg) if msg.contains("NAME")));

    // Lenient parsing with skipping turned off also rejects it
    let options = ParserOptions {
        skip_unknown_chunks: false,
        ..ParserOptions::lenient()
    };
    assert!(UFont::parse_with_options(&bytes, &options).is_err());
}

#[test]
fn test_strict_accepts_builder_output() {
    let bytes = common::text_font(true);
    let font = UFont::parse_with_options(&bytes, &ParserOptions::strict()).unwrap();
    assert!(font.compressed());
    assert_eq!(font.bits_per_pixel(), 4);
}

#[test]
fn test_every_truncation_is_rejected() {
    let bytes = common::text_font(true);
    for len in 0..bytes.len() {
        let result = UFont::parse(&bytes[..len]);
        assert!(result.is_err(), "prefix of {} bytes parsed", len);
    }
}

#[test]
fn test_bad_magic_and_version() {
    let mut bytes = common::block_font(1, false);
    bytes[0] = b'X';
    assert!(matches!(UFont::parse(&bytes), Err(ParseError::Malformed(_))));

    let mut bytes = common::block_font(1, false);
    bytes[4] = 2;
    let err = UFont::parse(&bytes).unwrap_err();
    assert!(format!("{}", err).contains("version"));
}

#[test]
fn test_truncated_chunk_reports_sizes() {
    let mut bytes = common::block_font(1, false);
    // Inflate the HEAD chunk length past the end of the file
    bytes[FILE_HEADER_LEN + 4..FILE_HEADER_LEN + 8].copy_from_slice(&u32::MAX.to_le_bytes());
    match UFont::parse(&bytes) {
        Err(ParseError::Truncated { what, needed, available }) => {
            assert_eq!(what, "HEAD chunk");
            assert_eq!(needed, u32::MAX as usize);
            assert!(available < needed);
        },
        other => panic!("expected truncation, got {:?}", other),
    }
}

#[test]
fn test_glyph_dimension_limit() {
    let mut builder = FontBuilder::new(1, 64, 48, -16);
    builder.add_glyph('W', common::solid(40, 48), 40, 0, 48);
    let bytes = builder.build().unwrap();

    let options = ParserOptions {
        max_glyph_dimension: 32,
        ..ParserOptions::default()
    };
    assert!(UFont::parse_with_options(&bytes, &options).is_err());
    assert!(UFont::parse_with_options(&bytes, &ParserOptions::permissive()).is_ok());
}

#[test]
fn test_file_size_limit() {
    let bytes = common::block_font(4, false);
    let options = ParserOptions {
        max_file_size: bytes.len() - 1,
        ..ParserOptions::default()
    };
    assert!(UFont::parse_with_options(&bytes, &options).is_err());
}

#[test]
fn test_glyph_data_outside_blob_is_rejected() {
    let mut bytes = common::block_font(1, false);
    // HEAD chunk then GLYF chunk header
    let glyf = FILE_HEADER_LEN + 8 + 16;
    assert_eq!(&bytes[glyf..glyf + 4], &TAG_GLYF);
    // data_offset of the first record
    let offset_field = glyf + 8 + 14;
    bytes[offset_field..offset_field + 4].copy_from_slice(&10_000u32.to_le_bytes());
    assert!(matches!(
        UFont::parse(&bytes),
        Err(ParseError::Truncated { what: "glyph bitmap data", .. })
    ));
}

#[test]
fn test_into_owned_outlives_buffer() {
    let font = {
        let bytes = common::block_font(1, true);
        UFont::parse(&bytes).unwrap().into_owned()
    };
    assert!(!font.is_borrowed());
    assert!(font.has_glyph('Z' as u32));
}

#[test]
fn test_from_parts_matches_container() {
    let bytes = common::text_font(true);
    let container = UFont::parse(&bytes).unwrap();
    let (glyphs, intervals, bitmap) = split_regions(&bytes);

    let font = UFont::from_parts(*container.header(), glyphs, intervals, bitmap).unwrap();
    assert!(font.is_borrowed());
    assert_eq!(font.header(), container.header());
    assert_eq!(font.bitmap().as_ptr(), bitmap.as_ptr());

    for ch in [' ', '?', 'a', 'g'] {
        let glyph = font.glyph(ch as u32).unwrap();
        assert_eq!(Some(glyph), container.glyph(ch as u32));
        assert_eq!(
            decode_glyph(&font, &glyph).unwrap(),
            decode_glyph(&container, &glyph).unwrap()
        );
    }
    assert!(!font.has_glyph('Z' as u32));
}

#[test]
fn test_from_parts_static_regions() {
    static GLYPHS: [u8; 18] = [2, 0, 2, 0, 3, 0, 0, 0, 2, 0, 0, 0, 0, 0, 0, 0, 0, 0];
    static INTERVALS: [u8; 12] = [0x2A, 0, 0, 0, 0x2A, 0, 0, 0, 0, 0, 0, 0];
    static BITMAP: [u8; 2] = [0x80, 0x40];
    let header = FontHeader {
        compressed: false,
        bits_per_pixel: 1,
        advance_y: 4,
        ascender: 2,
        descender: -1,
        glyph_count: 1,
    };

    let font: UFont<'static> = UFont::from_parts(header, &GLYPHS, &INTERVALS, &BITMAP).unwrap();
    let glyph = font.glyph('*' as u32).unwrap();
    assert_eq!(decode_glyph(&font, &glyph).unwrap(), GlyphBitmap::from_ascii(&["#.", ".#"]));
}

#[test]
fn test_from_parts_runs_container_checks() {
    let bytes = common::block_font(1, false);
    let container = UFont::parse(&bytes).unwrap();
    let header = *container.header();
    let (glyphs, intervals, bitmap) = split_regions(&bytes);

    let miscounted = FontHeader {
        glyph_count: header.glyph_count + 1,
        ..header
    };
    assert!(matches!(
        UFont::from_parts(miscounted, glyphs, intervals, bitmap),
        Err(ParseError::Malformed(_))
    ));

    let odd_bpp = FontHeader {
        bits_per_pixel: 2,
        ..header
    };
    assert!(matches!(
        UFont::from_parts(odd_bpp, glyphs, intervals, bitmap),
        Err(ParseError::Malformed(ref msg)) if msg.contains("bits per pixel")
    ));

    // the last glyph's rows no longer fit
    assert!(matches!(
        UFont::from_parts(header, glyphs, intervals, &bitmap[..bitmap.len() - 1]),
        Err(ParseError::Truncated { what: "glyph bitmap data", .. })
    ));

    // 'A'..='Z' mapped past the 26 glyph records
    let mut shifted = intervals.to_vec();
    shifted[8..12].copy_from_slice(&1u32.to_le_bytes());
    assert!(matches!(
        UFont::from_parts(header, glyphs, &shifted, bitmap),
        Err(ParseError::Malformed(_))
    ));

    assert!(matches!(
        UFont::from_parts(header, glyphs, &intervals[..11], bitmap),
        Err(ParseError::Malformed(_))
    ));

    let options = ParserOptions {
        max_glyph_dimension: 8,
        ..ParserOptions::default()
    };
    assert!(UFont::from_parts_with_options(header, glyphs, intervals, bitmap, &options).is_err());
}

#[test]
fn test_from_vec_reads_file() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    file.write_all(&common::text_font(false)).unwrap();

    let data = std::fs::read(file.path()).unwrap();
    let font = UFont::from_vec(data, &ParserOptions::default()).unwrap();
    assert!(!font.is_borrowed());
    assert!(font.has_glyph('g' as u32));
}

#[test]
fn test_font_shared_across_threads() {
    let font = UFont::from_vec(common::block_font(4, true), &ParserOptions::default()).unwrap();
    let font = Arc::new(font);
    let handles: Vec<_> = (0..4)
        .map(|i| {
            let font = Arc::clone(&font);
            std::thread::spawn(move || {
                let ch = char::from(b'A' + i as u8);
                let glyph = font.glyph(ch as u32).unwrap();
                ufont::decoders::decode_glyph(&font, &glyph).unwrap().coverage().len()
            })
        })
        .collect();
    for handle in handles {
        assert_eq!(handle.join().unwrap(), 8 * 16);
    }
}

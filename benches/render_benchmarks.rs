//! Parsing, decoding and rendering benchmarks.
//!
//! Run with: cargo bench --bench render_benchmarks

use criterion::{BenchmarkId, Criterion, black_box, criterion_group, criterion_main};
use ufont::decoders::decode_glyph;
use ufont::layout::TextLayout;
use ufont::rendering::{GreyFramebuffer, write_string};
use ufont::writer::{FontBuilder, GlyphBitmap};
use ufont::{FontFlags, FontProperties, UFont};

const SAMPLE: &str =
    "The quick brown fox jumps over the lazy dog\n0123456789 ABCDEFGHIJKLMNOPQRSTUVWXYZ";

/// Printable ASCII with a diagonal grey ramp in every glyph.
fn build_font(bits_per_pixel: u8, compressed: bool) -> Vec<u8> {
    let mut builder = FontBuilder::new(bits_per_pixel, 20, 15, -5).compressed(compressed);
    for ch in ' '..='~' {
        let (w, h) = (10u16, 15u16);
        let coverage = (0..w as usize * h as usize)
            .map(|i| ((i % w as usize + i / w as usize + ch as usize) % 16) as u8)
            .collect();
        let bitmap = GlyphBitmap::from_coverage(w, h, coverage).unwrap();
        builder.add_glyph(ch, bitmap, 11, 0, 15);
    }
    builder.build().unwrap()
}

fn bench_parse(c: &mut Criterion) {
    let bytes = build_font(4, true);
    c.bench_function("parse_container", |b| {
        b.iter(|| UFont::parse(black_box(&bytes)).unwrap());
    });
}

fn bench_decode(c: &mut Criterion) {
    let mut group = c.benchmark_group("decode_glyph");
    let variants = [("1bpp_raw", 1, false), ("4bpp_raw", 4, false), ("4bpp_zlib", 4, true)];
    for (label, bpp, compressed) in variants {
        let bytes = build_font(bpp, compressed);
        let font = UFont::parse(&bytes).unwrap();
        let glyph = font.glyph('g' as u32).unwrap();
        group.bench_function(label, |b| {
            b.iter(|| decode_glyph(black_box(&font), black_box(&glyph)).unwrap());
        });
    }
    group.finish();
}

fn bench_layout(c: &mut Criterion) {
    let bytes = build_font(4, true);
    let font = UFont::parse(&bytes).unwrap();
    let props = FontProperties::default().with_flags(FontFlags::ALIGN_CENTER);
    c.bench_function("layout_two_lines", |b| {
        b.iter(|| TextLayout::new(&font, black_box(SAMPLE), 0, 15, &props, Some(600)).unwrap());
    });
}

fn bench_render(c: &mut Criterion) {
    let mut group = c.benchmark_group("write_string");
    for (label, compressed) in [("raw", false), ("zlib", true)] {
        let bytes = build_font(4, compressed);
        let font = UFont::parse(&bytes).unwrap();
        for flags in [FontFlags::empty(), FontFlags::BACKGROUND] {
            let props = FontProperties::default().with_flags(flags);
            group.bench_with_input(BenchmarkId::new(label, flags.bits()), &props, |b, props| {
                let mut fb = GreyFramebuffer::new(600, 48);
                b.iter(|| {
                    let (mut x, mut y) = (0, 15);
                    write_string(&font, black_box(SAMPLE), &mut x, &mut y, &mut fb, props).unwrap();
                });
            });
        }
    }
    group.finish();
}

criterion_group!(benches, bench_parse, bench_decode, bench_layout, bench_render);
criterion_main!(benches);

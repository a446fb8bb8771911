//! Render a string with a ufont container.
//!
//! Writes a binary PGM image, or ASCII art to stdout with `--ascii`.
//!
//! Usage:
//!   cargo run --release --bin ufont_render -- FONT TEXT [options]
//!
//! Options:
//!   --output FILE       PGM output path (default: out.pgm)
//!   --ascii             print ASCII art instead of writing a PGM
//!   --align MODE        left | right | center
//!   --background        fill glyph cells with the background color
//!   --fallback CHAR     glyph used for characters missing from the font
//!   --margin N          margin around the text in pixels (default: 2)
//!   --strict            reject unknown chunks and reserved bits

use std::fs;
use std::path::PathBuf;

use ufont::rendering::{GreyFramebuffer, write_string};
use ufont::{FontFlags, FontProperties, ParserOptions, UFont, string_rect};

struct RenderConfig {
    font_path: PathBuf,
    text: String,
    output: PathBuf,
    ascii: bool,
    flags: FontFlags,
    fallback: Option<char>,
    margin: i32,
    strict: bool,
}

impl RenderConfig {
    fn from_args() -> Result<Self, String> {
        let args: Vec<String> = std::env::args().collect();
        let mut positional = Vec::new();
        let mut output = PathBuf::from("out.pgm");
        let mut ascii = false;
        let mut flags = FontFlags::empty();
        let mut fallback = None;
        let mut margin = 2;
        let mut strict = false;

        let mut i = 1;
        while i < args.len() {
            match args[i].as_str() {
                "--output" | "-o" => {
                    i += 1;
                    if i < args.len() {
                        output = PathBuf::from(&args[i]);
                    }
                },
                "--ascii" => ascii = true,
                "--align" => {
                    i += 1;
                    flags |= match args.get(i).map(String::as_str) {
                        Some("left") => FontFlags::ALIGN_LEFT,
                        Some("right") => FontFlags::ALIGN_RIGHT,
                        Some("center") => FontFlags::ALIGN_CENTER,
                        other => return Err(format!("unknown alignment: {:?}", other)),
                    };
                },
                "--background" => flags |= FontFlags::BACKGROUND,
                "--fallback" => {
                    i += 1;
                    fallback = args.get(i).and_then(|s| s.chars().next());
                },
                "--margin" => {
                    i += 1;
                    margin = args
                        .get(i)
                        .and_then(|s| s.parse().ok())
                        .ok_or("--margin expects an integer")?;
                },
                "--strict" => strict = true,
                other => positional.push(other.to_string()),
            }
            i += 1;
        }

        if positional.len() != 2 {
            return Err("usage: ufont_render FONT TEXT [options]".to_string());
        }
        let text = positional.pop().unwrap_or_default().replace("\\n", "\n");
        let font_path = PathBuf::from(positional.pop().unwrap_or_default());

        Ok(Self {
            font_path,
            text,
            output,
            ascii,
            flags,
            fallback,
            margin,
            strict,
        })
    }
}

fn run(config: &RenderConfig) -> Result<(), Box<dyn std::error::Error>> {
    let options = if config.strict {
        ParserOptions::strict()
    } else {
        ParserOptions::default()
    };
    let data = fs::read(&config.font_path)?;
    let font = UFont::from_vec(data, &options)?;
    log::info!(
        "Loaded {}: {} glyphs, {} bpp{}",
        config.font_path.display(),
        font.glyph_count(),
        font.bits_per_pixel(),
        if font.compressed() { ", compressed" } else { "" }
    );

    let mut props = FontProperties::default().with_flags(config.flags);
    if let Some(ch) = config.fallback {
        props = props.with_fallback(ch);
    }

    let rect = string_rect(&font, &config.text, 0, 0, config.margin, &props)?;
    let width = rect.width.max(1) as u32;
    let height = rect.height.max(1) as u32;
    log::debug!("Canvas {}x{} for {:?}", width, height, rect);

    let mut fb = GreyFramebuffer::new(width, height);
    // the rect is anchored at (0, 0) with the margin on both sides
    let mut x = config.margin;
    let mut y = config.margin.saturating_add(font.ascender());
    write_string(&font, &config.text, &mut x, &mut y, &mut fb, &props)?;

    if config.ascii {
        print!("{}", fb.to_ascii());
    } else {
        fs::write(&config.output, fb.to_pgm())?;
        println!("Wrote {}x{} image to {}", width, height, config.output.display());
    }
    Ok(())
}

fn main() {
    env_logger::init();

    let config = match RenderConfig::from_args() {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Error: {}", e);
            std::process::exit(2);
        },
    };

    if let Err(e) = run(&config) {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

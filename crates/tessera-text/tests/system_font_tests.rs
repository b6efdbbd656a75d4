//! Checks against a real font resolved from the platform's installed fonts.
//!
//! Each test skips itself when the machine has no usable font.

use tessera_test_utils::MockRenderContext;
use tessera_text::{
    AtlasBuilder, BitmapFont, FontConfig, FontFace, FontLibrary, FontSource, FontdueFace,
    LibraryConfig,
};

const PIXEL_SIZE: f32 = 16.0;
const LIMIT: u32 = 8192;
const PREFERRED: &[&str] = &[
    "DejaVu Sans",
    "Liberation Sans",
    "Noto Sans",
    "Arial",
    "Helvetica",
    "Segoe UI",
];

struct SystemFont {
    library: FontLibrary,
    family: String,
    data: Vec<u8>,
    index: u32,
}

impl SystemFont {
    fn settings(&self) -> fontdue::FontSettings {
        fontdue::FontSettings {
            collection_index: self.index,
            scale: PIXEL_SIZE,
            ..fontdue::FontSettings::default()
        }
    }

    fn reference(&self) -> fontdue::Font {
        fontdue::Font::from_bytes(self.data.as_slice(), self.settings()).unwrap()
    }

    fn face(&self) -> FontdueFace {
        FontdueFace::from_bytes(&self.data, self.index, PIXEL_SIZE).unwrap()
    }
}

/// A system family that fontdue can open and that has a 'g' with a descender.
fn system_font() -> Option<SystemFont> {
    let library = FontLibrary::new(LibraryConfig::with_system_fonts());
    let lease = library.acquire().ok()?;
    let families = lease.families().ok()?;

    let candidates = PREFERRED
        .iter()
        .map(|name| name.to_string())
        .filter(|name| families.contains(name))
        .chain(families.iter().cloned());

    for family in candidates {
        let Ok((data, index)) = lease.family_data(&family) else {
            continue;
        };
        let settings = fontdue::FontSettings {
            collection_index: index,
            scale: PIXEL_SIZE,
            ..fontdue::FontSettings::default()
        };
        let Ok(font) = fontdue::Font::from_bytes(data.as_slice(), settings) else {
            continue;
        };
        let has_descender = font.lookup_glyph_index('g') != 0
            && font.metrics('g', PIXEL_SIZE).ymin < 0
            && font.horizontal_line_metrics(PIXEL_SIZE).is_some();
        if has_descender {
            drop(lease);
            return Some(SystemFont {
                library,
                family,
                data,
                index,
            });
        }
    }

    None
}

macro_rules! require_system_font {
    () => {
        match system_font() {
            Some(font) => font,
            None => {
                eprintln!("skipping: no usable system font face found");
                return;
            }
        }
    };
}

#[test]
fn test_vertical_metrics_round_up() {
    let font = require_system_font!();
    let reference = font.reference();
    let line = reference.horizontal_line_metrics(PIXEL_SIZE).unwrap();

    let metrics = font.face().vertical_metrics();

    assert_eq!(metrics.ascent, line.ascent.ceil() as i32, "{}", font.family);
    assert_eq!(metrics.descent, line.descent.ceil() as i32, "{}", font.family);
    assert!(metrics.descent <= 0);
    assert_eq!(
        metrics.height as i32,
        metrics.ascent - metrics.descent + 1
    );
    assert_eq!(metrics.line_skip, line.new_line_size.ceil() as u32);
}

#[test]
fn test_advances_round_up() {
    let font = require_system_font!();
    let reference = font.reference();
    let face = font.face();

    for ch in ['A', 'g', 'i', 'W', ' ', '\u{e9}'] {
        let expected = reference.metrics(ch, PIXEL_SIZE).advance_width.ceil() as u32;
        assert_eq!(face.advance(ch as u32), expected, "{ch:?} in {}", font.family);
    }
}

#[test]
fn test_descender_extends_below_baseline() {
    let font = require_system_font!();
    let reference = font.reference();
    let face = font.face();
    let ascent = face.vertical_metrics().ascent;

    let bitmap = face.rasterize(u32::from(b'g')).unwrap();
    let raw = reference.metrics('g', PIXEL_SIZE);

    assert_eq!(bitmap.top, ascent - (raw.ymin + raw.height as i32));
    assert_eq!(bitmap.left, raw.xmin);
    assert!(
        bitmap.top + bitmap.height as i32 > ascent,
        "'g' in {} ends at row {} with the baseline at {}",
        font.family,
        bitmap.top + bitmap.height as i32,
        ascent
    );
}

#[test]
fn test_real_font_builds_identically() {
    let font = require_system_font!();
    let face = font.face();

    let first = AtlasBuilder::new(1).build(&face, LIMIT).unwrap();
    let second = AtlasBuilder::new(1).build(&face, LIMIT).unwrap();
    assert_eq!(first.glyphs, second.glyphs);
    assert_eq!(first.image, second.image);

    let ctx = MockRenderContext::new();
    let source = FontSource::family(font.family.as_str());
    let config = FontConfig::new(PIXEL_SIZE).with_border(1);
    let a = BitmapFont::new(&ctx, &font.library, source.clone(), config).unwrap();
    let b = BitmapFont::new(&ctx, &font.library, source, config).unwrap();

    assert_eq!(a.atlas().glyphs(), b.atlas().glyphs());
    assert_eq!(ctx.texture_data(a.texture()), ctx.texture_data(b.texture()));
    assert_eq!(ctx.texture_data(a.texture()).unwrap(), first.image.pixels());
}

#[test]
fn test_bytes_and_family_sources_agree() {
    let font = require_system_font!();
    let ctx = MockRenderContext::new();
    let config = FontConfig::new(PIXEL_SIZE);

    let by_family = BitmapFont::new(
        &ctx,
        &font.library,
        FontSource::family(font.family.as_str()),
        config,
    )
    .unwrap();

    assert_eq!(by_family.metrics(), &font.face().vertical_metrics());
    if font.index == 0 {
        let by_bytes =
            BitmapFont::new(&ctx, &font.library, FontSource::bytes(font.data.clone()), config)
                .unwrap();
        assert_eq!(by_family.atlas().glyphs(), by_bytes.atlas().glyphs());
    }
}

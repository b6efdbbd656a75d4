mod common;

use common::SyntheticFace;
use tessera_test_utils::{MockRenderContext, RenderCall};
use tessera_text::{
    AtlasBuilder, AtlasLayout, BitmapFont, FontLibrary, LibraryConfig, TextError, ATLAS_FORMAT,
};

const LIMIT: u32 = 8192;

fn library() -> FontLibrary {
    FontLibrary::new(LibraryConfig::default())
}

#[test]
fn test_atlas_dimensions_are_smallest_power_of_two() {
    let ctx = MockRenderContext::new();
    let library = library();

    for size in [8, 12, 48] {
        for border in [0, 1, 4, 16] {
            let face = SyntheticFace::new(size);
            let font = BitmapFont::from_face(&ctx, &library, &face, border).unwrap();
            let atlas = font.atlas();

            let required_w = 16 * (atlas.max_advance() + border) + border;
            let required_h = 16 * (font.metrics().height + border) + border;

            assert!(atlas.width().is_power_of_two());
            assert!(atlas.height().is_power_of_two());
            assert!(atlas.width() >= required_w, "size {size} border {border}");
            assert!(atlas.height() >= required_h, "size {size} border {border}");
            assert!(atlas.width() / 2 < required_w, "size {size} border {border}");
            assert!(atlas.height() / 2 < required_h, "size {size} border {border}");
        }
    }
}

#[test]
fn test_layout_matches_built_atlas() {
    let face = SyntheticFace::new(12);
    let layout = AtlasLayout::for_face(&face, 2, LIMIT).unwrap();
    let built = AtlasBuilder::new(2).build(&face, LIMIT).unwrap();

    assert_eq!(layout, built.layout);
    assert_eq!(built.image.width(), layout.width);
    assert_eq!(built.image.height(), layout.height);
}

#[test]
fn test_max_advance_and_metrics() {
    let face = SyntheticFace::new(12);
    let built = AtlasBuilder::new(0).build(&face, LIMIT).unwrap();

    // 12 / 2 + 6
    assert_eq!(built.max_advance, 12);
    assert_eq!(built.font_metrics.ascent, 10);
    assert_eq!(built.font_metrics.descent, -3);
    assert_eq!(built.font_metrics.height, 14);
    assert_eq!(built.font_metrics.line_skip, 16);
    assert_eq!(built.glyphs.len(), 256);
    assert_eq!(built.glyphs.get(u32::from(b'a')).unwrap().advance, 12);
}

#[test]
fn test_border_zero_cells_match_metrics() {
    let face = SyntheticFace::new(12);
    let built = AtlasBuilder::new(0).build(&face, LIMIT).unwrap();

    assert_eq!(built.layout.cell_width, built.max_advance);
    assert_eq!(built.layout.cell_height, built.font_metrics.height);
    assert_eq!(built.layout.width, 256);
    assert_eq!(built.layout.height, 256);

    let entry = built.glyphs.get(17).unwrap();
    assert_eq!((entry.cell_x, entry.cell_y), (12, 14));
}

#[test]
fn test_cell_origins_follow_grid() {
    let face = SyntheticFace::new(8);
    let border = 4;
    let built = AtlasBuilder::new(border).build(&face, LIMIT).unwrap();
    let cell_w = built.max_advance + border;
    let cell_h = built.font_metrics.height + border;

    for (codepoint, entry) in built.glyphs.iter() {
        assert_eq!(entry.cell_x, border + (codepoint % 16) * cell_w);
        assert_eq!(entry.cell_y, border + (codepoint / 16) * cell_h);
    }
}

#[test]
fn test_build_is_deterministic() {
    let ctx = MockRenderContext::new();
    let library = library();

    let first = BitmapFont::from_face(&ctx, &library, &SyntheticFace::new(12), 1).unwrap();
    let second = BitmapFont::from_face(&ctx, &library, &SyntheticFace::new(12), 1).unwrap();

    assert_eq!(first.atlas().glyphs(), second.atlas().glyphs());
    assert_eq!(first.atlas().layout(), second.atlas().layout());

    let first_pixels = ctx.texture_data(first.texture()).unwrap();
    let second_pixels = ctx.texture_data(second.texture()).unwrap();
    assert_eq!(first_pixels, second_pixels);
}

#[test]
fn test_codepoint_zero_is_never_rasterized() {
    let face = SyntheticFace::new(12);
    let built = AtlasBuilder::new(1).build(&face, LIMIT).unwrap();

    let calls = face.rasterized();
    assert!(!calls.contains(&0));
    assert_eq!(calls.len(), 255);

    let zero = built.glyphs.get(0).unwrap();
    assert_eq!((zero.cell_x, zero.cell_y), (1, 1));
    for y in zero.cell_y..zero.cell_y + built.font_metrics.height {
        for x in zero.cell_x..zero.cell_x + built.max_advance {
            assert_eq!(built.image.pixel(x, y), Some([0, 0, 0, 0]));
        }
    }
}

#[test]
fn test_glyph_pixels_are_white_with_alpha() {
    let face = SyntheticFace::new(12);
    let built = AtlasBuilder::new(0).build(&face, LIMIT).unwrap();
    let a = built.glyphs.get(u32::from(b'A')).unwrap();

    let texel = built.image.pixel(a.cell_x, a.cell_y).unwrap();
    assert_eq!(&texel[..3], &[255, 255, 255]);
    assert_eq!(texel[3], ((65 % 255) + 1) as u8);

    // The space has no bitmap.
    let space = built.glyphs.get(u32::from(b' ')).unwrap();
    assert_eq!(built.image.pixel(space.cell_x, space.cell_y), Some([0, 0, 0, 0]));
}

#[test]
fn test_border_pixels_stay_transparent() {
    let face = SyntheticFace::new(12);
    let border = 4;
    let built = AtlasBuilder::new(border).build(&face, LIMIT).unwrap();

    for y in 0..built.layout.height {
        for x in 0..border {
            assert_eq!(built.image.pixel(x, y), Some([0, 0, 0, 0]));
        }
    }
}

#[test]
fn test_upload_creates_single_texture() {
    let ctx = MockRenderContext::new();
    let library = library();
    let font = BitmapFont::from_face(&ctx, &library, &SyntheticFace::new(12), 0).unwrap();

    let calls = ctx.calls();
    assert_eq!(
        calls,
        vec![
            RenderCall::CreateTexture {
                label: Some(String::from("Font Atlas")),
                width: 256,
                height: 256,
                format: ATLAS_FORMAT,
            },
            RenderCall::WriteTexture {
                texture_id: 0,
                size: 256 * 256 * 4,
                bytes_per_row: 256 * 4,
            },
        ]
    );
    assert_eq!(font.texture().width(), 256);
}

#[test]
fn test_atlas_too_large() {
    let ctx = MockRenderContext::with_max_texture_dimension(128);
    let library = library();

    let result = BitmapFont::from_face(&ctx, &library, &SyntheticFace::new(48), 0);

    assert!(matches!(
        result,
        Err(TextError::AtlasTooLarge { max: 128, .. })
    ));
    assert_eq!(ctx.count_texture_creates(), 0);
    assert_eq!(library.ref_count(), 0);
}

#[test]
fn test_huge_border_fails_before_rasterizing() {
    let ctx = MockRenderContext::new();
    let library = library();
    let face = SyntheticFace::new(12);

    let result = BitmapFont::from_face(&ctx, &library, &face, 40_000);

    assert!(matches!(
        result,
        Err(TextError::AtlasTooLarge { max: 8192, .. })
    ));
    assert!(face.rasterized().is_empty());
    assert_eq!(ctx.count_texture_creates(), 0);
    assert_eq!(library.ref_count(), 0);
}

#[test]
fn test_overflowing_border_is_rejected() {
    let ctx = MockRenderContext::with_max_texture_dimension(u32::MAX);
    let library = library();
    let face = SyntheticFace::new(12);

    let result = BitmapFont::from_face(&ctx, &library, &face, u32::MAX);

    assert!(matches!(
        result,
        Err(TextError::AtlasTooLarge { width: u32::MAX, height: u32::MAX, .. })
    ));
    assert!(face.rasterized().is_empty());
}

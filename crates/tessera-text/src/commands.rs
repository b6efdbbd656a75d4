//! Per-glyph draw commands compiled from an uploaded atlas.

use tessera_core::math::Vec2;
use tessera_core::profiling::profile_function;

use crate::atlas::FontAtlas;
use crate::emitter::{PenTransform, TextBatch};
use crate::metrics::CHARSET_LEN;

/// A precompiled textured quad for one glyph plus its pen advance.
///
/// Corners run bottom-left, bottom-right, top-right, top-left, relative to
/// the pen on the baseline. Y points up.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GlyphQuad {
    pub positions: [Vec2; 4],
    pub uvs: [Vec2; 4],
    pub advance: f32,
}

impl GlyphQuad {
    /// Append this glyph at the pen and advance the pen past it.
    pub fn replay(&self, pen: &mut PenTransform, color: [f32; 4], batch: &mut TextBatch) {
        let origin = pen.position();
        let positions = self.positions.map(|corner| corner + origin);
        batch.push_quad(positions, self.uvs, color);
        pen.translate(self.advance, 0.0);
    }
}

/// Draw commands for the whole code page, indexed by codepoint.
#[derive(Debug, Clone, Default)]
pub struct DrawCommands {
    quads: Vec<GlyphQuad>,
}

impl DrawCommands {
    pub fn compile(atlas: &FontAtlas) -> Self {
        profile_function!();

        let width = atlas.width() as f32;
        let height = atlas.height() as f32;
        let metrics = atlas.font_metrics();
        let ascent = metrics.ascent as f32;
        let descent = metrics.descent as f32;

        let quads: Vec<GlyphQuad> = (0..CHARSET_LEN)
            .map(|codepoint| {
                let entry = atlas.glyphs().get(codepoint).copied().unwrap_or_default();
                let advance = entry.advance as f32;

                let u0 = entry.cell_x as f32 / width;
                let u1 = (entry.cell_x + entry.advance) as f32 / width;
                // Texture rows grow downwards: the cell top holds the ascent.
                let v_top = entry.cell_y as f32 / height;
                let v_bottom = (entry.cell_y as f32 + ascent - descent) / height;

                GlyphQuad {
                    positions: [
                        Vec2::new(0.0, descent),
                        Vec2::new(advance, descent),
                        Vec2::new(advance, ascent),
                        Vec2::new(0.0, ascent),
                    ],
                    uvs: [
                        Vec2::new(u0, v_bottom),
                        Vec2::new(u1, v_bottom),
                        Vec2::new(u1, v_top),
                        Vec2::new(u0, v_top),
                    ],
                    advance,
                }
            })
            .collect();

        tracing::trace!("Compiled {} glyph draw commands", quads.len());
        Self { quads }
    }

    /// Draw command for `codepoint`, or `None` outside the code page.
    pub fn get(&self, codepoint: u32) -> Option<&GlyphQuad> {
        self.quads.get(codepoint as usize)
    }

    pub fn len(&self) -> usize {
        self.quads.len()
    }

    pub fn is_empty(&self) -> bool {
        self.quads.is_empty()
    }
}

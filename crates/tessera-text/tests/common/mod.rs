//! Shared helpers for tessera-text integration tests.
#![allow(dead_code)]

use std::cell::RefCell;

use tessera_text::{FontFace, FontMetrics, GlyphBitmap};

/// Deterministic stand-in for a real font.
///
/// Advances are `size / 2 + codepoint % 7`, the ascent is `ceil(0.8 * size)`,
/// the descent `-ceil(0.2 * size)` and the line skip `height + 2`. Every
/// codepoint except the space rasterizes to a block filling its advance minus
/// one pixel, including codepoint 0.
pub struct SyntheticFace {
    size: f32,
    metrics: FontMetrics,
    rasterized: RefCell<Vec<u32>>,
}

impl SyntheticFace {
    pub fn new(size: u32) -> Self {
        let ascent = (size as f32 * 0.8).ceil() as i32;
        let descent = -((size as f32 * 0.2).ceil() as i32);
        let height = (ascent - descent + 1) as u32;

        Self {
            size: size as f32,
            metrics: FontMetrics::new(ascent, descent, height + 2),
            rasterized: RefCell::new(Vec::new()),
        }
    }

    /// Codepoints passed to `rasterize`, in call order.
    pub fn rasterized(&self) -> Vec<u32> {
        self.rasterized.borrow().clone()
    }

    pub fn expected_advance(&self, codepoint: u32) -> u32 {
        self.size as u32 / 2 + codepoint % 7
    }
}

impl FontFace for SyntheticFace {
    fn pixel_size(&self) -> f32 {
        self.size
    }

    fn advance(&self, codepoint: u32) -> u32 {
        self.expected_advance(codepoint)
    }

    fn vertical_metrics(&self) -> FontMetrics {
        self.metrics
    }

    fn rasterize(&self, codepoint: u32) -> Option<GlyphBitmap> {
        self.rasterized.borrow_mut().push(codepoint);
        if codepoint == u32::from(b' ') {
            return None;
        }

        let width = self.advance(codepoint).saturating_sub(1).max(1);
        let height = self.metrics.ascent as u32;
        let coverage = (0..height)
            .flat_map(|y| (0..width).map(move |x| ((x * 31 + y * 17 + codepoint) % 255 + 1) as u8))
            .collect();

        Some(GlyphBitmap {
            width,
            height,
            left: 0,
            top: 0,
            coverage,
        })
    }
}

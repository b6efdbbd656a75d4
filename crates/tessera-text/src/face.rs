//! Font engine seam and the fontdue-backed implementation.

use std::path::PathBuf;
use std::sync::Arc;

use crate::error::{TextError, TextResult};
use crate::metrics::FontMetrics;

/// Where a font's bytes come from.
#[derive(Debug, Clone)]
pub enum FontSource {
    /// A `.ttf`/`.otf` file on disk.
    File(PathBuf),
    /// Font data already in memory.
    Bytes(Arc<Vec<u8>>),
    /// A family name resolved through the font library's database.
    Family(String),
}

impl FontSource {
    pub fn file(path: impl Into<PathBuf>) -> Self {
        FontSource::File(path.into())
    }

    pub fn bytes(data: Vec<u8>) -> Self {
        FontSource::Bytes(Arc::new(data))
    }

    pub fn family(name: impl Into<String>) -> Self {
        FontSource::Family(name.into())
    }
}

/// An alpha coverage bitmap for one glyph.
///
/// `left`/`top` place the bitmap relative to the top-left of the glyph's
/// cell, with the baseline `ascent` pixels below the cell top.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GlyphBitmap {
    pub width: u32,
    pub height: u32,
    pub left: i32,
    pub top: i32,
    /// Row-major coverage, `width * height` bytes.
    pub coverage: Vec<u8>,
}

/// A scalable font opened at one fixed pixel size.
pub trait FontFace {
    /// The size the face was opened at.
    fn pixel_size(&self) -> f32;

    /// Horizontal advance of `codepoint` in whole pixels.
    fn advance(&self, codepoint: u32) -> u32;

    /// Face-wide vertical metrics.
    fn vertical_metrics(&self) -> FontMetrics;

    /// Rasterize `codepoint`. `None` when the glyph has no visible pixels.
    fn rasterize(&self, codepoint: u32) -> Option<GlyphBitmap>;
}

/// [`FontFace`] backed by `fontdue`.
pub struct FontdueFace {
    font: fontdue::Font,
    pixel_size: f32,
    metrics: FontMetrics,
}

impl FontdueFace {
    /// Parse font data and open it at `pixel_size`.
    ///
    /// `collection_index` selects a face inside a font collection; use 0 for
    /// plain `.ttf`/`.otf` files.
    pub fn from_bytes(data: &[u8], collection_index: u32, pixel_size: f32) -> TextResult<Self> {
        if !pixel_size.is_finite() || pixel_size <= 0.0 {
            return Err(TextError::InvalidPixelSize(pixel_size));
        }

        let settings = fontdue::FontSettings {
            collection_index,
            scale: pixel_size,
            ..fontdue::FontSettings::default()
        };
        let font = fontdue::Font::from_bytes(data, settings)
            .map_err(|e| TextError::InvalidFontData(e.to_string()))?;

        let line = font.horizontal_line_metrics(pixel_size).ok_or_else(|| {
            TextError::InvalidFontData(String::from("font has no horizontal line metrics"))
        })?;

        let metrics = FontMetrics::new(
            line.ascent.ceil() as i32,
            line.descent.ceil() as i32,
            line.new_line_size.ceil().max(0.0) as u32,
        );

        tracing::debug!(
            "Opened font face at {}px: glyphs={} {:?}",
            pixel_size,
            font.glyph_count(),
            metrics
        );

        Ok(Self {
            font,
            pixel_size,
            metrics,
        })
    }

    fn glyph_char(codepoint: u32) -> Option<char> {
        char::from_u32(codepoint)
    }
}

impl FontFace for FontdueFace {
    fn pixel_size(&self) -> f32 {
        self.pixel_size
    }

    fn advance(&self, codepoint: u32) -> u32 {
        match Self::glyph_char(codepoint) {
            Some(ch) => self
                .font
                .metrics(ch, self.pixel_size)
                .advance_width
                .ceil()
                .max(0.0) as u32,
            None => 0,
        }
    }

    fn vertical_metrics(&self) -> FontMetrics {
        self.metrics
    }

    fn rasterize(&self, codepoint: u32) -> Option<GlyphBitmap> {
        let ch = Self::glyph_char(codepoint)?;
        let (metrics, coverage) = self.font.rasterize(ch, self.pixel_size);
        if metrics.width == 0 || metrics.height == 0 {
            return None;
        }

        // fontdue measures ymin upwards from the baseline to the bitmap bottom.
        let top = self.metrics.ascent - (metrics.ymin + metrics.height as i32);

        Some(GlyphBitmap {
            width: metrics.width as u32,
            height: metrics.height as u32,
            left: metrics.xmin,
            top,
            coverage,
        })
    }
}

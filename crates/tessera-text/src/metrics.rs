//! Glyph metrics collection for the fixed 256-slot code page.

use tessera_core::alloc::HashMap;

use crate::face::FontFace;

/// Number of slots in the code page (U+0000..=U+00FF).
pub const CHARSET_LEN: u32 = 256;

/// Cells per atlas row and per atlas column.
pub const GRID_DIM: u32 = 16;

/// Font-level vertical metrics, in whole pixels.
///
/// `descent` is measured upwards from the baseline, so it is zero or negative.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FontMetrics {
    /// Glyph box height: `ascent - descent + 1`.
    pub height: u32,
    pub ascent: i32,
    pub descent: i32,
    /// Distance between consecutive baselines.
    pub line_skip: u32,
}

impl FontMetrics {
    /// Build metrics from ascent, descent and line skip, deriving `height`.
    pub fn new(ascent: i32, descent: i32, line_skip: u32) -> Self {
        Self {
            height: (ascent - descent + 1).max(0) as u32,
            ascent,
            descent,
            line_skip,
        }
    }
}

/// Per-codepoint entry of the glyph table.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct GlyphEntry {
    /// Horizontal advance in pixels.
    pub advance: u32,
    /// Top-left corner of the glyph's cell in the atlas, in pixels.
    pub cell_x: u32,
    pub cell_y: u32,
}

/// Sparse mapping from codepoint to glyph entry.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct GlyphTable {
    entries: HashMap<u32, GlyphEntry>,
}

impl GlyphTable {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, codepoint: u32) -> Option<&GlyphEntry> {
        self.entries.get(&codepoint)
    }

    pub fn get_mut(&mut self, codepoint: u32) -> Option<&mut GlyphEntry> {
        self.entries.get_mut(&codepoint)
    }

    pub fn insert(&mut self, codepoint: u32, entry: GlyphEntry) {
        self.entries.insert(codepoint, entry);
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Iterate entries in ascending codepoint order.
    pub fn iter(&self) -> impl Iterator<Item = (u32, &GlyphEntry)> {
        (0..CHARSET_LEN).filter_map(move |cp| self.entries.get(&cp).map(|entry| (cp, entry)))
    }
}

/// Advances and vertical metrics gathered from a font face.
#[derive(Debug, Clone, PartialEq)]
pub struct GlyphMetrics {
    pub glyphs: GlyphTable,
    pub font: FontMetrics,
    /// Largest advance among all code page slots; sets the cell width.
    pub max_advance: u32,
}

/// Query every code page slot's advance plus the face's vertical metrics.
pub fn collect_glyph_metrics(face: &dyn FontFace) -> GlyphMetrics {
    let mut glyphs = GlyphTable::new();
    let mut max_advance = 0;

    for codepoint in 0..CHARSET_LEN {
        let advance = face.advance(codepoint);
        max_advance = max_advance.max(advance);
        glyphs.insert(
            codepoint,
            GlyphEntry {
                advance,
                ..Default::default()
            },
        );
    }

    let font = face.vertical_metrics();
    tracing::trace!(
        "Collected metrics for {} glyphs: max_advance={} {:?}",
        glyphs.len(),
        max_advance,
        font
    );

    GlyphMetrics {
        glyphs,
        font,
        max_advance,
    }
}

//! Bitmap font resources: one atlas texture plus compiled glyph draw commands.

use std::sync::atomic::{AtomicU64, Ordering};

use tessera_core::profiling::profile_function;
use tessera_render::{GpuTexture, RenderContext};

use crate::atlas::{AtlasBuilder, FontAtlas};
use crate::commands::{DrawCommands, GlyphQuad};
use crate::error::TextResult;
use crate::face::{FontFace, FontSource};
use crate::library::{FontLibrary, LibraryLease};
use crate::metrics::{FontMetrics, GlyphEntry};

/// Size and packing options for a [`BitmapFont`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FontConfig {
    pub pixel_size: f32,
    /// Padding in pixels between packed glyph cells.
    pub border: u32,
}

impl FontConfig {
    pub fn new(pixel_size: f32) -> Self {
        Self {
            pixel_size,
            border: 0,
        }
    }

    pub fn with_border(mut self, border: u32) -> Self {
        self.border = border;
        self
    }
}

impl Default for FontConfig {
    fn default() -> Self {
        Self::new(16.0)
    }
}

/// Process-unique identity of a font, used to group batches by texture.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct FontId(u64);

impl FontId {
    fn next() -> Self {
        static NEXT: AtomicU64 = AtomicU64::new(1);
        FontId(NEXT.fetch_add(1, Ordering::Relaxed))
    }

    pub fn raw(self) -> u64 {
        self.0
    }

    #[cfg(test)]
    pub(crate) fn for_tests(raw: u64) -> Self {
        FontId(raw)
    }
}

/// A font rasterized at one size into a fixed 256-glyph atlas.
///
/// Owns the atlas texture and the compiled draw commands. While alive it also
/// holds a lease on the [`FontLibrary`] it was created from.
///
/// ```rust,no_run
/// use tessera_render::GraphicsContext;
/// use tessera_text::{BitmapFont, FontConfig, FontLibrary, FontSource, LibraryConfig};
///
/// let ctx = GraphicsContext::new_owned_sync().unwrap();
/// let library = FontLibrary::new(LibraryConfig::default());
/// let font = BitmapFont::new(
///     &*ctx,
///     &library,
///     FontSource::file("Vera.ttf"),
///     FontConfig::new(16.0),
/// )
/// .unwrap();
/// println!("line skip: {}", font.line_skip());
/// ```
#[derive(Debug)]
pub struct BitmapFont {
    id: FontId,
    atlas: FontAtlas,
    commands: DrawCommands,
    // Declared last so the texture is released before the library lease.
    _lease: LibraryLease,
}

impl BitmapFont {
    /// Open `source` through `library` and build its atlas.
    pub fn new(
        ctx: &dyn RenderContext,
        library: &FontLibrary,
        source: FontSource,
        config: FontConfig,
    ) -> TextResult<Self> {
        profile_function!();

        let lease = library.acquire()?;
        let face = lease.open_face(&source, config.pixel_size)?;
        Self::build(ctx, lease, &face, config.border)
    }

    /// Build from a caller-supplied font face.
    pub fn from_face(
        ctx: &dyn RenderContext,
        library: &FontLibrary,
        face: &dyn FontFace,
        border: u32,
    ) -> TextResult<Self> {
        profile_function!();

        let lease = library.acquire()?;
        Self::build(ctx, lease, face, border)
    }

    fn build(
        ctx: &dyn RenderContext,
        lease: LibraryLease,
        face: &dyn FontFace,
        border: u32,
    ) -> TextResult<Self> {
        let atlas = AtlasBuilder::new(border)
            .build(face, ctx.max_texture_dimension_2d())?
            .upload(ctx)?;
        let commands = DrawCommands::compile(&atlas);
        let id = FontId::next();

        tracing::debug!(
            "Created bitmap font {:?} at {}px ({}x{} atlas)",
            id,
            face.pixel_size(),
            atlas.width(),
            atlas.height()
        );

        Ok(Self {
            id,
            atlas,
            commands,
            _lease: lease,
        })
    }

    pub fn id(&self) -> FontId {
        self.id
    }

    /// Distance between consecutive baselines, in pixels.
    pub fn line_skip(&self) -> u32 {
        self.atlas.font_metrics().line_skip
    }

    pub fn metrics(&self) -> &FontMetrics {
        self.atlas.font_metrics()
    }

    pub fn atlas(&self) -> &FontAtlas {
        &self.atlas
    }

    pub fn texture(&self) -> &GpuTexture {
        self.atlas.texture()
    }

    pub fn glyph(&self, codepoint: u32) -> Option<&GlyphEntry> {
        self.atlas.glyphs().get(codepoint)
    }

    pub fn draw_command(&self, codepoint: u32) -> Option<&GlyphQuad> {
        self.commands.get(codepoint)
    }

    /// Sum of advances of `line`, skipping characters outside the code page.
    pub fn measure_line(&self, line: &str) -> u32 {
        line.chars()
            .filter_map(|ch| self.glyph(ch as u32))
            .map(|entry| entry.advance)
            .sum()
    }
}

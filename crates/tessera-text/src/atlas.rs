//! Atlas packing: a 16x16 grid of fixed-size cells in a power-of-two texture.

use tessera_core::profiling::profile_function;
use tessera_render::{GpuTexture, RenderContext};

use crate::error::{TextError, TextResult};
use crate::face::{FontFace, GlyphBitmap};
use crate::metrics::{collect_glyph_metrics, FontMetrics, GlyphTable, CHARSET_LEN, GRID_DIM};

/// Texture format of uploaded atlases.
pub const ATLAS_FORMAT: tessera_render::wgpu::TextureFormat =
    tessera_render::wgpu::TextureFormat::Rgba8Unorm;

const BYTES_PER_PIXEL: usize = 4;

/// Grid geometry of an atlas, computable before anything is rasterized.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AtlasLayout {
    /// Power-of-two texture width.
    pub width: u32,
    /// Power-of-two texture height.
    pub height: u32,
    /// `max_advance + border`.
    pub cell_width: u32,
    /// `glyph_height + border`.
    pub cell_height: u32,
    pub border: u32,
    /// Width actually covered by the grid, before rounding.
    pub packed_width: u32,
    /// Height actually covered by the grid, before rounding.
    pub packed_height: u32,
}

impl AtlasLayout {
    /// Lay out the grid, failing if either power-of-two dimension would exceed
    /// `max_dimension` or does not fit in a `u32`.
    pub fn new(
        max_advance: u32,
        glyph_height: u32,
        border: u32,
        max_dimension: u32,
    ) -> TextResult<Self> {
        let width = Extent::along(max_advance, border);
        let height = Extent::along(glyph_height, border);

        match (width, height) {
            (Some(width), Some(height))
                if width.texture <= max_dimension && height.texture <= max_dimension =>
            {
                Ok(Self {
                    width: width.texture,
                    height: height.texture,
                    cell_width: width.cell,
                    cell_height: height.cell,
                    border,
                    packed_width: width.packed,
                    packed_height: height.packed,
                })
            }
            (width, height) => Err(TextError::AtlasTooLarge {
                width: width.map_or(u32::MAX, |extent| extent.texture),
                height: height.map_or(u32::MAX, |extent| extent.texture),
                max: max_dimension,
            }),
        }
    }

    /// Layout for the glyphs of `face` without rasterizing them.
    pub fn for_face(face: &dyn FontFace, border: u32, max_dimension: u32) -> TextResult<Self> {
        let metrics = collect_glyph_metrics(face);
        Self::new(metrics.max_advance, metrics.font.height, border, max_dimension)
    }

    /// Top-left pixel of the cell holding `codepoint`.
    ///
    /// Row `codepoint / 16`, column `codepoint % 16`; row 0 is the top of the
    /// texture.
    pub fn cell_origin(&self, codepoint: u32) -> (u32, u32) {
        let row = codepoint / GRID_DIM;
        let col = codepoint % GRID_DIM;
        (
            self.border + col * self.cell_width,
            self.border + row * self.cell_height,
        )
    }

    /// Glyph area of a cell, excluding the border padding.
    pub fn glyph_area(&self) -> (u32, u32) {
        (
            self.cell_width - self.border,
            self.cell_height - self.border,
        )
    }

    pub fn exceeds(&self, max_dimension: u32) -> bool {
        self.width > max_dimension || self.height > max_dimension
    }
}

/// One axis of the grid: cell size, packed size and texture size.
#[derive(Debug, Clone, Copy)]
struct Extent {
    cell: u32,
    packed: u32,
    texture: u32,
}

impl Extent {
    /// `None` when any step overflows `u32`.
    fn along(glyph_extent: u32, border: u32) -> Option<Self> {
        let cell = glyph_extent.checked_add(border)?;
        let packed = cell.checked_mul(GRID_DIM)?.checked_add(border)?;
        let texture = packed.checked_next_power_of_two()?;
        Some(Self {
            cell,
            packed,
            texture,
        })
    }
}

/// CPU-side RGBA8 pixels of an atlas under construction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AtlasImage {
    width: u32,
    height: u32,
    pixels: Vec<u8>,
}

impl AtlasImage {
    /// A fully transparent image.
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            pixels: vec![0; width as usize * height as usize * BYTES_PER_PIXEL],
        }
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn pixels(&self) -> &[u8] {
        &self.pixels
    }

    pub fn bytes_per_row(&self) -> u32 {
        self.width * BYTES_PER_PIXEL as u32
    }

    /// RGBA value at `(x, y)`.
    pub fn pixel(&self, x: u32, y: u32) -> Option<[u8; 4]> {
        if x >= self.width || y >= self.height {
            return None;
        }
        let offset = (y as usize * self.width as usize + x as usize) * BYTES_PER_PIXEL;
        let mut rgba = [0; 4];
        rgba.copy_from_slice(&self.pixels[offset..offset + BYTES_PER_PIXEL]);
        Some(rgba)
    }

    /// Copy `bitmap` into the cell at `(cell_x, cell_y)` of size
    /// `cell_width x cell_height` as white texels with coverage in alpha.
    ///
    /// Pixels falling outside the cell or the image are dropped. Returns
    /// `true` if anything was clipped.
    pub fn blit_glyph(
        &mut self,
        cell_x: u32,
        cell_y: u32,
        cell_width: u32,
        cell_height: u32,
        bitmap: &GlyphBitmap,
    ) -> bool {
        let right = (cell_x + cell_width).min(self.width) as i64;
        let bottom = (cell_y + cell_height).min(self.height) as i64;
        let mut clipped = false;

        for gy in 0..bitmap.height {
            let y = cell_y as i64 + bitmap.top as i64 + gy as i64;
            if y < cell_y as i64 || y >= bottom {
                clipped = true;
                continue;
            }

            let src_row = (gy * bitmap.width) as usize;
            let dst_row = y as usize * self.width as usize;

            for gx in 0..bitmap.width {
                let x = cell_x as i64 + bitmap.left as i64 + gx as i64;
                if x < cell_x as i64 || x >= right {
                    clipped = true;
                    continue;
                }

                let coverage = bitmap.coverage.get(src_row + gx as usize).copied().unwrap_or(0);
                let offset = (dst_row + x as usize) * BYTES_PER_PIXEL;
                self.pixels[offset..offset + BYTES_PER_PIXEL]
                    .copy_from_slice(&[255, 255, 255, coverage]);
            }
        }

        clipped
    }

    pub fn into_pixels(self) -> Vec<u8> {
        self.pixels
    }
}

/// Rasterizes a face's code page into an [`AtlasImage`].
#[derive(Debug, Clone, Copy, Default)]
pub struct AtlasBuilder {
    border: u32,
}

impl AtlasBuilder {
    pub fn new(border: u32) -> Self {
        Self { border }
    }

    pub fn border(&self) -> u32 {
        self.border
    }

    /// Collect metrics, lay out the grid and rasterize every glyph except
    /// codepoint 0.
    ///
    /// The layout is checked against `max_dimension` before any pixels are
    /// allocated.
    pub fn build(&self, face: &dyn FontFace, max_dimension: u32) -> TextResult<BuiltAtlas> {
        profile_function!();

        let metrics = collect_glyph_metrics(face);
        let layout = AtlasLayout::new(
            metrics.max_advance,
            metrics.font.height,
            self.border,
            max_dimension,
        )?;
        let (glyph_width, glyph_height) = layout.glyph_area();

        let mut glyphs = metrics.glyphs;
        let mut image = AtlasImage::new(layout.width, layout.height);

        for codepoint in 0..CHARSET_LEN {
            let (cell_x, cell_y) = layout.cell_origin(codepoint);
            if let Some(entry) = glyphs.get_mut(codepoint) {
                entry.cell_x = cell_x;
                entry.cell_y = cell_y;
            }

            if codepoint == 0 {
                continue;
            }

            if let Some(bitmap) = face.rasterize(codepoint) {
                if image.blit_glyph(cell_x, cell_y, glyph_width, glyph_height, &bitmap) {
                    tracing::warn!(
                        "Glyph U+{:04X} ({}x{} at {},{}) clipped to its {}x{} cell",
                        codepoint,
                        bitmap.width,
                        bitmap.height,
                        bitmap.left,
                        bitmap.top,
                        glyph_width,
                        glyph_height
                    );
                }
            }
        }

        tracing::debug!(
            "Built atlas {}x{} (cell {}x{}, border {}, {}px)",
            layout.width,
            layout.height,
            layout.cell_width,
            layout.cell_height,
            layout.border,
            face.pixel_size()
        );

        Ok(BuiltAtlas {
            layout,
            glyphs,
            font_metrics: metrics.font,
            max_advance: metrics.max_advance,
            image,
        })
    }
}

/// An atlas rasterized on the CPU but not yet uploaded.
#[derive(Debug, Clone)]
pub struct BuiltAtlas {
    pub layout: AtlasLayout,
    pub glyphs: GlyphTable,
    pub font_metrics: FontMetrics,
    pub max_advance: u32,
    pub image: AtlasImage,
}

impl BuiltAtlas {
    /// Upload the pixels as one RGBA texture, releasing the CPU copy.
    pub fn upload(self, ctx: &dyn RenderContext) -> TextResult<FontAtlas> {
        profile_function!();
        use tessera_render::wgpu;

        let max = ctx.max_texture_dimension_2d();
        if self.layout.exceeds(max) {
            return Err(TextError::AtlasTooLarge {
                width: self.layout.width,
                height: self.layout.height,
                max,
            });
        }

        let texture = ctx.create_texture(&wgpu::TextureDescriptor {
            label: Some("Font Atlas"),
            size: wgpu::Extent3d {
                width: self.layout.width,
                height: self.layout.height,
                depth_or_array_layers: 1,
            },
            mip_level_count: 1,
            sample_count: 1,
            dimension: wgpu::TextureDimension::D2,
            format: ATLAS_FORMAT,
            usage: wgpu::TextureUsages::TEXTURE_BINDING | wgpu::TextureUsages::COPY_DST,
            view_formats: &[],
        });

        let bytes_per_row = self.image.bytes_per_row();
        ctx.write_texture(&texture, self.image.pixels(), bytes_per_row);
        tracing::debug!(
            "Uploaded font atlas {}x{} ({} bytes)",
            self.layout.width,
            self.layout.height,
            self.image.pixels().len()
        );

        Ok(FontAtlas {
            texture,
            layout: self.layout,
            glyphs: self.glyphs,
            font_metrics: self.font_metrics,
            max_advance: self.max_advance,
        })
    }
}

/// An uploaded atlas and the tables describing it.
#[derive(Debug)]
pub struct FontAtlas {
    texture: GpuTexture,
    layout: AtlasLayout,
    glyphs: GlyphTable,
    font_metrics: FontMetrics,
    max_advance: u32,
}

impl FontAtlas {
    pub fn texture(&self) -> &GpuTexture {
        &self.texture
    }

    pub fn width(&self) -> u32 {
        self.layout.width
    }

    pub fn height(&self) -> u32 {
        self.layout.height
    }

    pub fn border(&self) -> u32 {
        self.layout.border
    }

    pub fn layout(&self) -> &AtlasLayout {
        &self.layout
    }

    pub fn glyphs(&self) -> &GlyphTable {
        &self.glyphs
    }

    pub fn font_metrics(&self) -> &FontMetrics {
        &self.font_metrics
    }

    pub fn max_advance(&self) -> u32 {
        self.max_advance
    }
}

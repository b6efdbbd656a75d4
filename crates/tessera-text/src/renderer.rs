//! GPU text renderer.
//!
//! [`BitmapTextRenderer`] wraps a [`TextEmitter`] and turns its batches into
//! one indexed draw per font texture run.
//!
//! # Example
//!
//! ```ignore
//! use tessera_render::Color;
//! use tessera_text::{orthographic_y_up, BitmapTextRenderer, TextRendererConfig};
//!
//! let mut text = BitmapTextRenderer::new(context.clone(), TextRendererConfig::default());
//! text.set_projection(orthographic_y_up(640.0, 480.0));
//!
//! text.out_text_at(&font, 100.0, 400.0, "Render multiple lines\nok");
//! text.set_color(Color::RED);
//! text.out_text(&font, "gmm");
//! text.render(&mut render_pass);
//! ```

use std::fmt;
use std::sync::Arc;

use tessera_core::alloc::HashMap;
use tessera_core::math::Mat4;
use tessera_core::profiling::profile_function;
use tessera_render::{Color, GraphicsContext, wgpu};

use crate::emitter::{DEFAULT_FORMAT_CAPACITY, EmitSummary, TextEmitter};
use crate::font::{BitmapFont, FontId};
use crate::pipeline::TextPipeline;

/// Pixel-space projection with the origin at the bottom-left and y up.
pub fn orthographic_y_up(width: f32, height: f32) -> Mat4 {
    Mat4::orthographic_rh(0.0, width, 0.0, height, -1.0, 1.0)
}

/// Configuration for [`BitmapTextRenderer`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TextRendererConfig {
    /// Byte capacity of the `out_fmt*` formatting buffer.
    pub format_capacity: usize,
    /// Color target format of the render passes the renderer draws into.
    pub surface_format: wgpu::TextureFormat,
}

impl Default for TextRendererConfig {
    fn default() -> Self {
        Self {
            format_capacity: DEFAULT_FORMAT_CAPACITY,
            surface_format: wgpu::TextureFormat::Bgra8UnormSrgb,
        }
    }
}

impl TextRendererConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_format_capacity(mut self, capacity: usize) -> Self {
        self.format_capacity = capacity;
        self
    }

    pub fn with_surface_format(mut self, format: wgpu::TextureFormat) -> Self {
        self.surface_format = format;
        self
    }
}

struct CachedBindGroup {
    bind_group: wgpu::BindGroup,
    used: bool,
}

/// Draws text emitted with [`BitmapFont`]s.
pub struct BitmapTextRenderer {
    pipeline: TextPipeline,
    bind_groups: HashMap<FontId, CachedBindGroup>,
    emitter: TextEmitter,
    config: TextRendererConfig,
}

impl BitmapTextRenderer {
    pub fn new(context: Arc<GraphicsContext>, config: TextRendererConfig) -> Self {
        let pipeline = TextPipeline::new(context, config.surface_format);
        tracing::debug!("Created bitmap text renderer for {:?}", config.surface_format);

        Self {
            pipeline,
            bind_groups: HashMap::new(),
            emitter: TextEmitter::new(config.format_capacity),
            config,
        }
    }

    pub fn config(&self) -> &TextRendererConfig {
        &self.config
    }

    /// Projection applied to emitted pixel coordinates.
    pub fn set_projection(&mut self, projection: Mat4) {
        self.pipeline.set_projection(projection);
    }

    pub fn set_color(&mut self, color: Color) {
        self.emitter.set_color(color);
    }

    pub fn out_text_at(&mut self, font: &BitmapFont, x: f32, y: f32, text: &str) -> EmitSummary {
        self.emitter.out_text_at(font, x, y, text)
    }

    pub fn out_text(&mut self, font: &BitmapFont, text: &str) -> EmitSummary {
        self.emitter.out_text(font, text)
    }

    pub fn out_fmt_at(
        &mut self,
        font: &BitmapFont,
        x: f32,
        y: f32,
        args: fmt::Arguments<'_>,
    ) -> EmitSummary {
        self.emitter.out_fmt_at(font, x, y, args)
    }

    pub fn out_fmt(&mut self, font: &BitmapFont, args: fmt::Arguments<'_>) -> EmitSummary {
        self.emitter.out_fmt(font, args)
    }

    pub fn emitter(&self) -> &TextEmitter {
        &self.emitter
    }

    pub fn emitter_mut(&mut self) -> &mut TextEmitter {
        &mut self.emitter
    }

    /// Draw everything emitted since the last render, then clear it.
    pub fn render(&mut self, render_pass: &mut wgpu::RenderPass) {
        profile_function!();

        let batches = self.emitter.take_batches();
        for cached in self.bind_groups.values_mut() {
            cached.used = false;
        }

        self.pipeline.begin(render_pass);

        for batch in batches.iter().filter(|batch| !batch.is_empty()) {
            let pipeline = &self.pipeline;
            let cached = self.bind_groups.entry(batch.font_id).or_insert_with(|| {
                tracing::trace!("Created atlas bind group for {:?}", batch.font_id);
                CachedBindGroup {
                    bind_group: pipeline.atlas_bind_group(&batch.texture),
                    used: false,
                }
            });
            cached.used = true;

            let buffers = self.pipeline.upload_batch(batch);
            self.pipeline.draw(render_pass, &cached.bind_group, &buffers);
        }

        // Fonts not drawn this frame may have been dropped.
        self.bind_groups.retain(|_, cached| cached.used);
    }
}

//! Tessera Text - fixed-charset bitmap fonts
//!
//! This crate rasterizes the 256-slot Latin-1 code page of a scalable font
//! into a single power-of-two atlas and draws multi-line, colored text with it:
//! - [`FontLibrary`] shares a font database between fonts through RAII leases
//! - [`AtlasBuilder`] packs glyphs into a 16x16 grid of fixed-size cells
//! - [`DrawCommands`] precompute one textured quad and pen advance per glyph
//! - [`TextEmitter`] splits text on `'\n'` and replays the draw commands
//! - [`BitmapTextRenderer`] draws the emitted quads with wgpu
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use tessera_render::{Color, GraphicsContext};
//! use tessera_text::{
//!     orthographic_y_up, BitmapFont, BitmapTextRenderer, FontConfig, FontLibrary, FontSource,
//!     LibraryConfig, TextRendererConfig,
//! };
//!
//! let context = GraphicsContext::new_owned_sync().unwrap();
//! let library = FontLibrary::new(LibraryConfig::default());
//! let font = BitmapFont::new(
//!     &*context,
//!     &library,
//!     FontSource::file("Vera.ttf"),
//!     FontConfig::new(16.0),
//! )
//! .unwrap();
//!
//! let mut text = BitmapTextRenderer::new(context.clone(), TextRendererConfig::default());
//! text.set_projection(orthographic_y_up(640.0, 480.0));
//! text.out_text_at(&font, 100.0, 400.0, "Render multiple lines\nok");
//! text.set_color(Color::RED);
//! text.out_fmt(&font, format_args!("{} glyphs", 256));
//!
//! // Inside a render pass:
//! // text.render(&mut render_pass);
//! ```

pub mod atlas;
pub mod commands;
pub mod emitter;
pub mod error;
pub mod face;
pub mod font;
pub mod library;
pub mod metrics;
mod pipeline;
pub mod renderer;

pub use atlas::{AtlasBuilder, AtlasImage, AtlasLayout, BuiltAtlas, FontAtlas, ATLAS_FORMAT};
pub use commands::{DrawCommands, GlyphQuad};
pub use emitter::{
    EmitSummary, FormatBuffer, LineSpan, PenTransform, TextBatch, TextEmitter, TextVertex,
    DEFAULT_FORMAT_CAPACITY,
};
pub use error::{TextError, TextResult};
pub use face::{FontFace, FontSource, FontdueFace, GlyphBitmap};
pub use font::{BitmapFont, FontConfig, FontId};
pub use library::{FontLibrary, LibraryConfig, LibraryLease};
pub use metrics::{
    collect_glyph_metrics, FontMetrics, GlyphEntry, GlyphMetrics, GlyphTable, CHARSET_LEN,
    GRID_DIM,
};
pub use renderer::{orthographic_y_up, BitmapTextRenderer, TextRendererConfig};

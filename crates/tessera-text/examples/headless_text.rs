//! Headless Text Rendering Example
//!
//! Builds a bitmap font from a `.ttf` file and draws several colored runs
//! into an offscreen 640x480 target:
//! - `FontLibrary` lease management
//! - Atlas statistics for the loaded font
//! - Multi-line text and continuation runs with `BitmapTextRenderer`
//!
//! ## Usage
//! ```bash
//! cargo run -p tessera-text --example headless_text -- path/to/font.ttf [pixel_size]
//! ```

use tessera_core::logging;
use tessera_render::{Color, GraphicsContext, wgpu};
use tessera_text::{
    BitmapFont, BitmapTextRenderer, FontConfig, FontLibrary, FontSource, LibraryConfig,
    TextRendererConfig, orthographic_y_up,
};

const WIDTH: u32 = 640;
const HEIGHT: u32 = 480;
const TARGET_FORMAT: wgpu::TextureFormat = wgpu::TextureFormat::Rgba8UnormSrgb;

fn main() {
    logging::init();

    let mut args = std::env::args().skip(1);
    let path = args.next().unwrap_or_else(|| String::from("Vera.ttf"));
    let pixel_size = args
        .next()
        .and_then(|size| size.parse::<f32>().ok())
        .unwrap_or(16.0);

    let context = GraphicsContext::new_owned_sync().expect("Failed to create graphics context");
    let library = FontLibrary::new(LibraryConfig::default());

    let font = match BitmapFont::new(
        &*context,
        &library,
        FontSource::file(&path),
        FontConfig::new(pixel_size).with_border(1),
    ) {
        Ok(font) => font,
        Err(err) => {
            tracing::error!("Could not build font from {}: {}", path, err);
            return;
        }
    };

    let metrics = font.metrics();
    tracing::info!(
        "{} at {}px: atlas {}x{}, max advance {}, ascent {}, descent {}, line skip {}",
        path,
        pixel_size,
        font.atlas().width(),
        font.atlas().height(),
        font.atlas().max_advance(),
        metrics.ascent,
        metrics.descent,
        metrics.line_skip
    );

    let mut text = BitmapTextRenderer::new(
        context.clone(),
        TextRendererConfig::default().with_surface_format(TARGET_FORMAT),
    );
    text.set_projection(orthographic_y_up(WIDTH as f32, HEIGHT as f32));

    text.set_color(Color::WHITE);
    text.out_text_at(&font, 100.0, 400.0, "Render multiple lines\nok\nLatin-1: \u{e9}\u{e8}\u{fc}");
    text.set_color(Color::RED);
    text.out_text(&font, "gmm");
    text.set_color(Color::GREEN);
    text.out_text(&font, "adsa");
    text.set_color(Color::BLUE);
    let summary = text.out_fmt(&font, format_args!("line skip = {}", font.line_skip()));
    tracing::info!("Last run: {:?}", summary.lines);

    let target = context.device().create_texture(&wgpu::TextureDescriptor {
        label: Some("Offscreen Target"),
        size: wgpu::Extent3d {
            width: WIDTH,
            height: HEIGHT,
            depth_or_array_layers: 1,
        },
        mip_level_count: 1,
        sample_count: 1,
        dimension: wgpu::TextureDimension::D2,
        format: TARGET_FORMAT,
        usage: wgpu::TextureUsages::RENDER_ATTACHMENT,
        view_formats: &[],
    });
    let view = target.create_view(&wgpu::TextureViewDescriptor::default());

    let mut encoder = context
        .device()
        .create_command_encoder(&wgpu::CommandEncoderDescriptor {
            label: Some("Text Encoder"),
        });
    {
        let mut render_pass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
            label: Some("Text Pass"),
            color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                view: &view,
                resolve_target: None,
                ops: wgpu::Operations {
                    load: wgpu::LoadOp::Clear(Color::BLACK.to_wgpu()),
                    store: wgpu::StoreOp::Store,
                },
                depth_slice: None,
            })],
            depth_stencil_attachment: None,
            timestamp_writes: None,
            occlusion_query_set: None,
        });
        text.render(&mut render_pass);
    }
    context.queue().submit(std::iter::once(encoder.finish()));

    drop(font);
    tracing::info!("Font dropped, library initialized: {}", library.is_initialized());
}

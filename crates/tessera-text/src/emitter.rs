//! Immediate-mode text emission.
//!
//! Text ends at the first `'\0'` and is split on `'\n'`. Each line replays
//! the font's glyph draw commands from a saved pen, then the pen moves down
//! one line skip. Emitted quads are collected into [`TextBatch`]es which the
//! GPU renderer turns into draw calls.

use std::fmt;

use tessera_core::math::Vec2;
use tessera_core::profiling::profile_scope;
use tessera_render::{Color, GpuTexture};

use crate::font::{BitmapFont, FontId};

/// Default byte capacity of the formatting buffer.
pub const DEFAULT_FORMAT_CAPACITY: usize = 1024;

/// Pen position with a save/restore stack.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PenTransform {
    translation: Vec2,
    stack: Vec<Vec2>,
}

impl PenTransform {
    pub fn new() -> Self {
        Self::default()
    }

    /// Reset to identity, then translate to `(x, y)`. Clears saved states.
    pub fn reset_to(&mut self, x: f32, y: f32) {
        self.stack.clear();
        self.translation = Vec2::new(x, y);
    }

    pub fn translate(&mut self, dx: f32, dy: f32) {
        self.translation += Vec2::new(dx, dy);
    }

    pub fn push(&mut self) {
        self.stack.push(self.translation);
    }

    /// Restore the last pushed position. Popping an empty stack is a no-op.
    pub fn pop(&mut self) {
        if let Some(saved) = self.stack.pop() {
            self.translation = saved;
        }
    }

    pub fn position(&self) -> Vec2 {
        self.translation
    }

    pub fn depth(&self) -> usize {
        self.stack.len()
    }
}

/// Fixed-capacity text buffer for formatted output.
///
/// Keeps at most `capacity - 1` bytes; anything beyond that is dropped at a
/// character boundary without error.
#[derive(Debug, Clone)]
pub struct FormatBuffer {
    text: String,
    capacity: usize,
    truncated: bool,
}

impl FormatBuffer {
    pub fn new(capacity: usize) -> Self {
        Self {
            text: String::with_capacity(capacity),
            capacity,
            truncated: false,
        }
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn clear(&mut self) {
        self.text.clear();
        self.truncated = false;
    }

    /// Replace the contents with `args`, truncating as needed.
    pub fn format(&mut self, args: fmt::Arguments<'_>) -> &str {
        self.clear();
        if fmt::Write::write_fmt(self, args).is_err() {
            tracing::trace!("Formatting into text buffer reported an error");
        }
        &self.text
    }

    pub fn as_str(&self) -> &str {
        &self.text
    }

    /// Whether the last format dropped any output.
    pub fn truncated(&self) -> bool {
        self.truncated
    }
}

impl Default for FormatBuffer {
    fn default() -> Self {
        Self::new(DEFAULT_FORMAT_CAPACITY)
    }
}

impl fmt::Write for FormatBuffer {
    fn write_str(&mut self, s: &str) -> fmt::Result {
        let room = self.capacity.saturating_sub(1).saturating_sub(self.text.len());
        if s.len() <= room {
            self.text.push_str(s);
            return Ok(());
        }

        let mut end = room;
        while !s.is_char_boundary(end) {
            end -= 1;
        }
        self.text.push_str(&s[..end]);
        self.truncated = true;
        Ok(())
    }
}

/// Vertex data for text rendering.
#[repr(C)]
#[derive(Copy, Clone, Debug, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
pub struct TextVertex {
    pub position: [f32; 2],
    pub tex_coords: [f32; 2],
    pub color: [f32; 4],
}

/// Quads sharing one font texture.
#[derive(Debug, Clone)]
pub struct TextBatch {
    pub font_id: FontId,
    pub texture: GpuTexture,
    pub vertices: Vec<TextVertex>,
    pub indices: Vec<u32>,
}

impl TextBatch {
    pub fn new(font_id: FontId, texture: GpuTexture) -> Self {
        Self {
            font_id,
            texture,
            vertices: Vec::new(),
            indices: Vec::new(),
        }
    }

    /// Append a quad given corners in bottom-left, bottom-right, top-right,
    /// top-left order.
    pub fn push_quad(&mut self, positions: [Vec2; 4], uvs: [Vec2; 4], color: [f32; 4]) {
        let base = self.vertices.len() as u32;
        for (position, uv) in positions.iter().zip(uvs.iter()) {
            self.vertices.push(TextVertex {
                position: position.to_array(),
                tex_coords: uv.to_array(),
                color,
            });
        }
        self.indices
            .extend_from_slice(&[base, base + 1, base + 2, base, base + 2, base + 3]);
    }

    pub fn quad_count(&self) -> usize {
        self.vertices.len() / 4
    }

    pub fn is_empty(&self) -> bool {
        self.vertices.is_empty()
    }
}

/// One emitted line.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LineSpan {
    /// Pen position at the start of the line.
    pub origin: Vec2,
    /// Number of glyphs drawn.
    pub glyphs: usize,
    /// Total advance of the drawn glyphs.
    pub width: f32,
}

/// What a single emit call produced.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct EmitSummary {
    pub lines: Vec<LineSpan>,
    /// Characters without a draw command.
    pub skipped: usize,
}

impl EmitSummary {
    pub fn glyph_count(&self) -> usize {
        self.lines.iter().map(|line| line.glyphs).sum()
    }
}

/// Collects glyph quads for text drawn with [`BitmapFont`]s.
///
/// ```rust,ignore
/// emitter.set_color(Color::RED);
/// emitter.out_text_at(&font, 100.0, 400.0, "Score:\n");
/// emitter.out_fmt(&font, format_args!("{} points", score));
/// ```
#[derive(Debug)]
pub struct TextEmitter {
    pen: PenTransform,
    color: Color,
    format: FormatBuffer,
    batches: Vec<TextBatch>,
}

impl TextEmitter {
    /// Create an emitter whose formatting buffer holds `format_capacity` bytes.
    pub fn new(format_capacity: usize) -> Self {
        Self {
            pen: PenTransform::new(),
            color: Color::WHITE,
            format: FormatBuffer::new(format_capacity),
            batches: Vec::new(),
        }
    }

    /// Color applied to every glyph emitted afterwards.
    pub fn set_color(&mut self, color: Color) {
        self.color = color;
    }

    pub fn color(&self) -> Color {
        self.color
    }

    pub fn pen(&self) -> &PenTransform {
        &self.pen
    }

    pub fn pen_mut(&mut self) -> &mut PenTransform {
        &mut self.pen
    }

    /// Draw `text` starting at `(x, y)`.
    pub fn out_text_at(&mut self, font: &BitmapFont, x: f32, y: f32, text: &str) -> EmitSummary {
        self.pen.reset_to(x, y);
        self.out_text(font, text)
    }

    /// Draw `text` at the current pen, i.e. one line below the last line of
    /// the previous emit.
    ///
    /// Anything after an embedded `'\0'` is ignored.
    pub fn out_text(&mut self, font: &BitmapFont, text: &str) -> EmitSummary {
        emit_lines(&mut self.pen, &mut self.batches, self.color, font, text)
    }

    /// Format `args` into the bounded buffer and draw it at `(x, y)`.
    pub fn out_fmt_at(
        &mut self,
        font: &BitmapFont,
        x: f32,
        y: f32,
        args: fmt::Arguments<'_>,
    ) -> EmitSummary {
        self.pen.reset_to(x, y);
        self.out_fmt(font, args)
    }

    /// Format `args` into the bounded buffer and draw it at the current pen.
    pub fn out_fmt(&mut self, font: &BitmapFont, args: fmt::Arguments<'_>) -> EmitSummary {
        let text = self.format.format(args);
        emit_lines(&mut self.pen, &mut self.batches, self.color, font, text)
    }

    pub fn batches(&self) -> &[TextBatch] {
        &self.batches
    }

    pub fn take_batches(&mut self) -> Vec<TextBatch> {
        std::mem::take(&mut self.batches)
    }

    /// Drop queued batches, releasing any textures they kept alive.
    pub fn clear(&mut self) {
        self.batches.clear();
    }
}

impl Default for TextEmitter {
    fn default() -> Self {
        Self::new(DEFAULT_FORMAT_CAPACITY)
    }
}

fn emit_lines(
    pen: &mut PenTransform,
    batches: &mut Vec<TextBatch>,
    color: Color,
    font: &BitmapFont,
    text: &str,
) -> EmitSummary {
    profile_scope!("emit_lines");

    // NUL terminates the text; codepoint 0 is never drawn.
    let text = match text.find('\0') {
        Some(end) => &text[..end],
        None => text,
    };

    let batch_index = match batches.last() {
        Some(batch) if batch.font_id == font.id() => batches.len() - 1,
        _ => {
            batches.push(TextBatch::new(font.id(), font.texture().clone()));
            batches.len() - 1
        }
    };
    let batch = &mut batches[batch_index];

    let color = color.to_array();
    let line_skip = font.line_skip() as f32;
    let mut summary = EmitSummary::default();

    for line in text.split('\n') {
        pen.push();
        let origin = pen.position();
        let mut glyphs = 0;

        for ch in line.chars() {
            match font.draw_command(ch as u32) {
                Some(quad) => {
                    quad.replay(pen, color, batch);
                    glyphs += 1;
                }
                None => {
                    tracing::trace!("Skipping U+{:04X}: outside the font's code page", ch as u32);
                    summary.skipped += 1;
                }
            }
        }

        let width = pen.position().x - origin.x;
        pen.pop();
        pen.translate(0.0, -line_skip);

        summary.lines.push(LineSpan {
            origin,
            glyphs,
            width,
        });
    }

    summary
}

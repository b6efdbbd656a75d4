//! Mock implementation of RenderContext for testing.
//!
//! Records texture operations and keeps a copy of every texel upload so tests
//! can inspect atlas contents without a GPU.

use std::sync::{Arc, Weak};

use crate::{gpu_types::GpuTexture, render_context::RenderContext};
use parking_lot::Mutex;
use wgpu::*;

/// Records a GPU operation call for verification in tests.
#[derive(Debug, Clone, PartialEq)]
pub enum RenderCall {
    CreateTexture {
        label: Option<String>,
        width: u32,
        height: u32,
        format: TextureFormat,
    },
    WriteTexture {
        texture_id: usize,
        size: usize,
        bytes_per_row: u32,
    },
}

/// Mock textures stored in the context.
#[derive(Debug)]
struct MockTexture {
    alive: Weak<()>,
    data: Option<Vec<u8>>,
}

/// Mock implementation of RenderContext for testing.
///
/// Methods take `&self` but record into `parking_lot::Mutex`-guarded state,
/// which keeps the context `Send + Sync` as the trait requires.
///
/// ```rust
/// use tessera_test_utils::{MockRenderContext, RenderContext};
/// use wgpu::*;
///
/// let mock = MockRenderContext::with_max_texture_dimension(256);
/// assert_eq!(mock.max_texture_dimension_2d(), 256);
/// assert_eq!(mock.live_textures(), 0);
/// ```
pub struct MockRenderContext {
    /// Recorded calls for verification
    calls: Mutex<Vec<RenderCall>>,

    /// Mock textures indexed by id
    textures: Mutex<Vec<MockTexture>>,

    max_texture_dimension: u32,
}

impl MockRenderContext {
    /// Create a new mock render context with an 8192 texel limit.
    pub fn new() -> Self {
        Self::with_max_texture_dimension(8192)
    }

    /// Create a mock context reporting a custom texture size limit.
    pub fn with_max_texture_dimension(max_texture_dimension: u32) -> Self {
        Self {
            calls: Mutex::new(Vec::new()),
            textures: Mutex::new(Vec::new()),
            max_texture_dimension,
        }
    }

    /// Get a copy of all recorded calls (for test assertions).
    pub fn calls(&self) -> Vec<RenderCall> {
        self.calls.lock().clone()
    }

    /// Count texture creates.
    pub fn count_texture_creates(&self) -> usize {
        self.calls
            .lock()
            .iter()
            .filter(|call| matches!(call, RenderCall::CreateTexture { .. }))
            .count()
    }

    /// Count texture writes.
    pub fn count_texture_writes(&self) -> usize {
        self.calls
            .lock()
            .iter()
            .filter(|call| matches!(call, RenderCall::WriteTexture { .. }))
            .count()
    }

    /// Number of mock textures that still have at least one live handle.
    pub fn live_textures(&self) -> usize {
        self.textures
            .lock()
            .iter()
            .filter(|texture| texture.alive.strong_count() > 0)
            .count()
    }

    /// Last texel data written to `texture`, if any.
    pub fn texture_data(&self, texture: &GpuTexture) -> Option<Vec<u8>> {
        let id = texture.mock_id()?;
        self.textures.lock().get(id)?.data.clone()
    }

    /// Clear recorded calls (useful between test steps).
    pub fn clear_calls(&self) {
        self.calls.lock().clear();
    }

    /// Get total number of recorded calls.
    pub fn call_count(&self) -> usize {
        self.calls.lock().len()
    }
}

impl Default for MockRenderContext {
    fn default() -> Self {
        Self::new()
    }
}

impl RenderContext for MockRenderContext {
    fn create_texture(&self, desc: &TextureDescriptor) -> GpuTexture {
        let mut textures = self.textures.lock();
        let id = textures.len();
        let alive = Arc::new(());

        textures.push(MockTexture {
            alive: Arc::downgrade(&alive),
            data: None,
        });

        self.calls.lock().push(RenderCall::CreateTexture {
            label: desc.label.map(|s| s.to_string()),
            width: desc.size.width,
            height: desc.size.height,
            format: desc.format,
        });

        GpuTexture::mock(id, desc.size.width, desc.size.height, desc.format, alive)
    }

    fn write_texture(&self, texture: &GpuTexture, data: &[u8], bytes_per_row: u32) {
        if let Some(texture_id) = texture.mock_id() {
            if let Some(entry) = self.textures.lock().get_mut(texture_id) {
                entry.data = Some(data.to_vec());
            }
            self.calls.lock().push(RenderCall::WriteTexture {
                texture_id,
                size: data.len(),
                bytes_per_row,
            });
        }
    }

    fn max_texture_dimension_2d(&self) -> u32 {
        self.max_texture_dimension
    }
}

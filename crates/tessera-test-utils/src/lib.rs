//! Test utilities for Tessera.
//!
//! - [`RenderContext`] - Trait abstracting the texture operations font
//!   resources need (creation, texel upload, size limits)
//! - `MockRenderContext` - Recording implementation for tests (requires the
//!   `mock` feature)
//! - [`GpuTexture`] - Owned texture handle that is either real or mock
//!
//! # Example
//!
//! ```rust
//! # #[cfg(feature = "mock")]
//! # {
//! use tessera_test_utils::{MockRenderContext, RenderContext};
//! use wgpu::*;
//!
//! let mock = MockRenderContext::new();
//! let texture = mock.create_texture(&TextureDescriptor {
//!     label: Some("atlas"),
//!     size: Extent3d { width: 64, height: 32, depth_or_array_layers: 1 },
//!     mip_level_count: 1,
//!     sample_count: 1,
//!     dimension: TextureDimension::D2,
//!     format: TextureFormat::Rgba8Unorm,
//!     usage: TextureUsages::TEXTURE_BINDING | TextureUsages::COPY_DST,
//!     view_formats: &[],
//! });
//!
//! mock.write_texture(&texture, &vec![0u8; 64 * 32 * 4], 64 * 4);
//! assert_eq!(mock.count_texture_creates(), 1);
//! assert_eq!(mock.texture_data(&texture).map(|d| d.len()), Some(64 * 32 * 4));
//! # }
//! ```

pub mod gpu_types;
#[cfg(feature = "mock")]
pub mod mock_render;
pub mod render_context;

pub use gpu_types::*;
#[cfg(feature = "mock")]
pub use mock_render::*;
pub use render_context::*;

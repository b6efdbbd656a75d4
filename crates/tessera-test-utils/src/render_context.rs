//! Trait abstracting GPU texture operations for testing.

use crate::gpu_types::GpuTexture;
use wgpu::TextureDescriptor;

/// GPU operations needed to create and fill atlas textures.
///
/// Methods take `&self` and return owned wrapper types, so the trait is
/// object-safe and mock implementations record through interior mutability.
///
/// ```rust,no_run
/// use tessera_test_utils::{GpuTexture, RenderContext};
///
/// fn upload(ctx: &dyn RenderContext, texture: &GpuTexture, texels: &[u8], width: u32) {
///     ctx.write_texture(texture, texels, width * 4);
/// }
/// ```
pub trait RenderContext: Send + Sync {
    /// Create a GPU texture.
    fn create_texture(&self, desc: &TextureDescriptor) -> GpuTexture;

    /// Replace the full contents of mip level 0 of `texture` with `data`.
    ///
    /// `bytes_per_row` is the stride of `data` in bytes.
    fn write_texture(&self, texture: &GpuTexture, data: &[u8], bytes_per_row: u32);

    /// Largest width or height a 2D texture may have on this device.
    fn max_texture_dimension_2d(&self) -> u32;
}

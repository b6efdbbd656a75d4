//! Implementation of the RenderContext trait for GraphicsContext.
//!
//! Font resources create and fill their atlas textures through the trait, so
//! tests can substitute `MockRenderContext`.

use crate::context::GraphicsContext;
use tessera_test_utils::{GpuTexture, RenderContext};
use wgpu::TextureDescriptor;

impl RenderContext for GraphicsContext {
    fn create_texture(&self, desc: &TextureDescriptor) -> GpuTexture {
        let texture = self.device.create_texture(desc);
        GpuTexture::from_wgpu(texture)
    }

    fn write_texture(&self, texture: &GpuTexture, data: &[u8], bytes_per_row: u32) {
        let wgpu_texture = texture.as_wgpu();
        self.queue.write_texture(
            wgpu::TexelCopyTextureInfo {
                texture: wgpu_texture,
                mip_level: 0,
                origin: wgpu::Origin3d::ZERO,
                aspect: wgpu::TextureAspect::All,
            },
            data,
            wgpu::TexelCopyBufferLayout {
                offset: 0,
                bytes_per_row: Some(bytes_per_row),
                rows_per_image: Some(wgpu_texture.height()),
            },
            wgpu::Extent3d {
                width: wgpu_texture.width(),
                height: wgpu_texture.height(),
                depth_or_array_layers: 1,
            },
        );
    }

    fn max_texture_dimension_2d(&self) -> u32 {
        GraphicsContext::max_texture_dimension_2d(self)
    }
}

//! Tessera Render
//!
//! Owns the wgpu device/queue ([`GraphicsContext`]) and implements the
//! [`RenderContext`] seam for it so font atlases can be uploaded through
//! either a real device or a test mock.

mod color;
mod context;
mod context_impl;

pub use color::Color;
pub use context::{GraphicsContext, GraphicsContextDescriptor, GraphicsError};

pub use tessera_test_utils::{GpuTexture, RenderContext};

// Re-export wgpu so downstream crates use the same version.
pub use wgpu;

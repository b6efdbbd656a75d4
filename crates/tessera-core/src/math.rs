//! Math types re-exported from [`glam`].
//!
//! ```
//! use tessera_core::math::{Mat4, Vec2, Vec3};
//!
//! let pen = Vec2::new(100.0, 400.0);
//! let moved = Mat4::from_translation(pen.extend(0.0)).transform_point3(Vec3::ZERO);
//! assert_eq!(moved.x, 100.0);
//! ```
//!
//! [`glam`]: https://docs.rs/glam

pub use glam::{IVec2, Mat4, UVec2, Vec2, Vec3, Vec4};

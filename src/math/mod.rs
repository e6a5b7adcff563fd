//! Rigid transform algebra
//!
//! - [`RigidTransform`]: translation + unit quaternion, composed with `*`
//! - [`spline`]: Catmull-Rom evaluation over vectors, quaternions and rigid transforms

pub mod rigid;
pub mod spline;

pub use rigid::RigidTransform;
pub use spline::interpolate_catmull_rom;

/// Threshold below which an eye-space depth is treated as "at or behind the eye".
pub const EPS: f32 = 1e-8;

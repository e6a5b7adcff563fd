//! Uniform Catmull-Rom splines in Bezier form.
//!
//! Four consecutive control values `c0..c3` define the segment between `c1`
//! and `c2`. The two inner Bezier handles are
//!
//! ```text
//! d = c1 + (c2 - c0) / 6
//! e = c2 - (c3 - c1) / 6
//! ```
//!
//! and the segment is the cubic Bezier `(c1, d, e, c2)`. Rotations use the
//! multiplicative analogue and are evaluated with repeated slerp.

use glam::{Quat, Vec3};

use super::RigidTransform;

/// Values that can be interpolated along a Catmull-Rom segment.
pub trait CatmullRom: Copy {
    /// Evaluates the segment `c1 -> c2` at `u` in `[0, 1]`.
    fn catmull_rom(c0: Self, c1: Self, c2: Self, c3: Self, u: f32) -> Self;
}

impl CatmullRom for Vec3 {
    fn catmull_rom(c0: Self, c1: Self, c2: Self, c3: Self, u: f32) -> Self {
        let d = (c2 - c0) / 6.0 + c1;
        let e = -(c3 - c1) / 6.0 + c2;

        let s = 1.0 - u;
        let s2 = s * s;
        let u2 = u * u;
        c1 * (s2 * s) + d * (3.0 * s2 * u) + e * (3.0 * s * u2) + c2 * (u2 * u)
    }
}

impl CatmullRom for Quat {
    fn catmull_rom(c0: Self, c1: Self, c2: Self, c3: Self, u: f32) -> Self {
        let d = quat_pow(c2 * c0.inverse(), 1.0 / 6.0) * c1;
        let e = quat_pow(c3 * c1.inverse(), -1.0 / 6.0) * c2;

        // de Casteljau
        let f = c1.slerp(d, u);
        let g = d.slerp(e, u);
        let h = e.slerp(c2, u);
        let m = f.slerp(g, u);
        let n = g.slerp(h, u);
        m.slerp(n, u).normalize()
    }
}

impl CatmullRom for RigidTransform {
    fn catmull_rom(c0: Self, c1: Self, c2: Self, c3: Self, u: f32) -> Self {
        RigidTransform::new(
            Vec3::catmull_rom(
                c0.translation(),
                c1.translation(),
                c2.translation(),
                c3.translation(),
                u,
            ),
            Quat::catmull_rom(c0.rotation(), c1.rotation(), c2.rotation(), c3.rotation(), u),
        )
    }
}

/// Interpolates between `f1` (at `u = 0`) and `f2` (at `u = 1`), using `f0`
/// and `f3` to shape the tangents.
#[must_use]
pub fn interpolate_catmull_rom(
    f0: &RigidTransform,
    f1: &RigidTransform,
    f2: &RigidTransform,
    f3: &RigidTransform,
    u: f32,
) -> RigidTransform {
    RigidTransform::catmull_rom(*f0, *f1, *f2, *f3, u)
}

/// Raises a unit quaternion to a real power along the shortest arc.
///
/// Near-identity input returns identity.
#[must_use]
pub fn quat_pow(q: Quat, exponent: f32) -> Quat {
    let q = if q.w < 0.0 { -q } else { q };
    let (axis, angle) = q.to_axis_angle();
    if angle.abs() < 1e-6 || !axis.is_finite() {
        return Quat::IDENTITY;
    }
    Quat::from_axis_angle(axis, angle * exponent)
}

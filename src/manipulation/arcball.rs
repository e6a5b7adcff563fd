//! Virtual trackball.
//!
//! A drag from `p0` to `p1` on screen is mapped onto a sphere of
//! `screen_radius` pixels centred on the projected arcball origin; the two
//! sphere directions define the rotation.

use glam::{Quat, Vec2, Vec3};

use crate::math::EPS;
use crate::scene::Projection;

/// Eye units per pixel used when the arcball origin cannot be projected.
pub const FALLBACK_SCALE: f32 = 0.02;

/// Screen radius before the first resize.
pub const INITIAL_SCREEN_RADIUS: f32 = 100.0;

/// Direction on the virtual sphere for the screen offset `p` from its centre.
///
/// Offsets outside the ball land on its silhouette (z = 0).
#[must_use]
pub fn arcball_direction(p: Vec2, radius: f32) -> Vec3 {
    let n2 = p.length_squared();
    let r2 = radius * radius;
    if n2 >= r2 {
        p.extend(0.0).normalize()
    } else {
        p.extend((r2 - n2).sqrt()).normalize()
    }
}

/// Screen radius and eye-space scale of the arcball.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Arcball {
    /// Radius of the virtual sphere, in pixels.
    pub screen_radius: f32,
    /// Eye-space length of one pixel at the arcball's depth.
    pub scale: f32,
}

impl Default for Arcball {
    fn default() -> Self {
        Self {
            screen_radius: INITIAL_SCREEN_RADIUS,
            scale: FALLBACK_SCALE,
        }
    }
}

impl Arcball {
    /// Keeps the ball at a quarter of the smaller viewport dimension.
    pub fn resize(&mut self, width: u32, height: u32) {
        self.screen_radius = (width.min(height) as f32 * 0.25).max(1.0);
    }

    /// Recomputes `scale` for an arcball centred at `center_eye`.
    pub fn update_scale(&mut self, center_eye: Vec3, projection: &Projection) {
        self.scale = projection.screen_to_eye_scale(center_eye.z).unwrap_or_else(|| {
            log::debug!("Arcball centre is behind the eye, using fallback scale");
            FALLBACK_SCALE
        });
    }

    /// Rotation for a drag from `p0` to `p1` (GL window coordinates) of an
    /// arcball centred at `center_eye`.
    ///
    /// Returns identity when the centre is at or behind the eye.
    #[must_use]
    pub fn rotation(&self, center_eye: Vec3, projection: &Projection, p0: Vec2, p1: Vec2) -> Quat {
        if center_eye.z > -EPS {
            log::debug!("Arcball centre is behind the eye, ignoring rotation");
            return Quat::IDENTITY;
        }
        let center = projection.screen_space_coord(center_eye);
        let v0 = arcball_direction(p0 - center, self.screen_radius);
        let v1 = arcball_direction(p1 - center, self.screen_radius);

        let q1 = Quat::from_xyzw(v1.x, v1.y, v1.z, 0.0);
        let q0 = Quat::from_xyzw(-v0.x, -v0.y, -v0.z, 0.0);
        (q1 * q0).normalize()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn resize_clamps_to_one_pixel() {
        let mut ball = Arcball::default();
        ball.resize(2, 800);
        assert_eq!(ball.screen_radius, 1.0);
        ball.resize(800, 600);
        assert_eq!(ball.screen_radius, 150.0);
    }

    #[test]
    fn centre_of_ball_points_at_viewer() {
        assert!(arcball_direction(Vec2::ZERO, 10.0).abs_diff_eq(Vec3::Z, 1e-6));
    }
}

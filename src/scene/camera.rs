use glam::{Mat4, Vec2, Vec3, Vec4};

use crate::math::EPS;

/// Perspective projection for the editor viewport.
///
/// The vertical field of view is derived from the viewport so that the
/// narrower screen dimension always sees at least `min_fov_y` degrees.
/// Eye space looks down `-Z`; `near` and `far` are positive distances.
#[derive(Debug, Clone, PartialEq)]
pub struct Projection {
    min_fov_y: f32,
    fov_y: f32,
    near: f32,
    far: f32,
    width: u32,
    height: u32,
    projection_matrix: Mat4,
}

impl Projection {
    #[must_use]
    pub fn new(min_fov_y_degrees: f32, near: f32, far: f32, width: u32, height: u32) -> Self {
        let mut projection = Self {
            min_fov_y: min_fov_y_degrees,
            fov_y: min_fov_y_degrees,
            near,
            far,
            width: width.max(1),
            height: height.max(1),
            projection_matrix: Mat4::IDENTITY,
        };
        projection.update_projection_matrix();
        projection
    }

    /// Updates the viewport size and recomputes the field of view.
    pub fn resize(&mut self, width: u32, height: u32) {
        self.width = width.max(1);
        self.height = height.max(1);
        self.update_projection_matrix();
    }

    fn update_projection_matrix(&mut self) {
        self.fov_y = if self.width >= self.height {
            self.min_fov_y
        } else {
            // Widen vertically so the horizontal extent keeps the minimum fov.
            let half = (0.5 * self.min_fov_y).to_radians();
            let ratio = self.height as f32 / self.width as f32;
            (half.sin() * ratio).atan2(half.cos()).to_degrees() * 2.0
        };
        self.projection_matrix =
            Mat4::perspective_rh_gl(self.fov_y.to_radians(), self.aspect(), self.near, self.far);
    }

    #[inline]
    #[must_use]
    pub fn matrix(&self) -> Mat4 {
        self.projection_matrix
    }

    #[inline]
    #[must_use]
    pub fn fov_y_degrees(&self) -> f32 {
        self.fov_y
    }

    #[inline]
    #[must_use]
    pub fn aspect(&self) -> f32 {
        self.width as f32 / self.height as f32
    }

    #[inline]
    #[must_use]
    pub fn width(&self) -> u32 {
        self.width
    }

    #[inline]
    #[must_use]
    pub fn height(&self) -> u32 {
        self.height
    }

    #[inline]
    #[must_use]
    pub fn near(&self) -> f32 {
        self.near
    }

    #[inline]
    #[must_use]
    pub fn far(&self) -> f32 {
        self.far
    }

    /// Centre of the viewport in GL window coordinates.
    #[must_use]
    pub fn screen_center(&self) -> Vec2 {
        Vec2::new(
            (self.width as f32 - 1.0) / 2.0,
            (self.height as f32 - 1.0) / 2.0,
        )
    }

    /// Projects an eye-space point to GL window coordinates (origin bottom-left).
    ///
    /// Points at or behind the eye plane map to the screen centre.
    #[must_use]
    pub fn screen_space_coord(&self, eye_point: Vec3) -> Vec2 {
        if eye_point.z > -EPS {
            log::debug!("screen_space_coord: point at or behind the eye plane, using screen centre");
            return self.screen_center();
        }
        let clip = self.projection_matrix * Vec4::from((eye_point, 1.0));
        let ndc = clip.truncate() / clip.w;
        let w = self.width as f32;
        let h = self.height as f32;
        Vec2::new(
            ndc.x * w / 2.0 + (w - 1.0) / 2.0,
            ndc.y * h / 2.0 + (h - 1.0) / 2.0,
        )
    }

    /// Eye-space length of one pixel at depth `z` (negative in front of the eye).
    ///
    /// Returns `None` when `z` is not in front of the eye.
    #[must_use]
    pub fn screen_to_eye_scale(&self, z: f32) -> Option<f32> {
        if z > -EPS {
            return None;
        }
        Some(-(z * (self.fov_y.to_radians() / 2.0).tan()) * 2.0 / self.height as f32)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn landscape_uses_minimum_fov() {
        let p = Projection::new(60.0, 0.1, 50.0, 800, 600);
        assert!((p.fov_y_degrees() - 60.0).abs() < 1e-5);
    }

    #[test]
    fn portrait_widens_vertical_fov() {
        let p = Projection::new(60.0, 0.1, 50.0, 400, 800);
        assert!(p.fov_y_degrees() > 60.0);
        // horizontal fov stays at the minimum
        let half_h = (p.fov_y_degrees() / 2.0).to_radians().tan() * p.aspect();
        assert!((half_h.atan().to_degrees() * 2.0 - 60.0).abs() < 1e-3);
    }

    #[test]
    fn point_on_axis_projects_to_centre() {
        let p = Projection::new(60.0, 0.1, 50.0, 640, 480);
        let s = p.screen_space_coord(Vec3::new(0.0, 0.0, -5.0));
        assert!(s.abs_diff_eq(p.screen_center(), 1e-3));
    }
}

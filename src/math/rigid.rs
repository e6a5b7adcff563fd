use std::ops::Mul;

use glam::{Mat4, Quat, Vec3};

/// An orientation-preserving isometry: rotate, then translate.
///
/// The rotation is kept unit-length by every constructor that takes external
/// components. Composition follows matrix order: `a * b` applies `b` first.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RigidTransform {
    translation: Vec3,
    rotation: Quat,
}

impl RigidTransform {
    pub const IDENTITY: Self = Self {
        translation: Vec3::ZERO,
        rotation: Quat::IDENTITY,
    };

    #[must_use]
    pub fn new(translation: Vec3, rotation: Quat) -> Self {
        Self {
            translation,
            rotation: rotation.normalize(),
        }
    }

    #[must_use]
    pub fn from_translation(translation: Vec3) -> Self {
        Self {
            translation,
            rotation: Quat::IDENTITY,
        }
    }

    #[must_use]
    pub fn from_rotation(rotation: Quat) -> Self {
        Self::new(Vec3::ZERO, rotation)
    }

    /// Pure rotation of `angle` radians about `axis` (normalized here).
    #[must_use]
    pub fn from_axis_angle(axis: Vec3, angle: f32) -> Self {
        Self::from_rotation(Quat::from_axis_angle(axis.normalize(), angle))
    }

    /// Builds a transform from a translation and raw quaternion components,
    /// vector part first. Used by the animation loader.
    ///
    /// Returns `None` when the quaternion has (near) zero length.
    #[must_use]
    pub fn from_quat_components(translation: Vec3, x: f32, y: f32, z: f32, w: f32) -> Option<Self> {
        let q = Quat::from_xyzw(x, y, z, w);
        let len = q.length();
        if !len.is_finite() || len < 1e-6 {
            return None;
        }
        Some(Self {
            translation,
            rotation: q / len,
        })
    }

    #[inline]
    #[must_use]
    pub fn translation(&self) -> Vec3 {
        self.translation
    }

    #[inline]
    #[must_use]
    pub fn rotation(&self) -> Quat {
        self.rotation
    }

    #[inline]
    pub fn set_translation(&mut self, translation: Vec3) {
        self.translation = translation;
    }

    #[inline]
    pub fn set_rotation(&mut self, rotation: Quat) {
        self.rotation = rotation.normalize();
    }

    /// The inverse isometry: conjugate rotation, negated rotated translation.
    #[must_use]
    pub fn inverse(&self) -> Self {
        let inv_rot = self.rotation.conjugate();
        Self {
            translation: -(inv_rot * self.translation),
            rotation: inv_rot,
        }
    }

    /// Applies the transform to a point.
    #[inline]
    #[must_use]
    pub fn transform_point(&self, p: Vec3) -> Vec3 {
        self.rotation * p + self.translation
    }

    /// Applies the transform to a direction; translation is ignored.
    #[inline]
    #[must_use]
    pub fn transform_vector(&self, v: Vec3) -> Vec3 {
        self.rotation * v
    }

    /// Translation part only.
    #[must_use]
    pub fn trans_fact(&self) -> Self {
        Self::from_translation(self.translation)
    }

    /// Rotation part only.
    #[must_use]
    pub fn lin_fact(&self) -> Self {
        Self {
            translation: Vec3::ZERO,
            rotation: self.rotation,
        }
    }

    /// Frame with the origin of `origin_of` and the axes of `axes_of`.
    #[must_use]
    pub fn mixed_frame(origin_of: &Self, axes_of: &Self) -> Self {
        origin_of.trans_fact() * axes_of.lin_fact()
    }

    #[must_use]
    pub fn to_mat4(&self) -> Mat4 {
        Mat4::from_rotation_translation(self.rotation, self.translation)
    }

    /// Approximate equality on both parts. Quaternions `q` and `-q` encode the
    /// same rotation and compare equal.
    #[must_use]
    pub fn abs_diff_eq(&self, other: &Self, max_abs_diff: f32) -> bool {
        let same_rotation = self.rotation.abs_diff_eq(other.rotation, max_abs_diff)
            || self.rotation.abs_diff_eq(-other.rotation, max_abs_diff);
        same_rotation && self.translation.abs_diff_eq(other.translation, max_abs_diff)
    }
}

impl Default for RigidTransform {
    fn default() -> Self {
        Self::IDENTITY
    }
}

impl Mul for RigidTransform {
    type Output = Self;

    fn mul(self, rhs: Self) -> Self {
        Self {
            translation: self.translation + self.rotation * rhs.translation,
            rotation: (self.rotation * rhs.rotation).normalize(),
        }
    }
}

impl Mul<&RigidTransform> for &RigidTransform {
    type Output = RigidTransform;

    fn mul(self, rhs: &RigidTransform) -> RigidTransform {
        *self * *rhs
    }
}

impl From<RigidTransform> for Mat4 {
    fn from(rbt: RigidTransform) -> Self {
        rbt.to_mat4()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f32::consts::FRAC_PI_2;

    #[test]
    fn compose_applies_right_operand_first() {
        let rotate = RigidTransform::from_axis_angle(Vec3::Z, FRAC_PI_2);
        let shift = RigidTransform::from_translation(Vec3::X);

        let p = (rotate * shift).transform_point(Vec3::ZERO);
        assert!(p.abs_diff_eq(Vec3::Y, 1e-6));

        let q = (shift * rotate).transform_point(Vec3::ZERO);
        assert!(q.abs_diff_eq(Vec3::X, 1e-6));
    }

    #[test]
    fn vectors_ignore_translation() {
        let t = RigidTransform::from_translation(Vec3::new(5.0, 6.0, 7.0));
        assert_eq!(t.transform_vector(Vec3::X), Vec3::X);
    }

    #[test]
    fn zero_quaternion_is_rejected() {
        assert!(RigidTransform::from_quat_components(Vec3::ZERO, 0.0, 0.0, 0.0, 0.0).is_none());
    }
}

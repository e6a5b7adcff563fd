//! Mouse drag to scene edit.
//!
//! A drag step `(dx, dy)` becomes an action transform `M` (rotation or
//! translation), which is applied to the target node's local transform
//! with respect to an auxiliary frame `A`:
//!
//! ```text
//! O' = A * M * A^-1 * O
//! ```
//!
//! `A` has the arcball's origin and the eye's axes, re-expressed in the
//! target's parent frame.

use glam::{Mat4, Quat, Vec2, Vec3};

use crate::errors::Result;
use crate::manipulation::arcball::FALLBACK_SCALE;
use crate::manipulation::mode::{InteractionState, ManipMode};
use crate::math::RigidTransform;
use crate::scene::{NodeHandle, Projection, SceneGraph};

/// Applies `m` to `o` with respect to the frame `a`.
#[inline]
#[must_use]
pub fn do_m_to_o_wrt_a(m: &RigidTransform, o: &RigidTransform, a: &RigidTransform) -> RigidTransform {
    *a * *m * a.inverse() * *o
}

impl InteractionState {
    /// World frame of the current camera.
    pub fn eye_rbt(&self, graph: &SceneGraph) -> Result<RigidTransform> {
        graph.world_transform(self.current_camera)
    }

    /// World frame whose origin the arcball is centred on.
    pub fn arcball_rbt(&self, graph: &SceneGraph) -> Result<RigidTransform> {
        match self.manip_mode() {
            ManipMode::ArcballOnPicked => graph.world_transform(self.manip_target()),
            ManipMode::ArcballOnSky => Ok(RigidTransform::IDENTITY),
            ManipMode::EgoMotion => self.eye_rbt(graph),
        }
    }

    /// Arcball frame expressed in eye space.
    pub fn arcball_eye_rbt(&self, graph: &SceneGraph) -> Result<RigidTransform> {
        Ok(self.eye_rbt(graph)?.inverse() * self.arcball_rbt(graph)?)
    }

    /// Refreshes the arcball scale unless a view-axis translation is in
    /// progress (the ball would otherwise change size under the cursor).
    pub fn update_arcball_scale(&mut self, graph: &SceneGraph, projection: &Projection) -> Result<()> {
        if self.is_translating_z() {
            return Ok(());
        }
        let center = self.arcball_eye_rbt(graph)?.translation();
        self.arcball.update_scale(center, projection);
        Ok(())
    }

    /// The action transform for a drag step, before mode-dependent inversion.
    pub fn raw_action_transform(
        &self,
        graph: &SceneGraph,
        projection: &Projection,
        dx: f32,
        dy: f32,
    ) -> Result<RigidTransform> {
        let mode = self.manip_mode();
        if self.is_rotating() {
            if mode == ManipMode::EgoMotion {
                let rotation = Quat::from_rotation_x((-dy).to_radians())
                    * Quat::from_rotation_y(dx.to_radians());
                return Ok(RigidTransform::from_rotation(rotation));
            }
            let eye_inv = self.eye_rbt(graph)?.inverse();
            let center = eye_inv.transform_point(self.arcball_rbt(graph)?.translation());
            let p0 = self.last_click;
            let p1 = p0 + Vec2::new(dx, dy);
            return Ok(RigidTransform::from_rotation(
                self.arcball.rotation(center, projection, p0, p1),
            ));
        }

        let scale = if mode == ManipMode::EgoMotion {
            FALLBACK_SCALE
        } else {
            self.arcball.scale
        };
        let m = if self.is_translating_xy() {
            RigidTransform::from_translation(Vec3::new(dx, dy, 0.0) * scale)
        } else if self.is_translating_z() {
            RigidTransform::from_translation(Vec3::new(0.0, 0.0, -dy) * scale)
        } else {
            RigidTransform::IDENTITY
        };
        Ok(m)
    }

    /// The action transform `M` for a drag step of `(dx, dy)` pixels.
    ///
    /// Orbiting the sky camera moves the eye, not the world, so the sky mode
    /// inverts every gesture; ego motion inverts rotation only.
    pub fn action_transform(
        &self,
        graph: &SceneGraph,
        projection: &Projection,
        dx: f32,
        dy: f32,
    ) -> Result<RigidTransform> {
        let m = self.raw_action_transform(graph, projection, dx, dy)?;
        Ok(match self.manip_mode() {
            ManipMode::ArcballOnPicked => m,
            ManipMode::ArcballOnSky => m.inverse(),
            ManipMode::EgoMotion if self.is_rotating() => m.inverse(),
            ManipMode::EgoMotion => m,
        })
    }

    /// Auxiliary frame for the current mode, in the parent frame of `target`.
    pub fn auxiliary_frame(&self, graph: &SceneGraph, target: NodeHandle) -> Result<RigidTransform> {
        let a = RigidTransform::mixed_frame(&self.arcball_rbt(graph)?, &self.eye_rbt(graph)?);
        let parent = graph.accumulated_transform(graph.root(), target, 1)?;
        Ok(parent.inverse() * a)
    }

    /// Handles a drag to `cursor` (GL window coordinates): moves the target
    /// node and advances `last_click`.
    ///
    /// Returns the node that moved, or `None` when no button is held.
    pub fn drag_to(
        &mut self,
        graph: &mut SceneGraph,
        projection: &Projection,
        cursor: Vec2,
    ) -> Result<Option<NodeHandle>> {
        if self.buttons.is_empty() {
            return Ok(None);
        }
        let delta = cursor - self.last_click;
        let m = self.action_transform(graph, projection, delta.x, delta.y)?;

        let target = self.manip_target();
        let a = self.auxiliary_frame(graph, target)?;
        let o = graph.transform(target)?;
        graph.set_transform(target, do_m_to_o_wrt_a(&m, &o, &a))?;

        self.last_click += delta;
        Ok(Some(target))
    }

    /// Eye-space matrix for drawing the arcball sphere, when it is shown.
    pub fn arcball_model_view(&self, graph: &SceneGraph) -> Result<Option<Mat4>> {
        if !self.display_arcball || !self.should_use_arcball() {
            return Ok(None);
        }
        let radius = self.arcball.scale * self.arcball.screen_radius;
        Ok(Some(
            self.arcball_eye_rbt(graph)?.to_mat4() * Mat4::from_scale(Vec3::splat(radius)),
        ))
    }
}

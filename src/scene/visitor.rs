use glam::Mat4;

use crate::math::RigidTransform;
use crate::scene::node::{GeometryHandle, MaterialHandle, ShapeNode};
use crate::scene::NodeHandle;

/// Callbacks for a depth-first, pre-order walk of a [`SceneGraph`](super::SceneGraph).
///
/// `accumulated` values are expressed in the space of the node the walk
/// started from (the world, for [`SceneGraph::accept`](super::SceneGraph::accept)).
pub trait SceneVisitor {
    fn enter_transform(&mut self, _node: NodeHandle, _accumulated: &RigidTransform) {}

    fn exit_transform(&mut self, _node: NodeHandle) {}

    /// `accumulated` already includes the shape's own affine placement.
    fn visit_shape(&mut self, node: NodeHandle, shape: &ShapeNode, accumulated: Mat4);
}

/// Renderer side of the normal draw pass.
pub trait ShapeRenderer {
    fn draw_shape(&mut self, geometry: GeometryHandle, material: MaterialHandle, model_view: Mat4);

    /// Draws the arcball wireframe sphere. Hosts without one can ignore it.
    fn draw_arcball(&mut self, _model_view: Mat4) {}
}

/// Forwards every shape to a [`ShapeRenderer`] in eye space.
pub struct Drawer<'a, R: ShapeRenderer + ?Sized> {
    view: Mat4,
    renderer: &'a mut R,
}

impl<'a, R: ShapeRenderer + ?Sized> Drawer<'a, R> {
    /// `eye` is the world frame of the camera node.
    pub fn new(eye: &RigidTransform, renderer: &'a mut R) -> Self {
        Self {
            view: eye.inverse().to_mat4(),
            renderer,
        }
    }
}

impl<R: ShapeRenderer + ?Sized> SceneVisitor for Drawer<'_, R> {
    fn visit_shape(&mut self, _node: NodeHandle, shape: &ShapeNode, accumulated: Mat4) {
        self.renderer
            .draw_shape(shape.geometry, shape.material, self.view * accumulated);
    }
}

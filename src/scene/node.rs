use glam::{EulerRot, Mat4, Quat, Vec3};

use crate::math::RigidTransform;

/// Opaque handle to geometry owned by the host renderer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct GeometryHandle(pub u32);

/// Opaque handle to a material owned by the host renderer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct MaterialHandle(pub u32);

/// A drawable leaf with a fixed affine placement relative to its parent.
///
/// The local matrix is `T(position) * Rx * Ry * Rz * S(scale)`, with the
/// rotation angles given in degrees.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ShapeNode {
    pub geometry: GeometryHandle,
    pub material: MaterialHandle,
    pub position: Vec3,
    pub rotation_degrees: Vec3,
    pub scale: Vec3,
}

impl ShapeNode {
    #[must_use]
    pub fn new(geometry: GeometryHandle, material: MaterialHandle) -> Self {
        Self {
            geometry,
            material,
            position: Vec3::ZERO,
            rotation_degrees: Vec3::ZERO,
            scale: Vec3::ONE,
        }
    }

    #[must_use]
    pub fn with_position(mut self, position: Vec3) -> Self {
        self.position = position;
        self
    }

    #[must_use]
    pub fn with_rotation_degrees(mut self, rotation_degrees: Vec3) -> Self {
        self.rotation_degrees = rotation_degrees;
        self
    }

    #[must_use]
    pub fn with_scale(mut self, scale: Vec3) -> Self {
        self.scale = scale;
        self
    }

    #[must_use]
    pub fn local_matrix(&self) -> Mat4 {
        let r = self.rotation_degrees;
        let rotation = Quat::from_euler(
            EulerRot::XYZ,
            r.x.to_radians(),
            r.y.to_radians(),
            r.z.to_radians(),
        );
        Mat4::from_scale_rotation_translation(self.scale, rotation, self.position)
    }
}

/// What a node contributes to the hierarchy.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum NodeKind {
    /// The unique root of a graph. Contributes identity.
    Root,
    /// A rigid frame; its children are expressed relative to it.
    Transform(RigidTransform),
    /// A drawable leaf.
    Shape(ShapeNode),
}

/// A scene graph node.
///
/// Children are kept in insertion order, which is also traversal and draw
/// order. The parent link lives in the owning [`SceneGraph`](super::SceneGraph).
#[derive(Debug, Clone)]
pub struct Node {
    pub(crate) kind: NodeKind,
    pub(crate) children: Vec<super::NodeHandle>,
    pub(crate) name: Option<String>,
}

impl Node {
    #[must_use]
    pub fn transform(rbt: RigidTransform) -> Self {
        Self::from_kind(NodeKind::Transform(rbt))
    }

    #[must_use]
    pub fn shape(shape: ShapeNode) -> Self {
        Self::from_kind(NodeKind::Shape(shape))
    }

    #[must_use]
    pub fn from_kind(kind: NodeKind) -> Self {
        Self {
            kind,
            children: Vec::new(),
            name: None,
        }
    }

    /// Attaches a debug name.
    #[must_use]
    pub fn named(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    #[inline]
    #[must_use]
    pub fn kind(&self) -> &NodeKind {
        &self.kind
    }

    #[inline]
    #[must_use]
    pub fn children(&self) -> &[super::NodeHandle] {
        &self.children
    }

    #[inline]
    #[must_use]
    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    #[inline]
    #[must_use]
    pub fn is_transform(&self) -> bool {
        matches!(self.kind, NodeKind::Transform(_))
    }

    #[inline]
    #[must_use]
    pub fn is_shape(&self) -> bool {
        matches!(self.kind, NodeKind::Shape(_))
    }

    /// Local rigid transform, or `None` for root and shape nodes.
    #[must_use]
    pub fn rigid(&self) -> Option<RigidTransform> {
        match self.kind {
            NodeKind::Transform(rbt) => Some(rbt),
            NodeKind::Root | NodeKind::Shape(_) => None,
        }
    }
}

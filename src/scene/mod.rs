//! Scene graph
//!
//! - [`SceneGraph`]: arena-backed tree of root, transform and shape nodes
//! - [`Node`] / [`NodeKind`]: tagged node variants
//! - [`SceneVisitor`]: depth-first traversal callbacks, used by drawing and picking
//! - [`Projection`]: viewport projection and screen/eye conversions
//! - [`presets`]: the two-robot demo scene

pub mod camera;
pub mod graph;
pub mod node;
pub mod presets;
pub mod visitor;

pub use camera::Projection;
pub use graph::{NodePath, SceneGraph};
pub use node::{GeometryHandle, MaterialHandle, Node, NodeKind, ShapeNode};
pub use visitor::{Drawer, SceneVisitor, ShapeRenderer};

use slotmap::new_key_type;

new_key_type! {
    /// Stable handle to a node in a [`SceneGraph`].
    pub struct NodeHandle;
}

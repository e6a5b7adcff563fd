use slotmap::{SecondaryMap, SlotMap};
use smallvec::SmallVec;

use crate::errors::{ArmatureError, Result};
use crate::math::RigidTransform;
use crate::scene::node::{Node, NodeKind};
use crate::scene::visitor::SceneVisitor;
use crate::scene::NodeHandle;

/// Root-to-node handle path. Robot limbs are a handful of levels deep.
pub type NodePath = SmallVec<[NodeHandle; 16]>;

/// Hierarchical scene of rigid frames and shapes.
///
/// Nodes live in a slot map arena; a secondary map records each attached
/// node's parent. Both are updated together by every structural edit so the
/// graph is always a tree rooted at [`SceneGraph::root`].
#[derive(Debug, Clone)]
pub struct SceneGraph {
    nodes: SlotMap<NodeHandle, Node>,
    parents: SecondaryMap<NodeHandle, NodeHandle>,
    root: NodeHandle,
}

impl Default for SceneGraph {
    fn default() -> Self {
        Self::new()
    }
}

impl SceneGraph {
    #[must_use]
    pub fn new() -> Self {
        let mut nodes = SlotMap::with_key();
        let root = nodes.insert(Node::from_kind(NodeKind::Root).named("world"));
        Self {
            nodes,
            parents: SecondaryMap::new(),
            root,
        }
    }

    #[inline]
    #[must_use]
    pub fn root(&self) -> NodeHandle {
        self.root
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    // ========================================================================
    // Structure
    // ========================================================================

    /// Inserts a node without a parent. Use [`attach`](Self::attach) to place it.
    pub fn create(&mut self, node: Node) -> NodeHandle {
        self.nodes.insert(node)
    }

    /// Inserts `node` as the last child of `parent`.
    pub fn add_child(&mut self, parent: NodeHandle, node: Node) -> Result<NodeHandle> {
        self.check_can_parent(parent)?;
        let handle = self.nodes.insert(node);
        self.link(parent, handle);
        Ok(handle)
    }

    /// Makes an existing detached node the last child of `parent`.
    ///
    /// Fails without modifying the graph when `child` already has a parent,
    /// is the root, or is an ancestor of `parent`.
    pub fn attach(&mut self, parent: NodeHandle, child: NodeHandle) -> Result<()> {
        self.check_can_parent(parent)?;
        if !self.nodes.contains_key(child) {
            return Err(ArmatureError::NodeNotFound);
        }
        if child == self.root {
            return Err(ArmatureError::HierarchyViolation(
                "the root cannot become a child".into(),
            ));
        }
        if self.parents.contains_key(child) {
            return Err(ArmatureError::HierarchyViolation(
                "node already has a parent".into(),
            ));
        }
        if child == parent || self.is_ancestor(child, parent) {
            return Err(ArmatureError::HierarchyViolation(
                "cannot attach a node under its own descendant".into(),
            ));
        }
        self.link(parent, child);
        Ok(())
    }

    /// Removes `child` and its whole subtree. Returns `false` (and changes
    /// nothing) when `child` is not a direct child of `parent`.
    pub fn remove_child(&mut self, parent: NodeHandle, child: NodeHandle) -> bool {
        let Some(parent_node) = self.nodes.get_mut(parent) else {
            return false;
        };
        let Some(pos) = parent_node.children.iter().position(|&c| c == child) else {
            return false;
        };
        parent_node.children.remove(pos);

        let mut stack = vec![child];
        while let Some(handle) = stack.pop() {
            self.parents.remove(handle);
            if let Some(node) = self.nodes.remove(handle) {
                stack.extend(node.children);
            }
        }
        true
    }

    fn check_can_parent(&self, parent: NodeHandle) -> Result<()> {
        let node = self.nodes.get(parent).ok_or(ArmatureError::NodeNotFound)?;
        if node.is_shape() {
            return Err(ArmatureError::HierarchyViolation(
                "shape nodes cannot have children".into(),
            ));
        }
        Ok(())
    }

    fn link(&mut self, parent: NodeHandle, child: NodeHandle) {
        if let Some(p) = self.nodes.get_mut(parent) {
            p.children.push(child);
        }
        self.parents.insert(child, parent);
    }

    // ========================================================================
    // Queries
    // ========================================================================

    #[inline]
    #[must_use]
    pub fn contains(&self, node: NodeHandle) -> bool {
        self.nodes.contains_key(node)
    }

    #[inline]
    #[must_use]
    pub fn get(&self, node: NodeHandle) -> Option<&Node> {
        self.nodes.get(node)
    }

    #[inline]
    #[must_use]
    pub fn parent(&self, node: NodeHandle) -> Option<NodeHandle> {
        self.parents.get(node).copied()
    }

    /// Children in insertion order; empty for unknown handles.
    #[must_use]
    pub fn children(&self, node: NodeHandle) -> &[NodeHandle] {
        self.nodes.get(node).map_or(&[], |n| n.children.as_slice())
    }

    #[must_use]
    pub fn name(&self, node: NodeHandle) -> Option<&str> {
        self.nodes.get(node).and_then(Node::name)
    }

    /// Returns `true` if `ancestor` lies strictly above `node`.
    #[must_use]
    pub fn is_ancestor(&self, ancestor: NodeHandle, node: NodeHandle) -> bool {
        let mut current = self.parent(node);
        while let Some(p) = current {
            if p == ancestor {
                return true;
            }
            current = self.parent(p);
        }
        false
    }

    /// Handles from `from` down to `target`, both included.
    ///
    /// Returns `None` when `target` does not lie in the subtree of `from`.
    #[must_use]
    pub fn path(&self, from: NodeHandle, target: NodeHandle) -> Option<NodePath> {
        if !self.contains(from) || !self.contains(target) {
            return None;
        }
        let mut path = NodePath::new();
        let mut current = Some(target);
        while let Some(handle) = current {
            path.push(handle);
            if handle == from {
                path.reverse();
                return Some(path);
            }
            current = self.parent(handle);
        }
        None
    }

    // ========================================================================
    // Transforms
    // ========================================================================

    /// Local transform of a transform node.
    pub fn transform(&self, node: NodeHandle) -> Result<RigidTransform> {
        self.nodes
            .get(node)
            .ok_or(ArmatureError::NodeNotFound)?
            .rigid()
            .ok_or(ArmatureError::NotATransformNode)
    }

    pub fn set_transform(&mut self, node: NodeHandle, rbt: RigidTransform) -> Result<()> {
        match &mut self.nodes.get_mut(node).ok_or(ArmatureError::NodeNotFound)?.kind {
            NodeKind::Transform(local) => {
                *local = rbt;
                Ok(())
            }
            NodeKind::Root | NodeKind::Shape(_) => Err(ArmatureError::NotATransformNode),
        }
    }

    /// Composes local transforms along the path `root -> target`, ignoring
    /// the last `depth_limit_excluding_last` nodes of the path.
    ///
    /// With `0` this is the frame of `target` expressed in `root`'s space;
    /// with `1` it is the frame of `target`'s parent. Root and shape nodes
    /// contribute nothing. A transform node directly under the graph root
    /// yields its local transform unchanged.
    pub fn accumulated_transform(
        &self,
        root: NodeHandle,
        target: NodeHandle,
        depth_limit_excluding_last: usize,
    ) -> Result<RigidTransform> {
        let path = self.path(root, target).ok_or(ArmatureError::NodeNotFound)?;
        let keep = path.len().saturating_sub(depth_limit_excluding_last);

        let accumulated = path[..keep]
            .iter()
            .filter_map(|&h| self.nodes.get(h).and_then(Node::rigid))
            .reduce(|acc, local| acc * local);
        Ok(accumulated.unwrap_or(RigidTransform::IDENTITY))
    }

    /// World frame of `node`.
    pub fn world_transform(&self, node: NodeHandle) -> Result<RigidTransform> {
        self.accumulated_transform(self.root, node, 0)
    }

    /// Pre-order list of the transform nodes in the subtree of `root`.
    #[must_use]
    pub fn transform_nodes(&self, root: NodeHandle) -> Vec<NodeHandle> {
        let mut out = Vec::new();
        let mut stack = vec![root];
        while let Some(handle) = stack.pop() {
            let Some(node) = self.nodes.get(handle) else {
                continue;
            };
            if node.is_transform() {
                out.push(handle);
            }
            stack.extend(node.children.iter().rev());
        }
        out
    }

    // ========================================================================
    // Traversal
    // ========================================================================

    /// Walks the whole graph depth-first in child order.
    pub fn accept<V: SceneVisitor + ?Sized>(&self, visitor: &mut V) {
        self.accept_from(self.root, visitor);
    }

    /// Walks the subtree of `start`. Accumulation starts from identity at
    /// `start`'s parent.
    pub fn accept_from<V: SceneVisitor + ?Sized>(&self, start: NodeHandle, visitor: &mut V) {
        self.visit(start, RigidTransform::IDENTITY, visitor);
    }

    fn visit<V: SceneVisitor + ?Sized>(
        &self,
        handle: NodeHandle,
        parent_frame: RigidTransform,
        visitor: &mut V,
    ) {
        let Some(node) = self.nodes.get(handle) else {
            return;
        };
        match &node.kind {
            NodeKind::Root => {
                for &child in &node.children {
                    self.visit(child, parent_frame, visitor);
                }
            }
            NodeKind::Transform(local) => {
                let frame = parent_frame * *local;
                visitor.enter_transform(handle, &frame);
                for &child in &node.children {
                    self.visit(child, frame, visitor);
                }
                visitor.exit_transform(handle);
            }
            NodeKind::Shape(shape) => {
                let accumulated = parent_frame.to_mat4() * shape.local_matrix();
                visitor.visit_shape(handle, shape, accumulated);
            }
        }
    }
}

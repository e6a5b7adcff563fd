//! Id-colour picking
//!
//! The pick pass draws every shape with a flat colour that encodes a
//! per-pass id. Reading back the pixel under the cursor and decoding it gives
//! the shape, and from there the nearest enclosing transform node.
//!
//! Ids start at 1; black (id 0) is the background.

use glam::Mat4;
use rustc_hash::FxHashMap;

use crate::math::RigidTransform;
use crate::scene::{GeometryHandle, NodeHandle, SceneGraph, SceneVisitor, ShapeNode};

/// Largest id representable in 24-bit RGB.
pub const MAX_PICK_ID: u32 = 0x00FF_FFFF;

/// Encodes a pick id as an opaque RGBA8 colour (`id = r | g << 8 | b << 16`).
#[must_use]
pub fn id_to_color(id: u32) -> [u8; 4] {
    debug_assert!(id <= MAX_PICK_ID, "pick id {id} does not fit in 24 bits");
    [
        (id & 0xFF) as u8,
        ((id >> 8) & 0xFF) as u8,
        ((id >> 16) & 0xFF) as u8,
        255,
    ]
}

/// Decodes a pick colour. The alpha channel is ignored.
#[must_use]
pub fn color_to_id(color: [u8; 4]) -> u32 {
    u32::from(color[0]) | (u32::from(color[1]) << 8) | (u32::from(color[2]) << 16)
}

/// CPU-side copy of the pick target: RGBA8, row 0 at the bottom.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PickBuffer {
    width: u32,
    height: u32,
    pixels: Vec<[u8; 4]>,
}

impl PickBuffer {
    /// A buffer cleared to the background colour.
    #[must_use]
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            pixels: vec![[0, 0, 0, 0]; width as usize * height as usize],
        }
    }

    #[must_use]
    pub fn width(&self) -> u32 {
        self.width
    }

    #[must_use]
    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn resize(&mut self, width: u32, height: u32) {
        self.width = width;
        self.height = height;
        self.pixels = vec![[0, 0, 0, 0]; width as usize * height as usize];
    }

    pub fn clear(&mut self) {
        self.pixels.fill([0, 0, 0, 0]);
    }

    fn index(&self, x: i32, y: i32) -> Option<usize> {
        let (x, y) = (u32::try_from(x).ok()?, u32::try_from(y).ok()?);
        (x < self.width && y < self.height).then(|| (y * self.width + x) as usize)
    }

    /// Pixel at GL window coordinates, or `None` outside the buffer.
    #[must_use]
    pub fn read(&self, x: i32, y: i32) -> Option<[u8; 4]> {
        self.index(x, y).map(|i| self.pixels[i])
    }

    /// Writes a pixel; writes outside the buffer are dropped.
    pub fn write(&mut self, x: i32, y: i32, color: [u8; 4]) {
        if let Some(i) = self.index(x, y) {
            self.pixels[i] = color;
        }
    }
}

/// Renderer side of the pick pass.
pub trait PickRenderer {
    /// Draws `geometry` in the flat `color`. Materials are not used.
    fn draw_pick(&mut self, geometry: GeometryHandle, id: u32, color: [u8; 4], model_view: Mat4);

    /// Called before the pick pass draws anything; clear the pick target here.
    fn begin_pick(&mut self) {}

    /// The pick target as read back after the pass.
    fn pick_buffer(&self) -> &PickBuffer;
}

/// Visitor that assigns ids to shapes and issues pick draws.
pub struct Picker<'a, R: PickRenderer + ?Sized> {
    view: Mat4,
    renderer: &'a mut R,
    next_id: u32,
    owners: FxHashMap<u32, NodeHandle>,
    enclosing: Vec<NodeHandle>,
    skipped: usize,
}

impl<'a, R: PickRenderer + ?Sized> Picker<'a, R> {
    /// `eye` is the world frame of the camera node.
    pub fn new(eye: &RigidTransform, renderer: &'a mut R) -> Self {
        Self {
            view: eye.inverse().to_mat4(),
            renderer,
            next_id: 1,
            owners: FxHashMap::default(),
            enclosing: Vec::new(),
            skipped: 0,
        }
    }

    /// Shapes left out of the pass because the 24-bit id space ran out.
    #[must_use]
    pub fn skipped(&self) -> usize {
        self.skipped
    }

    /// Reads the pixel at `(x, y)` and maps it to the owning transform node.
    #[must_use]
    pub fn resolve(&self, x: i32, y: i32) -> Option<NodeHandle> {
        let pixel = self.renderer.pick_buffer().read(x, y)?;
        let id = color_to_id(pixel);
        if id == 0 {
            return None;
        }
        self.owners.get(&id).copied()
    }
}

impl<R: PickRenderer + ?Sized> SceneVisitor for Picker<'_, R> {
    fn enter_transform(&mut self, node: NodeHandle, _accumulated: &RigidTransform) {
        self.enclosing.push(node);
    }

    fn exit_transform(&mut self, _node: NodeHandle) {
        self.enclosing.pop();
    }

    fn visit_shape(&mut self, _node: NodeHandle, shape: &ShapeNode, accumulated: Mat4) {
        if self.next_id > MAX_PICK_ID {
            if self.skipped == 0 {
                log::warn!("Pick ids exhausted after {MAX_PICK_ID} shapes; remaining shapes are not pickable");
            }
            self.skipped += 1;
            return;
        }
        let id = self.next_id;
        self.next_id += 1;
        if let Some(&owner) = self.enclosing.last() {
            self.owners.insert(id, owner);
        }
        self.renderer
            .draw_pick(shape.geometry, id, id_to_color(id), self.view * accumulated);
    }
}

/// Runs a pick pass from `eye` and returns the transform node under `(x, y)`.
///
/// Background, unknown ids and shapes without an enclosing transform node
/// give `None`, as does a hit on `ground`.
pub fn pick<R: PickRenderer + ?Sized>(
    graph: &SceneGraph,
    eye: &RigidTransform,
    renderer: &mut R,
    x: i32,
    y: i32,
    ground: Option<NodeHandle>,
) -> Option<NodeHandle> {
    renderer.begin_pick();
    let mut picker = Picker::new(eye, renderer);
    graph.accept(&mut picker);
    let hit = picker.resolve(x, y);
    match hit {
        Some(node) if Some(node) == ground => None,
        other => other,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn colors_encode_little_endian_rgb() {
        assert_eq!(id_to_color(1), [1, 0, 0, 255]);
        assert_eq!(id_to_color(0x01_02_03), [3, 2, 1, 255]);
        assert_eq!(color_to_id([3, 2, 1, 0]), 0x01_02_03);
    }

    struct CountingRenderer {
        buffer: PickBuffer,
        ids: Vec<u32>,
    }

    impl PickRenderer for CountingRenderer {
        fn draw_pick(&mut self, _geometry: GeometryHandle, id: u32, _color: [u8; 4], _model_view: Mat4) {
            self.ids.push(id);
        }

        fn pick_buffer(&self) -> &PickBuffer {
            &self.buffer
        }
    }

    #[test]
    fn shapes_past_the_last_id_are_skipped() {
        use crate::scene::{MaterialHandle, Node};

        let mut graph = SceneGraph::new();
        let part = graph
            .add_child(graph.root(), Node::transform(RigidTransform::IDENTITY))
            .unwrap();
        for geometry in 0..3 {
            graph
                .add_child(part, Node::shape(ShapeNode::new(GeometryHandle(geometry), MaterialHandle(0))))
                .unwrap();
        }

        let mut renderer = CountingRenderer {
            buffer: PickBuffer::new(1, 1),
            ids: Vec::new(),
        };
        let mut picker = Picker::new(&RigidTransform::IDENTITY, &mut renderer);
        picker.next_id = MAX_PICK_ID;
        graph.accept(&mut picker);

        assert_eq!(picker.owners.len(), 1);
        assert_eq!(picker.owners.get(&MAX_PICK_ID), Some(&part));
        assert_eq!(picker.skipped(), 2);
        assert_eq!(renderer.ids, vec![MAX_PICK_ID]);
    }

    #[test]
    fn reads_outside_buffer_are_none() {
        let buffer = PickBuffer::new(4, 4);
        assert!(buffer.read(-1, 0).is_none());
        assert!(buffer.read(4, 0).is_none());
        assert_eq!(buffer.read(3, 3), Some([0, 0, 0, 0]));
    }
}

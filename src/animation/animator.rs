use smallvec::SmallVec;

use crate::animation::keyframes::{Keyframe, KeyframeCursor, KeyframeSequence};
use crate::errors::{ArmatureError, Result};
use crate::math::{RigidTransform, interpolate_catmull_rom};
use crate::scene::{NodeHandle, SceneGraph};

/// Minimum keyframes for Catmull-Rom playback.
pub const MIN_PLAYBACK_KEYFRAMES: usize = 4;

/// Records poses of a scene graph's transform nodes as keyframes and plays
/// them back with Catmull-Rom interpolation.
///
/// The set of tracked nodes is captured by [`attach`](Self::attach); every
/// keyframe holds one transform per tracked node, in that order.
#[derive(Debug, Clone, Default)]
pub struct Animator {
    tracked: Vec<NodeHandle>,
    keyframes: KeyframeSequence,
}

impl Animator {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Tracks the transform nodes under `root` (pre-order) and drops all
    /// keyframes.
    pub fn attach(&mut self, graph: &SceneGraph, root: NodeHandle) {
        self.tracked = graph.transform_nodes(root);
        self.keyframes.clear();
        log::debug!("Animator tracking {} transform nodes", self.tracked.len());
    }

    #[must_use]
    pub fn tracked_nodes(&self) -> &[NodeHandle] {
        &self.tracked
    }

    #[must_use]
    pub fn node_count(&self) -> usize {
        self.tracked.len()
    }

    #[must_use]
    pub fn keyframes(&self) -> &KeyframeSequence {
        &self.keyframes
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.keyframes.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.keyframes.is_empty()
    }

    #[must_use]
    pub fn first(&self) -> KeyframeCursor {
        self.keyframes.first()
    }

    #[must_use]
    pub fn next(&self, cursor: KeyframeCursor) -> KeyframeCursor {
        self.keyframes.next(cursor)
    }

    #[must_use]
    pub fn prev(&self, cursor: KeyframeCursor) -> KeyframeCursor {
        self.keyframes.prev(cursor)
    }

    #[must_use]
    pub fn nth(&self, n: usize) -> KeyframeCursor {
        self.keyframes.nth(n)
    }

    #[must_use]
    pub fn index_of(&self, cursor: KeyframeCursor) -> Option<usize> {
        self.keyframes.index_of(cursor)
    }

    /// A keyframe of identity transforms, one per tracked node.
    #[must_use]
    pub fn empty_keyframe(&self) -> Keyframe {
        vec![RigidTransform::IDENTITY; self.tracked.len()]
    }

    /// Copies the current local transform of every tracked node into the
    /// keyframe at `cursor`.
    pub fn pull_from_scene_graph(&mut self, graph: &SceneGraph, cursor: KeyframeCursor) -> Result<()> {
        // validate the cursor before reading the graph
        self.keyframes.get(cursor)?;
        let pose = self.capture(graph)?;
        *self.keyframes.get_mut(cursor)? = pose;
        Ok(())
    }

    /// The current local transforms of the tracked nodes, in tracked order.
    pub fn capture(&self, graph: &SceneGraph) -> Result<Keyframe> {
        self.tracked
            .iter()
            .map(|&node| graph.transform(node))
            .collect()
    }

    /// Sets every tracked node's local transform from the keyframe at `cursor`.
    pub fn push_to_scene_graph(&self, graph: &mut SceneGraph, cursor: KeyframeCursor) -> Result<()> {
        let frame = self.keyframes.get(cursor)?;
        self.apply(graph, frame)
    }

    fn apply(&self, graph: &mut SceneGraph, pose: &[RigidTransform]) -> Result<()> {
        if self.tracked.iter().any(|&node| !graph.contains(node)) {
            return Err(ArmatureError::NodeNotFound);
        }
        for (&node, rbt) in self.tracked.iter().zip(pose) {
            graph.set_transform(node, *rbt)?;
        }
        Ok(())
    }

    /// Inserts an identity keyframe after `cursor` (at the front when
    /// `cursor` is end) and returns a cursor to it.
    pub fn insert_after(&mut self, cursor: KeyframeCursor) -> Result<KeyframeCursor> {
        let frame = self.empty_keyframe();
        self.keyframes.insert_after(cursor, frame)
    }

    /// Inserts `frame` after `cursor` (at the front when `cursor` is end).
    /// Nothing changes on error.
    pub fn insert_frame_after(&mut self, cursor: KeyframeCursor, frame: Keyframe) -> Result<KeyframeCursor> {
        if frame.len() != self.tracked.len() {
            return Err(ArmatureError::NodeCountMismatch {
                expected: self.tracked.len(),
                found: frame.len(),
            });
        }
        self.keyframes.insert_after(cursor, frame)
    }

    /// Removes the keyframe at `cursor`. Returns the previous keyframe, else
    /// the next one, else end.
    pub fn delete(&mut self, cursor: KeyframeCursor) -> KeyframeCursor {
        self.keyframes.remove(cursor)
    }

    /// Replaces all keyframes. Each must hold one transform per tracked node.
    pub fn replace_keyframes(&mut self, frames: Vec<Keyframe>) -> Result<()> {
        let expected = self.tracked.len();
        if let Some(bad) = frames.iter().find(|f| f.len() != expected) {
            return Err(ArmatureError::NodeCountMismatch {
                expected,
                found: bad.len(),
            });
        }
        self.keyframes.clear();
        for frame in frames {
            self.keyframes.push_back(frame);
        }
        Ok(())
    }

    /// Largest valid time for [`animate`](Self::animate).
    #[must_use]
    pub fn max_time(&self) -> f32 {
        self.keyframes.len() as f32 - 3.0
    }

    /// Poses the graph at animation time `t`, in keyframe units.
    ///
    /// `t = 0` is the second keyframe and `t = len - 3` the second-to-last;
    /// the first and last keyframes only shape the tangents.
    pub fn animate(&self, graph: &mut SceneGraph, t: f32) -> Result<()> {
        let count = self.keyframes.len();
        if count < MIN_PLAYBACK_KEYFRAMES {
            return Err(ArmatureError::NotEnoughKeyframes { found: count });
        }
        let max = self.max_time();
        if !(0.0..=max).contains(&t) {
            return Err(ArmatureError::InvalidAnimationTime { t, max });
        }

        let shifted = t + 1.0;
        let index = shifted.floor() as usize;
        let u = shifted - index as f32;

        let mut controls: SmallVec<[&Keyframe; 4]> =
            self.keyframes.iter().skip(index - 1).take(4).collect();
        if controls.len() < 4 {
            // landing exactly on the second-to-last keyframe
            let clamped = controls[2];
            controls.push(clamped);
        }

        let pose: Keyframe = (0..self.tracked.len())
            .map(|j| {
                interpolate_catmull_rom(
                    &controls[0][j],
                    &controls[1][j],
                    &controls[2][j],
                    &controls[3][j],
                    u,
                )
            })
            .collect();
        self.apply(graph, &pose)
    }
}

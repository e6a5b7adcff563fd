use slotmap::{SlotMap, new_key_type};

use crate::errors::{ArmatureError, Result};
use crate::math::RigidTransform;

new_key_type! {
    /// Stable key of a keyframe slot.
    pub struct KeyframeKey;
}

/// One pose: a rigid transform per tracked node, in tracked-node order.
pub type Keyframe = Vec<RigidTransform>;

/// Position in a [`KeyframeSequence`]: a keyframe, or the end of the sequence.
///
/// Cursors stay valid across insertions and across deletions of other
/// keyframes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct KeyframeCursor(Option<KeyframeKey>);

impl KeyframeCursor {
    /// The end-of-sequence sentinel.
    pub const END: Self = Self(None);

    #[inline]
    #[must_use]
    pub fn end() -> Self {
        Self::END
    }

    #[inline]
    #[must_use]
    pub fn is_end(&self) -> bool {
        self.0.is_none()
    }

    #[inline]
    #[must_use]
    pub fn key(&self) -> Option<KeyframeKey> {
        self.0
    }
}

#[derive(Debug, Clone)]
struct Slot {
    frame: Keyframe,
    prev: Option<KeyframeKey>,
    next: Option<KeyframeKey>,
}

/// Ordered list of keyframes backed by a slot map, linked in both directions.
#[derive(Debug, Clone, Default)]
pub struct KeyframeSequence {
    slots: SlotMap<KeyframeKey, Slot>,
    head: Option<KeyframeKey>,
    tail: Option<KeyframeKey>,
}

impl KeyframeSequence {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.slots.len()
    }

    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    pub fn clear(&mut self) {
        self.slots.clear();
        self.head = None;
        self.tail = None;
    }

    // ========================================================================
    // Navigation
    // ========================================================================

    /// First keyframe, or end when empty.
    #[must_use]
    pub fn first(&self) -> KeyframeCursor {
        KeyframeCursor(self.head)
    }

    /// Last keyframe, or end when empty.
    #[must_use]
    pub fn last(&self) -> KeyframeCursor {
        KeyframeCursor(self.tail)
    }

    /// Following keyframe; end after the last one and for end itself.
    #[must_use]
    pub fn next(&self, cursor: KeyframeCursor) -> KeyframeCursor {
        KeyframeCursor(cursor.0.and_then(|k| self.slots.get(k)).and_then(|s| s.next))
    }

    /// Preceding keyframe; end before the first one and for end itself.
    #[must_use]
    pub fn prev(&self, cursor: KeyframeCursor) -> KeyframeCursor {
        KeyframeCursor(cursor.0.and_then(|k| self.slots.get(k)).and_then(|s| s.prev))
    }

    /// The `n`-th keyframe (0-based), or end when out of range.
    #[must_use]
    pub fn nth(&self, n: usize) -> KeyframeCursor {
        self.cursors().nth(n).unwrap_or(KeyframeCursor::END)
    }

    /// Position of `cursor`, or `None` for end and stale cursors.
    #[must_use]
    pub fn index_of(&self, cursor: KeyframeCursor) -> Option<usize> {
        let key = cursor.0?;
        self.cursors().position(|c| c.0 == Some(key))
    }

    #[must_use]
    pub fn contains(&self, cursor: KeyframeCursor) -> bool {
        cursor.0.is_some_and(|k| self.slots.contains_key(k))
    }

    /// Cursors of all keyframes in order.
    pub fn cursors(&self) -> impl Iterator<Item = KeyframeCursor> + '_ {
        std::iter::successors(self.head, |&k| self.slots.get(k).and_then(|s| s.next))
            .map(|k| KeyframeCursor(Some(k)))
    }

    /// Keyframes in order.
    pub fn iter(&self) -> impl Iterator<Item = &Keyframe> + '_ {
        std::iter::successors(self.head, |&k| self.slots.get(k).and_then(|s| s.next))
            .filter_map(|k| self.slots.get(k).map(|s| &s.frame))
    }

    // ========================================================================
    // Access
    // ========================================================================

    fn resolve(&self, cursor: KeyframeCursor) -> Result<KeyframeKey> {
        match cursor.0 {
            None => Err(ArmatureError::EmptySequence),
            Some(k) if self.slots.contains_key(k) => Ok(k),
            Some(_) if self.is_empty() => Err(ArmatureError::EmptySequence),
            Some(_) => Err(ArmatureError::InvalidCursor),
        }
    }

    pub fn get(&self, cursor: KeyframeCursor) -> Result<&Keyframe> {
        let key = self.resolve(cursor)?;
        Ok(&self.slots[key].frame)
    }

    pub fn get_mut(&mut self, cursor: KeyframeCursor) -> Result<&mut Keyframe> {
        let key = self.resolve(cursor)?;
        Ok(&mut self.slots[key].frame)
    }

    // ========================================================================
    // Editing
    // ========================================================================

    /// Inserts `frame` after `cursor`, or at the front when `cursor` is end.
    pub fn insert_after(&mut self, cursor: KeyframeCursor, frame: Keyframe) -> Result<KeyframeCursor> {
        let prev = match cursor.0 {
            None => None,
            Some(_) => Some(self.resolve(cursor)?),
        };
        let next = match prev {
            Some(p) => self.slots[p].next,
            None => self.head,
        };
        let key = self.slots.insert(Slot { frame, prev, next });

        match prev {
            Some(p) => self.slots[p].next = Some(key),
            None => self.head = Some(key),
        }
        match next {
            Some(n) => self.slots[n].prev = Some(key),
            None => self.tail = Some(key),
        }
        Ok(KeyframeCursor(Some(key)))
    }

    /// Appends `frame` after the last keyframe.
    pub fn push_back(&mut self, frame: Keyframe) -> KeyframeCursor {
        let tail = self.last();
        // the tail cursor is either end or live, so this cannot fail
        self.insert_after(tail, frame).unwrap_or(KeyframeCursor::END)
    }

    /// Removes the keyframe at `cursor`. Returns the previous keyframe, else
    /// the next, else end. End and stale cursors are a no-op returning end.
    pub fn remove(&mut self, cursor: KeyframeCursor) -> KeyframeCursor {
        let Some(slot) = cursor.0.and_then(|k| self.slots.remove(k)) else {
            return KeyframeCursor::END;
        };
        match slot.prev {
            Some(p) => self.slots[p].next = slot.next,
            None => self.head = slot.next,
        }
        match slot.next {
            Some(n) => self.slots[n].prev = slot.prev,
            None => self.tail = slot.prev,
        }
        KeyframeCursor(slot.prev.or(slot.next))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn frame(x: f32) -> Keyframe {
        vec![RigidTransform::from_translation(glam::Vec3::splat(x))]
    }

    #[test]
    fn cursor_survives_insert_before_it() {
        let mut seq = KeyframeSequence::new();
        let a = seq.push_back(frame(1.0));
        let b = seq.push_back(frame(2.0));
        seq.insert_after(a, frame(1.5)).unwrap();
        assert_eq!(seq.index_of(b), Some(2));
        assert_eq!(seq.get(b).unwrap()[0].translation().x, 2.0);
    }

    #[test]
    fn insert_after_end_goes_to_front() {
        let mut seq = KeyframeSequence::new();
        seq.push_back(frame(1.0));
        let front = seq.insert_after(KeyframeCursor::END, frame(0.0)).unwrap();
        assert_eq!(seq.first(), front);
        assert_eq!(seq.len(), 2);
    }

    #[test]
    fn links_stay_consistent_after_removals() {
        let mut seq = KeyframeSequence::new();
        let cursors: Vec<_> = (0..4).map(|i| seq.push_back(frame(i as f32))).collect();
        assert_eq!(seq.remove(cursors[0]), cursors[1]);
        assert_eq!(seq.remove(cursors[3]), cursors[2]);
        assert_eq!(seq.first(), cursors[1]);
        assert_eq!(seq.last(), cursors[2]);
        assert_eq!(seq.next(cursors[1]), cursors[2]);
        assert_eq!(seq.prev(cursors[1]), KeyframeCursor::END);
    }
}

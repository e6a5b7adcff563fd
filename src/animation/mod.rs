//! Keyframe animation
//!
//! - [`KeyframeSequence`]: linked list of poses with stable cursors
//! - [`Animator`]: captures/applies poses and interpolates between them
//! - [`Playback`]: timed playback state machine
//! - [`io`]: animation file save/load

pub mod animator;
pub mod io;
pub mod keyframes;
pub mod playback;

pub use animator::{Animator, MIN_PLAYBACK_KEYFRAMES};
pub use io::{load_animation, parse_animation, save_animation};
pub use keyframes::{Keyframe, KeyframeCursor, KeyframeKey, KeyframeSequence};
pub use playback::{Playback, PlaybackEvent, PlaybackState};

//! Core of an interactive 3D scene editor and keyframe animator.
//!
//! - [`math`]: rigid transforms and Catmull-Rom splines
//! - [`scene`]: the scene graph, traversal and projection
//! - [`manipulation`]: arcball / ego-motion mouse manipulation
//! - [`picking`]: id-colour picking
//! - [`animation`]: keyframes, interpolation, playback and animation files
//! - [`app`]: the [`Editor`] session tying it all to input events
//!
//! Rendering, windowing and the clock are supplied by the host through
//! [`ShapeRenderer`], [`PickRenderer`], [`InputEvent`] and [`Clock`].

#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::cast_precision_loss)]
#![allow(clippy::cast_possible_truncation)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::missing_panics_doc)]
#![allow(clippy::too_many_arguments)]

pub mod animation;
pub mod app;
pub mod errors;
pub mod manipulation;
pub mod math;
pub mod picking;
pub mod scene;
pub mod settings;
pub mod utils;

pub use animation::{Animator, KeyframeCursor, Playback, PlaybackEvent, PlaybackState};
pub use app::{AnimatorState, Command, Editor, InputEvent, StatusMessage};
pub use errors::{ArmatureError, Result};
pub use manipulation::{InteractionState, ManipMode, SkyMode};
pub use math::RigidTransform;
pub use picking::{PickBuffer, PickRenderer};
pub use scene::{NodeHandle, Projection, SceneGraph, ShapeRenderer};
pub use settings::EditorSettings;
pub use utils::time::{Clock, ManualClock, SystemClock};

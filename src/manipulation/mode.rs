use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::app::input::MouseButtons;
use crate::manipulation::arcball::Arcball;
use crate::scene::NodeHandle;

/// Which frame the sky camera is manipulated about.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SkyMode {
    /// Orbit the world origin.
    #[default]
    WorldSky,
    /// Rotate the sky camera about itself.
    SkySky,
}

impl SkyMode {
    #[must_use]
    pub fn toggled(self) -> Self {
        match self {
            Self::WorldSky => Self::SkySky,
            Self::SkySky => Self::WorldSky,
        }
    }
}

/// How mouse drags are interpreted. Derived from [`InteractionState`] on
/// every query, never stored.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ManipMode {
    /// Rotate/translate the picked node about its own origin.
    ArcballOnPicked,
    /// Orbit the sky camera around the world origin.
    ArcballOnSky,
    /// First-person motion of the current camera.
    EgoMotion,
}

/// The mutable state of an editing session that drives manipulation.
#[derive(Debug, Clone)]
pub struct InteractionState {
    /// Transform node picked for editing.
    pub selection: Option<NodeHandle>,
    /// Node the scene is viewed from.
    pub current_camera: NodeHandle,
    pub sky: NodeHandle,
    /// Never selectable by picking.
    pub ground: Option<NodeHandle>,
    pub sky_mode: SkyMode,
    pub buttons: MouseButtons,
    pub space_down: bool,
    /// Cursor position of the last press/drag step, GL window coordinates.
    pub last_click: Vec2,
    /// The next left press picks instead of manipulating.
    pub picking: bool,
    pub display_arcball: bool,
    pub arcball: Arcball,
}

impl InteractionState {
    /// A fresh session viewing from the sky camera.
    #[must_use]
    pub fn new(sky: NodeHandle, ground: Option<NodeHandle>) -> Self {
        Self {
            selection: None,
            current_camera: sky,
            sky,
            ground,
            sky_mode: SkyMode::WorldSky,
            buttons: MouseButtons::empty(),
            space_down: false,
            last_click: Vec2::ZERO,
            picking: false,
            display_arcball: true,
            arcball: Arcball::default(),
        }
    }

    #[must_use]
    pub fn manip_mode(&self) -> ManipMode {
        if self.selection.is_none() || self.selection == Some(self.current_camera) {
            if self.current_camera == self.sky && self.sky_mode == SkyMode::WorldSky {
                ManipMode::ArcballOnSky
            } else {
                ManipMode::EgoMotion
            }
        } else {
            ManipMode::ArcballOnPicked
        }
    }

    #[inline]
    #[must_use]
    pub fn should_use_arcball(&self) -> bool {
        self.manip_mode() != ManipMode::EgoMotion
    }

    /// Node that a drag in the current mode moves.
    #[must_use]
    pub fn manip_target(&self) -> NodeHandle {
        match self.manip_mode() {
            ManipMode::ArcballOnPicked => self.selection.unwrap_or(self.current_camera),
            ManipMode::ArcballOnSky => self.sky,
            ManipMode::EgoMotion => self.current_camera,
        }
    }

    /// Left drag without right button or space.
    #[must_use]
    pub fn is_rotating(&self) -> bool {
        self.buttons.contains(MouseButtons::LEFT)
            && !self.buttons.contains(MouseButtons::RIGHT)
            && !self.space_down
    }

    /// Any of the gestures that translate along the view axis.
    #[must_use]
    pub fn is_translating_z(&self) -> bool {
        let left = self.buttons.contains(MouseButtons::LEFT);
        self.buttons.contains(MouseButtons::MIDDLE)
            || (left && self.buttons.contains(MouseButtons::RIGHT))
            || (left && self.space_down)
    }

    /// Right drag alone.
    #[must_use]
    pub fn is_translating_xy(&self) -> bool {
        self.buttons.contains(MouseButtons::RIGHT) && !self.buttons.contains(MouseButtons::LEFT)
    }
}

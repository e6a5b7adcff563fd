//! Platform-agnostic input
//!
//! Input types that do not depend on any windowing library. Platform adapters
//! (see the `winit` feature) translate their events into [`InputEvent`]s.
//!
//! Positions are window coordinates with the origin at the top-left corner.
//! The editor converts them to GL window coordinates (origin bottom-left)
//! with [`window_to_gl`].

use bitflags::bitflags;
use glam::Vec2;

/// Keys the editor reacts to.
///
/// Letter keys are physical; the symbol keys are logical (`+` is
/// [`Key::Plus`] whatever the layout needs to produce it).
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum Key {
    A,
    B,
    C,
    D,
    E,
    F,
    G,
    H,
    I,
    J,
    K,
    L,
    M,
    N,
    O,
    P,
    Q,
    R,
    S,
    T,
    U,
    V,
    W,
    X,
    Y,
    Z,

    Space,
    Escape,

    Plus,
    Minus,
    Less,
    Greater,
}

/// Mouse button enumeration
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum MouseButton {
    Left,
    Right,
    Middle,
    Other(u16),
}

/// Button state
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum ButtonState {
    Pressed,
    Released,
}

bitflags! {
    /// Set of mouse buttons currently held down.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    pub struct MouseButtons: u8 {
        const LEFT = 1 << 0;
        const RIGHT = 1 << 1;
        const MIDDLE = 1 << 2;
    }
}

impl MouseButtons {
    /// Flag for `button`; empty for buttons the editor ignores.
    #[must_use]
    pub fn from_button(button: MouseButton) -> Self {
        match button {
            MouseButton::Left => Self::LEFT,
            MouseButton::Right => Self::RIGHT,
            MouseButton::Middle => Self::MIDDLE,
            MouseButton::Other(_) => Self::empty(),
        }
    }

    /// Records a press or release.
    pub fn apply(&mut self, button: MouseButton, state: ButtonState) {
        self.set(Self::from_button(button), state == ButtonState::Pressed);
    }
}

/// An input event delivered to [`Editor::handle_event`](crate::app::Editor::handle_event).
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum InputEvent {
    MouseButton {
        button: MouseButton,
        state: ButtonState,
        x: f32,
        y: f32,
    },
    MouseMotion {
        x: f32,
        y: f32,
    },
    Key {
        key: Key,
        state: ButtonState,
    },
    Resized {
        width: u32,
        height: u32,
    },
}

/// Converts a window position (y down) to GL window coordinates (y up).
#[inline]
#[must_use]
pub fn window_to_gl(x: f32, y: f32, height: u32) -> Vec2 {
    Vec2::new(x, height as f32 - y - 1.0)
}

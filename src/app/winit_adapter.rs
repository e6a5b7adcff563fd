//! Winit input adapter
//!
//! Translates winit window events into the editor's platform-agnostic
//! [`InputEvent`]s. Enabled with the `winit` feature.

use winit::event::{ElementState, WindowEvent};
use winit::keyboard::{KeyCode, NamedKey, PhysicalKey};

use crate::app::input::{ButtonState, InputEvent, Key, MouseButton};

/// Maps a physical letter/space/escape key.
#[must_use]
pub fn translate_physical_key(physical_key: PhysicalKey) -> Option<Key> {
    let PhysicalKey::Code(code) = physical_key else {
        return None;
    };

    let key = match code {
        KeyCode::KeyA => Key::A,
        KeyCode::KeyB => Key::B,
        KeyCode::KeyC => Key::C,
        KeyCode::KeyD => Key::D,
        KeyCode::KeyE => Key::E,
        KeyCode::KeyF => Key::F,
        KeyCode::KeyG => Key::G,
        KeyCode::KeyH => Key::H,
        KeyCode::KeyI => Key::I,
        KeyCode::KeyJ => Key::J,
        KeyCode::KeyK => Key::K,
        KeyCode::KeyL => Key::L,
        KeyCode::KeyM => Key::M,
        KeyCode::KeyN => Key::N,
        KeyCode::KeyO => Key::O,
        KeyCode::KeyP => Key::P,
        KeyCode::KeyQ => Key::Q,
        KeyCode::KeyR => Key::R,
        KeyCode::KeyS => Key::S,
        KeyCode::KeyT => Key::T,
        KeyCode::KeyU => Key::U,
        KeyCode::KeyV => Key::V,
        KeyCode::KeyW => Key::W,
        KeyCode::KeyX => Key::X,
        KeyCode::KeyY => Key::Y,
        KeyCode::KeyZ => Key::Z,
        KeyCode::Space => Key::Space,
        KeyCode::Escape => Key::Escape,
        KeyCode::NumpadAdd => Key::Plus,
        KeyCode::NumpadSubtract => Key::Minus,
        _ => return None,
    };

    Some(key)
}

/// Maps the symbol keys by the character they produce.
#[must_use]
pub fn translate_logical_key(logical_key: &winit::keyboard::Key) -> Option<Key> {
    match logical_key {
        winit::keyboard::Key::Character(c) => match c.as_str() {
            "+" => Some(Key::Plus),
            "-" => Some(Key::Minus),
            "<" => Some(Key::Less),
            ">" => Some(Key::Greater),
            _ => None,
        },
        winit::keyboard::Key::Named(NamedKey::Escape) => Some(Key::Escape),
        _ => None,
    }
}

#[must_use]
pub fn translate_mouse_button(button: winit::event::MouseButton) -> MouseButton {
    match button {
        winit::event::MouseButton::Left => MouseButton::Left,
        winit::event::MouseButton::Right => MouseButton::Right,
        winit::event::MouseButton::Middle => MouseButton::Middle,
        winit::event::MouseButton::Back => MouseButton::Other(3),
        winit::event::MouseButton::Forward => MouseButton::Other(4),
        winit::event::MouseButton::Other(id) => MouseButton::Other(id),
    }
}

#[must_use]
pub fn translate_element_state(state: ElementState) -> ButtonState {
    match state {
        ElementState::Pressed => ButtonState::Pressed,
        ElementState::Released => ButtonState::Released,
    }
}

/// Tracks the cursor so mouse button events carry a position, as the editor
/// expects.
#[derive(Debug, Default, Clone, Copy)]
pub struct WinitInputAdapter {
    cursor_x: f32,
    cursor_y: f32,
}

impl WinitInputAdapter {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Translates one window event; events the editor ignores give `None`.
    pub fn translate(&mut self, event: &WindowEvent) -> Option<InputEvent> {
        match event {
            WindowEvent::KeyboardInput { event, .. } => {
                let key = translate_logical_key(&event.logical_key)
                    .or_else(|| translate_physical_key(event.physical_key))?;
                Some(InputEvent::Key {
                    key,
                    state: translate_element_state(event.state),
                })
            }
            WindowEvent::CursorMoved { position, .. } => {
                self.cursor_x = position.x as f32;
                self.cursor_y = position.y as f32;
                Some(InputEvent::MouseMotion {
                    x: self.cursor_x,
                    y: self.cursor_y,
                })
            }
            WindowEvent::MouseInput { state, button, .. } => Some(InputEvent::MouseButton {
                button: translate_mouse_button(*button),
                state: translate_element_state(*state),
                x: self.cursor_x,
                y: self.cursor_y,
            }),
            WindowEvent::Resized(size) => Some(InputEvent::Resized {
                width: size.width,
                height: size.height,
            }),
            _ => None,
        }
    }
}

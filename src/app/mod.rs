//! Editor application layer
//!
//! - [`input`]: platform-agnostic input events
//! - [`Editor`]: the editing session (event dispatch, playback, drawing, picking)
//! - [`commands`]: the keyboard command table
//! - `winit_adapter`: winit event translation (feature `winit`)

pub mod commands;
pub mod editor;
pub mod input;
#[cfg(feature = "winit")]
pub mod winit_adapter;

pub use commands::Command;
pub use editor::{AnimatorState, Editor, STATUS_QUEUE_CAPACITY, StatusLevel, StatusMessage};
pub use input::{ButtonState, InputEvent, Key, MouseButton, MouseButtons};

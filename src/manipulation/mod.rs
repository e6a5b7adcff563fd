//! Arcball manipulation
//!
//! Turns mouse drags into rigid edits of the picked node, the sky camera or
//! the current camera, depending on the [`ManipMode`] derived from the
//! session's [`InteractionState`].

pub mod arcball;
pub mod controller;
pub mod mode;

pub use arcball::{Arcball, arcball_direction};
pub use controller::do_m_to_o_wrt_a;
pub use mode::{InteractionState, ManipMode, SkyMode};

//! Drives the editor the way a user at the keyboard would: pick a robot,
//! pose it over a few keyframes, save the animation and play it back.
//!
//! Rendering is replaced by a tiny software pick renderer that stamps a
//! square of each shape's id colour around its projected centre.
//!
//! ```text
//! RUST_LOG=info cargo run -p robot_editor
//! ```

use std::time::Duration;

use anyhow::Context;
use armature::app::{ButtonState, InputEvent, Key, MouseButton};
use armature::picking::{PickBuffer, PickRenderer};
use armature::scene::presets::DemoAssets;
use armature::scene::{GeometryHandle, MaterialHandle, Projection, ShapeRenderer};
use armature::{Editor, EditorSettings, ManualClock};
use glam::{Mat4, Vec3};

const STAMP_HALF_SIZE: i32 = 4;

struct HeadlessRenderer {
    projection: Mat4,
    width: u32,
    height: u32,
    buffer: PickBuffer,
    shapes_drawn: usize,
}

impl HeadlessRenderer {
    fn new(projection: &Projection) -> Self {
        Self {
            projection: projection.matrix(),
            width: projection.width(),
            height: projection.height(),
            buffer: PickBuffer::new(projection.width(), projection.height()),
            shapes_drawn: 0,
        }
    }

    fn to_screen(&self, model_view: Mat4) -> Option<(i32, i32)> {
        let eye = model_view.transform_point3(Vec3::ZERO);
        if eye.z >= 0.0 {
            return None;
        }
        let ndc = self.projection.project_point3(eye);
        let x = (ndc.x + 1.0) * 0.5 * self.width as f32;
        let y = (ndc.y + 1.0) * 0.5 * self.height as f32;
        Some((x as i32, y as i32))
    }
}

impl ShapeRenderer for HeadlessRenderer {
    fn draw_shape(&mut self, _geometry: GeometryHandle, _material: MaterialHandle, _model_view: Mat4) {
        self.shapes_drawn += 1;
    }
}

impl PickRenderer for HeadlessRenderer {
    fn begin_pick(&mut self) {
        self.buffer.clear();
    }

    fn draw_pick(&mut self, _geometry: GeometryHandle, _id: u32, color: [u8; 4], model_view: Mat4) {
        let Some((cx, cy)) = self.to_screen(model_view) else {
            return;
        };
        for y in cy - STAMP_HALF_SIZE..=cy + STAMP_HALF_SIZE {
            for x in cx - STAMP_HALF_SIZE..=cx + STAMP_HALF_SIZE {
                self.buffer.write(x, y, color);
            }
        }
    }

    fn pick_buffer(&self) -> &PickBuffer {
        &self.buffer
    }
}

fn press(key: Key) -> [InputEvent; 2] {
    [
        InputEvent::Key {
            key,
            state: ButtonState::Pressed,
        },
        InputEvent::Key {
            key,
            state: ButtonState::Released,
        },
    ]
}

fn drag(button: MouseButton, from: (f32, f32), to: (f32, f32)) -> [InputEvent; 3] {
    [
        InputEvent::MouseButton {
            button,
            state: ButtonState::Pressed,
            x: from.0,
            y: from.1,
        },
        InputEvent::MouseMotion { x: to.0, y: to.1 },
        InputEvent::MouseButton {
            button,
            state: ButtonState::Released,
            x: to.0,
            y: to.1,
        },
    ]
}

fn main() -> anyhow::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let animation_file = std::env::temp_dir().join("robot_editor_animation.txt");
    let settings = EditorSettings {
        window_width: 640,
        window_height: 480,
        animation_file: animation_file.clone(),
        ..Default::default()
    };
    let clock = ManualClock::new();
    let mut editor = Editor::with_demo_scene(&DemoAssets::default(), settings, Box::new(clock.clone()))
        .context("building the demo scene")?;
    let mut renderer = HeadlessRenderer::new(editor.projection());

    // Find where robot 1's torso lands on screen, in window coordinates.
    let robot1 = editor.views()[1];
    let eye = editor.interaction().eye_rbt(editor.graph())?;
    let torso_eye = eye
        .inverse()
        .transform_point(editor.graph().world_transform(robot1)?.translation());
    let torso_gl = editor.projection().screen_space_coord(torso_eye);
    let torso = (torso_gl.x, editor.projection().height() as f32 - torso_gl.y - 1.0);

    let mut script = Vec::new();
    script.extend(press(Key::P));
    script.push(InputEvent::MouseButton {
        button: MouseButton::Left,
        state: ButtonState::Pressed,
        x: torso.0,
        y: torso.1,
    });
    for event in script.drain(..) {
        editor.handle_event(event)?;
    }
    if editor.pick_pending() {
        let picked = editor.pick(&mut renderer)?;
        log::info!("Picked {picked:?} (robot 1 is {robot1:?})");
    }
    editor.handle_event(InputEvent::MouseButton {
        button: MouseButton::Left,
        state: ButtonState::Released,
        x: torso.0,
        y: torso.1,
    })?;

    // Four poses: rest, then three successive arcball turns.
    script.extend(press(Key::U));
    for step in 0..3 {
        let offset = 30.0 + 10.0 * step as f32;
        script.extend(drag(MouseButton::Left, torso, (torso.0 + offset, torso.1)));
        script.extend(press(Key::N));
    }
    script.extend(press(Key::W));
    script.extend(press(Key::Y));
    for event in script.drain(..) {
        editor.handle_event(event)?;
    }

    while editor.playback().is_playing() {
        clock.advance(Duration::from_millis(16));
        editor.update()?;
    }
    editor.render(&mut renderer)?;

    for message in editor.drain_messages() {
        println!("{}", message.text);
    }
    println!(
        "{} keyframes, {} shapes drawn, animation saved to {}",
        editor.animator().len(),
        renderer.shapes_drawn,
        animation_file.display()
    );
    Ok(())
}

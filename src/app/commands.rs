//! Keyboard commands.
//!
//! | key | command |
//! |-----|---------|
//! | `h` | help |
//! | `p` | pick a part with the next left click |
//! | `v` | cycle view |
//! | `m` | toggle world-sky / sky-sky manipulation of the sky camera |
//! | `a` | toggle arcball display |
//! | `u` | copy scene to current keyframe (creates frame 0 when empty) |
//! | `n` | new keyframe after current, copied from scene |
//! | `c` | copy current keyframe to scene |
//! | `d` | delete current keyframe |
//! | `>` / `<` | next / previous keyframe |
//! | `w` / `i` | write / read the animation file |
//! | `+` / `-` | faster / slower playback |
//! | `y` | play / stop |
//! | `Esc` | quit |

use crate::animation::io::{load_animation, save_animation};
use crate::animation::{KeyframeCursor, MIN_PLAYBACK_KEYFRAMES};
use crate::app::editor::{AnimatorState, Editor};
use crate::app::input::Key;
use crate::errors::Result;
use crate::manipulation::SkyMode;

pub const HELP_TEXT: &str = " ============== H E L P ==============\n\n\
h\t\thelp menu\n\
p\t\tUse mouse to pick a part to edit\n\
v\t\tCycle view\n\
m\t\tToggle sky manipulation frame\n\
drag left mouse to rotate\n\
a\t\tToggle display arcball\n\
w\t\tWrite animation to file\n\
i\t\tRead animation from file\n\
c\t\tCopy frame to scene\n\
u\t\tCopy scene to frame\n\
n\t\tCreate new frame after current frame and copy scene to it\n\
d\t\tDelete frame\n\
>\t\tGo to next frame\n\
<\t\tGo to prev. frame\n\
+/-\t\tFaster / slower playback\n\
y\t\tPlay/Stop animation\n";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Command {
    Help,
    TogglePicking,
    CycleView,
    ToggleSkyMode,
    ToggleArcball,
    PullKeyframe,
    InsertKeyframe,
    PushKeyframe,
    DeleteKeyframe,
    NextKeyframe,
    PrevKeyframe,
    SaveAnimation,
    LoadAnimation,
    SpeedUp,
    SlowDown,
    TogglePlayback,
    Quit,
}

impl Command {
    #[must_use]
    pub fn from_key(key: Key) -> Option<Self> {
        let command = match key {
            Key::H => Self::Help,
            Key::P => Self::TogglePicking,
            Key::V => Self::CycleView,
            Key::M => Self::ToggleSkyMode,
            Key::A => Self::ToggleArcball,
            Key::U => Self::PullKeyframe,
            Key::N => Self::InsertKeyframe,
            Key::C => Self::PushKeyframe,
            Key::D => Self::DeleteKeyframe,
            Key::Greater => Self::NextKeyframe,
            Key::Less => Self::PrevKeyframe,
            Key::W => Self::SaveAnimation,
            Key::I => Self::LoadAnimation,
            Key::Plus => Self::SpeedUp,
            Key::Minus => Self::SlowDown,
            Key::Y => Self::TogglePlayback,
            Key::Escape => Self::Quit,
            _ => return None,
        };
        Some(command)
    }

    /// Commands that edit keyframes or the posed scene and are refused
    /// during playback.
    #[must_use]
    pub fn blocked_while_playing(self) -> bool {
        matches!(
            self,
            Self::PullKeyframe
                | Self::InsertKeyframe
                | Self::PushKeyframe
                | Self::DeleteKeyframe
                | Self::NextKeyframe
                | Self::PrevKeyframe
                | Self::LoadAnimation
        )
    }
}

impl Editor {
    pub(crate) fn handle_key(&mut self, key: Key) -> Result<()> {
        match Command::from_key(key) {
            Some(command) => self.execute(command),
            None => Ok(()),
        }
    }

    fn frame_label(&self, cursor: KeyframeCursor) -> String {
        self.animator
            .index_of(cursor)
            .map_or_else(|| "-".to_owned(), |i| i.to_string())
    }

    /// Runs one command. Refusals are reported as status messages.
    pub fn execute(&mut self, command: Command) -> Result<()> {
        if command.blocked_while_playing() && self.animator_state() == AnimatorState::Playing {
            self.warn("Cannot operate when playing animation");
            return Ok(());
        }

        match command {
            Command::Help => self.info(HELP_TEXT),
            Command::TogglePicking => {
                self.interaction.picking = !self.interaction.picking;
                self.info(format!(
                    "Picking mode is {}",
                    if self.interaction.picking { "on" } else { "off" }
                ));
            }
            Command::CycleView => self.cycle_view(),
            Command::ToggleSkyMode => {
                self.interaction.sky_mode = self.interaction.sky_mode.toggled();
                self.info(match self.interaction.sky_mode {
                    SkyMode::WorldSky => "Editing sky eye w.r.t. world-sky frame",
                    SkyMode::SkySky => "Editing sky eye w.r.t. sky-sky frame",
                });
            }
            Command::ToggleArcball => {
                self.interaction.display_arcball = !self.interaction.display_arcball;
            }
            Command::PullKeyframe => {
                if self.current.is_end() {
                    let pose = self.animator.capture(&self.graph)?;
                    self.current = self
                        .animator
                        .insert_frame_after(KeyframeCursor::END, pose)?;
                    self.info("Create new frame [0].");
                    self.info("Copying scene graph to current frame [0]");
                } else {
                    self.animator.pull_from_scene_graph(&self.graph, self.current)?;
                    self.info(format!(
                        "Copying scene graph to current frame [{}]",
                        self.frame_label(self.current)
                    ));
                }
            }
            Command::InsertKeyframe => {
                let pose = self.animator.capture(&self.graph)?;
                self.current = self.animator.insert_frame_after(self.current, pose)?;
                self.info(format!("Create new frame [{}]", self.frame_label(self.current)));
            }
            Command::PushKeyframe => {
                if self.current.is_end() {
                    self.warn("No key frame defined");
                } else {
                    self.info(format!(
                        "Loading current key frame [{}] to scene graph",
                        self.frame_label(self.current)
                    ));
                    self.animator.push_to_scene_graph(&mut self.graph, self.current)?;
                }
            }
            Command::DeleteKeyframe => self.delete_current()?,
            Command::NextKeyframe => {
                let next = self.animator.next(self.current);
                if !next.is_end() {
                    self.current = next;
                    self.animator.push_to_scene_graph(&mut self.graph, next)?;
                    self.info(format!("Stepped forward to frame [{}]", self.frame_label(next)));
                }
            }
            Command::PrevKeyframe => {
                let prev = self.animator.prev(self.current);
                if !prev.is_end() {
                    self.current = prev;
                    self.animator.push_to_scene_graph(&mut self.graph, prev)?;
                    self.info(format!("Stepped backward to frame [{}]", self.frame_label(prev)));
                }
            }
            Command::SaveAnimation => {
                let path = self.settings.animation_file.clone();
                self.info(format!("Writing animation to {}", path.display()));
                if let Err(err) = save_animation(&self.animator, &path) {
                    self.warn(format!("Could not write {}: {err}", path.display()));
                }
            }
            Command::LoadAnimation => self.load()?,
            Command::SpeedUp => {
                let ms = self.playback.speed_up();
                self.info(format!("{ms} ms between keyframes."));
            }
            Command::SlowDown => {
                let ms = self.playback.slow_down();
                self.info(format!("{ms} ms between keyframes."));
            }
            Command::TogglePlayback => self.toggle_playback()?,
            Command::Quit => self.quit_requested = true,
        }
        Ok(())
    }

    fn cycle_view(&mut self) {
        if self.views.is_empty() {
            return;
        }
        let next = self
            .views
            .iter()
            .position(|&v| v == self.interaction.current_camera)
            .map_or(0, |i| (i + 1) % self.views.len());
        self.interaction.current_camera = self.views[next];
        let name = self
            .graph
            .name(self.views[next])
            .unwrap_or("unnamed")
            .to_owned();
        self.info(format!("Viewing from {name}"));
    }

    fn delete_current(&mut self) -> Result<()> {
        if self.current.is_end() {
            self.warn("Frame list is now EMPTY");
            return Ok(());
        }
        self.info(format!(
            "Deleting current frame [{}]",
            self.frame_label(self.current)
        ));
        self.current = self.animator.delete(self.current);
        if self.current.is_end() {
            self.info("No frames defined");
        } else {
            self.animator.push_to_scene_graph(&mut self.graph, self.current)?;
            self.info(format!("Now at frame [{}]", self.frame_label(self.current)));
        }
        Ok(())
    }

    fn load(&mut self) -> Result<()> {
        let path = self.settings.animation_file.clone();
        self.info(format!("Reading animation from {}", path.display()));
        match load_animation(&mut self.animator, &path) {
            Ok(count) => {
                self.info(format!("{count} frames read."));
                self.current = self.animator.first();
                if !self.current.is_end() {
                    self.animator.push_to_scene_graph(&mut self.graph, self.current)?;
                    self.info("Now at frame [0]");
                }
            }
            Err(err) => self.warn(format!("Could not read {}: {err}", path.display())),
        }
        Ok(())
    }

    fn toggle_playback(&mut self) -> Result<()> {
        if self.playback.is_playing() {
            if !self.playback.stop_requested() {
                self.info("Stopping animation...");
                self.playback.request_stop();
            }
            return Ok(());
        }
        if self.animator.len() < MIN_PLAYBACK_KEYFRAMES {
            self.warn("Cannot play animation with less than 4 keyframes.");
            return Ok(());
        }
        let now = self.now();
        self.playback.start(&self.animator, now)?;
        self.info("Playing animation...");
        self.update()?;
        Ok(())
    }
}

//! Timed keyframe playback.
//!
//! Playback is a small state machine polled with the current time. Ticks
//! are scheduled on a fixed logical grid (`1000 / fps` ms apart, starting at
//! 0); each due tick evaluates `t = tick_ms / ms_between_keyframes`. When `t`
//! passes the last valid time, or a stop was requested, the tick that
//! notices it lands the scene on the second-to-last keyframe.

use std::time::Duration;

use crate::animation::animator::{Animator, MIN_PLAYBACK_KEYFRAMES};
use crate::animation::keyframes::KeyframeCursor;
use crate::errors::{ArmatureError, Result};
use crate::scene::SceneGraph;

pub const DEFAULT_MS_BETWEEN_KEYFRAMES: u32 = 2000;
pub const MIN_MS_BETWEEN_KEYFRAMES: u32 = 100;
pub const MAX_MS_BETWEEN_KEYFRAMES: u32 = 10_000;
pub const MS_BETWEEN_KEYFRAMES_STEP: u32 = 100;
pub const DEFAULT_FPS: u32 = 60;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlaybackState {
    Stopped,
    Playing,
}

/// Result of processing one tick.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PlaybackEvent {
    /// The scene was posed at time `t`.
    Frame { t: f32 },
    /// Playback ended; the scene shows the keyframe at `cursor`.
    Finished { cursor: KeyframeCursor },
}

#[derive(Debug, Clone)]
pub struct Playback {
    /// Cleared by a stop request; the scheduled tick still runs.
    playing: bool,
    /// Whether a tick is scheduled.
    active: bool,
    started_at: Duration,
    next_tick_ms: u64,
    ms_between_keyframes: u32,
    fps: u32,
}

impl Default for Playback {
    fn default() -> Self {
        Self::new(DEFAULT_MS_BETWEEN_KEYFRAMES, DEFAULT_FPS)
    }
}

impl Playback {
    #[must_use]
    pub fn new(ms_between_keyframes: u32, fps: u32) -> Self {
        Self {
            playing: false,
            active: false,
            started_at: Duration::ZERO,
            next_tick_ms: 0,
            ms_between_keyframes: ms_between_keyframes
                .clamp(MIN_MS_BETWEEN_KEYFRAMES, MAX_MS_BETWEEN_KEYFRAMES),
            fps: fps.max(1),
        }
    }

    /// `Playing` from [`start`](Self::start) until the finishing tick, even
    /// after a stop request.
    #[must_use]
    pub fn state(&self) -> PlaybackState {
        if self.active {
            PlaybackState::Playing
        } else {
            PlaybackState::Stopped
        }
    }

    #[must_use]
    pub fn is_playing(&self) -> bool {
        self.active
    }

    /// Whether a stop has been requested on a running playback.
    #[must_use]
    pub fn stop_requested(&self) -> bool {
        self.active && !self.playing
    }

    #[must_use]
    pub fn ms_between_keyframes(&self) -> u32 {
        self.ms_between_keyframes
    }

    #[must_use]
    pub fn fps(&self) -> u32 {
        self.fps
    }

    /// Spacing between scheduled ticks.
    #[must_use]
    pub fn frame_interval_ms(&self) -> u64 {
        u64::from((1000 / self.fps).max(1))
    }

    /// Plays faster: one step fewer milliseconds per keyframe.
    pub fn speed_up(&mut self) -> u32 {
        self.ms_between_keyframes = self
            .ms_between_keyframes
            .saturating_sub(MS_BETWEEN_KEYFRAMES_STEP)
            .max(MIN_MS_BETWEEN_KEYFRAMES);
        self.ms_between_keyframes
    }

    /// Plays slower: one step more milliseconds per keyframe.
    pub fn slow_down(&mut self) -> u32 {
        self.ms_between_keyframes = (self.ms_between_keyframes + MS_BETWEEN_KEYFRAMES_STEP)
            .min(MAX_MS_BETWEEN_KEYFRAMES);
        self.ms_between_keyframes
    }

    /// Starts playback at `now`; the first tick (t = 0) is due immediately.
    pub fn start(&mut self, animator: &Animator, now: Duration) -> Result<()> {
        let found = animator.len();
        if found < MIN_PLAYBACK_KEYFRAMES {
            return Err(ArmatureError::NotEnoughKeyframes { found });
        }
        self.playing = true;
        self.active = true;
        self.started_at = now;
        self.next_tick_ms = 0;
        Ok(())
    }

    /// Asks playback to stop. The next due tick still runs and then
    /// finishes.
    pub fn request_stop(&mut self) {
        self.playing = false;
    }

    /// Stops immediately without posing the scene.
    pub fn cancel(&mut self) {
        self.playing = false;
        self.active = false;
    }

    /// Runs every tick due at `now`. Returns the last event, if any tick ran.
    pub fn update(
        &mut self,
        now: Duration,
        animator: &Animator,
        graph: &mut SceneGraph,
    ) -> Result<Option<PlaybackEvent>> {
        let mut last = None;
        while self.active {
            let due = self.started_at + Duration::from_millis(self.next_tick_ms);
            if now < due {
                break;
            }
            last = Some(self.tick(animator, graph)?);
        }
        Ok(last)
    }

    fn tick(&mut self, animator: &Animator, graph: &mut SceneGraph) -> Result<PlaybackEvent> {
        let t = self.next_tick_ms as f32 / self.ms_between_keyframes as f32;
        let end_reached = t > animator.max_time();
        if !end_reached && let Err(err) = animator.animate(graph, t) {
            self.playing = false;
            self.active = false;
            return Err(err);
        }

        if self.playing && !end_reached {
            self.next_tick_ms += self.frame_interval_ms();
            return Ok(PlaybackEvent::Frame { t });
        }

        self.playing = false;
        self.active = false;
        let cursor = animator.nth(animator.len().saturating_sub(2));
        animator.push_to_scene_graph(graph, cursor)?;
        log::info!(
            "Playback finished at keyframe [{}]",
            animator.len().saturating_sub(2)
        );
        Ok(PlaybackEvent::Finished { cursor })
    }
}

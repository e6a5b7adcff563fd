use glam::Vec2;

use crate::animation::{Animator, KeyframeCursor, Playback, PlaybackEvent};
use crate::app::input::{ButtonState, InputEvent, Key, MouseButton, window_to_gl};
use crate::errors::Result;
use crate::manipulation::InteractionState;
use crate::picking::{self, PickRenderer};
use crate::scene::presets::{DemoAssets, build_demo_scene};
use crate::scene::{Drawer, NodeHandle, Projection, SceneGraph, ShapeRenderer};
use crate::settings::EditorSettings;
use crate::utils::time::Clock;

/// Coarse state of the keyframe animator as seen by the user.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AnimatorState {
    /// No keyframes.
    Empty,
    /// Keyframes exist and can be edited.
    Editing,
    /// Playback is running; keyframe edits are refused.
    Playing,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusLevel {
    Info,
    Warning,
}

/// Status messages kept when nobody drains the queue; older ones are dropped.
pub const STATUS_QUEUE_CAPACITY: usize = 256;

/// A user-facing message produced by the editor.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatusMessage {
    pub level: StatusLevel,
    pub text: String,
}

/// An interactive editing session over one scene graph.
///
/// The host feeds [`InputEvent`]s to [`handle_event`](Self::handle_event),
/// calls [`update`](Self::update) every frame to advance playback, and
/// draws with [`render`](Self::render). When
/// [`pick_pending`](Self::pick_pending) is set the host runs
/// [`pick`](Self::pick) with its pick renderer.
pub struct Editor {
    pub(crate) graph: SceneGraph,
    pub(crate) interaction: InteractionState,
    pub(crate) projection: Projection,
    pub(crate) animator: Animator,
    pub(crate) playback: Playback,
    pub(crate) current: KeyframeCursor,
    pub(crate) settings: EditorSettings,
    /// Nodes the view cycles through; the first is the sky camera.
    pub(crate) views: Vec<NodeHandle>,
    pub(crate) pick_pending: bool,
    pub(crate) quit_requested: bool,
    clock: Box<dyn Clock>,
    messages_tx: flume::Sender<StatusMessage>,
    messages_rx: flume::Receiver<StatusMessage>,
}

impl Editor {
    /// Starts a session on `graph`, viewing from `sky`.
    ///
    /// The animator tracks every transform node of the graph.
    pub fn new(
        graph: SceneGraph,
        sky: NodeHandle,
        ground: Option<NodeHandle>,
        settings: EditorSettings,
        clock: Box<dyn Clock>,
    ) -> Self {
        let settings = settings.validate();
        let mut interaction = InteractionState::new(sky, ground);
        interaction.sky_mode = settings.sky_mode;
        interaction.display_arcball = settings.display_arcball;
        interaction
            .arcball
            .resize(settings.window_width, settings.window_height);

        let projection = Projection::new(
            settings.min_fov_y_degrees,
            settings.near,
            settings.far,
            settings.window_width,
            settings.window_height,
        );

        let mut animator = Animator::new();
        animator.attach(&graph, graph.root());
        let current = animator.first();
        let playback = Playback::new(settings.ms_between_keyframes, settings.fps);
        let (messages_tx, messages_rx) = flume::bounded(STATUS_QUEUE_CAPACITY);

        Self {
            graph,
            interaction,
            projection,
            animator,
            playback,
            current,
            settings,
            views: vec![sky],
            pick_pending: false,
            quit_requested: false,
            clock,
            messages_tx,
            messages_rx,
        }
    }

    /// Starts a session on the two-robot demo scene. The view cycles
    /// sky, robot 1, robot 2.
    pub fn with_demo_scene(
        assets: &DemoAssets,
        settings: EditorSettings,
        clock: Box<dyn Clock>,
    ) -> Result<Self> {
        let demo = build_demo_scene(assets)?;
        let mut editor = Self::new(demo.graph, demo.sky, Some(demo.ground), settings, clock);
        editor.views = vec![demo.sky, demo.robot1, demo.robot2];
        Ok(editor)
    }

    // ========================================================================
    // Accessors
    // ========================================================================

    #[must_use]
    pub fn graph(&self) -> &SceneGraph {
        &self.graph
    }

    /// Mutable access for transform edits.
    ///
    /// Adding or removing nodes through this reference leaves the animator
    /// and the interaction state stale; use [`edit_graph`](Self::edit_graph)
    /// for structural edits, or call [`reattach`](Self::reattach) afterwards.
    pub fn graph_mut(&mut self) -> &mut SceneGraph {
        &mut self.graph
    }

    /// Runs a structural edit on the graph, then [`reattach`](Self::reattach)es.
    pub fn edit_graph<T>(&mut self, edit: impl FnOnce(&mut SceneGraph) -> T) -> T {
        let out = edit(&mut self.graph);
        self.reattach();
        out
    }

    /// Resynchronizes the session with the graph after nodes were added or
    /// removed.
    ///
    /// Playback is cancelled, the animator re-tracks every transform node and
    /// drops its keyframes, and handles the graph no longer contains are
    /// cleared: the selection, the ground, removed views, and the current
    /// camera (which falls back to the sky camera, or to the first remaining
    /// view when the sky camera itself is gone).
    pub fn reattach(&mut self) {
        self.playback.cancel();
        self.animator.attach(&self.graph, self.graph.root());
        self.current = KeyframeCursor::END;

        let graph = &self.graph;
        self.views.retain(|&v| graph.contains(v));
        let interaction = &mut self.interaction;
        if interaction.selection.is_some_and(|n| !graph.contains(n)) {
            interaction.selection = None;
        }
        if interaction.ground.is_some_and(|n| !graph.contains(n)) {
            interaction.ground = None;
        }
        if !graph.contains(interaction.sky)
            && let Some(&first) = self.views.first()
        {
            interaction.sky = first;
        }
        if !graph.contains(interaction.current_camera) {
            interaction.current_camera = interaction.sky;
        }
        self.pick_pending = false;

        self.info(format!(
            "Scene changed, tracking {} nodes. Frame list is now EMPTY",
            self.animator.node_count()
        ));
    }

    #[must_use]
    pub fn interaction(&self) -> &InteractionState {
        &self.interaction
    }

    pub fn interaction_mut(&mut self) -> &mut InteractionState {
        &mut self.interaction
    }

    #[must_use]
    pub fn projection(&self) -> &Projection {
        &self.projection
    }

    #[must_use]
    pub fn animator(&self) -> &Animator {
        &self.animator
    }

    #[must_use]
    pub fn playback(&self) -> &Playback {
        &self.playback
    }

    #[must_use]
    pub fn settings(&self) -> &EditorSettings {
        &self.settings
    }

    /// Cursor of the keyframe being edited.
    #[must_use]
    pub fn current_keyframe(&self) -> KeyframeCursor {
        self.current
    }

    /// Index of the keyframe being edited, `None` when there is none.
    #[must_use]
    pub fn current_keyframe_index(&self) -> Option<usize> {
        self.animator.index_of(self.current)
    }

    #[must_use]
    pub fn views(&self) -> &[NodeHandle] {
        &self.views
    }

    /// Replaces the list of nodes the `v` command cycles through.
    pub fn set_views(&mut self, views: Vec<NodeHandle>) {
        self.views = views;
    }

    #[must_use]
    pub fn animator_state(&self) -> AnimatorState {
        if self.playback.is_playing() {
            AnimatorState::Playing
        } else if self.animator.is_empty() {
            AnimatorState::Empty
        } else {
            AnimatorState::Editing
        }
    }

    #[must_use]
    pub fn pick_pending(&self) -> bool {
        self.pick_pending
    }

    #[must_use]
    pub fn quit_requested(&self) -> bool {
        self.quit_requested
    }

    // ========================================================================
    // Messages
    // ========================================================================

    /// A receiver for status messages. All receivers share one queue.
    ///
    /// The queue holds at most [`STATUS_QUEUE_CAPACITY`] messages; when it is
    /// full the oldest message is discarded to make room. Every message is
    /// also written to the log.
    #[must_use]
    pub fn messages(&self) -> flume::Receiver<StatusMessage> {
        self.messages_rx.clone()
    }

    /// Takes every queued status message, oldest first.
    pub fn drain_messages(&self) -> Vec<StatusMessage> {
        self.messages_rx.try_iter().collect()
    }

    pub(crate) fn info(&self, text: impl Into<String>) {
        let text = text.into();
        log::info!("{text}");
        self.post(StatusMessage {
            level: StatusLevel::Info,
            text,
        });
    }

    pub(crate) fn warn(&self, text: impl Into<String>) {
        let text = text.into();
        log::warn!("{text}");
        self.post(StatusMessage {
            level: StatusLevel::Warning,
            text,
        });
    }

    fn post(&self, mut message: StatusMessage) {
        loop {
            match self.messages_tx.try_send(message) {
                Err(flume::TrySendError::Full(rejected)) => {
                    let _ = self.messages_rx.try_recv();
                    message = rejected;
                }
                Ok(()) | Err(flume::TrySendError::Disconnected(_)) => return,
            }
        }
    }

    // ========================================================================
    // Frame loop
    // ========================================================================

    /// Dispatches one input event.
    ///
    /// Errors are structural (a manipulated node vanished from the graph);
    /// rejected user commands are reported as status messages instead.
    pub fn handle_event(&mut self, event: InputEvent) -> Result<()> {
        match event {
            InputEvent::MouseButton {
                button,
                state,
                x,
                y,
            } => {
                self.interaction.last_click = self.to_gl(x, y);
                self.interaction.buttons.apply(button, state);
                if self.interaction.picking
                    && button == MouseButton::Left
                    && state == ButtonState::Pressed
                {
                    self.pick_pending = true;
                }
                self.interaction
                    .update_arcball_scale(&self.graph, &self.projection)?;
            }
            InputEvent::MouseMotion { x, y } => {
                let cursor = self.to_gl(x, y);
                if self
                    .interaction
                    .drag_to(&mut self.graph, &self.projection, cursor)?
                    .is_some()
                {
                    self.interaction
                        .update_arcball_scale(&self.graph, &self.projection)?;
                }
            }
            InputEvent::Key { key, state } => match (key, state) {
                (Key::Space, ButtonState::Pressed) => self.interaction.space_down = true,
                (Key::Space, ButtonState::Released) => self.interaction.space_down = false,
                (key, ButtonState::Pressed) => self.handle_key(key)?,
                (_, ButtonState::Released) => {}
            },
            InputEvent::Resized { width, height } => self.resize(width, height),
        }
        Ok(())
    }

    fn to_gl(&self, x: f32, y: f32) -> Vec2 {
        window_to_gl(x, y, self.projection.height())
    }

    /// Applies a new viewport size.
    pub fn resize(&mut self, width: u32, height: u32) {
        self.projection.resize(width, height);
        self.interaction.arcball.resize(width, height);
        log::info!("Size of window is now {width}x{height}");
    }

    /// Advances playback to the clock's current time and refreshes the
    /// arcball scale.
    pub fn update(&mut self) -> Result<Option<PlaybackEvent>> {
        let now = self.clock.now();
        let event = match self.playback.update(now, &self.animator, &mut self.graph) {
            Ok(event) => event,
            Err(err) => {
                self.warn(format!("Playback stopped: {err}"));
                return Err(err);
            }
        };
        if let Some(PlaybackEvent::Finished { cursor }) = event {
            self.current = cursor;
            if let Some(i) = self.animator.index_of(cursor) {
                self.info(format!("Now at frame [{i}]"));
            }
        }
        self.interaction
            .update_arcball_scale(&self.graph, &self.projection)?;
        Ok(event)
    }

    /// Draws the scene from the current camera, then the arcball when shown.
    pub fn render<R: ShapeRenderer + ?Sized>(&self, renderer: &mut R) -> Result<()> {
        let eye = self.interaction.eye_rbt(&self.graph)?;
        let mut drawer = Drawer::new(&eye, renderer);
        self.graph.accept(&mut drawer);
        if let Some(model_view) = self.interaction.arcball_model_view(&self.graph)? {
            renderer.draw_arcball(model_view);
        }
        Ok(())
    }

    /// Runs the pick pass at the last click and updates the selection.
    /// Leaves picking mode.
    pub fn pick<R: PickRenderer + ?Sized>(&mut self, renderer: &mut R) -> Result<Option<NodeHandle>> {
        let eye = self.interaction.eye_rbt(&self.graph)?;
        let click = self.interaction.last_click;
        let picked = picking::pick(
            &self.graph,
            &eye,
            renderer,
            click.x.round() as i32,
            click.y.round() as i32,
            self.interaction.ground,
        );
        self.interaction.selection = picked;
        self.interaction.picking = false;
        self.pick_pending = false;
        self.info(if picked.is_some() {
            "Part picked"
        } else {
            "No part picked"
        });
        self.info("Picking mode is off");
        self.interaction
            .update_arcball_scale(&self.graph, &self.projection)?;
        Ok(picked)
    }

    pub(crate) fn now(&self) -> std::time::Duration {
        self.clock.now()
    }
}

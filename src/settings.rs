//! Editor Settings
//!
//! [`EditorSettings`] gathers the tunables of an editing session: viewport,
//! projection, playback timing and the animation file location. Settings can
//! be built in code or read from JSON; missing fields take their defaults.
//!
//! ```rust,ignore
//! use armature::settings::EditorSettings;
//!
//! let settings = EditorSettings {
//!     ms_between_keyframes: 1000,
//!     ..Default::default()
//! };
//!
//! let from_disk = EditorSettings::load("editor.json")?;
//! ```

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::animation::io::DEFAULT_ANIMATION_FILE;
use crate::animation::playback::{
    DEFAULT_FPS, DEFAULT_MS_BETWEEN_KEYFRAMES, MAX_MS_BETWEEN_KEYFRAMES, MIN_MS_BETWEEN_KEYFRAMES,
};
use crate::errors::Result;
use crate::manipulation::SkyMode;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EditorSettings {
    // === Viewport ===
    /// Initial viewport width in pixels.
    pub window_width: u32,

    /// Initial viewport height in pixels.
    pub window_height: u32,

    // === Projection ===
    /// Smallest field of view, in degrees, along either screen axis.
    ///
    /// Landscape viewports use it as the vertical fov; portrait viewports
    /// widen the vertical fov so the horizontal one stays at this value.
    pub min_fov_y_degrees: f32,

    /// Near clip distance (positive).
    pub near: f32,

    /// Far clip distance (positive).
    pub far: f32,

    // === Manipulation ===
    /// Frame the sky camera is manipulated about at startup.
    pub sky_mode: SkyMode,

    /// Draw the arcball sphere while it is in use.
    pub display_arcball: bool,

    // === Playback ===
    /// Playback time between consecutive keyframes.
    ///
    /// Clamped to `[100, 10000]`.
    pub ms_between_keyframes: u32,

    /// Playback ticks per second.
    pub fps: u32,

    // === Files ===
    /// File used by the save (`w`) and load (`i`) commands.
    pub animation_file: PathBuf,
}

impl Default for EditorSettings {
    fn default() -> Self {
        Self {
            window_width: 1300,
            window_height: 512,
            min_fov_y_degrees: 60.0,
            near: 0.1,
            far: 50.0,
            sky_mode: SkyMode::WorldSky,
            display_arcball: true,
            ms_between_keyframes: DEFAULT_MS_BETWEEN_KEYFRAMES,
            fps: DEFAULT_FPS,
            animation_file: PathBuf::from(DEFAULT_ANIMATION_FILE),
        }
    }
}

impl EditorSettings {
    /// Parses settings from JSON and validates them.
    pub fn from_json_str(json: &str) -> Result<Self> {
        let settings: Self = serde_json::from_str(json)?;
        Ok(settings.validate())
    }

    /// Reads settings from a JSON file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let text = std::fs::read_to_string(path)?;
        Self::from_json_str(&text)
    }

    pub fn to_json_string(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Clamps every field into its usable range.
    #[must_use]
    pub fn validate(mut self) -> Self {
        let defaults = Self::default();
        self.window_width = self.window_width.max(1);
        self.window_height = self.window_height.max(1);
        if !(self.min_fov_y_degrees > 0.0 && self.min_fov_y_degrees < 180.0) {
            log::warn!(
                "min_fov_y_degrees {} out of range, using {}",
                self.min_fov_y_degrees,
                defaults.min_fov_y_degrees
            );
            self.min_fov_y_degrees = defaults.min_fov_y_degrees;
        }
        if !(self.near > 0.0 && self.far > self.near) {
            log::warn!("Invalid clip range [{}, {}], using defaults", self.near, self.far);
            self.near = defaults.near;
            self.far = defaults.far;
        }
        self.ms_between_keyframes = self
            .ms_between_keyframes
            .clamp(MIN_MS_BETWEEN_KEYFRAMES, MAX_MS_BETWEEN_KEYFRAMES);
        self.fps = self.fps.clamp(1, 1000);
        self
    }
}

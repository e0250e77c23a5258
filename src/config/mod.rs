//! Persistent settings for playback and overlay rendering.
//!
//! Settings live in `config.toml` inside the app root. Every key has a default, so a missing
//! file or a partial file both load cleanly.

mod defaults;
mod error;
mod io;

use serde::{Deserialize, Serialize};

use defaults::{
    clamp_border_thickness, clamp_visibility, default_border_color, default_border_thickness_px,
    default_hold_number_frequency_hz, default_min_landmark_visibility,
    default_target_frequency_hz, default_vector_scale, sanitize_frequency, sanitize_scale,
};

pub use defaults::MAX_BORDER_THICKNESS_PX;
pub use error::ConfigError;
pub use io::{CONFIG_FILE_NAME, config_path, load_from, load_or_default, save, save_to_path};

/// Config keys (TOML): `playback`, `overlay`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AppSettings {
    #[serde(default)]
    pub playback: PlaybackSettings,
    #[serde(default)]
    pub overlay: OverlaySettings,
}

impl AppSettings {
    /// Replace out-of-range values with usable ones.
    pub fn normalized(mut self) -> Self {
        self.playback.target_frequency_hz = sanitize_frequency(
            self.playback.target_frequency_hz,
            default_target_frequency_hz(),
        );
        self.playback.hold_number_frequency_hz = sanitize_frequency(
            self.playback.hold_number_frequency_hz,
            default_hold_number_frequency_hz(),
        );
        self.playback.min_landmark_visibility =
            clamp_visibility(self.playback.min_landmark_visibility);
        self.overlay.border_thickness_px = clamp_border_thickness(self.overlay.border_thickness_px);
        self.overlay.vector_scale = sanitize_scale(self.overlay.vector_scale);
        self
    }
}

/// Config keys: `target_frequency_hz`, `hold_number_frequency_hz`, `min_landmark_visibility`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlaybackSettings {
    /// Display rate every playback is resampled to.
    #[serde(default = "default_target_frequency_hz")]
    pub target_frequency_hz: f64,
    #[serde(default = "default_hold_number_frequency_hz")]
    pub hold_number_frequency_hz: f64,
    /// Pose landmarks below this visibility are hidden.
    #[serde(default = "default_min_landmark_visibility")]
    pub min_landmark_visibility: f64,
}

impl Default for PlaybackSettings {
    fn default() -> Self {
        Self {
            target_frequency_hz: default_target_frequency_hz(),
            hold_number_frequency_hz: default_hold_number_frequency_hz(),
            min_landmark_visibility: default_min_landmark_visibility(),
        }
    }
}

/// Config keys: `border_thickness_px`, `border_color`, `vector_scale`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OverlaySettings {
    #[serde(default = "default_border_thickness_px")]
    pub border_thickness_px: u32,
    /// RGB; outlines are always drawn opaque.
    #[serde(default = "default_border_color")]
    pub border_color: [u8; 3],
    /// Pixels per force unit for hold vector arrows.
    #[serde(default = "default_vector_scale")]
    pub vector_scale: f64,
}

impl Default for OverlaySettings {
    fn default() -> Self {
        Self {
            border_thickness_px: default_border_thickness_px(),
            border_color: default_border_color(),
            vector_scale: default_vector_scale(),
        }
    }
}

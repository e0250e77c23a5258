//! Playback resampling, hold outline rasterization and hold numbering for betaboard
//! recording overlays.
//!
//! The core modules are pure and synchronous. Only [`config`], [`logging`] and the CLI touch
//! the file system.

/// Locations of the app config and log folders.
pub mod app_dirs;
/// Persistent settings.
pub mod config;
/// Wall geometry shared by holds and overlays.
pub mod geometry;
/// Tracing setup.
pub mod logging;
/// Route, recording and analysis payloads.
pub mod model;
/// Stable hold numbering for overlay labels.
pub mod numbering;
/// Hold border rasterization and PNG encoding.
pub mod overlay;
/// Time series playbacks and resampling.
pub mod playback;

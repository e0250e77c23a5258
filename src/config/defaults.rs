use crate::geometry::DEFAULT_VECTOR_SCALE;
use crate::numbering::HOLD_NUMBER_FREQUENCY_HZ;
use crate::overlay::{DEFAULT_BORDER_COLOR, DEFAULT_BORDER_THICKNESS_PX};
use crate::playback::{DEFAULT_MIN_LANDMARK_VISIBILITY, OVERLAY_FRAME_RATE_HZ};

pub const MAX_BORDER_THICKNESS_PX: u32 = 64;

pub(super) fn default_target_frequency_hz() -> f64 {
    OVERLAY_FRAME_RATE_HZ
}

pub(super) fn default_hold_number_frequency_hz() -> f64 {
    HOLD_NUMBER_FREQUENCY_HZ
}

pub(super) fn default_min_landmark_visibility() -> f64 {
    DEFAULT_MIN_LANDMARK_VISIBILITY
}

pub(super) fn default_border_thickness_px() -> u32 {
    DEFAULT_BORDER_THICKNESS_PX
}

pub(super) fn default_border_color() -> [u8; 3] {
    DEFAULT_BORDER_COLOR
}

pub(super) fn default_vector_scale() -> f64 {
    DEFAULT_VECTOR_SCALE
}

/// Keep a positive finite frequency, otherwise fall back to `default`.
pub(super) fn sanitize_frequency(value: f64, default: f64) -> f64 {
    if value.is_finite() && value > 0.0 {
        value
    } else {
        default
    }
}

pub(super) fn clamp_border_thickness(value: u32) -> u32 {
    value.min(MAX_BORDER_THICKNESS_PX)
}

pub(super) fn clamp_visibility(value: f64) -> f64 {
    if value.is_nan() {
        return default_min_landmark_visibility();
    }
    value.clamp(0.0, 1.0)
}

pub(super) fn sanitize_scale(value: f64) -> f64 {
    if value.is_finite() {
        value
    } else {
        default_vector_scale()
    }
}

mod error;
mod frames;
mod kinematics;
mod prepared;
mod resample;
mod sample;
mod sensors;

use serde::{Deserialize, Serialize};

pub use error::{FrequencyRole, ResampleError};
pub use frames::{frame_at_time, frame_count, frame_time_seconds};
pub use kinematics::{
    DEFAULT_MIN_LANDMARK_VISIBILITY, KinematicsFrame, KinematicsMetadata, KinematicsPlayback,
    POSE_CONNECTIONS, PoseLandmark, Resolution, resample_kinematics, skeleton_segments,
};
pub use prepared::PreparedPlayback;
pub use resample::{MAX_UPSAMPLE_FACTOR, Resampler, resample, resample_sequence};
pub use sample::{HoldAnnotation, HoldVector, Interpolate, Sample};
pub use sensors::{SENSOR_FREQUENCY_HZ, SensorReading, SensorReadingFrame, sensor_playbacks};

/// Frame rate the overlay is rendered at.
pub const OVERLAY_FRAME_RATE_HZ: f64 = 100.0;

/// Samples of a playback: one value for the whole session or one value per source frame.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Samples<T> {
    TimeVarying(Vec<T>),
    Constant(T),
}

impl<T> Samples<T> {
    pub fn is_constant(&self) -> bool {
        matches!(self, Samples::Constant(_))
    }

    /// The per-frame values, or `None` for a constant.
    pub fn as_slice(&self) -> Option<&[T]> {
        match self {
            Samples::TimeVarying(samples) => Some(samples),
            Samples::Constant(_) => None,
        }
    }

    /// Value shown at `frame`; constants apply to every frame.
    pub fn frame_at(&self, frame: usize) -> Option<&T> {
        match self {
            Samples::TimeVarying(samples) => samples.get(frame),
            Samples::Constant(value) => Some(value),
        }
    }
}

/// A time series of per-hold values captured at `frequency_hz`.
///
/// Wire keys follow the backend payload: `hold_id`, `frequency`, `data`.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Playback<T> {
    #[serde(rename = "hold_id")]
    pub subject_id: String,
    #[serde(rename = "frequency")]
    pub frequency_hz: f64,
    #[serde(rename = "data")]
    pub samples: Samples<T>,
}

impl<T> Playback<T> {
    pub fn new(subject_id: impl Into<String>, frequency_hz: f64, samples: Samples<T>) -> Self {
        Self {
            subject_id: subject_id.into(),
            frequency_hz,
            samples,
        }
    }

    pub fn constant(subject_id: impl Into<String>, frequency_hz: f64, value: T) -> Self {
        Self::new(subject_id, frequency_hz, Samples::Constant(value))
    }

    pub fn time_varying(subject_id: impl Into<String>, frequency_hz: f64, values: Vec<T>) -> Self {
        Self::new(subject_id, frequency_hz, Samples::TimeVarying(values))
    }

    pub fn frame_at(&self, frame: usize) -> Option<&T> {
        self.samples.frame_at(frame)
    }

    /// Number of per-frame samples; `None` for a constant playback.
    pub fn sample_count(&self) -> Option<usize> {
        self.samples.as_slice().map(<[T]>::len)
    }
}

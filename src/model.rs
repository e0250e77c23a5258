//! Backend payloads consumed by the overlay core.
//!
//! Only the fields the core reads are modeled; unknown keys are ignored on decode.

use serde::{Deserialize, Serialize};

use crate::geometry::{BoundingBox, Point};
use crate::overlay::{HoldMask, MaskError};
use crate::playback::{
    HoldAnnotation, HoldVector, KinematicsPlayback, Playback, SENSOR_FREQUENCY_HZ,
    SensorReadingFrame, sensor_playbacks,
};

/// A detected climbing hold on a wall photo.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Hold {
    pub id: String,
    pub bbox: BoundingBox,
    /// Pixel footprint inside `bbox`, row-major.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mask: Option<Vec<Vec<bool>>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub centroid_x: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub centroid_y: Option<f64>,
}

impl Hold {
    pub fn new(id: impl Into<String>, bbox: BoundingBox, mask: Option<Vec<Vec<bool>>>) -> Self {
        Self {
            id: id.into(),
            bbox,
            mask,
            centroid_x: None,
            centroid_y: None,
        }
    }

    pub fn footprint(&self) -> HoldMask<'_> {
        HoldMask::new(self.bbox, self.mask.as_deref())
    }

    /// Backend-provided centroid, or one computed from the footprint.
    pub fn centroid(&self) -> Result<Point, MaskError> {
        match (self.centroid_x, self.centroid_y) {
            (Some(x), Some(y)) => Ok(Point::new(x, y)),
            _ => self.footprint().centroid(),
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RecordingStatus {
    Recording,
    Completed,
    Failed,
}

/// A capture session of one route attempt.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Recording {
    pub id: String,
    pub route_id: String,
    pub start_time: String,
    #[serde(default)]
    pub end_time: Option<String>,
    #[serde(default)]
    pub sensor_readings: Vec<SensorReadingFrame>,
    #[serde(default)]
    pub video_s3_key: Option<String>,
    pub status: RecordingStatus,
}

impl Recording {
    /// Sensor readings as one vector playback per hold at the sensor rate.
    pub fn sensor_playbacks(&self) -> Vec<Playback<HoldVector>> {
        sensor_playbacks(&self.sensor_readings, SENSOR_FREQUENCY_HZ)
    }
}

/// Playbacks backing one analysis visualization.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct VisualizationData {
    #[serde(default)]
    pub vector_playbacks: Vec<Playback<HoldVector>>,
    #[serde(default)]
    pub annotation_playbacks: Vec<Playback<HoldAnnotation>>,
    /// Chart description, passed through untouched.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub plot: Option<serde_json::Value>,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Visualizations {
    #[serde(default)]
    pub load_time_series: VisualizationData,
    #[serde(default)]
    pub load_distribution: VisualizationData,
    #[serde(default)]
    pub load_stability: VisualizationData,
}

/// Per-recording analysis results.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct RecordingAnalysis {
    #[serde(default)]
    pub ai_summary: String,
    #[serde(default)]
    pub visualizations: Visualizations,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub kinematics: Option<KinematicsPlayback>,
}

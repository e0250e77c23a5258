//! Pose kinematics frames and their resampling to the overlay rate.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use super::ResampleError;
use super::resample::resample_sequence;
use super::sample::{Interpolate, lerp};

/// Landmarks below this visibility are not drawn.
pub const DEFAULT_MIN_LANDMARK_VISIBILITY: f64 = 0.5;

/// Landmark pairs joined by a bone when drawing the skeleton.
pub const POSE_CONNECTIONS: [(&str, &str); 12] = [
    ("left_shoulder", "right_shoulder"),
    ("left_shoulder", "left_hip"),
    ("right_shoulder", "right_hip"),
    ("left_hip", "right_hip"),
    ("left_shoulder", "left_elbow"),
    ("left_elbow", "left_wrist"),
    ("right_shoulder", "right_elbow"),
    ("right_elbow", "right_wrist"),
    ("left_hip", "left_knee"),
    ("left_knee", "left_ankle"),
    ("right_hip", "right_knee"),
    ("right_knee", "right_ankle"),
];

/// A body landmark in normalized image coordinates.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct PoseLandmark {
    pub x: f64,
    pub y: f64,
    pub z: f64,
    pub visibility: f64,
}

impl Interpolate for PoseLandmark {
    fn interpolate(&self, next: &Self, t: f64) -> Self {
        Self {
            x: lerp(self.x, next.x, t),
            y: lerp(self.y, next.y, t),
            z: lerp(self.z, next.z, t),
            visibility: lerp(self.visibility, next.visibility, t),
        }
    }
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct KinematicsFrame {
    pub timestamp: f64,
    pub landmarks: BTreeMap<String, PoseLandmark>,
}

impl Interpolate for KinematicsFrame {
    /// Landmarks missing from `next` are held at their current position.
    fn interpolate(&self, next: &Self, t: f64) -> Self {
        let landmarks = self
            .landmarks
            .iter()
            .map(|(name, landmark)| {
                let blended = match next.landmarks.get(name) {
                    Some(target) => landmark.interpolate(target, t),
                    None => *landmark,
                };
                (name.clone(), blended)
            })
            .collect();
        Self {
            timestamp: lerp(self.timestamp, next.timestamp, t),
            landmarks,
        }
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Resolution {
    pub width: u32,
    pub height: u32,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct KinematicsMetadata {
    pub frame_count: usize,
    /// Clip length in seconds.
    pub duration: f64,
    pub fps: f64,
    pub resolution: Resolution,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct KinematicsPlayback {
    pub frames: Vec<KinematicsFrame>,
    pub metadata: KinematicsMetadata,
}

/// Resample pose frames from `metadata.fps` to `target_frequency_hz`.
pub fn resample_kinematics(
    playback: &KinematicsPlayback,
    target_frequency_hz: f64,
) -> Result<KinematicsPlayback, ResampleError> {
    let frames = resample_sequence(
        &playback.frames,
        playback.metadata.fps,
        target_frequency_hz,
    )?;
    Ok(KinematicsPlayback {
        metadata: KinematicsMetadata {
            frame_count: frames.len(),
            fps: target_frequency_hz,
            ..playback.metadata.clone()
        },
        frames,
    })
}

/// Bones whose two landmarks are both present and at least `min_visibility` visible.
pub fn skeleton_segments(
    frame: &KinematicsFrame,
    min_visibility: f64,
) -> Vec<(&PoseLandmark, &PoseLandmark)> {
    POSE_CONNECTIONS
        .iter()
        .filter_map(|(start, end)| {
            let start = frame.landmarks.get(*start)?;
            let end = frame.landmarks.get(*end)?;
            (start.visibility >= min_visibility && end.visibility >= min_visibility)
                .then_some((start, end))
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn landmark(x: f64, visibility: f64) -> PoseLandmark {
        PoseLandmark {
            x,
            y: x / 2.0,
            z: 0.0,
            visibility,
        }
    }

    fn frame(timestamp: f64, entries: &[(&str, PoseLandmark)]) -> KinematicsFrame {
        KinematicsFrame {
            timestamp,
            landmarks: entries
                .iter()
                .map(|(name, lm)| (name.to_string(), *lm))
                .collect(),
        }
    }

    #[test]
    fn frames_blend_shared_landmarks_and_hold_missing_ones() {
        let a = frame(
            0.0,
            &[("left_wrist", landmark(0.0, 1.0)), ("nose", landmark(0.4, 1.0))],
        );
        let b = frame(1.0, &[("left_wrist", landmark(1.0, 0.0))]);
        let mid = a.interpolate(&b, 0.5);
        assert_eq!(mid.timestamp, 0.5);
        assert_eq!(mid.landmarks["left_wrist"].x, 0.5);
        assert_eq!(mid.landmarks["left_wrist"].visibility, 0.5);
        assert_eq!(mid.landmarks["nose"], landmark(0.4, 1.0));
    }

    #[test]
    fn kinematics_upsample_updates_metadata() {
        let playback = KinematicsPlayback {
            frames: vec![
                frame(0.0, &[("nose", landmark(0.0, 1.0))]),
                frame(0.04, &[("nose", landmark(1.0, 1.0))]),
            ],
            metadata: KinematicsMetadata {
                frame_count: 2,
                duration: 0.04,
                fps: 25.0,
                resolution: Resolution {
                    width: 1280,
                    height: 720,
                },
            },
        };
        let out = resample_kinematics(&playback, 100.0).unwrap();
        assert_eq!(out.frames.len(), 5);
        assert_eq!(out.metadata.frame_count, 5);
        assert_eq!(out.metadata.fps, 100.0);
        assert_eq!(out.metadata.duration, 0.04);
        assert_eq!(out.metadata.resolution.width, 1280);
        assert_eq!(out.frames[2].landmarks["nose"].x, 0.5);
    }

    #[test]
    fn kinematics_with_missing_fps_is_an_error() {
        let playback = KinematicsPlayback::default();
        assert!(resample_kinematics(&playback, 100.0).is_err());
    }

    #[test]
    fn skeleton_skips_hidden_or_missing_landmarks() {
        let frame = frame(
            0.0,
            &[
                ("left_shoulder", landmark(0.1, 0.9)),
                ("right_shoulder", landmark(0.3, 0.9)),
                ("left_elbow", landmark(0.2, 0.2)),
            ],
        );
        let segments = skeleton_segments(&frame, DEFAULT_MIN_LANDMARK_VISIBILITY);
        assert_eq!(segments.len(), 1);
        assert_eq!(segments[0].0.x, 0.1);
        assert_eq!(segments[0].1.x, 0.3);
    }
}

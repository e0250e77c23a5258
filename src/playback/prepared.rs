use std::collections::HashMap;

use tracing::debug;

use super::{HoldAnnotation, HoldVector, Playback, ResampleError, Resampler, frame_count};
use crate::model::VisualizationData;

/// Playbacks of one visualization resampled once to the display rate, keyed by hold id.
///
/// Build this when an analysis payload arrives and keep it for the whole session; per-frame
/// lookups are then plain map and slice accesses.
#[derive(Clone, Debug, Default)]
pub struct PreparedPlayback {
    target_frequency_hz: f64,
    frame_count: usize,
    vectors: HashMap<String, Playback<HoldVector>>,
    annotations: HashMap<String, Playback<HoldAnnotation>>,
}

impl PreparedPlayback {
    pub fn prepare(
        data: &VisualizationData,
        resampler: &Resampler,
    ) -> Result<Self, ResampleError> {
        let vectors = resampler.resample_all(&data.vector_playbacks)?;
        let annotations = resampler.resample_all(&data.annotation_playbacks)?;
        let frame_count = frame_count(&vectors).max(frame_count(&annotations));
        debug!(
            vectors = vectors.len(),
            annotations = annotations.len(),
            frame_count,
            target_hz = resampler.target_frequency_hz(),
            "Prepared playback"
        );
        Ok(Self {
            target_frequency_hz: resampler.target_frequency_hz(),
            frame_count,
            vectors: key_by_subject(vectors),
            annotations: key_by_subject(annotations),
        })
    }

    pub fn target_frequency_hz(&self) -> f64 {
        self.target_frequency_hz
    }

    /// Frames needed to play the longest time-varying playback to its end.
    pub fn frame_count(&self) -> usize {
        self.frame_count
    }

    pub fn duration_seconds(&self) -> f64 {
        super::frame_time_seconds(self.frame_count, self.target_frequency_hz)
    }

    pub fn vector_at(&self, hold_id: &str, frame: usize) -> Option<&HoldVector> {
        self.vectors.get(hold_id)?.frame_at(frame)
    }

    pub fn annotation_at(&self, hold_id: &str, frame: usize) -> Option<&HoldAnnotation> {
        self.annotations.get(hold_id)?.frame_at(frame)
    }

    pub fn vector_holds(&self) -> impl Iterator<Item = &str> {
        self.vectors.keys().map(String::as_str)
    }

    pub fn annotation_holds(&self) -> impl Iterator<Item = &str> {
        self.annotations.keys().map(String::as_str)
    }
}

fn key_by_subject<T>(playbacks: Vec<Playback<T>>) -> HashMap<String, Playback<T>> {
    let mut keyed = HashMap::with_capacity(playbacks.len());
    for playback in playbacks {
        let subject = playback.subject_id.clone();
        if keyed.insert(subject, playback).is_some() {
            debug!("Duplicate playback for a hold; keeping the later one");
        }
    }
    keyed
}

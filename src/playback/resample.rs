use tracing::debug;

use super::{
    FrequencyRole, Interpolate, OVERLAY_FRAME_RATE_HZ, Playback, ResampleError, Samples,
};
use crate::config::PlaybackSettings;

/// Upper bound on `target / source` when upsampling.
pub const MAX_UPSAMPLE_FACTOR: usize = 10_000;

/// Convert `playback` to `target_frequency_hz`.
///
/// Upsampling inserts `floor(ratio) - 1` interpolated samples between every source pair and
/// always ends on the last source sample. Downsampling keeps every `round(1 / ratio)`-th
/// sample starting at the first one, without any filtering. Constant playbacks are returned
/// as they are. Upsampling by `MAX_UPSAMPLE_FACTOR + 1` or more fails with
/// [`ResampleError::RatioTooLarge`].
pub fn resample<T: Interpolate>(
    playback: &Playback<T>,
    target_frequency_hz: f64,
) -> Result<Playback<T>, ResampleError> {
    let source = checked_frequency(playback.frequency_hz, FrequencyRole::Source)?;
    let target = checked_frequency(target_frequency_hz, FrequencyRole::Target)?;
    let samples = match &playback.samples {
        Samples::Constant(_) => return Ok(playback.clone()),
        Samples::TimeVarying(samples) => samples,
    };
    let resampled = resample_checked(samples, source, target)?;
    if resampled.passthrough_pairs > 0 {
        debug!(
            subject = %playback.subject_id,
            pairs = resampled.passthrough_pairs,
            "Repeated samples that could not be interpolated"
        );
    }
    Ok(Playback {
        subject_id: playback.subject_id.clone(),
        frequency_hz: target,
        samples: Samples::TimeVarying(resampled.samples),
    })
}

/// Sequence-level conversion shared by every playback kind.
pub fn resample_sequence<T: Interpolate>(
    samples: &[T],
    source_frequency_hz: f64,
    target_frequency_hz: f64,
) -> Result<Vec<T>, ResampleError> {
    let source = checked_frequency(source_frequency_hz, FrequencyRole::Source)?;
    let target = checked_frequency(target_frequency_hz, FrequencyRole::Target)?;
    Ok(resample_checked(samples, source, target)?.samples)
}

/// Resamples playbacks to a fixed display rate.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Resampler {
    target_frequency_hz: f64,
}

impl Resampler {
    pub fn new(target_frequency_hz: f64) -> Result<Self, ResampleError> {
        let target_frequency_hz = checked_frequency(target_frequency_hz, FrequencyRole::Target)?;
        Ok(Self {
            target_frequency_hz,
        })
    }

    pub fn from_settings(settings: &PlaybackSettings) -> Result<Self, ResampleError> {
        Self::new(settings.target_frequency_hz)
    }

    pub fn target_frequency_hz(&self) -> f64 {
        self.target_frequency_hz
    }

    pub fn resample<T: Interpolate>(
        &self,
        playback: &Playback<T>,
    ) -> Result<Playback<T>, ResampleError> {
        resample(playback, self.target_frequency_hz)
    }

    pub fn resample_all<T: Interpolate>(
        &self,
        playbacks: &[Playback<T>],
    ) -> Result<Vec<Playback<T>>, ResampleError> {
        playbacks
            .iter()
            .map(|playback| self.resample(playback))
            .collect()
    }
}

impl Default for Resampler {
    fn default() -> Self {
        Self {
            target_frequency_hz: OVERLAY_FRAME_RATE_HZ,
        }
    }
}

struct Resampled<T> {
    samples: Vec<T>,
    passthrough_pairs: usize,
}

fn checked_frequency(value: f64, role: FrequencyRole) -> Result<f64, ResampleError> {
    if value.is_finite() && value > 0.0 {
        Ok(value)
    } else {
        Err(ResampleError::InvalidFrequency { role, value })
    }
}

fn resample_checked<T: Interpolate>(
    samples: &[T],
    source: f64,
    target: f64,
) -> Result<Resampled<T>, ResampleError> {
    let ratio = target / source;
    if samples.len() < 2 || ratio == 1.0 {
        return Ok(Resampled {
            samples: samples.to_vec(),
            passthrough_pairs: 0,
        });
    }
    if ratio > 1.0 {
        upsample(samples, ratio)
    } else {
        Ok(Resampled {
            samples: downsample(samples, ratio),
            passthrough_pairs: 0,
        })
    }
}

fn upsample<T: Interpolate>(samples: &[T], ratio: f64) -> Result<Resampled<T>, ResampleError> {
    if !ratio.is_finite() || ratio >= MAX_UPSAMPLE_FACTOR as f64 + 1.0 {
        return Err(ResampleError::RatioTooLarge { ratio });
    }
    let factor = ratio.floor() as usize;
    let capacity = (samples.len() - 1)
        .checked_mul(factor)
        .and_then(|len| len.checked_add(1))
        .ok_or(ResampleError::RatioTooLarge { ratio })?;
    let mut out = Vec::with_capacity(capacity);
    let mut passthrough_pairs = 0;
    for pair in samples.windows(2) {
        let (current, next) = (&pair[0], &pair[1]);
        out.push(current.clone());
        if current.passes_through(next) {
            passthrough_pairs += 1;
        }
        for step in 1..factor {
            out.push(current.interpolate(next, step as f64 / ratio));
        }
    }
    if let Some(last) = samples.last() {
        out.push(last.clone());
    }
    Ok(Resampled {
        samples: out,
        passthrough_pairs,
    })
}

fn downsample<T: Clone>(samples: &[T], ratio: f64) -> Vec<T> {
    let stride = (1.0 / ratio).round().max(1.0) as usize;
    samples.iter().step_by(stride).cloned().collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::playback::{HoldAnnotation, HoldVector, Sample};

    fn ramp(count: usize) -> Vec<HoldVector> {
        (0..count)
            .map(|i| HoldVector::new(i as f64, 2.0 * i as f64))
            .collect()
    }

    #[test]
    fn equal_rates_are_identity() {
        let playback = Playback::time_varying("h1", 25.0, ramp(5));
        let out = resample(&playback, 25.0).unwrap();
        assert_eq!(out.samples, playback.samples);
        assert_eq!(out.frequency_hz, 25.0);
    }

    #[test]
    fn upsampling_length_and_endpoints() {
        let input = ramp(4);
        let out = resample_sequence(&input, 10.0, 100.0).unwrap();
        assert_eq!(out.len(), (4 - 1) * 10 + 1);
        assert_eq!(out.first(), input.first());
        assert_eq!(out.last(), input.last());
    }

    #[test]
    fn upsampling_interpolates_between_pairs() {
        let input = vec![HoldVector::new(0.0, 0.0), HoldVector::new(10.0, 0.0)];
        let out = resample_sequence(&input, 10.0, 100.0).unwrap();
        assert_eq!(out.len(), 11);
        assert_eq!(out[5], HoldVector::new(5.0, 0.0));
    }

    #[test]
    fn fractional_ratio_uses_floor_of_ratio() {
        let input = vec![HoldAnnotation::new(0.0), HoldAnnotation::new(5.0)];
        let out = resample_sequence(&input, 10.0, 25.0).unwrap();
        assert_eq!(out.len(), 3);
        assert!((out[1].annotation - 2.0).abs() < 1e-12);
        assert_eq!(out[2], HoldAnnotation::new(5.0));
    }

    #[test]
    fn downsampling_takes_every_stride() {
        let input = ramp(10);
        let out = resample_sequence(&input, 100.0, 25.0).unwrap();
        assert_eq!(out, vec![input[0], input[4], input[8]]);
    }

    #[test]
    fn downsampling_rounds_stride() {
        let input = ramp(7);
        let out = resample_sequence(&input, 30.0, 11.0).unwrap();
        assert_eq!(out, vec![input[0], input[3], input[6]]);
    }

    #[test]
    fn short_sequences_are_relabelled_only() {
        let single = Playback::time_varying("h1", 10.0, ramp(1));
        let out = resample(&single, 100.0).unwrap();
        assert_eq!(out.samples, single.samples);
        assert_eq!(out.frequency_hz, 100.0);

        let empty: Playback<HoldVector> = Playback::time_varying("h2", 10.0, Vec::new());
        assert_eq!(resample(&empty, 5.0).unwrap().sample_count(), Some(0));
    }

    #[test]
    fn constants_are_returned_unchanged() {
        let playback = Playback::constant("h1", 10.0, HoldAnnotation::new(3.0));
        assert_eq!(resample(&playback, 100.0).unwrap(), playback);
    }

    #[test]
    fn subject_is_preserved() {
        let playback = Playback::time_varying("crimp-7", 10.0, ramp(3));
        let out = resample(&playback, 20.0).unwrap();
        assert_eq!(out.subject_id, "crimp-7");
    }

    #[test]
    fn invalid_frequencies_are_rejected() {
        let playback = Playback::time_varying("h1", 0.0, ramp(3));
        assert_eq!(
            resample(&playback, 100.0).unwrap_err(),
            ResampleError::InvalidFrequency {
                role: FrequencyRole::Source,
                value: 0.0
            }
        );
        assert!(resample_sequence(&ramp(3), 10.0, f64::INFINITY).is_err());
        assert!(Resampler::new(-1.0).is_err());
    }

    #[test]
    fn extreme_upsampling_ratios_are_rejected() {
        let pair = vec![HoldVector::new(0.0, 0.0), HoldVector::new(1.0, 1.0)];
        assert!(matches!(
            resample_sequence(&pair, 1e-300, 1.0),
            Err(ResampleError::RatioTooLarge { ratio }) if ratio > 1e299
        ));
        assert!(matches!(
            resample_sequence(&pair, 1e-300, 1e300),
            Err(ResampleError::RatioTooLarge { .. })
        ));
        let limit = MAX_UPSAMPLE_FACTOR as f64;
        assert_eq!(
            resample_sequence(&pair, 1.0, limit).unwrap().len(),
            MAX_UPSAMPLE_FACTOR + 1
        );
        assert!(resample_sequence(&pair, 1.0, limit + 1.0).is_err());
    }

    #[test]
    fn extreme_downsampling_keeps_first_sample() {
        let out = resample_sequence(&ramp(4), 1e300, 1e-300).unwrap();
        assert_eq!(out, vec![ramp(1)[0]]);
    }

    #[test]
    fn unknown_shapes_pass_through_while_keeping_frame_count() {
        let input = vec![
            Sample::Opaque(serde_json::json!({"torque": 1})),
            Sample::Opaque(serde_json::json!({"torque": 3})),
        ];
        let out = resample_sequence(&input, 10.0, 50.0).unwrap();
        assert_eq!(out.len(), 6);
        assert!(out[..5].iter().all(|sample| *sample == input[0]));
        assert_eq!(out[5], input[1]);
    }

    #[test]
    fn resampler_batches_with_default_rate() {
        let resampler = Resampler::default();
        let playbacks = vec![
            Playback::time_varying("a", 10.0, ramp(2)),
            Playback::time_varying("b", 50.0, ramp(3)),
        ];
        let out = resampler.resample_all(&playbacks).unwrap();
        assert_eq!(out[0].sample_count(), Some(11));
        assert_eq!(out[1].sample_count(), Some(5));
        assert!(out.iter().all(|p| p.frequency_hz == OVERLAY_FRAME_RATE_HZ));
    }
}

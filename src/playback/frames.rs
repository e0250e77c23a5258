//! Frame indexing helpers for a playback clock running at a fixed rate.

use super::Playback;

/// Number of frames needed to play every time-varying playback to its end.
///
/// Constant playbacks apply to any frame and do not extend the session.
pub fn frame_count<T>(playbacks: &[Playback<T>]) -> usize {
    playbacks
        .iter()
        .filter_map(Playback::sample_count)
        .max()
        .unwrap_or(0)
}

/// Session time of `frame` in seconds.
pub fn frame_time_seconds(frame: usize, fps: f64) -> f64 {
    if !(fps.is_finite() && fps > 0.0) {
        return 0.0;
    }
    frame as f64 / fps
}

/// Frame shown at `seconds` into the session (the frame whose start is at or before it).
pub fn frame_at_time(seconds: f64, fps: f64) -> usize {
    if !(seconds.is_finite() && fps.is_finite() && fps > 0.0) || seconds <= 0.0 {
        return 0;
    }
    (seconds * fps).floor() as usize
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::playback::{HoldAnnotation, HoldVector};

    #[test]
    fn frame_count_ignores_constants() {
        let playbacks = vec![
            Playback::time_varying("a", 100.0, vec![HoldVector::default(); 3]),
            Playback::time_varying("b", 100.0, vec![HoldVector::default(); 7]),
        ];
        assert_eq!(frame_count(&playbacks), 7);

        let constants = vec![Playback::constant("c", 10.0, HoldAnnotation::new(1.0))];
        assert_eq!(frame_count(&constants), 0);
    }

    #[test]
    fn frame_time_round_trips_at_overlay_rate() {
        assert_eq!(frame_time_seconds(250, 100.0), 2.5);
        assert_eq!(frame_at_time(2.5, 100.0), 250);
        assert_eq!(frame_at_time(0.019, 100.0), 1);
    }

    #[test]
    fn frame_helpers_tolerate_bad_rates() {
        assert_eq!(frame_time_seconds(10, 0.0), 0.0);
        assert_eq!(frame_at_time(1.0, f64::NAN), 0);
        assert_eq!(frame_at_time(-3.0, 100.0), 0);
    }
}

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use super::{HoldVector, Playback};

/// Rate at which the wall sensors report readings.
pub const SENSOR_FREQUENCY_HZ: f64 = 10.0;

/// One hold's force reading within a captured frame.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct SensorReading {
    pub hold_id: String,
    pub x: f64,
    pub y: f64,
}

/// All readings captured at one sensor tick.
pub type SensorReadingFrame = Vec<SensorReading>;

/// Pivot per-frame readings into one vector playback per hold.
///
/// Holds are listed in the order they first report. A hold that is missing from a frame keeps
/// its previous reading (zero before its first one), so every playback has exactly one
/// sample per frame. Duplicate readings within a frame: the last one wins.
pub fn sensor_playbacks(
    frames: &[SensorReadingFrame],
    frequency_hz: f64,
) -> Vec<Playback<HoldVector>> {
    let mut order: Vec<&str> = Vec::new();
    let mut series: HashMap<&str, Vec<HoldVector>> = HashMap::new();

    for (index, frame) in frames.iter().enumerate() {
        for reading in frame {
            let value = HoldVector::new(reading.x, reading.y);
            let values = series.entry(reading.hold_id.as_str()).or_insert_with(|| {
                order.push(reading.hold_id.as_str());
                Vec::with_capacity(frames.len())
            });
            if values.len() > index {
                if let Some(slot) = values.last_mut() {
                    *slot = value;
                }
                continue;
            }
            let held = values.last().copied().unwrap_or_default();
            values.resize(index, held);
            values.push(value);
        }
    }

    order
        .into_iter()
        .map(|hold_id| {
            let mut values = series.remove(hold_id).unwrap_or_default();
            let held = values.last().copied().unwrap_or_default();
            values.resize(frames.len(), held);
            Playback::time_varying(hold_id, frequency_hz, values)
        })
        .collect()
}

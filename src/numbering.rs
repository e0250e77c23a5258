//! Stable hold numbering for overlay labels.

use std::collections::BTreeMap;

use crate::model::Hold;
use crate::playback::{HoldAnnotation, Playback};

/// Rate label given to hold-number playbacks; the values never change.
pub const HOLD_NUMBER_FREQUENCY_HZ: f64 = 10.0;

/// Number holds `1..=N` from the bottom of the wall upwards.
///
/// Holds are ordered by bbox top descending, then bbox left descending, then id, so the result
/// does not depend on input order.
pub fn assign_hold_numbers(holds: &[Hold]) -> BTreeMap<String, u32> {
    numbered(holds)
        .map(|(number, hold)| (hold.id.clone(), number))
        .collect()
}

/// Hold numbers as constant annotation playbacks, in number order.
pub fn hold_number_playbacks(holds: &[Hold], frequency_hz: f64) -> Vec<Playback<HoldAnnotation>> {
    numbered(holds)
        .map(|(number, hold)| {
            Playback::constant(
                hold.id.clone(),
                frequency_hz,
                HoldAnnotation::new(f64::from(number)),
            )
        })
        .collect()
}

fn numbered(holds: &[Hold]) -> impl Iterator<Item = (u32, &Hold)> {
    let mut sorted: Vec<&Hold> = holds.iter().collect();
    sorted.sort_by(|a, b| {
        b.bbox
            .y
            .cmp(&a.bbox.y)
            .then_with(|| b.bbox.x.cmp(&a.bbox.x))
            .then_with(|| a.id.cmp(&b.id))
    });
    (1u32..).zip(sorted)
}

use betaboard_overlay::geometry::BoundingBox;
use betaboard_overlay::model::Hold;
use betaboard_overlay::playback::{HoldVector, Playback};

pub fn vector_playback(id: &str, frequency_hz: f64, points: &[(f64, f64)]) -> Playback<HoldVector> {
    Playback::time_varying(
        id,
        frequency_hz,
        points.iter().map(|&(x, y)| HoldVector::new(x, y)).collect(),
    )
}

pub fn ramp(len: usize) -> Vec<(f64, f64)> {
    (0..len).map(|i| (i as f64, (i * 2) as f64)).collect()
}

pub fn rect_hold(id: &str, x: i64, y: i64, width: u32, height: u32) -> Hold {
    Hold::new(id, BoundingBox::new(x, y, width, height), None)
}

pub fn masked_hold(id: &str, x: i64, y: i64, mask: Vec<Vec<bool>>) -> Hold {
    let height = mask.len() as u32;
    let width = mask.first().map_or(0, Vec::len) as u32;
    Hold::new(id, BoundingBox::new(x, y, width, height), Some(mask))
}

/// Alpha channel of `image` as rows of opaque flags.
pub fn opaque_rows(image: &image::RgbaImage) -> Vec<Vec<bool>> {
    (0..image.height())
        .map(|y| (0..image.width()).map(|x| image.get_pixel(x, y)[3] == 255).collect())
        .collect()
}

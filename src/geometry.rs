//! Wall-space geometry shared by the overlay and playback helpers.
//!
//! Coordinates follow the wall photo: `x` grows to the right, `y` grows downwards,
//! and one unit is one photo pixel.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::playback::HoldVector;

/// Default multiplier applied to force vectors when drawing them as arrows.
pub const DEFAULT_VECTOR_SCALE: f64 = 2.0;

/// Errors raised when decoding a `[x, y, width, height]` bounding box.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum BoundingBoxError {
    /// Width or height was negative.
    #[error("Bounding box has a negative extent ({width}x{height})")]
    NegativeExtent { width: i64, height: i64 },
    /// Width or height does not fit a pixel buffer dimension.
    #[error("Bounding box extent {width}x{height} is too large")]
    ExtentTooLarge { width: i64, height: i64 },
}

/// A point in wall coordinates.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

/// Axis-aligned hold bounds, serialized as `[x, y, width, height]`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "[i64; 4]", into = "[i64; 4]")]
pub struct BoundingBox {
    pub x: i64,
    pub y: i64,
    pub width: u32,
    pub height: u32,
}

impl BoundingBox {
    pub fn new(x: i64, y: i64, width: u32, height: u32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// Center of the box; where force arrows start.
    pub fn center(&self) -> Point {
        Point::new(
            self.x as f64 + self.width as f64 / 2.0,
            self.y as f64 + self.height as f64 / 2.0,
        )
    }

    /// Bottom-right corner, where per-hold value labels are anchored.
    pub fn annotation_anchor(&self) -> Point {
        Point::new(
            self.x as f64 + self.width as f64,
            self.y as f64 + self.height as f64,
        )
    }

    /// Wall position of the top-left pixel of an outline image with the given border.
    pub fn overlay_origin(&self, border_thickness_px: u32) -> (i64, i64) {
        let pad = i64::from(border_thickness_px);
        (self.x - pad, self.y - pad)
    }

    /// Size of the box grown by `border_thickness_px` on every side.
    pub fn padded_size(&self, border_thickness_px: u32) -> (u32, u32) {
        let pad = border_thickness_px.saturating_mul(2);
        (
            self.width.saturating_add(pad),
            self.height.saturating_add(pad),
        )
    }

    pub fn area(&self) -> u64 {
        u64::from(self.width) * u64::from(self.height)
    }
}

impl TryFrom<[i64; 4]> for BoundingBox {
    type Error = BoundingBoxError;

    fn try_from([x, y, width, height]: [i64; 4]) -> Result<Self, Self::Error> {
        if width < 0 || height < 0 {
            return Err(BoundingBoxError::NegativeExtent { width, height });
        }
        let (Ok(w), Ok(h)) = (u32::try_from(width), u32::try_from(height)) else {
            return Err(BoundingBoxError::ExtentTooLarge { width, height });
        };
        Ok(Self::new(x, y, w, h))
    }
}

impl From<BoundingBox> for [i64; 4] {
    fn from(bbox: BoundingBox) -> Self {
        [
            bbox.x,
            bbox.y,
            i64::from(bbox.width),
            i64::from(bbox.height),
        ]
    }
}

/// End point of a force arrow drawn from the hold center.
///
/// Sensor `y` points up while wall `y` points down, so the vertical component is flipped.
pub fn vector_endpoint(bbox: &BoundingBox, vector: &HoldVector, scale: f64) -> Point {
    let center = bbox.center();
    Point::new(center.x + vector.x * scale, center.y - vector.y * scale)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bbox_decodes_from_json_array() {
        let bbox: BoundingBox = serde_json::from_str("[10, 20, 30, 40]").unwrap();
        assert_eq!(bbox, BoundingBox::new(10, 20, 30, 40));
        assert_eq!(serde_json::to_string(&bbox).unwrap(), "[10,20,30,40]");
    }

    #[test]
    fn bbox_rejects_negative_extent() {
        let err = serde_json::from_str::<BoundingBox>("[0, 0, -3, 4]").unwrap_err();
        assert!(err.to_string().contains("negative extent"));
    }

    #[test]
    fn center_and_anchor_follow_bbox() {
        let bbox = BoundingBox::new(10, 20, 5, 8);
        assert_eq!(bbox.center(), Point::new(12.5, 24.0));
        assert_eq!(bbox.annotation_anchor(), Point::new(15.0, 28.0));
    }

    #[test]
    fn overlay_origin_can_go_negative() {
        let bbox = BoundingBox::new(1, 0, 4, 4);
        assert_eq!(bbox.overlay_origin(2), (-1, -2));
        assert_eq!(bbox.padded_size(2), (8, 8));
    }

    #[test]
    fn vector_endpoint_flips_vertical_axis() {
        let bbox = BoundingBox::new(0, 0, 10, 10);
        let end = vector_endpoint(&bbox, &HoldVector { x: 1.0, y: 2.0 }, DEFAULT_VECTOR_SCALE);
        assert_eq!(end, Point::new(7.0, 1.0));
    }
}

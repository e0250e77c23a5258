//! Hold outline overlays drawn on top of the wall photo.

mod encode;
mod error;
mod raster;

use std::collections::HashMap;

use image::{Rgba, RgbaImage};
use tracing::{debug, warn};

use crate::config::OverlaySettings;
use crate::geometry::{BoundingBox, Point};
use crate::model::Hold;

pub use encode::{PNG_DATA_URL_PREFIX, encode_png, encode_png_data_url};
pub use error::{EncodeError, MaskError, OverlayError};
pub use raster::rasterize_hold_border;

pub const DEFAULT_BORDER_THICKNESS_PX: u32 = 2;
pub const DEFAULT_BORDER_COLOR: [u8; 3] = [255, 0, 0];

/// Outline color and width.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct BorderStyle {
    pub thickness_px: u32,
    /// Painted fully opaque regardless of the alpha stored here.
    pub color: Rgba<u8>,
}

impl BorderStyle {
    pub fn new(thickness_px: u32, [r, g, b]: [u8; 3]) -> Self {
        Self {
            thickness_px,
            color: Rgba([r, g, b, u8::MAX]),
        }
    }

    pub fn from_settings(settings: &OverlaySettings) -> Self {
        Self::new(settings.border_thickness_px, settings.border_color)
    }
}

impl Default for BorderStyle {
    fn default() -> Self {
        Self::new(DEFAULT_BORDER_THICKNESS_PX, DEFAULT_BORDER_COLOR)
    }
}

/// Borrowed view of a hold footprint: its bbox and optional pixel mask.
#[derive(Clone, Copy, Debug)]
pub struct HoldMask<'a> {
    pub bbox: BoundingBox,
    pub mask: Option<&'a [Vec<bool>]>,
}

impl<'a> HoldMask<'a> {
    pub fn new(bbox: BoundingBox, mask: Option<&'a [Vec<bool>]>) -> Self {
        Self { bbox, mask }
    }

    pub fn rectangle(bbox: BoundingBox) -> Self {
        Self { bbox, mask: None }
    }

    /// Mask rows, unless the mask is absent or has no cells (both mean "outline the bbox").
    ///
    /// A mask with some empty and some non-empty rows is returned as is, so that
    /// [`HoldMask::validate`] rejects it.
    pub fn occupancy(&self) -> Option<&'a [Vec<bool>]> {
        self.mask
            .filter(|rows| rows.iter().any(|row| !row.is_empty()))
    }

    /// Check the mask is exactly `height` rows of `width` cells.
    pub fn validate(&self) -> Result<(), MaskError> {
        let Some(rows) = self.mask else {
            return Ok(());
        };
        let expected_rows = self.bbox.height as usize;
        let expected_width = self.bbox.width as usize;
        if rows.len() != expected_rows {
            return Err(MaskError::RowCount {
                expected: expected_rows,
                found: rows.len(),
            });
        }
        match rows.iter().position(|row| row.len() != expected_width) {
            Some(row) => Err(MaskError::RowWidth {
                row,
                expected: expected_width,
                found: rows[row].len(),
            }),
            None => Ok(()),
        }
    }

    /// Mean position of the occupied pixel centers, in wall coordinates.
    ///
    /// Falls back to the bbox center when there is no mask or no occupied pixel.
    pub fn centroid(&self) -> Result<Point, MaskError> {
        let Some(rows) = self.occupancy() else {
            return Ok(self.bbox.center());
        };
        self.validate()?;
        let (mut sum_x, mut sum_y, mut count) = (0.0, 0.0, 0usize);
        for (row, values) in rows.iter().enumerate() {
            for (col, _) in values.iter().enumerate().filter(|(_, occupied)| **occupied) {
                sum_x += col as f64 + 0.5;
                sum_y += row as f64 + 0.5;
                count += 1;
            }
        }
        if count == 0 {
            return Ok(self.bbox.center());
        }
        Ok(Point::new(
            self.bbox.x as f64 + sum_x / count as f64,
            self.bbox.y as f64 + sum_y / count as f64,
        ))
    }
}

/// A rendered hold outline and where it goes on the wall.
#[derive(Clone, Debug, PartialEq)]
pub struct HoldOverlay {
    pub hold_id: String,
    /// Wall position of the image's top-left pixel.
    pub origin: (i64, i64),
    pub image: RgbaImage,
}

impl HoldOverlay {
    pub fn width(&self) -> u32 {
        self.image.width()
    }

    pub fn height(&self) -> u32 {
        self.image.height()
    }

    pub fn data_url(&self) -> Result<String, OverlayError> {
        encode_png_data_url(&self.image).map_err(|source| OverlayError::Encode {
            hold_id: self.hold_id.clone(),
            source,
        })
    }
}

pub fn render_hold_overlay(hold: &Hold, style: &BorderStyle) -> Result<HoldOverlay, OverlayError> {
    let image = rasterize_hold_border(&hold.footprint(), style).map_err(|source| {
        warn!(hold = %hold.id, "Cannot outline hold: {source}");
        OverlayError::Mask {
            hold_id: hold.id.clone(),
            source,
        }
    })?;
    Ok(HoldOverlay {
        hold_id: hold.id.clone(),
        origin: hold.bbox.overlay_origin(style.thickness_px),
        image,
    })
}

/// Outline every hold, keyed by hold id. Stops at the first malformed mask.
pub fn render_hold_overlays(
    holds: &[Hold],
    style: &BorderStyle,
) -> Result<HashMap<String, HoldOverlay>, OverlayError> {
    let overlays = holds
        .iter()
        .map(|hold| render_hold_overlay(hold, style).map(|overlay| (hold.id.clone(), overlay)))
        .collect::<Result<HashMap<_, _>, _>>()?;
    debug!(
        holds = overlays.len(),
        thickness = style.thickness_px,
        "Rendered hold overlays"
    );
    Ok(overlays)
}

use image::{Rgba, RgbaImage};

use super::{BorderStyle, HoldMask, MaskError};

const TRANSPARENT: Rgba<u8> = Rgba([0, 0, 0, 0]);

/// Rasterize the outline of a hold footprint.
///
/// The image is the bbox grown by `style.thickness_px` on every side, so its top-left pixel
/// sits at `bbox.overlay_origin(thickness)` on the wall. A pixel is painted when it lies
/// outside the mask but within Chebyshev distance `thickness` of a mask pixel; everything
/// else, the mask interior included, stays fully transparent. Without a mask the bbox itself
/// is outlined. Fails with [`MaskError::ImageTooLarge`] when the padded size does not fit
/// `u32`.
pub fn rasterize_hold_border(
    mask: &HoldMask<'_>,
    style: &BorderStyle,
) -> Result<RgbaImage, MaskError> {
    let (image_width, image_height) = padded_dimensions(mask, style.thickness_px)?;
    let pad = style.thickness_px as usize;
    let width = mask.bbox.width as usize;
    let height = mask.bbox.height as usize;
    let canvas = match mask.occupancy() {
        Some(rows) => {
            mask.validate()?;
            OccupancyGrid::padded_mask(rows, width, height, pad)
        }
        None => OccupancyGrid::padded_rectangle(width, height, pad),
    };
    let reach = canvas.dilate(pad);
    let Rgba([r, g, b, _]) = style.color;
    let color = Rgba([r, g, b, u8::MAX]);
    Ok(RgbaImage::from_fn(
        image_width,
        image_height,
        |x, y| {
            let (x, y) = (x as usize, y as usize);
            if reach.get(x, y) && !canvas.get(x, y) {
                color
            } else {
                TRANSPARENT
            }
        },
    ))
}

fn padded_dimensions(mask: &HoldMask<'_>, thickness_px: u32) -> Result<(u32, u32), MaskError> {
    let too_large = || MaskError::ImageTooLarge {
        width: mask.bbox.width,
        height: mask.bbox.height,
        thickness_px,
    };
    let border = thickness_px.checked_mul(2).ok_or_else(too_large)?;
    let width = mask.bbox.width.checked_add(border).ok_or_else(too_large)?;
    let height = mask.bbox.height.checked_add(border).ok_or_else(too_large)?;
    Ok((width, height))
}

/// Row-major boolean grid.
#[derive(Clone, Debug, PartialEq, Eq)]
struct OccupancyGrid {
    width: usize,
    height: usize,
    cells: Vec<bool>,
}

impl OccupancyGrid {
    fn empty(width: usize, height: usize) -> Self {
        Self {
            width,
            height,
            cells: vec![false; width * height],
        }
    }

    /// Copy a validated `height x width` mask into a grid padded by `pad` empty cells.
    fn padded_mask(rows: &[Vec<bool>], width: usize, height: usize, pad: usize) -> Self {
        let mut grid = Self::empty(width + 2 * pad, height + 2 * pad);
        for (row, values) in rows.iter().enumerate().take(height) {
            let start = (row + pad) * grid.width + pad;
            grid.cells[start..start + width].copy_from_slice(&values[..width]);
        }
        grid
    }

    fn padded_rectangle(width: usize, height: usize, pad: usize) -> Self {
        let mut grid = Self::empty(width + 2 * pad, height + 2 * pad);
        for row in pad..pad + height {
            let start = row * grid.width + pad;
            grid.cells[start..start + width].fill(true);
        }
        grid
    }

    fn get(&self, x: usize, y: usize) -> bool {
        self.cells[y * self.width + x]
    }

    /// Dilation with a `(2r+1)^2` square: rows first, then columns.
    fn dilate(&self, radius: usize) -> Self {
        if radius == 0 || self.cells.is_empty() {
            return self.clone();
        }
        let mut horizontal = Self::empty(self.width, self.height);
        for (src, dst) in self
            .cells
            .chunks(self.width)
            .zip(horizontal.cells.chunks_mut(self.width))
        {
            dilate_line(src, radius, dst);
        }

        let mut out = Self::empty(self.width, self.height);
        let mut column = vec![false; self.height];
        let mut dilated = vec![false; self.height];
        for x in 0..self.width {
            for (y, cell) in column.iter_mut().enumerate() {
                *cell = horizontal.get(x, y);
            }
            dilate_line(&column, radius, &mut dilated);
            for (y, &cell) in dilated.iter().enumerate() {
                out.cells[y * self.width + x] = cell;
            }
        }
        out
    }
}

/// `dst[i]` is true when any of `src[i - radius..=i + radius]` is true.
fn dilate_line(src: &[bool], radius: usize, dst: &mut [bool]) {
    let mut prefix = Vec::with_capacity(src.len() + 1);
    prefix.push(0usize);
    let mut running = 0usize;
    for &cell in src {
        running += usize::from(cell);
        prefix.push(running);
    }
    for (i, slot) in dst.iter_mut().enumerate() {
        let lo = i.saturating_sub(radius);
        let hi = (i + radius + 1).min(src.len());
        *slot = prefix[hi] > prefix[lo];
    }
}

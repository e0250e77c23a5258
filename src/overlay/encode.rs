use std::io::Cursor;

use base64::Engine;
use image::{ImageFormat, RgbaImage};

use super::EncodeError;

pub const PNG_DATA_URL_PREFIX: &str = "data:image/png;base64,";

/// Encode an RGBA image as PNG bytes.
pub fn encode_png(image: &RgbaImage) -> Result<Vec<u8>, EncodeError> {
    let (width, height) = image.dimensions();
    if width == 0 || height == 0 {
        return Err(EncodeError::EmptyImage { width, height });
    }
    let mut buffer = Cursor::new(Vec::new());
    image.write_to(&mut buffer, ImageFormat::Png)?;
    Ok(buffer.into_inner())
}

/// Encode an RGBA image as a `data:image/png;base64,...` URL for direct use as an image href.
pub fn encode_png_data_url(image: &RgbaImage) -> Result<String, EncodeError> {
    let png = encode_png(image)?;
    let encoded = base64::engine::general_purpose::STANDARD.encode(png);
    Ok(format!("{PNG_DATA_URL_PREFIX}{encoded}"))
}

use thiserror::Error;

/// A hold footprint that cannot be rasterized.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum MaskError {
    #[error("Malformed mask: expected {expected} rows, found {found}")]
    RowCount { expected: usize, found: usize },
    #[error("Malformed mask: row {row} has {found} columns, expected {expected}")]
    RowWidth {
        row: usize,
        expected: usize,
        found: usize,
    },
    #[error("Hold outline of {width}x{height} with a {thickness_px} px border exceeds image limits")]
    ImageTooLarge {
        width: u32,
        height: u32,
        thickness_px: u32,
    },
}

#[derive(Debug, Error)]
pub enum EncodeError {
    #[error("Cannot encode an empty {width}x{height} image")]
    EmptyImage { width: u32, height: u32 },
    #[error("PNG encoding failed: {0}")]
    Png(#[from] image::ImageError),
}

/// Failure while building the overlay of a specific hold.
#[derive(Debug, Error)]
pub enum OverlayError {
    #[error("Hold {hold_id}: {source}")]
    Mask { hold_id: String, source: MaskError },
    #[error("Hold {hold_id}: {source}")]
    Encode {
        hold_id: String,
        source: EncodeError,
    },
}

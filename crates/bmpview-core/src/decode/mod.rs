//! Bitmap decoding for bmpview.
//!
//! This module provides functionality for:
//! - Parsing and validating the 14-byte file header and 40-byte info header
//! - Serializing both headers back to their exact on-disk layout
//! - Decoding padded, bottom-up 24-bit pixel rows into a flat buffer
//!
//! # Supported Input
//!
//! Only uncompressed, unpaletted, bottom-up 24-bit bitmaps with a version 3
//! (40-byte) info header are accepted. Anything else is rejected with a
//! [`FormatError`](crate::FormatError) naming the first violated constraint.
//!
//! # Examples
//!
//! ```ignore
//! use bmpview_core::decode::{parse_headers, decoded_dimensions};
//!
//! let bytes = std::fs::read("photo.bmp")?;
//! let (_, info) = parse_headers(&bytes)?;
//! let (width, height) = decoded_dimensions(&info);
//! ```

mod header;
mod pixels;
mod types;

pub use header::{
    decoded_dimensions, parse_headers, resync_geometry, row_padding, row_stride, validate,
};
pub use pixels::PixelBuffer;
pub use types::{
    FileHeader, InfoHeader, Pixel, BMP_MAGIC, FILE_HEADER_SIZE, INFO_HEADER_SIZE,
    PIXEL_DATA_START,
};

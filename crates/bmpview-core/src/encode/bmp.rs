//! Streaming bitmap encoder.
//!
//! Writes the two headers followed by every row of the current view, each
//! row padded with zeros to a 4-byte boundary. Only one row is buffered.

use std::io::Write;

use crate::decode::{row_padding, row_stride};
use crate::error::BmpError;
use crate::image::BmpImage;

/// Encode the current view of `image` into `writer`.
///
/// # Arguments
///
/// * `image` - Image whose current view is written
/// * `writer` - Destination; wrap files in a `BufWriter`
///
/// # Behavior
///
/// - The headers are recomputed from the view's geometry right before they
///   are written, whether or not any crop or rotation happened
/// - Rows are written in view order, each padded with zeros to a multiple
///   of 4 bytes
/// - A failing writer is reported as [`BmpError::Io`]; whatever was written
///   before the failure stays in the sink
///
/// # Example
///
/// ```ignore
/// use bmpview_core::{encode::encode_bmp, BmpImage};
///
/// let mut image = BmpImage::open("in.bmp")?;
/// image.crop(0, 0, 16, 16)?;
/// image.rotate_clockwise()?;
/// let mut out = std::io::BufWriter::new(std::fs::File::create("out.bmp")?);
/// encode_bmp(&image, &mut out)?;
/// ```
pub fn encode_bmp<W: Write>(image: &BmpImage, writer: &mut W) -> Result<(), BmpError> {
    let (file_header, info_header) = image.output_headers();
    writer.write_all(&file_header.to_bytes())?;
    writer.write_all(&info_header.to_bytes())?;

    let width = image.effective_width();
    let height = image.effective_height();
    let padding = row_padding(width) as usize;
    let mut row = Vec::with_capacity(row_stride(width) as usize);

    for y in 0..height {
        row.clear();
        for pixel in image.row(y) {
            row.extend_from_slice(&pixel.to_bgr());
        }
        row.resize(row.len() + padding, 0);
        writer.write_all(&row)?;
    }

    tracing::debug!(width, height, size = file_header.file_size, "encoded bitmap");
    Ok(())
}

/// Encode the current view of `image` into a new buffer.
pub fn encode_bmp_to_vec(image: &BmpImage) -> Result<Vec<u8>, BmpError> {
    let (file_header, _) = image.output_headers();
    let mut out = Vec::with_capacity(file_header.file_size as usize);
    encode_bmp(image, &mut out)?;
    Ok(out)
}

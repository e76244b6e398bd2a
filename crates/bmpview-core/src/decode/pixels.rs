//! Flat pixel storage, decoded once and never modified.

use std::io::Read;

use super::header::{row_padding, row_stride};
use super::types::Pixel;
use crate::error::BmpError;

/// Row-major pixel grid in source order.
///
/// Row 0 is the first row found in the byte stream, which for a bottom-up
/// bitmap is the bottom scanline of the upright picture. The grid is never
/// re-laid-out; views over it are expressed through index arithmetic.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PixelBuffer {
    width: u32,
    height: u32,
    pixels: Vec<Pixel>,
}

/// Allocate room for exactly `width * height` pixels, reporting failure
/// instead of aborting.
fn allocate(width: u32, height: u32) -> Result<Vec<Pixel>, BmpError> {
    let count = (width as usize)
        .checked_mul(height as usize)
        .ok_or(BmpError::OutOfMemory)?;
    let mut pixels = Vec::new();
    pixels
        .try_reserve_exact(count)
        .map_err(|_| BmpError::OutOfMemory)?;
    Ok(pixels)
}

/// Unpack one row of storage-order bytes into pixels.
#[inline]
fn push_row(pixels: &mut Vec<Pixel>, row: &[u8]) {
    pixels.extend(
        row.chunks_exact(3)
            .map(|bgr| Pixel::from_bgr([bgr[0], bgr[1], bgr[2]])),
    );
}

impl PixelBuffer {
    /// Wrap already-decoded pixels.
    pub fn new(width: u32, height: u32, pixels: Vec<Pixel>) -> Self {
        debug_assert_eq!(
            pixels.len(),
            width as usize * height as usize,
            "Pixel buffer size mismatch"
        );
        Self {
            width,
            height,
            pixels,
        }
    }

    /// Decode `height` padded rows of `width` pixels from a stream.
    ///
    /// Only one row is buffered at a time; row padding is read and discarded.
    pub fn from_reader<R: Read>(reader: &mut R, width: u32, height: u32) -> Result<Self, BmpError> {
        let mut pixels = allocate(width, height)?;
        let stride = usize::try_from(row_stride(width)).map_err(|_| BmpError::OutOfMemory)?;
        let row_bytes = stride - row_padding(width) as usize;
        let mut row = Vec::new();
        row.try_reserve_exact(stride)
            .map_err(|_| BmpError::OutOfMemory)?;

        for _ in 0..height {
            row.clear();
            // Fills only as bytes arrive, so a short stream never touches the
            // whole reservation.
            reader
                .by_ref()
                .take(stride as u64)
                .read_to_end(&mut row)
                .map_err(|e| BmpError::from_read(e, "pixel rows"))?;
            if row.len() < stride {
                return Err(BmpError::TruncatedInput("pixel rows"));
            }
            push_row(&mut pixels, &row[..row_bytes]);
        }

        Ok(Self::new(width, height, pixels))
    }

    /// Decode `height` padded rows of `width` pixels from an in-memory slice
    /// that starts at the first pixel row.
    ///
    /// The slice is checked to hold every row before anything is allocated.
    pub fn from_bytes(data: &[u8], width: u32, height: u32) -> Result<Self, BmpError> {
        let needed = row_stride(width).checked_mul(u64::from(height));
        if needed.map_or(true, |needed| (data.len() as u64) < needed) {
            return Err(BmpError::TruncatedInput("pixel rows"));
        }

        let mut pixels = allocate(width, height)?;
        let stride = usize::try_from(row_stride(width)).map_err(|_| BmpError::OutOfMemory)?;
        let row_bytes = stride - row_padding(width) as usize;

        let mut offset = 0usize;
        for _ in 0..height {
            let row = data
                .get(offset..offset + stride)
                .ok_or(BmpError::TruncatedInput("pixel rows"))?;
            push_row(&mut pixels, &row[..row_bytes]);
            offset += stride;
        }

        Ok(Self::new(width, height, pixels))
    }

    /// Width of the grid as decoded.
    #[inline]
    pub fn width(&self) -> u32 {
        self.width
    }

    /// Height of the grid as decoded.
    #[inline]
    pub fn height(&self) -> u32 {
        self.height
    }

    /// Total number of pixels.
    #[inline]
    pub fn len(&self) -> usize {
        self.pixels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pixels.is_empty()
    }

    /// Pixel at a flat row-major index.
    #[inline]
    pub fn get(&self, index: usize) -> Option<Pixel> {
        self.pixels.get(index).copied()
    }

    /// Pixel at an index already known to be in range.
    #[inline]
    pub(crate) fn at(&self, index: usize) -> Pixel {
        self.pixels[index]
    }
}

//! Header codec: little-endian parsing, validation and serialization of the
//! BITMAPFILEHEADER / BITMAPINFOHEADER pair.
//!
//! Fields are reconstructed byte by byte with `from_le_bytes`, so the same
//! code serves buffers read from disk and buffers received over the network.

use super::types::{
    FileHeader, InfoHeader, BMP_MAGIC, FILE_HEADER_SIZE, INFO_HEADER_SIZE, PIXEL_DATA_START,
};
use crate::error::{BmpError, FormatError};

/// Number of zero bytes that round a row of `width` pixels up to a multiple of 4.
#[inline]
pub fn row_padding(width: u32) -> u32 {
    let row_bytes = u64::from(width) * 3;
    ((4 - row_bytes % 4) % 4) as u32
}

/// Bytes per encoded row of `width` pixels, padding included.
#[inline]
pub fn row_stride(width: u32) -> u64 {
    u64::from(width) * 3 + u64::from(row_padding(width))
}

#[inline]
fn le_u16(bytes: &[u8], offset: usize) -> u16 {
    u16::from_le_bytes([bytes[offset], bytes[offset + 1]])
}

#[inline]
fn le_u32(bytes: &[u8], offset: usize) -> u32 {
    u32::from_le_bytes([
        bytes[offset],
        bytes[offset + 1],
        bytes[offset + 2],
        bytes[offset + 3],
    ])
}

#[inline]
fn le_i32(bytes: &[u8], offset: usize) -> i32 {
    le_u32(bytes, offset) as i32
}

impl FileHeader {
    /// Decode the 14-byte file header.
    pub fn parse(bytes: &[u8; FILE_HEADER_SIZE]) -> Self {
        Self {
            magic: le_u16(bytes, 0),
            file_size: le_u32(bytes, 2),
            reserved1: le_u16(bytes, 6),
            reserved2: le_u16(bytes, 8),
            pixel_data_offset: le_u32(bytes, 10),
        }
    }

    /// Encode the header exactly as it appears on disk.
    pub fn to_bytes(&self) -> [u8; FILE_HEADER_SIZE] {
        let mut out = [0u8; FILE_HEADER_SIZE];
        out[0..2].copy_from_slice(&self.magic.to_le_bytes());
        out[2..6].copy_from_slice(&self.file_size.to_le_bytes());
        out[6..8].copy_from_slice(&self.reserved1.to_le_bytes());
        out[8..10].copy_from_slice(&self.reserved2.to_le_bytes());
        out[10..14].copy_from_slice(&self.pixel_data_offset.to_le_bytes());
        out
    }
}

impl InfoHeader {
    /// Decode the 40-byte info header.
    pub fn parse(bytes: &[u8; INFO_HEADER_SIZE]) -> Self {
        Self {
            header_size: le_u32(bytes, 0),
            width: le_i32(bytes, 4),
            height: le_i32(bytes, 8),
            planes: le_u16(bytes, 12),
            bits_per_pixel: le_u16(bytes, 14),
            compression: le_u32(bytes, 16),
            image_size_bytes: le_u32(bytes, 20),
            x_pixels_per_meter: le_i32(bytes, 24),
            y_pixels_per_meter: le_i32(bytes, 28),
            colors_used: le_u32(bytes, 32),
            colors_important: le_u32(bytes, 36),
        }
    }

    /// Encode the header exactly as it appears on disk.
    pub fn to_bytes(&self) -> [u8; INFO_HEADER_SIZE] {
        let mut out = [0u8; INFO_HEADER_SIZE];
        out[0..4].copy_from_slice(&self.header_size.to_le_bytes());
        out[4..8].copy_from_slice(&self.width.to_le_bytes());
        out[8..12].copy_from_slice(&self.height.to_le_bytes());
        out[12..14].copy_from_slice(&self.planes.to_le_bytes());
        out[14..16].copy_from_slice(&self.bits_per_pixel.to_le_bytes());
        out[16..20].copy_from_slice(&self.compression.to_le_bytes());
        out[20..24].copy_from_slice(&self.image_size_bytes.to_le_bytes());
        out[24..28].copy_from_slice(&self.x_pixels_per_meter.to_le_bytes());
        out[28..32].copy_from_slice(&self.y_pixels_per_meter.to_le_bytes());
        out[32..36].copy_from_slice(&self.colors_used.to_le_bytes());
        out[36..40].copy_from_slice(&self.colors_important.to_le_bytes());
        out
    }
}

/// Check that the headers describe an uncompressed, unpaletted, bottom-up
/// 24-bit bitmap.
///
/// Constraints are checked in a fixed order and the first violation is
/// reported. Width is checked last: it only has to be positive so that the
/// row stride used to derive the height is never zero.
pub fn validate(file: &FileHeader, info: &InfoHeader) -> Result<(), FormatError> {
    if file.magic != BMP_MAGIC {
        return Err(FormatError::BadMagic(file.magic));
    }
    if info.header_size != INFO_HEADER_SIZE as u32 {
        return Err(FormatError::HeaderSize(info.header_size));
    }
    if info.height <= 0 {
        return Err(FormatError::NonPositiveHeight(info.height));
    }
    if info.bits_per_pixel != 24 {
        return Err(FormatError::BitsPerPixel(info.bits_per_pixel));
    }
    if info.compression != 0 {
        return Err(FormatError::Compression(info.compression));
    }
    if info.colors_used != 0 {
        return Err(FormatError::Palette(info.colors_used));
    }
    if info.width <= 0 {
        return Err(FormatError::NonPositiveWidth(info.width));
    }
    Ok(())
}

/// Dimensions of the pixel buffer implied by a validated info header.
///
/// The height is derived from `image_size_bytes`, not taken from the
/// `height` field, so an internally inconsistent file decodes to whatever
/// row count its declared pixel-array size holds.
pub fn decoded_dimensions(info: &InfoHeader) -> (u32, u32) {
    let width = info.width.max(0) as u32;
    let stride = row_stride(width);
    if stride == 0 {
        return (width, 0);
    }
    let height = u64::from(info.image_size_bytes) / stride;
    (width, height as u32)
}

/// Parse and validate both headers from the start of `bytes`.
pub fn parse_headers(bytes: &[u8]) -> Result<(FileHeader, InfoHeader), BmpError> {
    let header_bytes = bytes
        .get(..PIXEL_DATA_START)
        .ok_or(BmpError::TruncatedInput("bitmap headers"))?;

    let mut file_bytes = [0u8; FILE_HEADER_SIZE];
    file_bytes.copy_from_slice(&header_bytes[..FILE_HEADER_SIZE]);
    let mut info_bytes = [0u8; INFO_HEADER_SIZE];
    info_bytes.copy_from_slice(&header_bytes[FILE_HEADER_SIZE..]);

    let file = FileHeader::parse(&file_bytes);
    let info = InfoHeader::parse(&info_bytes);
    validate(&file, &info)?;
    Ok((file, info))
}

/// Rewrite the geometry-dependent header fields for a `width` x `height` view.
///
/// Every other field is left exactly as decoded.
pub fn resync_geometry(file: &mut FileHeader, info: &mut InfoHeader, width: u32, height: u32) {
    let image_size = u64::from(height) * row_stride(width);
    let file_size = PIXEL_DATA_START as u64 + image_size;

    file.file_size = u32::try_from(file_size).unwrap_or(u32::MAX);
    info.width = i32::try_from(width).unwrap_or(i32::MAX);
    info.height = i32::try_from(height).unwrap_or(i32::MAX);
    info.image_size_bytes = u32::try_from(image_size).unwrap_or(u32::MAX);
}

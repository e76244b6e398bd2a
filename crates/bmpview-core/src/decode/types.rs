//! Core types for bitmap decoding.

use serde::{Deserialize, Serialize};

/// The "BM" signature, as read little-endian from the first two bytes.
pub const BMP_MAGIC: u16 = 0x4D42;

/// Size of the file header on disk.
pub const FILE_HEADER_SIZE: usize = 14;

/// Size of the BITMAPINFOHEADER (version 3) on disk.
pub const INFO_HEADER_SIZE: usize = 40;

/// Offset of the first pixel row; rows always start right after both headers.
pub const PIXEL_DATA_START: usize = FILE_HEADER_SIZE + INFO_HEADER_SIZE;

/// BITMAPFILEHEADER fields, in on-disk order.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FileHeader {
    /// File signature, "BM" for every supported file.
    pub magic: u16,
    /// Total file size in bytes.
    pub file_size: u32,
    pub reserved1: u16,
    pub reserved2: u16,
    /// Offset of the pixel array. Copied through, never used for reading.
    pub pixel_data_offset: u32,
}

/// BITMAPINFOHEADER fields, in on-disk order.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct InfoHeader {
    /// Size of this header; 40 for the only supported version.
    pub header_size: u32,
    pub width: i32,
    /// Positive for bottom-up bitmaps, the only supported layout.
    pub height: i32,
    pub planes: u16,
    pub bits_per_pixel: u16,
    pub compression: u32,
    /// Size of the pixel array in bytes, including row padding.
    pub image_size_bytes: u32,
    pub x_pixels_per_meter: i32,
    pub y_pixels_per_meter: i32,
    pub colors_used: u32,
    pub colors_important: u32,
}

/// A single 24-bit pixel, stored and transmitted as Blue, Green, Red.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Pixel {
    pub blue: u8,
    pub green: u8,
    pub red: u8,
}

impl Pixel {
    pub const BLACK: Pixel = Pixel::new(0, 0, 0);

    /// Create a pixel from its channels in storage order.
    pub const fn new(blue: u8, green: u8, red: u8) -> Self {
        Self { blue, green, red }
    }

    /// Build a pixel from three bytes in storage order.
    #[inline]
    pub fn from_bgr(bytes: [u8; 3]) -> Self {
        Self::new(bytes[0], bytes[1], bytes[2])
    }

    /// The pixel's bytes in storage order.
    #[inline]
    pub fn to_bgr(self) -> [u8; 3] {
        [self.blue, self.green, self.red]
    }
}

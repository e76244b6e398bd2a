//! bmpview Core - 24-bit bitmap crop and rotate library
//!
//! This crate decodes uncompressed 24-bit BMP files, applies crops and
//! quarter-turn rotations to a lazy view of the pixel grid, and re-encodes
//! the view in the same format. The pixel grid is decoded once and never
//! copied or rearranged.

pub mod decode;
pub mod encode;
pub mod error;
pub mod image;
pub mod source;
pub mod transform;

pub use decode::{FileHeader, InfoHeader, Pixel, PixelBuffer};
pub use encode::{encode_bmp, encode_bmp_to_vec};
pub use error::{BmpError, FormatError, TransportError};
pub use image::BmpImage;
pub use source::{ByteSource, FileSource, MemorySource};
pub use transform::{Borders, Rotation, ViewState};

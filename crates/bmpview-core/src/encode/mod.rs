//! Bitmap encoding for bmpview.
//!
//! This module provides functionality for:
//! - Writing the current view of a [`BmpImage`](crate::BmpImage) as a 24-bit
//!   uncompressed bitmap, to any `std::io::Write` sink or to a `Vec<u8>`
//!
//! # Examples
//!
//! ```ignore
//! use bmpview_core::encode::encode_bmp_to_vec;
//!
//! let bytes = encode_bmp_to_vec(&image)?;
//! std::fs::write("out.bmp", bytes)?;
//! ```

mod bmp;

pub use bmp::{encode_bmp, encode_bmp_to_vec};

//! Lazy view transforms: cropping and quarter-turn rotation.
//!
//! This module never touches pixel data. A [`ViewState`] records which
//! sub-rectangle of the decoded grid is selected and how many clockwise
//! quarter turns have been applied; every pixel access is resolved through
//! that state with index arithmetic.
//!
//! # Transform Order
//!
//! Crops and rotations may be interleaved in any order. Each crop is
//! expressed in the coordinates of the view as it looks *at that moment*,
//! i.e. after all earlier rotations.
//!
//! # Coordinate System
//!
//! - Crop rectangles: origin at the top-left of the current view
//! - Pixel reads: `y = 0` is the first row written on output, which is the
//!   bottom scanline (bitmaps store rows bottom-to-top)
//! - Borders: always in the upright, un-rotated original picture

mod rotation;
mod view;

pub use rotation::Rotation;
pub use view::{Borders, ViewState};

//! Quarter-turn rotation state and the coordinate mappings it selects.
//!
//! A view never materializes a rotated copy of the pixel grid. Instead the
//! rotation selects one of four mappings:
//!
//! - [`Rotation::crop_borders`] turns a crop rectangle expressed in the
//!   rotated view into border coordinates in the original, un-rotated space.
//! - [`Rotation::source_position`] turns a view coordinate into a
//!   (column, row) position in the stored grid.
//!
//! # Coordinate Spaces
//!
//! ```text
//! original space        rotated view (Clockwise90)
//!   left    right
//!  top ┌──────┐          ┌────┐  x grows toward the original top edge
//!      │ F    │   ──▶    │  F │  y grows toward the original right edge
//! bottom └──────┘        └────┘
//! ```
//!
//! Borders are always measured in the upright original picture with the
//! origin at its top-left corner. The stored grid is bottom-up, so stored
//! row 0 is upright row `buffer_height - 1`.

use serde::{Deserialize, Serialize};

use super::view::Borders;

/// Number of accumulated 90° clockwise turns, modulo 4.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Hash, Serialize, Deserialize)]
pub enum Rotation {
    #[default]
    None,
    Clockwise90,
    Clockwise180,
    Clockwise270,
}

impl Rotation {
    /// Build a rotation from a turn count, taken modulo 4.
    pub const fn from_quarter_turns(turns: u32) -> Self {
        match turns & 3 {
            0 => Self::None,
            1 => Self::Clockwise90,
            2 => Self::Clockwise180,
            _ => Self::Clockwise270,
        }
    }

    /// Turn count in `0..4`.
    pub const fn quarter_turns(self) -> u8 {
        match self {
            Self::None => 0,
            Self::Clockwise90 => 1,
            Self::Clockwise180 => 2,
            Self::Clockwise270 => 3,
        }
    }

    /// The rotation after one more clockwise quarter turn.
    pub const fn clockwise(self) -> Self {
        Self::from_quarter_turns(self.quarter_turns() as u32 + 1)
    }

    /// Whether width and height trade places at this rotation.
    #[inline]
    pub const fn swaps_axes(self) -> bool {
        matches!(self, Self::Clockwise90 | Self::Clockwise270)
    }

    /// View dimensions for a border rectangle spanning `width` x `height`
    /// in original space.
    #[inline]
    pub const fn view_dimensions(self, width: u64, height: u64) -> (u64, u64) {
        if self.swaps_axes() {
            (height, width)
        } else {
            (width, height)
        }
    }

    /// Borders that select the view-space rectangle `(x, y, w, h)`, where
    /// `(0, 0)` is the top-left corner of the current view.
    ///
    /// Nothing is validated here; the result may lie outside the grid.
    pub fn crop_borders(self, current: Borders, x: u32, y: u32, w: u32, h: u32) -> Borders {
        let (x, y, w, h) = (i64::from(x), i64::from(y), i64::from(w), i64::from(h));
        let Borders {
            left,
            right,
            top,
            bottom,
        } = current;

        match self {
            Self::None => {
                let left = left + x;
                let top = top + y;
                Borders {
                    left,
                    right: left + w,
                    top,
                    bottom: top + h,
                }
            }
            // View x runs up the original picture, view y runs right.
            Self::Clockwise90 => {
                let bottom = bottom - x;
                let left = left + y;
                Borders {
                    left,
                    right: left + h,
                    top: bottom - w,
                    bottom,
                }
            }
            Self::Clockwise180 => {
                let right = right - x;
                let bottom = bottom - y;
                Borders {
                    left: right - w,
                    right,
                    top: bottom - h,
                    bottom,
                }
            }
            // View x runs down the original picture, view y runs left.
            Self::Clockwise270 => {
                let top = top + x;
                let right = right - y;
                Borders {
                    left: right - h,
                    right,
                    top,
                    bottom: top + w,
                }
            }
        }
    }

    /// Stored (column, row) of view pixel `(x, y)`.
    ///
    /// `y` counts rows in output order: `y = 0` is the first row an encoder
    /// writes, i.e. the bottom scanline of the rotated view. `borders` must
    /// already be validated against a grid of `buffer_height` rows.
    #[inline]
    pub fn source_position(self, borders: &Borders, buffer_height: u32, x: u32, y: u32) -> (u64, u64) {
        let (x, y) = (i64::from(x), i64::from(y));
        let span_x = borders.right - borders.left;
        let span_y = borders.bottom - borders.top;
        // Stored row holding the bottom edge of the view rectangle.
        let base_row = i64::from(buffer_height) - borders.bottom;

        let (col, row) = match self {
            Self::None => (borders.left + x, base_row + y),
            Self::Clockwise90 => (borders.left + span_x - y - 1, base_row + x),
            Self::Clockwise180 => (borders.left + span_x - x - 1, base_row + span_y - y - 1),
            Self::Clockwise270 => (borders.left + y, base_row + span_y - x - 1),
        };
        (col as u64, row as u64)
    }
}

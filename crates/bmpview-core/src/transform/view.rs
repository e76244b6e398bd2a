//! The view transform engine: a border rectangle plus a rotation, resolved
//! against a fixed-size grid without ever copying it.

use serde::{Deserialize, Serialize};

use super::rotation::Rotation;
use crate::error::BmpError;

/// A sub-rectangle of the upright original picture, origin at its top-left.
///
/// Satisfies `0 <= left <= right <= width` and `0 <= top <= bottom <= height`
/// once validated against a grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Borders {
    pub left: i64,
    pub right: i64,
    pub top: i64,
    pub bottom: i64,
}

impl Borders {
    /// Borders covering a whole `width` x `height` grid.
    pub fn full(width: u32, height: u32) -> Self {
        Self {
            left: 0,
            right: i64::from(width),
            top: 0,
            bottom: i64::from(height),
        }
    }

    /// Width and height of the rectangle in original space.
    #[inline]
    pub fn spans(&self) -> (u64, u64) {
        (
            (self.right - self.left).max(0) as u64,
            (self.bottom - self.top).max(0) as u64,
        )
    }

    fn region_error(&self) -> BmpError {
        BmpError::InvalidRegion {
            left: self.left,
            right: self.right,
            top: self.top,
            bottom: self.bottom,
        }
    }
}

/// Border rectangle and rotation over a `buffer_width` x `buffer_height` grid.
///
/// The only mutators are [`crop`](Self::crop) and
/// [`rotate_clockwise`](Self::rotate_clockwise). Both validate the new state
/// before committing it, so a failed call leaves the view untouched.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ViewState {
    borders: Borders,
    rotation: Rotation,
    buffer_width: u32,
    buffer_height: u32,
}

impl ViewState {
    /// An unrotated view of the whole grid.
    pub fn new(buffer_width: u32, buffer_height: u32) -> Self {
        Self {
            borders: Borders::full(buffer_width, buffer_height),
            rotation: Rotation::None,
            buffer_width,
            buffer_height,
        }
    }

    #[inline]
    pub fn borders(&self) -> Borders {
        self.borders
    }

    #[inline]
    pub fn rotation(&self) -> Rotation {
        self.rotation
    }

    /// Width as seen through the current rotation.
    #[inline]
    pub fn effective_width(&self) -> u32 {
        let (w, h) = self.borders.spans();
        self.rotation.view_dimensions(w, h).0 as u32
    }

    /// Height as seen through the current rotation.
    #[inline]
    pub fn effective_height(&self) -> u32 {
        let (w, h) = self.borders.spans();
        self.rotation.view_dimensions(w, h).1 as u32
    }

    /// Check the invariant `0 <= left <= right <= width`,
    /// `0 <= top <= bottom <= height` for candidate borders.
    fn check(&self, borders: &Borders) -> Result<(), BmpError> {
        let horizontal =
            0 <= borders.left && borders.left <= borders.right && borders.right <= i64::from(self.buffer_width);
        let vertical =
            0 <= borders.top && borders.top <= borders.bottom && borders.bottom <= i64::from(self.buffer_height);
        if horizontal && vertical {
            Ok(())
        } else {
            Err(borders.region_error())
        }
    }

    /// Narrow the view to a rectangle of the current view.
    ///
    /// The rectangle is given in the coordinates of the view as it looks
    /// now, after every earlier rotation, and is translated into border
    /// coordinates of the upright original picture.
    ///
    /// # Arguments
    ///
    /// * `x` - Left edge of the rectangle, from the view's left side
    /// * `y` - Top edge of the rectangle, from the view's top side
    /// * `w` - Width of the rectangle in view pixels
    /// * `h` - Height of the rectangle in view pixels
    ///
    /// # Returns
    ///
    /// `Ok(())` once the new borders are committed, or
    /// [`BmpError::InvalidRegion`] carrying the rejected borders.
    ///
    /// # Behavior
    ///
    /// - The rectangle must fit inside the current view (`x + w` at most the
    ///   effective width, `y + h` at most the effective height)
    /// - The resulting borders must also lie inside the pixel grid
    /// - On error the view is left exactly as it was
    /// - A zero-sized rectangle is accepted and yields an empty view
    /// - The rotation is unchanged
    pub fn crop(&mut self, x: u32, y: u32, w: u32, h: u32) -> Result<(), BmpError> {
        let candidate = self.rotation.crop_borders(self.borders, x, y, w, h);

        let fits_view = u64::from(x) + u64::from(w) <= u64::from(self.effective_width())
            && u64::from(y) + u64::from(h) <= u64::from(self.effective_height());
        if !fits_view {
            return Err(candidate.region_error());
        }
        self.check(&candidate)?;

        self.borders = candidate;
        tracing::debug!(
            x, y, w, h,
            rotation = self.rotation.quarter_turns(),
            borders = ?self.borders,
            "crop applied"
        );
        Ok(())
    }

    /// Turn the view a quarter turn clockwise.
    ///
    /// # Behavior
    ///
    /// - Borders are unchanged; effective width and height trade places
    /// - Four turns bring the view back to its starting orientation
    /// - The current borders are re-checked against the grid first, and an
    ///   out-of-grid state is reported as [`BmpError::InvalidRegion`]
    pub fn rotate_clockwise(&mut self) -> Result<(), BmpError> {
        self.check(&self.borders)?;
        self.rotation = self.rotation.clockwise();
        tracing::debug!(rotation = self.rotation.quarter_turns(), "rotated clockwise");
        Ok(())
    }

    /// Flat index of view pixel `(x, y)`, or `None` outside the view.
    ///
    /// `y = 0` is the first row written on output (the bottom scanline of
    /// the view).
    pub fn index(&self, x: u32, y: u32) -> Option<usize> {
        if x >= self.effective_width() || y >= self.effective_height() {
            return None;
        }
        Some(self.index_unchecked(x, y))
    }

    /// Flat index of view pixel `(x, y)`; the caller guarantees the
    /// coordinates are in range.
    #[inline]
    pub(crate) fn index_unchecked(&self, x: u32, y: u32) -> usize {
        debug_assert!(x < self.effective_width() && y < self.effective_height());
        let (col, row) = self
            .rotation
            .source_position(&self.borders, self.buffer_height, x, y);
        (row * u64::from(self.buffer_width) + col) as usize
    }
}


// ============================================================================
// Property-Based Tests
// ============================================================================

#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    /// One step of an edit sequence. Crop fields are fractions of the
    /// current view, turned into pixels when applied.
    #[derive(Debug, Clone)]
    enum Op {
        Rotate,
        Crop(f64, f64, f64, f64),
    }

    fn dimensions_strategy() -> impl Strategy<Value = (u32, u32)> {
        (1u32..=12, 1u32..=12)
    }

    fn op_strategy() -> impl Strategy<Value = Op> {
        prop_oneof![
            Just(Op::Rotate),
            (0.0f64..1.0, 0.0f64..1.0, 0.0f64..=1.0, 0.0f64..=1.0)
                .prop_map(|(x, y, w, h)| Op::Crop(x, y, w, h)),
        ]
    }

    /// Turn fractional crop parameters into a rectangle inside a
    /// `width` x `height` view.
    fn crop_rect(width: u32, height: u32, fx: f64, fy: f64, fw: f64, fh: f64) -> (u32, u32, u32, u32) {
        let x = (fx * width as f64) as u32;
        let y = (fy * height as f64) as u32;
        let w = (fw * (width - x) as f64).round() as u32;
        let h = (fh * (height - y) as f64).round() as u32;
        (x.min(width), y.min(height), w, h)
    }

    /// Copy-based reference: the view as a top-down grid of stored indices.
    #[derive(Debug, Clone)]
    struct Reference {
        rows: Vec<Vec<usize>>,
        width: usize,
    }

    impl Reference {
        fn new(width: u32, height: u32) -> Self {
            // Top-down row r is stored row height - 1 - r.
            let rows = (0..height)
                .map(|r| {
                    let stored = (height - 1 - r) as usize;
                    (0..width as usize).map(|c| stored * width as usize + c).collect()
                })
                .collect();
            Self {
                rows,
                width: width as usize,
            }
        }

        fn height(&self) -> usize {
            self.rows.len()
        }

        fn rotate_clockwise(&mut self) {
            let (w, h) = (self.width, self.height());
            let rows = (0..w)
                .map(|r| (0..h).map(|c| self.rows[h - 1 - c][r]).collect())
                .collect();
            self.rows = rows;
            self.width = h;
        }

        fn crop(&mut self, x: u32, y: u32, w: u32, h: u32) {
            let (x, y, w, h) = (x as usize, y as usize, w as usize, h as usize);
            self.rows = self.rows[y..y + h]
                .iter()
                .map(|row| row[x..x + w].to_vec())
                .collect();
            self.width = w;
        }
    }

    fn apply(view: &mut ViewState, reference: &mut Reference, op: &Op) {
        match *op {
            Op::Rotate => {
                view.rotate_clockwise().unwrap();
                reference.rotate_clockwise();
            }
            Op::Crop(fx, fy, fw, fh) => {
                let (x, y, w, h) =
                    crop_rect(view.effective_width(), view.effective_height(), fx, fy, fw, fh);
                view.crop(x, y, w, h).unwrap();
                reference.crop(x, y, w, h);
            }
        }
    }

    /// Every index of the view, in output order.
    fn indices(view: &ViewState) -> Vec<usize> {
        let mut out = Vec::new();
        for y in 0..view.effective_height() {
            for x in 0..view.effective_width() {
                out.push(view.index(x, y).unwrap());
            }
        }
        out
    }

    proptest! {
        /// Property: lazy views agree with an explicitly rotated and cropped copy.
        #[test]
        fn prop_matches_materialized_reference(
            (width, height) in dimensions_strategy(),
            ops in proptest::collection::vec(op_strategy(), 0..8),
        ) {
            let mut view = ViewState::new(width, height);
            let mut reference = Reference::new(width, height);

            for op in &ops {
                apply(&mut view, &mut reference, op);

                prop_assert_eq!(view.effective_width() as usize, reference.width);
                prop_assert_eq!(view.effective_height() as usize, reference.height());
                let eh = view.effective_height();
                for y in 0..eh {
                    for x in 0..view.effective_width() {
                        // Output row 0 is the bottom row of the top-down grid.
                        let expected = reference.rows[(eh - 1 - y) as usize][x as usize];
                        prop_assert_eq!(view.index(x, y), Some(expected));
                    }
                }
            }
        }

        /// Property: four clockwise turns restore dimensions and every index.
        #[test]
        fn prop_full_cycle_is_identity(
            (width, height) in dimensions_strategy(),
            ops in proptest::collection::vec(op_strategy(), 0..4),
        ) {
            let mut view = ViewState::new(width, height);
            let mut reference = Reference::new(width, height);
            for op in &ops {
                apply(&mut view, &mut reference, op);
            }

            let before = (view.effective_width(), view.effective_height(), indices(&view));
            for _ in 0..4 {
                view.rotate_clockwise().unwrap();
            }
            let after = (view.effective_width(), view.effective_height(), indices(&view));
            prop_assert_eq!(before, after);
        }

        /// Property: a crop inside the view yields exactly the requested size.
        #[test]
        fn prop_crop_sets_effective_dimensions(
            (width, height) in dimensions_strategy(),
            turns in 0u32..4,
            (fx, fy, fw, fh) in (0.0f64..1.0, 0.0f64..1.0, 0.0f64..=1.0, 0.0f64..=1.0),
        ) {
            let mut view = ViewState::new(width, height);
            for _ in 0..turns {
                view.rotate_clockwise().unwrap();
            }
            let (x, y, w, h) =
                crop_rect(view.effective_width(), view.effective_height(), fx, fy, fw, fh);
            view.crop(x, y, w, h).unwrap();
            prop_assert_eq!(view.effective_width(), w);
            prop_assert_eq!(view.effective_height(), h);
        }

        /// Property: every index is distinct and inside the grid.
        #[test]
        fn prop_indices_are_bijective(
            (width, height) in dimensions_strategy(),
            ops in proptest::collection::vec(op_strategy(), 0..8),
        ) {
            let mut view = ViewState::new(width, height);
            let mut reference = Reference::new(width, height);
            for op in &ops {
                apply(&mut view, &mut reference, op);
            }

            let all = indices(&view);
            let unique: std::collections::HashSet<_> = all.iter().copied().collect();
            prop_assert_eq!(unique.len(), all.len());
            prop_assert!(all.iter().all(|&i| i < (width * height) as usize));
        }

        /// Property: rotate, crop, then three more turns selects the same
        /// pixels as the equivalent crop applied without rotation.
        #[test]
        fn prop_rotated_crop_composes(
            (width, height) in dimensions_strategy(),
            (fx, fy, fw, fh) in (0.0f64..1.0, 0.0f64..1.0, 0.0f64..=1.0, 0.0f64..=1.0),
        ) {
            let mut rotated = ViewState::new(width, height);
            rotated.rotate_clockwise().unwrap();
            let (x, y, w, h) =
                crop_rect(rotated.effective_width(), rotated.effective_height(), fx, fy, fw, fh);
            rotated.crop(x, y, w, h).unwrap();
            for _ in 0..3 {
                rotated.rotate_clockwise().unwrap();
            }

            // Undo one clockwise turn of the rectangle: the rotated view is
            // `height` wide, and its x axis runs up the original picture.
            let mut direct = ViewState::new(width, height);
            direct.crop(y, height - x - w, h, w).unwrap();

            prop_assert_eq!(rotated.rotation(), Rotation::None);
            prop_assert_eq!(rotated.borders(), direct.borders());
            prop_assert_eq!(indices(&rotated), indices(&direct));
        }

        /// Property: a crop reaching past the view fails and changes nothing.
        #[test]
        fn prop_oversized_crop_is_atomic(
            (width, height) in dimensions_strategy(),
            turns in 0u32..4,
            overflow in 1u32..5,
            horizontal in any::<bool>(),
        ) {
            let mut view = ViewState::new(width, height);
            for _ in 0..turns {
                view.rotate_clockwise().unwrap();
            }
            let before = view;
            let (ew, eh) = (view.effective_width(), view.effective_height());

            let result = if horizontal {
                view.crop(0, 0, ew + overflow, eh)
            } else {
                view.crop(0, 0, ew, eh + overflow)
            };
            let rejected = matches!(result, Err(BmpError::InvalidRegion { .. }));
            prop_assert!(rejected, "oversized crop accepted: {:?}", result);
            prop_assert_eq!(view, before);
        }
    }
}


use std::num::NonZeroUsize;

use crate::{
    frame::{BlockPos, Frame},
    mv::MotionVector,
    params::{DCT_SIZE, PixelSearch},
};

/// The vectors that keep a block's prediction inside the reference frame.
///
/// Lower bounds are inclusive, upper bounds exclusive, all in half-pel units.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SearchRange {
    pub left_y: i32,
    pub left_x: i32,
    pub right_y: i32,
    pub right_x: i32,
}

impl SearchRange {
    /// Bounds for the macroblock at `pos` in a `width` x `height` frame.
    ///
    /// With full-pel steps the upper bounds are one larger, so that stepping
    /// from the lower bound by 2 reaches the last whole-sample position.
    #[must_use]
    pub fn compute(
        pos: BlockPos,
        pixel: PixelSearch,
        width: NonZeroUsize,
        height: NonZeroUsize,
    ) -> Self {
        let dct = DCT_SIZE as i64;
        let (by, bx) = (pos.by as i64, pos.bx as i64);
        let (width, height) = (width.get() as i64, height.get() as i64);

        let mut right_y = 2 * (height - (by + 2) * dct + 1) - 1;
        let mut right_x = 2 * (width - (bx + 2) * dct + 1) - 1;
        if pixel.step_size() == 2 {
            right_y += 1;
            right_x += 1;
        }

        SearchRange {
            left_y: (-2 * dct * by) as i32,
            left_x: (-2 * dct * bx) as i32,
            right_y: right_y as i32,
            right_x: right_x as i32,
        }
    }

    #[must_use]
    pub fn for_frame(pos: BlockPos, pixel: PixelSearch, frame: &Frame) -> Self {
        Self::compute(pos, pixel, frame.width(), frame.height())
    }

    #[must_use]
    pub const fn contains(&self, mv: MotionVector) -> bool {
        self.left_y <= mv.y && mv.y < self.right_y && self.left_x <= mv.x && mv.x < self.right_x
    }
}

/// Where a single block search may look: the frame bounds, the step grid and the search radius.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SearchWindow {
    bounds: SearchRange,
    step: i32,
    range: i32,
}

impl SearchWindow {
    /// `range` is the search radius in half-pel units.
    #[must_use]
    pub const fn new(bounds: SearchRange, pixel: PixelSearch, range: i32) -> Self {
        SearchWindow {
            bounds,
            step: pixel.step_size(),
            range,
        }
    }

    #[must_use]
    pub fn for_block(frame: &Frame, pos: BlockPos, pixel: PixelSearch, range: i32) -> Self {
        Self::new(SearchRange::for_frame(pos, pixel, frame), pixel, range)
    }

    /// Inside the frame bounds and on the step grid.
    #[must_use]
    pub const fn is_valid(&self, mv: MotionVector) -> bool {
        self.bounds.contains(mv) && mv.y % self.step == 0 && mv.x % self.step == 0
    }

    /// Valid, and no further than the search radius from the zero vector.
    #[must_use]
    pub const fn is_candidate(&self, mv: MotionVector) -> bool {
        self.is_valid(mv) && mv.y.abs() <= self.range && mv.x.abs() <= self.range
    }

    #[must_use]
    pub const fn step(&self) -> i32 {
        self.step
    }

    #[must_use]
    pub const fn range(&self) -> i32 {
        self.range
    }

    #[must_use]
    pub const fn bounds(&self) -> SearchRange {
        self.bounds
    }
}

#[cfg(test)]
mod tests;

use anyhow::{Result, bail};
use log::{debug, trace};
use rayon::prelude::*;

use crate::{
    boundary::SearchWindow,
    bsearch::{self, BMotion},
    cost::{BlockCost, LumMotionError, MAX_COST},
    frame::{BlockPos, Frame, LumBlock, ReferenceFrame},
    mv::{BlockMatch, MotionVector},
    params::{
        BMotionType,
        BSearchAlgorithm,
        DEFAULT_SEARCH_RANGE,
        PSearchAlgorithm,
        PixelSearch,
        half_pel_range,
    },
    psearch::{local_search, logarithmic_search, subsample_search, two_level_search},
};

/// Which algorithms a motion search uses and how far it looks.
///
/// Searches only borrow this, so it can't change while a frame is being searched.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MotionSearch {
    psearch: PSearchAlgorithm,
    bsearch: BSearchAlgorithm,
    /// P-frame search range, in half-pels
    range_p: i32,
    /// B-frame search range, in half-pels
    range_b: i32,
    pixel: PixelSearch,
}

impl Default for MotionSearch {
    fn default() -> Self {
        MotionSearch {
            psearch: PSearchAlgorithm::default(),
            bsearch: BSearchAlgorithm::default(),
            range_p: 2 * DEFAULT_SEARCH_RANGE as i32,
            range_b: 2 * DEFAULT_SEARCH_RANGE as i32,
            pixel: PixelSearch::default(),
        }
    }
}

impl MotionSearch {
    /// Builds a configuration, using the default for every argument left out.
    ///
    /// Ranges are in whole pixels.
    pub fn new(
        psearch: Option<&str>,
        bsearch: Option<&str>,
        range_p: Option<i64>,
        range_b: Option<i64>,
        pixel: Option<&str>,
    ) -> Result<Self> {
        let psearch = psearch.map_or(Ok(PSearchAlgorithm::default()), str::parse)?;
        let bsearch = bsearch.map_or(Ok(BSearchAlgorithm::default()), str::parse)?;
        let range_p = half_pel_range(range_p.unwrap_or(DEFAULT_SEARCH_RANGE), "RANGE_P")?;
        let range_b = half_pel_range(range_b.unwrap_or(DEFAULT_SEARCH_RANGE), "RANGE_B")?;
        let pixel = pixel.map_or(Ok(PixelSearch::default()), str::parse)?;

        Ok(MotionSearch {
            psearch,
            bsearch,
            range_p,
            range_b,
            pixel,
        })
    }

    /// Selects the P-frame algorithm by name. An unknown name is an error and keeps the current one.
    pub fn set_p_search_alg(&mut self, name: &str) -> Result<()> {
        self.psearch = name.parse()?;
        debug!("P search algorithm set to {}", self.psearch);
        Ok(())
    }

    /// Selects the B-frame algorithm by name. An unknown name is an error and keeps the current one.
    pub fn set_b_search_alg(&mut self, name: &str) -> Result<()> {
        self.bsearch = name.parse()?;
        debug!("B search algorithm set to {}", self.bsearch);
        Ok(())
    }

    pub fn set_pixel_search(&mut self, name: &str) -> Result<()> {
        self.pixel = name.parse()?;
        debug!("pixel search set to {}", self.pixel);
        Ok(())
    }

    /// Sets both search ranges, in whole pixels. Nothing changes unless both are valid.
    pub fn set_search_range(&mut self, p_pixels: i64, b_pixels: i64) -> Result<()> {
        let range_p = half_pel_range(p_pixels, "RANGE_P")?;
        let range_b = half_pel_range(b_pixels, "RANGE_B")?;
        self.range_p = range_p;
        self.range_b = range_b;
        debug!("search ranges set to P {p_pixels}, B {b_pixels} pixels");
        Ok(())
    }

    #[must_use]
    pub const fn p_search_name(&self) -> &'static str {
        self.psearch.name()
    }

    #[must_use]
    pub const fn b_search_name(&self) -> &'static str {
        self.bsearch.name()
    }

    #[must_use]
    pub const fn p_search_alg(&self) -> PSearchAlgorithm {
        self.psearch
    }

    #[must_use]
    pub const fn b_search_alg(&self) -> BSearchAlgorithm {
        self.bsearch
    }

    #[must_use]
    pub const fn pixel_search(&self) -> PixelSearch {
        self.pixel
    }

    /// P-frame search range, in half-pels.
    #[must_use]
    pub const fn range_p(&self) -> i32 {
        self.range_p
    }

    /// B-frame search range, in half-pels.
    #[must_use]
    pub const fn range_b(&self) -> i32 {
        self.range_b
    }

    /// Runs the configured P-frame algorithm.
    ///
    /// Only the exhaustive and two-level searches use `best_so_far`; the others
    /// always return their best candidate.
    pub fn find_best_match<C: BlockCost + ?Sized>(
        &self,
        cost: &C,
        window: &SearchWindow,
        start: MotionVector,
        best_so_far: i32,
    ) -> BlockMatch {
        match self.psearch {
            PSearchAlgorithm::Subsample => subsample_search(cost, window, start),
            PSearchAlgorithm::Exhaustive => local_search(cost, window, start, best_so_far),
            PSearchAlgorithm::Logarithmic => logarithmic_search(cost, window, start),
            PSearchAlgorithm::TwoLevel => two_level_search(cost, window, start, best_so_far),
        }
    }

    #[must_use]
    pub fn p_window(&self, reference: &ReferenceFrame, pos: BlockPos) -> SearchWindow {
        SearchWindow::for_block(reference.frame(), pos, self.pixel, self.range_p)
    }

    #[must_use]
    pub fn b_window(&self, reference: &ReferenceFrame, pos: BlockPos) -> SearchWindow {
        SearchWindow::for_block(reference.frame(), pos, self.pixel, self.range_b)
    }

    pub(crate) fn directional_search(
        &self,
        block: &LumBlock,
        reference: &ReferenceFrame,
        pos: BlockPos,
        start: MotionVector,
        range: i32,
    ) -> BlockMatch {
        debug_assert!(reference.frame().contains(pos));
        let cost = LumMotionError::new(block, reference, pos);
        let window = SearchWindow::for_block(reference.frame(), pos, self.pixel, range);
        self.find_best_match(&cost, &window, start, MAX_COST)
    }

    /// Best match for `block` in the previous frame, searched within the P range.
    #[must_use]
    pub fn p_motion_search(
        &self,
        block: &LumBlock,
        prev: &ReferenceFrame,
        pos: BlockPos,
        start: MotionVector,
    ) -> BlockMatch {
        self.directional_search(block, prev, pos, start, self.range_p)
    }

    /// Best prediction for a B-frame block from the surrounding reference frames.
    ///
    /// Without a previous frame, only backward prediction is possible.
    #[must_use]
    pub fn b_motion_search(
        &self,
        block: &LumBlock,
        prev: Option<&ReferenceFrame>,
        next: &ReferenceFrame,
        pos: BlockPos,
    ) -> BMotion {
        let Some(prev) = prev else {
            let backward =
                self.directional_search(block, next, pos, MotionVector::zero(), self.range_b);
            return BMotion::backward_only(backward);
        };

        match self.bsearch {
            BSearchAlgorithm::Exhaustive => bsearch::exhaustive(self, block, prev, next, pos),
            BSearchAlgorithm::Cross2 => bsearch::cross2(self, block, prev, next, pos),
            BSearchAlgorithm::Simple => bsearch::simple(self, block, prev, next, pos),
        }
    }

    /// Searches every macroblock of a P frame, in raster order.
    pub fn estimate_p_frame(
        &self,
        current: &Frame,
        prev: &ReferenceFrame,
    ) -> Result<Vec<BlockMatch>> {
        check_dimensions(current, prev.frame())?;
        trace!(
            "P search {} over {}x{} macroblocks",
            self.psearch,
            current.mb_cols(),
            current.mb_rows()
        );

        let matches = macroblocks(current)
            .into_par_iter()
            .map(|pos| {
                let block = current.block(pos)?;
                Ok(self.p_motion_search(&block, prev, pos, MotionVector::zero()))
            })
            .collect::<Result<Vec<_>>>()?;

        let total: i64 = matches.iter().map(|m| i64::from(m.cost)).sum();
        debug!("P frame: {} macroblocks, total cost {total}", matches.len());
        Ok(matches)
    }

    /// Searches every macroblock of a B frame, in raster order.
    pub fn estimate_b_frame(
        &self,
        current: &Frame,
        prev: Option<&ReferenceFrame>,
        next: &ReferenceFrame,
    ) -> Result<Vec<BMotion>> {
        check_dimensions(current, next.frame())?;
        if let Some(prev) = prev {
            check_dimensions(current, prev.frame())?;
        }
        trace!(
            "B search {} over {}x{} macroblocks",
            self.bsearch,
            current.mb_cols(),
            current.mb_rows()
        );

        let motions = macroblocks(current)
            .into_par_iter()
            .map(|pos| {
                let block = current.block(pos)?;
                Ok(self.b_motion_search(&block, prev, next, pos))
            })
            .collect::<Result<Vec<_>>>()?;

        let total: i64 = motions.iter().map(|m| i64::from(m.cost)).sum();
        let count = |mode: BMotionType| motions.iter().filter(|m| m.mode == mode).count();
        debug!(
            "B frame: {} macroblocks, total cost {total}, {} forward, {} backward, {} interpolated",
            motions.len(),
            count(BMotionType::FORWARD),
            count(BMotionType::BACKWARD),
            count(BMotionType::INTERPOLATE)
        );
        Ok(motions)
    }
}

fn check_dimensions(current: &Frame, reference: &Frame) -> Result<()> {
    if current.width() != reference.width() || current.height() != reference.height() {
        bail!(
            "Reference frame is {}x{}, but the current frame is {}x{}.",
            reference.width(),
            reference.height(),
            current.width(),
            current.height()
        );
    }
    Ok(())
}

/// Macroblock positions of a frame in raster order.
fn macroblocks(frame: &Frame) -> Vec<BlockPos> {
    let mb_cols = frame.mb_cols();
    (0..frame.mb_rows() * mb_cols)
        .map(|i| BlockPos::from_macroblock(i / mb_cols, i % mb_cols))
        .collect()
}

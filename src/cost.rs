
use std::num::NonZeroUsize;

use crate::{
    frame::{BLOCK_PITCH, BlockPos, LumBlock, ReferenceFrame},
    mv::MotionVector,
    params::MB_SIZE,
    util::{
        get_sad_16xn,
        get_sad_16xn_interp,
        get_sad_16xn_interp_subsampled,
        get_sad_16xn_subsampled,
    },
};

/// Cost that no real match reaches. Searches start from it.
pub const MAX_COST: i32 = i32::MAX;

/// Rows compared between two early-termination checks.
const CHECK_ROWS: usize = 4;

const TWO: NonZeroUsize = NonZeroUsize::MIN.saturating_add(1);

/// One of the four 2x2-phase subsets of a macroblock's samples.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SubsamplePattern {
    /// even rows, even columns
    A,
    /// even rows, odd columns
    B,
    /// odd rows, even columns
    C,
    /// odd rows, odd columns
    D,
}

impl SubsamplePattern {
    pub const ALL: [Self; 4] = [Self::A, Self::B, Self::C, Self::D];

    /// Row and column parity of the samples in this subset.
    #[must_use]
    pub const fn phase(self) -> (usize, usize) {
        match self {
            Self::A => (0, 0),
            Self::B => (0, 1),
            Self::C => (1, 0),
            Self::D => (1, 1),
        }
    }
}

/// How well a candidate vector predicts the block being searched.
///
/// Both methods may stop early: once the running sum exceeds `best_so_far`
/// they return it, so a result above `best_so_far` is only a lower bound.
/// Results at or below `best_so_far` are exact.
pub trait BlockCost {
    /// Sum of absolute differences over the whole macroblock.
    fn error(&self, mv: MotionVector, best_so_far: i32) -> i32;

    /// Sum of absolute differences over a quarter of the macroblock.
    fn subsampled_error(&self, mv: MotionVector, pattern: SubsamplePattern, best_so_far: i32)
    -> i32;
}

/// Error of predicting a block straight from a reference frame.
#[derive(Debug, Clone, Copy)]
pub struct LumMotionError<'a> {
    block: &'a LumBlock,
    reference: &'a ReferenceFrame,
    pos: BlockPos,
}

impl<'a> LumMotionError<'a> {
    #[must_use]
    pub const fn new(block: &'a LumBlock, reference: &'a ReferenceFrame, pos: BlockPos) -> Self {
        LumMotionError {
            block,
            reference,
            pos,
        }
    }
}

impl BlockCost for LumMotionError<'_> {
    fn error(&self, mv: MotionVector, best_so_far: i32) -> i32 {
        let (origin, pitch) = self.reference.motion_origin(self.pos, mv);
        let src = self.block.samples();

        let mut diff = 0;
        for y in (0..MB_SIZE).step_by(CHECK_ROWS) {
            diff += get_sad_16xn::<CHECK_ROWS>(
                &src[y * BLOCK_PITCH.get()..],
                BLOCK_PITCH,
                &origin[y * pitch.get()..],
                pitch,
            ) as i32;
            if diff > best_so_far {
                break;
            }
        }
        diff
    }

    fn subsampled_error(
        &self,
        mv: MotionVector,
        pattern: SubsamplePattern,
        best_so_far: i32,
    ) -> i32 {
        let (origin, pitch) = self.reference.motion_origin(self.pos, mv);
        subsampled_sad(self.block.samples(), origin, pitch, pattern, best_so_far)
    }
}

/// Error of a bidirectional prediction where one half, the partner, is fixed.
///
/// The candidate vector picks the other half from `reference`, and the block
/// is compared against the rounded average of the two.
#[derive(Debug, Clone, Copy)]
pub struct InterpolatedError<'a> {
    block: &'a LumBlock,
    partner: &'a LumBlock,
    reference: &'a ReferenceFrame,
    pos: BlockPos,
}

impl<'a> InterpolatedError<'a> {
    #[must_use]
    pub const fn new(
        block: &'a LumBlock,
        partner: &'a LumBlock,
        reference: &'a ReferenceFrame,
        pos: BlockPos,
    ) -> Self {
        InterpolatedError {
            block,
            partner,
            reference,
            pos,
        }
    }
}

impl BlockCost for InterpolatedError<'_> {
    fn error(&self, mv: MotionVector, best_so_far: i32) -> i32 {
        let (origin, pitch) = self.reference.motion_origin(self.pos, mv);
        let src = self.block.samples();
        let partner = self.partner.samples();

        let mut diff = 0;
        for y in (0..MB_SIZE).step_by(CHECK_ROWS) {
            let offset = y * BLOCK_PITCH.get();
            diff += get_sad_16xn_interp::<CHECK_ROWS>(
                &src[offset..],
                BLOCK_PITCH,
                &partner[offset..],
                BLOCK_PITCH,
                &origin[y * pitch.get()..],
                pitch,
            ) as i32;
            if diff > best_so_far {
                break;
            }
        }
        diff
    }

    fn subsampled_error(
        &self,
        mv: MotionVector,
        pattern: SubsamplePattern,
        best_so_far: i32,
    ) -> i32 {
        let (origin, pitch) = self.reference.motion_origin(self.pos, mv);
        let (row_phase, col_phase) = pattern.phase();
        let block_stride = BLOCK_PITCH.saturating_mul(TWO);
        let ref_stride = pitch.saturating_mul(TWO);
        let src = self.block.samples();
        let partner = self.partner.samples();

        let mut diff = 0;
        for y in (row_phase..MB_SIZE).step_by(2 * CHECK_ROWS) {
            let offset = y * BLOCK_PITCH.get();
            diff += get_sad_16xn_interp_subsampled::<CHECK_ROWS>(
                &src[offset..],
                block_stride,
                &partner[offset..],
                block_stride,
                &origin[y * pitch.get()..],
                ref_stride,
                col_phase,
            ) as i32;
            if diff > best_so_far {
                break;
            }
        }
        diff
    }
}

fn subsampled_sad(
    src: &[u8],
    ref_: &[u8],
    ref_pitch: NonZeroUsize,
    pattern: SubsamplePattern,
    best_so_far: i32,
) -> i32 {
    let (row_phase, col_phase) = pattern.phase();
    // every other row: start on the phase row and skip a row each step
    let src_stride = BLOCK_PITCH.saturating_mul(TWO);
    let ref_stride = ref_pitch.saturating_mul(TWO);

    let mut diff = 0;
    for y in (row_phase..MB_SIZE).step_by(2 * CHECK_ROWS) {
        diff += get_sad_16xn_subsampled::<CHECK_ROWS>(
            &src[y * BLOCK_PITCH.get()..],
            src_stride,
            &ref_[y * ref_pitch.get()..],
            ref_stride,
            col_phase,
        ) as i32;
        if diff > best_so_far {
            break;
        }
    }
    diff
}
